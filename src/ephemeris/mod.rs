use hifitime::{Duration, Epoch, TimeScale};
use log::debug;

use crate::{
    carrier::Carrier,
    constants::SPEED_OF_LIGHT_M_S,
    error::Error,
    state::{Calc, ClockCorrection, PosVelAccel},
};

use gnss::prelude::{Constellation, SV};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod keplerian;

mod bds;
mod galileo;
mod glonass;
mod gps;
mod qzss;
mod sbas;

pub use bds::BdsEphemeris;
pub use galileo::GalileoEphemeris;
pub use glonass::GlonassEphemeris;
pub use gps::GpsEphemeris;
pub use keplerian::Keplerian;
pub use qzss::QzssEphemeris;
pub use sbas::SbasEphemeris;

/// One broadcast navigation message snapshot, per constellation. The set
/// of variants is closed and known at design time: dispatch is exhaustive
/// matching, never open inheritance.
///
/// Every operation borrows the record for the duration of one query and
/// allocates its result fresh: records are immutable, queries carry no
/// hidden state and are freely concurrent.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Ephemeris {
    /// GPS LNAV frame
    Gps(GpsEphemeris),
    /// Galileo INAV frame
    Galileo(GalileoEphemeris),
    /// BeiDou D1/D2 frame
    Bds(BdsEphemeris),
    /// QZSS frame
    Qzss(QzssEphemeris),
    /// GLONASS state vector frame
    Glonass(GlonassEphemeris),
    /// SBAS MT9 frame
    Sbas(SbasEphemeris),
}

/// [EphemerisSource] is how an external decoder feeds broadcast frames to
/// consumers of this engine: provide the freshest decoded [Ephemeris] for
/// each requested satellite.
pub trait EphemerisSource {
    /// Provide the latest [Ephemeris] for requested [SV], valid around
    /// the requested [Epoch], or None when no fresh frame exists.
    fn ephemeris_data(&self, epoch: Epoch, sv: SV) -> Option<Ephemeris>;
}

impl Ephemeris {
    /// [SV] that broadcast this frame
    pub fn sv(&self) -> SV {
        match self {
            Self::Gps(eph) => eph.sv,
            Self::Galileo(eph) => eph.sv,
            Self::Bds(eph) => eph.sv,
            Self::Qzss(eph) => eph.sv,
            Self::Glonass(eph) => eph.sv,
            Self::Sbas(eph) => eph.sv,
        }
    }

    /// [Constellation] this frame belongs to
    pub fn constellation(&self) -> Constellation {
        self.sv().constellation
    }

    /// [TimeScale] all internal time differences are formed in
    pub fn timescale(&self) -> TimeScale {
        match self {
            Self::Gps(_) | Self::Sbas(_) => TimeScale::GPST,
            Self::Galileo(_) => TimeScale::GST,
            Self::Bds(_) => TimeScale::BDT,
            Self::Qzss(_) => TimeScale::QZSST,
            Self::Glonass(_) => TimeScale::UTC,
        }
    }

    /// Time of Ephemeris: reference epoch the orbit is anchored to
    pub fn toe(&self) -> Epoch {
        match self {
            Self::Gps(eph) => eph.kepler.toe,
            Self::Galileo(eph) => eph.kepler.toe,
            Self::Bds(eph) => eph.kepler.toe,
            Self::Qzss(eph) => eph.kepler.toe,
            Self::Glonass(eph) => eph.tb,
            Self::Sbas(eph) => eph.t0,
        }
    }

    /// Time of Clock: reference epoch the clock polynomial is anchored to
    pub fn toc(&self) -> Epoch {
        match self {
            Self::Gps(eph) => eph.kepler.toc,
            Self::Galileo(eph) => eph.kepler.toc,
            Self::Bds(eph) => eph.kepler.toc,
            Self::Qzss(eph) => eph.kepler.toc,
            Self::Glonass(eph) => eph.tb,
            Self::Sbas(eph) => eph.t0,
        }
    }

    /// Returns True if this frame is still valid: broadcast records hold
    /// for hours at most and must not be extrapolated indefinitely.
    pub fn is_valid(&self, now: Epoch, max_dtoe: Duration) -> bool {
        (now - self.toe()).abs() < max_dtoe
    }

    /// Resolves the signal transmission epoch and onboard clock state
    /// (bias [s], drift [s/s]) for a signal received at `rx_epoch` after
    /// travelling `distance_m`. `carrier` selects the group delay term
    /// applicable to single frequency users; bands without a broadcast
    /// mapping contribute zero.
    ///
    /// Errs only on physically impossible inputs (negative distance, or a
    /// time of flight above one second).
    pub fn clock_correction(
        &self,
        rx_epoch: Epoch,
        distance_m: f64,
        carrier: Carrier,
    ) -> Result<ClockCorrection, Error> {
        let tof_s = distance_m / SPEED_OF_LIGHT_M_S;
        if tof_s < 0.0 {
            return Err(Error::PhysicalNonSenseRxPriorTx);
        }
        if tof_s > 1.0 {
            return Err(Error::PhysicalNonSenseRxTooLate);
        }

        let rx_epoch = rx_epoch.to_time_scale(self.timescale());

        let correction = match self {
            Self::Gps(eph) => eph.clock_correction(rx_epoch, distance_m, carrier),
            Self::Galileo(eph) => eph.clock_correction(rx_epoch, distance_m, carrier),
            Self::Bds(eph) => eph.clock_correction(rx_epoch, distance_m, carrier),
            Self::Qzss(eph) => eph.clock_correction(rx_epoch, distance_m, carrier),
            Self::Glonass(eph) => eph.clock_correction(rx_epoch, distance_m),
            Self::Sbas(eph) => eph.clock_correction(rx_epoch, distance_m),
        };

        debug!(
            "{}({}) - clock bias {:.3e} [s] drift {:.3e} [s/s]",
            rx_epoch,
            self.sv(),
            correction.bias_s,
            correction.drift_s_s,
        );

        Ok(correction)
    }

    /// Synthesizes the ECEF satellite state at transmission epoch `t_tx`.
    /// Position is always computed; [Calc::VELOCITY] and
    /// [Calc::ACCELERATION] select the optional vectors, which otherwise
    /// remain zero.
    pub fn pos_vel_accel(&self, t_tx: Epoch, calc: Calc) -> PosVelAccel {
        let t_tx = t_tx.to_time_scale(self.timescale());

        let state = match self {
            Self::Gps(eph) => eph.pos_vel_accel(t_tx, calc),
            Self::Galileo(eph) => eph.pos_vel_accel(t_tx, calc),
            Self::Bds(eph) => eph.pos_vel_accel(t_tx, calc),
            Self::Qzss(eph) => eph.pos_vel_accel(t_tx, calc),
            Self::Glonass(eph) => eph.pos_vel_accel(t_tx, calc),
            Self::Sbas(eph) => eph.pos_vel_accel(t_tx, calc),
        };

        debug!(
            "{}({}) - x={:.3} y={:.3} z={:.3} [m]",
            t_tx,
            self.sv(),
            state.position_m.x,
            state.position_m.y,
            state.position_m.z,
        );

        state
    }

    /// Returns True if the broadcast health indication signals nominal
    /// status (encoding is constellation specific).
    pub fn is_healthy(&self) -> bool {
        match self {
            Self::Gps(eph) => eph.is_healthy(),
            Self::Galileo(eph) => eph.is_healthy(),
            Self::Bds(eph) => eph.is_healthy(),
            Self::Qzss(eph) => eph.is_healthy(),
            Self::Glonass(eph) => eph.is_healthy(),
            Self::Sbas(eph) => eph.is_healthy(),
        }
    }

    /// Position variance estimate [m²], the square of the broadcast
    /// accuracy index: a per-satellite measurement weighting input.
    pub fn position_variance_m2(&self) -> f64 {
        match self {
            Self::Gps(eph) => eph.position_variance_m2(),
            Self::Galileo(eph) => eph.position_variance_m2(),
            Self::Bds(eph) => eph.position_variance_m2(),
            Self::Qzss(eph) => eph.position_variance_m2(),
            Self::Glonass(eph) => eph.position_variance_m2(),
            Self::Sbas(eph) => eph.position_variance_m2(),
        }
    }
}
