use gnss::prelude::SV;
use hifitime::Epoch;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    carrier::Carrier,
    constants,
    ephemeris::Keplerian,
    state::{Calc, ClockCorrection, PosVelAccel},
};

/// QZSS broadcast ephemeris frame. Message layout and propagation are GPS
/// compatible, expressed in QZSST; the QZSS orbits themselves are highly
/// elliptical IGSO class, which the shared propagation covers without a
/// dedicated branch.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QzssEphemeris {
    /// [SV] this frame was broadcast by
    pub sv: SV,

    /// Keplerian element set
    pub kepler: Keplerian,

    /// Group delay differential [s], L1 referenced
    pub tgd_s: f64,

    /// Issue of Data (ephemeris)
    pub iode: u16,

    /// Issue of Data (clock)
    pub iodc: u16,

    /// SV health word: zero means all signals nominal
    pub sv_health: u8,

    /// User Range Accuracy [m]
    pub ura_m: f64,
}

impl QzssEphemeris {
    /// Same L1/L2 referencing as the GPS frame.
    pub(crate) fn group_delay_s(&self, carrier: Carrier) -> f64 {
        match carrier {
            Carrier::L1 => self.tgd_s,
            Carrier::L2 => Carrier::gamma(Carrier::L1, Carrier::L2) * self.tgd_s,
            _ => 0.0,
        }
    }

    pub(crate) fn clock_correction(
        &self,
        rx_epoch: Epoch,
        distance_m: f64,
        carrier: Carrier,
    ) -> ClockCorrection {
        self.kepler.clock_correction(
            &constants::QZSS,
            rx_epoch,
            distance_m,
            self.group_delay_s(carrier),
        )
    }

    pub(crate) fn pos_vel_accel(&self, t_tx: Epoch, calc: Calc) -> PosVelAccel {
        self.kepler.pos_vel_accel(&constants::QZSS, t_tx, calc, false)
    }

    pub(crate) fn is_healthy(&self) -> bool {
        self.sv_health == 0
    }

    pub(crate) fn position_variance_m2(&self) -> f64 {
        self.ura_m.powi(2)
    }
}
