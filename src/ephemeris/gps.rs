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

/// GPS LNAV broadcast ephemeris frame.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GpsEphemeris {
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

    /// 6-bit SV health word: zero means all signals nominal
    pub sv_health: u8,

    /// User Range Accuracy [m]
    pub ura_m: f64,
}

impl GpsEphemeris {
    /// Group delay applicable to single frequency users of `carrier`.
    /// The broadcast TGD is referenced to the L1/L2 pair: L1 users apply
    /// it directly, L2 users scale it by γ = (f_L1/f_L2)². Other bands
    /// contribute zero.
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
            &constants::GPS,
            rx_epoch,
            distance_m,
            self.group_delay_s(carrier),
        )
    }

    pub(crate) fn pos_vel_accel(&self, t_tx: Epoch, calc: Calc) -> PosVelAccel {
        self.kepler.pos_vel_accel(&constants::GPS, t_tx, calc, false)
    }

    pub(crate) fn is_healthy(&self) -> bool {
        self.sv_health == 0
    }

    pub(crate) fn position_variance_m2(&self) -> f64 {
        self.ura_m.powi(2)
    }
}
