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

/// Galileo INAV broadcast ephemeris frame.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GalileoEphemeris {
    /// [SV] this frame was broadcast by
    pub sv: SV,

    /// Keplerian element set
    pub kepler: Keplerian,

    /// Broadcast group delay BGD(E1, E5a) [s]
    pub bgd_e1_e5a_s: f64,

    /// Broadcast group delay BGD(E1, E5b) [s]
    pub bgd_e1_e5b_s: f64,

    /// Issue of Data (navigation)
    pub iodnav: u16,

    /// Composite INAV health word (DVS/HS bits): zero means nominal
    pub sv_health: u16,

    /// Signal In Space Accuracy [m]
    pub sisa_m: f64,
}

impl GalileoEphemeris {
    /// Group delay applicable to single frequency users of `carrier`.
    /// The INAV clock is referenced to the E1/E5b pair: E1 users apply
    /// BGD(E1,E5b) directly, E5a/E5b users scale the matching BGD by
    /// γ = (f_E1/f_band)². Other bands contribute zero.
    pub(crate) fn group_delay_s(&self, carrier: Carrier) -> f64 {
        match carrier {
            Carrier::E1 => self.bgd_e1_e5b_s,
            Carrier::E5A => Carrier::gamma(Carrier::E1, Carrier::E5A) * self.bgd_e1_e5a_s,
            Carrier::E5B => Carrier::gamma(Carrier::E1, Carrier::E5B) * self.bgd_e1_e5b_s,
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
            &constants::GALILEO,
            rx_epoch,
            distance_m,
            self.group_delay_s(carrier),
        )
    }

    pub(crate) fn pos_vel_accel(&self, t_tx: Epoch, calc: Calc) -> PosVelAccel {
        self.kepler
            .pos_vel_accel(&constants::GALILEO, t_tx, calc, false)
    }

    pub(crate) fn is_healthy(&self) -> bool {
        self.sv_health == 0
    }

    pub(crate) fn position_variance_m2(&self) -> f64 {
        self.sisa_m.powi(2)
    }
}
