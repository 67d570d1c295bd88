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

/// BeiDou D1/D2 broadcast ephemeris frame. The constellation mixes GEO,
/// IGSO and MEO vehicles: the propagation selects the geostationary branch
/// whenever the corrected inclination falls below 30°.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BdsEphemeris {
    /// [SV] this frame was broadcast by
    pub sv: SV,

    /// Keplerian element set, expressed in BDT
    pub kepler: Keplerian,

    /// Group delay differential on B1I [s]
    pub tgd1_s: f64,

    /// Group delay differential on B2I [s]
    pub tgd2_s: f64,

    /// Age of Data (ephemeris)
    pub aode: u16,

    /// Age of Data (clock)
    pub aodc: u16,

    /// Autonomous satellite health flag: zero means usable
    pub sat_h1: u8,

    /// SV accuracy [m]
    pub sv_accuracy_m: f64,
}

impl BdsEphemeris {
    /// Per-band group delay, BDS-SIS-ICD-2.1 ch. 5.2.4.10: the broadcast
    /// clock is referenced to B3, B1I users subtract TGD1, B2I users TGD2.
    /// Other bands contribute zero.
    pub(crate) fn group_delay_s(&self, carrier: Carrier) -> f64 {
        match carrier {
            Carrier::B1I => self.tgd1_s,
            Carrier::B2iB2b => self.tgd2_s,
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
            &constants::BDS,
            rx_epoch,
            distance_m,
            self.group_delay_s(carrier),
        )
    }

    pub(crate) fn pos_vel_accel(&self, t_tx: Epoch, calc: Calc) -> PosVelAccel {
        self.kepler.pos_vel_accel(&constants::BDS, t_tx, calc, true)
    }

    pub(crate) fn is_healthy(&self) -> bool {
        self.sat_h1 == 0
    }

    pub(crate) fn position_variance_m2(&self) -> f64 {
        self.sv_accuracy_m.powi(2)
    }
}
