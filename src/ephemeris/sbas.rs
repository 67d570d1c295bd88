use gnss::prelude::SV;
use hifitime::{Epoch, Unit};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::SPEED_OF_LIGHT_M_S,
    state::{Calc, ClockCorrection, PosVelAccel},
};

/// SBAS (MT9) broadcast ephemeris frame: the geostationary vehicle state
/// is broadcast directly as an ECEF polynomial, no orbital elements.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SbasEphemeris {
    /// [SV] this frame was broadcast by
    pub sv: SV,

    /// Reference epoch of the broadcast state, in GPST
    pub t0: Epoch,

    /// ECEF position at reference epoch [m]
    pub position_m: Vector3<f64>,

    /// ECEF velocity at reference epoch [m/s]
    pub velocity_m_s: Vector3<f64>,

    /// ECEF acceleration at reference epoch [m/s²]
    pub acceleration_m_s2: Vector3<f64>,

    /// Clock offset [s] at reference epoch
    pub a_gf0_s: f64,

    /// Clock drift [s/s]
    pub a_gf1_s_s: f64,

    /// Health word: zero means nominal
    pub sv_health: u8,

    /// User Range Accuracy [m]
    pub ura_m: f64,
}

impl SbasEphemeris {
    /// Same two-pass transmit time coupling as the Keplerian variants,
    /// against the affine broadcast clock. The relativistic term is folded
    /// into the broadcast coefficients by the ground segment, and SBAS
    /// carries no per-band group delay: the carrier does not matter here.
    pub(crate) fn clock_correction(&self, rx_epoch: Epoch, distance_m: f64) -> ClockCorrection {
        let t_tx0 = rx_epoch - distance_m / SPEED_OF_LIGHT_M_S * Unit::Second;
        let mut t_tx = t_tx0;

        let mut bias = 0.0_f64;

        for _ in 0..2 {
            let dt = (t_tx - self.t0).to_seconds();
            bias = self.a_gf0_s + self.a_gf1_s_s * dt;
            t_tx = t_tx0 - bias * Unit::Second;
        }

        ClockCorrection {
            tx_epoch: t_tx,
            bias_s: bias,
            drift_s_s: self.a_gf1_s_s,
        }
    }

    /// Quadratic extrapolation of the broadcast state.
    pub(crate) fn pos_vel_accel(&self, t_tx: Epoch, calc: Calc) -> PosVelAccel {
        let dt = (t_tx - self.t0).to_seconds();

        let mut state = PosVelAccel::default();

        state.position_m =
            self.position_m + self.velocity_m_s * dt + self.acceleration_m_s2 * (dt * dt / 2.0);

        if calc.contains(Calc::VELOCITY) {
            state.velocity_m_s = self.velocity_m_s + self.acceleration_m_s2 * dt;
        }

        if calc.contains(Calc::ACCELERATION) {
            state.acceleration_m_s2 = self.acceleration_m_s2;
        }

        state
    }

    pub(crate) fn is_healthy(&self) -> bool {
        self.sv_health == 0
    }

    pub(crate) fn position_variance_m2(&self) -> f64 {
        self.ura_m.powi(2)
    }
}
