use gnss::prelude::SV;
use hifitime::{Epoch, Unit};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{self, SPEED_OF_LIGHT_M_S},
    state::{Calc, ClockCorrection, PosVelAccel},
};

/// Integration step [s]. The GLONASS ICD guarantees the broadcast state
/// vector usable ±15 minutes around the reference epoch with this step.
const RK4_STEP_S: f64 = 60.0;

/// GLONASS broadcast ephemeris frame: a PZ-90 ECEF state vector at the
/// reference epoch plus lunisolar accelerations, propagated by numerical
/// integration of the equations of motion rather than Keplerian elements.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GlonassEphemeris {
    /// [SV] this frame was broadcast by
    pub sv: SV,

    /// Reference epoch (tb), in UTC
    pub tb: Epoch,

    /// SV clock offset [s] at tb, equal to -τn of the navigation message
    pub clock_bias_s: f64,

    /// Relative frequency offset γn [s/s]
    pub gamma: f64,

    /// PZ-90 ECEF position at tb [m]
    pub position_m: Vector3<f64>,

    /// PZ-90 ECEF velocity at tb [m/s]
    pub velocity_m_s: Vector3<f64>,

    /// Lunisolar acceleration at tb [m/s²], held constant over the
    /// validity window
    pub lunisolar_m_s2: Vector3<f64>,

    /// Health flag (Bn): zero means usable
    pub sv_health: u8,

    /// Frequency channel number (-7..=6)
    pub channel: i8,

    /// Age of the operative information [days]
    pub age_days: u8,

    /// Broadcast accuracy factor F_T [m]
    pub accuracy_m: f64,
}

impl GlonassEphemeris {
    /// Same two-pass transmit time coupling as the Keplerian variants,
    /// against the broadcast affine clock: the relativistic term is
    /// maintained inside τn/γn by the control segment.
    pub(crate) fn clock_correction(&self, rx_epoch: Epoch, distance_m: f64) -> ClockCorrection {
        let t_tx0 = rx_epoch - distance_m / SPEED_OF_LIGHT_M_S * Unit::Second;
        let mut t_tx = t_tx0;

        let mut bias = 0.0_f64;

        for _ in 0..2 {
            let dt = (t_tx - self.tb).to_seconds();
            bias = self.clock_bias_s + self.gamma * dt;
            t_tx = t_tx0 - bias * Unit::Second;
        }

        ClockCorrection {
            tx_epoch: t_tx,
            bias_s: bias,
            drift_s_s: self.gamma,
        }
    }

    /// ECEF acceleration of the equations of motion: central gravity,
    /// J2 oblateness, Earth rotation (centrifugal + Coriolis) and the
    /// broadcast lunisolar term.
    fn acceleration(&self, p: Vector3<f64>, v: Vector3<f64>) -> Vector3<f64> {
        let cst = constants::GLONASS;
        let (mu, omega_e) = (cst.mu_m3_s2, cst.omega_rad_s);

        let r = p.norm();
        let z_r_2 = (p.z / r).powi(2);

        let f_j2 = -(3.0 / 2.0) * cst.j2 * (mu / r.powi(2)) * (cst.r_e_m / r).powi(2);

        Vector3::new(
            -mu * p.x / r.powi(3)
                + f_j2 * (1.0 - 5.0 * z_r_2) * (p.x / r)
                + omega_e.powi(2) * p.x
                + 2.0 * omega_e * v.y
                + self.lunisolar_m_s2.x,
            -mu * p.y / r.powi(3)
                + f_j2 * (1.0 - 5.0 * z_r_2) * (p.y / r)
                + omega_e.powi(2) * p.y
                - 2.0 * omega_e * v.x
                + self.lunisolar_m_s2.y,
            -mu * p.z / r.powi(3)
                + f_j2 * (3.0 - 5.0 * z_r_2) * (p.z / r)
                + self.lunisolar_m_s2.z,
        )
    }

    /// 4th order Runge-Kutta integration of the broadcast state vector,
    /// from tb to the transmission epoch, forward or backward. Fixed 60 s
    /// steps, last step shortened to land exactly on the target.
    pub(crate) fn pos_vel_accel(&self, t_tx: Epoch, calc: Calc) -> PosVelAccel {
        let total_s = (t_tx - self.tb).to_seconds();

        let mut p = self.position_m;
        let mut v = self.velocity_m_s;

        let mut remaining = total_s.abs();
        let sign = total_s.signum();

        while remaining > 0.0 {
            let h = sign * remaining.min(RK4_STEP_S);

            let a1 = self.acceleration(p, v);
            let (p2, v2) = (p + v * (h / 2.0), v + a1 * (h / 2.0));
            let a2 = self.acceleration(p2, v2);
            let (p3, v3) = (p + v2 * (h / 2.0), v + a2 * (h / 2.0));
            let a3 = self.acceleration(p3, v3);
            let (p4, v4) = (p + v3 * h, v + a3 * h);
            let a4 = self.acceleration(p4, v4);

            p += (v + v2 * 2.0 + v3 * 2.0 + v4) * (h / 6.0);
            v += (a1 + a2 * 2.0 + a3 * 2.0 + a4) * (h / 6.0);

            remaining -= RK4_STEP_S;
        }

        let mut state = PosVelAccel::default();
        state.position_m = p;

        if calc.contains(Calc::VELOCITY) {
            state.velocity_m_s = v;
        }

        if calc.contains(Calc::ACCELERATION) {
            state.acceleration_m_s2 = self.acceleration(p, v);
        }

        state
    }

    pub(crate) fn is_healthy(&self) -> bool {
        self.sv_health == 0
    }

    pub(crate) fn position_variance_m2(&self) -> f64 {
        self.accuracy_m.powi(2)
    }
}
