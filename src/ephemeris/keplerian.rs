use hifitime::{Epoch, Unit};
use nalgebra::{Rotation3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{OrbitalConstants, SPEED_OF_LIGHT_M_S},
    kepler,
    state::{Calc, ClockCorrection, PosVelAccel},
};

/// Orbits inclined below this take the geostationary propagation branch
/// (BeiDou only). The boundary is exclusive: exactly 30° of inclination
/// follows the MEO/IGSO parametrization.
pub(crate) const GEO_INCLINATION_RAD: f64 = 30.0 * std::f64::consts::PI / 180.0;

/// Inclination offset of the BeiDou GEO intermediate frame [rad]
const GEO_ROT_X_RAD: f64 = 5.0 * std::f64::consts::PI / 180.0;

/// Broadcast Keplerian element set, shared by all MEO/IGSO/GEO class
/// navigation messages (GPS, Galileo, BeiDou, QZSS). Immutable once decoded:
/// a fresher broadcast supersedes the record, never mutates it.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Keplerian {
    /// Time of Clock, in the constellation timescale
    pub toc: Epoch,

    /// Time of Ephemeris, in the constellation timescale
    pub toe: Epoch,

    /// Clock bias [s], drift [s/s] and drift rate [s/s²] polynomial,
    /// referenced to [Self::toc]
    pub clock: (f64, f64, f64),

    /// Square root of the semi-major axis [√m]
    pub sqrt_a: f64,

    /// Eccentricity. Records are decoded from broadcast elliptical orbits:
    /// 0 <= e < 1 holds by construction and is not re-validated here.
    pub e: f64,

    /// Inclination at reference epoch [rad]
    pub i0_rad: f64,

    /// Longitude of ascending node at reference epoch [rad]
    pub omega0_rad: f64,

    /// Argument of perigee [rad]
    pub omega_rad: f64,

    /// Mean anomaly at reference epoch [rad]
    pub m0_rad: f64,

    /// Mean motion correction [rad/s]
    pub dn_rad_s: f64,

    /// Rate of the ascending node [rad/s]
    pub omega_dot_rad_s: f64,

    /// Inclination rate [rad/s]
    pub i_dot_rad_s: f64,

    /// Argument of latitude sine / cosine harmonic corrections [rad]
    pub cus_cuc_rad: (f64, f64),

    /// Inclination sine / cosine harmonic corrections [rad]
    pub cis_cic_rad: (f64, f64),

    /// Radius sine / cosine harmonic corrections [m]
    pub crs_crc_m: (f64, f64),
}

impl Keplerian {
    /// Corrected mean motion [rad/s]
    fn mean_motion_rad_s(&self, cst: &OrbitalConstants) -> f64 {
        let a = self.sqrt_a * self.sqrt_a;
        (cst.mu_m3_s2 / a.powi(3)).sqrt() + self.dn_rad_s
    }

    /// ToE in seconds of week, in its own timescale
    fn weekly_toe_seconds(&self) -> f64 {
        (self.toe.to_time_of_week().1 as f64) / 1.0E9
    }

    /// Resolves the signal transmission epoch and onboard clock state,
    /// coupling the light time of flight with the broadcast clock
    /// polynomial, the relativistic term and the already selected group
    /// delay. Runs exactly two passes: the clock bias (µs..ms scale)
    /// moves slowly against one time-of-flight refinement, and the fixed
    /// count keeps results reproducible against ICD reference data.
    ///
    /// `rx_epoch` must already be expressed in the constellation timescale.
    pub(crate) fn clock_correction(
        &self,
        cst: &OrbitalConstants,
        rx_epoch: Epoch,
        distance_m: f64,
        group_delay_s: f64,
    ) -> ClockCorrection {
        let (a0, a1, a2) = self.clock;
        let n = self.mean_motion_rad_s(cst);

        let t_tx0 = rx_epoch - distance_m / SPEED_OF_LIGHT_M_S * Unit::Second;
        let mut t_tx = t_tx0;

        let mut bias = 0.0_f64;
        let mut drift = 0.0_f64;

        for _ in 0..2 {
            let dt_clock = (t_tx - self.toc).to_seconds();
            let t_k = (t_tx - self.toe).to_seconds();

            let m_k = self.m0_rad + n * t_k;
            let e_k = kepler::eccentric_anomaly_fixed_point(m_k, self.e);

            // relativistic term [s]
            let dt_r = cst.f_rel_s_sqrt_m * self.e * self.sqrt_a * e_k.sin();

            bias = a0 + a1 * dt_clock + a2 * dt_clock.powi(2) + dt_r - group_delay_s;
            drift = a1 + 2.0 * a2 * dt_clock;

            // refine transmission epoch with the resolved bias
            t_tx = t_tx0 - bias * Unit::Second;
        }

        ClockCorrection {
            tx_epoch: t_tx,
            bias_s: bias,
            drift_s_s: drift,
        }
    }

    /// Synthesizes the ECEF satellite state at transmission epoch.
    /// `geo_orbits` enables the BeiDou geostationary branch for records
    /// whose corrected inclination lies below [GEO_INCLINATION_RAD].
    ///
    /// `t_tx` must already be expressed in the constellation timescale.
    pub(crate) fn pos_vel_accel(
        &self,
        cst: &OrbitalConstants,
        t_tx: Epoch,
        calc: Calc,
        geo_orbits: bool,
    ) -> PosVelAccel {
        let mut state = PosVelAccel::default();

        let e = self.e;
        let a = self.sqrt_a * self.sqrt_a;
        let (cus, cuc) = self.cus_cuc_rad;
        let (cis, cic) = self.cis_cic_rad;
        let (crs, crc) = self.crs_crc_m;
        let omega_e = cst.omega_rad_s;

        let n = self.mean_motion_rad_s(cst);

        // time from ephemeris reference epoch, signed, no week wrap
        let t_k = (t_tx - self.toe).to_seconds();

        let m_k = self.m0_rad + n * t_k;
        let e_k = kepler::eccentric_anomaly(m_k, e);
        let (sin_e_k, cos_e_k) = e_k.sin_cos();

        let v_k = kepler::true_anomaly(e_k, e);

        // argument of latitude and second harmonic perturbations
        let phi_k = v_k + self.omega_rad;
        let (sin_2phi, cos_2phi) = (2.0 * phi_k).sin_cos();

        let du_k = cus * sin_2phi + cuc * cos_2phi;
        let dr_k = crs * sin_2phi + crc * cos_2phi;
        let di_k = cis * sin_2phi + cic * cos_2phi;

        let u_k = phi_k + du_k;
        let r_k = a * (1.0 - e * cos_e_k) + dr_k;
        let i_k = self.i0_rad + di_k + self.i_dot_rad_s * t_k;

        let (sin_u_k, cos_u_k) = u_k.sin_cos();
        let (sin_i_k, cos_i_k) = i_k.sin_cos();

        // in orbital plane position [m]
        let x_op = r_k * cos_u_k;
        let y_op = r_k * sin_u_k;

        let geo = geo_orbits && i_k < GEO_INCLINATION_RAD;

        // corrected longitude of ascending node and its rate. The GEO
        // formulation compensates Earth rotation after the fact: the node
        // only drifts at the broadcast rate. MEO/IGSO compensate inside
        // the node term.
        let (omega_k, omega_k_dot) = if geo {
            (
                self.omega0_rad + self.omega_dot_rad_s * t_k - omega_e * self.weekly_toe_seconds(),
                self.omega_dot_rad_s,
            )
        } else {
            (
                self.omega0_rad + (self.omega_dot_rad_s - omega_e) * t_k
                    - omega_e * self.weekly_toe_seconds(),
                self.omega_dot_rad_s - omega_e,
            )
        };

        let (sin_omega_k, cos_omega_k) = omega_k.sin_cos();

        let x_gk = Vector3::new(
            x_op * cos_omega_k - y_op * cos_i_k * sin_omega_k,
            x_op * sin_omega_k + y_op * cos_i_k * cos_omega_k,
            y_op * sin_i_k,
        );

        let geo_rotation = if geo {
            let rot_x = Rotation3::from_axis_angle(&Vector3::x_axis(), GEO_ROT_X_RAD);
            let rot_z = Rotation3::from_axis_angle(&Vector3::z_axis(), -omega_e * t_k);
            Some(rot_z * rot_x)
        } else {
            None
        };

        state.position_m = match geo_rotation {
            Some(rotation) => rotation * x_gk,
            None => x_gk,
        };

        // position only queries stop here: the rate terms below are
        // skipped entirely unless requested
        if calc.intersects(Calc::VELOCITY | Calc::ACCELERATION) {
            // analytical rates of the anomalies and corrected elements
            let e_k_dot = n / (1.0 - e * cos_e_k);
            let v_k_dot = e_k_dot * (1.0 - e * e).sqrt() / (1.0 - e * cos_e_k);
            let i_k_dot = self.i_dot_rad_s + 2.0 * v_k_dot * (cis * cos_2phi - cic * sin_2phi);
            let u_k_dot = v_k_dot + 2.0 * v_k_dot * (cus * cos_2phi - cuc * sin_2phi);
            let r_k_dot =
                e * a * e_k_dot * sin_e_k + 2.0 * v_k_dot * (crs * cos_2phi - crc * sin_2phi);

            // in orbital plane velocity [m/s]
            let vx_op = r_k_dot * cos_u_k - r_k * u_k_dot * sin_u_k;
            let vy_op = r_k_dot * sin_u_k + r_k * u_k_dot * cos_u_k;

            let v_gk = Vector3::new(
                -x_op * omega_k_dot * sin_omega_k + vx_op * cos_omega_k
                    - vy_op * sin_omega_k * cos_i_k
                    - y_op
                        * (omega_k_dot * cos_omega_k * cos_i_k - i_k_dot * sin_omega_k * sin_i_k),
                x_op * omega_k_dot * cos_omega_k
                    + vx_op * sin_omega_k
                    + vy_op * cos_omega_k * cos_i_k
                    - y_op
                        * (omega_k_dot * sin_omega_k * cos_i_k + i_k_dot * cos_omega_k * sin_i_k),
                vy_op * sin_i_k + y_op * i_k_dot * cos_i_k,
            );

            let velocity = match geo_rotation {
                Some(rotation) => {
                    // the z rotation angle is itself time dependent: the
                    // frame rate contributes omega_e x r on top of the
                    // rotated rate
                    let pos = state.position_m;
                    rotation * v_gk + omega_e * Vector3::new(pos.y, -pos.x, 0.0)
                },
                None => v_gk,
            };

            let (vx_k, vy_k) = (velocity.x, velocity.y);

            if calc.contains(Calc::VELOCITY) {
                state.velocity_m_s = velocity;
            }

            if calc.contains(Calc::ACCELERATION) {
                let (x_k, y_k, z_k) = (
                    state.position_m.x,
                    state.position_m.y,
                    state.position_m.z,
                );
                let mu = cst.mu_m3_s2;

                // oblateness perturbation factor [m/s²]
                let f_j2 =
                    -(3.0 / 2.0) * cst.j2 * (mu / r_k.powi(2)) * (cst.r_e_m / r_k).powi(2);

                let z_r_2 = (z_k / r_k).powi(2);

                let ax_k = -mu * (x_k / r_k.powi(3))
                    + f_j2 * ((1.0 - 5.0 * z_r_2) * (x_k / r_k))
                    + 2.0 * vy_k * omega_e
                    + x_k * omega_e.powi(2);

                let ay_k = -mu * (y_k / r_k.powi(3))
                    + f_j2 * ((1.0 - 5.0 * z_r_2) * (y_k / r_k))
                    - 2.0 * vx_k * omega_e
                    + y_k * omega_e.powi(2);

                let az_k = -mu * (z_k / r_k.powi(3)) + f_j2 * ((3.0 - 5.0 * z_r_2) * (z_k / r_k));

                state.acceleration_m_s2 = Vector3::new(ax_k, ay_k, az_k);
            }
        }

        state
    }
}
