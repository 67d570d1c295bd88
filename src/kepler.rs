//! Kepler equation solver, shared by all Keplerian constellations.

/// Convergence criterion on the eccentric anomaly update [rad]
pub const TOLERANCE_RAD: f64 = 1E-13;

/// Iteration cap. Broadcast orbits (e < 1) converge in 5 iterations or
/// less; hitting the cap keeps the last iterate rather than failing,
/// leaving the result bounded by [TOLERANCE_RAD] precision.
pub const MAX_ITER: usize = 10;

/// Solves Kepler's equation M = E - e·sin(E) for the eccentric anomaly,
/// Newton form, starting from E₀ = M.
pub fn eccentric_anomaly(m_rad: f64, e: f64) -> f64 {
    let mut e_k = m_rad;
    let mut e_k_old = 0.0_f64;

    let mut i = 0;
    while (e_k - e_k_old).abs() > TOLERANCE_RAD && i < MAX_ITER {
        e_k_old = e_k;
        e_k += (m_rad - e_k + e * e_k.sin()) / (1.0 - e * e_k.cos());
        i += 1;
    }

    e_k
}

/// Solves Kepler's equation by plain fixed-point iteration E = M + e·sin(E).
/// Converges slower than [eccentric_anomaly] but each pass is cheaper;
/// used on the clock correction path where the relativistic term only
/// needs sin(E).
pub fn eccentric_anomaly_fixed_point(m_rad: f64, e: f64) -> f64 {
    let mut e_k = m_rad;
    let mut e_k_old = 0.0_f64;

    let mut i = 0;
    while (e_k - e_k_old).abs() > TOLERANCE_RAD && i < MAX_ITER {
        e_k_old = e_k;
        e_k = m_rad + e * e_k.sin();
        i += 1;
    }

    e_k
}

/// True anomaly from eccentric anomaly, quadrant correct. The common
/// (1 - e·cos E) denominator cancels between both atan2 operands.
pub fn true_anomaly(e_k: f64, e: f64) -> f64 {
    ((1.0 - e * e).sqrt() * e_k.sin()).atan2(e_k.cos() - e)
}

#[cfg(test)]
mod test {
    use super::{eccentric_anomaly, eccentric_anomaly_fixed_point, true_anomaly};
    use std::f64::consts::PI;

    #[test]
    fn zero_eccentricity() {
        for m in [0.0, 0.5, PI, 4.0] {
            assert_eq!(eccentric_anomaly(m, 0.0), m);
            assert_eq!(eccentric_anomaly_fixed_point(m, 0.0), m);
        }
    }

    #[test]
    fn newton_convergence() {
        // |M - (E - e sinE)| < 1E-10 over the elliptical domain
        let mut e = 0.0;
        while e <= 0.9 {
            let mut m = 0.0;
            while m < 2.0 * PI {
                let e_k = eccentric_anomaly(m, e);
                let residual = (m - (e_k - e * e_k.sin())).abs();
                assert!(
                    residual < 1E-10,
                    "e={} M={} residual={:.3e}",
                    e,
                    m,
                    residual
                );
                m += 0.1;
            }
            e += 0.05;
        }
    }

    #[test]
    fn fixed_point_convergence() {
        // broadcast eccentricities stay below 0.03: the plain iteration
        // must remain well within the relativistic term's needs there
        let mut e = 0.0;
        while e <= 0.05 {
            let mut m = 0.0;
            while m < 2.0 * PI {
                let e_k = eccentric_anomaly_fixed_point(m, e);
                let residual = (m - (e_k - e * e_k.sin())).abs();
                assert!(residual < 1E-10, "e={} M={} residual={:.3e}", e, m, residual);
                m += 0.1;
            }
            e += 0.005;
        }
    }

    #[test]
    fn true_anomaly_round_trip() {
        // recovering E from the true anomaly reproduces it within 1E-9
        let e = 0.02;
        let mut m = -PI + 0.01;
        while m < PI {
            let e_k = eccentric_anomaly(m, e);
            let v_k = true_anomaly(e_k, e);
            let recovered = ((1.0 - e * e).sqrt() * v_k.sin()).atan2(v_k.cos() + e);
            assert!(
                (recovered - e_k).abs() < 1E-9,
                "M={} E={} recovered={}",
                m,
                e_k,
                recovered
            );
            m += 0.1;
        }
    }
}
