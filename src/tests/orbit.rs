use rstest::rstest;

use crate::prelude::{Calc, Ephemeris, Unit, Vector3};

use crate::tests::{
    bds_geo_eph, bds_inclination_eph, bds_meo_eph, glonass_eph, gps_circular_eph, gps_eph,
    init_logger, sbas_eph,
};

#[test]
fn calc_flag_independence() {
    init_logger();

    let frames = [
        Ephemeris::Gps(gps_eph()),
        Ephemeris::Bds(bds_geo_eph()),
        Ephemeris::Glonass(glonass_eph()),
        Ephemeris::Sbas(sbas_eph()),
    ];

    for eph in frames {
        let t_tx = eph.toe() + 1800.0 * Unit::Second;

        let pos_only = eph.pos_vel_accel(t_tx, Calc::POSITION);
        let full = eph.pos_vel_accel(t_tx, Calc::all());

        // position is bit identical whatever else is requested
        assert_eq!(pos_only.position_m, full.position_m, "{}", eph.sv());

        // unrequested vectors stay exactly zero
        assert_eq!(pos_only.velocity_m_s, Vector3::zeros(), "{}", eph.sv());
        assert_eq!(pos_only.acceleration_m_s2, Vector3::zeros(), "{}", eph.sv());

        let vel_only = eph.pos_vel_accel(t_tx, Calc::VELOCITY);
        assert_eq!(vel_only.velocity_m_s, full.velocity_m_s, "{}", eph.sv());
        assert_eq!(vel_only.acceleration_m_s2, Vector3::zeros(), "{}", eph.sv());
    }
}

#[rstest]
#[case(0.0)]
#[case(500.0)]
#[case(3600.0)]
#[case(-7200.0)]
fn circular_orbit_radius(#[case] dt_s: f64) {
    let eph = Ephemeris::Gps(gps_circular_eph());
    let a_m = 26560000.0;

    // zero eccentricity and no harmonics: radius equals the semi-major
    // axis at any epoch
    let t_tx = eph.toe() + dt_s * Unit::Second;
    let state = eph.pos_vel_accel(t_tx, Calc::POSITION);
    let radius_m = state.position_m.norm();
    assert!((radius_m - a_m).abs() < 1.0E-4, "dt={} r={}", dt_s, radius_m);
}

#[test]
fn orbital_radius_bands() {
    let frames = [
        (Ephemeris::Gps(gps_eph()), 26.2E6, 26.7E6),
        (Ephemeris::Bds(bds_geo_eph()), 41.9E6, 42.4E6),
        (Ephemeris::Bds(bds_meo_eph()), 27.7E6, 28.1E6),
    ];

    for (eph, lo_m, hi_m) in frames {
        let t_tx = eph.toe() + 3600.0 * Unit::Second;
        let state = eph.pos_vel_accel(t_tx, Calc::POSITION);
        let radius_m = state.position_m.norm();
        assert!(
            (lo_m..hi_m).contains(&radius_m),
            "{} r={}",
            eph.sv(),
            radius_m
        );
    }
}

#[test]
fn bds_geo_branch_boundary() {
    // the GEO path is taken strictly below 30° inclination: 30° exactly
    // follows the MEO/IGSO expression
    let below = Ephemeris::Bds(bds_inclination_eph(29.999_f64.to_radians()));
    let exact = Ephemeris::Bds(bds_inclination_eph(30.0_f64.to_radians()));

    let t_tx = below.toe() + 1800.0 * Unit::Second;

    let p_below = below.pos_vel_accel(t_tx, Calc::POSITION).position_m;
    let p_exact = exact.pos_vel_accel(t_tx, Calc::POSITION).position_m;

    // same orbital radius either way
    assert!((p_below.norm() - p_exact.norm()).abs() < 1.0E-3);

    // but the two expressions place the vehicle far apart
    assert!((p_below - p_exact).norm() > 1.0E5);
}

#[test]
fn velocity_matches_numerical_differentiation() {
    let frames = [Ephemeris::Gps(gps_eph()), Ephemeris::Bds(bds_geo_eph())];

    for eph in frames {
        let t_tx = eph.toe() + 3600.0 * Unit::Second;
        let h = 1.0 * Unit::Second;

        let state = eph.pos_vel_accel(t_tx, Calc::POSITION | Calc::VELOCITY);
        let p_minus = eph.pos_vel_accel(t_tx - h, Calc::POSITION).position_m;
        let p_plus = eph.pos_vel_accel(t_tx + h, Calc::POSITION).position_m;

        let numerical = (p_plus - p_minus) / 2.0;
        let err = (state.velocity_m_s - numerical).norm();
        assert!(err < 1.0E-3, "{} err={:.3e}", eph.sv(), err);
    }
}

#[test]
fn acceleration_matches_numerical_differentiation() {
    let frames = [Ephemeris::Gps(gps_eph()), Ephemeris::Bds(bds_meo_eph())];

    for eph in frames {
        let t_tx = eph.toe() + 3600.0 * Unit::Second;
        let h = 1.0 * Unit::Second;

        let state = eph.pos_vel_accel(t_tx, Calc::all());
        let v_minus = eph.pos_vel_accel(t_tx - h, Calc::VELOCITY).velocity_m_s;
        let v_plus = eph.pos_vel_accel(t_tx + h, Calc::VELOCITY).velocity_m_s;

        let numerical = (v_plus - v_minus) / 2.0;
        let err = (state.acceleration_m_s2 - numerical).norm();
        assert!(err < 1.0E-3, "{} err={:.3e}", eph.sv(), err);
    }
}
