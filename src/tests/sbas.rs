use crate::prelude::{Calc, Carrier, Ephemeris, Unit};

use crate::tests::{init_logger, sbas_eph};

#[test]
fn quadratic_extrapolation() {
    init_logger();

    let raw = sbas_eph();
    let eph = Ephemeris::Sbas(raw);

    let dt_s = 300.0;
    let t_tx = raw.t0 + dt_s * Unit::Second;

    let state = eph.pos_vel_accel(t_tx, Calc::all());

    // the broadcast state is an exact polynomial: no truncation beyond
    // the quadratic term
    let expected_pos =
        raw.position_m + raw.velocity_m_s * dt_s + raw.acceleration_m_s2 * (dt_s * dt_s / 2.0);
    assert_eq!(state.position_m, expected_pos);

    let expected_vel = raw.velocity_m_s + raw.acceleration_m_s2 * dt_s;
    assert_eq!(state.velocity_m_s, expected_vel);

    assert_eq!(state.acceleration_m_s2, raw.acceleration_m_s2);
}

#[test]
fn extrapolation_at_reference_epoch() {
    let raw = sbas_eph();
    let eph = Ephemeris::Sbas(raw);

    let state = eph.pos_vel_accel(raw.t0, Calc::all());

    assert_eq!(state.position_m, raw.position_m);
    assert_eq!(state.velocity_m_s, raw.velocity_m_s);
    assert_eq!(state.acceleration_m_s2, raw.acceleration_m_s2);
}

#[test]
fn affine_clock() {
    let raw = sbas_eph();
    let eph = Ephemeris::Sbas(raw);

    let rx = raw.t0 + 450.0 * Unit::Second;
    let corr = eph.clock_correction(rx, 3.8E7, Carrier::L1).unwrap();

    assert!(corr.tx_epoch < rx);

    let dt = (corr.tx_epoch - raw.t0).to_seconds();
    assert!((corr.bias_s - (raw.a_gf0_s + raw.a_gf1_s_s * dt)).abs() < 1.0E-15);
    assert_eq!(corr.drift_s_s, raw.a_gf1_s_s);

    // no group delay mapping for geostationary augmentation signals
    let l5 = eph.clock_correction(rx, 3.8E7, Carrier::L5).unwrap();
    assert_eq!(corr, l5);
}

#[test]
fn health_and_variance() {
    let mut raw = sbas_eph();
    assert!(Ephemeris::Sbas(raw).is_healthy());
    assert_eq!(Ephemeris::Sbas(raw).position_variance_m2(), 16.0);

    raw.sv_health = 1;
    assert!(!Ephemeris::Sbas(raw).is_healthy());
}
