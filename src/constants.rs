use gnss::prelude::Constellation;

/// Speed of light in m.s⁻¹
pub const SPEED_OF_LIGHT_M_S: f64 = 299_792_458.0;

/// Earth angular velocity, WGS84 frame [rad/s]
pub const EARTH_ANGULAR_VEL_RAD_S: f64 = 7.2921151467E-5;

/// Physical constants of one constellation's reference frame and ICD,
/// read-only for the whole process lifetime.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrbitalConstants {
    /// Earth gravitational constant [m³/s²]
    pub mu_m3_s2: f64,
    /// Earth angular velocity [rad/s]
    pub omega_rad_s: f64,
    /// Relativistic clock correction constant [s/√m], defined as -2√µ/c²
    pub f_rel_s_sqrt_m: f64,
    /// Second zonal harmonic (oblateness) coefficient
    pub j2: f64,
    /// Earth equatorial radius [m]
    pub r_e_m: f64,
}

/// IS-GPS-200 (WGS84 value of the gravitational constant for GPS users)
pub const GPS: OrbitalConstants = OrbitalConstants {
    mu_m3_s2: 3.986005E14,
    omega_rad_s: 7.2921151467E-5,
    f_rel_s_sqrt_m: -4.442807633E-10,
    j2: 1.0826262E-3,
    r_e_m: 6378137.0,
};

/// Galileo OS-SIS-ICD (GTRF)
pub const GALILEO: OrbitalConstants = OrbitalConstants {
    mu_m3_s2: 3.986004418E14,
    omega_rad_s: 7.2921151467E-5,
    f_rel_s_sqrt_m: -4.442807309E-10,
    j2: 1.0826262E-3,
    r_e_m: 6378137.0,
};

/// BDS-SIS-ICD (CGCS2000)
pub const BDS: OrbitalConstants = OrbitalConstants {
    mu_m3_s2: 3.986004418E14,
    omega_rad_s: 7.292115E-5,
    f_rel_s_sqrt_m: -4.442807309043977E-10,
    j2: 1.0826262E-3,
    r_e_m: 6378137.0,
};

/// QZSS IS-QZSS-PNT (GPS compatible)
pub const QZSS: OrbitalConstants = GPS;

/// GLONASS ICD (PZ-90.11)
pub const GLONASS: OrbitalConstants = OrbitalConstants {
    mu_m3_s2: 3.986004418E14,
    omega_rad_s: 7.292115E-5,
    f_rel_s_sqrt_m: -4.442807309E-10,
    j2: 1.0826257E-3,
    r_e_m: 6378136.0,
};

impl OrbitalConstants {
    /// Constant table lookup, keyed by [Constellation].
    /// SBAS vehicles follow the GPS frame definition.
    pub fn from_constellation(constellation: Constellation) -> Option<Self> {
        match constellation {
            Constellation::GPS => Some(GPS),
            Constellation::Galileo => Some(GALILEO),
            Constellation::BeiDou => Some(BDS),
            Constellation::QZSS => Some(QZSS),
            Constellation::Glonass => Some(GLONASS),
            c if c.is_sbas() => Some(GPS),
            _ => None,
        }
    }
}
