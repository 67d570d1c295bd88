#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

extern crate gnss_rs as gnss;

// private modules
mod carrier;
mod constants;
mod ephemeris;
mod error;
mod kepler;
mod state;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::carrier::Carrier;
    pub use crate::constants::{OrbitalConstants, EARTH_ANGULAR_VEL_RAD_S, SPEED_OF_LIGHT_M_S};
    pub use crate::ephemeris::{
        BdsEphemeris, Ephemeris, EphemerisSource, GalileoEphemeris, GlonassEphemeris,
        GpsEphemeris, Keplerian, QzssEphemeris, SbasEphemeris,
    };
    pub use crate::state::{Calc, ClockCorrection, PosVelAccel};
    // re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::{Duration, Epoch, TimeScale, Unit};
    pub use nalgebra::Vector3;
}

// pub export
pub use error::Error;
