use bitflags::bitflags;
use hifitime::Epoch;
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// Selects the physical quantities to synthesize. Position is always
    /// computed: velocity and acceleration both build on the orbital plane
    /// quantities obtained during position derivation.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct Calc: u8 {
        const POSITION = 0x01;
        const VELOCITY = 0x02;
        const ACCELERATION = 0x04;
    }
}

impl Default for Calc {
    fn default() -> Self {
        Self::POSITION
    }
}

/// Satellite state in the ECEF frame, at signal transmission time.
/// Vectors that were not requested through [Calc] are left to zero,
/// never NaN.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PosVelAccel {
    /// Antenna phase center position [m]
    pub position_m: Vector3<f64>,
    /// Velocity [m/s]
    pub velocity_m_s: Vector3<f64>,
    /// Acceleration [m/s²]
    pub acceleration_m_s2: Vector3<f64>,
}

impl Default for PosVelAccel {
    fn default() -> Self {
        Self {
            position_m: Vector3::zeros(),
            velocity_m_s: Vector3::zeros(),
            acceleration_m_s2: Vector3::zeros(),
        }
    }
}

/// Onboard clock state resolved at signal transmission time.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockCorrection {
    /// Signal transmission [Epoch], in the constellation timescale,
    /// corrected for the onboard clock offset
    pub tx_epoch: Epoch,
    /// Clock bias [s], including the relativistic term and the group
    /// delay applicable to the requested signal
    pub bias_s: f64,
    /// Clock drift [s/s]
    pub drift_s_s: f64,
}
