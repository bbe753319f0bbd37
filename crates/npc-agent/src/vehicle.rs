//! Static per-vehicle parameters: dynamics and body bounds.

use glam::Vec3;

// ── VehicleConfig ─────────────────────────────────────────────────────────────

/// Longitudinal and steering dynamics of one vehicle profile.
///
/// All rates are positive magnitudes in world units per second squared
/// (accelerations) or unitless factors (yaw terms).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VehicleConfig {
    pub acceleration: f32,
    pub deceleration: f32,
    pub sudden_deceleration: f32,
    pub absolute_deceleration: f32,

    /// Speed cap in SLOW mode.
    pub slow_speed: f32,

    /// Desired yaw rate per (degree of heading error × unit of speed).
    pub yaw_rate_multiplier: f32,

    /// Per-second lerp factor that smooths the yaw rate toward its desired
    /// value.
    pub yaw_rate_smoothing: f32,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            acceleration:          3.0,
            deceleration:          2.0,
            sudden_deceleration:   4.0,
            absolute_deceleration: 20.0,
            slow_speed:            5.0,
            yaw_rate_multiplier:   0.25,
            yaw_rate_smoothing:    10.0,
        }
    }
}

// ── VehicleBounds ─────────────────────────────────────────────────────────────

/// Body extents in vehicle-local space (+z forward).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleBounds {
    /// Local position of the front-bumper centre.  Its `z` is the
    /// waypoint-reached threshold used by cognition.
    pub front: Vec3,
    /// Local position of the back-bumper centre.
    pub back: Vec3,
    pub width: f32,
}

impl VehicleBounds {
    /// Bounds of a box `length` long and `width` wide centred on the origin.
    pub fn from_length(length: f32, width: f32) -> Self {
        let half = length * 0.5;
        Self {
            front: Vec3::new(0.0, 0.0, half),
            back:  Vec3::new(0.0, 0.0, -half),
            width,
        }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.front.z - self.back.z
    }

    #[inline]
    pub fn half_length(&self) -> f32 {
        self.length() * 0.5
    }
}

impl Default for VehicleBounds {
    /// A 4.5 m × 1.8 m passenger car.
    fn default() -> Self {
        Self::from_length(4.5, 1.8)
    }
}
