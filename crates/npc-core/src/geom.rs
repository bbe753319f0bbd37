//! Ground-plane geometry helpers.
//!
//! World space is y-up.  Yaw is in **degrees**, measured about +y, with
//! 0° facing +z and 90° facing +x:
//!
//! ```text
//! forward(yaw) = (sin yaw, 0, cos yaw)
//! ```
//!
//! Every distance the behavior pipeline reasons about is planar (x/z only);
//! vertical placement is ground-following and never simulated.

use glam::{Quat, Vec3};

/// Sentinel for "no constraint" in stopping-distance arithmetic.
///
/// A large finite value rather than `f32::INFINITY` so that comparisons and
/// `min` folds never produce NaN.
pub const UNBOUNDED: f32 = f32::MAX;

/// Horizontal distance between `a` and `b`, ignoring y.
#[inline]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = b.x - a.x;
    let dz = b.z - a.z;
    (dx * dx + dz * dz).sqrt()
}

/// Unit forward vector for `yaw_deg`.
#[inline]
pub fn forward(yaw_deg: f32) -> Vec3 {
    let (s, c) = yaw_deg.to_radians().sin_cos();
    Vec3::new(s, 0.0, c)
}

/// Yaw (degrees) of the horizontal direction from `from` to `to`.
///
/// Returns `0.0` if the two points coincide in the ground plane.
#[inline]
pub fn yaw_toward(from: Vec3, to: Vec3) -> f32 {
    let dx = to.x - from.x;
    let dz = to.z - from.z;
    if dx == 0.0 && dz == 0.0 {
        return 0.0;
    }
    dx.atan2(dz).to_degrees()
}

/// Orientation quaternion for `yaw_deg` (rotation about +y).
#[inline]
pub fn rotation(yaw_deg: f32) -> Quat {
    Quat::from_rotation_y(yaw_deg.to_radians())
}

/// Transform a vehicle-local offset into world space.
#[inline]
pub fn local_to_world(position: Vec3, yaw_deg: f32, local: Vec3) -> Vec3 {
    position + rotation(yaw_deg) * local
}

/// Signed horizontal angle in degrees from `from` to `to`, in `[-180, 180]`.
///
/// Positive means `to` lies clockwise of `from` seen from above, i.e. the
/// direction in which yaw increases.  Degenerate (zero-length) inputs yield
/// `0.0`.
pub fn signed_angle_deg(from: Vec3, to: Vec3) -> f32 {
    let cross_y = from.z * to.x - from.x * to.z;
    let dot = from.x * to.x + from.z * to.z;
    if cross_y == 0.0 && dot == 0.0 {
        return 0.0;
    }
    cross_y.atan2(dot).to_degrees()
}

/// Signed planar projection of `point - origin` onto `forward`.
///
/// Positive values lie ahead of `origin`, negative values behind it.
/// `forward` is normalised in the ground plane before projecting.
pub fn signed_longitudinal(origin: Vec3, forward: Vec3, point: Vec3) -> f32 {
    let flat = Vec3::new(forward.x, 0.0, forward.z);
    let len = flat.length();
    if len == 0.0 {
        return 0.0;
    }
    let d = Vec3::new(point.x - origin.x, 0.0, point.z - origin.z);
    d.dot(flat) / len
}
