//! Angle utilities for hull edges. Everything here works in degrees with
//! edge directions in the `atan2` range `(-180, 180]`.

/// Direction of the vector `(dx, dy)` in degrees.
#[inline]
pub fn direction_deg(dx: f64, dy: f64) -> f64 {
    dy.atan2(dx).to_degrees()
}

/// Smallest unsigned circular difference between two directions, in `[0, 180]`.
///
/// Unlike line orientations, edge directions are signed: 0° and 180° are
/// opposite sides, not the same one.
#[inline]
pub fn angular_difference_deg(a: f64, b: f64) -> f64 {
    let d = (a - b).abs();
    if d <= 180.0 {
        d
    } else {
        360.0 - d
    }
}

/// Clockwise offset of `angle` from `reference`, wrapped into `[0, 360)`.
#[inline]
pub fn clockwise_offset_deg(angle: f64, reference: f64) -> f64 {
    let a = angle - reference;
    if a < 0.0 {
        a + 360.0
    } else {
        a
    }
}

/// Mean direction of a length-weighted vector sum `(wx, wy)`.
#[inline]
pub fn mean_direction_deg(wx: f64, wy: f64) -> f64 {
    direction_deg(wx, wy)
}
