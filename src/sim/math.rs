//! Vector helpers for collision response
//!
//! Everything here is pure and total: no input can make these functions fail.

use glam::DVec2;

/// Reflect a direction off a surface with the given unit normal.
///
/// `incoming` need not be unit length; the result is re-normalized to keep
/// accumulated drift out of the ball's direction vector.
#[inline]
pub fn reflect(incoming: DVec2, normal: DVec2) -> DVec2 {
    let reflected = incoming - 2.0 * incoming.dot(normal) * normal;
    reflected.normalize_or(normal)
}

/// Step `current` toward `target` by at most `max_delta`, never overshooting
#[inline]
pub fn move_towards(current: f64, target: f64, max_delta: f64) -> f64 {
    let delta = target - current;
    if delta.abs() <= max_delta {
        target
    } else {
        current + delta.signum() * max_delta
    }
}

/// Keep a direction from going (nearly) horizontal.
///
/// If the vertical component magnitude is below `min_vertical` it is raised to
/// exactly `min_vertical`, keeping its sign (zero counts as upward), and the
/// direction is re-normalized.
pub fn enforce_min_vertical(dir: DVec2, min_vertical: f64) -> DVec2 {
    if dir.y.abs() >= min_vertical {
        return dir;
    }
    let y = if dir.y < 0.0 { -min_vertical } else { min_vertical };
    let x = dir.x.signum() * (1.0 - y * y).max(0.0).sqrt();
    DVec2::new(x, y)
}
