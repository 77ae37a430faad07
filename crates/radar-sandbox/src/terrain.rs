//! Analytic ground surface of the sandbox.

use glam::Vec2;

/// Half side of the square region that has ground; outside is open water.
pub const GROUND_EXTENT: f32 = 3000.0;

/// Mean ground height.
pub const GROUND_BASE: f32 = 20.0;

/// Amplitude of the rolling hills.
pub const GROUND_AMPLITUDE: f32 = 15.0;

/// Ground height at `at`, `None` over water.
pub fn ground_height(at: Vec2) -> Option<f32> {
    if at.x.abs() > GROUND_EXTENT || at.y.abs() > GROUND_EXTENT {
        return None;
    }
    Some(GROUND_BASE + GROUND_AMPLITUDE * (at.x / 400.0).sin() * (at.y / 300.0).cos())
}
