//! Orbit algebra: the radar boundary that off-frustum points are pushed onto.
//!
//! A circular orbit is always the circle inscribed in the half-extent box
//! (radius `min(half.x, half.y)`), never an ellipse. A square orbit is the
//! box itself.

use glam::Vec2;

use radar_core::constants::{DIRECTION_EPSILON_SQ, EDGE_RAY_FAR, ORBIT_EPSILON};
use radar_core::enums::RadarShape;

/// Radar boundary in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub center: Vec2,
    pub half: Vec2,
    pub shape: RadarShape,
}

impl Orbit {
    pub fn new(center: Vec2, half: Vec2, shape: RadarShape) -> Self {
        Self {
            center,
            half,
            shape,
        }
    }

    /// Inscribed circle radius.
    pub fn radius(&self) -> f32 {
        self.half.x.min(self.half.y)
    }

    /// Same orbit shrunk by `margin` on each axis, axes smaller than the margin left as is.
    pub fn inset(&self, margin: f32) -> Self {
        let shrink = |h: f32| if h > margin { h - margin } else { h };
        Self {
            half: Vec2::new(shrink(self.half.x), shrink(self.half.y)),
            ..*self
        }
    }

    /// Boundary point in direction `(cos, sin)` from the center.
    pub fn point_on_edge(&self, cos: f32, sin: f32) -> Vec2 {
        match self.shape {
            RadarShape::Square => {
                let tx = if cos.abs() > 1e-6 {
                    self.half.x / cos.abs()
                } else {
                    EDGE_RAY_FAR
                };
                let ty = if sin.abs() > 1e-6 {
                    self.half.y / sin.abs()
                } else {
                    EDGE_RAY_FAR
                };
                self.center + Vec2::new(cos, sin) * tx.min(ty)
            }
            RadarShape::Circle => self.center + Vec2::new(cos, sin) * self.radius(),
        }
    }

    /// Boundary point at `angle` radians (screen space, y down).
    pub fn point_at_angle(&self, angle: f32) -> Vec2 {
        let (sin, cos) = angle.sin_cos();
        self.point_on_edge(cos, sin)
    }

    pub fn is_inside(&self, point: Vec2) -> bool {
        let d = point - self.center;
        match self.shape {
            RadarShape::Square => d.x.abs() <= self.half.x && d.y.abs() <= self.half.y,
            RadarShape::Circle => {
                let r = self.radius();
                d.length_squared() <= r * r
            }
        }
    }

    /// Pull a point onto the boundary along the ray from the center.
    ///
    /// Points already inside are returned unchanged. Square: both axes are
    /// scaled by the larger overflow ratio, so the direction is preserved and
    /// the point stops exactly on the edge (never a per-axis clamp). Circle:
    /// the direction is normalized and scaled to the inscribed radius.
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        let mut d = point - self.center;
        match self.shape {
            RadarShape::Square => {
                let norm = |v: f32, h: f32| if h > ORBIT_EPSILON { v.abs() / h } else { 0.0 };
                let max_norm = norm(d.x, self.half.x).max(norm(d.y, self.half.y));
                if max_norm > 1.0 {
                    d /= max_norm;
                }
                self.center + d
            }
            RadarShape::Circle => {
                let len = d.length();
                if len <= self.radius() {
                    return point;
                }
                if len > ORBIT_EPSILON {
                    d /= len;
                }
                self.center + d * self.radius()
            }
        }
    }

    /// Edge point for the direction from `from` to `to` (radar space), corrected for camera yaw.
    pub fn place_by_direction(&self, from: Vec2, to: Vec2, yaw: f32) -> Option<Vec2> {
        direction_to_orbit_angle(from, to, yaw).map(|angle| self.point_at_angle(angle))
    }
}

/// Screen-space orbit angle of `to` as seen from `from`.
///
/// World bearings are measured counter-clockwise with y up; the screen has y
/// down and rotates with the camera, so the angle is negated and the yaw
/// subtracted. Rotating the camera by `d` rotates every result by `-d`.
/// Returns `None` when the two points coincide.
pub fn direction_to_orbit_angle(from: Vec2, to: Vec2, yaw: f32) -> Option<f32> {
    let d = to - from;
    if d.length_squared() < DIRECTION_EPSILON_SQ {
        return None;
    }
    Some(-d.y.atan2(d.x) - yaw)
}
