//! Airstrip table and runway geometry for the plane avionics layer.

use std::f32::consts::TAU;

use glam::Vec2;

use radar_core::constants::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Airstrip {
    pub name: &'static str,
    /// Host world position of the runway center.
    pub center: Vec2,
    pub heading_deg: f32,
    /// Runway length.
    pub radius: f32,
}

pub const AIRSTRIPS: [Airstrip; 4] = [
    Airstrip {
        name: "Los Santos",
        center: Vec2::new(1750.0, -2494.0),
        heading_deg: 180.0,
        radius: 750.0,
    },
    Airstrip {
        name: "San Fierro",
        center: Vec2::new(-1373.0, 120.0),
        heading_deg: 225.0,
        radius: 1125.0,
    },
    Airstrip {
        name: "Las Venturas",
        center: Vec2::new(1478.0, 1461.0),
        heading_deg: 90.0,
        radius: 900.0,
    },
    Airstrip {
        name: "Verdant Meadows",
        center: Vec2::new(175.0, 2502.0),
        heading_deg: 180.0,
        radius: 750.0,
    },
];

impl Airstrip {
    pub fn direction(&self) -> f32 {
        self.heading_deg.to_radians()
    }

    pub fn axis(&self) -> Vec2 {
        let (sin, cos) = self.direction().sin_cos();
        Vec2::new(cos, sin)
    }

    pub fn half_length(&self) -> f32 {
        self.radius * 0.5
    }

    /// Point `offset` units along the runway from its center.
    pub fn point_at(&self, offset: f32) -> Vec2 {
        self.center + self.axis() * offset
    }

    /// Player over the runway: foot of the perpendicular inside the segment,
    /// within a quarter of the radius sideways.
    pub fn is_on_runway(&self, player: Vec2) -> bool {
        let a = self.point_at(self.half_length());
        let b = self.point_at(-self.half_length());
        let v = b - a;
        let len_sq = v.length_squared();
        if len_sq < 1e-6 {
            return false;
        }
        let t = (player - a).dot(v) / len_sq;
        if !(0.0..=1.0).contains(&t) {
            return false;
        }
        let width = self.radius * AIRSTRIP_WIDTH_FACTOR;
        player.distance_squared(a + v * t) <= width * width
    }
}

/// Closest strip on the ground plane.
pub fn nearest(player: Vec2) -> &'static Airstrip {
    let mut best = &AIRSTRIPS[0];
    for strip in &AIRSTRIPS[1..] {
        if strip.center.distance_squared(player) < best.center.distance_squared(player) {
            best = strip;
        }
    }
    best
}

/// Runway offsets whose projection lies within `radius` of the radar center.
///
/// `project` maps a host world (x, y) to a radar-local offset. The runway is
/// linearised from two projections `AIRSTRIP_DERIVATIVE_STEP` apart and the
/// circle crossing solved as a quadratic in the offset. `None` when either
/// projection fails, the runway collapses to a point on screen, or no part
/// of it is inside.
pub fn offset_range<F>(strip: &Airstrip, radius: f32, project: F) -> Option<(f32, f32)>
where
    F: Fn(Vec2) -> Option<Vec2>,
{
    let step = AIRSTRIP_DERIVATIVE_STEP;
    let c = project(strip.center)?;
    let s = project(strip.point_at(step))?;
    let d = (s - c) / step;

    let a = d.length_squared();
    if a < 1e-10 {
        return None;
    }
    let b = 2.0 * c.dot(d);
    let k = c.length_squared() - radius * radius;
    let half = strip.half_length();

    let disc = b * b - 4.0 * a * k;
    if disc < 0.0 {
        return (k <= 0.0).then_some((-half, half));
    }
    let root = disc.sqrt();
    let w1 = (-b - root) / (2.0 * a);
    let w2 = (-b + root) / (2.0 * a);
    let min = w1.min(w2).max(-half);
    let max = w1.max(w2).min(half);
    (min < max).then_some((min, max))
}

/// Approach light offset: a sinusoid over the central share of the range,
/// zero without one.
pub fn approach_offset(range: Option<(f32, f32)>, now_ms: u64) -> f32 {
    let Some((min, max)) = range else {
        return 0.0;
    };
    let mid = (min + max) * 0.5;
    let span = (max - min) * AIRSTRIP_ANIM_SHARE;
    let t = now_ms as f32 / AIRSTRIP_ANIM_CYCLE_MS;
    let smooth = 0.5 + 0.5 * (t * TAU).sin();
    mid - span * 0.5 + span * smooth
}
