//! Mapping between host world coordinates, radar space and radar-local screen space.

use glam::{Vec2, Vec3};

use radar_core::constants::{RADAR_OFFSET_X, RADAR_OFFSET_Y, RADAR_PLANE_Z};
use radar_core::types::distance_sq_2d;
use radar_core::view::ProjectionContext;

use crate::projection::world_to_screen;

/// Host world point to radar space, keeping its height.
pub fn to_radar_space(world: Vec3) -> Vec3 {
    Vec3::new(world.x + RADAR_OFFSET_X, world.y + RADAR_OFFSET_Y, world.z)
}

/// Host world (x, y) to radar space on the flat radar plane.
pub fn to_radar_plane(world: Vec2) -> Vec3 {
    Vec3::new(world.x + RADAR_OFFSET_X, world.y + RADAR_OFFSET_Y, RADAR_PLANE_Z)
}

/// Radar-space point back to host world.
pub fn from_radar_space(radar: Vec3) -> Vec3 {
    Vec3::new(radar.x - RADAR_OFFSET_X, radar.y - RADAR_OFFSET_Y, radar.z)
}

/// Ground-plane range test, both points in the same space.
pub fn is_within_radar_range(pos: Vec3, player: Vec3, range: f32) -> bool {
    distance_sq_2d(pos, player) <= range * range
}

/// Signed offset from the radar center for a projected render-target point.
pub fn target_to_local_offset(screen: Vec2, target: Vec2, radar_size: Vec2) -> Vec2 {
    (screen / target - Vec2::splat(0.5)) * radar_size
}

/// Project a radar-space point and express it as an offset from the radar's
/// screen center, scaled to the radar pixel size.
pub fn world_to_local_offset(
    radar_pos: Vec3,
    ctx: &ProjectionContext,
    radar_size: Vec2,
) -> Option<Vec2> {
    world_to_screen(radar_pos, ctx).map(|s| target_to_local_offset(s, ctx.target, radar_size))
}

/// Project a radar-space point straight to absolute screen pixels on the radar.
pub fn world_to_radar_screen(
    radar_pos: Vec3,
    ctx: &ProjectionContext,
    radar_center: Vec2,
    radar_size: Vec2,
) -> Option<Vec2> {
    world_to_local_offset(radar_pos, ctx, radar_size).map(|o| radar_center + o)
}
