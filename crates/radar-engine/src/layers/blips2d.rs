//! Points of interest drawn flat over the composited map.

use glam::Vec2;

use radar_core::constants::{BLIP_ICON_SIZE, ORBIT_EPSILON, RADAR_PLANE_Z};
use radar_core::draw::DrawList;
use radar_core::sprites;
use radar_core::world::RadarTrace;
use radar_projection::radar_space::is_within_radar_range;

use super::push_icon;
use crate::blips::Blip;
use crate::error::LayerError;
use crate::frame::FrameContext;

/// Any live coordinate or contact checkpoint.
pub fn has_mission_checkpoint(traces: &[RadarTrace]) -> bool {
    traces.iter().any(|t| t.in_use && t.is_mission_checkpoint())
}

pub fn draw(ctx: &FrameContext, blips: &[Blip], out: &mut DrawList) -> Result<(), LayerError> {
    let checkpoint = has_mission_checkpoint(&ctx.world.traces()?);
    let range = ctx.world.radar_range();
    let camera = ctx.camera.position.extend(0.0);
    let orbit = ctx.orbit();
    let size = ctx.icon_size(BLIP_ICON_SIZE);

    for blip in blips {
        if !blip.enabled {
            continue;
        }
        if blip.short_range && !is_within_radar_range(blip.position, camera, range) {
            continue;
        }
        let Some(texture) = ctx.textures.icon_handle(blip.icon) else {
            continue;
        };
        if blip.icon == sprites::CENTRE {
            continue;
        }
        let waypoint = blip.icon == sprites::WAYPOINT;
        if waypoint && checkpoint {
            continue;
        }

        let mut pos = blip.position;
        pos.z += RADAR_PLANE_Z;

        let mut drawn = false;
        if let Some(p) = ctx.project(pos) {
            if orbit.is_inside(p) {
                push_icon(out, texture, p, size, 0.0);
                drawn = true;
            }
        }

        // The waypoint always shows, pinned to the edge when off the map.
        if waypoint && !drawn {
            let screen_angle = ctx.project_target(pos).and_then(|s| {
                let dir = s / ctx.view.target - Vec2::splat(0.5);
                (dir.length() > ORBIT_EPSILON).then(|| dir.y.atan2(dir.x))
            });
            if let Some(angle) = screen_angle.or_else(|| ctx.orbit_angle_to(pos.truncate())) {
                push_icon(out, texture, orbit.point_at_angle(angle), size, 0.0);
            }
        }
    }
    Ok(())
}
