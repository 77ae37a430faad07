//! Plane avionics: runway marker and animated approach light.
//!
//! The light (56) shows while the strip center is on the map or the plane
//! is over the runway; otherwise the runway icon (57) rides the orbit.
//! Inside light mode the position falls back from the animated approach
//! point, to the strip center, to a point just inside the orbit, and an
//! out-of-bounds light with no visible runway section turns back into the
//! runway icon.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;

use radar_core::constants::*;
use radar_core::draw::DrawList;
use radar_core::sprites;
use radar_projection::radar_space::to_radar_plane;

use super::push_icon;
use crate::airstrips::{self, approach_offset, offset_range};
use crate::error::LayerError;
use crate::frame::FrameContext;

pub fn draw(ctx: &FrameContext, out: &mut DrawList) -> Result<(), LayerError> {
    if !ctx.in_plane() {
        return Ok(());
    }
    let player = ctx.player_position().truncate();
    let strip = airstrips::nearest(player);
    let on_runway = strip.is_on_runway(player);

    let vp = &ctx.viewport;
    let center = vp.center();
    let orbit = ctx.orbit();
    let icon = ctx.icon_size(BLIP_ICON_SIZE);
    let offset_of = |world: Vec2| ctx.project_offset(to_radar_plane(world));

    let center_offset = offset_of(strip.center);
    let light_mode = center_offset.is_some() || on_runway;

    // Projected strip center, else the orbit edge in its direction.
    let (mut pos, dir) = match center_offset {
        Some(o) => (center + o, o),
        None => {
            let radar_xy = to_radar_plane(strip.center).truncate();
            let Some(angle) = ctx.orbit_angle_to(radar_xy) else {
                return Ok(());
            };
            let (sin, cos) = angle.sin_cos();
            (orbit.point_on_edge(cos, sin), Vec2::new(cos, sin))
        }
    };

    let sprite = if light_mode { sprites::LIGHT } else { sprites::RUNWAY };
    let Some(texture) = ctx.textures.icon_handle(sprite) else {
        return Ok(());
    };
    let rotation = -ctx.camera.yaw - strip.direction() - FRAC_PI_2;

    if !light_mode {
        if center_offset.is_none() {
            let angle = dir.y.atan2(dir.x);
            pos = orbit.inset(icon * 0.5).point_at_angle(angle);
        }
        push_icon(out, texture, pos, icon, rotation);
        return Ok(());
    }

    let range = offset_range(strip, vp.half.x.min(vp.half.y), offset_of);
    let animated = offset_of(strip.point_at(approach_offset(range, ctx.now_ms)));

    pos = match (center_offset, animated) {
        (Some(_), Some(a)) => center + a,
        (Some(c), None) => center + c,
        _ => {
            let inner = (vp.half.x.min(vp.half.y) - icon).max(AIRSTRIP_MIN_INNER_RADIUS);
            let (sin, cos) = dir.y.atan2(dir.x).sin_cos();
            center + Vec2::new(cos, sin) * inner
        }
    };

    let inner_orbit = orbit.inset(icon * 0.6);
    let clamped = !inner_orbit.is_inside(pos);
    let to_runway = clamped && range.is_none();
    if clamped {
        if to_runway {
            if let Some(c) = center_offset {
                pos = center + c;
            }
        }
        pos = inner_orbit.clamp(pos);
    }

    let texture = if to_runway {
        ctx.textures
            .icon_handle(sprites::RUNWAY)
            .ok_or(LayerError::MissingTexture("runway icon"))?
    } else {
        texture
    };
    push_icon(out, texture, pos, icon, if clamped { rotation } else { 0.0 });
    Ok(())
}
