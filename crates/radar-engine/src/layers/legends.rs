//! Story-character legend icons.
//!
//! Same placement as indicators, except that edge placement is suppressed
//! whenever a tracked ped, vehicle or mission checkpoint is on the radar.

use radar_core::constants::BLIP_ICON_SIZE;
use radar_core::draw::DrawList;
use radar_core::enums::TraceKind;
use radar_core::sprites;
use radar_core::world::RadarTrace;
use radar_projection::radar_space::to_radar_plane;

use super::push_icon;
use crate::error::LayerError;
use crate::frame::FrameContext;

/// Any live trace that already claims the orbit edge.
pub fn hides_legends(traces: &[RadarTrace]) -> bool {
    traces.iter().filter(|t| t.in_use).any(|t| match t.kind {
        TraceKind::Char | TraceKind::Car => true,
        TraceKind::Coord | TraceKind::ContactPoint => sprites::is_mission_checkpoint(t.sprite),
        _ => false,
    })
}

pub fn draw(ctx: &FrameContext, out: &mut DrawList) -> Result<(), LayerError> {
    let traces = ctx.world.traces()?;
    let hide = hides_legends(&traces);
    let orbit = ctx.orbit();
    let size = ctx.icon_size(BLIP_ICON_SIZE);

    let legends = traces
        .iter()
        .filter(|t| t.in_use && t.sprite != sprites::NONE && sprites::is_legend(t.sprite));
    for trace in legends {
        let Some(texture) = ctx.textures.icon_handle(trace.sprite) else {
            continue;
        };
        let pos = to_radar_plane(ctx.world.trace_position(trace).truncate());

        let Some(p) = ctx.project(pos) else {
            if hide {
                continue;
            }
            if let Some(angle) = ctx.orbit_angle_to(pos.truncate()) {
                push_icon(out, texture, orbit.point_at_angle(angle), size, 0.0);
            }
            continue;
        };

        if orbit.is_inside(p) {
            push_icon(out, texture, p, size, 0.0);
        } else if !hide {
            push_icon(out, texture, orbit.clamp(p), size, 0.0);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_by_tracked_entities() {
        let legend = RadarTrace {
            kind: TraceKind::Coord,
            sprite: sprites::SWEET,
            ..Default::default()
        };
        assert!(!hides_legends(&[legend]));

        let ped = RadarTrace { kind: TraceKind::Char, ..Default::default() };
        assert!(hides_legends(&[legend, ped]));

        let retired = RadarTrace { in_use: false, ..ped };
        assert!(!hides_legends(&[legend, retired]));
    }

    #[test]
    fn test_checkpoint_contact_hides_legends() {
        let contact = RadarTrace {
            kind: TraceKind::ContactPoint,
            sprite: sprites::QMARK,
            ..Default::default()
        };
        assert!(hides_legends(&[contact]));
        let shop = RadarTrace {
            kind: TraceKind::ContactPoint,
            sprite: sprites::PIZZA,
            ..Default::default()
        };
        assert!(!hides_legends(&[shop]));
    }
}
