//! Colored indicator glyphs for tracked peds, vehicles, markers and enemy missiles.

use glam::{Vec2, Vec3};

use radar_core::constants::*;
use radar_core::draw::{DrawCommand, DrawList};
use radar_core::enums::{HeightIndicator, TraceDisplay, TraceKind};
use radar_core::types::Rgba;
use radar_core::world::{PlayerTelemetry, Projectile, RadarTrace};
use radar_projection::radar_space::to_radar_plane;

use crate::error::LayerError;
use crate::frame::FrameContext;

const MISSILE_COLOR: Rgba = Rgba::new(255, 0, 0, 255);

/// Traces that get a glyph.
pub fn needs_indicator(trace: &RadarTrace) -> bool {
    trace.in_use
        && trace.display != TraceDisplay::Neither
        && (matches!(
            trace.kind,
            TraceKind::Char | TraceKind::Car | TraceKind::Spotlight
        ) || trace.is_mission_checkpoint())
}

/// Live rockets fired by someone other than the player or their vehicle.
pub fn is_enemy_missile(projectile: &Projectile, player: Option<&PlayerTelemetry>) -> bool {
    if !projectile.active || !projectile.weapon.is_rocket() {
        return false;
    }
    match (projectile.creator, player) {
        (Some(creator), Some(p)) => {
            creator != p.ped && Some(creator) != p.vehicle.map(|v| v.handle)
        }
        _ => true,
    }
}

/// Unit outline of a glyph: triangles point down/up, level objects get a square.
pub fn glyph_outline(kind: HeightIndicator) -> Vec<Vec2> {
    match kind {
        HeightIndicator::Below => vec![
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(0.0, 1.0),
        ],
        HeightIndicator::Above => vec![
            Vec2::new(0.0, -1.0),
            Vec2::new(-1.0, 1.0),
            Vec2::new(1.0, 1.0),
        ],
        HeightIndicator::Same => vec![
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ],
    }
}

/// Black outline pass then the colored glyph, both centered on `center`.
pub fn push_glyph(out: &mut DrawList, center: Vec2, size: f32, color: Rgba, kind: HeightIndicator) {
    let outline = glyph_outline(kind);
    let scaled = |half: f32| -> Vec<Vec2> { outline.iter().map(|&v| center + v * half).collect() };

    out.push(DrawCommand::Polygon {
        points: scaled((size + INDICATOR_BORDER_EXTRA) * 0.5),
        color: Rgba::BLACK.with_alpha(color.a),
    });
    out.push(DrawCommand::Polygon {
        points: scaled(size * 0.5),
        color,
    });
}

fn place(ctx: &FrameContext, world: Vec3) -> Option<Vec2> {
    ctx.place_on_radar(to_radar_plane(world.truncate()))
}

pub fn draw(ctx: &FrameContext, out: &mut DrawList) -> Result<(), LayerError> {
    let player_z = ctx.player_position().z;
    let size = ctx.icon_size(INDICATOR_SIZE);

    for trace in ctx.world.traces()?.iter().filter(|t| needs_indicator(t)) {
        let world = ctx.world.trace_position(trace);
        let Some(center) = place(ctx, world) else {
            continue;
        };
        let kind = HeightIndicator::classify(world.z, player_z, HEIGHT_INDICATOR_THRESHOLD);
        push_glyph(out, center, size, trace.color, kind);
    }

    let size = ctx.icon_size(MISSILE_INDICATOR_SIZE);
    for missile in ctx.world.projectiles()? {
        if !is_enemy_missile(&missile, ctx.player.as_ref()) {
            continue;
        }
        let Some(center) = place(ctx, missile.position) else {
            continue;
        };
        let kind = HeightIndicator::classify(
            missile.position.z,
            player_z,
            HEIGHT_INDICATOR_THRESHOLD,
        );
        push_glyph(out, center, size, MISSILE_COLOR, kind);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use radar_core::enums::ProjectileWeapon;
    use radar_core::types::EntityHandle;

    #[test]
    fn test_indicator_sources() {
        let char_trace = RadarTrace { kind: TraceKind::Char, ..Default::default() };
        assert!(needs_indicator(&char_trace));
        let hidden = RadarTrace { display: TraceDisplay::Neither, ..char_trace };
        assert!(!needs_indicator(&hidden));
        let checkpoint = RadarTrace { kind: TraceKind::Coord, sprite: 0, ..Default::default() };
        assert!(needs_indicator(&checkpoint));
        let shop = RadarTrace { kind: TraceKind::Coord, sprite: 29, ..Default::default() };
        assert!(!needs_indicator(&shop));
    }

    #[test]
    fn test_player_missiles_ignored() {
        let player = PlayerTelemetry {
            ped: EntityHandle(1),
            position: Vec3::ZERO,
            heading: 0.0,
            in_interior: false,
            vehicle: None,
        };
        let mut rocket = Projectile {
            active: true,
            position: Vec3::ZERO,
            weapon: ProjectileWeapon::Rocket,
            creator: Some(EntityHandle(1)),
        };
        assert!(!is_enemy_missile(&rocket, Some(&player)));
        rocket.creator = Some(EntityHandle(9));
        assert!(is_enemy_missile(&rocket, Some(&player)));
        rocket.active = false;
        assert!(!is_enemy_missile(&rocket, Some(&player)));
    }

    #[test]
    fn test_glyph_border_is_black_and_larger() {
        let mut out = DrawList::new();
        let color = Rgba::new(10, 20, 30, 128);
        push_glyph(&mut out, Vec2::new(100.0, 100.0), 13.0, color, HeightIndicator::Above);
        assert_eq!(out.count("polygon"), 2);
        match (&out.commands[0], &out.commands[1]) {
            (
                DrawCommand::Polygon { points: border, color: bc },
                DrawCommand::Polygon { points: fill, color: fc },
            ) => {
                assert_eq!(*bc, Rgba::new(0, 0, 0, 128));
                assert_eq!(*fc, color);
                assert_eq!(border.len(), 3);
                assert_eq!(border[0], Vec2::new(100.0, 90.5));
                assert_eq!(fill[0], Vec2::new(100.0, 93.5));
            }
            _ => panic!("expected two polygons"),
        }
    }
}
