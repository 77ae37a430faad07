//! Point-of-interest aggregation.
//!
//! Every `BLIP_UPDATE_INTERVAL_MS` the list is cleared and rebuilt from the
//! trace table, and from the supplementary icon table when enabled. Nothing
//! is diffed between rebuilds.

pub mod extra_icons;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use radar_core::constants::{BLIP_FALLBACK_SIZE, BLIP_UPDATE_INTERVAL_MS, MAX_BLIP_ID};
use radar_core::enums::{TraceDisplay, TraceKind};
use radar_core::sprites::{self, is_legend};
use radar_core::types::Rgba;
use radar_core::world::{RadarTrace, WorldQuery};
use radar_projection::radar_space::to_radar_plane;

use crate::error::LayerError;
use crate::textures::TextureSet;

/// One point of interest, in radar space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Blip {
    pub position: Vec3,
    pub icon: i32,
    pub size: f32,
    pub color: Rgba,
    pub enabled: bool,
    /// Only shown while the player is within the host radar range.
    pub short_range: bool,
}

#[derive(Debug, Clone, Default)]
pub struct BlipAggregator {
    blips: Vec<Blip>,
    last_update_ms: Option<u64>,
    more_icons: bool,
}

/// Traces that never become blips, whatever their sprite.
fn is_excluded(trace: &RadarTrace) -> bool {
    !trace.in_use
        || trace.sprite == sprites::NORTH
        || trace.sprite == sprites::CJ
        || trace.display == TraceDisplay::Neither
        || trace.kind == TraceKind::Object
        || (trace.kind == TraceKind::Char && !is_legend(trace.sprite))
}

/// Sprite the trace is drawn with. Mission markers without a usable sprite
/// fall back to the waypoint; anything else without one is dropped.
fn resolve_sprite(trace: &RadarTrace, textures: &TextureSet) -> Option<i32> {
    let mission = trace.kind.is_mission_marker();
    let mut sprite = trace.sprite;
    if !(0..=MAX_BLIP_ID).contains(&sprite) {
        if !mission {
            return None;
        }
        sprite = sprites::WAYPOINT;
    }
    if textures.icon(sprite).is_some() {
        return Some(sprite);
    }
    if mission && textures.icon(sprites::WAYPOINT).is_some() {
        return Some(sprites::WAYPOINT);
    }
    None
}

/// Average texture side, or the fallback when the texture reports nothing.
fn icon_size(textures: &TextureSet, icon: i32) -> f32 {
    match textures.icon(icon) {
        Some(t) if t.width + t.height > 0 => ((t.width + t.height) / 2) as f32,
        _ => BLIP_FALLBACK_SIZE,
    }
}

impl BlipAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_more_icons(&mut self, enabled: bool) {
        self.more_icons = enabled;
    }

    pub fn more_icons(&self) -> bool {
        self.more_icons
    }

    pub fn blips(&self) -> &[Blip] {
        &self.blips
    }

    pub fn clear(&mut self) {
        self.blips.clear();
        self.last_update_ms = None;
    }

    /// Rebuild when the update interval has passed. Returns whether a rebuild ran.
    pub fn update(
        &mut self,
        world: &dyn WorldQuery,
        textures: &TextureSet,
        now_ms: u64,
    ) -> Result<bool, LayerError> {
        if let Some(last) = self.last_update_ms {
            if now_ms.saturating_sub(last) < BLIP_UPDATE_INTERVAL_MS {
                return Ok(false);
            }
        }
        self.last_update_ms = Some(now_ms);
        self.rebuild(world, textures)?;
        Ok(true)
    }

    /// Clear and rescan every source.
    pub fn rebuild(
        &mut self,
        world: &dyn WorldQuery,
        textures: &TextureSet,
    ) -> Result<(), LayerError> {
        self.blips.clear();

        for trace in world.traces()? {
            if is_excluded(&trace) {
                continue;
            }
            let Some(mut sprite) = resolve_sprite(&trace, textures) else {
                continue;
            };
            let mut position = trace.position;

            if let (TraceKind::Car, Some(vehicle)) = (trace.kind, trace.entity) {
                if let Ok(pos) = world.vehicle_position(vehicle) {
                    position = pos;
                    sprite = sprites::NONE;
                    if textures.icon(sprite).is_none() {
                        continue;
                    }
                }
            }

            if let Some(index) = trace.entrance {
                match world.entrance(index) {
                    Ok(entrance) if entrance.area != 0 => continue,
                    Ok(entrance) => {
                        let c = entrance.rect.center();
                        position = Vec3::new(c.x, c.y, position.z);
                    }
                    Err(e) => log::debug!("blip entrance lookup: {e}"),
                }
            }

            self.blips.push(Blip {
                position: to_radar_plane(position.truncate()),
                icon: sprite,
                size: icon_size(textures, sprite),
                color: trace.color,
                enabled: true,
                short_range: trace.short_range,
            });
        }

        if self.more_icons {
            extra_icons::collect(world, &mut self.blips);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use radar_core::enums::VehicleClass;
    use radar_core::types::Rect2;
    use radar_core::world::Entrance;
    use radar_sandbox::{HeadlessDevice, SandboxConfig, SandboxWorld};

    fn setup() -> (SandboxWorld, TextureSet) {
        let mut device = HeadlessDevice::new();
        let textures = TextureSet::load(&mut device);
        (SandboxWorld::new(SandboxConfig::default()), textures)
    }

    fn icons(agg: &BlipAggregator) -> Vec<i32> {
        agg.blips().iter().map(|b| b.icon).collect()
    }

    #[test]
    fn test_filters_markers_and_characters() {
        let (mut world, textures) = setup();
        world.add_trace(RadarTrace { sprite: sprites::NORTH, ..Default::default() });
        world.add_trace(RadarTrace { sprite: sprites::CJ, ..Default::default() });
        world.add_trace(RadarTrace { sprite: 30, kind: TraceKind::Object, ..Default::default() });
        world.add_trace(RadarTrace { sprite: 30, display: TraceDisplay::Neither, ..Default::default() });
        world.add_trace(RadarTrace { sprite: 30, in_use: false, ..Default::default() });
        world.add_trace(RadarTrace { sprite: 30, kind: TraceKind::Char, ..Default::default() });
        world.add_trace(RadarTrace { sprite: sprites::SWEET, kind: TraceKind::Char, ..Default::default() });
        world.add_trace(RadarTrace { sprite: 30, ..Default::default() });

        let mut agg = BlipAggregator::new();
        agg.rebuild(&world, &textures).unwrap();
        assert_eq!(icons(&agg), vec![sprites::SWEET, 30]);
    }

    #[test]
    fn test_mission_marker_falls_back_to_waypoint() {
        let (mut world, textures) = setup();
        world.add_trace(RadarTrace { sprite: 70, kind: TraceKind::Coord, ..Default::default() });
        world.add_trace(RadarTrace { sprite: 70, kind: TraceKind::Pickup, ..Default::default() });
        // Sprite 0 has no texture.
        world.add_trace(RadarTrace { sprite: 0, kind: TraceKind::Spotlight, ..Default::default() });

        let mut agg = BlipAggregator::new();
        agg.rebuild(&world, &textures).unwrap();
        assert_eq!(icons(&agg), vec![sprites::WAYPOINT, sprites::WAYPOINT]);
    }

    #[test]
    fn test_missing_waypoint_texture_drops_marker() {
        let mut device = HeadlessDevice::new().with_missing(["41", "12"]);
        let textures = TextureSet::load(&mut device);
        let mut world = SandboxWorld::new(SandboxConfig::default());
        world.add_trace(RadarTrace { sprite: 12, kind: TraceKind::Coord, ..Default::default() });

        let mut agg = BlipAggregator::new();
        agg.rebuild(&world, &textures).unwrap();
        assert!(agg.blips().is_empty());
    }

    #[test]
    fn test_positions_are_radar_space() {
        let (mut world, textures) = setup();
        world.add_trace(RadarTrace {
            sprite: sprites::PIZZA,
            position: Vec3::new(100.0, 200.0, 35.0),
            short_range: true,
            ..Default::default()
        });
        let mut agg = BlipAggregator::new();
        agg.rebuild(&world, &textures).unwrap();
        let blip = agg.blips()[0];
        assert_eq!(blip.position, Vec3::new(3100.0, -2800.0, 0.1));
        assert!(blip.short_range);
        assert!(blip.enabled);
        assert_eq!(blip.size, 32.0);
    }

    #[test]
    fn test_entrance_blip_uses_exterior_center() {
        let (mut world, textures) = setup();
        let outside = world.add_entrance(Entrance {
            name: "BARBERS".into(),
            area: 0,
            rect: Rect2::new(Vec2::new(0.0, 0.0), Vec2::new(20.0, 10.0)),
        });
        let inside = world.add_entrance(Entrance {
            name: "BARB2".into(),
            area: 3,
            rect: Rect2::new(Vec2::ZERO, Vec2::ONE),
        });
        world.add_trace(RadarTrace { sprite: sprites::BARBERS, entrance: Some(outside), ..Default::default() });
        world.add_trace(RadarTrace { sprite: sprites::BARBERS, entrance: Some(inside), ..Default::default() });

        let mut agg = BlipAggregator::new();
        agg.rebuild(&world, &textures).unwrap();
        assert_eq!(agg.blips().len(), 1);
        assert_eq!(agg.blips()[0].position, Vec3::new(3010.0, -2995.0, 0.1));
    }

    #[test]
    fn test_car_trace_with_live_vehicle_is_dropped() {
        let (mut world, textures) = setup();
        let car = world.spawn_vehicle(VehicleClass::Automobile, Vec3::new(50.0, 0.0, 20.0));
        world.add_trace(RadarTrace {
            kind: TraceKind::Car,
            sprite: 30,
            entity: Some(car),
            ..Default::default()
        });
        let mut agg = BlipAggregator::new();
        agg.rebuild(&world, &textures).unwrap();
        assert!(agg.blips().is_empty());

        world.despawn(car).unwrap();
        agg.rebuild(&world, &textures).unwrap();
        assert_eq!(icons(&agg), vec![30]);
    }

    #[test]
    fn test_update_is_rate_limited() {
        let (mut world, textures) = setup();
        let mut agg = BlipAggregator::new();
        assert!(agg.update(&world, &textures, 1000).unwrap());
        world.add_trace(RadarTrace { sprite: 30, ..Default::default() });
        assert!(!agg.update(&world, &textures, 1049).unwrap());
        assert!(agg.blips().is_empty());
        assert!(agg.update(&world, &textures, 1050).unwrap());
        assert_eq!(agg.blips().len(), 1);
    }

    #[test]
    fn test_extra_icons_only_when_enabled() {
        let (world, textures) = setup();
        let mut agg = BlipAggregator::new();
        agg.rebuild(&world, &textures).unwrap();
        assert!(agg.blips().is_empty());

        agg.set_more_icons(true);
        agg.rebuild(&world, &textures).unwrap();
        assert!(!agg.blips().is_empty());
        assert!(agg.blips().iter().all(|b| !b.short_range && b.color == Rgba::WHITE));
    }
}
