//! Gang-territory overlay: a coarse cache over the host zone table.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use radar_core::constants::*;
use radar_core::types::{Rect2, Rgba};
use radar_core::world::{TerritoryZone, WorldQuery};

use crate::error::LayerError;

const CONTROLLED_COLOR: Rgba = Rgba::new(0, 200, 0, GANG_ZONE_ALPHA);
const BALLAS_COLOR: Rgba = Rgba::new(200, 0, 200, GANG_ZONE_ALPHA);
const VAGOS_COLOR: Rgba = Rgba::new(255, 220, 0, GANG_ZONE_ALPHA);

/// A cached zone, host world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GangZone {
    pub rect: Rect2,
    pub color: Rgba,
}

impl GangZone {
    /// Zone center in radar space.
    pub fn radar_center(&self) -> Vec2 {
        self.rect.center() + Vec2::new(RADAR_OFFSET_X, RADAR_OFFSET_Y)
    }

    /// Quad placement for drawing: radar-space center at the shared depth and padded size.
    /// `None` for zones too far from `camera` or thinner than a unit.
    pub fn quad(&self, camera: Vec2) -> Option<(Vec3, Vec2)> {
        let center = self.radar_center();
        if center.distance(camera) > GANG_ZONE_MAX_RENDER_DISTANCE {
            return None;
        }
        let (w, h) = (self.rect.width(), self.rect.height());
        if w < 1.0 || h < 1.0 {
            return None;
        }
        Some((
            center.extend(GANG_ZONE_Z),
            Vec2::new(w + GANG_ZONE_OVERLAP, h + GANG_ZONE_OVERLAP),
        ))
    }
}

/// Zones the player can contest or already holds, claimed, of a sane size.
pub fn accepts(zone: &TerritoryZone) -> bool {
    let size_ok = |s: f32| (GANG_ZONE_MIN_SIZE..=GANG_ZONE_MAX_SIZE).contains(&s.abs());
    (zone.player_can_start_war || zone.controlled_by_player)
        && !zone.color.is_blank()
        && size_ok(zone.rect.width())
        && size_ok(zone.rect.height())
}

pub fn zone_color(zone: &TerritoryZone) -> Rgba {
    if zone.controlled_by_player {
        CONTROLLED_COLOR
    } else if zone.ballas_density >= zone.vagos_density {
        BALLAS_COLOR
    } else {
        VAGOS_COLOR
    }
}

#[derive(Debug, Clone, Default)]
pub struct GangZoneOverlay {
    zones: Vec<GangZone>,
    last_refresh_ms: Option<u64>,
}

impl GangZoneOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zones(&self) -> &[GangZone] {
        &self.zones
    }

    pub fn clear(&mut self) {
        self.zones.clear();
        self.last_refresh_ms = None;
    }

    /// Refresh the cache when stale or empty; empty it while gang wars are off.
    pub fn refresh(&mut self, world: &dyn WorldQuery, now_ms: u64) -> Result<(), LayerError> {
        if !world.gang_wars_active() {
            self.zones.clear();
            return Ok(());
        }
        let stale = match self.last_refresh_ms {
            Some(last) => now_ms.saturating_sub(last) > GANG_ZONE_CACHE_INTERVAL_MS,
            None => true,
        };
        if !stale && !self.zones.is_empty() {
            return Ok(());
        }

        self.last_refresh_ms = Some(now_ms);
        self.zones = world
            .territory_zones()?
            .iter()
            .filter(|z| accepts(z))
            .map(|z| GangZone {
                rect: z.rect,
                color: zone_color(z),
            })
            .collect();
        log::debug!("gang zone cache: {} zones", self.zones.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radar_sandbox::{SandboxConfig, SandboxWorld};

    fn zone(min: (f32, f32), max: (f32, f32)) -> TerritoryZone {
        TerritoryZone {
            rect: Rect2::new(Vec2::new(min.0, min.1), Vec2::new(max.0, max.1)),
            color: Rgba::rgb(200, 0, 200),
            player_can_start_war: true,
            controlled_by_player: false,
            ballas_density: 3,
            vagos_density: 1,
        }
    }

    #[test]
    fn test_filter_size_bounds() {
        assert!(accepts(&zone((0.0, 0.0), (5.0, 600.0))));
        assert!(!accepts(&zone((0.0, 0.0), (4.9, 100.0))));
        assert!(!accepts(&zone((0.0, 0.0), (100.0, 600.5))));
    }

    #[test]
    fn test_filter_ownership_and_color() {
        let mut z = zone((0.0, 0.0), (100.0, 100.0));
        z.player_can_start_war = false;
        assert!(!accepts(&z));
        z.controlled_by_player = true;
        assert!(accepts(&z));
        z.color = Rgba::new(0, 0, 0, 255);
        assert!(!accepts(&z));
    }

    #[test]
    fn test_zone_colors() {
        let mut z = zone((0.0, 0.0), (100.0, 100.0));
        assert_eq!(zone_color(&z), BALLAS_COLOR);
        z.ballas_density = 1;
        assert_eq!(zone_color(&z), BALLAS_COLOR);
        z.vagos_density = 2;
        assert_eq!(zone_color(&z), VAGOS_COLOR);
        z.controlled_by_player = true;
        assert_eq!(zone_color(&z), CONTROLLED_COLOR);
    }

    #[test]
    fn test_refresh_follows_gang_wars() {
        let mut world = SandboxWorld::new(SandboxConfig::default());
        world.add_zone(zone((0.0, 0.0), (100.0, 100.0)));
        world.add_zone(zone((0.0, 0.0), (1000.0, 100.0)));

        let mut overlay = GangZoneOverlay::new();
        overlay.refresh(&world, 0).unwrap();
        assert!(overlay.zones().is_empty());

        world.set_gang_wars_active(true);
        overlay.refresh(&world, 10).unwrap();
        assert_eq!(overlay.zones().len(), 1);

        world.add_zone(zone((200.0, 0.0), (300.0, 100.0)));
        overlay.refresh(&world, 500).unwrap();
        assert_eq!(overlay.zones().len(), 1);
        overlay.refresh(&world, 1011).unwrap();
        assert_eq!(overlay.zones().len(), 2);

        world.set_gang_wars_active(false);
        overlay.refresh(&world, 1100).unwrap();
        assert!(overlay.zones().is_empty());
    }

    #[test]
    fn test_quad_culls_far_and_pads() {
        let z = GangZone {
            rect: Rect2::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 50.0)),
            color: BALLAS_COLOR,
        };
        let (pos, size) = z.quad(Vec2::new(3000.0, -3000.0)).unwrap();
        assert_eq!(pos, Vec3::new(3050.0, -2975.0, GANG_ZONE_Z));
        assert!((size.x - 100.001).abs() < 1e-4);
        assert!(z.quad(Vec2::new(8000.0, -3000.0)).is_none());
    }
}
