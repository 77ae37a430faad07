//! Supplementary points of interest: shops, services and transport.
//!
//! Places that exist as named entrances are enumerated from the entrance
//! table; the hard-coded coordinates only stand in when no entrance
//! matches. The rest are fixed coordinates plus the first few respawn
//! points of each kind.

use glam::Vec2;

use radar_core::constants::{BLIP_FALLBACK_SIZE, ENTRANCE_NAME_LEN, MAX_RESPAWN_ICONS};
use radar_core::enums::RespawnKind;
use radar_core::sprites;
use radar_core::types::Rgba;
use radar_core::world::{Entrance, WorldQuery};
use radar_projection::radar_space::to_radar_plane;

use super::Blip;

/// Places looked up by entrance name, with fallback coordinates.
struct EntranceGroup {
    names: &'static [&'static str],
    icon: i32,
    fallback: &'static [(f32, f32)],
}

const ENTRANCE_GROUPS: [EntranceGroup; 6] = [
    EntranceGroup {
        names: &["FDDONUT", "FDDONUT2"],
        icon: sprites::MORE_ICON_DONUTS,
        fallback: &[],
    },
    EntranceGroup {
        names: &["GENOTB", "GENOTB2"],
        icon: sprites::MORE_ICON_INTRACK,
        fallback: &[(1260.0, -803.0), (1477.0, 2284.0)],
    },
    EntranceGroup {
        names: &["BAR1"],
        icon: sprites::DATEDISCO,
        fallback: &[(1836.0, -1682.0)],
    },
    EntranceGroup {
        names: &["BAR2", "UFOBAR", "TSDINER"],
        icon: sprites::DATEDRINK,
        fallback: &[(495.0, -75.0), (-89.0, 1373.0), (452.0, -20.0), (-77.0, 1220.0)],
    },
    EntranceGroup {
        names: &["LASTRIP", "STRIP1", "STRIP2", "PDOMES2"],
        icon: sprites::MORE_ICON_STRIP,
        fallback: &[(2351.0, -1182.0), (2561.0, 1026.0), (-89.0, 1372.0), (2560.0, 1100.0)],
    },
    EntranceGroup {
        names: &["MAFCAS", "CASINO2", "TRICAS"],
        icon: sprites::MORE_ICON_CASINO,
        fallback: &[],
    },
];

/// Places with no entrance, each with its icon.
const FIXED_POINTS: [(i32, &[(f32, f32)]); 8] = [
    (sprites::BARBERS, &[(-1450.6199, 2592.1501)]),
    (sprites::PIZZA, &[(1366.77, 250.388)]),
    (
        sprites::AIRYARD,
        &[(1685.649, -2238.861), (-1422.066, -288.3433), (1663.977, 1424.857)],
    ),
    (sprites::BOATYARD, &[(-1574.0028, 133.4718)]),
    (sprites::FIRE, &[(1753.736, -1457.757), (-2025.462, 82.1209)]),
    (sprites::RACE, &[(2139.691, -54.2869), (-2297.395, -1679.625)]),
    (sprites::GYM, &[(665.33, -1865.615)]),
    (
        sprites::MORE_ICON_TRAIN,
        &[
            (1434.145, 2624.496),
            (-1983.391, 138.4992),
            (1759.01, -1944.441),
            (822.3628, -1364.624),
            (2859.9597, 1290.1663),
        ],
    ),
];

/// Entrance names match on their leading bytes only.
pub fn entrance_name_matches(name: &str, pattern: &str) -> bool {
    name.bytes()
        .take(ENTRANCE_NAME_LEN)
        .eq(pattern.bytes().take(ENTRANCE_NAME_LEN))
}

fn extra_blip(world_xy: Vec2, icon: i32) -> Blip {
    Blip {
        position: to_radar_plane(world_xy),
        icon,
        size: BLIP_FALLBACK_SIZE,
        color: Rgba::WHITE,
        enabled: true,
        short_range: false,
    }
}

/// Append every supplementary blip to `out`.
pub fn collect(world: &dyn WorldQuery, out: &mut Vec<Blip>) {
    let entrances = world.entrances().unwrap_or_else(|e| {
        log::debug!("extra icons without entrances: {e}");
        Vec::new()
    });

    for group in &ENTRANCE_GROUPS {
        let matches: Vec<&Entrance> = entrances
            .iter()
            .filter(|e| e.area == 0)
            .filter(|e| group.names.iter().any(|n| entrance_name_matches(&e.name, n)))
            .collect();
        if matches.is_empty() {
            out.extend(
                group
                    .fallback
                    .iter()
                    .map(|&(x, y)| extra_blip(Vec2::new(x, y), group.icon)),
            );
        } else {
            out.extend(matches.iter().map(|e| extra_blip(e.rect.center(), group.icon)));
        }
    }

    for (icon, points) in FIXED_POINTS {
        out.extend(points.iter().map(|&(x, y)| extra_blip(Vec2::new(x, y), icon)));
    }

    for (kind, icon) in [
        (RespawnKind::Police, sprites::POLICE),
        (RespawnKind::Hospital, sprites::HOSPITAL),
    ] {
        out.extend(
            world
                .respawn_points(kind)
                .into_iter()
                .take(MAX_RESPAWN_ICONS)
                .map(|p| extra_blip(p.truncate(), icon)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use radar_core::types::Rect2;
    use radar_sandbox::{SandboxConfig, SandboxWorld};

    fn count(blips: &[Blip], icon: i32) -> usize {
        blips.iter().filter(|b| b.icon == icon).count()
    }

    #[test]
    fn test_name_match_uses_eight_bytes() {
        assert!(entrance_name_matches("LASTRIP", "LASTRIP"));
        assert!(entrance_name_matches("CASINO2_EXTRA", "CASINO2_X"));
        assert!(!entrance_name_matches("BAR", "BAR1"));
        assert!(!entrance_name_matches("BAR12", "BAR1"));
    }

    #[test]
    fn test_fallback_coordinates_without_entrances() {
        let world = SandboxWorld::new(SandboxConfig::default());
        let mut blips = Vec::new();
        collect(&world, &mut blips);
        assert_eq!(count(&blips, sprites::MORE_ICON_DONUTS), 0);
        assert_eq!(count(&blips, sprites::MORE_ICON_INTRACK), 2);
        assert_eq!(count(&blips, sprites::DATEDRINK), 4);
        assert_eq!(count(&blips, sprites::MORE_ICON_TRAIN), 5);
        assert_eq!(count(&blips, sprites::AIRYARD), 3);
    }

    #[test]
    fn test_entrances_replace_fallbacks() {
        let mut world = SandboxWorld::new(SandboxConfig::default());
        let rect = Rect2::new(Vec2::new(100.0, 100.0), Vec2::new(110.0, 120.0));
        world.add_entrance(Entrance { name: "GENOTB".into(), area: 0, rect });
        world.add_entrance(Entrance { name: "GENOTB2".into(), area: 5, rect });
        world.add_entrance(Entrance { name: "FDDONUT2".into(), area: 0, rect });

        let mut blips = Vec::new();
        collect(&world, &mut blips);
        let intrack: Vec<&Blip> = blips
            .iter()
            .filter(|b| b.icon == sprites::MORE_ICON_INTRACK)
            .collect();
        assert_eq!(intrack.len(), 1);
        assert_eq!(intrack[0].position, Vec3::new(3105.0, -2890.0, 0.1));
        assert_eq!(count(&blips, sprites::MORE_ICON_DONUTS), 1);
    }

    #[test]
    fn test_respawns_capped_per_kind() {
        let mut world = SandboxWorld::new(SandboxConfig::default());
        for i in 0..14 {
            world.add_respawn(RespawnKind::Police, Vec3::new(i as f32, 0.0, 0.0));
        }
        world.add_respawn(RespawnKind::Hospital, Vec3::ZERO);

        let mut blips = Vec::new();
        collect(&world, &mut blips);
        assert_eq!(count(&blips, sprites::POLICE), MAX_RESPAWN_ICONS);
        assert_eq!(count(&blips, sprites::HOSPITAL), 1);
    }
}
