//! GPS route: path search to the target trace and start clipping.

use glam::{Vec2, Vec3};

use radar_core::constants::*;
use radar_core::enums::VehicleClass;
use radar_core::draw::RoutePoint;
use radar_core::types::Rgba;
use radar_core::world::{PlayerTelemetry, WorldQuery};

use crate::error::LayerError;

pub const ROUTE_COLOR: Rgba = Rgba::new(255, 220, 0, 255);

fn on_route_plane(world: Vec3) -> Vec3 {
    Vec3::new(world.x + RADAR_OFFSET_X, world.y + RADAR_OFFSET_Y, GPS_LINE_Z)
}

/// Where the drawn route starts, given route nodes and the player, all in
/// radar space on the route plane. Returns the start point and the index of
/// the segment it lies on.
///
/// Segments the player has already passed are skipped, so the line never
/// doubles back behind the player.
pub fn route_start(nodes: &[Vec3], player: Vec3) -> (Vec3, usize) {
    let mut start = player;
    let mut segment = 0;

    for (i, pair) in nodes.windows(2).enumerate() {
        let (a, b) = (pair[0], pair[1]);
        let len = a.distance(b);
        if len < GPS_MIN_SEGMENT {
            continue;
        }
        let dir = (b - a) / len;
        let proj = (player - a).dot(dir);

        if proj >= len {
            segment = i + 1;
            continue;
        }
        if proj > 0.0 {
            start = a + dir * proj;
            segment = i;
            break;
        }
        if a.distance(player) < GPS_SNAP_DISTANCE {
            start = player;
            segment = i;
            break;
        }
    }
    (start, segment)
}

/// Polyline from the player to `destination` along `nodes` (host world coordinates).
pub fn build_route(nodes: &[Vec3], player: Vec3, destination: Vec3) -> Vec<RoutePoint> {
    if nodes.is_empty() {
        return Vec::new();
    }
    let radar_nodes: Vec<Vec3> = nodes.iter().map(|&n| on_route_plane(n)).collect();
    let (start, segment) = route_start(&radar_nodes, on_route_plane(player));

    let point = |position| RoutePoint {
        position,
        color: ROUTE_COLOR,
    };
    let mut route = Vec::with_capacity(radar_nodes.len() + 2);
    route.push(point(start));
    route.extend(radar_nodes.iter().skip(segment + 1).map(|&n| point(n)));
    route.push(point(on_route_plane(destination)));
    route
}

/// Route for the current frame, `None` when the player is not in a GPS
/// vehicle, no target is set or the path search came back empty.
pub fn plan(
    world: &dyn WorldQuery,
    player: &PlayerTelemetry,
) -> Result<Option<Vec<RoutePoint>>, LayerError> {
    let Some(vehicle) = player.vehicle else {
        return Ok(None);
    };
    if !vehicle.class.uses_gps() {
        return Ok(None);
    }
    let Some(target) = world.gps_target() else {
        return Ok(None);
    };

    let destination = Vec2::new(target.position.x, target.position.y).extend(player.position.z);
    let path = world.find_route(
        player.position,
        destination,
        vehicle.class == VehicleClass::Boat,
        GPS_MAX_NODES,
    )?;
    if path.nodes.is_empty() {
        return Ok(None);
    }

    let route = build_route(&path.nodes, player.position, destination);
    Ok((route.len() >= 2).then_some(route))
}
