//! Read-only view of the host game world.
//!
//! The radar never touches host memory directly. An adapter implements
//! `WorldQuery` and hands out plain snapshots; every lookup that can miss
//! returns `Result`/`Option` instead of assuming the entity still exists.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::{ProjectileWeapon, RespawnKind, TraceDisplay, TraceKind, VehicleClass};
use crate::types::{Basis, EntityHandle, Rect2, Rgba};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldError {
    #[error("no player in the world")]
    NoPlayer,
    #[error("entity {0:?} not found")]
    EntityNotFound(EntityHandle),
    #[error("entrance {0} not found")]
    EntranceNotFound(usize),
    #[error("{0} table unavailable")]
    TableUnavailable(&'static str),
}

/// Vehicle the player occupies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleTelemetry {
    pub handle: EntityHandle,
    pub class: VehicleClass,
    pub position: Vec3,
    /// Units per 1/50 s step.
    pub velocity: Vec3,
    pub basis: Basis,
}

/// Player state polled once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerTelemetry {
    pub ped: EntityHandle,
    pub position: Vec3,
    /// Ped heading in radians.
    pub heading: f32,
    pub in_interior: bool,
    pub vehicle: Option<VehicleTelemetry>,
}

impl PlayerTelemetry {
    pub fn vehicle_class(&self) -> Option<VehicleClass> {
        self.vehicle.map(|v| v.class)
    }
}

/// One slot of the host radar-trace table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarTrace {
    pub in_use: bool,
    pub kind: TraceKind,
    pub display: TraceDisplay,
    pub sprite: i32,
    /// Resolved trace color (palette, brightness and friendliness already applied).
    pub color: Rgba,
    pub position: Vec3,
    pub short_range: bool,
    /// Attached ped (for `Char`) or vehicle (for `Car`).
    pub entity: Option<EntityHandle>,
    /// Attached entrance, an index into `WorldQuery::entrances`.
    pub entrance: Option<usize>,
}

impl Default for RadarTrace {
    fn default() -> Self {
        Self {
            in_use: true,
            kind: TraceKind::Coord,
            display: TraceDisplay::Both,
            sprite: 0,
            color: Rgba::WHITE,
            position: Vec3::ZERO,
            short_range: false,
            entity: None,
            entrance: None,
        }
    }
}

impl RadarTrace {
    /// Coordinate or contact traces using a checkpoint sprite.
    pub fn is_mission_checkpoint(&self) -> bool {
        matches!(self.kind, TraceKind::Coord | TraceKind::ContactPoint)
            && crate::sprites::is_mission_checkpoint(self.sprite)
    }
}

/// An enter/exit marker of a building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entrance {
    pub name: String,
    /// Interior area the entrance sits in; 0 is the exterior world.
    pub area: i32,
    pub rect: Rect2,
}

/// A gang territory from the host zone table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerritoryZone {
    pub rect: Rect2,
    /// Zone palette color; zero RGB means the zone is unclaimed.
    pub color: Rgba,
    pub player_can_start_war: bool,
    pub controlled_by_player: bool,
    pub ballas_density: u8,
    pub vagos_density: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub active: bool,
    pub position: Vec3,
    pub weapon: ProjectileWeapon,
    pub creator: Option<EntityHandle>,
}

/// Result of a path-graph search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub nodes: Vec<Vec3>,
    pub distance: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadioStation {
    pub id: i32,
    pub name: String,
}

/// Narrow read-only interface to the host world.
pub trait WorldQuery {
    fn player(&self) -> Result<PlayerTelemetry, WorldError>;

    /// Forward vector of the host's own game camera.
    fn camera_forward(&self) -> Result<Vec3, WorldError>;

    fn ground_height(&self, at: Vec2) -> Option<f32>;

    /// Road (or water) path from `from` to `to`, at most `max_nodes` long.
    fn find_route(
        &self,
        from: Vec3,
        to: Vec3,
        water: bool,
        max_nodes: usize,
    ) -> Result<Route, WorldError>;

    fn traces(&self) -> Result<Vec<RadarTrace>, WorldError>;

    fn ped_position(&self, ped: EntityHandle) -> Result<Vec3, WorldError>;

    fn vehicle_position(&self, vehicle: EntityHandle) -> Result<Vec3, WorldError>;

    fn entrances(&self) -> Result<Vec<Entrance>, WorldError>;

    fn entrance(&self, index: usize) -> Result<Entrance, WorldError>;

    fn gang_wars_active(&self) -> bool;

    fn territory_zones(&self) -> Result<Vec<TerritoryZone>, WorldError>;

    fn projectiles(&self) -> Result<Vec<Projectile>, WorldError>;

    /// Current radar range of the host HUD, used for short-range blips.
    fn radar_range(&self) -> f32;

    fn respawn_points(&self, kind: RespawnKind) -> Vec<Vec3>;

    /// Trace the player set as GPS destination, if it is still displayed.
    fn gps_target(&self) -> Option<RadarTrace>;

    /// Station playing in the current vehicle, `None` when the radio is off.
    fn radio(&self) -> Option<RadioStation>;

    /// Live position of a trace: the attached ped/vehicle when it resolves,
    /// else the stored coordinate.
    fn trace_position(&self, trace: &RadarTrace) -> Vec3 {
        match (trace.kind, trace.entity) {
            (TraceKind::Char, Some(ped)) => self.ped_position(ped).unwrap_or(trace.position),
            (TraceKind::Car, Some(vehicle)) => {
                self.vehicle_position(vehicle).unwrap_or(trace.position)
            }
            _ => trace.position,
        }
    }
}
