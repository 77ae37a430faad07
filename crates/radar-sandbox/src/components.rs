//! ECS components of the sandbox world.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use radar_core::enums::{ProjectileWeapon, RespawnKind, VehicleClass};
use radar_core::types::{Basis, EntityHandle};
use radar_core::world::{Entrance, RadarTrace, TerritoryZone};

/// World position in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec3);

/// Host velocity in units per 1/50 s step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec3);

/// Stable handle the world query hands out for this entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Handle(pub EntityHandle);

/// Marker + state for the player ped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    pub heading: f32,
    pub in_interior: bool,
    /// Forward vector of the host game camera.
    pub camera_forward: Vec3,
    pub vehicle: Option<hecs::Entity>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    pub class: VehicleClass,
    pub basis: Basis,
}

/// Marker for non-player peds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ped;

/// Radar-trace table slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceSlot(pub RadarTrace);

/// Enter/exit marker with its table index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntranceSlot {
    pub index: usize,
    pub entrance: Entrance,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone(pub TerritoryZone);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileState {
    pub weapon: ProjectileWeapon,
    pub creator: Option<EntityHandle>,
    pub active: bool,
}

/// Respawn point marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Respawn(pub RespawnKind);
