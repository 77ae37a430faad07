//! Enumeration types used throughout the radar.

use serde::{Deserialize, Serialize};

/// Vehicle class, resolved once by the world adapter from the host's model tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleClass {
    #[default]
    Automobile,
    Bike,
    /// Pedal bike. Never gets a GPS route.
    Bmx,
    Boat,
    Heli,
    /// Fixed-wing aircraft.
    Plane,
    Train,
}

impl VehicleClass {
    /// Helicopters and fixed-wing aircraft.
    pub fn is_aircraft(self) -> bool {
        matches!(self, VehicleClass::Heli | VehicleClass::Plane)
    }

    /// Vehicles that follow the road graph (and so can show a GPS route).
    pub fn uses_gps(self) -> bool {
        !matches!(
            self,
            VehicleClass::Plane | VehicleClass::Heli | VehicleClass::Bmx
        )
    }
}

/// What a radar trace is attached to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraceKind {
    #[default]
    None,
    Car,
    Char,
    Object,
    Coord,
    ContactPoint,
    Spotlight,
    Pickup,
    Airstrip,
}

impl TraceKind {
    /// Coordinate-style markers created by missions.
    pub fn is_mission_marker(self) -> bool {
        matches!(
            self,
            TraceKind::Coord | TraceKind::ContactPoint | TraceKind::Spotlight
        )
    }
}

/// Where the host shows a trace (world marker, radar blip, both, or neither).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraceDisplay {
    Neither,
    MarkerOnly,
    BlipOnly,
    #[default]
    Both,
}

/// Vertical relation of a tracked object to the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeightIndicator {
    Below,
    Above,
    #[default]
    Same,
}

impl HeightIndicator {
    /// Classify `object_z` against `player_z`; differences within `threshold` count as level.
    pub fn classify(object_z: f32, player_z: f32, threshold: f32) -> Self {
        let diff = object_z - player_z;
        if diff > threshold {
            HeightIndicator::Above
        } else if diff < -threshold {
            HeightIndicator::Below
        } else {
            HeightIndicator::Same
        }
    }
}

/// Outline of the radar on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadarShape {
    #[default]
    Circle,
    Square,
}

impl RadarShape {
    pub fn from_circle_flag(circle: bool) -> Self {
        if circle {
            RadarShape::Circle
        } else {
            RadarShape::Square
        }
    }

    pub fn is_circle(self) -> bool {
        self == RadarShape::Circle
    }

    pub fn is_square(self) -> bool {
        self == RadarShape::Square
    }
}

/// Projectile weapon type as reported by the host projectile table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileWeapon {
    #[default]
    Grenade,
    Molotov,
    Teargas,
    Satchel,
    Rocket,
    RocketHs,
    RLauncher,
    RLauncherHs,
}

impl ProjectileWeapon {
    /// Rockets and RPG rounds, the only projectiles shown as radar threats.
    pub fn is_rocket(self) -> bool {
        matches!(
            self,
            ProjectileWeapon::Rocket
                | ProjectileWeapon::RocketHs
                | ProjectileWeapon::RLauncher
                | ProjectileWeapon::RLauncherHs
        )
    }
}

/// Availability of the graphics device at a frame boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceStatus {
    #[default]
    Ok,
    /// Lost; every entry point returns early until reset.
    Lost,
    /// Lost but ready to be reset. Rendering is still allowed.
    NotReset,
}

impl DeviceStatus {
    pub fn can_render(self) -> bool {
        !matches!(self, DeviceStatus::Lost)
    }
}

/// Respawn point category used by the extra-icon layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RespawnKind {
    Police,
    Hospital,
}
