//! `SandboxWorld`: a seeded hecs world implementing `WorldQuery`.

use std::collections::HashMap;

use glam::{Vec2, Vec3};
use hecs::{Entity, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use radar_core::enums::{ProjectileWeapon, RespawnKind, TraceDisplay, TraceKind, VehicleClass};
use radar_core::sprites;
use radar_core::types::{Basis, EntityHandle, Rgba};
use radar_core::world::{
    Entrance, PlayerTelemetry, Projectile, RadarTrace, RadioStation, Route, TerritoryZone,
    VehicleTelemetry, WorldError, WorldQuery,
};

use crate::components::*;
use crate::movement;
use crate::terrain;

/// Distance in front of the player a spawned vehicle appears at.
pub const SPAWN_DISTANCE: f32 = 10.0;

/// Spacing of the straight-line route nodes.
pub const ROUTE_NODE_SPACING: f32 = 100.0;

/// Half side of the square `scatter_traces` spreads blips over.
pub const SCATTER_EXTENT: f32 = 2500.0;

/// Sprites `scatter_traces` picks from.
const SCATTER_SPRITES: [i32; 10] = [
    sprites::AIRYARD,
    sprites::BARBERS,
    sprites::BOATYARD,
    sprites::FIRE,
    sprites::HOSPITAL,
    sprites::PIZZA,
    sprites::POLICE,
    sprites::RACE,
    sprites::GYM,
    sprites::QMARK,
];

/// Trace colors `scatter_traces` picks from.
const SCATTER_COLORS: [Rgba; 4] = [
    Rgba::WHITE,
    Rgba::rgb(180, 24, 24),
    Rgba::rgb(40, 120, 220),
    Rgba::rgb(230, 200, 40),
];

/// Sandbox parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxConfig {
    pub seed: u64,
    /// Radar range reported to the compositor.
    pub radar_range: f32,
    /// Player spawn point (ground height is added).
    pub start: Vec2,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            radar_range: 250.0,
            start: Vec2::ZERO,
        }
    }
}

pub struct SandboxWorld {
    world: World,
    rng: ChaCha8Rng,
    handles: HashMap<EntityHandle, Entity>,
    next_handle: u32,
    player: Entity,
    gang_wars_active: bool,
    radar_range: f32,
    gps_target: Option<EntityHandle>,
    radio: Option<RadioStation>,
    next_entrance: usize,
    time_ms: u64,
}

impl SandboxWorld {
    pub fn new(config: SandboxConfig) -> Self {
        let mut world = World::new();
        let ground = terrain::ground_height(config.start).unwrap_or(0.0);
        let player = world.spawn((
            Position(config.start.extend(ground + 1.0)),
            PlayerState {
                heading: 0.0,
                in_interior: false,
                camera_forward: Vec3::Y,
                vehicle: None,
            },
        ));
        let mut sandbox = Self {
            world,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            handles: HashMap::new(),
            next_handle: 1,
            player,
            gang_wars_active: false,
            radar_range: config.radar_range,
            gps_target: None,
            radio: None,
            next_entrance: 0,
            time_ms: 0,
        };
        sandbox.register(player);
        log::debug!("sandbox world created with seed {}", config.seed);
        sandbox
    }

    pub fn ecs(&self) -> &World {
        &self.world
    }

    pub fn time_ms(&self) -> u64 {
        self.time_ms
    }

    fn register(&mut self, entity: Entity) -> EntityHandle {
        let handle = EntityHandle(self.next_handle);
        self.next_handle += 1;
        if let Err(e) = self.world.insert_one(entity, Handle(handle)) {
            log::warn!("entity {entity:?} vanished before registration: {e}");
        }
        self.handles.insert(handle, entity);
        handle
    }

    fn entity(&self, handle: EntityHandle) -> Result<Entity, WorldError> {
        self.handles
            .get(&handle)
            .copied()
            .filter(|e| self.world.contains(*e))
            .ok_or(WorldError::EntityNotFound(handle))
    }

    fn player_state(&self) -> Result<PlayerState, WorldError> {
        self.world
            .get::<&PlayerState>(self.player)
            .map(|s| *s)
            .map_err(|_| WorldError::NoPlayer)
    }

    fn with_player<F: FnOnce(&mut PlayerState)>(&mut self, f: F) {
        if let Ok(mut state) = self.world.get::<&mut PlayerState>(self.player) {
            f(&mut state);
        }
    }

    // ---- Player ----

    pub fn player_handle(&self) -> EntityHandle {
        self.world
            .get::<&Handle>(self.player)
            .map(|h| h.0)
            .unwrap_or(EntityHandle(0))
    }

    pub fn player_position(&self) -> Vec3 {
        self.world
            .get::<&Position>(self.player)
            .map(|p| p.0)
            .unwrap_or(Vec3::ZERO)
    }

    /// Move the player, and the vehicle it sits in.
    pub fn set_player_position(&mut self, position: Vec3) {
        if let Ok(mut pos) = self.world.get::<&mut Position>(self.player) {
            pos.0 = position;
        }
        if let Ok(Some(vehicle)) = self.player_state().map(|s| s.vehicle) {
            if let Ok(mut pos) = self.world.get::<&mut Position>(vehicle) {
                pos.0 = position;
            }
        }
    }

    pub fn set_heading(&mut self, heading: f32) {
        self.with_player(|s| s.heading = heading);
    }

    pub fn set_camera_forward(&mut self, forward: Vec3) {
        self.with_player(|s| s.camera_forward = forward);
    }

    pub fn set_in_interior(&mut self, in_interior: bool) {
        self.with_player(|s| s.in_interior = in_interior);
    }

    // ---- Vehicles ----

    pub fn spawn_vehicle(&mut self, class: VehicleClass, position: Vec3) -> EntityHandle {
        self.spawn_vehicle_with_basis(class, position, Basis::default())
    }

    fn spawn_vehicle_with_basis(
        &mut self,
        class: VehicleClass,
        position: Vec3,
        basis: Basis,
    ) -> EntityHandle {
        let entity = self.world.spawn((
            Position(position),
            Velocity::default(),
            VehicleState { class, basis },
        ));
        self.register(entity)
    }

    /// Spawn a vehicle ahead of the player along the camera forward
    /// vector, turned by a random multiple of 90 degrees.
    pub fn spawn_vehicle_in_front(&mut self, class: VehicleClass) -> EntityHandle {
        let forward = self
            .player_state()
            .map(|s| s.camera_forward.truncate())
            .unwrap_or(Vec2::Y)
            .try_normalize()
            .unwrap_or(Vec2::Y);
        let player = self.player_position();
        let xy = player.truncate() + forward * SPAWN_DISTANCE;
        let z = terrain::ground_height(xy).unwrap_or(player.z);

        let quarter = self.rng.gen_range(0..4) as f32 * std::f32::consts::FRAC_PI_2;
        let (sin, cos) = quarter.sin_cos();
        let basis = Basis {
            right: Vec3::new(cos, sin, 0.0),
            forward: Vec3::new(-sin, cos, 0.0),
            up: Vec3::Z,
        };
        self.spawn_vehicle_with_basis(class, xy.extend(z), basis)
    }

    /// Set the velocity of a vehicle, ped or projectile.
    pub fn set_velocity(&mut self, handle: EntityHandle, velocity: Vec3) -> Result<(), WorldError> {
        let entity = self.entity(handle)?;
        let mut vel = self
            .world
            .get::<&mut Velocity>(entity)
            .map_err(|_| WorldError::EntityNotFound(handle))?;
        vel.0 = velocity;
        Ok(())
    }

    pub fn set_vehicle_basis(&mut self, vehicle: EntityHandle, basis: Basis) -> Result<(), WorldError> {
        let entity = self.entity(vehicle)?;
        let mut state = self
            .world
            .get::<&mut VehicleState>(entity)
            .map_err(|_| WorldError::EntityNotFound(vehicle))?;
        state.basis = basis;
        Ok(())
    }

    /// Put the player in the driver seat.
    pub fn enter_vehicle(&mut self, vehicle: EntityHandle) -> Result<(), WorldError> {
        let entity = self.entity(vehicle)?;
        if self.world.get::<&VehicleState>(entity).is_err() {
            return Err(WorldError::EntityNotFound(vehicle));
        }
        self.with_player(|s| s.vehicle = Some(entity));
        movement::follow_vehicle(&mut self.world, self.player);
        log::debug!("player entered vehicle {:?}", vehicle);
        Ok(())
    }

    pub fn exit_vehicle(&mut self) {
        self.with_player(|s| s.vehicle = None);
    }

    pub fn despawn(&mut self, handle: EntityHandle) -> Result<(), WorldError> {
        let entity = self.entity(handle)?;
        if entity == self.player {
            return Err(WorldError::EntityNotFound(handle));
        }
        self.handles.remove(&handle);
        self.world
            .despawn(entity)
            .map_err(|_| WorldError::EntityNotFound(handle))?;
        Ok(())
    }

    // ---- Peds and traces ----

    pub fn spawn_ped(&mut self, position: Vec3) -> EntityHandle {
        let entity = self.world.spawn((Position(position), Velocity::default(), Ped));
        self.register(entity)
    }

    pub fn add_trace(&mut self, trace: RadarTrace) -> EntityHandle {
        let entity = self.world.spawn((TraceSlot(trace),));
        self.register(entity)
    }

    pub fn update_trace<F: FnOnce(&mut RadarTrace)>(
        &mut self,
        trace: EntityHandle,
        f: F,
    ) -> Result<(), WorldError> {
        let entity = self.entity(trace)?;
        let mut slot = self
            .world
            .get::<&mut TraceSlot>(entity)
            .map_err(|_| WorldError::EntityNotFound(trace))?;
        f(&mut slot.0);
        Ok(())
    }

    /// Drop `count` random coordinate traces over the map.
    pub fn scatter_traces(&mut self, count: usize) -> Vec<EntityHandle> {
        let mut handles = Vec::with_capacity(count);
        for _ in 0..count {
            let xy = Vec2::new(
                self.rng.gen_range(-SCATTER_EXTENT..SCATTER_EXTENT),
                self.rng.gen_range(-SCATTER_EXTENT..SCATTER_EXTENT),
            );
            let z = terrain::ground_height(xy).unwrap_or(0.0);
            let trace = RadarTrace {
                kind: TraceKind::Coord,
                sprite: SCATTER_SPRITES[self.rng.gen_range(0..SCATTER_SPRITES.len())],
                color: SCATTER_COLORS[self.rng.gen_range(0..SCATTER_COLORS.len())],
                position: xy.extend(z),
                short_range: self.rng.gen_bool(0.3),
                ..RadarTrace::default()
            };
            handles.push(self.add_trace(trace));
        }
        handles
    }

    /// Move the player onto the waypoint trace. Returns the new position.
    pub fn teleport_to_waypoint(&mut self) -> Option<Vec3> {
        let target = self
            .traces()
            .ok()?
            .into_iter()
            .find(|t| t.in_use && t.sprite == sprites::WAYPOINT)?;
        let xy = target.position.truncate();
        let z = match terrain::ground_height(xy) {
            Some(ground) => ground + 1.0,
            None => self.player_position().z,
        };
        let position = xy.extend(z);
        self.set_player_position(position);
        log::info!("teleported to waypoint at {:?}", position);
        Some(position)
    }

    // ---- Map tables ----

    pub fn add_entrance(&mut self, entrance: Entrance) -> usize {
        let index = self.next_entrance;
        self.next_entrance += 1;
        self.world.spawn((EntranceSlot { index, entrance },));
        index
    }

    pub fn add_zone(&mut self, zone: TerritoryZone) {
        self.world.spawn((Zone(zone),));
    }

    pub fn set_gang_wars_active(&mut self, active: bool) {
        self.gang_wars_active = active;
    }

    pub fn fire_projectile(
        &mut self,
        position: Vec3,
        velocity: Vec3,
        weapon: ProjectileWeapon,
        creator: Option<EntityHandle>,
    ) -> EntityHandle {
        let entity = self.world.spawn((
            Position(position),
            Velocity(velocity),
            ProjectileState {
                weapon,
                creator,
                active: true,
            },
        ));
        self.register(entity)
    }

    pub fn add_respawn(&mut self, kind: RespawnKind, position: Vec3) {
        self.world.spawn((Position(position), Respawn(kind)));
    }

    pub fn set_gps_target(&mut self, trace: Option<EntityHandle>) {
        self.gps_target = trace;
    }

    pub fn set_radio(&mut self, station: Option<RadioStation>) {
        self.radio = station;
    }

    pub fn set_radar_range(&mut self, range: f32) {
        self.radar_range = range;
    }

    /// Advance the simulation by `dt_ms`.
    pub fn step(&mut self, dt_ms: u64) {
        movement::run(&mut self.world, dt_ms);
        movement::follow_vehicle(&mut self.world, self.player);
        movement::expire_projectiles(&mut self.world);
        self.time_ms += dt_ms;
    }

    fn vehicle_telemetry(&self, entity: Entity) -> Option<VehicleTelemetry> {
        let handle = self.world.get::<&Handle>(entity).ok()?.0;
        let position = self.world.get::<&Position>(entity).ok()?.0;
        let velocity = self.world.get::<&Velocity>(entity).ok()?.0;
        let state = *self.world.get::<&VehicleState>(entity).ok()?;
        Some(VehicleTelemetry {
            handle,
            class: state.class,
            position,
            velocity,
            basis: state.basis,
        })
    }

    fn position_with<C: hecs::Component>(&self, handle: EntityHandle) -> Result<Vec3, WorldError> {
        let entity = self.entity(handle)?;
        if self.world.get::<&C>(entity).is_err() {
            return Err(WorldError::EntityNotFound(handle));
        }
        self.world
            .get::<&Position>(entity)
            .map(|p| p.0)
            .map_err(|_| WorldError::EntityNotFound(handle))
    }
}

impl WorldQuery for SandboxWorld {
    fn player(&self) -> Result<PlayerTelemetry, WorldError> {
        let state = self.player_state()?;
        let position = self
            .world
            .get::<&Position>(self.player)
            .map(|p| p.0)
            .map_err(|_| WorldError::NoPlayer)?;
        Ok(PlayerTelemetry {
            ped: self.player_handle(),
            position,
            heading: state.heading,
            in_interior: state.in_interior,
            vehicle: state.vehicle.and_then(|v| self.vehicle_telemetry(v)),
        })
    }

    fn camera_forward(&self) -> Result<Vec3, WorldError> {
        self.player_state().map(|s| s.camera_forward)
    }

    fn ground_height(&self, at: Vec2) -> Option<f32> {
        terrain::ground_height(at)
    }

    /// Straight line from `from` to `to`, one node every 100 units.
    fn find_route(
        &self,
        from: Vec3,
        to: Vec3,
        _water: bool,
        max_nodes: usize,
    ) -> Result<Route, WorldError> {
        let distance = from.distance(to);
        let segments = ((distance / ROUTE_NODE_SPACING).ceil() as usize).max(1);
        let nodes = (0..=segments)
            .take(max_nodes)
            .map(|i| {
                let p = from.lerp(to, i as f32 / segments as f32);
                let z = terrain::ground_height(p.truncate()).unwrap_or(p.z);
                p.truncate().extend(z)
            })
            .collect();
        Ok(Route { nodes, distance })
    }

    fn traces(&self) -> Result<Vec<RadarTrace>, WorldError> {
        let mut slots: Vec<(u32, RadarTrace)> = self
            .world
            .query::<(&Handle, &TraceSlot)>()
            .iter()
            .map(|(_e, (h, t))| (h.0 .0, t.0))
            .collect();
        slots.sort_by_key(|(h, _)| *h);
        Ok(slots.into_iter().map(|(_, t)| t).collect())
    }

    fn ped_position(&self, ped: EntityHandle) -> Result<Vec3, WorldError> {
        self.position_with::<Ped>(ped)
    }

    fn vehicle_position(&self, vehicle: EntityHandle) -> Result<Vec3, WorldError> {
        self.position_with::<VehicleState>(vehicle)
    }

    fn entrances(&self) -> Result<Vec<Entrance>, WorldError> {
        let mut slots: Vec<EntranceSlot> = self
            .world
            .query::<&EntranceSlot>()
            .iter()
            .map(|(_e, s)| s.clone())
            .collect();
        slots.sort_by_key(|s| s.index);
        Ok(slots.into_iter().map(|s| s.entrance).collect())
    }

    fn entrance(&self, index: usize) -> Result<Entrance, WorldError> {
        self.world
            .query::<&EntranceSlot>()
            .iter()
            .find(|(_e, s)| s.index == index)
            .map(|(_e, s)| s.entrance.clone())
            .ok_or(WorldError::EntranceNotFound(index))
    }

    fn gang_wars_active(&self) -> bool {
        self.gang_wars_active
    }

    fn territory_zones(&self) -> Result<Vec<TerritoryZone>, WorldError> {
        Ok(self
            .world
            .query::<&Zone>()
            .iter()
            .map(|(_e, z)| z.0)
            .collect())
    }

    fn projectiles(&self) -> Result<Vec<Projectile>, WorldError> {
        Ok(self
            .world
            .query::<(&Position, &ProjectileState)>()
            .iter()
            .map(|(_e, (pos, p))| Projectile {
                active: p.active,
                position: pos.0,
                weapon: p.weapon,
                creator: p.creator,
            })
            .collect())
    }

    fn radar_range(&self) -> f32 {
        self.radar_range
    }

    fn respawn_points(&self, kind: RespawnKind) -> Vec<Vec3> {
        self.world
            .query::<(&Position, &Respawn)>()
            .iter()
            .filter(|(_e, (_p, r))| r.0 == kind)
            .map(|(_e, (p, _r))| p.0)
            .collect()
    }

    fn gps_target(&self) -> Option<RadarTrace> {
        let entity = self.entity(self.gps_target?).ok()?;
        let trace = self.world.get::<&TraceSlot>(entity).ok()?.0;
        (trace.in_use && trace.display != TraceDisplay::Neither).then_some(trace)
    }

    /// Only audible inside a vehicle.
    fn radio(&self) -> Option<RadioStation> {
        self.player_state().ok()?.vehicle?;
        self.radio.clone()
    }
}
