#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};

    use radar_core::draw::{DeviceError, RenderDevice};
    use radar_core::enums::{
        DeviceStatus, ProjectileWeapon, RespawnKind, TraceDisplay, TraceKind, VehicleClass,
    };
    use radar_core::sprites;
    use radar_core::types::{EntityHandle, Rect2, Rgba};
    use radar_core::world::{Entrance, RadarTrace, RadioStation, WorldError, WorldQuery};

    use crate::terrain::ground_height;
    use crate::{HeadlessDevice, SandboxConfig, SandboxWorld};

    fn sandbox() -> SandboxWorld {
        SandboxWorld::new(SandboxConfig::default())
    }

    // ---- Determinism ----

    #[test]
    fn test_same_seed_same_traces() {
        let mut a = SandboxWorld::new(SandboxConfig { seed: 7, ..Default::default() });
        let mut b = SandboxWorld::new(SandboxConfig { seed: 7, ..Default::default() });
        a.scatter_traces(25);
        b.scatter_traces(25);
        assert_eq!(a.traces().unwrap(), b.traces().unwrap());
    }

    #[test]
    fn test_different_seed_different_traces() {
        let mut a = SandboxWorld::new(SandboxConfig { seed: 1, ..Default::default() });
        let mut b = SandboxWorld::new(SandboxConfig { seed: 2, ..Default::default() });
        a.scatter_traces(10);
        b.scatter_traces(10);
        assert_ne!(a.traces().unwrap(), b.traces().unwrap());
    }

    #[test]
    fn test_traces_in_insertion_order() {
        let mut world = sandbox();
        for sprite in [5, 7, 9] {
            world.add_trace(RadarTrace { sprite, ..Default::default() });
        }
        let sprites: Vec<i32> = world.traces().unwrap().iter().map(|t| t.sprite).collect();
        assert_eq!(sprites, vec![5, 7, 9]);
    }

    // ---- Player and vehicles ----

    #[test]
    fn test_player_starts_on_ground() {
        let world = sandbox();
        let player = world.player().unwrap();
        assert_eq!(player.position.z, ground_height(Vec2::ZERO).unwrap() + 1.0);
        assert!(player.vehicle.is_none());
    }

    #[test]
    fn test_spawn_in_front_along_camera() {
        let mut world = sandbox();
        world.set_camera_forward(Vec3::new(1.0, 0.0, -0.3));
        let car = world.spawn_vehicle_in_front(VehicleClass::Automobile);
        let pos = world.vehicle_position(car).unwrap();
        assert!((pos.x - 10.0).abs() < 1e-4);
        assert!(pos.y.abs() < 1e-4);
        assert_eq!(pos.z, ground_height(pos.truncate()).unwrap());
    }

    #[test]
    fn test_spawn_basis_is_quarter_turn() {
        let mut world = sandbox();
        let car = world.spawn_vehicle_in_front(VehicleClass::Automobile);
        world.enter_vehicle(car).unwrap();
        let basis = world.player().unwrap().vehicle.unwrap().basis;
        assert!((basis.right.dot(basis.forward)).abs() < 1e-5);
        assert!(basis.forward.x.abs() < 1e-5 || basis.forward.y.abs() < 1e-5);
        assert_eq!(basis.up, Vec3::Z);
    }

    #[test]
    fn test_enter_and_drive() {
        let mut world = sandbox();
        let car = world.spawn_vehicle(VehicleClass::Automobile, Vec3::new(0.0, 0.0, 20.0));
        world.enter_vehicle(car).unwrap();
        world.set_velocity(car, Vec3::new(0.0, 1.0, 0.0)).unwrap();
        world.step(1000);

        let player = world.player().unwrap();
        let vehicle = player.vehicle.unwrap();
        assert_eq!(vehicle.class, VehicleClass::Automobile);
        assert!((vehicle.position.y - 50.0).abs() < 1e-3);
        assert_eq!(player.position, vehicle.position);
        assert_eq!(world.time_ms(), 1000);
    }

    #[test]
    fn test_exit_vehicle_keeps_position() {
        let mut world = sandbox();
        let car = world.spawn_vehicle(VehicleClass::Bike, Vec3::new(5.0, 5.0, 20.0));
        world.enter_vehicle(car).unwrap();
        world.exit_vehicle();
        let player = world.player().unwrap();
        assert!(player.vehicle.is_none());
        assert_eq!(player.position, Vec3::new(5.0, 5.0, 20.0));
    }

    #[test]
    fn test_enter_non_vehicle_fails() {
        let mut world = sandbox();
        let ped = world.spawn_ped(Vec3::ZERO);
        assert_eq!(world.enter_vehicle(ped), Err(WorldError::EntityNotFound(ped)));
        assert!(world.enter_vehicle(EntityHandle(999)).is_err());
    }

    #[test]
    fn test_player_cannot_be_despawned() {
        let mut world = sandbox();
        let player = world.player_handle();
        assert!(world.despawn(player).is_err());
        assert!(world.player().is_ok());
    }

    // ---- Lookups ----

    #[test]
    fn test_ped_and_vehicle_lookups_are_typed() {
        let mut world = sandbox();
        let ped = world.spawn_ped(Vec3::new(1.0, 2.0, 3.0));
        let car = world.spawn_vehicle(VehicleClass::Automobile, Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(world.ped_position(ped).unwrap(), Vec3::new(1.0, 2.0, 3.0));
        assert!(world.vehicle_position(ped).is_err());
        assert!(world.ped_position(car).is_err());
    }

    #[test]
    fn test_trace_position_follows_ped() {
        let mut world = sandbox();
        let ped = world.spawn_ped(Vec3::new(100.0, 0.0, 20.0));
        let trace = RadarTrace {
            kind: TraceKind::Char,
            entity: Some(ped),
            position: Vec3::ZERO,
            ..Default::default()
        };
        world.set_velocity(ped, Vec3::new(1.0, 0.0, 0.0)).unwrap();
        world.step(200);
        assert_eq!(world.trace_position(&trace), Vec3::new(110.0, 0.0, 20.0));

        world.despawn(ped).unwrap();
        assert_eq!(world.trace_position(&trace), Vec3::ZERO);
    }

    #[test]
    fn test_despawn_twice_reports_missing() {
        let mut world = sandbox();
        let ped = world.spawn_ped(Vec3::new(10.0, 0.0, 0.0));
        world.despawn(ped).unwrap();
        assert_eq!(world.despawn(ped), Err(WorldError::EntityNotFound(ped)));
        assert!(world.set_velocity(ped, Vec3::X).is_err());
    }

    #[test]
    fn test_entrances_by_index() {
        let mut world = sandbox();
        let rect = Rect2 { min: Vec2::ZERO, max: Vec2::ONE };
        world.add_entrance(Entrance { name: "BARBERS".into(), area: 0, rect });
        let idx = world.add_entrance(Entrance { name: "GYM1".into(), area: 0, rect });
        assert_eq!(idx, 1);
        assert_eq!(world.entrance(1).unwrap().name, "GYM1");
        assert_eq!(world.entrances().unwrap().len(), 2);
        assert_eq!(world.entrance(5), Err(WorldError::EntranceNotFound(5)));
    }

    #[test]
    fn test_respawns_filtered_by_kind() {
        let mut world = sandbox();
        world.add_respawn(RespawnKind::Police, Vec3::X);
        world.add_respawn(RespawnKind::Hospital, Vec3::Y);
        world.add_respawn(RespawnKind::Police, Vec3::Z);
        assert_eq!(world.respawn_points(RespawnKind::Police).len(), 2);
        assert_eq!(world.respawn_points(RespawnKind::Hospital), vec![Vec3::Y]);
    }

    #[test]
    fn test_gps_target_hidden_when_not_displayed() {
        let mut world = sandbox();
        let trace = world.add_trace(RadarTrace { sprite: sprites::WAYPOINT, ..Default::default() });
        world.set_gps_target(Some(trace));
        assert!(world.gps_target().is_some());

        world
            .update_trace(trace, |t| t.display = TraceDisplay::Neither)
            .unwrap();
        assert!(world.gps_target().is_none());
    }

    #[test]
    fn test_radio_only_in_vehicle() {
        let mut world = sandbox();
        world.set_radio(Some(RadioStation { id: 3, name: "K-DST".into() }));
        assert!(world.radio().is_none());
        let car = world.spawn_vehicle_in_front(VehicleClass::Automobile);
        world.enter_vehicle(car).unwrap();
        assert_eq!(world.radio().unwrap().id, 3);
    }

    // ---- Routes and projectiles ----

    #[test]
    fn test_route_node_spacing() {
        let world = sandbox();
        let route = world
            .find_route(Vec3::ZERO, Vec3::new(450.0, 0.0, 0.0), false, 2000)
            .unwrap();
        assert_eq!(route.nodes.len(), 6);
        assert_eq!(route.distance, 450.0);
        assert_eq!(route.nodes.last().unwrap().x, 450.0);
    }

    #[test]
    fn test_route_capped_by_max_nodes() {
        let world = sandbox();
        let route = world
            .find_route(Vec3::ZERO, Vec3::new(2000.0, 0.0, 0.0), false, 5)
            .unwrap();
        assert_eq!(route.nodes.len(), 5);
    }

    #[test]
    fn test_projectile_expires_below_ground() {
        let mut world = sandbox();
        world.fire_projectile(
            Vec3::new(0.0, 0.0, 40.0),
            Vec3::new(0.0, 0.0, -2.0),
            ProjectileWeapon::Rocket,
            None,
        );
        assert!(world.projectiles().unwrap()[0].active);
        world.step(1000);
        assert!(!world.projectiles().unwrap()[0].active);
    }

    // ---- Teleport ----

    #[test]
    fn test_teleport_to_waypoint_lands_on_ground() {
        let mut world = sandbox();
        world.add_trace(RadarTrace {
            sprite: sprites::WAYPOINT,
            position: Vec3::new(800.0, -600.0, 0.0),
            ..Default::default()
        });
        let pos = world.teleport_to_waypoint().unwrap();
        let ground = ground_height(Vec2::new(800.0, -600.0)).unwrap();
        assert_eq!(pos, Vec3::new(800.0, -600.0, ground + 1.0));
        assert_eq!(world.player_position(), pos);
    }

    #[test]
    fn test_teleport_over_water_keeps_height() {
        let mut world = sandbox();
        let z = world.player_position().z;
        world.add_trace(RadarTrace {
            sprite: sprites::WAYPOINT,
            position: Vec3::new(5000.0, 0.0, 0.0),
            ..Default::default()
        });
        assert_eq!(world.teleport_to_waypoint().unwrap().z, z);
    }

    #[test]
    fn test_teleport_without_waypoint() {
        let mut world = sandbox();
        world.scatter_traces(5);
        assert!(world.teleport_to_waypoint().is_none());
    }

    // ---- Headless device ----

    #[test]
    fn test_device_missing_texture() {
        let mut device = HeadlessDevice::new().with_missing(["radar07"]);
        assert!(device.load_texture("radar06").is_ok());
        assert_eq!(
            device.load_texture("radar07"),
            Err(DeviceError::TextureNotFound("radar07".into()))
        );
    }

    #[test]
    fn test_device_tracks_releases() {
        let mut device = HeadlessDevice::new();
        let tile = device.load_texture("radar00").unwrap();
        assert_eq!(tile.width, crate::device::TILE_PIXELS);
        let white = device.create_solid_texture(Rgba::WHITE).unwrap();
        assert_eq!(device.live_count(), 2);
        device.release(white);
        device.release(white);
        assert_eq!(device.live_count(), 1);
        assert_eq!(device.released_count(), 1);
        assert_eq!(device.handle_of("radar00"), Some(tile.handle));
    }

    #[test]
    fn test_device_lost_refuses_loads() {
        let mut device = HeadlessDevice::new();
        device.set_status(DeviceStatus::Lost);
        assert_eq!(device.load_texture("radar00"), Err(DeviceError::Lost));
        assert!(device.create_render_target(256).is_err());
        assert!(device.render_targets().is_empty());
    }

    #[test]
    fn test_config_from_json() {
        let config: SandboxConfig =
            serde_json::from_str(r#"{"seed":9,"radar_range":400.0,"start":[100.0,-50.0]}"#).unwrap();
        assert_eq!(config.seed, 9);
        let world = SandboxWorld::new(config);
        assert_eq!(world.radar_range(), 400.0);
        let p = world.player_position();
        assert_eq!((p.x, p.y), (100.0, -50.0));
    }
}
