//! Kinematic integration for the sandbox.
//!
//! Velocities are host units per 1/50 s step, so a tick of `dt_ms`
//! advances every moving entity by `velocity * dt_ms / 20`.

use hecs::World;

use crate::components::{PlayerState, Position, ProjectileState, Velocity};
use crate::terrain::ground_height;

/// Host physics step length.
pub const STEP_MS: f32 = 20.0;

/// Advance every entity with a velocity.
pub fn run(world: &mut World, dt_ms: u64) {
    let steps = dt_ms as f32 / STEP_MS;
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.0 += vel.0 * steps;
    }
}

/// Keep the player glued to the vehicle it occupies.
pub fn follow_vehicle(world: &mut World, player: hecs::Entity) {
    let vehicle = match world.get::<&PlayerState>(player) {
        Ok(state) => state.vehicle,
        Err(_) => return,
    };
    let Some(vehicle) = vehicle else {
        return;
    };
    let vehicle_pos = match world.get::<&Position>(vehicle) {
        Ok(p) => p.0,
        Err(_) => return,
    };
    if let Ok(mut pos) = world.get::<&mut Position>(player) {
        pos.0 = vehicle_pos;
    }
}

/// Projectiles that hit the ground stop being active.
pub fn expire_projectiles(world: &mut World) {
    for (_entity, (pos, projectile)) in world.query_mut::<(&Position, &mut ProjectileState)>() {
        if !projectile.active {
            continue;
        }
        if let Some(ground) = ground_height(pos.0.truncate()) {
            if pos.0.z < ground {
                projectile.active = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_velocity_is_per_step() {
        let mut world = World::new();
        let e = world.spawn((Position(Vec3::ZERO), Velocity(Vec3::new(1.0, 2.0, 0.0))));
        run(&mut world, 100);
        let pos = world.get::<&Position>(e).unwrap().0;
        assert_eq!(pos, Vec3::new(5.0, 10.0, 0.0));
    }
}
