//! Smoothed radar camera.
//!
//! Every tick the controller re-selects a `CameraTarget` and moves the state
//! a fixed fraction of the remaining distance toward it. The only discrete
//! jumps are in the target itself: entering the overview mode (key rising
//! edge) and leaving it after a fixed duration, when the target that was
//! active on entry is restored.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use radar_core::constants::*;
use radar_core::enums::VehicleClass;
use radar_core::view::{CameraPose, ProjectionContext};
use radar_core::world::{PlayerTelemetry, VehicleTelemetry};

use crate::profiles::{overview_target, select_target, CameraTarget};

/// Interpolated camera parameters plus the player anchor in radar space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub height: f32,
    pub pitch: f32,
    /// Heading of the host camera (rad).
    pub yaw: f32,
    /// Player position in radar space.
    pub position: Vec2,
    pub offset_y: f32,
    pub fov: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        let t = CameraTarget::default();
        Self {
            height: t.height,
            pitch: t.pitch,
            yaw: 0.0,
            position: Vec2::ZERO,
            offset_y: t.offset_y,
            fov: t.fov,
        }
    }
}

/// Active overview mode and the target to return to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverviewMode {
    pub started_ms: u64,
    pub return_target: CameraTarget,
}

/// Radar-space camera derived from the state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CachedPose {
    /// World offset of the camera from the player.
    pub offset: Vec2,
    pub pose: CameraPose,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct YawCache {
    inverted_yaw: f32,
    sin: f32,
    cos: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraController {
    state: CameraState,
    target: CameraTarget,
    overview: Option<OverviewMode>,
    key_was_down: bool,
    yaw_cache: Option<YawCache>,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            state: CameraState::default(),
            target: CameraTarget::default(),
            overview: None,
            key_was_down: false,
            yaw_cache: None,
        }
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    /// Replace the state wholesale (tests, save/restore by the host).
    pub fn set_state(&mut self, state: CameraState) {
        self.state = state;
    }

    pub fn target(&self) -> &CameraTarget {
        &self.target
    }

    pub fn overview(&self) -> Option<&OverviewMode> {
        self.overview.as_ref()
    }

    /// Follow the player and the host camera heading.
    ///
    /// A host forward with no horizontal component keeps the previous yaw.
    pub fn update_from_game(
        &mut self,
        player: Option<&PlayerTelemetry>,
        camera_forward: Option<Vec3>,
    ) {
        if let Some(p) = player {
            self.state.position = Vec2::new(
                p.position.x + RADAR_OFFSET_X,
                p.position.y + RADAR_OFFSET_Y,
            );
        }
        if let Some(fwd) = camera_forward {
            if fwd.x != 0.0 || fwd.y != 0.0 {
                self.state.yaw = fwd.x.atan2(fwd.y);
            }
        }
    }

    /// Re-select the target and advance the interpolation by one tick.
    ///
    /// `overview_key` is the current key level; the mode starts on its
    /// rising edge. While the mode is active target selection is suspended.
    pub fn update_from_speed(
        &mut self,
        vehicle: Option<&VehicleTelemetry>,
        overview_key: bool,
        now_ms: u64,
    ) {
        if let Some(mode) = self.overview {
            if now_ms.saturating_sub(mode.started_ms) >= CAMERA_OVERVIEW_DURATION_MS {
                self.target = mode.return_target;
                self.overview = None;
                log::debug!("overview mode expired, target restored");
            }
            self.interpolate();
            self.key_was_down = overview_key;
            return;
        }

        if overview_key && !self.key_was_down {
            self.overview = Some(OverviewMode {
                started_ms: now_ms,
                return_target: self.target,
            });
            self.target = overview_target(&self.target);
            self.key_was_down = overview_key;
            log::debug!("overview mode started at {now_ms} ms");
            self.interpolate();
            return;
        }
        self.key_was_down = overview_key;

        self.target = select_target(vehicle);
        self.interpolate();
    }

    /// Both per-frame updates in host order.
    pub fn tick(
        &mut self,
        player: Option<&PlayerTelemetry>,
        camera_forward: Option<Vec3>,
        overview_key: bool,
        now_ms: u64,
    ) {
        self.update_from_game(player, camera_forward);
        let vehicle = player.and_then(|p| p.vehicle.as_ref());
        self.update_from_speed(vehicle, overview_key, now_ms);
    }

    fn interpolate(&mut self) {
        let rate = if self.overview.is_some() {
            CAMERA_INTERP_RATE / CAMERA_OVERVIEW_RATE_DIVISOR
        } else {
            CAMERA_INTERP_RATE
        };
        let s = &mut self.state;
        let t = &self.target;
        s.height += (t.height - s.height) * rate;
        s.fov += (t.fov - s.fov) * rate;
        s.offset_y += (t.offset_y - s.offset_y) * rate;
        s.pitch += (t.pitch - s.pitch) * rate;
    }

    /// Radar-space camera pose for the current state.
    ///
    /// The camera sits `offset_y` behind the player along the inverted yaw.
    /// The sine/cosine pair is reused until the yaw moves by more than
    /// `CAMERA_CACHE_EPSILON`.
    pub fn cached_pose(&mut self) -> CachedPose {
        let inverted_yaw = -self.state.yaw;
        let cache = match self.yaw_cache {
            Some(c) if (c.inverted_yaw - inverted_yaw).abs() <= CAMERA_CACHE_EPSILON => c,
            _ => {
                let (sin, cos) = inverted_yaw.sin_cos();
                let c = YawCache {
                    inverted_yaw,
                    sin,
                    cos,
                };
                self.yaw_cache = Some(c);
                c
            }
        };

        let offset = Vec2::new(
            self.state.offset_y * cache.sin,
            self.state.offset_y * cache.cos,
        );
        let height = if self.state.height > 0.0 {
            self.state.height
        } else {
            CAMERA_FALLBACK_SPAN / (self.state.fov * 0.5).tan()
        };

        CachedPose {
            offset,
            pose: CameraPose {
                position: Vec3::new(
                    self.state.position.x + offset.x,
                    self.state.position.y - offset.y,
                    height,
                ),
                rotation: Vec3::new(self.state.pitch, 0.0, inverted_yaw),
            },
        }
    }

    /// Projection parameters for the current pose.
    pub fn projection(&mut self, target: Vec2, aspect: f32) -> ProjectionContext {
        let pose = self.cached_pose().pose;
        ProjectionContext::new(pose, self.state.fov, target, aspect)
    }
}

/// Player occupies a plane or helicopter.
pub fn is_in_aircraft(player: Option<&PlayerTelemetry>) -> bool {
    player
        .and_then(PlayerTelemetry::vehicle_class)
        .is_some_and(VehicleClass::is_aircraft)
}

/// Player occupies a fixed-wing aircraft (helicopters excluded).
pub fn is_in_plane(player: Option<&PlayerTelemetry>) -> bool {
    player.and_then(PlayerTelemetry::vehicle_class) == Some(VehicleClass::Plane)
}

/// Bank angle of the occupied vehicle, zero on foot.
pub fn vehicle_roll(player: Option<&PlayerTelemetry>) -> f32 {
    match player.and_then(|p| p.vehicle) {
        Some(v) => (-v.basis.right.z).atan2(v.basis.forward.z),
        None => 0.0,
    }
}

/// Nose pitch of the occupied vehicle, zero on foot.
pub fn vehicle_pitch(player: Option<&PlayerTelemetry>) -> f32 {
    match player.and_then(|p| p.vehicle) {
        Some(v) => v.basis.up.z.clamp(-1.0, 1.0).asin(),
        None => 0.0,
    }
}
