//! Per-frame inputs and the read-only context handed to every layer.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use radar_camera::controller::{is_in_aircraft, is_in_plane};
use radar_camera::CameraState;
use radar_core::config::RadarSettings;
use radar_core::view::{CameraPose, ProjectionContext};
use radar_core::world::{PlayerTelemetry, WorldQuery};
use radar_projection::radar_space::{world_to_local_offset, world_to_radar_screen};
use radar_projection::{direction_to_orbit_angle, world_to_screen, Orbit, RadarViewport};

use crate::textures::TextureSet;

/// What the host hands over each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Backbuffer size in pixels.
    pub screen: Vec2,
    /// Host clock.
    pub now_ms: u64,
    /// Overview key state this frame.
    pub overview_key: bool,
}

impl FrameInput {
    pub fn new(screen: Vec2, now_ms: u64) -> Self {
        Self {
            screen,
            now_ms,
            overview_key: false,
        }
    }
}

/// Everything derived once per frame. Layers never mutate it.
pub struct FrameContext<'a> {
    pub world: &'a dyn WorldQuery,
    pub textures: &'a TextureSet,
    pub settings: &'a RadarSettings,
    pub player: Option<PlayerTelemetry>,
    pub viewport: RadarViewport,
    pub camera: CameraState,
    pub pose: CameraPose,
    /// Projection into the render target with the backbuffer aspect.
    pub view: ProjectionContext,
    pub rt_side: u32,
    pub now_ms: u64,
}

impl<'a> FrameContext<'a> {
    pub fn orbit(&self) -> Orbit {
        self.viewport.orbit()
    }

    pub fn icon_size(&self, base: f32) -> f32 {
        self.viewport.icon_size(base)
    }

    pub fn player_position(&self) -> Vec3 {
        self.player.map(|p| p.position).unwrap_or(Vec3::ZERO)
    }

    pub fn in_plane(&self) -> bool {
        is_in_plane(self.player.as_ref())
    }

    pub fn in_aircraft(&self) -> bool {
        is_in_aircraft(self.player.as_ref())
    }

    /// Radar-space point to absolute screen pixels on the radar.
    pub fn project(&self, radar_pos: Vec3) -> Option<Vec2> {
        world_to_radar_screen(
            radar_pos,
            &self.view,
            self.viewport.center(),
            self.viewport.size,
        )
    }

    /// Radar-space point to an offset from the radar center.
    pub fn project_offset(&self, radar_pos: Vec3) -> Option<Vec2> {
        world_to_local_offset(radar_pos, &self.view, self.viewport.size)
    }

    /// Raw render-target coordinates.
    pub fn project_target(&self, radar_pos: Vec3) -> Option<Vec2> {
        world_to_screen(radar_pos, &self.view)
    }

    /// Orbit angle from the camera's ground position toward `radar_xy`.
    pub fn orbit_angle_to(&self, radar_xy: Vec2) -> Option<f32> {
        direction_to_orbit_angle(self.camera.position, radar_xy, self.camera.yaw)
    }

    /// Screen point for an indicator: the true projection clamped onto the
    /// orbit, or the orbit edge in the object's direction when the point
    /// does not project.
    pub fn place_on_radar(&self, radar_pos: Vec3) -> Option<Vec2> {
        let orbit = self.orbit();
        match self.project(radar_pos) {
            Some(p) => Some(orbit.clamp(p)),
            None => self
                .orbit_angle_to(radar_pos.truncate())
                .map(|a| orbit.point_at_angle(a)),
        }
    }
}
