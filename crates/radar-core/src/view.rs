//! Camera pose and projection parameters handed to the projector and to draw commands.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::{FAR_PLANE, NEAR_PLANE};

/// Radar camera placement in radar space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    /// (pitch, roll, yaw). Roll is always zero for the radar camera.
    pub rotation: Vec3,
}

impl CameraPose {
    pub fn pitch(&self) -> f32 {
        self.rotation.x
    }

    pub fn yaw(&self) -> f32 {
        self.rotation.z
    }
}

/// Everything `world_to_screen` needs for one frame. Read-only during the frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionContext {
    pub camera: CameraPose,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Size of the target the screen coordinates refer to.
    pub target: Vec2,
    /// Height/width ratio; zero or less means "derive from `target`".
    pub aspect: f32,
}

impl ProjectionContext {
    pub fn new(camera: CameraPose, fov: f32, target: Vec2, aspect: f32) -> Self {
        Self {
            camera,
            fov,
            near: NEAR_PLANE,
            far: FAR_PLANE,
            target,
            aspect,
        }
    }

    /// Same camera, different aspect.
    pub fn with_aspect(self, aspect: f32) -> Self {
        Self { aspect, ..self }
    }
}
