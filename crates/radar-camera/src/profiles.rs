//! Camera target profiles.
//!
//! Consolidates the per-situation camera parameters and the rule that picks
//! one from the player's vehicle.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use radar_core::constants::*;
use radar_core::enums::VehicleClass;
use radar_core::world::VehicleTelemetry;

/// Desired camera parameters the state eases toward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraTarget {
    /// Camera height above the radar plane.
    pub height: f32,
    /// Backward (negative) offset from the player along the view direction.
    pub offset_y: f32,
    /// Vertical field of view (rad).
    pub fov: f32,
    /// Pitch (rad), negative looks down.
    pub pitch: f32,
}

impl Default for CameraTarget {
    fn default() -> Self {
        get_profile(CameraProfile::OnFoot)
    }
}

impl CameraTarget {
    /// Blend height, fov and offset toward `other` by `t`; pitch is taken from `self`.
    pub fn lerp(&self, other: &CameraTarget, t: f32) -> CameraTarget {
        CameraTarget {
            height: self.height + (other.height - self.height) * t,
            offset_y: self.offset_y + (other.offset_y - self.offset_y) * t,
            fov: self.fov + (other.fov - self.fov) * t,
            pitch: self.pitch,
        }
    }
}

/// Situations with a fixed camera target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CameraProfile {
    /// On foot and slow ground vehicles.
    #[default]
    OnFoot,
    Plane,
    Helicopter,
    /// Ground vehicle at or above the high speed threshold.
    FastVehicle,
}

/// Get the camera target for a profile.
pub fn get_profile(profile: CameraProfile) -> CameraTarget {
    match profile {
        CameraProfile::OnFoot => CameraTarget {
            height: CAMERA_DEFAULT_HEIGHT,
            offset_y: CAMERA_DEFAULT_OFFSET_Y,
            fov: CAMERA_DEFAULT_FOV,
            pitch: CAMERA_DEFAULT_PITCH,
        },
        CameraProfile::Plane => CameraTarget {
            height: CAMERA_PLANE_HEIGHT,
            offset_y: CAMERA_PLANE_OFFSET_Y,
            fov: CAMERA_DEFAULT_FOV,
            pitch: CAMERA_DEFAULT_PITCH,
        },
        CameraProfile::Helicopter => CameraTarget {
            height: CAMERA_HELI_HEIGHT,
            offset_y: CAMERA_HELI_OFFSET_Y,
            fov: CAMERA_DEFAULT_FOV,
            pitch: CAMERA_DEFAULT_PITCH,
        },
        CameraProfile::FastVehicle => CameraTarget {
            height: CAMERA_FAST_HEIGHT,
            offset_y: CAMERA_FAST_OFFSET_Y,
            fov: CAMERA_FAST_FOV,
            pitch: CAMERA_DEFAULT_PITCH,
        },
    }
}

/// Overview target: steeper and higher, keeping the current field of view.
pub fn overview_target(current: &CameraTarget) -> CameraTarget {
    CameraTarget {
        height: CAMERA_OVERVIEW_HEIGHT,
        offset_y: CAMERA_OVERVIEW_OFFSET_Y,
        fov: current.fov,
        pitch: CAMERA_MAX_PITCH,
    }
}

/// Ground speed in km/h of a host velocity (units per 1/50 s step).
pub fn speed_kmh(velocity: Vec3) -> f32 {
    velocity.truncate().length() * VELOCITY_STEPS_PER_SEC * 3.6
}

/// Target for a ground vehicle moving at `kmh`.
pub fn speed_target(kmh: f32) -> CameraTarget {
    if kmh < CAMERA_SPEED_LOW_KMH {
        get_profile(CameraProfile::OnFoot)
    } else if kmh >= CAMERA_SPEED_HIGH_KMH {
        get_profile(CameraProfile::FastVehicle)
    } else {
        let t = (kmh - CAMERA_SPEED_LOW_KMH) / (CAMERA_SPEED_HIGH_KMH - CAMERA_SPEED_LOW_KMH);
        get_profile(CameraProfile::OnFoot).lerp(&get_profile(CameraProfile::FastVehicle), t)
    }
}

/// Pick the target for the vehicle the player occupies (`None` on foot).
pub fn select_target(vehicle: Option<&VehicleTelemetry>) -> CameraTarget {
    match vehicle {
        None => get_profile(CameraProfile::OnFoot),
        Some(v) => match v.class {
            VehicleClass::Plane => get_profile(CameraProfile::Plane),
            VehicleClass::Heli => get_profile(CameraProfile::Helicopter),
            _ => speed_target(speed_kmh(v.velocity)),
        },
    }
}
