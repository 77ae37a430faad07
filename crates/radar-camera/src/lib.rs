//! Radar camera controller.
//!
//! Picks a camera target from what the player is doing (on foot, driving,
//! flying, overview key held) and eases the camera state toward it every
//! tick. Also derives the radar-space camera pose the projector consumes.

pub mod controller;
pub mod profiles;

pub use radar_core as core;

pub use controller::{CameraController, CameraState};
pub use profiles::CameraTarget;
