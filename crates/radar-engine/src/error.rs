//! Errors raised inside a compositor layer.

use thiserror::Error;

use radar_core::draw::DeviceError;
use radar_core::world::WorldError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayerError {
    #[error(transparent)]
    World(#[from] WorldError),
    #[error(transparent)]
    Device(#[from] DeviceError),
    #[error("texture {0} is not loaded")]
    MissingTexture(&'static str),
    #[error("render target unavailable")]
    RenderTarget,
}
