//! `HeadlessDevice`: a `RenderDevice` with no GPU behind it.
//!
//! Hands out sequential texture handles, remembers which names they were
//! loaded from and tracks releases, so tests can check resource lifetimes.

use std::collections::{HashMap, HashSet};

use radar_core::draw::{DeviceError, LoadedTexture, RenderDevice};
use radar_core::enums::DeviceStatus;
use radar_core::types::{Rgba, TextureHandle};

/// Pixel size reported for map tiles.
pub const TILE_PIXELS: u32 = 256;

/// Pixel size reported for every other texture.
pub const ICON_PIXELS: u32 = 32;

#[derive(Debug, Clone)]
pub struct HeadlessDevice {
    status: DeviceStatus,
    scissor: bool,
    missing: HashSet<String>,
    live: HashMap<TextureHandle, String>,
    next_handle: u32,
    render_targets: Vec<u32>,
    released: usize,
}

impl Default for HeadlessDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessDevice {
    pub fn new() -> Self {
        Self {
            status: DeviceStatus::Ok,
            scissor: true,
            missing: HashSet::new(),
            live: HashMap::new(),
            next_handle: 1,
            render_targets: Vec::new(),
            released: 0,
        }
    }

    /// Texture names that fail to load.
    pub fn with_missing<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.missing.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn set_status(&mut self, status: DeviceStatus) {
        self.status = status;
    }

    pub fn set_scissor(&mut self, supported: bool) {
        self.scissor = supported;
    }

    /// Live handle loaded from `name`.
    pub fn handle_of(&self, name: &str) -> Option<TextureHandle> {
        self.live
            .iter()
            .filter(|(_, n)| n.as_str() == name)
            .map(|(h, _)| *h)
            .min_by_key(|h| h.0)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn released_count(&self) -> usize {
        self.released
    }

    /// Sizes of every render target created so far.
    pub fn render_targets(&self) -> &[u32] {
        &self.render_targets
    }

    fn allocate(&mut self, name: String) -> TextureHandle {
        let handle = TextureHandle(self.next_handle);
        self.next_handle += 1;
        self.live.insert(handle, name);
        handle
    }
}

impl RenderDevice for HeadlessDevice {
    fn status(&self) -> DeviceStatus {
        self.status
    }

    fn supports_scissor(&self) -> bool {
        self.scissor
    }

    fn load_texture(&mut self, name: &str) -> Result<LoadedTexture, DeviceError> {
        if self.status == DeviceStatus::Lost {
            return Err(DeviceError::Lost);
        }
        if self.missing.contains(name) {
            return Err(DeviceError::TextureNotFound(name.to_string()));
        }
        let side = if name.starts_with("radar") && name[5..].chars().all(|c| c.is_ascii_digit()) {
            TILE_PIXELS
        } else {
            ICON_PIXELS
        };
        Ok(LoadedTexture {
            handle: self.allocate(name.to_string()),
            width: side,
            height: side,
        })
    }

    fn create_solid_texture(&mut self, color: Rgba) -> Result<TextureHandle, DeviceError> {
        if self.status == DeviceStatus::Lost {
            return Err(DeviceError::Lost);
        }
        Ok(self.allocate(format!("solid:{:08x}", color.to_argb())))
    }

    fn create_render_target(&mut self, size: u32) -> Result<TextureHandle, DeviceError> {
        if size == 0 || self.status == DeviceStatus::Lost {
            return Err(DeviceError::RenderTarget(size));
        }
        self.render_targets.push(size);
        Ok(self.allocate(format!("rt:{size}")))
    }

    fn release(&mut self, handle: TextureHandle) {
        if self.live.remove(&handle).is_some() {
            self.released += 1;
        }
    }
}
