//! Icon and overlay textures, loaded once per device lifetime.

use radar_core::constants::MAX_BLIP_ID;
use radar_core::draw::{LoadedTexture, RenderDevice};
use radar_core::sprites::{
    atlas_fallback_name, atlas_texture_name, icon_source, IconSource, MORE_ICON_COUNT,
    MORE_ICON_TEXTURES,
};
use radar_core::types::{Rgba, TextureHandle};

/// Names tried, in order, for the flat line texture.
const LINE_NAMES: [&str; 2] = ["line", "radarLine"];

/// Names tried, in order, for the plane banking ring.
const RING_PLANE_NAMES: [&str; 2] = ["radarRingPlane", "RingPlane"];

const EXIT_INTERIOR_NAME: &str = "radarExitInterior";

/// Every texture the layers draw with, apart from map tiles.
#[derive(Debug, Clone, Default)]
pub struct TextureSet {
    atlas: Vec<Option<LoadedTexture>>,
    extra: Vec<Option<LoadedTexture>>,
    pub line: Option<TextureHandle>,
    pub ring_plane: Option<TextureHandle>,
    pub exit_interior: Option<TextureHandle>,
    /// 1x1 white, used for flat fills.
    pub white: Option<TextureHandle>,
}

fn load_first(device: &mut dyn RenderDevice, names: &[&str]) -> Option<LoadedTexture> {
    names.iter().find_map(|name| device.load_texture(name).ok())
}

/// Numbered atlas texture, or its named alternate.
fn load_atlas_icon(device: &mut dyn RenderDevice, id: i32) -> Option<LoadedTexture> {
    let primary = atlas_texture_name(id)?;
    if let Ok(texture) = device.load_texture(&primary) {
        return Some(texture);
    }
    device.load_texture(atlas_fallback_name(id)?).ok()
}

impl TextureSet {
    /// Load everything the device has. Missing textures stay `None`.
    pub fn load(device: &mut dyn RenderDevice) -> Self {
        let atlas: Vec<Option<LoadedTexture>> = (0..=MAX_BLIP_ID)
            .map(|id| load_atlas_icon(device, id))
            .collect();
        let extra: Vec<Option<LoadedTexture>> = MORE_ICON_TEXTURES
            .iter()
            .map(|name| device.load_texture(name).ok())
            .collect();

        let set = Self {
            line: load_first(device, &LINE_NAMES).map(|t| t.handle),
            ring_plane: load_first(device, &RING_PLANE_NAMES).map(|t| t.handle),
            exit_interior: load_first(device, &[EXIT_INTERIOR_NAME]).map(|t| t.handle),
            white: device.create_solid_texture(Rgba::WHITE).ok(),
            atlas,
            extra,
        };

        // Ids 0 and 1 never have a texture.
        let missing_atlas = set.atlas.iter().skip(2).filter(|t| t.is_none()).count();
        let missing_extra = set.extra.iter().filter(|t| t.is_none()).count();
        if missing_atlas > 0 || missing_extra > 0 {
            log::warn!(
                "{missing_atlas} atlas icons and {missing_extra} of {MORE_ICON_COUNT} extra icons failed to load"
            );
        }
        set
    }

    /// Texture for an icon id, dispatched on the id range.
    pub fn icon(&self, id: i32) -> Option<LoadedTexture> {
        match icon_source(id)? {
            IconSource::Atlas(i) => self.atlas.get(i).copied().flatten(),
            IconSource::Extra(i) => self.extra.get(i).copied().flatten(),
        }
    }

    pub fn icon_handle(&self, id: i32) -> Option<TextureHandle> {
        self.icon(id).map(|t| t.handle)
    }

    pub fn loaded_icons(&self) -> usize {
        self.atlas.iter().chain(self.extra.iter()).flatten().count()
    }

    /// Release in reverse load order.
    pub fn release(&mut self, device: &mut dyn RenderDevice) {
        let singles = [
            self.white.take(),
            self.exit_interior.take(),
            self.ring_plane.take(),
            self.line.take(),
        ];
        for handle in singles.into_iter().flatten() {
            device.release(handle);
        }
        for texture in self.extra.drain(..).rev().flatten() {
            device.release(texture.handle);
        }
        for texture in self.atlas.drain(..).rev().flatten() {
            device.release(texture.handle);
        }
    }
}
