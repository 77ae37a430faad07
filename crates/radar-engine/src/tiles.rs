//! Map tile provider.
//!
//! The map is a 12x12 grid of 500-unit tiles covering radar space
//! `[0, 6000] x [-6000, 0]`, row 0 at the top. Tiles are loaded once; a
//! tile whose texture is missing stays unloaded for good.

use glam::{Vec2, Vec3};

use radar_core::constants::*;
use radar_core::draw::RenderDevice;
use radar_core::types::TextureHandle;
use radar_core::view::ProjectionContext;
use radar_projection::world_to_screen;

/// One loaded map tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub index: usize,
    /// Radar-space center.
    pub center: Vec2,
    pub size: f32,
    pub texture: TextureHandle,
}

#[derive(Debug, Clone, Default)]
pub struct TileProvider {
    tiles: Vec<Option<Tile>>,
    initialized: bool,
}

/// `radar00` .. `radar143`.
pub fn tile_texture_name(index: usize) -> String {
    format!("radar{index:02}")
}

/// Radar-space center of a grid cell.
pub fn tile_center(index: usize) -> Vec2 {
    let row = (index / MAP_TILES_PER_ROW) as f32;
    let col = (index % MAP_TILES_PER_ROW) as f32;
    Vec2::new((col + 0.5) * MAP_TILE_SIZE, -(row + 0.5) * MAP_TILE_SIZE)
}

/// Ground distance the camera can see, widened in aircraft and padded.
pub fn visible_radius(camera_z: f32, fov: f32, offset_y: f32, in_aircraft: bool) -> f32 {
    let mut radius = camera_z * (fov * 0.5).tan() * 2.0 + offset_y.abs() * 1.5;
    if in_aircraft {
        radius *= VISIBLE_RADIUS_AIRCRAFT_FACTOR;
    }
    radius * VISIBLE_RADIUS_MARGIN
}

impl TileProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every tile texture. A second call is a no-op. Returns the number of loaded tiles.
    pub fn initialize(&mut self, device: &mut dyn RenderDevice) -> usize {
        if self.initialized {
            return self.loaded_count();
        }
        self.tiles = (0..MAP_TILE_COUNT)
            .map(|index| {
                let name = tile_texture_name(index);
                match device.load_texture(&name) {
                    Ok(texture) => Some(Tile {
                        index,
                        center: tile_center(index),
                        size: MAP_TILE_SIZE,
                        texture: texture.handle,
                    }),
                    Err(e) => {
                        log::debug!("tile {name}: {e}");
                        None
                    }
                }
            })
            .collect();
        self.initialized = true;

        let loaded = self.loaded_count();
        if loaded < MAP_TILE_COUNT {
            log::warn!("{loaded} of {MAP_TILE_COUNT} map tiles loaded");
        }
        loaded
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Release tile textures, last tile first.
    pub fn release(&mut self, device: &mut dyn RenderDevice) {
        for tile in self.tiles.drain(..).rev().flatten() {
            device.release(tile.texture);
        }
        self.initialized = false;
    }

    pub fn loaded_count(&self) -> usize {
        self.tiles.iter().flatten().count()
    }

    pub fn is_loaded(&self, index: usize) -> bool {
        self.tile(index).is_some()
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index).and_then(Option::as_ref)
    }

    /// Visit loaded tiles near `camera`, in row-major order.
    ///
    /// A tile passes when its center is within `radius` plus half its
    /// diagonal of the camera (ground plane) and, given a frustum, when at
    /// least one corner on the radar plane projects.
    pub fn for_each_visible<F: FnMut(&Tile)>(
        &self,
        camera: Vec3,
        radius: f32,
        frustum: Option<&ProjectionContext>,
        mut f: F,
    ) {
        let half = MAP_TILE_SIZE * 0.5;
        let effective = radius + (2.0 * half * half).sqrt();
        let radius_sq = effective * effective;

        for tile in self.tiles.iter().flatten() {
            if tile.center.distance_squared(camera.truncate()) > radius_sq {
                continue;
            }
            if let Some(ctx) = frustum {
                let c = tile.center;
                let corners = [
                    Vec3::new(c.x - half, c.y - half, RADAR_PLANE_Z),
                    Vec3::new(c.x + half, c.y - half, RADAR_PLANE_Z),
                    Vec3::new(c.x + half, c.y + half, RADAR_PLANE_Z),
                    Vec3::new(c.x - half, c.y + half, RADAR_PLANE_Z),
                ];
                if !corners.iter().any(|&p| world_to_screen(p, ctx).is_some()) {
                    continue;
                }
            }
            f(tile);
        }
    }

    /// Collected form of `for_each_visible`.
    pub fn visible(
        &self,
        camera: Vec3,
        radius: f32,
        frustum: Option<&ProjectionContext>,
    ) -> Vec<Tile> {
        let mut out = Vec::new();
        self.for_each_visible(camera, radius, frustum, |t| out.push(*t));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radar_core::view::CameraPose;
    use radar_sandbox::HeadlessDevice;

    fn loaded() -> TileProvider {
        let mut device = HeadlessDevice::new();
        let mut tiles = TileProvider::new();
        tiles.initialize(&mut device);
        tiles
    }

    #[test]
    fn test_tile_names_are_zero_padded() {
        assert_eq!(tile_texture_name(0), "radar00");
        assert_eq!(tile_texture_name(7), "radar07");
        assert_eq!(tile_texture_name(143), "radar143");
    }

    #[test]
    fn test_tile_grid_covers_map() {
        assert_eq!(tile_center(0), Vec2::new(250.0, -250.0));
        assert_eq!(tile_center(11), Vec2::new(5750.0, -250.0));
        assert_eq!(tile_center(143), Vec2::new(5750.0, -5750.0));
    }

    #[test]
    fn test_missing_tile_never_visible() {
        let mut device = HeadlessDevice::new().with_missing(["radar65"]);
        let mut tiles = TileProvider::new();
        assert_eq!(tiles.initialize(&mut device), MAP_TILE_COUNT - 1);
        assert!(!tiles.is_loaded(65));
        let all = tiles.visible(Vec3::new(3000.0, -3000.0, 500.0), 1.0e5, None);
        assert_eq!(all.len(), MAP_TILE_COUNT - 1);
        assert!(all.iter().all(|t| t.index != 65));
    }

    #[test]
    fn test_initialize_twice_is_noop() {
        let mut device = HeadlessDevice::new();
        let mut tiles = TileProvider::new();
        tiles.initialize(&mut device);
        let live = device.live_count();
        tiles.initialize(&mut device);
        assert_eq!(device.live_count(), live);
    }

    #[test]
    fn test_visible_in_row_major_order() {
        let tiles = loaded();
        let v = tiles.visible(Vec3::new(3000.0, -3000.0, 0.0), 800.0, None);
        assert!(!v.is_empty());
        assert!(v.windows(2).all(|w| w[0].index < w[1].index));
    }

    #[test]
    fn test_distance_cull_uses_half_diagonal() {
        let tiles = loaded();
        let camera = Vec3::new(250.0, -250.0, 0.0);
        let half_diag = (2.0f32 * 250.0 * 250.0).sqrt();
        // Tile 1 center is 500 away.
        let v = tiles.visible(camera, 500.0 - half_diag + 0.5, None);
        assert!(v.iter().any(|t| t.index == 1));
        let v = tiles.visible(camera, 500.0 - half_diag - 0.5, None);
        assert!(v.iter().all(|t| t.index != 1));
        assert!(v.iter().any(|t| t.index == 0));
    }

    #[test]
    fn test_release_frees_all_tiles() {
        let mut device = HeadlessDevice::new();
        let mut tiles = TileProvider::new();
        tiles.initialize(&mut device);
        tiles.release(&mut device);
        assert_eq!(device.live_count(), 0);
        assert!(!tiles.is_initialized());
        assert_eq!(tiles.loaded_count(), 0);
    }

    #[test]
    fn test_visible_radius_widens_in_aircraft() {
        let ground = visible_radius(445.0, 1.2, -105.0, false);
        let air = visible_radius(445.0, 1.2, -105.0, true);
        assert!((air / ground - VISIBLE_RADIUS_AIRCRAFT_FACTOR).abs() < 1e-5);
    }

    // ---- Frustum ----

    fn looking(position: Vec3, yaw: f32) -> ProjectionContext {
        ProjectionContext::new(
            CameraPose {
                position,
                rotation: Vec3::new(CAMERA_DEFAULT_PITCH, 0.0, yaw),
            },
            CAMERA_DEFAULT_FOV,
            Vec2::splat(256.0),
            1.0,
        )
    }

    #[test]
    fn test_frustum_keeps_tile_ahead_drops_tile_behind() {
        let tiles = loaded();
        // Over tile 77; tile 65 is one row ahead (+y), tile 101 two rows behind.
        let camera = Vec3::new(2750.0, -3250.0, CAMERA_DEFAULT_HEIGHT);
        let radius = 1200.0;
        let near = tiles.visible(camera, radius, None);
        assert!(near.iter().any(|t| t.index == 65));
        assert!(near.iter().any(|t| t.index == 101));

        let frustum = looking(camera, 0.0);
        let v = tiles.visible(camera, radius, Some(&frustum));
        assert!(v.iter().any(|t| t.index == 65), "tile ahead should be visible");
        assert!(v.iter().all(|t| t.index != 101), "tile behind should be culled");
        assert!(v.len() < near.len());
    }

    #[test]
    fn test_frustum_follows_camera_yaw() {
        let tiles = loaded();
        let camera = Vec3::new(2750.0, -3250.0, CAMERA_DEFAULT_HEIGHT);
        let frustum = looking(camera, std::f32::consts::PI);
        let v = tiles.visible(camera, 1200.0, Some(&frustum));
        assert!(v.iter().any(|t| t.index == 101));
        assert!(v.iter().all(|t| t.index != 65));
    }
}
