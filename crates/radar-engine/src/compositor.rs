//! Radar compositor: turns one world snapshot into an ordered draw list.
//!
//! `Compositor` owns every piece of cross-frame state. Each `render` call
//! updates the camera, draws the map into a square render target, then
//! layers the composited map, avionics and 2D icons on screen. A frame is
//! either produced whole or skipped (not initialized, device lost, zero
//! screen, player inside an interior).

use glam::Vec2;

use radar_camera::CameraController;
use radar_core::config::RadarSettings;
use radar_core::constants::{FAR_PLANE, INTERIOR_FADE_MS, NEAR_PLANE};
use radar_core::draw::{DrawCommand, DrawList, RenderDevice};
use radar_core::enums::RadarShape;
use radar_core::types::TextureHandle;
use radar_core::world::WorldQuery;
use radar_projection::RadarViewport;

use crate::blips::BlipAggregator;
use crate::error::LayerError;
use crate::frame::{FrameContext, FrameInput};
use crate::gang_zones::{GangZone, GangZoneOverlay};
use crate::layers::{airstrips, blips2d, hud, indicators, legends, map, radio, route};
use crate::textures::TextureSet;
use crate::tiles::TileProvider;

/// Engine-level knobs that are not user settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositorConfig {
    pub near_plane: f32,
    pub far_plane: f32,
    /// Border shape when it should differ from the content shape.
    pub border_shape: Option<RadarShape>,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            near_plane: NEAR_PLANE,
            far_plane: FAR_PLANE,
            border_shape: None,
        }
    }
}

/// Log and drop a failed layer; the rest of the frame still renders.
fn run_layer(name: &str, result: Result<(), LayerError>) {
    if let Err(e) = result {
        log::debug!("{name} layer skipped: {e}");
    }
}

pub struct Compositor {
    settings: RadarSettings,
    config: CompositorConfig,
    camera: CameraController,
    textures: TextureSet,
    tiles: TileProvider,
    blips: BlipAggregator,
    gang_zones: GangZoneOverlay,
    render_target: Option<(TextureHandle, u32)>,
    initialized: bool,

    was_in_interior: bool,
    exit_fade_start: Option<u64>,
    was_in_aircraft: bool,
    initial_altitude: f32,
}

impl Compositor {
    pub fn new(settings: RadarSettings, config: CompositorConfig) -> Self {
        let mut blips = BlipAggregator::new();
        blips.set_more_icons(settings.more_icons);
        Self {
            settings,
            config,
            camera: CameraController::new(),
            textures: TextureSet::default(),
            tiles: TileProvider::new(),
            blips,
            gang_zones: GangZoneOverlay::new(),
            render_target: None,
            initialized: false,
            was_in_interior: false,
            exit_fade_start: None,
            was_in_aircraft: false,
            initial_altitude: 0.0,
        }
    }

    pub fn settings(&self) -> &RadarSettings {
        &self.settings
    }

    /// Swap settings between frames. Caches are rebuilt on the next refresh.
    pub fn set_settings(&mut self, settings: RadarSettings) {
        if settings.more_icons != self.blips.more_icons() {
            self.blips.set_more_icons(settings.more_icons);
            self.blips.clear();
        }
        self.settings = settings;
    }

    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    pub fn set_border_shape(&mut self, shape: Option<RadarShape>) {
        self.config.border_shape = shape;
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn blips(&self) -> &BlipAggregator {
        &self.blips
    }

    pub fn gang_zones(&self) -> &[GangZone] {
        self.gang_zones.zones()
    }

    pub fn tiles(&self) -> &TileProvider {
        &self.tiles
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Side of the live render target, if any.
    pub fn render_target_side(&self) -> Option<u32> {
        self.render_target.map(|(_, side)| side)
    }

    /// Acquire textures and tiles. A second call is a no-op.
    pub fn initialize(&mut self, device: &mut dyn RenderDevice) {
        if self.initialized {
            return;
        }
        if !device.status().can_render() {
            log::debug!("initialize deferred: device lost");
            return;
        }
        self.textures = TextureSet::load(device);
        let tiles = self.tiles.initialize(device);
        self.blips.clear();
        self.gang_zones.clear();
        self.initialized = true;
        log::info!(
            "radar initialized: {tiles} tiles, {} icons",
            self.textures.loaded_icons()
        );
    }

    /// Release everything in reverse acquisition order.
    pub fn shutdown(&mut self, device: &mut dyn RenderDevice) {
        if let Some((handle, _)) = self.render_target.take() {
            device.release(handle);
        }
        self.textures.release(device);
        self.tiles.release(device);
        self.blips.clear();
        self.gang_zones.clear();
        if self.initialized {
            log::info!("radar shut down");
        }
        self.initialized = false;
    }

    pub fn on_device_lost(&mut self, device: &mut dyn RenderDevice) {
        log::info!("device lost, releasing radar resources");
        self.shutdown(device);
    }

    pub fn on_device_reset(&mut self, device: &mut dyn RenderDevice) {
        log::info!("device reset, reacquiring radar resources");
        self.initialize(device);
    }

    /// (Re)create the render target when the radar side changes.
    fn ensure_render_target(
        &mut self,
        device: &mut dyn RenderDevice,
        side: u32,
    ) -> Option<TextureHandle> {
        match self.render_target {
            Some((handle, current)) if current == side => return Some(handle),
            Some((handle, current)) => {
                log::debug!("render target resized {current} -> {side}");
                device.release(handle);
                self.render_target = None;
            }
            None => {}
        }
        match device.create_render_target(side) {
            Ok(handle) => {
                self.render_target = Some((handle, side));
                Some(handle)
            }
            Err(e) => {
                log::debug!("render target unavailable: {e}");
                None
            }
        }
    }

    /// Produce one frame, or `None` when the frame is skipped.
    pub fn render(
        &mut self,
        world: &dyn WorldQuery,
        device: &mut dyn RenderDevice,
        input: FrameInput,
    ) -> Option<DrawList> {
        if !self.initialized || !device.status().can_render() {
            return None;
        }
        if input.screen.x <= 0.0 || input.screen.y <= 0.0 {
            return None;
        }
        let now = input.now_ms;
        let player = world.player().ok();

        // --- Interior transitions ---
        let in_interior = player.is_some_and(|p| p.in_interior);
        if self.was_in_interior && !in_interior {
            log::debug!("left interior, exit fade started at {now} ms");
            self.exit_fade_start = Some(now);
        }
        self.was_in_interior = in_interior;
        if in_interior {
            return None;
        }

        // --- Camera and layout ---
        let forward = world.camera_forward().ok();
        self.camera
            .tick(player.as_ref(), forward, input.overview_key, now);
        let viewport = RadarViewport::compute(&self.settings, input.screen);
        let side = viewport.render_target_side();
        let target = self.ensure_render_target(device, side);

        let pose = self.camera.cached_pose().pose;
        let mut view = self
            .camera
            .projection(Vec2::splat(side as f32), viewport.screen_aspect());
        view.near = self.config.near_plane;
        view.far = self.config.far_plane;

        if self.settings.show_gang_zones {
            run_layer("gang zones", self.gang_zones.refresh(world, now));
        }
        run_layer(
            "blips",
            self.blips
                .update(world, &self.textures, now)
                .map(|_| ()),
        );

        let ctx = FrameContext {
            world,
            textures: &self.textures,
            settings: &self.settings,
            player,
            viewport,
            camera: *self.camera.state(),
            pose,
            view,
            rt_side: side,
            now_ms: now,
        };
        let mut out = DrawList::new();

        // --- Render-target pass ---
        if let Some(target) = target {
            out.push(DrawCommand::BeginTarget {
                target,
                size: side,
                clear: self.settings.background_color,
            });
            run_layer("tiles", map::draw_tiles(&ctx, &self.tiles, &mut out));
            run_layer(
                "gang zones",
                map::draw_gang_zones(&ctx, self.gang_zones.zones(), &mut out),
            );
            run_layer(
                "gps route",
                route::draw(&ctx, device.supports_scissor(), &mut out),
            );
            run_layer(
                "player icon",
                map::draw_player_icon(&ctx, self.blips.blips().len(), &mut out),
            );
            out.push(DrawCommand::EndTarget);
        }

        // --- Screen pass ---
        run_layer("composite", hud::draw_composite(&ctx, target, &mut out));
        run_layer("plane attitude", hud::draw_plane_attitude(&ctx, &mut out));

        if let Some(start) = self.exit_fade_start {
            let elapsed = now.saturating_sub(start);
            if elapsed >= INTERIOR_FADE_MS {
                self.exit_fade_start = None;
            } else {
                run_layer("exit fade", hud::draw_exit_fade(&ctx, elapsed, &mut out));
            }
        }

        let border = self.config.border_shape.unwrap_or(self.settings.shape);
        hud::draw_border(&ctx, border, &mut out);

        let in_aircraft = ctx.in_aircraft();
        if in_aircraft {
            let altitude = ctx.player_position().z;
            if !self.was_in_aircraft {
                self.initial_altitude = altitude;
            }
            hud::draw_altitude(&ctx, altitude - self.initial_altitude, &mut out);
        }
        self.was_in_aircraft = in_aircraft;

        run_layer("north", hud::draw_north(&ctx, &mut out));
        run_layer("blips", blips2d::draw(&ctx, self.blips.blips(), &mut out));
        run_layer("airstrips", airstrips::draw(&ctx, &mut out));
        run_layer("indicators", indicators::draw(&ctx, &mut out));
        run_layer("legends", legends::draw(&ctx, &mut out));
        run_layer("radio", radio::draw(&ctx, &mut out));

        Some(out)
    }
}
