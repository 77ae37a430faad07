//! Radar placement on screen, scaled from the 1920x1080 reference layout.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use radar_core::config::RadarSettings;
use radar_core::constants::{BASE_SCREEN_HEIGHT, BASE_SCREEN_WIDTH};
use radar_core::draw::ScreenRect;
use radar_core::enums::RadarShape;

use crate::orbit::Orbit;

/// Resolution scale factors against the reference layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenScale {
    pub x: f32,
    pub y: f32,
    /// Average of both axes, used for sizes.
    pub uniform: f32,
}

impl ScreenScale {
    pub fn new(screen: Vec2) -> Self {
        let x = screen.x / BASE_SCREEN_WIDTH;
        let y = screen.y / BASE_SCREEN_HEIGHT;
        Self {
            x,
            y,
            uniform: (x + y) * 0.5,
        }
    }
}

/// Where the radar sits this frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarViewport {
    /// Top-left corner in screen pixels.
    pub origin: Vec2,
    pub size: Vec2,
    /// Orbit half extents (border-adjusted).
    pub half: Vec2,
    /// Content shape.
    pub shape: RadarShape,
    pub screen: Vec2,
    pub scale: ScreenScale,
}

impl RadarViewport {
    /// Lay the radar out for a `screen`-sized backbuffer.
    ///
    /// Sizes scale isotropically; the x offset follows the horizontal ratio
    /// and the y offset (measured from the bottom edge) the vertical ratio.
    pub fn compute(settings: &RadarSettings, screen: Vec2) -> Self {
        let scale = ScreenScale::new(screen);
        let size = match settings.shape {
            RadarShape::Circle => Vec2::splat(settings.circle_size as f32 * scale.uniform),
            RadarShape::Square => Vec2::new(
                settings.square_size_x as f32 * scale.uniform,
                settings.square_size_y as f32 * scale.uniform,
            ),
        };
        let origin = Vec2::new(
            settings.offset_x as f32 * scale.x,
            screen.y - settings.offset_y as f32 * scale.y - size.y,
        );
        let half = half_extents(size, settings.border_thickness as f32, settings.shape);

        Self {
            origin,
            size,
            half,
            shape: settings.shape,
            screen,
            scale,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    pub fn rect(&self) -> ScreenRect {
        ScreenRect::new(self.origin.x, self.origin.y, self.size.x, self.size.y)
    }

    pub fn orbit(&self) -> Orbit {
        Orbit::new(self.center(), self.half, self.shape)
    }

    /// Side of the square render target the map is drawn into.
    pub fn render_target_side(&self) -> u32 {
        render_target_side(self.size)
    }

    /// Icon size scaled by the horizontal resolution ratio.
    pub fn icon_size(&self, base: f32) -> f32 {
        base * self.scale.x
    }

    /// Height over width of the backbuffer.
    pub fn screen_aspect(&self) -> f32 {
        if self.screen.x > 0.0 {
            self.screen.y / self.screen.x
        } else {
            1.0
        }
    }
}

/// Orbit half extents for a radar of `size` pixels.
///
/// Circles are inset by half the border so icons stay inside the ring,
/// falling back to one pixel when the border eats the whole radius.
/// Squares extend by half the border so icons sit on it.
pub fn half_extents(size: Vec2, border: f32, shape: RadarShape) -> Vec2 {
    match shape {
        RadarShape::Circle => {
            let min_half = size.x.min(size.y) * 0.5;
            let r = min_half - border * 0.5;
            Vec2::splat(if r > 1.0 { r } else { min_half - 1.0 })
        }
        RadarShape::Square => size * 0.5 + Vec2::splat(border * 0.5),
    }
}

/// Rounded smaller side, never below one pixel.
pub fn render_target_side(size: Vec2) -> u32 {
    (size.x.min(size.y).round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_HD: Vec2 = Vec2::new(1920.0, 1080.0);

    #[test]
    fn test_default_layout_at_reference_resolution() {
        let vp = RadarViewport::compute(&RadarSettings::default(), FULL_HD);
        assert_eq!(vp.size, Vec2::splat(265.0));
        assert_eq!(vp.origin, Vec2::new(85.0, 1080.0 - 55.0 - 265.0));
        assert_eq!(vp.half, Vec2::splat(265.0 * 0.5 - 4.0));
        assert_eq!(vp.render_target_side(), 265);
    }

    #[test]
    fn test_positions_scale_per_axis() {
        // 2560x1080 ultrawide: x ratio 1.333, y ratio 1.0.
        let vp = RadarViewport::compute(&RadarSettings::default(), Vec2::new(2560.0, 1080.0));
        let sx = 2560.0 / 1920.0;
        let uniform = (sx + 1.0) * 0.5;
        assert!((vp.origin.x - 85.0 * sx).abs() < 1e-3, "x offset {}", vp.origin.x);
        assert!((vp.size.x - 265.0 * uniform).abs() < 1e-3, "size {}", vp.size.x);
        assert!((vp.origin.y - (1080.0 - 55.0 - vp.size.y)).abs() < 1e-3);
    }

    #[test]
    fn test_square_layout() {
        let settings = RadarSettings {
            shape: RadarShape::Square,
            square_size_x: 300,
            square_size_y: 200,
            border_thickness: 10,
            ..RadarSettings::default()
        };
        let vp = RadarViewport::compute(&settings, FULL_HD);
        assert_eq!(vp.size, Vec2::new(300.0, 200.0));
        assert_eq!(vp.half, Vec2::new(155.0, 105.0));
        assert_eq!(vp.render_target_side(), 200);
        assert_eq!(vp.orbit().shape, RadarShape::Square);
    }

    #[test]
    fn test_circle_half_extent_falls_back_on_thick_border() {
        let h = half_extents(Vec2::splat(10.0), 20.0, RadarShape::Circle);
        assert_eq!(h, Vec2::splat(4.0));
    }

    #[test]
    fn test_center_and_rect() {
        let vp = RadarViewport::compute(&RadarSettings::default(), FULL_HD);
        assert_eq!(vp.rect().center(), vp.center());
        assert_eq!(vp.orbit().center, vp.center());
    }

    #[test]
    fn test_render_target_side_never_zero() {
        assert_eq!(render_target_side(Vec2::new(0.2, 100.0)), 1);
        assert_eq!(render_target_side(Vec2::new(264.6, 300.0)), 265);
    }

    #[test]
    fn test_icon_size_uses_width_ratio() {
        let vp = RadarViewport::compute(&RadarSettings::default(), Vec2::new(3840.0, 2160.0));
        assert!((vp.icon_size(24.0) - 48.0).abs() < 1e-4);
    }
}
