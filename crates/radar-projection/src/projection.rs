//! Custom perspective projection of the radar camera.
//!
//! The camera is not a look-at camera. Its basis comes straight from pitch
//! and yaw, and the eye is pulled back along the camera's up axis by an
//! amount that grows with the angle between the view direction and world
//! down. Looking straight down gives no pull-back; looking at the horizon
//! pulls back by `EYE_PULLBACK`. This flattens the pseudo-3D look at steep
//! tilts while keeping the player near the middle of the target.

use glam::{Vec2, Vec3, Vec4};

use radar_core::constants::EYE_PULLBACK;
use radar_core::view::{CameraPose, ProjectionContext};

/// Orthonormal view basis and eye position derived from a camera pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBasis {
    pub eye: Vec3,
    pub x: Vec3,
    pub y: Vec3,
    pub z: Vec3,
}

impl ViewBasis {
    pub fn from_pose(pose: &CameraPose) -> Self {
        let (sp, cp) = pose.pitch().sin_cos();
        let (sy, cy) = pose.yaw().sin_cos();

        let right = Vec3::new(cy, sy, 0.0);
        let forward = Vec3::new(-cp * sy, cy * cp, sp);
        let up = Vec3::new(sy * sp, -cy * sp, cp);

        let tilt = Vec3::NEG_Z.dot(forward).clamp(-1.0, 1.0).acos();
        let pull_back = EYE_PULLBACK * tilt / std::f32::consts::FRAC_PI_2;
        let eye = pose.position + right + forward - pull_back * up;

        let z = forward.normalize();
        let x = (-up).cross(z).normalize();
        let y = x.cross(z);

        Self { eye, x, y, z }
    }

    /// World point in view space (x right, y up, z depth).
    pub fn to_view(&self, world: Vec3) -> Vec3 {
        let d = world - self.eye;
        Vec3::new(self.x.dot(d), self.y.dot(d), self.z.dot(d))
    }
}

/// Homogeneous clip coordinates of a world point.
pub fn clip_coords(world: Vec3, ctx: &ProjectionContext) -> Vec4 {
    let view = ViewBasis::from_pose(&ctx.camera).to_view(world);

    let aspect = if ctx.aspect > 0.0 {
        ctx.aspect
    } else {
        ctx.target.y / ctx.target.x
    };
    let w = 1.0 / (ctx.fov * 0.5).tan();
    let h = w / aspect;
    let q = ctx.far / (ctx.far - ctx.near);

    Vec4::new(view.x * w, view.y * h, view.z * q - q * ctx.near, view.z)
}

/// Project a radar-space point into pixel coordinates of `ctx.target`.
///
/// Returns `None` when the point is behind the near plane, beyond the far
/// plane, or outside the homogeneous clip volume (`w <= 0` or `z` outside
/// `[0, w]`). Callers fall back to orbit placement.
pub fn world_to_screen(world: Vec3, ctx: &ProjectionContext) -> Option<Vec2> {
    let clip = clip_coords(world, ctx);
    if clip.w <= 0.0 || clip.z < 0.0 || clip.z > clip.w {
        return None;
    }

    let inv_w = 1.0 / clip.w;
    let ndc_x = clip.x * inv_w;
    let ndc_y = clip.y * inv_w;

    let screen = Vec2::new(
        (ndc_x + 1.0) * 0.5 * ctx.target.x,
        (1.0 - ndc_y) * 0.5 * ctx.target.y,
    );
    screen.is_finite().then_some(screen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use radar_core::constants::{CAMERA_DEFAULT_FOV, CAMERA_DEFAULT_PITCH, FAR_PLANE};

    fn ctx_at(position: Vec3, yaw: f32) -> ProjectionContext {
        ProjectionContext::new(
            CameraPose {
                position,
                rotation: Vec3::new(CAMERA_DEFAULT_PITCH, 0.0, yaw),
            },
            CAMERA_DEFAULT_FOV,
            Vec2::new(256.0, 256.0),
            1.0,
        )
    }

    #[test]
    fn test_basis_is_orthonormal() {
        for yaw in [0.0f32, 0.7, -2.1, 3.0] {
            let b = ViewBasis::from_pose(&CameraPose {
                position: Vec3::ZERO,
                rotation: Vec3::new(-0.45, 0.0, yaw),
            });
            assert!((b.x.length() - 1.0).abs() < 1e-5);
            assert!((b.y.length() - 1.0).abs() < 1e-5);
            assert!((b.z.length() - 1.0).abs() < 1e-5);
            assert!(b.x.dot(b.z).abs() < 1e-5, "x not orthogonal to z at yaw {yaw}");
            assert!(b.y.dot(b.z).abs() < 1e-5, "y not orthogonal to z at yaw {yaw}");
        }
    }

    #[test]
    fn test_player_projects_below_center() {
        // Camera 105 units ahead of the player, as the controller places it.
        let ctx = ctx_at(Vec3::new(1000.0, -1000.0 + 105.0, 445.0), 0.0);
        let screen = world_to_screen(Vec3::new(1000.0, -1000.0, 0.1), &ctx).unwrap();
        let nx = screen.x / 256.0;
        let ny = screen.y / 256.0;
        assert!((nx - 0.5).abs() < 0.02, "player should be horizontally centered: {nx}");
        assert!(ny > 0.6 && ny < 0.75, "player should sit below center: {ny}");
    }

    #[test]
    fn test_point_behind_camera_fails() {
        let ctx = ctx_at(Vec3::new(0.0, 0.0, 445.0), 0.0);
        assert!(world_to_screen(Vec3::new(0.0, -5000.0, 0.1), &ctx).is_none());
    }

    #[test]
    fn test_point_beyond_far_plane_fails() {
        let ctx = ctx_at(Vec3::new(0.0, 0.0, 445.0), 0.0);
        let far = Vec3::new(0.0, FAR_PLANE * 1.5, 0.1);
        assert!(world_to_screen(far, &ctx).is_none());
        let clip = clip_coords(far, &ctx);
        assert!(clip.z > clip.w, "depth beyond far plane should exceed w");
    }

    #[test]
    fn test_success_is_finite() {
        let ctx = ctx_at(Vec3::new(0.0, 0.0, 445.0), 1.3);
        for i in 0..50 {
            let a = i as f32 * 0.37;
            let p = Vec3::new(a.cos() * 300.0, a.sin() * 300.0, 0.1);
            if let Some(s) = world_to_screen(p, &ctx) {
                assert!(s.is_finite(), "non-finite projection for {p:?}");
            }
        }
    }

    #[test]
    fn test_yaw_rotates_view() {
        // A point ahead of a north-facing camera ends up behind when facing south.
        let north = ctx_at(Vec3::new(0.0, 0.0, 445.0), 0.0);
        let south = ctx_at(Vec3::new(0.0, 0.0, 445.0), std::f32::consts::PI);
        let p = Vec3::new(0.0, 400.0, 0.1);
        assert!(world_to_screen(p, &north).is_some());
        assert!(world_to_screen(p, &south).is_none());
    }

    #[test]
    fn test_aspect_derived_from_target_when_unset() {
        let mut ctx = ctx_at(Vec3::new(0.0, 0.0, 445.0), 0.0);
        let p = Vec3::new(40.0, 200.0, 0.1);
        let explicit = world_to_screen(p, &ctx).unwrap();
        ctx.aspect = 0.0;
        let derived = world_to_screen(p, &ctx).unwrap();
        assert!((explicit - derived).length() < 1e-3, "{explicit} vs {derived}");
    }
}
