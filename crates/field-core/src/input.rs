//! Pointer input normalization and projection onto the field plane.
//!
//! The host feeds raw client coordinates through `client_to_ndc`; the core
//! reads one `PointerSample` per frame and projects it onto the field's
//! local plane via ray-plane intersection from a fixed camera model.

use crate::constants::{CAMERA_Z, FIELD_FOV_Y, POINTER_SPEED_MAX, POINTER_SPEED_SMOOTHING};
use glam::{Vec2, Vec3};

/// Latest pointer state in normalized device coordinates ([-1, 1] on both
/// axes, +Y up). Replaced wholesale on every input event.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerSample {
    pub ndc: Vec2,
    pub active: bool,
}

/// Convert client-space pixel coordinates to normalized device coordinates.
#[inline]
pub fn client_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    if width > 0.0 && height > 0.0 {
        Vec2::new(2.0 * x / width - 1.0, 1.0 - 2.0 * y / height)
    } else {
        Vec2::ZERO
    }
}

/// Camera-space ray through an NDC coordinate. Camera sits at
/// `(0, 0, CAMERA_Z)` looking down -Z with vertical FOV `FIELD_FOV_Y`.
#[inline]
pub fn pointer_ray(ndc: Vec2, aspect: f32) -> (Vec3, Vec3) {
    let half_h = (FIELD_FOV_Y * 0.5).tan();
    let origin = Vec3::new(0.0, 0.0, CAMERA_Z);
    let dir = Vec3::new(ndc.x * half_h * aspect, ndc.y * half_h, -1.0).normalize();
    (origin, dir)
}

/// Intersect a ray with the plane `z = plane_z`. `None` when the ray runs
/// parallel to the plane or the hit lies behind the origin.
#[inline]
pub fn ray_plane(origin: Vec3, dir: Vec3, plane_z: f32) -> Option<Vec3> {
    if dir.z.abs() <= 1e-6 {
        return None;
    }
    let t = (plane_z - origin.z) / dir.z;
    (t >= 0.0).then(|| origin + dir * t)
}

/// Project an active pointer sample onto the field plane. Inactive samples
/// and degenerate rays both yield `None`, disabling repulsion this frame.
#[inline]
pub fn project_onto_field(sample: &PointerSample, aspect: f32, plane_z: f32) -> Option<Vec3> {
    if !sample.active {
        return None;
    }
    let (origin, dir) = pointer_ray(sample.ndc, aspect);
    ray_plane(origin, dir, plane_z)
}

/// Damped pointer-speed estimate in NDC units per second. Speed feeds the
/// repulsion motion boost, so fast swipes push harder than slow hovers.
#[derive(Default)]
pub struct PointerTracker {
    prev: Vec2,
    speed: f32,
    initialized: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the latest sample, returning the smoothed speed estimate.
    pub fn track(&mut self, sample: &PointerSample, dt: f32) -> f32 {
        if !sample.active {
            self.initialized = false;
            self.speed = 0.0;
            return 0.0;
        }
        if !self.initialized {
            self.prev = sample.ndc;
            self.initialized = true;
            return self.speed;
        }
        let target = if dt > 0.0 {
            (sample.ndc - self.prev).length() / dt
        } else {
            0.0
        }
        .min(POINTER_SPEED_MAX);
        let alpha = 1.0 - (-dt * POINTER_SPEED_SMOOTHING).exp();
        self.speed += (target - self.speed) * alpha;
        self.prev = sample.ndc;
        self.speed
    }
}
