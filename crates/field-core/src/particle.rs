//! Particle store: per-particle rest state created once per viewport layout.
//!
//! Seeding uses a golden-angle spiral with sqrt radius scaling (sunflower
//! packing) over an elliptical footprint, so the population spreads evenly
//! without clumping. A resize discards the whole population and reseeds.

use crate::constants::*;
use glam::{Vec2, Vec3};
use rand::{rngs::StdRng, Rng};

/// Quasi-periodic wander constants around the rest position.
#[derive(Clone, Copy, Debug)]
pub struct Oscillation {
    pub amp: Vec2,
    pub speed: Vec2,
    pub phase: Vec2,
    pub drift: Vec2,
}

/// Secondary slow rotation around the rest position.
#[derive(Clone, Copy, Debug)]
pub struct Orbit {
    pub radius: f32,
    pub phase: f32,
    pub tilt: f32,
    pub speed: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct Particle {
    /// Home position before oscillation, orbit, and repulsion apply.
    /// Mutated only through eased transitions and the modular rest wrap.
    pub rest: Vec3,
    pub osc: Oscillation,
    pub orbit: Orbit,
    /// Scalar along the viewing axis, confined to [DEPTH_FAR, DEPTH_NEAR].
    pub depth: f32,
    pub base_scale: f32,
    pub rotation_rate: f32,
    pub twinkle_phase: f32,
}

/// Elliptical world-space footprint derived from the viewport.
#[derive(Clone, Copy, Debug)]
pub struct Footprint {
    pub half_x: f32,
    pub half_y: f32,
}

impl Footprint {
    pub fn for_viewport(width: f32, height: f32) -> Self {
        let aspect = (width / height).clamp(FIELD_ASPECT_MIN, FIELD_ASPECT_MAX);
        Self {
            half_x: FIELD_HALF_HEIGHT * aspect,
            half_y: FIELD_HALF_HEIGHT,
        }
    }

    /// Oversized bound past which rest positions recycle to the far side.
    pub fn neighbor_bound(&self) -> Vec2 {
        Vec2::new(
            self.half_x * NEIGHBOR_BOUND_SCALE,
            self.half_y * NEIGHBOR_BOUND_SCALE,
        )
    }
}

/// Indexed particle table. Population size is fixed for the lifetime of a
/// given viewport; a resize rebuilds the table from scratch.
pub struct ParticleField {
    pub particles: Vec<Particle>,
    pub footprint: Footprint,
}

impl ParticleField {
    pub fn seed(count: usize, footprint: Footprint, rng: &mut StdRng) -> Self {
        let n = count.max(1) as f32;
        let particles = (0..count)
            .map(|i| spawn_particle(i as f32, n, footprint, rng))
            .collect();
        log::info!(
            "[field] seeded {} particles over {:.1}x{:.1} footprint",
            count,
            footprint.half_x * 2.0,
            footprint.half_y * 2.0
        );
        Self {
            particles,
            footprint,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

fn spawn_particle(index: f32, count: f32, footprint: Footprint, rng: &mut StdRng) -> Particle {
    // Sunflower packing: golden-angle increment + sqrt(i/n) radius gives an
    // even spread; jitter breaks the visible regularity.
    let angle = index * GOLDEN_ANGLE + rng.gen_range(-ANGLE_JITTER..ANGLE_JITTER);
    let radial =
        ((index / count).sqrt() + rng.gen_range(-RADIUS_JITTER..RADIUS_JITTER)).clamp(0.0, 1.0);
    let rest = Vec3::new(
        angle.cos() * radial * footprint.half_x,
        angle.sin() * radial * footprint.half_y,
        0.0,
    );

    // Power bias pushes most starts toward the back of the depth interval.
    let back_bias = rng.gen::<f32>().powf(DEPTH_BIAS_EXP);
    let raw_depth =
        DEPTH_NEAR - back_bias * DEPTH_SPAN + rng.gen_range(-DEPTH_JITTER..DEPTH_JITTER);
    let depth = DEPTH_FAR + (raw_depth - DEPTH_FAR).rem_euclid(DEPTH_SPAN);
    let nearness = (depth - DEPTH_FAR) / DEPTH_SPAN; // 0 back, 1 front

    let base_scale = (BASE_SCALE_MIN
        + (BASE_SCALE_MAX - BASE_SCALE_MIN) * nearness
        + rng.gen_range(-SIZE_JITTER..SIZE_JITTER))
    .max(0.1);

    // Peripheral particles orbit wider; near-viewer starts orbit tighter.
    let orbit_radius = rng.gen_range(ORBIT_RADIUS_MIN..ORBIT_RADIUS_MAX)
        * (0.5 + 0.5 * radial)
        * (1.0 - (1.0 - ORBIT_NEAR_SHRINK) * nearness);

    let tau = std::f32::consts::TAU;
    Particle {
        rest,
        osc: Oscillation {
            amp: Vec2::new(
                rng.gen_range(OSC_AMP_MIN..OSC_AMP_MAX),
                rng.gen_range(OSC_AMP_MIN..OSC_AMP_MAX),
            ),
            speed: Vec2::new(
                rng.gen_range(OSC_SPEED_MIN..OSC_SPEED_MAX),
                rng.gen_range(OSC_SPEED_MIN..OSC_SPEED_MAX),
            ),
            phase: Vec2::new(rng.gen_range(0.0..tau), rng.gen_range(0.0..tau)),
            drift: Vec2::new(
                rng.gen_range(DRIFT_AMP_MIN..DRIFT_AMP_MAX),
                rng.gen_range(DRIFT_AMP_MIN..DRIFT_AMP_MAX),
            ),
        },
        orbit: Orbit {
            radius: orbit_radius,
            phase: rng.gen_range(0.0..tau),
            tilt: rng.gen_range(ORBIT_TILT_MIN..ORBIT_TILT_MAX),
            speed: rng.gen_range(ORBIT_SPEED_MIN..ORBIT_SPEED_MAX),
        },
        depth,
        base_scale,
        rotation_rate: rng.gen_range(-ROTATION_RATE_MAX..ROTATION_RATE_MAX),
        twinkle_phase: rng.gen_range(0.0..tau),
    }
}
