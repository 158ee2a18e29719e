//! Field engine: owns all simulation state and drives the per-frame
//! ordering (scroll rig, eased transitions, kinematics, the decimated
//! overlap resolver, then the render adapter write). Everything runs
//! synchronously inside one display-frame callback; nothing blocks.

use crate::constants::*;
use crate::error::FieldError;
use crate::input::{project_onto_field, PointerTracker};
use crate::kinematics::*;
use crate::particle::{Footprint, ParticleField};
use crate::ports::{BillboardTransform, PointerSource, RenderSink, ScrollSource};
use crate::resolver;
use crate::scroll::ScrollRig;
use crate::tween::{Channel, Ease, TweenKey, Tweens};
use glam::Vec3;
use rand::{rngs::StdRng, SeedableRng};

/// Construction-time parameters. Tuning constants live in `constants`;
/// this carries only what the host decides per mount.
#[derive(Clone, Debug)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// World position of the field group; the pointer plane tracks it.
    pub origin: Vec3,
    pub reduced_motion: bool,
    pub seed: u64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 220,
            viewport_width: 1280.0,
            viewport_height: 720.0,
            origin: Vec3::ZERO,
            reduced_motion: false,
            seed: 42,
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.particle_count == 0 || self.particle_count > MAX_PARTICLE_COUNT {
            return Err(FieldError::CountOutOfRange(self.particle_count));
        }
        if !viewport_ok(self.viewport_width, self.viewport_height) {
            return Err(FieldError::BadViewport {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }
        Ok(())
    }
}

fn viewport_ok(width: f32, height: f32) -> bool {
    width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
}

pub struct FieldEngine {
    config: FieldConfig,
    field: ParticleField,
    rig: ScrollRig,
    tweens: Tweens,
    tracker: PointerTracker,
    rng: StdRng,

    // Per-index frame state, rebuilt on reseed
    displayed: Vec<Vec3>,
    transforms: Vec<BillboardTransform>,
    cooldowns: Vec<f32>,
    punch: Vec<f32>,
    glow: Vec<f32>,
    radii: Vec<f32>,

    time: f32,
    frame_index: u64,
    stopped: bool,
}

impl FieldEngine {
    pub fn new(config: FieldConfig) -> Result<Self, FieldError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let footprint = Footprint::for_viewport(config.viewport_width, config.viewport_height);
        let field = ParticleField::seed(config.particle_count, footprint, &mut rng);
        let n = field.len();
        Ok(Self {
            rig: ScrollRig::new(config.reduced_motion),
            tweens: Tweens::new(),
            tracker: PointerTracker::new(),
            rng,
            displayed: vec![Vec3::ZERO; n],
            transforms: vec![BillboardTransform::default(); n],
            cooldowns: vec![0.0; n],
            punch: vec![0.0; n],
            glow: vec![0.0; n],
            radii: vec![0.0; n],
            time: 0.0,
            frame_index: 0,
            stopped: false,
            config,
            field,
        })
    }

    pub fn particle_count(&self) -> usize {
        self.field.len()
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn transforms(&self) -> &[BillboardTransform] {
        &self.transforms
    }

    pub fn active_tweens(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Full re-seed for a new viewport. In-flight transitions are abandoned,
    /// not resumed; the population is rebuilt, never patched.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !viewport_ok(width, height) {
            log::warn!("[field] ignoring resize to {width}x{height}");
            return;
        }
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self.tweens.cancel_all();
        let footprint = Footprint::for_viewport(width, height);
        self.field = ParticleField::seed(self.config.particle_count, footprint, &mut self.rng);
        let n = self.field.len();
        self.displayed = vec![Vec3::ZERO; n];
        self.transforms = vec![BillboardTransform::default(); n];
        self.cooldowns = vec![0.0; n];
        self.punch = vec![0.0; n];
        self.glow = vec![0.0; n];
        self.radii = vec![0.0; n];
        log::info!("[field] reseeded for {width:.0}x{height:.0} viewport");
    }

    /// Advance one display frame. Ordering within the frame is fixed:
    /// scroll rig, then eased transitions, then kinematics, then (every
    /// `COLLISION_FRAME_STEP` frames) the overlap resolver, then the render
    /// adapter write, so a renderer consuming frame N sees consistent
    /// state for frame N.
    pub fn frame(
        &mut self,
        scroll: &dyn ScrollSource,
        pointer: &dyn PointerSource,
        sink: &mut dyn RenderSink,
        dt: f32,
    ) {
        if self.stopped {
            return;
        }
        self.time += dt;
        let time = self.time;
        let snap = self
            .rig
            .update(scroll.offset(), scroll.scrollable_height(), dt);

        let sample = pointer.sample();
        let pointer_speed = self.tracker.track(&sample, dt);
        let aspect = self.config.viewport_width / self.config.viewport_height;
        let plane_z = self.config.origin.z + POINTER_PLANE_LOCAL_Z;
        let pointer_hit = project_onto_field(&sample, aspect, plane_z);
        let boost = motion_boost(pointer_speed, snap.velocity);

        // Apply in-flight transitions before kinematics reads rest state.
        let field = &mut self.field;
        let punch = &mut self.punch;
        let glow = &mut self.glow;
        punch.fill(0.0);
        glow.fill(0.0);
        self.tweens.step(dt, |key, value| {
            let i = key.index as usize;
            match key.channel {
                Channel::Rest => {
                    if let Some(p) = field.particles.get_mut(i) {
                        p.rest = value;
                    }
                }
                Channel::ScalePunch => {
                    if let Some(v) = punch.get_mut(i) {
                        *v = value.x;
                    }
                }
                Channel::Glow => {
                    if let Some(v) = glow.get_mut(i) {
                        *v = value.x;
                    }
                }
            }
        });

        let origin = self.config.origin;
        let bound = field.footprint.neighbor_bound();
        for i in 0..field.particles.len() {
            self.cooldowns[i] = (self.cooldowns[i] - dt).max(0.0);
            let p = &mut field.particles[i];

            let wrapped = wrap_depth(p.depth, snap.depth_offset);
            let df = depth_factor(wrapped);
            let orbit = orbit_vector(&p.orbit, time, snap.depth_offset, df);
            let osc = oscillation_vector(&p.osc, time);
            let mut pos = Vec3::new(
                origin.x + p.rest.x + orbit.x + osc.x,
                origin.y + p.rest.y + orbit.y + osc.y + depth_tilt(df),
                origin.z + wrapped,
            );

            if let Some(hit) = pointer_hit {
                if let Some(impulse) = repel_impulse(pos.truncate(), hit.truncate(), boost) {
                    pos.x += impulse.x;
                    pos.y += impulse.y;
                    // The instantaneous offset above is free; shifting the
                    // rest position is gated per particle so one swipe
                    // leaves a single eased displacement, not a pile-up.
                    if self.cooldowns[i] <= 0.0 {
                        self.cooldowns[i] = REPEL_COOLDOWN_SEC;
                        let shift = impulse.extend(0.0) * REST_SHIFT_FACTOR;
                        self.tweens.start(
                            TweenKey {
                                index: i as u32,
                                channel: Channel::Rest,
                            },
                            p.rest,
                            p.rest + shift,
                            REST_SHIFT_DURATION,
                            Ease::OutCubic,
                        );
                        self.tweens.start_scalar(
                            TweenKey {
                                index: i as u32,
                                channel: Channel::ScalePunch,
                            },
                            SCALE_PUNCH_AMOUNT,
                            0.0,
                            SCALE_PUNCH_DURATION,
                            Ease::OutCubic,
                        );
                        self.tweens.start_scalar(
                            TweenKey {
                                index: i as u32,
                                channel: Channel::Glow,
                            },
                            GLOW_FLASH_AMOUNT,
                            0.0,
                            GLOW_FLASH_DURATION,
                            Ease::OutCubic,
                        );
                    }
                }
            }

            // The modular wrap must not fight an in-flight rest transition:
            // the transition samples absolute positions and would snap the
            // particle back across the bound every frame.
            let rest_key = TweenKey {
                index: i as u32,
                channel: Channel::Rest,
            };
            if !self.tweens.contains(rest_key) {
                wrap_rest_xy(&mut p.rest, bound);
            }

            let scale = p.base_scale
                * perspective_scale(df)
                * twinkle(time, p.twinkle_phase)
                * velocity_boost(snap.velocity)
                * (1.0 + self.punch[i]);
            self.transforms[i] = BillboardTransform {
                position: pos,
                scale,
                rotation_delta: p.rotation_rate * dt,
                opacity: opacity_for(df, snap.velocity, self.glow[i]),
            };
            self.displayed[i] = pos;
        }

        self.frame_index += 1;
        if self.frame_index % COLLISION_FRAME_STEP == 0 {
            for (r, t) in self.radii.iter_mut().zip(&self.transforms) {
                *r = t.scale * COLLISION_RADIUS_FACTOR;
            }
            resolver::relax(&mut self.field, &self.displayed, &self.radii, &mut self.tweens);
        }

        for (i, transform) in self.transforms.iter().enumerate() {
            if sink.is_attached(i) {
                sink.write(i, transform);
            }
        }
    }

    /// Cancel the frame loop and every outstanding transition. Idempotent;
    /// subsequent `frame` calls are no-ops.
    pub fn teardown(&mut self) {
        if self.stopped {
            return;
        }
        self.tweens.cancel_all();
        self.stopped = true;
        log::info!("[field] teardown: transitions cancelled, frame loop stopped");
    }
}
