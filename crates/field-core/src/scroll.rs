//! Scroll rig: raw scroll offset -> damped, staged, eased progress plus a
//! signed velocity estimate and the depth offset that cycles the field.

use crate::constants::*;
use crate::tween::{ease, Ease};

/// Per-frame scroll state. Recomputed every frame from the damped spring;
/// never persisted beyond the frame that reads it.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollSnapshot {
    /// Linear scroll fraction in [0, 1].
    pub raw: f32,
    /// Three-segment windowed remap of `raw`.
    pub staged: f32,
    /// Quintic-eased blend of `staged` (60% eased, 40% raw-staged).
    pub eased: f32,
    /// Signed, damped velocity in progress units per second.
    pub velocity: f32,
    /// World-unit depth offset applied to every particle's depth this frame.
    pub depth_offset: f32,
}

/// Damped spring chasing the latest raw scroll sample.
pub struct ScrollRig {
    damped: f32,
    velocity: f32,
    reduced_motion: bool,
    initialized: bool,
}

impl ScrollRig {
    pub fn new(reduced_motion: bool) -> Self {
        Self {
            damped: 0.0,
            velocity: 0.0,
            reduced_motion,
            initialized: false,
        }
    }

    /// Advance the spring toward `offset` and derive this frame's snapshot.
    /// `scrollable_height <= 0` pins progress to 0.
    pub fn update(&mut self, offset: f32, scrollable_height: f32, dt: f32) -> ScrollSnapshot {
        if !self.initialized {
            self.damped = offset;
            self.initialized = true;
        }
        let rate = if self.reduced_motion {
            SCROLL_SPRING_RATE_REDUCED
        } else {
            SCROLL_SPRING_RATE
        };
        let prev = self.damped;
        let alpha = 1.0 - (-dt * rate).exp();
        self.damped += (offset - self.damped) * alpha;

        let (raw, instant_vel) = if scrollable_height > 0.0 {
            let raw = (self.damped / scrollable_height).clamp(0.0, 1.0);
            let v = if dt > 0.0 {
                (self.damped - prev) / dt / scrollable_height
            } else {
                0.0
            };
            (raw, v)
        } else {
            (0.0, 0.0)
        };
        let vel_alpha = 1.0 - (-dt * SCROLL_VELOCITY_RATE).exp();
        self.velocity += (instant_vel - self.velocity) * vel_alpha;

        let staged = staged_progress(raw);
        let eased = STAGE_EASE_BLEND * ease(Ease::InOutQuint, staged)
            + (1.0 - STAGE_EASE_BLEND) * staged;

        // Reduced motion skips the staged coupling and scales a fraction of
        // raw progress into depth directly.
        let depth_offset = if self.reduced_motion {
            raw * REDUCED_MOTION_DEPTH_FRACTION * DEPTH_SPAN
        } else {
            (eased + DEPTH_OFFSET_LEAD).clamp(0.0, DEPTH_OFFSET_MAX) * DEPTH_SPAN
        };

        ScrollSnapshot {
            raw,
            staged,
            eased,
            velocity: self.velocity,
            depth_offset,
        }
    }
}

/// Three-segment piecewise remap of linear scroll progress.
///
/// The first 18% of scroll compresses into the first 32% of staged progress,
/// the last 16% expands from 72% to 100% with a cubic ease-out, and the
/// middle maps linearly between. Front-loads visible motion early and lets
/// it settle near the page end.
#[inline]
pub fn staged_progress(raw: f32) -> f32 {
    let raw = raw.clamp(0.0, 1.0);
    if raw < STAGE_IN_END {
        raw / STAGE_IN_END * STAGE_IN_MAPPED
    } else if raw > STAGE_OUT_START {
        let t = (raw - STAGE_OUT_START) / (1.0 - STAGE_OUT_START);
        STAGE_OUT_MAPPED + (1.0 - STAGE_OUT_MAPPED) * ease(Ease::OutCubic, t)
    } else {
        let t = (raw - STAGE_IN_END) / (STAGE_OUT_START - STAGE_IN_END);
        STAGE_IN_MAPPED + (STAGE_OUT_MAPPED - STAGE_IN_MAPPED) * t
    }
}
