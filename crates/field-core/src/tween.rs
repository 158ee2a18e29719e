//! Cancellable eased transitions keyed by (particle index, channel).
//!
//! Rest-position corrections must never teleport a particle, so every
//! correction flows through a time-bounded transition here. Retriggering a
//! key overwrites the in-flight transition instead of queueing behind it,
//! which bounds the backlog and lets teardown cancel everything in one call.

use fnv::FnvHashMap;
use glam::Vec3;

/// Animated property of one particle. One transition may be live per
/// (particle, channel) pair at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Rest-position shift (repulsion displacement, overlap nudge).
    Rest,
    /// Transient scale punch, decaying back to zero.
    ScalePunch,
    /// Transient glow-opacity flash, decaying back to zero.
    Glow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TweenKey {
    pub index: u32,
    pub channel: Channel,
}

#[derive(Clone, Copy, Debug)]
pub enum Ease {
    Linear,
    OutCubic,
    OutQuint,
    InOutQuint,
}

/// Evaluate an easing curve at `t` in [0, 1].
#[inline]
pub fn ease(curve: Ease, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match curve {
        Ease::Linear => t,
        Ease::OutCubic => 1.0 - (1.0 - t).powi(3),
        Ease::OutQuint => 1.0 - (1.0 - t).powi(5),
        Ease::InOutQuint => {
            if t < 0.5 {
                16.0 * t.powi(5)
            } else {
                1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct ActiveTween {
    from: Vec3,
    to: Vec3,
    elapsed: f32,
    duration: f32,
    curve: Ease,
}

/// Table of in-flight transitions. Scalar channels store their value in `x`.
#[derive(Default)]
pub struct Tweens {
    active: FnvHashMap<TweenKey, ActiveTween>,
}

impl Tweens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Start (or retrigger) a transition. An existing transition under the
    /// same key is overwritten, not queued.
    pub fn start(&mut self, key: TweenKey, from: Vec3, to: Vec3, duration: f32, curve: Ease) {
        self.active.insert(
            key,
            ActiveTween {
                from,
                to,
                elapsed: 0.0,
                duration: duration.max(1e-4),
                curve,
            },
        );
    }

    /// Scalar convenience for punch/glow channels.
    pub fn start_scalar(&mut self, key: TweenKey, from: f32, to: f32, duration: f32, curve: Ease) {
        self.start(key, Vec3::new(from, 0.0, 0.0), Vec3::new(to, 0.0, 0.0), duration, curve);
    }

    /// Advance every transition by `dt`, handing the current value of each to
    /// `apply`. Finished transitions deliver their exact target, then drop.
    pub fn step(&mut self, dt: f32, mut apply: impl FnMut(TweenKey, Vec3)) {
        self.active.retain(|key, tw| {
            tw.elapsed += dt;
            let t = (tw.elapsed / tw.duration).min(1.0);
            apply(*key, tw.from.lerp(tw.to, ease(tw.curve, t)));
            tw.elapsed < tw.duration
        });
    }

    pub fn contains(&self, key: TweenKey) -> bool {
        self.active.contains_key(&key)
    }

    pub fn cancel(&mut self, key: TweenKey) {
        self.active.remove(&key);
    }

    /// Drop every in-flight transition (teardown, resize).
    pub fn cancel_all(&mut self) {
        self.active.clear();
    }
}
