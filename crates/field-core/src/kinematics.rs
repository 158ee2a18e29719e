//! Per-particle, per-frame math: depth cycling, orbit and oscillation
//! displacement, pointer repulsion, and scale/opacity shaping.

use crate::constants::*;
use crate::particle::{Orbit, Oscillation};
use glam::{Vec2, Vec3};

/// Fold `depth + offset` back into the closed interval
/// [DEPTH_FAR, DEPTH_NEAR]. The depth axis is a ring, so arbitrarily large
/// accumulated offsets still land inside.
#[inline]
pub fn wrap_depth(depth: f32, offset: f32) -> f32 {
    DEPTH_FAR + (depth + offset - DEPTH_FAR).rem_euclid(DEPTH_SPAN)
}

/// Normalized nearness of a wrapped depth: 0 farthest, 1 nearest.
#[inline]
pub fn depth_factor(wrapped: f32) -> f32 {
    ((wrapped - DEPTH_FAR) / DEPTH_SPAN).clamp(0.0, 1.0)
}

/// Secondary orbit displacement. Background particles keep only a fraction
/// of their nominal radius; a slow swirl drift couples the whole field to
/// scroll depth.
#[inline]
pub fn orbit_vector(orbit: &Orbit, time: f32, depth_offset: f32, depth_factor: f32) -> Vec3 {
    let angle = time * orbit.speed + depth_offset * SWIRL_DRIFT_RATE + orbit.phase;
    let radius = orbit.radius * (ORBIT_BACK_SHRINK + (1.0 - ORBIT_BACK_SHRINK) * depth_factor);
    Vec3::new(
        angle.cos() * radius,
        angle.sin() * radius * orbit.tilt,
        0.0,
    )
}

/// Quasi-periodic wander: a fast sine/cosine term plus a slow shared drift.
#[inline]
pub fn oscillation_vector(osc: &Oscillation, time: f32) -> Vec2 {
    Vec2::new(
        osc.amp.x * (time * osc.speed.x + osc.phase.x).sin()
            + osc.drift.x * (time * DRIFT_SPEED + osc.phase.x).sin(),
        osc.amp.y * (time * osc.speed.y + osc.phase.y).cos()
            + osc.drift.y * (time * DRIFT_SPEED + osc.phase.y).cos(),
    )
}

/// Repulsion impulse away from the projected pointer, or `None` outside the
/// repel radius. Magnitude falls off quadratically, reaching zero exactly at
/// the radius; a pointer sitting on the particle pushes at full configured
/// strength along a fixed axis.
#[inline]
pub fn repel_impulse(candidate: Vec2, pointer: Vec2, motion_boost: f32) -> Option<Vec2> {
    let delta = candidate - pointer;
    let dist_sq = delta.length_squared();
    if dist_sq >= REPEL_RADIUS * REPEL_RADIUS {
        return None;
    }
    let dist = dist_sq.sqrt();
    let falloff = (1.0 - dist / REPEL_RADIUS).powi(2);
    let magnitude = (REPEL_STRENGTH + motion_boost) * falloff;
    let dir = if dist > 1e-5 { delta / dist } else { Vec2::X };
    Some(dir * magnitude)
}

/// Combined motion boost from pointer speed and scroll velocity, clamped.
#[inline]
pub fn motion_boost(pointer_speed: f32, scroll_velocity: f32) -> f32 {
    (MOTION_BOOST_POINTER * pointer_speed + MOTION_BOOST_SCROLL * scroll_velocity.abs())
        .min(MOTION_BOOST_MAX)
}

/// Reverse depth-of-field perspective: far particles render larger, near
/// particles shrink as they pass the camera plane before wrapping back.
#[inline]
pub fn perspective_scale(depth_factor: f32) -> f32 {
    PERSPECTIVE_FAR + (PERSPECTIVE_NEAR - PERSPECTIVE_FAR) * depth_factor
}

#[inline]
pub fn twinkle(time: f32, phase: f32) -> f32 {
    1.0 + TWINKLE_AMP * (time * TWINKLE_SPEED + phase).sin()
}

/// Scroll-velocity scale boost, clamped so fast flings stay bounded.
#[inline]
pub fn velocity_boost(scroll_velocity: f32) -> f32 {
    1.0 + (VEL_BOOST_COEFF * scroll_velocity.abs()).min(VEL_BOOST_MAX)
}

/// Opacity from nearness, scroll velocity, and the transient glow flash.
#[inline]
pub fn opacity_for(depth_factor: f32, scroll_velocity: f32, glow: f32) -> f32 {
    (OPACITY_FLOOR
        + OPACITY_DEPTH_SPAN * depth_factor
        + OPACITY_VEL_COEFF * scroll_velocity.abs().min(1.0)
        + glow)
        .clamp(0.0, 1.0)
}

/// Small vertical tilt proportional to depth, so rows of particles read as
/// a plane receding into the page rather than a flat sheet.
#[inline]
pub fn depth_tilt(depth_factor: f32) -> f32 {
    FIELD_TILT * (0.5 - depth_factor)
}

/// Recycle a rest position across the oversized neighbor bound. Returns
/// true when a wrap occurred. This is a topology wrap at the invisible
/// edge, not a correction, so it bypasses the tween path.
#[inline]
pub fn wrap_rest_xy(rest: &mut Vec3, bound: Vec2) -> bool {
    let mut wrapped = false;
    if rest.x > bound.x {
        rest.x -= 2.0 * bound.x;
        wrapped = true;
    } else if rest.x < -bound.x {
        rest.x += 2.0 * bound.x;
        wrapped = true;
    }
    if rest.y > bound.y {
        rest.y -= 2.0 * bound.y;
        wrapped = true;
    } else if rest.y < -bound.y {
        rest.y += 2.0 * bound.y;
        wrapped = true;
    }
    wrapped
}
