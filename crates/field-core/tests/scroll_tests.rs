// Scroll rig tests: staged remap windows, monotonicity, zero-height and
// reduced-motion behavior.

use field_core::constants::*;
use field_core::scroll::{staged_progress, ScrollRig};

const DT: f32 = 1.0 / 60.0;

#[test]
fn staged_remap_first_window_is_linear() {
    // 0.09 sits in the middle of the first window: 0.09 / 0.18 * 0.32
    let staged = staged_progress(0.09);
    assert!((staged - 0.16).abs() < 1e-6, "got {staged}");
}

#[test]
fn staged_remap_covers_endpoints() {
    assert!(staged_progress(0.0).abs() < 1e-6);
    assert!((staged_progress(1.0) - 1.0).abs() < 1e-6);
}

#[test]
fn staged_remap_is_continuous_at_segment_joins() {
    let eps = 1e-3;
    let left_in = staged_progress(STAGE_IN_END - eps);
    let right_in = staged_progress(STAGE_IN_END + eps);
    assert!((left_in - right_in).abs() < 0.05, "{left_in} vs {right_in}");

    let left_out = staged_progress(STAGE_OUT_START - eps);
    let right_out = staged_progress(STAGE_OUT_START + eps);
    assert!(
        (left_out - right_out).abs() < 0.05,
        "{left_out} vs {right_out}"
    );
}

#[test]
fn staged_remap_is_monotonic() {
    let mut prev = staged_progress(0.0);
    for i in 1..=1000 {
        let next = staged_progress(i as f32 / 1000.0);
        assert!(next >= prev - 1e-6, "dip at {i}");
        prev = next;
    }
}

#[test]
fn progress_is_monotonic_under_monotonic_scroll() {
    let mut rig = ScrollRig::new(false);
    let height = 3000.0;
    let mut prev_eased = 0.0;
    let mut prev_raw = 0.0;
    for frame in 0..600 {
        let offset = height * frame as f32 / 600.0;
        let snap = rig.update(offset, height, DT);
        assert!(snap.raw >= prev_raw - 1e-6);
        assert!(snap.eased >= prev_eased - 1e-6);
        prev_raw = snap.raw;
        prev_eased = snap.eased;
    }
}

#[test]
fn zero_scrollable_height_pins_progress() {
    let mut rig = ScrollRig::new(false);
    for _ in 0..60 {
        let snap = rig.update(500.0, 0.0, DT);
        assert_eq!(snap.raw, 0.0);
        assert_eq!(snap.staged, 0.0);
        assert_eq!(snap.velocity, 0.0);
    }
}

#[test]
fn velocity_follows_scroll_direction_and_settles() {
    let mut rig = ScrollRig::new(false);
    let height = 1000.0;
    let mut snap = rig.update(0.0, height, DT);
    for frame in 1..120 {
        snap = rig.update(frame as f32 * 8.0, height, DT);
    }
    assert!(snap.velocity > 0.0, "scrolling down should read positive");

    // Hold still: the damped velocity must decay toward zero.
    for _ in 0..300 {
        snap = rig.update(952.0, height, DT);
    }
    assert!(snap.velocity.abs() < 1e-3, "residual {}", snap.velocity);
}

#[test]
fn depth_offset_tracks_eased_progress() {
    let mut rig = ScrollRig::new(false);
    let height = 1000.0;
    let mut snap = rig.update(0.0, height, DT);
    for _ in 0..600 {
        snap = rig.update(1000.0, height, DT);
    }
    // Fully scrolled: eased ~1, offset at the clamp ceiling.
    let expected = (snap.eased + DEPTH_OFFSET_LEAD).clamp(0.0, DEPTH_OFFSET_MAX) * DEPTH_SPAN;
    assert!((snap.depth_offset - expected).abs() < 1e-4);
    assert!(snap.depth_offset > DEPTH_SPAN * 0.9);
}

#[test]
fn reduced_motion_scales_raw_progress_directly() {
    let mut rig = ScrollRig::new(true);
    let height = 1000.0;
    let mut snap = rig.update(500.0, height, DT);
    for _ in 0..600 {
        snap = rig.update(500.0, height, DT);
    }
    let expected = snap.raw * REDUCED_MOTION_DEPTH_FRACTION * DEPTH_SPAN;
    assert!((snap.depth_offset - expected).abs() < 1e-4);
    assert!((snap.raw - 0.5).abs() < 1e-3);
}
