// Whole-engine tests driven through the injected ports: frame ordering
// output, depth invariants, repulsion gating, resize and teardown
// lifecycle, and the asset preloader.

use field_core::constants::*;
use field_core::{
    BillboardTransform, FieldConfig, FieldEngine, PointerSample, PointerSource, PreloadEvent,
    Preloader, RenderSink, ScrollSource, TextureSource,
};
use glam::Vec2;

const DT: f32 = 1.0 / 60.0;

struct FixedScroll {
    offset: f32,
    height: f32,
}

impl ScrollSource for FixedScroll {
    fn offset(&self) -> f32 {
        self.offset
    }
    fn scrollable_height(&self) -> f32 {
        self.height
    }
}

struct FixedPointer(PointerSample);

impl PointerSource for FixedPointer {
    fn sample(&self) -> PointerSample {
        self.0
    }
}

struct CollectSink {
    attach_even_only: bool,
    writes: usize,
    last: Vec<Option<BillboardTransform>>,
}

impl CollectSink {
    fn new(count: usize) -> Self {
        Self {
            attach_even_only: false,
            writes: 0,
            last: vec![None; count],
        }
    }
}

impl RenderSink for CollectSink {
    fn is_attached(&self, index: usize) -> bool {
        !self.attach_even_only || index % 2 == 0
    }
    fn write(&mut self, index: usize, transform: &BillboardTransform) {
        self.writes += 1;
        if index < self.last.len() {
            self.last[index] = Some(*transform);
        }
    }
}

fn small_config() -> FieldConfig {
    FieldConfig {
        particle_count: 64,
        ..FieldConfig::default()
    }
}

fn idle_inputs() -> (FixedScroll, FixedPointer) {
    (
        FixedScroll {
            offset: 0.0,
            height: 3000.0,
        },
        FixedPointer(PointerSample::default()),
    )
}

#[test]
fn frame_writes_one_transform_per_attached_particle() {
    let mut engine = FieldEngine::new(small_config()).unwrap();
    let (scroll, pointer) = idle_inputs();
    let mut sink = CollectSink::new(engine.particle_count());
    engine.frame(&scroll, &pointer, &mut sink, DT);
    assert_eq!(sink.writes, engine.particle_count());
    for tf in sink.last.iter().flatten() {
        assert!(tf.scale > 0.0);
        assert!((0.0..=1.0).contains(&tf.opacity));
    }
}

#[test]
fn detached_handles_are_skipped_without_error() {
    let mut engine = FieldEngine::new(small_config()).unwrap();
    let (scroll, pointer) = idle_inputs();
    let mut sink = CollectSink::new(engine.particle_count());
    sink.attach_even_only = true;
    engine.frame(&scroll, &pointer, &mut sink, DT);
    assert_eq!(sink.writes, engine.particle_count() / 2);
    // Self-healing: attaching later starts receiving writes again.
    sink.attach_even_only = false;
    engine.frame(&scroll, &pointer, &mut sink, DT);
    assert_eq!(sink.writes, engine.particle_count() / 2 + engine.particle_count());
}

#[test]
fn displayed_depth_stays_inside_the_interval_while_scrolling() {
    let mut engine = FieldEngine::new(small_config()).unwrap();
    let pointer = FixedPointer(PointerSample::default());
    let mut sink = CollectSink::new(engine.particle_count());
    for frame in 0..400 {
        let scroll = FixedScroll {
            offset: frame as f32 * 40.0,
            height: 3000.0,
        };
        engine.frame(&scroll, &pointer, &mut sink, DT);
        for tf in sink.last.iter().flatten() {
            assert!(
                tf.position.z >= DEPTH_FAR - 1e-3 && tf.position.z <= DEPTH_NEAR + 1e-3,
                "frame {frame}: z = {}",
                tf.position.z
            );
        }
    }
}

#[test]
fn inactive_pointer_contributes_no_displacement() {
    // Two engines with identical seeds and an inactive pointer must agree
    // exactly; turning the pointer on in one of them must not.
    let (scroll, idle_pointer) = idle_inputs();

    let mut a = FieldEngine::new(small_config()).unwrap();
    let mut b = FieldEngine::new(small_config()).unwrap();
    let mut sink_a = CollectSink::new(a.particle_count());
    let mut sink_b = CollectSink::new(b.particle_count());
    for _ in 0..10 {
        a.frame(&scroll, &idle_pointer, &mut sink_a, DT);
        b.frame(&scroll, &idle_pointer, &mut sink_b, DT);
    }
    assert_eq!(sink_a.last, sink_b.last);

    let active = FixedPointer(PointerSample {
        ndc: Vec2::ZERO,
        active: true,
    });
    let mut c = FieldEngine::new(small_config()).unwrap();
    let mut sink_c = CollectSink::new(c.particle_count());
    for _ in 0..10 {
        c.frame(&scroll, &active, &mut sink_c, DT);
    }
    assert_ne!(sink_a.last, sink_c.last, "active pointer must repel");
}

#[test]
fn active_pointer_starts_eased_rest_shifts() {
    let mut engine = FieldEngine::new(small_config()).unwrap();
    let (scroll, _) = idle_inputs();
    let pointer = FixedPointer(PointerSample {
        ndc: Vec2::ZERO,
        active: true,
    });
    let mut sink = CollectSink::new(engine.particle_count());
    engine.frame(&scroll, &pointer, &mut sink, DT);
    assert!(engine.active_tweens() > 0, "expected rest-shift transitions");
    assert_eq!(engine.transforms().len(), engine.particle_count());
}

#[test]
fn resize_reseeds_and_abandons_transitions() {
    let mut engine = FieldEngine::new(small_config()).unwrap();
    let (scroll, _) = idle_inputs();
    let pointer = FixedPointer(PointerSample {
        ndc: Vec2::ZERO,
        active: true,
    });
    let mut sink = CollectSink::new(engine.particle_count());
    engine.frame(&scroll, &pointer, &mut sink, DT);
    assert!(engine.active_tweens() > 0);

    engine.resize(800.0, 600.0);
    assert_eq!(engine.active_tweens(), 0);
    assert_eq!(engine.particle_count(), 64);

    // The engine keeps running against the new layout.
    let (scroll, idle) = idle_inputs();
    engine.frame(&scroll, &idle, &mut sink, DT);
}

#[test]
fn bogus_resize_is_ignored() {
    let mut engine = FieldEngine::new(small_config()).unwrap();
    let before: Vec<_> = engine.field().particles.iter().map(|p| p.rest).collect();
    engine.resize(f32::NAN, 600.0);
    engine.resize(-10.0, 600.0);
    let after: Vec<_> = engine.field().particles.iter().map(|p| p.rest).collect();
    assert_eq!(before, after);
}

#[test]
fn teardown_stops_the_frame_loop_and_is_idempotent() {
    let mut engine = FieldEngine::new(small_config()).unwrap();
    let (scroll, pointer) = idle_inputs();
    let mut sink = CollectSink::new(engine.particle_count());
    engine.frame(&scroll, &pointer, &mut sink, DT);
    let writes_before = sink.writes;

    engine.teardown();
    engine.teardown();
    assert!(engine.is_stopped());
    assert_eq!(engine.active_tweens(), 0);

    engine.frame(&scroll, &pointer, &mut sink, DT);
    assert_eq!(sink.writes, writes_before, "frames after teardown must no-op");
}

#[test]
fn config_validation_rejects_bad_inputs() {
    let zero = FieldConfig {
        particle_count: 0,
        ..FieldConfig::default()
    };
    assert!(FieldEngine::new(zero).is_err());

    let too_many = FieldConfig {
        particle_count: MAX_PARTICLE_COUNT + 1,
        ..FieldConfig::default()
    };
    assert!(FieldEngine::new(too_many).is_err());

    let bad_viewport = FieldConfig {
        viewport_width: f32::NAN,
        ..FieldConfig::default()
    };
    assert!(FieldEngine::new(bad_viewport).is_err());
}

// ---------------- Preloader ----------------

struct FakeTextures {
    progress: f32,
    ready: bool,
    released: u32,
}

impl TextureSource for FakeTextures {
    fn progress(&self) -> f32 {
        self.progress
    }
    fn ready(&self) -> bool {
        self.ready
    }
    fn release(&mut self) {
        self.released += 1;
    }
}

#[test]
fn preloader_surfaces_progress_then_ready_exactly_once() {
    let mut src = FakeTextures {
        progress: 0.0,
        ready: false,
        released: 0,
    };
    let mut preloader = Preloader::new();

    assert_eq!(preloader.poll(&src), None);
    src.progress = 40.0;
    assert_eq!(preloader.poll(&src), Some(PreloadEvent::Progress(40.0)));
    assert_eq!(preloader.poll(&src), None);

    src.progress = 100.0;
    src.ready = true;
    assert_eq!(preloader.poll(&src), Some(PreloadEvent::Ready));
    assert!(preloader.is_ready());
    assert_eq!(preloader.poll(&src), None, "ready fires once");
}

#[test]
fn preloader_releases_the_texture_set_exactly_once() {
    let mut src = FakeTextures {
        progress: 100.0,
        ready: true,
        released: 0,
    };
    let mut preloader = Preloader::new();
    preloader.release(&mut src);
    preloader.release(&mut src);
    assert_eq!(src.released, 1);
}
