//! Headless native driver: runs the field engine against synthetic scroll
//! and pointer scripts and logs what the render adapter produced. Useful
//! for profiling the frame path and for eyeballing tuning changes without
//! a browser viewport.

use field_core::{
    BillboardTransform, FieldConfig, FieldEngine, PointerSample, PointerSource, Preloader,
    RenderSink, ScrollSource, TextureSource,
};
use glam::Vec2;
use instant::Instant;

const FRAMES: u32 = 600;
const DT: f32 = 1.0 / 60.0;
const PAGE_HEIGHT: f32 = 4200.0;

/// Scripted scroll container: sweeps the page top-to-bottom over the run.
struct ScriptedScroll {
    offset: f32,
}

impl ScrollSource for ScriptedScroll {
    fn offset(&self) -> f32 {
        self.offset
    }
    fn scrollable_height(&self) -> f32 {
        PAGE_HEIGHT
    }
}

/// Scripted pointer: circles the middle of the viewport, lifting partway
/// through to exercise the inactive path.
struct ScriptedPointer {
    sample: PointerSample,
}

impl PointerSource for ScriptedPointer {
    fn sample(&self) -> PointerSample {
        self.sample
    }
}

/// Collecting sink standing in for the rendering engine.
#[derive(Default)]
struct CollectingSink {
    writes: u64,
    last: Vec<BillboardTransform>,
}

impl RenderSink for CollectingSink {
    fn is_attached(&self, _index: usize) -> bool {
        true
    }
    fn write(&mut self, index: usize, transform: &BillboardTransform) {
        if index < self.last.len() {
            self.last[index] = *transform;
        }
        self.writes += 1;
    }
}

/// Instantly-ready texture source with a release counter.
#[derive(Default)]
struct StubTextures {
    released: u32,
}

impl TextureSource for StubTextures {
    fn progress(&self) -> f32 {
        100.0
    }
    fn ready(&self) -> bool {
        true
    }
    fn release(&mut self) {
        self.released += 1;
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = FieldConfig::default();
    let count = config.particle_count;
    let mut engine = FieldEngine::new(config)?;

    let mut textures = StubTextures::default();
    let mut preloader = Preloader::new();
    if let Some(event) = preloader.poll(&textures) {
        log::info!("[native] preload event: {event:?}");
    }

    let mut scroll = ScriptedScroll { offset: 0.0 };
    let mut pointer = ScriptedPointer {
        sample: PointerSample::default(),
    };
    let mut sink = CollectingSink {
        writes: 0,
        last: vec![BillboardTransform::default(); count],
    };

    let started = Instant::now();
    for frame in 0..FRAMES {
        let t = frame as f32 * DT;
        // Ease the scroll target down the page, then hold.
        let sweep = (t / 8.0).clamp(0.0, 1.0);
        scroll.offset = PAGE_HEIGHT * sweep * sweep * (3.0 - 2.0 * sweep);
        // Circle the pointer for the first half of the run.
        pointer.sample = if frame < FRAMES / 2 {
            PointerSample {
                ndc: Vec2::new((t * 1.3).cos() * 0.4, (t * 1.3).sin() * 0.4),
                active: true,
            }
        } else {
            PointerSample::default()
        };

        engine.frame(&scroll, &pointer, &mut sink, DT);

        if frame % 120 == 0 {
            let (mut min_z, mut max_z, mut opacity_sum) = (f32::MAX, f32::MIN, 0.0f32);
            for tf in &sink.last {
                min_z = min_z.min(tf.position.z);
                max_z = max_z.max(tf.position.z);
                opacity_sum += tf.opacity;
            }
            log::info!(
                "[native] frame {frame}: depth [{min_z:.1}, {max_z:.1}] avg opacity {:.2} tweens {}",
                opacity_sum / sink.last.len() as f32,
                engine.active_tweens()
            );
        }
    }
    let elapsed = started.elapsed().as_secs_f64();
    log::info!(
        "[native] simulated {FRAMES} frames x {} particles in {elapsed:.3}s ({:.0} fps)",
        engine.particle_count(),
        FRAMES as f64 / elapsed
    );
    log::info!("[native] render writes: {}", sink.writes);

    engine.teardown();
    preloader.release(&mut textures);
    preloader.release(&mut textures); // idempotent
    anyhow::ensure!(textures.released == 1, "texture set must release exactly once");
    Ok(())
}
