//! External collaborator seams. The simulation core reads scroll and
//! pointer state through these traits and writes transforms back out, so it
//! runs headlessly under test with synthetic implementations.

use crate::input::PointerSample;
use glam::Vec3;

/// Computed display state for one billboard, written once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BillboardTransform {
    pub position: Vec3,
    pub scale: f32,
    /// Incremental rotation for this frame (radians).
    pub rotation_delta: f32,
    pub opacity: f32,
}

/// Scroll container: polled once per frame.
pub trait ScrollSource {
    fn offset(&self) -> f32;
    fn scrollable_height(&self) -> f32;
}

/// Pointer/touch source: holds the last known sample, updated between
/// frames; the core reads it once per frame.
pub trait PointerSource {
    fn sample(&self) -> PointerSample;
}

/// Rendering engine seam. The core is the sole writer per frame; an
/// unattached index (asset still loading) is skipped without error and
/// retried implicitly next frame.
pub trait RenderSink {
    fn is_attached(&self, index: usize) -> bool;
    fn write(&mut self, index: usize, transform: &BillboardTransform);
}

/// Asset loader seam: aggregate texture load progress in [0, 100], a
/// fully-loaded signal, and a release hook for the shared texture set.
pub trait TextureSource {
    fn progress(&self) -> f32;
    fn ready(&self) -> bool;
    fn release(&mut self);
}
