//! Preloader facade over the asset-loader seam.
//!
//! Surfaces aggregate progress and the fully-loaded signal upward to a
//! page-level preloader, each ready event exactly once, and guarantees the
//! shared texture set is released exactly once on teardown.

use crate::ports::TextureSource;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PreloadEvent {
    /// Aggregate progress changed (0-100).
    Progress(f32),
    /// Fired once when the texture set becomes fully loaded.
    Ready,
}

#[derive(Default)]
pub struct Preloader {
    last_progress: f32,
    ready_seen: bool,
    released: bool,
}

impl Preloader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.ready_seen
    }

    /// Poll the loader. Returns an event when progress moved or the ready
    /// signal fired; `Ready` wins over a simultaneous progress change.
    pub fn poll(&mut self, source: &dyn TextureSource) -> Option<PreloadEvent> {
        if !self.ready_seen && source.ready() {
            self.ready_seen = true;
            self.last_progress = 100.0;
            log::info!("[assets] texture set fully loaded");
            return Some(PreloadEvent::Ready);
        }
        let progress = source.progress().clamp(0.0, 100.0);
        if progress != self.last_progress && !self.ready_seen {
            self.last_progress = progress;
            return Some(PreloadEvent::Progress(progress));
        }
        None
    }

    /// Release the shared texture set. Safe to call repeatedly; only the
    /// first call reaches the loader.
    pub fn release(&mut self, source: &mut dyn TextureSource) {
        if !self.released {
            self.released = true;
            source.release();
            log::info!("[assets] released shared textures");
        }
    }
}
