use crate::constants::MAX_PARTICLE_COUNT;
use thiserror::Error;

/// Configuration errors surfaced at construction time.
///
/// The frame path itself never fails: degenerate inputs degrade to a static
/// or less reactive field, never to an error value.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("particle count {0} out of range 1..={MAX_PARTICLE_COUNT}")]
    CountOutOfRange(usize),
    #[error("viewport must be finite and positive, got {width}x{height}")]
    BadViewport { width: f32, height: f32 },
}
