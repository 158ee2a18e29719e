pub mod assets;
pub mod constants;
pub mod engine;
pub mod error;
pub mod input;
pub mod kinematics;
pub mod particle;
pub mod ports;
pub mod resolver;
pub mod scroll;
pub mod tween;

pub use assets::{PreloadEvent, Preloader};
pub use engine::{FieldConfig, FieldEngine};
pub use error::FieldError;
pub use input::PointerSample;
pub use ports::{BillboardTransform, PointerSource, RenderSink, ScrollSource, TextureSource};
pub use scroll::{ScrollRig, ScrollSnapshot};
