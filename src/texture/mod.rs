//! Texture module: procedural sprite bitmaps and GPU texture management.

mod procedural;
mod sampler;
mod texture2d;

pub use procedural::Bitmap;
pub use sampler::Sampler;
pub use texture2d::{Texture2D, TextureError};
