//! # Astra - WebGPU galaxy scenes for the festival site
//!
//! Astra renders the decorative real-time backgrounds of the festival's
//! promotional site: a slowly rotating star/nebula field shared by every
//! page, hoverable constellation shapes trailed by stardust on the home
//! page, and sponsor tokens circling elliptical orbits on the sponsors page.
//!
//! The crate is split into a pure simulation layer (particle pool, hover
//! easing, orbital motion, picking) that runs and tests natively, and a thin
//! wgpu layer that uploads instance data and draws. The `web` feature adds
//! wasm-bindgen bindings that mount a canvas into a DOM container, drive a
//! requestAnimationFrame loop and tear everything down on dispose.
//!
//! ## Example
//!
//! ```ignore
//! use astra::prelude::*;
//!
//! let context = Context::new(canvas, width, height, &RenderConfig::default()).await?;
//! let mut scene = Scene::new(context, SceneMode::Home, SceneConfig::default(), seed);
//!
//! // per frame:
//! scene.set_pointer(ndc_x, ndc_y);
//! scene.update(delta_seconds);
//! scene.render()?;
//! ```

#![warn(missing_docs)]

pub mod math;
pub mod core;
pub mod camera;
pub mod texture;
pub mod render;
pub mod field;
pub mod constellation;
pub mod stardust;
pub mod sponsors;
pub mod scene;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

// Re-export commonly used types
pub mod prelude {
    //! Convenient re-exports of commonly used types.

    pub use crate::math::*;
    pub use crate::core::*;
    pub use crate::camera::*;
    pub use crate::texture::*;
    pub use crate::field::*;
    pub use crate::constellation::*;
    pub use crate::stardust::*;
    pub use crate::sponsors::*;
    pub use crate::scene::*;
}

/// Initialize logging and panic reporting for WASM environments.
#[cfg(all(feature = "web", target_arch = "wasm32"))]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Warn);
}

/// Engine version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const NAME: &str = "Astra";
