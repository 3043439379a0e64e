//! # Core Module
//!
//! wgpu context management, the frame/render-pass plumbing, and timing.

mod context;
mod renderer;
mod clock;

pub use context::{Context, ContextError};
pub use renderer::{Frame, RenderInfo, Renderer};
pub use clock::Clock;

/// Render configuration options.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Composite the canvas with the page behind it.
    pub alpha: bool,
    /// Power preference for GPU selection.
    pub power_preference: wgpu::PowerPreference,
    /// Present mode (vsync).
    pub present_mode: wgpu::PresentMode,
    /// Clear color. Transparent by default so the page background shows
    /// through between the stars.
    pub clear_color: wgpu::Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            alpha: true,
            power_preference: wgpu::PowerPreference::HighPerformance,
            present_mode: wgpu::PresentMode::AutoVsync,
            clear_color: wgpu::Color::TRANSPARENT,
        }
    }
}
