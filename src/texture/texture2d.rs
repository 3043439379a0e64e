//! 2D texture implementation.

use super::Bitmap;
use thiserror::Error;
use wgpu::util::DeviceExt;

/// Errors from texture creation.
#[derive(Error, Debug)]
pub enum TextureError {
    /// The image bytes could not be decoded.
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// A 2D texture.
pub struct Texture2D {
    width: u32,
    height: u32,
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl Texture2D {
    /// Create a new texture from RGBA8 data.
    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[u8],
        width: u32,
        height: u32,
        label: Option<&str>,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        // create_texture_with_data handles row alignment
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label,
                size,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            data,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            width,
            height,
            texture,
            view,
        }
    }

    /// Upload a CPU-side bitmap.
    pub fn from_bitmap(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bitmap: &Bitmap,
        label: Option<&str>,
    ) -> Self {
        Self::from_rgba8(device, queue, &bitmap.data, bitmap.width, bitmap.height, label)
    }

    /// Create a texture from encoded image bytes (PNG, JPEG).
    pub fn from_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[u8],
        label: Option<&str>,
    ) -> Result<Self, TextureError> {
        use image::GenericImageView;

        let img = image::load_from_memory(data)?;
        let (width, height) = img.dimensions();
        let rgba = img.to_rgba8();

        Ok(Self::from_rgba8(device, queue, rgba.as_raw(), width, height, label))
    }

    /// A 1x1 white texture, the placeholder when an image fails to load.
    pub fn white(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self::from_rgba8(device, queue, &[255, 255, 255, 255], 1, 1, Some("White Placeholder"))
    }

    /// Get texture width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get texture height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the texture view.
    #[inline]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Get the underlying wgpu texture.
    #[inline]
    pub fn wgpu_texture(&self) -> &wgpu::Texture {
        &self.texture
    }
}
