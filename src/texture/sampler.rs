//! Texture sampler configuration.

/// A GPU texture sampler.
pub struct Sampler {
    sampler: wgpu::Sampler,
}

impl Sampler {
    /// Linear filtering with clamp-to-edge wrapping. Sprite bitmaps fade to
    /// transparent at their rim, so clamping keeps edges clean.
    pub fn linear_clamp(device: &wgpu::Device) -> Self {
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Sprite Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self { sampler }
    }

    /// Get the underlying wgpu sampler.
    #[inline]
    pub fn wgpu_sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }
}
