//! Procedurally generated sprite bitmaps.
//!
//! Every particle in the scene samples one of four small white RGBA
//! bitmaps; tint and opacity are applied per instance at draw time. The
//! generators mirror the canvas radial gradients the site originally drew.

/// A CPU-side RGBA8 image.
#[derive(Debug, Clone)]
pub struct Bitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Tightly packed RGBA8 pixels, row-major.
    pub data: Vec<u8>,
}

impl Bitmap {
    /// Create a bitmap filled with transparent white.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width * height * 4) as usize],
        }
    }

    /// Alpha of the pixel at (x, y).
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.data[((y * self.width + x) * 4 + 3) as usize]
    }

    fn fill_radial<F>(size: u32, falloff: F) -> Self
    where
        F: Fn(f32, f32) -> f32,
    {
        let mut bitmap = Self::new(size, size);
        let half = size as f32 * 0.5;
        for y in 0..size {
            for x in 0..size {
                // Pixel-center distance from the bitmap center, 0..~1.4
                let dx = (x as f32 + 0.5 - half) / half;
                let dy = (y as f32 + 0.5 - half) / half;
                let alpha = falloff(dx, dy).clamp(0.0, 1.0);
                let i = ((y * size + x) * 4) as usize;
                bitmap.data[i] = 255;
                bitmap.data[i + 1] = 255;
                bitmap.data[i + 2] = 255;
                bitmap.data[i + 3] = (alpha * 255.0) as u8;
            }
        }
        bitmap
    }

    /// A hard dot with a short feathered rim, used for constellation stars.
    pub fn radial_dot(size: u32) -> Self {
        Self::fill_radial(size, |dx, dy| {
            let r = (dx * dx + dy * dy).sqrt();
            if r <= 0.5 {
                1.0
            } else {
                1.0 - (r - 0.5) / 0.5
            }
        })
    }

    /// A soft radial glow with a bright core, the background star sprite.
    pub fn glow(size: u32) -> Self {
        Self::fill_radial(size, |dx, dy| {
            let r = (dx * dx + dy * dy).sqrt().min(1.0);
            (1.0 - r) * (1.0 - r)
        })
    }

    /// A glow with horizontal and vertical flare streaks, for stardust.
    pub fn sparkle(size: u32) -> Self {
        Self::fill_radial(size, |dx, dy| {
            let r = (dx * dx + dy * dy).sqrt().min(1.0);
            let core = (1.0 - r) * (1.0 - r);
            let flare_h = (1.0 - dy.abs() * 6.0).max(0.0) * (1.0 - dx.abs()).max(0.0);
            let flare_v = (1.0 - dx.abs() * 6.0).max(0.0) * (1.0 - dy.abs()).max(0.0);
            core.max(flare_h * 0.8).max(flare_v * 0.8)
        })
    }

    /// A very soft gaussian-like blob, the nebula puff sprite.
    pub fn puff(size: u32) -> Self {
        Self::fill_radial(size, |dx, dy| {
            let r_sq = dx * dx + dy * dy;
            (-r_sq * 4.0).exp()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let b = Bitmap::glow(64);
        assert_eq!(b.width, 64);
        assert_eq!(b.height, 64);
        assert_eq!(b.data.len(), 64 * 64 * 4);
    }

    #[test]
    fn test_center_bright_corner_dark() {
        for bitmap in [
            Bitmap::radial_dot(64),
            Bitmap::glow(64),
            Bitmap::sparkle(64),
            Bitmap::puff(64),
        ] {
            let center = bitmap.alpha_at(32, 32);
            let corner = bitmap.alpha_at(0, 0);
            assert!(center > 200, "center alpha {center}");
            assert!(corner < 30, "corner alpha {corner}");
        }
    }

    #[test]
    fn test_glow_fades_outward() {
        let b = Bitmap::glow(64);
        let mut last = 255;
        for x in 32..64 {
            let a = b.alpha_at(x, 32);
            assert!(a <= last);
            last = a;
        }
    }

    #[test]
    fn test_sparkle_has_flares() {
        let b = Bitmap::sparkle(64);
        // On-axis pixels stay brighter than diagonal ones at equal radius.
        let on_axis = b.alpha_at(52, 32);
        let diagonal = b.alpha_at(46, 46);
        assert!(on_axis > diagonal);
    }
}
