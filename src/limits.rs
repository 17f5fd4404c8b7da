//! Resource limits applied to a TGA header before the pixel buffer is allocated.

use crate::error::TgaError;
use crate::pixel::PixelDepth;

/// Resource limits for decode operations.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size in bytes of the decoded raster (width * height * depth).
    pub max_memory_bytes: Option<u64>,
}

fn exceeded(what: &str, value: u64, limit: u64) -> TgaError {
    TgaError::LimitExceeded(format!("{what} {value} exceeds limit {limit}"))
}

impl Limits {
    /// Check a validated header's geometry: each axis, the pixel count, and
    /// the raster buffer a decode would allocate for `depth`.
    pub(crate) fn check_image(
        &self,
        width: u32,
        height: u32,
        depth: PixelDepth,
    ) -> Result<(), TgaError> {
        let (w, h) = (u64::from(width), u64::from(height));
        let pixels = w * h;
        let bytes = pixels.saturating_mul(depth.bytes_per_pixel() as u64);
        let checks = [
            ("width", w, self.max_width),
            ("height", h, self.max_height),
            ("pixel count", pixels, self.max_pixels),
            ("raster bytes", bytes, self.max_memory_bytes),
        ];
        for (what, value, limit) in checks {
            if let Some(limit) = limit.filter(|&limit| value > limit) {
                return Err(exceeded(what, value, limit));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unlimited() {
        let limits = Limits::default();
        assert!(limits.check_image(u32::MAX, u32::MAX, PixelDepth::Rgba).is_ok());
    }

    #[test]
    fn pixel_limit_counts_area() {
        let limits = Limits {
            max_pixels: Some(100),
            ..Default::default()
        };
        assert!(limits.check_image(10, 10, PixelDepth::Grayscale).is_ok());
        assert!(matches!(
            limits.check_image(10, 11, PixelDepth::Grayscale),
            Err(TgaError::LimitExceeded(_))
        ));
    }

    #[test]
    fn memory_limit_scales_with_depth() {
        let limits = Limits {
            max_memory_bytes: Some(300),
            ..Default::default()
        };
        assert!(limits.check_image(10, 10, PixelDepth::Rgb).is_ok());
        match limits.check_image(10, 10, PixelDepth::Rgba) {
            Err(TgaError::LimitExceeded(msg)) => assert!(msg.contains("raster bytes 400")),
            other => panic!("expected LimitExceeded, got {other:?}"),
        }
    }

    #[test]
    fn axis_limits() {
        let limits = Limits {
            max_width: Some(8),
            max_height: Some(4),
            ..Default::default()
        };
        assert!(limits.check_image(8, 4, PixelDepth::Rgb).is_ok());
        assert!(limits.check_image(9, 4, PixelDepth::Rgb).is_err());
        assert!(limits.check_image(8, 5, PixelDepth::Rgb).is_err());
    }
}
