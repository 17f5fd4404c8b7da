//! Pixel depth and the packed BGRA pixel value.

/// Number of meaningful bytes per pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelDepth {
    /// Single channel, 8-bit grayscale.
    Grayscale = 1,
    /// 3 channels, 8-bit BGR.
    Rgb = 3,
    /// 4 channels, 8-bit BGRA.
    Rgba = 4,
}

impl PixelDepth {
    /// Depth from a bytes-per-pixel count. `None` for anything but 1, 3 or 4.
    pub fn from_bytes_per_pixel(bytes: usize) -> Option<Self> {
        match bytes {
            1 => Some(Self::Grayscale),
            3 => Some(Self::Rgb),
            4 => Some(Self::Rgba),
            _ => None,
        }
    }

    /// Depth from a header bits-per-pixel field (`bits >> 3`).
    pub fn from_bits(bits: u8) -> Option<Self> {
        Self::from_bytes_per_pixel(usize::from(bits >> 3))
    }

    /// Bytes per pixel for this depth.
    pub fn bytes_per_pixel(self) -> usize {
        self as usize
    }

    /// Bits per pixel as stored in the header.
    pub fn bits(self) -> u8 {
        (self as u8) << 3
    }
}

/// A single pixel of up to four bytes in B, G, R, A order.
///
/// Only the first `depth` bytes are meaningful; equality ignores the rest.
#[derive(Clone, Copy, Debug)]
pub struct PixelValue {
    raw: [u8; 4],
    depth: PixelDepth,
}

impl Default for PixelValue {
    fn default() -> Self {
        Self {
            raw: [0; 4],
            depth: PixelDepth::Grayscale,
        }
    }
}

impl PartialEq for PixelValue {
    fn eq(&self, other: &Self) -> bool {
        self.depth == other.depth && self.as_bytes() == other.as_bytes()
    }
}

impl Eq for PixelValue {}

impl PixelValue {
    /// Four-channel pixel.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            raw: [b, g, r, a],
            depth: PixelDepth::Rgba,
        }
    }

    /// Three-channel pixel.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            raw: [b, g, r, 0],
            depth: PixelDepth::Rgb,
        }
    }

    /// Single-channel pixel.
    pub const fn gray(v: u8) -> Self {
        Self {
            raw: [v, 0, 0, 0],
            depth: PixelDepth::Grayscale,
        }
    }

    /// Pixel from a packed little-endian value (blue in the low byte).
    pub const fn from_u32(val: u32, depth: PixelDepth) -> Self {
        Self {
            raw: val.to_le_bytes(),
            depth,
        }
    }

    /// Pixel from stored bytes; the slice length is the depth.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let depth = PixelDepth::from_bytes_per_pixel(bytes.len())?;
        let mut raw = [0u8; 4];
        raw[..bytes.len()].copy_from_slice(bytes);
        Some(Self { raw, depth })
    }

    pub fn blue(&self) -> u8 {
        self.raw[0]
    }

    pub fn green(&self) -> u8 {
        self.raw[1]
    }

    pub fn red(&self) -> u8 {
        self.raw[2]
    }

    pub fn alpha(&self) -> u8 {
        self.raw[3]
    }

    pub fn depth(&self) -> PixelDepth {
        self.depth
    }

    /// The `depth` meaningful bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw[..self.depth.bytes_per_pixel()]
    }

    /// All four storage bytes, including ones beyond `depth`.
    pub fn raw(&self) -> [u8; 4] {
        self.raw
    }

    /// Packed little-endian form of the storage bytes.
    pub fn to_u32(&self) -> u32 {
        u32::from_le_bytes(self.raw)
    }
}

/// Typed pixels that map onto a TGA pixel depth.
#[cfg(feature = "rgb")]
pub trait TgaPixel: Copy + From<PixelValue> + Into<PixelValue> {
    const DEPTH: PixelDepth;
}

#[cfg(feature = "rgb")]
mod typed {
    use super::{PixelDepth, PixelValue, TgaPixel};
    use rgb::alt::{BGR8, BGRA8};

    impl From<PixelValue> for BGR8 {
        fn from(p: PixelValue) -> Self {
            BGR8 {
                b: p.blue(),
                g: p.green(),
                r: p.red(),
            }
        }
    }

    impl From<BGR8> for PixelValue {
        fn from(p: BGR8) -> Self {
            PixelValue::rgb(p.r, p.g, p.b)
        }
    }

    impl From<PixelValue> for BGRA8 {
        fn from(p: PixelValue) -> Self {
            BGRA8 {
                b: p.blue(),
                g: p.green(),
                r: p.red(),
                a: p.alpha(),
            }
        }
    }

    impl From<BGRA8> for PixelValue {
        fn from(p: BGRA8) -> Self {
            PixelValue::new(p.r, p.g, p.b, p.a)
        }
    }

    impl TgaPixel for BGR8 {
        const DEPTH: PixelDepth = PixelDepth::Rgb;
    }

    impl TgaPixel for BGRA8 {
        const DEPTH: PixelDepth = PixelDepth::Rgba;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_are_stored_bgra() {
        let p = PixelValue::new(1, 2, 3, 4);
        assert_eq!(p.raw(), [3, 2, 1, 4]);
        assert_eq!(p.red(), 1);
        assert_eq!(p.green(), 2);
        assert_eq!(p.blue(), 3);
        assert_eq!(p.alpha(), 4);
        assert_eq!(p.to_u32(), 0x0401_0203);
    }

    #[test]
    fn equality_ignores_bytes_beyond_depth() {
        let a = PixelValue::from_u32(0xAABB_CC10, PixelDepth::Grayscale);
        let b = PixelValue::gray(0x10);
        assert_eq!(a, b);
        assert_ne!(PixelValue::gray(0), PixelValue::rgb(0, 0, 0));
    }

    #[test]
    fn depth_from_bits_truncates() {
        assert_eq!(PixelDepth::from_bits(8), Some(PixelDepth::Grayscale));
        assert_eq!(PixelDepth::from_bits(24), Some(PixelDepth::Rgb));
        assert_eq!(PixelDepth::from_bits(32), Some(PixelDepth::Rgba));
        assert_eq!(PixelDepth::from_bits(16), None);
        assert_eq!(PixelDepth::from_bits(0), None);
        assert_eq!(PixelDepth::Rgb.bits(), 24);
    }

    #[test]
    fn from_bytes_rejects_bad_length() {
        assert!(PixelValue::from_bytes(&[1, 2]).is_none());
        let p = PixelValue::from_bytes(&[9, 8, 7]).unwrap();
        assert_eq!(p.depth(), PixelDepth::Rgb);
        assert_eq!(p.as_bytes(), &[9, 8, 7]);
    }

    #[test]
    fn default_is_zero_gray() {
        let p = PixelValue::default();
        assert_eq!(p.depth(), PixelDepth::Grayscale);
        assert_eq!(p.raw(), [0; 4]);
    }
}
