//! The 18-byte TGA file header and footer constants.

use crate::error::TgaError;
use crate::pixel::PixelDepth;

/// Size of the on-disk header record.
pub const HEADER_LEN: usize = 18;

/// Descriptor bit: pixels are stored right-to-left.
pub const DESCRIPTOR_RIGHT_ORIGIN: u8 = 0x10;
/// Descriptor bit: rows are stored top-to-bottom. Clear means bottom-left origin.
pub const DESCRIPTOR_TOP_ORIGIN: u8 = 0x20;

/// Zero developer-area offset written after the payload.
pub const DEVELOPER_AREA_REF: [u8; 4] = [0; 4];
/// Zero extension-area offset written after the developer-area offset.
pub const EXTENSION_AREA_REF: [u8; 4] = [0; 4];
/// Signature that marks a "new TGA" file.
pub const FOOTER_SIGNATURE: [u8; 18] = *b"TRUEVISION-XFILE.\0";

/// Image type code (header byte 2) for the variants this crate reads and writes.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageType {
    /// 2: uncompressed true-color.
    RawTrueColor,
    /// 3: uncompressed grayscale.
    RawGray,
    /// 10: run-length encoded true-color.
    RleTrueColor,
    /// 11: run-length encoded grayscale.
    RleGray,
}

impl ImageType {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            2 => Some(Self::RawTrueColor),
            3 => Some(Self::RawGray),
            10 => Some(Self::RleTrueColor),
            11 => Some(Self::RleGray),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::RawTrueColor => 2,
            Self::RawGray => 3,
            Self::RleTrueColor => 10,
            Self::RleGray => 11,
        }
    }

    pub fn is_rle(self) -> bool {
        matches!(self, Self::RleTrueColor | Self::RleGray)
    }

    /// Type code an encoder would write for `depth`.
    pub fn for_depth(depth: PixelDepth, rle: bool) -> Self {
        match (depth, rle) {
            (PixelDepth::Grayscale, false) => Self::RawGray,
            (PixelDepth::Grayscale, true) => Self::RleGray,
            (_, false) => Self::RawTrueColor,
            (_, true) => Self::RleTrueColor,
        }
    }
}

/// Parsed TGA header. Field order matches the on-disk layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TgaHeader {
    pub id_length: u8,
    pub color_map_type: u8,
    pub image_type: u8,
    pub color_map_origin: i16,
    pub color_map_length: i16,
    pub color_map_depth: u8,
    pub x_origin: i16,
    pub y_origin: i16,
    pub width: i16,
    pub height: i16,
    pub bits_per_pixel: u8,
    pub descriptor: u8,
}

impl TgaHeader {
    /// Parse the 18 header bytes. All 16-bit fields are little-endian.
    pub fn parse(b: &[u8; HEADER_LEN]) -> Self {
        let le = |i: usize| i16::from_le_bytes([b[i], b[i + 1]]);
        Self {
            id_length: b[0],
            color_map_type: b[1],
            image_type: b[2],
            color_map_origin: le(3),
            color_map_length: le(5),
            color_map_depth: b[7],
            x_origin: le(8),
            y_origin: le(10),
            width: le(12),
            height: le(14),
            bits_per_pixel: b[16],
            descriptor: b[17],
        }
    }

    /// Parse from the start of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self, TgaError> {
        let bytes: &[u8; HEADER_LEN] = data
            .get(..HEADER_LEN)
            .and_then(|s| s.try_into().ok())
            .ok_or(TgaError::TruncatedHeader)?;
        Ok(Self::parse(bytes))
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0] = self.id_length;
        out[1] = self.color_map_type;
        out[2] = self.image_type;
        out[3..5].copy_from_slice(&self.color_map_origin.to_le_bytes());
        out[5..7].copy_from_slice(&self.color_map_length.to_le_bytes());
        out[7] = self.color_map_depth;
        out[8..10].copy_from_slice(&self.x_origin.to_le_bytes());
        out[10..12].copy_from_slice(&self.y_origin.to_le_bytes());
        out[12..14].copy_from_slice(&self.width.to_le_bytes());
        out[14..16].copy_from_slice(&self.height.to_le_bytes());
        out[16] = self.bits_per_pixel;
        out[17] = self.descriptor;
        out
    }

    /// Header an encoder writes for a `width`x`height` image: top-left origin,
    /// no color map, no image ID.
    pub(crate) fn for_image(width: i16, height: i16, depth: PixelDepth, rle: bool) -> Self {
        Self {
            image_type: ImageType::for_depth(depth, rle).code(),
            width,
            height,
            bits_per_pixel: depth.bits(),
            descriptor: DESCRIPTOR_TOP_ORIGIN,
            ..Self::default()
        }
    }

    /// Validate geometry and depth, returning `(width, height, depth)`.
    pub fn validate(&self) -> Result<(u32, u32, PixelDepth), TgaError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(TgaError::InvalidHeader(format!(
                "bad dimensions {}x{}",
                self.width, self.height
            )));
        }
        let depth = PixelDepth::from_bits(self.bits_per_pixel).ok_or_else(|| {
            TgaError::InvalidHeader(format!("bad bits per pixel {}", self.bits_per_pixel))
        })?;
        Ok((self.width as u32, self.height as u32, depth))
    }

    /// Rows are stored bottom-to-top.
    pub fn is_bottom_origin(&self) -> bool {
        self.descriptor & DESCRIPTOR_TOP_ORIGIN == 0
    }

    /// Columns are stored right-to-left.
    pub fn is_right_origin(&self) -> bool {
        self.descriptor & DESCRIPTOR_RIGHT_ORIGIN != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_offsets() {
        let mut raw = [0u8; HEADER_LEN];
        raw[0] = 5;
        raw[2] = 10;
        raw[12..14].copy_from_slice(&640i16.to_le_bytes());
        raw[14..16].copy_from_slice(&480i16.to_le_bytes());
        raw[16] = 32;
        raw[17] = 0x28;
        let h = TgaHeader::parse(&raw);
        assert_eq!(h.id_length, 5);
        assert_eq!(h.image_type, 10);
        assert_eq!(h.width, 640);
        assert_eq!(h.height, 480);
        assert_eq!(h.bits_per_pixel, 32);
        assert!(!h.is_bottom_origin());
        assert!(!h.is_right_origin());
        assert_eq!(h.to_bytes(), raw);
    }

    #[test]
    fn encoder_header_is_top_origin() {
        let h = TgaHeader::for_image(3, 2, PixelDepth::Grayscale, true);
        let b = h.to_bytes();
        assert_eq!(b[2], 11);
        assert_eq!(b[16], 8);
        assert_eq!(b[17], 0x20);
        assert_eq!(&b[12..16], &[3, 0, 2, 0]);
        assert_eq!(TgaHeader::for_image(1, 1, PixelDepth::Rgba, false).image_type, 2);
    }

    #[test]
    fn validate_rejects_zero_and_negative() {
        let mut h = TgaHeader::for_image(0, 4, PixelDepth::Rgb, false);
        assert!(matches!(h.validate(), Err(TgaError::InvalidHeader(_))));
        h.width = -3;
        assert!(matches!(h.validate(), Err(TgaError::InvalidHeader(_))));
        h.width = 4;
        h.bits_per_pixel = 16;
        assert!(matches!(h.validate(), Err(TgaError::InvalidHeader(_))));
        h.bits_per_pixel = 24;
        assert_eq!(h.validate().unwrap(), (4, 4, PixelDepth::Rgb));
    }

    #[test]
    fn short_input_is_truncated_header() {
        assert!(matches!(
            TgaHeader::from_bytes(&[0; 17]),
            Err(TgaError::TruncatedHeader)
        ));
    }

    #[test]
    fn footer_signature_layout() {
        assert_eq!(FOOTER_SIGNATURE.len(), 18);
        assert_eq!(&FOOTER_SIGNATURE[..16], b"TRUEVISION-XFILE");
        assert_eq!(FOOTER_SIGNATURE[17], 0);
    }
}
