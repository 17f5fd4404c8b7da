//! Header-only image inspection.

use std::io::Read;

use crate::decode::read_header;
use crate::error::TgaError;
use crate::header::ImageType;
use crate::pixel::PixelDepth;

/// Image metadata from the header, without decoding pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub depth: PixelDepth,
    /// Image type code from the header, if it is one this crate decodes.
    pub image_type: Option<ImageType>,
    /// Rows are stored bottom-to-top on disk.
    pub bottom_origin: bool,
    /// Columns are stored right-to-left on disk.
    pub right_origin: bool,
}

impl ImageInfo {
    /// Read the header at the start of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self, TgaError> {
        Self::from_reader(data)
    }

    /// Read the header from a stream, consuming exactly 18 bytes.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, TgaError> {
        let (header, width, height, depth) = read_header(&mut reader)?;
        Ok(Self {
            width,
            height,
            depth,
            image_type: ImageType::from_code(header.image_type),
            bottom_origin: header.is_bottom_origin(),
            right_origin: header.is_right_origin(),
        })
    }

    pub fn is_rle(&self) -> bool {
        self.image_type.is_some_and(ImageType::is_rle)
    }
}
