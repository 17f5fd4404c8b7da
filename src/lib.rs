//! # zentga
//!
//! Truevision TGA image decoder and encoder, with an owned pixel buffer that
//! supports flipping and integer resampling in place.
//!
//! ## Supported Formats
//!
//! - Uncompressed true-color and grayscale (image types 2 and 3)
//! - Run-length encoded true-color and grayscale (image types 10 and 11)
//! - 8, 24 and 32 bits per pixel, stored B, G, R, A
//! - Bottom-left, top-left and right-origin files (normalized to top-left on decode)
//!
//! Encoded files are top-left origin and end with the TGA 2.0 footer.
//!
//! ## Non-Goals
//!
//! - Color-mapped (palette) images
//! - 15/16-bit pixels
//! - Streaming decode; the whole image is materialized
//!
//! ## Usage
//!
//! ```no_run
//! use zentga::{EncodeRequest, ImageInfo, PixelValue, Unstoppable};
//!
//! let data: &[u8] = &[]; // your TGA bytes
//!
//! // Read the header without decoding
//! let info = ImageInfo::from_bytes(data)?;
//! println!("{}x{} {:?}", info.width, info.height, info.depth);
//!
//! let mut image = zentga::decode(data, Unstoppable)?;
//! image.set(0, 0, PixelValue::rgb(255, 0, 0));
//! image.flip_vertically();
//! image.scale(image.width() * 2, image.height() * 2);
//!
//! let encoded = EncodeRequest::rle().encode(&image, Unstoppable)?;
//! # Ok::<(), zentga::TgaError>(())
//! ```

#![forbid(unsafe_code)]

mod decode;
mod encode;
mod error;
pub mod header;
mod info;
mod limits;
mod pixel;
pub mod primitive;
mod raster;
mod rle;

use std::io::{Read, Write};
use std::path::Path;

// Re-exports
pub use decode::DecodeRequest;
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::TgaError;
pub use header::{ImageType, TgaHeader};
pub use info::ImageInfo;
pub use limits::Limits;
#[cfg(feature = "rgb")]
pub use pixel::TgaPixel;
pub use pixel::{PixelDepth, PixelValue};
pub use raster::RasterBuffer;

/// Decode a TGA file held in memory.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<RasterBuffer, TgaError> {
    DecodeRequest::new().decode(data, stop)
}

/// Decode a TGA file from a byte stream.
pub fn decode_from<R: Read>(reader: R, stop: impl Stop) -> Result<RasterBuffer, TgaError> {
    DecodeRequest::new().decode_from(reader, stop)
}

/// Open and decode a TGA file.
pub fn read_file<P: AsRef<Path>>(path: P, stop: impl Stop) -> Result<RasterBuffer, TgaError> {
    DecodeRequest::new().decode_file(path, stop)
}

/// Encode to a new byte vector, RLE-compressed when `compress` is set.
pub fn encode(image: &RasterBuffer, compress: bool, stop: impl Stop) -> Result<Vec<u8>, TgaError> {
    EncodeRequest::new()
        .with_compression(compress)
        .encode(image, stop)
}

/// Encode into a byte stream, RLE-compressed when `compress` is set.
pub fn encode_to<W: Write>(
    image: &RasterBuffer,
    writer: W,
    compress: bool,
    stop: impl Stop,
) -> Result<(), TgaError> {
    EncodeRequest::new()
        .with_compression(compress)
        .encode_to(image, writer, stop)
}

/// Create `path` and encode into it, RLE-compressed when `compress` is set.
pub fn write_file<P: AsRef<Path>>(
    image: &RasterBuffer,
    path: P,
    compress: bool,
    stop: impl Stop,
) -> Result<(), TgaError> {
    EncodeRequest::new()
        .with_compression(compress)
        .encode_file(image, path, stop)
}
