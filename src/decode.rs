//! TGA decoding: header validation, raw or RLE payload, origin normalization.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use enough::Stop;

use crate::error::TgaError;
use crate::header::{HEADER_LEN, ImageType, TgaHeader};
use crate::limits::Limits;
use crate::pixel::PixelDepth;
use crate::raster::RasterBuffer;
use crate::rle;

/// Rows of raw payload read between cancellation checks.
const ROWS_PER_CHECK: usize = 16;

/// TGA decode configuration.
///
/// ```no_run
/// use zentga::{DecodeRequest, Limits, Unstoppable};
///
/// let limits = Limits { max_pixels: Some(4096 * 4096), ..Default::default() };
/// let image = DecodeRequest::new()
///     .with_limits(&limits)
///     .decode_file("input.tga", Unstoppable)?;
/// println!("{}x{}", image.width(), image.height());
/// # Ok::<(), zentga::TgaError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct DecodeRequest<'a> {
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject images whose dimensions or buffer size exceed `limits`.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode a complete file held in memory.
    pub fn decode(&self, data: &[u8], stop: impl Stop) -> Result<RasterBuffer, TgaError> {
        self.decode_from(data, stop)
    }

    /// Decode from any byte stream.
    pub fn decode_from<R: Read>(
        &self,
        reader: R,
        stop: impl Stop,
    ) -> Result<RasterBuffer, TgaError> {
        decode_stream(reader, self.limits, &stop)
    }

    /// Open `path` and decode it.
    pub fn decode_file<P: AsRef<Path>>(
        &self,
        path: P,
        stop: impl Stop,
    ) -> Result<RasterBuffer, TgaError> {
        let file = File::open(path.as_ref())?;
        self.decode_from(BufReader::new(file), stop)
    }
}

/// Read and validate the header, returning it with the checked geometry.
pub(crate) fn read_header<R: Read>(
    reader: &mut R,
) -> Result<(TgaHeader, u32, u32, PixelDepth), TgaError> {
    let mut raw = [0u8; HEADER_LEN];
    reader.read_exact(&mut raw).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            TgaError::TruncatedHeader
        } else {
            TgaError::Io(e)
        }
    })?;
    let header = TgaHeader::parse(&raw);
    let (width, height, depth) = header.validate()?;
    Ok((header, width, height, depth))
}

fn decode_stream<R: Read>(
    mut reader: R,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<RasterBuffer, TgaError> {
    let (header, width, height, depth) = read_header(&mut reader)?;
    if let Some(limits) = limits {
        limits.check_image(width, height, depth)?;
    }
    let image_type = ImageType::from_code(header.image_type)
        .ok_or(TgaError::UnsupportedFormat(header.image_type))?;
    if header.color_map_type != 0 {
        log::warn!(
            "ignoring color map fields (type {}, length {})",
            header.color_map_type,
            header.color_map_length
        );
    }
    stop.check()?;

    // image ID field sits between the header and the pixel data
    if header.id_length > 0 {
        let mut id = [0u8; 255];
        reader
            .read_exact(&mut id[..usize::from(header.id_length)])
            .map_err(TgaError::from_payload_read)?;
    }

    let mut image = RasterBuffer::new(width, height, depth);
    let bpp = depth.bytes_per_pixel();
    if image_type.is_rle() {
        rle::decode_rle(&mut reader, image.as_bytes_mut(), bpp, stop)?;
    } else {
        read_raw(&mut reader, image.as_bytes_mut(), width as usize * bpp, stop)?;
    }

    if header.is_bottom_origin() {
        image.flip_vertically();
    }
    if header.is_right_origin() {
        image.flip_horizontally();
    }
    log::debug!("decoded tga {width}x{height}/{}", depth.bits());
    Ok(image)
}

fn read_raw<R: Read>(
    reader: &mut R,
    out: &mut [u8],
    stride: usize,
    stop: &dyn Stop,
) -> Result<(), TgaError> {
    for rows in out.chunks_mut(stride * ROWS_PER_CHECK) {
        stop.check()?;
        reader.read_exact(rows).map_err(TgaError::from_payload_read)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{DESCRIPTOR_RIGHT_ORIGIN, DESCRIPTOR_TOP_ORIGIN};
    use enough::Unstoppable;

    fn file(
        width: i16,
        height: i16,
        bits: u8,
        image_type: u8,
        descriptor: u8,
        payload: &[u8],
    ) -> Vec<u8> {
        let header = TgaHeader {
            image_type,
            width,
            height,
            bits_per_pixel: bits,
            descriptor,
            ..TgaHeader::default()
        };
        let mut out = header.to_bytes().to_vec();
        out.extend_from_slice(payload);
        out
    }

    fn decode(data: &[u8]) -> Result<RasterBuffer, TgaError> {
        DecodeRequest::new().decode(data, Unstoppable)
    }

    #[test]
    fn raw_gray_top_origin() {
        let data = file(2, 2, 8, 3, DESCRIPTOR_TOP_ORIGIN, &[1, 2, 3, 4]);
        let img = decode(&data).unwrap();
        assert_eq!(img.depth(), PixelDepth::Grayscale);
        assert_eq!(img.as_bytes(), &[1, 2, 3, 4]);
    }

    #[test]
    fn bottom_origin_is_flipped() {
        let data = file(2, 2, 8, 3, 0, &[1, 2, 3, 4]);
        assert_eq!(decode(&data).unwrap().as_bytes(), &[3, 4, 1, 2]);
    }

    #[test]
    fn right_origin_is_flipped() {
        let descriptor = DESCRIPTOR_TOP_ORIGIN | DESCRIPTOR_RIGHT_ORIGIN;
        let data = file(2, 2, 8, 3, descriptor, &[1, 2, 3, 4]);
        assert_eq!(decode(&data).unwrap().as_bytes(), &[2, 1, 4, 3]);
    }

    #[test]
    fn both_origin_flags() {
        let data = file(2, 2, 8, 3, DESCRIPTOR_RIGHT_ORIGIN, &[1, 2, 3, 4]);
        assert_eq!(decode(&data).unwrap().as_bytes(), &[4, 3, 2, 1]);
    }

    #[test]
    fn image_id_is_skipped() {
        let mut data = file(1, 1, 8, 3, DESCRIPTOR_TOP_ORIGIN, &[]);
        data[0] = 3;
        data.extend_from_slice(b"abc");
        data.push(42);
        assert_eq!(decode(&data).unwrap().as_bytes(), &[42]);
    }

    #[test]
    fn header_errors() {
        assert!(matches!(decode(&[0; 10]), Err(TgaError::TruncatedHeader)));
        let zero_width = file(0, 2, 24, 2, DESCRIPTOR_TOP_ORIGIN, &[]);
        assert!(matches!(decode(&zero_width), Err(TgaError::InvalidHeader(_))));
        let bad_bits = file(2, 2, 16, 2, DESCRIPTOR_TOP_ORIGIN, &[0; 8]);
        assert!(matches!(decode(&bad_bits), Err(TgaError::InvalidHeader(_))));
        let palette = file(2, 2, 8, 1, DESCRIPTOR_TOP_ORIGIN, &[0; 4]);
        assert!(matches!(decode(&palette), Err(TgaError::UnsupportedFormat(1))));
    }

    #[test]
    fn short_raw_payload() {
        let data = file(2, 2, 24, 2, DESCRIPTOR_TOP_ORIGIN, &[0; 11]);
        assert!(matches!(decode(&data), Err(TgaError::TruncatedPayload)));
    }

    #[test]
    fn limits_checked_before_allocation() {
        let data = file(100, 100, 32, 2, DESCRIPTOR_TOP_ORIGIN, &[]);
        let limits = Limits {
            max_memory_bytes: Some(1000),
            ..Default::default()
        };
        let result = DecodeRequest::new()
            .with_limits(&limits)
            .decode(&data, Unstoppable);
        assert!(matches!(result, Err(TgaError::LimitExceeded(_))));
    }
}
