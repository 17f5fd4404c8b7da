//! TGA encoding: top-left origin header, raw or RLE payload, TGA 2.0 footer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use enough::Stop;

use crate::error::TgaError;
use crate::header::{
    DEVELOPER_AREA_REF, EXTENSION_AREA_REF, FOOTER_SIGNATURE, HEADER_LEN, TgaHeader,
};
use crate::raster::RasterBuffer;
use crate::rle;

/// Fixed bytes written after the payload.
const FOOTER_LEN: usize =
    DEVELOPER_AREA_REF.len() + EXTENSION_AREA_REF.len() + FOOTER_SIGNATURE.len();

/// TGA encode configuration. RLE compression is on by default.
#[derive(Clone, Copy, Debug)]
pub struct EncodeRequest {
    compress: bool,
}

impl Default for EncodeRequest {
    fn default() -> Self {
        Self { compress: true }
    }
}

impl EncodeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uncompressed payload (image types 2 and 3).
    pub fn raw() -> Self {
        Self { compress: false }
    }

    /// Run-length encoded payload (image types 10 and 11).
    pub fn rle() -> Self {
        Self { compress: true }
    }

    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn is_compressed(&self) -> bool {
        self.compress
    }

    /// Encode into a new byte vector.
    pub fn encode(&self, image: &RasterBuffer, stop: impl Stop) -> Result<Vec<u8>, TgaError> {
        let mut out = Vec::with_capacity(HEADER_LEN + image.as_bytes().len() + FOOTER_LEN);
        encode_stream(image, &mut out, self.compress, &stop)?;
        Ok(out)
    }

    /// Encode into any writer.
    pub fn encode_to<W: Write>(
        &self,
        image: &RasterBuffer,
        writer: W,
        stop: impl Stop,
    ) -> Result<(), TgaError> {
        encode_stream(image, writer, self.compress, &stop)
    }

    /// Create `path` and encode into it. A failed write leaves the partial file.
    pub fn encode_file<P: AsRef<Path>>(
        &self,
        image: &RasterBuffer,
        path: P,
        stop: impl Stop,
    ) -> Result<(), TgaError> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        encode_stream(image, &mut writer, self.compress, &stop)?;
        writer.flush()?;
        Ok(())
    }
}

fn header_dimension(value: u32, width: u32, height: u32) -> Result<i16, TgaError> {
    i16::try_from(value).map_err(|_| TgaError::DimensionsTooLarge { width, height })
}

fn encode_stream<W: Write>(
    image: &RasterBuffer,
    mut writer: W,
    compress: bool,
    stop: &dyn Stop,
) -> Result<(), TgaError> {
    let (width, height) = (image.width(), image.height());
    if image.is_empty() {
        return Err(TgaError::InvalidHeader(format!(
            "cannot encode empty image {width}x{height}"
        )));
    }
    let header = TgaHeader::for_image(
        header_dimension(width, width, height)?,
        header_dimension(height, width, height)?,
        image.depth(),
        compress,
    );
    stop.check()?;

    writer.write_all(&header.to_bytes())?;
    if compress {
        rle::encode_rle(&mut writer, image.as_bytes(), image.bytes_per_pixel(), stop)?;
    } else {
        writer.write_all(image.as_bytes())?;
    }
    writer.write_all(&DEVELOPER_AREA_REF)?;
    writer.write_all(&EXTENSION_AREA_REF)?;
    writer.write_all(&FOOTER_SIGNATURE)?;
    log::debug!(
        "encoded tga {width}x{height}/{} ({})",
        image.depth().bits(),
        if compress { "rle" } else { "raw" }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::{PixelDepth, PixelValue};
    use enough::Unstoppable;

    #[test]
    fn raw_layout() {
        let mut img = RasterBuffer::new(2, 1, PixelDepth::Rgb);
        img.set(0, 0, PixelValue::rgb(1, 2, 3));
        img.set(1, 0, PixelValue::rgb(4, 5, 6));
        let out = EncodeRequest::raw().encode(&img, Unstoppable).unwrap();
        assert_eq!(out.len(), 18 + 6 + 26);
        assert_eq!(out[2], 2);
        assert_eq!(out[16], 24);
        assert_eq!(out[17], 0x20);
        assert_eq!(&out[18..24], &[3, 2, 1, 6, 5, 4]);
        assert_eq!(&out[24..32], &[0; 8]);
        assert_eq!(&out[32..], b"TRUEVISION-XFILE.\0");
    }

    #[test]
    fn rle_gray_type_code() {
        let img = RasterBuffer::new(4, 4, PixelDepth::Grayscale);
        let out = EncodeRequest::new().encode(&img, Unstoppable).unwrap();
        assert_eq!(out[2], 11);
        // one run packet of 16 zero pixels
        assert_eq!(&out[18..20], &[143, 0]);
        assert_eq!(out.len(), 18 + 2 + 26);
    }

    #[test]
    fn empty_image_rejected() {
        let img = RasterBuffer::default();
        assert!(matches!(
            EncodeRequest::raw().encode(&img, Unstoppable),
            Err(TgaError::InvalidHeader(_))
        ));
    }

    #[test]
    fn oversized_width_rejected() {
        let img = RasterBuffer::new(40_000, 1, PixelDepth::Grayscale);
        assert!(matches!(
            EncodeRequest::raw().encode(&img, Unstoppable),
            Err(TgaError::DimensionsTooLarge { width: 40_000, .. })
        ));
    }

    #[test]
    fn write_failure_is_io_error() {
        let img = RasterBuffer::new(8, 8, PixelDepth::Rgba);
        let mut small = [0u8; 20];
        let result = EncodeRequest::raw().encode_to(&img, &mut small[..], Unstoppable);
        assert!(matches!(result, Err(TgaError::Io(_))));
        // header landed before the failure
        assert_eq!(small[17], 0x20);
    }
}
