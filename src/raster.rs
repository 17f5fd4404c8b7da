//! Owned pixel buffer with bounds-checked access and in-place transforms.

use crate::error::TgaError;
use crate::pixel::{PixelDepth, PixelValue};

/// An owned, row-major, top-to-bottom pixel buffer.
///
/// Each pixel occupies `depth` consecutive bytes in B, G, R, A order.
/// `Clone` is a deep copy. [`RasterBuffer::take`] moves the contents out and
/// leaves an empty buffer behind.
///
/// Out-of-range access is not an error: [`get`](Self::get) returns the zero
/// sentinel pixel and [`set`](Self::set) returns `false`. Callers iterating
/// over edges rely on this.
///
/// Construct with [`try_new`](Self::try_new) or [`from_bytes`](Self::from_bytes)
/// when the dimensions come from untrusted input; [`new`](Self::new) is for
/// sizes already known to fit in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    depth: PixelDepth,
}

impl Default for RasterBuffer {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            width: 0,
            height: 0,
            depth: PixelDepth::Grayscale,
        }
    }
}

fn buffer_len(width: u32, height: u32, depth: PixelDepth) -> Result<usize, TgaError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|wh| wh.checked_mul(depth.bytes_per_pixel()))
        .ok_or(TgaError::DimensionsTooLarge { width, height })
}

impl RasterBuffer {
    /// Zero-filled buffer of `width * height * depth` bytes.
    ///
    /// # Panics
    ///
    /// If `width * height * depth` overflows `usize`.
    /// [`try_new`](Self::try_new) reports that as
    /// [`TgaError::DimensionsTooLarge`] instead.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Self {
        match buffer_len(width, height, depth) {
            Ok(len) => Self {
                data: vec![0; len],
                width,
                height,
                depth,
            },
            Err(_) => panic!("raster dimensions {width}x{height} overflow"),
        }
    }

    /// Zero-filled buffer from a raw bytes-per-pixel count (1, 3 or 4).
    pub fn try_new(width: u32, height: u32, bytes_per_pixel: usize) -> Result<Self, TgaError> {
        let depth = PixelDepth::from_bytes_per_pixel(bytes_per_pixel)
            .ok_or(TgaError::UnsupportedDepth(bytes_per_pixel))?;
        let len = buffer_len(width, height, depth)?;
        Ok(Self {
            data: vec![0; len],
            width,
            height,
            depth,
        })
    }

    /// Adopt an existing byte buffer. Its length must match the geometry exactly.
    pub fn from_bytes(
        width: u32,
        height: u32,
        depth: PixelDepth,
        data: Vec<u8>,
    ) -> Result<Self, TgaError> {
        let expected = buffer_len(width, height, depth)?;
        if data.len() != expected {
            return Err(TgaError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            depth,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn depth(&self) -> PixelDepth {
        self.depth
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.depth.bytes_per_pixel()
    }

    /// True when there is no pixel storage (default or moved-from).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Move the contents out, leaving `self` empty.
    pub fn take(&mut self) -> RasterBuffer {
        core::mem::take(self)
    }

    fn stride(&self) -> usize {
        self.width as usize * self.bytes_per_pixel()
    }

    /// Bytes of row `y`, or `None` when out of range.
    pub fn scanline(&self, y: u32) -> Option<&[u8]> {
        if self.is_empty() || y >= self.height {
            return None;
        }
        let stride = self.stride();
        let start = y as usize * stride;
        self.data.get(start..start + stride)
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if self.is_empty() || x >= self.width || y >= self.height {
            return None;
        }
        Some((x as usize + y as usize * self.width as usize) * self.bytes_per_pixel())
    }

    /// Pixel at `(x, y)`, or the zero gray sentinel when empty or out of range.
    pub fn get(&self, x: u32, y: u32) -> PixelValue {
        let Some(off) = self.offset(x, y) else {
            return PixelValue::default();
        };
        let bpp = self.bytes_per_pixel();
        PixelValue::from_bytes(&self.data[off..off + bpp]).unwrap_or_default()
    }

    /// Store the first `depth` bytes of `value` at `(x, y)`.
    ///
    /// Returns `false` without mutating when empty or out of range. A `value`
    /// shallower than the buffer contributes its zero padding bytes.
    pub fn set(&mut self, x: u32, y: u32, value: PixelValue) -> bool {
        let Some(off) = self.offset(x, y) else {
            return false;
        };
        let bpp = self.bytes_per_pixel();
        self.data[off..off + bpp].copy_from_slice(&value.raw()[..bpp]);
        true
    }

    /// Mirror columns in place.
    pub fn flip_horizontally(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        let half = self.width / 2;
        for i in 0..half {
            let mirror = self.width - 1 - i;
            for j in 0..self.height {
                let left = self.get(i, j);
                let right = self.get(mirror, j);
                self.set(i, j, right);
                self.set(mirror, j, left);
            }
        }
        true
    }

    /// Mirror rows in place by swapping whole scanlines.
    pub fn flip_vertically(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        let stride = self.stride();
        let rows = self.height as usize;
        for j in 0..rows / 2 {
            let (top, bottom) = self.data.split_at_mut((rows - 1 - j) * stride);
            top[j * stride..(j + 1) * stride].swap_with_slice(&mut bottom[..stride]);
        }
        true
    }

    /// Zero every byte; dimensions are unchanged.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Resample to `new_width`x`new_height` with integer error accumulation.
    ///
    /// Each source column steps a horizontal accumulator (seeded with
    /// `width - new_width`) by `new_width`; every overflow past `width` emits
    /// one destination pixel. Each source row steps a vertical accumulator by
    /// `new_height`; every overflow past `height` advances one destination
    /// scanline, and while two or more overflows remain the just-written
    /// scanline is copied verbatim into the next one. Destination pixels that
    /// no overflow reaches stay zero.
    ///
    /// Returns `false` without mutating if either dimension is zero or the
    /// buffer is empty.
    pub fn scale(&mut self, new_width: u32, new_height: u32) -> bool {
        if new_width == 0 || new_height == 0 || self.is_empty() {
            return false;
        }
        let Ok(len) = buffer_len(new_width, new_height, self.depth) else {
            return false;
        };
        let bpp = self.bytes_per_pixel();
        let old_w = i64::from(self.width);
        let old_h = i64::from(self.height);
        let new_w = i64::from(new_width);
        let new_h = i64::from(new_height);
        let old_stride = self.stride();
        let new_stride = new_width as usize * bpp;

        let mut out = vec![0u8; len];
        let mut dst_line = 0usize;
        let mut src_line = 0usize;
        let mut err_y = 0i64;
        for _ in 0..self.height {
            let mut err_x = old_w - new_w;
            let mut dst_x = 0usize;
            for src_x in 0..self.width as usize {
                err_x += new_w;
                while err_x >= old_w {
                    err_x -= old_w;
                    let dst = dst_line + dst_x * bpp;
                    let src = src_line + src_x * bpp;
                    out[dst..dst + bpp].copy_from_slice(&self.data[src..src + bpp]);
                    dst_x += 1;
                }
            }
            err_y += new_h;
            src_line += old_stride;
            while err_y >= old_h {
                if err_y >= old_h << 1 {
                    out.copy_within(dst_line..dst_line + new_stride, dst_line + new_stride);
                }
                err_y -= old_h;
                dst_line += new_stride;
            }
        }

        self.data = out;
        self.width = new_width;
        self.height = new_height;
        true
    }
}

#[cfg(feature = "rgb")]
impl RasterBuffer {
    /// Build a buffer from typed pixels (row-major, `width * height` of them).
    pub fn from_pixels<P: crate::TgaPixel>(
        width: u32,
        height: u32,
        pixels: &[P],
    ) -> Result<Self, TgaError> {
        let bpp = P::DEPTH.bytes_per_pixel();
        let expected = buffer_len(width, height, P::DEPTH)?;
        if pixels.len() * bpp != expected {
            return Err(TgaError::BufferSizeMismatch {
                expected,
                actual: pixels.len() * bpp,
            });
        }
        let mut data = Vec::with_capacity(expected);
        for &p in pixels {
            let value: PixelValue = p.into();
            data.extend_from_slice(&value.raw()[..bpp]);
        }
        Self::from_bytes(width, height, P::DEPTH, data)
    }

    /// Copy out typed pixels. Fails if `P` does not match the buffer depth.
    pub fn pixels<P: crate::TgaPixel>(&self) -> Result<Vec<P>, TgaError> {
        if P::DEPTH != self.depth {
            return Err(TgaError::DepthMismatch {
                expected: P::DEPTH,
                actual: self.depth,
            });
        }
        Ok(self
            .data
            .chunks_exact(self.bytes_per_pixel())
            .filter_map(PixelValue::from_bytes)
            .map(P::from)
            .collect())
    }

    /// Copy into an [`imgref::ImgVec`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: crate::TgaPixel>(&self) -> Result<imgref::ImgVec<P>, TgaError> {
        let pixels = self.pixels::<P>()?;
        Ok(imgref::ImgVec::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }
}
