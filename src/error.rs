//! The crate-wide error type.

use enough::StopReason;

/// Errors from TGA decoding, encoding and buffer construction.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TgaError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("truncated header: fewer than 18 bytes available")]
    TruncatedHeader,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported image type code {0}")]
    UnsupportedFormat(u8),

    #[error("unexpected end of pixel data")]
    TruncatedPayload,

    #[error("RLE packets overrun image: {decoded} pixels decoded, {declared} declared")]
    RleOverrun { declared: usize, decoded: usize },

    #[error("unsupported bytes per pixel: {0} (expected 1, 3 or 4)")]
    UnsupportedDepth(usize),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("pixel depth mismatch: expected {expected:?}, got {actual:?}")]
    DepthMismatch {
        expected: crate::PixelDepth,
        actual: crate::PixelDepth,
    },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for TgaError {
    fn from(r: StopReason) -> Self {
        TgaError::Cancelled(r)
    }
}

impl TgaError {
    /// Map an I/O error raised while reading pixel data.
    ///
    /// A premature end of stream becomes [`TgaError::TruncatedPayload`];
    /// everything else stays an I/O error.
    pub(crate) fn from_payload_read(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            TgaError::TruncatedPayload
        } else {
            TgaError::Io(err)
        }
    }
}
