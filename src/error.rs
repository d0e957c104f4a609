use enough::StopReason;

/// Errors from BMP decoding, encoding, and image filtering.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unrecognized format magic bytes")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported bit depth: expected {expected}-bit, found {found}-bit")]
    UnsupportedBitDepth { expected: u16, found: u16 },

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("allocation of {bytes} bytes failed")]
    OutOfMemory { bytes: usize },

    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}

impl BitmapError {
    /// Whether this error came from malformed or unsupported file contents.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::UnrecognizedFormat
                | Self::InvalidHeader(_)
                | Self::UnsupportedBitDepth { .. }
                | Self::UnsupportedVariant(_)
                | Self::UnexpectedEof
        )
    }
}
