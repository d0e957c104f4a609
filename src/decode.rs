use enough::Stop;

use crate::error::BitmapError;
use crate::limits::Limits;
use crate::raster::{Raster, Raster8, Raster24};

/// BMP decode builder with optional resource limits.
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Reject images whose dimensions or buffer size exceed `limits`.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode whichever depth the header declares.
    pub fn decode(self, stop: impl Stop) -> Result<Raster, BitmapError> {
        crate::bmp::decode(self.data, self.limits, &stop)
    }

    /// Decode an 8-bit image; any other depth is [`BitmapError::UnsupportedBitDepth`].
    pub fn decode_gray8(self, stop: impl Stop) -> Result<Raster8, BitmapError> {
        crate::bmp::decode_gray8(self.data, self.limits, &stop)
    }

    /// Decode a 24-bit image; any other depth is [`BitmapError::UnsupportedBitDepth`].
    pub fn decode_rgb24(self, stop: impl Stop) -> Result<Raster24, BitmapError> {
        crate::bmp::decode_rgb24(self.data, self.limits, &stop)
    }
}
