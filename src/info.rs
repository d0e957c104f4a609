use core::fmt;

use crate::bmp::header::parse_headers;
use crate::error::BitmapError;
use crate::pixel::BitDepth;

/// Image metadata, available without decoding pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub bit_depth: BitDepth,
    /// Size of the padded pixel payload in bytes.
    pub data_size: usize,
}

impl ImageInfo {
    /// Probe a BMP header without decoding the pixel payload.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BitmapError> {
        let headers = parse_headers(data)?;
        let bit_depth = headers.depth()?;
        let stride = bit_depth
            .row_stride(headers.width)
            .ok_or(BitmapError::DimensionsTooLarge {
                width: headers.width,
                height: headers.height,
            })?;
        Ok(Self {
            width: headers.width,
            height: headers.height,
            bit_depth,
            data_size: stride.saturating_mul(headers.height as usize),
        })
    }
}

impl fmt::Display for ImageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Image Info:")?;
        writeln!(f, "Width: {}", self.width)?;
        writeln!(f, "Height: {}", self.height)?;
        writeln!(f, "Color Depth: {}-bit", self.bit_depth.bits())?;
        write!(f, "Data Size: {} bytes", self.data_size)
    }
}
