//! BMP codec for uncompressed 8-bit paletted and 24-bit images (internal).
//!
//! Use top-level [`crate::decode_bmp`], [`crate::encode_gray8`], etc.

mod decode;
mod encode;
pub mod header;

use crate::error::BitmapError;
use crate::limits::Limits;
use crate::raster::{Raster, Raster8, Raster24};
use enough::Stop;

/// Decode either depth.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Raster, BitmapError> {
    decode::decode_any(data, limits, stop)
}

pub(crate) fn decode_gray8(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Raster8, BitmapError> {
    decode::decode_gray8(data, limits, stop)
}

pub(crate) fn decode_rgb24(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Raster24, BitmapError> {
    decode::decode_rgb24(data, limits, stop)
}

pub(crate) fn encode(raster: &Raster, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    match raster {
        Raster::Gray8(img) => encode::encode_gray8(img, stop),
        Raster::Rgb24(img) => encode::encode_rgb24(img, stop),
    }
}

pub(crate) fn encode_gray8(img: &Raster8, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    encode::encode_gray8(img, stop)
}

pub(crate) fn encode_rgb24(img: &Raster24, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    encode::encode_rgb24(img, stop)
}
