use crate::error::BitmapError;

/// A 24-bit true-color pixel (no alpha).
pub type Pixel = rgb::RGB8;

/// Supported BMP bit depths.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// 8-bit paletted grayscale, one byte per pixel, 256-entry palette.
    Gray8,
    /// 24-bit true color, three bytes per pixel in BGR order on disk.
    Rgb24,
}

impl BitDepth {
    /// Bit count as stored in the BMP info header.
    pub fn bits(&self) -> u16 {
        match self {
            Self::Gray8 => 8,
            Self::Rgb24 => 24,
        }
    }

    /// Bytes per pixel in the file's row layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Rgb24 => 3,
        }
    }

    /// Map a header bit count to a supported depth.
    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            8 => Some(Self::Gray8),
            24 => Some(Self::Rgb24),
            _ => None,
        }
    }

    /// Bytes per encoded row, padded to a 4-byte boundary.
    pub fn row_stride(&self, width: u32) -> Option<usize> {
        (width as usize)
            .checked_mul(self.bytes_per_pixel())
            .and_then(|r| r.checked_add(3))
            .map(|r| r & !3)
    }
}

/// Allocate a filled buffer, reporting allocation failure instead of aborting.
pub(crate) fn try_alloc<T: Clone>(len: usize, fill: T) -> Result<Vec<T>, BitmapError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| BitmapError::OutOfMemory {
            bytes: len.saturating_mul(core::mem::size_of::<T>()),
        })?;
    buf.resize(len, fill);
    Ok(buf)
}

/// Copy a slice into a new buffer, reporting allocation failure instead of aborting.
pub(crate) fn try_copy<T: Clone>(src: &[T]) -> Result<Vec<T>, BitmapError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(src.len())
        .map_err(|_| BitmapError::OutOfMemory {
            bytes: core::mem::size_of_val(src),
        })?;
    buf.extend_from_slice(src);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray8_stride_is_next_multiple_of_four() {
        assert_eq!(BitDepth::Gray8.row_stride(1), Some(4));
        assert_eq!(BitDepth::Gray8.row_stride(4), Some(4));
        assert_eq!(BitDepth::Gray8.row_stride(5), Some(8));
        assert_eq!(BitDepth::Gray8.row_stride(8), Some(8));
    }

    #[test]
    fn rgb24_stride_includes_padding() {
        assert_eq!(BitDepth::Rgb24.row_stride(1), Some(4));
        assert_eq!(BitDepth::Rgb24.row_stride(2), Some(8));
        assert_eq!(BitDepth::Rgb24.row_stride(3), Some(12));
        assert_eq!(BitDepth::Rgb24.row_stride(4), Some(12));
    }

    #[test]
    fn only_8_and_24_bits_are_supported() {
        assert_eq!(BitDepth::from_bits(8), Some(BitDepth::Gray8));
        assert_eq!(BitDepth::from_bits(24), Some(BitDepth::Rgb24));
        assert_eq!(BitDepth::from_bits(32), None);
        assert_eq!(BitDepth::from_bits(1), None);
    }
}
