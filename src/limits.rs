use crate::error::BitmapError;

/// Caps on the size of BMPs accepted by [`DecodeRequest`](crate::DecodeRequest).
///
/// Checked against the info header before any pixel buffer is allocated, so
/// a hostile header can't force a large allocation. `None` means unlimited.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Width times height.
    pub max_pixels: Option<u64>,
    /// Largest of the file's pixel payload and the decoded raster, in bytes.
    pub max_memory_bytes: Option<u64>,
}

fn enforce(what: &str, value: u64, limit: Option<u64>) -> Result<(), BitmapError> {
    match limit {
        Some(max) if value > max => Err(BitmapError::LimitExceeded(format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}

impl Limits {
    /// Header dimensions against the width, height and pixel caps.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), BitmapError> {
        enforce("width", u64::from(width), self.max_width)?;
        enforce("height", u64::from(height), self.max_height)?;
        enforce(
            "pixel count",
            u64::from(width) * u64::from(height),
            self.max_pixels,
        )
    }

    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), BitmapError> {
        enforce("buffer bytes", bytes as u64, self.max_memory_bytes)
    }
}
