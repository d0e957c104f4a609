//! Intensity histogram and CDF-based contrast equalization for 8-bit images.

use crate::error::BitmapError;
use crate::raster::Raster8;

/// Pixel counts per intensity value 0..=255.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; 256],
}

/// Intensity remapping table produced by [`Histogram::equalization_table`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EqualizationTable {
    lut: [u8; 256],
}

impl Histogram {
    pub fn from_counts(counts: [u64; 256]) -> Self {
        Self { counts }
    }

    pub fn counts(&self) -> &[u64; 256] {
        &self.counts
    }

    pub fn count(&self, value: u8) -> u64 {
        self.counts[value as usize]
    }

    /// Sum of all bins.
    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0u64, |acc, &c| acc.saturating_add(c))
    }

    /// Cumulative counts: `cdf[i] = sum(counts[..=i])`.
    pub fn cumulative(&self) -> [u64; 256] {
        let mut cdf = [0u64; 256];
        let mut acc = 0u64;
        for (out, &c) in cdf.iter_mut().zip(self.counts.iter()) {
            acc = acc.saturating_add(c);
            *out = acc;
        }
        cdf
    }

    /// Build the equalization lookup table:
    /// `round((cdf[i] - cdf_min) / (total_pixels - cdf_min) * 255)`,
    /// where `cdf_min` is the smallest non-zero cumulative count.
    ///
    /// Returns [`BitmapError::DegenerateInput`] when every pixel shares one
    /// intensity (or the histogram is empty), since the denominator is zero.
    pub fn equalization_table(&self, total_pixels: u64) -> Result<EqualizationTable, BitmapError> {
        let cdf = self.cumulative();
        let cdf_min = cdf.iter().copied().find(|&c| c != 0).ok_or_else(|| {
            BitmapError::DegenerateInput("histogram is empty".into())
        })?;
        if total_pixels <= cdf_min {
            return Err(BitmapError::DegenerateInput(format!(
                "single-intensity image (cdf_min {cdf_min}, total {total_pixels})"
            )));
        }
        let range = (total_pixels - cdf_min) as f64;
        let mut lut = [0u8; 256];
        for (out, &c) in lut.iter_mut().zip(cdf.iter()) {
            let scaled = (c.saturating_sub(cdf_min) as f64 / range * 255.0).round();
            *out = scaled.clamp(0.0, 255.0) as u8;
        }
        Ok(EqualizationTable { lut })
    }
}

impl EqualizationTable {
    pub fn from_lut(lut: [u8; 256]) -> Self {
        Self { lut }
    }

    pub fn lut(&self) -> &[u8; 256] {
        &self.lut
    }

    #[inline]
    pub fn map(&self, v: u8) -> u8 {
        self.lut[v as usize]
    }
}

impl Raster8 {
    /// Count pixel values row by row (padding bytes excluded).
    pub fn histogram(&self) -> Histogram {
        let mut counts = [0u64; 256];
        for row in self.rows() {
            for &v in row {
                counts[v as usize] += 1;
            }
        }
        Histogram { counts }
    }

    /// Replace each value `v` with `table[v]`.
    pub fn equalize(&mut self, table: &EqualizationTable) {
        self.map_pixels(|v| table.map(v));
    }

    /// Histogram, CDF, and remap in one step, using `width * height` as the pixel total.
    pub fn equalize_histogram(&mut self) -> Result<(), BitmapError> {
        let total = u64::from(self.width()) * u64::from(self.height());
        let table = self.histogram().equalization_table(total)?;
        log::debug!(
            "equalizing {}x{} image, lut[0]={} lut[255]={}",
            self.width(),
            self.height(),
            table.map(0),
            table.map(255)
        );
        self.equalize(&table);
        Ok(())
    }
}
