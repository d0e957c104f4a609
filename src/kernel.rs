use crate::error::BitmapError;
use crate::pixel::try_alloc;

/// Square convolution kernel with odd side length, weights in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// Build from `size * size` row-major weights. `size` must be odd.
    pub fn new(size: usize, weights: Vec<f32>) -> Result<Self, BitmapError> {
        let expected = weight_count(size)?;
        if weights.len() != expected {
            return Err(BitmapError::InvalidKernel(format!(
                "{size}x{size} kernel needs {expected} weights, got {}",
                weights.len()
            )));
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(BitmapError::InvalidKernel(
                "kernel weights must be finite".into(),
            ));
        }
        Ok(Self { size, weights })
    }

    /// Build from nested rows.
    pub fn from_rows<const N: usize>(rows: [[f32; N]; N]) -> Result<Self, BitmapError> {
        Self::new(N, rows.iter().flatten().copied().collect())
    }

    /// 1 at the center, 0 elsewhere.
    pub fn identity(size: usize) -> Result<Self, BitmapError> {
        let mut k = Self::new(size, try_alloc(weight_count(size)?, 0.0)?)?;
        let c = k.offset();
        k.weights[c * size + c] = 1.0;
        Ok(k)
    }

    /// Uniform average over a `size x size` window.
    pub fn box_blur(size: usize) -> Result<Self, BitmapError> {
        let n = weight_count(size)?;
        Self::new(size, try_alloc(n, 1.0 / n as f32)?)
    }

    pub fn gaussian_blur() -> Self {
        Self::preset([
            [1.0 / 16.0, 2.0 / 16.0, 1.0 / 16.0],
            [2.0 / 16.0, 4.0 / 16.0, 2.0 / 16.0],
            [1.0 / 16.0, 2.0 / 16.0, 1.0 / 16.0],
        ])
    }

    /// Edge detection.
    pub fn outline() -> Self {
        Self::preset([[-1.0, -1.0, -1.0], [-1.0, 8.0, -1.0], [-1.0, -1.0, -1.0]])
    }

    pub fn emboss() -> Self {
        Self::preset([[-2.0, -1.0, 0.0], [-1.0, 1.0, 1.0], [0.0, 1.0, 2.0]])
    }

    pub fn sharpen() -> Self {
        Self::preset([[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]])
    }

    fn preset(rows: [[f32; 3]; 3]) -> Self {
        Self {
            size: 3,
            weights: rows.iter().flatten().copied().collect(),
        }
    }

    /// Side length (always odd).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from the center to an edge: `size / 2`.
    pub fn offset(&self) -> usize {
        self.size / 2
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Weight at (`row`, `col`), both in `0..size`.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.weights[row * self.size + col]
    }
}

/// Number of weights in a `size x size` kernel; `size` must be odd.
fn weight_count(size: usize) -> Result<usize, BitmapError> {
    if size % 2 == 0 {
        return Err(BitmapError::InvalidKernel(format!(
            "kernel size must be odd, got {size}"
        )));
    }
    size.checked_mul(size)
        .ok_or_else(|| BitmapError::InvalidKernel(format!("kernel size {size} overflows")))
}
