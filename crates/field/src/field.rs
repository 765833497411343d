//! Dense 2D height grid produced by the generator.

use serde::Serialize;

/// Row-major grid of heights, `width × height`.
///
/// Cell `(x, y)` lives at `y * width + x`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoiseField {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

/// Summary statistics of a field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldStats {
    /// Smallest value.
    pub min: f32,
    /// Largest value.
    pub max: f32,
    /// Arithmetic mean.
    pub mean: f32,
}

impl NoiseField {
    /// Zero-filled field.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Wrap existing row-major data. Returns `None` when the length does not
    /// match `width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> Option<Self> {
        (data.len() == width * height).then_some(Self {
            width,
            height,
            data,
        })
    }

    pub(crate) fn from_raw(width: usize, height: usize, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at `(x, y)`.
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds.
    pub fn get(&self, x: usize, y: usize) -> f32 {
        assert!(x < self.width, "x out of bounds");
        assert!(y < self.height, "y out of bounds");
        self.data[y * self.width + x]
    }

    /// Row `y` as a slice.
    ///
    /// # Panics
    /// Panics if `y` is out of bounds.
    pub fn row(&self, y: usize) -> &[f32] {
        assert!(y < self.height, "y out of bounds");
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Column `x`, top to bottom.
    ///
    /// # Panics
    /// Panics if `x` is out of bounds.
    pub fn column(&self, x: usize) -> Vec<f32> {
        assert!(x < self.width, "x out of bounds");
        (0..self.height).map(|y| self.data[y * self.width + x]).collect()
    }

    /// Raw row-major values.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Consume the field, returning the row-major values.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Iterate over `(x, y, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        let width = self.width.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i % width, i / width, v))
    }

    /// Min, max and mean, or `None` for an empty field.
    pub fn stats(&self) -> Option<FieldStats> {
        if self.data.is_empty() {
            return None;
        }
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        let mut sum = 0.0f64;
        for &v in &self.data {
            min = min.min(v);
            max = max.max(v);
            sum += v as f64;
        }
        Some(FieldStats {
            min,
            max,
            mean: (sum / self.data.len() as f64) as f32,
        })
    }
}
