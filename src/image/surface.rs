use crate::error::{QuaternionMatchingError, Result};
use image::{GrayImage, Luma};
use std::path::Path;

/// Represents an extreme value (min/max) and its location (value, (row, col))
pub type Extreme = (f64, (usize, usize));

/// Real-valued correlation surface at the padded transform size.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationSurface {
    pub data: Vec<f64>,
    pub rows: usize,
    pub cols: usize,
}

impl CorrelationSurface {
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(QuaternionMatchingError::Shape(format!(
                "surface of {}x{} needs {} values, got {}",
                rows,
                cols,
                rows * cols,
                data.len()
            )));
        }
        Ok(Self { data, rows, cols })
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Top-left `rows x cols` window, clipped to the surface.
    pub fn crop(&self, rows: usize, cols: usize) -> Self {
        let rows = rows.min(self.rows);
        let cols = cols.min(self.cols);
        let data = (0..rows)
            .flat_map(|r| self.data[r * self.cols..r * self.cols + cols].iter().copied())
            .collect();
        Self { data, rows, cols }
    }

    /// Finds the largest and smallest values and their locations.
    /// If there are multiple such values then the lexicographically smallest location is returned.
    pub fn find_extremes(&self) -> (Extreme, Extreme) {
        let mut max = (f64::NEG_INFINITY, (0, 0));
        let mut min = (f64::INFINITY, (0, 0));

        // Row-major scan with strict comparisons keeps the first hit on ties
        for (i, &value) in self.data.iter().enumerate() {
            let loc = (i / self.cols, i % self.cols);
            if value > max.0 {
                max = (value, loc);
            }
            if value < min.0 {
                min = (value, loc);
            }
        }

        (max, min)
    }

    /// Min/max rescale into `[0, 1]`. A constant surface maps to all zeros.
    pub fn normalized(&self) -> Self {
        let ((max_val, _), (min_val, _)) = self.find_extremes();
        let range = max_val - min_val;
        let data = if range > 0.0 {
            self.data.iter().map(|v| (v - min_val) / range).collect()
        } else {
            vec![0.0; self.data.len()]
        };
        Self {
            data,
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// 8-bit grayscale rendering of the min/max normalised surface.
    pub fn to_luma_image(&self) -> GrayImage {
        let normalized = self.normalized();
        GrayImage::from_fn(self.cols as u32, self.rows as u32, |x, y| {
            let v = normalized.data[y as usize * self.cols + x as usize];
            Luma([(v * 255.0).round().clamp(0.0, 255.0) as u8])
        })
    }

    /// Save the normalised surface as an 8-bit image (format from the extension).
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_luma_image().save(path)?;
        Ok(())
    }

    /// Template top-left offset `(x, y)` in the source image for a peak at
    /// `(row, col)`. The correlation is circular, so a template at `(x, y)`
    /// peaks at `((cols - x) mod cols, (rows - y) mod rows)`.
    pub fn template_offset(&self, row: usize, col: usize) -> (usize, usize) {
        ((self.cols - col % self.cols) % self.cols, (self.rows - row % self.rows) % self.rows)
    }
}
