//! Match extraction from a correlation surface: threshold, 8-connected
//! component labelling, one match per component.

use crate::error::{QuaternionMatchingError, Result};
use crate::image::surface::CorrelationSurface;
use image::{GrayImage, Luma};
use imageproc::region_labelling::{connected_components, Connectivity};
use std::collections::BTreeMap;

/// Result of a single template match.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTemplateMatch {
    /// Template top-left column in the source image.
    pub x: u32,
    /// Template top-left row in the source image.
    pub y: u32,
    /// Raw surface value at the component's peak.
    pub correlation: f64,
    /// Peak value after min/max normalisation of the surface, in `[0, 1]`.
    pub confidence: f64,
    /// Peak location in the surface, `(row, col)`.
    pub peak: (usize, usize),
    /// Component centroid in the surface, `(row, col)`.
    pub centroid: (f64, f64),
    /// Number of above-threshold pixels in the component.
    pub area: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeakConfig {
    /// Fraction of the normalised surface range a pixel must reach.
    pub threshold: f64,
    /// Maximum number of matches returned, strongest first.
    pub max_matches: usize,
}

impl Default for PeakConfig {
    fn default() -> Self {
        Self {
            threshold: 200.0 / 255.0,
            max_matches: 10,
        }
    }
}

#[derive(Default)]
struct Component {
    area: u32,
    sum_row: f64,
    sum_col: f64,
    best: Option<(f64, usize, usize)>,
}

/// Label the above-threshold regions of `surface` and return one match per
/// region, strongest first.
pub fn find_matches(surface: &CorrelationSurface, config: &PeakConfig) -> Result<Vec<ColorTemplateMatch>> {
    if !(0.0..=1.0).contains(&config.threshold) {
        return Err(QuaternionMatchingError::Other(format!(
            "peak threshold must lie in [0, 1], got {}",
            config.threshold
        )));
    }
    if surface.rows == 0 || surface.cols == 0 {
        return Ok(Vec::new());
    }

    let normalized = surface.normalized();
    let binary = GrayImage::from_fn(surface.cols as u32, surface.rows as u32, |x, y| {
        let v = normalized.data[y as usize * surface.cols + x as usize];
        if v > 0.0 && v >= config.threshold {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    });

    let labels = connected_components(&binary, Connectivity::Eight, Luma([0u8]));
    let mut components: BTreeMap<u32, Component> = BTreeMap::new();

    for (col, row, label) in labels.enumerate_pixels() {
        if label[0] == 0 {
            continue;
        }
        let (row, col) = (row as usize, col as usize);
        let value = surface.data[row * surface.cols + col];
        let component = components.entry(label[0]).or_default();
        component.area += 1;
        component.sum_row += row as f64;
        component.sum_col += col as f64;
        if component.best.map_or(true, |(best, _, _)| value > best) {
            component.best = Some((value, row, col));
        }
    }

    let mut matches: Vec<ColorTemplateMatch> = components
        .into_values()
        .filter_map(|c| {
            let (value, row, col) = c.best?;
            let (x, y) = surface.template_offset(row, col);
            Some(ColorTemplateMatch {
                x: x as u32,
                y: y as u32,
                correlation: value,
                confidence: normalized.data[row * surface.cols + col],
                peak: (row, col),
                centroid: (c.sum_row / c.area as f64, c.sum_col / c.area as f64),
                area: c.area,
            })
        })
        .collect();

    matches.sort_by(|a, b| b.correlation.total_cmp(&a.correlation));
    matches.truncate(config.max_matches);
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface_with_peaks(rows: usize, cols: usize, peaks: &[(usize, usize, f64)]) -> CorrelationSurface {
        let mut data = vec![0.1; rows * cols];
        for &(r, c, v) in peaks {
            data[r * cols + c] = v;
        }
        CorrelationSurface::new(rows, cols, data).unwrap()
    }

    #[test]
    fn test_one_match_per_isolated_peak() {
        let surface = surface_with_peaks(10, 12, &[(2, 3, 5.0), (7, 9, 4.8), (2, 4, 4.9)]);
        let matches = find_matches(&surface, &PeakConfig::default()).unwrap();
        assert_eq!(matches.len(), 2);

        assert_eq!(matches[0].peak, (2, 3));
        assert_eq!(matches[0].area, 2);
        assert_eq!(matches[0].centroid, (2.0, 3.5));
        assert_eq!((matches[0].x, matches[0].y), (9, 8));
        assert_eq!(matches[0].confidence, 1.0);

        assert_eq!(matches[1].peak, (7, 9));
        assert_eq!((matches[1].x, matches[1].y), (3, 3));
    }

    #[test]
    fn test_max_matches_truncates() {
        let surface = surface_with_peaks(8, 8, &[(1, 1, 3.0), (5, 5, 2.9), (1, 6, 2.95)]);
        let config = PeakConfig {
            max_matches: 1,
            ..PeakConfig::default()
        };
        let matches = find_matches(&surface, &config).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].peak, (1, 1));
    }

    #[test]
    fn test_constant_surface_has_no_matches() {
        let surface = CorrelationSurface::new(4, 4, vec![1.0; 16]).unwrap();
        assert!(find_matches(&surface, &PeakConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_threshold_out_of_range() {
        let surface = surface_with_peaks(4, 4, &[(0, 0, 1.0)]);
        let config = PeakConfig {
            threshold: 1.5,
            ..PeakConfig::default()
        };
        assert!(find_matches(&surface, &config).is_err());
    }
}
