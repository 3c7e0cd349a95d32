pub mod fft;
pub mod loader;
pub mod matcher;
pub mod peaks;
pub mod surface;

use crate::image::peaks::ColorTemplateMatch;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use std::path::Path;

/// Define a consistent colour palette for debugging annotations
pub struct DebugColors;
impl DebugColors {
    // Strong match (high confidence) - bright green
    pub const STRONG: Rgb<u8> = Rgb([0, 255, 0]);
    // Good match - yellow
    pub const GOOD: Rgb<u8> = Rgb([255, 255, 0]);
    // Fair match - orange
    pub const FAIR: Rgb<u8> = Rgb([255, 165, 0]);
    // Weak match - red
    pub const WEAK: Rgb<u8> = Rgb([255, 0, 0]);
}

impl DebugColors {
    pub fn for_confidence(confidence: f64) -> Rgb<u8> {
        if confidence > 0.9 {
            DebugColors::STRONG
        } else if confidence > 0.8 {
            DebugColors::GOOD
        } else if confidence > 0.7 {
            DebugColors::FAIR
        } else {
            DebugColors::WEAK
        }
    }
}

/// Draw a box over each match (top-left at the match offset) and a crosshair
/// at the box centre.
pub fn annotate_image_with_matches(
    image: &mut RgbImage,
    matches: &[ColorTemplateMatch],
    template_width: u32,
    template_height: u32,
) {
    for m in matches {
        let colour = DebugColors::for_confidence(m.confidence);

        let rect = Rect::at(m.x as i32, m.y as i32).of_size(template_width.max(1), template_height.max(1));
        draw_hollow_rect_mut(image, rect, colour);

        let centre_x = (m.x + template_width / 2) as i32;
        let centre_y = (m.y + template_height / 2) as i32;
        let cross_size = 4i32.min(template_width.min(template_height) as i32 / 2);
        for d in -cross_size..=cross_size {
            let (x, y) = (centre_x + d, centre_y);
            if x >= 0 && (x as u32) < image.width() && (y as u32) < image.height() {
                image.put_pixel(x as u32, y as u32, colour);
            }
            let (x, y) = (centre_x, centre_y + d);
            if y >= 0 && (x as u32) < image.width() && (y as u32) < image.height() {
                image.put_pixel(x as u32, y as u32, colour);
            }
        }

        log::debug!(
            "Match annotation: ({}, {}) correlation: {:.3}, confidence: {:.3}",
            m.x,
            m.y,
            m.correlation,
            m.confidence
        );
    }
}

/// Configuration for debug output
#[derive(Debug, Clone)]
pub struct DebugOutputConfig {
    /// Whether debug output should be saved
    pub enabled: bool,
    /// Base directory for saving debug output
    pub output_dir: Option<String>,
}

impl Default for DebugOutputConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            output_dir: None,
        }
    }
}

/// Save an annotated image and log what was found.
pub fn save_debug_output<P: AsRef<Path>>(
    image: &RgbImage,
    filename: P,
    matches_count: usize,
    processing_time: std::time::Duration,
    methodology: &str,
    config: Option<&DebugOutputConfig>,
) -> crate::error::Result<()> {
    let default_config = DebugOutputConfig::default();
    let config = config.unwrap_or(&default_config);

    if config.enabled {
        let path = if let Some(ref dir) = config.output_dir {
            std::path::Path::new(dir).join(filename.as_ref())
        } else {
            filename.as_ref().to_path_buf()
        };

        image.save(&path)?;
        log::info!(
            "Debug output saved: {} with {} matches. Processing time: {:.3}ms, Method: {}",
            path.display(),
            matches_count,
            processing_time.as_secs_f64() * 1e3,
            methodology
        );
    }

    Ok(())
}

pub use loader::ColorImage;
pub use matcher::{correlate, ColorCorrelationEngine, CorrelationConfig};
pub use peaks::{find_matches, PeakConfig};
pub use surface::CorrelationSurface;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_match(x: u32, y: u32, confidence: f64) -> ColorTemplateMatch {
        ColorTemplateMatch {
            x,
            y,
            correlation: confidence,
            confidence,
            peak: (0, 0),
            centroid: (0.0, 0.0),
            area: 1,
        }
    }

    #[test]
    fn test_annotation_draws_box_outline() {
        let mut image = RgbImage::new(20, 20);
        annotate_image_with_matches(&mut image, &[sample_match(4, 5, 0.95)], 6, 6);
        assert_eq!(*image.get_pixel(4, 5), DebugColors::STRONG);
        assert_eq!(*image.get_pixel(9, 10), DebugColors::STRONG);
        assert_eq!(*image.get_pixel(0, 0), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_annotation_clips_at_border() {
        let mut image = RgbImage::new(8, 8);
        annotate_image_with_matches(&mut image, &[sample_match(6, 6, 0.5)], 6, 6);
        assert_eq!(*image.get_pixel(6, 6), DebugColors::WEAK);
    }

    #[test]
    fn test_disabled_debug_output_writes_nothing() {
        let image = RgbImage::new(2, 2);
        let config = DebugOutputConfig {
            enabled: false,
            output_dir: Some("/nonexistent/dir".to_string()),
        };
        let result = save_debug_output(
            &image,
            "never.png",
            0,
            std::time::Duration::from_millis(1),
            "test",
            Some(&config),
        );
        assert!(result.is_ok());
    }
}
