// src/image/matcher.rs

//! Quaternion colour correlation.
//!
//! The image is transformed forward and inverse with the left QDFT, the
//! template forward with the right QDFT. The template spectrum is split about
//! the grey axis, each half is correlated against the matching image spectrum,
//! and the phase of the summed cross spectrum is transformed back into a real
//! match surface.

use crate::error::{QuaternionMatchingError, Result};
use crate::image::fft::PaddingPolicy;
use crate::image::loader::ColorImage;
use crate::image::peaks::{find_matches, ColorTemplateMatch, PeakConfig};
use crate::image::surface::CorrelationSurface;
use crate::quaternion::array::{add, conjugate, embed, magnitude, multiply, normalize, ZeroNormPolicy};
use crate::quaternion::decompose::decompose;
use crate::quaternion::qfft::{transform, transform_normalized, Direction, Orientation};
use crate::quaternion::scalar::Quaternion;
use log::debug;

/// Scale applied to 8-bit samples before embedding.
pub const DEFAULT_INTENSITY_SCALE: f64 = 1.0 / 255.0;

/// Parameters of the correlation pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationConfig {
    /// Unit pure axis the template spectrum is decomposed about.
    pub axis: Quaternion,
    /// Multiplier applied to every sample before embedding; `None` keeps raw values.
    pub intensity_scale: Option<f64>,
    /// How the padded transform size is chosen.
    pub padding: PaddingPolicy,
    /// Treatment of zero-norm pixels in the cross spectrum.
    pub zero_norm: ZeroNormPolicy,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            axis: Quaternion::GRAY_AXIS,
            intensity_scale: Some(DEFAULT_INTENSITY_SCALE),
            padding: PaddingPolicy::default(),
            zero_norm: ZeroNormPolicy::default(),
        }
    }
}

impl CorrelationConfig {
    pub fn with_axis(mut self, axis: Quaternion) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_intensity_scale(mut self, scale: Option<f64>) -> Self {
        self.intensity_scale = scale;
        self
    }

    pub fn with_padding(mut self, padding: PaddingPolicy) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_zero_norm(mut self, zero_norm: ZeroNormPolicy) -> Self {
        self.zero_norm = zero_norm;
        self
    }
}

/// Stateless colour correlation engine; holds only its configuration.
#[derive(Debug, Clone, Default)]
pub struct ColorCorrelationEngine {
    config: CorrelationConfig,
}

impl ColorCorrelationEngine {
    pub fn new(config: CorrelationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CorrelationConfig {
        &self.config
    }

    /// Working size `(rows, cols)` both inputs are padded to.
    pub fn padded_shape(&self, image: &ColorImage, template: &ColorImage) -> (usize, usize) {
        let rows = image.height.max(template.height) as usize;
        let cols = image.width.max(template.width) as usize;
        (self.config.padding.padded_len(rows), self.config.padding.padded_len(cols))
    }

    /// Correlation surface of `template` against `image` at the padded size.
    pub fn correlate(&self, image: &ColorImage, template: &ColorImage) -> Result<CorrelationSurface> {
        validate_input(image, "image")?;
        validate_input(template, "template")?;

        debug!(
            "Colour correlation: image {}x{}, template {}x{}",
            image.width, image.height, template.width, template.height
        );

        // ---------- Padding and embedding ----------
        let (rows, cols) = self.padded_shape(image, template);
        debug!("Padded working size: {}x{}", rows, cols);
        let q_image = embed(&pad_to(image, rows, cols), self.config.intensity_scale)?;
        let q_template = embed(&pad_to(template, rows, cols), self.config.intensity_scale)?;

        // ---------- Spectra ----------
        let ((image_fft, image_ifft), template_fft) = rayon::join(
            || {
                rayon::join(
                    || transform_normalized(&q_image, Direction::Forward, Orientation::Left),
                    || transform_normalized(&q_image, Direction::Inverse, Orientation::Left),
                )
            },
            || transform_normalized(&q_template, Direction::Forward, Orientation::Right),
        );
        let (image_fft, image_ifft, template_fft) = (image_fft?, image_ifft?, template_fft?);

        // ---------- Decomposition about the axis ----------
        let parts = decompose(&template_fft, self.config.axis)?;

        // ---------- Cross spectrum ----------
        let cross_parallel = multiply(&conjugate(&image_fft), &parts.parallel)?;
        let cross_orthogonal = multiply(&conjugate(&image_ifft), &parts.orthogonal)?;
        let cross = add(&cross_parallel, &cross_orthogonal)?;
        let phase = normalize(&cross, self.config.zero_norm)?;

        // ---------- Back to the spatial domain ----------
        let correlation = transform(&phase, Direction::Inverse, Orientation::Right)?;
        let surface = CorrelationSurface::new(rows, cols, magnitude(&correlation))?;

        debug!("Correlation surface ready: {}x{}", rows, cols);
        Ok(surface)
    }

    /// Correlate and extract the strongest matches.
    pub fn match_template(
        &self,
        image: &ColorImage,
        template: &ColorImage,
        peaks: &PeakConfig,
    ) -> Result<Vec<ColorTemplateMatch>> {
        let surface = self.correlate(image, template)?;
        let matches = find_matches(&surface, peaks)?;
        debug!("Found {} matches above threshold {:.3}", matches.len(), peaks.threshold);
        Ok(matches)
    }
}

/// [`ColorCorrelationEngine::correlate`] with the default configuration.
pub fn correlate(image: &ColorImage, template: &ColorImage) -> Result<CorrelationSurface> {
    ColorCorrelationEngine::default().correlate(image, template)
}

fn validate_input(image: &ColorImage, what: &str) -> Result<()> {
    if image.channels != 3 {
        return Err(QuaternionMatchingError::Shape(format!(
            "{} must have 3 channels, got {}",
            what, image.channels
        )));
    }
    let expected = image.width as usize * image.height as usize * 3;
    if image.width == 0 || image.height == 0 || image.data.len() != expected {
        return Err(QuaternionMatchingError::Shape(format!(
            "{} must be a non-empty {}x{}x3 image, got {} samples",
            what,
            image.width,
            image.height,
            image.data.len()
        )));
    }
    Ok(())
}

/// Copy `image` into the top-left corner of a black `rows x cols` canvas.
fn pad_to(image: &ColorImage, rows: usize, cols: usize) -> ColorImage {
    let mut padded = ColorImage::filled(cols as u32, rows as u32, [0.0; 3]);
    padded.paste(image, 0, 0);
    padded
}
