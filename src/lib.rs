//! Quaternion Colour Template Matching
//!
//! Locates a colour template inside a colour image by correlating them in the
//! quaternion Fourier domain. Each RGB pixel becomes the pure quaternion
//! `R·i + G·j + B·k`, so the match score responds to hue and not only to
//! luminance.
//!
//! ## Pipeline
//!
//! 1. **Embedding** (`quaternion::array::embed`): both inputs are zero padded
//!    to a common fast-transform size and embedded as pure quaternions.
//! 2. **Spectra** (`quaternion::qfft::transform`): decoupled QDFT, computed as
//!    two ordinary complex FFTs after a fixed orthonormal basis change.
//! 3. **Decomposition** (`quaternion::decompose::decompose`): the template
//!    spectrum is split into the parts commuting and anti-commuting with the
//!    grey axis `(i + j + k)/√3`.
//! 4. **Phase correlation** (`image::matcher::ColorCorrelationEngine::correlate`):
//!    each part is multiplied with the conjugate of the matching image
//!    spectrum, the sum is reduced to unit quaternions and transformed back.
//!    The surface is the per-pixel quaternion modulus.
//! 5. **Peaks** (`image::peaks::find_matches`): threshold, 8-connected
//!    components and mapping from peak position to template offset.
//!
//! ```no_run
//! use quaternion_color_matching::{ColorCorrelationEngine, ColorImage, PeakConfig};
//!
//! # fn main() -> quaternion_color_matching::Result<()> {
//! let image = ColorImage::from_file("scene.png")?;
//! let template = ColorImage::from_file("logo.png")?;
//! let engine = ColorCorrelationEngine::default();
//! for m in engine.match_template(&image, &template, &PeakConfig::default())? {
//!     println!("template at ({}, {}) score {:.3}", m.x, m.y, m.correlation);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod image;
pub mod quaternion;

pub use error::{QuaternionMatchingError, Result};
pub use self::image::{
    annotate_image_with_matches, correlate, find_matches, loader::TestShape, matcher::DEFAULT_INTENSITY_SCALE,
    peaks::ColorTemplateMatch, save_debug_output, ColorCorrelationEngine, ColorImage, CorrelationConfig,
    CorrelationSurface, DebugOutputConfig, PeakConfig,
};
pub use quaternion::{Direction, Orientation, Quaternion, QuaternionArray, ZeroNormPolicy};
pub use self::image::fft::PaddingPolicy;
