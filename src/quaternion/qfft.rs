//! Decoupled 2D quaternion Fourier transform.
//!
//! Each pixel `q = q0 + q1·i + q2·j + q3·k` is rewritten in the orthonormal
//! basis `{1, μ, ν, μν}` with `μ = (i + j + k)/√3`, which splits it into two
//! ordinary complex numbers `c1 + c2·ν`. The basis change is a fixed unitary
//! map, so it commutes with the spatial transform: both complex planes go
//! through a plain 2D FFT and the result is mapped back with the transpose.

use crate::error::{QuaternionMatchingError, Result};
use crate::image::fft::{fft_2d, is_fast_size};
use crate::quaternion::array::{scale, QuaternionArray};
use log::debug;
use rustfft::{num_complex::Complex, FftDirection};

const SQRT_2: f64 = std::f64::consts::SQRT_2;
const SQRT_3: f64 = 1.732_050_807_568_877_2;
const SQRT_6: f64 = 2.449_489_742_783_178;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Inverse,
}

impl From<Direction> for FftDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Forward => FftDirection::Forward,
            Direction::Inverse => FftDirection::Inverse,
        }
    }
}

/// Side on which the exponential kernel multiplies the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Left,
    Right,
}

impl Orientation {
    fn sign(self) -> f64 {
        match self {
            Orientation::Left => 1.0,
            Orientation::Right => -1.0,
        }
    }
}

/// The two complex planes of the basis change. Only lives inside [`transform`].
struct SpectrumPair {
    c1: Vec<Complex<f64>>,
    c2: Vec<Complex<f64>>,
}

impl SpectrumPair {
    fn decompose(q: &QuaternionArray, sigma: f64) -> Self {
        let (w, x, y, z) = (q.w(), q.x(), q.y(), q.z());
        let c1 = (0..q.len())
            .map(|i| Complex::new(w[i], (x[i] + y[i] + z[i]) / SQRT_3))
            .collect();
        let c2 = (0..q.len())
            .map(|i| Complex::new((y[i] - z[i]) / SQRT_2, sigma * (z[i] + y[i] - 2.0 * x[i]) / SQRT_6))
            .collect();
        Self { c1, c2 }
    }

    fn recombine(&self, rows: usize, cols: usize, sigma: f64) -> QuaternionArray {
        QuaternionArray::from_fn(rows, cols, |i| {
            let (a, b) = (self.c1[i], self.c2[i]);
            let common = a.im / SQRT_3;
            [
                a.re,
                common - sigma * 2.0 * b.im / SQRT_6,
                common + b.re / SQRT_2 + sigma * b.im / SQRT_6,
                common - b.re / SQRT_2 + sigma * b.im / SQRT_6,
            ]
        })
    }
}

/// Unnormalised QDFT of `q`.
///
/// Both dimensions must already be fast sizes (see
/// [`crate::image::fft::is_fast_size`]); pad before calling. A forward
/// transform followed by an inverse one with the same orientation returns the
/// input scaled by `rows * cols`.
pub fn transform(q: &QuaternionArray, direction: Direction, orientation: Orientation) -> Result<QuaternionArray> {
    let (rows, cols) = q.shape();
    if q.is_empty() {
        return Err(QuaternionMatchingError::Shape(format!(
            "cannot transform an empty {}x{} quaternion array",
            rows, cols
        )));
    }
    if !is_fast_size(rows) || !is_fast_size(cols) {
        return Err(QuaternionMatchingError::Precondition { rows, cols });
    }

    debug!("QDFT {:?}/{:?} on {}x{}", direction, orientation, rows, cols);

    let sigma = orientation.sign();
    let pair = SpectrumPair::decompose(q, sigma);
    let fft_direction = FftDirection::from(direction);

    let (c1, c2) = rayon::join(
        || fft_2d(&pair.c1, cols, rows, fft_direction),
        || fft_2d(&pair.c2, cols, rows, fft_direction),
    );
    let spectra = SpectrumPair { c1: c1?, c2: c2? };

    Ok(spectra.recombine(rows, cols, sigma))
}

/// [`transform`] followed by division by `√(rows·cols)`, so that a forward and
/// an inverse application compose to the identity.
pub fn transform_normalized(
    q: &QuaternionArray,
    direction: Direction,
    orientation: Orientation,
) -> Result<QuaternionArray> {
    let out = transform(q, direction, orientation)?;
    let factor = 1.0 / (out.len() as f64).sqrt();
    Ok(scale(&out, factor))
}
