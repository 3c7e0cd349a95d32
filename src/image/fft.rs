//! 2D complex FFT over row-major buffers, and the padding sizes it is fast on.
//!
//! The transforms here are unnormalised in both directions: forward followed by
//! inverse scales the input by `width * height`. Callers pick where the
//! normalisation goes.

use crate::error::{QuaternionMatchingError, Result};
use rustfft::{num_complex::Complex, FftDirection, FftPlanner};

/// How padded transform sizes are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaddingPolicy {
    /// Smallest `2^a 3^b 5^c` at or above the requested length.
    #[default]
    FiveSmooth,
    /// Smallest power of two at or above the requested length.
    PowerOfTwo,
}

impl PaddingPolicy {
    pub fn padded_len(&self, n: usize) -> usize {
        match self {
            PaddingPolicy::FiveSmooth => next_fast_size(n),
            PaddingPolicy::PowerOfTwo => n.max(1).next_power_of_two(),
        }
    }
}

/// True when `n` has no prime factor other than 2, 3 and 5.
///
/// Every power of two qualifies, so both padding policies produce sizes that
/// pass this check.
pub fn is_fast_size(n: usize) -> bool {
    if n == 0 {
        return false;
    }
    let mut m = n;
    for p in [2, 3, 5] {
        while m % p == 0 {
            m /= p;
        }
    }
    m == 1
}

/// Smallest fast size `>= n`.
pub fn next_fast_size(n: usize) -> usize {
    let mut m = n.max(1);
    while !is_fast_size(m) {
        m += 1;
    }
    m
}

/// Unnormalised 2D FFT of a row-major `height x width` complex buffer.
pub fn fft_2d(
    data: &[Complex<f64>],
    width: usize,
    height: usize,
    direction: FftDirection,
) -> Result<Vec<Complex<f64>>> {
    if width == 0 || height == 0 || data.len() != width * height {
        return Err(QuaternionMatchingError::Shape(format!(
            "fft_2d expects {}x{} = {} samples, got {}",
            height,
            width,
            width * height,
            data.len()
        )));
    }

    let mut planner = FftPlanner::new();
    let mut complex_data = data.to_vec();

    // Transform each row
    let fft_width = planner.plan_fft(width, direction);
    complex_data
        .chunks_exact_mut(width)
        .for_each(|row| fft_width.process(row));

    // Transpose for the column pass
    let mut transposed = vec![Complex::new(0.0, 0.0); width * height];
    (0..height)
        .flat_map(|y| (0..width).map(move |x| (y, x)))
        .for_each(|(y, x)| {
            transposed[x * height + y] = complex_data[y * width + x];
        });

    let fft_height = planner.plan_fft(height, direction);
    transposed
        .chunks_exact_mut(height)
        .for_each(|col| fft_height.process(col));

    // Transpose back
    (0..height)
        .flat_map(|y| (0..width).map(move |x| (y, x)))
        .for_each(|(y, x)| {
            complex_data[y * width + x] = transposed[x * height + y];
        });

    Ok(complex_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_fast_sizes() {
        for n in [1, 2, 3, 4, 5, 6, 8, 9, 10, 12, 15, 16, 24, 25, 27, 30, 64, 360] {
            assert!(is_fast_size(n), "{} should be fast", n);
        }
        for n in [0, 7, 11, 13, 14, 17, 49, 77] {
            assert!(!is_fast_size(n), "{} should not be fast", n);
        }
    }

    #[test]
    fn test_next_fast_size() {
        assert_eq!(next_fast_size(0), 1);
        assert_eq!(next_fast_size(7), 8);
        assert_eq!(next_fast_size(11), 12);
        assert_eq!(next_fast_size(13), 15);
        assert_eq!(next_fast_size(17), 18);
        assert_eq!(next_fast_size(16), 16);
    }

    #[test]
    fn test_padding_policies() {
        assert_eq!(PaddingPolicy::FiveSmooth.padded_len(13), 15);
        assert_eq!(PaddingPolicy::PowerOfTwo.padded_len(13), 16);
        assert_eq!(PaddingPolicy::PowerOfTwo.padded_len(16), 16);
        assert_eq!(PaddingPolicy::default(), PaddingPolicy::FiveSmooth);
    }

    #[test]
    fn test_fft_of_impulse_is_flat() {
        let (w, h) = (6, 4);
        let mut data = vec![Complex::new(0.0, 0.0); w * h];
        data[0] = Complex::new(1.0, 0.0);
        let spectrum = fft_2d(&data, w, h, FftDirection::Forward).unwrap();
        for v in spectrum {
            assert_abs_diff_eq!(v.re, 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(v.im, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_forward_inverse_scales_by_pixel_count() {
        let (w, h) = (5, 3);
        let data: Vec<Complex<f64>> = (0..w * h)
            .map(|i| Complex::new(i as f64 * 0.5 - 2.0, (i % 4) as f64))
            .collect();
        let spectrum = fft_2d(&data, w, h, FftDirection::Forward).unwrap();
        let back = fft_2d(&spectrum, w, h, FftDirection::Inverse).unwrap();
        let n = (w * h) as f64;
        for (orig, rec) in data.iter().zip(back.iter()) {
            assert_abs_diff_eq!(rec.re / n, orig.re, epsilon = 1e-10);
            assert_abs_diff_eq!(rec.im / n, orig.im, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_fft_rejects_bad_length() {
        let data = vec![Complex::new(0.0, 0.0); 7];
        assert!(fft_2d(&data, 2, 4, FftDirection::Forward).is_err());
    }
}
