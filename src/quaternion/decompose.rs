//! Split a quaternion spectrum into the parts that commute and anti-commute
//! with a unit pure axis μ.
//!
//! For unit pure μ we have μ² = −1, so `μ·q·μ = −q` when q commutes with μ and
//! `μ·q·μ = q` when it anti-commutes. Hence `(q − μqμ)/2` is the commuting
//! (parallel) part and `q − parallel = (q + μqμ)/2` the orthogonal part.

use crate::error::{QuaternionMatchingError, Result};
use crate::quaternion::array::{multiply_scalar_left, multiply_scalar_right, scale, sub, QuaternionArray};
use crate::quaternion::scalar::Quaternion;

const AXIS_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct AxisDecomposition {
    /// Component commuting with the axis.
    pub parallel: QuaternionArray,
    /// Remainder, anti-commuting with the axis.
    pub orthogonal: QuaternionArray,
}

pub fn decompose(spectrum: &QuaternionArray, axis: Quaternion) -> Result<AxisDecomposition> {
    if !axis.is_unit_pure(AXIS_TOLERANCE) {
        return Err(QuaternionMatchingError::Shape(format!(
            "decomposition axis must be a unit pure quaternion, got {:?}",
            axis
        )));
    }

    let sandwiched = multiply_scalar_right(&multiply_scalar_left(axis, spectrum), axis);
    let parallel = scale(&sub(spectrum, &sandwiched)?, 0.5);
    let orthogonal = sub(spectrum, &parallel)?;

    Ok(AxisDecomposition { parallel, orthogonal })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quaternion::array::{add, multiply};
    use approx::assert_abs_diff_eq;

    fn spectrum() -> QuaternionArray {
        QuaternionArray::from_fn(3, 4, |i| {
            let t = i as f64;
            [t.cos(), 0.3 * t - 1.0, (2.0 * t).sin(), 1.0 / (1.0 + t)]
        })
    }

    fn assert_close(a: &QuaternionArray, b: &QuaternionArray) {
        for i in 0..a.len() {
            for (x, y) in a.pixel(i).iter().zip(b.pixel(i)) {
                assert_abs_diff_eq!(*x, y, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_parts_sum_to_original() {
        let t = spectrum();
        let parts = decompose(&t, Quaternion::GRAY_AXIS).unwrap();
        assert_close(&add(&parts.parallel, &parts.orthogonal).unwrap(), &t);
    }

    #[test]
    fn test_parallel_commutes_and_orthogonal_anticommutes() {
        let t = spectrum();
        let mu = Quaternion::GRAY_AXIS;
        let mu_array = QuaternionArray::filled(t.rows(), t.cols(), mu);
        let parts = decompose(&t, mu).unwrap();

        let left = multiply(&mu_array, &parts.parallel).unwrap();
        let right = multiply(&parts.parallel, &mu_array).unwrap();
        assert_close(&left, &right);

        let left = multiply(&mu_array, &parts.orthogonal).unwrap();
        let right = scale(&multiply(&parts.orthogonal, &mu_array).unwrap(), -1.0);
        assert_close(&left, &right);
    }

    #[test]
    fn test_axis_aligned_input_is_all_parallel() {
        let t = QuaternionArray::filled(2, 2, Quaternion::new(0.7, 0.2, 0.2, 0.2));
        let parts = decompose(&t, Quaternion::GRAY_AXIS).unwrap();
        assert_close(&parts.parallel, &t);
        for i in 0..t.len() {
            for v in parts.orthogonal.pixel(i) {
                assert_abs_diff_eq!(v, 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_rejects_non_unit_axis() {
        let t = spectrum();
        assert!(decompose(&t, Quaternion::new(0.0, 1.0, 1.0, 1.0)).is_err());
        assert!(decompose(&t, Quaternion::ONE).is_err());
    }
}
