//! Single quaternion values and the Hamilton product.
//!
//! Products are exposed as named functions with explicit operand order rather
//! than through `std::ops::Mul`, since `p * q != q * p` in general.

use std::ops::{Add, Neg, Sub};

/// A quaternion `w + x·i + y·j + z·k`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Quaternion {
    /// Scalar (real) component
    pub w: f64,
    /// i component
    pub x: f64,
    /// j component
    pub y: f64,
    /// k component
    pub z: f64,
}

/// 1/√3, the component weight of the grey axis.
pub const FRAC_1_SQRT_3: f64 = 0.577_350_269_189_625_8;

impl Quaternion {
    /// The unit pure quaternion `(i + j + k)/√3`. Pixels along this axis are
    /// achromatic (R = G = B).
    pub const GRAY_AXIS: Quaternion = Quaternion::new(0.0, FRAC_1_SQRT_3, FRAC_1_SQRT_3, FRAC_1_SQRT_3);

    pub const ZERO: Quaternion = Quaternion::new(0.0, 0.0, 0.0, 0.0);
    pub const ONE: Quaternion = Quaternion::new(1.0, 0.0, 0.0, 0.0);
    pub const I: Quaternion = Quaternion::new(0.0, 1.0, 0.0, 0.0);
    pub const J: Quaternion = Quaternion::new(0.0, 0.0, 1.0, 0.0);
    pub const K: Quaternion = Quaternion::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Pure quaternion from an RGB triple (w = 0).
    pub const fn pure(r: f64, g: f64, b: f64) -> Self {
        Self::new(0.0, r, g, b)
    }

    pub const fn to_array(self) -> [f64; 4] {
        [self.w, self.x, self.y, self.z]
    }

    pub fn conjugate(self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    pub fn norm_squared(self) -> f64 {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn norm(self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// True when the scalar part vanishes and the norm is one, within `tolerance`.
    pub fn is_unit_pure(self, tolerance: f64) -> bool {
        self.w.abs() <= tolerance && (self.norm() - 1.0).abs() <= tolerance
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.w * factor, self.x * factor, self.y * factor, self.z * factor)
    }

    /// Hamilton product `self · rhs` (self on the left).
    pub fn hamilton(self, rhs: Self) -> Self {
        hamilton_product(self.to_array(), rhs.to_array()).into()
    }

    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.w - other.w).abs() < epsilon
            && (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }
}

// Addition commutes, so it is safe to overload. Multiplication is not.
impl Add for Quaternion {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.w + rhs.w, self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Quaternion {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.w - rhs.w, self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.w, -self.x, -self.y, -self.z)
    }
}

impl From<[f64; 4]> for Quaternion {
    fn from(q: [f64; 4]) -> Self {
        Self::new(q[0], q[1], q[2], q[3])
    }
}

/// Hamilton product of `p · q` on raw component arrays `[w, x, y, z]`.
#[inline]
pub fn hamilton_product(p: [f64; 4], q: [f64; 4]) -> [f64; 4] {
    [
        p[0] * q[0] - p[1] * q[1] - p[2] * q[2] - p[3] * q[3],
        p[0] * q[1] + p[1] * q[0] + p[2] * q[3] - p[3] * q[2],
        p[0] * q[2] - p[1] * q[3] + p[2] * q[0] + p[3] * q[1],
        p[0] * q[3] + p[1] * q[2] - p[2] * q[1] + p[3] * q[0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_basis_products() {
        assert!(Quaternion::I.hamilton(Quaternion::J).approx_eq(&Quaternion::K, EPS));
        assert!(Quaternion::J.hamilton(Quaternion::K).approx_eq(&Quaternion::I, EPS));
        assert!(Quaternion::K.hamilton(Quaternion::I).approx_eq(&Quaternion::J, EPS));
        assert!(Quaternion::J.hamilton(Quaternion::I).approx_eq(&-Quaternion::K, EPS));
        assert!(Quaternion::I.hamilton(Quaternion::I).approx_eq(&-Quaternion::ONE, EPS));
    }

    #[test]
    fn test_gray_axis_is_unit_pure() {
        assert!(Quaternion::GRAY_AXIS.is_unit_pure(1e-12));
        // A unit pure quaternion squares to -1
        let sq = Quaternion::GRAY_AXIS.hamilton(Quaternion::GRAY_AXIS);
        assert!(sq.approx_eq(&Quaternion::new(-1.0, 0.0, 0.0, 0.0), EPS));
    }

    #[test]
    fn test_conjugate_product_is_norm_squared() {
        let q = Quaternion::new(0.3, -1.2, 2.5, 0.7);
        let r = q.hamilton(q.conjugate());
        assert!((r.w - q.norm_squared()).abs() < EPS);
        assert!(r.x.abs() < EPS && r.y.abs() < EPS && r.z.abs() < EPS);
    }
}
