//! Quaternion-valued images and the pointwise algebra over them.
//!
//! A [`QuaternionArray`] stores four row-major `f64` planes (w, x, y, z).
//! Every operation here returns a freshly allocated array; nothing is
//! modified in place once it has been handed to the next stage.

use crate::error::{QuaternionMatchingError, Result};
use crate::image::loader::ColorImage;
use crate::quaternion::scalar::{hamilton_product, Quaternion};

/// Norm below which a pixel is considered degenerate by [`normalize`].
pub const DEFAULT_ZERO_NORM_TOLERANCE: f64 = 1e-10;

/// 2D grid of quaternions held as four parallel planes of identical shape.
#[derive(Debug, Clone, PartialEq)]
pub struct QuaternionArray {
    rows: usize,
    cols: usize,
    planes: [Vec<f64>; 4],
}

impl QuaternionArray {
    /// Zero quaternion at every pixel.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, Quaternion::ZERO)
    }

    /// The same quaternion at every pixel.
    pub fn filled(rows: usize, cols: usize, value: Quaternion) -> Self {
        let n = rows * cols;
        let planes = value.to_array().map(|v| vec![v; n]);
        Self { rows, cols, planes }
    }

    /// A 1×1 array holding `value`, usable as a broadcast operand.
    pub fn scalar(value: Quaternion) -> Self {
        Self::filled(1, 1, value)
    }

    /// Build from four planes, checking that each holds `rows * cols` samples.
    pub fn from_planes(rows: usize, cols: usize, planes: [Vec<f64>; 4]) -> Result<Self> {
        let expected = rows * cols;
        if let Some((c, plane)) = planes.iter().enumerate().find(|(_, p)| p.len() != expected) {
            return Err(QuaternionMatchingError::Shape(format!(
                "plane {} holds {} samples, expected {}x{} = {}",
                c,
                plane.len(),
                rows,
                cols,
                expected
            )));
        }
        Ok(Self { rows, cols, planes })
    }

    /// Build pixel by pixel from a closure over the flat row-major index.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize) -> [f64; 4],
    {
        let n = rows * cols;
        let mut planes: [Vec<f64>; 4] = std::array::from_fn(|_| Vec::with_capacity(n));
        for i in 0..n {
            for (plane, v) in planes.iter_mut().zip(f(i)) {
                plane.push(v);
            }
        }
        Self { rows, cols, planes }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One of the four component planes, `0 = w` through `3 = z`.
    pub fn plane(&self, component: usize) -> &[f64] {
        &self.planes[component]
    }

    pub fn w(&self) -> &[f64] {
        &self.planes[0]
    }

    pub fn x(&self) -> &[f64] {
        &self.planes[1]
    }

    pub fn y(&self) -> &[f64] {
        &self.planes[2]
    }

    pub fn z(&self) -> &[f64] {
        &self.planes[3]
    }

    /// Components of the pixel at flat index `index`.
    #[inline]
    pub fn pixel(&self, index: usize) -> [f64; 4] {
        [
            self.planes[0][index],
            self.planes[1][index],
            self.planes[2][index],
            self.planes[3][index],
        ]
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Quaternion> {
        if row < self.rows && col < self.cols {
            Some(self.pixel(row * self.cols + col).into())
        } else {
            None
        }
    }

    /// Apply `f` to every pixel, producing a new array of the same shape.
    pub fn map<F>(&self, mut f: F) -> Self
    where
        F: FnMut([f64; 4]) -> [f64; 4],
    {
        Self::from_fn(self.rows, self.cols, |i| f(self.pixel(i)))
    }

    /// Combine two same-shape arrays pixel by pixel.
    pub fn zip_map<F>(&self, other: &Self, op: &str, mut f: F) -> Result<Self>
    where
        F: FnMut([f64; 4], [f64; 4]) -> [f64; 4],
    {
        ensure_same_shape(self, other, op)?;
        Ok(Self::from_fn(self.rows, self.cols, |i| f(self.pixel(i), other.pixel(i))))
    }

    fn is_single(&self) -> bool {
        self.rows == 1 && self.cols == 1
    }
}

fn ensure_same_shape(a: &QuaternionArray, b: &QuaternionArray, op: &str) -> Result<()> {
    if a.shape() != b.shape() {
        return Err(QuaternionMatchingError::Shape(format!(
            "{}: operand shapes differ ({}x{} vs {}x{})",
            op, a.rows, a.cols, b.rows, b.cols
        )));
    }
    Ok(())
}

/// Embed a 3-channel colour image as pure quaternions: w = 0, x/y/z = R/G/B.
///
/// `scale` multiplies every sample (e.g. `1/255` to land in `[0, 1]`).
pub fn embed(image: &ColorImage, scale: Option<f64>) -> Result<QuaternionArray> {
    if image.channels != 3 {
        return Err(QuaternionMatchingError::Shape(format!(
            "embed expects 3 colour channels, got {}",
            image.channels
        )));
    }
    let rows = image.height as usize;
    let cols = image.width as usize;
    if rows == 0 || cols == 0 || image.data.len() != rows * cols * 3 {
        return Err(QuaternionMatchingError::Shape(format!(
            "embed expects a non-empty {}x{}x3 image, got {} samples",
            rows,
            cols,
            image.data.len()
        )));
    }

    let factor = scale.unwrap_or(1.0);
    Ok(QuaternionArray::from_fn(rows, cols, |i| {
        let rgb = &image.data[i * 3..i * 3 + 3];
        [0.0, rgb[0] * factor, rgb[1] * factor, rgb[2] * factor]
    }))
}

/// Negate the vector part of every pixel.
pub fn conjugate(q: &QuaternionArray) -> QuaternionArray {
    q.map(|[w, x, y, z]| [w, -x, -y, -z])
}

/// What [`normalize`] does with a pixel whose norm is at or below `tolerance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZeroNormPolicy {
    /// Replace the pixel with the zero quaternion.
    MapToZero { tolerance: f64 },
    /// Fail the whole call with `NumericDegeneracy`.
    Reject { tolerance: f64 },
}

impl ZeroNormPolicy {
    pub fn tolerance(&self) -> f64 {
        match *self {
            ZeroNormPolicy::MapToZero { tolerance } | ZeroNormPolicy::Reject { tolerance } => tolerance,
        }
    }
}

impl Default for ZeroNormPolicy {
    fn default() -> Self {
        ZeroNormPolicy::MapToZero {
            tolerance: DEFAULT_ZERO_NORM_TOLERANCE,
        }
    }
}

/// Divide every pixel by its Euclidean norm.
pub fn normalize(q: &QuaternionArray, policy: ZeroNormPolicy) -> Result<QuaternionArray> {
    let tolerance = policy.tolerance();

    if let ZeroNormPolicy::Reject { .. } = policy {
        if let Some(index) = (0..q.len()).find(|&i| norm_of(q.pixel(i)) <= tolerance) {
            return Err(QuaternionMatchingError::NumericDegeneracy { index });
        }
    }

    let mut degenerate = 0usize;
    let out = q.map(|p| {
        let n = norm_of(p);
        if n <= tolerance {
            degenerate += 1;
            [0.0; 4]
        } else {
            p.map(|v| v / n)
        }
    });

    if degenerate > 0 {
        log::debug!("normalize: {} of {} pixels mapped to zero", degenerate, q.len());
    }
    Ok(out)
}

#[inline]
fn norm_of(p: [f64; 4]) -> f64 {
    (p[0] * p[0] + p[1] * p[1] + p[2] * p[2] + p[3] * p[3]).sqrt()
}

/// Elementwise Hamilton product `a · b` (a on the left).
pub fn multiply(a: &QuaternionArray, b: &QuaternionArray) -> Result<QuaternionArray> {
    a.zip_map(b, "multiply", hamilton_product)
}

/// Broadcast left product `p · b` for every pixel of `b`.
pub fn multiply_scalar_left(p: Quaternion, b: &QuaternionArray) -> QuaternionArray {
    let p = p.to_array();
    b.map(|q| hamilton_product(p, q))
}

/// Broadcast right product `a · q` for every pixel of `a`.
pub fn multiply_scalar_right(a: &QuaternionArray, q: Quaternion) -> QuaternionArray {
    let q = q.to_array();
    a.map(|p| hamilton_product(p, q))
}

/// Either side of a product: a full array or a single quaternion.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Array(&'a QuaternionArray),
    Scalar(Quaternion),
}

/// Dispatch the three product shapes. A 1×1 array counts as a scalar.
pub fn multiply_operands(lhs: Operand<'_>, rhs: Operand<'_>) -> Result<QuaternionArray> {
    match (collapse(lhs), collapse(rhs)) {
        (Operand::Array(a), Operand::Array(b)) => multiply(a, b),
        (Operand::Scalar(p), Operand::Array(b)) => Ok(multiply_scalar_left(p, b)),
        (Operand::Array(a), Operand::Scalar(q)) => Ok(multiply_scalar_right(a, q)),
        (Operand::Scalar(p), Operand::Scalar(q)) => Ok(QuaternionArray::scalar(p.hamilton(q))),
    }
}

fn collapse(operand: Operand<'_>) -> Operand<'_> {
    match operand {
        Operand::Array(a) if a.is_single() => Operand::Scalar(a.pixel(0).into()),
        other => other,
    }
}

pub fn add(a: &QuaternionArray, b: &QuaternionArray) -> Result<QuaternionArray> {
    a.zip_map(b, "add", |p, q| [p[0] + q[0], p[1] + q[1], p[2] + q[2], p[3] + q[3]])
}

pub fn sub(a: &QuaternionArray, b: &QuaternionArray) -> Result<QuaternionArray> {
    a.zip_map(b, "sub", |p, q| [p[0] - q[0], p[1] - q[1], p[2] - q[2], p[3] - q[3]])
}

pub fn scale(a: &QuaternionArray, factor: f64) -> QuaternionArray {
    a.map(|p| p.map(|v| v * factor))
}

/// Per-pixel norm `sqrt(w² + x² + y² + z²)`, row-major.
pub fn magnitude(a: &QuaternionArray) -> Vec<f64> {
    (0..a.len()).map(|i| norm_of(a.pixel(i))).collect()
}
