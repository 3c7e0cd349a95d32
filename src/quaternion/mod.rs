pub mod array;
pub mod decompose;
pub mod qfft;
pub mod scalar;

pub use array::{
    conjugate, embed, multiply, multiply_operands, multiply_scalar_left, multiply_scalar_right, normalize, Operand,
    QuaternionArray, ZeroNormPolicy,
};
pub use decompose::{decompose, AxisDecomposition};
pub use qfft::{transform, transform_normalized, Direction, Orientation};
pub use scalar::Quaternion;
