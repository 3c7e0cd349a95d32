use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuaternionMatchingError {
    #[error("Shape error: {0}")]
    Shape(String),

    #[error("Transform size {rows}x{cols} is not fast-transform friendly (pad to 2^a 3^b 5^c first)")]
    Precondition { rows: usize, cols: usize },

    #[error("Zero-norm quaternion at pixel {index} cannot be normalised")]
    NumericDegeneracy { index: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Other error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, QuaternionMatchingError>;
