use thiserror::Error;

/// Errors raised while training a color model or classifying an image.
///
/// Numerically degenerate statistics are never errors: zero deviations,
/// zero brightness denominators and zero variations are clamped to 1.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LambertainError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error(
        "dimension mismatch: expected {expected_width}x{expected_height}, got {actual_width}x{actual_height}"
    )]
    DimensionMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },
}

impl LambertainError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn dimension_mismatch(expected: (u32, u32), actual: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            expected_width: expected.0,
            expected_height: expected.1,
            actual_width: actual.0,
            actual_height: actual.1,
        }
    }
}

pub type Result<T> = std::result::Result<T, LambertainError>;

/// Fail with `DimensionMismatch` unless both sizes are equal.
pub fn ensure_same_size(expected: (u32, u32), actual: (u32, u32)) -> Result<()> {
    if expected != actual {
        return Err(LambertainError::dimension_mismatch(expected, actual));
    }
    Ok(())
}
