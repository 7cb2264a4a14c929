//! Error types shared across FrameLens crates.

/// Top-level error type for FrameLens operations.
#[derive(Debug, thiserror::Error)]
pub enum FramelensError {
    #[error("Capture error: {message}")]
    Capture { message: String },

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },

    #[error("Raster error: {message}")]
    Raster { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Dimension mismatch: expected {expected_width}x{expected_height}, got {actual_width}x{actual_height}")]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    #[error("Invalid parameter `{field}`: {value:?}")]
    InvalidParam { field: &'static str, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using FramelensError.
pub type FramelensResult<T> = Result<T, FramelensError>;

impl FramelensError {
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture {
            message: msg.into(),
        }
    }

    pub fn pipeline(msg: impl Into<String>) -> Self {
        Self::Pipeline {
            message: msg.into(),
        }
    }

    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn dimension_mismatch(expected: (usize, usize), actual: (usize, usize)) -> Self {
        Self::DimensionMismatch {
            expected_width: expected.0,
            expected_height: expected.1,
            actual_width: actual.0,
            actual_height: actual.1,
        }
    }

    pub fn invalid_param(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidParam {
            field,
            value: value.into(),
        }
    }
}
