//! Generation errors

use thiserror::Error;

/// Errors raised while building a generation request
///
/// Generation itself cannot fail; only the inputs that describe it can.
#[derive(Debug, Error)]
pub enum GenError {
    #[error("{axis} must not be negative, got {value}")]
    NegativeDimension { axis: &'static str, value: i64 },

    #[error("{axis} of {value} exceeds the maximum of {max}")]
    TooLarge {
        axis: &'static str,
        value: i64,
        max: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}
