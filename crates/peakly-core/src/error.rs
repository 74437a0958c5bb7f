//! Library error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PeaklyError {
    /// A rating outside the 1..=10 slider range.
    #[error("rating {0} is outside the 1..=10 range")]
    RatingOutOfRange(i64),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, PeaklyError>;
