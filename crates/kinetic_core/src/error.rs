//! Configuration error types

use thiserror::Error;

/// Errors raised while constructing animations and interpolators.
///
/// These are only ever produced at construction time; a successfully built
/// animation cannot fail while it is being ticked.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Duration must be strictly positive
    #[error("Animation duration must be greater than zero")]
    NonPositiveDuration,

    /// Repeat count below the infinite sentinel
    #[error("Invalid repeat count {0}: expected -1 (infinite) or a non-negative count")]
    InvalidRepeatCount(i32),

    /// Interpolator parameters outside their usable range
    #[error("Invalid {name} interpolator: {reason}")]
    InvalidInterpolator { name: &'static str, reason: String },

    /// Interpolator text could not be parsed
    #[error("Unknown interpolator '{0}'")]
    UnknownInterpolator(String),

    /// Timing configuration is frozen once the first tick has been observed,
    /// even if that tick fell inside the start offset
    #[error("Animation timing cannot change after it has started")]
    AlreadyStarted,

    /// Duration scale must be finite and positive; scale factors must be
    /// finite and non-zero
    #[error("Invalid scale factor {0}")]
    InvalidScale(f32),
}

impl ConfigError {
    /// Shorthand for [`ConfigError::InvalidInterpolator`]
    pub fn invalid_interpolator(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInterpolator {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
