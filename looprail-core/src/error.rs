//! Configuration errors

use thiserror::Error;

/// Errors produced when validating a [`crate::CarouselConfig`].
///
/// The engine itself never fails at runtime; bad tuning is the only thing
/// rejected up front.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A duration field is zero.
    #[error("{field} must be greater than zero")]
    ZeroDuration {
        /// Offending field.
        field: &'static str,
    },
    /// A pixel or velocity threshold is negative or not finite.
    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidThreshold {
        /// Offending field.
        field: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// A link press would have to travel further than a committing drag
    /// before it counted as a drag.
    #[error(
        "link drag threshold ({link}px) must be below the commit distance ({commit}px)"
    )]
    LinkThresholdTooLarge {
        /// Configured link threshold (px).
        link: f32,
        /// Configured commit distance (px).
        commit: f32,
    },
}

/// Result alias for configuration validation.
pub type Result<T> = std::result::Result<T, ConfigError>;
