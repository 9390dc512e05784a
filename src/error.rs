//! Error and warning types shared by the battery model, simulator, and metrics.

use thiserror::Error;

/// Errors raised at construction and entry boundaries.
///
/// The dispatch loop itself never fails; everything it needs is checked
/// before the first step runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A parameter violates its documented range.
    #[error("invalid parameter `{field}`: {message}")]
    InvalidParameter {
        /// Name of the offending parameter.
        field: &'static str,
        /// Human-readable constraint description.
        message: String,
    },

    /// Production and price curves have different lengths.
    #[error("curve length mismatch: production has {production} samples, price has {price}")]
    LengthMismatch { production: usize, price: usize },

    /// A trace was bound to input curves of a different horizon.
    #[error("trace covers {found} steps but the input curves cover {expected}")]
    TraceMismatch { expected: usize, found: usize },
}

impl SimError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            message: message.into(),
        }
    }
}

/// Non-fatal configuration findings that callers may choose to surface.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigurationWarning {
    /// `low > high`: the hold band between the thresholds is empty.
    #[error(
        "low price threshold {low} exceeds high price threshold {high}; \
         the hold band is unreachable"
    )]
    InvertedThresholds { low: f64, high: f64 },
}
