//! Simulation error types.
//!
//! Construction-time geometry problems surface as [`SimError::InvalidConfiguration`];
//! a bad sector index is a caller bug and surfaces as [`SimError::IndexOutOfRange`].
//! Mining at the floor is not an error, it simply removes nothing.

use std::fmt;

/// Top-level error enum for the mining simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A geometry, mining or economy parameter makes no sense.
    InvalidConfiguration {
        /// Name of the offending parameter.
        field: &'static str,
        /// Human-readable description of what was wrong.
        reason: String,
    },

    /// A sector index outside `[0, len)` was supplied.
    IndexOutOfRange {
        /// The index that was rejected.
        index: usize,
        /// Number of sectors on the spheroid.
        len: usize,
    },
}

impl SimError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidConfiguration { field, reason } => {
                write!(f, "invalid configuration for '{}': {}", field, reason)
            }
            SimError::IndexOutOfRange { index, len } => write!(
                f,
                "sector index {} out of range (spheroid has {} sectors)",
                index, len
            ),
        }
    }
}

impl std::error::Error for SimError {}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is finite and strictly positive.
pub fn validate_positive(field: &'static str, value: f32) -> SimResult<()> {
    if !value.is_finite() || value <= 0.0 {
        Err(SimError::invalid(field, format!("{} must be > 0", value)))
    } else {
        Ok(())
    }
}

/// Returns an error unless `value` is finite and not negative.
pub fn validate_non_negative(field: &'static str, value: f32) -> SimResult<()> {
    if !value.is_finite() || value < 0.0 {
        Err(SimError::invalid(field, format!("{} must be >= 0", value)))
    } else {
        Ok(())
    }
}

/// Returns an error if a spheroid would have fewer than three sectors.
pub fn validate_sector_count(field: &'static str, sectors: usize) -> SimResult<()> {
    if sectors < 3 {
        Err(SimError::invalid(
            field,
            format!("{} sectors given, need at least 3", sectors),
        ))
    } else {
        Ok(())
    }
}
