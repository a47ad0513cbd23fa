//! Unified error types for the domain layer
//!
//! Configuration problems (unknown zones, out-of-range slots, empty names) are
//! all reported through [`DomainError`] so adapters never need String or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Timezone identifier is not in the IANA database
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Absolute hour slot outside 0..=23, or an offset that overflows the calendar
    #[error("Invalid hour slot: {0}")]
    InvalidHourSlot(i32),

    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    /// Creates a validation error for configuration values that break a rule:
    /// - Required fields are empty
    /// - Threshold hours are outside 0..=23
    ///
    /// # Example
    /// ```ignore
    /// if name.trim().is_empty() {
    ///     return Err(DomainError::validation("Location name cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an unknown timezone error
    pub fn unknown_timezone(id: impl Into<String>) -> Self {
        Self::UnknownTimezone(id.into())
    }

    /// Create an invalid hour slot error
    pub fn invalid_hour_slot(slot: i32) -> Self {
        Self::InvalidHourSlot(slot)
    }
}
