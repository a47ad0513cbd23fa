//! Location value objects
//!
//! Key types:
//! - `TimezoneId` - IANA zone identifier, validated against the tz database
//! - `Location` - A named place shown as one row of a grid

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

// ============================================================================
// TimezoneId
// ============================================================================

/// A validated IANA timezone identifier (e.g., "Europe/London", "EST")
///
/// Construction resolves the identifier against the bundled tz database, so
/// every `TimezoneId` in circulation is known to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimezoneId(Tz);

impl TimezoneId {
    /// UTC, the default anchor and viewer zone.
    pub const UTC: TimezoneId = TimezoneId(Tz::UTC);

    /// Create a new validated timezone identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownTimezone` if the identifier is not in the
    /// tz database.
    pub fn new(id: impl AsRef<str>) -> Result<Self, DomainError> {
        let id = id.as_ref();
        id.trim()
            .parse::<Tz>()
            .map(Self)
            .map_err(|_| DomainError::unknown_timezone(id))
    }

    /// Returns the identifier as stored in the tz database.
    pub fn as_str(&self) -> &'static str {
        self.0.name()
    }

    pub fn tz(&self) -> Tz {
        self.0
    }
}

impl Default for TimezoneId {
    fn default() -> Self {
        Self::UTC
    }
}

impl fmt::Display for TimezoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TimezoneId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for TimezoneId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TimezoneId> for String {
    fn from(id: TimezoneId) -> Self {
        id.as_str().to_string()
    }
}

// ============================================================================
// Location
// ============================================================================

/// A named place whose local time is shown as one grid row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(rename = "name")]
    display_name: String,
    timezone: TimezoneId,
    /// Opaque style marker (e.g. "highlight"), passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
    /// Explicit city query for the weather provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weather_query: Option<String>,
}

impl Location {
    /// Create a location from a display name and an IANA identifier.
    ///
    /// # Errors
    ///
    /// - `DomainError::Validation` if the display name is blank
    /// - `DomainError::UnknownTimezone` if the identifier does not resolve
    pub fn new(display_name: impl Into<String>, timezone: &str) -> Result<Self, DomainError> {
        let location = Self {
            display_name: display_name.into(),
            timezone: TimezoneId::new(timezone)?,
            tag: None,
            weather_query: None,
        };
        location.validate()?;
        Ok(location)
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_weather_query(mut self, query: impl Into<String>) -> Self {
        self.weather_query = Some(query.into());
        self
    }

    /// Checks the invariants that deserialization cannot enforce by itself.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.display_name.trim().is_empty() {
            return Err(DomainError::validation("Location name cannot be empty"));
        }
        Ok(())
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn timezone(&self) -> TimezoneId {
        self.timezone
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// City name sent to the weather provider.
    ///
    /// Uses the explicit query when set, otherwise the display name up to the
    /// first comma ("Reading, England" -> "Reading").
    pub fn weather_city(&self) -> &str {
        match &self.weather_query {
            Some(query) => query.trim(),
            None => self
                .display_name
                .split(',')
                .next()
                .unwrap_or(&self.display_name)
                .trim(),
        }
    }
}
