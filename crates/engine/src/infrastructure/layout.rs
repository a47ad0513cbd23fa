//! Board layout: which sections, locations and slots are shown.
//!
//! Layout files are JSON:
//!
//! ```json
//! {
//!   "anchorZone": "UTC",
//!   "dayReferenceZone": "Europe/London",
//!   "thresholds": { "officeEnd": 17 },
//!   "sections": [
//!     {
//!       "title": "Team",
//!       "mode": "relative_offset",
//!       "locations": [{ "name": "Munich, Germany", "timezone": "Europe/Berlin" }]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tzgrid_domain::{DomainError, GridSection, LocalizerConfig, Location, SlotMode};

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Failed to read layout file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse layout file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid layout: {0}")]
    Invalid(#[from] DomainError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    #[serde(flatten)]
    pub localizer: LocalizerConfig,
    pub sections: Vec<GridSection>,
}

impl Layout {
    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Parse, fill in default slots and validate.
    pub fn from_json(data: &str) -> Result<Self, LayoutError> {
        let mut layout: Layout = serde_json::from_str(data)?;
        for section in &mut layout.sections {
            section.normalize();
        }
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.sections.is_empty() {
            return Err(DomainError::validation("Layout has no sections"));
        }
        self.localizer.validate()?;
        for section in &self.sections {
            section.validate()?;
        }
        Ok(())
    }

    /// Every location on the board, in display order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.sections.iter().flat_map(|s| s.locations.iter())
    }

    /// The layout used when no file is configured.
    pub fn builtin() -> Result<Self, DomainError> {
        let locations = vec![
            Location::new("Ontario, Canada", "Canada/Central")?,
            Location::new("Boston, U.S.A.", "America/New_York")?,
            Location::new("Connecticut, U.S.A.", "America/New_York")?,
            Location::new("Reading, England", "Europe/London")?.with_tag("highlight"),
            Location::new("Amsterdam, Netherlands", "Europe/Amsterdam")?,
            Location::new("Munich, Germany", "Europe/Berlin")?,
            Location::new("Sydney, Australia", "Australia/Sydney")?,
        ];
        let timezones = vec![Location::new("EST", "EST")?, Location::new("GMT", "GMT")?];

        Ok(Self {
            localizer: LocalizerConfig::default(),
            sections: vec![
                GridSection::new("Locations", SlotMode::AbsoluteHour, vec![], locations)?,
                GridSection::new("Timezones", SlotMode::AbsoluteHour, vec![], timezones)?,
            ],
        })
    }
}
