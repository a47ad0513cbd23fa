//! Grid building: rows of localized cells, grouped into titled sections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cell::CellDisplay;
use crate::error::DomainError;
use crate::glyph::{pick_glyph, ClockGlyph};
use crate::local_time::LocalFields;
use crate::localizer::{LocationHeader, TimeLocalizer};
use crate::location::Location;
use crate::slot::{HourSlot, SlotMode};

/// A cell either localizes or reports why it could not. Failures stay local
/// to the cell.
pub type CellResult = Result<CellDisplay, DomainError>;

/// One location and its cells, in slot order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub location: Location,
    pub header: LocationHeader,
    pub cells: Vec<CellResult>,
}

// =============================================================================
// Grid Section
// =============================================================================

/// A titled grid: the same slots shown for every location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSection {
    pub title: String,
    #[serde(default)]
    pub mode: SlotMode,
    /// Omitted in layout files to get the mode's default slots.
    #[serde(default)]
    pub slots: Vec<HourSlot>,
    pub locations: Vec<Location>,
}

impl GridSection {
    /// Create a validated section.
    ///
    /// An empty `slots` list is replaced by the mode's default slots.
    pub fn new(
        title: impl Into<String>,
        mode: SlotMode,
        slots: Vec<HourSlot>,
        locations: Vec<Location>,
    ) -> Result<Self, DomainError> {
        let mut section = Self {
            title: title.into(),
            mode,
            slots,
            locations,
        };
        section.normalize();
        section.validate()?;
        Ok(section)
    }

    /// Fill in default slots when none were given.
    pub fn normalize(&mut self) {
        if self.slots.is_empty() {
            self.slots = self.mode.default_slots();
        }
    }

    /// Rejects configuration that would make every tick fail the same way.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::validation("Section title cannot be empty"));
        }
        if self.locations.is_empty() {
            return Err(DomainError::validation(format!(
                "Section '{}' has no locations",
                self.title
            )));
        }
        for location in &self.locations {
            location.validate()?;
        }
        for slot in &self.slots {
            slot.validate_for(self.mode)?;
        }
        Ok(())
    }
}

/// A section after localization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub title: String,
    pub mode: SlotMode,
    pub slots: Vec<HourSlot>,
    pub rows: Vec<GridRow>,
}

/// Everything shown on screen for one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub reference: DateTime<Utc>,
    /// Clock face for the viewer's current local time.
    pub glyph: ClockGlyph,
    pub sections: Vec<SectionView>,
}

// =============================================================================
// Grid Builder
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct GridBuilder {
    localizer: TimeLocalizer,
}

impl GridBuilder {
    pub fn new(localizer: TimeLocalizer) -> Self {
        Self { localizer }
    }

    pub fn localizer(&self) -> &TimeLocalizer {
        &self.localizer
    }

    /// One row per location and one cell per slot, both in input order.
    pub fn build_grid(
        &self,
        reference: DateTime<Utc>,
        locations: &[Location],
        slots: &[HourSlot],
        mode: SlotMode,
    ) -> Vec<GridRow> {
        locations
            .iter()
            .map(|location| GridRow {
                location: location.clone(),
                header: self.localizer.header(reference, location),
                cells: slots
                    .iter()
                    .map(|slot| self.localizer.localize(reference, location, *slot, mode))
                    .collect(),
            })
            .collect()
    }

    pub fn headers(&self, reference: DateTime<Utc>, locations: &[Location]) -> Vec<LocationHeader> {
        locations
            .iter()
            .map(|location| self.localizer.header(reference, location))
            .collect()
    }

    /// Localize every section and pick the board glyph.
    pub fn build_board(&self, reference: DateTime<Utc>, sections: &[GridSection]) -> BoardView {
        let viewer = LocalFields::resolve(reference, self.localizer.config().day_reference_zone);

        BoardView {
            reference,
            glyph: pick_glyph(viewer.hour, viewer.minute),
            sections: sections
                .iter()
                .map(|section| SectionView {
                    title: section.title.clone(),
                    mode: section.mode,
                    slots: section.slots.clone(),
                    rows: self.build_grid(reference, &section.locations, &section.slots, section.mode),
                })
                .collect(),
        }
    }
}
