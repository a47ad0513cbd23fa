//! Grid columns: hour slots and how they are interpreted.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// How the slots of a grid are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SlotMode {
    /// Slot is an hour-of-day (0-23) in the anchor zone on the reference day.
    #[default]
    AbsoluteHour,
    /// Slot is a signed number of hours relative to the reference instant.
    RelativeOffset,
}

impl SlotMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            SlotMode::AbsoluteHour => "Absolute hour",
            SlotMode::RelativeOffset => "Relative offset",
        }
    }

    /// Slots used when a section does not list its own.
    ///
    /// Absolute grids show the whole day; relative grids show half a day
    /// either side of now.
    pub fn default_slots(&self) -> Vec<HourSlot> {
        match self {
            SlotMode::AbsoluteHour => (0..24).map(HourSlot).collect(),
            SlotMode::RelativeOffset => (-12..=12).map(HourSlot).collect(),
        }
    }
}

impl fmt::Display for SlotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One column of the grid: an hour-of-day or an offset, depending on [`SlotMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HourSlot(pub i32);

impl HourSlot {
    pub fn value(&self) -> i32 {
        self.0
    }

    /// The slot as an hour-of-day.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidHourSlot` outside 0..=23.
    pub fn absolute_hour(&self) -> Result<u32, DomainError> {
        u32::try_from(self.0)
            .ok()
            .filter(|hour| *hour < 24)
            .ok_or(DomainError::invalid_hour_slot(self.0))
    }

    /// Checks the slot is meaningful for `mode`.
    pub fn validate_for(&self, mode: SlotMode) -> Result<(), DomainError> {
        match mode {
            SlotMode::AbsoluteHour => self.absolute_hour().map(|_| ()),
            SlotMode::RelativeOffset => Ok(()),
        }
    }
}

impl From<i32> for HourSlot {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for HourSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
