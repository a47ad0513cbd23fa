//! Per-cell display state and the small formatting rules behind it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::classification::Classifications;
use crate::local_time::LocalFields;
use crate::slot::HourSlot;

// =============================================================================
// Meridiem
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Meridiem::Am => "am",
            Meridiem::Pm => "pm",
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 12-hour clock hour for an hour-of-day. Midnight and noon are both 12.
pub fn hour12(hour: u32) -> u8 {
    let hour = (hour % 24) as u8;
    if hour == 0 {
        12
    } else if hour <= 12 {
        hour
    } else {
        hour - 12
    }
}

pub fn meridiem(hour: u32) -> Meridiem {
    if hour % 24 >= 12 {
        Meridiem::Pm
    } else {
        Meridiem::Am
    }
}

/// Progress through the hour, floored to a whole percent (0..=98).
pub fn minute_percentage(minute: u32) -> u8 {
    (minute.min(59) * 100 / 60) as u8
}

// =============================================================================
// CellDisplay
// =============================================================================

/// Everything a presenter needs to draw one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellDisplay {
    pub slot: HourSlot,
    pub hour12: u8,
    pub meridiem: Meridiem,
    pub minute_percentage: u8,
    pub same_day_as_reference: bool,
    pub is_current_hour: bool,
    pub classifications: Classifications,
    pub local: LocalFields,
}

impl CellDisplay {
    /// "10am", the text shown inside the cell.
    pub fn label(&self) -> String {
        format!("{}{}", self.hour12, self.meridiem)
    }
}
