//! Resolving instants into civil time fields for a zone.

use chrono::{DateTime, Datelike, Duration, Offset, Timelike, Utc};
use chrono_tz::OffsetComponents;
use serde::{Deserialize, Serialize};

use crate::location::TimezoneId;

/// Wall-clock fields of an instant as observed in one timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub offset_seconds: i32,
    /// Zone abbreviation ("EDT", "BST"), or a numeric offset for zones without one.
    pub offset_label_short: String,
    /// Numeric offset ("UTC-04:00").
    pub offset_label_long: String,
    pub is_dst: bool,
}

impl LocalFields {
    /// Resolve `instant` against the offset rules of `zone`.
    pub fn resolve(instant: DateTime<Utc>, zone: TimezoneId) -> Self {
        let local = instant.with_timezone(&zone.tz());
        let offset = local.offset();

        Self {
            year: local.year(),
            month: local.month(),
            day: local.day(),
            hour: local.hour(),
            minute: local.minute(),
            offset_seconds: offset.fix().local_minus_utc(),
            offset_label_short: local.format("%Z").to_string(),
            offset_label_long: format!("UTC{}", local.format("%:z")),
            is_dst: offset.dst_offset() != Duration::zero(),
        }
    }
}
