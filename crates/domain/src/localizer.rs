//! Time localization: turning a reference instant and a slot into a cell.
//!
//! `TimeLocalizer` is a pure function of its inputs and configuration. It never
//! reads a clock; callers inject the reference instant (usually `clock.now()`).

use chrono::{DateTime, Duration, LocalResult, Offset, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::cell::{hour12, meridiem, minute_percentage, CellDisplay};
use crate::classification::ClassificationThresholds;
use crate::error::DomainError;
use crate::local_time::LocalFields;
use crate::location::{Location, TimezoneId};
use crate::slot::{HourSlot, SlotMode};

/// Localizer configuration shared by every grid on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalizerConfig {
    /// Zone in which absolute hour slots and the current hour are read (default: UTC)
    pub anchor_zone: TimezoneId,
    /// Zone whose calendar day decides `same_day_as_reference`; also picks the
    /// board glyph (default: UTC)
    pub day_reference_zone: TimezoneId,
    pub thresholds: ClassificationThresholds,
}

impl LocalizerConfig {
    pub fn validate(&self) -> Result<(), DomainError> {
        self.thresholds.validate()
    }
}

/// Header summary for a grid row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationHeader {
    pub display_name: String,
    pub tag: Option<String>,
    pub offset_label_short: String,
    pub offset_label_long: String,
    pub is_dst: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TimeLocalizer {
    config: LocalizerConfig,
}

impl TimeLocalizer {
    pub fn new(config: LocalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LocalizerConfig {
        &self.config
    }

    /// Compute the display state of one cell.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidHourSlot` when an absolute slot is outside
    /// 0..=23 or a relative offset leaves the representable calendar range.
    pub fn localize(
        &self,
        reference: DateTime<Utc>,
        location: &Location,
        slot: HourSlot,
        mode: SlotMode,
    ) -> Result<CellDisplay, DomainError> {
        let cell_instant = self.cell_instant(reference, slot, mode)?;
        let local = LocalFields::resolve(cell_instant, location.timezone());

        let anchor = self.config.anchor_zone.tz();
        let anchored_reference = reference.with_timezone(&anchor);
        let anchored_cell = cell_instant.with_timezone(&anchor);
        let reference_day = LocalFields::resolve(reference, self.config.day_reference_zone).day;

        Ok(CellDisplay {
            slot,
            hour12: hour12(local.hour),
            meridiem: meridiem(local.hour),
            minute_percentage: minute_percentage(anchored_cell.minute()),
            same_day_as_reference: reference_day == local.day,
            is_current_hour: anchored_reference.hour() == anchored_cell.hour(),
            classifications: self.config.thresholds.classify(local.hour),
            local,
        })
    }

    /// Offset summary shown next to the location name.
    pub fn header(&self, reference: DateTime<Utc>, location: &Location) -> LocationHeader {
        let local = LocalFields::resolve(reference, location.timezone());
        LocationHeader {
            display_name: location.display_name().to_string(),
            tag: location.tag().map(str::to_string),
            offset_label_short: local.offset_label_short,
            offset_label_long: local.offset_label_long,
            is_dst: local.is_dst,
        }
    }

    /// The instant a slot stands for.
    pub fn cell_instant(
        &self,
        reference: DateTime<Utc>,
        slot: HourSlot,
        mode: SlotMode,
    ) -> Result<DateTime<Utc>, DomainError> {
        match mode {
            SlotMode::AbsoluteHour => self.at_anchor_hour(reference, slot),
            SlotMode::RelativeOffset => reference
                .checked_add_signed(Duration::hours(i64::from(slot.value())))
                .ok_or(DomainError::invalid_hour_slot(slot.value())),
        }
    }

    /// Same anchor-zone calendar day, minute and second as `reference`, with
    /// the hour replaced.
    ///
    /// Ambiguous wall times (DST fold) resolve to the earlier instant. Wall
    /// times skipped by a DST gap keep the anchor's offset at `reference`.
    fn at_anchor_hour(
        &self,
        reference: DateTime<Utc>,
        slot: HourSlot,
    ) -> Result<DateTime<Utc>, DomainError> {
        let hour = slot.absolute_hour()?;
        let anchor = self.config.anchor_zone.tz();
        let anchored = reference.with_timezone(&anchor);

        let wall = anchored
            .date_naive()
            .and_hms_nano_opt(hour, anchored.minute(), anchored.second(), anchored.nanosecond())
            .ok_or(DomainError::invalid_hour_slot(slot.value()))?;

        let instant = match anchor.from_local_datetime(&wall) {
            LocalResult::Single(t) => t.with_timezone(&Utc),
            LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
            LocalResult::None => {
                let offset = anchored.offset().fix().local_minus_utc();
                Utc.from_utc_datetime(&(wall - Duration::seconds(i64::from(offset))))
            }
        };
        Ok(instant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::Classification;
    use crate::cell::Meridiem;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn new_york() -> Location {
        Location::new("Boston, U.S.A.", "America/New_York").unwrap()
    }

    #[test]
    fn absolute_slot_in_new_york_summer() {
        let localizer = TimeLocalizer::default();
        let reference = utc(2024, 6, 15, 14, 0);

        let cell = localizer
            .localize(reference, &new_york(), HourSlot(14), SlotMode::AbsoluteHour)
            .unwrap();

        assert_eq!(cell.local.hour, 10);
        assert_eq!(cell.hour12, 10);
        assert_eq!(cell.meridiem, Meridiem::Am);
        assert!(cell.same_day_as_reference);
        assert!(cell.is_current_hour);
        assert_eq!(cell.label(), "10am");
    }

    #[test]
    fn only_the_matching_slot_is_current() {
        let localizer = TimeLocalizer::default();
        let reference = utc(2024, 6, 15, 14, 20);

        let current: Vec<i32> = (0..24)
            .filter(|h| {
                localizer
                    .localize(reference, &new_york(), HourSlot(*h), SlotMode::AbsoluteHour)
                    .unwrap()
                    .is_current_hour
            })
            .collect();
        assert_eq!(current, vec![14]);
    }

    #[test]
    fn absolute_slot_keeps_reference_minute() {
        let localizer = TimeLocalizer::default();
        let reference = utc(2024, 6, 15, 14, 45);

        let cell = localizer
            .localize(reference, &new_york(), HourSlot(3), SlotMode::AbsoluteHour)
            .unwrap();

        assert_eq!(cell.minute_percentage, 75);
        // 03:45 UTC is 23:45 the previous evening in New York
        assert_eq!(cell.local.hour, 23);
        assert_eq!(cell.local.day, 14);
        assert!(!cell.same_day_as_reference);
        assert_eq!(cell.meridiem, Meridiem::Pm);
        assert_eq!(cell.hour12, 11);
    }

    #[test]
    fn anchor_zone_shifts_absolute_slots() {
        let config = LocalizerConfig {
            anchor_zone: TimezoneId::new("Europe/London").unwrap(),
            ..Default::default()
        };
        let localizer = TimeLocalizer::new(config);
        let reference = utc(2024, 6, 15, 14, 0);

        // 09:00 BST is 08:00 UTC, 04:00 in New York
        let cell = localizer
            .localize(reference, &new_york(), HourSlot(9), SlotMode::AbsoluteHour)
            .unwrap();
        assert_eq!(cell.local.hour, 4);

        // 14:00 UTC is 15:00 BST, so slot 15 is the current one
        let current = localizer
            .localize(reference, &new_york(), HourSlot(15), SlotMode::AbsoluteHour)
            .unwrap();
        assert!(current.is_current_hour);
    }

    #[test]
    fn anchor_hour_in_dst_gap_keeps_reference_offset() {
        let config = LocalizerConfig {
            anchor_zone: TimezoneId::new("Europe/London").unwrap(),
            ..Default::default()
        };
        let localizer = TimeLocalizer::new(config);
        // 2024-03-31 00:30 UTC is 00:30 GMT; 01:30 local does not exist that day
        let reference = utc(2024, 3, 31, 0, 30);

        let instant = localizer
            .cell_instant(reference, HourSlot(1), SlotMode::AbsoluteHour)
            .unwrap();
        assert_eq!(instant, utc(2024, 3, 31, 1, 30));
    }

    #[test]
    fn relative_offsets_add_hours() {
        let localizer = TimeLocalizer::default();
        let reference = utc(2024, 6, 15, 22, 10);
        let sydney = Location::new("Sydney, Australia", "Australia/Sydney").unwrap();

        let now = localizer
            .localize(reference, &sydney, HourSlot(0), SlotMode::RelativeOffset)
            .unwrap();
        assert!(now.is_current_hour);
        assert_eq!(now.local.hour, 8);
        assert_eq!(now.minute_percentage, 16);
        assert!(!now.same_day_as_reference);

        let later = localizer
            .localize(reference, &sydney, HourSlot(3), SlotMode::RelativeOffset)
            .unwrap();
        assert!(!later.is_current_hour);
        assert_eq!(later.local.hour, 11);
        assert_eq!(later.local.day, 16);

        let earlier = localizer
            .localize(reference, &sydney, HourSlot(-10), SlotMode::RelativeOffset)
            .unwrap();
        assert_eq!(earlier.local.hour, 22);
        assert_eq!(earlier.local.day, 15);
        assert!(earlier.same_day_as_reference);
    }

    #[test]
    fn day_reference_zone_changes_same_day_comparison() {
        let config = LocalizerConfig {
            day_reference_zone: TimezoneId::new("Australia/Sydney").unwrap(),
            ..Default::default()
        };
        let localizer = TimeLocalizer::new(config);
        // Viewer in Sydney is already on the 16th
        let reference = utc(2024, 6, 15, 22, 0);
        let sydney = Location::new("Sydney, Australia", "Australia/Sydney").unwrap();

        let cell = localizer
            .localize(reference, &sydney, HourSlot(0), SlotMode::RelativeOffset)
            .unwrap();
        assert!(cell.same_day_as_reference);
    }

    #[test]
    fn classification_follows_local_hour() {
        let localizer = TimeLocalizer::default();
        let reference = utc(2024, 6, 15, 14, 0);

        // 16:00 UTC is 12:00 in New York
        let noon = localizer
            .localize(reference, &new_york(), HourSlot(16), SlotMode::AbsoluteHour)
            .unwrap();
        assert!(noon.classifications.contains(Classification::OfficeHours));
        assert!(!noon.classifications.contains(Classification::Asleep));

        // 23:00 UTC is 19:00 in New York
        let evening = localizer
            .localize(reference, &new_york(), HourSlot(23), SlotMode::AbsoluteHour)
            .unwrap();
        assert!(!evening.classifications.contains(Classification::OfficeHours));
        assert!(evening.classifications.contains(Classification::Asleep));
    }

    #[test]
    fn absolute_slot_out_of_range_fails_that_cell() {
        let localizer = TimeLocalizer::default();
        let err = localizer
            .localize(utc(2024, 6, 15, 14, 0), &new_york(), HourSlot(24), SlotMode::AbsoluteHour)
            .unwrap_err();
        assert_eq!(err, DomainError::InvalidHourSlot(24));
    }

    #[test]
    fn header_reports_offset_labels() {
        let localizer = TimeLocalizer::default();
        let reading = Location::new("Reading, England", "Europe/London")
            .unwrap()
            .with_tag("highlight");

        let summer = localizer.header(utc(2024, 6, 15, 14, 0), &reading);
        assert_eq!(summer.display_name, "Reading, England");
        assert_eq!(summer.tag.as_deref(), Some("highlight"));
        assert_eq!(summer.offset_label_short, "BST");
        assert_eq!(summer.offset_label_long, "UTC+01:00");
        assert!(summer.is_dst);

        let winter = localizer.header(utc(2024, 12, 15, 14, 0), &reading);
        assert_eq!(winter.offset_label_short, "GMT");
        assert!(!winter.is_dst);
    }
}
