//! Hour classifications used for styling cells.
//!
//! Each classification is an independent predicate over the local hour, so a
//! cell can be in several at once (office hours and lunch hour overlap by
//! default).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

// =============================================================================
// Classification
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    OfficeHours,
    NightHours,
    LunchHour,
    Asleep,
}

impl Classification {
    /// Style name used by presenters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::OfficeHours => "office-hours",
            Classification::NightHours => "night-hours",
            Classification::LunchHour => "lunch-hour",
            Classification::Asleep => "asleep",
        }
    }

    pub fn all() -> [Classification; 4] {
        [
            Classification::OfficeHours,
            Classification::NightHours,
            Classification::LunchHour,
            Classification::Asleep,
        ]
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Thresholds
// =============================================================================

/// Hour bounds for each classification. All bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassificationThresholds {
    /// First office hour (default: 9)
    pub office_start: u32,
    /// Last office hour (default: 18; some layouts use 17)
    pub office_end: u32,
    /// First night hour in the evening (default: 21; some layouts use 22)
    pub night_start: u32,
    /// Last night hour in the morning (default: 5)
    pub night_end: u32,
    /// The lunch hour (default: 13)
    pub lunch_hour: u32,
    /// Last asleep hour in the morning (default: 8)
    pub wake_hour: u32,
    /// First asleep hour in the evening (default: 18)
    pub sleep_hour: u32,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            office_start: 9,
            office_end: 18,
            night_start: 21,
            night_end: 5,
            lunch_hour: 13,
            wake_hour: 8,
            sleep_hour: 18,
        }
    }
}

impl ClassificationThresholds {
    pub fn validate(&self) -> Result<(), DomainError> {
        let bounds = [
            ("officeStart", self.office_start),
            ("officeEnd", self.office_end),
            ("nightStart", self.night_start),
            ("nightEnd", self.night_end),
            ("lunchHour", self.lunch_hour),
            ("wakeHour", self.wake_hour),
            ("sleepHour", self.sleep_hour),
        ];
        if let Some((name, hour)) = bounds.iter().find(|(_, hour)| *hour > 23) {
            return Err(DomainError::validation(format!(
                "{} must be an hour between 0 and 23, got {}",
                name, hour
            )));
        }
        if self.office_start > self.office_end {
            return Err(DomainError::validation(
                "officeStart cannot be later than officeEnd",
            ));
        }
        Ok(())
    }

    /// Classify a local hour-of-day.
    pub fn classify(&self, hour: u32) -> Classifications {
        Classifications {
            office_hours: (self.office_start..=self.office_end).contains(&hour),
            night_hours: hour <= self.night_end || hour >= self.night_start,
            lunch_hour: hour == self.lunch_hour,
            asleep: hour <= self.wake_hour || hour >= self.sleep_hour,
        }
    }
}

// =============================================================================
// Classifications
// =============================================================================

/// The set of classifications a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classifications {
    pub office_hours: bool,
    pub night_hours: bool,
    pub lunch_hour: bool,
    pub asleep: bool,
}

impl Classifications {
    pub fn contains(&self, classification: Classification) -> bool {
        match classification {
            Classification::OfficeHours => self.office_hours,
            Classification::NightHours => self.night_hours,
            Classification::LunchHour => self.lunch_hour,
            Classification::Asleep => self.asleep,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Classification> + '_ {
        Classification::all()
            .into_iter()
            .filter(move |c| self.contains(*c))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn office_hours_use_inclusive_bounds() {
        let thresholds = ClassificationThresholds::default();
        assert!(thresholds.classify(12).office_hours);
        assert!(thresholds.classify(9).office_hours);
        assert!(thresholds.classify(18).office_hours);
        assert!(!thresholds.classify(19).office_hours);
        assert!(!thresholds.classify(8).office_hours);
    }

    #[test]
    fn office_end_is_configurable() {
        let thresholds = ClassificationThresholds {
            office_end: 17,
            ..Default::default()
        };
        assert!(!thresholds.classify(18).office_hours);
    }

    #[test]
    fn night_hours_wrap_around_midnight() {
        let thresholds = ClassificationThresholds::default();
        for hour in [0, 3, 5, 21, 23] {
            assert!(thresholds.classify(hour).night_hours, "hour {hour}");
        }
        for hour in [6, 12, 20] {
            assert!(!thresholds.classify(hour).night_hours, "hour {hour}");
        }

        let later = ClassificationThresholds {
            night_start: 22,
            ..Default::default()
        };
        assert!(!later.classify(21).night_hours);
    }

    #[test]
    fn classifications_may_overlap() {
        let set = ClassificationThresholds::default().classify(13);
        assert!(set.office_hours);
        assert!(set.lunch_hour);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Classification::OfficeHours, Classification::LunchHour]
        );

        let evening = ClassificationThresholds::default().classify(18);
        assert!(evening.office_hours && evening.asleep);
    }

    #[test]
    fn mid_afternoon_outside_lunch_has_only_office_hours() {
        let set = ClassificationThresholds::default().classify(15);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Classification::OfficeHours]);
        assert!(!set.is_empty());
    }

    #[test]
    fn validate_rejects_out_of_range_and_inverted_bounds() {
        let bad_hour = ClassificationThresholds {
            night_start: 24,
            ..Default::default()
        };
        assert!(matches!(bad_hour.validate(), Err(DomainError::Validation(_))));

        let inverted = ClassificationThresholds {
            office_start: 19,
            ..Default::default()
        };
        assert!(inverted.validate().is_err());
        assert!(ClassificationThresholds::default().validate().is_ok());
    }

    #[test]
    fn thresholds_fill_missing_fields_from_defaults() {
        let thresholds: ClassificationThresholds =
            serde_json::from_str(r#"{"officeEnd": 17, "nightStart": 22}"#).unwrap();
        assert_eq!(thresholds.office_end, 17);
        assert_eq!(thresholds.night_start, 22);
        assert_eq!(thresholds.office_start, 9);
    }
}
