//! tzgrid domain: pure time localization for a world-clock grid.
//!
//! Given a reference instant, a list of locations and a list of hour slots,
//! [`GridBuilder`] produces the formatted and classified state of every cell.
//! Nothing here reads a clock or performs I/O.

pub mod cell;
pub mod classification;
pub mod error;
pub mod glyph;
pub mod grid;
pub mod local_time;
pub mod localizer;
pub mod location;
pub mod slot;

pub use cell::{hour12, meridiem, minute_percentage, CellDisplay, Meridiem};
pub use classification::{Classification, ClassificationThresholds, Classifications};
pub use error::DomainError;
pub use glyph::{pick_glyph, ClockGlyph};
pub use grid::{BoardView, CellResult, GridBuilder, GridRow, GridSection, SectionView};
pub use local_time::LocalFields;
pub use localizer::{LocalizerConfig, LocationHeader, TimeLocalizer};
pub use location::{Location, TimezoneId};
pub use slot::{HourSlot, SlotMode};
