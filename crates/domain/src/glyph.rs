//! Clock-face glyphs for the icon surface.

use serde::Serialize;
use std::fmt;

/// Clock faces indexed by `[hour % 12][minute / 30]`.
const CLOCK_FACES: [[&str; 2]; 12] = [
    ["🕛", "🕧"],
    ["🕐", "🕜"],
    ["🕑", "🕝"],
    ["🕒", "🕞"],
    ["🕓", "🕟"],
    ["🕔", "🕠"],
    ["🕕", "🕡"],
    ["🕖", "🕢"],
    ["🕗", "🕣"],
    ["🕘", "🕤"],
    ["🕙", "🕥"],
    ["🕚", "🕦"],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ClockGlyph(&'static str);

impl ClockGlyph {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ClockGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pick the clock face closest below the given local time, at half-hour
/// granularity. Hours wrap every 12; minutes past 59 count as 59.
pub fn pick_glyph(hour: u32, minute: u32) -> ClockGlyph {
    let half = (minute.min(59) / 30) as usize;
    ClockGlyph(CLOCK_FACES[(hour % 12) as usize][half])
}
