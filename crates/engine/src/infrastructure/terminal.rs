//! Plain-text presenter for terminals.
//!
//! Each cell renders as its 12-hour label. The current hour is bracketed
//! and shows minute progress, cells on a different day than the viewer get a
//! trailing `'`, and asleep hours are dimmed.

use std::fmt::Write as _;
use std::io::{self, Write as _};

use crossterm::{
    cursor, queue,
    style::{Print, Stylize},
    terminal::{Clear, ClearType},
};
use tzgrid_domain::{BoardView, CellResult, Classification, GridRow};

use crate::infrastructure::ports::{PresenterPort, WeatherIcons};

const NAME_WIDTH: usize = 24;
const OFFSET_WIDTH: usize = 7;
const CELL_WIDTH: usize = 6;

pub struct TerminalPresenter {
    color: bool,
}

impl TerminalPresenter {
    /// `color` switches bold and dim styling on; turn it off when stdout is
    /// not a terminal.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn bold(&self, text: String) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text
        }
    }

    fn dim(&self, text: String) -> String {
        if self.color {
            text.dim().to_string()
        } else {
            text
        }
    }

    /// Clear the screen and draw `text` from the top-left corner.
    fn draw(&self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        queue!(stdout, Clear(ClearType::All), cursor::MoveTo(0, 0), Print(text))?;
        stdout.flush()
    }

    /// Render the whole board as text.
    pub fn render(&self, board: &BoardView, weather: &WeatherIcons) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} {}",
            board.glyph,
            board.reference.format("%Y-%m-%d %H:%M UTC")
        );

        for section in &board.sections {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", self.bold(section.title.clone()));
            for row in &section.rows {
                let _ = writeln!(out, "{}", self.render_row(row, weather));
            }
        }
        out
    }

    fn render_row(&self, row: &GridRow, weather: &WeatherIcons) -> String {
        let mut line = format!(
            "{:<name$} {:<offset$}",
            truncate(row.header.display_name.as_str(), NAME_WIDTH),
            row.header.offset_label_short,
            name = NAME_WIDTH,
            offset = OFFSET_WIDTH,
        );
        for cell in &row.cells {
            line.push_str(&self.render_cell(cell));
        }
        if let Some(report) = weather.get(row.location.display_name()) {
            line.push_str("  ");
            line.push_str(&report.tooltip);
        }
        line
    }

    fn render_cell(&self, cell: &CellResult) -> String {
        let cell = match cell {
            Ok(cell) => cell,
            Err(_) => return format!("{:>width$}", "?", width = CELL_WIDTH),
        };

        let mut label = cell.label();
        if !cell.same_day_as_reference {
            label.push('\'');
        }
        if cell.is_current_hour {
            label = format!("[{} {}%]", label, cell.minute_percentage);
        }

        let padded = format!("{:>width$}", label, width = CELL_WIDTH);
        if cell.is_current_hour {
            self.bold(padded)
        } else if cell.classifications.contains(Classification::Asleep) {
            self.dim(padded)
        } else {
            padded
        }
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PresenterPort for TerminalPresenter {
    fn present(&self, board: &BoardView, weather: &WeatherIcons) {
        let text = self.render(board, weather);
        if let Err(e) = self.draw(&text) {
            tracing::warn!(error = %e, "Failed to write board to terminal");
        }
    }
}

fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::WeatherReport;
    use chrono::{TimeZone, Utc};
    use tzgrid_domain::{GridBuilder, GridSection, HourSlot, Location, SlotMode};

    fn board() -> BoardView {
        // Built by hand: validation would reject slot 99
        let section = GridSection {
            title: "Locations".into(),
            mode: SlotMode::AbsoluteHour,
            slots: vec![HourSlot(13), HourSlot(14), HourSlot(99)],
            locations: vec![Location::new("Reading, England", "Europe/London").unwrap()],
        };
        let reference = Utc.with_ymd_and_hms(2024, 6, 15, 14, 30, 0).unwrap();
        GridBuilder::default().build_board(reference, &[section])
    }

    #[test]
    fn renders_rows_with_current_hour_marker() {
        let text = TerminalPresenter::new(false).render(&board(), &WeatherIcons::new());

        assert!(text.starts_with("🕝 2024-06-15 14:30 UTC"));
        assert!(text.contains("Locations"));
        let row = text
            .lines()
            .find(|l| l.starts_with("Reading, England"))
            .unwrap();
        assert!(row.contains("BST"));
        assert!(row.contains("2pm"));
        assert!(row.contains("[3pm 50%]"));
        assert!(row.trim_end().ends_with('?'));
    }

    #[test]
    fn appends_weather_tooltip_when_available() {
        let mut weather = WeatherIcons::new();
        weather.insert(
            "Reading, England".into(),
            WeatherReport {
                icon_url: "https://openweathermap.org/img/wn/10d.png".into(),
                tooltip: "Reading: light rain, feels like 12.5℃.".into(),
            },
        );

        let text = TerminalPresenter::new(false).render(&board(), &weather);
        assert!(text.contains("Reading: light rain, feels like 12.5℃."));
    }

    #[test]
    fn color_output_styles_title_and_current_cell() {
        let text = TerminalPresenter::new(true).render(&board(), &WeatherIcons::new());
        assert!(text.contains(&"Locations".bold().to_string()));
        assert!(text.contains(&"[3pm 50%]".bold().to_string()));
    }

    #[test]
    fn plain_output_has_no_escape_sequences() {
        let text = TerminalPresenter::new(false).render(&board(), &WeatherIcons::new());
        assert!(!text.contains('\u{1b}'));
    }
}
