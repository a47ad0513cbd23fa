//! Refresh board use case - recompute every cell and hand the board to the presenter.

use std::sync::Arc;
use tzgrid_domain::{BoardView, GridBuilder, GridSection};

use crate::infrastructure::ports::{ClockPort, PresenterPort};
use crate::use_cases::weather::SharedWeatherIcons;

/// Rebuilds the whole board from the clock's current instant.
///
/// Each call is a full recomputation; nothing carries between ticks except
/// whatever weather icons the weather task has produced so far.
pub struct RefreshBoard {
    clock: Arc<dyn ClockPort>,
    presenter: Arc<dyn PresenterPort>,
    builder: GridBuilder,
    sections: Vec<GridSection>,
    icons: SharedWeatherIcons,
}

impl RefreshBoard {
    pub fn new(
        clock: Arc<dyn ClockPort>,
        presenter: Arc<dyn PresenterPort>,
        builder: GridBuilder,
        sections: Vec<GridSection>,
        icons: SharedWeatherIcons,
    ) -> Self {
        Self {
            clock,
            presenter,
            builder,
            sections,
            icons,
        }
    }

    pub async fn execute(&self) -> BoardView {
        let now = self.clock.now();
        let board = self.builder.build_board(now, &self.sections);

        let failed = board
            .sections
            .iter()
            .flat_map(|s| s.rows.iter())
            .flat_map(|r| r.cells.iter())
            .filter(|c| c.is_err())
            .count();
        if failed > 0 {
            tracing::warn!(failed, reference = %now, "Some cells could not be localized");
        }

        let icons = self.icons.read().await;
        self.presenter.present(&board, &icons);
        board
    }
}
