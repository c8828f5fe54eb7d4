//! The monthly metric grid: one card per month with the paid total and its
//! distance from the yearly mean, laid out three columns by four rows.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use gastos_core::calendar::capitalize;
use gastos_core::formatting::{format_currency, format_delta};
use gastos_core::models::{DeltaDirection, MonthlyMetric};

use crate::themes::Theme;

/// Columns per row in the metric grid.
const GRID_COLUMNS: usize = 3;

/// Rows in the metric grid.
const GRID_ROWS: usize = 4;

/// Render the twelve monthly metric cards into `area`.
///
/// Cards are laid out row-major: janeiro..março on the first row through
/// outubro..dezembro on the last, mirroring the chronological order of the
/// metric slice.
pub fn render_metric_grid(frame: &mut Frame, area: Rect, metrics: &[MonthlyMetric], theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, GRID_ROWS as u32); GRID_ROWS])
        .split(area);

    for (row_index, row_area) in rows.iter().enumerate() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(*row_area);

        for (col_index, cell_area) in columns.iter().enumerate() {
            let metric_index = row_index * GRID_COLUMNS + col_index;
            if let Some(metric) = metrics.get(metric_index) {
                render_metric_card(frame, *cell_area, metric, theme);
            }
        }
    }
}

/// Render a single metric card: month title, paid value, signed delta.
pub fn render_metric_card(frame: &mut Frame, area: Rect, metric: &MonthlyMetric, theme: &Theme) {
    let delta_style = match metric.direction {
        DeltaDirection::AboveMean => theme.delta_above,
        DeltaDirection::BelowMean => theme.delta_below,
    };

    let lines = vec![
        Line::from(Span::styled(format_currency(metric.value), theme.value)),
        Line::from(Span::styled(
            format_delta(metric.delta_magnitude, metric.direction),
            delta_style,
        )),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", capitalize(&metric.label))),
    );

    frame.render_widget(card, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
