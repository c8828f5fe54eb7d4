//! Main application state and TUI event loop for the spending dashboard.
//!
//! [`App`] owns the theme, the current view and the selected month, and
//! drives a synchronous crossterm event loop: the dataset is fully
//! aggregated before the terminal enters raw mode, so there is nothing to
//! refresh in the background.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};

use gastos_core::models::{DailyTotals, MonthlyAggregate, MonthlyMetric};

use crate::charts;
use crate::components::header::{Header, QUOTE};
use crate::components::metric;
use crate::themes::Theme;

// ── ViewMode ──────────────────────────────────────────────────────────────────

/// Which view the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Monthly bar chart plus the grand total.
    Dashboard,
    /// Daily bar chart for one selected month.
    Daily,
    /// Metric grid with the mean deltas.
    Metrics,
}

impl ViewMode {
    /// Resolve a view by its CLI name; unknown names fall back to the
    /// dashboard.
    pub fn from_name(name: &str) -> Self {
        match name {
            "daily" => ViewMode::Daily,
            "metrics" => ViewMode::Metrics,
            _ => ViewMode::Dashboard,
        }
    }

    /// The next view in the Tab cycle.
    pub fn next(self) -> Self {
        match self {
            ViewMode::Dashboard => ViewMode::Daily,
            ViewMode::Daily => ViewMode::Metrics,
            ViewMode::Metrics => ViewMode::Dashboard,
        }
    }
}

// ── DashboardData ─────────────────────────────────────────────────────────────

/// Every aggregate the views consume, computed once before rendering.
#[derive(Debug, Clone)]
pub struct DashboardData {
    /// The twelve reindexed monthly aggregates, January through December.
    pub monthly: Vec<MonthlyAggregate>,
    /// Daily totals per month, indexed by `month - 1`.
    pub daily_by_month: Vec<DailyTotals>,
    /// Sum of `amount_paid` across the whole ledger.
    pub grand_total: f64,
    /// The twelve monthly metrics with mean deltas.
    pub metrics: Vec<MonthlyMetric>,
}

impl DashboardData {
    /// Daily totals for a 1-based month, if present.
    pub fn daily_for(&self, month: u32) -> Option<&DailyTotals> {
        self.daily_by_month.get(month.checked_sub(1)? as usize)
    }

    /// Whether any ledger row survived into the aggregates.
    pub fn has_records(&self) -> bool {
        self.monthly.iter().any(|m| m.has_data())
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Current view.
    pub view: ViewMode,
    /// 1-based month shown by the daily view.
    pub selected_month: u32,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    /// Construct a new application with the given configuration.
    pub fn new(theme_name: &str, view: ViewMode, month: u32) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            view,
            selected_month: month.clamp(1, 12),
            should_quit: false,
        }
    }

    // ── Public event loop ─────────────────────────────────────────────────────

    /// Run the TUI until `q` / `Ctrl+C`.
    ///
    /// The loop polls keyboard events with a 250 ms timeout and redraws on
    /// every tick; the data never changes while the loop runs.
    pub fn run(mut self, data: &DashboardData) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            terminal.draw(|frame| self.render(frame, data))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Input handling ────────────────────────────────────────────────────────

    /// Apply one key press to the application state.
    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab => self.view = self.view.next(),
            KeyCode::Char('1') => self.view = ViewMode::Dashboard,
            KeyCode::Char('2') => self.view = ViewMode::Daily,
            KeyCode::Char('3') => self.view = ViewMode::Metrics,
            KeyCode::Left if self.view == ViewMode::Daily => {
                self.selected_month = if self.selected_month == 1 {
                    12
                } else {
                    self.selected_month - 1
                };
            }
            KeyCode::Right if self.view == ViewMode::Daily => {
                self.selected_month = if self.selected_month == 12 {
                    1
                } else {
                    self.selected_month + 1
                };
            }
            _ => {}
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current view into `frame`.
    fn render(&self, frame: &mut Frame, data: &DashboardData) {
        let area = frame.area();

        if !data.has_records() {
            charts::render_no_data(frame, area, &self.theme);
            return;
        }

        match self.view {
            ViewMode::Dashboard => self.render_dashboard(frame, data),
            ViewMode::Daily => self.render_daily(frame, data),
            ViewMode::Metrics => self.render_metrics(frame, data),
        }
    }

    /// Monthly bar chart, grand total, quote and key hints.
    fn render_dashboard(&self, frame: &mut Frame, data: &DashboardData) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(10),
                Constraint::Length(4),
                Constraint::Length(2),
            ])
            .split(frame.area());

        frame.render_widget(
            Paragraph::new(Header::new(&self.theme).to_lines()),
            chunks[0],
        );
        charts::render_monthly_chart(frame, chunks[1], &data.monthly, &self.theme);
        charts::render_grand_total(frame, chunks[2], data.grand_total, &self.theme);

        let footer = Paragraph::new(vec![
            Line::from(Span::styled(QUOTE, self.theme.dim)),
            self.hint_line(),
        ]);
        frame.render_widget(footer, chunks[3]);
    }

    /// Daily bar chart for the selected month.
    fn render_daily(&self, frame: &mut Frame, data: &DashboardData) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(10),
                Constraint::Length(1),
            ])
            .split(frame.area());

        frame.render_widget(
            Paragraph::new(Header::new(&self.theme).to_lines()),
            chunks[0],
        );

        let empty = DailyTotals::new();
        let totals = data.daily_for(self.selected_month).unwrap_or(&empty);
        charts::render_daily_chart(frame, chunks[1], self.selected_month, totals, &self.theme);

        frame.render_widget(Paragraph::new(self.hint_line()), chunks[2]);
    }

    /// Metric grid with the mean deltas.
    fn render_metrics(&self, frame: &mut Frame, data: &DashboardData) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(12),
                Constraint::Length(1),
            ])
            .split(frame.area());

        frame.render_widget(
            Paragraph::new(Header::new(&self.theme).to_lines()),
            chunks[0],
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Pagamentos mensais e diferenças em relação à média",
                self.theme.bold,
            ))),
            chunks[1],
        );
        metric::render_metric_grid(frame, chunks[2], &data.metrics, &self.theme);
        frame.render_widget(Paragraph::new(self.hint_line()), chunks[3]);
    }

    /// The one-line key hint shown at the bottom of every view.
    fn hint_line(&self) -> Line<'_> {
        let hint = match self.view {
            ViewMode::Daily => "Tab alterna a visão · ←/→ mudam o mês · q sai",
            _ => "Tab alterna a visão · q sai",
        };
        Line::from(Span::styled(hint, self.theme.dim))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use gastos_core::calendar::MONTH_LABELS;
    use ratatui::backend::TestBackend;

    fn make_data() -> DashboardData {
        let monthly: Vec<MonthlyAggregate> = MONTH_LABELS
            .iter()
            .enumerate()
            .map(|(i, label)| MonthlyAggregate {
                month: i as u32 + 1,
                label: label.to_string(),
                sum_paid: 1_000.0,
                record_count: 1,
                ..Default::default()
            })
            .collect();

        let daily_by_month: Vec<DailyTotals> = (1..=12)
            .map(|_| [(5, 600.0), (20, 400.0)].into_iter().collect())
            .collect();

        let metrics: Vec<MonthlyMetric> = monthly
            .iter()
            .map(|m| MonthlyMetric::from_signed_delta(m.label.clone(), m.sum_paid, 0.0))
            .collect();

        DashboardData {
            monthly,
            daily_by_month,
            grand_total: 12_000.0,
            metrics,
        }
    }

    fn empty_data() -> DashboardData {
        DashboardData {
            monthly: MONTH_LABELS
                .iter()
                .enumerate()
                .map(|(i, label)| MonthlyAggregate {
                    month: i as u32 + 1,
                    label: label.to_string(),
                    ..Default::default()
                })
                .collect(),
            daily_by_month: (1..=12).map(|_| DailyTotals::new()).collect(),
            grand_total: 0.0,
            metrics: Vec::new(),
        }
    }

    // ── ViewMode ──────────────────────────────────────────────────────────────

    #[test]
    fn test_view_mode_from_name() {
        assert_eq!(ViewMode::from_name("dashboard"), ViewMode::Dashboard);
        assert_eq!(ViewMode::from_name("daily"), ViewMode::Daily);
        assert_eq!(ViewMode::from_name("metrics"), ViewMode::Metrics);
        assert_eq!(ViewMode::from_name("unknown"), ViewMode::Dashboard);
    }

    #[test]
    fn test_view_mode_cycle() {
        assert_eq!(ViewMode::Dashboard.next(), ViewMode::Daily);
        assert_eq!(ViewMode::Daily.next(), ViewMode::Metrics);
        assert_eq!(ViewMode::Metrics.next(), ViewMode::Dashboard);
    }

    // ── DashboardData ─────────────────────────────────────────────────────────

    #[test]
    fn test_daily_for_valid_month() {
        let data = make_data();
        assert!(data.daily_for(1).is_some());
        assert!(data.daily_for(12).is_some());
        assert!(data.daily_for(0).is_none());
        assert!(data.daily_for(13).is_none());
    }

    #[test]
    fn test_has_records() {
        assert!(make_data().has_records());
        assert!(!empty_data().has_records());
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    #[test]
    fn test_key_q_quits() {
        let mut app = App::new("dark", ViewMode::Dashboard, 1);
        app.handle_key(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(app.should_quit);
    }

    #[test]
    fn test_key_ctrl_c_quits() {
        let mut app = App::new("dark", ViewMode::Dashboard, 1);
        app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_plain_c_does_not_quit() {
        let mut app = App::new("dark", ViewMode::Dashboard, 1);
        app.handle_key(KeyCode::Char('c'), KeyModifiers::NONE);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_tab_cycles_views() {
        let mut app = App::new("dark", ViewMode::Dashboard, 1);
        app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.view, ViewMode::Daily);
        app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.view, ViewMode::Metrics);
        app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.view, ViewMode::Dashboard);
    }

    #[test]
    fn test_number_keys_jump_to_view() {
        let mut app = App::new("dark", ViewMode::Dashboard, 1);
        app.handle_key(KeyCode::Char('3'), KeyModifiers::NONE);
        assert_eq!(app.view, ViewMode::Metrics);
        app.handle_key(KeyCode::Char('2'), KeyModifiers::NONE);
        assert_eq!(app.view, ViewMode::Daily);
        app.handle_key(KeyCode::Char('1'), KeyModifiers::NONE);
        assert_eq!(app.view, ViewMode::Dashboard);
    }

    #[test]
    fn test_month_navigation_wraps() {
        let mut app = App::new("dark", ViewMode::Daily, 1);
        app.handle_key(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(app.selected_month, 12);
        app.handle_key(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(app.selected_month, 1);
        app.handle_key(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(app.selected_month, 2);
    }

    #[test]
    fn test_month_navigation_only_in_daily_view() {
        let mut app = App::new("dark", ViewMode::Dashboard, 5);
        app.handle_key(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(app.selected_month, 5);
    }

    #[test]
    fn test_new_clamps_month() {
        let app = App::new("dark", ViewMode::Daily, 99);
        assert_eq!(app.selected_month, 12);
    }

    // ── Render (does not panic) ───────────────────────────────────────────────

    #[test]
    fn test_render_all_views() {
        let data = make_data();
        for view in [ViewMode::Dashboard, ViewMode::Daily, ViewMode::Metrics] {
            let backend = TestBackend::new(130, 40);
            let mut terminal = Terminal::new(backend).unwrap();
            let app = App::new("dark", view, 3);

            terminal.draw(|frame| app.render(frame, &data)).unwrap();
        }
    }

    #[test]
    fn test_render_empty_data_shows_placeholder() {
        let data = empty_data();
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let app = App::new("light", ViewMode::Dashboard, 1);

        terminal.draw(|frame| app.render(frame, &data)).unwrap();
    }
}
