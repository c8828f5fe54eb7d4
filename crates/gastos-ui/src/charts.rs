//! Bar charts and summary panels for the spending dashboard.
//!
//! All render functions are pure consumers of the aggregated data: they take
//! a frame, an area and a theme and draw, nothing else.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use gastos_core::calendar::{capitalize, month_abbreviation, month_label};
use gastos_core::formatting::{format_currency, format_number};
use gastos_core::models::{DailyTotals, MonthlyAggregate};

use crate::themes::Theme;

/// Render the "payments per month" bar chart over the twelve reindexed
/// monthly paid sums.
pub fn render_monthly_chart(
    frame: &mut Frame,
    area: Rect,
    monthly: &[MonthlyAggregate],
    theme: &Theme,
) {
    let bars: Vec<Bar> = monthly
        .iter()
        .map(|aggregate| {
            Bar::default()
                .value(chart_value(aggregate.sum_paid))
                .label(Line::from(
                    month_abbreviation(aggregate.month).unwrap_or("?"),
                ))
                .text_value(format_number(aggregate.sum_paid, 0))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Pagamentos realizados por mês em 2022 "),
        )
        .bar_width(8)
        .bar_gap(1)
        .bar_style(theme.bar)
        .value_style(theme.bar_value)
        .label_style(theme.bar_label)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

/// Render the daily bar chart for one month.
///
/// Only days present in `totals` get a bar; the aggregation layer already
/// omits days without payments.
pub fn render_daily_chart(
    frame: &mut Frame,
    area: Rect,
    month: u32,
    totals: &DailyTotals,
    theme: &Theme,
) {
    let title = format!(
        " {} — valor pago por dia do mês ",
        capitalize(month_label(month).unwrap_or("?"))
    );

    if totals.is_empty() {
        let placeholder = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("Nenhum pagamento neste mês", theme.warning)),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(placeholder, area);
        return;
    }

    let labels: Vec<String> = totals.keys().map(|day| day.to_string()).collect();
    let bars: Vec<Bar> = totals
        .values()
        .zip(labels.iter())
        .map(|(&value, label)| {
            Bar::default()
                .value(chart_value(value))
                .label(Line::from(label.clone()))
        })
        .collect();

    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .bar_width(3)
        .bar_gap(1)
        .bar_style(theme.bar)
        .value_style(theme.bar_value)
        .label_style(theme.bar_label)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

/// Render the grand-total panel.
pub fn render_grand_total(frame: &mut Frame, area: Rect, total: f64, theme: &Theme) {
    let lines = vec![
        Line::from(Span::styled("Gasto total em 2022", theme.label)),
        Line::from(Span::styled(format_currency(total), theme.total)),
    ];

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Pagamentos totais "));

    frame.render_widget(panel, area);
}

/// Render a "no data" placeholder when the ledger produced no aggregates.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Nenhum dado de pagamento encontrado", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Verifique o diretório de dados abertos do município.",
            theme.dim,
        )),
        Line::from(Span::styled("Pressione 'q' ou Ctrl+C para sair", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Gastos de Capelinha/MG "),
        ),
        area,
    );
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Clamp a monetary value to the non-negative integer range bar charts draw.
fn chart_value(value: f64) -> u64 {
    value.max(0.0).round() as u64
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use gastos_core::calendar::MONTH_LABELS;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn make_monthly() -> Vec<MonthlyAggregate> {
        MONTH_LABELS
            .iter()
            .enumerate()
            .map(|(i, label)| MonthlyAggregate {
                month: i as u32 + 1,
                label: label.to_string(),
                sum_paid: (i as f64 + 1.0) * 10_000.0,
                record_count: 3,
                ..Default::default()
            })
            .collect()
    }

    // ── chart_value ───────────────────────────────────────────────────────────

    #[test]
    fn test_chart_value_rounds() {
        assert_eq!(chart_value(10.6), 11);
        assert_eq!(chart_value(0.0), 0);
    }

    #[test]
    fn test_chart_value_clamps_negative() {
        assert_eq!(chart_value(-250.0), 0);
    }

    // ── Render (does not panic) ───────────────────────────────────────────────

    #[test]
    fn test_render_monthly_chart_does_not_panic() {
        let backend = TestBackend::new(130, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let monthly = make_monthly();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_monthly_chart(frame, area, &monthly, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_monthly_chart_empty_does_not_panic() {
        let backend = TestBackend::new(130, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_monthly_chart(frame, area, &[], &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_daily_chart_does_not_panic() {
        let backend = TestBackend::new(130, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let totals: DailyTotals = [(5, 100.0), (20, 50.0)].into_iter().collect();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_daily_chart(frame, area, 1, &totals, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_daily_chart_empty_month_does_not_panic() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let totals = DailyTotals::new();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_daily_chart(frame, area, 2, &totals, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_grand_total_does_not_panic() {
        let backend = TestBackend::new(80, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_grand_total(frame, area, 34_234_121.11, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_no_data_does_not_panic() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_no_data(frame, area, &theme);
            })
            .unwrap();
    }
}
