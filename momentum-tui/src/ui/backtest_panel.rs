//! Panel 2 — Backtest: parameter form, then results (summary, returns,
//! holdings by period, value history, composition change, value chart).

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use momentum_core::domain::BacktestResult;
use momentum_core::form::FormField;
use momentum_core::format::format_date;
use momentum_core::state::BacktestView;
use momentum_core::view::{
    composition, holdings_rows, period_label, rebalance_dates, return_metrics, value_history,
};

use crate::app::AppState;
use crate::theme;
use crate::ui::value_chart;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.view.backtest {
        BacktestView::Form { loading, error } => {
            render_form(f, area, app, *loading, error.as_deref())
        }
        BacktestView::Results {
            result,
            active_period,
        } => render_results(f, area, app, result, *active_period),
    }
}

fn render_form(f: &mut Frame, area: Rect, app: &AppState, loading: bool, error: Option<&str>) {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        "Momentum Portfolio Backtest",
        theme::accent_bold(),
    )));
    lines.push(Line::from(Span::styled(
        "Simulates holding the top momentum stocks, rebalanced on a fixed schedule.",
        theme::muted(),
    )));
    lines.push(Line::from(""));

    let focused = app.backtest.focused_field();
    for field in FormField::ALL {
        let is_focused = field == focused && !loading;
        let value_style = if is_focused {
            theme::selected()
        } else {
            theme::text()
        };
        let marker = if is_focused { "▶ " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(marker, theme::accent()),
            Span::styled(format!("{:<24}", field.label()), theme::secondary()),
            Span::styled(format!(" {} ", app.backtest.form.value_of(field)), value_style),
        ]));
    }
    lines.push(Line::from(""));

    if loading {
        lines.push(Line::from(Span::styled(
            "Running backtest... this can take a minute.",
            theme::warning().add_modifier(Modifier::BOLD),
        )));
    } else {
        lines.push(Line::from(vec![
            Span::styled("[Enter] ", theme::accent_bold()),
            Span::styled("Run Backtest", theme::muted()),
        ]));
    }

    if let Some(message) = error {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Backtest failed: ", theme::negative().add_modifier(Modifier::BOLD)),
            Span::styled(message.to_string(), theme::negative()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[j/k] field  [h/l] adjust  [H/L] x10 amount / ±1 month",
        theme::muted(),
    )));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_results(
    f: &mut Frame,
    area: Rect,
    app: &AppState,
    result: &BacktestResult,
    active_period: usize,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    value_chart::render(f, chunks[0], result);

    let lines = result_lines(result, active_period, &app.market_suffix);
    let para = Paragraph::new(lines).scroll((app.backtest.scroll, 0));
    f.render_widget(para, chunks[1]);

    let hint = Line::from(Span::styled(
        "[j/k] scroll  [h/l] holdings period  [x] clear results",
        theme::muted(),
    ));
    f.render_widget(Paragraph::new(hint), chunks[2]);
}

/// Every text section of the results view, top to bottom.
pub fn result_lines(result: &BacktestResult, active_period: usize, suffix: &str) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    // Summary
    section(&mut lines, "Summary");
    for (label, value) in &result.summary {
        lines.push(Line::from(vec![
            Span::styled(format!("  {label:<28}"), theme::secondary()),
            Span::styled(value.clone(), theme::text()),
        ]));
    }
    lines.push(Line::from(""));

    // Returns
    section(&mut lines, "Returns");
    for metric in return_metrics(result) {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<28}", metric.label), theme::secondary()),
            Span::styled(metric.value, theme::tone(metric.tone)),
        ]));
    }
    if let Some(days) = result.metrics.days_held {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<28}", "Days Held"), theme::secondary()),
            Span::styled(days.to_string(), theme::text()),
        ]));
    }
    if let Some(n) = result.metrics.number_of_rebalances {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<28}", "Rebalances"), theme::secondary()),
            Span::styled(n.to_string(), theme::text()),
        ]));
    }
    let dates = rebalance_dates(result);
    if !dates.is_empty() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<28}", "Rebalance Dates"), theme::secondary()),
            Span::styled(dates.join(", "), theme::text()),
        ]));
    }
    lines.push(Line::from(""));

    // Holdings by period
    if let Some(period) = result.holdings_history.get(active_period) {
        section(&mut lines, "Holdings");
        let mut selector = vec![Span::styled("  Period: ", theme::secondary())];
        for i in 0..result.holdings_history.len() {
            let style = if i == active_period {
                theme::selected()
            } else {
                theme::muted()
            };
            selector.push(Span::styled(format!(" {} ", period_label(i)), style));
        }
        lines.push(Line::from(selector));
        lines.push(Line::from(Span::styled(
            format!("  As of {}", format_date(&period.date)),
            theme::muted(),
        )));
        lines.push(Line::from(Span::styled(
            format!(
                "  {:<14} {:>10} {:>14} {:>16} {:>9}",
                "Symbol", "Shares", "Price", "Value", "% Port"
            ),
            theme::header(),
        )));
        for row in holdings_rows(period, suffix) {
            let style = if row.is_cash {
                theme::neutral()
            } else {
                theme::text()
            };
            lines.push(Line::from(Span::styled(
                format!(
                    "  {:<14} {:>10} {:>14} {:>16} {:>9}",
                    row.symbol, row.shares, row.price, row.value, row.percentage
                ),
                style,
            )));
        }
        lines.push(Line::from(""));
    }

    // Value history
    section(&mut lines, "Portfolio Value History");
    lines.push(Line::from(Span::styled(
        format!("  {:<14} {:>18} {:>10}", "Date", "Value", "Change"),
        theme::header(),
    )));
    for row in value_history(result) {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<14} {:>18} ", row.date, row.value), theme::text()),
            Span::styled(format!("{:>10}", row.change), theme::tone(row.tone)),
        ]));
    }
    lines.push(Line::from(""));

    // Composition change
    if let Some(comp) = composition(result, suffix) {
        section(&mut lines, "Portfolio Composition Changes");
        lines.push(Line::from(Span::styled(
            format!(
                "  {:<26} {:<26}",
                format!("Initial ({})", comp.initial.date),
                format!("Latest ({})", comp.last.date)
            ),
            theme::header(),
        )));
        let rows = comp.initial.rows.len().max(comp.last.rows.len());
        for i in 0..rows {
            let cell = |side: &[(String, String)]| {
                side.get(i)
                    .map(|(sym, pct)| format!("{sym:<16}{pct:>8}"))
                    .unwrap_or_default()
            };
            lines.push(Line::from(Span::styled(
                format!("  {:<26} {:<26}", cell(&comp.initial.rows), cell(&comp.last.rows)),
                theme::text(),
            )));
        }
    }

    lines
}

fn section(lines: &mut Vec<Line<'static>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

#[cfg(test)]
mod tests {
    use super::*;
    use momentum_core::domain::{BacktestMetrics, Holding, HoldingsPeriod, PortfolioPoint};

    fn text_of(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    fn result(periods: usize) -> BacktestResult {
        BacktestResult {
            metrics: BacktestMetrics {
                initial_investment: 100_000.0,
                final_value: 110_000.0,
                total_return_abs: 10_000.0,
                total_return_pct: 10.0,
                annualized_return_pct: 40.0,
                ..Default::default()
            },
            summary: vec![("Strategy".into(), "Top 10 momentum".into())],
            portfolio_values: vec![PortfolioPoint {
                date: "2024-03-15".into(),
                value: 110_000.0,
            }],
            holdings_history: (0..periods)
                .map(|i| HoldingsPeriod {
                    date: "2024-03-15".into(),
                    holdings: vec![Holding {
                        symbol: format!("S{i}.NS"),
                        shares: 1.0,
                        price: 100.0,
                        value: 100.0,
                        percentage: 100.0,
                    }],
                    cash: 0.0,
                })
                .collect(),
            rebalance_dates: vec!["2024-03-15".into(), "2024-03-29".into()],
        }
    }

    #[test]
    fn sections_appear_in_order() {
        let text = text_of(&result_lines(&result(2), 0, ".NS"));
        let pos = |needle: &str| text.iter().position(|l| l.contains(needle)).unwrap();
        assert!(pos("Summary") < pos("Returns"));
        assert!(pos("Returns") < pos("Holdings"));
        assert!(pos("Holdings") < pos("Portfolio Value History"));
        assert!(pos("Portfolio Value History") < pos("Portfolio Composition Changes"));
        assert!(text.iter().any(|l| l.contains("+10.00%")));
        assert!(pos("Rebalance Dates") < pos("Holdings"));
        assert!(text[pos("Rebalance Dates")].ends_with("15 Mar 2024, 29 Mar 2024"));
    }

    #[test]
    fn single_period_has_no_composition_and_no_holdings_without_history() {
        let text = text_of(&result_lines(&result(1), 0, ".NS"));
        assert!(!text.iter().any(|l| l.contains("Composition")));
        assert!(text.iter().any(|l| l.contains("S0 ")));

        let text = text_of(&result_lines(&result(0), 0, ".NS"));
        assert!(!text.iter().any(|l| l.starts_with("Holdings")));
    }
}
