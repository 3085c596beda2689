//! Portfolio value line chart for backtest results.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use momentum_core::domain::BacktestResult;
use momentum_core::format::{format_currency, format_date};

use crate::theme;

pub fn render(f: &mut Frame, area: Rect, result: &BacktestResult) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(Span::styled(" Portfolio Value ", theme::header()));

    if result.portfolio_values.is_empty() {
        let para = Paragraph::new(Span::styled("No value history returned.", theme::muted()))
            .block(block);
        f.render_widget(para, area);
        return;
    }

    let values: Vec<f64> = result.portfolio_values.iter().map(|p| p.value).collect();
    let initial = result.metrics.initial_investment;

    let (min_y, max_y) = values
        .iter()
        .copied()
        .chain(std::iter::once(initial))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let padding = ((max_y - min_y).abs() * 0.05).max(1.0);
    let y_min = min_y - padding;
    let y_max = max_y + padding;
    let x_max = (values.len().saturating_sub(1) as f64).max(1.0);

    let data: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect();
    let baseline = [(0.0, initial), (x_max, initial)];

    let final_value = values[values.len() - 1];
    let line_color = if final_value >= initial {
        theme::POSITIVE
    } else {
        theme::NEGATIVE
    };

    let datasets = vec![
        Dataset::default()
            .name("Initial")
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(theme::MUTED))
            .graph_type(GraphType::Line)
            .data(&baseline),
        Dataset::default()
            .name("Value")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(line_color))
            .graph_type(GraphType::Line)
            .data(&data),
    ];

    let first_date = format_date(&result.portfolio_values[0].date);
    let last_date = format_date(&result.portfolio_values[values.len() - 1].date);

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::styled(first_date, theme::muted()),
                    Span::styled(last_date, theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format_currency(y_min), theme::muted()),
                    Span::styled(format_currency(y_max), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}
