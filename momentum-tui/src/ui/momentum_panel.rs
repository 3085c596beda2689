//! Panel 1 — Momentum: duration tabs, top/bottom tables, 5d vs 3mo comparison.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap};
use ratatui::Frame;

use momentum_core::domain::{Duration, MomentumSnapshot, Performers};
use momentum_core::format::display_symbol;
use momentum_core::state::AnalysisView;
use momentum_core::view::{
    comparison_view, stock_table, ComparisonView, StockTable, Variant,
    COMPARISON_UNAVAILABLE_NOTICE, NO_DATA_NOTICE, UNAVAILABLE_HINT, UNAVAILABLE_NOTICE,
};

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.view.analysis {
        AnalysisView::Loading => render_loading(f, area),
        AnalysisView::Failed(message) => render_failed(f, area, message),
        AnalysisView::Ready(snapshot) => render_ready(f, area, app, snapshot),
    }
}

fn render_loading(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Loading momentum data...", theme::accent())),
        Line::from(""),
        Line::from(Span::styled(
            "Rankings are computed on request; this can take a while.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_failed(f: &mut Frame, area: Rect, message: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Error loading momentum data", theme::negative())),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme::text())),
        Line::from(""),
        Line::from(vec![
            Span::styled("[r] ", theme::accent_bold()),
            Span::styled("Retry", theme::muted()),
        ]),
    ];
    let para = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(para, area);
}

fn render_ready(f: &mut Frame, area: Rect, app: &AppState, snapshot: &MomentumSnapshot) {
    let banner_height = if snapshot.is_partial() { 2 } else { 0 };
    let comparison_height = if snapshot.comparison.is_some() { 8 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_height),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(comparison_height),
        ])
        .split(area);

    if let Some(message) = &snapshot.partial_error {
        render_partial_banner(f, chunks[0], message);
    }

    let visible = snapshot.visible_durations();
    if visible.is_empty() {
        let para = Paragraph::new(Span::styled(NO_DATA_NOTICE, theme::muted()));
        f.render_widget(para, chunks[2]);
    } else {
        render_tabs(f, chunks[1], app, &visible);
        if let Some(record) = snapshot.record(app.view.active_duration) {
            let halves = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[2]);
            render_performers(f, halves[0], &record.top, Variant::Top, &app.market_suffix);
            render_performers(f, halves[1], &record.bottom, Variant::Bottom, &app.market_suffix);
        }
    }

    if let Some(comparison) = &snapshot.comparison {
        render_comparison(f, chunks[3], &comparison_view(comparison), &app.market_suffix);
    }
}

fn render_partial_banner(f: &mut Frame, area: Rect, message: &str) {
    let lines = vec![
        Line::from(vec![
            Span::styled("Some data could not be loaded: ", theme::warning()),
            Span::styled(message.to_string(), theme::text()),
        ]),
        Line::from(vec![
            Span::styled("[r] ", theme::accent_bold()),
            Span::styled("Retry live data", theme::muted()),
        ]),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_tabs(
    f: &mut Frame,
    area: Rect,
    app: &AppState,
    visible: &[Duration],
) {
    let titles: Vec<Line> = visible.iter().map(|d| Line::from(d.title())).collect();
    let selected = visible
        .iter()
        .position(|d| *d == app.view.active_duration)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(theme::muted())
        .highlight_style(theme::selected())
        .divider("|");
    f.render_widget(tabs, area);
}

fn render_performers(
    f: &mut Frame,
    area: Rect,
    performers: &Performers,
    variant: Variant,
    suffix: &str,
) {
    let title = match variant {
        Variant::Top => " Top Performers ",
        Variant::Bottom => " Bottom Performers ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(Span::styled(title, theme::header()));

    match stock_table(performers, variant) {
        StockTable::Rows(rows) => {
            let rows: Vec<Row> = rows
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    Row::new(vec![
                        Cell::from(format!("{}", i + 1)).style(theme::muted()),
                        Cell::from(display_symbol(&row.symbol, suffix).to_string()),
                        Cell::from(Line::from(row.formatted.clone()).alignment(Alignment::Right))
                            .style(theme::tone(row.tone)),
                    ])
                })
                .collect();
            let table = Table::new(
                rows,
                [Constraint::Length(3), Constraint::Min(10), Constraint::Length(10)],
            )
            .header(Row::new(vec!["#", "Symbol", "Change"]).style(theme::header()))
            .block(block);
            f.render_widget(table, area);
        }
        StockTable::NoData => {
            let para = Paragraph::new(Span::styled(NO_DATA_NOTICE, theme::muted()))
                .block(block)
                .wrap(Wrap { trim: true });
            f.render_widget(para, area);
        }
        StockTable::Unavailable => {
            let lines = vec![
                Line::from(Span::styled(UNAVAILABLE_NOTICE, theme::warning())),
                Line::from(""),
                Line::from(Span::styled(UNAVAILABLE_HINT, theme::muted())),
            ];
            let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
            f.render_widget(para, area);
        }
    }
}

fn render_comparison(f: &mut Frame, area: Rect, view: &ComparisonView, suffix: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(Span::styled(" 5-Day vs 3-Month Top 10 ", theme::header()))
        .title_bottom(Line::from(Span::styled(" [c] full lists ", theme::muted())));
    let inner = block.inner(area);
    f.render_widget(block, area);

    match view {
        ComparisonView::Unavailable => {
            let para = Paragraph::new(Span::styled(COMPARISON_UNAVAILABLE_NOTICE, theme::warning()));
            f.render_widget(para, inner);
        }
        ComparisonView::Lists { dropped, entered } => {
            let halves = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(inner);
            render_symbol_list(f, halves[0], "Dropped from Top 10", dropped, suffix, theme::negative());
            render_symbol_list(f, halves[1], "Entered Top 10", entered, suffix, theme::positive());
        }
    }
}

fn render_symbol_list(
    f: &mut Frame,
    area: Rect,
    title: &str,
    symbols: &[String],
    suffix: &str,
    style: Style,
) {
    let mut lines = vec![Line::from(Span::styled(title.to_string(), theme::header()))];
    let joined = symbols
        .iter()
        .map(|s| display_symbol(s, suffix))
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(Line::from(Span::styled(joined, style)));
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}
