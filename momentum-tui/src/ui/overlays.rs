//! Overlay widgets — error history and the full top-10 comparison.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use momentum_core::format::display_symbol;
use momentum_core::view::{comparison_view, ComparisonView, COMPARISON_UNAVAILABLE_NOTICE};

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let visible_height = inner.height as usize;
    let start = app.error_scroll.min(app.error_history.len() - 1);
    let end = (start + visible_height).min(app.error_history.len());

    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app.error_history.range(start..end).enumerate() {
        let style = if i == 0 {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(err.message.as_str(), style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.context.as_str(), theme::muted()),
            ]));
        }
    }

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(para, inner);
}

/// Full 5-day and 3-month top-10 lists with the membership change between them.
pub fn render_comparison_detail(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Top 10: 5 Days vs 3 Months [Esc]close ")
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let Some(comparison) = app.view.snapshot().and_then(|s| s.comparison.as_ref()) else {
        let text = Paragraph::new(Span::styled("No comparison loaded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    };

    let (dropped, entered) = match comparison_view(comparison) {
        ComparisonView::Unavailable => {
            let text =
                Paragraph::new(Span::styled(COMPARISON_UNAVAILABLE_NOTICE, theme::warning()));
            f.render_widget(text, inner);
            return;
        }
        ComparisonView::Lists { dropped, entered } => (dropped, entered),
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(inner);

    let suffix = app.market_suffix.as_str();
    symbol_column(f, columns[0], "5-Day Top 10", &comparison.full_5d_top_10, suffix, theme::text());
    symbol_column(f, columns[1], "3-Month Top 10", &comparison.full_3mo_top_10, suffix, theme::text());
    symbol_column(f, columns[2], "Dropped", &dropped, suffix, theme::negative());
    symbol_column(f, columns[3], "Entered", &entered, suffix, theme::positive());
}

fn symbol_column(
    f: &mut Frame,
    area: Rect,
    title: &str,
    symbols: &[String],
    suffix: &str,
    style: Style,
) {
    let mut lines = vec![
        Line::from(Span::styled(title.to_string(), theme::header())),
        Line::from(""),
    ];
    for (i, symbol) in symbols.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("{:>2}. ", i + 1), theme::muted()),
            Span::styled(display_symbol(symbol, suffix).to_string(), style),
        ]));
    }
    f.render_widget(Paragraph::new(lines), area);
}
