//! Panel 4 — Help: keyboard shortcuts.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::theme;

pub fn render(f: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global Navigation");
    key(&mut lines, "1-4", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "e", "Open error history overlay");
    key(&mut lines, "q / Ctrl+C", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 1 — Momentum");
    key(&mut lines, "h / l", "Previous / next duration tab");
    key(&mut lines, "r", "Retry loading live data");
    key(&mut lines, "c", "Show full 5-day and 3-month top 10 lists");
    key(&mut lines, "b", "Go to the backtest form");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 2 — Backtest form");
    key(&mut lines, "j / k", "Next / previous field");
    key(&mut lines, "h / l", "Decrease / increase value (₹10,000 or 1 day)");
    key(&mut lines, "H / L", "Coarse step (₹1,00,000 or 1 month)");
    key(&mut lines, "Enter", "Run backtest");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 2 — Backtest results");
    key(&mut lines, "j / k", "Scroll");
    key(&mut lines, "PgUp / PgDn / g", "Scroll by page / back to top");
    key(&mut lines, "h / l  [ / ]", "Previous / next holdings period");
    key(&mut lines, "x", "Clear results and return to the form");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 3 — Text tool");
    key(&mut lines, "i", "Edit text (Esc to stop)");
    key(&mut lines, "o / l", "Cycle operation");
    key(&mut lines, "Enter", "Process text");
    key(&mut lines, "x", "Clear input and result");
    lines.push(Line::from(""));

    section(&mut lines, "Colours");
    key(&mut lines, "green", "Gain, or a top performer above zero");
    key(&mut lines, "red", "Loss, or a bottom performer below zero");

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>20}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
