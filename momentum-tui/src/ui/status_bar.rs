//! Bottom status bar — panel hints, then the last status or error message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(
        " 1:Momentum 2:Backtest 3:Text 4:Help e:Errors q:Quit",
        theme::muted(),
    ));

    spans.push(Span::raw(" | "));

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    if !app.error_history.is_empty() {
        spans.push(Span::styled(
            format!("  [{} errors]", app.error_history.len()),
            theme::negative(),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
