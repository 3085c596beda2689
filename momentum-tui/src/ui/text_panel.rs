//! Panel 3 — Text tool: free text in, one server-side transform out.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use momentum_core::domain::TextOperation;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let text = &app.text;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled("Text Processing", theme::accent_bold())));
    lines.push(Line::from(""));

    // Input
    let input_style = if text.editing {
        theme::text().add_modifier(Modifier::UNDERLINED)
    } else {
        theme::text()
    };
    let mut input = vec![
        Span::styled(format!("{:<12}", "Text:"), theme::secondary()),
        Span::styled(text.input.clone(), input_style),
    ];
    if text.editing {
        input.push(Span::styled("█", theme::accent()));
    } else if text.input.is_empty() {
        input.push(Span::styled("(empty)", theme::muted()));
    }
    lines.push(Line::from(input));

    // Operation selector
    let mut ops = vec![Span::styled(format!("{:<12}", "Operation:"), theme::secondary())];
    for op in TextOperation::ALL {
        let style = if op == text.operation {
            theme::selected()
        } else {
            theme::muted()
        };
        ops.push(Span::styled(format!(" {op} "), style));
        ops.push(Span::raw(" "));
    }
    lines.push(Line::from(ops));
    lines.push(Line::from(""));

    if text.loading {
        lines.push(Line::from(Span::styled("Processing...", theme::warning())));
    } else if let Some(error) = &text.error {
        lines.push(Line::from(vec![
            Span::styled("Error: ", theme::negative().add_modifier(Modifier::BOLD)),
            Span::styled(error.clone(), theme::negative()),
        ]));
    } else if let Some(resp) = &text.result {
        lines.push(Line::from(Span::styled("Result", theme::header())));
        lines.push(Line::from(vec![
            Span::styled(format!("{:<12}", "Original:"), theme::secondary()),
            Span::styled(resp.original.clone(), theme::text()),
        ]));
        lines.push(Line::from(vec![
            Span::styled(format!("{:<12}", "Operation:"), theme::secondary()),
            Span::styled(resp.operation.to_string(), theme::text()),
        ]));
        lines.push(Line::from(vec![
            Span::styled(format!("{:<12}", "Result:"), theme::secondary()),
            Span::styled(resp.result.to_string(), theme::positive()),
        ]));
    }

    lines.push(Line::from(""));
    let hint = if text.editing {
        "[Enter] process  [Esc] stop editing  [Backspace] delete"
    } else {
        "[i] edit text  [o] next operation  [Enter] process  [x] clear"
    };
    lines.push(Line::from(Span::styled(hint, theme::muted())));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
