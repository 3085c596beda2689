//! Parrot/neon theme tokens for the momentum dashboard.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, selected tab, headings)
//! - **Positive**: Neon green (gains, favorable tone)
//! - **Negative**: Hot pink (losses, failures, unfavorable tone)
//! - **Warning**: Neon orange (partial data, alerts)
//! - **Neutral**: Cool purple (secondary info)
//! - **Muted**: Steel blue (hints, disabled)

use ratatui::style::{Color, Modifier, Style};

use momentum_core::view::Tone;

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Rgb(170, 170, 170);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn secondary() -> Style {
    Style::default().fg(TEXT_SECONDARY)
}

/// Column headers and section titles.
pub fn header() -> Style {
    Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Focused row in a list or form.
pub fn selected() -> Style {
    accent().add_modifier(Modifier::REVERSED)
}

/// Map view-model tone to colour.
pub fn tone(tone: Tone) -> Style {
    match tone {
        Tone::Favorable => positive(),
        Tone::Unfavorable => negative(),
        Tone::Neutral => text(),
    }
}
