//! Keyboard input dispatch — overlays → text entry → global keys → panel keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use momentum_core::state::{BacktestView, Event};

use crate::app::{AppState, Overlay, Panel};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::ComparisonDetail => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('c')) {
                app.overlay = Overlay::None;
            }
            return;
        }
        Overlay::None => {}
    }

    // 2. Text entry swallows everything but its own controls.
    if app.panel() == Panel::TextTool && app.text.editing {
        handle_text_entry(app, key);
        return;
    }

    // 3. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => { app.switch_panel(Panel::Momentum); return; }
        KeyCode::Char('2') => { app.switch_panel(Panel::Backtest); return; }
        KeyCode::Char('3') => { app.switch_panel(Panel::TextTool); return; }
        KeyCode::Char('4') | KeyCode::Char('?') => { app.switch_panel(Panel::Help); return; }
        KeyCode::Tab => {
            app.switch_panel(app.panel().next());
            return;
        }
        KeyCode::BackTab => {
            app.switch_panel(app.panel().prev());
            return;
        }
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
            return;
        }
        _ => {}
    }

    // 4. Panel-specific keys.
    match app.panel() {
        Panel::Momentum => handle_momentum_key(app, key),
        Panel::Backtest => match app.view.backtest {
            BacktestView::Form { .. } => handle_form_key(app, key),
            BacktestView::Results { .. } => handle_results_key(app, key),
        },
        Panel::TextTool => handle_text_key(app, key),
        Panel::Help => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_momentum_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('l') | KeyCode::Right => app.dispatch(Event::NextDuration),
        KeyCode::Char('h') | KeyCode::Left => app.dispatch(Event::PrevDuration),
        KeyCode::Char('r') => app.retry(),
        KeyCode::Char('c') => {
            if app.view.snapshot().is_some_and(|s| s.comparison.is_some()) {
                app.overlay = Overlay::ComparisonDetail;
            }
        }
        KeyCode::Char('b') => app.switch_panel(Panel::Backtest),
        _ => {}
    }
}

fn handle_form_key(app: &mut AppState, key: KeyEvent) {
    let coarse = key.modifiers.contains(KeyModifiers::SHIFT);
    let field = app.backtest.focused_field();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.backtest.focus_next(),
        KeyCode::Char('k') | KeyCode::Up => app.backtest.focus_prev(),
        KeyCode::Char('l') | KeyCode::Right => app.backtest.form.adjust(field, 1, coarse),
        KeyCode::Char('h') | KeyCode::Left => app.backtest.form.adjust(field, -1, coarse),
        KeyCode::Char('L') => app.backtest.form.adjust(field, 1, true),
        KeyCode::Char('H') => app.backtest.form.adjust(field, -1, true),
        KeyCode::Enter => app.submit_backtest(),
        _ => {}
    }
}

fn handle_results_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.backtest.scroll = app.backtest.scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.backtest.scroll = app.backtest.scroll.saturating_sub(1);
        }
        KeyCode::PageDown => app.backtest.scroll = app.backtest.scroll.saturating_add(10),
        KeyCode::PageUp => app.backtest.scroll = app.backtest.scroll.saturating_sub(10),
        KeyCode::Char('g') | KeyCode::Home => app.backtest.scroll = 0,
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Char(']') => app.dispatch(Event::NextPeriod),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('[') => app.dispatch(Event::PrevPeriod),
        KeyCode::Char('x') => app.clear_results(),
        _ => {}
    }
}

fn handle_text_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('i') => app.text.editing = true,
        KeyCode::Char('o') | KeyCode::Char('l') | KeyCode::Right => {
            app.text.operation = app.text.operation.next();
        }
        KeyCode::Enter => app.submit_text(),
        KeyCode::Char('x') => {
            app.text.input.clear();
            app.text.result = None;
            app.text.error = None;
        }
        _ => {}
    }
}

fn handle_text_entry(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.text.editing = false,
        KeyCode::Enter => app.submit_text(),
        KeyCode::Backspace => {
            app.text.input.pop();
        }
        KeyCode::Char(c) => app.text.input.push(c),
        _ => {}
    }
}
