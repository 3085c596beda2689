//! Random key sequences must never panic, in input handling or drawing.

use std::sync::mpsc;

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use proptest::prelude::*;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

use momentum_core::ingest::{parse_backtest, parse_snapshot};
use momentum_core::{DashboardConfig, SnapshotLoad, Source};
use momentum_tui::app::AppState;
use momentum_tui::worker::WorkerResponse;
use momentum_tui::{handle_key, ui};

const SNAPSHOT: &str = include_str!("../../momentum-core/tests/fixtures/momentum_analysis.json");
const BACKTEST: &str = include_str!("../../momentum-core/tests/fixtures/backtest.json");

fn key_code() -> impl Strategy<Value = KeyCode> {
    prop_oneof![
        prop::sample::select(vec![
            'q', '1', '2', '3', '4', '?', 'e', 'c', 'h', 'j', 'k', 'l', 'H', 'L', 'r', 'x', 'i',
            'o', 'g', '[', ']', 'b', ' ', 'z',
        ])
        .prop_map(KeyCode::Char),
        prop::sample::select(vec![
            KeyCode::Enter,
            KeyCode::Esc,
            KeyCode::Tab,
            KeyCode::BackTab,
            KeyCode::Backspace,
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::Left,
            KeyCode::Right,
            KeyCode::PageUp,
            KeyCode::PageDown,
            KeyCode::Home,
        ]),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn any_key_sequence_is_safe(
        keys in prop::collection::vec((key_code(), any::<bool>()), 0..60),
        with_results in any::<bool>(),
    ) {
        let (cmd_tx, _cmd_rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let mut app = AppState::new(&DashboardConfig::default(), today, cmd_tx, resp_rx);
        app.start();
        app.handle_response(WorkerResponse::SnapshotLoaded(Box::new(SnapshotLoad {
            snapshot: parse_snapshot(SNAPSHOT).unwrap(),
            source: Source::Sample,
        })));
        if with_results {
            app.submit_backtest();
            app.handle_response(WorkerResponse::BacktestComplete {
                result: Box::new(parse_backtest(BACKTEST).unwrap()),
            });
        }

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        for (code, shift) in keys {
            let modifiers = if shift { KeyModifiers::SHIFT } else { KeyModifiers::NONE };
            handle_key(&mut app, KeyEvent::new(code, modifiers));
            terminal.draw(|f| ui::draw(f, &app)).unwrap();
            if !app.running {
                break;
            }
        }

        let form = &app.backtest.form;
        prop_assert!(form.initial_investment >= 10_000.0);
        prop_assert!(form.initial_investment <= 10_000_000.0);
    }
}
