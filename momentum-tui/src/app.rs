//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. View semantics (loading, failure, tab and
//! period selection) are delegated to the core reducer; this module adds
//! what only a terminal needs: panels, focus, scroll, overlays, the status
//! bar and the worker channels.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};

use chrono::{NaiveDate, NaiveDateTime};

use momentum_core::domain::{TextOperation, TextRequest, TextResponse};
use momentum_core::form::{BacktestForm, FormField};
use momentum_core::state::{Effect, Event, Section, ViewState};
pub use momentum_core::error::ErrorCategory;
use momentum_core::DashboardConfig;

use crate::worker::{WorkerCommand, WorkerResponse};

const ERROR_HISTORY_CAP: usize = 50;

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Momentum,
    Backtest,
    TextTool,
    Help,
}

impl Panel {
    const COUNT: usize = 4;

    pub fn index(self) -> usize {
        match self {
            Panel::Momentum => 0,
            Panel::Backtest => 1,
            Panel::TextTool => 2,
            Panel::Help => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Momentum),
            1 => Some(Panel::Backtest),
            2 => Some(Panel::TextTool),
            3 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Momentum => "Momentum",
            Panel::Backtest => "Backtest",
            Panel::TextTool => "Text Tool",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % Self::COUNT).unwrap_or(Panel::Momentum)
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + Self::COUNT - 1) % Self::COUNT)
            .unwrap_or(Panel::Momentum)
    }

    /// Dashboard section this panel shows, if any.
    pub fn section(self) -> Option<Section> {
        match self {
            Panel::Momentum => Some(Section::Analysis),
            Panel::Backtest => Some(Section::Backtest),
            Panel::TextTool | Panel::Help => None,
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Backtest form focus plus results scroll.
#[derive(Debug, Clone)]
pub struct BacktestPanelState {
    pub form: BacktestForm,
    pub focus: usize,
    pub scroll: u16,
}

impl BacktestPanelState {
    pub fn new(form: BacktestForm) -> Self {
        Self {
            form,
            focus: 0,
            scroll: 0,
        }
    }

    pub fn focused_field(&self) -> FormField {
        FormField::ALL[self.focus.min(FormField::ALL.len() - 1)]
    }

    pub fn focus_next(&mut self) {
        if self.focus + 1 < FormField::ALL.len() {
            self.focus += 1;
        }
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }
}

/// Text tool panel state.
#[derive(Debug, Clone, Default)]
pub struct TextToolState {
    pub input: String,
    pub editing: bool,
    pub operation: TextOperation,
    pub loading: bool,
    pub result: Option<TextResponse>,
    pub error: Option<String>,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    ErrorHistory,
    ComparisonDetail,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Dashboard view state (pure reducer) and panel states
    pub view: ViewState,
    pub backtest: BacktestPanelState,
    pub text: TextToolState,
    pub market_suffix: String,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
}

impl AppState {
    pub fn new(
        config: &DashboardConfig,
        today: NaiveDate,
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
    ) -> Self {
        Self {
            active_panel: Panel::Momentum,
            running: true,
            view: ViewState::default(),
            backtest: BacktestPanelState::new(BacktestForm::with_defaults(today, &config.backtest)),
            text: TextToolState::default(),
            market_suffix: config.market_suffix.clone(),
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
        }
    }

    /// Kick off the start-up load.
    pub fn start(&mut self) {
        let (view, effects) = ViewState::start();
        self.view = view;
        self.set_status("Connecting to momentum API...");
        self.run_effects(effects);
    }

    /// Feed an event through the reducer and execute what it asks for.
    pub fn dispatch(&mut self, event: Event) {
        let effects = self.view.apply(event);
        self.run_effects(effects);
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            let cmd = match effect {
                Effect::LoadSnapshot(plan) => WorkerCommand::LoadSnapshot(plan),
                Effect::RunBacktest(request) => WorkerCommand::RunBacktest(request),
            };
            self.send(cmd);
        }
    }

    fn send(&mut self, cmd: WorkerCommand) {
        if self.worker_tx.send(cmd).is_err() {
            self.push_error(
                ErrorCategory::Network,
                "Background worker stopped; restart the dashboard".into(),
                String::new(),
            );
        }
    }

    /// Panel on screen. The two dashboard panels follow the reducer's
    /// active section.
    pub fn panel(&self) -> Panel {
        match self.active_panel {
            Panel::Momentum | Panel::Backtest => match self.view.section {
                Section::Analysis => Panel::Momentum,
                Section::Backtest => Panel::Backtest,
            },
            other => other,
        }
    }

    pub fn switch_panel(&mut self, panel: Panel) {
        self.active_panel = panel;
        if let Some(section) = panel.section() {
            self.dispatch(Event::SelectSection(section));
        }
    }

    pub fn retry(&mut self) {
        if !self.view.is_loading() {
            self.set_status("Retrying live data...");
        }
        self.dispatch(Event::Retry);
    }

    /// Validate the form and, if valid, start a backtest.
    pub fn submit_backtest(&mut self) {
        if self.view.backtest.is_loading() {
            self.set_warning("A backtest is already running");
            return;
        }
        match self.backtest.form.submit() {
            Ok(request) => {
                self.backtest.scroll = 0;
                self.set_status("Running backtest...");
                self.dispatch(Event::SubmitBacktest(request));
            }
            Err(e) => self.push_error(ErrorCategory::Input, e.to_string(), "backtest form".into()),
        }
    }

    pub fn clear_results(&mut self) {
        self.backtest.scroll = 0;
        self.dispatch(Event::ClearResults);
    }

    pub fn submit_text(&mut self) {
        if self.text.loading {
            return;
        }
        self.text.editing = false;
        self.text.loading = true;
        self.text.error = None;
        let request = TextRequest {
            text: self.text.input.clone(),
            operation: self.text.operation,
        };
        self.send(WorkerCommand::ProcessText(request));
    }

    /// Apply one worker response.
    pub fn handle_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::SnapshotLoaded(load) => {
                let load = *load;
                if let Some(msg) = &load.snapshot.partial_error {
                    self.set_warning(format!("Partial data: {msg}"));
                } else if load.used_fallback() {
                    self.set_status("Showing sample data");
                } else {
                    self.set_status("Momentum data loaded");
                }
                self.dispatch(Event::SnapshotLoaded(load.snapshot));
            }
            WorkerResponse::SnapshotFailed { error } => {
                self.push_error(error.category(), error.to_string(), "momentum analysis".into());
                self.dispatch(Event::SnapshotFailed(error.to_string()));
            }
            WorkerResponse::BacktestComplete { result } => {
                let m = &result.metrics;
                self.set_status(format!(
                    "Backtest complete: {} periods, {:+.2}% total return",
                    result.holdings_history.len(),
                    m.total_return_pct
                ));
                self.backtest.scroll = 0;
                self.dispatch(Event::BacktestLoaded(*result));
            }
            WorkerResponse::BacktestError { error } => {
                self.push_error(error.category(), error.to_string(), "backtest".into());
                self.dispatch(Event::BacktestFailed(error.to_string()));
            }
            WorkerResponse::TextProcessed(resp) => {
                self.text.loading = false;
                self.set_status(format!("Processed text: {}", resp.operation));
                self.text.result = Some(resp);
            }
            WorkerResponse::TextError { error } => {
                self.text.loading = false;
                self.text.error = Some(error.to_string());
                self.push_error(error.category(), error.to_string(), "text tool".into());
            }
        }
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
