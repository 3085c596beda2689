//! Background worker thread — every blocking HTTP call runs here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. Commands
//! are handled strictly in order; a later response simply overwrites an
//! earlier one on the main thread.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use momentum_core::domain::{BacktestRequest, BacktestResult, TextRequest, TextResponse};
use momentum_core::fetch::load_snapshot;
use momentum_core::{ApiError, DashboardApi, FetchPlan, SnapshotLoad};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    LoadSnapshot(FetchPlan),
    RunBacktest(BacktestRequest),
    ProcessText(TextRequest),
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    SnapshotLoaded(Box<SnapshotLoad>),
    SnapshotFailed { error: ApiError },

    BacktestComplete { result: Box<BacktestResult> },
    BacktestError { error: ApiError },

    TextProcessed(TextResponse),
    TextError { error: ApiError },
}

/// Spawn the background worker thread. It owns `api` for its lifetime.
pub fn spawn_worker(
    api: Box<dyn DashboardApi>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("momentum-worker".into())
        .spawn(move || worker_loop(api.as_ref(), rx, tx))
}

fn worker_loop(api: &dyn DashboardApi, rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) {
    loop {
        let Ok(cmd) = rx.recv() else { break };
        let Some(resp) = handle_command(api, cmd) else { break };
        if tx.send(resp).is_err() {
            break;
        }
    }
    tracing::debug!("worker stopped");
}

/// Execute one command; `None` means stop.
pub fn handle_command(api: &dyn DashboardApi, cmd: WorkerCommand) -> Option<WorkerResponse> {
    let resp = match cmd {
        WorkerCommand::LoadSnapshot(plan) => match load_snapshot(api, &plan) {
            Ok(load) => {
                tracing::info!(source = %load.source, partial = load.snapshot.is_partial(), "snapshot loaded");
                WorkerResponse::SnapshotLoaded(Box::new(load))
            }
            Err(error) => {
                tracing::error!(%error, "snapshot load failed");
                WorkerResponse::SnapshotFailed { error }
            }
        },
        WorkerCommand::RunBacktest(request) => match api.backtest(&request) {
            Ok(result) => {
                tracing::info!(
                    periods = result.holdings_history.len(),
                    points = result.portfolio_values.len(),
                    "backtest complete"
                );
                WorkerResponse::BacktestComplete {
                    result: Box::new(result),
                }
            }
            Err(error) => {
                tracing::error!(%error, "backtest failed");
                WorkerResponse::BacktestError { error }
            }
        },
        WorkerCommand::ProcessText(request) => match api.process_text(&request) {
            Ok(resp) => WorkerResponse::TextProcessed(resp),
            Err(error) => {
                tracing::warn!(%error, operation = %request.operation, "text processing failed");
                WorkerResponse::TextError { error }
            }
        },
        WorkerCommand::Shutdown => return None,
    };
    Some(resp)
}
