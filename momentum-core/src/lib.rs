//! Momentum dashboard core — everything except the terminal.
//!
//! - Domain types (durations, performer tables, backtest results, text tool)
//! - Payload ingestion: loosely shaped JSON in, decided enums out
//! - Display formatting and view models shared by the TUI and the CLI
//! - Fetch orchestration with health gate and fallback source
//! - Blocking HTTP client
//! - Pure view-state reducer and the backtest form

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod form;
pub mod format;
pub mod ingest;
pub mod state;
pub mod view;

pub use client::HttpClient;
pub use config::DashboardConfig;
pub use error::{ApiError, ErrorCategory, IngestError};
pub use fetch::{DashboardApi, FetchPlan, SnapshotLoad, Source};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything that crosses the worker channel is Send.
    #[allow(dead_code)]
    fn assert_send() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::MomentumSnapshot>();
        require_sync::<domain::MomentumSnapshot>();
        require_send::<domain::BacktestRequest>();
        require_send::<domain::BacktestResult>();
        require_sync::<domain::BacktestResult>();
        require_send::<domain::TextRequest>();
        require_send::<domain::TextResponse>();
        require_send::<fetch::FetchPlan>();
        require_send::<ApiError>();
        require_send::<HttpClient>();
        require_send::<Box<dyn DashboardApi>>();
    }
}
