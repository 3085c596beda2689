//! Momentum dashboard TUI — terminal front end over `momentum-core`.
//!
//! Four panels:
//! - Momentum rankings per duration with the 5-day vs 3-month comparison
//! - Backtest form and results
//! - Text processing tool
//! - Help

pub mod app;
pub mod input;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;
pub use input::handle_key;
