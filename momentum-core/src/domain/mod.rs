//! Domain types for the momentum dashboard

pub mod backtest;
pub mod duration;
pub mod snapshot;
pub mod text_ops;

pub use backtest::{
    BacktestMetrics, BacktestRequest, BacktestResult, Holding, HoldingsPeriod,
    PortfolioPoint, PreformattedMetrics, RebalancePeriod,
};
pub use duration::Duration;
pub use snapshot::{Comparison, DurationRecord, MomentumSnapshot, Performers};
pub use text_ops::{TextOperation, TextOutput, TextRequest, TextResponse};
