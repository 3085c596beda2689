//! Backtest request and result types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How often the simulated portfolio is rebalanced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum RebalancePeriod {
    Weekly,
    #[default]
    BiWeekly,
    Monthly,
}

impl RebalancePeriod {
    pub const ALL: [RebalancePeriod; 3] = [
        RebalancePeriod::Weekly,
        RebalancePeriod::BiWeekly,
        RebalancePeriod::Monthly,
    ];

    pub fn days(self) -> u32 {
        match self {
            RebalancePeriod::Weekly => 7,
            RebalancePeriod::BiWeekly => 14,
            RebalancePeriod::Monthly => 30,
        }
    }

    pub fn from_days(days: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.days() == days)
    }

    pub fn label(self) -> &'static str {
        match self {
            RebalancePeriod::Weekly => "Weekly (7 days)",
            RebalancePeriod::BiWeekly => "Bi-weekly (14 days)",
            RebalancePeriod::Monthly => "Monthly (30 days)",
        }
    }

    pub fn next(self) -> Self {
        match self {
            RebalancePeriod::Weekly => RebalancePeriod::BiWeekly,
            RebalancePeriod::BiWeekly => RebalancePeriod::Monthly,
            RebalancePeriod::Monthly => RebalancePeriod::Weekly,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            RebalancePeriod::Weekly => RebalancePeriod::Monthly,
            RebalancePeriod::BiWeekly => RebalancePeriod::Weekly,
            RebalancePeriod::Monthly => RebalancePeriod::BiWeekly,
        }
    }
}

impl TryFrom<u32> for RebalancePeriod {
    type Error = String;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        Self::from_days(days).ok_or_else(|| format!("unsupported rebalance period: {days} days"))
    }
}

impl From<RebalancePeriod> for u32 {
    fn from(p: RebalancePeriod) -> u32 {
        p.days()
    }
}

/// A validated simulation request. Build one through [`crate::form::BacktestForm`].
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestRequest {
    pub initial_investment: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rebalance_period: RebalancePeriod,
}

impl BacktestRequest {
    /// Query-string pairs for `/api/momentum-backtest`.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("initial_investment", format_amount(self.initial_investment)),
            ("start_date", self.start_date.format("%Y-%m-%d").to_string()),
            ("end_date", self.end_date.format("%Y-%m-%d").to_string()),
            (
                "rebalance_period_days",
                self.rebalance_period.days().to_string(),
            ),
        ]
    }
}

fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        amount.to_string()
    }
}

/// Scalar outcome of a simulation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BacktestMetrics {
    pub initial_investment: f64,
    pub final_value: f64,
    pub total_return_abs: f64,
    pub total_return_pct: f64,
    pub annualized_return_pct: f64,
    pub days_held: Option<i64>,
    pub number_of_rebalances: Option<u64>,
    /// Display strings the server may send alongside the raw numbers.
    pub preformatted: PreformattedMetrics,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PreformattedMetrics {
    pub initial_investment: Option<String>,
    pub final_value: Option<String>,
    pub total_return_abs: Option<String>,
    pub total_return_pct: Option<String>,
    pub annualized_return_pct: Option<String>,
}

/// One point of the portfolio value series.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioPoint {
    /// Date as sent by the API; see [`crate::format::parse_api_date`].
    pub date: String,
    pub value: f64,
}

/// A single position inside a holdings snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    pub symbol: String,
    pub shares: f64,
    pub price: f64,
    pub value: f64,
    pub percentage: f64,
}

/// Portfolio composition right after one rebalance.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingsPeriod {
    pub date: String,
    pub holdings: Vec<Holding>,
    pub cash: f64,
}

impl HoldingsPeriod {
    pub fn invested_value(&self) -> f64 {
        self.holdings.iter().map(|h| h.value).sum()
    }
}

/// A complete simulation report.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BacktestResult {
    pub metrics: BacktestMetrics,
    /// Ordered `(label, display value)` pairs.
    pub summary: Vec<(String, String)>,
    pub portfolio_values: Vec<PortfolioPoint>,
    pub holdings_history: Vec<HoldingsPeriod>,
    pub rebalance_dates: Vec<String>,
}
