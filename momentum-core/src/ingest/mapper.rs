//! Raw wire schema → decided domain types.

use serde_json::Value;

use super::schema::{
    OrderedEntries, RawBacktest, RawComparison, RawDurationRecord, RawHoldingsPeriod,
    RawMetrics, RawSnapshot,
};
use crate::domain::{
    BacktestMetrics, BacktestResult, Comparison, Duration, DurationRecord, Holding,
    HoldingsPeriod, MomentumSnapshot, Performers, PortfolioPoint, PreformattedMetrics,
};
use crate::error::IngestError;

/// Keys the upstream puts inside a performer table when it could not compute it.
const SENTINEL_KEYS: [&str; 2] = ["Error", "Info"];

pub fn map_snapshot(raw: RawSnapshot) -> MomentumSnapshot {
    let partial_error = raw.error.as_ref().and_then(error_message);

    let slots = [
        (Duration::FiveDays, raw.five_days),
        (Duration::TenDays, raw.ten_days),
        (Duration::OneMonth, raw.one_month),
        (Duration::ThreeMonths, raw.three_months),
        (Duration::SixMonths, raw.six_months),
        (Duration::OneYear, raw.one_year),
    ];

    let mut snapshot = MomentumSnapshot {
        partial_error,
        comparison: raw.comparison.map(map_comparison),
        ..Default::default()
    };

    for (duration, record) in slots {
        match record {
            Some(r) => {
                snapshot.durations.insert(duration, map_duration(duration, r));
            }
            // A partially failed payload still gets every tab, each marked
            // unavailable, so the screen shows what failed instead of nothing.
            None if snapshot.partial_error.is_some() => {
                snapshot
                    .durations
                    .insert(duration, DurationRecord::unavailable());
            }
            None => {}
        }
    }

    if snapshot.partial_error.is_some() && snapshot.comparison.is_none() {
        snapshot.comparison = Some(Comparison::default());
    }

    snapshot
}

fn map_duration(duration: Duration, raw: RawDurationRecord) -> DurationRecord {
    DurationRecord {
        top: map_performers(duration, "top", raw.top_performers),
        bottom: map_performers(duration, "bottom", raw.bottom_performers),
    }
}

pub(crate) fn map_performers(duration: Duration, side: &str, entries: OrderedEntries) -> Performers {
    let entries = entries.0;
    if entries.is_empty() {
        return Performers::Empty;
    }
    if entries
        .iter()
        .any(|(k, _)| SENTINEL_KEYS.contains(&k.as_str()))
    {
        return Performers::Unavailable;
    }

    let mut ranked = Vec::with_capacity(entries.len());
    for (symbol, value) in entries {
        match value.as_f64() {
            Some(pct) if pct.is_finite() => ranked.push((symbol, pct)),
            _ => {
                tracing::warn!(%duration, side, %symbol, %value, "non-numeric performer value");
                return Performers::Unavailable;
            }
        }
    }
    Performers::Ranked(ranked)
}

fn map_comparison(raw: RawComparison) -> Comparison {
    Comparison {
        dropped_from_top_10: dedup(raw.dropped_from_top_10),
        entered_top_10: dedup(raw.entered_top_10),
        full_5d_top_10: dedup(raw.full_5d_top_10),
        full_3mo_top_10: dedup(raw.full_3mo_top_10),
    }
}

/// Exact-string dedup, first occurrence wins.
fn dedup(symbols: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(symbols.len());
    for s in symbols {
        if !out.contains(&s) {
            out.push(s);
        }
    }
    out
}

/// A payload `error` counts only when it is truthy.
fn error_message(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

pub fn map_backtest(raw: RawBacktest) -> Result<BacktestResult, IngestError> {
    let metrics = match (raw.result, raw.error.as_ref().and_then(error_message)) {
        (Some(m), _) => map_metrics(m),
        (None, Some(msg)) => return Err(IngestError::Upstream(msg)),
        (None, None) => return Err(IngestError::Shape("missing `result` block".into())),
    };

    Ok(BacktestResult {
        metrics,
        summary: raw
            .summary
            .0
            .into_iter()
            .map(|(label, value)| (label, display_value(&value)))
            .collect(),
        portfolio_values: raw
            .portfolio_values
            .into_iter()
            .map(|p| PortfolioPoint {
                date: display_value(&p.date),
                value: p.value,
            })
            .collect(),
        holdings_history: raw.holdings_history.into_iter().map(map_period).collect(),
        rebalance_dates: raw.rebalance_dates.iter().map(display_value).collect(),
    })
}

fn map_metrics(m: RawMetrics) -> BacktestMetrics {
    BacktestMetrics {
        initial_investment: m.initial_investment,
        final_value: m.final_value,
        total_return_abs: m.total_return_rs,
        total_return_pct: m.total_return_pct,
        annualized_return_pct: m.annualized_return_pct,
        days_held: m.days_held,
        number_of_rebalances: m.number_of_rebalances,
        preformatted: PreformattedMetrics {
            initial_investment: m.initial_investment_formatted,
            final_value: m.final_value_formatted,
            total_return_abs: m.total_return_rs_formatted,
            total_return_pct: m.total_return_pct_formatted,
            annualized_return_pct: m.annualized_return_pct_formatted,
        },
    }
}

fn map_period(raw: RawHoldingsPeriod) -> HoldingsPeriod {
    HoldingsPeriod {
        date: display_value(&raw.date),
        holdings: raw
            .holdings
            .into_iter()
            .map(|h| Holding {
                symbol: h.symbol,
                shares: h.shares,
                price: h.price,
                value: h.value,
                percentage: h.percentage,
            })
            .collect(),
        cash: raw.cash,
    }
}

/// Render a loosely typed JSON scalar the way a browser would print it.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
