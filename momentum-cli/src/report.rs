//! Plain-text reports over the core view models.

use serde_json::{json, Value};

use momentum_core::domain::{
    BacktestResult, Comparison, Duration, MomentumSnapshot, Performers, TextResponse,
};
use momentum_core::format::{display_symbol, format_date};
use momentum_core::view::{
    comparison_view, composition, holdings_rows, period_label, rebalance_dates, return_metrics,
    stock_table, value_history, ComparisonView, StockTable, Variant, COMPARISON_UNAVAILABLE_NOTICE,
    NO_DATA_NOTICE, UNAVAILABLE_HINT, UNAVAILABLE_NOTICE,
};

/// Durations to print: the requested one if it has data, else every visible one.
pub fn durations_to_show(snapshot: &MomentumSnapshot, only: Option<Duration>) -> Vec<Duration> {
    match only {
        Some(d) if snapshot.has_duration(d) => vec![d],
        Some(_) => Vec::new(),
        None => snapshot.visible_durations(),
    }
}

pub fn snapshot_report(
    snapshot: &MomentumSnapshot,
    only: Option<Duration>,
    suffix: &str,
) -> String {
    let mut out: Vec<String> = Vec::new();

    if let Some(message) = &snapshot.partial_error {
        out.push(format!("Warning: some data could not be loaded: {message}"));
        out.push(String::new());
    }

    let durations = durations_to_show(snapshot, only);
    if durations.is_empty() {
        out.push(NO_DATA_NOTICE.to_string());
    }
    for duration in durations {
        let Some(record) = snapshot.record(duration) else {
            continue;
        };
        out.push(format!("=== {} ===", duration.title()));
        performers_section(&mut out, "Top Performers", &record.top, Variant::Top, suffix);
        performers_section(&mut out, "Bottom Performers", &record.bottom, Variant::Bottom, suffix);
        out.push(String::new());
    }

    if let Some(comparison) = &snapshot.comparison {
        comparison_section(&mut out, comparison, suffix);
    }

    out.join("\n")
}

fn performers_section(
    out: &mut Vec<String>,
    title: &str,
    performers: &Performers,
    variant: Variant,
    suffix: &str,
) {
    out.push(format!("--- {title} ---"));
    match stock_table(performers, variant) {
        StockTable::Rows(rows) => {
            out.push(format!("{:>3}  {:<20} {:>10}", "#", "Symbol", "Change"));
            for (i, row) in rows.iter().enumerate() {
                out.push(format!(
                    "{:>3}  {:<20} {:>10}",
                    i + 1,
                    display_symbol(&row.symbol, suffix),
                    row.formatted
                ));
            }
        }
        StockTable::NoData => out.push(NO_DATA_NOTICE.to_string()),
        StockTable::Unavailable => {
            out.push(UNAVAILABLE_NOTICE.to_string());
            out.push(UNAVAILABLE_HINT.to_string());
        }
    }
}

fn comparison_section(out: &mut Vec<String>, comparison: &Comparison, suffix: &str) {
    out.push("=== 5-Day vs 3-Month Top 10 ===".to_string());
    match comparison_view(comparison) {
        ComparisonView::Unavailable => out.push(COMPARISON_UNAVAILABLE_NOTICE.to_string()),
        ComparisonView::Lists { dropped, entered } => {
            out.push(format!("Dropped from Top 10: {}", joined(&dropped, suffix)));
            out.push(format!("Entered Top 10:      {}", joined(&entered, suffix)));
        }
    }
}

fn joined(symbols: &[String], suffix: &str) -> String {
    symbols
        .iter()
        .map(|s| display_symbol(s, suffix))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Machine-readable snapshot, keyed the way the API keys it.
pub fn snapshot_json(snapshot: &MomentumSnapshot, only: Option<Duration>) -> Value {
    let mut durations = serde_json::Map::new();
    for duration in durations_to_show(snapshot, only) {
        if let Some(record) = snapshot.record(duration) {
            durations.insert(
                duration.label().to_string(),
                json!({
                    "top_performers": performers_json(&record.top, Variant::Top),
                    "bottom_performers": performers_json(&record.bottom, Variant::Bottom),
                }),
            );
        }
    }

    let comparison = snapshot.comparison.as_ref().map(|c| {
        json!({
            "dropped_from_top_10": c.dropped_from_top_10,
            "entered_top_10": c.entered_top_10,
            "full_5d_top_10": c.full_5d_top_10,
            "full_3mo_top_10": c.full_3mo_top_10,
        })
    });

    json!({
        "durations": durations,
        "comparison": comparison,
        "error": snapshot.partial_error,
    })
}

/// Ranked rows as `[{symbol, change}]`; `null` when the slice is unavailable.
fn performers_json(performers: &Performers, variant: Variant) -> Value {
    match stock_table(performers, variant) {
        StockTable::Rows(rows) => Value::Array(
            rows.into_iter()
                .map(|r| json!({ "symbol": r.symbol, "change": r.value }))
                .collect(),
        ),
        StockTable::NoData => Value::Array(Vec::new()),
        StockTable::Unavailable => Value::Null,
    }
}

pub fn backtest_report(result: &BacktestResult, suffix: &str) -> String {
    let mut out: Vec<String> = Vec::new();

    out.push("=== Backtest Result ===".to_string());
    for (label, value) in &result.summary {
        out.push(format!("{:<24} {value}", format!("{label}:")));
    }
    out.push(String::new());

    out.push("--- Returns ---".to_string());
    for metric in return_metrics(result) {
        out.push(format!("{:<24} {}", format!("{}:", metric.label), metric.value));
    }
    if let Some(days) = result.metrics.days_held {
        out.push(format!("{:<24} {days}", "Days Held:"));
    }
    if let Some(n) = result.metrics.number_of_rebalances {
        out.push(format!("{:<24} {n}", "Rebalances:"));
    }
    let dates = rebalance_dates(result);
    if !dates.is_empty() {
        out.push(format!("{:<24} {}", "Rebalance Dates:", dates.join(", ")));
    }
    out.push(String::new());

    out.push("--- Portfolio Value History ---".to_string());
    out.push(format!("{:<14} {:>18} {:>10}", "Date", "Value", "Change"));
    for row in value_history(result) {
        out.push(format!("{:<14} {:>18} {:>10}", row.date, row.value, row.change));
    }
    out.push(String::new());

    for (i, period) in result.holdings_history.iter().enumerate() {
        out.push(format!(
            "--- Holdings: {} ({}) ---",
            period_label(i),
            format_date(&period.date)
        ));
        out.push(format!(
            "{:<14} {:>10} {:>14} {:>16} {:>9}",
            "Symbol", "Shares", "Price", "Value", "% Port"
        ));
        for row in holdings_rows(period, suffix) {
            out.push(format!(
                "{:<14} {:>10} {:>14} {:>16} {:>9}",
                row.symbol, row.shares, row.price, row.value, row.percentage
            ));
        }
        out.push(String::new());
    }

    if let Some(comp) = composition(result, suffix) {
        out.push("--- Portfolio Composition Changes ---".to_string());
        out.push(format!(
            "{:<26} {:<26}",
            format!("Initial ({})", comp.initial.date),
            format!("Latest ({})", comp.last.date)
        ));
        let rows = comp.initial.rows.len().max(comp.last.rows.len());
        for i in 0..rows {
            let cell = |side: &[(String, String)]| {
                side.get(i)
                    .map(|(sym, pct)| format!("{sym:<16}{pct:>8}"))
                    .unwrap_or_default()
            };
            out.push(format!(
                "{:<26} {:<26}",
                cell(&comp.initial.rows),
                cell(&comp.last.rows)
            ));
        }
    }

    out.join("\n")
}

pub fn text_report(resp: &TextResponse) -> String {
    format!(
        "Original:  {}\nOperation: {}\nResult:    {}",
        resp.original, resp.operation, resp.result
    )
}
