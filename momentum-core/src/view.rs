//! View models — what each dashboard section shows, independent of the
//! terminal or CLI that draws it.

use std::cmp::Ordering;

use crate::domain::{BacktestResult, Comparison, HoldingsPeriod, Performers};
use crate::format::{
    display_symbol, format_currency, format_date, format_percentage, format_share_pct,
    format_shares,
};

pub const NO_DATA_NOTICE: &str = "No data available for this time period";
pub const UNAVAILABLE_NOTICE: &str = "Unable to retrieve stock data for this time period";
pub const UNAVAILABLE_HINT: &str =
    "The market data source may be experiencing issues or rate limiting. Please try again later or select a different time period.";
pub const COMPARISON_UNAVAILABLE_NOTICE: &str = "Unable to retrieve comparison data";
pub const NONE_ROW: &str = "None";

/// Which side of the momentum ranking a table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Top,
    Bottom,
}

/// Colour semantics, decided here so front ends only map tone → colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Favorable,
    Unfavorable,
    Neutral,
}

impl Tone {
    /// Favorable when `value >= 0`.
    pub fn of_sign(value: f64) -> Self {
        if value >= 0.0 {
            Tone::Favorable
        } else {
            Tone::Unfavorable
        }
    }
}

// ── Stock tables ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct StockRow {
    pub symbol: String,
    pub value: f64,
    pub formatted: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StockTable {
    Rows(Vec<StockRow>),
    NoData,
    Unavailable,
}

/// Sort a ranked slice: top descending, bottom ascending. Ties keep input order.
pub fn rank(pairs: &[(String, f64)], variant: Variant) -> Vec<(String, f64)> {
    let mut sorted = pairs.to_vec();
    // `sort_by` is stable, which is what keeps ties in payload order.
    sorted.sort_by(|a, b| {
        let ord = match variant {
            Variant::Top => b.1.partial_cmp(&a.1),
            Variant::Bottom => a.1.partial_cmp(&b.1),
        };
        ord.unwrap_or(Ordering::Equal)
    });
    sorted
}

fn stock_tone(value: f64, variant: Variant) -> Tone {
    match variant {
        Variant::Top if value > 0.0 => Tone::Favorable,
        Variant::Top => Tone::Unfavorable,
        Variant::Bottom if value < 0.0 => Tone::Unfavorable,
        Variant::Bottom => Tone::Favorable,
    }
}

pub fn stock_table(performers: &Performers, variant: Variant) -> StockTable {
    match performers {
        Performers::Empty => StockTable::NoData,
        Performers::Unavailable => StockTable::Unavailable,
        Performers::Ranked(pairs) if pairs.is_empty() => StockTable::NoData,
        Performers::Ranked(pairs) => StockTable::Rows(
            rank(pairs, variant)
                .into_iter()
                .map(|(symbol, value)| StockRow {
                    formatted: format_percentage(value),
                    tone: stock_tone(value, variant),
                    symbol,
                    value,
                })
                .collect(),
        ),
    }
}

// ── Comparison ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonView {
    Unavailable,
    Lists {
        /// Each list holds a single `"None"` row when empty.
        dropped: Vec<String>,
        entered: Vec<String>,
    },
}

pub fn comparison_view(comparison: &Comparison) -> ComparisonView {
    if comparison.is_unavailable() {
        return ComparisonView::Unavailable;
    }
    ComparisonView::Lists {
        dropped: list_or_none(&comparison.dropped_from_top_10),
        entered: list_or_none(&comparison.entered_top_10),
    }
}

fn list_or_none(symbols: &[String]) -> Vec<String> {
    if symbols.is_empty() {
        vec![NONE_ROW.to_string()]
    } else {
        symbols.to_vec()
    }
}

// ── Backtest results ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct MetricLine {
    pub label: &'static str,
    pub value: String,
    pub tone: Tone,
}

/// Headline return figures. Server-preformatted strings win when present.
pub fn return_metrics(result: &BacktestResult) -> Vec<MetricLine> {
    let m = &result.metrics;
    let pre = &m.preformatted;
    let total_tone = Tone::of_sign(m.total_return_pct);

    let total_abs = pre
        .total_return_abs
        .clone()
        .unwrap_or_else(|| format_currency(m.total_return_abs));
    let total_pct = pre
        .total_return_pct
        .clone()
        .unwrap_or_else(|| format_percentage(m.total_return_pct));

    vec![
        MetricLine {
            label: "Initial Investment",
            value: pre
                .initial_investment
                .clone()
                .unwrap_or_else(|| format_currency(m.initial_investment)),
            tone: Tone::Neutral,
        },
        MetricLine {
            label: "Final Value",
            value: pre
                .final_value
                .clone()
                .unwrap_or_else(|| format_currency(m.final_value)),
            tone: total_tone,
        },
        MetricLine {
            label: "Total Return",
            value: format!("{total_abs} ({total_pct})"),
            tone: total_tone,
        },
        MetricLine {
            label: "Annualized Return",
            value: pre
                .annualized_return_pct
                .clone()
                .unwrap_or_else(|| format_percentage(m.annualized_return_pct)),
            tone: Tone::of_sign(m.annualized_return_pct),
        },
    ]
}

/// Rebalance dates as display strings; empty when the server sent none.
pub fn rebalance_dates(result: &BacktestResult) -> Vec<String> {
    result.rebalance_dates.iter().map(|d| format_date(d)).collect()
}

/// Selector label for a holdings period: `Initial`, then `2`, `3`, …
pub fn period_label(index: usize) -> String {
    if index == 0 {
        "Initial".to_string()
    } else {
        (index + 1).to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoldingRow {
    pub symbol: String,
    pub shares: String,
    pub price: String,
    pub value: String,
    pub percentage: String,
    pub is_cash: bool,
}

/// Cash as a share of the period's total; `None` when there is no residual cash.
pub fn cash_share_pct(period: &HoldingsPeriod) -> Option<f64> {
    if period.cash <= 0.0 {
        return None;
    }
    Some(period.cash / (period.cash + period.invested_value()) * 100.0)
}

pub fn holdings_rows(period: &HoldingsPeriod, market_suffix: &str) -> Vec<HoldingRow> {
    let mut rows: Vec<HoldingRow> = period
        .holdings
        .iter()
        .map(|h| HoldingRow {
            symbol: display_symbol(&h.symbol, market_suffix).to_string(),
            shares: format_shares(h.shares),
            price: format_currency(h.price),
            value: format_currency(h.value),
            percentage: format_share_pct(h.percentage),
            is_cash: false,
        })
        .collect();

    if let Some(pct) = cash_share_pct(period) {
        rows.push(HoldingRow {
            symbol: "Cash".to_string(),
            shares: "-".to_string(),
            price: "-".to_string(),
            value: format_currency(period.cash),
            percentage: format_share_pct(pct),
            is_cash: true,
        });
    }
    rows
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueRow {
    pub date: String,
    pub value: String,
    pub change_pct: f64,
    pub change: String,
    pub tone: Tone,
}

/// Percentage change of each point against the one before it; the first point
/// is measured against the initial investment.
pub fn value_changes(result: &BacktestResult) -> Vec<f64> {
    let mut prev = result.metrics.initial_investment;
    result
        .portfolio_values
        .iter()
        .map(|p| {
            let change = (p.value - prev) / prev * 100.0;
            prev = p.value;
            change
        })
        .collect()
}

pub fn value_history(result: &BacktestResult) -> Vec<ValueRow> {
    result
        .portfolio_values
        .iter()
        .zip(value_changes(result))
        .map(|(p, change)| ValueRow {
            date: format_date(&p.date),
            value: format_currency(p.value),
            change_pct: change,
            change: format_percentage(change),
            tone: Tone::of_sign(change),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompositionSide {
    pub date: String,
    /// `(display symbol, share of portfolio)`.
    pub rows: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompositionView {
    pub initial: CompositionSide,
    pub last: CompositionSide,
}

/// First vs last holdings period; needs at least two periods.
pub fn composition(result: &BacktestResult, market_suffix: &str) -> Option<CompositionView> {
    let history = &result.holdings_history;
    if history.len() < 2 {
        return None;
    }
    let side = |period: &HoldingsPeriod| CompositionSide {
        date: format_date(&period.date),
        rows: period
            .holdings
            .iter()
            .map(|h| {
                (
                    display_symbol(&h.symbol, market_suffix).to_string(),
                    format_share_pct(h.percentage),
                )
            })
            .collect(),
    };
    Some(CompositionView {
        initial: side(&history[0]),
        last: side(&history[history.len() - 1]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BacktestMetrics, Holding, PortfolioPoint};

    fn pairs(items: &[(&str, f64)]) -> Vec<(String, f64)> {
        items.iter().map(|(s, v)| (s.to_string(), *v)).collect()
    }

    fn holding(symbol: &str, value: f64, pct: f64) -> Holding {
        Holding {
            symbol: symbol.into(),
            shares: 1.0,
            price: value,
            value,
            percentage: pct,
        }
    }

    fn result_with_values(initial: f64, values: &[f64]) -> BacktestResult {
        BacktestResult {
            metrics: BacktestMetrics {
                initial_investment: initial,
                ..Default::default()
            },
            portfolio_values: values
                .iter()
                .enumerate()
                .map(|(i, v)| PortfolioPoint {
                    date: format!("2024-03-{:02}", i + 1),
                    value: *v,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn top_sorted_descending_bottom_ascending() {
        let input = pairs(&[("A", 1.0), ("B", 3.0), ("C", -2.0)]);
        let top: Vec<f64> = rank(&input, Variant::Top).iter().map(|p| p.1).collect();
        let bottom: Vec<f64> = rank(&input, Variant::Bottom).iter().map(|p| p.1).collect();
        assert_eq!(top, vec![3.0, 1.0, -2.0]);
        assert_eq!(bottom, vec![-2.0, 1.0, 3.0]);
    }

    #[test]
    fn ties_keep_payload_order() {
        let input = pairs(&[("X", 1.0), ("A", 1.0), ("M", 1.0)]);
        for variant in [Variant::Top, Variant::Bottom] {
            let names: Vec<String> = rank(&input, variant).into_iter().map(|p| p.0).collect();
            assert_eq!(names, vec!["X", "A", "M"]);
        }
    }

    #[test]
    fn stock_table_fallbacks_are_distinct() {
        assert_eq!(stock_table(&Performers::Empty, Variant::Top), StockTable::NoData);
        assert_eq!(
            stock_table(&Performers::Unavailable, Variant::Top),
            StockTable::Unavailable
        );
        assert_eq!(
            stock_table(&Performers::Ranked(vec![]), Variant::Bottom),
            StockTable::NoData
        );
    }

    #[test]
    fn stock_tone_follows_variant() {
        let StockTable::Rows(top) =
            stock_table(&Performers::Ranked(pairs(&[("A", 0.0), ("B", 2.0)])), Variant::Top)
        else {
            panic!("expected rows");
        };
        assert_eq!(top[0].tone, Tone::Favorable);
        assert_eq!(top[1].tone, Tone::Unfavorable);
        assert_eq!(top[1].formatted, "+0.00%");

        let StockTable::Rows(bottom) = stock_table(
            &Performers::Ranked(pairs(&[("A", 0.0), ("B", -2.0)])),
            Variant::Bottom,
        ) else {
            panic!("expected rows");
        };
        assert_eq!(bottom[0].tone, Tone::Unfavorable);
        assert_eq!(bottom[1].tone, Tone::Favorable);
    }

    #[test]
    fn comparison_none_rows_are_independent() {
        let c = Comparison {
            dropped_from_top_10: vec!["A.NS".into(), "B.NS".into()],
            ..Default::default()
        };
        assert_eq!(
            comparison_view(&c),
            ComparisonView::Lists {
                dropped: vec!["A.NS".into(), "B.NS".into()],
                entered: vec!["None".into()],
            }
        );
        assert_eq!(comparison_view(&Comparison::default()), ComparisonView::Unavailable);
    }

    #[test]
    fn value_history_first_row_uses_initial_investment() {
        let result = result_with_values(100.0, &[110.0, 99.0]);
        let changes = value_changes(&result);
        assert!((changes[0] - 10.0).abs() < 1e-9);
        assert!((changes[1] - (-10.0)).abs() < 1e-9);

        let rows = value_history(&result);
        assert_eq!(rows[0].change, "+10.00%");
        assert_eq!(rows[1].tone, Tone::Unfavorable);
        assert_eq!(rows[0].date, "1 Mar 2024");
    }

    #[test]
    fn cash_row_share_and_omission() {
        let mut period = HoldingsPeriod {
            date: "2024-03-15".into(),
            holdings: vec![holding("A.NS", 300.0, 60.0), holding("B.NS", 100.0, 20.0)],
            cash: 100.0,
        };
        assert_eq!(cash_share_pct(&period), Some(20.0));
        let rows = holdings_rows(&period, ".NS");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].symbol, "A");
        assert!(rows[2].is_cash);
        assert_eq!(rows[2].percentage, "20.00%");
        assert_eq!(rows[2].shares, "-");

        period.cash = 0.0;
        assert_eq!(cash_share_pct(&period), None);
        assert_eq!(holdings_rows(&period, ".NS").len(), 2);
    }

    #[test]
    fn period_labels() {
        assert_eq!(period_label(0), "Initial");
        assert_eq!(period_label(1), "2");
        assert_eq!(period_label(4), "5");
    }

    #[test]
    fn composition_requires_two_periods() {
        let period = |date: &str, sym: &str| HoldingsPeriod {
            date: date.into(),
            holdings: vec![holding(sym, 100.0, 100.0)],
            cash: 0.0,
        };
        let mut result = BacktestResult::default();
        result.holdings_history.push(period("2024-03-15", "A.NS"));
        assert!(composition(&result, ".NS").is_none());

        result.holdings_history.push(period("2024-03-29", "B.NS"));
        result.holdings_history.push(period("2024-04-12", "C.NS"));
        let view = composition(&result, ".NS").unwrap();
        assert_eq!(view.initial.rows[0].0, "A");
        assert_eq!(view.last.rows[0].0, "C");
        assert_eq!(view.last.date, "12 Apr 2024");
    }

    #[test]
    fn metrics_tone_follows_sign() {
        let result = BacktestResult {
            metrics: BacktestMetrics {
                initial_investment: 500_000.0,
                final_value: 450_000.0,
                total_return_abs: -50_000.0,
                total_return_pct: -10.0,
                annualized_return_pct: 3.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let lines = return_metrics(&result);
        assert_eq!(lines[0].value, "₹5,00,000.00");
        assert_eq!(lines[1].tone, Tone::Unfavorable);
        assert_eq!(lines[2].value, "-₹50,000.00 (-10.00%)");
        assert_eq!(lines[3].tone, Tone::Favorable);
    }
}
