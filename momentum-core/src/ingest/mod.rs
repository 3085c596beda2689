//! Payload ingestion — the single place where response shape is inspected.
//!
//! Renderers downstream only ever see [`MomentumSnapshot`] and
//! [`BacktestResult`], whose enums already say whether a slice is ranked,
//! empty, or unavailable.

pub mod mapper;
pub mod schema;

use crate::domain::{BacktestResult, MomentumSnapshot};
use crate::error::IngestError;

use schema::{RawBacktest, RawSnapshot};

/// Parse a momentum-analysis body (primary or sample source).
///
/// A literal `null` body is an empty payload; an object with no durations is
/// accepted and simply renders no tabs.
pub fn parse_snapshot(body: &str) -> Result<MomentumSnapshot, IngestError> {
    let raw: Option<RawSnapshot> =
        serde_json::from_str(body).map_err(|e| IngestError::Shape(e.to_string()))?;
    let raw = raw.ok_or(IngestError::EmptyPayload)?;
    Ok(mapper::map_snapshot(raw))
}

/// Parse a backtest body.
pub fn parse_backtest(body: &str) -> Result<BacktestResult, IngestError> {
    let raw: RawBacktest =
        serde_json::from_str(body).map_err(|e| IngestError::Shape(e.to_string()))?;
    mapper::map_backtest(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Duration, Performers};

    #[test]
    fn null_body_is_empty_payload() {
        assert_eq!(parse_snapshot("null"), Err(IngestError::EmptyPayload));
    }

    #[test]
    fn garbage_body_is_shape_error() {
        assert!(matches!(parse_snapshot("<html>"), Err(IngestError::Shape(_))));
    }

    #[test]
    fn partial_payload_synthesizes_every_duration() {
        let snap = parse_snapshot(
            r#"{"error": "Yahoo rate limited",
                "5d": {"top_performers": {"A.NS": 3.2}, "bottom_performers": {}}}"#,
        )
        .unwrap();
        assert_eq!(snap.partial_error.as_deref(), Some("Yahoo rate limited"));
        assert_eq!(snap.durations.len(), 6);
        assert!(snap.record(Duration::FiveDays).unwrap().top.is_ranked());
        assert_eq!(
            snap.record(Duration::OneYear).unwrap().top,
            Performers::Unavailable
        );
        assert!(snap.comparison.as_ref().unwrap().is_unavailable());
    }

    #[test]
    fn healthy_payload_leaves_missing_durations_absent() {
        let snap = parse_snapshot(
            r#"{"3mo": {"top_performers": {"A.NS": 3.2}, "bottom_performers": {"B.NS": -1}}}"#,
        )
        .unwrap();
        assert!(!snap.is_partial());
        assert_eq!(snap.visible_durations(), vec![Duration::ThreeMonths]);
        assert!(snap.comparison.is_none());
    }

    #[test]
    fn backtest_error_body_is_upstream_error() {
        let err = parse_backtest(r#"{"error": "Failed to download data"}"#).unwrap_err();
        assert_eq!(err, IngestError::Upstream("Failed to download data".into()));
    }

    #[test]
    fn backtest_body_maps_all_sections() {
        let body = r#"{
            "result": {"initial_investment": 500000.0, "final_value": 550000.0,
                       "total_return_rs": 50000.0, "total_return_pct": 10.0,
                       "annualized_return_pct": 45.2, "days_held": 92,
                       "number_of_rebalances": 7},
            "summary": {"Initial Investment": "Rs 500,000.00", "Number of Rebalances": 7},
            "portfolio_values": [{"date": "2024-03-15", "value": 500000.0},
                                 {"date": "2024-03-29", "value": 510000.0}],
            "rebalance_dates": ["2024-03-15"],
            "holdings_history": [{"date": "2024-03-15", "cash": 120.5,
                "holdings": [{"symbol": "TCS.NS", "shares": 12.0, "price": 4000.0,
                              "value": 48000.0, "percentage": 9.6}]}]
        }"#;
        let result = parse_backtest(body).unwrap();
        assert_eq!(result.metrics.days_held, Some(92));
        assert_eq!(result.metrics.total_return_abs, 50000.0);
        assert_eq!(
            result.summary,
            vec![
                ("Initial Investment".to_string(), "Rs 500,000.00".to_string()),
                ("Number of Rebalances".to_string(), "7".to_string()),
            ]
        );
        assert_eq!(result.portfolio_values.len(), 2);
        assert_eq!(result.holdings_history[0].holdings[0].symbol, "TCS.NS");
        assert_eq!(result.rebalance_dates, vec!["2024-03-15"]);
    }
}
