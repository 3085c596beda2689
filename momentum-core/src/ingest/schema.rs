//! Wire schema of the dashboard API, exactly as the server sends it.
//!
//! Nothing here is interpreted; [`super::mapper`] turns these into domain
//! types.

use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;

/// A JSON object kept as `(key, value)` pairs in document order.
///
/// Performer tables rely on the server's key order to break ties, and the
/// backtest summary is displayed in the order the server chose.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedEntries(pub Vec<(String, Value)>);

impl<'de> Deserialize<'de> for OrderedEntries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = OrderedEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries: Vec<(String, Value)> =
                    Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    // Repeated key: keeps its first position, takes the last value.
                    match entries.iter_mut().find(|(k, _)| *k == key) {
                        Some(slot) => slot.1 = value,
                        None => entries.push((key, value)),
                    }
                }
                Ok(OrderedEntries(entries))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(OrderedEntries::default())
            }
        }

        deserializer.deserialize_any(EntriesVisitor)
    }
}

/// `/api/momentum-analysis` and `/api/test-data` body.
#[derive(Debug, Deserialize)]
pub struct RawSnapshot {
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub comparison: Option<RawComparison>,
    #[serde(rename = "5d", default)]
    pub five_days: Option<RawDurationRecord>,
    #[serde(rename = "10d", default)]
    pub ten_days: Option<RawDurationRecord>,
    #[serde(rename = "1mo", default)]
    pub one_month: Option<RawDurationRecord>,
    #[serde(rename = "3mo", default)]
    pub three_months: Option<RawDurationRecord>,
    #[serde(rename = "6mo", default)]
    pub six_months: Option<RawDurationRecord>,
    #[serde(rename = "1y", default)]
    pub one_year: Option<RawDurationRecord>,
}

#[derive(Debug, Deserialize)]
pub struct RawDurationRecord {
    #[serde(default)]
    pub top_performers: OrderedEntries,
    #[serde(default)]
    pub bottom_performers: OrderedEntries,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawComparison {
    #[serde(default)]
    pub dropped_from_top_10: Vec<String>,
    #[serde(default)]
    pub entered_top_10: Vec<String>,
    #[serde(default)]
    pub full_5d_top_10: Vec<String>,
    #[serde(default)]
    pub full_3mo_top_10: Vec<String>,
}

/// `/api/momentum-backtest` body.
#[derive(Debug, Deserialize)]
pub struct RawBacktest {
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub result: Option<RawMetrics>,
    #[serde(default)]
    pub summary: OrderedEntries,
    #[serde(default)]
    pub portfolio_values: Vec<RawPoint>,
    #[serde(default)]
    pub holdings_history: Vec<RawHoldingsPeriod>,
    #[serde(default)]
    pub rebalance_dates: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct RawMetrics {
    pub initial_investment: f64,
    pub final_value: f64,
    #[serde(alias = "total_return_abs")]
    pub total_return_rs: f64,
    pub total_return_pct: f64,
    #[serde(default)]
    pub annualized_return_pct: f64,
    #[serde(default)]
    pub days_held: Option<i64>,
    #[serde(default)]
    pub number_of_rebalances: Option<u64>,
    #[serde(default)]
    pub initial_investment_formatted: Option<String>,
    #[serde(default)]
    pub final_value_formatted: Option<String>,
    #[serde(default)]
    pub total_return_rs_formatted: Option<String>,
    #[serde(default)]
    pub total_return_pct_formatted: Option<String>,
    #[serde(default)]
    pub annualized_return_pct_formatted: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawPoint {
    pub date: Value,
    pub value: f64,
}

#[derive(Debug, Deserialize)]
pub struct RawHoldingsPeriod {
    pub date: Value,
    #[serde(default)]
    pub holdings: Vec<RawHolding>,
    #[serde(default)]
    pub cash: f64,
}

#[derive(Debug, Deserialize)]
pub struct RawHolding {
    pub symbol: String,
    #[serde(default)]
    pub shares: f64,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub percentage: f64,
}
