//! Momentum snapshot — one fetched analysis payload covering every duration.
//!
//! These are the *decided* types: shape sniffing (sentinel keys, missing
//! durations, the payload-level `error` field) happens once in
//! [`crate::ingest`], so nothing downstream re-inspects raw JSON.

use std::collections::BTreeMap;

use super::duration::Duration;

/// Ranked movers for one side (top or bottom) of one duration.
#[derive(Debug, Clone, PartialEq)]
pub enum Performers {
    /// `(symbol, percentage)` pairs in payload key order.
    Ranked(Vec<(String, f64)>),
    /// The upstream returned an empty mapping.
    Empty,
    /// The upstream signalled a failure for this slice (`Error`/`Info` sentinel).
    Unavailable,
}

impl Performers {
    pub fn is_ranked(&self) -> bool {
        matches!(self, Performers::Ranked(_))
    }
}

/// Top and bottom movers for a single duration.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationRecord {
    pub top: Performers,
    pub bottom: Performers,
}

impl DurationRecord {
    /// Placeholder used when a partially failed payload omits a duration.
    pub fn unavailable() -> Self {
        Self {
            top: Performers::Unavailable,
            bottom: Performers::Unavailable,
        }
    }
}

/// Short-window vs long-window top-10 membership change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comparison {
    pub dropped_from_top_10: Vec<String>,
    pub entered_top_10: Vec<String>,
    pub full_5d_top_10: Vec<String>,
    pub full_3mo_top_10: Vec<String>,
}

impl Comparison {
    /// All four lists empty means the comparison could not be computed upstream.
    pub fn is_unavailable(&self) -> bool {
        self.dropped_from_top_10.is_empty()
            && self.entered_top_10.is_empty()
            && self.full_5d_top_10.is_empty()
            && self.full_3mo_top_10.is_empty()
    }
}

/// A fully ingested momentum-analysis payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MomentumSnapshot {
    pub durations: BTreeMap<Duration, DurationRecord>,
    /// `None` when the payload had no comparison block at all.
    pub comparison: Option<Comparison>,
    /// Set when the payload carried a top-level `error`; the rest is partial.
    pub partial_error: Option<String>,
}

impl MomentumSnapshot {
    pub fn record(&self, duration: Duration) -> Option<&DurationRecord> {
        self.durations.get(&duration)
    }

    pub fn has_duration(&self, duration: Duration) -> bool {
        self.durations.contains_key(&duration)
    }

    /// Durations with data, in display order.
    ///
    /// A duration missing from the payload gets no tab at all. That hides
    /// upstream gaps instead of reporting them; revisit once the API documents
    /// whether a missing window is expected.
    pub fn visible_durations(&self) -> Vec<Duration> {
        Duration::ALL
            .into_iter()
            .filter(|d| self.has_duration(*d))
            .collect()
    }

    pub fn is_partial(&self) -> bool {
        self.partial_error.is_some()
    }
}
