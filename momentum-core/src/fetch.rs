//! Fetch orchestration — health gate, ordered sources, first-success fallback.
//!
//! [`DashboardApi`] is the seam between orchestration and transport: the
//! HTTP client implements it for real, tests implement it with scripted
//! responses.

use std::fmt;

use crate::domain::{BacktestRequest, BacktestResult, MomentumSnapshot, TextRequest, TextResponse};
use crate::error::ApiError;
use crate::ingest;

/// An endpoint that can answer a snapshot-related GET.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Health,
    Primary,
    Sample,
}

impl Source {
    pub fn path(self) -> &'static str {
        match self {
            Source::Health => "/api/health",
            Source::Primary => "/api/momentum-analysis",
            Source::Sample => "/api/test-data",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Source::Health => "health",
            Source::Primary => "live",
            Source::Sample => "sample",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which requests a snapshot load issues, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    pub check_health: bool,
    pub sources: Vec<Source>,
}

impl FetchPlan {
    /// Start-up: health gate, then live data with sample fallback.
    pub fn initial() -> Self {
        Self {
            check_health: true,
            sources: vec![Source::Primary, Source::Sample],
        }
    }

    /// Manual retry: live data only.
    pub fn retry() -> Self {
        Self {
            check_health: false,
            sources: vec![Source::Primary],
        }
    }
}

/// Try each source in order and return the first success together with
/// the source that produced it. When every source fails, the last failure
/// is returned. `None` when `sources` is empty.
pub fn first_success<S, T, E, F>(sources: &[S], mut attempt: F) -> Option<Result<(S, T), E>>
where
    S: Copy + fmt::Debug,
    E: fmt::Display,
    F: FnMut(S) -> Result<T, E>,
{
    let mut last = None;
    for &source in sources {
        match attempt(source) {
            Ok(value) => return Some(Ok((source, value))),
            Err(e) => {
                tracing::warn!(?source, error = %e, "source failed");
                last = Some(Err(e));
            }
        }
    }
    last
}

/// Blocking access to the dashboard API.
pub trait DashboardApi: Send {
    fn health(&self) -> Result<(), ApiError>;

    /// Raw JSON body of a snapshot source; parsing happens in [`load_snapshot`].
    fn snapshot_body(&self, source: Source) -> Result<String, ApiError>;

    fn backtest(&self, request: &BacktestRequest) -> Result<BacktestResult, ApiError>;

    fn process_text(&self, request: &TextRequest) -> Result<TextResponse, ApiError>;
}

impl<A: DashboardApi + ?Sized> DashboardApi for Box<A> {
    fn health(&self) -> Result<(), ApiError> {
        (**self).health()
    }

    fn snapshot_body(&self, source: Source) -> Result<String, ApiError> {
        (**self).snapshot_body(source)
    }

    fn backtest(&self, request: &BacktestRequest) -> Result<BacktestResult, ApiError> {
        (**self).backtest(request)
    }

    fn process_text(&self, request: &TextRequest) -> Result<TextResponse, ApiError> {
        (**self).process_text(request)
    }
}

/// A snapshot together with the source that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotLoad {
    pub snapshot: MomentumSnapshot,
    pub source: Source,
}

impl SnapshotLoad {
    pub fn used_fallback(&self) -> bool {
        self.source != Source::Primary
    }
}

/// Run a fetch plan to completion.
///
/// Only transport and status failures fall through to the next source; a
/// body that arrives but cannot be ingested ends the load.
pub fn load_snapshot<A: DashboardApi + ?Sized>(
    api: &A,
    plan: &FetchPlan,
) -> Result<SnapshotLoad, ApiError> {
    if plan.check_health {
        api.health().map_err(|e| {
            tracing::error!(error = %e, "health check failed");
            e
        })?;
    }

    let (source, body) = first_success(&plan.sources, |source| {
        tracing::debug!(%source, path = source.path(), "fetching snapshot");
        api.snapshot_body(source)
    })
    .unwrap_or_else(|| Err(ApiError::Transport("no snapshot source configured".into())))?;

    if source != Source::Primary {
        tracing::warn!(%source, "live data unavailable, using fallback source");
    }

    let snapshot = ingest::parse_snapshot(&body)?;
    Ok(SnapshotLoad { snapshot, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_success_stops_at_first_ok() {
        let mut calls = Vec::new();
        let out = first_success(&[1, 2, 3], |n| {
            calls.push(n);
            if n >= 2 {
                Ok(n * 10)
            } else {
                Err(format!("source {n} down"))
            }
        });
        assert_eq!(out, Some(Ok((2, 20))));
        assert_eq!(calls, vec![1, 2]);
    }

    #[test]
    fn first_success_returns_last_failure() {
        let out: Option<Result<(u8, ()), String>> =
            first_success(&[1u8, 2], |n| Err(format!("source {n} down")));
        assert_eq!(out, Some(Err("source 2 down".to_string())));
    }

    #[test]
    fn first_success_on_empty_is_none() {
        let out: Option<Result<(u8, ()), String>> = first_success(&[], |_| Ok(()));
        assert!(out.is_none());
    }

    #[test]
    fn plans_have_expected_shape() {
        assert!(FetchPlan::initial().check_health);
        assert_eq!(FetchPlan::initial().sources, vec![Source::Primary, Source::Sample]);
        assert!(!FetchPlan::retry().check_health);
        assert_eq!(FetchPlan::retry().sources, vec![Source::Primary]);
    }

    #[test]
    fn source_paths() {
        assert_eq!(Source::Health.path(), "/api/health");
        assert_eq!(Source::Primary.path(), "/api/momentum-analysis");
        assert_eq!(Source::Sample.path(), "/api/test-data");
    }
}
