//! Fetch-sequence scenarios against a scripted API.
//!
//! Each scenario scripts what the health, live and sample endpoints return,
//! runs a plan through `load_snapshot`, and checks both the outcome and the
//! exact requests that were issued.

use std::cell::RefCell;
use std::collections::HashMap;

use momentum_core::domain::{
    BacktestRequest, BacktestResult, Duration, Performers, TextRequest, TextResponse,
};
use momentum_core::fetch::load_snapshot;
use momentum_core::state::{reduce, AnalysisView, Effect, Event, ViewState};
use momentum_core::{ApiError, DashboardApi, FetchPlan, IngestError, Source};

const LIVE_BODY: &str = r#"{
    "5d": {"top_performers": {"TCS.NS": 4.2, "INFY.NS": 3.1},
           "bottom_performers": {"WIPRO.NS": -2.5}},
    "comparison": {"dropped_from_top_10": ["HCLTECH.NS"], "entered_top_10": [],
                   "full_5d_top_10": ["TCS.NS"], "full_3mo_top_10": ["HCLTECH.NS"]}
}"#;

const SAMPLE_BODY: &str = r#"{
    "3mo": {"top_performers": {"SAMPLE.NS": 1.0}, "bottom_performers": {}}
}"#;

fn server_error() -> ApiError {
    ApiError::Status {
        code: 500,
        reason: "Internal Server Error".into(),
    }
}

#[derive(Default)]
struct ScriptedApi {
    responses: HashMap<Source, Result<String, ApiError>>,
    calls: RefCell<Vec<Source>>,
}

impl ScriptedApi {
    fn with(mut self, source: Source, response: Result<&str, ApiError>) -> Self {
        self.responses.insert(source, response.map(str::to_string));
        self
    }

    fn calls(&self) -> Vec<Source> {
        self.calls.borrow().clone()
    }

    fn respond(&self, source: Source) -> Result<String, ApiError> {
        self.calls.borrow_mut().push(source);
        self.responses
            .get(&source)
            .cloned()
            .unwrap_or_else(|| Err(ApiError::Transport(format!("unscripted {source}"))))
    }
}

impl DashboardApi for ScriptedApi {
    fn health(&self) -> Result<(), ApiError> {
        self.respond(Source::Health).map(|_| ())
    }

    fn snapshot_body(&self, source: Source) -> Result<String, ApiError> {
        self.respond(source)
    }

    fn backtest(&self, _request: &BacktestRequest) -> Result<BacktestResult, ApiError> {
        unimplemented!("not used by fetch scenarios")
    }

    fn process_text(&self, _request: &TextRequest) -> Result<TextResponse, ApiError> {
        unimplemented!("not used by fetch scenarios")
    }
}

/// Drive the reducer the way a front end would: execute each effect
/// against the API and feed the outcome back as an event.
fn run(api: &ScriptedApi, state: ViewState, effects: Vec<Effect>) -> ViewState {
    let mut state = state;
    for effect in effects {
        let event = match effect {
            Effect::LoadSnapshot(plan) => match load_snapshot(api, &plan) {
                Ok(load) => Event::SnapshotLoaded(load.snapshot),
                Err(e) => Event::SnapshotFailed(e.to_string()),
            },
            Effect::RunBacktest(_) => unreachable!(),
        };
        let (next, more) = reduce(state, event);
        state = run(api, next, more);
    }
    state
}

#[test]
fn health_network_failure_stops_everything() {
    let api = ScriptedApi::default().with(
        Source::Health,
        Err(ApiError::Transport("connection refused".into())),
    );
    let (state, effects) = ViewState::start();
    let state = run(&api, state, effects);

    assert_eq!(state.analysis, AnalysisView::Failed("connection refused".into()));
    assert_eq!(api.calls(), vec![Source::Health]);
}

#[test]
fn live_500_falls_back_to_sample_silently() {
    let api = ScriptedApi::default()
        .with(Source::Health, Ok(r#"{"status": "ok"}"#))
        .with(Source::Primary, Err(server_error()))
        .with(Source::Sample, Ok(SAMPLE_BODY));

    let load = load_snapshot(&api, &FetchPlan::initial()).unwrap();
    assert!(load.used_fallback());
    assert!(!load.snapshot.is_partial());
    assert_eq!(load.snapshot.visible_durations(), vec![Duration::ThreeMonths]);
    assert_eq!(
        api.calls(),
        vec![Source::Health, Source::Primary, Source::Sample]
    );
}

#[test]
fn live_connection_refused_falls_back_to_sample() {
    let api = ScriptedApi::default()
        .with(Source::Health, Ok(r#"{"status": "ok"}"#))
        .with(
            Source::Primary,
            Err(ApiError::Transport("error sending request: connection refused".into())),
        )
        .with(Source::Sample, Ok(SAMPLE_BODY));

    let (state, effects) = ViewState::start();
    let state = run(&api, state, effects);

    let snapshot = state.snapshot().expect("sample data is shown");
    assert_eq!(snapshot.visible_durations(), vec![Duration::ThreeMonths]);
    assert_eq!(state.active_duration, Duration::ThreeMonths);
    assert_eq!(
        api.calls(),
        vec![Source::Health, Source::Primary, Source::Sample]
    );
}

#[test]
fn live_success_never_touches_sample() {
    let api = ScriptedApi::default()
        .with(Source::Health, Ok("{}"))
        .with(Source::Primary, Ok(LIVE_BODY));

    let (state, effects) = ViewState::start();
    let state = run(&api, state, effects);

    let snapshot = state.snapshot().expect("ready");
    assert!(snapshot.record(Duration::FiveDays).unwrap().top.is_ranked());
    assert_eq!(api.calls(), vec![Source::Health, Source::Primary]);
}

#[test]
fn both_sources_failing_reports_last_failure() {
    let api = ScriptedApi::default()
        .with(Source::Health, Ok("{}"))
        .with(Source::Primary, Err(server_error()))
        .with(
            Source::Sample,
            Err(ApiError::Status {
                code: 404,
                reason: "Not Found".into(),
            }),
        );

    let (state, effects) = ViewState::start();
    let state = run(&api, state, effects);
    assert_eq!(
        state.analysis,
        AnalysisView::Failed("Server returned 404: Not Found".into())
    );
}

#[test]
fn null_body_is_not_retried_against_sample() {
    let api = ScriptedApi::default()
        .with(Source::Health, Ok("{}"))
        .with(Source::Primary, Ok("null"))
        .with(Source::Sample, Ok(SAMPLE_BODY));

    let err = load_snapshot(&api, &FetchPlan::initial()).unwrap_err();
    assert_eq!(err, ApiError::Ingest(IngestError::EmptyPayload));
    assert_eq!(
        err.to_string(),
        "Could not retrieve momentum data. Please try again later."
    );
    assert_eq!(api.calls(), vec![Source::Health, Source::Primary]);
}

#[test]
fn partial_payload_renders_then_retry_hits_live_only() {
    let partial = r#"{"error": "1y window timed out",
                      "5d": {"top_performers": {"TCS.NS": 4.2}, "bottom_performers": {}}}"#;
    let api = ScriptedApi::default()
        .with(Source::Health, Ok("{}"))
        .with(Source::Primary, Ok(partial));

    let (state, effects) = ViewState::start();
    let state = run(&api, state, effects);
    let snapshot = state.snapshot().expect("partial payload still renders");
    assert_eq!(snapshot.partial_error.as_deref(), Some("1y window timed out"));
    assert_eq!(
        snapshot.record(Duration::OneYear).unwrap().top,
        Performers::Unavailable
    );

    let (state, effects) = reduce(state, Event::Retry);
    assert_eq!(effects, vec![Effect::LoadSnapshot(FetchPlan::retry())]);
    let _ = run(&api, state, effects);
    assert_eq!(
        api.calls(),
        vec![Source::Health, Source::Primary, Source::Primary]
    );
}

#[test]
fn retry_failure_does_not_fall_back() {
    let api = ScriptedApi::default()
        .with(Source::Primary, Err(server_error()))
        .with(Source::Sample, Ok(SAMPLE_BODY));

    let state = ViewState {
        analysis: AnalysisView::Failed("earlier".into()),
        ..Default::default()
    };
    let (state, effects) = reduce(state, Event::Retry);
    let state = run(&api, state, effects);
    assert_eq!(
        state.analysis,
        AnalysisView::Failed("Server returned 500: Internal Server Error".into())
    );
    assert_eq!(api.calls(), vec![Source::Primary]);
}

#[test]
fn retry_timeout_surfaces_raw_message_without_fallback() {
    let api = ScriptedApi::default()
        .with(
            Source::Primary,
            Err(ApiError::Transport("operation timed out".into())),
        )
        .with(Source::Sample, Ok(SAMPLE_BODY));

    let state = ViewState {
        analysis: AnalysisView::Failed("earlier".into()),
        ..Default::default()
    };
    let (state, effects) = reduce(state, Event::Retry);
    assert_eq!(state.analysis, AnalysisView::Loading);
    let state = run(&api, state, effects);
    assert_eq!(
        state.analysis,
        AnalysisView::Failed("operation timed out".into())
    );
    assert_eq!(api.calls(), vec![Source::Primary]);
}
