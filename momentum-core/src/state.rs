//! View state and its reducer.
//!
//! `reduce` is pure: it never performs I/O. Requests it wants made are
//! returned as [`Effect`]s for the front end to execute, and their outcomes
//! come back in as [`Event`]s.

use crate::domain::{BacktestRequest, BacktestResult, Duration, MomentumSnapshot};
use crate::fetch::FetchPlan;

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisView {
    Loading,
    Failed(String),
    Ready(MomentumSnapshot),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Analysis,
    Backtest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BacktestView {
    Form {
        loading: bool,
        error: Option<String>,
    },
    Results {
        result: BacktestResult,
        active_period: usize,
    },
}

impl Default for BacktestView {
    fn default() -> Self {
        BacktestView::Form {
            loading: false,
            error: None,
        }
    }
}

impl BacktestView {
    pub fn is_loading(&self) -> bool {
        matches!(self, BacktestView::Form { loading: true, .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub analysis: AnalysisView,
    pub active_duration: Duration,
    pub section: Section,
    pub backtest: BacktestView,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            analysis: AnalysisView::Loading,
            active_duration: Duration::default(),
            section: Section::default(),
            backtest: BacktestView::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    SnapshotLoaded(MomentumSnapshot),
    SnapshotFailed(String),
    Retry,
    SelectDuration(Duration),
    NextDuration,
    PrevDuration,
    SelectSection(Section),
    SubmitBacktest(BacktestRequest),
    BacktestLoaded(BacktestResult),
    BacktestFailed(String),
    SelectPeriod(usize),
    NextPeriod,
    PrevPeriod,
    ClearResults,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadSnapshot(FetchPlan),
    RunBacktest(BacktestRequest),
}

impl ViewState {
    /// Fresh state plus the start-up load.
    pub fn start() -> (Self, Vec<Effect>) {
        (Self::default(), vec![Effect::LoadSnapshot(FetchPlan::initial())])
    }

    pub fn snapshot(&self) -> Option<&MomentumSnapshot> {
        match &self.analysis {
            AnalysisView::Ready(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.analysis == AnalysisView::Loading
    }

    /// Apply one event in place, returning the effects it requests.
    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::SnapshotLoaded(snapshot) => {
                let visible = snapshot.visible_durations();
                if !visible.contains(&self.active_duration) {
                    if let Some(first) = visible.first() {
                        self.active_duration = *first;
                    }
                }
                self.analysis = AnalysisView::Ready(snapshot);
            }
            Event::SnapshotFailed(message) => {
                self.analysis = AnalysisView::Failed(message);
            }
            Event::Retry => {
                if !self.is_loading() {
                    self.analysis = AnalysisView::Loading;
                    return vec![Effect::LoadSnapshot(FetchPlan::retry())];
                }
            }
            Event::SelectDuration(duration) => {
                if self.snapshot().is_some_and(|s| s.has_duration(duration)) {
                    self.active_duration = duration;
                }
            }
            Event::NextDuration => self.step_duration(1),
            Event::PrevDuration => self.step_duration(-1),
            Event::SelectSection(section) => self.section = section,
            Event::SubmitBacktest(request) => {
                if !self.backtest.is_loading() {
                    self.backtest = BacktestView::Form {
                        loading: true,
                        error: None,
                    };
                    return vec![Effect::RunBacktest(request)];
                }
            }
            Event::BacktestLoaded(result) => {
                self.backtest = BacktestView::Results {
                    result,
                    active_period: 0,
                };
            }
            Event::BacktestFailed(message) => {
                self.backtest = BacktestView::Form {
                    loading: false,
                    error: Some(message),
                };
            }
            Event::SelectPeriod(index) => self.set_period(|_, len| (index < len).then_some(index)),
            Event::NextPeriod => self.set_period(|cur, len| (cur + 1 < len).then_some(cur + 1)),
            Event::PrevPeriod => self.set_period(|cur, _| cur.checked_sub(1)),
            Event::ClearResults => {
                if matches!(self.backtest, BacktestView::Results { .. }) {
                    self.backtest = BacktestView::default();
                }
            }
        }
        Vec::new()
    }

    fn step_duration(&mut self, delta: isize) {
        let Some(snapshot) = self.snapshot() else {
            return;
        };
        let visible = snapshot.visible_durations();
        if visible.is_empty() {
            return;
        }
        let len = visible.len() as isize;
        let next = match visible.iter().position(|d| *d == self.active_duration) {
            Some(i) => (i as isize + delta).rem_euclid(len) as usize,
            None => 0,
        };
        self.active_duration = visible[next];
    }

    fn set_period(&mut self, pick: impl FnOnce(usize, usize) -> Option<usize>) {
        if let BacktestView::Results {
            result,
            active_period,
        } = &mut self.backtest
        {
            if let Some(i) = pick(*active_period, result.holdings_history.len()) {
                *active_period = i;
            }
        }
    }
}

/// Pure form of [`ViewState::apply`].
pub fn reduce(mut state: ViewState, event: Event) -> (ViewState, Vec<Effect>) {
    let effects = state.apply(event);
    (state, effects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DurationRecord, HoldingsPeriod, Performers, RebalancePeriod};
    use chrono::NaiveDate;

    fn snapshot_with(durations: &[Duration]) -> MomentumSnapshot {
        let mut s = MomentumSnapshot::default();
        for d in durations {
            s.durations.insert(
                *d,
                DurationRecord {
                    top: Performers::Ranked(vec![("A.NS".into(), 1.0)]),
                    bottom: Performers::Empty,
                },
            );
        }
        s
    }

    fn request() -> BacktestRequest {
        BacktestRequest {
            initial_investment: 500_000.0,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            rebalance_period: RebalancePeriod::BiWeekly,
        }
    }

    fn result_with_periods(n: usize) -> BacktestResult {
        BacktestResult {
            holdings_history: (0..n)
                .map(|i| HoldingsPeriod {
                    date: format!("2024-03-{:02}", i + 1),
                    holdings: Vec::new(),
                    cash: 0.0,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn start_is_loading_with_initial_plan() {
        let (state, effects) = ViewState::start();
        assert!(state.is_loading());
        assert_eq!(effects, vec![Effect::LoadSnapshot(FetchPlan::initial())]);
    }

    #[test]
    fn retry_from_every_settled_mode_uses_primary_only() {
        let settled = [
            AnalysisView::Failed("boom".into()),
            AnalysisView::Ready(snapshot_with(&[Duration::FiveDays])),
        ];
        for analysis in settled {
            let state = ViewState {
                analysis,
                ..Default::default()
            };
            let (state, effects) = reduce(state, Event::Retry);
            assert!(state.is_loading());
            assert_eq!(effects, vec![Effect::LoadSnapshot(FetchPlan::retry())]);
        }
    }

    #[test]
    fn retry_while_loading_is_ignored() {
        let (state, effects) = reduce(ViewState::default(), Event::Retry);
        assert!(state.is_loading());
        assert!(effects.is_empty());
    }

    #[test]
    fn hidden_active_duration_moves_to_first_visible() {
        let (state, _) = reduce(
            ViewState::default(),
            Event::SnapshotLoaded(snapshot_with(&[Duration::OneMonth, Duration::OneYear])),
        );
        assert_eq!(state.active_duration, Duration::OneMonth);
    }

    #[test]
    fn selecting_hidden_duration_is_noop() {
        let (state, _) = reduce(
            ViewState::default(),
            Event::SnapshotLoaded(snapshot_with(&[Duration::FiveDays, Duration::OneYear])),
        );
        let (state, _) = reduce(state, Event::SelectDuration(Duration::ThreeMonths));
        assert_eq!(state.active_duration, Duration::FiveDays);
        let (state, _) = reduce(state, Event::SelectDuration(Duration::OneYear));
        assert_eq!(state.active_duration, Duration::OneYear);
    }

    #[test]
    fn next_and_prev_skip_hidden_and_wrap() {
        let (mut state, _) = reduce(
            ViewState::default(),
            Event::SnapshotLoaded(snapshot_with(&[Duration::FiveDays, Duration::ThreeMonths])),
        );
        state.apply(Event::NextDuration);
        assert_eq!(state.active_duration, Duration::ThreeMonths);
        state.apply(Event::NextDuration);
        assert_eq!(state.active_duration, Duration::FiveDays);
        state.apply(Event::PrevDuration);
        assert_eq!(state.active_duration, Duration::ThreeMonths);
    }

    #[test]
    fn submit_is_disabled_while_loading() {
        let (state, effects) = reduce(ViewState::default(), Event::SubmitBacktest(request()));
        assert!(state.backtest.is_loading());
        assert_eq!(effects, vec![Effect::RunBacktest(request())]);

        let (state, effects) = reduce(state, Event::SubmitBacktest(request()));
        assert!(state.backtest.is_loading());
        assert!(effects.is_empty());
    }

    #[test]
    fn backtest_failure_returns_to_form_with_error() {
        let (state, _) = reduce(ViewState::default(), Event::SubmitBacktest(request()));
        let (state, _) = reduce(state, Event::BacktestFailed("Server returned 500: Internal Server Error".into()));
        assert_eq!(
            state.backtest,
            BacktestView::Form {
                loading: false,
                error: Some("Server returned 500: Internal Server Error".into()),
            }
        );
        // The analysis view is untouched by backtest failures.
        assert!(state.is_loading());
    }

    #[test]
    fn period_selection_is_bounded() {
        let (mut state, _) = reduce(ViewState::default(), Event::BacktestLoaded(result_with_periods(3)));
        state.apply(Event::SelectPeriod(2));
        state.apply(Event::NextPeriod);
        state.apply(Event::SelectPeriod(7));
        match &state.backtest {
            BacktestView::Results { active_period, .. } => assert_eq!(*active_period, 2),
            other => panic!("expected results, got {other:?}"),
        }
        state.apply(Event::PrevPeriod);
        state.apply(Event::PrevPeriod);
        state.apply(Event::PrevPeriod);
        match &state.backtest {
            BacktestView::Results { active_period, .. } => assert_eq!(*active_period, 0),
            other => panic!("expected results, got {other:?}"),
        }
    }

    #[test]
    fn clear_returns_to_empty_form() {
        let (state, _) = reduce(ViewState::default(), Event::BacktestLoaded(result_with_periods(1)));
        let (state, _) = reduce(state, Event::ClearResults);
        assert_eq!(state.backtest, BacktestView::default());
    }
}
