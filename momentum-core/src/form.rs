//! Backtest parameter form — local draft state, defaults and constraints.
//!
//! The form never talks to the network: [`BacktestForm::submit`] only yields a
//! normalized [`BacktestRequest`] for the caller to dispatch.

use chrono::{Days, Months, NaiveDate};
use thiserror::Error;

use crate::config::BacktestDefaults;
use crate::domain::{BacktestRequest, RebalancePeriod};

pub const MIN_INVESTMENT: f64 = 10_000.0;
pub const MAX_INVESTMENT: f64 = 10_000_000.0;
pub const INVESTMENT_STEP: f64 = 10_000.0;
pub const DEFAULT_INVESTMENT: f64 = 500_000.0;

/// Default look-back of the simulation window, in calendar months.
const DEFAULT_WINDOW_MONTHS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("initial investment must be between {min:.0} and {max:.0}")]
    AmountOutOfRange { min: f64, max: f64 },

    #[error("initial investment must be a multiple of {step:.0} above the minimum")]
    AmountOffStep { step: f64 },

    #[error("{0} is required")]
    MissingDate(&'static str),

    #[error("start date {start} is after end date {end}")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
}

/// Which form field has focus in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Investment,
    RebalancePeriod,
    StartDate,
    EndDate,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Investment,
        FormField::RebalancePeriod,
        FormField::StartDate,
        FormField::EndDate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Investment => "Initial Investment (₹)",
            FormField::RebalancePeriod => "Rebalance Period",
            FormField::StartDate => "Start Date",
            FormField::EndDate => "End Date",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestForm {
    pub initial_investment: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub rebalance_period: RebalancePeriod,
}

/// Range and step rules for the initial investment.
pub fn check_investment(amount: f64) -> Result<(), FormError> {
    if !(MIN_INVESTMENT..=MAX_INVESTMENT).contains(&amount) {
        return Err(FormError::AmountOutOfRange {
            min: MIN_INVESTMENT,
            max: MAX_INVESTMENT,
        });
    }
    let steps = (amount - MIN_INVESTMENT) / INVESTMENT_STEP;
    if (steps - steps.round()).abs() > 1e-9 {
        return Err(FormError::AmountOffStep {
            step: INVESTMENT_STEP,
        });
    }
    Ok(())
}

/// `today` minus three calendar months, clamped to the end of shorter months.
pub fn default_start_date(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_months(Months::new(DEFAULT_WINDOW_MONTHS))
        .unwrap_or(today)
}

impl BacktestForm {
    /// Fresh draft as of `today`: last three months, 5 lakh, bi-weekly.
    pub fn new(today: NaiveDate) -> Self {
        Self::with_defaults(today, &BacktestDefaults::default())
    }

    pub fn with_defaults(today: NaiveDate, defaults: &BacktestDefaults) -> Self {
        Self {
            initial_investment: defaults.initial_investment,
            start_date: Some(default_start_date(today)),
            end_date: Some(today),
            rebalance_period: defaults.rebalance_period,
        }
    }

    /// Move the amount by `steps` input steps, clamped to the allowed range.
    pub fn step_investment(&mut self, steps: i64) {
        let next = self.initial_investment + INVESTMENT_STEP * steps as f64;
        self.initial_investment = next.clamp(MIN_INVESTMENT, MAX_INVESTMENT);
    }

    /// Adjust the focused field by one unit (`direction` is ±1); `coarse`
    /// moves amounts by ten steps and dates by a month.
    pub fn adjust(&mut self, field: FormField, direction: i64, coarse: bool) {
        match field {
            FormField::Investment => {
                self.step_investment(if coarse { direction * 10 } else { direction })
            }
            FormField::RebalancePeriod => {
                self.rebalance_period = if direction >= 0 {
                    self.rebalance_period.next()
                } else {
                    self.rebalance_period.prev()
                };
            }
            FormField::StartDate => {
                self.start_date = self.start_date.map(|d| shift_date(d, direction, coarse))
            }
            FormField::EndDate => {
                self.end_date = self.end_date.map(|d| shift_date(d, direction, coarse))
            }
        }
    }

    /// Display string for a field.
    pub fn value_of(&self, field: FormField) -> String {
        let date = |d: Option<NaiveDate>| {
            d.map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "n/a".to_string())
        };
        match field {
            FormField::Investment => format!("{:.0}", self.initial_investment),
            FormField::RebalancePeriod => self.rebalance_period.label().to_string(),
            FormField::StartDate => date(self.start_date),
            FormField::EndDate => date(self.end_date),
        }
    }

    /// Check constraints and produce the normalized request.
    pub fn submit(&self) -> Result<BacktestRequest, FormError> {
        let amount = self.initial_investment;
        check_investment(amount)?;

        let start = self.start_date.ok_or(FormError::MissingDate("start date"))?;
        let end = self.end_date.ok_or(FormError::MissingDate("end date"))?;
        if start > end {
            return Err(FormError::StartAfterEnd { start, end });
        }

        Ok(BacktestRequest {
            initial_investment: amount,
            start_date: start,
            end_date: end,
            rebalance_period: self.rebalance_period,
        })
    }
}

fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    let moved = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    moved.unwrap_or(date)
}

fn shift_date(date: NaiveDate, direction: i64, coarse: bool) -> NaiveDate {
    if !coarse {
        return shift_days(date, direction);
    }
    let moved = if direction >= 0 {
        date.checked_add_months(Months::new(1))
    } else {
        date.checked_sub_months(Months::new(1))
    };
    moved.unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_window_is_three_calendar_months() {
        let form = BacktestForm::new(ymd(2024, 6, 15));
        assert_eq!(form.start_date, Some(ymd(2024, 3, 15)));
        assert_eq!(form.end_date, Some(ymd(2024, 6, 15)));
        assert_eq!(form.initial_investment, DEFAULT_INVESTMENT);
        assert_eq!(form.rebalance_period, RebalancePeriod::BiWeekly);
    }

    #[test]
    fn default_start_clamps_short_months() {
        assert_eq!(default_start_date(ymd(2024, 5, 31)), ymd(2024, 2, 29));
        assert_eq!(default_start_date(ymd(2024, 1, 10)), ymd(2023, 10, 10));
    }

    #[test]
    fn investment_steps_are_clamped() {
        let mut form = BacktestForm::new(ymd(2024, 6, 15));
        form.initial_investment = MIN_INVESTMENT;
        form.step_investment(-1);
        assert_eq!(form.initial_investment, MIN_INVESTMENT);
        form.initial_investment = MAX_INVESTMENT;
        form.step_investment(5);
        assert_eq!(form.initial_investment, MAX_INVESTMENT);
        form.adjust(FormField::Investment, -1, true);
        assert_eq!(form.initial_investment, MAX_INVESTMENT - 100_000.0);
    }

    #[test]
    fn submit_normalizes_request() {
        let form = BacktestForm::new(ymd(2024, 6, 15));
        let req = form.submit().unwrap();
        assert_eq!(req.initial_investment, 500_000.0);
        assert_eq!(req.start_date, ymd(2024, 3, 15));
        assert_eq!(req.rebalance_period.days(), 14);
    }

    #[test]
    fn submit_rejects_constraint_violations() {
        let mut form = BacktestForm::new(ymd(2024, 6, 15));
        form.initial_investment = 5_000.0;
        assert!(matches!(form.submit(), Err(FormError::AmountOutOfRange { .. })));

        form.initial_investment = 15_000.0;
        assert!(matches!(form.submit(), Err(FormError::AmountOffStep { .. })));

        form.initial_investment = 20_000.0;
        form.start_date = None;
        assert_eq!(form.submit(), Err(FormError::MissingDate("start date")));

        form.start_date = Some(ymd(2024, 7, 1));
        assert!(matches!(form.submit(), Err(FormError::StartAfterEnd { .. })));
    }

    #[test]
    fn adjust_dates_and_period() {
        let mut form = BacktestForm::new(ymd(2024, 6, 15));
        form.adjust(FormField::StartDate, -1, false);
        assert_eq!(form.start_date, Some(ymd(2024, 3, 14)));
        form.adjust(FormField::EndDate, 1, true);
        assert_eq!(form.end_date, Some(ymd(2024, 7, 15)));
        form.adjust(FormField::RebalancePeriod, 1, false);
        assert_eq!(form.rebalance_period, RebalancePeriod::Monthly);
        assert_eq!(form.value_of(FormField::StartDate), "2024-03-14");

        form.end_date = None;
        assert_eq!(form.value_of(FormField::EndDate), "n/a");
    }
}
