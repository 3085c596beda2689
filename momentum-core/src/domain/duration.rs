//! Momentum look-back windows.

use serde::{Deserialize, Serialize};

/// A momentum look-back window. Ordering of `ALL` is the display order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Duration {
    #[default]
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "10d")]
    TenDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
}

impl Duration {
    pub const ALL: [Duration; 6] = [
        Duration::FiveDays,
        Duration::TenDays,
        Duration::OneMonth,
        Duration::ThreeMonths,
        Duration::SixMonths,
        Duration::OneYear,
    ];

    /// Payload key and tab label.
    pub fn label(self) -> &'static str {
        match self {
            Duration::FiveDays => "5d",
            Duration::TenDays => "10d",
            Duration::OneMonth => "1mo",
            Duration::ThreeMonths => "3mo",
            Duration::SixMonths => "6mo",
            Duration::OneYear => "1y",
        }
    }

    /// Human-readable tab title.
    pub fn title(self) -> &'static str {
        match self {
            Duration::FiveDays => "5 Days",
            Duration::TenDays => "10 Days",
            Duration::OneMonth => "1 Month",
            Duration::ThreeMonths => "3 Months",
            Duration::SixMonths => "6 Months",
            Duration::OneYear => "1 Year",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Duration::FiveDays => 0,
            Duration::TenDays => 1,
            Duration::OneMonth => 2,
            Duration::ThreeMonths => 3,
            Duration::SixMonths => 4,
            Duration::OneYear => 5,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.label() == label)
    }
}

impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
