//! Display formatting — percentages, rupee amounts, API dates, symbols.
//!
//! All functions are pure and locale-fixed (Indian grouping, `en-IN` short
//! dates) so the TUI and CLI print identical strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Signed percentage with two decimals: `+1.50%`, `+0.00%`, `-3.46%`.
pub fn format_percentage(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    // Normalise -0.0 so it does not print as "+-0.00%".
    let value = if value == 0.0 { 0.0 } else { value };
    if value >= 0.0 {
        format!("+{value:.2}%")
    } else {
        format!("{value:.2}%")
    }
}

/// Unsigned share-of-portfolio percentage: `9.60%`.
pub fn format_share_pct(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    format!("{value:.2}%")
}

/// Rupee amount with Indian digit grouping: `₹5,00,000.00`, `-₹1,234.50`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let grouped = group_indian(int_part);
    // Values that round to zero never get a minus sign.
    let negative = value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    format!("{}₹{grouped}.{frac_part}", if negative { "-" } else { "" })
}

/// `1234567` → `12,34,567`: last three digits, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

/// Fractional share counts, two decimals.
pub fn format_shares(value: f64) -> String {
    format!("{value:.2}")
}

/// Parse the date representations the API is known to emit: ISO dates,
/// ISO date-times, and HTTP dates (`Fri, 15 Mar 2024 00:00:00 GMT`).
pub fn parse_api_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.date_naive());
    }
    None
}

/// `2024-03-15` → `15 Mar 2024`. Unparseable input is shown unchanged.
pub fn format_date(raw: &str) -> String {
    match parse_api_date(raw) {
        Some(d) => format_naive_date(d),
        None => raw.to_string(),
    }
}

pub fn format_naive_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// Strip the market suffix for display only (`TCS.NS` → `TCS`).
pub fn display_symbol<'a>(symbol: &'a str, suffix: &str) -> &'a str {
    if suffix.is_empty() {
        return symbol;
    }
    symbol.strip_suffix(suffix).unwrap_or(symbol)
}
