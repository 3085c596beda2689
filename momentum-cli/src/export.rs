//! CSV export of backtest results.

use std::path::Path;

use anyhow::{Context, Result};

use momentum_core::domain::BacktestResult;
use momentum_core::format::parse_api_date;
use momentum_core::view::value_changes;

/// Portfolio value series as CSV: `date,value,change_pct`.
///
/// Dates are normalized to `YYYY-MM-DD` when they parse; otherwise the API
/// string is written unchanged.
pub fn export_value_history_csv(result: &BacktestResult) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["date", "value", "change_pct"])?;
    for (point, change) in result.portfolio_values.iter().zip(value_changes(result)) {
        let date = parse_api_date(&point.date)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| point.date.clone());
        wtr.write_record([
            date,
            format!("{:.2}", point.value),
            format!("{:.4}", change),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Holdings of every period as CSV: `period,date,symbol,shares,price,value,percentage`.
pub fn export_holdings_csv(result: &BacktestResult) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["period", "date", "symbol", "shares", "price", "value", "percentage"])?;
    for (i, period) in result.holdings_history.iter().enumerate() {
        for h in &period.holdings {
            wtr.write_record([
                (i + 1).to_string(),
                period.date.clone(),
                h.symbol.clone(),
                format!("{}", h.shares),
                format!("{:.2}", h.price),
                format!("{:.2}", h.value),
                format!("{:.2}", h.percentage),
            ])?;
        }
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Write the value history to `path` and the holdings next to it as
/// `<stem>_holdings.csv`. Returns the holdings path.
pub fn save_csv(result: &BacktestResult, path: &Path) -> Result<std::path::PathBuf> {
    let values = export_value_history_csv(result)?;
    std::fs::write(path, values)
        .with_context(|| format!("failed to write {}", path.display()))?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "backtest".to_string());
    let holdings_path = path.with_file_name(format!("{stem}_holdings.csv"));
    let holdings = export_holdings_csv(result)?;
    std::fs::write(&holdings_path, holdings)
        .with_context(|| format!("failed to write {}", holdings_path.display()))?;
    Ok(holdings_path)
}
