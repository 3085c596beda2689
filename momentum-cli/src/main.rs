//! Momentum CLI — scriptable access to the momentum dashboard API.
//!
//! Commands:
//! - `health` — check the API is up
//! - `snapshot` — momentum rankings per duration and the top-10 comparison
//! - `backtest` — run a momentum portfolio simulation, optionally exporting CSV
//! - `process` — run a text operation on the server

mod export;
mod report;

use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use momentum_core::domain::{Duration, RebalancePeriod, TextOperation, TextRequest};
use momentum_core::fetch::load_snapshot;
use momentum_core::form::BacktestForm;
use momentum_core::{DashboardApi, DashboardConfig, FetchPlan, HttpClient};

#[derive(Parser)]
#[command(
    name = "momentum",
    about = "Momentum CLI — stock momentum rankings and backtests from the dashboard API",
    version
)]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API base URL, overriding config and environment
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the API answers its health endpoint.
    Health,
    /// Fetch momentum rankings (falls back to sample data when live data fails).
    Snapshot {
        /// Only this duration: 5d, 10d, 1mo, 3mo, 6mo or 1y.
        #[arg(long, value_parser = parse_duration)]
        duration: Option<Duration>,

        /// Print JSON instead of tables.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Run a momentum portfolio backtest.
    Backtest {
        /// Initial investment in rupees. Defaults to the configured amount.
        #[arg(long)]
        amount: Option<f64>,

        /// Start date (YYYY-MM-DD). Defaults to three months ago.
        #[arg(long)]
        start: Option<NaiveDate>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Rebalance period in days: 7, 14 or 30.
        #[arg(long)]
        rebalance: Option<u32>,

        /// Write the value history to this CSV file (holdings go next to it).
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Run a text operation on the server.
    Process {
        /// uppercase, lowercase, reverse or wordcount.
        #[arg(long)]
        op: TextOperation,

        /// Text to process.
        #[arg(default_value = "")]
        text: String,
    },
}

fn parse_duration(s: &str) -> Result<Duration, String> {
    Duration::from_label(s)
        .ok_or_else(|| format!("unknown duration '{s}'. Valid: 5d, 10d, 1mo, 3mo, 6mo, 1y"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.base_url {
        config.set_base_url(url)?;
    }
    let client = HttpClient::new(&config)?;

    match cli.command {
        Commands::Health => run_health(&client),
        Commands::Snapshot { duration, json } => run_snapshot(&client, &config, duration, json),
        Commands::Backtest {
            amount,
            start,
            end,
            rebalance,
            csv,
        } => run_backtest(&client, &config, amount, start, end, rebalance, csv),
        Commands::Process { op, text } => run_process(&client, op, text),
    }
}

fn run_health(client: &HttpClient) -> Result<()> {
    client.health()?;
    println!("ok");
    Ok(())
}

fn run_snapshot(
    client: &HttpClient,
    config: &DashboardConfig,
    duration: Option<Duration>,
    json: bool,
) -> Result<()> {
    let load = load_snapshot(client, &FetchPlan::initial())?;
    if load.used_fallback() {
        eprintln!("Live data unavailable; showing {} data.", load.source);
    }

    if json {
        let value = report::snapshot_json(&load.snapshot, duration);
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", report::snapshot_report(&load.snapshot, duration, &config.market_suffix));
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_backtest(
    client: &HttpClient,
    config: &DashboardConfig,
    amount: Option<f64>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    rebalance: Option<u32>,
    csv: Option<PathBuf>,
) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let mut form = BacktestForm::with_defaults(today, &config.backtest);
    if let Some(amount) = amount {
        form.initial_investment = amount;
    }
    if start.is_some() {
        form.start_date = start;
    }
    if end.is_some() {
        form.end_date = end;
    }
    if let Some(days) = rebalance {
        let Some(period) = RebalancePeriod::from_days(days) else {
            bail!("unsupported rebalance period {days}. Valid: 7, 14, 30");
        };
        form.rebalance_period = period;
    }

    let request = form.submit()?;
    tracing::info!(
        start = %request.start_date,
        end = %request.end_date,
        days = request.rebalance_period.days(),
        "running backtest"
    );
    let result = client.backtest(&request)?;

    println!("{}", report::backtest_report(&result, &config.market_suffix));

    if let Some(path) = csv {
        let holdings_path = export::save_csv(&result, &path)?;
        println!();
        println!("Value history saved to: {}", path.display());
        println!("Holdings saved to: {}", holdings_path.display());
    }
    Ok(())
}

fn run_process(client: &HttpClient, operation: TextOperation, text: String) -> Result<()> {
    let resp = client.process_text(&TextRequest { text, operation })?;
    println!("{}", report::text_report(&resp));
    Ok(())
}
