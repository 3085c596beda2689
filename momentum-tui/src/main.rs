//! Momentum dashboard — terminal interface with vim-style navigation.
//!
//! Panels:
//! 1. Momentum — duration tabs, top/bottom performers, top-10 comparison
//! 2. Backtest — parameter form, then results
//! 3. Text — server-side text processing
//! 4. Help — keyboard shortcuts

use std::fs::{self, File};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use momentum_core::config::APP_DIR;
use momentum_core::{DashboardConfig, HttpClient};
use momentum_tui::app::AppState;
use momentum_tui::worker::{self, WorkerCommand};
use momentum_tui::{input, ui};

const LOG_FILE: &str = "momentum-tui.log";
const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "momentum-tui", about = "Terminal dashboard for stock momentum rankings", version)]
struct Args {
    /// Config file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// API base URL, overriding config and environment
    #[arg(long)]
    base_url: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // The terminal owns stdout, so logs go to a file.
    init_logging();

    let mut config = DashboardConfig::load(args.config.as_deref())?;
    if let Some(url) = args.base_url {
        config.set_base_url(url)?;
    }
    tracing::info!(base_url = %config.base_url, "starting dashboard");

    let client = HttpClient::new(&config).context("failed to create HTTP client")?;

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();

    let worker_handle = worker::spawn_worker(Box::new(client), cmd_rx, resp_tx)
        .context("failed to spawn worker thread")?;

    let today = chrono::Local::now().date_naive();
    let mut app = AppState::new(&config, today, cmd_tx.clone(), resp_rx);
    app.start();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Shutdown worker. An idle worker exits right away; one blocked on a
    // request is left to die with the process.
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let deadline = Instant::now() + SHUTDOWN_GRACE;
    while !worker_handle.is_finished() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(10));
    }
    if worker_handle.is_finished() {
        let _ = worker_handle.join();
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.handle_response(resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

/// Log to `<cache dir>/momentum-dash/momentum-tui.log`; logging is skipped
/// when the file cannot be created.
fn init_logging() {
    let Some(dir) = dirs::cache_dir().map(|d| d.join(APP_DIR)) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = File::create(dir.join(LOG_FILE)) else {
        return;
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
}
