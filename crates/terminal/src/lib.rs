//! Terminal front end for `strain`.
//!
//! Owns the event loop and wires together:
//! - the refresh timer (poll sources, advance graphs, log CSV)
//! - crossterm input and resize events
//! - the config file watcher (live theme / smooth-mode reload)

pub mod app;
pub mod input;
pub mod term;

pub use app::App;

use futures::StreamExt;
use crossterm::event::EventStream;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use strain_config::{ConfigWatcher, StrainConfig};
use strain_core::{Message, Result, Snapshot, StrainError};
use strain_system::{build_sources, snapshot_json, update_all, CsvLogger};
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};

/// Gap between the two polls of a one-shot dump.  Usage and power are
/// computed from deltas, so a single poll would report zeros.
const DUMP_SETTLE: Duration = Duration::from_millis(500);

/// Where the running dashboard reads and writes files.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Watched for live reload.
    pub config_path: PathBuf,
    /// Append readings here on every tick.
    pub csv: Option<PathBuf>,
}

// ── Entry points ──────────────────────────────────────────────────────────────

/// Run the interactive dashboard until the user quits.
pub async fn run(config: StrainConfig, options: Options) -> Result<()> {
    let sources = build_sources(&config);
    if sources.is_empty() {
        return Err(StrainError::System("no sensor sources available".into()));
    }

    let csv = options.csv.as_ref().map(|path| CsvLogger::create(path)).transpose()?;
    let mut app = App::new(config, &options.config_path, sources, csv)?;

    let mut terminal = term::enter()?;
    let result = event_loop(&mut terminal, &mut app).await;
    term::leave(&mut terminal)?;

    if let Err(e) = &result {
        error!("Dashboard stopped: {e}");
    }
    result
}

/// Poll every enabled source twice and return `{source: {sensor: value}}`.
pub async fn dump_json(config: &StrainConfig) -> Result<Value> {
    let mut sources = build_sources(config);
    update_all(&mut sources);
    time::sleep(DUMP_SETTLE).await;
    update_all(&mut sources);

    let snapshot = Snapshot::capture(sources.iter().map(|s| s.as_ref()));
    info!("Dumped {} readings", snapshot.sensor_count());
    Ok(snapshot_json(&snapshot))
}

// ── Event loop ────────────────────────────────────────────────────────────────

async fn event_loop(terminal: &mut term::Tui, app: &mut App) -> Result<()> {
    let mut ticker = time::interval(Duration::from_millis(app.refresh_ms()));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut events = EventStream::new();
    let (_watcher, mut reloads) = ConfigWatcher::spawn(app.config_path());

    info!("Refreshing every {} ms", app.refresh_ms());

    loop {
        let message = tokio::select! {
            _ = ticker.tick() => Message::Tick,
            event = events.next() => match event {
                Some(Ok(event)) => match input::translate(&event) {
                    Some(message) => message,
                    None => continue,
                },
                Some(Err(e)) => return Err(StrainError::Terminal(format!("input error: {e}"))),
                None => Message::Quit,
            },
            Some(()) = reloads.recv() => Message::ConfigReloaded,
        };

        if !app.handle(message) {
            return Ok(());
        }
        terminal.draw(|frame| app.draw(frame))?;
    }
}
