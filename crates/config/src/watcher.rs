use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Quiet period after the last write before a reload is signalled.
const SETTLE: Duration = Duration::from_millis(250);

/// Watches the config file and signals once per burst of changes.
///
/// The parent directory is watched rather than the file itself: editors that
/// save by writing a temp file and renaming it over the original would
/// otherwise detach the watch after the first save.
///
/// # Example
/// ```no_run
/// # async fn demo() {
/// let (_watcher, mut rx) = strain_config::ConfigWatcher::spawn("/home/user/.config/strain/strain.toml");
/// while rx.recv().await.is_some() {
///     println!("config changed, reloading");
/// }
/// # }
/// ```
pub struct ConfigWatcher {
    path: PathBuf,
}

impl ConfigWatcher {
    /// Spawn a filesystem watcher for `path`.
    /// Returns the watcher handle and a receiver that fires after each settled change.
    pub fn spawn(path: impl AsRef<Path>) -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        let path = path.as_ref().to_path_buf();

        tokio::spawn(watch_loop(path.clone(), tx));

        (Self { path }, rx)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn watch_loop(path: PathBuf, tx: mpsc::Sender<()>) {
    let Some(dir) = path.parent().map(Path::to_path_buf) else {
        warn!("Config path '{}' has no parent; not watching", path.display());
        return;
    };
    if !dir.is_dir() {
        info!("Config directory '{}' missing; live reload disabled", dir.display());
        return;
    }

    let (event_tx, mut event_rx) = mpsc::channel::<notify::Result<Event>>(16);

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = event_tx.blocking_send(res);
        },
        Config::default().with_poll_interval(Duration::from_secs(2)),
    ) {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to create filesystem watcher: {e}");
            return;
        }
    };

    if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
        error!("Failed to watch '{}': {e}", dir.display());
        return;
    }

    info!("Watching config file: {}", path.display());

    while let Some(event) = event_rx.recv().await {
        match event {
            Ok(e) if touches(&e, &path) => {
                // Swallow the rest of the burst (truncate + write + close...).
                while let Ok(Some(_)) = tokio::time::timeout(SETTLE, event_rx.recv()).await {}
                debug!("Config change settled");
                if tx.send(()).await.is_err() {
                    break; // receiver dropped
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Watcher error: {e}"),
        }
    }
}

/// Whether `event` creates or modifies the file at `path`.
fn touches(event: &Event, path: &Path) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
        && event.paths.iter().any(|p| p.file_name() == path.file_name())
}
