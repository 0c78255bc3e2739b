//! Hot reload of the route configuration.
//!
//! # Design Decisions
//! - Watch the parent directory, not the file: editors that save through a
//!   temp file and rename replace the inode a file watch is bound to
//! - Events are filtered by file name and coalesced over a short window, so
//!   one save produces one reload
//! - Only configs that parse and validate are forwarded

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::FrontierConfig;

/// Quiet period after the last event before the file is reloaded.
pub const RELOAD_DEBOUNCE: Duration = Duration::from_millis(250);

/// Sends a freshly loaded configuration whenever the file changes on disk.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<FrontierConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and the receiving end for validated configs.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<FrontierConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching. Must be called inside a tokio runtime; the returned
    /// watcher must be kept alive for reloads to keep flowing.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Some(file_name) = self.path.file_name().map(OsStr::to_os_string) else {
            return Err(notify::Error::path_not_found().add_path(self.path));
        };
        let directory = watch_directory(&self.path);

        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if touches_config(&event, &file_name) => {
                    let _ = signal_tx.send(());
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "Config watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;
        watcher.watch(&directory, RecursiveMode::NonRecursive)?;

        tokio::spawn(reload_loop(self.path.clone(), signal_rx, self.update_tx));

        tracing::info!(
            path = %self.path.display(),
            directory = %directory.display(),
            "Config watcher started"
        );
        Ok(watcher)
    }
}

/// Directory holding `path`; `.` for a bare file name.
fn watch_directory(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// True when `event` may have changed the file called `file_name`.
fn touches_config(event: &Event, file_name: &OsString) -> bool {
    let relevant_kind = matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_));
    relevant_kind
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name.as_os_str()))
}

/// Wait for the next burst of signals and swallow the rest of it.
///
/// Returns false once every sender is gone.
async fn next_burst(signals: &mut mpsc::UnboundedReceiver<()>, quiet: Duration) -> bool {
    if signals.recv().await.is_none() {
        return false;
    }
    loop {
        match tokio::time::timeout(quiet, signals.recv()).await {
            Ok(Some(())) => continue,
            Ok(None) | Err(_) => return true,
        }
    }
}

async fn reload_loop(
    path: PathBuf,
    mut signals: mpsc::UnboundedReceiver<()>,
    update_tx: mpsc::UnboundedSender<FrontierConfig>,
) {
    while next_burst(&mut signals, RELOAD_DEBOUNCE).await {
        tracing::info!(path = %path.display(), "Config file changed, reloading");
        match load_config(&path) {
            Ok(config) => {
                if update_tx.send(config).is_err() {
                    break;
                }
            }
            Err(e) => tracing::error!(error = %e, "Reload rejected, keeping current routes"),
        }
    }
    tracing::debug!("Config reload loop stopped");
}
