//! Periodic PNG backup of the active canvas.
//!
//! A tokio task counts down once per tick. When the countdown reaches zero,
//! or when "save now" is requested, it asks the UI thread for the active
//! tab's snapshot, then encodes and writes it off the UI thread. A UI
//! thread that does not answer in time costs one skipped cycle.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use paintkit_canvas::encode_png;
use paintkit_canvas::Snapshot;
use paintkit_core::{AppEvent, AutosaveEvent, EventBus, UiError};
use paintkit_settings::AutosaveSettings;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::dispatcher::UiDispatcher;
use crate::error::AutosaveError;
use crate::workbench::Workbench;

#[derive(Debug, Clone)]
pub struct AutosaveConfig {
    /// Ticks between saves.
    pub interval_ticks: u64,
    /// Length of one countdown step; one second outside tests.
    pub tick: Duration,
    pub path: PathBuf,
    /// Publish [`AutosaveEvent::Saved`] after each write.
    pub notifications: bool,
    /// Log the countdown text at each tick.
    pub show_countdown: bool,
    /// How long to wait for the UI thread.
    pub snapshot_timeout: Duration,
}

impl AutosaveConfig {
    pub fn from_settings(settings: &AutosaveSettings, snapshot_timeout: Duration) -> Self {
        Self {
            interval_ticks: settings.interval_secs.max(1),
            tick: Duration::from_secs(1),
            path: settings.path.clone(),
            notifications: settings.notifications,
            show_countdown: settings.show_countdown,
            snapshot_timeout,
        }
    }
}

/// "Autosave in: N seconds"
pub fn countdown_text(remaining: u64) -> String {
    format!("Autosave in: {} seconds", remaining)
}

/// Handle to the running autosave task. Dropping it stops the task.
pub struct AutosaveHandle {
    save_now: Arc<Notify>,
    remaining: Arc<AtomicU64>,
    task: JoinHandle<()>,
}

impl AutosaveHandle {
    /// Save on the next turn of the task and restart the countdown.
    pub fn save_now(&self) {
        self.save_now.notify_one();
    }

    /// Ticks left until the next scheduled save.
    pub fn remaining(&self) -> u64 {
        self.remaining.load(Ordering::Relaxed)
    }

    /// A cloneable trigger for "save now" that outlives borrows of the handle.
    pub fn trigger(&self) -> Arc<Notify> {
        self.save_now.clone()
    }

    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for AutosaveHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start the autosave task on the current tokio runtime.
pub fn spawn_autosave(
    dispatcher: UiDispatcher<Workbench>,
    config: AutosaveConfig,
    bus: &'static EventBus,
) -> AutosaveHandle {
    let save_now = Arc::new(Notify::new());
    let remaining = Arc::new(AtomicU64::new(config.interval_ticks));

    let task = tokio::spawn(run(
        dispatcher,
        config,
        bus,
        save_now.clone(),
        remaining.clone(),
    ));

    AutosaveHandle {
        save_now,
        remaining,
        task,
    }
}

async fn run(
    dispatcher: UiDispatcher<Workbench>,
    config: AutosaveConfig,
    bus: &'static EventBus,
    save_now: Arc<Notify>,
    remaining: Arc<AtomicU64>,
) {
    tracing::info!(
        "Autosave every {} ticks to {}",
        config.interval_ticks,
        config.path.display()
    );
    let mut ticker = tokio::time::interval(config.tick);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // the first tick completes immediately
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let left = remaining.load(Ordering::Relaxed).saturating_sub(1);
                remaining.store(left, Ordering::Relaxed);
                if config.show_countdown {
                    tracing::debug!("{}", countdown_text(left));
                }
                if left > 0 {
                    continue;
                }
            }
            _ = save_now.notified() => {
                tracing::debug!("Autosave requested");
            }
        }

        remaining.store(config.interval_ticks, Ordering::Relaxed);
        ticker.reset();
        if let Some(event) = save_once(&dispatcher, &config).await {
            let _ = bus.publish(AppEvent::Autosave(event));
        }
    }
}

/// One autosave cycle. Returns the event to publish, if any.
pub async fn save_once(
    dispatcher: &UiDispatcher<Workbench>,
    config: &AutosaveConfig,
) -> Option<AutosaveEvent> {
    let capture = dispatcher
        .call_async(|wb| wb.active_capture(), config.snapshot_timeout)
        .await
        .and_then(|inner| inner);

    let (tab, snapshot) = match capture {
        Ok(captured) => captured,
        Err(UiError::Disconnected) => {
            tracing::debug!("Autosave stopped: UI thread gone");
            return None;
        }
        Err(e) => {
            tracing::warn!("Autosave skipped: {}", e);
            return Some(AutosaveEvent::Skipped {
                reason: e.to_string(),
            });
        }
    };

    let path = config.path.clone();
    let written = write_png(snapshot, path.clone()).await;

    match written {
        Ok(()) => {
            tracing::info!("Autosaved {} to {}", tab, path.display());
            config
                .notifications
                .then_some(AutosaveEvent::Saved { tab, path })
        }
        Err(e) => {
            tracing::error!("Autosave of {} failed: {}", tab, e);
            Some(AutosaveEvent::Failed {
                tab,
                error: e.to_string(),
            })
        }
    }
}

/// Encode and write on the blocking pool.
async fn write_png(snapshot: Snapshot, path: PathBuf) -> Result<(), AutosaveError> {
    tokio::task::spawn_blocking(move || write_png_blocking(&snapshot, &path)).await?
}

fn write_png_blocking(snapshot: &Snapshot, path: &Path) -> Result<(), AutosaveError> {
    let bytes = encode_png(snapshot)?;
    std::fs::write(path, bytes).map_err(|source| AutosaveError::Write {
        path: path.to_path_buf(),
        source,
    })
}
