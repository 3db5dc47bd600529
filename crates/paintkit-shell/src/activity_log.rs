//! Per-run activity log.
//!
//! Every event that names a tab becomes one line in
//! `<dir>/log_YYYYMMDD_HHMMSS.txt`. The bus handler only formats the line
//! and queues it; a background thread owns the file.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use chrono::{Local, NaiveDateTime};
use paintkit_core::{
    thread_safe, AppEvent, EventBus, EventCategory, EventFilter, SubscriptionId, ThreadSafe,
};

/// `log_20240919_113300.txt`
pub fn log_file_name(started: NaiveDateTime) -> String {
    format!("log_{}.txt", started.format("%Y%m%d_%H%M%S"))
}

/// `09/19/2024 11:33:00 [Canvas 1] Rectangle drawn`
pub fn format_entry(at: NaiveDateTime, tab: &str, action: &str) -> String {
    format!("{} [{}] {}", at.format("%m/%d/%Y %H:%M:%S"), tab, action)
}

/// The log line for `event`, if it concerns a tab.
pub fn entry_for(event: &AppEvent, at: NaiveDateTime) -> Option<String> {
    event
        .tab()
        .map(|tab| format_entry(at, tab, &event.description()))
}

pub struct ActivityLog {
    path: PathBuf,
    bus: &'static EventBus,
    subscription: SubscriptionId,
    sender: ThreadSafe<Option<mpsc::Sender<String>>>,
    writer: Option<JoinHandle<()>>,
}

impl ActivityLog {
    /// Create the log file under `dir` and start recording events from `bus`.
    pub fn start(dir: &Path, bus: &'static EventBus) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(log_file_name(Local::now().naive_local()));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        let (tx, rx) = mpsc::channel::<String>();
        let writer = thread::Builder::new()
            .name("activity-log".to_string())
            .spawn(move || write_lines(file, rx))?;

        let sender = thread_safe(Some(tx));
        let handler_sender = sender.clone();
        let filter = EventFilter::Categories(vec![
            EventCategory::Canvas,
            EventCategory::File,
            EventCategory::Autosave,
            EventCategory::Tab,
        ]);
        let subscription = bus.subscribe(filter, move |event| {
            let Some(line) = entry_for(&event, Local::now().naive_local()) else {
                return;
            };
            if let Some(tx) = handler_sender.lock().as_ref() {
                let _ = tx.send(line);
            }
        });

        tracing::info!("Activity log at {}", path.display());
        Ok(Self {
            path,
            bus,
            subscription,
            sender,
            writer: Some(writer),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stop recording and wait for queued lines to reach the file.
    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.bus.unsubscribe(self.subscription);
        // closing the channel ends the writer loop
        self.sender.lock().take();
        if let Some(writer) = self.writer.take() {
            if writer.join().is_err() {
                tracing::error!("Activity log writer panicked");
            }
        }
    }
}

impl Drop for ActivityLog {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn write_lines(file: File, rx: mpsc::Receiver<String>) {
    let mut out = BufWriter::new(file);
    for line in rx {
        let written = writeln!(out, "{}", line).and_then(|_| out.flush());
        if let Err(e) = written {
            tracing::error!("Failed to write activity log: {}", e);
        }
    }
}
