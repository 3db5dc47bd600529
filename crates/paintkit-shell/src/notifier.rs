//! User-facing notifications for autosave results and errors.
//!
//! There is no system tray here; a notification is logged and the most
//! recent ones are kept in memory.

use std::collections::VecDeque;

use paintkit_core::{
    thread_safe, AppEvent, AutosaveEvent, EventBus, EventCategory, EventFilter, SubscriptionId,
    ThreadSafe,
};

const KEEP: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

/// The notification shown for `event`, if any.
pub fn notification_for(event: &AppEvent) -> Option<Notification> {
    let (title, message) = match event {
        AppEvent::Autosave(AutosaveEvent::Saved { .. }) => {
            ("Autosave", "Your work has been autosaved.".to_string())
        }
        AppEvent::Autosave(AutosaveEvent::Failed { error, .. }) => {
            ("Autosave failed", error.clone())
        }
        AppEvent::Error(e) => ("Error", format!("{}: {}", e.context, e.message)),
        _ => return None,
    };
    Some(Notification {
        title: title.to_string(),
        message,
    })
}

pub struct Notifier {
    bus: &'static EventBus,
    subscription: SubscriptionId,
    recent: ThreadSafe<VecDeque<Notification>>,
}

impl Notifier {
    pub fn start(bus: &'static EventBus) -> Self {
        let recent = thread_safe(VecDeque::with_capacity(KEEP));
        let sink = recent.clone();
        let filter = EventFilter::Categories(vec![EventCategory::Autosave, EventCategory::Error]);
        let subscription = bus.subscribe(filter, move |event| {
            let Some(note) = notification_for(&event) else {
                return;
            };
            tracing::info!(title = %note.title, "{}", note.message);
            let mut recent = sink.lock();
            if recent.len() == KEEP {
                recent.pop_front();
            }
            recent.push_back(note);
        });
        Self {
            bus,
            subscription,
            recent,
        }
    }

    /// Notifications shown so far, oldest first.
    pub fn recent(&self) -> Vec<Notification> {
        self.recent.lock().iter().cloned().collect()
    }
}

impl Drop for Notifier {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.subscription);
    }
}
