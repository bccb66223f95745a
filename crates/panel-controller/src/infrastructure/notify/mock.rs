//! Recording [`Notifier`] for tests.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::application::notify::Notifier;

/// One reported notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Error(String),
    Success(String),
}

/// Keeps every notification in order instead of showing it.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn all(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|n| match n {
                Notification::Error(m) => Some(m.clone()),
                Notification::Success(_) => None,
            })
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|n| match n {
                Notification::Success(m) => Some(m.clone()),
                Notification::Error(_) => None,
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn report_error(&self, message: &str) {
        self.lock().push(Notification::Error(message.to_string()));
    }

    fn report_success(&self, message: &str) {
        self.lock().push(Notification::Success(message.to_string()));
    }
}
