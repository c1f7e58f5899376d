//! User-facing notifications raised while submitting forms.

use std::sync::Mutex;

use serde::Serialize;
use strum::{AsRefStr, Display};
use tracing::{error, info};

pub const REGISTER_LOADING: &str = "Processing signature...";
pub const REGISTER_SUCCESS: &str = "Signature registered successfully!";
pub const REGISTER_REJECTED: &str = "Failed to register signature. Please try again.";
pub const REGISTER_FAILED: &str = "An error occurred during registration.";

pub const VERIFY_LOADING: &str = "Verifying signature authenticity...";
pub const VERIFY_SUCCESS: &str = "Verification complete!";
pub const VERIFY_REJECTED: &str = "Verification failed. Signature mismatch.";
pub const VERIFY_FAILED: &str = "An error occurred during the verification process.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Level {
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn loading(message: impl Into<String>) -> Self {
        Self::new(Level::Loading, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Level::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Sink for notifications; the dashboard does not care how they are shown.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Forwards notifications to the tracing subscriber.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, n: Notification) {
        match n.level {
            Level::Error => error!(text = %n.message, "notification"),
            _ => info!(kind = %n.level, text = %n.message, "notification"),
        }
    }
}

/// Keeps every notification in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn take(&self) -> Vec<Notification> {
        match self.seen.lock() {
            Ok(mut seen) => std::mem::take(&mut *seen),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        match self.seen.lock() {
            Ok(mut seen) => seen.push(notification),
            Err(poisoned) => poisoned.into_inner().push(notification),
        }
    }
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}
