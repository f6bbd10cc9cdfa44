//! User-visible notifications.
//!
//! [`Notifier`] is what the shell talks to; [`Toaster`] keeps the toasts the
//! shared frame renders until they expire or are dismissed.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use uuid::Uuid;

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// A request to show something to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    /// Display time in milliseconds; `0` keeps the toast until dismissed.
    pub timeout_ms: u64,
}

/// Anything that can display a notification.
pub trait Notifier: Send + Sync {
    fn show(&self, notification: Notification);
}

/// A displayed notification.
#[derive(Debug, Clone, Serialize)]
pub struct Toast {
    pub id: Uuid,
    #[serde(flatten)]
    pub notification: Notification,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    expires_at: Option<Instant>,
}

impl Toast {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// In-memory toast list.
#[derive(Debug, Default)]
pub struct Toaster {
    toasts: Mutex<Vec<Toast>>,
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toasts that have neither expired nor been dismissed, oldest first.
    pub fn active(&self) -> Vec<Toast> {
        let now = Instant::now();
        let mut toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        toasts.retain(|t| !t.is_expired(now));
        toasts.clone()
    }

    /// Remove a toast. Returns false if it was already gone.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        let before = toasts.len();
        toasts.retain(|t| t.id != id);
        toasts.len() != before
    }
}

impl Notifier for Toaster {
    fn show(&self, notification: Notification) {
        match notification.severity {
            Severity::Error => tracing::error!(message = %notification.message, "Toast"),
            Severity::Warning => tracing::warn!(message = %notification.message, "Toast"),
            _ => tracing::info!(message = %notification.message, "Toast"),
        }

        let expires_at = (notification.timeout_ms > 0)
            .then(|| Instant::now() + Duration::from_millis(notification.timeout_ms));
        let toast = Toast {
            id: Uuid::new_v4(),
            notification,
            created_at: Utc::now(),
            expires_at,
        };
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(toast);
    }
}
