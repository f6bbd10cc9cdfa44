//! Capability query coordinator.
//!
//! Runs the backend probe at most once per shell session and publishes
//! `{result, loading}` through a `watch` channel. Concurrent `start` calls
//! coalesce onto the single in-flight probe. `cancel` aborts the probe and
//! guarantees its result is never applied.

use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::QueryApi;
use crate::capability::{CapabilitySnapshot, CapabilityState};
use crate::notify::{Notification, Notifier, Severity};
use crate::probe;

/// Shown when the SQL endpoint is disabled.
pub const SQL_DISABLED_MESSAGE: &str = "It appears that the SQL endpoint is disabled. \
The console will fall back to native APIs and will be limited in functionality. \
Look at the SQL docs for instructions on how to enable the SQL endpoint.";

/// Shown when the backend does not answer at all.
pub const BACKEND_DOWN_MESSAGE: &str =
    "It appears that the data system is not responding. Data cannot be retrieved right now.";

/// Default display time of capability warnings.
pub const DEFAULT_NOTIFICATION_TIMEOUT_MS: u64 = 120_000;

enum Phase {
    Idle,
    Running(JoinHandle<()>),
    Resolved,
    Cancelled,
}

/// Single-flight wrapper around [`probe::probe`].
pub struct CapabilityCoordinator {
    api: Arc<dyn QueryApi>,
    notifier: Arc<dyn Notifier>,
    notification_timeout_ms: u64,
    tx: watch::Sender<CapabilitySnapshot>,
    phase: Mutex<Phase>,
}

impl CapabilityCoordinator {
    pub fn new(api: Arc<dyn QueryApi>, notifier: Arc<dyn Notifier>) -> Self {
        let (tx, _rx) = watch::channel(CapabilitySnapshot::default());
        Self {
            api,
            notifier,
            notification_timeout_ms: DEFAULT_NOTIFICATION_TIMEOUT_MS,
            tx,
            phase: Mutex::new(Phase::Idle),
        }
    }

    /// Override how long capability warnings stay on screen.
    pub fn with_notification_timeout(mut self, timeout_ms: u64) -> Self {
        self.notification_timeout_ms = timeout_ms;
        self
    }

    /// Launch the probe unless one is running, has finished, or was cancelled.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(self: &Arc<Self>) {
        let mut phase = self.lock_phase();
        match *phase {
            Phase::Idle => {}
            Phase::Running(_) => {
                tracing::debug!("Capability probe already in flight; coalescing");
                return;
            }
            Phase::Resolved | Phase::Cancelled => return,
        }

        self.tx.send_replace(CapabilitySnapshot {
            result: CapabilityState::Unknown,
            loading: true,
        });

        let this = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let state = probe::probe(this.api.as_ref()).await;
            this.complete(state);
        });
        *phase = Phase::Running(handle);
        tracing::info!("Capability probe started");
    }

    fn complete(&self, state: CapabilityState) {
        {
            let mut phase = self.lock_phase();
            if !matches!(*phase, Phase::Running(_)) {
                tracing::debug!(capability = %state, "Discarding probe result after cancellation");
                return;
            }
            *phase = Phase::Resolved;
        }

        self.tx.send_replace(CapabilitySnapshot {
            result: state,
            loading: false,
        });
        tracing::info!(capability = %state, "Capability probe resolved");

        if let Some(notification) = self.notification_for(state) {
            self.notifier.show(notification);
        }
    }

    fn notification_for(&self, state: CapabilityState) -> Option<Notification> {
        let (severity, message) = match state {
            CapabilityState::WorkingWithoutSql => (Severity::Warning, SQL_DISABLED_MESSAGE),
            CapabilityState::Broken => (Severity::Error, BACKEND_DOWN_MESSAGE),
            CapabilityState::WorkingWithSql | CapabilityState::Unknown => return None,
        };
        Some(Notification {
            severity,
            message: message.to_string(),
            timeout_ms: self.notification_timeout_ms,
        })
    }

    /// Abort an in-flight probe. A resolved state is kept.
    pub fn cancel(&self) {
        let mut phase = self.lock_phase();
        if matches!(*phase, Phase::Resolved | Phase::Cancelled) {
            return;
        }
        if let Phase::Running(handle) = std::mem::replace(&mut *phase, Phase::Cancelled) {
            handle.abort();
            tracing::info!("Capability probe cancelled");
        }
        drop(phase);
        self.tx.send_modify(|snapshot| snapshot.loading = false);
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(*self.lock_phase(), Phase::Cancelled)
    }

    /// Current `{result, loading}`.
    pub fn snapshot(&self) -> CapabilitySnapshot {
        *self.tx.borrow()
    }

    pub fn state(&self) -> CapabilityState {
        self.snapshot().result
    }

    /// Receiver notified on every published transition.
    pub fn subscribe(&self) -> watch::Receiver<CapabilitySnapshot> {
        self.tx.subscribe()
    }

    /// Wait for the terminal state. `None` if the coordinator was cancelled
    /// first.
    pub async fn resolved(&self) -> Option<CapabilityState> {
        let mut rx = self.tx.subscribe();
        loop {
            let snapshot = *rx.borrow_and_update();
            if snapshot.result.is_resolved() {
                return Some(snapshot.result);
            }
            if self.is_cancelled() {
                return None;
            }
            if rx.changed().await.is_err() {
                return None;
            }
        }
    }

    fn lock_phase(&self) -> std::sync::MutexGuard<'_, Phase> {
        self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
