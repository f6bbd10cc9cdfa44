//! Console application state.

use std::sync::Arc;

use crate::shell::Shell;

/// Shared application state for the console server.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// The one shell session this server hosts.
    shell: Shell,
}

impl AppState {
    /// Create a new application state around a shell.
    pub fn new(shell: Shell) -> Self {
        Self {
            inner: Arc::new(AppStateInner { shell }),
        }
    }

    /// Get the shell.
    pub fn shell(&self) -> &Shell {
        &self.inner.shell
    }
}
