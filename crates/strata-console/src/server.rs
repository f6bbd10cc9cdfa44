//! Console server implementation.

use std::future::Future;
use strata_core::StrataConfig;
use tokio::net::TcpListener;

use crate::error::ConsoleError;
use crate::routes;
use crate::shell::Shell;
use crate::state::AppState;

/// The console server.
pub struct ConsoleServer {
    config: StrataConfig,
}

impl ConsoleServer {
    /// Create a new console server with the given configuration.
    pub fn new(config: StrataConfig) -> Self {
        Self { config }
    }

    /// Serve until `shutdown` completes, then tear the shell down.
    pub async fn run_until<F>(&self, shutdown: F) -> Result<(), ConsoleError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let shell = Shell::new(self.config.console.clone())?;
        let state = AppState::new(shell);
        state.shell().start();

        let addr = self.config.server.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ConsoleError::StartupFailed(e.to_string()))?;
        tracing::info!(address = %addr, "Starting Strata console");

        let result = axum::serve(listener, routes::create_router(state.clone()))
            .with_graceful_shutdown(shutdown)
            .await;

        state.shell().teardown();
        result.map_err(|e| ConsoleError::StartupFailed(e.to_string()))
    }

    /// Get the configured listen port.
    pub fn listen_port(&self) -> u16 {
        self.config.server.port
    }
}
