//! The console shell.
//!
//! Owns the capability coordinator, the navigation intent store, the toaster
//! and the current location, and composes the page for a path.

use std::sync::Arc;
use strata_core::ConsoleConfig;

use crate::api::{HttpApi, QueryApi};
use crate::capability::{CapabilitySnapshot, CapabilityState};
use crate::coordinator::CapabilityCoordinator;
use crate::error::ConsoleError;
use crate::intent::{Location, NavigationIntent, NavigationIntentStore};
use crate::notify::Toaster;
use crate::route::Route;
use crate::templates::{self, Frame};
use crate::views::{self, ViewProps};

/// What the composer decided to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Composition {
    /// Capability discovery has not resolved; the router is not mounted.
    Loading,
    /// A routed view wrapped in the shared frame.
    View { route: Route, props: ViewProps },
}

/// Pick what to render for `path`. Pure; no side effects.
pub fn compose(capability: CapabilityState, path: &str, intent: &NavigationIntent) -> Composition {
    if !capability.is_resolved() {
        return Composition::Loading;
    }
    let route = Route::match_path(path);
    Composition::View {
        route,
        props: ViewProps::for_route(route, capability, intent),
    }
}

/// One console session.
pub struct Shell {
    config: ConsoleConfig,
    coordinator: Arc<CapabilityCoordinator>,
    intents: NavigationIntentStore,
    toaster: Arc<Toaster>,
}

impl Shell {
    /// Build a shell talking to the configured backend over HTTP.
    pub fn new(config: ConsoleConfig) -> Result<Self, ConsoleError> {
        let api = HttpApi::new(&config)?;
        tracing::info!(base_url = %api.base_url(), "Console shell configured");
        Ok(Self::with_api(config, Arc::new(api)))
    }

    /// Build a shell on top of any [`QueryApi`].
    pub fn with_api(config: ConsoleConfig, api: Arc<dyn QueryApi>) -> Self {
        let toaster = Arc::new(Toaster::new());
        let coordinator = CapabilityCoordinator::new(api, toaster.clone())
            .with_notification_timeout(config.notification_timeout_ms);
        let intents = NavigationIntentStore::new(Location::default(), config.intent_reset_delay());
        Self {
            config,
            coordinator: Arc::new(coordinator),
            intents,
            toaster,
        }
    }

    /// Kick off capability discovery. Safe to call repeatedly.
    pub fn start(&self) {
        self.coordinator.start();
    }

    /// Cancel discovery and every pending intent reset.
    pub fn teardown(&self) {
        self.coordinator.cancel();
        self.intents.shutdown();
        tracing::info!("Console shell torn down");
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn capabilities(&self) -> CapabilitySnapshot {
        self.coordinator.snapshot()
    }

    pub fn coordinator(&self) -> &Arc<CapabilityCoordinator> {
        &self.coordinator
    }

    pub fn intents(&self) -> &NavigationIntentStore {
        &self.intents
    }

    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }

    pub fn location(&self) -> &Location {
        self.intents.location()
    }

    /// Composition for the current location.
    pub fn composition(&self) -> Composition {
        compose(
            self.coordinator.state(),
            &self.location().path(),
            &self.intents.current(),
        )
    }

    /// Full HTML page for the current location.
    pub fn render(&self) -> String {
        let toasts = self.toaster.active();
        match self.composition() {
            Composition::Loading => {
                templates::loading_page(&toasts, self.config.hide_legacy_links)
            }
            Composition::View { route, props } => {
                let frame = Frame {
                    active: Some(route),
                    capability: self.coordinator.state(),
                    hide_legacy_links: self.config.hide_legacy_links,
                    toasts: &toasts,
                };
                templates::layout(route.title(), &frame, &views::render_view(route, &props), false)
            }
        }
    }
}

impl Drop for Shell {
    fn drop(&mut self) {
        self.coordinator.cancel();
    }
}
