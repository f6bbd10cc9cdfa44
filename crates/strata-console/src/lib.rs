//! # strata-console
//!
//! Bootstrap shell of the Strata admin console.
//!
//! On startup the shell probes the data system to learn whether the SQL
//! endpoint is usable, shows a loading page until it knows, and then routes
//! every path to one of the feature views inside a shared frame. Views hand
//! each other short-lived context (a task id, a datasource filter, a SQL
//! string) through the navigation intent store.
//!
//! ## Layout
//!
//! - [`probe`]: two-step capability classification
//! - [`coordinator`]: single-flight, cancellable wrapper around the probe
//! - [`intent`]: navigation intents with per-field deferred reset
//! - [`route`] and [`shell`]: path matching and page composition
//! - [`server`]: axum server hosting the shell

pub mod api;
pub mod capability;
pub mod coordinator;
pub mod error;
pub mod handlers;
pub mod intent;
pub mod notify;
pub mod probe;
pub mod route;
pub mod routes;
pub mod server;
pub mod shell;
pub mod state;
pub mod templates;
pub mod views;

pub use api::{ApiError, HttpApi, QueryApi};
pub use capability::{CapabilitySnapshot, CapabilityState};
pub use coordinator::CapabilityCoordinator;
pub use error::ConsoleError;
pub use intent::{Location, NavigationIntent, NavigationIntentStore};
pub use notify::{Notification, Notifier, Severity, Toaster};
pub use route::Route;
pub use server::ConsoleServer;
pub use shell::{Composition, Shell};
pub use state::AppState;
