//! Console shell configuration.
//!
//! These are the construction-time options of the shell: where the data
//! system lives, which extra header every request carries, and whether the
//! shared frame links to the legacy consoles.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Construction-time options for the console shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Hide the legacy coordinator/overlord console links in the frame.
    #[serde(default)]
    pub hide_legacy_links: bool,

    /// Base URL every outgoing request is resolved against.
    /// When absent, requests go to `http://localhost:8888`.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Name of a custom header attached to every outgoing request.
    #[serde(default)]
    pub custom_header_name: Option<String>,

    /// Value of the custom header.
    #[serde(default)]
    pub custom_header_value: Option<String>,

    /// Per-request timeout for backend calls, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Delay before a navigation intent field is cleared, in milliseconds.
    #[serde(default = "default_intent_reset_delay_ms")]
    pub intent_reset_delay_ms: u64,

    /// How long capability warnings stay on screen, in milliseconds.
    #[serde(default = "default_notification_timeout_ms")]
    pub notification_timeout_ms: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            hide_legacy_links: false,
            base_url: None,
            custom_header_name: None,
            custom_header_value: None,
            request_timeout_ms: default_request_timeout_ms(),
            intent_reset_delay_ms: default_intent_reset_delay_ms(),
            notification_timeout_ms: default_notification_timeout_ms(),
        }
    }
}

impl ConsoleConfig {
    /// The custom header pair, only when both name and value are present.
    pub fn custom_header(&self) -> Option<(&str, &str)> {
        match (&self.custom_header_name, &self.custom_header_value) {
            (Some(name), Some(value)) => Some((name.as_str(), value.as_str())),
            _ => None,
        }
    }

    /// Base URL with any trailing slash removed.
    pub fn resolved_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn intent_reset_delay(&self) -> Duration {
        Duration::from_millis(self.intent_reset_delay_ms)
    }
}

/// Router address used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8888";

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_intent_reset_delay_ms() -> u64 {
    1_000
}

fn default_notification_timeout_ms() -> u64 {
    120_000
}
