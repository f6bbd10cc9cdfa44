//! Capability state of the backend, as believed by the shell.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which query interface the backend supports.
///
/// Starts as `Unknown` and moves to one of the three resolved values exactly
/// once per shell session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapabilityState {
    #[default]
    Unknown,
    WorkingWithSql,
    WorkingWithoutSql,
    Broken,
}

impl CapabilityState {
    /// Whether discovery has finished.
    pub fn is_resolved(self) -> bool {
        self != CapabilityState::Unknown
    }

    /// Views fall back to native APIs unless SQL is known to work.
    pub fn no_sql_mode(self) -> bool {
        self != CapabilityState::WorkingWithSql
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CapabilityState::Unknown => "unknown",
            CapabilityState::WorkingWithSql => "working-with-sql",
            CapabilityState::WorkingWithoutSql => "working-without-sql",
            CapabilityState::Broken => "broken",
        }
    }
}

impl fmt::Display for CapabilityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What subscribers of the coordinator observe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CapabilitySnapshot {
    pub result: CapabilityState,
    pub loading: bool,
}
