//! Backend capability probe.
//!
//! A strict two-step decision tree:
//!
//! 1. `POST` a trivial query to the SQL endpoint. Success, or any failure
//!    other than `405 Method Not Allowed`, means SQL is available.
//! 2. On 405, `GET` the status endpoint. If that answers, the backend is up
//!    with SQL disabled; otherwise it is broken.
//!
//! Non-405 failures of the first call are deliberately treated as success,
//! so a timeout on the SQL endpoint still yields `WorkingWithSql`.

use crate::api::QueryApi;
use crate::capability::CapabilityState;

/// Query sent through the SQL endpoint.
pub const PROBE_QUERY: &str = "SELECT 1337";

/// Classify the backend. Never fails; every error becomes a classification.
pub async fn probe(api: &dyn QueryApi) -> CapabilityState {
    let err = match api.post_sql(PROBE_QUERY).await {
        Ok(_) => {
            tracing::debug!("SQL endpoint answered the probe query");
            return CapabilityState::WorkingWithSql;
        }
        Err(err) => err,
    };

    if !err.is_method_not_allowed() {
        tracing::warn!(error = %err, "SQL probe failed; assuming SQL is available");
        return CapabilityState::WorkingWithSql;
    }

    tracing::debug!("SQL endpoint rejected POST with 405; checking status endpoint");
    match api.get_status().await {
        Ok(_) => CapabilityState::WorkingWithoutSql,
        Err(err) => {
            tracing::debug!(error = %err, "status endpoint unreachable");
            CapabilityState::Broken
        }
    }
}
