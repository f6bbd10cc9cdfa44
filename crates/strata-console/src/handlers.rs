//! Request handlers for the console.

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::ConsoleError;
use crate::state::AppState;

// =============================================================================
// Page Handlers (HTML responses)
// =============================================================================

/// Every GET that is not an action: assign the location and compose.
///
/// File requests (`/favicon.ico`, `/robots.txt`) are not navigation and
/// must not move the location.
pub async fn page(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }
    if is_asset_path(uri.path()) {
        tracing::debug!(path = %uri.path(), "No such asset");
        return StatusCode::NOT_FOUND.into_response();
    }
    let shell = state.shell();
    shell.location().assign(uri.path());
    Html(shell.render()).into_response()
}

fn is_asset_path(path: &str) -> bool {
    path.rsplit('/').next().is_some_and(|last| last.contains('.'))
}

/// Dismiss a toast and go back to where the user was.
pub async fn dismiss_toast(State(state): State<AppState>, Path(id): Path<Uuid>) -> Redirect {
    if !state.shell().toaster().dismiss(id) {
        tracing::debug!(toast = %id, "Toast already gone");
    }
    back_to_location(&state)
}

// =============================================================================
// Navigation actions (form posts from the views)
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct TaskForm {
    pub task_id: String,
}

#[derive(Debug, Deserialize)]
pub struct DatasourceForm {
    #[serde(default)]
    pub datasource: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SqlForm {
    pub sql: String,
}

#[derive(Debug, Deserialize)]
pub struct MiddleManagerForm {
    pub host: String,
}

pub async fn go_to_task(
    State(state): State<AppState>,
    Form(form): Form<TaskForm>,
) -> Result<Redirect, ConsoleError> {
    let task_id = required("task_id", &form.task_id)?;
    state.shell().intents().go_to_task(task_id);
    Ok(back_to_location(&state))
}

pub async fn go_to_segments(
    State(state): State<AppState>,
    Form(form): Form<DatasourceForm>,
) -> Result<Redirect, ConsoleError> {
    let datasource = required("datasource", form.datasource.as_deref().unwrap_or_default())?;
    state.shell().intents().go_to_segments(datasource);
    Ok(back_to_location(&state))
}

/// Unavailable segments, optionally narrowed to one datasource.
pub async fn show_unavailable_segments(
    State(state): State<AppState>,
    Form(form): Form<DatasourceForm>,
) -> Redirect {
    let intents = state.shell().intents();
    if let Some(datasource) = form.datasource.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        intents.go_to_segments(datasource);
    }
    intents.show_unavailable_segments();
    back_to_location(&state)
}

pub async fn query_with_sql(
    State(state): State<AppState>,
    Form(form): Form<SqlForm>,
) -> Result<Redirect, ConsoleError> {
    let sql = required("sql", &form.sql)?;
    state.shell().intents().query_with_sql(sql);
    Ok(back_to_location(&state))
}

pub async fn go_to_middle_manager(
    State(state): State<AppState>,
    Form(form): Form<MiddleManagerForm>,
) -> Result<Redirect, ConsoleError> {
    let host = required("host", &form.host)?;
    state.shell().intents().go_to_middle_manager(host);
    Ok(back_to_location(&state))
}

fn required<'a>(name: &str, value: &'a str) -> Result<&'a str, ConsoleError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConsoleError::InvalidRequest(format!("{} is required", name)));
    }
    Ok(value)
}

fn back_to_location(state: &AppState) -> Redirect {
    Redirect::to(&state.shell().location().path())
}

// =============================================================================
// API Handlers (JSON responses)
// =============================================================================

pub mod api {
    use super::*;
    use crate::capability::CapabilitySnapshot;

    /// Coordinator snapshot: `{"result": ..., "loading": ...}`.
    pub async fn capabilities(State(state): State<AppState>) -> Json<CapabilitySnapshot> {
        Json(state.shell().capabilities())
    }
}

pub async fn healthz() -> Json<serde_json::Value> {
    Json(json!({ "ok": true, "service": "strata-console" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_paths() {
        assert!(is_asset_path("/favicon.ico"));
        assert!(is_asset_path("/static/app.js"));
        assert!(!is_asset_path("/"));
        assert!(!is_asset_path("/tasks"));
        assert!(!is_asset_path("/tasks/"));
    }
}
