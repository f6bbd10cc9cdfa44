//! Feature views.
//!
//! The views themselves are outside the shell; here each one is a page that
//! shows the props it was handed and offers the navigation callbacks it is
//! allowed to invoke.

use serde::Serialize;

use crate::capability::CapabilityState;
use crate::intent::NavigationIntent;
use crate::route::Route;
use crate::templates::{action_form, card, definition_list, empty_state};

/// Props a destination view receives from the composer.
///
/// Only the intent fields the route reads are populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewProps {
    pub no_sql_mode: bool,
    pub task_id: Option<String>,
    pub datasource_filter: Option<String>,
    pub only_unavailable: bool,
    pub initial_sql: Option<String>,
    pub middle_manager: Option<String>,
}

impl ViewProps {
    pub fn for_route(route: Route, capability: CapabilityState, intent: &NavigationIntent) -> Self {
        let mut props = ViewProps {
            no_sql_mode: capability.no_sql_mode(),
            ..Default::default()
        };
        match route {
            Route::Segments => {
                props.datasource_filter = intent.target_datasource_filter.clone();
                props.only_unavailable = intent.only_show_unavailable_segments;
            }
            Route::Tasks => props.task_id = intent.target_task_id.clone(),
            Route::Servers => props.middle_manager = intent.target_middle_manager_host.clone(),
            Route::Query => props.initial_sql = intent.initial_sql_text.clone(),
            Route::Datasources | Route::Lookups | Route::Home => {}
        }
        props
    }
}

/// Navigation callback a view can invoke; one per intent setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCallback {
    GoToTask,
    GoToSegments,
    ShowUnavailableSegments,
    QueryWithSql,
    GoToMiddleManager,
}

impl NavCallback {
    /// Endpoint the callback posts to.
    pub fn action_path(self) -> &'static str {
        match self {
            NavCallback::GoToTask => "/actions/go-to-task",
            NavCallback::GoToSegments => "/actions/go-to-segments",
            NavCallback::ShowUnavailableSegments => "/actions/show-unavailable-segments",
            NavCallback::QueryWithSql => "/actions/query-with-sql",
            NavCallback::GoToMiddleManager => "/actions/go-to-middle-manager",
        }
    }
}

/// Callbacks handed to a view. SQL callbacks are withheld in no-SQL mode.
pub fn callbacks(route: Route, no_sql_mode: bool) -> Vec<NavCallback> {
    let all: &[NavCallback] = match route {
        Route::Datasources => &[
            NavCallback::GoToSegments,
            NavCallback::ShowUnavailableSegments,
            NavCallback::QueryWithSql,
        ],
        Route::Segments => &[NavCallback::QueryWithSql],
        Route::Tasks => &[NavCallback::GoToMiddleManager, NavCallback::QueryWithSql],
        Route::Servers => &[NavCallback::GoToTask],
        Route::Query | Route::Lookups | Route::Home => &[],
    };
    all.iter()
        .copied()
        .filter(|cb| !(no_sql_mode && *cb == NavCallback::QueryWithSql))
        .collect()
}

/// Render the body of a destination view.
pub fn render_view(route: Route, props: &ViewProps) -> String {
    let mode = if props.no_sql_mode { "native" } else { "sql" };
    let mut rows = vec![("noSqlMode", props.no_sql_mode.to_string())];
    match route {
        Route::Segments => {
            rows.push(("datasource", display(&props.datasource_filter)));
            rows.push(("onlyUnavailable", props.only_unavailable.to_string()));
        }
        Route::Tasks => rows.push(("taskId", display(&props.task_id))),
        Route::Servers => rows.push(("middleManager", display(&props.middle_manager))),
        Route::Query => rows.push(("initSql", display(&props.initial_sql))),
        Route::Datasources | Route::Lookups | Route::Home => {}
    }

    let body = if route == Route::Home {
        empty_state(
            "home",
            "Welcome",
            "Pick a view from the header to inspect the data system.",
        )
    } else {
        String::new()
    };

    let actions: String = callbacks(route, props.no_sql_mode)
        .into_iter()
        .map(|cb| callback_form(route, cb, props))
        .collect();
    let actions = if actions.is_empty() {
        actions
    } else {
        card("Navigate", &actions)
    };

    format!(
        r##"<div data-view="{view}" data-mode="{mode}">
            <h1 class="text-2xl font-bold text-gray-900 mb-6">{title}</h1>
            {body}
            {props}
            {actions}
        </div>"##,
        view = route.name(),
        title = route.title(),
        props = card("View properties", &definition_list(&rows)),
    )
}

fn callback_form(route: Route, cb: NavCallback, props: &ViewProps) -> String {
    let action = cb.action_path();
    match cb {
        NavCallback::GoToTask => action_form(action, "Open task", &[("task_id", "Task ID", "")]),
        NavCallback::GoToSegments => {
            action_form(action, "Show segments", &[("datasource", "Datasource", "")])
        }
        NavCallback::ShowUnavailableSegments => action_form(
            action,
            "Show unavailable segments",
            &[("datasource", "Datasource", "")],
        ),
        NavCallback::GoToMiddleManager => action_form(
            action,
            "Open middle manager",
            &[("host", "Middle manager host", "")],
        ),
        NavCallback::QueryWithSql => {
            let sql = match (route, &props.task_id) {
                (Route::Tasks, Some(task_id)) => format!(
                    "SELECT * FROM sys.tasks WHERE task_id = '{}'",
                    task_id.replace('\'', "''")
                ),
                (Route::Tasks, None) => "SELECT * FROM sys.tasks".to_string(),
                (Route::Segments, _) => "SELECT * FROM sys.segments".to_string(),
                _ => "SELECT * FROM INFORMATION_SCHEMA.TABLES".to_string(),
            };
            action_form(action, "Query with SQL", &[("sql", "SQL", sql.as_str())])
        }
    }
}

fn display(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_intent() -> NavigationIntent {
        NavigationIntent {
            target_task_id: Some("t1".to_string()),
            target_datasource_filter: Some("\"wiki\"".to_string()),
            only_show_unavailable_segments: true,
            initial_sql_text: Some("SELECT 1".to_string()),
            target_middle_manager_host: Some("mm:8091".to_string()),
        }
    }

    #[test]
    fn test_props_only_carry_fields_for_route() {
        let intent = full_intent();

        let tasks = ViewProps::for_route(Route::Tasks, CapabilityState::WorkingWithSql, &intent);
        assert_eq!(tasks.task_id.as_deref(), Some("t1"));
        assert!(!tasks.no_sql_mode);
        assert_eq!(tasks.initial_sql, None);
        assert_eq!(tasks.datasource_filter, None);

        let segments = ViewProps::for_route(Route::Segments, CapabilityState::Broken, &intent);
        assert!(segments.no_sql_mode);
        assert_eq!(segments.datasource_filter.as_deref(), Some("\"wiki\""));
        assert!(segments.only_unavailable);
        assert_eq!(segments.task_id, None);

        let home = ViewProps::for_route(Route::Home, CapabilityState::WorkingWithSql, &intent);
        assert_eq!(
            home,
            ViewProps {
                no_sql_mode: false,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_sql_callbacks_withheld_in_no_sql_mode() {
        assert!(callbacks(Route::Datasources, false).contains(&NavCallback::QueryWithSql));
        assert!(!callbacks(Route::Datasources, true).contains(&NavCallback::QueryWithSql));
        assert_eq!(callbacks(Route::Servers, true), vec![NavCallback::GoToTask]);
        assert!(callbacks(Route::Lookups, false).is_empty());
    }

    #[test]
    fn test_render_escapes_intent_values() {
        let props = ViewProps {
            task_id: Some("<script>".to_string()),
            ..Default::default()
        };
        let html = render_view(Route::Tasks, &props);
        assert!(html.contains("data-view=\"tasks\""));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_home_view_is_named() {
        let html = render_view(Route::Home, &ViewProps::default());
        assert!(html.contains("data-view=\"home\""));
    }

    #[test]
    fn test_render_marks_mode() {
        let props = ViewProps {
            no_sql_mode: true,
            ..Default::default()
        };
        let html = render_view(Route::Datasources, &props);
        assert!(html.contains("data-mode=\"native\""));
        assert!(!html.contains("/actions/query-with-sql"));
        assert!(html.contains("/actions/go-to-segments"));
    }
}
