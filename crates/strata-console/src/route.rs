//! Route table for the console views.

use serde::Serialize;

/// One feature view of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Datasources,
    Segments,
    Tasks,
    Servers,
    Query,
    Lookups,
    Home,
}

impl Route {
    /// Routes in matching priority. `Home` is the fallback and comes last.
    pub const TABLE: [Route; 7] = [
        Route::Datasources,
        Route::Segments,
        Route::Tasks,
        Route::Servers,
        Route::Query,
        Route::Lookups,
        Route::Home,
    ];

    /// First route whose prefix matches `path`, else `Home`.
    pub fn match_path(path: &str) -> Route {
        let path = normalize(path);
        Self::TABLE
            .into_iter()
            .find(|route| match route.prefix() {
                Some(prefix) => has_segment_prefix(path, prefix),
                None => true,
            })
            .unwrap_or(Route::Home)
    }

    /// Path prefix this route claims; `None` for the fallback.
    pub fn prefix(self) -> Option<&'static str> {
        match self {
            Route::Datasources => Some("/datasources"),
            Route::Segments => Some("/segments"),
            Route::Tasks => Some("/tasks"),
            Route::Servers => Some("/servers"),
            Route::Query => Some("/query"),
            Route::Lookups => Some("/lookups"),
            Route::Home => None,
        }
    }

    /// Canonical location for navigating to this route.
    pub fn path(self) -> &'static str {
        self.prefix().unwrap_or("/")
    }

    /// Stable identifier used in markup.
    pub fn name(self) -> &'static str {
        match self {
            Route::Datasources => "datasources",
            Route::Segments => "segments",
            Route::Tasks => "tasks",
            Route::Servers => "servers",
            Route::Query => "query",
            Route::Lookups => "lookups",
            Route::Home => "home",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Datasources => "Datasources",
            Route::Segments => "Segments",
            Route::Tasks => "Tasks",
            Route::Servers => "Data servers",
            Route::Query => "Query",
            Route::Lookups => "Lookups",
            Route::Home => "Home",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Route::Datasources => "database",
            Route::Segments => "cubes",
            Route::Tasks => "list-check",
            Route::Servers => "server",
            Route::Query => "terminal",
            Route::Lookups => "book",
            Route::Home => "home",
        }
    }
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

fn has_segment_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
