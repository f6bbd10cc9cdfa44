//! Navigation intents.
//!
//! A view that wants to open another view with some context ("show task X",
//! "query this SQL") calls one of the setters on [`NavigationIntentStore`].
//! The setter writes its field, assigns the destination to the shared
//! [`Location`], and schedules a reset of that field. The destination view
//! reads the field on its next render; after the reset delay the field is
//! gone, so a later visit to the same view starts clean.
//!
//! Fields written in quick succession coexist. Each field has its own reset
//! task, and a rewrite of a field replaces its pending reset.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::route::Route;

/// Pending cross-view parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavigationIntent {
    pub target_task_id: Option<String>,
    pub target_datasource_filter: Option<String>,
    pub only_show_unavailable_segments: bool,
    pub initial_sql_text: Option<String>,
    pub target_middle_manager_host: Option<String>,
}

impl NavigationIntent {
    pub fn is_empty(&self) -> bool {
        *self == NavigationIntent::default()
    }
}

/// One field of [`NavigationIntent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentField {
    TaskId,
    DatasourceFilter,
    OnlyUnavailableSegments,
    SqlText,
    MiddleManagerHost,
}

impl IntentField {
    /// The view that consumes this field.
    pub fn destination(self) -> Route {
        match self {
            IntentField::TaskId => Route::Tasks,
            IntentField::DatasourceFilter | IntentField::OnlyUnavailableSegments => Route::Segments,
            IntentField::SqlText => Route::Query,
            IntentField::MiddleManagerHost => Route::Servers,
        }
    }

    fn clear(self, intent: &mut NavigationIntent) {
        match self {
            IntentField::TaskId => intent.target_task_id = None,
            IntentField::DatasourceFilter => intent.target_datasource_filter = None,
            IntentField::OnlyUnavailableSegments => intent.only_show_unavailable_segments = false,
            IntentField::SqlText => intent.initial_sql_text = None,
            IntentField::MiddleManagerHost => intent.target_middle_manager_host = None,
        }
    }
}

/// Shared "current location" of the console.
///
/// Navigation is plain assignment; there is no history stack.
#[derive(Debug, Clone)]
pub struct Location(Arc<RwLock<String>>);

impl Default for Location {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self(Arc::new(RwLock::new(path.into())))
    }

    pub fn assign(&self, path: impl Into<String>) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = path.into();
    }

    pub fn path(&self) -> String {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[derive(Default)]
struct Slots {
    intent: NavigationIntent,
    /// Bumped on every write so a stale reset never clears a newer value.
    generations: HashMap<IntentField, u64>,
}

/// Holder of the single pending [`NavigationIntent`].
pub struct NavigationIntentStore {
    slots: Arc<Mutex<Slots>>,
    location: Location,
    reset_delay: Duration,
    resets: Mutex<HashMap<IntentField, JoinHandle<()>>>,
}

impl NavigationIntentStore {
    pub fn new(location: Location, reset_delay: Duration) -> Self {
        Self {
            slots: Arc::new(Mutex::new(Slots::default())),
            location,
            reset_delay,
            resets: Mutex::new(HashMap::new()),
        }
    }

    /// Open the tasks view focused on `task_id`.
    pub fn go_to_task(&self, task_id: impl Into<String>) {
        let task_id = task_id.into();
        self.write(IntentField::TaskId, |intent| intent.target_task_id = Some(task_id));
    }

    /// Open the segments view filtered to exactly `datasource`.
    pub fn go_to_segments(&self, datasource: impl Into<String>) {
        let filter = format!("\"{}\"", datasource.into());
        self.write(IntentField::DatasourceFilter, |intent| {
            intent.target_datasource_filter = Some(filter)
        });
    }

    /// Open the segments view showing only unavailable segments.
    pub fn show_unavailable_segments(&self) {
        self.write(IntentField::OnlyUnavailableSegments, |intent| {
            intent.only_show_unavailable_segments = true
        });
    }

    /// Open the query view with `sql` in the editor.
    pub fn query_with_sql(&self, sql: impl Into<String>) {
        let sql = sql.into();
        self.write(IntentField::SqlText, |intent| intent.initial_sql_text = Some(sql));
    }

    /// Open the servers view focused on a middle manager.
    pub fn go_to_middle_manager(&self, host: impl Into<String>) {
        let host = host.into();
        self.write(IntentField::MiddleManagerHost, |intent| {
            intent.target_middle_manager_host = Some(host)
        });
    }

    /// Copy of the pending intent.
    pub fn current(&self) -> NavigationIntent {
        self.lock_slots().intent.clone()
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Abort every pending reset and drop the pending intent.
    pub fn shutdown(&self) {
        let mut resets = self.resets.lock().unwrap_or_else(PoisonError::into_inner);
        for (_, handle) in resets.drain() {
            handle.abort();
        }
        let mut slots = self.lock_slots();
        slots.intent = NavigationIntent::default();
        slots.generations.clear();
    }

    fn write<F>(&self, field: IntentField, apply: F)
    where
        F: FnOnce(&mut NavigationIntent),
    {
        let generation = {
            let mut slots = self.lock_slots();
            apply(&mut slots.intent);
            let generation = slots.generations.entry(field).or_default();
            *generation += 1;
            *generation
        };

        let destination = field.destination().path();
        self.location.assign(destination);
        tracing::debug!(?field, destination, "Navigation intent set");

        self.schedule_reset(field, generation);
    }

    fn schedule_reset(&self, field: IntentField, generation: u64) {
        let slots = Arc::clone(&self.slots);
        let deadline = tokio::time::Instant::now() + self.reset_delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let mut slots = slots.lock().unwrap_or_else(PoisonError::into_inner);
            if slots.generations.get(&field) == Some(&generation) {
                field.clear(&mut slots.intent);
                tracing::trace!(?field, "Navigation intent reset");
            }
        });

        let previous = self
            .resets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(field, handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    fn lock_slots(&self) -> std::sync::MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for NavigationIntentStore {
    fn drop(&mut self) {
        let resets = self.resets.get_mut().unwrap_or_else(PoisonError::into_inner);
        for (_, handle) in resets.drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(50);

    fn store() -> NavigationIntentStore {
        NavigationIntentStore::new(Location::default(), DELAY)
    }

    async fn advance(duration: Duration) {
        tokio::time::advance(duration).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_go_to_task_sets_field_and_location() {
        let store = store();
        store.go_to_task("index_wiki_1");

        assert_eq!(store.location().path(), "/tasks");
        assert_eq!(store.current().target_task_id.as_deref(), Some("index_wiki_1"));

        advance(DELAY).await;
        assert!(store.current().is_empty());
        assert_eq!(store.location().path(), "/tasks");
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_setter_targets_its_view() {
        let store = store();

        store.go_to_segments(String::from("wikipedia"));
        assert_eq!(store.location().path(), "/segments");
        assert_eq!(
            store.current().target_datasource_filter.as_deref(),
            Some("\"wikipedia\"")
        );

        store.show_unavailable_segments();
        assert_eq!(store.location().path(), "/segments");
        assert!(store.current().only_show_unavailable_segments);

        store.query_with_sql("SELECT 1");
        assert_eq!(store.location().path(), "/query");
        assert_eq!(store.current().initial_sql_text.as_deref(), Some("SELECT 1"));

        store.go_to_middle_manager("mm-1:8091");
        assert_eq!(store.location().path(), "/servers");
        assert_eq!(
            store.current().target_middle_manager_host.as_deref(),
            Some("mm-1:8091")
        );

        advance(DELAY).await;
        assert!(store.current().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fields_set_in_quick_succession_coexist() {
        let store = store();
        store.go_to_segments("wikipedia");
        store.show_unavailable_segments();

        let intent = store.current();
        assert!(intent.target_datasource_filter.is_some());
        assert!(intent.only_show_unavailable_segments);
    }

    #[tokio::test(start_paused = true)]
    async fn test_field_survives_until_delay_elapses() {
        let store = store();
        store.go_to_task("t1");

        advance(DELAY - Duration::from_millis(1)).await;
        assert_eq!(store.current().target_task_id.as_deref(), Some("t1"));

        advance(Duration::from_millis(1)).await;
        assert_eq!(store.current().target_task_id, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rewrite_extends_lifetime_of_field() {
        let store = store();
        store.go_to_task("t1");
        advance(Duration::from_millis(30)).await;
        store.go_to_task("t2");

        advance(Duration::from_millis(30)).await;
        assert_eq!(store.current().target_task_id.as_deref(), Some("t2"));

        advance(Duration::from_millis(20)).await;
        assert_eq!(store.current().target_task_id, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resets_are_per_field() {
        let store = store();
        store.go_to_task("t1");
        advance(Duration::from_millis(30)).await;
        store.query_with_sql("SELECT 2");

        advance(Duration::from_millis(20)).await;
        let intent = store.current();
        assert_eq!(intent.target_task_id, None);
        assert_eq!(intent.initial_sql_text.as_deref(), Some("SELECT 2"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_drops_pending_intent() {
        let store = store();
        store.go_to_middle_manager("mm-2:8091");
        store.shutdown();

        assert!(store.current().is_empty());
        advance(DELAY * 2).await;
        assert!(store.current().is_empty());
    }
}
