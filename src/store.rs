//! The log store: authoritative in-memory state for work logs and the
//! repository registry.
//!
//! The store hydrates once from its [`KeyValueStore`] and persists the full
//! snapshot after every mutation. Reads never touch storage.
//!
//! Mutations always take effect in memory. When they return `Err`, only
//! the durable write failed; the store stays consistent for the rest of
//! the process.

use std::collections::HashSet;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::model::{
    Query, RepoFilter, SortKey, SortOrder, StatusFilter, WorkLog, WorkLogFormData, WorkLogPatch,
};
use crate::storage::{self, KeyValueStore, Snapshot};

/// Source of "now" in epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        jiff::Timestamp::now().as_millisecond()
    }
}

pub struct LogStore {
    logs: Vec<WorkLog>,
    repositories: Vec<String>,
    app_title: String,
    query: Query,
    editing: Option<String>,
    backend: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
}

impl LogStore {
    /// Hydrates a store from `backend`.
    ///
    /// Falls back to `seed` when nothing is stored or the stored snapshot
    /// can't be read. Read failures are logged, not returned. An unreadable
    /// snapshot is copied to [`storage::BACKUP_KEY`] before the next save
    /// can replace it.
    pub fn open(mut backend: Box<dyn KeyValueStore>, seed: Snapshot) -> Self {
        let snapshot = match storage::load_snapshot(&*backend) {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                debug!("no stored snapshot; starting from defaults");
                seed
            }
            Err(e) => {
                warn!(error = %e, "stored snapshot is unreadable; starting from defaults");
                match storage::back_up_snapshot(&mut *backend) {
                    Ok(true) => warn!(key = storage::BACKUP_KEY, "kept unreadable snapshot"),
                    Ok(false) => {}
                    Err(e) => warn!(error = %e, "failed to back up unreadable snapshot"),
                }
                seed
            }
        };

        Self {
            logs: snapshot.logs,
            repositories: snapshot.repositories,
            app_title: snapshot.app_title,
            query: Query::default(),
            editing: None,
            backend,
            clock: Box::new(SystemClock),
        }
    }

    /// Replaces the clock used for timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Gives back the storage backend, dropping in-memory state.
    pub fn into_backend(self) -> Box<dyn KeyValueStore> {
        self.backend
    }

    // ── Reads ──

    /// All logs in collection order (most recently added first).
    pub fn logs(&self) -> &[WorkLog] {
        &self.logs
    }

    pub fn get(&self, id: &str) -> Option<&WorkLog> {
        self.logs.iter().find(|log| log.id == id)
    }

    /// Known repository names in registration order.
    pub fn repositories(&self) -> &[String] {
        &self.repositories
    }

    pub fn app_title(&self) -> &str {
        &self.app_title
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Id of the log currently being edited, if any.
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// The logs passing the current query, sorted by its key and order.
    pub fn filtered_logs(&self) -> Vec<&WorkLog> {
        self.query.apply(&self.logs)
    }

    /// The persistable subset of state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            logs: self.logs.clone(),
            repositories: self.repositories.clone(),
            app_title: self.app_title.clone(),
        }
    }

    // ── Log mutations ──

    /// Creates a log from form input with a fresh id, inserted at the head.
    ///
    /// Input is not validated here; see [`crate::form`].
    pub fn add(&mut self, data: WorkLogFormData) -> storage::Result<WorkLog> {
        let log = WorkLog::from_form(Uuid::new_v4().to_string(), data, self.clock.now_ms());
        debug!(id = %log.id, "adding work log");
        self.logs.insert(0, log.clone());
        self.persist()?;
        Ok(log)
    }

    /// Merges `patch` into the log with `id` and bumps its `updated_at`.
    ///
    /// Returns `false` if no log matches; that is not an error. Either way
    /// the edit marker is cleared.
    pub fn update(&mut self, id: &str, patch: WorkLogPatch) -> storage::Result<bool> {
        self.editing = None;
        let now = self.clock.now_ms();
        let Some(log) = self.logs.iter_mut().find(|log| log.id == id) else {
            debug!(id, "update ignored: no such work log");
            return Ok(false);
        };
        log.apply(patch, now);
        self.persist()?;
        Ok(true)
    }

    /// Removes the log with `id`. Returns `false` if none matched.
    pub fn delete(&mut self, id: &str) -> storage::Result<bool> {
        let before = self.logs.len();
        self.logs.retain(|log| log.id != id);
        if self.logs.len() == before {
            debug!(id, "delete ignored: no such work log");
            return Ok(false);
        }
        if self.editing.as_deref() == Some(id) {
            self.editing = None;
        }
        self.persist()?;
        Ok(true)
    }

    /// Prepends imported logs, keeping their order.
    ///
    /// Existing entries always win: an imported log whose id is already
    /// present is dropped, as is any repeat of an id within `incoming`.
    /// Ids and timestamps are kept verbatim. Returns the number inserted.
    pub fn import(&mut self, incoming: Vec<WorkLog>) -> storage::Result<usize> {
        let mut seen: HashSet<String> = self.logs.iter().map(|log| log.id.clone()).collect();
        let fresh: Vec<WorkLog> = incoming
            .into_iter()
            .filter(|log| seen.insert(log.id.clone()))
            .collect();

        let count = fresh.len();
        debug!(count, "importing work logs");
        if count > 0 {
            self.logs.splice(0..0, fresh);
            self.persist()?;
        }
        Ok(count)
    }

    // ── Repository registry ──

    /// Appends `name` to the registry. Returns `false` if it was already known.
    pub fn add_repository(&mut self, name: &str) -> storage::Result<bool> {
        if self.repositories.iter().any(|r| r == name) {
            return Ok(false);
        }
        self.repositories.push(name.to_string());
        self.persist()?;
        Ok(true)
    }

    /// Removes `name` from the registry. Logs referencing it are untouched.
    pub fn delete_repository(&mut self, name: &str) -> storage::Result<bool> {
        let before = self.repositories.len();
        self.repositories.retain(|r| r != name);
        if self.repositories.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    // ── View state ──

    pub fn set_search_query(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.query.status = status;
    }

    pub fn set_repo_filter(&mut self, repository: RepoFilter) {
        self.query.repository = repository;
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.query.sort_key = key;
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.query.sort_order = order;
    }

    pub fn set_editing(&mut self, id: Option<String>) {
        self.editing = id;
    }

    /// Sets the display title. The title is part of the snapshot, so this persists.
    pub fn set_app_title(&mut self, title: impl Into<String>) -> storage::Result<()> {
        self.app_title = title.into();
        self.persist()
    }

    fn persist(&mut self) -> storage::Result<()> {
        let snapshot = self.snapshot();
        storage::save_snapshot(&mut *self.backend, &snapshot).inspect_err(|e| {
            warn!(error = %e, "failed to persist work logs; changes are kept in memory only");
        })
    }
}
