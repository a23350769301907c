//! In-memory event store and user directory.
//!
//! `LocalEventStore` backs unit tests and local development: it keeps every
//! persisted occurrence in memory and answers overlap queries against them,
//! which makes it a faithful stand-in for the production store's contract
//! that siblings persisted earlier in a call are visible to later conflict
//! checks.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::api::{ConflictingEventRef, EventId, OccurrenceFields, UserId};
use crate::db::repository::{
    ConflictQuery, EventPersister, RepositoryError, RepositoryResult, UserDirectory, UserProfile,
};
use crate::models::time;

#[derive(Debug, Clone)]
struct StoredEvent {
    id: EventId,
    title: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Debug)]
struct StoreInner {
    next_id: i64,
    events: Vec<StoredEvent>,
}

/// In-memory implementation of [`ConflictQuery`] and [`EventPersister`].
#[derive(Debug)]
pub struct LocalEventStore {
    // Guarded sections never await; a std mutex is fine under async callers.
    inner: Mutex<StoreInner>,
}

impl LocalEventStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                next_id: 1,
                events: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> RepositoryResult<std::sync::MutexGuard<'_, StoreInner>> {
        self.inner
            .lock()
            .map_err(|_| RepositoryError::internal("event store mutex poisoned"))
    }

    /// Seed a pre-existing booking directly by its UTC interval.
    ///
    /// Used to arrange conflicts in tests and local development.
    pub fn seed_event(
        &self,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<EventId> {
        let mut inner = self.lock()?;
        let id = EventId::new(inner.next_id);
        inner.next_id += 1;
        inner.events.push(StoredEvent {
            id,
            title: title.into(),
            start,
            end,
        });
        Ok(id)
    }

    /// Number of events currently stored.
    pub fn event_count(&self) -> usize {
        self.lock().map(|inner| inner.events.len()).unwrap_or(0)
    }

    /// Stored UTC start instants, in persistence order.
    pub fn event_starts(&self) -> Vec<DateTime<Utc>> {
        self.lock()
            .map(|inner| inner.events.iter().map(|e| e.start).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ConflictQuery for LocalEventStore {
    async fn find_conflicting_events(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<ConflictingEventRef>> {
        let inner = self.lock()?;
        Ok(inner
            .events
            .iter()
            .filter(|e| e.start < end && e.end > start)
            .map(|e| ConflictingEventRef {
                id: e.id,
                title: e.title.clone(),
                start: e.start,
                end: e.end,
            })
            .collect())
    }
}

#[async_trait]
impl EventPersister for LocalEventStore {
    async fn persist_occurrence(&self, fields: &OccurrenceFields) -> RepositoryResult<EventId> {
        let tz = time::parse_timezone(&fields.timezone).ok_or_else(|| {
            RepositoryError::validation(format!("unknown timezone: {}", fields.timezone))
        })?;
        let start = time::wall_clock_to_instant(fields.start_date, fields.start_time, tz);
        let end = time::wall_clock_to_instant(fields.end_date, fields.end_time, tz);
        if end <= start {
            return Err(RepositoryError::validation(format!(
                "occurrence {} ends before it starts",
                fields.series_index
            )));
        }

        let mut inner = self.lock()?;
        let id = EventId::new(inner.next_id);
        inner.next_id += 1;
        inner.events.push(StoredEvent {
            id,
            title: fields.title.clone(),
            start,
            end,
        });
        Ok(id)
    }
}

/// In-memory implementation of [`UserDirectory`].
#[derive(Debug, Default)]
pub struct LocalUserDirectory {
    users: Mutex<HashMap<UserId, UserProfile>>,
}

impl LocalUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user profile.
    pub fn insert_user(&self, profile: UserProfile) {
        if let Ok(mut users) = self.users.lock() {
            users.insert(profile.id, profile);
        }
    }
}

#[async_trait]
impl UserDirectory for LocalUserDirectory {
    async fn find_user(&self, id: UserId) -> RepositoryResult<Option<UserProfile>> {
        let users = self
            .users
            .lock()
            .map_err(|_| RepositoryError::internal("user directory mutex poisoned"))?;
        Ok(users.get(&id).cloned())
    }
}
