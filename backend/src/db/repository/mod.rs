//! Collaborator traits for the series-generation subsystem.
//!
//! Persistence, conflict querying, and user resolution live behind narrow
//! traits so the orchestrator stays free of storage-layer concerns and is
//! testable against fakes. Implementations must be `Send + Sync` to work with
//! async Rust.

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::api::{ConflictingEventRef, EventId, OccurrenceFields, UserId};

/// Query for events overlapping a candidate time interval.
///
/// Implementations must reflect occurrences persisted earlier in the same
/// generation call, so siblings of a series cannot double-book each other.
#[async_trait]
pub trait ConflictQuery: Send + Sync {
    /// Return every scheduled event whose interval overlaps `[start, end)`.
    async fn find_conflicting_events(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<ConflictingEventRef>>;
}

/// Durable persistence for a single occurrence.
#[async_trait]
pub trait EventPersister: Send + Sync {
    /// Persist one fully-specified occurrence and return its identifier.
    ///
    /// The write must be durable before this returns; the orchestrator relies
    /// on later conflict checks seeing it.
    async fn persist_occurrence(&self, fields: &OccurrenceFields) -> RepositoryResult<EventId>;
}

/// Combined event-store interface used by the series orchestrator.
pub trait EventRepository: ConflictQuery + EventPersister {
    /// View this repository as its conflict-query facet.
    fn as_conflict_query(&self) -> &dyn ConflictQuery;
}

impl<T: ConflictQuery + EventPersister> EventRepository for T {
    fn as_conflict_query(&self) -> &dyn ConflictQuery {
        self
    }
}

/// Notification-relevant view of a user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

/// Lookup of organizer and co-organizer records for notification dispatch.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve a user id to its profile, or `None` if no such user exists.
    async fn find_user(&self, id: UserId) -> RepositoryResult<Option<UserProfile>>;
}
