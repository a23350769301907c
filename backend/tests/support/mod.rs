//! Shared fixtures and recording fakes for integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use ems_rust::api::{
    Actor, ConflictingEventRef, EventId, Frequency, OccurrenceFields, OccurrenceTemplate,
    RecurringConfig, UserId,
};
use ems_rust::db::repository::{
    ConflictQuery, EventPersister, RepositoryError, RepositoryResult, UserProfile,
};
use ems_rust::db::{LocalEventStore, LocalUserDirectory};
use ems_rust::notify::{EmailSender, SystemMessageSender};
use ems_rust::scheduler::SchedulerConfig;
use ems_rust::services::SeriesService;

pub const ORGANIZER: UserId = UserId(1);
pub const CO_ORGANIZER: UserId = UserId(2);

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// Evening-event template anchored at 2024-01-01, 18:00–21:00 UTC.
pub fn dinner_template() -> OccurrenceTemplate {
    OccurrenceTemplate {
        title: "Community Dinner".to_string(),
        description: "Monthly community dinner".to_string(),
        location: "Main hall".to_string(),
        base_date: date(2024, 1, 1),
        base_end_date: Some(date(2024, 1, 1)),
        start_time: time(18, 0),
        end_time: time(21, 0),
        timezone: "UTC".to_string(),
        organizer: ORGANIZER,
        co_organizers: vec![CO_ORGANIZER],
    }
}

pub fn biweekly(count: u32) -> RecurringConfig {
    RecurringConfig {
        is_recurring: true,
        frequency: Frequency::Biweekly,
        occurrence_count: count,
    }
}

pub fn actor() -> Actor {
    Actor {
        id: ORGANIZER,
        username: "organizer".to_string(),
    }
}

/// Seed the anchor occurrence (the caller persists it before generation).
pub fn seed_anchor(store: &LocalEventStore) -> EventId {
    store
        .seed_event("Community Dinner", evening(2024, 1, 1), evening_end(2024, 1, 1))
        .unwrap()
}

/// Occupy the template's 18:00–21:00 slot on a given day.
pub fn block_evening(store: &LocalEventStore, y: i32, m: u32, d: u32) -> EventId {
    store
        .seed_event(
            format!("booked-{:04}-{:02}-{:02}", y, m, d),
            evening(y, m, d),
            evening_end(y, m, d),
        )
        .unwrap()
}

pub fn evening(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 18, 0, 0).unwrap()
}

pub fn evening_end(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 21, 0, 0).unwrap()
}

/// Directory with the organizer and co-organizer registered.
pub fn directory_with_organizers() -> Arc<LocalUserDirectory> {
    let directory = Arc::new(LocalUserDirectory::new());
    directory.insert_user(UserProfile {
        id: ORGANIZER,
        username: "organizer".to_string(),
        display_name: Some("Olga Organizer".to_string()),
        email: Some("olga@example.org".to_string()),
    });
    directory.insert_user(UserProfile {
        id: CO_ORGANIZER,
        username: "cohost".to_string(),
        display_name: None,
        email: Some("cohost@example.org".to_string()),
    });
    directory
}

/// Event store whose Nth `persist_occurrence` call fails (1-based), with
/// conflict queries and all other writes delegated to the wrapped store.
#[derive(Debug)]
pub struct FailingNthPersister {
    inner: Arc<LocalEventStore>,
    fail_call: usize,
    calls: Mutex<usize>,
}

impl FailingNthPersister {
    pub fn new(inner: Arc<LocalEventStore>, fail_call: usize) -> Self {
        Self {
            inner,
            fail_call,
            calls: Mutex::new(0),
        }
    }
}

#[async_trait]
impl ConflictQuery for FailingNthPersister {
    async fn find_conflicting_events(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<ConflictingEventRef>> {
        self.inner.find_conflicting_events(start, end).await
    }
}

#[async_trait]
impl EventPersister for FailingNthPersister {
    async fn persist_occurrence(&self, fields: &OccurrenceFields) -> RepositoryResult<EventId> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            *calls
        };
        if call == self.fail_call {
            return Err(RepositoryError::connection("event store write timed out"));
        }
        self.inner.persist_occurrence(fields).await
    }
}

#[derive(Debug, Clone)]
pub struct SentMessage {
    pub content: String,
    pub recipients: Vec<UserId>,
    pub actor: UserId,
}

/// Recording in-app message sender; optionally fails every send.
#[derive(Debug, Default)]
pub struct RecordingMessageSender {
    pub sent: Mutex<Vec<SentMessage>>,
    pub fail: bool,
}

impl RecordingMessageSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn messages(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SystemMessageSender for RecordingMessageSender {
    async fn send_system_message(
        &self,
        content: &str,
        recipients: &[UserId],
        actor: &Actor,
    ) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("message bus unavailable");
        }
        self.sent.lock().unwrap().push(SentMessage {
            content: content.to_string(),
            recipients: recipients.to_vec(),
            actor: actor.id,
        });
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub address: String,
    pub display_name: String,
    pub content: String,
}

/// Recording email sender; optionally fails for one address.
#[derive(Debug, Default)]
pub struct RecordingEmailSender {
    pub sent: Mutex<Vec<SentEmail>>,
    pub fail_for: Option<String>,
}

impl RecordingEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(address: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_for: Some(address.to_string()),
        }
    }

    pub fn emails(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send_notification_email(
        &self,
        address: &str,
        display_name: &str,
        content: &str,
    ) -> anyhow::Result<bool> {
        if self.fail_for.as_deref() == Some(address) {
            anyhow::bail!("smtp rejected recipient");
        }
        self.sent.lock().unwrap().push(SentEmail {
            address: address.to_string(),
            display_name: display_name.to_string(),
            content: content.to_string(),
        });
        Ok(true)
    }
}

/// Wire a service around the given store with default search windows.
pub fn service(
    store: Arc<LocalEventStore>,
    directory: Arc<LocalUserDirectory>,
    messages: Arc<RecordingMessageSender>,
    email: Arc<RecordingEmailSender>,
) -> SeriesService {
    SeriesService::new(store, directory, messages, email)
}

/// Same wiring with explicit window/ceiling settings.
pub fn service_with_config(
    store: Arc<LocalEventStore>,
    directory: Arc<LocalUserDirectory>,
    messages: Arc<RecordingMessageSender>,
    email: Arc<RecordingEmailSender>,
    config: SchedulerConfig,
) -> SeriesService {
    SeriesService::with_config(store, directory, messages, email, config)
}
