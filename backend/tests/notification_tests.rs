//! Tests for reschedule notification dispatch.

mod support;

use std::sync::Arc;

use ems_rust::api::{
    AutoRescheduled, EventId, MovedOccurrence, SeriesGenerationResult, UserId,
};
use ems_rust::db::repository::UserProfile;
use ems_rust::db::LocalUserDirectory;
use ems_rust::notify::RescheduleNotifier;

use support::*;

fn result_with_move() -> SeriesGenerationResult {
    SeriesGenerationResult {
        success: true,
        series_ids: vec![EventId::new(1), EventId::new(2)],
        first_event_id: EventId::new(1),
        auto_rescheduled: Some(AutoRescheduled {
            moved: vec![MovedOccurrence {
                index: 2,
                original_date: date(2024, 1, 15),
                new_date: date(2024, 1, 16),
                offset_days: 1,
            }],
            skipped: vec![],
        }),
    }
}

fn result_without_adjustments() -> SeriesGenerationResult {
    SeriesGenerationResult {
        success: true,
        series_ids: vec![EventId::new(1), EventId::new(2)],
        first_event_id: EventId::new(1),
        auto_rescheduled: None,
    }
}

#[tokio::test]
async fn test_no_adjustments_means_no_dispatch() {
    let directory = directory_with_organizers();
    let messages = RecordingMessageSender::new();
    let email = RecordingEmailSender::new();

    RescheduleNotifier::new(directory.as_ref(), &messages, &email)
        .notify(&result_without_adjustments(), &dinner_template(), &actor())
        .await;

    assert!(messages.messages().is_empty());
    assert!(email.emails().is_empty());
}

#[tokio::test]
async fn test_user_without_email_stays_in_system_message() {
    let directory = Arc::new(LocalUserDirectory::new());
    directory.insert_user(UserProfile {
        id: ORGANIZER,
        username: "organizer".to_string(),
        display_name: Some("Olga Organizer".to_string()),
        email: Some("olga@example.org".to_string()),
    });
    // Co-organizer has no email address on record.
    directory.insert_user(UserProfile {
        id: CO_ORGANIZER,
        username: "cohost".to_string(),
        display_name: None,
        email: None,
    });
    let messages = RecordingMessageSender::new();
    let email = RecordingEmailSender::new();

    RescheduleNotifier::new(directory.as_ref(), &messages, &email)
        .notify(&result_with_move(), &dinner_template(), &actor())
        .await;

    let sent = messages.messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipients, vec![ORGANIZER, CO_ORGANIZER]);
    assert_eq!(sent[0].actor, ORGANIZER);

    // Only the organizer had an address to email.
    let emails = email.emails();
    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0].address, "olga@example.org");
    assert_eq!(emails[0].display_name, "Olga Organizer");
    assert!(emails[0].content.contains("2024-01-16"));
}

#[tokio::test]
async fn test_unresolvable_co_organizer_is_skipped() {
    let directory = Arc::new(LocalUserDirectory::new());
    directory.insert_user(UserProfile {
        id: ORGANIZER,
        username: "organizer".to_string(),
        display_name: None,
        email: Some("olga@example.org".to_string()),
    });
    // CO_ORGANIZER deliberately not registered.
    let messages = RecordingMessageSender::new();
    let email = RecordingEmailSender::new();

    RescheduleNotifier::new(directory.as_ref(), &messages, &email)
        .notify(&result_with_move(), &dinner_template(), &actor())
        .await;

    let sent = messages.messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipients, vec![ORGANIZER]);
    // Display-name fallback: no display name on record, username is used.
    assert_eq!(email.emails()[0].display_name, "organizer");
}

#[tokio::test]
async fn test_nobody_resolvable_sends_nothing() {
    let directory = LocalUserDirectory::new();
    let messages = RecordingMessageSender::new();
    let email = RecordingEmailSender::new();

    RescheduleNotifier::new(&directory, &messages, &email)
        .notify(&result_with_move(), &dinner_template(), &actor())
        .await;

    assert!(messages.messages().is_empty());
    assert!(email.emails().is_empty());
}

#[tokio::test]
async fn test_duplicate_organizer_ids_notified_once() {
    let directory = directory_with_organizers();
    let messages = RecordingMessageSender::new();
    let email = RecordingEmailSender::new();

    let mut template = dinner_template();
    // Organizer also listed as their own co-organizer.
    template.co_organizers = vec![ORGANIZER, CO_ORGANIZER];

    RescheduleNotifier::new(directory.as_ref(), &messages, &email)
        .notify(&result_with_move(), &template, &actor())
        .await;

    let sent = messages.messages();
    assert_eq!(sent[0].recipients, vec![ORGANIZER, CO_ORGANIZER]);
    assert_eq!(email.emails().len(), 2);
}

#[tokio::test]
async fn test_empty_adjustments_struct_is_treated_as_none() {
    let directory = directory_with_organizers();
    let messages = RecordingMessageSender::new();
    let email = RecordingEmailSender::new();

    let mut result = result_without_adjustments();
    result.auto_rescheduled = Some(AutoRescheduled::default());

    RescheduleNotifier::new(directory.as_ref(), &messages, &email)
        .notify(&result, &dinner_template(), &actor())
        .await;

    assert!(messages.messages().is_empty());
}

#[tokio::test]
async fn test_actor_attribution_passes_through() {
    let directory = directory_with_organizers();
    let messages = RecordingMessageSender::new();
    let email = RecordingEmailSender::new();

    let admin = ems_rust::api::Actor {
        id: UserId::new(99),
        username: "admin".to_string(),
    };
    RescheduleNotifier::new(directory.as_ref(), &messages, &email)
        .notify(&result_with_move(), &dinner_template(), &admin)
        .await;

    assert_eq!(messages.messages()[0].actor, UserId::new(99));
}
