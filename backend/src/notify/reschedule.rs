//! Reschedule summary composition and best-effort dispatch.
//!
//! Invoked once per generation call, after all persistence, and only when at
//! least one occurrence was moved or skipped. One in-app system message goes
//! to every resolvable organizer; one email goes to each resolvable address.
//! Every failure is caught and logged individually and never reaches the
//! caller.

use log::{debug, warn};

use crate::api::{Actor, AutoRescheduled, OccurrenceTemplate, SeriesGenerationResult, UserId};
use crate::db::repository::UserDirectory;

use super::senders::{EmailSender, SystemMessageSender};
use super::users::{display_name, resolve_recipients};

/// Render the adjustment summary sent to organizers.
pub fn summarize_adjustments(title: &str, adjustments: &AutoRescheduled) -> String {
    let mut lines = vec![format!(
        "Some occurrences of \"{}\" were adjusted automatically to avoid scheduling conflicts.",
        title
    )];
    for moved in &adjustments.moved {
        let unit = if moved.offset_days == 1 { "day" } else { "days" };
        lines.push(format!(
            "- Occurrence #{} moved from {} to {} (+{} {}).",
            moved.index, moved.original_date, moved.new_date, moved.offset_days, unit
        ));
    }
    for skipped in &adjustments.skipped {
        lines.push(format!(
            "- Occurrence #{} on {} could not be scheduled and was left out of the series.",
            skipped.index, skipped.original_date
        ));
    }
    lines.join("\n")
}

/// Dispatches the adjustment summary to the creator and co-organizers.
pub struct RescheduleNotifier<'a> {
    users: &'a dyn UserDirectory,
    messages: &'a dyn SystemMessageSender,
    email: &'a dyn EmailSender,
}

impl<'a> RescheduleNotifier<'a> {
    pub fn new(
        users: &'a dyn UserDirectory,
        messages: &'a dyn SystemMessageSender,
        email: &'a dyn EmailSender,
    ) -> Self {
        Self {
            users,
            messages,
            email,
        }
    }

    /// Notify organizers about the adjustments in `result`, best-effort.
    ///
    /// No-op when nothing was rescheduled.
    pub async fn notify(
        &self,
        result: &SeriesGenerationResult,
        template: &OccurrenceTemplate,
        actor: &Actor,
    ) {
        let Some(adjustments) = result
            .auto_rescheduled
            .as_ref()
            .filter(|summary| !summary.is_empty())
        else {
            return;
        };

        let content = summarize_adjustments(&template.title, adjustments);
        let recipients = resolve_recipients(
            self.users,
            std::iter::once(template.organizer).chain(template.co_organizers.iter().copied()),
        )
        .await;
        if recipients.is_empty() {
            warn!(
                "No resolvable organizers for \"{}\"; reschedule summary not delivered",
                template.title
            );
            return;
        }

        let recipient_ids: Vec<UserId> = recipients.iter().map(|p| p.id).collect();
        if let Err(e) = self
            .messages
            .send_system_message(&content, &recipient_ids, actor)
            .await
        {
            warn!("System message dispatch failed: {}", e);
        }

        for profile in &recipients {
            let Some(address) = profile.email.as_deref().filter(|a| !a.trim().is_empty()) else {
                debug!(
                    "User {} has no usable email; in-app notification only",
                    profile.id
                );
                continue;
            };
            match self
                .email
                .send_notification_email(address, display_name(profile), &content)
                .await
            {
                Ok(true) => {}
                Ok(false) => warn!("Email to {} was declined by the transport", address),
                Err(e) => warn!("Email to {} failed: {}", address, e),
            }
        }
    }
}
