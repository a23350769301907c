//! Notification dispatch for series adjustments.
//!
//! Everything in this module is best-effort: lookup and transport failures
//! are logged and swallowed, never propagated into the generation result.
//!
//! - [`senders`]: transport traits for in-app messages and email
//! - [`users`]: recipient resolution and the display-name fallback policy
//! - [`reschedule`]: summary composition and dispatch

pub mod reschedule;
pub mod senders;
pub mod users;

pub use reschedule::{summarize_adjustments, RescheduleNotifier};
pub use senders::{EmailSender, SystemMessageSender};
pub use users::display_name;
