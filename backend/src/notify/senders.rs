//! Transport traits for notification delivery.
//!
//! Both transports are injected at the composition root (the production mail
//! client is an explicitly constructed dependency, not an ambient singleton)
//! and are independently fallible per call.

use async_trait::async_trait;

use crate::api::{Actor, UserId};

/// In-app system message delivery.
#[async_trait]
pub trait SystemMessageSender: Send + Sync {
    /// Send one system message to a set of recipients, attributed to `actor`.
    async fn send_system_message(
        &self,
        content: &str,
        recipients: &[UserId],
        actor: &Actor,
    ) -> anyhow::Result<()>;
}

/// Transactional email delivery.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send one notification email.
    ///
    /// Returns `Ok(false)` when the transport accepted the call but declined
    /// delivery (e.g. a suppressed address).
    async fn send_notification_email(
        &self,
        address: &str,
        display_name: &str,
        content: &str,
    ) -> anyhow::Result<bool>;
}
