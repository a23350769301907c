//! Recipient resolution and fallback policy.

use log::warn;

use crate::api::UserId;
use crate::db::repository::{UserDirectory, UserProfile};

/// The single display-name fallback policy: a missing or blank display name
/// falls back to the username.
pub fn display_name(profile: &UserProfile) -> &str {
    profile
        .display_name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(&profile.username)
}

/// Resolve user ids to profiles, preserving order and dropping duplicates.
///
/// Lookup failures and unknown ids are logged and skipped; resolution never
/// fails as a whole.
pub async fn resolve_recipients(
    directory: &dyn UserDirectory,
    ids: impl IntoIterator<Item = UserId>,
) -> Vec<UserProfile> {
    let mut seen = Vec::new();
    let mut profiles = Vec::new();
    for id in ids {
        if seen.contains(&id) {
            continue;
        }
        seen.push(id);
        match directory.find_user(id).await {
            Ok(Some(profile)) => profiles.push(profile),
            Ok(None) => warn!("User {} not found; skipping notification", id),
            Err(e) => warn!("User lookup failed for {}: {}", id, e),
        }
    }
    profiles
}
