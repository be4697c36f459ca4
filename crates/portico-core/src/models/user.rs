//! User domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A directory user, scoped to exactly one project.
///
/// Email and phone uniqueness is not enforced at this layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, assigned at creation and immutable.
    pub id: String,
    /// Owning project. Immutable after creation.
    pub project_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Administrative gate. Disabled users are excluded from active
    /// lookup paths. Defaults to `false`: a freshly defaulted record
    /// stays disabled until an administrator enables it.
    pub enabled: bool,
    /// `None` means the account never expires. An expiry in the past
    /// makes the user inactive regardless of `enabled`.
    pub expiry: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: String,
}

impl User {
    /// Whether the user is active right now.
    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }

    /// Active predicate: `enabled` and not expired at `now`.
    ///
    /// Evaluated on every read so expiry takes effect immediately,
    /// without a background sweep. Expiry is a read-time judgment:
    /// an expired user remains `enabled = true` in storage, and
    /// extending the expiry reactivates the record with no write
    /// beyond the update itself.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.enabled && self.expiry.is_none_or(|expiry| expiry > now)
    }
}
