//! User directory service — validation, audit stamping, and validity
//! rules over a [`UserStore`].

use chrono::Utc;
use portico_core::DirectoryResult;
use portico_core::error::DirectoryError;
use portico_core::models::actor::Actor;
use portico_core::models::user::User;
use portico_core::query::{SearchQuery, SearchResult};
use portico_core::store::UserStore;
use uuid::Uuid;

/// Directory service for users.
///
/// Generic over the store implementation so the service layer has no
/// dependency on the database crate.
pub struct UserService<S: UserStore> {
    store: S,
}

impl<S: UserStore> UserService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Fetch a user by id.
    ///
    /// An empty id is rejected before the store is touched: a
    /// malformed request must not cost a backend round trip or
    /// masquerade as "not found". The record is returned regardless
    /// of enabled/expiry state — administrative callers need
    /// inactive users too; validity is judged via
    /// [`User::is_active`].
    pub async fn get(&self, id: &str) -> DirectoryResult<User> {
        if id.is_empty() {
            return Err(DirectoryError::validation("user id must not be empty"));
        }
        self.store.get(id).await
    }

    /// Fetch the first user matching an email within a project.
    pub async fn get_by_email(&self, project_id: &str, email: &str) -> DirectoryResult<User> {
        if project_id.is_empty() {
            return Err(DirectoryError::validation("project id must not be empty"));
        }
        if email.is_empty() {
            return Err(DirectoryError::validation("email must not be empty"));
        }
        self.store.get_by_email(project_id, email).await
    }

    /// Search users. Pure pass-through today; this is the seam where
    /// an "active users only" restriction would be injected.
    pub async fn search(&self, query: SearchQuery) -> DirectoryResult<SearchResult<User>> {
        self.store.search(query).await
    }

    /// Create a user.
    ///
    /// Generates an id when the caller left it empty, stamps the
    /// create-audit fields from the supplied actor, and clears any
    /// caller-supplied update stamps.
    pub async fn create(&self, actor: &Actor, mut user: User) -> DirectoryResult<User> {
        if user.project_id.is_empty() {
            return Err(DirectoryError::validation(
                "user project id must not be empty",
            ));
        }
        if user.id.is_empty() {
            user.id = Uuid::new_v4().to_string();
        }

        user.created_at = Some(Utc::now());
        user.created_by = actor.id.clone();
        user.updated_at = None;
        user.updated_by = String::new();

        self.store.create(user).await
    }

    /// Update a user.
    ///
    /// `id` and `project_id` are immutable: the stored original is
    /// fetched first and a project reassignment is rejected. The
    /// original create-audit stamps are carried forward so callers
    /// cannot tamper with them; update stamps come from the actor.
    pub async fn update(&self, actor: &Actor, mut user: User) -> DirectoryResult<User> {
        if user.id.is_empty() {
            return Err(DirectoryError::validation("user id must not be empty"));
        }
        if user.project_id.is_empty() {
            return Err(DirectoryError::validation(
                "user project id must not be empty",
            ));
        }

        let original = self.store.get(&user.id).await?;
        if user.project_id != original.project_id {
            return Err(DirectoryError::validation(
                "user cannot be moved to a different project",
            ));
        }

        user.created_at = original.created_at;
        user.created_by = original.created_by;
        user.updated_at = Some(Utc::now());
        user.updated_by = actor.id.clone();

        self.store.update(user).await
    }

    /// Administrative enable/disable toggle.
    ///
    /// The only transition in the validity state machine that is a
    /// write; expiry-based deactivation is a read-time judgment.
    pub async fn set_enabled(&self, actor: &Actor, id: &str, enabled: bool) -> DirectoryResult<User> {
        let mut user = self.get(id).await?;
        user.enabled = enabled;
        self.update(actor, user).await
    }
}
