//! Resource directory service — validation and audit stamping over a
//! [`ResourceStore`].

use chrono::Utc;
use portico_core::DirectoryResult;
use portico_core::error::DirectoryError;
use portico_core::models::actor::Actor;
use portico_core::models::resource::Resource;
use portico_core::query::{SearchQuery, SearchResult};
use portico_core::store::ResourceStore;
use uuid::Uuid;

/// Directory service for resources.
pub struct ResourceService<S: ResourceStore> {
    store: S,
}

impl<S: ResourceStore> ResourceService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Fetch a resource by id. Empty ids are rejected before the
    /// store is touched.
    pub async fn get(&self, id: &str) -> DirectoryResult<Resource> {
        if id.is_empty() {
            return Err(DirectoryError::validation("resource id must not be empty"));
        }
        self.store.get(id).await
    }

    /// Search resources. Pure pass-through; the seam for future
    /// cross-cutting filters.
    pub async fn search(&self, query: SearchQuery) -> DirectoryResult<SearchResult<Resource>> {
        self.store.search(query).await
    }

    /// Create a resource: id generation and create-audit stamping.
    pub async fn create(&self, actor: &Actor, mut resource: Resource) -> DirectoryResult<Resource> {
        if resource.project_id.is_empty() {
            return Err(DirectoryError::validation(
                "resource project id must not be empty",
            ));
        }
        if resource.id.is_empty() {
            resource.id = Uuid::new_v4().to_string();
        }

        resource.created_at = Some(Utc::now());
        resource.created_by = actor.id.clone();
        resource.updated_at = None;
        resource.updated_by = String::new();

        self.store.create(resource).await
    }

    /// Update a resource. `id` and `project_id` are immutable; the
    /// original create-audit stamps are carried forward.
    pub async fn update(&self, actor: &Actor, mut resource: Resource) -> DirectoryResult<Resource> {
        if resource.id.is_empty() {
            return Err(DirectoryError::validation("resource id must not be empty"));
        }
        if resource.project_id.is_empty() {
            return Err(DirectoryError::validation(
                "resource project id must not be empty",
            ));
        }

        let original = self.store.get(&resource.id).await?;
        if resource.project_id != original.project_id {
            return Err(DirectoryError::validation(
                "resource cannot be moved to a different project",
            ));
        }

        resource.created_at = original.created_at;
        resource.created_by = original.created_by;
        resource.updated_at = Some(Utc::now());
        resource.updated_by = actor.id.clone();

        self.store.update(resource).await
    }

    /// Administrative enable/disable toggle.
    pub async fn set_enabled(
        &self,
        actor: &Actor,
        id: &str,
        enabled: bool,
    ) -> DirectoryResult<Resource> {
        let mut resource = self.get(id).await?;
        resource.enabled = enabled;
        self.update(actor, resource).await
    }
}
