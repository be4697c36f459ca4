//! Project directory service.

use chrono::Utc;
use portico_core::DirectoryResult;
use portico_core::error::DirectoryError;
use portico_core::models::actor::Actor;
use portico_core::models::project::Project;
use portico_core::query::{Page, SearchResult};
use portico_core::store::ProjectStore;
use uuid::Uuid;

/// Directory service for projects.
pub struct ProjectService<S: ProjectStore> {
    store: S,
}

impl<S: ProjectStore> ProjectService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Fetch a project by id. Empty ids are rejected before the
    /// store is touched.
    pub async fn get(&self, id: &str) -> DirectoryResult<Project> {
        if id.is_empty() {
            return Err(DirectoryError::validation("project id must not be empty"));
        }
        self.store.get(id).await
    }

    /// Bounded listing in deterministic id order.
    pub async fn list(&self, page: Page) -> DirectoryResult<SearchResult<Project>> {
        self.store.list(page).await
    }

    /// Create a project: id generation and create-audit stamping.
    pub async fn create(&self, actor: &Actor, mut project: Project) -> DirectoryResult<Project> {
        if project.name.is_empty() {
            return Err(DirectoryError::validation(
                "project name must not be empty",
            ));
        }
        if project.id.is_empty() {
            project.id = Uuid::new_v4().to_string();
        }

        project.created_at = Some(Utc::now());
        project.created_by = actor.id.clone();
        project.updated_at = None;
        project.updated_by = String::new();

        self.store.create(project).await
    }

    /// Update a project. The original create-audit stamps are
    /// carried forward.
    pub async fn update(&self, actor: &Actor, mut project: Project) -> DirectoryResult<Project> {
        if project.id.is_empty() {
            return Err(DirectoryError::validation("project id must not be empty"));
        }
        if project.name.is_empty() {
            return Err(DirectoryError::validation(
                "project name must not be empty",
            ));
        }

        let original = self.store.get(&project.id).await?;

        project.created_at = original.created_at;
        project.created_by = original.created_by;
        project.updated_at = Some(Utc::now());
        project.updated_by = actor.id.clone();

        self.store.update(project).await
    }
}
