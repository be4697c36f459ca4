//! Store trait definitions for persistence abstraction.
//!
//! One trait per entity type, implemented by a concrete backend
//! adapter. All operations are async and return the directory error
//! taxonomy: `NotFound`, `Conflict`, `Unavailable`, and friends —
//! never a backend-native error.
//!
//! Stores apply no validity filtering: `get` returns the raw record
//! regardless of enabled/expiry state, because administrative
//! callers need inactive records too. Validity judgment is the
//! service layer's job.

use crate::error::DirectoryResult;
use crate::models::{project::Project, resource::Resource, user::User};
use crate::query::{Page, SearchQuery, SearchResult};

pub trait ProjectStore: Send + Sync {
    /// Fails with `NotFound` if no project with `id` exists.
    fn get(&self, id: &str) -> impl Future<Output = DirectoryResult<Project>> + Send;
    /// Bounded listing in deterministic id order.
    fn list(&self, page: Page) -> impl Future<Output = DirectoryResult<SearchResult<Project>>> + Send;
    /// Fails with `Conflict` if the id already exists, `Validation`
    /// if the id is empty.
    fn create(&self, project: Project) -> impl Future<Output = DirectoryResult<Project>> + Send;
    /// Full-record replace. Fails with `NotFound` if absent.
    fn update(&self, project: Project) -> impl Future<Output = DirectoryResult<Project>> + Send;
}

pub trait UserStore: Send + Sync {
    /// Fails with `NotFound` if no user with `id` exists. Returns
    /// the record regardless of validity state.
    fn get(&self, id: &str) -> impl Future<Output = DirectoryResult<User>> + Send;
    /// First match within the project, in deterministic id order.
    /// Email uniqueness is not enforced by the directory.
    fn get_by_email(
        &self,
        project_id: &str,
        email: &str,
    ) -> impl Future<Output = DirectoryResult<User>> + Send;
    /// Translate the structured query into backend filters via the
    /// field-key registry. Bounded and paginated.
    fn search(
        &self,
        query: SearchQuery,
    ) -> impl Future<Output = DirectoryResult<SearchResult<User>>> + Send;
    /// Fails with `Conflict` if the id already exists, `Validation`
    /// if id or project id is empty. Persists exactly the fields set
    /// on the entity.
    fn create(&self, user: User) -> impl Future<Output = DirectoryResult<User>> + Send;
    /// Full-record replace. Fails with `NotFound` if absent.
    fn update(&self, user: User) -> impl Future<Output = DirectoryResult<User>> + Send;
}

pub trait ResourceStore: Send + Sync {
    /// Fails with `NotFound` if no resource with `id` exists.
    fn get(&self, id: &str) -> impl Future<Output = DirectoryResult<Resource>> + Send;
    /// Translate the structured query into backend filters via the
    /// field-key registry. Bounded and paginated.
    fn search(
        &self,
        query: SearchQuery,
    ) -> impl Future<Output = DirectoryResult<SearchResult<Resource>>> + Send;
    /// Fails with `Conflict` if the id already exists, `Validation`
    /// if id or project id is empty.
    fn create(&self, resource: Resource) -> impl Future<Output = DirectoryResult<Resource>> + Send;
    /// Full-record replace. Fails with `NotFound` if absent.
    fn update(&self, resource: Resource) -> impl Future<Output = DirectoryResult<Resource>> + Send;
}
