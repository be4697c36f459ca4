//! PORTICO Directory — business-logic services over the store
//! contracts.
//!
//! Each service decorates one store: input-shape validation, id
//! generation, and audit stamping happen here; everything else is
//! delegated, and store errors surface to callers unchanged. The
//! per-method pass-throughs are the insertion point for future
//! cross-cutting rules (e.g. active-only search filtering).

pub mod deadline;
pub mod project;
pub mod resource;
pub mod user;

pub use deadline::with_deadline;
pub use project::ProjectService;
pub use resource::ResourceService;
pub use user::UserService;
