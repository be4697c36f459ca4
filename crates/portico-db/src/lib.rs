//! PORTICO Database — SurrealDB connection management and store
//! implementations.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - Store implementations for the `portico-core` contracts
//!   ([`store`])
//! - Error types ([`DbError`])
//!
//! Storage field naming is owned by the schema together with the
//! per-entity field-key registries; every dynamic query clause is
//! built through [`portico_core::FieldRegistry::resolve`].

mod connection;
mod error;
mod schema;
pub mod store;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use schema::{run_migrations, schema_v1};
pub use store::{SurrealProjectStore, SurrealResourceStore, SurrealUserStore};
