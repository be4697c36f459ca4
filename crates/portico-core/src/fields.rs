//! Field-key registries — the mapping from logical attribute names
//! to storage field identifiers.
//!
//! Store implementations and the search translator resolve every
//! field reference through a registry, so a storage-schema rename
//! never ripples into business logic. One immutable instance exists
//! per entity type, built from an explicit table at construction.

use std::collections::HashMap;

use crate::error::{DirectoryError, DirectoryResult};

/// Logical attribute names, shared by all entities that carry them.
///
/// Search filters and sort orders are expressed in these names; the
/// storage-side spelling is owned by the per-entity registry.
pub mod logical {
    pub const ID: &str = "id";
    pub const PROJECT_ID: &str = "project_id";
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const ENABLED: &str = "enabled";
    pub const EXPIRY: &str = "expiry";
    pub const KEY: &str = "key";
    pub const RESOURCE_TYPE: &str = "resource_type";
    pub const DESCRIPTION: &str = "description";
    pub const CREATED_AT: &str = "created_at";
    pub const UPDATED_AT: &str = "updated_at";
}

/// Immutable logical-name → storage-key table for one entity type.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    entity: &'static str,
    table: &'static str,
    keys: HashMap<&'static str, &'static str>,
}

impl FieldRegistry {
    /// Build a registry from an explicit attribute table.
    pub fn new(
        entity: &'static str,
        table: &'static str,
        mapping: &[(&'static str, &'static str)],
    ) -> Self {
        Self {
            entity,
            table,
            keys: mapping.iter().copied().collect(),
        }
    }

    /// Entity name this registry belongs to (e.g. `user`).
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Storage table backing this entity.
    pub fn table(&self) -> &'static str {
        self.table
    }

    /// Resolve a logical attribute name to its storage key.
    ///
    /// An unknown name is a programming error in the caller or a
    /// registry misconfiguration, surfaced as
    /// [`DirectoryError::KeyNotFound`].
    pub fn resolve(&self, field: &str) -> DirectoryResult<&'static str> {
        self.keys
            .get(field)
            .copied()
            .ok_or_else(|| DirectoryError::KeyNotFound {
                entity: self.entity.to_string(),
                field: field.to_string(),
            })
    }
}

/// Registry for the `user` entity. The `enabled` attribute is stored
/// as `is_enabled`.
pub fn user_registry() -> FieldRegistry {
    FieldRegistry::new(
        "user",
        "user",
        &[
            (logical::ID, "id"),
            (logical::PROJECT_ID, "project_id"),
            (logical::NAME, "name"),
            (logical::EMAIL, "email"),
            (logical::PHONE, "phone"),
            (logical::ENABLED, "is_enabled"),
            (logical::EXPIRY, "expiry"),
            (logical::CREATED_AT, "created_at"),
            (logical::UPDATED_AT, "updated_at"),
        ],
    )
}

/// Registry for the `resource` entity.
pub fn resource_registry() -> FieldRegistry {
    FieldRegistry::new(
        "resource",
        "resource",
        &[
            (logical::ID, "id"),
            (logical::PROJECT_ID, "project_id"),
            (logical::KEY, "key"),
            (logical::NAME, "name"),
            (logical::RESOURCE_TYPE, "resource_type"),
            (logical::DESCRIPTION, "description"),
            (logical::ENABLED, "is_enabled"),
            (logical::CREATED_AT, "created_at"),
            (logical::UPDATED_AT, "updated_at"),
        ],
    )
}

/// Registry for the `project` entity.
pub fn project_registry() -> FieldRegistry {
    FieldRegistry::new(
        "project",
        "project",
        &[
            (logical::ID, "id"),
            (logical::NAME, "name"),
            (logical::DESCRIPTION, "description"),
            (logical::CREATED_AT, "created_at"),
            (logical::UPDATED_AT, "updated_at"),
        ],
    )
}
