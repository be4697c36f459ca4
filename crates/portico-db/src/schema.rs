//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! Audit timestamps are `option<datetime>` with no database-side
//! defaults: the service layer owns audit stamping, the store
//! persists exactly what it is given.
//!
//! The `user.is_enabled` / `resource.is_enabled` columns realize the
//! field-key indirection — business logic only ever speaks of the
//! logical `enabled` attribute.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Projects (global scope)
-- =======================================================================
DEFINE TABLE project SCHEMAFULL;
DEFINE FIELD name ON TABLE project TYPE string;
DEFINE FIELD description ON TABLE project TYPE string;
DEFINE FIELD created_at ON TABLE project TYPE option<datetime>;
DEFINE FIELD created_by ON TABLE project TYPE string;
DEFINE FIELD updated_at ON TABLE project TYPE option<datetime>;
DEFINE FIELD updated_by ON TABLE project TYPE string;

-- =======================================================================
-- Users (project scope)
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD project_id ON TABLE user TYPE string;
DEFINE FIELD name ON TABLE user TYPE string;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD phone ON TABLE user TYPE string;
DEFINE FIELD is_enabled ON TABLE user TYPE bool;
DEFINE FIELD expiry ON TABLE user TYPE option<datetime>;
DEFINE FIELD created_at ON TABLE user TYPE option<datetime>;
DEFINE FIELD created_by ON TABLE user TYPE string;
DEFINE FIELD updated_at ON TABLE user TYPE option<datetime>;
DEFINE FIELD updated_by ON TABLE user TYPE string;
DEFINE INDEX idx_user_project ON TABLE user COLUMNS project_id;
DEFINE INDEX idx_user_project_email ON TABLE user \
    COLUMNS project_id, email;

-- =======================================================================
-- Resources (project scope)
-- =======================================================================
DEFINE TABLE resource SCHEMAFULL;
DEFINE FIELD project_id ON TABLE resource TYPE string;
DEFINE FIELD key ON TABLE resource TYPE string;
DEFINE FIELD name ON TABLE resource TYPE string;
DEFINE FIELD resource_type ON TABLE resource TYPE string;
DEFINE FIELD description ON TABLE resource TYPE string;
DEFINE FIELD is_enabled ON TABLE resource TYPE bool;
DEFINE FIELD created_at ON TABLE resource TYPE option<datetime>;
DEFINE FIELD created_by ON TABLE resource TYPE string;
DEFINE FIELD updated_at ON TABLE resource TYPE option<datetime>;
DEFINE FIELD updated_by ON TABLE resource TYPE string;
DEFINE INDEX idx_resource_project ON TABLE resource COLUMNS project_id;
DEFINE INDEX idx_resource_project_key ON TABLE resource \
    COLUMNS project_id, key;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
///
/// Exposed for testing with in-memory SurrealDB instances that
/// bypass the migration runner.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}
