//! Integration tests for schema initialization using in-memory
//! SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

#[tokio::test]
async fn schema_migration_applies_successfully() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    portico_db::run_migrations(&db).await.unwrap();

    // Verify that the tables exist by querying INFO FOR DB.
    let mut result = db.query("INFO FOR DB").await.unwrap();
    let info: Option<surrealdb_types::Value> = result.take(0).unwrap();
    let info = info.expect("INFO FOR DB should return a value");
    let info_str = format!("{:?}", info);

    assert!(info_str.contains("project"), "missing project table");
    assert!(info_str.contains("user"), "missing user table");
    assert!(info_str.contains("resource"), "missing resource table");

    // Verify migration was recorded.
    assert!(info_str.contains("_migration"), "missing _migration table");
}

#[tokio::test]
async fn migration_is_idempotent() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    // Run twice — should not fail.
    portico_db::run_migrations(&db).await.unwrap();
    portico_db::run_migrations(&db).await.unwrap();

    // Verify only one migration record exists.
    let mut result = db.query("SELECT * FROM _migration").await.unwrap();
    let records: Vec<surrealdb_types::Value> = result.take(0).unwrap();
    assert_eq!(records.len(), 1, "expected exactly one migration record");
}

#[tokio::test]
async fn user_table_uses_storage_field_names() {
    // The logical `enabled` attribute is stored as `is_enabled`;
    // the schema must carry the storage spelling.
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    portico_db::run_migrations(&db).await.unwrap();

    let mut result = db.query("INFO FOR TABLE user").await.unwrap();
    let info: Option<surrealdb_types::Value> = result.take(0).unwrap();
    let info_str = format!("{:?}", info.expect("table info"));

    assert!(info_str.contains("is_enabled"), "missing is_enabled field");
    assert!(info_str.contains("expiry"), "missing expiry field");
}
