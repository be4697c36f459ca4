//! Integration tests for the user store using in-memory SurrealDB.

use chrono::{Duration, Utc};
use portico_core::DirectoryError;
use portico_core::fields::logical;
use portico_core::models::project::Project;
use portico_core::models::user::User;
use portico_core::query::{Direction, Filter, FilterValue, SearchQuery};
use portico_core::store::{ProjectStore, UserStore};
use portico_db::{SurrealProjectStore, SurrealUserStore};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

/// Helper: spin up in-memory DB, run migrations, create a project.
async fn setup() -> (Surreal<surrealdb::engine::local::Db>, String) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    portico_db::run_migrations(&db).await.unwrap();

    let projects = SurrealProjectStore::new(db.clone());
    let project = projects
        .create(Project {
            id: "p1".into(),
            name: "Test Project".into(),
            created_by: "setup".into(),
            ..Default::default()
        })
        .await
        .unwrap();

    (db, project.id)
}

fn user(id: &str, project_id: &str, name: &str, email: &str) -> User {
    User {
        id: id.into(),
        project_id: project_id.into(),
        name: name.into(),
        email: email.into(),
        phone: "+1-555-0100".into(),
        enabled: true,
        expiry: None,
        created_at: Some(Utc::now()),
        created_by: "admin".into(),
        updated_at: None,
        updated_by: String::new(),
    }
}

#[tokio::test]
async fn create_and_get_user() {
    let (db, project_id) = setup().await;
    let store = SurrealUserStore::new(db);

    let created = store
        .create(user("u1", &project_id, "Alice", "alice@example.com"))
        .await
        .unwrap();
    assert_eq!(created.id, "u1");
    assert_eq!(created.project_id, project_id);
    assert!(created.enabled);
    assert!(created.created_at.is_some());
    assert_eq!(created.created_by, "admin");
    assert!(created.updated_at.is_none());

    let fetched = store.get("u1").await.unwrap();
    assert_eq!(fetched.id, "u1");
    assert_eq!(fetched.name, "Alice");
    assert_eq!(fetched.email, "alice@example.com");
    assert!(fetched.enabled);
}

#[tokio::test]
async fn create_with_empty_identifiers_is_rejected() {
    let (db, project_id) = setup().await;
    let store = SurrealUserStore::new(db);

    let err = store
        .create(user("", &project_id, "Alice", "alice@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Validation { .. }));

    let err = store
        .create(user("u1", "", "Alice", "alice@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Validation { .. }));

    // Neither attempt persisted anything.
    let result = store.search(SearchQuery::all_projects()).await.unwrap();
    assert_eq!(result.total, 0);
}

#[tokio::test]
async fn get_missing_user_is_not_found() {
    let (db, _) = setup().await;
    let store = SurrealUserStore::new(db);

    let err = store.get("nope").await.unwrap_err();
    assert!(
        matches!(err, DirectoryError::NotFound { .. }),
        "expected NotFound, got: {err:?}"
    );
}

#[tokio::test]
async fn duplicate_id_is_conflict_and_leaves_record_unchanged() {
    let (db, project_id) = setup().await;
    let store = SurrealUserStore::new(db);

    store
        .create(user("u1", &project_id, "Alice", "alice@example.com"))
        .await
        .unwrap();

    let err = store
        .create(user("u1", &project_id, "Imposter", "evil@example.com"))
        .await
        .unwrap_err();
    assert!(
        matches!(err, DirectoryError::Conflict { .. }),
        "expected Conflict, got: {err:?}"
    );

    // The original record is untouched.
    let fetched = store.get("u1").await.unwrap();
    assert_eq!(fetched.name, "Alice");
    assert_eq!(fetched.email, "alice@example.com");
}

#[tokio::test]
async fn get_returns_inactive_records() {
    // The store applies no validity filtering: disabled and expired
    // users come back as stored.
    let (db, project_id) = setup().await;
    let store = SurrealUserStore::new(db);

    let mut disabled = user("u1", &project_id, "Off", "off@example.com");
    disabled.enabled = false;
    store.create(disabled).await.unwrap();

    let mut expired = user("u2", &project_id, "Old", "old@example.com");
    expired.expiry = Some(Utc::now() - Duration::hours(1));
    store.create(expired).await.unwrap();

    let fetched = store.get("u1").await.unwrap();
    assert!(!fetched.enabled);
    assert!(!fetched.is_active());

    let fetched = store.get("u2").await.unwrap();
    assert!(fetched.enabled);
    assert!(!fetched.is_active(), "expired user must be inactive");
}

#[tokio::test]
async fn update_is_full_record_replace() {
    let (db, project_id) = setup().await;
    let store = SurrealUserStore::new(db);

    let created = store
        .create(user("u1", &project_id, "Alice", "alice@example.com"))
        .await
        .unwrap();

    let mut changed = created.clone();
    changed.name = "Alicia".into();
    changed.phone = String::new();
    changed.updated_at = Some(Utc::now());
    changed.updated_by = "admin2".into();

    let updated = store.update(changed).await.unwrap();
    assert_eq!(updated.name, "Alicia");
    assert_eq!(updated.phone, "");
    assert_eq!(updated.updated_by, "admin2");

    let fetched = store.get("u1").await.unwrap();
    assert_eq!(fetched.name, "Alicia");
    assert_eq!(fetched.email, "alice@example.com");
}

#[tokio::test]
async fn update_missing_user_is_not_found() {
    let (db, project_id) = setup().await;
    let store = SurrealUserStore::new(db);

    let err = store
        .update(user("ghost", &project_id, "Ghost", "ghost@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::NotFound { .. }));
}

#[tokio::test]
async fn get_by_email_is_project_scoped() {
    let (db, project_id) = setup().await;

    let projects = SurrealProjectStore::new(db.clone());
    let other = projects
        .create(Project {
            id: "p2".into(),
            name: "Other Project".into(),
            created_by: "setup".into(),
            ..Default::default()
        })
        .await
        .unwrap();

    let store = SurrealUserStore::new(db);
    store
        .create(user("u1", &project_id, "Alice", "shared@example.com"))
        .await
        .unwrap();
    store
        .create(user("u2", &other.id, "Bob", "shared@example.com"))
        .await
        .unwrap();

    let found = store.get_by_email(&project_id, "shared@example.com").await.unwrap();
    assert_eq!(found.id, "u1");

    let found = store.get_by_email(&other.id, "shared@example.com").await.unwrap();
    assert_eq!(found.id, "u2");

    let err = store
        .get_by_email(&project_id, "nobody@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::NotFound { .. }));
}

#[tokio::test]
async fn search_is_project_scoped() {
    let (db, project_id) = setup().await;

    let projects = SurrealProjectStore::new(db.clone());
    projects
        .create(Project {
            id: "p2".into(),
            name: "Other Project".into(),
            created_by: "setup".into(),
            ..Default::default()
        })
        .await
        .unwrap();

    let store = SurrealUserStore::new(db);
    store
        .create(user("u1", &project_id, "Alice", "alice@example.com"))
        .await
        .unwrap();
    store
        .create(user("u2", "p2", "Bob", "bob@example.com"))
        .await
        .unwrap();

    let result = store.search(SearchQuery::scoped(&project_id)).await.unwrap();
    assert_eq!(result.total, 1);
    assert!(result.items.iter().all(|u| u.project_id == project_id));

    // Cross-project search is an explicit opt-in.
    let result = store.search(SearchQuery::all_projects()).await.unwrap();
    assert_eq!(result.total, 2);
}

#[tokio::test]
async fn search_filters_on_logical_attribute_names() {
    let (db, project_id) = setup().await;
    let store = SurrealUserStore::new(db);

    store
        .create(user("u1", &project_id, "Alice", "alice@example.com"))
        .await
        .unwrap();
    let mut off = user("u2", &project_id, "Bob", "bob@example.com");
    off.enabled = false;
    store.create(off).await.unwrap();

    // Logical `enabled` resolves to the stored `is_enabled` column.
    let query = SearchQuery::scoped(&project_id).with_filter(Filter::Eq {
        field: logical::ENABLED.into(),
        value: FilterValue::Flag(true),
    });
    let result = store.search(query).await.unwrap();
    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].id, "u1");

    // Case-insensitive substring match on name.
    let query = SearchQuery::scoped(&project_id).with_filter(Filter::Contains {
        field: logical::NAME.into(),
        value: "ali".into(),
    });
    let result = store.search(query).await.unwrap();
    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].name, "Alice");
}

#[tokio::test]
async fn search_pagination_reports_total() {
    let (db, project_id) = setup().await;
    let store = SurrealUserStore::new(db);

    for i in 0..5 {
        store
            .create(user(
                &format!("u{i}"),
                &project_id,
                &format!("User {i}"),
                &format!("user-{i}@example.com"),
            ))
            .await
            .unwrap();
    }

    let page1 = store
        .search(SearchQuery::scoped(&project_id).with_page(0, 3))
        .await
        .unwrap();
    assert_eq!(page1.items.len(), 3);
    assert_eq!(page1.total, 5);
    assert_eq!(page1.limit, 3);

    let page2 = store
        .search(SearchQuery::scoped(&project_id).with_page(3, 3))
        .await
        .unwrap();
    assert_eq!(page2.items.len(), 2);
    assert_eq!(page2.total, 5);

    // No overlap between pages.
    for u in &page2.items {
        assert!(page1.items.iter().all(|p| p.id != u.id));
    }
}

#[tokio::test]
async fn search_unset_limit_is_bounded_by_default() {
    let (db, project_id) = setup().await;
    let store = SurrealUserStore::new(db);

    store
        .create(user("u1", &project_id, "Alice", "alice@example.com"))
        .await
        .unwrap();

    let result = store
        .search(SearchQuery::scoped(&project_id).with_page(0, 0))
        .await
        .unwrap();
    assert_eq!(result.limit, portico_core::query::DEFAULT_PAGE_LIMIT);
    assert_eq!(result.items.len(), 1);
}

#[tokio::test]
async fn search_order_is_deterministic_with_id_tie_break() {
    let (db, project_id) = setup().await;
    let store = SurrealUserStore::new(db);

    // Identical names force the tie-break.
    for id in ["u3", "u1", "u2"] {
        store
            .create(user(id, &project_id, "Same Name", &format!("{id}@example.com")))
            .await
            .unwrap();
    }

    let query = SearchQuery::scoped(&project_id).with_sort(logical::NAME, Direction::Asc);

    let first = store.search(query.clone()).await.unwrap();
    let ids: Vec<&str> = first.items.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["u1", "u2", "u3"]);

    // Repeated invocations over unchanged data return the same order.
    for _ in 0..3 {
        let again = store.search(query.clone()).await.unwrap();
        let again_ids: Vec<&str> = again.items.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(again_ids, ids);
    }
}
