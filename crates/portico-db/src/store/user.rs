//! SurrealDB implementation of [`UserStore`].

use chrono::{DateTime, Utc};
use portico_core::fields::{logical, user_registry};
use portico_core::models::user::User;
use portico_core::query::{SearchQuery, SearchResult};
use portico_core::store::UserStore;
use portico_core::{DirectoryError, DirectoryResult, FieldRegistry};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;
use crate::store::{CountRow, bind_search, classify_create_error, search_clauses};

const ENTITY: &str = "user";

/// DB-side row struct for queries where the id is already known.
#[derive(Debug, SurrealValue)]
struct UserRow {
    project_id: String,
    name: String,
    email: String,
    phone: String,
    is_enabled: bool,
    expiry: Option<DateTime<Utc>>,
    created_at: Option<DateTime<Utc>>,
    created_by: String,
    updated_at: Option<DateTime<Utc>>,
    updated_by: String,
}

/// DB-side row struct that includes the record id via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct UserRowWithId {
    record_id: String,
    project_id: String,
    name: String,
    email: String,
    phone: String,
    is_enabled: bool,
    expiry: Option<DateTime<Utc>>,
    created_at: Option<DateTime<Utc>>,
    created_by: String,
    updated_at: Option<DateTime<Utc>>,
    updated_by: String,
}

impl UserRow {
    fn into_user(self, id: String) -> User {
        User {
            id,
            project_id: self.project_id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            enabled: self.is_enabled,
            expiry: self.expiry,
            created_at: self.created_at,
            created_by: self.created_by,
            updated_at: self.updated_at,
            updated_by: self.updated_by,
        }
    }
}

impl UserRowWithId {
    fn into_user(self) -> User {
        User {
            id: self.record_id,
            project_id: self.project_id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            enabled: self.is_enabled,
            expiry: self.expiry,
            created_at: self.created_at,
            created_by: self.created_by,
            updated_at: self.updated_at,
            updated_by: self.updated_by,
        }
    }
}

/// SurrealDB implementation of the user store.
#[derive(Clone)]
pub struct SurrealUserStore<C: Connection> {
    db: Surreal<C>,
    fields: FieldRegistry,
}

impl<C: Connection> SurrealUserStore<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self {
            db,
            fields: user_registry(),
        }
    }

    /// The full SET clause for create/update, with every storage key
    /// resolved through the registry.
    fn set_clause(&self) -> DirectoryResult<String> {
        Ok(format!(
            "{project_id} = $project_id, {name} = $name, \
             {email} = $email, {phone} = $phone, \
             {enabled} = $enabled, {expiry} = $expiry, \
             {created_at} = $created_at, created_by = $created_by, \
             {updated_at} = $updated_at, updated_by = $updated_by",
            project_id = self.fields.resolve(logical::PROJECT_ID)?,
            name = self.fields.resolve(logical::NAME)?,
            email = self.fields.resolve(logical::EMAIL)?,
            phone = self.fields.resolve(logical::PHONE)?,
            enabled = self.fields.resolve(logical::ENABLED)?,
            expiry = self.fields.resolve(logical::EXPIRY)?,
            created_at = self.fields.resolve(logical::CREATED_AT)?,
            updated_at = self.fields.resolve(logical::UPDATED_AT)?,
        ))
    }
}

impl<C: Connection> UserStore for SurrealUserStore<C> {
    async fn get(&self, id: &str) -> DirectoryResult<User> {
        let sql = format!("SELECT * FROM type::record('{}', $id)", self.fields.table());

        let mut result = self
            .db
            .query(sql)
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id.into(),
        })?;

        Ok(row.into_user(id.to_string()))
    }

    async fn get_by_email(&self, project_id: &str, email: &str) -> DirectoryResult<User> {
        let sql = format!(
            "SELECT meta::id(id) AS record_id, * FROM {table} \
             WHERE {project_key} = $project_id AND {email_key} = $email \
             ORDER BY id ASC LIMIT 1",
            table = self.fields.table(),
            project_key = self.fields.resolve(logical::PROJECT_ID)?,
            email_key = self.fields.resolve(logical::EMAIL)?,
        );

        let mut result = self
            .db
            .query(sql)
            .bind(("project_id", project_id.to_string()))
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: format!("email={email}"),
        })?;

        Ok(row.into_user())
    }

    async fn search(&self, query: SearchQuery) -> DirectoryResult<SearchResult<User>> {
        let page = query.page.normalized();
        let (where_sql, order_sql) = search_clauses(&self.fields, &query)?;
        let table = self.fields.table();

        let count_sql = format!("SELECT count() AS total FROM {table}{where_sql} GROUP ALL");
        let mut count_result = bind_search(self.db.query(count_sql), &query)
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let page_sql = format!(
            "SELECT meta::id(id) AS record_id, * FROM {table}{where_sql}{order_sql} \
             LIMIT $limit START $offset"
        );
        let mut result = bind_search(self.db.query(page_sql), &query)
            .bind(("limit", page.limit))
            .bind(("offset", page.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows.into_iter().map(UserRowWithId::into_user).collect();

        Ok(SearchResult {
            items,
            total,
            offset: page.offset,
            limit: page.limit,
        })
    }

    async fn create(&self, user: User) -> DirectoryResult<User> {
        if user.id.is_empty() || user.project_id.is_empty() {
            return Err(DirectoryError::validation(
                "user id and project id must not be empty",
            ));
        }

        let id = user.id.clone();
        let sql = format!(
            "CREATE type::record('{table}', $id) SET {set}",
            table = self.fields.table(),
            set = self.set_clause()?,
        );

        let result = self
            .db
            .query(sql)
            .bind(("id", user.id))
            .bind(("project_id", user.project_id))
            .bind(("name", user.name))
            .bind(("email", user.email))
            .bind(("phone", user.phone))
            .bind(("enabled", user.enabled))
            .bind(("expiry", user.expiry))
            .bind(("created_at", user.created_at))
            .bind(("created_by", user.created_by))
            .bind(("updated_at", user.updated_at))
            .bind(("updated_by", user.updated_by))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| classify_create_error(e, ENTITY, &id))?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id.clone(),
        })?;

        Ok(row.into_user(id))
    }

    async fn update(&self, user: User) -> DirectoryResult<User> {
        // Full-record replace: every field is rewritten. A record
        // that does not exist yields no rows, never an insert.
        let id = user.id.clone();
        let sql = format!(
            "UPDATE type::record('{table}', $id) SET {set}",
            table = self.fields.table(),
            set = self.set_clause()?,
        );

        let result = self
            .db
            .query(sql)
            .bind(("id", user.id))
            .bind(("project_id", user.project_id))
            .bind(("name", user.name))
            .bind(("email", user.email))
            .bind(("phone", user.phone))
            .bind(("enabled", user.enabled))
            .bind(("expiry", user.expiry))
            .bind(("created_at", user.created_at))
            .bind(("created_by", user.created_by))
            .bind(("updated_at", user.updated_at))
            .bind(("updated_by", user.updated_by))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id.clone(),
        })?;

        Ok(row.into_user(id))
    }
}
