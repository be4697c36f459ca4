//! SurrealDB implementation of [`ResourceStore`].

use chrono::{DateTime, Utc};
use portico_core::fields::{logical, resource_registry};
use portico_core::models::resource::Resource;
use portico_core::query::{SearchQuery, SearchResult};
use portico_core::store::ResourceStore;
use portico_core::{DirectoryError, DirectoryResult, FieldRegistry};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;
use crate::store::{CountRow, bind_search, classify_create_error, search_clauses};

const ENTITY: &str = "resource";

#[derive(Debug, SurrealValue)]
struct ResourceRow {
    project_id: String,
    key: String,
    name: String,
    resource_type: String,
    description: String,
    is_enabled: bool,
    created_at: Option<DateTime<Utc>>,
    created_by: String,
    updated_at: Option<DateTime<Utc>>,
    updated_by: String,
}

#[derive(Debug, SurrealValue)]
struct ResourceRowWithId {
    record_id: String,
    project_id: String,
    key: String,
    name: String,
    resource_type: String,
    description: String,
    is_enabled: bool,
    created_at: Option<DateTime<Utc>>,
    created_by: String,
    updated_at: Option<DateTime<Utc>>,
    updated_by: String,
}

impl ResourceRow {
    fn into_resource(self, id: String) -> Resource {
        Resource {
            id,
            project_id: self.project_id,
            key: self.key,
            name: self.name,
            resource_type: self.resource_type,
            description: self.description,
            enabled: self.is_enabled,
            created_at: self.created_at,
            created_by: self.created_by,
            updated_at: self.updated_at,
            updated_by: self.updated_by,
        }
    }
}

impl ResourceRowWithId {
    fn into_resource(self) -> Resource {
        Resource {
            id: self.record_id,
            project_id: self.project_id,
            key: self.key,
            name: self.name,
            resource_type: self.resource_type,
            description: self.description,
            enabled: self.is_enabled,
            created_at: self.created_at,
            created_by: self.created_by,
            updated_at: self.updated_at,
            updated_by: self.updated_by,
        }
    }
}

/// SurrealDB implementation of the resource store.
#[derive(Clone)]
pub struct SurrealResourceStore<C: Connection> {
    db: Surreal<C>,
    fields: FieldRegistry,
}

impl<C: Connection> SurrealResourceStore<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self {
            db,
            fields: resource_registry(),
        }
    }

    fn set_clause(&self) -> DirectoryResult<String> {
        Ok(format!(
            "{project_id} = $project_id, {key} = $key, {name} = $name, \
             {resource_type} = $resource_type, \
             {description} = $description, {enabled} = $enabled, \
             {created_at} = $created_at, created_by = $created_by, \
             {updated_at} = $updated_at, updated_by = $updated_by",
            project_id = self.fields.resolve(logical::PROJECT_ID)?,
            key = self.fields.resolve(logical::KEY)?,
            name = self.fields.resolve(logical::NAME)?,
            resource_type = self.fields.resolve(logical::RESOURCE_TYPE)?,
            description = self.fields.resolve(logical::DESCRIPTION)?,
            enabled = self.fields.resolve(logical::ENABLED)?,
            created_at = self.fields.resolve(logical::CREATED_AT)?,
            updated_at = self.fields.resolve(logical::UPDATED_AT)?,
        ))
    }
}

impl<C: Connection> ResourceStore for SurrealResourceStore<C> {
    async fn get(&self, id: &str) -> DirectoryResult<Resource> {
        let sql = format!("SELECT * FROM type::record('{}', $id)", self.fields.table());

        let mut result = self
            .db
            .query(sql)
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ResourceRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id.into(),
        })?;

        Ok(row.into_resource(id.to_string()))
    }

    async fn search(&self, query: SearchQuery) -> DirectoryResult<SearchResult<Resource>> {
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

        let rows: Vec<ResourceRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(ResourceRowWithId::into_resource)
            .collect();

        Ok(SearchResult {
            items,
            total,
            offset: page.offset,
            limit: page.limit,
        })
    }

    async fn create(&self, resource: Resource) -> DirectoryResult<Resource> {
        if resource.id.is_empty() || resource.project_id.is_empty() {
            return Err(DirectoryError::validation(
                "resource id and project id must not be empty",
            ));
        }

        let id = resource.id.clone();
        let sql = format!(
            "CREATE type::record('{table}', $id) SET {set}",
            table = self.fields.table(),
            set = self.set_clause()?,
        );

        let result = self
            .db
            .query(sql)
            .bind(("id", resource.id))
            .bind(("project_id", resource.project_id))
            .bind(("key", resource.key))
            .bind(("name", resource.name))
            .bind(("resource_type", resource.resource_type))
            .bind(("description", resource.description))
            .bind(("enabled", resource.enabled))
            .bind(("created_at", resource.created_at))
            .bind(("created_by", resource.created_by))
            .bind(("updated_at", resource.updated_at))
            .bind(("updated_by", resource.updated_by))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| classify_create_error(e, ENTITY, &id))?;

        let rows: Vec<ResourceRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id.clone(),
        })?;

        Ok(row.into_resource(id))
    }

    async fn update(&self, resource: Resource) -> DirectoryResult<Resource> {
        let id = resource.id.clone();
        let sql = format!(
            "UPDATE type::record('{table}', $id) SET {set}",
            table = self.fields.table(),
            set = self.set_clause()?,
        );

        let result = self
            .db
            .query(sql)
            .bind(("id", resource.id))
            .bind(("project_id", resource.project_id))
            .bind(("key", resource.key))
            .bind(("name", resource.name))
            .bind(("resource_type", resource.resource_type))
            .bind(("description", resource.description))
            .bind(("enabled", resource.enabled))
            .bind(("created_at", resource.created_at))
            .bind(("created_by", resource.created_by))
            .bind(("updated_at", resource.updated_at))
            .bind(("updated_by", resource.updated_by))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<ResourceRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id.clone(),
        })?;

        Ok(row.into_resource(id))
    }
}
