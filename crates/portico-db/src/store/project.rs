//! SurrealDB implementation of [`ProjectStore`].

use chrono::{DateTime, Utc};
use portico_core::fields::{logical, project_registry};
use portico_core::models::project::Project;
use portico_core::query::{Page, SearchResult};
use portico_core::store::ProjectStore;
use portico_core::{DirectoryError, DirectoryResult, FieldRegistry};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;
use crate::store::{CountRow, classify_create_error};

const ENTITY: &str = "project";

#[derive(Debug, SurrealValue)]
struct ProjectRow {
    name: String,
    description: String,
    created_at: Option<DateTime<Utc>>,
    created_by: String,
    updated_at: Option<DateTime<Utc>>,
    updated_by: String,
}

#[derive(Debug, SurrealValue)]
struct ProjectRowWithId {
    record_id: String,
    name: String,
    description: String,
    created_at: Option<DateTime<Utc>>,
    created_by: String,
    updated_at: Option<DateTime<Utc>>,
    updated_by: String,
}

impl ProjectRow {
    fn into_project(self, id: String) -> Project {
        Project {
            id,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
            created_by: self.created_by,
            updated_at: self.updated_at,
            updated_by: self.updated_by,
        }
    }
}

impl ProjectRowWithId {
    fn into_project(self) -> Project {
        Project {
            id: self.record_id,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
            created_by: self.created_by,
            updated_at: self.updated_at,
            updated_by: self.updated_by,
        }
    }
}

/// SurrealDB implementation of the project store.
#[derive(Clone)]
pub struct SurrealProjectStore<C: Connection> {
    db: Surreal<C>,
    fields: FieldRegistry,
}

impl<C: Connection> SurrealProjectStore<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self {
            db,
            fields: project_registry(),
        }
    }

    fn set_clause(&self) -> DirectoryResult<String> {
        Ok(format!(
            "{name} = $name, {description} = $description, \
             {created_at} = $created_at, created_by = $created_by, \
             {updated_at} = $updated_at, updated_by = $updated_by",
            name = self.fields.resolve(logical::NAME)?,
            description = self.fields.resolve(logical::DESCRIPTION)?,
            created_at = self.fields.resolve(logical::CREATED_AT)?,
            updated_at = self.fields.resolve(logical::UPDATED_AT)?,
        ))
    }
}

impl<C: Connection> ProjectStore for SurrealProjectStore<C> {
    async fn get(&self, id: &str) -> DirectoryResult<Project> {
        let sql = format!("SELECT * FROM type::record('{}', $id)", self.fields.table());

        let mut result = self
            .db
            .query(sql)
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ProjectRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id.into(),
        })?;

        Ok(row.into_project(id.to_string()))
    }

    async fn list(&self, page: Page) -> DirectoryResult<SearchResult<Project>> {
        let page = page.normalized();
        let table = self.fields.table();

        let count_sql = format!("SELECT count() AS total FROM {table} GROUP ALL");
        let mut count_result = self.db.query(count_sql).await.map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let page_sql = format!(
            "SELECT meta::id(id) AS record_id, * FROM {table} \
             ORDER BY id ASC LIMIT $limit START $offset"
        );
        let mut result = self
            .db
            .query(page_sql)
            .bind(("limit", page.limit))
            .bind(("offset", page.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ProjectRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(ProjectRowWithId::into_project)
            .collect();

        Ok(SearchResult {
            items,
            total,
            offset: page.offset,
            limit: page.limit,
        })
    }

    async fn create(&self, project: Project) -> DirectoryResult<Project> {
        if project.id.is_empty() {
            return Err(DirectoryError::validation("project id must not be empty"));
        }

        let id = project.id.clone();
        let sql = format!(
            "CREATE type::record('{table}', $id) SET {set}",
            table = self.fields.table(),
            set = self.set_clause()?,
        );

        let result = self
            .db
            .query(sql)
            .bind(("id", project.id))
            .bind(("name", project.name))
            .bind(("description", project.description))
            .bind(("created_at", project.created_at))
            .bind(("created_by", project.created_by))
            .bind(("updated_at", project.updated_at))
            .bind(("updated_by", project.updated_by))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| classify_create_error(e, ENTITY, &id))?;

        let rows: Vec<ProjectRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id.clone(),
        })?;

        Ok(row.into_project(id))
    }

    async fn update(&self, project: Project) -> DirectoryResult<Project> {
        let id = project.id.clone();
        let sql = format!(
            "UPDATE type::record('{table}', $id) SET {set}",
            table = self.fields.table(),
            set = self.set_clause()?,
        );

        let result = self
            .db
            .query(sql)
            .bind(("id", project.id))
            .bind(("name", project.name))
            .bind(("description", project.description))
            .bind(("created_at", project.created_at))
            .bind(("created_by", project.created_by))
            .bind(("updated_at", project.updated_at))
            .bind(("updated_by", project.updated_by))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<ProjectRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id.clone(),
        })?;

        Ok(row.into_project(id))
    }
}
