//! SurrealDB store implementations.
//!
//! All dynamic query clauses (WHERE, ORDER BY, SET field lists) are
//! composed through the entity's [`FieldRegistry`], so the storage
//! spelling of an attribute lives in exactly two places: the schema
//! and the registry table.

mod project;
mod resource;
mod user;

pub use project::SurrealProjectStore;
pub use resource::SurrealResourceStore;
pub use user::SurrealUserStore;

use portico_core::fields::logical;
use portico_core::query::{Direction, Filter, FilterValue, Scope, SearchQuery};
use portico_core::{DirectoryResult, FieldRegistry};
use surrealdb::Connection;
use surrealdb::method::Query;
use surrealdb_types::SurrealValue;

use crate::error::DbError;

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
pub(crate) struct CountRow {
    pub total: u64,
}

/// Translate a search query into WHERE and ORDER BY clauses.
///
/// Filter values are referenced as `$project` / `$f{i}` placeholders;
/// [`bind_search`] supplies the matching binds. Sort is always
/// tie-broken by record id so pagination is deterministic across
/// repeated calls over unchanged data.
pub(crate) fn search_clauses(
    fields: &FieldRegistry,
    query: &SearchQuery,
) -> DirectoryResult<(String, String)> {
    let mut conds = Vec::new();

    if let Scope::Project(_) = query.scope {
        conds.push(format!("{} = $project", fields.resolve(logical::PROJECT_ID)?));
    }

    for (i, filter) in query.filters.iter().enumerate() {
        let cond = match filter {
            Filter::Eq { field, .. } => format!("{} = $f{i}", fields.resolve(field)?),
            Filter::Contains { field, .. } => format!(
                "string::contains(string::lowercase({}), string::lowercase($f{i}))",
                fields.resolve(field)?
            ),
        };
        conds.push(cond);
    }

    let where_sql = if conds.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conds.join(" AND "))
    };

    let order_sql = match &query.sort {
        Some(sort) => {
            let dir = match sort.direction {
                Direction::Asc => "ASC",
                Direction::Desc => "DESC",
            };
            format!(" ORDER BY {} {dir}, id ASC", fields.resolve(&sort.field)?)
        }
        None => " ORDER BY id ASC".to_string(),
    };

    Ok((where_sql, order_sql))
}

/// Bind the scope and filter values referenced by [`search_clauses`].
pub(crate) fn bind_search<'r, C: Connection>(
    mut builder: Query<'r, C>,
    query: &SearchQuery,
) -> Query<'r, C> {
    if let Scope::Project(project_id) = &query.scope {
        builder = builder.bind(("project", project_id.clone()));
    }
    for (i, filter) in query.filters.iter().enumerate() {
        let name = format!("f{i}");
        builder = match filter {
            Filter::Eq {
                value: FilterValue::Text(v),
                ..
            } => builder.bind((name, v.clone())),
            Filter::Eq {
                value: FilterValue::Flag(v),
                ..
            } => builder.bind((name, *v)),
            Filter::Eq {
                value: FilterValue::Time(v),
                ..
            } => builder.bind((name, *v)),
            Filter::Contains { value, .. } => builder.bind((name, value.clone())),
        };
    }
    builder
}

/// Classify a per-statement error from a CREATE: a duplicate record
/// id is a `Conflict`, anything else stays a backend error.
pub(crate) fn classify_create_error(
    err: surrealdb::Error,
    entity: &'static str,
    id: &str,
) -> DbError {
    if err.to_string().contains("already exists") {
        DbError::Conflict {
            entity: entity.into(),
            id: id.into(),
        }
    } else {
        DbError::Surreal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portico_core::DirectoryError;
    use portico_core::fields::user_registry;
    use portico_core::query::Sort;

    #[test]
    fn scoped_query_filters_on_project() {
        let fields = user_registry();
        let query = SearchQuery::scoped("p1");
        let (where_sql, order_sql) = search_clauses(&fields, &query).unwrap();
        assert_eq!(where_sql, " WHERE project_id = $project");
        assert_eq!(order_sql, " ORDER BY id ASC");
    }

    #[test]
    fn cross_project_query_has_no_scope_clause() {
        let fields = user_registry();
        let (where_sql, _) = search_clauses(&fields, &SearchQuery::all_projects()).unwrap();
        assert!(where_sql.is_empty());
    }

    #[test]
    fn logical_names_resolve_to_storage_keys() {
        let fields = user_registry();
        let query = SearchQuery::scoped("p1").with_filter(Filter::Eq {
            field: logical::ENABLED.into(),
            value: FilterValue::Flag(true),
        });
        let (where_sql, _) = search_clauses(&fields, &query).unwrap();
        assert!(
            where_sql.contains("is_enabled = $f0"),
            "expected storage key in clause: {where_sql}"
        );
    }

    #[test]
    fn sort_is_tie_broken_by_id() {
        let fields = user_registry();
        let mut query = SearchQuery::scoped("p1");
        query.sort = Some(Sort {
            field: logical::NAME.into(),
            direction: Direction::Desc,
        });
        let (_, order_sql) = search_clauses(&fields, &query).unwrap();
        assert_eq!(order_sql, " ORDER BY name DESC, id ASC");
    }

    #[test]
    fn unknown_filter_field_is_key_not_found() {
        let fields = user_registry();
        let query = SearchQuery::scoped("p1").with_filter(Filter::Eq {
            field: "password".into(),
            value: FilterValue::Text("nope".into()),
        });
        let err = search_clauses(&fields, &query).unwrap_err();
        assert!(matches!(err, DirectoryError::KeyNotFound { .. }));
    }
}
