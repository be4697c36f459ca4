//! Resource domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A protected resource that downstream authorization decisions may
/// reference, scoped to exactly one project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resource {
    /// Unique identifier, assigned at creation and immutable.
    pub id: String,
    /// Owning project. Immutable after creation.
    pub project_id: String,
    /// Stable key used by authorization checks (e.g. `billing:invoice`).
    pub key: String,
    pub name: String,
    /// Category of the resource.
    pub resource_type: String,
    pub description: String,
    /// Disabled resources are excluded from active lookup paths.
    /// Defaults to `false`.
    pub enabled: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: String,
}
