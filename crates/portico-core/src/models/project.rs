//! Project domain model.
//!
//! Projects are the isolation boundary of the directory: every user
//! and resource belongs to exactly one project, and searches are
//! project-scoped unless a caller explicitly opts into a
//! cross-project query.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier, assigned at creation and immutable.
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: String,
}
