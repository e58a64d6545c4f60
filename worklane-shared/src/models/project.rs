/// Project model
///
/// A project is owned by exactly one administrator (`created_by`) and
/// carries a set of member-role user ids. Membership is stored inline so
/// add/remove stay single-document writes; the store's per-document
/// atomicity is the only concurrency guarantee the system relies on.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE project_status AS ENUM ('active', 'completed');
///
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY,
///     title VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     status project_status NOT NULL DEFAULT 'active',
///     created_by UUID NOT NULL REFERENCES users(id),
///     members UUID[] NOT NULL DEFAULT '{}',
///     created_at TIMESTAMPTZ NOT NULL,
///     updated_at TIMESTAMPTZ NOT NULL
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Work in progress (default)
    Active,

    /// Finished
    Completed,
}

impl ProjectStatus {
    /// Converts status to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
        }
    }
}

/// Project entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID (UUID v4)
    pub id: Uuid,

    /// Project title (required, non-empty)
    pub title: String,

    /// Free-form description (defaults to empty)
    pub description: String,

    /// Lifecycle status
    pub status: ProjectStatus,

    /// The sole owning administrator
    pub created_by: Uuid,

    /// Member-role user ids; set semantics, duplicates rejected upstream
    pub members: Vec<Uuid>,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// When the project was last updated
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new active project with an empty member set
    pub fn new(title: impl Into<String>, description: impl Into<String>, created_by: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            status: ProjectStatus::Active,
            created_by,
            members: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks whether a user id is in the member set
    pub fn has_member(&self, user_id: Uuid) -> bool {
        self.members.contains(&user_id)
    }

    /// Checks whether a user id is the owning administrator
    pub fn is_creator(&self, user_id: Uuid) -> bool {
        self.created_by == user_id
    }
}

/// Patch for updating a project record
///
/// Only provided fields are applied. `members` replaces the whole set in
/// one write and is reserved for the membership manager; the plain
/// update operation never touches it.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New lifecycle status
    pub status: Option<ProjectStatus>,

    /// Full member-set replacement
    pub members: Option<Vec<Uuid>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str() {
        assert_eq!(ProjectStatus::Active.as_str(), "active");
        assert_eq!(ProjectStatus::Completed.as_str(), "completed");
    }

    #[test]
    fn test_new_project_defaults() {
        let admin = Uuid::new_v4();
        let project = Project::new("Website Relaunch", "", admin);
        assert_eq!(project.status, ProjectStatus::Active);
        assert!(project.members.is_empty());
        assert!(project.is_creator(admin));
        assert!(!project.has_member(admin));
    }

    #[test]
    fn test_status_serde_round_trip() {
        let json = serde_json::to_string(&ProjectStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
        let back: ProjectStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ProjectStatus::Completed);
    }
}
