/// Persistence seam for Worklane
///
/// The core never talks to a database directly; it goes through the
/// [`Store`] trait, which exposes exactly the per-entity operations the
/// services need. Two implementations ship:
///
/// - [`postgres::PgStore`]: sqlx/PostgreSQL, the production backend
/// - [`memory::MemStore`]: in-memory, for tests and demos
///
/// The trait is object-safe so the API layer can hold an `Arc<dyn
/// Store>` and swap backends without regenerating its router.
///
/// # Consistency contract
///
/// Single-document writes are atomic; nothing else is. The only
/// multi-entity write in the system is the project cascade delete,
/// which the service sequences children-first. A crash between the two
/// halves leaves orphaned tasks, which [`Store::purge_orphan_tasks`]
/// reaps lazily.

use async_trait::async_trait;
use sqlx::error::DatabaseError;
use uuid::Uuid;

use crate::auth::policy::{ProjectScope, TaskScope};
use crate::models::project::{Project, ProjectPatch};
use crate::models::task::{Task, TaskPatch};
use crate::models::user::{User, UserPatch};

pub mod memory;
pub mod postgres;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Unique-constraint violation on the named field
    #[error("duplicate value for {0}")]
    Duplicate(&'static str),

    /// Backend failure; detail is for logs, never for clients
    #[error("store backend failure: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if let Some(constraint) = db_err.constraint() {
                if constraint.contains("email") {
                    return StoreError::Duplicate("email");
                }
            }
        }
        StoreError::Backend(err.to_string())
    }
}

/// Persistence operations required by the core
///
/// Update operations return `None` when the id is absent; the caller
/// decides whether that is a `NotFound` or a race to ignore. All update
/// methods bump `updated_at`.
#[async_trait]
pub trait Store: Send + Sync {
    /// Verifies the backend is reachable (health checks)
    async fn ping(&self) -> Result<(), StoreError>;

    // --- users ---

    /// Inserts a user; fails with `Duplicate("email")` on a taken email
    async fn insert_user(&self, user: &User) -> Result<(), StoreError>;

    /// Finds a user by id
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Finds a user by email (case-insensitive)
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Lists all users in insertion order
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    /// Applies a patch to a user
    async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<Option<User>, StoreError>;

    // --- projects ---

    /// Inserts a project
    async fn insert_project(&self, project: &Project) -> Result<(), StoreError>;

    /// Finds a project by id
    async fn find_project(&self, id: Uuid) -> Result<Option<Project>, StoreError>;

    /// Lists projects in scope, optionally filtered by a
    /// case-insensitive substring match on the title, in insertion order
    async fn list_projects(
        &self,
        scope: &ProjectScope,
        title_search: Option<&str>,
    ) -> Result<Vec<Project>, StoreError>;

    /// Applies a patch to a project
    async fn update_project(
        &self,
        id: Uuid,
        patch: ProjectPatch,
    ) -> Result<Option<Project>, StoreError>;

    /// Deletes a project, returning the deleted record
    async fn delete_project(&self, id: Uuid) -> Result<Option<Project>, StoreError>;

    /// Counts projects in scope
    async fn count_projects(&self, scope: &ProjectScope) -> Result<u64, StoreError>;

    // --- tasks ---

    /// Inserts a task
    async fn insert_task(&self, task: &Task) -> Result<(), StoreError>;

    /// Finds a task by id
    async fn find_task(&self, id: Uuid) -> Result<Option<Task>, StoreError>;

    /// Lists tasks in scope, most recent first, up to `limit`
    async fn list_tasks(
        &self,
        scope: &TaskScope,
        limit: Option<i64>,
    ) -> Result<Vec<Task>, StoreError>;

    /// Lists all tasks of one project in insertion order
    async fn tasks_for_project(&self, project_id: Uuid) -> Result<Vec<Task>, StoreError>;

    /// Applies a patch to a task
    async fn update_task(&self, id: Uuid, patch: TaskPatch) -> Result<Option<Task>, StoreError>;

    /// Deletes a task, returning the deleted record
    async fn delete_task(&self, id: Uuid) -> Result<Option<Task>, StoreError>;

    /// Deletes every task of a project (first half of the cascade)
    async fn delete_project_tasks(&self, project_id: Uuid) -> Result<u64, StoreError>;

    /// Counts tasks in scope
    async fn count_tasks(&self, scope: &TaskScope) -> Result<u64, StoreError>;

    /// Deletes tasks whose project no longer exists, returning how many
    /// were reaped
    async fn purge_orphan_tasks(&self) -> Result<u64, StoreError>;
}
