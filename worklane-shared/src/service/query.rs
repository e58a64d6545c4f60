/// Aggregation/query service
///
/// Builds role-scoped lists and counts from the two entities. Nothing
/// here mutates domain state, with one deliberate exception: admin
/// project listings first run the lazy orphan-task reconciliation pass
/// that cleans up after an interrupted cascade delete.

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::policy::{decide, project_scope, task_scope, Action};
use crate::error::{CoreError, CoreResult};
use crate::models::project::Project;
use crate::models::task::Task;
use crate::models::user::UserIdentity;
use crate::store::Store;

/// Cap on the recent-tasks listing; deliberate, there is no pagination
const RECENT_TASKS_LIMIT: i64 = 10;

/// Project detail view: the project plus its tasks
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    /// The project itself
    pub project: Project,

    /// Tasks belonging to the project, in insertion order
    pub tasks: Vec<Task>,
}

/// Dashboard counters for one identity
///
/// Administrators see the count of projects they created and the count
/// of all tasks system-wide; members see the projects they belong to
/// and the tasks assigned to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardCounts {
    /// Projects visible to the identity
    pub projects_count: u64,

    /// Tasks counted per the identity's role
    pub tasks_count: u64,
}

/// Read-side service over projects and tasks
pub struct QueryService<'a, S: Store + ?Sized> {
    store: &'a S,
}

impl<'a, S: Store + ?Sized> QueryService<'a, S> {
    /// Creates a query service over the given store
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Lists projects visible to the identity
    ///
    /// `search` filters by case-insensitive substring match on the
    /// title. Admin listings trigger the orphan-task reconciliation
    /// pass before reading.
    pub async fn list_projects(
        &self,
        identity: &UserIdentity,
        search: Option<&str>,
    ) -> CoreResult<Vec<Project>> {
        if identity.is_admin() {
            let reaped = self.store.purge_orphan_tasks().await?;
            if reaped > 0 {
                info!(reaped, "removed orphaned tasks");
            }
        }

        Ok(self
            .store
            .list_projects(&project_scope(identity), search)
            .await?)
    }

    /// Fetches one project with its tasks
    ///
    /// # Errors
    ///
    /// - `NotFound` if the project is absent
    /// - `Denied(AccessDenied)` if the identity may not see it
    pub async fn get_project(
        &self,
        identity: &UserIdentity,
        id: Uuid,
    ) -> CoreResult<ProjectDetail> {
        let project = self
            .store
            .find_project(id)
            .await?
            .ok_or(CoreError::NotFound("project"))?;

        decide(identity, &Action::ReadProject(&project))?;

        let tasks = self.store.tasks_for_project(id).await?;

        Ok(ProjectDetail { project, tasks })
    }

    /// Lists the ten most recent tasks visible to the identity
    pub async fn list_tasks(&self, identity: &UserIdentity) -> CoreResult<Vec<Task>> {
        Ok(self
            .store
            .list_tasks(&task_scope(identity), Some(RECENT_TASKS_LIMIT))
            .await?)
    }

    /// Lists all tasks of one project
    ///
    /// Available to any authenticated identity; the project detail view
    /// uses it to render task lists.
    pub async fn project_tasks(&self, project_id: Uuid) -> CoreResult<Vec<Task>> {
        Ok(self.store.tasks_for_project(project_id).await?)
    }

    /// Computes the dashboard counters for the identity
    pub async fn dashboard_counts(&self, identity: &UserIdentity) -> CoreResult<DashboardCounts> {
        let projects_count = self
            .store
            .count_projects(&project_scope(identity))
            .await?;
        let tasks_count = self.store.count_tasks(&task_scope(identity)).await?;

        Ok(DashboardCounts {
            projects_count,
            tasks_count,
        })
    }
}
