/// Task entity and assignment manager
///
/// Owns the task lifecycle. Assignment is a soft reference: creating or
/// reassigning a task does not require the assignee to be a member of
/// the parent project, and removing a member leaves existing
/// assignments untouched.

use tracing::debug;
use uuid::Uuid;

use crate::auth::policy::{decide, Action};
use crate::error::{CoreError, CoreResult};
use crate::models::task::{Task, TaskPatch};
use crate::models::user::UserIdentity;
use crate::store::Store;

/// Manager for task lifecycle and assignment
pub struct TaskService<'a, S: Store + ?Sized> {
    store: &'a S,
}

impl<'a, S: Store + ?Sized> TaskService<'a, S> {
    /// Creates a manager over the given store
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Creates a task in the given project
    ///
    /// The assignee, when provided, is stored as-is; it is not required
    /// to be a member of the project.
    ///
    /// # Errors
    ///
    /// - `Denied(AdminOnly)` if the identity is not an administrator
    /// - `NotFound` if the project is absent
    /// - `Validation` if the title is empty
    pub async fn create(
        &self,
        identity: &UserIdentity,
        project_id: Uuid,
        title: String,
        assigned_to: Option<Uuid>,
    ) -> CoreResult<Task> {
        decide(identity, &Action::CreateTask)?;

        self.store
            .find_project(project_id)
            .await?
            .ok_or(CoreError::NotFound("project"))?;

        if title.trim().is_empty() {
            return Err(CoreError::validation("Title is required"));
        }

        let task = Task::new(title, project_id, assigned_to);
        self.store.insert_task(&task).await?;

        debug!(task_id = %task.id, project_id = %project_id, "task created");
        Ok(task)
    }

    /// Updates a task
    ///
    /// The creator-admin of the parent project may change any field; the
    /// assigned member may change only `status`, and a patch that also
    /// touches another field is rejected wholesale, leaving the task
    /// unchanged.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the task or the project at `project_id` is absent
    /// - `Denied(NotAuthorized)` per the policy above
    /// - `Validation` if a provided title is empty
    pub async fn update(
        &self,
        identity: &UserIdentity,
        project_id: Uuid,
        task_id: Uuid,
        patch: TaskPatch,
    ) -> CoreResult<Task> {
        let task = self
            .store
            .find_task(task_id)
            .await?
            .ok_or(CoreError::NotFound("task"))?;

        let project = self
            .store
            .find_project(project_id)
            .await?
            .ok_or(CoreError::NotFound("project"))?;

        decide(
            identity,
            &Action::UpdateTask {
                project: &project,
                task: &task,
                patch: &patch,
            },
        )?;

        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(CoreError::validation("Title is required"));
            }
        }

        self.store
            .update_task(task_id, patch)
            .await?
            .ok_or(CoreError::NotFound("task"))
    }

    /// Deletes a task
    ///
    /// # Errors
    ///
    /// - `Denied(AdminOnly)` if the identity is not an administrator
    /// - `NotFound` if the task is absent
    pub async fn delete(&self, identity: &UserIdentity, task_id: Uuid) -> CoreResult<Task> {
        decide(identity, &Action::DeleteTask)?;

        self.store
            .delete_task(task_id)
            .await?
            .ok_or(CoreError::NotFound("task"))
    }
}
