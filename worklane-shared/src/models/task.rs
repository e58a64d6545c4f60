/// Task model
///
/// Tasks belong to exactly one project (`project_id`, immutable after
/// creation) and may reference an assignee. The assignment reference is
/// soft: membership is checked when a caller assigns, never re-validated
/// afterwards, and removing a member does not clear stale assignments.
/// Orphaned tasks left behind by an interrupted cascade delete are
/// reaped by [`crate::store::Store::purge_orphan_tasks`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Workflow status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started (default)
    Todo,

    /// Being worked on
    InProgress,

    /// Finished
    Done,
}

impl TaskStatus {
    /// Converts status to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Done => "done",
        }
    }
}

/// Task entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID (UUID v4)
    pub id: Uuid,

    /// Task title (required, non-empty)
    pub title: String,

    /// Owning project; immutable after creation
    pub project_id: Uuid,

    /// Assignee, `None` meaning unassigned
    pub assigned_to: Option<Uuid>,

    /// Workflow status
    pub status: TaskStatus,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in `todo` state
    pub fn new(title: impl Into<String>, project_id: Uuid, assigned_to: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            project_id,
            assigned_to,
            status: TaskStatus::Todo,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks whether the task is assigned to the given user
    pub fn is_assigned_to(&self, user_id: Uuid) -> bool {
        self.assigned_to == Some(user_id)
    }
}

/// Patch for updating a task record
///
/// `assigned_to` uses a nested option so `Some(None)` unassigns while
/// `None` leaves the assignment untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    /// New title
    pub title: Option<String>,

    /// New workflow status
    pub status: Option<TaskStatus>,

    /// New assignee (use `Some(None)` to unassign)
    pub assigned_to: Option<Option<Uuid>>,
}

impl TaskPatch {
    /// True when the patch would not change anything
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.status.is_none() && self.assigned_to.is_none()
    }

    /// True when the patch touches nothing besides `status`
    ///
    /// The member path of task update is all-or-nothing: a patch that
    /// also carries `title` or `assigned_to` is rejected wholesale.
    pub fn status_only(&self) -> bool {
        self.title.is_none() && self.assigned_to.is_none()
    }
}
