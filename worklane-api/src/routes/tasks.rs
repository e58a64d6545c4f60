/// Task endpoints
///
/// # Endpoints
///
/// - `POST   /api/projects/:id/tasks` - Create (admin only)
/// - `PATCH  /api/projects/:id/tasks/:task_id` - Update
/// - `DELETE /api/projects/:id/tasks/:task_id` - Delete (admin only)
/// - `GET    /api/tasks` - Ten most recent tasks visible to the caller
/// - `GET    /api/tasks/project/:project_id` - Tasks of one project
///
/// In the update request, `assigned_to` distinguishes "absent" (leave
/// the assignment alone) from `null` (unassign).

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;
use validator::Validate;
use worklane_shared::models::task::{Task, TaskPatch, TaskStatus};
use worklane_shared::models::user::UserIdentity;
use worklane_shared::service::query::QueryService;
use worklane_shared::service::tasks::TaskService;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Optional assignee
    pub assigned_to: Option<Uuid>,
}

/// Update task request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// New title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    /// New status
    pub status: Option<TaskStatus>,

    /// New assignee; an explicit `null` unassigns
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_to: Option<Option<Uuid>>,
}

/// Deserializes a present-but-possibly-null field into `Some(inner)`,
/// letting `#[serde(default)]` produce `None` when the field is absent
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<Uuid>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Uuid>::deserialize(deserializer).map(Some)
}

/// Creates a task in a project
pub async fn create_task(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(project_id): Path<Uuid>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate().map_err(ApiError::from_validation)?;

    let task = TaskService::new(state.store.as_ref())
        .create(&identity, project_id, req.title, req.assigned_to)
        .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Updates a task
pub async fn update_task(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path((project_id, task_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    req.validate().map_err(ApiError::from_validation)?;

    let task = TaskService::new(state.store.as_ref())
        .update(
            &identity,
            project_id,
            task_id,
            TaskPatch {
                title: req.title,
                status: req.status,
                assigned_to: req.assigned_to,
            },
        )
        .await?;

    Ok(Json(task))
}

/// Deletes a task
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path((_project_id, task_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<Task>> {
    let task = TaskService::new(state.store.as_ref())
        .delete(&identity, task_id)
        .await?;

    Ok(Json(task))
}

/// Lists the ten most recent tasks visible to the caller
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = QueryService::new(state.store.as_ref())
        .list_tasks(&identity)
        .await?;

    Ok(Json(tasks))
}

/// Lists all tasks of one project
pub async fn project_tasks(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = QueryService::new(state.store.as_ref())
        .project_tasks(project_id)
        .await?;

    Ok(Json(tasks))
}
