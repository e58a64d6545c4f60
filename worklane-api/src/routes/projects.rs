/// Project endpoints
///
/// # Endpoints
///
/// - `GET    /api/projects` - Role-scoped listing, optional `?search=`
/// - `POST   /api/projects` - Create (admin only)
/// - `GET    /api/projects/:id` - Detail with tasks
/// - `PATCH  /api/projects/:id` - Update title/description/status
/// - `DELETE /api/projects/:id` - Delete, cascading to tasks
/// - `POST   /api/projects/:id/members` - Add a member
/// - `DELETE /api/projects/:id/members/:member_id` - Remove a member
///
/// Authorization lives in the core policy engine; handlers only
/// translate between HTTP and the services.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;
use worklane_shared::models::project::{Project, ProjectStatus};
use worklane_shared::models::user::UserIdentity;
use worklane_shared::service::projects::{ProjectService, ProjectUpdate};
use worklane_shared::service::query::{ProjectDetail, QueryService};

/// Listing query parameters
#[derive(Debug, Deserialize)]
pub struct ListProjectsQuery {
    /// Case-insensitive substring filter on the title
    pub search: Option<String>,
}

/// Create project request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    /// Project title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Optional description
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
}

/// Update project request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    /// New title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    /// New description
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    /// New status
    pub status: Option<ProjectStatus>,
}

/// Add member request
#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    /// The member-role user to add
    pub member_id: Uuid,
}

/// Lists projects visible to the caller
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Query(query): Query<ListProjectsQuery>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects = QueryService::new(state.store.as_ref())
        .list_projects(&identity, query.search.as_deref())
        .await?;

    Ok(Json(projects))
}

/// Fetches one project with its tasks
pub async fn get_project(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ProjectDetail>> {
    let detail = QueryService::new(state.store.as_ref())
        .get_project(&identity, id)
        .await?;

    Ok(Json(detail))
}

/// Creates a project
pub async fn create_project(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    req.validate().map_err(ApiError::from_validation)?;

    let project = ProjectService::new(state.store.as_ref())
        .create(&identity, req.title, req.description.unwrap_or_default())
        .await?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// Updates title, description and/or status
pub async fn update_project(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProjectRequest>,
) -> ApiResult<Json<Project>> {
    req.validate().map_err(ApiError::from_validation)?;

    let project = ProjectService::new(state.store.as_ref())
        .update(
            &identity,
            id,
            ProjectUpdate {
                title: req.title,
                description: req.description,
                status: req.status,
            },
        )
        .await?;

    Ok(Json(project))
}

/// Deletes a project and its tasks
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Project>> {
    let project = ProjectService::new(state.store.as_ref())
        .delete(&identity, id)
        .await?;

    Ok(Json(project))
}

/// Adds a member to a project
pub async fn add_member(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddMemberRequest>,
) -> ApiResult<Json<Project>> {
    let project = ProjectService::new(state.store.as_ref())
        .add_member(&identity, id, req.member_id)
        .await?;

    Ok(Json(project))
}

/// Removes a member from a project (idempotent)
pub async fn remove_member(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path((id, member_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<Project>> {
    let project = ProjectService::new(state.store.as_ref())
        .remove_member(&identity, id, member_id)
        .await?;

    Ok(Json(project))
}
