/// Dashboard endpoint
///
/// # Endpoint
///
/// ```text
/// GET /api/dashboard
/// ```
///
/// Returns role-scoped counters: admins see the count of projects they
/// created and the count of all tasks system-wide; members see the
/// projects they belong to and the tasks assigned to them.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Extension, Json};
use worklane_shared::models::user::UserIdentity;
use worklane_shared::service::query::{DashboardCounts, QueryService};

/// Dashboard counters handler
pub async fn dashboard_counts(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<Json<DashboardCounts>> {
    let counts = QueryService::new(state.store.as_ref())
        .dashboard_counts(&identity)
        .await?;

    Ok(Json(counts))
}
