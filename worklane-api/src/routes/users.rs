/// User profile endpoints
///
/// # Endpoints
///
/// - `GET /api/users/me` - Current profile
/// - `GET /api/users` - All users (any authenticated identity; used to
///   pick project members)
/// - `PUT /api/users/profile` - Update name, avatar reference, password
///
/// Avatar bytes live in the external file store; this API only stores
/// or clears the URL-shaped reference on the user record.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use validator::Validate;
use worklane_shared::auth::password;
use worklane_shared::models::user::{User, UserIdentity, UserPatch};

/// Profile update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// New display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    /// New avatar reference, as returned by the file store
    #[validate(url(message = "Avatar reference must be a URL"))]
    pub avatar_url: Option<String>,

    /// Clear the avatar reference
    #[serde(default)]
    pub remove_avatar: bool,

    /// Current password; required when changing the password
    pub current_password: Option<String>,

    /// New password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: Option<String>,
}

/// Current user profile
pub async fn me(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<Json<User>> {
    let user = state
        .store
        .find_user(identity.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

    Ok(Json(user))
}

/// Lists all users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.store.list_users().await?;
    Ok(Json(users))
}

/// Updates the current user's profile
///
/// # Errors
///
/// - `400 Bad Request`: Password change without or with a wrong current
///   password
/// - `404 Not Found`: The account no longer exists
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<User>> {
    req.validate().map_err(ApiError::from_validation)?;

    let user = state
        .store
        .find_user(identity.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

    let mut patch = UserPatch {
        name: req.name,
        ..Default::default()
    };

    // remove_avatar wins over a simultaneously provided reference.
    if req.remove_avatar {
        patch.avatar_url = Some(None);
    } else if let Some(avatar_url) = req.avatar_url {
        patch.avatar_url = Some(Some(avatar_url));
    }

    if let Some(new_password) = req.new_password {
        let current = req.current_password.ok_or_else(|| {
            ApiError::BadRequest("Current password required to change password".to_string())
        })?;

        let matches = password::verify_password(&current, &user.password_hash)
            .map_err(|e| ApiError::InternalError(e.to_string()))?;
        if !matches {
            return Err(ApiError::BadRequest(
                "Current password is incorrect".to_string(),
            ));
        }

        patch.password_hash = Some(
            password::hash_password(&new_password)
                .map_err(|e| ApiError::InternalError(e.to_string()))?,
        );
    }

    let updated = state
        .store
        .update_user(identity.id, patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

    Ok(Json(updated))
}
