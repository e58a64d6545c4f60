/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/auth/register` - Create an account and get a token
/// - `POST /api/auth/login` - Exchange credentials for a token
///
/// Registration picks the account role once; there is no role-change
/// operation anywhere in the API.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;
use worklane_shared::auth::{jwt, password, verify_credentials};
use worklane_shared::models::user::{Role, User};

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Account role; defaults to member
    pub role: Option<Role>,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Token plus the authenticated user
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests
    pub token: String,

    /// The authenticated account (password hash omitted)
    pub user: User,
}

/// Register a new user
///
/// # Errors
///
/// - `409 Conflict`: Email already exists
/// - `422 Unprocessable Entity`: Validation failed
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    req.validate().map_err(ApiError::from_validation)?;

    let password_hash = password::hash_password(&req.password)
        .map_err(|e| ApiError::InternalError(e.to_string()))?;

    let role = req.role.unwrap_or(Role::Member);
    let user = User::new(req.name, req.email, role, password_hash);

    state.store.insert_user(&user).await?;

    let token = jwt::create_token(&jwt::Claims::new(user.id, user.role), state.jwt_secret())?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

/// Login with email and password
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid credentials
/// - `422 Unprocessable Entity`: Validation failed
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate().map_err(ApiError::from_validation)?;

    let user = verify_credentials(state.store.as_ref(), &req.email, &req.password).await?;

    let token = jwt::create_token(&jwt::Claims::new(user.id, user.role), state.jwt_secret())?;

    Ok(Json(AuthResponse { token, user }))
}
