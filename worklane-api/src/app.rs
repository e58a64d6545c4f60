/// Application state and router builder
///
/// Defines the shared application state and builds the Axum router with
/// all routes and middleware. The state holds the store as a trait
/// object so the same router runs against Postgres in production and
/// the in-memory store in tests.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use worklane_api::{app::AppState, config::Config};
/// use worklane_shared::db::pool::{create_pool, DatabaseConfig};
/// use worklane_shared::store::postgres::PgStore;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(DatabaseConfig {
///     url: config.database.url.clone(),
///     ..Default::default()
/// })
/// .await?;
///
/// let state = AppState::new(Arc::new(PgStore::new(pool)), config);
/// let app = worklane_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use worklane_shared::auth::jwt;
use worklane_shared::store::Store;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor; both
/// fields are `Arc`s so the clone is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend
    pub store: Arc<dyn Store>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Arc<dyn Store>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                               # Health check (public)
/// └── /api/
///     ├── /auth/                            # Public
///     │   ├── POST /register
///     │   └── POST /login
///     ├── /users/                           # Authenticated
///     │   ├── GET  /me
///     │   ├── GET  /
///     │   └── PUT  /profile
///     ├── /projects/                        # Authenticated
///     │   ├── GET    /          POST   /
///     │   ├── GET    /:id       PATCH  /:id      DELETE /:id
///     │   ├── POST   /:id/members
///     │   ├── DELETE /:id/members/:member_id
///     │   ├── POST   /:id/tasks
///     │   ├── PATCH  /:id/tasks/:task_id
///     │   └── DELETE /:id/tasks/:task_id
///     ├── /tasks/                           # Authenticated
///     │   ├── GET /
///     │   └── GET /project/:project_id
///     └── /dashboard                        # Authenticated
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Public: no token required.
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    let user_routes = Router::new()
        .route("/me", get(routes::users::me))
        .route("/", get(routes::users::list_users))
        .route("/profile", put(routes::users::update_profile));

    let project_routes = Router::new()
        .route(
            "/",
            get(routes::projects::list_projects).post(routes::projects::create_project),
        )
        .route(
            "/:id",
            get(routes::projects::get_project)
                .patch(routes::projects::update_project)
                .delete(routes::projects::delete_project),
        )
        .route("/:id/members", post(routes::projects::add_member))
        .route(
            "/:id/members/:member_id",
            axum::routing::delete(routes::projects::remove_member),
        )
        .route("/:id/tasks", post(routes::tasks::create_task))
        .route(
            "/:id/tasks/:task_id",
            axum::routing::patch(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        );

    let task_routes = Router::new()
        .route("/", get(routes::tasks::list_tasks))
        .route("/project/:project_id", get(routes::tasks::project_tasks));

    let dashboard_routes = Router::new().route("/", get(routes::dashboard::dashboard_counts));

    // Everything except /auth requires a valid bearer token.
    let protected = Router::new()
        .nest("/users", user_routes)
        .nest("/projects", project_routes)
        .nest("/tasks", task_routes)
        .nest("/dashboard", dashboard_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ));

    let api_routes = Router::new().nest("/auth", auth_routes).merge(protected);

    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
    };

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Bearer token authentication middleware
///
/// Validates the `Authorization: Bearer <token>` header and injects the
/// resulting [`worklane_shared::models::user::UserIdentity`] into
/// request extensions for handlers to extract.
async fn bearer_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            crate::error::ApiError::Unauthorized("Missing authorization header".to_string())
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        crate::error::ApiError::BadRequest("Expected Bearer token".to_string())
    })?;

    let claims = jwt::validate_token(token, state.jwt_secret())?;

    req.extensions_mut().insert(claims.identity());

    Ok(next.run(req).await)
}
