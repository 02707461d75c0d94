pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod users;
pub mod validation;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use auth::{require_auth, Authorization};
use users::{
    handlers, ChangePasswordRequest, CreateUserRequest, LoginRequest, TokenResponse,
    UpdateUserRequest, UserResponse, UserService,
};

/// Route group prefix shared by every endpoint
pub const BASE_PATH: &str = "/api/go-manage-hex";

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::ping,
        handlers::create_user_handler,
        handlers::login_handler,
        handlers::search_user_handler,
        handlers::delete_user_handler,
        handlers::update_user_handler,
        handlers::change_password_handler,
    ),
    components(
        schemas(
            UserResponse,
            CreateUserRequest,
            UpdateUserRequest,
            ChangePasswordRequest,
            LoginRequest,
            TokenResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "users", description = "User management endpoints"),
        (name = "auth", description = "Token issuance"),
        (name = "health", description = "Liveness")
    ),
    info(
        title = "User Management API",
        version = "1.0.0",
        description = "RESTful API for creating, searching, updating and deleting users"
    )
)]
pub struct ApiDoc;

/// Registers the bearer JWT security scheme referenced by protected paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub auth: Arc<dyn Authorization>,
}

/// Creates and configures the application router
/// Public routes are open; the rest sit behind the bearer-token gate
pub fn create_router(state: AppState) -> Router {
    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route("/search", get(handlers::search_user_handler))
        .route("/delete", delete(handlers::delete_user_handler))
        .route("/update", patch(handlers::update_user_handler))
        .route("/change-password", patch(handlers::change_password_handler))
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            require_auth,
        ));

    let public = Router::new()
        .route("/ping", get(handlers::ping))
        .route("/create", post(handlers::create_user_handler))
        .route("/login", post(handlers::login_handler));

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest(BASE_PATH, public.merge(protected))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
