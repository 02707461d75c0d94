// HTTP handlers for user endpoints

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::error::{ApiError, INVALID_BODY_MSG, INVALID_CREDENTIALS_MSG, INVALID_QUERY_PARAMS_MSG};
use crate::models::ApiResponse;
use crate::users::{
    models::{
        ChangePasswordQuery, ChangePasswordRequest, CreateUserRequest, DeleteUserQuery,
        LoginRequest, TokenResponse, UpdateUserRequest, UserResponse, UsernameQuery,
    },
    UserError,
};
use crate::validation::parse_bool_flag;
use crate::AppState;

pub const USER_FOUND_MSG: &str = "user found successfully";
pub const USER_CREATED_MSG: &str = "user created successfully";
pub const USER_UPDATED_MSG: &str = "user updated successfully";
pub const USER_DELETED_MSG: &str = "user deleted successfully";
pub const PASSWORD_CHANGED_MSG: &str = "password changed successfully";
pub const USER_LOGGED_MSG: &str = "user logged";
pub const INVALID_CONFIRMATION_MSG: &str = "invalid confirmation value";
pub const DELETE_CANCELLED_MSG: &str = "delete operation canceled";

/// Returns the value when present and not blank
fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required_query(value: Option<String>) -> Result<String, ApiError> {
    required(value).ok_or_else(|| ApiError::BadRequest(INVALID_QUERY_PARAMS_MSG.to_string()))
}

/// Liveness probe
/// GET /api/go-manage-hex/ping
#[utoipa::path(
    get,
    path = "/api/go-manage-hex/ping",
    responses((status = 200, description = "Service is up")),
    tag = "health"
)]
pub async fn ping() -> Json<Value> {
    Json(json!({ "message": "pong" }))
}

/// Register a new user
/// POST /api/go-manage-hex/create
#[utoipa::path(
    post,
    path = "/api/go-manage-hex/create",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created, wrapped in the response envelope", body = UserResponse),
        (status = 400, description = "Invalid body, email or password"),
        (status = 409, description = "Username or email already taken"),
        (status = 500, description = "Internal server error")
    ),
    tag = "users"
)]
pub async fn create_user_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    tracing::debug!("Creating new user: {}", request.username);
    let created = state.users.create_user(request.into()).await?;

    Ok(ApiResponse::new(
        StatusCode::CREATED,
        USER_CREATED_MSG,
        Some(created.into()),
    ))
}

/// Exchange credentials for a bearer token
/// POST /api/go-manage-hex/login
#[utoipa::path(
    post,
    path = "/api/go-manage-hex/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued, wrapped in the response envelope", body = TokenResponse),
        (status = 400, description = "Invalid body"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Token could not be generated")
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiResponse<TokenResponse>, ApiError> {
    let Json(request) = payload?;
    if request.validate().is_err() {
        return Err(ApiError::BadRequest(INVALID_BODY_MSG.to_string()));
    }

    let user = state
        .users
        .login(&request.username, &request.password)
        .await
        .map_err(|e| match e {
            UserError::NotFound | UserError::InvalidCredentials => {
                ApiError::Unauthorized(INVALID_CREDENTIALS_MSG.to_string())
            }
            other => other.into(),
        })?;

    let token = state.auth.generate_jwt(&user.username)?;

    Ok(ApiResponse::ok(USER_LOGGED_MSG, TokenResponse { token }))
}

/// Look a user up by username
/// GET /api/go-manage-hex/search?username=
#[utoipa::path(
    get,
    path = "/api/go-manage-hex/search",
    params(("username" = String, Query, description = "Username to look up")),
    responses(
        (status = 200, description = "User found, wrapped in the response envelope", body = UserResponse),
        (status = 400, description = "Missing username"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn search_user_handler(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Query(params): Query<UsernameQuery>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    let username = required_query(params.username)?;
    tracing::debug!("{} searching user {}", caller.username, username);

    let user = state.users.search_user(&username).await?;

    Ok(ApiResponse::ok(USER_FOUND_MSG, user.into()))
}

/// Delete a user once the caller confirms
/// DELETE /api/go-manage-hex/delete?username=&confirmation=
#[utoipa::path(
    delete,
    path = "/api/go-manage-hex/delete",
    params(
        ("username" = String, Query, description = "Username to delete"),
        ("confirmation" = bool, Query, description = "Must be true for the deletion to happen")
    ),
    responses(
        (status = 200, description = "User deleted, or deletion canceled"),
        (status = 400, description = "Missing username or invalid confirmation"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn delete_user_handler(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Query(params): Query<DeleteUserQuery>,
) -> Result<ApiResponse<()>, ApiError> {
    let username = required_query(params.username)?;

    let confirmation = params
        .confirmation
        .as_deref()
        .and_then(parse_bool_flag)
        .ok_or_else(|| ApiError::BadRequest(INVALID_CONFIRMATION_MSG.to_string()))?;

    if !confirmation {
        tracing::debug!("{} canceled deletion of {}", caller.username, username);
        return Ok(ApiResponse::message(StatusCode::OK, DELETE_CANCELLED_MSG));
    }

    state.users.delete_user(&username).await?;
    tracing::info!("{} deleted user {}", caller.username, username);

    Ok(ApiResponse::message(StatusCode::OK, USER_DELETED_MSG))
}

/// Update a user's name, last name and email
/// PATCH /api/go-manage-hex/update?username=
#[utoipa::path(
    patch,
    path = "/api/go-manage-hex/update",
    params(("username" = String, Query, description = "Username to update")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated, wrapped in the response envelope", body = UserResponse),
        (status = 400, description = "Missing username, invalid body or invalid email"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn update_user_handler(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Query(params): Query<UsernameQuery>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    let username = required_query(params.username)?;
    let Json(request) = payload?;
    request.validate()?;

    tracing::debug!("{} updating user {}", caller.username, username);
    let updated = state.users.update_user(&username, request.into()).await?;

    Ok(ApiResponse::ok(USER_UPDATED_MSG, updated.into()))
}

/// Change a user's password
/// PATCH /api/go-manage-hex/change-password?username=&newPwd=
///
/// The query string wins; a JSON body `{username, new_pwd}` fills whatever it lacks.
#[utoipa::path(
    patch,
    path = "/api/go-manage-hex/change-password",
    params(
        ("username" = Option<String>, Query, description = "Username whose password changes"),
        ("newPwd" = Option<String>, Query, description = "New password")
    ),
    request_body(content = ChangePasswordRequest, description = "Alternative to the query string"),
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Missing parameters or weak password"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn change_password_handler(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Query(params): Query<ChangePasswordQuery>,
    body: Option<Json<ChangePasswordRequest>>,
) -> Result<ApiResponse<()>, ApiError> {
    let (body_username, body_pwd) = match body {
        Some(Json(request)) => (request.username, request.new_pwd),
        None => (None, None),
    };

    let username = required_query(required(params.username).or(body_username))?;
    let new_pwd = required_query(required(params.new_pwd).or(body_pwd))?;

    tracing::debug!("{} changing password of {}", caller.username, username);
    state.users.change_user_pwd(&new_pwd, &username).await?;

    Ok(ApiResponse::message(StatusCode::OK, PASSWORD_CHANGED_MSG))
}
