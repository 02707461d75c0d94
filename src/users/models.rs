// User data models and DTOs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// User database model
///
/// `password` always holds an Argon2 PHC hash once persisted.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// User response model (excludes password)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    #[schema(example = "John")]
    pub name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    #[schema(example = "johndoe")]
    pub username: String,
    #[schema(example = "johndoe@example.com")]
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            last_name: user.last_name,
            username: user.username,
            email: user.email,
        }
    }
}

/// Input for account creation, password still in plaintext
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// The mutable profile fields of a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPatch {
    pub name: String,
    pub last_name: String,
    pub email: String,
}

/// Registration request DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(custom = "crate::validation::validate_not_blank", length(max = 64))]
    #[schema(example = "John")]
    pub name: String,
    #[validate(custom = "crate::validation::validate_not_blank", length(max = 64))]
    #[schema(example = "Doe")]
    pub last_name: String,
    #[validate(custom = "crate::validation::validate_not_blank", length(max = 64))]
    #[schema(example = "johndoe")]
    pub username: String,
    #[validate(custom = "crate::validation::validate_not_blank", length(max = 255))]
    #[schema(example = "johndoe@example.com")]
    pub email: String,
    #[validate(custom = "crate::validation::validate_not_blank")]
    #[schema(example = "Password1234567")]
    pub password: String,
}

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            name: request.name,
            last_name: request.last_name,
            username: request.username,
            email: request.email,
            password: request.password,
        }
    }
}

/// Profile update request DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(custom = "crate::validation::validate_not_blank", length(max = 64))]
    #[schema(example = "Johncito")]
    pub name: String,
    #[validate(custom = "crate::validation::validate_not_blank", length(max = 64))]
    #[schema(example = "Doecito")]
    pub last_name: String,
    #[validate(custom = "crate::validation::validate_not_blank", length(max = 255))]
    #[schema(example = "johncitodoecito@example.com")]
    pub email: String,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(request: UpdateUserRequest) -> Self {
        Self {
            name: request.name,
            last_name: request.last_name,
            email: request.email,
        }
    }
}

/// Password change request body
///
/// Both fields are optional so a body can complete a partial query string.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    #[schema(example = "johndoe")]
    pub username: Option<String>,
    #[schema(example = "NewPassword1234")]
    pub new_pwd: Option<String>,
}

/// Login request DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(custom = "crate::validation::validate_not_blank")]
    #[schema(example = "johndoe")]
    pub username: String,
    #[validate(custom = "crate::validation::validate_not_blank")]
    #[schema(example = "Password1234567")]
    pub password: String,
}

/// Login response payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// `?username=` query string
#[derive(Debug, Deserialize)]
pub struct UsernameQuery {
    pub username: Option<String>,
}

/// `?username=&confirmation=` query string for deletion
#[derive(Debug, Deserialize)]
pub struct DeleteUserQuery {
    pub username: Option<String>,
    pub confirmation: Option<String>,
}

/// `?username=&newPwd=` query string for password changes
#[derive(Debug, Deserialize)]
pub struct ChangePasswordQuery {
    pub username: Option<String>,
    #[serde(rename = "newPwd")]
    pub new_pwd: Option<String>,
}
