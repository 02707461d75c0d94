use std::sync::Arc;

use uuid::Uuid;

use crate::auth::PasswordService;
use crate::users::{NewUser, User, UserError, UserPatch, UserRepository};
use crate::validation::{validate_email_address, validate_password_strength};

/// Service layer for user business logic
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    /// Create a new UserService
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    async fn exists(&self, username: &str, context: &'static str) -> Result<bool, UserError> {
        self.repository
            .check_exists(username)
            .await
            .map_err(|e| UserError::storage(context, e))
    }

    async fn ensure_exists(&self, username: &str, context: &'static str) -> Result<(), UserError> {
        if self.exists(username, context).await? {
            Ok(())
        } else {
            tracing::debug!("User {} not found", username);
            Err(UserError::NotFound)
        }
    }

    /// Fetch a stored user, password hash included
    pub async fn search_user(&self, username: &str) -> Result<User, UserError> {
        const CONTEXT: &str = "error searching user";

        self.ensure_exists(username, CONTEXT).await?;

        self.repository
            .get_by_username(username)
            .await
            .map_err(|e| UserError::storage(CONTEXT, e))?
            .ok_or(UserError::NotFound)
    }

    /// Create a new user
    ///
    /// This method:
    /// 1. Rejects a username that is already taken
    /// 2. Validates the email address and the password strength
    /// 3. Assigns a fresh id and hashes the password
    /// 4. Persists the record
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, UserError> {
        const CONTEXT: &str = "error creating user";

        if self.exists(&new_user.username, CONTEXT).await? {
            tracing::warn!("Attempt to create duplicate user: {}", new_user.username);
            return Err(UserError::AlreadyExists);
        }

        validate_email_address(&new_user.email).map_err(|_| UserError::InvalidEmail)?;
        validate_password_strength(&new_user.password).map_err(|_| UserError::InvalidPassword)?;

        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            last_name: new_user.last_name,
            username: new_user.username,
            email: new_user.email,
            password: PasswordService::hash_password(&new_user.password)?,
        };

        self.repository
            .new_user(&user)
            .await
            .map_err(|e| UserError::storage(CONTEXT, e))?;

        tracing::info!("Created user {} with id {}", user.username, user.id);
        Ok(user)
    }

    /// Physically delete a user
    pub async fn delete_user(&self, username: &str) -> Result<(), UserError> {
        const CONTEXT: &str = "error deleting user";

        self.ensure_exists(username, CONTEXT).await?;

        self.repository
            .delete_user(username)
            .await
            .map_err(|e| UserError::storage(CONTEXT, e))?;

        tracing::info!("Deleted user {}", username);
        Ok(())
    }

    /// Replace name, last_name and email; username and password are untouched
    pub async fn update_user(&self, username: &str, patch: UserPatch) -> Result<User, UserError> {
        const CONTEXT: &str = "error updating user";

        self.ensure_exists(username, CONTEXT).await?;

        validate_email_address(&patch.email).map_err(|_| UserError::InvalidEmail)?;

        self.repository
            .update_user(username, &patch)
            .await
            .map_err(|e| UserError::storage(CONTEXT, e))?;

        tracing::info!("Updated user {}", username);

        self.repository
            .get_by_username(username)
            .await
            .map_err(|e| UserError::storage(CONTEXT, e))?
            .ok_or(UserError::NotFound)
    }

    /// Replace the password hash; every other field is untouched
    pub async fn change_user_pwd(&self, new_pwd: &str, username: &str) -> Result<(), UserError> {
        const CONTEXT: &str = "error changing password";

        self.ensure_exists(username, CONTEXT).await?;

        validate_password_strength(new_pwd).map_err(|_| UserError::InvalidPassword)?;
        let hash = PasswordService::hash_password(new_pwd)?;

        self.repository
            .change_pwd(&hash, username)
            .await
            .map_err(|e| UserError::storage(CONTEXT, e))?;

        tracing::info!("Changed password for user {}", username);
        Ok(())
    }

    /// Check credentials and return the matching user
    pub async fn login(&self, username: &str, password: &str) -> Result<User, UserError> {
        let user = self.search_user(username).await?;

        if !PasswordService::verify_password(password, &user.password)? {
            tracing::warn!("Wrong password for user {}", username);
            return Err(UserError::InvalidCredentials);
        }

        tracing::debug!("User {} logged in", username);
        Ok(user)
    }
}
