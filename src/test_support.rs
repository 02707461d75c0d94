// In-memory collaborators shared by the unit and HTTP tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::auth::{Authorization, JwtService};
use crate::db::TableName;
use crate::users::{User, UserPatch, UserRepository, UserService};
use crate::AppState;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes";

/// `UserRepository` backed by a map keyed by username
///
/// With `failing_writes` set every mutating call fails like a dropped connection.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
    failing_writes: bool,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failing_writes() -> Self {
        Self {
            failing_writes: true,
            ..Self::default()
        }
    }

    pub fn insert(&self, user: User) {
        self.users.lock().unwrap().insert(user.username.clone(), user);
    }

    pub fn get(&self, username: &str) -> Option<User> {
        self.users.lock().unwrap().get(username).cloned()
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    fn write_guard(&self) -> Result<(), sqlx::Error> {
        if self.failing_writes {
            Err(sqlx::Error::Protocol("some db error".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_table(&self, _name: &TableName) -> Result<(), sqlx::Error> {
        Ok(())
    }

    async fn check_exists(&self, username: &str) -> Result<bool, sqlx::Error> {
        Ok(self.users.lock().unwrap().contains_key(username))
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        Ok(self.get(username))
    }

    async fn new_user(&self, user: &User) -> Result<(), sqlx::Error> {
        self.write_guard()?;
        self.insert(user.clone());
        Ok(())
    }

    async fn delete_user(&self, username: &str) -> Result<(), sqlx::Error> {
        self.write_guard()?;
        self.users
            .lock()
            .unwrap()
            .remove(username)
            .map(|_| ())
            .ok_or(sqlx::Error::RowNotFound)
    }

    async fn update_user(&self, username: &str, patch: &UserPatch) -> Result<(), sqlx::Error> {
        self.write_guard()?;
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(username).ok_or(sqlx::Error::RowNotFound)?;
        user.name = patch.name.clone();
        user.last_name = patch.last_name.clone();
        user.email = patch.email.clone();
        Ok(())
    }

    async fn change_pwd(&self, password_hash: &str, username: &str) -> Result<(), sqlx::Error> {
        self.write_guard()?;
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(username).ok_or(sqlx::Error::RowNotFound)?;
        user.password = password_hash.to_string();
        Ok(())
    }
}

pub fn test_jwt_service() -> JwtService {
    JwtService::new(TEST_SECRET.to_string(), 3600)
}

/// Application state wired to the given repository and the test JWT secret
pub fn test_state(repository: Arc<InMemoryUserRepository>) -> AppState {
    let auth: Arc<dyn Authorization> = Arc::new(test_jwt_service());
    AppState {
        users: UserService::new(repository),
        auth,
    }
}
