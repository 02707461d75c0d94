use crate::auth::PasswordHashError;

/// Service-level errors for user management
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("user not found")]
    NotFound,

    #[error("user already exists")]
    AlreadyExists,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid password")]
    InvalidPassword,

    #[error("invalid credentials")]
    InvalidCredentials,

    /// Storage failure wrapped with the operation that triggered it
    #[error("{context}. Error: {source}")]
    Storage {
        context: &'static str,
        source: sqlx::Error,
    },

    #[error(transparent)]
    PasswordHash(#[from] PasswordHashError),
}

impl UserError {
    /// Wrap a storage error, recognising the cases that have a domain meaning
    pub fn storage(context: &'static str, source: sqlx::Error) -> Self {
        let unique_violation = source
            .as_database_error()
            .map(|db_err| db_err.is_unique_violation())
            .unwrap_or(false);

        if matches!(source, sqlx::Error::RowNotFound) {
            UserError::NotFound
        } else if unique_violation {
            UserError::AlreadyExists
        } else {
            UserError::Storage { context, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_becomes_not_found() {
        let err = UserError::storage("error deleting user", sqlx::Error::RowNotFound);
        assert!(matches!(err, UserError::NotFound));
    }

    #[test]
    fn test_other_storage_errors_keep_context() {
        let err = UserError::storage(
            "error updating user",
            sqlx::Error::Protocol("some db error".to_string()),
        );
        assert!(matches!(err, UserError::Storage { context: "error updating user", .. }));
        assert!(err.to_string().starts_with("error updating user. Error:"));
    }
}
