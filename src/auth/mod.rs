// Authentication module
// Provides JWT issuance and validation, Argon2 password hashing and the bearer-token gate

pub mod error;
pub mod middleware;
pub mod password;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use middleware::{require_auth, AuthenticatedUser};
pub use password::{PasswordHashError, PasswordService};
pub use token::{Authorization, Claims, JwtService};
