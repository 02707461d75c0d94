// JWT token generation and validation service

use crate::auth::error::AuthError;
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

/// Token capability consumed by the HTTP layer
///
/// Implementations must never place password material in the token.
pub trait Authorization: Send + Sync {
    /// Issue a signed token for the given username
    fn generate_jwt(&self, username: &str) -> Result<String, AuthError>;

    /// Validate a token and return the username it was issued for
    fn validate_jwt(&self, token: &str) -> Result<String, AuthError>;
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub iat: i64, // issued at timestamp
    pub exp: i64, // expiration timestamp
}

/// HS256 token service
pub struct JwtService {
    secret: String,
    duration: i64, // in seconds
}

impl JwtService {
    /// Create a new JwtService with a secret key and a validity in seconds
    pub fn new(secret: String, duration: i64) -> Self {
        Self { secret, duration }
    }

    /// Decode and verify a token, returning its claims
    pub fn decode_claims(&self, token: &str) -> Result<Claims, AuthError> {
        // Only HS256 is accepted; anything else is an algorithm mismatch
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })
    }
}

impl Authorization for JwtService {
    fn generate_jwt(&self, username: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            username: username.to_string(),
            iat: now,
            exp: now + self.duration,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    fn validate_jwt(&self, token: &str) -> Result<String, AuthError> {
        self.decode_claims(token).map(|claims| claims.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SECRET: &str = "test_secret_key_for_testing_purposes";

    fn test_jwt_service() -> JwtService {
        JwtService::new(SECRET.to_string(), 3600)
    }

    fn sign(claims: &Claims, header: Header) -> String {
        encode(&header, claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
    }

    #[test]
    fn test_token_expiration_matches_configured_duration() {
        let service = test_jwt_service();
        let token = service.generate_jwt("johndoe").unwrap();
        let claims = service.decode_claims(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_token_carries_username() {
        let service = test_jwt_service();
        let token = service.generate_jwt("johndoe").unwrap();

        assert_eq!(service.validate_jwt(&token).unwrap(), "johndoe");
    }

    #[test]
    fn test_token_does_not_carry_password() {
        let service = test_jwt_service();
        let token = service.generate_jwt("johndoe").unwrap();

        let payload = decode::<serde_json::Value>(
            &token,
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap()
        .claims;

        assert!(payload.get("password").is_none());
        assert_eq!(payload["username"], "johndoe");
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let service = test_jwt_service();

        assert_eq!(service.validate_jwt(""), Err(AuthError::InvalidToken));
        assert_eq!(service.validate_jwt("not.a.token"), Err(AuthError::InvalidToken));
        assert_eq!(
            service.validate_jwt("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.invalid.signature"),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn test_token_signature_verification() {
        let service1 = JwtService::new("secret1".to_string(), 3600);
        let service2 = JwtService::new("secret2".to_string(), 3600);

        let token = service1.generate_jwt("johndoe").unwrap();

        assert!(service1.validate_jwt(&token).is_ok());
        assert_eq!(service2.validate_jwt(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            username: "johndoe".to_string(),
            iat: now - 1000,
            exp: now - 500,
        };
        let token = sign(&claims, Header::new(Algorithm::HS256));

        assert_eq!(test_jwt_service().validate_jwt(&token), Err(AuthError::ExpiredToken));
    }

    #[test]
    fn test_other_hmac_algorithm_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            username: "johndoe".to_string(),
            iat: now,
            exp: now + 600,
        };
        let token = sign(&claims, Header::new(Algorithm::HS512));

        assert_eq!(test_jwt_service().validate_jwt(&token), Err(AuthError::InvalidToken));
    }

    proptest! {
        #[test]
        fn prop_issued_tokens_validate_to_their_username(
            username in "[a-z][a-z0-9_]{2,20}"
        ) {
            let service = test_jwt_service();
            let token = service.generate_jwt(&username)?;
            prop_assert_eq!(service.validate_jwt(&token)?, username);
        }

        #[test]
        fn prop_random_strings_are_rejected(
            malformed in "[a-zA-Z0-9]{10,50}"
        ) {
            let service = test_jwt_service();
            prop_assert!(service.validate_jwt(&malformed).is_err());
        }
    }
}
