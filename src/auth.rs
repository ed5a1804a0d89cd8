// ABOUTME: JWT-based user authentication
// ABOUTME: Token generation, validation and bearer header extraction
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! # Authentication
//!
//! JWT issuance and validation for API requests. Handlers call
//! [`AuthManager::authenticate`] for endpoints that require a user, and
//! [`AuthManager::authenticate_optional`] for endpoints readable by
//! anonymous viewers (public workouts and comments).

use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::User;

/// Default lifetime of issued tokens
const TOKEN_EXPIRY_HOURS: i64 = 24;

/// JWT claims for user authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// The outcome of a successful authentication
#[derive(Debug, Clone, Copy)]
pub struct AuthResult {
    /// Authenticated user ID
    pub user_id: Uuid,
}

/// Issues and validates JWTs for API authentication
#[derive(Clone)]
pub struct AuthManager {
    secret: Vec<u8>,
    expiry_hours: i64,
}

impl AuthManager {
    /// Create a new auth manager with the given signing secret
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            expiry_hours: TOKEN_EXPIRY_HOURS,
        }
    }

    /// Generate a token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))
    }

    /// Validate a token and return its claims
    ///
    /// # Errors
    ///
    /// Returns an error if the token is expired, malformed or carries
    /// an invalid signature
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::auth_expired(),
            _ => AppError::auth_invalid(format!("Invalid auth token: {e}")),
        })
    }

    /// Authenticate a request from its headers, requiring a valid
    /// bearer token
    ///
    /// # Errors
    ///
    /// Returns an error if the header is missing or the token invalid
    pub fn authenticate(&self, headers: &HeaderMap) -> AppResult<AuthResult> {
        let token = extract_bearer_token(headers).ok_or_else(AppError::auth_required)?;
        let claims = self.validate_token(token)?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::auth_invalid("Invalid subject in auth token"))?;
        Ok(AuthResult { user_id })
    }

    /// Authenticate a request if credentials are present
    ///
    /// Anonymous requests yield `Ok(None)`; requests carrying a token
    /// must still carry a valid one.
    ///
    /// # Errors
    ///
    /// Returns an error only when a token is present but invalid
    pub fn authenticate_optional(&self, headers: &HeaderMap) -> AppResult<Option<AuthResult>> {
        match extract_bearer_token(headers) {
            Some(token) => {
                let claims = self.validate_token(token)?;
                let user_id = Uuid::parse_str(&claims.sub)
                    .map_err(|_| AppError::auth_invalid("Invalid subject in auth token"))?;
                Ok(Some(AuthResult { user_id }))
            }
            None => Ok(None),
        }
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User::new("test", "test@example.com", "hash")
    }

    #[test]
    fn test_token_round_trip() {
        let manager = AuthManager::new("test-secret");
        let user = test_user();

        let token = manager.generate_token(&user).unwrap();
        let claims = manager.validate_token(&token).unwrap();

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, user.email);
    }

    #[test]
    fn test_invalid_signature_rejected() {
        let manager = AuthManager::new("test-secret");
        let other = AuthManager::new("other-secret");
        let token = manager.generate_token(&test_user()).unwrap();

        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_authenticate_requires_bearer_header() {
        let manager = AuthManager::new("test-secret");
        let headers = HeaderMap::new();

        let error = manager.authenticate(&headers).unwrap_err();
        assert_eq!(error.code, crate::errors::ErrorCode::AuthRequired);
    }

    #[test]
    fn test_authenticate_optional_allows_anonymous() {
        let manager = AuthManager::new("test-secret");
        let headers = HeaderMap::new();

        assert!(manager.authenticate_optional(&headers).unwrap().is_none());
    }

    #[test]
    fn test_authenticate_optional_rejects_bad_token() {
        let manager = AuthManager::new("test-secret");
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer not-a-jwt".parse().unwrap());

        assert!(manager.authenticate_optional(&headers).is_err());
    }
}
