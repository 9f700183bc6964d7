// src/models/user.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A board member as seen by the rest of the application.
/// Credentials never live here; the auth provider handles passwords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

/// Result of a successful sign-in.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: Option<i64>,
    pub refresh_token: Option<String>,
    pub user: User,
}

/// Sign-up attributes accepted by every auth provider.
#[derive(Debug, Clone)]
pub struct SignUp {
    pub email: String,
    pub password: String,
    pub name: String,
    pub location: String,
}

/// Claims carried by tokens the local backend issues.
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    /// subject / user id
    pub sub: String,
    pub email: String,
    /// session id, removed from the session slot on sign-out
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}
