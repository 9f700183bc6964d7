// src/dtos/auth_dtos.rs
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::{AuthSession, SignUp, User};

pub const MIN_PASSWORD_LEN: usize = 6;

fn looks_like_email(email: &str) -> bool {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE
        .get_or_init(|| {
            Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email regex is valid")
        })
        .is_match(email)
}

#[derive(Debug, Deserialize)]
pub struct SignupIn {
    pub email: String,
    pub password: String,
    pub name: String,
    pub location: String,
}

impl SignupIn {
    /// Trims and lowercases the email, then checks every field the
    /// sign-up form marks as required.
    pub fn validate(self) -> Result<SignUp, ValidationError> {
        let name = self.name.trim();
        let email = self.email.trim().to_lowercase();
        let location = self.location.trim();

        if name.is_empty() {
            return Err(ValidationError::MissingField("Full name"));
        }
        if email.is_empty() {
            return Err(ValidationError::MissingField("Email"));
        }
        if !looks_like_email(&email) {
            return Err(ValidationError::InvalidEmail);
        }
        if location.is_empty() {
            return Err(ValidationError::MissingField("Location"));
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
        }

        Ok(SignUp {
            email,
            password: self.password,
            name: name.to_string(),
            location: location.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginIn {
    pub email: String,
    pub password: String,
}

impl LoginIn {
    pub fn validate(self) -> Result<(String, String), ValidationError> {
        let email = self.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(ValidationError::MissingField("Email"));
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingField("Password"));
        }
        Ok((email, self.password))
    }
}

#[derive(Debug, Serialize)]
pub struct SessionOut {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub token_type: String,
}

impl From<&AuthSession> for SessionOut {
    fn from(session: &AuthSession) -> Self {
        Self {
            access_token: session.access_token.clone(),
            refresh_token: session.refresh_token.clone(),
            expires_in: session.expires_in,
            token_type: session.token_type.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub user: User,
    /// Absent when the provider wants the email confirmed before sign-in.
    pub session: Option<SessionOut>,
    pub next_step: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: User,
    pub session: SessionOut,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(email: &str, password: &str, name: &str, location: &str) -> SignupIn {
        SignupIn {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            location: location.to_string(),
        }
    }

    #[test]
    fn signup_normalizes_email_and_trims_fields() {
        let out = signup("  Jane@Example.COM ", "secret1", " Jane ", " Elm Street ")
            .validate()
            .unwrap();
        assert_eq!(out.email, "jane@example.com");
        assert_eq!(out.name, "Jane");
        assert_eq!(out.location, "Elm Street");
    }

    #[test]
    fn signup_requires_every_field() {
        assert_eq!(
            signup("jane@example.com", "secret1", "  ", "Elm").validate().unwrap_err(),
            ValidationError::MissingField("Full name")
        );
        assert_eq!(
            signup("jane@example.com", "secret1", "Jane", "").validate().unwrap_err(),
            ValidationError::MissingField("Location")
        );
        assert_eq!(
            signup("not-an-email", "secret1", "Jane", "Elm").validate().unwrap_err(),
            ValidationError::InvalidEmail
        );
        assert_eq!(
            signup("jane@example.com", "123", "Jane", "Elm").validate().unwrap_err(),
            ValidationError::PasswordTooShort(MIN_PASSWORD_LEN)
        );
    }

    #[test]
    fn login_requires_credentials() {
        let err = LoginIn { email: "a@b.co".into(), password: String::new() }
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("Password"));
    }
}
