// src/services/auth_services.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::SupabaseConfig;
use crate::error::AuthError;
use crate::models::{AuthSession, SignUp, User};

/// Identity capability the board depends on: account creation, password
/// sign-in, sign-out and resolving the user behind an access token.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(&self, input: SignUp) -> Result<User, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;

    /// `Ok(None)` when the token is unknown, expired or signed out.
    async fn current_user(&self, access_token: &str) -> Result<Option<User>, AuthError>;
}

/// Supabase Auth (GoTrue) over its REST API.
#[derive(Clone)]
pub struct SupabaseAuth {
    client: reqwest::Client,
    supabase_url: String,
    anon_key: String,
}

impl SupabaseAuth {
    pub fn new(client: reqwest::Client, cfg: &SupabaseConfig) -> Self {
        Self {
            client,
            supabase_url: cfg.url.trim_end_matches('/').to_string(),
            anon_key: cfg.anon_key.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.supabase_url, path)
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn sign_up(&self, input: SignUp) -> Result<User, AuthError> {
        #[derive(Serialize)]
        struct Attributes<'a> {
            name: &'a str,
            location: &'a str,
        }

        #[derive(Serialize)]
        struct Body<'a> {
            email: &'a str,
            password: &'a str,
            data: Attributes<'a>,
        }

        let body = Body {
            email: &input.email,
            password: &input.password,
            data: Attributes {
                name: &input.name,
                location: &input.location,
            },
        };

        let resp = self
            .client
            .post(self.endpoint("signup"))
            .header("apikey", &self.anon_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        log::debug!("supabase signup responded {}", status);

        if !status.is_success() {
            let msg = error_message(&text).unwrap_or_else(|| format!("signup failed: {}", status));
            if is_duplicate_account(&msg) {
                return Err(AuthError::DuplicateAccount);
            }
            return Err(AuthError::Supabase(msg));
        }

        let json: Value = serde_json::from_str(&text)
            .map_err(|e| AuthError::Supabase(format!("invalid json: {}", e)))?;

        // With auto-confirm on, signup answers with a full session wrapping
        // the user; otherwise the body is the user itself.
        let user_json = json.get("user").unwrap_or(&json);
        parse_user(user_json)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        #[derive(Serialize)]
        struct LoginBody<'a> {
            email: &'a str,
            password: &'a str,
        }

        #[derive(Deserialize)]
        struct TokenResp {
            access_token: String,
            refresh_token: Option<String>,
            expires_in: Option<i64>,
            token_type: Option<String>,
            user: Option<Value>,
        }

        let resp = self
            .client
            .post(self.endpoint("token?grant_type=password"))
            .header("apikey", &self.anon_key)
            .json(&LoginBody { email, password })
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();

        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            log::debug!("supabase rejected credentials: {}", text);
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(AuthError::Supabase(format!("login failed: {} {}", status, text)));
        }

        let tr: TokenResp = serde_json::from_str(&text)
            .map_err(|e| AuthError::Supabase(format!("invalid json in login response: {}", e)))?;

        let user = match tr.user {
            Some(ref u) => parse_user(u)?,
            None => return Err(AuthError::Supabase("No user info in login response".to_string())),
        };

        Ok(AuthSession {
            access_token: tr.access_token,
            token_type: tr.token_type.unwrap_or_else(|| "bearer".to_string()),
            expires_in: tr.expires_in,
            refresh_token: tr.refresh_token,
            user,
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let resp = self
            .client
            .post(self.endpoint("logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = resp.status();
        // an already revoked session counts as signed out
        if status.is_success() || status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Ok(());
        }

        let text = resp.text().await.unwrap_or_default();
        Err(AuthError::Supabase(format!("logout failed: {} {}", status, text)))
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<User>, AuthError> {
        let resp = self
            .client
            .get(self.endpoint("user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Ok(None);
        }

        let text = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(AuthError::Supabase(format!("get user failed: {} {}", status, text)));
        }

        let json: Value = serde_json::from_str(&text)
            .map_err(|e| AuthError::Supabase(format!("invalid json: {}", e)))?;
        parse_user(&json).map(Some)
    }
}

/// Maps a GoTrue user object onto [`User`]. Name and location live in
/// `user_metadata`, where sign-up stored them.
fn parse_user(json: &Value) -> Result<User, AuthError> {
    let id = json
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| AuthError::Supabase("response carried no user id".to_string()))?;

    let email = json.get("email").and_then(Value::as_str).unwrap_or_default();
    let meta = json.get("user_metadata");

    let name = metadata_str(meta, "name")
        .or_else(|| metadata_str(meta, "full_name"))
        .map(str::to_string)
        .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());

    let created_at = json
        .get("created_at")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    Ok(User {
        id: id.to_string(),
        email: email.to_string(),
        name,
        location: metadata_str(meta, "location").unwrap_or_default().to_string(),
        created_at,
    })
}

fn metadata_str<'a>(meta: Option<&'a Value>, key: &str) -> Option<&'a str> {
    meta.and_then(|m| m.get(key))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    ["msg", "message", "error_description", "error"]
        .iter()
        .find_map(|key| json.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

fn is_duplicate_account(msg: &str) -> bool {
    let msg = msg.to_lowercase();
    msg.contains("already registered") || msg.contains("already exists")
}
