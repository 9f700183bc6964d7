// src/repositories/local_store.rs
//
// Self-contained board backend: accounts, sessions and posts kept in one
// JSON file of named slots, rewritten after every mutation.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::LocalConfig;
use crate::error::{AuthError, StoreError};
use crate::models::user::JwtClaims;
use crate::models::{AuthSession, NewPost, Post, SignUp, User};
use crate::repositories::post_repository::PostStore;
use crate::repositories::seed::example_posts;
use crate::services::auth_services::AuthProvider;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Account {
    user: User,
    password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionRecord {
    id: String,
    user_id: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

/// On-disk layout. Each field is one slot of the key-value file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct BoardState {
    #[serde(rename = "community-posts", default)]
    posts: Vec<Post>,
    #[serde(rename = "community-user", default)]
    sessions: Vec<SessionRecord>,
    #[serde(rename = "community-accounts", default)]
    accounts: Vec<Account>,
}

pub struct LocalBoard {
    path: PathBuf,
    state: Mutex<BoardState>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_ttl: Duration,
}

impl LocalBoard {
    /// Loads the store file, seeding the example posts when the post slot is
    /// empty. A missing file is treated as an empty store.
    pub async fn open(cfg: &LocalConfig) -> Result<Self, StoreError> {
        let mut state = read_state(&cfg.path).await?;

        let now = Utc::now();
        state.sessions.retain(|s| s.expires_at > now);

        let session_ttl = Duration::try_seconds(cfg.session_ttl_secs)
            .filter(|ttl| *ttl > Duration::zero())
            .ok_or_else(|| {
                StoreError::Config(format!("session ttl out of range: {}s", cfg.session_ttl_secs))
            })?;

        let board = Self {
            path: cfg.path.clone(),
            state: Mutex::new(BoardState::default()),
            encoding_key: EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
            session_ttl,
        };

        if state.posts.is_empty() {
            state.posts = example_posts(now);
            log::info!("seeded {} example posts into {}", state.posts.len(), cfg.path.display());
            board.persist(&state).await?;
        }

        log::info!(
            "local board loaded: {} posts, {} accounts, {} sessions",
            state.posts.len(),
            state.accounts.len(),
            state.sessions.len()
        );

        *board.state.lock().await = state;
        Ok(board)
    }

    async fn persist(&self, state: &BoardState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let body = serde_json::to_vec_pretty(state)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    fn decode_token(&self, token: &str) -> Option<JwtClaims> {
        match decode::<JwtClaims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256)) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                log::debug!("rejected local token: {}", e);
                None
            }
        }
    }
}

async fn read_state(path: &Path) -> Result<BoardState, StoreError> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) if text.trim().is_empty() => Ok(BoardState::default()),
        Ok(text) => Ok(serde_json::from_str(&text)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(BoardState::default()),
        Err(e) => Err(e.into()),
    }
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(rand::thread_rng());
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::Other(format!("failed to hash password: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AuthError::Other(format!("invalid stored password hash: {}", e)))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

fn store_failure(e: StoreError) -> AuthError {
    AuthError::Other(format!("local store: {}", e))
}

#[async_trait]
impl AuthProvider for LocalBoard {
    async fn sign_up(&self, input: SignUp) -> Result<User, AuthError> {
        let password_hash = hash_password(&input.password)?;

        let mut state = self.state.lock().await;
        if state
            .accounts
            .iter()
            .any(|a| a.user.email.eq_ignore_ascii_case(&input.email))
        {
            return Err(AuthError::DuplicateAccount);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: input.email,
            name: input.name,
            location: input.location,
            created_at: Utc::now(),
        };

        let mut next = state.clone();
        next.accounts.push(Account {
            user: user.clone(),
            password_hash,
        });
        self.persist(&next).await.map_err(store_failure)?;
        *state = next;

        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let account = {
            let state = self.state.lock().await;
            state
                .accounts
                .iter()
                .find(|a| a.user.email.eq_ignore_ascii_case(email))
                .cloned()
                .ok_or(AuthError::InvalidCredentials)?
        };

        verify_password(password, &account.password_hash)?;

        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.session_ttl)
            .ok_or_else(|| AuthError::Other("session expiry out of range".to_string()))?;
        let claims = JwtClaims {
            sub: account.user.id.clone(),
            email: account.user.email.clone(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let access_token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Other(format!("failed to sign token: {}", e)))?;

        let mut state = self.state.lock().await;
        let mut next = state.clone();
        next.sessions.retain(|s| s.expires_at > now);
        next.sessions.push(SessionRecord {
            id: claims.jti,
            user_id: claims.sub,
            created_at: now,
            expires_at,
        });
        self.persist(&next).await.map_err(store_failure)?;
        *state = next;

        Ok(AuthSession {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: Some(self.session_ttl.num_seconds()),
            refresh_token: None,
            user: account.user,
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let Some(claims) = self.decode_token(access_token) else {
            return Ok(());
        };

        let mut state = self.state.lock().await;
        if !state.sessions.iter().any(|s| s.id == claims.jti) {
            return Ok(());
        }

        let mut next = state.clone();
        next.sessions.retain(|s| s.id != claims.jti);
        self.persist(&next).await.map_err(store_failure)?;
        *state = next;
        Ok(())
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<User>, AuthError> {
        let Some(claims) = self.decode_token(access_token) else {
            return Ok(None);
        };

        let now = Utc::now();
        let state = self.state.lock().await;
        let live = state
            .sessions
            .iter()
            .any(|s| s.id == claims.jti && s.user_id == claims.sub && s.expires_at > now);
        if !live {
            return Ok(None);
        }

        Ok(state
            .accounts
            .iter()
            .find(|a| a.user.id == claims.sub)
            .map(|a| a.user.clone()))
    }
}

#[async_trait]
impl PostStore for LocalBoard {
    async fn list_active(&self) -> Result<Vec<Post>, StoreError> {
        let state = self.state.lock().await;
        let mut posts: Vec<Post> = state.posts.iter().filter(|p| p.is_active).cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn insert(&self, post: NewPost) -> Result<Post, StoreError> {
        let post = post.into_post(Uuid::new_v4().to_string(), Utc::now());

        let mut state = self.state.lock().await;
        let mut next = state.clone();
        next.posts.insert(0, post.clone());
        self.persist(&next).await?;
        *state = next;

        Ok(post)
    }
}
