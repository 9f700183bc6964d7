// src/config.rs
use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

pub const DEV_JWT_SECRET: &str = "community-board-dev-secret";

/// Upper bound for `SESSION_TTL_SECS`: ten years.
pub const MAX_SESSION_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Local,
    Supabase,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Local => "local",
            BackendKind::Supabase => "supabase",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LocalConfig {
    pub path: PathBuf,
    pub jwt_secret: String,
    pub session_ttl_secs: i64,
}

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
    pub service_role_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: BackendKind,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub local: LocalConfig,
    /// Present only when `backend` is `Supabase`.
    pub supabase: Option<SupabaseConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any variable source. Blank values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let backend = match var("BOARD_BACKEND").as_deref() {
            None | Some("local") => BackendKind::Local,
            Some("supabase") => BackendKind::Supabase,
            Some(other) => bail!("BOARD_BACKEND must be 'local' or 'supabase', got '{}'", other),
        };

        let port = match var("PORT") {
            Some(p) => p.parse().with_context(|| format!("PORT is not a valid port: {}", p))?,
            None => 8080,
        };

        let allowed_origins = var("ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000,http://127.0.0.1:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let session_ttl_secs: i64 = match var("SESSION_TTL_SECS") {
            Some(s) => s
                .parse()
                .with_context(|| format!("SESSION_TTL_SECS is not a number: {}", s))?,
            None => 7 * 24 * 60 * 60,
        };
        if !(1..=MAX_SESSION_TTL_SECS).contains(&session_ttl_secs) {
            bail!(
                "SESSION_TTL_SECS must be between 1 and {}, got {}",
                MAX_SESSION_TTL_SECS,
                session_ttl_secs
            );
        }

        let local = LocalConfig {
            path: PathBuf::from(var("LOCAL_STORE_PATH").unwrap_or_else(|| "community-board.json".into())),
            jwt_secret: var("LOCAL_JWT_SECRET").unwrap_or_else(|| DEV_JWT_SECRET.to_string()),
            session_ttl_secs,
        };

        let supabase = match backend {
            BackendKind::Supabase => Some(SupabaseConfig {
                url: var("SUPABASE_URL").context("SUPABASE_URL must be set")?,
                anon_key: var("SUPABASE_ANON_KEY").context("SUPABASE_ANON_KEY must be set")?,
                service_role_key: var("SUPABASE_SERVICE_ROLE_KEY"),
            }),
            BackendKind::Local => None,
        };

        Ok(Self {
            backend,
            port,
            allowed_origins,
            local,
            supabase,
        })
    }
}
