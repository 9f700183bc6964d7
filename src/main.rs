// src/main.rs
mod config;
mod dtos;
mod error;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod services;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use log::{info, warn};
use reqwest::Client;

use crate::config::{AppConfig, BackendKind, DEV_JWT_SECRET};
use crate::repositories::local_store::LocalBoard;
use crate::repositories::post_repository::{PostStore, SupabasePostStore};
use crate::services::auth_services::{AuthProvider, SupabaseAuth};

fn mask_key(k: &str) -> String {
    if k.len() <= 8 {
        "[REDACTED]".to_string()
    } else {
        format!("{}***{}", &k[..4], &k[k.len() - 4..])
    }
}

/// Shared application state: the two collaborators the board talks to.
/// Exactly one backend is wired per process.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthProvider>,
    pub posts: Arc<dyn PostStore>,
    pub backend: BackendKind,
}

async fn build_state(cfg: &AppConfig) -> anyhow::Result<AppState> {
    match cfg.backend {
        BackendKind::Local => {
            if cfg.local.jwt_secret == DEV_JWT_SECRET {
                warn!("LOCAL_JWT_SECRET not set, signing sessions with the development secret");
            }
            info!("Local store: {}", cfg.local.path.display());

            let board = Arc::new(
                LocalBoard::open(&cfg.local)
                    .await
                    .with_context(|| format!("failed to open local store {}", cfg.local.path.display()))?,
            );
            Ok(AppState {
                auth: board.clone(),
                posts: board,
                backend: BackendKind::Local,
            })
        }
        BackendKind::Supabase => {
            let supabase = cfg
                .supabase
                .as_ref()
                .context("supabase backend selected without supabase settings")?;

            info!("Supabase URL: {}", supabase.url);
            info!("Supabase anon key: {}", mask_key(&supabase.anon_key));
            match &supabase.service_role_key {
                Some(key) => info!("Supabase service role key: {}", mask_key(key)),
                None => warn!("SUPABASE_SERVICE_ROLE_KEY not set, post store uses the anon key"),
            }

            let http_client = Client::builder()
                .user_agent("community-board/0.1")
                .build()
                .context("failed to build http client")?;

            Ok(AppState {
                auth: Arc::new(SupabaseAuth::new(http_client.clone(), supabase)),
                posts: Arc::new(SupabasePostStore::new(http_client, supabase)),
                backend: BackendKind::Supabase,
            })
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = AppConfig::from_env()?;
    info!("Backend: {}", cfg.backend.as_str());

    let state = web::Data::new(build_state(&cfg).await?);
    let allowed_origins = cfg.allowed_origins.clone();

    let bind_address = format!("0.0.0.0:{}", cfg.port);
    info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec!["authorization", "content-type", "accept", "x-requested-with"])
            .supports_credentials()
            .max_age(3600);

        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(handlers::configure)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
