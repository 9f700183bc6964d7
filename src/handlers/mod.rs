// src/handlers/mod.rs
pub mod auth_handlers;
pub mod post_handlers;

use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::dtos::ApiResponse;
use crate::error::ApiError;
use crate::AppState;

/// Registers every route. Shared by `main` and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_cfg = web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| ApiError::BadRequest(format!("Invalid request body: {}", err)).into());

    let query_cfg = web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(format!("Invalid query string: {}", err)).into());

    cfg.app_data(json_cfg)
        .app_data(query_cfg)
        .service(
            web::scope("/auth")
                .service(auth_handlers::signup) // POST /auth/signup
                .service(auth_handlers::login) // POST /auth/login
                .service(auth_handlers::logout), // POST /auth/logout
        )
        .service(
            web::scope("/api")
                .service(auth_handlers::current_user) // GET /api/me
                .service(post_handlers::list_posts) // GET /api/posts
                .service(post_handlers::create_post) // POST /api/posts
                .service(post_handlers::list_categories), // GET /api/categories
        )
        .service(health);
}

#[get("/health")]
async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(
        "ok",
        json!({ "backend": state.backend.as_str() }),
    ))
}
