// src/handlers/post_handlers.rs
use actix_web::{get, post, web, HttpResponse};

use crate::dtos::post::{CategoryFilter, CategoryOut, CreatePostDTO, EmptyState, PostListOut, PostQuery};
use crate::dtos::ApiResponse;
use crate::error::ApiError;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::models::Category;
use crate::services::post_filter::filter_posts;
use crate::AppState;

/// GET /api/posts?search=&category=
#[get("/posts")]
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<PostQuery>,
) -> Result<HttpResponse, ApiError> {
    let posts = state.posts.list_active().await?;
    let search = query.search_term();

    let visible = match query.category_filter() {
        CategoryFilter::Any => filter_posts(&posts, search, None),
        CategoryFilter::Only(category) => filter_posts(&posts, search, Some(category)),
        CategoryFilter::Unknown => Vec::new(),
    };

    log::debug!(
        "listing posts: search={:?} category={:?} -> {}/{}",
        search,
        query.category,
        visible.len(),
        posts.len()
    );

    let (total, matched) = (posts.len(), visible.len());
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Posts retrieved successfully",
        PostListOut {
            posts: visible,
            total,
            matched,
            empty_state: EmptyState::for_listing(total, matched),
        },
    )))
}

/// POST /api/posts
/// Signed-in users only; the author fields come from the session, never
/// from the request body.
#[post("/posts")]
pub async fn create_post(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    body: web::Json<CreatePostDTO>,
) -> Result<HttpResponse, ApiError> {
    let new_post = body.into_inner().validate(&auth.user)?;
    let post = state.posts.insert(new_post).await?;
    log::info!("post {} ({}) created by {}", post.id, post.category, auth.user.email);

    Ok(HttpResponse::Created().json(ApiResponse::success(
        "Post created! Your help request has been shared with the community",
        post,
    )))
}

/// GET /api/categories
#[get("/categories")]
pub async fn list_categories() -> HttpResponse {
    let categories: Vec<CategoryOut> = Category::ALL
        .iter()
        .map(|c| CategoryOut { id: *c, label: c.label() })
        .collect();

    HttpResponse::Ok().json(ApiResponse::success(
        "Categories retrieved successfully",
        categories,
    ))
}
