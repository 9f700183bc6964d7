// src/repositories/post_repository.rs
use async_trait::async_trait;
use reqwest::Client;

use crate::config::SupabaseConfig;
use crate::error::StoreError;
use crate::models::{NewPost, Post};

/// Storage capability for board posts.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Active posts only, newest first.
    async fn list_active(&self) -> Result<Vec<Post>, StoreError>;

    /// Stores a new post and returns it with its assigned id and timestamp.
    async fn insert(&self, post: NewPost) -> Result<Post, StoreError>;
}

/// The `posts` table behind Supabase's PostgREST API.
pub struct SupabasePostStore {
    client: Client,
    supabase_url: String,
    api_key: String,
}

impl SupabasePostStore {
    pub fn new(client: Client, cfg: &SupabaseConfig) -> Self {
        Self {
            client,
            supabase_url: cfg.url.trim_end_matches('/').to_string(),
            api_key: cfg.service_role_key.clone().unwrap_or_else(|| cfg.anon_key.clone()),
        }
    }

    fn posts_url(&self) -> String {
        format!("{}/rest/v1/posts", self.supabase_url)
    }
}

#[async_trait]
impl PostStore for SupabasePostStore {
    async fn list_active(&self) -> Result<Vec<Post>, StoreError> {
        let response = self
            .client
            .get(self.posts_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(&[
                ("select", "*"),
                ("is_active", "eq.true"),
                ("order", "created_at.desc"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        log::debug!("posts response status: {}", status);

        if !status.is_success() {
            return Err(StoreError::Supabase(format!("Failed to fetch posts: {} - {}", status, body)));
        }

        let mut posts: Vec<Post> = serde_json::from_str(&body)?;
        posts.retain(|p| p.is_active);
        Ok(posts)
    }

    async fn insert(&self, post: NewPost) -> Result<Post, StoreError> {
        let response = self
            .client
            .post(self.posts_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
            .json(&post)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        log::debug!("post creation response status: {}", status);

        if !status.is_success() {
            return Err(StoreError::Supabase(format!("Failed to create post: {} - {}", status, body)));
        }

        let created: Vec<Post> = serde_json::from_str(&body)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Supabase("No post returned from creation".to_string()))
    }
}
