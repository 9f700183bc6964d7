// src/dtos/post_dtos.rs
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::{Category, NewPost, Post, User};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 5000;

/// Body of `POST /api/posts`. Every field is required; `category` stays a
/// raw string so an unknown value is reported as a validation error rather
/// than a JSON parse failure.
#[derive(Debug, Deserialize)]
pub struct CreatePostDTO {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub location: String,
}

impl CreatePostDTO {
    pub fn validate(self, author: &User) -> Result<NewPost, ValidationError> {
        let title = self.title.trim();
        let description = self.description.trim();
        let category = self.category.trim();
        let location = self.location.trim();

        if title.is_empty() {
            return Err(ValidationError::MissingField("Title"));
        }
        if category.is_empty() {
            return Err(ValidationError::MissingField("Category"));
        }
        if location.is_empty() {
            return Err(ValidationError::MissingField("Location"));
        }
        if description.is_empty() {
            return Err(ValidationError::MissingField("Description"));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong { field: "Title", max: MAX_TITLE_LEN });
        }
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ValidationError::TooLong {
                field: "Description",
                max: MAX_DESCRIPTION_LEN,
            });
        }

        let category: Category = category
            .parse()
            .map_err(|_| ValidationError::UnknownCategory(category.to_string()))?;

        Ok(NewPost {
            title: title.to_string(),
            description: description.to_string(),
            category,
            location: location.to_string(),
            user_id: author.id.clone(),
            user_name: author.name.clone(),
            user_email: author.email.clone(),
            is_active: true,
        })
    }
}

/// Query string of `GET /api/posts`.
#[derive(Debug, Default, Deserialize)]
pub struct PostQuery {
    pub search: Option<String>,
    pub category: Option<String>,
}

/// How the category query value should be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    Any,
    Only(Category),
    /// A value that names no category; matches nothing.
    Unknown,
}

impl PostQuery {
    pub fn search_term(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }

    pub fn category_filter(&self) -> CategoryFilter {
        match self.category.as_deref().map(str::trim) {
            None | Some("") | Some("all") => CategoryFilter::Any,
            Some(raw) => raw
                .parse::<Category>()
                .map(CategoryFilter::Only)
                .unwrap_or(CategoryFilter::Unknown),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostListOut {
    pub posts: Vec<Post>,
    /// Active posts before filtering.
    pub total: usize,
    pub matched: usize,
    /// Empty-state hint for the client, set only when `posts` is empty.
    pub empty_state: Option<EmptyState>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct EmptyState {
    pub title: String,
    pub hint: String,
}

impl EmptyState {
    pub fn for_listing(total: usize, matched: usize) -> Option<Self> {
        if matched > 0 {
            return None;
        }
        if total == 0 {
            Some(Self {
                title: "No posts yet".to_string(),
                hint: "Be the first to share a help request with your community!".to_string(),
            })
        } else {
            Some(Self {
                title: "No posts match your search".to_string(),
                hint: "Try adjusting your search or filter options".to_string(),
            })
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryOut {
    pub id: Category,
    pub label: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn author() -> User {
        User {
            id: "u-1".into(),
            email: "ana@example.com".into(),
            name: "Ana".into(),
            location: "Birch Lane".into(),
            created_at: Utc::now(),
        }
    }

    fn dto(title: &str, description: &str, category: &str, location: &str) -> CreatePostDTO {
        CreatePostDTO {
            title: title.into(),
            description: description.into(),
            category: category.into(),
            location: location.into(),
        }
    }

    #[test]
    fn create_post_copies_author_fields() {
        let post = dto("Lost cat", "Grey tabby, answers to Milo", "help-needed", "Birch Lane")
            .validate(&author())
            .unwrap();
        assert_eq!(post.user_id, "u-1");
        assert_eq!(post.user_name, "Ana");
        assert_eq!(post.user_email, "ana@example.com");
        assert_eq!(post.category, Category::HelpNeeded);
        assert!(post.is_active);
    }

    #[test]
    fn create_post_rejects_missing_or_unknown_fields() {
        assert_eq!(
            dto(" ", "d", "events", "here").validate(&author()).unwrap_err(),
            ValidationError::MissingField("Title")
        );
        assert_eq!(
            dto("t", "d", "", "here").validate(&author()).unwrap_err(),
            ValidationError::MissingField("Category")
        );
        assert_eq!(
            dto("t", "d", "party", "here").validate(&author()).unwrap_err(),
            ValidationError::UnknownCategory("party".into())
        );
    }

    #[test]
    fn category_filter_treats_blank_and_all_as_any() {
        let q = |c: Option<&str>| PostQuery { search: None, category: c.map(String::from) };
        assert_eq!(q(None).category_filter(), CategoryFilter::Any);
        assert_eq!(q(Some("")).category_filter(), CategoryFilter::Any);
        assert_eq!(q(Some("all")).category_filter(), CategoryFilter::Any);
        assert_eq!(q(Some("events")).category_filter(), CategoryFilter::Only(Category::Events));
        assert_eq!(q(Some("EVENTS")).category_filter(), CategoryFilter::Unknown);
    }

    #[test]
    fn empty_state_distinguishes_no_posts_from_no_matches() {
        assert_eq!(EmptyState::for_listing(3, 1), None);
        assert_eq!(EmptyState::for_listing(0, 0).unwrap().title, "No posts yet");
        assert_eq!(EmptyState::for_listing(4, 0).unwrap().title, "No posts match your search");
    }
}
