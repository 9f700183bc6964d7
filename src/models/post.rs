// src/models/post.rs
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The four fixed post classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    HelpNeeded,
    OfferingHelp,
    Events,
    Services,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::HelpNeeded,
        Category::OfferingHelp,
        Category::Events,
        Category::Services,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::HelpNeeded => "help-needed",
            Category::OfferingHelp => "offering-help",
            Category::Events => "events",
            Category::Services => "services",
        }
    }

    /// Label shown on the filter bar and post badges.
    pub fn label(&self) -> &'static str {
        match self {
            Category::HelpNeeded => "Help Needed",
            Category::OfferingHelp => "Offering Help",
            Category::Events => "Events",
            Category::Services => "Services",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

/// A row of the `posts` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub is_active: bool,
}

/// Insert payload. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, Serialize)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub location: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub is_active: bool,
}

impl NewPost {
    pub fn into_post(self, id: String, created_at: DateTime<Utc>) -> Post {
        Post {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            location: self.location,
            created_at,
            user_id: self.user_id,
            user_name: self.user_name,
            user_email: self.user_email,
            is_active: self.is_active,
        }
    }
}
