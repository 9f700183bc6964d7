// src/repositories/seed.rs
use chrono::{DateTime, Duration, Utc};

use crate::models::{Category, Post};

struct Example {
    title: &'static str,
    description: &'static str,
    category: Category,
    location: &'static str,
    user_name: &'static str,
    user_email: &'static str,
}

const EXAMPLES: [Example; 4] = [
    Example {
        title: "Need help moving furniture",
        description: "Looking for someone with a truck to help move a couch and dining table this weekend. Happy to pay for gas and time!",
        category: Category::HelpNeeded,
        location: "Downtown Area",
        user_name: "John Smith",
        user_email: "john@example.com",
    },
    Example {
        title: "Free lawn mowing service",
        description: "I have a new lawn mower and would love to help neighbors with their yards. No charge, just want to help the community!",
        category: Category::OfferingHelp,
        location: "Maple Street",
        user_name: "Sarah Johnson",
        user_email: "sarah@example.com",
    },
    Example {
        title: "Community BBQ this Saturday",
        description: "Join us for our monthly neighborhood BBQ! Bring a side dish to share. Burgers and drinks provided.",
        category: Category::Events,
        location: "Community Park",
        user_name: "Mike Wilson",
        user_email: "mike@example.com",
    },
    Example {
        title: "Offering tutoring services",
        description: "Math and science tutor available for high school students. 10 years experience, very reasonable rates.",
        category: Category::Services,
        location: "Oak Avenue",
        user_name: "Dr. Emily Chen",
        user_email: "emily@example.com",
    },
];

/// The posts a fresh local board starts with, newest first, one day apart.
pub fn example_posts(now: DateTime<Utc>) -> Vec<Post> {
    EXAMPLES
        .iter()
        .enumerate()
        .map(|(i, ex)| {
            let n = i + 1;
            Post {
                id: n.to_string(),
                title: ex.title.to_string(),
                description: ex.description.to_string(),
                category: ex.category,
                location: ex.location.to_string(),
                created_at: now - Duration::days(i as i64),
                user_id: n.to_string(),
                user_name: ex.user_name.to_string(),
                user_email: ex.user_email.to_string(),
                is_active: true,
            }
        })
        .collect()
}
