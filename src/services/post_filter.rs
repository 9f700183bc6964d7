// src/services/post_filter.rs
use crate::models::{Category, Post};

/// Narrows `posts` to the ones the board should show.
///
/// A post is kept when the search term is empty or occurs (ignoring case) in
/// its title, description or location, and when `category` is `None` or
/// equal to the post's category. Input order is preserved.
pub fn filter_posts(posts: &[Post], search_term: &str, category: Option<Category>) -> Vec<Post> {
    let needle = search_term.to_lowercase();

    posts
        .iter()
        .filter(|post| needle.is_empty() || matches_text(post, &needle))
        .filter(|post| category.is_none_or(|c| post.category == c))
        .cloned()
        .collect()
}

fn matches_text(post: &Post, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle)
        || post.description.to_lowercase().contains(needle)
        || post.location.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::seed::example_posts;
    use chrono::Utc;

    fn titles(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn empty_filters_return_input_unchanged() {
        let posts = example_posts(Utc::now());
        assert_eq!(filter_posts(&posts, "", None), posts);
        assert!(filter_posts(&[], "", None).is_empty());
        assert!(filter_posts(&[], "bbq", Some(Category::Events)).is_empty());
    }

    #[test]
    fn search_is_case_insensitive() {
        let posts = example_posts(Utc::now());
        let upper = filter_posts(&posts, "BBQ", None);
        let lower = filter_posts(&posts, "bbq", None);
        assert_eq!(upper, lower);
        assert_eq!(titles(&upper), vec!["Community BBQ this Saturday"]);
    }

    #[test]
    fn search_covers_description_and_location() {
        let posts = example_posts(Utc::now());
        assert_eq!(
            titles(&filter_posts(&posts, "couch", None)),
            vec!["Need help moving furniture"]
        );
        assert_eq!(
            titles(&filter_posts(&posts, "oak avenue", None)),
            vec!["Offering tutoring services"]
        );
        assert!(filter_posts(&posts, "John Smith", None).is_empty());
    }

    #[test]
    fn category_only_filter() {
        let posts = example_posts(Utc::now());
        let events = filter_posts(&posts, "", Some(Category::Events));
        assert_eq!(titles(&events), vec!["Community BBQ this Saturday"]);
    }

    #[test]
    fn combined_search_and_category() {
        let posts = example_posts(Utc::now());
        let found = filter_posts(&posts, "help", Some(Category::HelpNeeded));
        assert_eq!(titles(&found), vec!["Need help moving furniture"]);

        // "help" alone also hits the lawn mowing and furniture posts
        let broad = filter_posts(&posts, "help", None);
        assert_eq!(broad.len(), 2);
    }

    #[test]
    fn output_keeps_relative_order() {
        let mut posts = example_posts(Utc::now());
        posts.reverse();
        let found = filter_posts(&posts, "e", None);
        let expected: Vec<&str> = posts
            .iter()
            .filter(|p| found.iter().any(|f| f.id == p.id))
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(titles(&found), expected);
    }

    #[test]
    fn retained_and_dropped_posts_partition_by_predicate() {
        let posts = example_posts(Utc::now());
        for term in ["", "a", "help", "park", "zzz"] {
            for category in [None, Some(Category::Services), Some(Category::OfferingHelp)] {
                let kept = filter_posts(&posts, term, category);
                for post in &posts {
                    let text_ok = term.is_empty() || matches_text(post, &term.to_lowercase());
                    let cat_ok = category.is_none_or(|c| c == post.category);
                    let is_kept = kept.iter().any(|k| k.id == post.id);
                    assert_eq!(is_kept, text_ok && cat_ok, "term={term:?} category={category:?}");
                }
            }
        }
    }
}
