// src/fallback.rs
//! Fixed sample content served whenever an upstream cannot be queried.
//!
//! Timestamps are stamped at call time so the entries never look stale in
//! the UI; everything else is constant.

use chrono::Utc;

use crate::placeholder::{avatar_placeholder, placeholder_image, post_image_placeholder};
use crate::types::{NormalizedArticle, NormalizedPost, PostAuthor};

pub fn mock_posts() -> Vec<NormalizedPost> {
    let now = Utc::now().to_rfc3339();
    vec![
        NormalizedPost {
            id: "1".to_string(),
            text: "This is sample tweet data. Configure API keys to see real tweets."
                .to_string(),
            created_at: Some(now.clone()),
            author: PostAuthor {
                name: "Demo User".to_string(),
                username: "demo_user".to_string(),
                profile_image_url: avatar_placeholder().to_string(),
            },
            images: vec![post_image_placeholder()],
        },
        NormalizedPost {
            id: "2".to_string(),
            text: "Sample results refresh on every search. Live posts appear here once \
                   the Twitter API is reachable."
                .to_string(),
            created_at: Some(now),
            author: PostAuthor {
                name: "Demo Account".to_string(),
                username: "demo_account".to_string(),
                profile_image_url: avatar_placeholder().to_string(),
            },
            images: vec![placeholder_image(
                "Sample post",
                400,
                200,
                "#0f766e",
                "#ffffff",
            )],
        },
    ]
}

pub fn mock_articles() -> Vec<NormalizedArticle> {
    let now = Utc::now().to_rfc3339();
    vec![
        NormalizedArticle {
            title: "Sample News Article".to_string(),
            description: "This is sample news data. Configure API keys to see real articles."
                .to_string(),
            url: "#".to_string(),
            image_url: placeholder_image("Sample article", 400, 200, "#b45309", "#fff7ed"),
            source_name: "Demo News".to_string(),
            published_at: now.clone(),
        },
        NormalizedArticle {
            title: "Another Sample Headline".to_string(),
            description: "Live articles appear here once the news API is reachable."
                .to_string(),
            url: "#".to_string(),
            image_url: placeholder_image("Sample article", 400, 200, "#7c3aed", "#f5f3ff"),
            source_name: "Demo News".to_string(),
            published_at: now,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn mock_posts_are_well_formed() {
        let posts = mock_posts();
        assert_eq!(posts.len(), 2);
        for post in &posts {
            assert!(!post.id.is_empty());
            assert!(!post.images.is_empty());
            assert!(post.images[0].starts_with("data:image/svg+xml;base64,"));
            let ts = post.created_at.as_deref().expect("mock posts carry a timestamp");
            DateTime::parse_from_rfc3339(ts).expect("timestamp parses");
        }
    }

    #[test]
    fn mock_articles_are_well_formed() {
        let articles = mock_articles();
        assert_eq!(articles.len(), 2);
        for article in &articles {
            assert!(!article.title.is_empty());
            assert_eq!(article.source_name, "Demo News");
            assert!(article.image_url.starts_with("data:image/svg+xml;base64,"));
            DateTime::parse_from_rfc3339(&article.published_at).expect("timestamp parses");
        }
    }

    #[test]
    fn mock_entries_use_distinct_images() {
        let posts = mock_posts();
        assert_ne!(posts[0].images, posts[1].images);
        let articles = mock_articles();
        assert_ne!(articles[0].image_url, articles[1].image_url);
    }
}
