use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    /// Free-form label. Compared as an exact string everywhere.
    pub category: String,
    pub content: Option<String>,
    pub media: Media,
    pub created_at: DateTime<Utc>,
    pub owner_id: Option<String>,
}

impl Post {
    pub fn merge(&mut self, patch: &PostPatch) {
        if let Some(content) = &patch.content {
            self.content = Some(content.clone());
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
    }
}

/// Media references attached to a post, resolved once from the loose
/// `image_url` / `image_urls` columns.
#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum Media {
    #[default]
    None,
    Single(String),
    Many(Vec<String>),
}

impl Media {
    pub fn from_fields(
        image_url: Option<String>,
        image_urls: Option<Vec<String>>,
    ) -> Self {
        let mut urls: Vec<String> = vec![];
        let candidates =
            image_url.into_iter().chain(image_urls.unwrap_or_default());
        for url in candidates {
            if url.is_empty() || urls.contains(&url) {
                continue;
            }
            urls.push(url);
        }
        Self::from_urls(urls)
    }

    pub fn from_urls(mut urls: Vec<String>) -> Self {
        match urls.len() {
            0 => Media::None,
            1 => Media::Single(urls.remove(0)),
            _ => Media::Many(urls),
        }
    }

    pub fn first(&self) -> Option<&str> {
        match self {
            Media::None => None,
            Media::Single(url) => Some(url),
            Media::Many(urls) => urls.first().map(String::as_str),
        }
    }

    pub fn urls(&self) -> Vec<&str> {
        match self {
            Media::None => vec![],
            Media::Single(url) => vec![url.as_str()],
            Media::Many(urls) => urls.iter().map(String::as_str).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Media::None => 0,
            Media::Single(_) => 1,
            Media::Many(urls) => urls.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default, PartialEq, Clone)]
pub struct NewPost {
    pub title: String,
    pub category: String,
    pub content: String,
    pub media: Media,
    pub owner_id: Option<String>,
}

/// Fields the edit flow may change. `None` leaves the field untouched.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct PostPatch {
    pub content: Option<String>,
    pub category: Option<String>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.category.is_none()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_media_from_fields() {
        // Arrange
        let image_url = Some("a.jpg".to_string());
        let image_urls = Some(vec![
            "a.jpg".to_string(),
            "".to_string(),
            "b.mp4".to_string(),
        ]);

        // Act
        let media = Media::from_fields(image_url, image_urls);

        // Assert
        assert_eq!(
            media,
            Media::Many(vec!["a.jpg".to_string(), "b.mp4".to_string()])
        );
        assert_eq!(media.first(), Some("a.jpg"));
    }

    #[test]
    fn test_media_collapses_to_single_or_none() {
        assert_eq!(
            Media::from_fields(None, Some(vec!["x.png".to_string()])),
            Media::Single("x.png".to_string())
        );
        assert_eq!(
            Media::from_fields(Some("".to_string()), Some(vec![])),
            Media::None
        );
        assert!(Media::from_fields(None, None).is_empty());
    }

    #[test]
    fn test_merge_patch() {
        // Arrange
        let mut post = Post {
            id: "1".to_string(),
            category: "Design".to_string(),
            content: Some("<p>old</p>".to_string()),
            ..Default::default()
        };

        // Act
        post.merge(&PostPatch {
            content: Some("<p>new</p>".to_string()),
            category: None,
        });

        // Assert
        assert_eq!(post.content.as_deref(), Some("<p>new</p>"));
        assert_eq!(post.category, "Design");
    }
}
