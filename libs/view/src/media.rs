use entity::prelude::*;
use toml::{map::Map, Value};

const VIDEO_EXTENSIONS: [&str; 5] = [".mp4", ".webm", ".ogg", ".mov", ".avi"];

/// Placeholder images for posts without media. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackImages(Vec<String>);

impl Default for FallbackImages {
    fn default() -> Self {
        Self((1..=6).map(|n| format!("/assets/post-{}.jpg", n)).collect())
    }
}

impl FallbackImages {
    pub fn new(images: Vec<String>) -> Option<Self> {
        if images.is_empty() {
            return None;
        }
        Some(Self(images))
    }

    /// Reads `[media] fallback_images`, keeping the defaults when the key is
    /// absent or empty.
    pub fn from_config(config: &Map<String, Value>) -> Self {
        let images = config
            .get("media")
            .and_then(|media| media.get("fallback_images"))
            .and_then(Value::as_array)
            .map(|images| {
                images
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        Self::new(images).unwrap_or_default()
    }

    /// The last character of `id`, read as a hex digit, picks the image.
    /// Anything that is not a hex digit maps to the first image.
    pub fn pick(&self, id: &str) -> &str {
        let digit = id
            .chars()
            .last()
            .and_then(|c| c.to_digit(16))
            .unwrap_or(0) as usize;
        &self.0[digit % self.0.len()]
    }
}

/// Card thumbnail: the first media reference, else the post's fallback.
pub fn thumbnail<'a>(
    post: &'a PostEntity,
    fallbacks: &'a FallbackImages,
) -> &'a str {
    post.media.first().unwrap_or_else(|| fallbacks.pick(&post.id))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn of(url: &str) -> Self {
        let url = url.to_lowercase();
        if VIDEO_EXTENSIONS.iter().any(|ext| url.contains(ext)) {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

/// Position within a post's media, shared by the hero image, the thumbnail
/// strip and the full-screen viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    index: usize,
    viewer_open: bool,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            index: 0,
            viewer_open: false,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> usize {
        self.index
    }

    pub fn next(&mut self) {
        if self.len > 1 {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn prev(&mut self) {
        if self.len > 1 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }

    /// Jumps to a thumbnail. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.len {
            self.index = index;
        }
    }

    pub fn open_viewer(&mut self) {
        if self.len > 0 {
            self.viewer_open = true;
        }
    }

    pub fn close_viewer(&mut self) {
        self.viewer_open = false;
    }

    pub fn is_viewer_open(&self) -> bool {
        self.viewer_open
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn post(id: &str, media: Media) -> PostEntity {
        PostEntity {
            id: id.to_string(),
            media,
            ..Default::default()
        }
    }

    #[test]
    fn test_fallback_is_deterministic() {
        // Arrange
        let fallbacks = FallbackImages::default();
        let post = post("5d0c4b9e-7f1a-4c1e-9a3b-2f7d8e6c1a0b", Media::None);

        // Act
        let first = thumbnail(&post, &fallbacks).to_string();
        let second = thumbnail(&post, &fallbacks).to_string();

        // Assert
        assert_eq!(first, second);
        // 0xb = 11, 11 % 6 = 5
        assert_eq!(first, "/assets/post-6.jpg");
    }

    #[test]
    fn test_fallback_for_non_hex_id() {
        let fallbacks = FallbackImages::default();

        assert_eq!(fallbacks.pick("post-z"), "/assets/post-1.jpg");
        assert_eq!(fallbacks.pick(""), "/assets/post-1.jpg");
    }

    #[test]
    fn test_fallback_from_config() {
        // Arrange
        let config: Map<String, Value> = toml::from_str(
            r#"
            [media]
            fallback_images = ["a.jpg", "b.jpg"]
            "#,
        )
        .unwrap();

        // Act
        let fallbacks = FallbackImages::from_config(&config);

        // Assert
        assert_eq!(fallbacks.pick("3"), "b.jpg");
        assert_eq!(FallbackImages::from_config(&Map::new()), FallbackImages::default());
    }

    #[test]
    fn test_thumbnail_prefers_first_media() {
        let fallbacks = FallbackImages::default();
        let post = post(
            "1",
            Media::Many(vec!["a.jpg".to_string(), "b.jpg".to_string()]),
        );

        assert_eq!(thumbnail(&post, &fallbacks), "a.jpg");
    }

    #[test]
    fn test_media_kind() {
        assert_eq!(MediaKind::of("https://cdn.example.com/clip.MP4"), MediaKind::Video);
        assert_eq!(MediaKind::of("https://cdn.example.com/a.webm?x=1"), MediaKind::Video);
        assert_eq!(MediaKind::of("https://cdn.example.com/a.png"), MediaKind::Image);
    }

    #[test]
    fn test_carousel_wraps() {
        // Arrange
        let mut carousel = Carousel::new(3);

        // Act & Assert
        carousel.prev();
        assert_eq!(carousel.current(), 2);
        carousel.next();
        assert_eq!(carousel.current(), 0);
        carousel.select(1);
        carousel.next();
        assert_eq!(carousel.current(), 2);
        carousel.select(7);
        assert_eq!(carousel.current(), 2);
    }

    #[test]
    fn test_carousel_viewer_shares_index() {
        let mut carousel = Carousel::new(2);
        carousel.select(1);

        carousel.open_viewer();
        carousel.next();

        assert!(carousel.is_viewer_open());
        assert_eq!(carousel.current(), 0);
        carousel.close_viewer();
        assert!(!carousel.is_viewer_open());
    }

    #[test]
    fn test_carousel_without_media() {
        let mut carousel = Carousel::new(0);

        carousel.next();
        carousel.open_viewer();

        assert_eq!(carousel.current(), 0);
        assert!(!carousel.is_viewer_open());
    }
}
