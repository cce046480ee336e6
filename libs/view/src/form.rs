use entity::prelude::*;
use repository::PostStore;
use tracing::error;
use url::Url;

use crate::notice::Effect;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NewPostForm {
    pub title: String,
    pub category: String,
    /// HTML produced by the rich-text editor.
    pub content: String,
    pub image_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Title,
    Category,
    Content,
    ImageUrl(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    Invalid(Vec<FieldError>),
    Failed(Effect),
}

impl SubmitError {
    pub fn effect(&self) -> Effect {
        match self {
            SubmitError::Invalid(errors) => Effect::invalid(
                errors
                    .first()
                    .map(|error| error.message.as_str())
                    .unwrap_or("Invalid post"),
            ),
            SubmitError::Failed(effect) => effect.clone(),
        }
    }
}

impl NewPostForm {
    pub fn validate(
        &self,
        session: &Session,
    ) -> Result<NewPostEntity, Vec<FieldError>> {
        let mut errors = vec![];

        if self.title.trim().is_empty() {
            errors.push(FieldError::new(Field::Title, "Title is required"));
        }
        if self.category.trim().is_empty() {
            errors
                .push(FieldError::new(Field::Category, "Category is required"));
        }
        if is_blank_html(&self.content) {
            errors.push(FieldError::new(Field::Content, "Content is required"));
        }

        let mut urls = vec![];
        for (i, url) in self.image_urls.iter().enumerate() {
            let url = url.trim();
            if url.is_empty() {
                continue;
            }
            if Url::parse(url).is_err() {
                errors.push(FieldError::new(
                    Field::ImageUrl(i),
                    "Please enter a valid URL",
                ));
                continue;
            }
            urls.push(url.to_string());
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewPostEntity {
            title: self.title.trim().to_string(),
            category: self.category.clone(),
            content: self.content.clone(),
            media: Media::from_urls(urls),
            owner_id: session.user_id().map(str::to_string),
        })
    }

    /// Validates and inserts the post. The form is cleared on success and
    /// left untouched on failure.
    pub async fn submit<S: PostStore>(
        &mut self,
        store: &S,
        session: &Session,
    ) -> Result<PostEntity, SubmitError> {
        let new_post = self.validate(session).map_err(SubmitError::Invalid)?;

        match store.insert(new_post).await {
            Ok(post) => {
                *self = Self::default();
                Ok(post)
            }
            Err(e) => {
                error!(task = "add post", err = e.to_string());
                Err(SubmitError::Failed(Effect::post_add_failed()))
            }
        }
    }
}

/// True when the markup has no visible text, e.g. `<p><br></p>`.
fn is_blank_html(html: &str) -> bool {
    let mut text = String::new();
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.replace("&nbsp;", " ").trim().is_empty()
}
