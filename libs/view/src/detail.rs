use entity::prelude::*;
use repository::PostStore;
use tracing::{error, warn};

use crate::{
    media::{Carousel, FallbackImages},
    notice::Effect,
};

/// Outcome of looking up a single post. Absence and failure are kept apart
/// so the caller can tell the user which one happened.
#[derive(Debug, Clone, PartialEq)]
pub enum PostLookup {
    Found(PostEntity),
    NotFound,
    TransportError(String),
}

impl PostLookup {
    /// `Err` carries the notice and the navigation back to the listing.
    pub fn into_result(self) -> Result<PostEntity, Effect> {
        match self {
            PostLookup::Found(post) => Ok(post),
            PostLookup::NotFound => Err(Effect::post_not_found()),
            PostLookup::TransportError(_) => Err(Effect::post_load_failed()),
        }
    }
}

pub async fn lookup<S: PostStore>(store: &S, id: &str) -> PostLookup {
    match store.find_by_id(id).await {
        Ok(Some(post)) => PostLookup::Found(post),
        Ok(None) => {
            warn!(task = "fetch post", id, err = "not found");
            PostLookup::NotFound
        }
        Err(e) => {
            error!(task = "fetch post", id, err = e.to_string());
            PostLookup::TransportError(e.to_string())
        }
    }
}

/// Uncommitted edits. Only `content` and `category` are editable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub content: String,
    pub category: String,
}

pub struct DetailView<S> {
    store: S,
    session: Session,
    post: PostEntity,
    draft: Option<Draft>,
    carousel: Carousel,
}

impl<S: PostStore> DetailView<S> {
    pub async fn load(
        store: S,
        session: Session,
        id: &str,
    ) -> Result<Self, Effect> {
        let post = lookup(&store, id).await.into_result()?;
        let carousel = Carousel::new(post.media.len());

        Ok(Self {
            store,
            session,
            post,
            draft: None,
            carousel,
        })
    }

    pub fn post(&self) -> &PostEntity {
        &self.post
    }

    pub fn can_edit(&self) -> bool {
        self.session.is_owner(&self.post)
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    /// The media under the carousel, or the post's fallback image.
    pub fn hero<'a>(&'a self, fallbacks: &'a FallbackImages) -> &'a str {
        self.post
            .media
            .urls()
            .get(self.carousel.current())
            .copied()
            .unwrap_or_else(|| fallbacks.pick(&self.post.id))
    }

    pub fn begin_edit(&mut self) -> Result<(), Effect> {
        if !self.can_edit() {
            return Err(Effect::not_owner());
        }
        self.draft = Some(Draft {
            content: self.post.content.clone().unwrap_or_default(),
            category: self.post.category.clone(),
        });
        Ok(())
    }

    pub fn set_draft_content(&mut self, content: &str) {
        if let Some(draft) = self.draft.as_mut() {
            draft.content = content.to_string();
        }
    }

    pub fn set_draft_category(&mut self, category: &str) {
        if let Some(draft) = self.draft.as_mut() {
            draft.category = category.to_string();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    /// Commits the draft in one write. The local post is only updated once
    /// the backend accepts it; on failure the draft is kept for retry.
    pub async fn save(&mut self) -> Effect {
        if !self.can_edit() {
            return Effect::not_owner();
        }
        let Some(draft) = self.draft.as_ref() else {
            return Effect::none();
        };
        if draft.category.trim().is_empty() {
            return Effect::invalid("Category is required");
        }

        let content_changed =
            self.post.content.as_deref() != Some(draft.content.as_str());
        let patch = PostPatch {
            content: content_changed.then(|| draft.content.clone()),
            category: (self.post.category != draft.category)
                .then(|| draft.category.clone()),
        };
        if patch.is_empty() {
            self.draft = None;
            return Effect::none();
        }

        match self.store.update(&self.post.id, patch.clone()).await {
            Ok(()) => {
                self.post.merge(&patch);
                self.draft = None;
                Effect::post_updated()
            }
            Err(e) => {
                error!(
                    task = "update post",
                    id = %self.post.id,
                    err = e.to_string()
                );
                Effect::post_update_failed()
            }
        }
    }

    pub async fn delete(&mut self) -> Effect {
        if !self.can_edit() {
            return Effect::not_owner();
        }

        match self.store.delete(&self.post.id).await {
            Ok(()) => Effect::post_deleted(),
            Err(e) => {
                error!(
                    task = "delete post",
                    id = %self.post.id,
                    err = e.to_string()
                );
                Effect::post_delete_failed()
            }
        }
    }
}
