use entity::prelude::*;
use repository::PostStore;
use tracing::{error, info, warn};

use crate::{
    form::NewPostForm,
    notice::Effect,
    projection::{
        apply_filter, group_by_category, sections, sorted_categories,
        CategoryFilter, CategoryGroups, CategorySection,
    },
};

/// The listing and category pages: the whole collection, newest first,
/// projected by category under the current filter.
pub struct ListingView<S> {
    store: S,
    posts: Vec<PostEntity>,
    filter: CategoryFilter,
}

impl<S: PostStore> ListingView<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            posts: vec![],
            filter: CategoryFilter::All,
        }
    }

    /// Replaces the posts with a fresh fetch. On failure the previous posts
    /// stay in place and an error notice is returned.
    pub async fn load(&mut self) -> Effect {
        match self.store.find_all().await {
            Ok(posts) => {
                info!(task = "load posts", count = posts.len());
                self.posts = posts;
                Effect::none()
            }
            Err(e) => {
                error!(task = "load posts", err = e.to_string());
                Effect::posts_load_failed()
            }
        }
    }

    pub fn posts(&self) -> &[PostEntity] {
        &self.posts
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    /// Every category present, ignoring the filter.
    pub fn categories(&self) -> Vec<String> {
        sorted_categories(&group_by_category(&self.posts))
    }

    pub fn groups(&self) -> CategoryGroups {
        apply_filter(group_by_category(&self.posts), &self.filter)
    }

    pub fn sections(&self) -> Vec<CategorySection> {
        sections(self.groups())
    }

    /// Submits the creation form and refetches on success. Once the insert
    /// is accepted the result is always the success notice; a failed
    /// refetch is only logged and leaves the previous posts in place.
    pub async fn create(
        &mut self,
        form: &mut NewPostForm,
        session: &Session,
    ) -> Effect {
        match form.submit(&self.store, session).await {
            Ok(post) => {
                if self.load().await.is_error() {
                    warn!(
                        task = "add post",
                        id = %post.id,
                        err = "refetch after insert failed"
                    );
                }
                Effect::post_added()
            }
            Err(e) => e.effect(),
        }
    }
}
