use std::sync::{Arc, Mutex};

use chrono::Utc;
use entity::prelude::*;
use repository::{PostStore, RepositoryError, Response};

#[derive(Default)]
struct State {
    posts: Vec<PostEntity>,
    failing: bool,
    failing_reads: bool,
    inserted: usize,
    writes: usize,
}

/// In-memory `PostStore` that can be switched into a failing mode.
#[derive(Clone, Default)]
pub(crate) struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn with_posts(posts: Vec<PostEntity>) -> Self {
        let store = Self::default();
        store.state.lock().unwrap().posts = posts;
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.state.lock().unwrap().failing = failing;
    }

    /// Reads fail while writes keep succeeding.
    pub fn set_failing_reads(&self, failing: bool) {
        self.state.lock().unwrap().failing_reads = failing;
    }

    pub fn posts(&self) -> Vec<PostEntity> {
        self.state.lock().unwrap().posts.clone()
    }

    pub fn writes(&self) -> usize {
        self.state.lock().unwrap().writes
    }

    fn check_read(&self) -> Response<()> {
        if self.state.lock().unwrap().failing_reads {
            return Err(RepositoryError::Config {
                message: "backend unavailable".to_string(),
            });
        }
        self.check()
    }

    fn check(&self) -> Response<()> {
        if self.state.lock().unwrap().failing {
            return Err(RepositoryError::Config {
                message: "backend unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl PostStore for MemoryStore {
    async fn find_all(&self) -> Response<Vec<PostEntity>> {
        self.check_read()?;
        Ok(self.posts())
    }

    async fn find_by_id(&self, id: &str) -> Response<Option<PostEntity>> {
        self.check_read()?;
        let mut matches: Vec<PostEntity> =
            self.posts().into_iter().filter(|post| post.id == id).collect();
        if matches.len() > 1 {
            return Err(RepositoryError::UnexpectedRows {
                count: matches.len(),
            });
        }
        Ok(matches.pop())
    }

    async fn find_categories(&self) -> Response<Vec<String>> {
        self.check_read()?;
        let mut categories: Vec<String> =
            self.posts().into_iter().map(|post| post.category).collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    async fn insert(&self, post: NewPostEntity) -> Response<PostEntity> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        state.inserted += 1;
        state.writes += 1;
        let post = PostEntity {
            id: format!("new-{}", state.inserted),
            title: post.title,
            category: post.category,
            content: Some(post.content),
            media: post.media,
            created_at: Utc::now(),
            owner_id: post.owner_id,
        };
        state.posts.insert(0, post.clone());
        Ok(post)
    }

    async fn update(&self, id: &str, patch: PostPatch) -> Response<()> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        state.writes += 1;
        if let Some(post) = state.posts.iter_mut().find(|post| post.id == id) {
            post.merge(&patch);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Response<()> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        state.writes += 1;
        state.posts.retain(|post| post.id != id);
        Ok(())
    }
}
