pub mod implementation;

use std::future::Future;

use chrono::{DateTime, Utc};
use entity::prelude::*;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{client::Client, Response};

/// Read and write access to the post collection. The views are written
/// against this trait so they can run over an in-memory store in tests.
pub trait PostStore {
    /// All posts, newest first.
    fn find_all(
        &self,
    ) -> impl Future<Output = Response<Vec<PostEntity>>> + Send;

    /// `Ok(None)` when the query succeeded but no row carries `id`.
    fn find_by_id(
        &self,
        id: &str,
    ) -> impl Future<Output = Response<Option<PostEntity>>> + Send;

    /// Distinct categories in use, sorted ascending.
    fn find_categories(
        &self,
    ) -> impl Future<Output = Response<Vec<String>>> + Send;

    fn insert(
        &self,
        post: NewPostEntity,
    ) -> impl Future<Output = Response<PostEntity>> + Send;

    fn update(
        &self,
        id: &str,
        patch: PostPatch,
    ) -> impl Future<Output = Response<()>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = Response<()>> + Send;
}

#[derive(Clone, Debug)]
pub struct PostRepository {
    client: Client,
    path: String,
}

impl PostRepository {
    pub fn new(client: Client, path: String) -> Self {
        Self { client, path }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct PostRow {
    pub id: String,
    pub title: String,
    /// NOT NULL in the posts table. A null here fails the whole fetch.
    pub category: String,
    pub content: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_urls: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl From<PostRow> for PostEntity {
    fn from(value: PostRow) -> Self {
        Self {
            id: value.id,
            title: value.title,
            category: value.category,
            content: value.content,
            media: Media::from_fields(value.image_url, value.image_urls),
            created_at: value.created_at,
            owner_id: value.user_id,
        }
    }
}

#[derive(Deserialize, Debug)]
pub(crate) struct CategoryRow {
    pub category: String,
}

#[skip_serializing_none]
#[derive(Serialize, Debug, PartialEq)]
pub(crate) struct NewPostRow {
    pub title: String,
    pub category: String,
    pub content: String,
    pub image_url: Option<String>,
    pub image_urls: Option<Vec<String>>,
    pub user_id: Option<String>,
}

impl From<NewPostEntity> for NewPostRow {
    fn from(value: NewPostEntity) -> Self {
        let (image_url, image_urls) = match value.media {
            Media::None => (None, None),
            Media::Single(url) => (Some(url), None),
            Media::Many(urls) => (urls.first().cloned(), Some(urls)),
        };

        Self {
            title: value.title,
            category: value.category,
            content: value.content,
            image_url,
            image_urls,
            user_id: value.owner_id,
        }
    }
}

#[skip_serializing_none]
#[derive(Serialize, Debug, PartialEq)]
pub(crate) struct PostPatchRow {
    pub content: Option<String>,
    pub category: Option<String>,
}

impl From<PostPatch> for PostPatchRow {
    fn from(value: PostPatch) -> Self {
        Self {
            content: value.content,
            category: value.category,
        }
    }
}
