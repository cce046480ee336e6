use std::collections::BTreeSet;

use entity::prelude::*;
use tracing::info;

use crate::{response::IntoResponse as _, RepositoryError, Response};

use super::{
    CategoryRow, NewPostRow, PostPatchRow, PostRepository, PostRow,
    PostStore,
};

impl PostStore for PostRepository {
    async fn find_all(&self) -> Response<Vec<PostEntity>> {
        let text = self
            .client
            .get(&self.path, &[("select", "*"), ("order", "created_at.desc")])
            .await?;

        let rows = serde_json::from_str::<Vec<PostRow>>(&text)
            .into_response("failed to parse posts")?;

        Ok(rows.into_iter().map(PostEntity::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Response<Option<PostEntity>> {
        let filter = format!("eq.{}", id);
        let text = self
            .client
            .get(&self.path, &[("select", "*"), ("id", filter.as_str())])
            .await?;

        let mut rows = serde_json::from_str::<Vec<PostRow>>(&text)
            .into_response("failed to parse post")?;

        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop().map(PostEntity::from)),
            count => Err(RepositoryError::UnexpectedRows { count }),
        }
    }

    async fn find_categories(&self) -> Response<Vec<String>> {
        let text = self
            .client
            .get(
                &self.path,
                &[("select", "category"), ("category", "not.is.null")],
            )
            .await?;

        let rows = serde_json::from_str::<Vec<CategoryRow>>(&text)
            .into_response("failed to parse categories")?;

        let categories: BTreeSet<String> =
            rows.into_iter().map(|row| row.category).collect();

        Ok(categories.into_iter().collect())
    }

    async fn insert(&self, post: NewPostEntity) -> Response<PostEntity> {
        let row = NewPostRow::from(post);
        let text = self
            .client
            .post(&self.path, &[row], "return=representation")
            .await?;

        let mut rows = serde_json::from_str::<Vec<PostRow>>(&text)
            .into_response("failed to parse inserted post")?;

        if rows.len() != 1 {
            return Err(RepositoryError::UnexpectedRows { count: rows.len() });
        }
        let post = rows.remove(0);
        info!(task = "insert post", id = %post.id);

        Ok(post.into())
    }

    async fn update(&self, id: &str, patch: PostPatch) -> Response<()> {
        let filter = format!("eq.{}", id);
        let row = PostPatchRow::from(patch);
        self.client
            .patch(&self.path, &[("id", filter.as_str())], &row)
            .await?;
        info!(task = "update post", id);

        Ok(())
    }

    async fn delete(&self, id: &str) -> Response<()> {
        let filter = format!("eq.{}", id);
        self.client
            .delete(&self.path, &[("id", filter.as_str())])
            .await?;
        info!(task = "delete post", id);

        Ok(())
    }
}
