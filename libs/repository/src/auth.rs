use entity::prelude::*;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::warn;

use crate::{
    client::Client, response::IntoResponse as _, RepositoryError, Response,
};

#[derive(Clone, Debug)]
pub struct AuthRepository {
    client: Client,
    path: String,
    has_token: bool,
}

#[derive(Deserialize, Debug)]
struct UserRow {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl From<UserRow> for UserEntity {
    fn from(value: UserRow) -> Self {
        Self {
            id: value.id,
            email: value.email,
        }
    }
}

impl AuthRepository {
    pub fn new(client: Client, auth_path: String, has_token: bool) -> Self {
        Self {
            client,
            path: format!("{}/user", auth_path.trim_end_matches('/')),
            has_token,
        }
    }

    /// Resolves the session for the configured access token. A missing or
    /// rejected token yields an anonymous session rather than an error.
    pub async fn current_session(&self) -> Response<Session> {
        if !self.has_token {
            return Ok(Session::anonymous());
        }

        let text = match self.client.get(&self.path, &[]).await {
            Ok(text) => text,
            Err(RepositoryError::FailedStatusCode {
                status_code: StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN,
                message,
            }) => {
                warn!(task = "resolve session", err = message);
                return Ok(Session::anonymous());
            }
            Err(e) => return Err(e),
        };

        let user = serde_json::from_str::<UserRow>(&text)
            .into_response("failed to parse user")?;

        Ok(Session::signed_in(user.into()))
    }
}
