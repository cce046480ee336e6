use reqwest::{
    header::{HeaderMap, HeaderValue},
    RequestBuilder,
};
use serde::Serialize;
use tracing::debug;

use crate::{response::IntoResponse as _, RepositoryError, Response};

pub type Query<'a> = [(&'a str, &'a str)];

/// Thin wrapper over the backend's REST surface. Every request carries the
/// project key and either the user's access token or the anon key.
#[derive(Clone, Debug)]
pub struct Client {
    base_url: String,
    client: reqwest::Client,
}

impl Client {
    pub fn new(
        base_url: &str,
        anon_key: &str,
        access_token: Option<&str>,
    ) -> Response<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert(
            "apikey",
            HeaderValue::from_str(anon_key).into_response("invalid anon key")?,
        );
        headers.insert(
            "Authorization",
            HeaderValue::from_str(
                format!("Bearer {}", access_token.unwrap_or(anon_key))
                    .as_str(),
            )
            .into_response("invalid access token")?,
        );

        let client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .build()
            .into_response("failed to build http client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get(&self, path: &str, query: &Query<'_>) -> Response<String> {
        let request = self.client.get(self.url(path)).query(query);
        self.send(request).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        prefer: &str,
    ) -> Response<String> {
        let request = self
            .client
            .post(self.url(path))
            .header("Prefer", prefer)
            .json(body);
        self.send(request).await
    }

    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Query<'_>,
        body: &B,
    ) -> Response<String> {
        let request = self
            .client
            .patch(self.url(path))
            .query(query)
            .header("Prefer", "return=minimal")
            .json(body);
        self.send(request).await
    }

    pub async fn delete(
        &self,
        path: &str,
        query: &Query<'_>,
    ) -> Response<String> {
        let request = self.client.delete(self.url(path)).query(query);
        self.send(request).await
    }

    async fn send(&self, request: RequestBuilder) -> Response<String> {
        let response = request.send().await.into_response("failed to send")?;

        let status = response.status();
        debug!(task = "backend request", url = %response.url(), %status);

        let text = response.text().await.into_response("failed to get text")?;

        if !status.is_success() {
            return Err(RepositoryError::FailedStatusCode {
                status_code: status,
                message: text,
            });
        }

        Ok(text)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use wiremock::{
        matchers::{header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    #[tokio::test]
    async fn test_get_sends_key_headers() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/posts"))
            .and(query_param("select", "*"))
            .and(header("apikey", "anon"))
            .and(header("Authorization", "Bearer token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;
        let client = Client::new(&server.uri(), "anon", Some("token")).unwrap();

        // Act
        let text = client.get("rest/v1/posts", &[("select", "*")]).await;

        // Assert
        assert_eq!(text.unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_failed_status_code() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(500).set_body_string("boom"),
            )
            .mount(&server)
            .await;
        let client = Client::new(&server.uri(), "anon", None).unwrap();

        // Act
        let result = client.get("rest/v1/posts", &[]).await;

        // Assert
        match result {
            Err(RepositoryError::FailedStatusCode {
                status_code,
                message,
            }) => {
                assert_eq!(status_code.as_u16(), 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
