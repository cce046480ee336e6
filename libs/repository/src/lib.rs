use auth::AuthRepository;
use client::Client;
use post::PostRepository;
use response::IntoResponse as _;
use toml::{map::Map, Value};

pub mod auth;
pub mod client;
pub mod post;
mod response;

pub use post::PostStore;

#[derive(Clone, Debug)]
pub struct Repository {
    pub post: PostRepository,
    pub auth: AuthRepository,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendConfig {
    pub base_url: String,
    pub anon_key: String,
    pub access_token: Option<String>,
    pub rest_path: String,
    pub auth_path: String,
    pub table: String,
}

impl BackendConfig {
    /// Reads the `[backend]` table of Config.toml and the backend secrets.
    pub fn from_toml(
        config: &Map<String, Value>,
        secrets: &Map<String, Value>,
    ) -> Response<Self> {
        let backend = config
            .get("backend")
            .into_response("failed to load backend config")?;

        let string = |table: &Value, key: &str| -> Response<String> {
            table
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .into_response(&format!("failed to load {} config", key))
        };

        let secret = |key: &str| -> Response<String> {
            secrets
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .into_response(&format!("{} was not found", key))
        };

        Ok(Self {
            base_url: secret("BACKEND_URL")?,
            anon_key: secret("BACKEND_ANON_KEY")?,
            access_token: secrets
                .get("ACCESS_TOKEN")
                .and_then(Value::as_str)
                .filter(|token| !token.is_empty())
                .map(str::to_string),
            rest_path: string(backend, "rest_path")?,
            auth_path: string(backend, "auth_path")?,
            table: string(backend, "table")?,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error(
        "in reqwest crate from unsuccessful http request: {}: {}",
        message,
        source
    )]
    InReqwest {
        message: String,
        source: reqwest::Error,
    },

    #[error("backend answered {}: {}", status_code, message)]
    FailedStatusCode {
        status_code: reqwest::StatusCode,
        message: String,
    },

    #[error(
        "in serde_json crate from malformed payload: {}: {}",
        message,
        source
    )]
    InSerdeJson {
        message: String,
        source: serde_json::Error,
    },

    #[error("invalid header value: {}: {}", message, source)]
    InvalidHeader {
        message: String,
        source: reqwest::header::InvalidHeaderValue,
    },

    #[error("expected at most one row, got {}", count)]
    UnexpectedRows { count: usize },

    #[error("{}", message)]
    Config { message: String },
}

pub type Response<T> = Result<T, RepositoryError>;

pub fn init_repository(config: &BackendConfig) -> Response<Repository> {
    let client = Client::new(
        &config.base_url,
        &config.anon_key,
        config.access_token.as_deref(),
    )?;

    let repository = Repository {
        post: PostRepository::new(
            client.clone(),
            format!("{}/{}", config.rest_path, config.table),
        ),
        auth: AuthRepository::new(
            client,
            config.auth_path.clone(),
            config.access_token.is_some(),
        ),
    };

    Ok(repository)
}

#[cfg(test)]
mod test {
    use super::*;

    fn config_map() -> Map<String, Value> {
        toml::from_str(
            r#"
            [backend]
            rest_path = "rest/v1"
            auth_path = "auth/v1"
            table = "posts"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_backend_config_from_toml() {
        // Arrange
        let secrets: Map<String, Value> = toml::from_str(
            r#"
            BACKEND_URL = "https://example.supabase.co"
            BACKEND_ANON_KEY = "anon"
            ACCESS_TOKEN = ""
            "#,
        )
        .unwrap();

        // Act
        let config = BackendConfig::from_toml(&config_map(), &secrets);

        // Assert
        let config = config.unwrap();
        assert_eq!(config.table, "posts");
        assert_eq!(config.access_token, None);
    }

    #[test]
    fn test_backend_config_missing_secret() {
        let secrets = Map::new();

        let result = BackendConfig::from_toml(&config_map(), &secrets);

        assert!(matches!(result, Err(RepositoryError::Config { .. })));
    }
}
