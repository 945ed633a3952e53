use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::Config;
use crate::models::{Exercise, ExerciseSession, NewSession, SessionUpdate};

mod error;
mod retry;

pub use error::ApiError;
pub use retry::RetryConfig;

/// Remote session store operations
#[async_trait]
pub trait SessionRemote: Send + Sync {
    async fn list_sessions(&self) -> Result<Vec<ExerciseSession>, ApiError>;

    async fn get_session(&self, id: &str) -> Result<ExerciseSession, ApiError>;

    async fn create_session(&self, session: &NewSession) -> Result<ExerciseSession, ApiError>;

    async fn update_session(
        &self,
        id: &str,
        update: &SessionUpdate,
    ) -> Result<ExerciseSession, ApiError>;

    async fn delete_session(&self, id: &str) -> Result<(), ApiError>;

    /// Read-only exercise catalog
    async fn list_exercises(&self) -> Result<Vec<Exercise>, ApiError>;
}

/// HTTP client for the session store backend
pub struct ApiClient {
    client: Client,
    base_url: String,
    retry_config: RetryConfig,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_retry_config(config, config.retry.clone())
    }

    /// Create a new API client with custom retry configuration
    pub fn with_retry_config(config: &Config, retry_config: RetryConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.api.timeout_seconds);
        let base_url = config.api.base_url.trim_end_matches('/').to_string();

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            retry_config,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, error_text))
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let client = &self.client;
        let target = url.as_str();

        tracing::debug!("GET {}", url);

        self.retry_config
            .execute(|| async move {
                let response = client.get(target).send().await?;
                Self::parse_json(response).await
            })
            .await
    }
}

#[async_trait]
impl SessionRemote for ApiClient {
    async fn list_sessions(&self) -> Result<Vec<ExerciseSession>, ApiError> {
        let sessions: Vec<ExerciseSession> = self.get_json("/sessions/").await?;
        tracing::info!("Fetched {} sessions", sessions.len());
        Ok(sessions)
    }

    async fn get_session(&self, id: &str) -> Result<ExerciseSession, ApiError> {
        self.get_json(&format!("/sessions/{}/", id)).await
    }

    async fn create_session(&self, session: &NewSession) -> Result<ExerciseSession, ApiError> {
        let url = self.url("/sessions/");

        tracing::debug!("POST {} ({})", url, session.name());

        // Not retried: a replayed create would duplicate the session
        let response = self.client.post(&url).json(session).send().await?;
        let created: ExerciseSession = Self::parse_json(response).await?;

        tracing::info!("Created session {}", created.id);
        Ok(created)
    }

    async fn update_session(
        &self,
        id: &str,
        update: &SessionUpdate,
    ) -> Result<ExerciseSession, ApiError> {
        let url = self.url(&format!("/sessions/{}/", id));
        let client = &self.client;
        let target = url.as_str();

        tracing::debug!("PUT {}", url);

        self.retry_config
            .execute(|| async move {
                let response = client.put(target).json(update).send().await?;
                Self::parse_json(response).await
            })
            .await
    }

    async fn delete_session(&self, id: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("/sessions/{}/", id));
        let client = &self.client;
        let target = url.as_str();

        tracing::debug!("DELETE {}", url);

        self.retry_config
            .execute(|| async move {
                let response = client.delete(target).send().await?;
                let status = response.status();

                if status.is_success() {
                    Ok(())
                } else {
                    let error_text = response.text().await.unwrap_or_default();
                    Err(ApiError::from_status(status, error_text))
                }
            })
            .await
    }

    async fn list_exercises(&self) -> Result<Vec<Exercise>, ApiError> {
        self.get_json("/exercises/").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_creation() {
        let config = Config::default();
        let client = ApiClient::new(&config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let mut config = Config::default();
        config.api.base_url = "http://example.test/api/".to_string();
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://example.test/api");
        assert_eq!(client.url("/sessions/"), "http://example.test/api/sessions/");
    }
}
