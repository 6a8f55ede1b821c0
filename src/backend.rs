//! Client for the PostgREST `posts` table.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};

use crate::models::{Post, PostInput};

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("backend responded with {status}")]
    Status { status: StatusCode, message: String },

    #[error("API key cannot be used as a header value")]
    InvalidKey,
}

/// Headers every backend call carries.
pub fn backend_headers(key: &str) -> Result<HeaderMap, BackendError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        "apikey",
        HeaderValue::from_str(key).map_err(|_| BackendError::InvalidKey)?,
    );
    let mut bearer =
        HeaderValue::from_str(&format!("Bearer {key}")).map_err(|_| BackendError::InvalidKey)?;
    bearer.set_sensitive(true);
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

fn id_filter(id: i64) -> String {
    format!("eq.{id}")
}

async fn ensure_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(BackendError::Status { status, message })
}

#[derive(Clone, Debug)]
pub struct PostsClient {
    http: Client,
    endpoint: String,
}

impl PostsClient {
    pub fn new(base_url: &str, key: &str, timeout: Duration) -> Result<Self, BackendError> {
        let http = Client::builder()
            .default_headers(backend_headers(key)?)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}/rest/v1/posts", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// All posts, newest first.
    pub async fn list(&self) -> Result<Vec<Post>, BackendError> {
        tracing::debug!("listing posts");
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;

        Ok(ensure_success(response).await?.json().await?)
    }

    /// The first row matching `id`, if any.
    pub async fn get(&self, id: i64) -> Result<Option<Post>, BackendError> {
        tracing::debug!(id, "fetching post");
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("select", "*".to_string()), ("id", id_filter(id))])
            .send()
            .await?;

        let rows: Vec<Post> = ensure_success(response).await?.json().await?;
        Ok(rows.into_iter().next())
    }

    pub async fn create(&self, input: &PostInput) -> Result<(), BackendError> {
        tracing::debug!("creating post");
        let response = self.http.post(&self.endpoint).json(input).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    pub async fn update(&self, id: i64, input: &PostInput) -> Result<(), BackendError> {
        tracing::debug!(id, "updating post");
        let response = self
            .http
            .patch(&self.endpoint)
            .query(&[("id", id_filter(id))])
            .json(input)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), BackendError> {
        tracing::debug!(id, "deleting post");
        let response = self
            .http
            .delete(&self.endpoint)
            .query(&[("id", id_filter(id))])
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}
