//! RestClient - minimal client for a PostgREST-style table API.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::query::{Filter, Query};
use crate::exitcode;

/// Path prefix of the REST endpoint on a Supabase project URL.
const REST_PATH: &str = "rest/v1";

/// Error body returned by PostgREST on failed requests.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(default)]
    hint: Option<String>,
}

/// Pull a human-readable message out of an error response body.
///
/// Falls back to the raw body when it is not a PostgREST error object.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody {
            message,
            hint: Some(hint),
        }) if !hint.is_empty() => format!("{} ({})", message, hint),
        Ok(parsed) => parsed.message,
        Err(_) if body.trim().is_empty() => "no response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

/// Client for a PostgREST table API.
#[derive(Clone)]
pub struct RestClient {
    api_key: String,
    base_url: String,
    http_client: reqwest::Client,
}

impl RestClient {
    /// Create a client for the project at `project_url`.
    ///
    /// Requests go to `{project_url}/rest/v1/{table}`. Timeouts are left
    /// at the reqwest defaults.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::MissingUrl` or `StoreError::MissingApiKey` when
    /// either value is blank, `StoreError::InvalidUrl` when the URL is not an
    /// absolute http(s) URL, or `StoreError::Http` if the HTTP client cannot
    /// be built.
    pub fn new(project_url: &str, api_key: &str) -> Result<Self, StoreError> {
        let project_url = project_url.trim().trim_end_matches('/');
        if project_url.is_empty() {
            return Err(StoreError::MissingUrl);
        }
        if api_key.trim().is_empty() {
            return Err(StoreError::MissingApiKey);
        }
        match reqwest::Url::parse(project_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(StoreError::InvalidUrl(project_url.to_string())),
        }

        let http_client = reqwest::Client::builder().build()?;

        Ok(Self {
            api_key: api_key.trim().to_string(),
            base_url: format!("{}/{}", project_url, REST_PATH),
            http_client,
        })
    }

    /// Get the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the REST base URL (project URL plus `/rest/v1`).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    fn request(&self, method: reqwest::Method, table: &str) -> reqwest::RequestBuilder {
        self.http_client
            .request(method, self.table_url(table))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    /// Turn a non-2xx response into `StoreError::Api`.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        log::warn!("Remote store returned {}: {}", status, message);
        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Fetch all rows of `table` matching `query`.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, StoreError> {
        let params = query.to_params();
        log::debug!("GET {} {:?}", table, params);

        let response = self
            .request(reqwest::Method::GET, table)
            .query(&params)
            .send()
            .await?;
        let rows = Self::check(response).await?.json::<Vec<T>>().await?;
        Ok(rows)
    }

    /// Fetch at most one row.
    ///
    /// Returns `Ok(None)` when nothing matches and
    /// `StoreError::MultipleRows` when more than one row does.
    pub async fn maybe_single<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Option<T>, StoreError> {
        let mut rows: Vec<T> = self.select(table, query).await?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            n => Err(StoreError::MultipleRows(n)),
        }
    }

    /// Insert one row and return it as stored.
    pub async fn insert<B, T>(&self, table: &str, row: &B) -> Result<T, StoreError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        log::debug!("POST {}", table);

        let response = self
            .request(reqwest::Method::POST, table)
            .header("Content-Type", "application/json")
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;
        let mut rows = Self::check(response).await?.json::<Vec<T>>().await?;
        if rows.is_empty() {
            return Err(StoreError::EmptyInsert);
        }
        Ok(rows.swap_remove(0))
    }

    /// Apply `patch` to every row matching `filters`.
    pub async fn update<B>(&self, table: &str, filters: &[Filter], patch: &B) -> Result<(), StoreError>
    where
        B: Serialize + ?Sized,
    {
        let params: Vec<(String, String)> = filters.iter().map(Filter::to_param).collect();
        log::debug!("PATCH {} {:?}", table, params);

        let response = self
            .request(reqwest::Method::PATCH, table)
            .header("Content-Type", "application/json")
            .query(&params)
            .json(patch)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Delete every row matching `filters`.
    pub async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), StoreError> {
        let params: Vec<(String, String)> = filters.iter().map(Filter::to_param).collect();
        log::debug!("DELETE {} {:?}", table, params);

        let response = self
            .request(reqwest::Method::DELETE, table)
            .query(&params)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

/// Errors that can occur when talking to the remote store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("remote store URL not configured")]
    MissingUrl,

    #[error("remote store API key not configured")]
    MissingApiKey,

    #[error("invalid remote store URL '{0}': expected http(s)://<host>")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code of the failed response
        status: u16,
        /// Message reported by the store
        message: String,
    },

    #[error("expected at most one row, got {0}")]
    MultipleRows(usize),

    #[error("insert returned no row")]
    EmptyInsert,
}

impl StoreError {
    /// Exit code for this error. Bad credentials or URL are a configuration
    /// problem; everything else means the store could not be used.
    pub fn exit_code(&self) -> i32 {
        match self {
            StoreError::MissingUrl | StoreError::MissingApiKey | StoreError::InvalidUrl(_) => {
                exitcode::CONFIG
            }
            _ => exitcode::UNAVAILABLE,
        }
    }
}
