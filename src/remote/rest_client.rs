use reqwest::Client as HttpClient;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use crate::models::Transaction;
use crate::remote::{RemoteError, RemoteStore};

/// Connection parameters of the hosted table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    /// Project endpoint, e.g. `https://xyz.supabase.co`.
    pub url: String,
    /// Anonymous access token of the project.
    pub token: String,
}

/// Client for a PostgREST style REST endpoint exposing the `transactions`
/// table.
pub struct RestRemote {
    http_client: HttpClient,
    table_url: String,
}

impl RestRemote {
    const TABLE_PATH: &'static str = "rest/v1/transactions";

    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let http_client = HttpClient::builder()
            .default_headers(Self::create_headers(&config.token)?)
            .build()
            .map_err(|e| RemoteError::InvalidConfig(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            table_url: format!("{}/{}", config.url.trim_end_matches('/'), Self::TABLE_PATH),
        })
    }

    pub fn table_url(&self) -> &str {
        &self.table_url
    }

    /// The token goes both into `apikey` and into a bearer authorization.
    fn create_headers(token: &str) -> Result<HeaderMap, RemoteError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let api_key = HeaderValue::from_str(token)
            .map_err(|e| RemoteError::InvalidConfig(format!("Failed to create apikey header: {}", e)))?;
        headers.insert(HeaderName::from_static("apikey"), api_key);

        let auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| RemoteError::InvalidConfig(format!("Failed to create auth header: {}", e)))?;
        headers.insert(AUTHORIZATION, auth_value);

        Ok(headers)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();

        Err(RemoteError::from_response(status, &body))
    }
}

impl RemoteStore for RestRemote {
    /// GET /transactions?select=*&order=created_at.desc
    async fn fetch_all(&self) -> Result<Vec<Transaction>, RemoteError> {
        let response = self.http_client
            .get(&self.table_url)
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await
            .map_err(|e| RemoteError::RequestError(format!("Request failed: {}", e)))?;

        let transactions = Self::check_status(response)
            .await?
            .json::<Vec<Transaction>>()
            .await
            .map_err(|e| RemoteError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        debug!("Fetched {} transactions from the remote store", transactions.len());

        Ok(transactions)
    }

    /// POST /transactions with a one element array body.
    async fn insert(&self, transaction: &Transaction) -> Result<(), RemoteError> {
        let response = self.http_client
            .post(&self.table_url)
            .header("Prefer", "return=minimal")
            .json(&[transaction])
            .send()
            .await
            .map_err(|e| RemoteError::RequestError(format!("Request failed: {}", e)))?;

        Self::check_status(response).await?;

        Ok(())
    }

    /// DELETE /transactions?id=neq. which matches every row; PostgREST refuses
    /// a DELETE without a filter.
    async fn delete_all(&self) -> Result<(), RemoteError> {
        let response = self.http_client
            .delete(&self.table_url)
            .query(&[("id", "neq.")])
            .send()
            .await
            .map_err(|e| RemoteError::RequestError(format!("Request failed: {}", e)))?;

        Self::check_status(response).await?;

        Ok(())
    }
}
