//! Generic typed HTTP access
//!
//! Every failure (transport, unexpected status, undecodable body) is logged
//! here and turned into `None` / `false`. Callers only ever see whether a
//! call produced a result.

use async_trait::async_trait;
use audisense_common::config::ApiSettings;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

/// Why a gateway call produced no result
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected status {0}")]
    Status(StatusCode),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Typed access to the API
///
/// Paths are relative to the configured base URL, e.g. `/api/hearingtests/3`.
#[async_trait]
pub trait DataGateway: Send + Sync {
    /// GET and decode the body; `None` on any failure
    async fn get<T>(&self, path: &str) -> Option<T>
    where
        T: DeserializeOwned + Send;

    /// POST `body` as JSON and decode the response; `None` on any failure
    async fn post<B, R>(&self, path: &str, body: &B) -> Option<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send;

    /// PUT `body` as JSON; whether the response was a success status
    async fn put<B>(&self, path: &str, body: &B) -> bool
    where
        B: Serialize + Sync;

    /// DELETE; whether the response was a success status
    async fn delete(&self, path: &str) -> bool;
}

/// `reqwest`-backed gateway
pub struct HttpDataGateway {
    client: Client,
    base_url: String,
}

impl HttpDataGateway {
    pub fn new(settings: &ApiSettings) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(settings.timeout()).build()?;
        let base_url = settings.normalized_base_url();
        info!("Using API base URL: {}", base_url);

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn try_get<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let response = self.client.get(self.url(path)).send().await?;
        decode(ensure_success(response)?).await
    }

    async fn try_post<B, R>(&self, path: &str, body: &B) -> Result<R, GatewayError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        decode(ensure_success(response)?).await
    }

    async fn try_put<B: Serialize>(&self, path: &str, body: &B) -> Result<(), GatewayError> {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        ensure_success(response).map(|_| ())
    }

    async fn try_delete(&self, path: &str) -> Result<(), GatewayError> {
        let response = self.client.delete(self.url(path)).send().await?;
        ensure_success(response).map(|_| ())
    }
}

fn ensure_success(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(GatewayError::Status(status))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

fn log_failure(method: &str, path: &str, err: &GatewayError) {
    match err {
        GatewayError::Status(status) => {
            warn!("{} {} failed. Status: {}", method, path, status)
        }
        _ => error!("Error during {} {}: {}", method, path, err),
    }
}

#[async_trait]
impl DataGateway for HttpDataGateway {
    async fn get<T>(&self, path: &str) -> Option<T>
    where
        T: DeserializeOwned + Send,
    {
        info!("Fetching data from endpoint: {}", path);
        self.try_get(path)
            .await
            .map_err(|e| log_failure("GET", path, &e))
            .ok()
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Option<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        info!("Posting data to endpoint: {}", path);
        self.try_post(path, body)
            .await
            .map_err(|e| log_failure("POST", path, &e))
            .ok()
    }

    async fn put<B>(&self, path: &str, body: &B) -> bool
    where
        B: Serialize + Sync,
    {
        info!("Updating resource at endpoint: {}", path);
        self.try_put(path, body)
            .await
            .map_err(|e| log_failure("PUT", path, &e))
            .is_ok()
    }

    async fn delete(&self, path: &str) -> bool {
        info!("Deleting resource at endpoint: {}", path);
        self.try_delete(path)
            .await
            .map_err(|e| log_failure("DELETE", path, &e))
            .is_ok()
    }
}
