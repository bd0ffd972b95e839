pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::PortalConfig;
use crate::error::AppError;
use crate::session::Session;

pub use memory::{ApiCall, MemoryApiClient};

/// Transport seam towards the portal's REST backend.
///
/// Paths are relative to the configured API base (`classes`, `classes/3`,
/// `student/schedule`). Write calls return the raw acknowledgement body.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, AppError>;
    async fn post(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<String, AppError>;
    async fn put(&self, path: &str, body: &Value) -> Result<String, AppError>;
    async fn delete(&self, path: &str) -> Result<String, AppError>;
}

pub struct HttpApiClient {
    client: Client,
    base_url: Url,
    session: Arc<Session>,
}

impl HttpApiClient {
    pub fn new(config: &PortalConfig, session: Arc<Session>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            session,
        })
    }

    fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, AppError> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| AppError::Config(format!("Invalid request path {}: {}", path, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<String, AppError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            tracing::warn!("API responded {}: {}", status, body);
            return Err(AppError::Status { status, body });
        }
        Ok(body)
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, AppError> {
        let url = self.url(path, query)?;
        tracing::debug!("GET {}", url);
        let body = self.send(self.client.get(url)).await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn post(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<String, AppError> {
        let url = self.url(path, query)?;
        tracing::debug!("POST {}", url);
        let request = match body {
            Some(body) => self.client.post(url).json(body),
            None => self.client.post(url),
        };
        self.send(request).await
    }

    async fn put(&self, path: &str, body: &Value) -> Result<String, AppError> {
        let url = self.url(path, &[])?;
        tracing::debug!("PUT {}", url);
        self.send(self.client.put(url).json(body)).await
    }

    async fn delete(&self, path: &str) -> Result<String, AppError> {
        let url = self.url(path, &[])?;
        tracing::debug!("DELETE {}", url);
        self.send(self.client.delete(url)).await
    }
}

/// Accepts every call and returns empty payloads.
pub struct NoopApiClient;

#[async_trait]
impl ApiClient for NoopApiClient {
    async fn get(&self, _path: &str, _query: &[(&str, &str)]) -> Result<Value, AppError> {
        Ok(Value::Null)
    }

    async fn post(
        &self,
        _path: &str,
        _query: &[(&str, &str)],
        _body: Option<&Value>,
    ) -> Result<String, AppError> {
        Ok(String::new())
    }

    async fn put(&self, _path: &str, _body: &Value) -> Result<String, AppError> {
        Ok(String::new())
    }

    async fn delete(&self, _path: &str) -> Result<String, AppError> {
        Ok(String::new())
    }
}

pub async fn fetch<T: DeserializeOwned>(
    api: &dyn ApiClient,
    path: &str,
    query: &[(&str, &str)],
) -> Result<T, AppError> {
    let value = api.get(path, query).await?;
    Ok(serde_json::from_value(value)?)
}

/// List endpoints may answer `null`; that reads as an empty collection.
pub async fn fetch_list<T: DeserializeOwned>(
    api: &dyn ApiClient,
    path: &str,
    query: &[(&str, &str)],
) -> Result<Vec<T>, AppError> {
    match api.get(path, query).await? {
        Value::Null => Ok(Vec::new()),
        value => Ok(serde_json::from_value(value)?),
    }
}

/// POST a JSON body to an endpoint that answers with JSON.
pub async fn submit<B: Serialize, T: DeserializeOwned>(
    api: &dyn ApiClient,
    path: &str,
    body: &B,
) -> Result<T, AppError> {
    let body = serde_json::to_value(body)?;
    let text = api.post(path, &[], Some(&body)).await?;
    Ok(serde_json::from_str(&text)?)
}

/// PUT a JSON body to an endpoint that answers with JSON.
pub async fn replace<B: Serialize, T: DeserializeOwned>(
    api: &dyn ApiClient,
    path: &str,
    body: &B,
) -> Result<T, AppError> {
    let body = serde_json::to_value(body)?;
    let text = api.put(path, &body).await?;
    Ok(serde_json::from_str(&text)?)
}

/// Optional query parameters, dropping the unset ones.
pub(crate) fn query_pairs<'a>(pairs: &[(&'a str, Option<&'a str>)]) -> Vec<(&'a str, &'a str)> {
    pairs
        .iter()
        .filter_map(|(key, value)| match value {
            Some(v) if !v.is_empty() => Some((*key, *v)),
            _ => None,
        })
        .collect()
}
