//! HTTP client seam.
//!
//! Widgets talk to the backend through [`ApiClient`], which wraps a
//! [`Transport`]. The production transport is [`ReqwestTransport`]; tests
//! substitute an in-memory one.
//!
//! Two call styles are offered:
//! - [`ApiClient::api`] returns the raw [`ApiResponse`] whatever its status,
//!   leaving classification to the caller.
//! - [`ApiClient::api_processed`] requires a 2xx status and parses the body
//!   into the caller's type.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{WidgetError, WidgetResult};

/// HTTP verbs used by the widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// A request relative to the backend origin.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base URL, e.g. `api/linked-accounts/v1/accounts`
    pub url: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    /// Attach a JSON body.
    pub fn with_json<B: serde::Serialize>(mut self, body: &B) -> WidgetResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for any 2xx status.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> WidgetResult<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Sends a request and yields the response.
///
/// A non-2xx status is *not* an error at this layer; only failures to
/// complete the exchange are.
pub trait Transport: Send + Sync + 'static {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = WidgetResult<ApiResponse>> + Send;
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    base_url: String,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> WidgetResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn absolute(&self, url: &str) -> String {
        format!("{}/{}", self.base_url, url.trim_start_matches('/'))
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> WidgetResult<ApiResponse> {
        let url = self.absolute(&request.url);
        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }
}

/// Cheaply clonable handle used by every widget action.
pub struct ApiClient<T> {
    transport: Arc<T>,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T> PartialEq for ApiClient<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.transport, &other.transport)
    }
}

impl ApiClient<ReqwestTransport> {
    /// Client for the configured backend.
    pub fn from_config(config: &ClientConfig) -> WidgetResult<Self> {
        Ok(Self::new(ReqwestTransport::new(config)?))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request and return the raw response.
    pub async fn api(&self, request: ApiRequest) -> WidgetResult<ApiResponse> {
        let method = request.method;
        let url = request.url.clone();
        tracing::debug!(%method, %url, "api request");

        let response = self.transport.send(request).await?;
        tracing::debug!(%method, %url, status = response.status, "api response");
        Ok(response)
    }

    /// Send a request and parse a successful body into `D`.
    pub async fn api_processed<D: DeserializeOwned>(&self, request: ApiRequest) -> WidgetResult<D> {
        let response = self.api(request).await?;
        if !response.ok() {
            return Err(WidgetError::HttpStatus(response.status));
        }
        response.json()
    }
}
