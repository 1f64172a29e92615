//! Client for the API under test

use std::time::{Duration, Instant};

use reqwest::Method;
use serde_json::Value;

use crate::common::config::HttpConfig;
use crate::common::Result;

use super::response::ApiResponse;

/// Client bound to one base URL
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for `base_url` with the given HTTP settings
    pub fn new(base_url: &str, settings: &HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The base URL requests are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request and read the whole response
    ///
    /// `token`, when present, is sent as `Authorization: Bearer <token>`.
    /// `body`, when present, is sent as JSON.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, authorized = token.is_some(), "sending request");

        let mut request = self.http.request(method.clone(), &url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let started = Instant::now();
        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let elapsed = started.elapsed();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::debug!(error = %e, "response body is not JSON");
                Value::Null
            })
        };

        tracing::debug!(
            %method,
            %url,
            status,
            elapsed_ms = elapsed.as_millis() as u64,
            "received response"
        );

        Ok(ApiResponse {
            status,
            body,
            elapsed,
        })
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<ApiResponse> {
        self.send(Method::GET, path, token, None).await
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: &Value) -> Result<ApiResponse> {
        self.send(Method::POST, path, token, Some(body)).await
    }

    pub async fn put(&self, path: &str, token: Option<&str>, body: &Value) -> Result<ApiResponse> {
        self.send(Method::PUT, path, token, Some(body)).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<ApiResponse> {
        self.send(Method::DELETE, path, token, None).await
    }
}
