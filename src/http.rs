//! HTTP transport used to fetch translation files.
//!
//! The loader only needs one capability: "GET this path with these headers and
//! hand me the body as text". [`HttpClient`] captures that so tests and
//! embedders can swap the transport; [`ReqwestClient`] is the production
//! implementation.
//!
//! Dropping the future returned by [`HttpClient::get_text`] cancels the
//! request.

use crate::error::HttpError;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

/// Fetches a resource as text.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue a GET for `path` with `headers` and return the response body.
    ///
    /// Non-success statuses must be reported as errors.
    async fn get_text(&self, path: &str, headers: &HeaderMap) -> Result<String, HttpError>;
}

/// [`HttpClient`] backed by `reqwest`.
///
/// Translation paths are usually relative (`./assets/i18n/en.json`), so the
/// client can carry a base URL that relative paths are resolved against.
/// Absolute paths are requested as-is.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
    base_url: Option<Url>,
}

impl ReqwestClient {
    /// Wrap an existing `reqwest::Client` (timeouts etc. come from it).
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: None,
        }
    }

    /// Build a client with a request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(HttpError::ClientBuild)?;
        Ok(Self::new(client))
    }

    /// Resolve relative resource paths against `base_url`.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, HttpError> {
        // Without a trailing slash `join` would drop the last segment.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        let url = Url::parse(&normalized).map_err(|e| HttpError::InvalidPath {
            path: base_url.to_string(),
            reason: e.to_string(),
        })?;
        self.base_url = Some(url);
        Ok(self)
    }

    /// The base URL relative paths are resolved against, if any.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    fn resolve(&self, path: &str) -> Result<Url, HttpError> {
        if let Ok(url) = Url::parse(path) {
            return Ok(url);
        }

        match &self.base_url {
            Some(base) => base.join(path).map_err(|e| HttpError::InvalidPath {
                path: path.to_string(),
                reason: e.to_string(),
            }),
            None => Err(HttpError::InvalidPath {
                path: path.to_string(),
                reason: "relative path and no base URL configured".to_string(),
            }),
        }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get_text(&self, path: &str, headers: &HeaderMap) -> Result<String, HttpError> {
        let url = self.resolve(path)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .headers(headers.clone())
            .send()
            .await
            .map_err(|source| HttpError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|source| HttpError::Transport {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use wiremock::{
        matchers::{header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    // ==================== URL Resolution Tests ====================

    #[test]
    fn test_resolve_relative_path_against_base() {
        let client = ReqwestClient::default()
            .with_base_url("http://localhost:4200")
            .expect("valid base");
        let url = client.resolve("./assets/i18n/en.json").expect("resolves");
        assert_eq!(url.as_str(), "http://localhost:4200/assets/i18n/en.json");
    }

    #[test]
    fn test_resolve_keeps_base_path_segment() {
        let client = ReqwestClient::default()
            .with_base_url("http://localhost/app")
            .expect("valid base");
        let url = client.resolve("i18n/en.json").expect("resolves");
        assert_eq!(url.as_str(), "http://localhost/app/i18n/en.json");
    }

    #[test]
    fn test_resolve_absolute_path_ignores_base() {
        let client = ReqwestClient::default()
            .with_base_url("http://localhost:4200")
            .expect("valid base");
        let url = client
            .resolve("https://cdn.example.com/i18n/en.json?v=3")
            .expect("resolves");
        assert_eq!(url.as_str(), "https://cdn.example.com/i18n/en.json?v=3");
    }

    #[test]
    fn test_resolve_relative_without_base_fails() {
        let client = ReqwestClient::default();
        let result = client.resolve("./i18n/en.json");
        assert!(matches!(result, Err(HttpError::InvalidPath { .. })));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(ReqwestClient::default().with_base_url("not a url").is_err());
    }

    // ==================== Request Tests ====================

    #[tokio::test]
    async fn test_get_text_success_with_headers_and_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/i18n/en.json"))
            .and(query_param("v", "42"))
            .and(header("X-Tenant", "acme"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"key":"value"}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ReqwestClient::default()
            .with_base_url(&mock_server.uri())
            .expect("valid base");
        let mut headers = HeaderMap::new();
        headers.insert("X-Tenant", HeaderValue::from_static("acme"));

        let body = client
            .get_text("./i18n/en.json?v=42", &headers)
            .await
            .expect("Should succeed");
        assert_eq!(body, r#"{"key":"value"}"#);
    }

    #[tokio::test]
    async fn test_get_text_not_found_is_status_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/i18n/en.json"))
            .respond_with(ResponseTemplate::new(404).set_body_string("{}"))
            .mount(&mock_server)
            .await;

        let client = ReqwestClient::default()
            .with_base_url(&mock_server.uri())
            .expect("valid base");
        let result = client.get_text("./i18n/en.json", &HeaderMap::new()).await;

        match result {
            Err(HttpError::Status { status, .. }) => assert_eq!(status.as_u16(), 404),
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_text_timeout_is_transport_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/slow.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("{}")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let client = ReqwestClient::with_timeout(Duration::from_millis(100))
            .expect("client builds")
            .with_base_url(&mock_server.uri())
            .expect("valid base");
        let result = client.get_text("slow.json", &HeaderMap::new()).await;

        assert!(matches!(result, Err(HttpError::Transport { .. })));
    }
}
