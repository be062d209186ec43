//! In-memory [`HttpClient`] for tests.

use crate::error::HttpError;
use crate::http::HttpClient;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves canned bodies keyed by request path and records every request.
#[derive(Debug, Default)]
pub struct StaticClient {
    responses: HashMap<String, Result<String, u16>>,
    requests: Mutex<Vec<(String, HeaderMap)>>,
}

impl StaticClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, path: &str, body: &str) -> Self {
        self.responses.insert(path.to_string(), Ok(body.to_string()));
        self
    }

    pub fn with_status(mut self, path: &str, status: u16) -> Self {
        self.responses.insert(path.to_string(), Err(status));
        self
    }

    /// Requested paths in the order the requests were issued.
    pub fn requested_paths(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(path, _)| path.clone())
            .collect()
    }

    pub fn headers_for(&self, path: &str) -> Option<HeaderMap> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, headers)| headers.clone())
    }
}

#[async_trait]
impl HttpClient for StaticClient {
    async fn get_text(&self, path: &str, headers: &HeaderMap) -> Result<String, HttpError> {
        self.requests
            .lock()
            .unwrap()
            .push((path.to_string(), headers.clone()));

        match self.responses.get(path) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(code)) => Err(HttpError::Status {
                url: path.to_string(),
                status: StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            }),
            None => Err(HttpError::Status {
                url: path.to_string(),
                status: StatusCode::NOT_FOUND,
            }),
        }
    }
}
