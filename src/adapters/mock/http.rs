//! Mock HTTP client for testing.
//!
//! Returns configured responses or errors and records every request.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method (GET or POST)
    pub method: String,
    pub url: String,
    pub headers: Headers,
    /// Request body (for POST requests)
    pub body: Option<String>,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(Response),
    Error(HttpError),
}

/// Mock HTTP client for testing.
///
/// # Example
///
/// ```ignore
/// use campus::adapters::mock::{MockHttpClient, MockResponse};
/// use campus::traits::{Headers, HttpClient, Response};
/// use bytes::Bytes;
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "https://school.example/webservice",
///     MockResponse::Success(Response::new(200, Bytes::from("{}"))),
/// );
///
/// let response = client.get("https://school.example/webservice/rest", &Headers::new()).await?;
/// assert_eq!(response.status, 200);
/// assert_eq!(client.request_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Configured responses by URL prefix
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    default_response: Arc<Mutex<Option<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for URLs equal to or starting with `url`.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        *self.default_response.lock().unwrap() = Some(response);
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record_request(&self, method: &str, url: &str, headers: &Headers, body: Option<String>) {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
        });
    }

    fn respond(&self, url: &str) -> Result<Response, HttpError> {
        let configured = {
            let responses = self.responses.lock().unwrap();
            responses.get(url).cloned().or_else(|| {
                responses
                    .iter()
                    .find(|(pattern, _)| url.starts_with(pattern.as_str()))
                    .map(|(_, response)| response.clone())
            })
        };

        match configured.or_else(|| self.default_response.lock().unwrap().clone()) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("GET", url, headers, None);
        self.respond(url)
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()));
        self.respond(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[tokio::test]
    async fn test_get_with_response() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://school.example/test",
            MockResponse::Success(Response::new(200, Bytes::from("Hello"))),
        );

        let response = client
            .get("https://school.example/test", &Headers::new())
            .await
            .unwrap();
        assert_eq!(response.body, Bytes::from("Hello"));

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
    }

    #[tokio::test]
    async fn test_post_records_body() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::Success(Response::new(201, Bytes::new())));

        client
            .post("https://school.example/api", "a=1", &Headers::new())
            .await
            .unwrap();
        assert_eq!(client.get_requests()[0].body.as_deref(), Some("a=1"));
    }

    #[tokio::test]
    async fn test_prefix_match_and_missing() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://school.example/webservice",
            MockResponse::Error(HttpError::Timeout("slow".to_string())),
        );

        let result = client
            .get("https://school.example/webservice/rest/server.php", &Headers::new())
            .await;
        assert!(matches!(result, Err(HttpError::Timeout(_))));

        let missing = client.get("https://other.example", &Headers::new()).await;
        assert!(matches!(missing, Err(HttpError::Other(_))));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::Success(Response::new(200, Bytes::new())));
        let cloned = client.clone();

        cloned.get("https://school.example", &Headers::new()).await.unwrap();
        assert_eq!(client.request_count(), 1);
        client.clear_requests();
        assert_eq!(cloned.request_count(), 0);
    }
}
