//! Stateless HTTP request builder and response parser for the policy API.
//!
//! # Design
//! `PolicyClient` holds only a base URL and default headers and carries no
//! mutable state between calls. Each remote operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The caller executes the actual HTTP
//! round-trip, keeping the core deterministic and free of I/O dependencies.
//!
//! Operations are grouped by resource: `policies`, `rules` and `idps`.

mod idps;
mod policies;
mod rules;

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

const JSON: &str = "application/json";

/// Synchronous, stateless client for the policy API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct PolicyClient {
    base_url: String,
    headers: Vec<(String, String)>,
}

impl PolicyClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            headers: Vec::new(),
        }
    }

    /// Build a client from a validated configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        config.validate()?;
        let mut client = Self::new(&config.base_url);
        client.headers = config.headers.clone();
        Ok(client)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        let mut headers = vec![("accept".to_string(), JSON.to_string())];
        headers.extend(self.headers.iter().cloned());
        HttpRequest {
            method,
            path: self.url(path),
            headers,
            body: None,
        }
    }

    fn request_with_body<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut request = self.request(method, path);
        request.headers.insert(1, ("content-type".to_string(), JSON.to_string()));
        request.body = Some(body);
        Ok(request)
    }
}

/// Percent-encode an id for use as one path segment.
fn segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Decode a JSON array in server order. A blank success body is an empty list.
fn decode_list<T: DeserializeOwned>(response: HttpResponse) -> Result<Vec<T>, ApiError> {
    check_status(&response)?;
    if response.body.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

fn expect_no_content(response: HttpResponse) -> Result<(), ApiError> {
    check_status(&response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = PolicyClient::new("http://localhost:3000/api/v1/");
        assert_eq!(client.base_url(), "http://localhost:3000/api/v1");
        assert_eq!(client.url("policies"), "http://localhost:3000/api/v1/policies");
    }

    #[test]
    fn requests_carry_accept_then_configured_headers() {
        let config = ClientConfig::new("http://localhost:3000/api/v1")
            .with_header("user-agent", "policy-sync/1.0");
        let client = PolicyClient::from_config(&config).unwrap();
        let req = client.request(HttpMethod::Get, "policies/00p1");
        assert_eq!(
            req.headers,
            vec![
                ("accept".to_string(), JSON.to_string()),
                ("user-agent".to_string(), "policy-sync/1.0".to_string()),
            ]
        );
        let req = client
            .request_with_body(HttpMethod::Put, "policies/00p1", &serde_json::json!({}))
            .unwrap();
        assert_eq!(req.headers[1], ("content-type".to_string(), JSON.to_string()));
        assert_eq!(req.headers.len(), 3);
        assert_eq!(req.body.as_deref(), Some("{}"));
    }

    #[test]
    fn from_config_rejects_relative_base_url() {
        let err = PolicyClient::from_config(&ClientConfig::new("localhost:3000/api/v1")).unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
        let err = PolicyClient::from_config(&ClientConfig::for_org("")).unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
        assert!(PolicyClient::from_config(&ClientConfig::for_org("https://org.example.com")).is_ok());
    }

    #[test]
    fn segment_escapes_reserved_characters() {
        assert_eq!(segment("00p1a2b3"), "00p1a2b3");
        assert_eq!(segment("00p1?type=PASSWORD"), "00p1%3Ftype%3DPASSWORD");
        assert_eq!(segment("../idps#x"), "..%2Fidps%23x");
    }

    #[test]
    fn check_status_accepts_any_2xx() {
        assert!(check_status(&response(200, "")).is_ok());
        assert!(check_status(&response(204, "")).is_ok());
    }

    #[test]
    fn check_status_maps_404_to_not_found() {
        let err = check_status(&response(404, r#"{"errorCode":"E0000007"}"#)).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn check_status_keeps_other_statuses_and_body() {
        let err = check_status(&response(429, "slow down")).unwrap_err();
        match err {
            ApiError::HttpError { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "slow down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn decode_list_treats_blank_body_as_empty() {
        let items: Vec<serde_json::Value> = decode_list(response(200, "  ")).unwrap();
        assert!(items.is_empty());
        let items: Vec<serde_json::Value> = decode_list(response(200, "[]")).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn decode_reports_bad_json() {
        let err = decode::<serde_json::Value>(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
