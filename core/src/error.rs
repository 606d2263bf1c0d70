//! Error types for the policy API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers routinely distinguish
//! "the policy, rule or IdP does not exist" from "the server rejected the
//! request." All other non-2xx responses land in `HttpError` with the raw
//! status code and body; `remote_error` decodes the server's error document
//! from that body on demand.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by the condition builders, `PolicyClient` parse methods
/// and `ApiService` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A caller-supplied value is outside its fixed enumeration.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The HTTP exchange could not be completed.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The client configuration is incomplete or malformed.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl ApiError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// HTTP status carried by this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Decode the server's error document from an `HttpError` body.
    ///
    /// Returns `None` for other variants or when the body is not an error
    /// document.
    pub fn remote_error(&self) -> Option<RemoteError> {
        match self {
            ApiError::HttpError { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}

/// Error document returned by the remote API alongside non-2xx statuses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteError {
    pub error_code: String,
    pub error_summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub error_causes: Vec<ErrorCause>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorCause {
    pub error_summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_decodes_validation_document() {
        let err = ApiError::HttpError {
            status: 400,
            body: r#"{"errorCode":"E0000001","errorSummary":"Api validation failed: name","errorLink":"E0000001","errorId":"oae123","errorCauses":[{"errorSummary":"name: The field cannot be left blank"}]}"#.to_string(),
        };
        let remote = err.remote_error().unwrap();
        assert_eq!(remote.error_code, "E0000001");
        assert_eq!(remote.error_causes.len(), 1);
        assert_eq!(
            remote.error_causes[0].error_summary,
            "name: The field cannot be left blank"
        );
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn remote_error_is_none_for_plain_body() {
        let err = ApiError::HttpError {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert!(err.remote_error().is_none());
    }

    #[test]
    fn local_errors_carry_no_status() {
        assert_eq!(ApiError::invalid_argument("x").status(), None);
        assert_eq!(ApiError::Transport("reset".into()).status(), None);
        assert_eq!(ApiError::NotFound.status(), Some(404));
    }

    #[test]
    fn display_includes_status_and_body() {
        let err = ApiError::HttpError {
            status: 409,
            body: "conflict".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 409: conflict");
    }
}
