//! Error types
//!
//! The HTTP access layer fails with [`TransportError`]; the resource adapter
//! wraps those into resource-scoped [`ProviderError`]s while keeping the
//! original cause reachable through [`std::error::Error::source`].

use reqwest::StatusCode;
use thiserror::Error;

use crate::resource::Resource;

/// Failure of a single HTTP exchange with the backend
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, timeout or request-building failure
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("API request failed: {status}")]
    Status {
        status: StatusCode,
        /// Sanitized, truncated response body
        body: String,
    },

    /// Response body was not valid JSON
    #[error("failed to parse response JSON: {0}")]
    Decode(#[source] serde_json::Error),

    /// A multipart part could not be built
    #[error("invalid multipart body: {0}")]
    Multipart(#[source] reqwest::Error),
}

impl TransportError {
    /// HTTP status of the failed exchange, if the backend answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request(err) => err.status(),
            _ => None,
        }
    }
}

/// None of url, text or pdf was supplied with a create payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unsupported extraction method")]
pub struct UnsupportedExtractionMethod;

/// Underlying reason an extraction failed
#[derive(Debug, Error)]
pub enum ExtractionFailure {
    #[error(transparent)]
    Method(#[from] UnsupportedExtractionMethod),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Errors surfaced by the data provider to its callers
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Unsupported resource: {0}")]
    UnsupportedResource(String),

    #[error("{operation} is not implemented for resource {resource}")]
    NotImplemented {
        operation: &'static str,
        resource: Resource,
    },

    #[error("Failed to fetch {resource}")]
    FetchFailed {
        resource: Resource,
        #[source]
        source: TransportError,
    },

    #[error("Failed to extract product details")]
    ExtractionFailed {
        resource: Resource,
        #[source]
        source: ExtractionFailure,
    },
}

impl ProviderError {
    /// True when a create payload named no extraction source
    pub fn is_unsupported_extraction_method(&self) -> bool {
        matches!(
            self,
            Self::ExtractionFailed {
                source: ExtractionFailure::Method(_),
                ..
            }
        )
    }

    /// Transport failure behind this error, if any
    pub fn transport(&self) -> Option<&TransportError> {
        match self {
            Self::FetchFailed { source, .. } => Some(source),
            Self::ExtractionFailed {
                source: ExtractionFailure::Transport(source),
                ..
            } => Some(source),
            _ => None,
        }
    }

    /// Short message suitable for showing to a user.
    /// Backend bodies are never echoed back.
    pub fn user_message(&self) -> String {
        let base = self.to_string();

        let hint = match self.transport().and_then(TransportError::status) {
            Some(StatusCode::BAD_REQUEST) => {
                Some("the backend could not extract a product from this input")
            }
            Some(StatusCode::NOT_FOUND) => Some("endpoint not found, check the API URL"),
            Some(StatusCode::UNPROCESSABLE_ENTITY) => Some("the backend rejected the request body"),
            Some(status) if status.is_server_error() => {
                Some("backend service error, try again later")
            }
            Some(_) => None,
            None => match self.transport() {
                Some(TransportError::Request(err)) if err.is_timeout() => Some("request timed out"),
                Some(TransportError::Request(err)) if err.is_connect() => {
                    Some("could not connect to the backend, is it running?")
                }
                Some(TransportError::Decode(_)) => Some("backend returned malformed JSON"),
                _ => None,
            },
        };

        match hint {
            Some(hint) => format!("{base}: {hint}"),
            None => base,
        }
    }
}
