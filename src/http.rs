// SPDX-License-Identifier: Apache-2.0

//! Services for communicating with APIs using HTTP.

use reqwest::blocking::{Client, ClientBuilder};
use reqwest::{StatusCode, header};
use thiserror::Error;

/// A general service for making HTTP calls.
///
/// It might be a bit odd to refer to this trait as a "service", since
/// it appears to be more of a _client_ implementation, but think of
/// this as a proxy for a remote _service_ (even though a _client_ is used
/// to communicate with that remote service). A service might not always
/// be remote, such as when the implementation is a deterministic service
/// used for testing.
pub trait HTTPService {
    /// Default HTTP client that can be used to make HTTP requests.
    fn client() -> Client {
        ClientBuilder::new()
            .user_agent(Self::user_agent())
            .build()
            // Better error handling? According to the docs, build() only
            // fails if a TLS backend cannot be initialized, or if DNS
            // resolution cannot be initialized, and both of these seem
            // like unrecoverable errors for us.
            .expect("could not create a new HTTP client")
    }

    /// An appropriate user agent to use when making HTTP requests.
    fn user_agent() -> String {
        format!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}

/// The result of an HTTP request.
pub type HTTPResult<T> = Result<T, HTTPError>;

/// Indicates an error has occurred when making an HTTP call.
#[derive(Debug, Error)]
pub enum HTTPError {
    /// An error that occurred while making an HTTP request.
    #[error("Error while making HTTP request: {0}")]
    Request(#[from] reqwest::Error),

    /// An unsuccessful HTTP status code in an HTTP response.
    #[error("Request returned HTTP {0}")]
    Http(StatusCode),

    /// A missing Content-Type header in a response.
    #[error("Missing Content-Type header")]
    MissingContentType,

    /// An invalid Content-Type header.
    #[error("Invalid Content-Type header value: {0}")]
    InvalidContentType(#[from] header::ToStrError),

    /// A Content-Type that is not understood by the service.
    #[error("Unexpected content type: {0}")]
    UnexpectedContentType(String),
}

impl HTTPError {
    /// True if the request is not found (HTTP 404).
    pub fn is_not_found(&self) -> bool {
        matches!(self, HTTPError::Http(status) if *status == StatusCode::NOT_FOUND)
    }

    /// True if the failure is transient and the request may reasonably
    /// be retried after a delay.
    ///
    /// Rate limiting (HTTP 429), server errors (HTTP 5xx), and network
    /// failures such as timeouts and connection resets are considered
    /// transient.
    pub fn is_transient(&self) -> bool {
        match self {
            HTTPError::Http(status) => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            HTTPError::Request(err) => err.is_timeout() || err.is_connect(),
            _ => false,
        }
    }
}
