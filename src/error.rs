//! Error types for the task client.
//!
//! [`ClientError`] is what every [`TaskClient`](crate::client::TaskClient)
//! operation returns. Precondition variants are raised before any request is
//! sent; the `*Failed` variants wrap an [`ApiError`] describing what went
//! wrong on the wire. Neither class mutates the session, so every failure can
//! be retried as-is once the cause is fixed.

use thiserror::Error;

/// A failed exchange with the review service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, TLS, timeout or body-decoding failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// A 2xx response that lacks a field the client depends on.
    #[error("malformed response: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("missing API token")]
    MissingCredential,

    #[error("no file selected")]
    MissingFile,

    #[error("no uploaded file reference")]
    MissingFileReference,

    #[error("invalid product type: {0:?}")]
    InvalidProductType(String),

    #[error("no task id")]
    MissingTaskId,

    #[error("upload failed: {0}")]
    UploadFailed(#[source] ApiError),

    #[error("submit failed: {0}")]
    SubmitFailed(#[source] ApiError),

    #[error("poll failed: {0}")]
    PollFailed(#[source] ApiError),
}

impl ClientError {
    /// True for failures detected locally, before any request went out.
    pub fn is_precondition(&self) -> bool {
        !matches!(
            self,
            Self::UploadFailed(_) | Self::SubmitFailed(_) | Self::PollFailed(_)
        )
    }

    /// What the user should do next.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::MissingCredential => "enter an API token first (/token <TOKEN> or --token)",
            Self::MissingFile => "select a file first (/file <PATH>)",
            Self::MissingFileReference => "upload a file before submitting (/upload)",
            Self::InvalidProductType(_) => {
                "choose a product type: alcohol, ordinary-food or health-food (/product)"
            }
            Self::MissingTaskId => "submit a task before polling (/submit)",
            Self::UploadFailed(_) => "upload failed, check the token and connection, then retry",
            Self::SubmitFailed(_) => "submit failed, check the token and connection, then retry",
            Self::PollFailed(_) => "query failed, check the connection, then poll again",
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
