//! The review service as seen by the client.
//!
//! [`ReviewApi`] is the seam between [`TaskClient`](crate::client::TaskClient)
//! and the network. [`http::HttpReviewApi`] talks to the real service;
//! [`mock::MockReviewApi`] replays scripted responses in tests.

pub mod http;
pub mod mock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::review::{FilePayload, Finding, ProductType};

/// The three remote calls. Every call carries the bearer token.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    async fn upload(&self, token: &str, file: &FilePayload) -> Result<UploadResponse, ApiError>;

    async fn submit(&self, token: &str, request: &SubmitRequest)
    -> Result<SubmitResponse, ApiError>;

    async fn task(&self, token: &str, task_id: &str) -> Result<TaskResponse, ApiError>;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub url: String,
}

/// Body of `POST /api/v1/process-file`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitRequest {
    pub file_url: String,
    pub product_type: String,
    pub callback_url: String,
    pub callback_headers: serde_json::Map<String, serde_json::Value>,
    pub custom_params: serde_json::Map<String, serde_json::Value>,
}

impl SubmitRequest {
    /// A request with no webhook registered. The caller has to poll.
    pub fn polling(file_url: &str, product_type: ProductType) -> Self {
        Self {
            file_url: file_url.to_string(),
            product_type: product_type.wire_label().to_string(),
            callback_url: String::new(),
            callback_headers: serde_json::Map::new(),
            custom_params: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub task_id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaskResponse {
    pub status: String,
    #[serde(default)]
    pub result: Option<TaskResult>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TaskResult {
    #[serde(default)]
    pub review_results: Option<ReviewResults>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ReviewResults {
    #[serde(default)]
    pub text: Option<Vec<Finding>>,
}

impl TaskResponse {
    /// `result.review_results.text`, empty when any level is missing.
    pub fn into_findings(self) -> Vec<Finding> {
        self.result
            .and_then(|r| r.review_results)
            .and_then(|r| r.text)
            .unwrap_or_default()
    }
}
