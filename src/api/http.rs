use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::consts::{SUBMIT_PATH, TASKS_PATH, UPLOAD_FIELD, UPLOAD_PATH, endpoint};
use crate::error::ApiError;
use crate::review::FilePayload;

use super::{ReviewApi, SubmitRequest, SubmitResponse, TaskResponse, UploadResponse};

/// [`ReviewApi`] over HTTPS.
pub struct HttpReviewApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpReviewApi {
    /// `timeout` is applied by the transport. `None` waits indefinitely.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url: base_url.into(),
            http: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn task_url(&self, task_id: &str) -> String {
        format!(
            "{}/{}",
            endpoint(&self.base_url, TASKS_PATH),
            urlencoding::encode(task_id)
        )
    }
}

/// Check the status, then decode the body. A 2xx body that does not parse
/// is reported as [`ApiError::Malformed`], not as a transport error.
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let text = resp.text().await?;
    serde_json::from_str(&text).map_err(|e| ApiError::Malformed(format!("{e}; body: {text}")))
}

#[async_trait]
impl ReviewApi for HttpReviewApi {
    async fn upload(&self, token: &str, file: &FilePayload) -> Result<UploadResponse, ApiError> {
        let url = endpoint(&self.base_url, UPLOAD_PATH);
        debug!(%url, file = %file.name, bytes = file.len(), "POST upload");

        let part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        let form = Form::new().part(UPLOAD_FIELD, part);

        let resp = self
            .http
            .post(&url)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        decode(resp).await
    }

    async fn submit(
        &self,
        token: &str,
        request: &SubmitRequest,
    ) -> Result<SubmitResponse, ApiError> {
        let url = endpoint(&self.base_url, SUBMIT_PATH);
        debug!(%url, product_type = %request.product_type, "POST submit");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;
        decode(resp).await
    }

    async fn task(&self, token: &str, task_id: &str) -> Result<TaskResponse, ApiError> {
        let url = self.task_url(task_id);
        debug!(%url, "GET task");

        let resp = self.http.get(&url).bearer_auth(token).send().await?;
        decode(resp).await
    }
}
