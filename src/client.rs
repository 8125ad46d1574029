//! The task lifecycle: upload → submit → poll.
//!
//! Two layers:
//! - stateless calls ([`TaskClient::upload`], [`TaskClient::submit`],
//!   [`TaskClient::poll`]) that check their inputs and hit the service once;
//! - session calls ([`TaskClient::upload_file`], [`TaskClient::submit_task`],
//!   [`TaskClient::poll_task`], [`TaskClient::submit_and_poll_once`]) that
//!   take their inputs from a [`Session`] and record results into it only
//!   when the call succeeds.
//!
//! Precondition failures return before any request is made. Nothing is
//! retried automatically.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::{ReviewApi, SubmitRequest};
use crate::consts::SUCCESS_STATUS;
use crate::error::{ApiError, ClientError, Result};
use crate::review::{FilePayload, PollOutcome, ProductType, TaskStatus};
use crate::session::Session;

/// What [`TaskClient::submit_and_poll_once`] produced.
#[derive(Debug)]
pub struct Submission {
    pub task_id: String,
    /// The first poll. A failure here does not undo the submit.
    pub first_poll: Result<PollOutcome>,
}

#[derive(Clone)]
pub struct TaskClient {
    api: Arc<dyn ReviewApi>,
}

impl TaskClient {
    pub fn new(api: Arc<dyn ReviewApi>) -> Self {
        Self { api }
    }

    // --- stateless calls ---

    /// Upload `file` and return the URL the service stored it under.
    pub async fn upload(&self, credential: &str, file: Option<&FilePayload>) -> Result<String> {
        let credential = require_credential(credential)?;
        let file = file
            .filter(|f| !f.is_empty())
            .ok_or(ClientError::MissingFile)?;

        debug!(file = %file.name, bytes = file.len(), "uploading");
        let resp = self
            .api
            .upload(credential, file)
            .await
            .map_err(|e| remote_failure(ClientError::UploadFailed, e))?;

        if resp.url.is_empty() {
            return Err(remote_failure(
                ClientError::UploadFailed,
                ApiError::Malformed("upload response has no url".into()),
            ));
        }
        Ok(resp.url)
    }

    /// Create a review task for an uploaded file and return its id.
    pub async fn submit(
        &self,
        credential: &str,
        file_reference: &str,
        product_type: Option<ProductType>,
    ) -> Result<String> {
        let credential = require_credential(credential)?;
        let file_reference = file_reference.trim();
        if file_reference.is_empty() {
            return Err(ClientError::MissingFileReference);
        }
        let product_type =
            product_type.ok_or_else(|| ClientError::InvalidProductType(String::new()))?;

        let request = SubmitRequest::polling(file_reference, product_type);
        debug!(product_type = product_type.slug(), "submitting");
        let resp = self
            .api
            .submit(credential, &request)
            .await
            .map_err(|e| remote_failure(ClientError::SubmitFailed, e))?;

        if resp.task_id.is_empty() {
            return Err(remote_failure(
                ClientError::SubmitFailed,
                ApiError::Malformed("submit response has no task_id".into()),
            ));
        }
        Ok(resp.task_id)
    }

    /// Query a task once.
    pub async fn poll(&self, credential: &str, task_id: &str) -> Result<PollOutcome> {
        let credential = require_credential(credential)?;
        let task_id = task_id.trim();
        if task_id.is_empty() {
            return Err(ClientError::MissingTaskId);
        }

        let resp = self
            .api
            .task(credential, task_id)
            .await
            .map_err(|e| remote_failure(ClientError::PollFailed, e))?;

        if resp.status == SUCCESS_STATUS {
            Ok(PollOutcome::Resolved(resp.into_findings()))
        } else {
            debug!(task_id, status = %resp.status, "task not finished");
            Ok(PollOutcome::Pending(TaskStatus::new(resp.status)))
        }
    }

    // --- session calls ---

    /// Upload the session's pending file and record the file reference.
    pub async fn upload_file(&self, session: &mut Session) -> Result<String> {
        let url = self
            .upload(token(session), session.pending_file())
            .await?;
        info!(%url, "file uploaded");
        session.record_file_reference(url.clone());
        Ok(url)
    }

    /// Submit the session's file reference with its product type and record the task id.
    pub async fn submit_task(&self, session: &mut Session) -> Result<String> {
        let task_id = self
            .submit(
                token(session),
                session.file_reference().unwrap_or_default(),
                session.product_type(),
            )
            .await?;
        info!(%task_id, "task submitted");
        session.record_task_id(task_id.clone());
        Ok(task_id)
    }

    /// Poll the session's task once. Findings are replaced only on success.
    pub async fn poll_task(&self, session: &mut Session) -> Result<PollOutcome> {
        let task_id = session.task_id().unwrap_or_default().to_string();
        let outcome = self.poll(token(session), &task_id).await?;
        match &outcome {
            PollOutcome::Resolved(findings) => {
                info!(%task_id, findings = findings.len(), "task resolved");
                session.record_status(TaskStatus::new(SUCCESS_STATUS));
                session.replace_findings(findings.clone());
            }
            PollOutcome::Pending(status) => {
                session.record_status(status.clone());
            }
        }
        Ok(outcome)
    }

    /// [`submit_task`](Self::submit_task) followed by exactly one
    /// [`poll_task`](Self::poll_task).
    pub async fn submit_and_poll_once(&self, session: &mut Session) -> Result<Submission> {
        let task_id = self.submit_task(session).await?;
        let first_poll = self.poll_task(session).await;
        Ok(Submission {
            task_id,
            first_poll,
        })
    }
}

fn token(session: &Session) -> &str {
    session.credential().map(|c| c.expose()).unwrap_or_default()
}

/// The trimmed credential, or `MissingCredential` when nothing is left.
fn require_credential(credential: &str) -> Result<&str> {
    let credential = credential.trim();
    if credential.is_empty() {
        return Err(ClientError::MissingCredential);
    }
    Ok(credential)
}

fn remote_failure(wrap: fn(ApiError) -> ClientError, err: ApiError) -> ClientError {
    let err = wrap(err);
    warn!(error = %err, "remote call failed");
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockReviewApi;
    use crate::api::{SubmitResponse, UploadResponse};

    fn client() -> (TaskClient, Arc<MockReviewApi>) {
        let mock = Arc::new(MockReviewApi::new());
        (TaskClient::new(mock.clone()), mock)
    }

    #[tokio::test]
    async fn upload_rejects_empty_payload() {
        let (client, mock) = client();
        let empty = FilePayload::new("empty.pdf", Vec::new());
        let err = client.upload("tok1", Some(&empty)).await.unwrap_err();
        assert!(matches!(err, ClientError::MissingFile));
        assert_eq!(mock.total_calls(), 0);
    }

    #[tokio::test]
    async fn credential_checked_before_file() {
        let (client, _mock) = client();
        let err = client.upload("", None).await.unwrap_err();
        assert!(matches!(err, ClientError::MissingCredential));
    }

    #[tokio::test]
    async fn empty_upload_url_is_upload_failure() {
        let (client, mock) = client();
        mock.push_upload(Ok(UploadResponse { url: String::new() }));
        let file = FilePayload::new("a.pdf", vec![1]);
        let err = client.upload("tok1", Some(&file)).await.unwrap_err();
        assert!(matches!(err, ClientError::UploadFailed(ApiError::Malformed(_))));
    }

    #[tokio::test]
    async fn submit_checks_reference_before_product_type() {
        let (client, mock) = client();
        let err = client.submit("tok1", "", None).await.unwrap_err();
        assert!(matches!(err, ClientError::MissingFileReference));
        let err = client.submit("tok1", "https://store/x.pdf", None).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidProductType(_)));
        assert_eq!(mock.total_calls(), 0);
    }

    #[tokio::test]
    async fn empty_task_id_is_submit_failure() {
        let (client, mock) = client();
        mock.push_submit(Ok(SubmitResponse {
            task_id: String::new(),
        }));
        let err = client
            .submit("tok1", "https://store/x.pdf", Some(ProductType::Alcohol))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::SubmitFailed(_)));
    }

    #[tokio::test]
    async fn poll_requires_task_id() {
        let (client, mock) = client();
        let err = client.poll("tok1", " ").await.unwrap_err();
        assert!(matches!(err, ClientError::MissingTaskId));
        assert_eq!(mock.task_calls(), 0);
    }

    #[tokio::test]
    async fn padded_inputs_are_sent_trimmed() {
        let (client, mock) = client();
        mock.push_upload(Ok(UploadResponse {
            url: "https://store/x.pdf".into(),
        }));
        mock.push_submit(Ok(SubmitResponse {
            task_id: "T-1".into(),
        }));
        mock.push_task(Err(ApiError::Malformed("unused".into())));

        let file = FilePayload::new("a.pdf", vec![1]);
        client.upload("  tok1 \n", Some(&file)).await.unwrap();
        assert_eq!(mock.last_token().as_deref(), Some("tok1"));

        client
            .submit(" tok1", "  https://store/x.pdf\t", Some(ProductType::Alcohol))
            .await
            .unwrap();
        assert_eq!(mock.last_submit().unwrap().file_url, "https://store/x.pdf");
        assert_eq!(mock.last_token().as_deref(), Some("tok1"));

        let _ = client.poll("tok1 ", " T-1 ").await;
        assert_eq!(mock.last_task_id().as_deref(), Some("T-1"));
        assert_eq!(mock.last_token().as_deref(), Some("tok1"));
    }
}
