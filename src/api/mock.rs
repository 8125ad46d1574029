use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::ApiError;
use crate::review::FilePayload;

use super::{ReviewApi, SubmitRequest, SubmitResponse, TaskResponse, UploadResponse};

/// A scripted review service for tests.
///
/// Each endpoint pops the next queued reply. An empty queue answers with
/// [`ApiError::Malformed`] so a missing script shows up as a failure, not a hang.
#[derive(Default)]
pub struct MockReviewApi {
    uploads: Mutex<VecDeque<Result<UploadResponse, ApiError>>>,
    submits: Mutex<VecDeque<Result<SubmitResponse, ApiError>>>,
    tasks: Mutex<VecDeque<Result<TaskResponse, ApiError>>>,
    upload_calls: AtomicUsize,
    submit_calls: AtomicUsize,
    task_calls: AtomicUsize,
    last_submit: Mutex<Option<SubmitRequest>>,
    last_task_id: Mutex<Option<String>>,
    last_token: Mutex<Option<String>>,
}

impl MockReviewApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_upload(&self, reply: Result<UploadResponse, ApiError>) -> &Self {
        self.uploads.lock().unwrap().push_back(reply);
        self
    }

    pub fn push_submit(&self, reply: Result<SubmitResponse, ApiError>) -> &Self {
        self.submits.lock().unwrap().push_back(reply);
        self
    }

    pub fn push_task(&self, reply: Result<TaskResponse, ApiError>) -> &Self {
        self.tasks.lock().unwrap().push_back(reply);
        self
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn task_calls(&self) -> usize {
        self.task_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.upload_calls() + self.submit_calls() + self.task_calls()
    }

    pub fn last_submit(&self) -> Option<SubmitRequest> {
        self.last_submit.lock().unwrap().clone()
    }

    pub fn last_task_id(&self) -> Option<String> {
        self.last_task_id.lock().unwrap().clone()
    }

    pub fn last_token(&self) -> Option<String> {
        self.last_token.lock().unwrap().clone()
    }

    fn next<T>(queue: &Mutex<VecDeque<Result<T, ApiError>>>, call: usize) -> Result<T, ApiError> {
        queue.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(ApiError::Malformed(format!(
                "MockReviewApi: no scripted reply (call {call})"
            )))
        })
    }
}

#[async_trait]
impl ReviewApi for MockReviewApi {
    async fn upload(&self, token: &str, _file: &FilePayload) -> Result<UploadResponse, ApiError> {
        let call = self.upload_calls.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_token.lock().unwrap() = Some(token.to_string());
        Self::next(&self.uploads, call)
    }

    async fn submit(
        &self,
        token: &str,
        request: &SubmitRequest,
    ) -> Result<SubmitResponse, ApiError> {
        let call = self.submit_calls.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_token.lock().unwrap() = Some(token.to_string());
        *self.last_submit.lock().unwrap() = Some(request.clone());
        Self::next(&self.submits, call)
    }

    async fn task(&self, token: &str, task_id: &str) -> Result<TaskResponse, ApiError> {
        let call = self.task_calls.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_token.lock().unwrap() = Some(token.to_string());
        *self.last_task_id.lock().unwrap() = Some(task_id.to_string());
        Self::next(&self.tasks, call)
    }
}
