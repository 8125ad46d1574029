//! Per-user client state.
//!
//! A [`Session`] is owned by the caller and lent to each
//! [`TaskClient`](crate::client::TaskClient) operation. Only the client's
//! successful operations record remote results; the caller sets inputs.

use std::fmt;

use crate::review::{FilePayload, Finding, ProductType, TaskStatus};

/// Opaque bearer token. Its `Debug` output never shows the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Where a session is in the upload → submit → poll chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Unauthenticated,
    Ready,
    FileReady,
    Submitted,
    Resolved,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Ready => "ready",
            Self::FileReady => "file uploaded",
            Self::Submitted => "submitted",
            Self::Resolved => "resolved",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Default)]
pub struct Session {
    credential: Option<Credential>,
    pending_file: Option<FilePayload>,
    product_type: Option<ProductType>,
    file_reference: Option<String>,
    task_id: Option<String>,
    status: Option<TaskStatus>,
    findings: Vec<Finding>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session that already carries a token.
    pub fn with_credential(token: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.set_credential(token);
        session
    }

    // --- inputs (set by the caller) ---

    /// Blank tokens clear the credential.
    pub fn set_credential(&mut self, token: impl Into<String>) {
        let token = token.into().trim().to_string();
        self.credential = (!token.is_empty()).then_some(Credential(token));
    }

    pub fn set_pending_file(&mut self, file: FilePayload) {
        self.pending_file = Some(file);
    }

    pub fn set_product_type(&mut self, product_type: ProductType) {
        self.product_type = Some(product_type);
    }

    /// Drop everything except the credential, so a new file can be uploaded.
    pub fn reset(&mut self) {
        let credential = self.credential.take();
        *self = Self {
            credential,
            ..Self::default()
        };
    }

    // --- remote results (recorded by the client) ---

    /// A new file starts a new chain: the old task and its results go.
    pub(crate) fn record_file_reference(&mut self, url: String) {
        self.file_reference = Some(url);
        self.task_id = None;
        self.clear_task_results();
    }

    /// Status and findings always belong to the current task id.
    pub(crate) fn record_task_id(&mut self, task_id: String) {
        self.task_id = Some(task_id);
        self.clear_task_results();
    }

    fn clear_task_results(&mut self) {
        self.status = None;
        self.findings.clear();
    }

    pub(crate) fn record_status(&mut self, status: TaskStatus) {
        self.status = Some(status);
    }

    pub(crate) fn replace_findings(&mut self, findings: Vec<Finding>) {
        self.findings = findings;
    }

    // --- read access ---

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn pending_file(&self) -> Option<&FilePayload> {
        self.pending_file.as_ref()
    }

    pub fn product_type(&self) -> Option<ProductType> {
        self.product_type
    }

    pub fn file_reference(&self) -> Option<&str> {
        self.file_reference.as_deref()
    }

    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    pub fn status(&self) -> Option<&TaskStatus> {
        self.status.as_ref()
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn stage(&self) -> Stage {
        if self.credential.is_none() {
            Stage::Unauthenticated
        } else if self.status.as_ref().is_some_and(TaskStatus::is_success) {
            Stage::Resolved
        } else if self.task_id.is_some() {
            Stage::Submitted
        } else if self.file_reference.is_some() {
            Stage::FileReady
        } else {
            Stage::Ready
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_unauthenticated() {
        let s = Session::new();
        assert_eq!(s.stage(), Stage::Unauthenticated);
        assert!(!s.has_credential());
        assert!(s.findings().is_empty());
    }

    #[test]
    fn blank_token_is_no_token() {
        let mut s = Session::with_credential("tok1");
        assert_eq!(s.stage(), Stage::Ready);
        s.set_credential("   ");
        assert!(!s.has_credential());
    }

    #[test]
    fn token_is_trimmed() {
        let s = Session::with_credential("  tok1\n");
        assert_eq!(s.credential().unwrap().expose(), "tok1");
    }

    #[test]
    fn credential_debug_is_redacted() {
        let s = Session::with_credential("super-secret");
        let dbg = format!("{s:?}");
        assert!(!dbg.contains("super-secret"));
        assert!(dbg.contains("***"));
    }

    #[test]
    fn stages_follow_recorded_results() {
        let mut s = Session::with_credential("tok1");
        s.record_file_reference("https://store/x.pdf".into());
        assert_eq!(s.stage(), Stage::FileReady);
        s.record_task_id("T-42".into());
        assert_eq!(s.stage(), Stage::Submitted);
        s.record_status(TaskStatus::new("PENDING"));
        assert_eq!(s.stage(), Stage::Submitted);
        s.record_status(TaskStatus::new("SUCCESS"));
        assert_eq!(s.stage(), Stage::Resolved);
    }

    #[test]
    fn new_task_id_drops_previous_results() {
        let mut s = Session::with_credential("tok1");
        s.record_file_reference("https://store/x.pdf".into());
        s.record_task_id("T-1".into());
        s.record_status(TaskStatus::new("SUCCESS"));
        s.replace_findings(vec![Finding::default()]);

        s.record_task_id("T-2".into());

        assert_eq!(s.stage(), Stage::Submitted);
        assert!(s.status().is_none());
        assert!(s.findings().is_empty());
    }

    #[test]
    fn new_file_reference_drops_previous_task() {
        let mut s = Session::with_credential("tok1");
        s.record_file_reference("https://store/x.pdf".into());
        s.record_task_id("T-1".into());
        s.record_status(TaskStatus::new("SUCCESS"));
        s.replace_findings(vec![Finding::default()]);

        s.record_file_reference("https://store/y.pdf".into());

        assert_eq!(s.stage(), Stage::FileReady);
        assert!(s.task_id().is_none());
        assert!(s.status().is_none());
        assert!(s.findings().is_empty());
    }

    #[test]
    fn reset_keeps_only_credential() {
        let mut s = Session::with_credential("tok1");
        s.set_product_type(ProductType::Alcohol);
        s.set_pending_file(FilePayload::new("a.pdf", vec![1]));
        s.record_file_reference("https://store/x.pdf".into());
        s.record_task_id("T-1".into());
        s.replace_findings(vec![Finding::default()]);

        s.reset();

        assert!(s.has_credential());
        assert_eq!(s.stage(), Stage::Ready);
        assert!(s.pending_file().is_none());
        assert!(s.product_type().is_none());
        assert!(s.file_reference().is_none());
        assert!(s.task_id().is_none());
        assert!(s.findings().is_empty());
    }
}
