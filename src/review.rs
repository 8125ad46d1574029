//! Domain types shared by the client, the API seam and the front-end.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::consts::SUCCESS_STATUS;
use crate::error::ClientError;

/// Category of the reviewed material. Decides which rule set the service applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductType {
    Alcohol,
    OrdinaryFood,
    HealthFood,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [Self::Alcohol, Self::OrdinaryFood, Self::HealthFood];

    /// The label the service expects in `product_type`.
    pub fn wire_label(self) -> &'static str {
        match self {
            Self::Alcohol => "酒类",
            Self::OrdinaryFood => "普通食品",
            Self::HealthFood => "保健食品",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::Alcohol => "alcohol",
            Self::OrdinaryFood => "ordinary-food",
            Self::HealthFood => "health-food",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.slug(), self.wire_label())
    }
}

impl FromStr for ProductType {
    type Err = ClientError;

    /// Accepts either the ASCII slug or the service label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.slug().eq_ignore_ascii_case(s) || p.wire_label() == s)
            .ok_or_else(|| ClientError::InvalidProductType(s.to_string()))
    }
}

/// One flagged excerpt of the reviewed document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Finding {
    #[serde(default)]
    pub content: String,
    /// Matched keywords, in the order the service reported them.
    #[serde(default)]
    pub wording: Vec<String>,
    #[serde(default)]
    pub conclusion: String,
    #[serde(default)]
    pub reason: String,
    /// The rule or clause the excerpt falls under.
    #[serde(default)]
    pub provision: String,
}

/// Raw task status. Only [`SUCCESS_STATUS`] is meaningful to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStatus(String);

impl TaskStatus {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn is_success(&self) -> bool {
        self.0 == SUCCESS_STATUS
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of a single successful poll.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The task finished; these findings replaced the session's previous ones.
    Resolved(Vec<Finding>),
    /// Any other status. Stored findings were left alone.
    Pending(TaskStatus),
}

/// A local file selected for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct FilePayload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl FilePayload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a file from disk, naming the payload after the file.
    pub async fn read(path: &Path) -> anyhow::Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self { name, bytes })
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for FilePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePayload")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}
