use serde_json::value::RawValue;
use tokio::sync::RwLock;

use crate::models::Submission;

/// Append-only, in-memory record of every submission received since startup.
#[derive(Debug, Default)]
pub struct SubmissionLog {
    entries: RwLock<Vec<Submission>>,
}

impl SubmissionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a submission. Returns its zero-based position in the log.
    pub async fn append(&self, submission: Submission) -> usize {
        let mut entries = self.entries.write().await;
        entries.push(submission);
        entries.len() - 1
    }

    /// Stored documents in insertion order.
    pub async fn documents(&self) -> Vec<Box<RawValue>> {
        self.entries
            .read()
            .await
            .iter()
            .map(|s| s.data.clone())
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
