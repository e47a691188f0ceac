//! Persistence of completed sessions.
//!
//! One session becomes one spreadsheet row. The store is a seam: the real
//! implementation appends to Google Sheets, tests and `--dry-run` use the
//! in-memory store.

mod sheets;

pub use sheets::SheetsStore;

use async_trait::async_trait;

use crate::analysis::ScoreSet;
use crate::error::StoreError;

/// One spreadsheet row for a completed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRow {
    /// Answers to the fixed investor questions.
    pub answers: Vec<String>,
    /// News reactions, including rejected too-short attempts.
    pub reactions: Vec<String>,
    /// The four extracted scores.
    pub scores: ScoreSet,
    /// Questionnaire cells; empty for the chat-only variant.
    pub questionnaire: Vec<String>,
}

impl SubmissionRow {
    /// Column values in sheet order: chat answers, news reactions, the four
    /// scores, then the questionnaire cells.
    pub fn cells(&self) -> Vec<String> {
        let mut cells =
            Vec::with_capacity(self.answers.len() + self.reactions.len() + 4 + self.questionnaire.len());
        cells.extend(self.answers.iter().cloned());
        cells.extend(self.reactions.iter().cloned());
        for (_, value) in self.scores.labeled() {
            cells.push(value.to_string());
        }
        cells.extend(self.questionnaire.iter().cloned());
        cells
    }
}

/// Where completed sessions are appended.
#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Append one row.
    async fn append(&self, row: &SubmissionRow) -> Result<(), StoreError>;
}

/// In-memory store for tests and `--dry-run`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: tokio::sync::Mutex<Vec<SubmissionRow>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows appended so far.
    pub async fn rows(&self) -> Vec<SubmissionRow> {
        self.rows.lock().await.clone()
    }
}

#[async_trait]
impl ResponseStore for MemoryStore {
    async fn append(&self, row: &SubmissionRow) -> Result<(), StoreError> {
        tracing::debug!(cells = row.cells().len(), "row appended to memory store");
        self.rows.lock().await.push(row.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cells_keep_the_original_column_order() {
        let row = SubmissionRow {
            answers: vec!["crecer".into(), "largo plazo".into()],
            reactions: vec!["no sé".into(), "me preocupa bastante el clima".into()],
            scores: ScoreSet {
                environmental: 80,
                social: 65,
                governance: 40,
                risk: 90,
            },
            questionnaire: vec!["Sí".into()],
        };
        assert_eq!(
            row.cells(),
            vec![
                "crecer".to_string(),
                "largo plazo".to_string(),
                "no sé".to_string(),
                "me preocupa bastante el clima".to_string(),
                "80".to_string(),
                "65".to_string(),
                "40".to_string(),
                "90".to_string(),
                "Sí".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn memory_store_collects_rows() {
        let store = MemoryStore::new();
        let row = SubmissionRow {
            answers: vec![],
            reactions: vec![],
            scores: ScoreSet {
                environmental: 1,
                social: 2,
                governance: 3,
                risk: 4,
            },
            questionnaire: vec![],
        };
        store.append(&row).await.unwrap();
        assert_eq!(store.rows().await, vec![row]);
    }
}
