use crate::types::*;

/// One sealed version of a secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub time: DateTime<Utc>,
    /// Base64 ciphertext.
    pub data: String,
}

/// A named secret: its tombstone flag and full version history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub deleted: bool,
    #[serde(rename = "record", default)]
    pub history: Vec<Record>,
}

impl Entry {
    pub fn new(record: Record) -> Self {
        Self {
            deleted: false,
            history: vec![record],
        }
    }

    /// Append a version and bring the entry back if it was deleted.
    pub fn push(&mut self, record: Record) {
        self.history.push(record);
        self.deleted = false;
    }

    /// Index of the current version: latest timestamp, later position on ties.
    pub fn current_index(&self) -> Option<usize> {
        self.history
            .iter()
            .enumerate()
            .max_by_key(|(_, r)| r.time)
            .map(|(i, _)| i)
    }

    pub fn current(&self) -> Option<&Record> {
        self.current_index().map(|i| &self.history[i])
    }
}

/// Metadata about a version, without its ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordInfo {
    pub index: usize,
    pub time: DateTime<Utc>,
    pub current: bool,
}
