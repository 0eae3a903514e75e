use serde::{Deserialize, Serialize};
use std::fmt;

use super::domain::EnrichedResult;

/// Identity a note is stored under. Notes belong to a single sample (result id), so a new
/// draw of the same biomarker starts with a blank note.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteKey(pub String);

impl NoteKey {
    pub fn for_result(result: &EnrichedResult) -> Self {
        Self::from_result_id(result.id())
    }

    pub fn from_result_id(result_id: &str) -> Self {
        Self(result_id.to_string())
    }
}

impl fmt::Display for NoteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Narrow key-value port for user notes so scoring never touches persistence.
pub trait NoteStore: Send + Sync {
    fn get(&self, key: &NoteKey) -> Result<Option<String>, NoteStoreError>;
    /// Stores `text`; blank text removes the note.
    fn set(&self, key: NoteKey, text: String) -> Result<(), NoteStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NoteStoreError {
    #[error("note storage unavailable: {0}")]
    Unavailable(String),
    #[error("note storage io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("note storage is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Returns `None` for text that should clear a note.
pub fn normalize_note(text: &str) -> Option<&str> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_clears() {
        assert_eq!(normalize_note("   \n"), None);
        assert_eq!(normalize_note(""), None);
        assert_eq!(normalize_note(" retest in May "), Some(" retest in May "));
    }

    #[test]
    fn key_serializes_as_plain_string() {
        let key = NoteKey::from_result_id("res-42");
        assert_eq!(serde_json::to_value(&key).expect("serializes"), "res-42");
        assert_eq!(key.to_string(), "res-42");
    }
}
