//! Change history entries.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Who changed a document, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedEntry {
    pub at: Timestamp,
    pub by: String,
}

impl UpdatedEntry {
    #[must_use]
    pub fn now(by: impl Into<String>) -> Self {
        Self {
            at: Timestamp::now(),
            by: by.into(),
        }
    }
}
