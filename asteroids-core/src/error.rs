use std::fmt;

/// Failure reported by a best-score persistence backend.
///
/// The simulation never propagates these; the orchestrator logs them and
/// falls back to a zero best score or skips the write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    Unavailable { reason: String },
    Corrupt { key: String, detail: String },
}

impl StoreError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn corrupt(key: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Corrupt {
            key: key.into(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { reason } => write!(f, "score store unavailable: {reason}"),
            Self::Corrupt { key, detail } => {
                write!(f, "score store entry '{key}' is corrupt: {detail}")
            }
        }
    }
}

impl std::error::Error for StoreError {}
