use serde::{Deserialize, Serialize};

/// Ingestion lifecycle of an uploaded document.
///
/// `Completed` and `Failed` are terminal; a document never re-enters
/// `Pending` or `Processing` once it has left them. `Processing` accepts an
/// idempotent re-entry so a worker restarted mid-job can resume the document
/// it was holding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentStatus {
    Pending,
    Processing,
    Completed,
    Failed(String),
}

impl DocumentStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, DocumentStatus::Pending)
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, DocumentStatus::Processing)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, DocumentStatus::Completed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, DocumentStatus::Failed(_))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DocumentStatus::Completed | DocumentStatus::Failed(_))
    }

    pub fn can_transition_to(&self, new_status: &DocumentStatus) -> bool {
        match (self, new_status) {
            (DocumentStatus::Pending, DocumentStatus::Processing) => true,
            (DocumentStatus::Processing, DocumentStatus::Processing) => true,
            (DocumentStatus::Processing, DocumentStatus::Completed) => true,
            (DocumentStatus::Processing, DocumentStatus::Failed(_)) => true,
            _ => false,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            DocumentStatus::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Pending => "pending",
            DocumentStatus::Processing => "processing",
            DocumentStatus::Completed => "completed",
            DocumentStatus::Failed(_) => "failed",
        }
    }

    /// Rebuild a status from its persisted column pair. The error text lives
    /// in a separate `error_message` column so the status column stays short.
    pub fn from_parts(status: &str, error_message: Option<&str>) -> Result<Self, String> {
        match status.to_lowercase().as_str() {
            "pending" => Ok(DocumentStatus::Pending),
            "processing" => Ok(DocumentStatus::Processing),
            "completed" => Ok(DocumentStatus::Completed),
            "failed" => Ok(DocumentStatus::Failed(
                error_message.unwrap_or("unknown error").to_string(),
            )),
            other => Err(format!("Invalid document status: {}", other)),
        }
    }
}

impl Default for DocumentStatus {
    fn default() -> Self {
        DocumentStatus::Pending
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_checks() {
        let pending = DocumentStatus::Pending;
        let processing = DocumentStatus::Processing;
        let completed = DocumentStatus::Completed;
        let failed = DocumentStatus::Failed("error".to_string());

        assert!(pending.is_pending());
        assert!(processing.is_processing());
        assert!(completed.is_completed());
        assert!(failed.is_failed());

        assert!(!pending.is_terminal());
        assert!(!processing.is_terminal());
        assert!(completed.is_terminal());
        assert!(failed.is_terminal());
    }

    #[test]
    fn test_forward_transitions() {
        let pending = DocumentStatus::Pending;
        let processing = DocumentStatus::Processing;
        let completed = DocumentStatus::Completed;
        let failed = DocumentStatus::Failed("error".to_string());

        assert!(pending.can_transition_to(&processing));
        assert!(processing.can_transition_to(&completed));
        assert!(processing.can_transition_to(&failed));
        // Resume after a worker restart.
        assert!(processing.can_transition_to(&processing));
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        let completed = DocumentStatus::Completed;
        let failed = DocumentStatus::Failed("error".to_string());

        for target in [
            DocumentStatus::Pending,
            DocumentStatus::Processing,
            DocumentStatus::Completed,
            DocumentStatus::Failed("again".to_string()),
        ] {
            assert!(!completed.can_transition_to(&target));
            assert!(!failed.can_transition_to(&target));
        }
        // No retry edge back to pending.
        assert!(!failed.can_transition_to(&DocumentStatus::Pending));
    }

    #[test]
    fn test_column_round_trip() {
        let statuses = vec![
            DocumentStatus::Pending,
            DocumentStatus::Processing,
            DocumentStatus::Completed,
            DocumentStatus::Failed("test error".to_string()),
        ];

        for status in statuses {
            let parsed =
                DocumentStatus::from_parts(status.as_str(), status.error_message()).unwrap();
            assert_eq!(status, parsed);
        }
    }

    #[test]
    fn test_invalid_column_value() {
        assert!(DocumentStatus::from_parts("queued", None).is_err());
    }
}
