use thiserror::Error;

/// Errors from calls to the widget backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ApiError {
    /// HTTP status code, when the backend answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors from the configuration wizard.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("company name is required")]
    CompanyNameRequired,

    #[error("no company found, complete the basic step first")]
    NoCompany,

    #[error("wizard is on the {actual} step, expected the {expected} step")]
    WrongStep {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("failed to save company configuration: {0}")]
    CompanySave(#[source] ApiError),

    #[error("failed to save bot configuration: {0}")]
    BotSave(#[source] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 502: bad gateway");
        assert_eq!(err.status_code(), Some(502));
        assert_eq!(ApiError::Transport("refused".into()).status_code(), None);
    }

    #[test]
    fn test_wizard_error_display() {
        let err = WizardError::BotSave(ApiError::Transport("connection reset".to_string()));
        assert_eq!(
            err.to_string(),
            "failed to save bot configuration: request failed: connection reset"
        );

        let err = WizardError::WrongStep {
            expected: "knowledge",
            actual: "basic",
        };
        assert!(err.to_string().contains("expected the knowledge step"));
    }
}
