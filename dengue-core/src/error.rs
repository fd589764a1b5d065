use reqwest::StatusCode;
use thiserror::Error;

/// Message shown when the service fails without telling us why.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error while fetching data.";

/// Every way a single risk request can fail.
///
/// `Display` yields the text the panel puts into its error region, without
/// the `Error: ` prefix.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Non-2xx response carrying an `erro` message.
    #[error("{0}")]
    Service(String),

    /// Non-2xx response without a usable message.
    #[error("{}", UNKNOWN_ERROR_MESSAGE)]
    Unknown { status: StatusCode },

    /// The request never completed.
    #[error("{0}")]
    Transport(String),

    /// A 2xx body that is not a risk report.
    #[error("{0}")]
    Decode(String),

    /// The fetch task panicked or was cancelled.
    #[error("{0}")]
    Unexpected(String),

    #[error("Invalid endpoint '{0}': it cannot carry a path")]
    InvalidEndpoint(String),
}

impl FetchError {
    /// Whether the service itself answered (as opposed to the request failing).
    pub fn is_service_answer(&self) -> bool {
        matches!(self, FetchError::Service(_) | FetchError::Unknown { .. })
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

impl From<tokio::task::JoinError> for FetchError {
    fn from(err: tokio::task::JoinError) -> Self {
        FetchError::Unexpected(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_message_is_shown_verbatim() {
        let err = FetchError::Service("Bairro não encontrado".into());
        assert_eq!(err.to_string(), "Bairro não encontrado");
        assert!(err.is_service_answer());
    }

    #[test]
    fn unknown_uses_fallback_message() {
        let err = FetchError::Unknown { status: StatusCode::INTERNAL_SERVER_ERROR };
        assert_eq!(err.to_string(), UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn transport_is_not_a_service_answer() {
        let err = FetchError::Transport("connection refused".into());
        assert!(!err.is_service_answer());
        assert_eq!(err.to_string(), "connection refused");
    }
}
