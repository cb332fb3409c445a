use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("input text is empty")]
    EmptyInput,
    #[error("an analysis request is already in flight")]
    RequestInFlight,
    #[error("scoring service unreachable: {0}")]
    NetworkFailure(String),
    #[error("unexpected response from scoring service: {0}")]
    BadResponse(String),
    #[error("scoring service did not answer within {0:?}")]
    Timeout(Duration),
    #[error("analysis request cancelled")]
    Cancelled,
}

impl AnalysisError {
    /// Rejections leave the controller untouched and are never shown to the user.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::RequestInFlight)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::RequestInFlight => "request_in_flight",
            Self::NetworkFailure(_) => "network_failure",
            Self::BadResponse(_) => "bad_response",
            Self::Timeout(_) => "timeout",
            Self::Cancelled => "cancelled",
        }
    }
}
