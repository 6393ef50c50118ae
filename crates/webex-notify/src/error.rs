use crate::validate::ValidationError;

/// Errors that stop the handler.
///
/// An HTTP error *response* from the Webex API is deliberately not here: the
/// delivery client logs it in full and reports success, so a downstream API
/// hiccup never poisons the monitoring pipeline that invoked the handler.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// Stdin could not be read.
    #[error("failed to read event from stdin: {0}")]
    Stdin(#[source] std::io::Error),

    /// Stdin held something other than a JSON event document.
    #[error("failed to parse event from stdin: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The event failed a precondition; see [`ValidationError`] for reasons.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The message payload could not be constructed or serialized.
    #[error("failed to render message payload: {0}")]
    Render(String),

    /// The Webex API endpoint could not be reached (DNS, connect, timeout).
    #[error("failed to reach the Webex API: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Convenience `Result` alias for handler operations.
pub type Result<T> = std::result::Result<T, HandlerError>;
