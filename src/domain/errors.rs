/// Fallback message for transport failures that carry no description.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred.";

/// Message shown when the server answers with a non-2xx HTTP status.
pub const NON_OK_STATUS_MESSAGE: &str = "Server returned a non-OK status";

/// Message shown when a 2xx body carries neither `ghanam` nor `error`.
pub const UNEXPECTED_RESPONSE_MESSAGE: &str = "Unexpected response from server.";

#[derive(Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// Network failure, request construction failure, or a non-JSON body.
    Transport(String),
    /// The server answered with a non-2xx HTTP status; the body is not inspected.
    NonOkStatus,
    /// The server answered 2xx with an application-level `error` message.
    Service(String),
    /// The server answered 2xx with a body carrying neither expected field.
    UnexpectedResponse,
}

impl ConversionError {
    /// Builds a transport error, preferring the failure's own description
    /// and falling back to a fixed generic message when it has none.
    pub fn transport(failure: impl ToString) -> Self {
        let description = failure.to_string();
        if description.is_empty() {
            ConversionError::Transport(GENERIC_ERROR_MESSAGE.to_string())
        } else {
            ConversionError::Transport(description)
        }
    }
}

impl std::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionError::Transport(description) => write!(f, "{}", description),
            ConversionError::NonOkStatus => write!(f, "{}", NON_OK_STATUS_MESSAGE),
            ConversionError::Service(message) => write!(f, "{}", message),
            ConversionError::UnexpectedResponse => write!(f, "{}", UNEXPECTED_RESPONSE_MESSAGE),
        }
    }
}

impl std::error::Error for ConversionError {}

pub type ConversionResult = Result<String, ConversionError>;
