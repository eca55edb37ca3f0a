//! Typed failures for every backend call.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Errors produced by the API client layer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("service unreachable: {0}")]
    Network(String),

    /// The gateway or service answered 401.
    #[error("authentication required")]
    Unauthorized,

    /// Any other non-2xx status, with the server's message when it sent one.
    #[error("{}", unexpected_status_message(.status, .message.as_deref()))]
    UnexpectedStatus { status: u16, message: Option<String> },

    /// A request body could not be serialized.
    #[error("request encoding failed: {0}")]
    Encode(String),

    /// A 2xx body that is not JSON or lacks the expected nested payload.
    #[error("unexpected response shape: {0}")]
    MalformedEnvelope(String),
}

impl ApiError {
    /// Whether the caller should drop the session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn unexpected_status_message(status: &u16, message: Option<&str>) -> String {
    match message {
        Some(msg) if !msg.is_empty() => format!("request failed ({status}): {msg}"),
        _ => format!("request failed ({status})"),
    }
}
