use std::fmt;

use crate::domain::ports::HttpMethod;

// Failures raised before a usable HTTP response reached the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    // Connection refused, DNS failure, reset mid-flight.
    Transport(String),
    Timeout,
    // A response arrived but its body was not valid JSON.
    Decode(String),
    // The mock layer has no handler for this method + path.
    Unhandled { method: HttpMethod, path: String },
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Transport(message) => write!(f, "transport error: {message}"),
            TransportError::Timeout => write!(f, "request timed out"),
            TransportError::Decode(message) => write!(f, "response decode error: {message}"),
            TransportError::Unhandled { method, path } => {
                write!(f, "no handler for {method} {path}")
            }
        }
    }
}

impl std::error::Error for TransportError {}

// Field name outside the six known registration inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown registration field: {}", self.0)
    }
}

impl std::error::Error for UnknownField {}
