/// Error type for outbound sends.
#[derive(Debug, Clone, PartialEq)]
pub enum SendError {
    /// Endpoint or credentials missing, or still placeholders
    NotConfigured(String),
    /// Connection, DNS, TLS or timeout failure
    Network(String),
    /// HTTP error with status code
    Http(u16, String),
    /// Response body was not the expected JSON
    Parse(String),
    /// Remote answered 2xx but did not acknowledge the payload
    Rejected(String),
}

/// Coarse classification for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendErrorKind {
    /// Fix the configuration; retrying will not help.
    Misconfigured,
    /// The remote could not be reached.
    Network,
    /// The remote was reached and refused or garbled the request.
    Remote,
}

impl SendError {
    pub fn kind(&self) -> SendErrorKind {
        match self {
            SendError::NotConfigured(_) => SendErrorKind::Misconfigured,
            SendError::Network(_) => SendErrorKind::Network,
            SendError::Http(..) | SendError::Parse(_) | SendError::Rejected(_) => SendErrorKind::Remote,
        }
    }
}

impl std::fmt::Display for SendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SendError::NotConfigured(msg) => write!(f, "Not configured: {}", msg),
            SendError::Network(msg) => write!(f, "Network error: {}", msg),
            SendError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            SendError::Parse(msg) => write!(f, "Parse error: {}", msg),
            SendError::Rejected(msg) => write!(f, "Rejected: {}", msg),
        }
    }
}

impl std::error::Error for SendError {}
