use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// The chat-completion capability failed: transport error, timeout,
    /// non-success status, or an unusable payload.
    #[error("Completion error: {message}")]
    Completion {
        message: String,
        upstream: Option<String>,
    },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn completion(msg: impl Into<String>) -> Self {
        Self::Completion {
            message: msg.into(),
            upstream: None,
        }
    }

    pub fn completion_with_upstream(msg: impl Into<String>, upstream: impl Into<String>) -> Self {
        let upstream: String = upstream.into();
        Self::Completion {
            message: msg.into(),
            upstream: (!upstream.trim().is_empty()).then_some(upstream),
        }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_completion_error(&self) -> bool {
        matches!(self, Self::Completion { .. })
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError(_))
    }

    /// Upstream error detail attached to a completion failure, if any.
    pub fn upstream(&self) -> Option<&str> {
        match self {
            Self::Completion { upstream, .. } => upstream.as_deref(),
            _ => None,
        }
    }
}
