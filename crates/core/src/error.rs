/// Caller-facing failure taxonomy for a notification dispatch.
///
/// Each variant carries the human-readable message returned to the caller.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed precondition: {0}")]
    FailedPrecondition(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Kebab-case error code surfaced to callers (e.g. `"not-found"`).
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::Unauthenticated(_) => "unauthenticated",
            CoreError::InvalidArgument(_) => "invalid-argument",
            CoreError::NotFound(_) => "not-found",
            CoreError::FailedPrecondition(_) => "failed-precondition",
            CoreError::Internal(_) => "internal",
        }
    }

    /// Canonical upper-case status name used by the callable wire protocol.
    pub fn status(&self) -> &'static str {
        match self {
            CoreError::Unauthenticated(_) => "UNAUTHENTICATED",
            CoreError::InvalidArgument(_) => "INVALID_ARGUMENT",
            CoreError::NotFound(_) => "NOT_FOUND",
            CoreError::FailedPrecondition(_) => "FAILED_PRECONDITION",
            CoreError::Internal(_) => "INTERNAL",
        }
    }

    /// The message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            CoreError::Unauthenticated(msg)
            | CoreError::InvalidArgument(msg)
            | CoreError::NotFound(msg)
            | CoreError::FailedPrecondition(msg)
            | CoreError::Internal(msg) => msg,
        }
    }

    /// Whether the failure originates from the caller's request rather than
    /// from a collaborator.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, CoreError::Internal(_))
    }
}
