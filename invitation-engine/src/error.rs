/// Convenience result type used across the engine.
pub type InvitationResult<T> = Result<T, InvitationError>;

/// Failures the engine recovers from locally. None of these reach the guest
/// as a visible message; callers log them and degrade.
#[derive(thiserror::Error, Debug)]
pub enum InvitationError {
    /// The preference store could not be opened or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// A persisted record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Filesystem access for the native preference store failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A browser API call was rejected or is unavailable.
    #[error("browser error: {0}")]
    Browser(String),

    /// A tween could not be constructed from the given endpoints.
    #[error("tween error: {0}")]
    Tween(String),

    /// A scroll handoff is still animating and cannot be replaced.
    #[error("scroll handoff already in flight")]
    HandoffBusy,
}

impl InvitationError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn browser(msg: impl Into<String>) -> Self {
        Self::Browser(msg.into())
    }

    pub fn tween(msg: impl Into<String>) -> Self {
        Self::Tween(msg.into())
    }
}
