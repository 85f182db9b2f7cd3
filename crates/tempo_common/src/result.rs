//! Common result and error types for the Tempo tool.

/// The standard result type for fallible internal operations.
///
/// `Ok` contains the result value (which may be partial or degraded after
/// error recovery). `Err` indicates an unrecoverable internal error (a bug
/// in Tempo), not a user-facing condition. User-visible conditions are
/// reported through the diagnostic sink and the operation still returns `Ok`.
pub type TempoResult<T> = Result<T, InternalError>;

/// An internal error indicating a bug in Tempo, not a user input problem.
///
/// These errors should never occur during normal operation. If one does
/// occur, it means an invariant of the sizing loop or the timing model has
/// been broken and should be fixed.
#[derive(Debug, thiserror::Error)]
#[error("internal error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
