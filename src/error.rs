use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

pub const TIMEOUT_MESSAGE: &str = "function did not complete within allowed time";
pub const TOO_MANY_ATTEMPTS_MESSAGE: &str =
    "function did not return an accepted result within allowed number of attempts";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Discriminant carried by every error this crate raises on its own behalf.
///
/// It is serialized next to the message so that an error which went through
/// JSON (or any other serde format) can still be told apart from caller
/// errors; see [`Classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Timeout,
    TooManyAttempts,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Timeout => "timeout",
            ErrorKind::TooManyAttempts => "too_many_attempts",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct TimeoutError {
    kind: ErrorKind,
    message: String,
}

impl TimeoutError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Timeout,
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for TimeoutError {
    fn default() -> Self {
        Self::new(TIMEOUT_MESSAGE)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct TooManyAttempts {
    kind: ErrorKind,
    message: String,
}

impl TooManyAttempts {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::TooManyAttempts,
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for TooManyAttempts {
    fn default() -> Self {
        Self::new(TOO_MANY_ATTEMPTS_MESSAGE)
    }
}

/// Terminal failure of a retry call.
#[derive(Error, Debug)]
pub enum RetryError<E> {
    /// The last error returned by the operation, untouched.
    #[error(transparent)]
    Operation(E),

    #[error(transparent)]
    TooManyAttempts(#[from] TooManyAttempts),
}

impl<E> RetryError<E> {
    pub fn operation_error(&self) -> Option<&E> {
        match self {
            RetryError::Operation(e) => Some(e),
            RetryError::TooManyAttempts(_) => None,
        }
    }

    pub fn into_operation_error(self) -> Option<E> {
        match self {
            RetryError::Operation(e) => Some(e),
            RetryError::TooManyAttempts(_) => None,
        }
    }
}

/// Terminal failure of a deadline-bounded call.
#[derive(Error, Debug)]
pub enum WaitError<E> {
    #[error(transparent)]
    Operation(E),

    #[error(transparent)]
    Timeout(#[from] TimeoutError),
}

impl<E> WaitError<E> {
    pub fn operation_error(&self) -> Option<&E> {
        match self {
            WaitError::Operation(e) => Some(e),
            WaitError::Timeout(_) => None,
        }
    }

    pub fn into_operation_error(self) -> Option<E> {
        match self {
            WaitError::Operation(e) => Some(e),
            WaitError::Timeout(_) => None,
        }
    }
}

/// Capability check for library-raised errors.
///
/// Classification looks at the [`ErrorKind`] marker a value carries rather than
/// at its Rust type, so wrappers and deserialized payloads answer the same way
/// as the original error.
pub trait Classify {
    fn kind(&self) -> Option<ErrorKind>;
}

impl Classify for ErrorKind {
    fn kind(&self) -> Option<ErrorKind> {
        Some(*self)
    }
}

impl Classify for TimeoutError {
    fn kind(&self) -> Option<ErrorKind> {
        Some(self.kind)
    }
}

impl Classify for TooManyAttempts {
    fn kind(&self) -> Option<ErrorKind> {
        Some(self.kind)
    }
}

impl<E: Classify> Classify for RetryError<E> {
    fn kind(&self) -> Option<ErrorKind> {
        match self {
            RetryError::Operation(e) => e.kind(),
            RetryError::TooManyAttempts(e) => e.kind(),
        }
    }
}

impl<E: Classify> Classify for WaitError<E> {
    fn kind(&self) -> Option<ErrorKind> {
        match self {
            WaitError::Operation(e) => e.kind(),
            WaitError::Timeout(e) => e.kind(),
        }
    }
}

impl Classify for serde_json::Value {
    fn kind(&self) -> Option<ErrorKind> {
        let kind = self.get("kind")?.clone();
        serde_json::from_value(kind).ok()
    }
}

impl Classify for str {
    fn kind(&self) -> Option<ErrorKind> {
        None
    }
}

impl Classify for String {
    fn kind(&self) -> Option<ErrorKind> {
        None
    }
}

impl Classify for std::io::Error {
    fn kind(&self) -> Option<ErrorKind> {
        None
    }
}

impl<T: Classify + ?Sized> Classify for &T {
    fn kind(&self) -> Option<ErrorKind> {
        (**self).kind()
    }
}

impl<T: Classify + ?Sized> Classify for Box<T> {
    fn kind(&self) -> Option<ErrorKind> {
        (**self).kind()
    }
}

impl<T: Classify> Classify for Option<T> {
    fn kind(&self) -> Option<ErrorKind> {
        self.as_ref().and_then(Classify::kind)
    }
}

pub fn is_timeout_error<E: Classify + ?Sized>(err: &E) -> bool {
    err.kind() == Some(ErrorKind::Timeout)
}

pub fn is_too_many_attempts<E: Classify + ?Sized>(err: &E) -> bool {
    err.kind() == Some(ErrorKind::TooManyAttempts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn timeout_error_is_classified() {
        let err = TimeoutError::default();
        assert!(is_timeout_error(&err));
        assert!(!is_too_many_attempts(&err));
        assert_eq!(err.to_string(), TIMEOUT_MESSAGE);
    }

    #[test]
    fn too_many_attempts_is_classified() {
        let err = TooManyAttempts::default();
        assert!(is_too_many_attempts(&err));
        assert!(!is_timeout_error(&err));
    }

    #[test]
    fn arbitrary_errors_are_not_classified() {
        assert!(!is_timeout_error("BOOM"));
        assert!(!is_too_many_attempts(&String::from("BOOM")));
        let io = std::io::Error::other("BOOM");
        assert!(!is_timeout_error(&io));
        assert!(!is_too_many_attempts(&io));
    }

    #[test]
    fn classification_survives_serialization() {
        let payload = serde_json::to_value(TimeoutError::new("took too long")).unwrap();
        assert_eq!(payload["kind"], "timeout");
        assert!(is_timeout_error(&payload));

        let payload = serde_json::to_value(TooManyAttempts::default()).unwrap();
        assert!(is_too_many_attempts(&payload));

        let back: TooManyAttempts = serde_json::from_value(payload).unwrap();
        assert_eq!(back.message(), TOO_MANY_ATTEMPTS_MESSAGE);
    }

    #[test]
    fn foreign_payload_with_marker_is_classified() {
        let payload = json!({ "kind": "timeout", "message": "remote deadline" });
        assert!(is_timeout_error(&payload));

        let payload = json!({ "kind": "boom" });
        assert!(!is_timeout_error(&payload));
        assert!(!is_too_many_attempts(&json!({ "message": "no marker" })));
    }

    #[test]
    fn engine_errors_delegate_to_their_payload() {
        let err: RetryError<String> = TooManyAttempts::default().into();
        assert!(is_too_many_attempts(&err));

        let err: RetryError<String> = RetryError::Operation("BOOM".into());
        assert!(!is_too_many_attempts(&err));
        assert_eq!(err.into_operation_error().as_deref(), Some("BOOM"));

        let err: WaitError<String> = TimeoutError::default().into();
        assert!(is_timeout_error(&err));
        assert!(err.operation_error().is_none());

        // A timeout that surfaced as the operation error of a retry is still a timeout.
        let err: RetryError<WaitError<String>> =
            RetryError::Operation(WaitError::Timeout(TimeoutError::default()));
        assert!(is_timeout_error(&err));
    }
}
