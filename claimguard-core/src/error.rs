//! Error types for the ClaimGuard core.
//!
//! Uses `thiserror` for public API error types. Remote failures from the
//! generative and encyclopedic services are classified into a small
//! [`FailureKind`] taxonomy so every component boundary can log them the same
//! way before substituting its fallback value.

use std::fmt;
use std::path::PathBuf;

/// Top-level error type for the ClaimGuard core library.
#[derive(Debug, thiserror::Error)]
pub enum ClaimGuardError {
    #[error("Generative service error: {0}")]
    Generative(#[from] GenerativeError),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Claim error: {0}")]
    Claim(#[from] ClaimError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse classification of a remote failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network error, timeout, or non-2xx status.
    RemoteUnavailable,
    /// Unparsable reply or missing expected fields.
    RemoteMalformed,
    /// Well-formed reply that carries nothing usable.
    NoResult,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::RemoteUnavailable => write!(f, "remote_unavailable"),
            FailureKind::RemoteMalformed => write!(f, "remote_malformed"),
            FailureKind::NoResult => write!(f, "no_result"),
        }
    }
}

/// Errors from the generative text service.
#[derive(Debug, thiserror::Error)]
pub enum GenerativeError {
    #[error("Generative service is disabled")]
    Disabled,

    #[error("Request failed: {message}")]
    Connection { message: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Empty response from generative service")]
    EmptyResponse,

    #[error("Response parse error: {message}")]
    ResponseParse { message: String },
}

impl GenerativeError {
    pub fn kind(&self) -> FailureKind {
        match self {
            GenerativeError::Disabled
            | GenerativeError::Connection { .. }
            | GenerativeError::Timeout { .. }
            | GenerativeError::HttpStatus { .. } => FailureKind::RemoteUnavailable,
            GenerativeError::ResponseParse { .. } => FailureKind::RemoteMalformed,
            GenerativeError::EmptyResponse => FailureKind::NoResult,
        }
    }
}

/// Errors from the encyclopedic summary service.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Encyclopedic lookup is disabled")]
    Disabled,

    #[error("Lookup request failed: {message}")]
    Connection { message: String },

    #[error("Lookup timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Lookup returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("Lookup response parse error: {message}")]
    ResponseParse { message: String },

    #[error("No summary found for '{topic}'")]
    NoResult { topic: String },
}

impl LookupError {
    pub fn kind(&self) -> FailureKind {
        match self {
            LookupError::Disabled
            | LookupError::Connection { .. }
            | LookupError::Timeout { .. }
            | LookupError::HttpStatus { .. } => FailureKind::RemoteUnavailable,
            LookupError::ResponseParse { .. } => FailureKind::RemoteMalformed,
            LookupError::NoResult { .. } => FailureKind::NoResult,
        }
    }
}

/// Errors from the configuration system.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Configuration parse error: {message}")]
    ParseError { message: String },

    #[error("Failed to build HTTP client: {message}")]
    HttpClient { message: String },
}

/// Errors from claim validation.
#[derive(Debug, thiserror::Error)]
pub enum ClaimError {
    #[error("Claim text must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },
}

/// A type alias for results using the top-level `ClaimGuardError`.
pub type Result<T> = std::result::Result<T, ClaimGuardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_generative() {
        let err = ClaimGuardError::Generative(GenerativeError::Connection {
            message: "connection refused".into(),
        });
        assert_eq!(
            err.to_string(),
            "Generative service error: Request failed: connection refused"
        );
    }

    #[test]
    fn test_error_display_lookup() {
        let err = ClaimGuardError::Lookup(LookupError::HttpStatus { status: 404 });
        assert_eq!(err.to_string(), "Lookup error: Lookup returned HTTP 404");
    }

    #[test]
    fn test_error_display_claim() {
        let err = ClaimGuardError::Claim(ClaimError::TooShort { min: 10, actual: 3 });
        assert_eq!(
            err.to_string(),
            "Claim error: Claim text must be at least 10 characters (got 3)"
        );
    }

    #[test]
    fn test_error_display_config() {
        let err = ClaimGuardError::Config(ConfigError::Invalid {
            message: "bad url".into(),
        });
        assert_eq!(err.to_string(), "Configuration error: Invalid configuration: bad url");
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: ClaimGuardError = serde_err.into();
        assert!(matches!(err, ClaimGuardError::Serialization(_)));
    }

    #[test]
    fn test_generative_failure_kinds() {
        assert_eq!(
            GenerativeError::Timeout { timeout_secs: 30 }.kind(),
            FailureKind::RemoteUnavailable
        );
        assert_eq!(
            GenerativeError::HttpStatus {
                status: 500,
                body: String::new()
            }
            .kind(),
            FailureKind::RemoteUnavailable
        );
        assert_eq!(
            GenerativeError::ResponseParse {
                message: "x".into()
            }
            .kind(),
            FailureKind::RemoteMalformed
        );
        assert_eq!(GenerativeError::EmptyResponse.kind(), FailureKind::NoResult);
    }

    #[test]
    fn test_lookup_failure_kinds() {
        assert_eq!(
            LookupError::NoResult {
                topic: "space".into()
            }
            .kind(),
            FailureKind::NoResult
        );
        assert_eq!(LookupError::Disabled.kind(), FailureKind::RemoteUnavailable);
        assert_eq!(FailureKind::RemoteMalformed.to_string(), "remote_malformed");
    }
}
