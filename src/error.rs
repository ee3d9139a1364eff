/// Error types for the fast_browser library
use std::fmt;

/// Result type alias for fast_browser operations
pub type Result<T> = std::result::Result<T, UserAgentError>;

/// Main error type for fast_browser operations
///
/// Classification itself is total and never produces one of these. They only
/// surface from the strict constructors and the binding compatibility check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAgentError {
    /// The embedding binding was built against a different engine version
    VersionMismatch {
        /// Version the binding declares
        expected: String,
        /// Version compiled into this library
        found: String,
    },

    /// Input bytes were not valid UTF-8 (strict constructor only)
    InvalidUtf8 {
        /// Byte offset of the first invalid sequence
        valid_up_to: usize,
    },

    /// Serialization errors
    Serialization(String),
}

impl fmt::Display for UserAgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserAgentError::VersionMismatch { expected, found } => write!(
                f,
                "Version mismatch: binding expects {}, library is {}",
                expected, found
            ),
            UserAgentError::InvalidUtf8 { valid_up_to } => {
                write!(f, "Invalid UTF-8 after byte {}", valid_up_to)
            }
            UserAgentError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for UserAgentError {}

impl From<std::str::Utf8Error> for UserAgentError {
    fn from(err: std::str::Utf8Error) -> Self {
        UserAgentError::InvalidUtf8 {
            valid_up_to: err.valid_up_to(),
        }
    }
}

impl From<serde_json::Error> for UserAgentError {
    fn from(err: serde_json::Error) -> Self {
        UserAgentError::Serialization(err.to_string())
    }
}

/// Compare a binding's declared version against [`crate::VERSION`].
///
/// Bindings call this once at load time and refuse to continue on `Err`.
pub fn check_version(expected: &str) -> Result<()> {
    if expected == crate::VERSION {
        Ok(())
    } else {
        Err(UserAgentError::VersionMismatch {
            expected: expected.to_string(),
            found: crate::VERSION.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_version_matches() {
        assert!(check_version(crate::VERSION).is_ok());
    }

    #[test]
    fn test_check_version_mismatch() {
        let err = check_version("0.0.0-not-real").unwrap_err();
        assert_eq!(
            err,
            UserAgentError::VersionMismatch {
                expected: "0.0.0-not-real".to_string(),
                found: crate::VERSION.to_string(),
            }
        );
        assert!(err.to_string().contains("0.0.0-not-real"));
    }

    #[test]
    fn test_utf8_error_conversion() {
        let bytes = [b'a', 0xff, b'b'];
        let err: UserAgentError = std::str::from_utf8(&bytes).unwrap_err().into();
        assert_eq!(err, UserAgentError::InvalidUtf8 { valid_up_to: 1 });
    }
}
