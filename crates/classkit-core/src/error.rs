//! Error types for classkit-core

use std::fmt;

/// Result type alias for classkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for classkit operations
#[derive(Debug)]
pub enum Error {
    /// Invalid configuration
    Config(String),

    /// I/O error
    Io(std::io::Error),

    /// Runtime error (Tokio, threading, etc.)
    Runtime(String),

    /// HTTP/API error
    Http(String),

    /// Authentication or authorization failure
    Auth(String),

    /// Repository could not be resolved
    RepoNotFound(String),

    /// Check-run listing error
    CheckRun(String),

    /// API rate limit exceeded
    RateLimitExceeded(String),

    /// Git clone error
    Git(String),

    /// CSV output error
    Csv(String),

    /// Repository-name filter error
    Pattern(String),

    /// YAML parsing error
    Yaml(String),

    /// Other errors
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Runtime(msg) => write!(f, "Runtime error: {}", msg),
            Error::Http(msg) => write!(f, "HTTP error: {}", msg),
            Error::Auth(msg) => write!(f, "Authentication error: {}", msg),
            Error::RepoNotFound(name) => write!(f, "Repository not found: {}", name),
            Error::CheckRun(msg) => write!(f, "Check run error: {}", msg),
            Error::RateLimitExceeded(msg) => write!(f, "Rate limit exceeded: {}", msg),
            Error::Git(msg) => write!(f, "Git error: {}", msg),
            Error::Csv(msg) => write!(f, "CSV error: {}", msg),
            Error::Pattern(msg) => write!(f, "Pattern error: {}", msg),
            Error::Yaml(msg) => write!(f, "YAML error: {}", msg),
            Error::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<git2::Error> for Error {
    fn from(err: git2::Error) -> Self {
        Error::Git(err.to_string())
    }
}

impl From<globset::Error> for Error {
    fn from(err: globset::Error) -> Self {
        Error::Pattern(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Other(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Yaml(err.to_string())
    }
}

/// Fieldless error category for zero-cost pattern matching.
///
/// Single byte representation (`#[repr(u8)]`), `Copy`, no allocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorKind {
    /// Configuration error
    Config,
    /// I/O operation error
    Io,
    /// Runtime error
    Runtime,
    /// HTTP/API error
    Http,
    /// Authentication or authorization failure
    Auth,
    /// Repository could not be resolved
    RepoNotFound,
    /// Check-run listing error
    CheckRun,
    /// API rate limit exceeded
    RateLimitExceeded,
    /// Git clone error
    Git,
    /// CSV output error
    Csv,
    /// Repository-name filter error
    Pattern,
    /// YAML parsing error
    Yaml,
    /// Other errors
    Other,
}

impl Error {
    /// Get the error kind — zero allocation, returns a Copy enum.
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Config,
            Error::Io(_) => ErrorKind::Io,
            Error::Runtime(_) => ErrorKind::Runtime,
            Error::Http(_) => ErrorKind::Http,
            Error::Auth(_) => ErrorKind::Auth,
            Error::RepoNotFound(_) => ErrorKind::RepoNotFound,
            Error::CheckRun(_) => ErrorKind::CheckRun,
            Error::RateLimitExceeded(_) => ErrorKind::RateLimitExceeded,
            Error::Git(_) => ErrorKind::Git,
            Error::Csv(_) => ErrorKind::Csv,
            Error::Pattern(_) => ErrorKind::Pattern,
            Error::Yaml(_) => ErrorKind::Yaml,
            Error::Other(_) => ErrorKind::Other,
        }
    }

    /// Borrow the error message — zero allocation.
    #[inline]
    pub fn message(&self) -> &str {
        match self {
            Error::Config(msg)
            | Error::Runtime(msg)
            | Error::Http(msg)
            | Error::Auth(msg)
            | Error::RepoNotFound(msg)
            | Error::CheckRun(msg)
            | Error::RateLimitExceeded(msg)
            | Error::Git(msg)
            | Error::Csv(msg)
            | Error::Pattern(msg)
            | Error::Yaml(msg)
            | Error::Other(msg) => msg,
            Error::Io(_) => "I/O error",
        }
    }

    /// True for failures a bulk run recovers from by skipping the current
    /// item: missing repositories, auth rejections, transient network errors.
    #[inline]
    pub const fn is_per_item(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::RepoNotFound
                | ErrorKind::Auth
                | ErrorKind::Http
                | ErrorKind::CheckRun
                | ErrorKind::RateLimitExceeded
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_is_copy() {
        let err = Error::Http("test".to_string());
        let k = err.kind();
        let k2 = k; // Copy — no move
        assert_eq!(k, k2);
    }

    #[test]
    fn test_error_kind_zero_alloc() {
        // ErrorKind is a fieldless enum — no String data
        assert_eq!(std::mem::size_of::<ErrorKind>(), 1);
    }

    #[test]
    fn test_error_message_borrows() {
        let err = Error::Config("bad config".to_string());
        let msg: &str = err.message();
        assert_eq!(msg, "bad config");
        // msg borrows from err — no allocation
    }

    #[test]
    fn test_all_error_variants_have_kind() {
        let cases: Vec<(Error, ErrorKind)> = vec![
            (Error::Config("c".into()), ErrorKind::Config),
            (Error::Io(std::io::Error::other("io")), ErrorKind::Io),
            (Error::Runtime("r".into()), ErrorKind::Runtime),
            (Error::Http("h".into()), ErrorKind::Http),
            (Error::Auth("a".into()), ErrorKind::Auth),
            (Error::RepoNotFound("nf".into()), ErrorKind::RepoNotFound),
            (Error::CheckRun("cr".into()), ErrorKind::CheckRun),
            (
                Error::RateLimitExceeded("rl".into()),
                ErrorKind::RateLimitExceeded,
            ),
            (Error::Git("g".into()), ErrorKind::Git),
            (Error::Csv("csv".into()), ErrorKind::Csv),
            (Error::Pattern("pat".into()), ErrorKind::Pattern),
            (Error::Yaml("y".into()), ErrorKind::Yaml),
            (Error::Other("o".into()), ErrorKind::Other),
        ];

        for (err, expected_kind) in cases {
            assert_eq!(err.kind(), expected_kind, "Mismatch for {:?}", err);
        }
    }

    #[test]
    fn test_per_item_classification() {
        assert!(Error::RepoNotFound("org/x".into()).is_per_item());
        assert!(Error::Http("timeout".into()).is_per_item());
        assert!(Error::Auth("bad credentials".into()).is_per_item());
        assert!(!Error::Config("missing org".into()).is_per_item());
        assert!(!Error::Io(std::io::Error::other("disk")).is_per_item());
    }

    #[test]
    fn test_error_messages_never_contain_token_patterns() {
        // Verify that all error variant messages don't accidentally include
        // GitHub token patterns (ghp_, gho_, ghs_, github_pat_)
        let token_patterns = ["ghp_", "gho_", "ghs_", "github_pat_", "Bearer "];
        let errors: Vec<Error> = vec![
            Error::Config("config error".into()),
            Error::Http("http error".into()),
            Error::Auth("authentication rejected".into()),
            Error::RepoNotFound("org/assignment-01-alice".into()),
            Error::RateLimitExceeded("rate limit exceeded".into()),
            Error::Git("clone failed".into()),
        ];

        for err in &errors {
            let msg = err.message();
            let display = format!("{}", err);
            let debug = format!("{:?}", err);
            for pattern in &token_patterns {
                assert!(
                    !msg.contains(pattern),
                    "Error message contains token pattern '{}': {}",
                    pattern,
                    msg
                );
                assert!(
                    !display.contains(pattern),
                    "Error Display contains token pattern '{}': {}",
                    pattern,
                    display
                );
                assert!(
                    !debug.contains(pattern),
                    "Error Debug contains token pattern '{}': {}",
                    pattern,
                    debug
                );
            }
        }
    }
}
