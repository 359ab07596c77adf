//! Error category classification.
//!
//! Categories drive how a controller reacts to a failure: degrade to a
//! default, show a notice, or abandon the screen.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS or timeout problems.
    Network,

    /// Backend errors (HTTP 5xx, web service exceptions).
    Server,

    /// Requested data is not available for this site or user.
    /// The caller substitutes a default.
    Unavailable,

    /// A required input was missing or inconsistent.
    Precondition,

    /// Local storage problems (preference store, filesystem).
    Storage,
}

impl ErrorCategory {
    /// Short label suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Unavailable => "unavailable",
            ErrorCategory::Precondition => "precondition",
            ErrorCategory::Storage => "storage",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
