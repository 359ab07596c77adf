//! Preference storage error types.

use std::fmt;

/// Errors raised by a preference store.
///
/// Controllers never surface these to the user; a failed read is treated
/// as "preference absent" and a failed write is logged and dropped.
#[derive(Debug, Clone)]
pub enum PreferenceError {
    /// Reading a key failed.
    ReadFailed { key: String, message: String },

    /// Writing a key failed.
    WriteFailed { key: String, message: String },

    /// The stored value has an unexpected shape.
    InvalidValue { key: String, message: String },

    /// The backing file could not be accessed.
    Io { message: String },
}

impl PreferenceError {
    /// The key involved, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            PreferenceError::ReadFailed { key, .. }
            | PreferenceError::WriteFailed { key, .. }
            | PreferenceError::InvalidValue { key, .. } => Some(key),
            PreferenceError::Io { .. } => None,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            PreferenceError::ReadFailed { .. } | PreferenceError::InvalidValue { .. } => {
                "Saved display preferences could not be read. Defaults are used.".to_string()
            }
            PreferenceError::WriteFailed { .. } => {
                "Display preferences could not be saved.".to_string()
            }
            PreferenceError::Io { .. } => {
                "Local storage is not accessible. Check available disk space.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            PreferenceError::ReadFailed { .. } => "E_PREF_READ",
            PreferenceError::WriteFailed { .. } => "E_PREF_WRITE",
            PreferenceError::InvalidValue { .. } => "E_PREF_VALUE",
            PreferenceError::Io { .. } => "E_PREF_IO",
        }
    }
}

impl fmt::Display for PreferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferenceError::ReadFailed { key, message } => {
                write!(f, "Failed to read preference '{}': {}", key, message)
            }
            PreferenceError::WriteFailed { key, message } => {
                write!(f, "Failed to write preference '{}': {}", key, message)
            }
            PreferenceError::InvalidValue { key, message } => {
                write!(f, "Invalid value for preference '{}': {}", key, message)
            }
            PreferenceError::Io { message } => write!(f, "Preference storage error: {}", message),
        }
    }
}

impl std::error::Error for PreferenceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_accessor() {
        let err = PreferenceError::ReadFailed {
            key: "CoreCourseExpandedSections-2".to_string(),
            message: "locked".to_string(),
        };
        assert_eq!(err.key(), Some("CoreCourseExpandedSections-2"));
        assert_eq!(
            PreferenceError::Io {
                message: "disk full".to_string()
            }
            .key(),
            None
        );
    }

    #[test]
    fn test_display_and_code() {
        let err = PreferenceError::WriteFailed {
            key: "AddonBlockMyOverviewLayout".to_string(),
            message: "read-only".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to write preference 'AddonBlockMyOverviewLayout': read-only"
        );
        assert_eq!(err.error_code(), "E_PREF_WRITE");
    }
}
