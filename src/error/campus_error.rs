//! Unified error type for the campus controllers.

use std::fmt;

use super::category::ErrorCategory;
use super::context::ErrorContext;
use super::course::{CourseError, DashboardError};
use super::network::NetworkError;
use super::storage::PreferenceError;

/// Unified error type.
///
/// Consolidates the domain-specific errors so controllers can make a single
/// degrade/notify/abandon decision through [`CampusError::category`].
#[derive(Debug)]
pub enum CampusError {
    /// Network or web service errors.
    Network(NetworkError),

    /// Preference store errors.
    Preference(PreferenceError),

    /// Course-content controller errors.
    Course(CourseError),

    /// Dashboard errors.
    Dashboard(DashboardError),

    /// Wrapped error with additional context.
    WithContext {
        error: Box<CampusError>,
        context: ErrorContext,
    },
}

impl CampusError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            CampusError::Network(err) => {
                if err.is_server_side() {
                    ErrorCategory::Server
                } else {
                    ErrorCategory::Network
                }
            }
            CampusError::Preference(_) => ErrorCategory::Storage,
            CampusError::Course(err) => match err {
                CourseError::NoSections { .. } => ErrorCategory::Unavailable,
                _ => ErrorCategory::Precondition,
            },
            CampusError::Dashboard(err) => match err {
                DashboardError::MalformedPayload { .. } => ErrorCategory::Server,
                _ => ErrorCategory::Unavailable,
            },
            CampusError::WithContext { error, .. } => error.category(),
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            CampusError::Network(err) => err.user_message(),
            CampusError::Preference(err) => err.user_message(),
            CampusError::Course(err) => err.user_message(),
            CampusError::Dashboard(err) => err.user_message(),
            CampusError::WithContext { error, .. } => error.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            CampusError::Network(err) => err.error_code(),
            CampusError::Preference(err) => err.error_code(),
            CampusError::Course(err) => err.error_code(),
            CampusError::Dashboard(err) => err.error_code(),
            CampusError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// Attach context to this error.
    pub fn with_context(self, ctx: ErrorContext) -> Self {
        CampusError::WithContext {
            error: Box::new(self),
            context: ctx,
        }
    }

    /// Get the context if this error has one attached.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            CampusError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Get the inner error without context.
    pub fn inner(&self) -> &CampusError {
        match self {
            CampusError::WithContext { error, .. } => error.inner(),
            _ => self,
        }
    }
}

impl fmt::Display for CampusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CampusError::Network(err) => write!(f, "{}", err),
            CampusError::Preference(err) => write!(f, "{}", err),
            CampusError::Course(err) => write!(f, "{}", err),
            CampusError::Dashboard(err) => write!(f, "{}", err),
            CampusError::WithContext { error, context } => write!(f, "{} ({})", error, context),
        }
    }
}

impl std::error::Error for CampusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CampusError::Network(err) => Some(err),
            CampusError::Preference(err) => Some(err),
            CampusError::Course(err) => Some(err),
            CampusError::Dashboard(err) => Some(err),
            CampusError::WithContext { error, .. } => error.source(),
        }
    }
}

// ============================================================================
// From implementations for automatic error conversion
// ============================================================================

impl From<NetworkError> for CampusError {
    fn from(err: NetworkError) -> Self {
        CampusError::Network(err)
    }
}

impl From<PreferenceError> for CampusError {
    fn from(err: PreferenceError) -> Self {
        CampusError::Preference(err)
    }
}

impl From<CourseError> for CampusError {
    fn from(err: CourseError) -> Self {
        CampusError::Course(err)
    }
}

impl From<DashboardError> for CampusError {
    fn from(err: DashboardError) -> Self {
        CampusError::Dashboard(err)
    }
}

impl From<crate::traits::HttpError> for CampusError {
    fn from(err: crate::traits::HttpError) -> Self {
        CampusError::Network(err.into())
    }
}

// ============================================================================
// From implementations for external error types
// ============================================================================

impl From<std::io::Error> for CampusError {
    fn from(err: std::io::Error) -> Self {
        CampusError::Preference(PreferenceError::Io {
            message: err.to_string(),
        })
    }
}

impl From<serde_json::Error> for CampusError {
    fn from(err: serde_json::Error) -> Self {
        CampusError::Network(NetworkError::InvalidResponse {
            message: err.to_string(),
        })
    }
}

impl From<reqwest::Error> for CampusError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        CampusError::Network(super::network::classify_reqwest_error(&err, &url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_network_error_category() {
        let err = CampusError::Network(NetworkError::ConnectionFailed {
            url: "https://school.example".to_string(),
            message: "refused".to_string(),
        });
        assert_eq!(err.category(), ErrorCategory::Network);

        let ws = CampusError::Network(NetworkError::WebService {
            error_code: "servicenotavailable".to_string(),
            message: "Web service is not available".to_string(),
        });
        assert_eq!(ws.category(), ErrorCategory::Server);
    }

    #[test]
    fn test_course_error_category() {
        assert_eq!(
            CampusError::Course(CourseError::CourseNotSet).category(),
            ErrorCategory::Precondition
        );
        assert_eq!(
            CampusError::Course(CourseError::NoSections { course_id: 3 }).category(),
            ErrorCategory::Unavailable
        );
    }

    #[test]
    fn test_preference_errors_are_storage() {
        let err: CampusError = PreferenceError::ReadFailed {
            key: "k".to_string(),
            message: "m".to_string(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert_eq!(err.category().as_str(), "storage");
    }

    #[test]
    fn test_with_context_preserves_category() {
        let err = CampusError::Dashboard(DashboardError::NotAvailable)
            .with_context(ErrorContext::new("load_dashboard").with_page("__courses"));

        assert_eq!(err.category(), ErrorCategory::Unavailable);
        assert_eq!(err.context().unwrap().operation, "load_dashboard");
        assert!(matches!(
            err.inner(),
            CampusError::Dashboard(DashboardError::NotAvailable)
        ));
        assert_eq!(err.error_code(), "E_DASH_UNAVAILABLE");
    }

    #[test]
    fn test_io_and_json_conversions() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CampusError = io_err.into();
        assert!(matches!(err, CampusError::Preference(PreferenceError::Io { .. })));

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CampusError = json_err.into();
        assert!(matches!(
            err,
            CampusError::Network(NetworkError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn test_source_chain() {
        let err = CampusError::Course(CourseError::CourseNotSet);
        assert!(err.source().is_some());
        assert_eq!(err.user_message(), "Course not set");
    }
}
