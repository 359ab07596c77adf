//! Unified error handling for the campus controllers.
//!
//! - **Error Categories**: classification for degrade/notify/abandon decisions
//! - **Domain-specific Errors**: network, preference storage, course, dashboard
//! - **Unified Error Type**: `CampusError` consolidates all error types
//! - **Error Context**: operation, course and page attached to errors
//! - **Result Type Alias**: `CampusResult<T>` with the [`ResultExt`] helpers
//!
//! # Error Categories
//!
//! | Category | Description | Handling |
//! |----------|-------------|----------|
//! | Network | Connection, timeout | Fallback + notice |
//! | Server | 5xx, web service exceptions | Fallback + notice |
//! | Unavailable | Feature missing on the site | Silent fallback |
//! | Precondition | Required input missing | Error + navigate back |
//! | Storage | Preference store failures | Silent default |

mod campus_error;
mod category;
mod context;
mod course;
mod network;
mod result;
mod storage;

pub use campus_error::CampusError;
pub use category::ErrorCategory;
pub use context::ErrorContext;
pub use course::{CourseError, DashboardError};
pub use network::{classify_reqwest_error, NetworkError};
pub use result::{CampusResult, ResultExt};
pub use storage::PreferenceError;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_error_unification() {
        let errors: Vec<CampusError> = vec![
            NetworkError::Timeout {
                operation: "get_dashboard_blocks".to_string(),
            }
            .into(),
            PreferenceError::Io {
                message: "disk".to_string(),
            }
            .into(),
            CourseError::CourseNotSet.into(),
            DashboardError::NotAvailable.into(),
        ];

        for err in &errors {
            assert!(!err.error_code().is_empty());
            assert!(!err.user_message().is_empty());
        }

        assert_eq!(errors[0].category(), ErrorCategory::Network);
        assert_eq!(errors[1].category(), ErrorCategory::Storage);
        assert_eq!(errors[2].category(), ErrorCategory::Precondition);
        assert_eq!(errors[3].category(), ErrorCategory::Unavailable);
    }
}
