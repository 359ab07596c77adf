//! Error context for enriched error information.

use chrono::{DateTime, Utc};

/// Context attached to errors for debugging.
///
/// Records which operation failed and, when relevant, which dashboard page
/// or component it was working on.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
    /// Human-readable description of the operation that failed.
    pub operation: String,

    /// Dashboard page key, for dashboard loads.
    pub page: Option<String>,

    /// Component where the error originated.
    pub component: Option<String>,

    /// Timestamp when the error occurred.
    pub timestamp: DateTime<Utc>,
}

impl ErrorContext {
    /// Create a new ErrorContext for an operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            page: None,
            component: None,
            timestamp: Utc::now(),
        }
    }

    /// Set the dashboard page key for this context.
    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    /// Set the component for this context.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.operation)?;

        if let Some(ref page) = self.page {
            write!(f, " page={}", page)?;
        }
        if let Some(ref component) = self.component {
            write!(f, " in {}", component)?;
        }

        Ok(())
    }
}
