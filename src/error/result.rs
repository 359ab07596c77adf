//! Result type alias for campus operations.

use super::campus_error::CampusError;
use super::context::ErrorContext;

/// Type alias for Results using CampusError.
pub type CampusResult<T> = Result<T, CampusError>;

/// Extension trait for Result types to add context to errors.
pub trait ResultExt<T> {
    /// Add context to an error if the result is Err.
    fn context(self, ctx: ErrorContext) -> CampusResult<T>;

    /// Add context using a closure (only called on error).
    fn with_context<F>(self, f: F) -> CampusResult<T>
    where
        F: FnOnce() -> ErrorContext;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<CampusError>,
{
    fn context(self, ctx: ErrorContext) -> CampusResult<T> {
        self.map_err(|e| e.into().with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> CampusResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}
