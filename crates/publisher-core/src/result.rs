//! Convenience result type alias for Publisher.

use crate::error::AppError;

/// A specialized `Result` type for Publisher operations.
pub type AppResult<T> = Result<T, AppError>;
