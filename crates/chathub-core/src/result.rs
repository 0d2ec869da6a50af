//! Convenience result type alias for ChatHub.

use crate::error::AppError;

/// A specialized `Result` type for ChatHub operations.
pub type AppResult<T> = Result<T, AppError>;
