//! Convenience result type alias for Safe Citadel.

use crate::error::AppError;

/// A specialized `Result` type for Citadel operations.
pub type AppResult<T> = Result<T, AppError>;
