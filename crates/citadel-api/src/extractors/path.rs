//! Typed path parameter helpers.

use std::str::FromStr;

use citadel_core::error::AppError;

/// Parse an id from a path segment.
pub fn parse_id<T: FromStr>(s: &str) -> Result<T, AppError> {
    s.parse()
        .map_err(|_| AppError::validation(format!("Invalid id: {s}")))
}
