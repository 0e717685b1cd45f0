//! PostgreSQL implementations of the store traits.

pub mod profile;
pub mod user;
pub mod visit;

pub use profile::ProfileRepository;
pub use user::UserRepository;
pub use visit::VisitRepository;

use citadel_core::error::{AppError, ErrorKind};

/// Map a sqlx error to `Conflict` when it violates `constraint`, otherwise
/// to a `Database` error carrying `context`.
pub(crate) fn map_unique(
    err: sqlx::Error,
    constraint: &str,
    conflict: impl FnOnce() -> AppError,
    context: &'static str,
) -> AppError {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(constraint) => conflict(),
        _ => AppError::with_source(ErrorKind::Database, context, err),
    }
}
