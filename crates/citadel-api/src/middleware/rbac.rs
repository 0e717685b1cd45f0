//! Role guards for admin routes.
//!
//! Roles are read from the store, never from the token.

use citadel_core::result::AppResult;

use crate::extractors::AuthUser;
use crate::state::AppState;

/// Checks that the authenticated user has the ADMIN role.
pub async fn require_admin(state: &AppState, auth: &AuthUser) -> AppResult<()> {
    state.resolver.require_admin(auth.context()).await?;
    Ok(())
}
