//! The acting user, resolved to exactly one role with its profile.

use std::sync::Arc;

use citadel_core::error::{AppError, ErrorKind};
use citadel_core::result::AppResult;
use citadel_core::types::id::UserId;
use citadel_database::store::{ProfileStore, UserStore};
use citadel_entity::{Guard, Resident, User, UserRole};

use crate::context::RequestContext;

/// A user together with the profile its role grants.
#[derive(Debug, Clone)]
pub enum Caller {
    Resident { user: User, resident: Resident },
    Guard { user: User, guard: Guard },
    Admin { user: User },
}

impl Caller {
    pub fn user(&self) -> &User {
        match self {
            Self::Resident { user, .. } | Self::Guard { user, .. } | Self::Admin { user } => user,
        }
    }

    pub fn role(&self) -> UserRole {
        match self {
            Self::Resident { .. } => UserRole::Resident,
            Self::Guard { .. } => UserRole::Guard,
            Self::Admin { .. } => UserRole::Admin,
        }
    }

    /// Guards and admins operate the gate.
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Guard { .. } | Self::Admin { .. })
    }
}

/// Resolves a token subject to a [`Caller`].
#[derive(Debug, Clone)]
pub struct CallerResolver {
    users: Arc<dyn UserStore>,
    profiles: Arc<dyn ProfileStore>,
}

impl CallerResolver {
    pub fn new(users: Arc<dyn UserStore>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { users, profiles }
    }

    /// Resolve the acting user.
    ///
    /// A missing or inactive user is `Unauthorized`. A RESIDENT or GUARD
    /// without its profile row is `NotFound`.
    pub async fn resolve(&self, ctx: &RequestContext) -> AppResult<Caller> {
        self.resolve_user(ctx.user_id).await
    }

    pub async fn resolve_user(&self, user_id: UserId) -> AppResult<Caller> {
        let user = self
            .users
            .find_user(user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| AppError::unauthorized("User not found"))?;

        match user.role {
            UserRole::Resident => {
                let resident = self
                    .profiles
                    .find_resident_by_user(user.id)
                    .await?
                    .ok_or_else(|| {
                        AppError::not_found(format!("No resident profile for user {}", user.id))
                    })?;
                Ok(Caller::Resident { user, resident })
            }
            UserRole::Guard => {
                let guard = self
                    .profiles
                    .find_guard_by_user(user.id)
                    .await?
                    .ok_or_else(|| {
                        AppError::not_found(format!("No guard profile for user {}", user.id))
                    })?;
                Ok(Caller::Guard { user, guard })
            }
            UserRole::Admin => Ok(Caller::Admin { user }),
        }
    }

    /// Resolve the acting user and require the ADMIN role.
    pub async fn require_admin(&self, ctx: &RequestContext) -> AppResult<Caller> {
        match self.resolve(ctx).await? {
            caller @ Caller::Admin { .. } => Ok(caller),
            _ => Err(AppError::unauthorized("Admin access required")),
        }
    }
}

/// Treat a missing role profile as an authorization failure.
pub(crate) fn profile_required(err: AppError) -> AppError {
    if err.is(ErrorKind::NotFound) {
        AppError::unauthorized(err.message)
    } else {
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::Fixture;
    use citadel_core::error::ErrorKind;

    #[tokio::test]
    async fn test_resolves_each_role_with_profile() {
        let fx = Fixture::new().await;

        let resident = fx.resolver.resolve(&fx.resident_ctx()).await.unwrap();
        assert!(matches!(resident, Caller::Resident { ref resident, .. } if resident.id == fx.resident.id));

        let guard = fx.resolver.resolve(&fx.guard_ctx()).await.unwrap();
        assert_eq!(guard.role(), UserRole::Guard);
        assert!(guard.is_staff());

        let admin = fx.resolver.resolve(&fx.admin_ctx()).await.unwrap();
        assert_eq!(admin.role(), UserRole::Admin);
    }

    #[tokio::test]
    async fn test_unknown_user_is_unauthorized() {
        let fx = Fixture::new().await;
        let err = fx
            .resolver
            .resolve(&RequestContext::new(UserId::new()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_resident_without_profile_is_not_found() {
        let fx = Fixture::new().await;
        let orphan = fx.orphan_resident().await;
        let err = fx
            .resolver
            .resolve(&RequestContext::new(orphan))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_require_admin() {
        let fx = Fixture::new().await;
        assert!(fx.resolver.require_admin(&fx.admin_ctx()).await.is_ok());
        let err = fx.resolver.require_admin(&fx.guard_ctx()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }
}
