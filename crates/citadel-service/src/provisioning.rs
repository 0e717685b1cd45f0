//! Administrative provisioning of accounts and residences.
//!
//! These operations carry no request context: the HTTP layer gates them
//! behind [`CallerResolver::require_admin`](crate::CallerResolver::require_admin)
//! and the CLI calls them directly.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use citadel_auth::AuthManager;
use citadel_core::error::AppError;
use citadel_core::result::AppResult;
use citadel_core::types::id::{ResidenceId, ResidentId};
use citadel_database::store::{NewProfile, ProfileStore, UserStore};
use citadel_entity::user::CreateUser;
use citadel_entity::{Residence, User, UserRole};

/// A new account with its role profile.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
    pub name: String,
    pub username: String,
    pub role: UserRole,
    /// Plain-text password. Accounts created without one cannot log in.
    #[serde(default)]
    pub password: Option<String>,
    /// Required for residents.
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProvisioningService {
    users: Arc<dyn UserStore>,
    profiles: Arc<dyn ProfileStore>,
    auth: Arc<AuthManager>,
}

impl ProvisioningService {
    pub fn new(
        users: Arc<dyn UserStore>,
        profiles: Arc<dyn ProfileStore>,
        auth: Arc<AuthManager>,
    ) -> Self {
        Self {
            users,
            profiles,
            auth,
        }
    }

    /// Create a user together with the profile its role requires.
    pub async fn create_user(&self, account: NewAccount) -> AppResult<User> {
        let name = required(&account.name, "Name")?;
        let username = required(&account.username, "Username")?;

        let profile = match account.role {
            UserRole::Resident => {
                let phone = account.phone.as_deref().unwrap_or_default();
                NewProfile::Resident {
                    phone: required(phone, "Phone")?,
                }
            }
            UserRole::Guard => NewProfile::Guard,
            UserRole::Admin => NewProfile::None,
        };

        let password_hash = account
            .password
            .as_deref()
            .map(|password| self.auth.hash_new_password(&username, password))
            .transpose()?;

        let user = self
            .users
            .create_user(
                &CreateUser {
                    name,
                    username,
                    role: account.role,
                    password_hash,
                },
                profile,
            )
            .await?;

        info!(user_id = %user.id, role = %user.role, "User provisioned");
        Ok(user)
    }

    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.list_users().await
    }

    pub async fn create_residence(
        &self,
        address: &str,
        information: Option<serde_json::Value>,
    ) -> AppResult<Residence> {
        let address = required(address, "Address")?;
        let residence = self.profiles.create_residence(&address, information).await?;
        info!(residence_id = %residence.id, "Residence created");
        Ok(residence)
    }

    /// Link an existing resident to an existing residence.
    pub async fn assign_residence(
        &self,
        resident_id: ResidentId,
        residence_id: ResidenceId,
    ) -> AppResult<()> {
        if self.profiles.find_resident(resident_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Resident {resident_id} not found"
            )));
        }
        if self.profiles.find_residence(residence_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Residence {residence_id} not found"
            )));
        }

        self.profiles
            .assign_residence(resident_id, residence_id)
            .await?;
        info!(resident_id = %resident_id, residence_id = %residence_id, "Residence assigned");
        Ok(())
    }
}

fn required(value: &str, field: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use citadel_core::error::ErrorKind;

    use crate::fixtures::Fixture;

    fn account(username: &str, role: UserRole, phone: Option<&str>) -> NewAccount {
        NewAccount {
            name: "Someone".into(),
            username: username.into(),
            role,
            password: None,
            phone: phone.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_resident_requires_phone() {
        let fx = Fixture::new().await;
        let err = fx
            .provisioning
            .create_user(account("nophone", UserRole::Resident, Some("  ")))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_each_role_gets_its_profile() {
        let fx = Fixture::new().await;
        let guard = fx
            .provisioning
            .create_user(account("gina", UserRole::Guard, None))
            .await
            .unwrap();
        let resident = fx
            .provisioning
            .create_user(account("rob", UserRole::Resident, Some("555-0199")))
            .await
            .unwrap();

        assert!(fx.store.find_guard_by_user(guard.id).await.unwrap().is_some());
        let profile = fx.store.find_resident_by_user(resident.id).await.unwrap().unwrap();
        assert_eq!(profile.phone, "555-0199");
        assert!(!resident.can_login());
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let fx = Fixture::new().await;
        let err = fx
            .provisioning
            .create_user(account("gus", UserRole::Guard, None))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_weak_password_is_rejected() {
        let fx = Fixture::new().await;
        let mut weak = account("newbie", UserRole::Admin, None);
        weak.password = Some("password".into());
        let err = fx.provisioning.create_user(weak).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(fx.store.find_user_by_username("newbie").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_assign_residence_checks_both_ends() {
        let fx = Fixture::new().await;
        let residence = fx
            .provisioning
            .create_residence("Tower B, 3", None)
            .await
            .unwrap();

        fx.provisioning
            .assign_residence(fx.resident.id, residence.id)
            .await
            .unwrap();
        let linked = fx.store.residences_for_resident(fx.resident.id).await.unwrap();
        assert_eq!(linked.len(), 2);
        assert_eq!(linked[0].address, "Tower A, 12");

        let again = fx
            .provisioning
            .assign_residence(fx.resident.id, residence.id)
            .await
            .unwrap_err();
        assert_eq!(again.kind, ErrorKind::Conflict);

        let missing = fx
            .provisioning
            .assign_residence(ResidentId::new(), residence.id)
            .await
            .unwrap_err();
        assert_eq!(missing.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_blank_address_is_rejected() {
        let fx = Fixture::new().await;
        let err = fx
            .provisioning
            .create_residence(" ", None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
