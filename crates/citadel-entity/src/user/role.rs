//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a user account. The role decides which profile, if any, the
/// user owns: a RESIDENT owns a [`crate::Resident`], a GUARD owns a
/// [`crate::Guard`], an ADMIN owns neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Resident,
    Guard,
    Admin,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [Self::Resident, Self::Guard, Self::Admin];

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as its stored uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resident => "RESIDENT",
            Self::Guard => "GUARD",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = citadel_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "RESIDENT" => Ok(Self::Resident),
            "GUARD" => Ok(Self::Guard),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(citadel_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: RESIDENT, GUARD, ADMIN"
            ))),
        }
    }
}
