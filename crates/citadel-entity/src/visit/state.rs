//! Visit lifecycle states.
//!
//! ```text
//! PENDING ──► REGISTERED
//!    │
//!    ├──────► CANCELLED
//!    │
//!    └──────► EXPIRED
//! ```
//!
//! Every state other than `PENDING` is terminal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use citadel_core::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "visit_state", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum VisitState {
    /// Requested by a resident, waiting at the gate.
    Pending,
    /// The visitor was let in.
    Registered,
    /// Rejected at the gate or withdrawn.
    Cancelled,
    /// Never showed up within the expiry window.
    Expired,
}

impl VisitState {
    /// Every state, in lifecycle order.
    pub const ALL: [VisitState; 4] = [
        Self::Pending,
        Self::Registered,
        Self::Cancelled,
        Self::Expired,
    ];

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Whether the edge `self -> next` exists.
    pub fn can_transition_to(&self, next: VisitState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Registered | Self::Cancelled | Self::Expired)
        )
    }

    /// Validate the edge `self -> next`, returning `next` on success.
    ///
    /// Re-entering the current state and leaving a terminal state are both
    /// `Conflict`.
    pub fn transition(self, next: VisitState) -> AppResult<VisitState> {
        if self == next {
            return Err(AppError::conflict(format!("Visit is already {next}")));
        }
        if !self.can_transition_to(next) {
            return Err(AppError::conflict(format!(
                "Visit is {self} and cannot become {next}"
            )));
        }
        Ok(next)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Registered => "REGISTERED",
            Self::Cancelled => "CANCELLED",
            Self::Expired => "EXPIRED",
        }
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VisitState {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "REGISTERED" => Ok(Self::Registered),
            "CANCELLED" => Ok(Self::Cancelled),
            "EXPIRED" => Ok(Self::Expired),
            _ => Err(AppError::validation(format!("Invalid visit state: '{s}'"))),
        }
    }
}
