//! # citadel-entity
//!
//! Database row models and domain enums for Safe Citadel. Entities are flat
//! records that reference each other by typed id; nothing in this crate
//! holds a pointer to another entity.

pub mod profile;
pub mod qr;
pub mod residence;
pub mod user;
pub mod visit;
pub mod visitor;

pub use profile::{Guard, Resident};
pub use qr::Qr;
pub use residence::Residence;
pub use user::{User, UserRole};
pub use visit::{Visit, VisitState};
pub use visitor::Visitor;
