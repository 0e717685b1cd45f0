//! # citadel-service
//!
//! Business logic for Safe Citadel. Services receive their stores and
//! configuration at construction and resolve the acting user's role once
//! per operation through [`CallerResolver`].

pub mod caller;
pub mod context;
pub mod dates;
pub mod provisioning;
pub mod qr;
pub mod query;
pub mod visit;

#[cfg(test)]
pub(crate) mod fixtures;

pub use caller::{Caller, CallerResolver};
pub use context::RequestContext;
pub use provisioning::{NewAccount, ProvisioningService};
pub use qr::{QrLookup, QrVerification, QrVerificationService};
pub use query::QueryService;
pub use visit::{SweepReport, VisitLifecycleService, VisitRequest};
