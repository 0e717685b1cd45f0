//! The visit lifecycle engine.

pub mod expiry;
pub mod lifecycle;

pub use expiry::SweepReport;
pub use lifecycle::{VisitLifecycleService, VisitRequest};
