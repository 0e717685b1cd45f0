//! Role-gated read models: profile and grouped visit listings.

pub mod enrich;
pub mod grouping;
pub mod service;
pub mod views;

pub use enrich::VisitEnricher;
pub use grouping::{Grouped, group_by};
pub use service::{GroupedVisits, QueryService};
pub use views::{Profile, ResidenceSummary, ResidentSummary, ResidentUser, VisitView};
