//! Visit domain entities and the visit state machine.

pub mod model;
pub mod state;

pub use model::{NewVisit, Visit};
pub use state::VisitState;
