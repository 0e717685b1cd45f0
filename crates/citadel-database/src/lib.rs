//! # citadel-database
//!
//! PostgreSQL connection management, migrations, and the store traits the
//! services are written against. Each trait has a Postgres repository and
//! an in-memory implementation.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{NewProfile, ProfileStore, UserStore, VisitStore, VisitTransition};
