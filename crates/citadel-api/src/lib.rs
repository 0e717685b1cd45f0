//! # citadel-api
//!
//! HTTP API layer for Safe Citadel built on Axum.
//!
//! Provides the REST endpoints, middleware (CORS, request logging, role
//! guards), the bearer-token extractor, DTOs and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::run_server;
pub use error::ApiError;
pub use router::build_router;
pub use state::{AppState, Stores};
