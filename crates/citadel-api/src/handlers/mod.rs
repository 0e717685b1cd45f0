//! Route handlers organized by domain.

pub mod admin;
pub mod auth;
pub mod health;
pub mod qr;
pub mod root;
pub mod user;
pub mod visit;
