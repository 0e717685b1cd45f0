//! Built-in job handlers.

pub mod expiry;

pub use expiry::VisitExpiryJob;
