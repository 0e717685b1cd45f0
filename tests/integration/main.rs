//! End-to-end tests over the HTTP router with an in-memory store.

mod helpers;

mod auth_test;
mod qr_test;
mod user_test;
mod visit_test;
