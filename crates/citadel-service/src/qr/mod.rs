//! Gate-side QR lookups.

pub mod verification;

pub use verification::{QrLookup, QrVerification, QrVerificationService};
