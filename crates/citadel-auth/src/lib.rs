//! # citadel-auth
//!
//! Authentication for Safe Citadel.
//!
//! ## Modules
//!
//! - `jwt`: bearer token creation and validation
//! - `password`: Argon2id hashing and password policy
//! - `manager`: login, refresh and password change flows

pub mod jwt;
pub mod manager;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenType};
pub use manager::AuthManager;
pub use password::{PasswordHasher, PasswordValidator};
