//! Authentication primitives.
//!
//! Only password hashing lives here; nothing in the router enforces auth.

pub mod password;

pub use password::{PasswordError, hash_password, verify_password};
