//! Credential handling.
//!
//! Passwords are stored as Argon2id PHC strings and never leave this module
//! in plaintext form.

mod password;

pub use password::{PasswordError, hash_password, verify_password};
