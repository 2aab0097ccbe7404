//! Core business logic for Splitledger.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Storage reaches it through the [`user::UserDirectory`] port.
//!
//! # Modules
//!
//! - `expense` - Split validation, calculation and planning
//! - `user` - User directory port and registration rules
//! - `auth` - Password hashing
//! - `export` - Balance sheet CSV layouts

pub mod auth;
pub mod expense;
pub mod export;
pub mod user;
