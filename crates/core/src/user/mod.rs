//! Users as seen by the expense ledger.
//!
//! - `directory` - the lookup port the ledger resolves participants through
//! - `registration` - input rules for creating accounts

pub mod directory;
pub mod registration;

pub use directory::{DirectoryError, InMemoryDirectory, UserDirectory};
pub use registration::{
    NewUser, RegistrationError, describe_validation_errors, normalize_email,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use splitledger_shared::types::UserId;

/// A registered user, without credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable identifier.
    pub id: UserId,
    /// Unique email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Unique mobile number.
    pub mobile: String,
    /// Registration time; the directory lists users in this order.
    pub created_at: DateTime<Utc>,
}
