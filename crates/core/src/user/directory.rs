//! User directory port.
//!
//! The ledger never talks to storage directly. Participant checks and the
//! equal-split participant set both go through [`UserDirectory`], so the
//! database adapter can serve them from inside the expense transaction.

use async_trait::async_trait;
use splitledger_shared::types::UserId;
use thiserror::Error;

use super::User;

/// Failure to reach the backing store.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The store rejected or failed the query.
    #[error("User directory unavailable: {0}")]
    Unavailable(String),
}

/// Read access to registered users.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a user by id.
    async fn lookup_by_id(&self, id: UserId) -> Result<Option<User>, DirectoryError>;

    /// Finds a user by email address (exact match on the stored form).
    async fn lookup_by_email(&self, email: &str) -> Result<Option<User>, DirectoryError>;

    /// Lists every user ordered by registration time, then id.
    async fn list_all(&self) -> Result<Vec<User>, DirectoryError>;

    /// Returns the first id in `ids` that is not registered, if any.
    async fn first_unknown(&self, ids: &[UserId]) -> Result<Option<UserId>, DirectoryError> {
        for id in ids {
            if self.lookup_by_id(*id).await?.is_none() {
                return Ok(Some(*id));
            }
        }
        Ok(None)
    }
}

/// Directory over a fixed snapshot of users.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    users: Vec<User>,
}

impl InMemoryDirectory {
    /// Creates a directory holding `users`.
    #[must_use]
    pub fn new(mut users: Vec<User>) -> Self {
        users.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.into_inner().cmp(&b.id.into_inner()))
        });
        Self { users }
    }

    /// Number of users in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns true if the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn lookup_by_id(&self, id: UserId) -> Result<Option<User>, DirectoryError> {
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }

    async fn lookup_by_email(&self, email: &str) -> Result<Option<User>, DirectoryError> {
        Ok(self.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, DirectoryError> {
        Ok(self.users.clone())
    }
}
