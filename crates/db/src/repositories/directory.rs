//! `UserDirectory` over a SeaORM connection.
//!
//! Works with a pooled connection or an open transaction, so the expense
//! repository can validate participants inside its write transaction.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use splitledger_core::user::{DirectoryError, User, UserDirectory};
use splitledger_shared::types::UserId;

use crate::entities::users;

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: UserId::from_uuid(model.id),
            email: model.email,
            name: model.name,
            mobile: model.mobile,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

fn unavailable(err: DbErr) -> DirectoryError {
    DirectoryError::Unavailable(err.to_string())
}

/// User directory backed by the `users` table.
#[derive(Debug, Clone, Copy)]
pub struct SqlUserDirectory<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> SqlUserDirectory<'a, C> {
    /// Creates a directory reading through `conn`.
    #[must_use]
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<C> UserDirectory for SqlUserDirectory<'_, C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn lookup_by_id(&self, id: UserId) -> Result<Option<User>, DirectoryError> {
        users::Entity::find_by_id(id.into_inner())
            .one(self.conn)
            .await
            .map(|found| found.map(User::from))
            .map_err(unavailable)
    }

    async fn lookup_by_email(&self, email: &str) -> Result<Option<User>, DirectoryError> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(self.conn)
            .await
            .map(|found| found.map(User::from))
            .map_err(unavailable)
    }

    async fn list_all(&self) -> Result<Vec<User>, DirectoryError> {
        users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .order_by_asc(users::Column::Id)
            .all(self.conn)
            .await
            .map(|rows| rows.into_iter().map(User::from).collect())
            .map_err(unavailable)
    }

    async fn first_unknown(&self, ids: &[UserId]) -> Result<Option<UserId>, DirectoryError> {
        if ids.is_empty() {
            return Ok(None);
        }

        let known: HashSet<_> = users::Entity::find()
            .filter(users::Column::Id.is_in(ids.iter().map(|id| id.into_inner())))
            .all(self.conn)
            .await
            .map_err(unavailable)?
            .into_iter()
            .map(|u| u.id)
            .collect();

        Ok(ids.iter().find(|id| !known.contains(&id.into_inner())).copied())
    }
}
