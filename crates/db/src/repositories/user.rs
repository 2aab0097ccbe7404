//! User repository for database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set, SqlErr,
};
use splitledger_core::auth::hash_password;
use splitledger_core::user::{NewUser, RegistrationError};
use splitledger_shared::types::UserId;
use tracing::info;

use super::directory::SqlUserDirectory;
use crate::entities::users;

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Directory view over the same connection.
    #[must_use]
    pub const fn directory(&self) -> SqlUserDirectory<'_, DatabaseConnection> {
        SqlUserDirectory::new(&self.db)
    }

    /// Validates, hashes and stores a new user.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError::Invalid` when a field rule fails,
    /// `EmailTaken`/`MobileTaken` on duplicates, and `Persistence` when the
    /// database fails.
    pub async fn register(&self, input: NewUser) -> Result<users::Model, RegistrationError> {
        let input = input.into_normalized()?;

        if self.email_exists(&input.email).await.map_err(persistence)? {
            return Err(RegistrationError::EmailTaken(input.email));
        }
        if self.mobile_exists(&input.mobile).await.map_err(persistence)? {
            return Err(RegistrationError::MobileTaken(input.mobile));
        }

        let password_hash = hash_password(&input.password)?;

        // Another request may have claimed the email or mobile since the checks.
        let user = self
            .create(&input.email, &input.name, &input.mobile, &password_hash)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains("mobile") => {
                    RegistrationError::MobileTaken(input.mobile.clone())
                }
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    RegistrationError::EmailTaken(input.email.clone())
                }
                _ => persistence(e),
            })?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Inserts a user row with an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        email: &str,
        name: &str,
        mobile: &str,
        password_hash: &str,
    ) -> Result<users::Model, DbErr> {
        let user = users::ActiveModel {
            id: Set(UserId::new().into_inner()),
            email: Set(email.to_string()),
            name: Set(name.to_string()),
            mobile: Set(mobile.to_string()),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(Utc::now().into()),
        };

        user.insert(&self.db).await
    }

    /// Loads the stored row for login, password hash included.
    ///
    /// Identity lookups go through [`Self::directory`].
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_credentials(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Checks if a mobile number is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn mobile_exists(&self, mobile: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Mobile.eq(mobile))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }
}

fn persistence(err: DbErr) -> RegistrationError {
    RegistrationError::Persistence(err.to_string())
}
