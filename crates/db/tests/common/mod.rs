//! Shared setup for repository tests.

#![allow(dead_code)]

use sea_orm::DatabaseConnection;
use splitledger_db::connect_with_pool;
use splitledger_db::entities::users;
use splitledger_db::migration::{Migrator, MigratorTrait};
use splitledger_db::UserRepository;

/// Fresh in-memory SQLite database with the schema applied.
///
/// One pooled connection so every query sees the same memory database.
pub async fn setup() -> DatabaseConnection {
    let db = connect_with_pool("sqlite::memory:", 1, 1)
        .await
        .expect("Failed to open SQLite");
    Migrator::up(&db, None).await.expect("Failed to migrate");
    db
}

/// Inserts a user with a placeholder hash.
pub async fn user(db: &DatabaseConnection, name: &str, mobile: &str) -> users::Model {
    UserRepository::new(db.clone())
        .create(
            &format!("{name}@example.com"),
            name,
            mobile,
            "$argon2id$placeholder",
        )
        .await
        .expect("Failed to create user")
}
