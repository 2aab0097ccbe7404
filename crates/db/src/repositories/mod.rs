//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod balance_sheet;
pub mod directory;
pub mod expense;
pub mod user;

pub use balance_sheet::BalanceSheetRepository;
pub use directory::SqlUserDirectory;
pub use expense::{ExpenseRepository, ExpenseWithSplits};
pub use user::UserRepository;
