//! `SeaORM` entity prelude.

pub use super::balance_sheets::Entity as BalanceSheets;
pub use super::expense_splits::Entity as ExpenseSplits;
pub use super::expenses::Entity as Expenses;
pub use super::users::Entity as Users;
