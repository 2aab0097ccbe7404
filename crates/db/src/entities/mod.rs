//! `SeaORM` entities.

pub mod prelude;

pub mod balance_sheets;
pub mod expense_splits;
pub mod expenses;
pub mod sea_orm_active_enums;
pub mod users;
