//! Expense splitting.
//!
//! This module implements the expense core:
//! - Domain types for requests, splits and plans
//! - Ordered validation rules
//! - The split calculator for equal, exact and percentage splits
//! - The planning service that ties them to a user directory

pub mod calculator;
pub mod error;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod calculator_props;

pub use calculator::SplitCalculator;
pub use error::ExpenseError;
pub use service::ExpenseService;
pub use types::{
    ComputedSplit, CreateExpenseInput, ExactShare, ExpensePlan, PercentageShare, SplitMethod,
};
pub use validation::{Rule, TITLE_MAX_LEN, check_rule, rules_for, validate_expense};
