//! Expense validation rules.
//!
//! Rules run in a fixed order per split method and the first failure wins:
//!
//! | # | equal | exact | percentage |
//! |---|-------|-------|------------|
//! | 1 | amount | amount | amount |
//! | 2 | title | title | title |
//! | 3 | no share lists | no percentage list | no exact list |
//! | 4 | | list non-empty | list non-empty |
//! | 5 | | shares well-formed | shares well-formed |
//! | 6 | | no duplicate users | no duplicate users |
//! | 7 | | users registered | users registered |
//! | 8 | | sum == amount | sum == 100 |
//!
//! Nothing here writes; a rejected input leaves no trace.

use std::collections::HashSet;

use rust_decimal::Decimal;
use splitledger_shared::types::{MAX_AMOUNT, UserId, has_money_scale};

use super::error::ExpenseError;
use super::types::{CreateExpenseInput, SplitMethod};
use crate::user::UserDirectory;

/// A single validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Amount is positive, at money scale, and fits storage.
    AmountInRange,
    /// Title is non-blank and fits the title column.
    TitleValid,
    /// No share list other than the method's own is supplied.
    NoConflictingInput,
    /// The method's share list is non-empty.
    InputPresent,
    /// Every share value is within range and precision.
    SharesWellFormed,
    /// No user appears twice.
    UniqueParticipants,
    /// Every user resolves in the directory.
    KnownParticipants,
    /// Shares add up to the amount, or percentages to 100.
    SumMatches,
}

/// Longest title the `expenses.title` column holds, in characters.
pub const TITLE_MAX_LEN: usize = 255;

const EQUAL_RULES: &[Rule] = &[
    Rule::AmountInRange,
    Rule::TitleValid,
    Rule::NoConflictingInput,
];

const LIST_RULES: &[Rule] = &[
    Rule::AmountInRange,
    Rule::TitleValid,
    Rule::NoConflictingInput,
    Rule::InputPresent,
    Rule::SharesWellFormed,
    Rule::UniqueParticipants,
    Rule::KnownParticipants,
    Rule::SumMatches,
];

/// Rules checked for `method`, in evaluation order.
#[must_use]
pub const fn rules_for(method: SplitMethod) -> &'static [Rule] {
    match method {
        SplitMethod::Equal => EQUAL_RULES,
        SplitMethod::Exact | SplitMethod::Percentage => LIST_RULES,
    }
}

/// Validates `input` against every rule for its split method.
///
/// # Errors
///
/// Returns the error of the first rule that fails, or
/// `ExpenseError::Persistence` if the directory cannot be read.
pub async fn validate_expense(
    input: &CreateExpenseInput,
    directory: &dyn UserDirectory,
) -> Result<(), ExpenseError> {
    for rule in rules_for(input.split_method) {
        match rule {
            Rule::KnownParticipants => {
                let users = input.named_participants();
                if let Some(unknown) = directory.first_unknown(&users).await? {
                    return Err(ExpenseError::UnknownUser(unknown));
                }
            }
            other => check_rule(*other, input)?,
        }
    }
    Ok(())
}

/// Checks one rule that needs no directory access.
///
/// # Errors
///
/// Returns the rule's error when it fails.
pub fn check_rule(rule: Rule, input: &CreateExpenseInput) -> Result<(), ExpenseError> {
    match rule {
        Rule::AmountInRange => check_amount(input.amount),
        Rule::TitleValid => check_title(&input.title),
        Rule::NoConflictingInput => check_no_conflict(input),
        Rule::InputPresent => {
            if input.named_participants().is_empty() {
                Err(ExpenseError::MissingInput(input.split_method))
            } else {
                Ok(())
            }
        }
        Rule::SharesWellFormed => check_shares(input),
        Rule::UniqueParticipants => check_unique(&input.named_participants()),
        Rule::SumMatches => check_sum(input),
        // Needs the directory; see `validate_expense`.
        Rule::KnownParticipants => Ok(()),
    }
}

fn check_amount(amount: Decimal) -> Result<(), ExpenseError> {
    if amount <= Decimal::ZERO || amount > MAX_AMOUNT || !has_money_scale(amount) {
        return Err(ExpenseError::InvalidAmount(amount));
    }
    Ok(())
}

fn check_title(title: &str) -> Result<(), ExpenseError> {
    if title.trim().is_empty() || title.chars().count() > TITLE_MAX_LEN {
        return Err(ExpenseError::InvalidTitle);
    }
    Ok(())
}

fn check_no_conflict(input: &CreateExpenseInput) -> Result<(), ExpenseError> {
    let conflict = match input.split_method {
        SplitMethod::Equal => {
            !input.exact_splits.is_empty() || !input.percentage_splits.is_empty()
        }
        SplitMethod::Exact => !input.percentage_splits.is_empty(),
        SplitMethod::Percentage => !input.exact_splits.is_empty(),
    };
    if conflict {
        return Err(ExpenseError::ConflictingInput(input.split_method));
    }
    Ok(())
}

fn check_shares(input: &CreateExpenseInput) -> Result<(), ExpenseError> {
    match input.split_method {
        SplitMethod::Equal => Ok(()),
        SplitMethod::Exact => input
            .exact_splits
            .iter()
            .find(|s| s.split_amount < Decimal::ZERO || !has_money_scale(s.split_amount))
            .map_or(Ok(()), |s| {
                Err(ExpenseError::InvalidShare {
                    user: s.user,
                    value: s.split_amount,
                })
            }),
        SplitMethod::Percentage => input
            .percentage_splits
            .iter()
            .find(|s| s.percentage < Decimal::ZERO || s.percentage > Decimal::ONE_HUNDRED)
            .map_or(Ok(()), |s| {
                Err(ExpenseError::InvalidShare {
                    user: s.user,
                    value: s.percentage,
                })
            }),
    }
}

fn check_unique(users: &[UserId]) -> Result<(), ExpenseError> {
    let mut seen = HashSet::with_capacity(users.len());
    for user in users {
        if !seen.insert(*user) {
            return Err(ExpenseError::DuplicateParticipant(*user));
        }
    }
    Ok(())
}

fn check_sum(input: &CreateExpenseInput) -> Result<(), ExpenseError> {
    match input.split_method {
        SplitMethod::Equal => Ok(()),
        SplitMethod::Exact => {
            let actual: Decimal = input.exact_splits.iter().map(|s| s.split_amount).sum();
            if actual == input.amount {
                Ok(())
            } else {
                Err(ExpenseError::AmountMismatch {
                    expected: input.amount,
                    actual,
                })
            }
        }
        SplitMethod::Percentage => {
            let total: Decimal = input.percentage_splits.iter().map(|s| s.percentage).sum();
            if total == Decimal::ONE_HUNDRED {
                Ok(())
            } else {
                Err(ExpenseError::PercentageSum(total))
            }
        }
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
