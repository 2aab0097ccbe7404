//! Split calculation.
//!
//! Pure functions from (amount, method, shares, participants) to an ordered
//! list of per-user amounts. Arithmetic stays in `Decimal` and each share is
//! rounded once, at the end, with Banker's Rounding.

use rust_decimal::Decimal;
use splitledger_shared::types::{UserId, round_money};

use super::error::ExpenseError;
use super::types::{ComputedSplit, CreateExpenseInput, ExactShare, PercentageShare, SplitMethod};

/// Split calculator.
pub struct SplitCalculator;

impl SplitCalculator {
    /// Computes splits for a validated input.
    ///
    /// `participants` is the directory's user list and is only read for
    /// [`SplitMethod::Equal`].
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::NoParticipants` for an equal split over an
    /// empty participant list.
    pub fn compute(
        input: &CreateExpenseInput,
        participants: &[UserId],
    ) -> Result<Vec<ComputedSplit>, ExpenseError> {
        match input.split_method {
            SplitMethod::Equal => Self::equal(input.amount, participants),
            SplitMethod::Exact => Ok(Self::exact(&input.exact_splits)),
            SplitMethod::Percentage => {
                Ok(Self::percentage(input.amount, &input.percentage_splits))
            }
        }
    }

    /// Every participant owes `round(amount / n)`.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::NoParticipants` when `participants` is empty.
    pub fn equal(
        amount: Decimal,
        participants: &[UserId],
    ) -> Result<Vec<ComputedSplit>, ExpenseError> {
        if participants.is_empty() {
            return Err(ExpenseError::NoParticipants);
        }

        let count = Decimal::from(participants.len());
        let share = amount
            .checked_div(count)
            .map(round_money)
            .ok_or(ExpenseError::NoParticipants)?;

        Ok(participants
            .iter()
            .map(|user| ComputedSplit {
                user: *user,
                split_amount: share,
            })
            .collect())
    }

    /// Shares are taken as given.
    #[must_use]
    pub fn exact(shares: &[ExactShare]) -> Vec<ComputedSplit> {
        shares
            .iter()
            .map(|s| ComputedSplit {
                user: s.user,
                split_amount: s.split_amount,
            })
            .collect()
    }

    /// Each participant owes `round(percentage / 100 * amount)`.
    ///
    /// The rounded shares may not add up to `amount`; the residue is left as is.
    #[must_use]
    pub fn percentage(amount: Decimal, shares: &[PercentageShare]) -> Vec<ComputedSplit> {
        shares
            .iter()
            .map(|s| ComputedSplit {
                user: s.user,
                split_amount: round_money(s.percentage / Decimal::ONE_HUNDRED * amount),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_equal_two_users() {
        let users = [UserId::new(), UserId::new()];
        let splits = SplitCalculator::equal(dec!(100.00), &users).unwrap();

        assert_eq!(splits.len(), 2);
        assert!(splits.iter().all(|s| s.split_amount == dec!(50.00)));
        assert_eq!(splits[0].user, users[0]);
        assert_eq!(splits[1].user, users[1]);
    }

    #[test]
    fn test_equal_rounds_once() {
        let users = [UserId::new(), UserId::new(), UserId::new()];
        let splits = SplitCalculator::equal(dec!(100.00), &users).unwrap();
        assert!(splits.iter().all(|s| s.split_amount == dec!(33.33)));
    }

    #[test]
    fn test_equal_bankers_rounding() {
        // 0.25 / 2 = 0.125 -> 0.12 (half to even)
        let users = [UserId::new(), UserId::new()];
        let splits = SplitCalculator::equal(dec!(0.25), &users).unwrap();
        assert_eq!(splits[0].split_amount, dec!(0.12));
    }

    #[test]
    fn test_equal_without_participants() {
        let result = SplitCalculator::equal(dec!(100.00), &[]);
        assert!(matches!(result, Err(ExpenseError::NoParticipants)));
    }

    #[test]
    fn test_exact_keeps_input_order() {
        let a = UserId::new();
        let b = UserId::new();
        let splits = SplitCalculator::exact(&[
            ExactShare { user: b, split_amount: dec!(70.00) },
            ExactShare { user: a, split_amount: dec!(30.00) },
        ]);
        assert_eq!(
            splits,
            vec![
                ComputedSplit { user: b, split_amount: dec!(70.00) },
                ComputedSplit { user: a, split_amount: dec!(30.00) },
            ]
        );
    }

    #[test]
    fn test_percentage_scenario() {
        let a = UserId::new();
        let b = UserId::new();
        let splits = SplitCalculator::percentage(
            dec!(200.00),
            &[
                PercentageShare { user: a, percentage: dec!(40.0) },
                PercentageShare { user: b, percentage: dec!(60.0) },
            ],
        );
        assert_eq!(splits[0].split_amount, dec!(80.00));
        assert_eq!(splits[1].split_amount, dec!(120.00));
    }

    #[test]
    fn test_percentage_residue_not_reconciled() {
        let users = [UserId::new(), UserId::new(), UserId::new()];
        let shares = [
            PercentageShare { user: users[0], percentage: dec!(33.33) },
            PercentageShare { user: users[1], percentage: dec!(33.33) },
            PercentageShare { user: users[2], percentage: dec!(33.34) },
        ];

        let splits = SplitCalculator::percentage(dec!(0.10), &shares);
        let total: Decimal = splits.iter().map(|s| s.split_amount).sum();
        assert!(splits.iter().all(|s| s.split_amount == dec!(0.03)));
        assert_eq!(total, dec!(0.09));
    }
}
