//! Property-based tests for split calculation and validation.
//!
//! - Equal split: every share is round(A / N), N shares, no duplicates
//! - Exact split: accepted shares add up to the amount exactly
//! - Percentage split: each share within half a cent of its exact value
//! - Equal split with any share list is rejected

use std::collections::HashSet;

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;
use splitledger_shared::types::{UserId, round_money};

use super::calculator::SplitCalculator;
use super::error::ExpenseError;
use super::service::ExpenseService;
use super::types::{CreateExpenseInput, ExactShare, PercentageShare, SplitMethod};
use super::validation::validate_expense;
use crate::user::{InMemoryDirectory, User};

/// Strategy to generate valid amounts (0.01 to 100,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (1i64..=10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Splits `total` units into `parts` non-negative pieces using `cuts`.
fn partition(total: i64, cuts: &[i64]) -> Vec<i64> {
    let mut points: Vec<i64> = cuts.iter().map(|c| c.rem_euclid(total + 1)).collect();
    points.push(0);
    points.push(total);
    points.sort_unstable();
    points.windows(2).map(|w| w[1] - w[0]).collect()
}

fn registered(n: usize) -> Vec<User> {
    (0..n)
        .map(|i| User {
            id: UserId::new(),
            email: format!("p{i}@example.com"),
            name: format!("P{i}"),
            mobile: format!("+1555{i:07}"),
            created_at: Utc::now(),
        })
        .collect()
}

fn request(method: SplitMethod, amount: Decimal) -> CreateExpenseInput {
    CreateExpenseInput {
        owner: UserId::new(),
        amount,
        title: "prop".to_string(),
        description: String::new(),
        split_method: method,
        exact_splits: vec![],
        percentage_splits: vec![],
    }
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_equal_shares_are_rounded_quotient(amount in amount(), n in 1usize..40) {
        let users: Vec<UserId> = (0..n).map(|_| UserId::new()).collect();
        let splits = SplitCalculator::equal(amount, &users).unwrap();

        let expected = round_money(amount / Decimal::from(n));
        prop_assert_eq!(splits.len(), n);
        prop_assert!(splits.iter().all(|s| s.split_amount == expected));

        let unique: HashSet<_> = splits.iter().map(|s| s.user).collect();
        prop_assert_eq!(unique.len(), n);

        // Each share is off by at most half a cent.
        let total: Decimal = splits.iter().map(|s| s.split_amount).sum();
        let bound = Decimal::new(5, 3) * Decimal::from(n);
        prop_assert!((amount - total).abs() <= bound);
    }

    #[test]
    fn prop_exact_accepted_shares_sum_to_amount(
        cents in 1i64..=10_000_000i64,
        cuts in prop::collection::vec(any::<i64>(), 0..8),
    ) {
        let amount = Decimal::new(cents, 2);
        let parts = partition(cents, &cuts);
        let users = registered(parts.len());
        let dir = InMemoryDirectory::new(users.clone());

        let mut req = request(SplitMethod::Exact, amount);
        req.exact_splits = users
            .iter()
            .zip(&parts)
            .map(|(u, p)| ExactShare { user: u.id, split_amount: Decimal::new(*p, 2) })
            .collect();

        let plan = block_on(ExpenseService::plan(req, &dir)).unwrap();
        prop_assert_eq!(plan.split_total(), amount);
        prop_assert_eq!(plan.splits.len(), parts.len());
    }

    #[test]
    fn prop_exact_off_by_a_cent_rejected(
        cents in 2i64..=10_000_000i64,
        cuts in prop::collection::vec(any::<i64>(), 1..6),
    ) {
        let amount = Decimal::new(cents, 2);
        let mut parts = partition(cents, &cuts);
        parts[0] += 1;
        let users = registered(parts.len());
        let dir = InMemoryDirectory::new(users.clone());

        let mut req = request(SplitMethod::Exact, amount);
        req.exact_splits = users
            .iter()
            .zip(&parts)
            .map(|(u, p)| ExactShare { user: u.id, split_amount: Decimal::new(*p, 2) })
            .collect();

        let err = block_on(validate_expense(&req, &dir)).unwrap_err();
        let is_mismatch = matches!(err, ExpenseError::AmountMismatch { .. });
        prop_assert!(is_mismatch);
    }

    #[test]
    fn prop_percentage_shares_within_half_cent(
        amount in amount(),
        cuts in prop::collection::vec(any::<i64>(), 0..8),
    ) {
        // Basis points summing to 100.00%.
        let parts = partition(10_000, &cuts);
        let users = registered(parts.len());
        let dir = InMemoryDirectory::new(users.clone());

        let mut req = request(SplitMethod::Percentage, amount);
        req.percentage_splits = users
            .iter()
            .zip(&parts)
            .map(|(u, p)| PercentageShare { user: u.id, percentage: Decimal::new(*p, 2) })
            .collect();

        let plan = block_on(ExpenseService::plan(req.clone(), &dir)).unwrap();
        let half_cent = Decimal::new(5, 3);
        for (split, share) in plan.splits.iter().zip(&req.percentage_splits) {
            let exact = share.percentage / Decimal::ONE_HUNDRED * amount;
            prop_assert!((split.split_amount - exact).abs() <= half_cent);
            prop_assert_eq!(split.user, share.user);
        }
        prop_assert!(plan.rounding_residue().abs() <= half_cent * Decimal::from(parts.len()));
    }

    #[test]
    fn prop_equal_with_share_list_rejected(amount in amount(), exact_list in any::<bool>()) {
        let users = registered(2);
        let dir = InMemoryDirectory::new(users.clone());
        let mut req = request(SplitMethod::Equal, amount);
        if exact_list {
            req.exact_splits = vec![ExactShare { user: users[0].id, split_amount: amount }];
        } else {
            req.percentage_splits = vec![PercentageShare {
                user: users[0].id,
                percentage: Decimal::ONE_HUNDRED,
            }];
        }

        let err = block_on(validate_expense(&req, &dir)).unwrap_err();
        let is_conflict = matches!(err, ExpenseError::ConflictingInput(SplitMethod::Equal));
        prop_assert!(is_conflict);
    }
}
