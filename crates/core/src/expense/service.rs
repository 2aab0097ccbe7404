//! Expense planning.
//!
//! Turns a request into an [`ExpensePlan`]: validate, resolve participants,
//! compute splits. The plan is what storage writes atomically.

use splitledger_shared::types::{ExpenseId, UserId};

use super::calculator::SplitCalculator;
use super::error::ExpenseError;
use super::types::{CreateExpenseInput, ExpensePlan, SplitMethod};
use super::validation::validate_expense;
use crate::user::UserDirectory;

/// Expense service.
///
/// Holds no state. Storage passes in a directory bound to the same
/// transaction the plan will be written in.
pub struct ExpenseService;

impl ExpenseService {
    /// Validates `input` and computes its splits.
    ///
    /// For an equal split the participants are every user in `directory`,
    /// read once through `list_all` so all shares come from one snapshot.
    ///
    /// # Errors
    ///
    /// Returns the first validation error, `ExpenseError::NoParticipants`
    /// for an equal split with nobody registered, or
    /// `ExpenseError::Persistence` if the directory fails.
    pub async fn plan(
        input: CreateExpenseInput,
        directory: &dyn UserDirectory,
    ) -> Result<ExpensePlan, ExpenseError> {
        validate_expense(&input, directory).await?;

        let participants: Vec<UserId> = match input.split_method {
            SplitMethod::Equal => directory
                .list_all()
                .await?
                .into_iter()
                .map(|u| u.id)
                .collect(),
            SplitMethod::Exact | SplitMethod::Percentage => Vec::new(),
        };

        let splits = SplitCalculator::compute(&input, &participants)?;

        Ok(ExpensePlan {
            id: ExpenseId::new(),
            owner: input.owner,
            amount: input.amount,
            title: input.title,
            description: input.description,
            split_method: input.split_method,
            splits,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::types::{ExactShare, PercentageShare};
    use crate::user::{InMemoryDirectory, User};
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;

    fn users(n: i64) -> Vec<User> {
        (0..n)
            .map(|i| User {
                id: UserId::new(),
                email: format!("user{i}@example.com"),
                name: format!("User {i}"),
                mobile: format!("+1555000000{i}"),
                created_at: Utc::now() + Duration::seconds(i),
            })
            .collect()
    }

    fn request(owner: UserId, method: SplitMethod) -> CreateExpenseInput {
        CreateExpenseInput {
            owner,
            amount: dec!(100.00),
            title: "Groceries".to_string(),
            description: "weekly".to_string(),
            split_method: method,
            exact_splits: vec![],
            percentage_splits: vec![],
        }
    }

    #[tokio::test]
    async fn test_equal_uses_every_registered_user() {
        let registered = users(2);
        let dir = InMemoryDirectory::new(registered.clone());

        let plan = ExpenseService::plan(request(registered[0].id, SplitMethod::Equal), &dir)
            .await
            .unwrap();

        assert_eq!(plan.splits.len(), 2);
        assert_eq!(plan.splits[0].user, registered[0].id);
        assert_eq!(plan.splits[1].user, registered[1].id);
        assert!(plan.splits.iter().all(|s| s.split_amount == dec!(50.00)));
        assert_eq!(plan.title, "Groceries");
        assert_eq!(plan.owner, registered[0].id);
    }

    #[tokio::test]
    async fn test_equal_with_empty_directory() {
        let dir = InMemoryDirectory::default();
        let err = ExpenseService::plan(request(UserId::new(), SplitMethod::Equal), &dir)
            .await
            .unwrap_err();
        assert!(matches!(err, ExpenseError::NoParticipants));
    }

    #[tokio::test]
    async fn test_exact_plan() {
        let registered = users(2);
        let dir = InMemoryDirectory::new(registered.clone());
        let mut req = request(registered[0].id, SplitMethod::Exact);
        req.exact_splits = vec![
            ExactShare { user: registered[1].id, split_amount: dec!(75.50) },
            ExactShare { user: registered[0].id, split_amount: dec!(24.50) },
        ];

        let plan = ExpenseService::plan(req, &dir).await.unwrap();

        assert_eq!(plan.splits[0].user, registered[1].id);
        assert_eq!(plan.splits[0].split_amount, dec!(75.50));
        assert_eq!(plan.split_total(), plan.amount);
    }

    #[tokio::test]
    async fn test_percentage_plan_with_outsider_only() {
        // Participants need not include the owner.
        let registered = users(3);
        let dir = InMemoryDirectory::new(registered.clone());
        let mut req = request(registered[0].id, SplitMethod::Percentage);
        req.amount = dec!(200.00);
        req.percentage_splits = vec![
            PercentageShare { user: registered[1].id, percentage: dec!(40.0) },
            PercentageShare { user: registered[2].id, percentage: dec!(60.0) },
        ];

        let plan = ExpenseService::plan(req, &dir).await.unwrap();

        assert_eq!(plan.splits.len(), 2);
        assert_eq!(plan.splits[0].split_amount, dec!(80.00));
        assert_eq!(plan.splits[1].split_amount, dec!(120.00));
    }

    #[tokio::test]
    async fn test_validation_failure_short_circuits() {
        let dir = InMemoryDirectory::default();
        let mut req = request(UserId::new(), SplitMethod::Percentage);
        req.percentage_splits = vec![PercentageShare {
            user: UserId::new(),
            percentage: dec!(100),
        }];

        let err = ExpenseService::plan(req, &dir).await.unwrap_err();
        assert!(matches!(err, ExpenseError::UnknownUser(_)));
    }
}
