//! Expense repository: the ledger materializer.
//!
//! An expense is written as one unit: the expense row, then one split row and
//! one balance sheet row per participant. Validation and split calculation
//! run inside the same database transaction, reading users through it.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use splitledger_core::expense::{CreateExpenseInput, ExpenseError, ExpensePlan, ExpenseService};
use splitledger_shared::types::{BalanceSheetId, ExpenseId, ExpenseSplitId, UserId};
use tracing::{error, info};

use super::directory::SqlUserDirectory;
use crate::entities::{balance_sheets, expense_splits, expenses};

/// Expense with its split rows.
#[derive(Debug, Clone)]
pub struct ExpenseWithSplits {
    /// Expense header.
    pub expense: expenses::Model,
    /// One split per participant.
    pub splits: Vec<expense_splits::Model>,
}

/// Expense repository for creating and reading expenses.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates, splits and records an expense in one transaction.
    ///
    /// # Errors
    ///
    /// Returns the validation error of the first failing rule,
    /// `ExpenseError::NoParticipants` for an equal split with no users, or
    /// `ExpenseError::Persistence` if any write fails. On error nothing is
    /// written.
    pub async fn create_expense(
        &self,
        input: CreateExpenseInput,
    ) -> Result<ExpenseWithSplits, ExpenseError> {
        let txn = self.db.begin().await.map_err(persistence)?;

        let plan = ExpenseService::plan(input, &SqlUserDirectory::new(&txn)).await?;
        let created = Self::write_plan(&txn, &plan).await?;

        txn.commit().await.map_err(persistence)?;

        info!(
            expense_id = %plan.id,
            owner_id = %plan.owner,
            split_method = %plan.split_method,
            participants = plan.splits.len(),
            "Expense recorded"
        );
        Ok(created)
    }

    /// Writes an already computed plan in its own transaction.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::Persistence` if any row cannot be written,
    /// for example when a participant no longer exists. Rows written before
    /// the failure are rolled back.
    pub async fn materialize(&self, plan: &ExpensePlan) -> Result<ExpenseWithSplits, ExpenseError> {
        let txn = self.db.begin().await.map_err(persistence)?;
        let created = Self::write_plan(&txn, plan).await?;
        txn.commit().await.map_err(persistence)?;
        Ok(created)
    }

    /// Inserts the expense, then a split and a ledger row per participant.
    async fn write_plan(
        txn: &DatabaseTransaction,
        plan: &ExpensePlan,
    ) -> Result<ExpenseWithSplits, ExpenseError> {
        let result = Self::insert_rows(txn, plan).await;
        if let Err(e) = &result {
            error!(error = %e, expense_id = %plan.id, "Failed to write expense");
        }
        result.map_err(persistence)
    }

    async fn insert_rows(
        txn: &DatabaseTransaction,
        plan: &ExpensePlan,
    ) -> Result<ExpenseWithSplits, DbErr> {
        let now = Utc::now().into();
        let expense_id = plan.id.into_inner();

        let expense = expenses::ActiveModel {
            id: Set(expense_id),
            owner_id: Set(plan.owner.into_inner()),
            amount: Set(plan.amount),
            title: Set(plan.title.clone()),
            description: Set(plan.description.clone()),
            split_method: Set(plan.split_method.into()),
            created_at: Set(now),
        }
        .insert(txn)
        .await?;

        let mut splits = Vec::with_capacity(plan.splits.len());
        for share in &plan.splits {
            let split = expense_splits::ActiveModel {
                id: Set(ExpenseSplitId::new().into_inner()),
                expense_id: Set(expense_id),
                user_id: Set(share.user.into_inner()),
                split_amount: Set(share.split_amount),
                created_at: Set(now),
            }
            .insert(txn)
            .await?;

            balance_sheets::ActiveModel {
                id: Set(BalanceSheetId::new().into_inner()),
                expense_id: Set(expense_id),
                user_id: Set(share.user.into_inner()),
                split_amount: Set(share.split_amount),
                owner_id: Set(plan.owner.into_inner()),
                amount: Set(plan.amount),
                title: Set(plan.title.clone()),
                description: Set(plan.description.clone()),
                created_at: Set(now),
            }
            .insert(txn)
            .await?;

            splits.push(split);
        }

        Ok(ExpenseWithSplits { expense, splits })
    }

    /// Deletes an expense with its ledger and split rows.
    ///
    /// Returns `false` if no such expense exists.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::Persistence` if the database fails; nothing is
    /// deleted in that case.
    pub async fn delete_expense(&self, id: ExpenseId) -> Result<bool, ExpenseError> {
        let txn = self.db.begin().await.map_err(persistence)?;
        let expense_id = id.into_inner();

        balance_sheets::Entity::delete_many()
            .filter(balance_sheets::Column::ExpenseId.eq(expense_id))
            .exec(&txn)
            .await
            .map_err(persistence)?;
        expense_splits::Entity::delete_many()
            .filter(expense_splits::Column::ExpenseId.eq(expense_id))
            .exec(&txn)
            .await
            .map_err(persistence)?;
        let deleted = expenses::Entity::delete_by_id(expense_id)
            .exec(&txn)
            .await
            .map_err(persistence)?;

        txn.commit().await.map_err(persistence)?;

        if deleted.rows_affected > 0 {
            info!(expense_id = %id, "Expense deleted");
        }
        Ok(deleted.rows_affected > 0)
    }

    /// Gets one expense with its splits.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_expense(&self, id: ExpenseId) -> Result<Option<ExpenseWithSplits>, DbErr> {
        let Some(expense) = expenses::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        Ok(self.attach_splits(vec![expense]).await?.pop())
    }

    /// Lists every expense, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_expenses(&self) -> Result<Vec<ExpenseWithSplits>, DbErr> {
        let expenses = expenses::Entity::find()
            .order_by_asc(expenses::Column::CreatedAt)
            .order_by_asc(expenses::Column::Id)
            .all(&self.db)
            .await?;

        self.attach_splits(expenses).await
    }

    /// Lists expenses paid by `owner`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_owner(&self, owner: UserId) -> Result<Vec<ExpenseWithSplits>, DbErr> {
        let expenses = expenses::Entity::find()
            .filter(expenses::Column::OwnerId.eq(owner.into_inner()))
            .order_by_asc(expenses::Column::CreatedAt)
            .order_by_asc(expenses::Column::Id)
            .all(&self.db)
            .await?;

        self.attach_splits(expenses).await
    }

    async fn attach_splits(
        &self,
        expenses: Vec<expenses::Model>,
    ) -> Result<Vec<ExpenseWithSplits>, DbErr> {
        if expenses.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<_> = expenses.iter().map(|e| e.id).collect();
        let mut by_expense: HashMap<_, Vec<expense_splits::Model>> = HashMap::new();
        for split in expense_splits::Entity::find()
            .filter(expense_splits::Column::ExpenseId.is_in(ids))
            .order_by_asc(expense_splits::Column::CreatedAt)
            .order_by_asc(expense_splits::Column::Id)
            .all(&self.db)
            .await?
        {
            by_expense.entry(split.expense_id).or_default().push(split);
        }

        Ok(expenses
            .into_iter()
            .map(|expense| ExpenseWithSplits {
                splits: by_expense.remove(&expense.id).unwrap_or_default(),
                expense,
            })
            .collect())
    }
}

fn persistence(err: DbErr) -> ExpenseError {
    ExpenseError::Persistence(err.to_string())
}
