//! Balance sheet reads for export.

use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use splitledger_core::export::LedgerRow;
use splitledger_shared::types::{BalanceSheetId, ExpenseId, UserId};

use crate::entities::balance_sheets;

impl From<balance_sheets::Model> for LedgerRow {
    fn from(model: balance_sheets::Model) -> Self {
        Self {
            id: BalanceSheetId::from_uuid(model.id),
            expense_id: ExpenseId::from_uuid(model.expense_id),
            user: UserId::from_uuid(model.user_id),
            split_amount: model.split_amount,
            owner: UserId::from_uuid(model.owner_id),
            amount: model.amount,
            title: model.title,
            description: model.description,
        }
    }
}

/// Read access to ledger rows.
#[derive(Debug, Clone)]
pub struct BalanceSheetRepository {
    db: DatabaseConnection,
}

impl BalanceSheetRepository {
    /// Creates a new balance sheet repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Ledger rows where `user` is the participant, in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_user(&self, user: UserId) -> Result<Vec<LedgerRow>, DbErr> {
        let rows = balance_sheets::Entity::find()
            .filter(balance_sheets::Column::UserId.eq(user.into_inner()))
            .order_by_asc(balance_sheets::Column::CreatedAt)
            .order_by_asc(balance_sheets::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(LedgerRow::from).collect())
    }

    /// Every ledger row, in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<LedgerRow>, DbErr> {
        let rows = balance_sheets::Entity::find()
            .order_by_asc(balance_sheets::Column::CreatedAt)
            .order_by_asc(balance_sheets::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(LedgerRow::from).collect())
    }

    /// Ledger rows of one expense.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_expense(&self, expense: ExpenseId) -> Result<Vec<LedgerRow>, DbErr> {
        let rows = balance_sheets::Entity::find()
            .filter(balance_sheets::Column::ExpenseId.eq(expense.into_inner()))
            .order_by_asc(balance_sheets::Column::CreatedAt)
            .order_by_asc(balance_sheets::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(LedgerRow::from).collect())
    }
}
