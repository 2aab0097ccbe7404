//! Initial schema: users, expenses, expense splits and balance sheet rows.
//!
//! Built with the SeaQuery schema builder so the same migration runs on
//! Postgres and SQLite.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Email).string_len(254).not_null().unique_key())
                    .col(ColumnDef::new(Users::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Users::Mobile).string_len(17).not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Expenses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Expenses::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(Expenses::Amount).decimal_len(10, 2).not_null())
                    .col(ColumnDef::new(Expenses::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Expenses::Description).text().not_null())
                    .col(ColumnDef::new(Expenses::SplitMethod).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Expenses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expenses_owner")
                            .from(Expenses::Table, Expenses::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ExpenseSplits::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ExpenseSplits::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(ExpenseSplits::ExpenseId).uuid().not_null())
                    .col(ColumnDef::new(ExpenseSplits::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(ExpenseSplits::SplitAmount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExpenseSplits::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expense_splits_expense")
                            .from(ExpenseSplits::Table, ExpenseSplits::ExpenseId)
                            .to(Expenses::Table, Expenses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expense_splits_user")
                            .from(ExpenseSplits::Table, ExpenseSplits::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BalanceSheets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BalanceSheets::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(BalanceSheets::ExpenseId).uuid().not_null())
                    .col(ColumnDef::new(BalanceSheets::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(BalanceSheets::SplitAmount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(BalanceSheets::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(BalanceSheets::Amount).decimal_len(10, 2).not_null())
                    .col(ColumnDef::new(BalanceSheets::Title).string_len(255).not_null())
                    .col(ColumnDef::new(BalanceSheets::Description).text().not_null())
                    .col(
                        ColumnDef::new(BalanceSheets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_balance_sheets_expense")
                            .from(BalanceSheets::Table, BalanceSheets::ExpenseId)
                            .to(Expenses::Table, Expenses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_balance_sheets_user")
                            .from(BalanceSheets::Table, BalanceSheets::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_balance_sheets_owner")
                            .from(BalanceSheets::Table, BalanceSheets::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One split and one ledger row per participant per expense.
        manager
            .create_index(
                Index::create()
                    .name("uq_expense_splits_participant")
                    .table(ExpenseSplits::Table)
                    .col(ExpenseSplits::ExpenseId)
                    .col(ExpenseSplits::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_balance_sheets_participant")
                    .table(BalanceSheets::Table)
                    .col(BalanceSheets::ExpenseId)
                    .col(BalanceSheets::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_expenses_owner")
                    .table(Expenses::Table)
                    .col(Expenses::OwnerId)
                    .col(Expenses::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_balance_sheets_user")
                    .table(BalanceSheets::Table)
                    .col(BalanceSheets::UserId)
                    .col(BalanceSheets::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BalanceSheets::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExpenseSplits::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    Name,
    Mobile,
    PasswordHash,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Expenses {
    Table,
    Id,
    OwnerId,
    Amount,
    Title,
    Description,
    SplitMethod,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ExpenseSplits {
    Table,
    Id,
    ExpenseId,
    UserId,
    SplitAmount,
    CreatedAt,
}

#[derive(DeriveIden)]
enum BalanceSheets {
    Table,
    Id,
    ExpenseId,
    UserId,
    SplitAmount,
    OwnerId,
    Amount,
    Title,
    Description,
    CreatedAt,
}
