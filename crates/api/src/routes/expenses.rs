//! Expense routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use crate::middleware::auth::AuthUser;
use crate::response::{error_response, internal_error, map_expense_error};
use splitledger_core::expense::{CreateExpenseInput, ExactShare, PercentageShare, SplitMethod};
use splitledger_core::user::UserDirectory;
use splitledger_db::{ExpenseRepository, ExpenseWithSplits, UserRepository};
use splitledger_shared::types::UserId;

/// Routes that act for the authenticated caller.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", post(create_expense))
        .route("/users/me/expenses", get(list_my_expenses))
}

/// Read-only routes.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses))
        .route("/users/{user_id}/expenses", get(list_user_expenses))
}

/// Request body for creating an expense.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    /// Total amount.
    pub amount: Decimal,
    /// Short label.
    pub title: String,
    /// Free text.
    #[serde(default)]
    pub description: String,
    /// Split method.
    pub split_method: SplitMethod,
    /// Shares for exact splits.
    #[serde(default)]
    pub exact_splits: Option<Vec<ExactShare>>,
    /// Shares for percentage splits.
    #[serde(default)]
    pub percentage_splits: Option<Vec<PercentageShare>>,
}

impl CreateExpenseRequest {
    fn into_input(self, owner: UserId) -> CreateExpenseInput {
        CreateExpenseInput {
            owner,
            amount: self.amount,
            title: self.title,
            description: self.description,
            split_method: self.split_method,
            exact_splits: self.exact_splits.unwrap_or_default(),
            percentage_splits: self.percentage_splits.unwrap_or_default(),
        }
    }
}

/// One participant's share in a response.
#[derive(Debug, Serialize)]
pub struct SplitResponse {
    /// Participant.
    pub user: Uuid,
    /// Amount owed.
    pub split_amount: Decimal,
}

/// Expense with its splits.
#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    /// Expense ID.
    pub id: Uuid,
    /// Payer.
    pub owner: Uuid,
    /// Total amount.
    pub amount: Decimal,
    /// Short label.
    pub title: String,
    /// Free text.
    pub description: String,
    /// Split method.
    pub split_method: SplitMethod,
    /// Creation time.
    pub created_at: DateTime<FixedOffset>,
    /// Participants' shares.
    pub splits: Vec<SplitResponse>,
}

impl From<ExpenseWithSplits> for ExpenseResponse {
    fn from(value: ExpenseWithSplits) -> Self {
        let ExpenseWithSplits { expense, splits } = value;
        Self {
            id: expense.id,
            owner: expense.owner_id,
            amount: expense.amount,
            title: expense.title,
            description: expense.description,
            split_method: expense.split_method.into(),
            created_at: expense.created_at,
            splits: splits
                .into_iter()
                .map(|s| SplitResponse {
                    user: s.user_id,
                    split_amount: s.split_amount,
                })
                .collect(),
        }
    }
}

fn expense_list(expenses: Vec<ExpenseWithSplits>) -> Json<Vec<ExpenseResponse>> {
    Json(expenses.into_iter().map(ExpenseResponse::from).collect())
}

/// POST /expenses - Record an expense paid by the caller.
async fn create_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateExpenseRequest>,
) -> impl IntoResponse {
    let repo = ExpenseRepository::new((*state.db).clone());

    match repo.create_expense(payload.into_input(auth.user_id())).await {
        Ok(created) => (StatusCode::CREATED, Json(ExpenseResponse::from(created))).into_response(),
        Err(e) => map_expense_error(&e),
    }
}

/// GET /expenses - List every expense.
async fn list_expenses(State(state): State<AppState>) -> impl IntoResponse {
    let repo = ExpenseRepository::new((*state.db).clone());

    match repo.list_expenses().await {
        Ok(expenses) => (StatusCode::OK, expense_list(expenses)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list expenses");
            internal_error()
        }
    }
}

/// GET /users/me/expenses - Expenses paid by the caller.
async fn list_my_expenses(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = ExpenseRepository::new((*state.db).clone());

    match repo.list_by_owner(auth.user_id()).await {
        Ok(expenses) => (StatusCode::OK, expense_list(expenses)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list caller expenses");
            internal_error()
        }
    }
}

/// GET /users/{user_id}/expenses - Expenses paid by a user.
async fn list_user_expenses(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> impl IntoResponse {
    let owner = UserId::from_uuid(user_id);

    let user_repo = UserRepository::new((*state.db).clone());
    match user_repo.directory().lookup_by_id(owner).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return error_response(StatusCode::NOT_FOUND, "not_found", "User not found");
        }
        Err(e) => {
            error!(error = %e, "Failed to look up user");
            return internal_error();
        }
    }

    let repo = ExpenseRepository::new((*state.db).clone());
    match repo.list_by_owner(owner).await {
        Ok(expenses) => (StatusCode::OK, expense_list(expenses)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list user expenses");
            internal_error()
        }
    }
}
