//! Balance sheet CSV downloads.

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::error;

use crate::AppState;
use crate::middleware::auth::AuthUser;
use crate::response::internal_error;
use splitledger_core::export::{ExportScope, LedgerRow, render_csv};
use splitledger_db::BalanceSheetRepository;

/// Creates the balance sheet router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/balance-sheet", get(download_own))
        .route("/balance-sheet/overall", get(download_overall))
}

fn csv_attachment(scope: ExportScope, rows: &[LedgerRow]) -> Response {
    match render_csv(scope, rows) {
        Ok(body) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", scope.filename()),
                ),
            ],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render balance sheet");
            internal_error()
        }
    }
}

/// GET /balance-sheet - The caller's ledger rows.
async fn download_own(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = BalanceSheetRepository::new((*state.db).clone());

    match repo.list_for_user(auth.user_id()).await {
        Ok(rows) => csv_attachment(ExportScope::Participant, &rows),
        Err(e) => {
            error!(error = %e, "Failed to load balance sheet");
            internal_error()
        }
    }
}

/// GET /balance-sheet/overall - Every ledger row.
async fn download_overall(State(state): State<AppState>, _auth: AuthUser) -> impl IntoResponse {
    let repo = BalanceSheetRepository::new((*state.db).clone());

    match repo.list_all().await {
        Ok(rows) => csv_attachment(ExportScope::Overall, &rows),
        Err(e) => {
            error!(error = %e, "Failed to load overall balance sheet");
            internal_error()
        }
    }
}
