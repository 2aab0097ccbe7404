//! Error responses shared by the route handlers.
//!
//! Every error body has the shape `{"error": <code>, "message": <text>}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use splitledger_core::expense::ExpenseError;
use splitledger_core::user::RegistrationError;
use tracing::{error, warn};

/// Builds an error response.
pub fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "error": error,
            "message": message.into()
        })),
    )
        .into_response()
}

/// Generic 500 with no internal detail.
pub fn internal_error() -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "An error occurred",
    )
}

/// Maps an expense failure to a response.
///
/// Validation errors carry their message; storage failures do not.
pub fn map_expense_error(e: &ExpenseError) -> Response {
    let code = e.error_code().to_ascii_lowercase();
    let status =
        StatusCode::from_u16(e.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    match e {
        ExpenseError::Persistence(_) => {
            error!(error = %e, "Failed to record expense");
            error_response(status, &code, "The expense could not be recorded")
        }
        _ => {
            warn!(error_code = %code, error = %e, "Expense rejected");
            error_response(status, &code, e.to_string())
        }
    }
}

/// Maps a registration failure to a response.
pub fn map_registration_error(e: &RegistrationError) -> Response {
    let status =
        StatusCode::from_u16(e.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        error!(error = %e, "Failed to register user");
        return internal_error();
    }

    warn!(error_code = e.error_code(), "Registration rejected");
    error_response(status, &e.error_code().to_ascii_lowercase(), e.to_string())
}
