//! Token issuing: password login and refresh.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use tracing::{error, info};

use crate::AppState;
use crate::response::{error_response, internal_error};
use splitledger_core::auth::verify_password;
use splitledger_core::user::{UserDirectory, normalize_email};
use splitledger_db::UserRepository;
use splitledger_shared::JwtError;
use splitledger_shared::TokenKind;
use splitledger_shared::auth::{RefreshRequest, TokenRequest};
use splitledger_shared::types::UserId;

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/token", post(issue_token))
        .route("/auth/token/refresh", post(refresh_token))
}

fn invalid_credentials() -> axum::response::Response {
    error_response(
        StatusCode::UNAUTHORIZED,
        "invalid_credentials",
        "Invalid email or password",
    )
}

/// POST /auth/token - Exchange email and password for a token pair.
async fn issue_token(
    State(state): State<AppState>,
    Json(payload): Json<TokenRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());
    let email = normalize_email(&payload.email);

    let user = match user_repo.find_credentials(&email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(email = %email, "Token request for unknown email");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Database error during token request");
            return internal_error();
        }
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Token request with wrong password");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, user_id = %user.id, "Password verification error");
            return internal_error();
        }
    }

    match state.jwt_service.issue_pair(user.id) {
        Ok(pair) => {
            info!(user_id = %user.id, "Tokens issued");
            (StatusCode::OK, Json(pair)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to issue tokens");
            internal_error()
        }
    }
}

/// POST /auth/token/refresh - Exchange a refresh token for a new pair.
async fn refresh_token(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> impl IntoResponse {
    let claims = match state
        .jwt_service
        .validate_kind(&payload.refresh, TokenKind::Refresh)
    {
        Ok(c) => c,
        Err(JwtError::Expired) => {
            return error_response(
                StatusCode::UNAUTHORIZED,
                "token_expired",
                "Refresh token has expired",
            );
        }
        Err(_) => {
            return error_response(
                StatusCode::UNAUTHORIZED,
                "invalid_token",
                "Invalid refresh token",
            );
        }
    };

    // The account may have been removed since the token was issued.
    let user_repo = UserRepository::new((*state.db).clone());
    match user_repo
        .directory()
        .lookup_by_id(UserId::from_uuid(claims.user_id()))
        .await
    {
        Ok(Some(_)) => {}
        Ok(None) => {
            return error_response(
                StatusCode::UNAUTHORIZED,
                "invalid_token",
                "Invalid refresh token",
            );
        }
        Err(e) => {
            error!(error = %e, "Database error during token refresh");
            return internal_error();
        }
    }

    match state.jwt_service.issue_pair(claims.user_id()) {
        Ok(pair) => (StatusCode::OK, Json(pair)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to refresh tokens");
            internal_error()
        }
    }
}
