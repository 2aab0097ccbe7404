//! User registration and lookup routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use crate::response::{error_response, internal_error, map_registration_error};
use splitledger_core::user::{NewUser, User, UserDirectory, normalize_email};
use splitledger_db::UserRepository;

/// Creates the users router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(register))
        .route("/users", get(list_users))
        .route("/users/by-email", post(find_by_email))
}

/// Public view of a user.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Mobile number.
    pub mobile: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into_inner(),
            email: user.email,
            name: user.name,
            mobile: user.mobile,
            created_at: user.created_at,
        }
    }
}

/// Body of a lookup by email.
#[derive(Debug, Deserialize)]
pub struct EmailLookupRequest {
    /// Address to look up.
    #[serde(default)]
    pub email: Option<String>,
}

/// POST /users/register - Create an account.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.register(payload).await {
        Ok(user) => (StatusCode::CREATED, Json(UserResponse::from(User::from(user)))).into_response(),
        Err(e) => map_registration_error(&e),
    }
}

/// GET /users - List every user.
async fn list_users(State(state): State<AppState>) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.directory().list_all().await {
        Ok(users) => {
            let body: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list users");
            internal_error()
        }
    }
}

/// POST /users/by-email - Look up a user by email address.
async fn find_by_email(
    State(state): State<AppState>,
    Json(payload): Json<EmailLookupRequest>,
) -> impl IntoResponse {
    let Some(email) = payload
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
    else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "email_required",
            "Email parameter is required",
        );
    };

    let user_repo = UserRepository::new((*state.db).clone());
    match user_repo
        .directory()
        .lookup_by_email(&normalize_email(email))
        .await
    {
        Ok(Some(user)) => (StatusCode::OK, Json(UserResponse::from(user))).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "not_found", "User not found"),
        Err(e) => {
            error!(error = %e, "Failed to look up user by email");
            internal_error()
        }
    }
}
