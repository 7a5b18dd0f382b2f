use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::auth::middleware::AuthUser;
use crate::dto::UserResponse;

/// Identity routes, nested under `/api/auth`.
pub fn router() -> Router<crate::state::AppState> {
    Router::new().route("/user", get(current_user))
}

/// `GET /api/auth/user` — Profile of the bearer of the identity token.
async fn current_user(AuthUser(user): AuthUser) -> impl IntoResponse {
    Json(UserResponse::from(user))
}
