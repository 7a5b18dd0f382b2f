mod admin;
mod auth;
mod favorites;
mod health;
mod mobiles;
mod orders;
mod recharge;

use axum::Router;

use crate::state::AppState;

/// Build the complete application router.
///
/// Structure:
/// - `GET /health` — liveness check
/// - `/api/...` — marketplace, recharge and moderation endpoints
pub fn router() -> Router<AppState> {
    let api = Router::new()
        .merge(health::api_router())
        .nest("/auth", auth::router())
        .nest("/mobiles", mobiles::router())
        .nest("/user", mobiles::user_router())
        .nest("/recharge", recharge::router())
        .nest("/favorites", favorites::router())
        .nest("/orders", orders::router())
        .nest("/admin", admin::router());

    Router::new()
        .merge(health::root_router())
        .nest("/api", api)
}
