use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::auth::middleware::AdminUser;
use crate::dto::MobileResponse;
use crate::entities::MobileStatus;
use crate::error::AppError;
use crate::extract::IdPath;
use crate::state::AppState;
use crate::storage::{MobileChanges, mobiles, orders, users};

// ─────────────────────────────────────────────────────────────────────────────
// Router
// ─────────────────────────────────────────────────────────────────────────────

/// Moderation routes, nested under `/api/admin`. Every handler requires the admin role.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pending-mobiles", get(pending_mobiles))
        .route("/stats", get(stats))
        .route("/mobiles/{id}/approve", put(approve_mobile))
        .route("/mobiles/{id}/reject", put(reject_mobile))
}

// ─────────────────────────────────────────────────────────────────────────────
// DTOs
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AdminStatsResponse {
    users_count: u64,
    /// Sum of order amounts with a completed payment
    #[serde(with = "rust_decimal::serde::float")]
    total_revenue: Decimal,
    pending_approvals_count: u64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// `GET /api/admin/pending-mobiles`
async fn pending_mobiles(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let rows = mobiles::list_pending(&state.db).await?;

    Ok(Json(
        rows.into_iter()
            .map(MobileResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// `GET /api/admin/stats`
async fn stats(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let users_count = users::count_users(&state.db).await?;
    let total_revenue = orders::sum_revenue(&state.db).await?;
    let pending_approvals_count =
        mobiles::count_with_status(&state.db, MobileStatus::Pending).await?;

    Ok(Json(AdminStatsResponse {
        users_count,
        total_revenue,
        pending_approvals_count,
    }))
}

/// `PUT /api/admin/mobiles/{id}/approve`
async fn approve_mobile(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    moderate(&state, &admin.id, id, MobileStatus::Approved).await
}

/// `PUT /api/admin/mobiles/{id}/reject`
async fn reject_mobile(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    moderate(&state, &admin.id, id, MobileStatus::Rejected).await
}

/// Move a pending listing to `next`. Anything but `pending` is a 409.
async fn moderate(
    state: &AppState,
    admin_id: &str,
    id: i32,
    next: MobileStatus,
) -> Result<Json<MobileResponse>, AppError> {
    let listing = mobiles::find_mobile(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Mobile not found".to_string()))?;

    let current: MobileStatus = listing.status.parse()?;
    if !current.can_transition_to(next) {
        return Err(AppError::Conflict(format!(
            "Listing is {current}, only pending listings can be reviewed"
        )));
    }

    let mobile = mobiles::update_mobile(&state.db, id, MobileChanges::status(next))
        .await?
        .ok_or_else(|| AppError::NotFound("Mobile not found".to_string()))?;

    tracing::info!(mobile_id = id, admin_id, status = %next, "listing reviewed");

    Ok(Json(MobileResponse::from(mobile)))
}
