use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get};
use axum::{Json, Router};
use sea_orm::SqlErr;
use serde::Deserialize;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::dto::{FavoriteResponse, MessageResponse};
use crate::error::AppError;
use crate::extract::{IdPath, ValidatedJson};
use crate::state::AppState;
use crate::storage::{favorites, mobiles};

/// Favorite routes, nested under `/api/favorites`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_favorites).post(add_favorite))
        .route("/{mobile_id}", delete(remove_favorite))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct AddFavoriteRequest {
    #[validate(range(min = 1, message = "mobileId must be a positive id"))]
    mobile_id: i32,
}

/// `POST /api/favorites` — Favorite a listing. Each listing can be favorited once.
async fn add_favorite(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(req): ValidatedJson<AddFavoriteRequest>,
) -> Result<impl IntoResponse, AppError> {
    if mobiles::find_mobile(&state.db, req.mobile_id).await?.is_none() {
        return Err(AppError::NotFound("Mobile not found".to_string()));
    }
    if favorites::find_favorite(&state.db, &user.id, req.mobile_id)
        .await?
        .is_some()
    {
        return Err(already_favorited());
    }

    let favorite = favorites::add_favorite(&state.db, &user.id, req.mobile_id)
        .await
        .map_err(|e| match e.sql_err() {
            // Lost a race with an identical request.
            Some(SqlErr::UniqueConstraintViolation(_)) => already_favorited(),
            _ => AppError::from(e),
        })?;

    Ok((StatusCode::CREATED, Json(FavoriteResponse::from(favorite))))
}

/// `DELETE /api/favorites/{mobile_id}`
async fn remove_favorite(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    IdPath(mobile_id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    if !favorites::remove_favorite(&state.db, &user.id, mobile_id).await? {
        return Err(AppError::NotFound("Favorite not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Removed from favorites")))
}

/// `GET /api/favorites` — The caller's favorites with listing and seller.
async fn list_favorites(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let rows = favorites::list_favorites(&state.db, &user.id).await?;

    Ok(Json(
        rows.into_iter()
            .map(FavoriteResponse::from)
            .collect::<Vec<_>>(),
    ))
}

fn already_favorited() -> AppError {
    AppError::Conflict("Listing is already in favorites".to_string())
}
