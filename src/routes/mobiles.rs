use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::auth::policy;
use crate::dto::{MessageResponse, MobileResponse};
use crate::entities::{Condition, MobileStatus};
use crate::error::AppError;
use crate::extract::{IdPath, ValidatedJson};
use crate::state::AppState;
use crate::storage::{MobileChanges, MobileFilter, NewMobile, mobiles, orders};
use crate::utils::money::validate_non_negative;

/// Listing routes, nested under `/api/mobiles`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_mobiles).post(create_mobile))
        .route(
            "/{id}",
            get(get_mobile).put(update_mobile).delete(delete_mobile),
        )
}

/// Caller-scoped listing routes, nested under `/api/user`.
pub fn user_router() -> Router<AppState> {
    Router::new().route("/mobiles", get(list_my_mobiles))
}

// ============================================================================
// Request Types
// ============================================================================

/// Query string of `GET /api/mobiles`. Empty values count as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MobilesQuery {
    brand: Option<String>,
    condition: Option<String>,
    min_price: Option<String>,
    max_price: Option<String>,
    search: Option<String>,
    status: Option<String>,
    seller_id: Option<String>,
}

impl MobilesQuery {
    /// Parse into a filter. Listings default to `approved` when no status is asked for.
    fn into_filter(self) -> Result<MobileFilter, AppError> {
        let condition = non_empty(self.condition)
            .map(|c| c.parse::<Condition>())
            .transpose()
            .map_err(|e| invalid_query("condition", e.to_string()))?;
        let status = non_empty(self.status)
            .map(|s| s.parse::<MobileStatus>())
            .transpose()
            .map_err(|e| invalid_query("status", e.to_string()))?
            .unwrap_or(MobileStatus::Approved);

        Ok(MobileFilter {
            brand: non_empty(self.brand),
            condition,
            min_price: parse_price("minPrice", self.min_price)?,
            max_price: parse_price("maxPrice", self.max_price)?,
            search: non_empty(self.search),
            status: Some(status),
            seller_id: non_empty(self.seller_id),
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateMobileRequest {
    #[validate(length(min = 1, max = 100, message = "Brand must be 1-100 characters"))]
    brand: String,
    #[validate(length(min = 1, max = 100, message = "Model must be 1-100 characters"))]
    model: String,
    storage: Option<String>,
    color: Option<String>,
    condition: Condition,
    #[validate(custom(function = "validate_non_negative"))]
    price: Decimal,
    #[validate(length(max = 5000, message = "Description is too long"))]
    description: Option<String>,
    #[validate(length(min = 1, max = 20, message = "Provide between 1 and 20 images"))]
    images: Vec<String>,
    #[serde(default)]
    is_new: bool,
    location: Option<String>,
    #[serde(default)]
    specifications: BTreeMap<String, String>,
    #[serde(default)]
    accessories: Vec<String>,
}

impl From<CreateMobileRequest> for NewMobile {
    fn from(req: CreateMobileRequest) -> Self {
        Self {
            brand: req.brand.trim().to_string(),
            model: req.model.trim().to_string(),
            storage: req.storage,
            color: req.color,
            condition: req.condition,
            price: req.price,
            description: req.description,
            images: req.images,
            is_new: req.is_new,
            location: req.location,
            specifications: req.specifications,
            accessories: req.accessories,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct UpdateMobileRequest {
    #[validate(length(min = 1, max = 100, message = "Brand must be 1-100 characters"))]
    brand: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Model must be 1-100 characters"))]
    model: Option<String>,
    storage: Option<String>,
    color: Option<String>,
    condition: Option<Condition>,
    #[validate(custom(function = "validate_non_negative"))]
    price: Option<Decimal>,
    #[validate(length(max = 5000, message = "Description is too long"))]
    description: Option<String>,
    #[validate(length(min = 1, max = 20, message = "Provide between 1 and 20 images"))]
    images: Option<Vec<String>>,
    is_new: Option<bool>,
    location: Option<String>,
    specifications: Option<BTreeMap<String, String>>,
    accessories: Option<Vec<String>>,
    status: Option<MobileStatus>,
}

impl From<UpdateMobileRequest> for MobileChanges {
    fn from(req: UpdateMobileRequest) -> Self {
        Self {
            brand: req.brand,
            model: req.model,
            storage: req.storage,
            color: req.color,
            condition: req.condition,
            price: req.price,
            description: req.description,
            images: req.images,
            is_new: req.is_new,
            location: req.location,
            specifications: req.specifications,
            accessories: req.accessories,
            status: req.status,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /api/mobiles` — Search listings.
async fn list_mobiles(
    State(state): State<AppState>,
    Query(query): Query<MobilesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = query.into_filter()?;
    let rows = mobiles::list_mobiles(&state.db, &filter).await?;

    Ok(Json(
        rows.into_iter()
            .map(MobileResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// `GET /api/mobiles/{id}` — Listing detail with seller.
async fn get_mobile(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let row = mobiles::get_mobile(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Mobile not found".to_string()))?;

    Ok(Json(MobileResponse::from(row)))
}

/// `POST /api/mobiles` — List a phone for sale. It waits for review as `pending`.
async fn create_mobile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(req): ValidatedJson<CreateMobileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mobile = mobiles::create_mobile(&state.db, &user.id, req.into()).await?;

    tracing::info!(
        mobile_id = mobile.id,
        seller_id = %user.id,
        brand = %mobile.brand,
        model = %mobile.model,
        "listing created"
    );

    Ok((StatusCode::CREATED, Json(MobileResponse::from(mobile))))
}

/// `PUT /api/mobiles/{id}` — Update a listing (seller or admin).
async fn update_mobile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(req): ValidatedJson<UpdateMobileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let listing = find_listing(&state, id).await?;
    policy::ensure_can_manage_listing(&user, &listing, "update")?;

    if let Some(next) = req.status {
        policy::ensure_can_moderate(&user)?;
        let current: MobileStatus = listing.status.parse()?;
        if next != current && !current.can_transition_to(next) {
            return Err(AppError::Conflict(format!(
                "Cannot move a {current} listing to {next}"
            )));
        }
    }

    let mobile = mobiles::update_mobile(&state.db, id, req.into())
        .await?
        .ok_or_else(|| AppError::NotFound("Mobile not found".to_string()))?;

    Ok(Json(MobileResponse::from(mobile)))
}

/// `DELETE /api/mobiles/{id}` — Remove a listing (seller or admin).
async fn delete_mobile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let listing = find_listing(&state, id).await?;
    policy::ensure_can_manage_listing(&user, &listing, "delete")?;

    if orders::count_orders_for_mobile(&state.db, id).await? > 0 {
        return Err(AppError::Conflict(
            "Listing has orders and cannot be deleted".to_string(),
        ));
    }

    if !mobiles::delete_mobile(&state.db, id).await? {
        return Err(AppError::NotFound("Mobile not found".to_string()));
    }

    tracing::info!(mobile_id = id, by = %user.id, "listing deleted");

    Ok(Json(MessageResponse::new("Mobile deleted successfully")))
}

/// `GET /api/user/mobiles` — The caller's own listings in every status.
async fn list_my_mobiles(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let filter = MobileFilter {
        seller_id: Some(user.id),
        ..MobileFilter::default()
    };
    let rows = mobiles::list_mobiles(&state.db, &filter).await?;

    Ok(Json(
        rows.into_iter()
            .map(MobileResponse::from)
            .collect::<Vec<_>>(),
    ))
}

// ============================================================================
// Helpers
// ============================================================================

async fn find_listing(state: &AppState, id: i32) -> Result<crate::entities::mobile::Model, AppError> {
    mobiles::find_mobile(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Mobile not found".to_string()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_price(field: &str, raw: Option<String>) -> Result<Option<Decimal>, AppError> {
    non_empty(raw)
        .map(|v| {
            v.parse::<Decimal>()
                .map_err(|_| invalid_query(field, format!("`{v}` is not a number")))
        })
        .transpose()
}

fn invalid_query(field: &str, reason: String) -> AppError {
    AppError::invalid_field("Invalid query parameters", field, reason)
}
