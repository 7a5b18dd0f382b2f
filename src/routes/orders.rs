use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::dto::OrderResponse;
use crate::entities::{MobileStatus, PaymentMethod};
use crate::error::AppError;
use crate::extract::ValidatedJson;
use crate::state::AppState;
use crate::storage::{NewOrder, OrderSide, mobiles, orders};
use crate::utils::money::validate_non_negative;

/// Order routes, nested under `/api/orders`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_orders).post(create_order))
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateOrderRequest {
    mobile_id: i32,
    /// Defaults to the listing price.
    #[validate(custom(function = "validate_non_negative"))]
    amount: Option<Decimal>,
    payment_method: Option<PaymentMethod>,
    #[validate(nested)]
    shipping_address: Option<ShippingAddress>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct ShippingAddress {
    #[validate(length(min = 1, max = 100, message = "Full name is required"))]
    full_name: String,
    #[validate(length(min = 1, max = 200, message = "Address line is required"))]
    line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    line2: Option<String>,
    #[validate(length(min = 1, max = 100, message = "City is required"))]
    city: String,
    #[validate(length(min = 1, max = 100, message = "State is required"))]
    state: String,
    #[validate(length(min = 3, max = 12, message = "Postal code must be 3-12 characters"))]
    postal_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrdersQuery {
    #[serde(rename = "type")]
    side: Option<String>,
}

impl OrdersQuery {
    fn side(&self) -> Result<OrderSide, AppError> {
        match self.side.as_deref().map(str::trim) {
            None | Some("") => Ok(OrderSide::Any),
            Some("buyer") => Ok(OrderSide::Buyer),
            Some("seller") => Ok(OrderSide::Seller),
            Some(other) => Err(AppError::invalid_field(
                "Invalid query parameters",
                "type",
                format!("unknown order side `{other}`, expected buyer or seller"),
            )),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// `POST /api/orders` — Place an order for an approved listing. The seller comes from the listing.
async fn create_order(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(req): ValidatedJson<CreateOrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    let listing = mobiles::find_mobile(&state.db, req.mobile_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Mobile not found".to_string()))?;

    if listing.seller_id == user.id {
        return Err(AppError::BadRequest(
            "You cannot order your own listing".to_string(),
        ));
    }
    if listing.status != MobileStatus::Approved.as_str() {
        return Err(AppError::Conflict(format!(
            "Mobile is {} and not available for purchase",
            listing.status
        )));
    }

    let shipping_address = req
        .shipping_address
        .map(serde_json::to_value)
        .transpose()?;

    let order = orders::create_order(
        &state.db,
        &user.id,
        NewOrder {
            mobile_id: listing.id,
            seller_id: listing.seller_id,
            amount: req.amount.unwrap_or(listing.price),
            payment_method: req.payment_method,
            shipping_address,
        },
    )
    .await?;

    tracing::info!(
        order_id = order.id,
        mobile_id = order.mobile_id,
        buyer_id = %order.buyer_id,
        seller_id = %order.seller_id,
        amount = %order.amount,
        "order placed"
    );

    Ok((StatusCode::CREATED, Json(OrderResponse::from(order))))
}

/// `GET /api/orders?type=buyer|seller` — The caller's orders; both sides when `type` is absent.
async fn list_orders(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<OrdersQuery>,
) -> Result<impl IntoResponse, AppError> {
    let side = query.side()?;
    let rows = orders::list_orders(&state.db, &user.id, side).await?;

    Ok(Json(
        rows.into_iter()
            .map(OrderResponse::from)
            .collect::<Vec<_>>(),
    ))
}
