use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use validator::{Validate, ValidationError};

use crate::auth::middleware::AuthUser;
use crate::dto::RechargeResponse;
use crate::entities::{Operator, PaymentMethod, PlanType};
use crate::error::AppError;
use crate::extract::{IdPath, ValidatedJson};
use crate::state::AppState;
use crate::storage::{NewRecharge, recharges};
use crate::utils::transaction_id::generate_transaction_id;

// ─────────────────────────────────────────────────────────────────────────────
// Router
// ─────────────────────────────────────────────────────────────────────────────

/// Recharge routes, nested under `/api/recharge`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_recharge))
        .route("/history", get(recharge_history))
        .route("/{id}", get(get_recharge))
}

// ─────────────────────────────────────────────────────────────────────────────
// DTOs
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateRechargeRequest {
    #[validate(custom(function = "validate_mobile_number"))]
    mobile_number: String,
    /// Detected from the number prefix when omitted.
    operator: Option<Operator>,
    plan_type: PlanType,
    #[validate(custom(function = "validate_recharge_amount"))]
    amount: Decimal,
    plan_details: Option<Map<String, JsonValue>>,
    payment_method: Option<PaymentMethod>,
}

/// The ten-digit national number, accepting an optional `+91` / `91` country
/// prefix and embedded spaces.
fn national_number(value: &str) -> Option<String> {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = compact.strip_prefix('+').unwrap_or(compact.as_str());
    let national = if digits.len() == 12 {
        digits.strip_prefix("91").unwrap_or(digits)
    } else {
        digits
    };

    (national.len() == 10 && national.bytes().all(|b| b.is_ascii_digit()))
        .then(|| national.to_string())
}

fn validate_mobile_number(value: &str) -> Result<(), ValidationError> {
    national_number(value).map(|_| ()).ok_or_else(|| {
        ValidationError::new("mobile_number").with_message("Enter a 10-digit mobile number".into())
    })
}

fn validate_recharge_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount > Decimal::ZERO && *amount <= Decimal::new(100_000, 0) {
        Ok(())
    } else {
        Err(ValidationError::new("range")
            .with_message("Amount must be greater than 0 and at most 100000".into()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// `POST /api/recharge` — Record a recharge and settle it through the payment gateway.
///
/// The stored row carries the gateway's verdict, so a declined payment is still a 201
/// with status `failed`.
async fn create_recharge(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(req): ValidatedJson<CreateRechargeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mobile_number = national_number(&req.mobile_number).ok_or_else(|| {
        AppError::invalid_field(
            "Invalid request body",
            "mobileNumber",
            "Enter a 10-digit mobile number",
        )
    })?;
    let operator = match req.operator {
        Some(operator) => operator,
        None => Operator::detect(&mobile_number).ok_or_else(|| {
            AppError::invalid_field(
                "Invalid request body",
                "operator",
                "Operator could not be detected from the mobile number",
            )
        })?,
    };

    let transaction_id = generate_transaction_id();
    let txn = recharges::create_recharge_transaction(
        &state.db,
        &user.id,
        &transaction_id,
        NewRecharge {
            mobile_number,
            operator,
            plan_type: req.plan_type,
            amount: req.amount,
            plan_details: req.plan_details.map(JsonValue::Object),
            payment_method: req.payment_method,
        },
    )
    .await?;

    let outcome = state.payments.settle(&txn).await.map_err(|e| {
        e.context(format!("payment gateway `{}` failed", state.payments.name()))
    })?;

    let txn = recharges::update_recharge_status(&state.db, txn.id, outcome)
        .await?
        .ok_or_else(|| AppError::NotFound("Recharge transaction not found".to_string()))?;

    tracing::info!(
        transaction_id = %txn.transaction_id,
        user_id = %user.id,
        operator = %txn.operator,
        amount = %txn.amount,
        status = %txn.status,
        gateway = state.payments.name(),
        "recharge settled"
    );

    Ok((StatusCode::CREATED, Json(RechargeResponse::from(txn))))
}

/// `GET /api/recharge/history` — The caller's recharges, newest first.
async fn recharge_history(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let txns = recharges::list_recharge_transactions(&state.db, &user.id).await?;

    Ok(Json(
        txns.into_iter()
            .map(RechargeResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// `GET /api/recharge/{id}` — One of the caller's recharges.
async fn get_recharge(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let txn = recharges::get_recharge_transaction(&state.db, id)
        .await?
        .filter(|t| t.user_id == user.id)
        .ok_or_else(|| AppError::NotFound("Recharge transaction not found".to_string()))?;

    Ok(Json(RechargeResponse::from(txn)))
}
