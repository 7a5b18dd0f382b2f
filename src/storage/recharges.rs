use rust_decimal::Decimal;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use serde_json::Value;

use crate::entities::{Operator, PaymentMethod, PlanType, RechargeStatus, recharge_transaction};

#[derive(Debug, Clone, PartialEq)]
pub struct NewRecharge {
    pub mobile_number: String,
    pub operator: Operator,
    pub plan_type: PlanType,
    pub amount: Decimal,
    pub plan_details: Option<Value>,
    pub payment_method: Option<PaymentMethod>,
}

/// Record a recharge attempt in the `pending` state.
///
/// # Errors
///
/// Returns [`DbErr`] if the insert fails (including a duplicate `transaction_id`).
pub async fn create_recharge_transaction(
    db: &DatabaseConnection,
    user_id: &str,
    transaction_id: &str,
    new: NewRecharge,
) -> Result<recharge_transaction::Model, DbErr> {
    let txn = recharge_transaction::ActiveModel {
        user_id: Set(user_id.to_string()),
        mobile_number: Set(new.mobile_number),
        operator: Set(new.operator.as_str().to_string()),
        plan_type: Set(new.plan_type.as_str().to_string()),
        amount: Set(super::round_money(new.amount)),
        plan_details: Set(new.plan_details),
        transaction_id: Set(transaction_id.to_string()),
        status: Set(RechargeStatus::Pending.as_str().to_string()),
        payment_method: Set(new.payment_method.map(|m| m.as_str().to_string())),
        created_at: Set(super::now()),
        ..Default::default()
    };

    txn.insert(db).await
}

/// Move a pending transaction to `status`.
///
/// Only pending rows are touched, so a settled transaction keeps its outcome.
/// Returns the row as stored afterwards, or `None` if it does not exist.
///
/// # Errors
///
/// Returns [`DbErr`] if a query fails.
pub async fn update_recharge_status(
    db: &DatabaseConnection,
    id: i32,
    status: RechargeStatus,
) -> Result<Option<recharge_transaction::Model>, DbErr> {
    recharge_transaction::Entity::update_many()
        .col_expr(
            recharge_transaction::Column::Status,
            Expr::value(status.as_str()),
        )
        .filter(recharge_transaction::Column::Id.eq(id))
        .filter(recharge_transaction::Column::Status.eq(RechargeStatus::Pending.as_str()))
        .exec(db)
        .await?;

    recharge_transaction::Entity::find_by_id(id).one(db).await
}

/// A user's recharge history, newest first.
///
/// # Errors
///
/// Returns [`DbErr`] if the query fails.
pub async fn list_recharge_transactions(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<recharge_transaction::Model>, DbErr> {
    recharge_transaction::Entity::find()
        .filter(recharge_transaction::Column::UserId.eq(user_id))
        .order_by_desc(recharge_transaction::Column::CreatedAt)
        .order_by_desc(recharge_transaction::Column::Id)
        .all(db)
        .await
}

/// # Errors
///
/// Returns [`DbErr`] if the query fails.
pub async fn get_recharge_transaction(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<recharge_transaction::Model>, DbErr> {
    recharge_transaction::Entity::find_by_id(id).one(db).await
}
