use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::entities::recharge_transaction;
use crate::storage::round_money;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RechargeResponse {
    pub id: i32,
    pub user_id: String,
    pub mobile_number: String,
    pub operator: String,
    pub plan_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub plan_details: Option<JsonValue>,
    pub transaction_id: String,
    pub status: String,
    pub payment_method: Option<String>,
    pub created_at: String,
}

impl From<recharge_transaction::Model> for RechargeResponse {
    fn from(t: recharge_transaction::Model) -> Self {
        Self {
            id: t.id,
            user_id: t.user_id,
            mobile_number: t.mobile_number,
            operator: t.operator,
            plan_type: t.plan_type,
            amount: round_money(t.amount),
            plan_details: t.plan_details,
            transaction_id: t.transaction_id,
            status: t.status,
            payment_method: t.payment_method,
            created_at: t.created_at.to_rfc3339(),
        }
    }
}
