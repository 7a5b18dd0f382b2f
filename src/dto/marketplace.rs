use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value as JsonValue;

use super::UserResponse;
use crate::entities::{favorite, mobile, order};
use crate::storage::{FavoriteWithMobile, MobileWithSeller, OrderDetails, round_money};

/// `{ "message": "..." }` acknowledgement for deletes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileResponse {
    pub id: i32,
    pub seller_id: String,
    pub brand: String,
    pub model: String,
    pub storage: Option<String>,
    pub color: Option<String>,
    pub condition: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub description: Option<String>,
    pub images: JsonValue,
    pub is_new: bool,
    pub status: String,
    pub location: Option<String>,
    pub specifications: JsonValue,
    pub accessories: JsonValue,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller: Option<UserResponse>,
}

impl From<mobile::Model> for MobileResponse {
    fn from(m: mobile::Model) -> Self {
        Self {
            id: m.id,
            seller_id: m.seller_id,
            brand: m.brand,
            model: m.model,
            storage: m.storage,
            color: m.color,
            condition: m.condition,
            price: round_money(m.price),
            description: m.description,
            images: m.images,
            is_new: m.is_new,
            status: m.status,
            location: m.location,
            specifications: m.specifications,
            accessories: m.accessories,
            created_at: m.created_at.to_rfc3339(),
            updated_at: m.updated_at.to_rfc3339(),
            seller: None,
        }
    }
}

impl From<MobileWithSeller> for MobileResponse {
    fn from(row: MobileWithSeller) -> Self {
        Self {
            seller: Some(row.seller.into()),
            ..Self::from(row.mobile)
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub id: i32,
    pub user_id: String,
    pub mobile_id: i32,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<MobileResponse>,
}

impl From<favorite::Model> for FavoriteResponse {
    fn from(f: favorite::Model) -> Self {
        Self {
            id: f.id,
            user_id: f.user_id,
            mobile_id: f.mobile_id,
            created_at: f.created_at.to_rfc3339(),
            mobile: None,
        }
    }
}

impl From<FavoriteWithMobile> for FavoriteResponse {
    fn from(row: FavoriteWithMobile) -> Self {
        Self {
            mobile: Some(row.mobile.into()),
            ..Self::from(row.favorite)
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i32,
    pub buyer_id: String,
    pub seller_id: String,
    pub mobile_id: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub status: String,
    pub payment_method: Option<String>,
    pub payment_status: String,
    pub shipping_address: Option<JsonValue>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<MobileResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer: Option<UserResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller: Option<UserResponse>,
}

impl From<order::Model> for OrderResponse {
    fn from(o: order::Model) -> Self {
        Self {
            id: o.id,
            buyer_id: o.buyer_id,
            seller_id: o.seller_id,
            mobile_id: o.mobile_id,
            amount: round_money(o.amount),
            status: o.status,
            payment_method: o.payment_method,
            payment_status: o.payment_status,
            shipping_address: o.shipping_address,
            created_at: o.created_at.to_rfc3339(),
            updated_at: o.updated_at.to_rfc3339(),
            mobile: None,
            buyer: None,
            seller: None,
        }
    }
}

impl From<OrderDetails> for OrderResponse {
    fn from(row: OrderDetails) -> Self {
        Self {
            mobile: Some(row.mobile.into()),
            buyer: Some(row.buyer.into()),
            seller: Some(row.seller.into()),
            ..Self::from(row.order)
        }
    }
}
