use rust_decimal::Decimal;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde_json::Value;

use crate::entities::{OrderStatus, PaymentMethod, PaymentStatus, mobile, order, user};

/// Which side of an order the caller is asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderSide {
    Buyer,
    Seller,
    /// Either side
    #[default]
    Any,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub mobile_id: i32,
    pub seller_id: String,
    pub amount: Decimal,
    pub payment_method: Option<PaymentMethod>,
    pub shipping_address: Option<Value>,
}

/// Partial order update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderChanges {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_method: Option<PaymentMethod>,
    pub shipping_address: Option<Value>,
}

/// An order with its listing and both parties.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetails {
    pub order: order::Model,
    pub mobile: mobile::Model,
    pub buyer: user::Model,
    pub seller: user::Model,
}

/// Insert an order for `buyer_id`; both status fields start `pending`.
///
/// # Errors
///
/// Returns [`DbErr`] if the insert fails.
pub async fn create_order(
    db: &DatabaseConnection,
    buyer_id: &str,
    new: NewOrder,
) -> Result<order::Model, DbErr> {
    let now = super::now();
    order::ActiveModel {
        buyer_id: Set(buyer_id.to_string()),
        seller_id: Set(new.seller_id),
        mobile_id: Set(new.mobile_id),
        amount: Set(super::round_money(new.amount)),
        status: Set(OrderStatus::Pending.as_str().to_string()),
        payment_method: Set(new.payment_method.map(|m| m.as_str().to_string())),
        payment_status: Set(PaymentStatus::Pending.as_str().to_string()),
        shipping_address: Set(new.shipping_address),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Overwrite the populated fields of order `id`. Returns `None` if it does not exist.
///
/// # Errors
///
/// Returns [`DbErr`] if a query fails.
pub async fn update_order(
    db: &DatabaseConnection,
    id: i32,
    changes: OrderChanges,
) -> Result<Option<order::Model>, DbErr> {
    let Some(existing) = order::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    let previous = existing.updated_at;
    let mut active: order::ActiveModel = existing.into();
    if let Some(status) = changes.status {
        active.status = Set(status.as_str().to_string());
    }
    if let Some(payment_status) = changes.payment_status {
        active.payment_status = Set(payment_status.as_str().to_string());
    }
    if let Some(method) = changes.payment_method {
        active.payment_method = Set(Some(method.as_str().to_string()));
    }
    if let Some(address) = changes.shipping_address {
        active.shipping_address = Set(Some(address));
    }
    active.updated_at = Set(super::stamp_after(previous));

    active.update(db).await.map(Some)
}

/// Orders where `user_id` is on `side`, with listing and parties, newest first.
///
/// # Errors
///
/// Returns [`DbErr`] if a query fails.
pub async fn list_orders(
    db: &DatabaseConnection,
    user_id: &str,
    side: OrderSide,
) -> Result<Vec<OrderDetails>, DbErr> {
    let party = match side {
        OrderSide::Buyer => Condition::all().add(order::Column::BuyerId.eq(user_id)),
        OrderSide::Seller => Condition::all().add(order::Column::SellerId.eq(user_id)),
        OrderSide::Any => Condition::any()
            .add(order::Column::BuyerId.eq(user_id))
            .add(order::Column::SellerId.eq(user_id)),
    };

    let rows = order::Entity::find()
        .filter(party)
        .find_also_related(mobile::Entity)
        .order_by_desc(order::Column::CreatedAt)
        .order_by_desc(order::Column::Id)
        .all(db)
        .await?;

    let party_ids: Vec<String> = rows
        .iter()
        .flat_map(|(o, _)| [o.buyer_id.clone(), o.seller_id.clone()])
        .collect();
    let users = super::users::load_users(db, party_ids).await?;

    Ok(rows
        .into_iter()
        .filter_map(|(order, mobile)| {
            let mobile = mobile?;
            let buyer = users.get(&order.buyer_id)?.clone();
            let seller = users.get(&order.seller_id)?.clone();
            Some(OrderDetails {
                order,
                mobile,
                buyer,
                seller,
            })
        })
        .collect())
}

/// Orders referencing listing `mobile_id`.
///
/// # Errors
///
/// Returns [`DbErr`] if the query fails.
pub async fn count_orders_for_mobile(db: &DatabaseConnection, mobile_id: i32) -> Result<u64, DbErr> {
    order::Entity::find()
        .filter(order::Column::MobileId.eq(mobile_id))
        .count(db)
        .await
}

/// Sum of order amounts whose payment completed; zero when there are none.
///
/// # Errors
///
/// Returns [`DbErr`] if the query fails.
pub async fn sum_revenue(db: &DatabaseConnection) -> Result<Decimal, DbErr> {
    let total = order::Entity::find()
        .select_only()
        .column_as(order::Column::Amount.sum(), "total")
        .filter(order::Column::PaymentStatus.eq(PaymentStatus::Completed.as_str()))
        .into_tuple::<Option<Decimal>>()
        .one(db)
        .await?;

    Ok(total
        .flatten()
        .map_or(Decimal::ZERO, super::round_money))
}
