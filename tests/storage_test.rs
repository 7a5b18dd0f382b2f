mod common;

use std::collections::BTreeMap;

use phone_bazaar::entities::{
    Condition, MobileStatus, Operator, PaymentStatus, PlanType, RechargeStatus,
};
use phone_bazaar::storage::{
    IdentityProfile, MobileChanges, MobileFilter, NewMobile, NewOrder, NewRecharge,
    OrderChanges, OrderSide, favorites, mobiles, orders, recharges, round_money, users,
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

fn money(amount: &str) -> Decimal {
    amount.parse().unwrap_or_default()
}

fn identity(id: &str, email: &str) -> IdentityProfile {
    IdentityProfile {
        id: id.to_string(),
        email: Some(email.to_string()),
        first_name: Some(id.to_string()),
        last_name: None,
        profile_image_url: None,
    }
}

async fn user(db: &DatabaseConnection, id: &str) -> String {
    users::upsert_identity(db, &identity(id, &format!("{id}@example.com")), false)
        .await
        .map(|u| u.id)
        .unwrap_or_default()
}

fn phone(model: &str, price: &str) -> NewMobile {
    NewMobile {
        brand: "Samsung".to_string(),
        model: model.to_string(),
        storage: None,
        color: None,
        condition: Condition::Fair,
        price: money(price),
        description: None,
        images: vec!["https://img.example.com/a.jpg".to_string()],
        is_new: false,
        location: None,
        specifications: BTreeMap::new(),
        accessories: Vec::new(),
    }
}

#[tokio::test]
async fn test_upsert_identity_is_idempotent_and_promotes() {
    let db = common::test_state().await.db;
    let profile = identity("u1", "u1@example.com");

    let first = users::upsert_identity(&db, &profile, false).await.ok();
    let again = users::upsert_identity(&db, &profile, false).await.ok();
    assert!(first.is_some());
    assert_eq!(first, again);
    assert_eq!(users::count_users(&db).await.unwrap_or_default(), 1);

    let promoted = users::upsert_identity(&db, &profile, true).await.ok();
    assert_eq!(promoted.as_ref().map(|u| u.role.as_str()), Some("admin"));

    // Never demoted
    let still = users::upsert_identity(&db, &profile, false).await.ok();
    assert_eq!(still.map(|u| u.role), Some("admin".to_string()));
}

#[tokio::test]
async fn test_upsert_identity_does_not_take_over_a_registered_email() {
    let db = common::test_state().await.db;

    let first = users::upsert_identity(&db, &identity("idp-1", "same@example.com"), false).await.ok();
    assert_eq!(first.and_then(|u| u.email), Some("same@example.com".to_string()));

    // A second identity asserting the same email is provisioned without it, and
    // cannot pick up admin through it.
    let second = users::upsert_identity(&db, &identity("idp-2", "same@example.com"), true).await.ok();
    assert!(second.is_some(), "second identity was not provisioned");
    assert_eq!(second.as_ref().map(|u| u.email.clone()), Some(None));
    assert_eq!(second.map(|u| u.role), Some("user".to_string()));
    assert_eq!(users::count_users(&db).await.unwrap_or_default(), 2);

    // An existing row switching to a taken email keeps its own.
    let third = users::upsert_identity(&db, &identity("idp-3", "third@example.com"), false).await.ok();
    assert!(third.is_some());
    let switched = users::upsert_identity(&db, &identity("idp-3", "same@example.com"), false).await.ok();
    assert_eq!(switched.and_then(|u| u.email), Some("third@example.com".to_string()));

    let owner = users::get_user(&db, "idp-1").await.ok().flatten();
    assert_eq!(owner.and_then(|u| u.email), Some("same@example.com".to_string()));
}

#[tokio::test]
async fn test_update_mobile_stamps_strictly_later() {
    let db = common::test_state().await.db;
    let seller = user(&db, "s1").await;

    let created = mobiles::create_mobile(&db, &seller, phone("A54", "25000")).await.ok();
    assert!(created.is_some(), "insert failed");
    let Some(created) = created else { return };
    assert_eq!(created.status, "pending");

    let mut previous = created.updated_at;
    for price in [money("24000"), money("23499.99"), money("22000.50")] {
        let changes = MobileChanges {
            price: Some(price),
            ..MobileChanges::default()
        };
        let updated = mobiles::update_mobile(&db, created.id, changes).await.ok().flatten();
        let updated_at = updated.as_ref().map(|m| m.updated_at);
        assert!(updated_at > Some(previous));
        assert_eq!(updated.map(|m| round_money(m.price)), Some(price));
        previous = updated_at.unwrap_or(previous);
    }

    let missing = mobiles::update_mobile(&db, 9999, MobileChanges::status(MobileStatus::Approved)).await;
    assert_eq!(missing.ok(), Some(None));
}

#[tokio::test]
async fn test_list_mobiles_filters_compose() {
    let db = common::test_state().await.db;
    let seller = user(&db, "s1").await;

    let cheap = mobiles::create_mobile(&db, &seller, phone("M14", "12000")).await.ok().map(|m| m.id);
    let pricey = mobiles::create_mobile(&db, &seller, phone("S23 Ultra", "90000")).await.ok().map(|m| m.id);

    let all = mobiles::list_mobiles(&db, &MobileFilter::default()).await.unwrap_or_default();
    assert_eq!(all.iter().map(|r| Some(r.mobile.id)).collect::<Vec<_>>(), vec![pricey, cheap]);
    assert!(all.iter().all(|r| r.seller.id == seller));

    let filter = MobileFilter {
        search: Some("ultra".to_string()),
        max_price: Some(money("90000")),
        ..MobileFilter::default()
    };
    let found = mobiles::list_mobiles(&db, &filter).await.unwrap_or_default();
    assert_eq!(found.iter().map(|r| Some(r.mobile.id)).collect::<Vec<_>>(), vec![pricey]);

    let approved = MobileFilter {
        status: Some(MobileStatus::Approved),
        ..MobileFilter::default()
    };
    assert!(mobiles::list_mobiles(&db, &approved).await.unwrap_or_default().is_empty());
    assert_eq!(mobiles::count_with_status(&db, MobileStatus::Pending).await.unwrap_or_default(), 2);
}

#[tokio::test]
async fn test_recharge_status_is_terminal_once_set() {
    let db = common::test_state().await.db;
    let buyer = user(&db, "b1").await;

    let txn = recharges::create_recharge_transaction(
        &db,
        &buyer,
        "TXN1700000000000abcdefghi",
        NewRecharge {
            mobile_number: "9876543210".to_string(),
            operator: Operator::Vi,
            plan_type: PlanType::Postpaid,
            amount: money("499"),
            plan_details: None,
            payment_method: None,
        },
    )
    .await
    .ok();
    assert!(txn.is_some(), "insert failed");
    let Some(txn) = txn else { return };
    assert_eq!(txn.status, "pending");

    let settled = recharges::update_recharge_status(&db, txn.id, RechargeStatus::Failed).await.ok().flatten();
    assert_eq!(settled.map(|t| t.status), Some("failed".to_string()));

    let again = recharges::update_recharge_status(&db, txn.id, RechargeStatus::Success).await.ok().flatten();
    assert_eq!(again.map(|t| t.status), Some("failed".to_string()));

    let fetched = recharges::get_recharge_transaction(&db, txn.id).await.ok().flatten();
    assert_eq!(fetched.map(|t| t.status), Some("failed".to_string()));
}

#[tokio::test]
async fn test_favorites_unique_per_user_and_listing() {
    let db = common::test_state().await.db;
    let seller = user(&db, "s1").await;
    let fan = user(&db, "f1").await;
    let mobile_id = mobiles::create_mobile(&db, &seller, phone("A34", "20000"))
        .await
        .map(|m| m.id)
        .unwrap_or_default();

    assert!(favorites::add_favorite(&db, &fan, mobile_id).await.is_ok());
    assert!(favorites::add_favorite(&db, &fan, mobile_id).await.is_err());
    assert!(favorites::add_favorite(&db, &seller, mobile_id).await.is_ok());

    assert!(favorites::find_favorite(&db, &fan, mobile_id).await.ok().flatten().is_some());
    assert_eq!(favorites::list_favorites(&db, &fan).await.unwrap_or_default().len(), 1);

    assert!(favorites::remove_favorite(&db, &fan, mobile_id).await.unwrap_or_default());
    assert!(!favorites::remove_favorite(&db, &fan, mobile_id).await.unwrap_or_default());
}

#[tokio::test]
async fn test_revenue_counts_completed_payments_only() {
    let db = common::test_state().await.db;
    let seller = user(&db, "s1").await;
    let buyer = user(&db, "b1").await;
    let mobile_id = mobiles::create_mobile(&db, &seller, phone("A34", "20000"))
        .await
        .map(|m| m.id)
        .unwrap_or_default();

    assert_eq!(orders::sum_revenue(&db).await.ok(), Some(Decimal::ZERO));

    let mut order_ids = Vec::new();
    for amount in [money("20000"), money("18500.50"), money("999")] {
        let order = orders::create_order(
            &db,
            &buyer,
            NewOrder {
                mobile_id,
                seller_id: seller.clone(),
                amount,
                payment_method: None,
                shipping_address: None,
            },
        )
        .await
        .map(|o| o.id)
        .unwrap_or_default();
        order_ids.push(order);
    }

    for &id in &order_ids[..2] {
        let changes = OrderChanges {
            payment_status: Some(PaymentStatus::Completed),
            ..OrderChanges::default()
        };
        assert!(orders::update_order(&db, id, changes).await.ok().flatten().is_some());
    }

    assert_eq!(orders::sum_revenue(&db).await.ok(), Some(money("38500.50")));

    assert_eq!(orders::count_orders_for_mobile(&db, mobile_id).await.unwrap_or_default(), 3);
    assert_eq!(orders::list_orders(&db, &buyer, OrderSide::Buyer).await.unwrap_or_default().len(), 3);
    assert!(orders::list_orders(&db, &buyer, OrderSide::Seller).await.unwrap_or_default().is_empty());
    assert_eq!(orders::list_orders(&db, &seller, OrderSide::Any).await.unwrap_or_default().len(), 3);

    // Orders keep the listing alive.
    assert!(mobiles::delete_mobile(&db, mobile_id).await.is_err());
}

#[tokio::test]
async fn test_revenue_sums_cents_exactly() {
    let db = common::test_state().await.db;
    let seller = user(&db, "s1").await;
    let buyer = user(&db, "b1").await;
    let mobile_id = mobiles::create_mobile(&db, &seller, phone("A05", "9999"))
        .await
        .map(|m| m.id)
        .unwrap_or_default();

    for amount in ["0.1", "0.2"] {
        let order = orders::create_order(
            &db,
            &buyer,
            NewOrder {
                mobile_id,
                seller_id: seller.clone(),
                amount: money(amount),
                payment_method: None,
                shipping_address: None,
            },
        )
        .await
        .ok();

        let changes = OrderChanges {
            payment_status: Some(PaymentStatus::Completed),
            ..OrderChanges::default()
        };
        let id = order.map(|o| o.id).unwrap_or_default();
        assert!(orders::update_order(&db, id, changes).await.ok().flatten().is_some());
    }

    assert_eq!(orders::sum_revenue(&db).await.ok(), Some(money("0.3")));
}
