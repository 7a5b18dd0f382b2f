use std::collections::BTreeMap;

use rust_decimal::Decimal;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Select,
};
use serde_json::Value;

use crate::entities::{Condition as PhoneCondition, MobileStatus, mobile, user};

/// A listing together with its seller's profile.
#[derive(Debug, Clone, PartialEq)]
pub struct MobileWithSeller {
    pub mobile: mobile::Model,
    pub seller: user::Model,
}

/// Listing search criteria. Every populated field narrows the result (AND).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MobileFilter {
    pub brand: Option<String>,
    pub condition: Option<PhoneCondition>,
    /// Inclusive lower bound
    pub min_price: Option<Decimal>,
    /// Inclusive upper bound
    pub max_price: Option<Decimal>,
    /// Case-insensitive substring of brand, model, or description
    pub search: Option<String>,
    pub status: Option<MobileStatus>,
    pub seller_id: Option<String>,
}

/// Fields of a new listing. The status is not part of it: listings always start pending.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMobile {
    pub brand: String,
    pub model: String,
    pub storage: Option<String>,
    pub color: Option<String>,
    pub condition: PhoneCondition,
    pub price: Decimal,
    pub description: Option<String>,
    pub images: Vec<String>,
    pub is_new: bool,
    pub location: Option<String>,
    pub specifications: BTreeMap<String, String>,
    pub accessories: Vec<String>,
}

/// Partial listing update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MobileChanges {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub storage: Option<String>,
    pub color: Option<String>,
    pub condition: Option<PhoneCondition>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub is_new: Option<bool>,
    pub location: Option<String>,
    pub specifications: Option<BTreeMap<String, String>>,
    pub accessories: Option<Vec<String>>,
    pub status: Option<MobileStatus>,
}

impl MobileChanges {
    /// A change that only moves the listing to `status`.
    #[must_use]
    pub fn status(status: MobileStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Listings matching `filter`, joined with their sellers, newest first.
///
/// # Errors
///
/// Returns [`DbErr`] if the query fails.
pub async fn list_mobiles(
    db: &DatabaseConnection,
    filter: &MobileFilter,
) -> Result<Vec<MobileWithSeller>, DbErr> {
    let rows = apply_filter(mobile::Entity::find(), filter)
        .find_also_related(user::Entity)
        .order_by_desc(mobile::Column::CreatedAt)
        .order_by_desc(mobile::Column::Id)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(mobile, seller)| seller.map(|seller| MobileWithSeller { mobile, seller }))
        .collect())
}

/// One listing with its seller.
///
/// # Errors
///
/// Returns [`DbErr`] if the query fails.
pub async fn get_mobile(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<MobileWithSeller>, DbErr> {
    let row = mobile::Entity::find_by_id(id)
        .find_also_related(user::Entity)
        .one(db)
        .await?;

    Ok(row.and_then(|(mobile, seller)| seller.map(|seller| MobileWithSeller { mobile, seller })))
}

/// One listing without the seller join.
///
/// # Errors
///
/// Returns [`DbErr`] if the query fails.
pub async fn find_mobile(db: &DatabaseConnection, id: i32) -> Result<Option<mobile::Model>, DbErr> {
    mobile::Entity::find_by_id(id).one(db).await
}

/// Insert a listing for `seller_id` in the `pending` state.
///
/// # Errors
///
/// Returns [`DbErr`] if the insert fails.
pub async fn create_mobile(
    db: &DatabaseConnection,
    seller_id: &str,
    new: NewMobile,
) -> Result<mobile::Model, DbErr> {
    let now = super::now();
    let listing = mobile::ActiveModel {
        seller_id: Set(seller_id.to_string()),
        brand: Set(new.brand),
        model: Set(new.model),
        storage: Set(new.storage),
        color: Set(new.color),
        condition: Set(new.condition.as_str().to_string()),
        price: Set(super::round_money(new.price)),
        description: Set(new.description),
        images: Set(string_list(new.images)),
        is_new: Set(new.is_new),
        status: Set(MobileStatus::Pending.as_str().to_string()),
        location: Set(new.location),
        specifications: Set(string_map(new.specifications)),
        accessories: Set(string_list(new.accessories)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    listing.insert(db).await
}

/// Overwrite the populated fields of listing `id` and stamp `updated_at`.
///
/// Returns `None` when the listing does not exist.
///
/// # Errors
///
/// Returns [`DbErr`] if a query fails.
pub async fn update_mobile(
    db: &DatabaseConnection,
    id: i32,
    changes: MobileChanges,
) -> Result<Option<mobile::Model>, DbErr> {
    let Some(existing) = find_mobile(db, id).await? else {
        return Ok(None);
    };

    let previous = existing.updated_at;
    let mut active: mobile::ActiveModel = existing.into();

    if let Some(brand) = changes.brand {
        active.brand = Set(brand);
    }
    if let Some(model) = changes.model {
        active.model = Set(model);
    }
    if let Some(storage) = changes.storage {
        active.storage = Set(Some(storage));
    }
    if let Some(color) = changes.color {
        active.color = Set(Some(color));
    }
    if let Some(condition) = changes.condition {
        active.condition = Set(condition.as_str().to_string());
    }
    if let Some(price) = changes.price {
        active.price = Set(super::round_money(price));
    }
    if let Some(description) = changes.description {
        active.description = Set(Some(description));
    }
    if let Some(images) = changes.images {
        active.images = Set(string_list(images));
    }
    if let Some(is_new) = changes.is_new {
        active.is_new = Set(is_new);
    }
    if let Some(location) = changes.location {
        active.location = Set(Some(location));
    }
    if let Some(specifications) = changes.specifications {
        active.specifications = Set(string_map(specifications));
    }
    if let Some(accessories) = changes.accessories {
        active.accessories = Set(string_list(accessories));
    }
    if let Some(status) = changes.status {
        active.status = Set(status.as_str().to_string());
    }
    active.updated_at = Set(super::stamp_after(previous));

    active.update(db).await.map(Some)
}

/// Hard-delete listing `id`. Favorites of it go with it.
///
/// # Errors
///
/// Returns [`DbErr`] if the delete fails, including when orders still reference it.
pub async fn delete_mobile(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
    let result = mobile::Entity::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// Listings awaiting review, newest first.
///
/// # Errors
///
/// Returns [`DbErr`] if the query fails.
pub async fn list_pending(db: &DatabaseConnection) -> Result<Vec<MobileWithSeller>, DbErr> {
    let filter = MobileFilter {
        status: Some(MobileStatus::Pending),
        ..MobileFilter::default()
    };
    list_mobiles(db, &filter).await
}

/// Number of listings currently in `status`.
///
/// # Errors
///
/// Returns [`DbErr`] if the query fails.
pub async fn count_with_status(db: &DatabaseConnection, status: MobileStatus) -> Result<u64, DbErr> {
    mobile::Entity::find()
        .filter(mobile::Column::Status.eq(status.as_str()))
        .count(db)
        .await
}

fn apply_filter(mut query: Select<mobile::Entity>, filter: &MobileFilter) -> Select<mobile::Entity> {
    if let Some(status) = filter.status {
        query = query.filter(mobile::Column::Status.eq(status.as_str()));
    }
    if let Some(brand) = &filter.brand {
        query = query.filter(mobile::Column::Brand.eq(brand.as_str()));
    }
    if let Some(condition) = filter.condition {
        query = query.filter(mobile::Column::Condition.eq(condition.as_str()));
    }
    if let Some(min) = filter.min_price {
        query = query.filter(mobile::Column::Price.gte(min));
    }
    if let Some(max) = filter.max_price {
        query = query.filter(mobile::Column::Price.lte(max));
    }
    if let Some(term) = &filter.search {
        query = query.filter(search_condition(term));
    }
    if let Some(seller_id) = &filter.seller_id {
        query = query.filter(mobile::Column::SellerId.eq(seller_id.as_str()));
    }
    query
}

/// `lower(col) LIKE %term%` over brand, model and description, OR-ed together.
fn search_condition(term: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
    [
        mobile::Column::Brand,
        mobile::Column::Model,
        mobile::Column::Description,
    ]
    .into_iter()
    .fold(Condition::any(), |cond, column| {
        cond.add(
            Expr::expr(Func::lower(Expr::col((mobile::Entity, column))))
                .like(LikeExpr::new(pattern.clone()).escape('\\')),
        )
    })
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn string_list(items: Vec<String>) -> Value {
    Value::from(items)
}

fn string_map(entries: BTreeMap<String, String>) -> Value {
    Value::Object(
        entries
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect(),
    )
}
