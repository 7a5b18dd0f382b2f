use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use super::MobileWithSeller;
use crate::entities::{favorite, mobile};

/// A favorite with the listing it points at, seller included.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteWithMobile {
    pub favorite: favorite::Model,
    pub mobile: MobileWithSeller,
}

/// Insert a `(user, listing)` favorite.
///
/// # Errors
///
/// Returns [`DbErr`] if the insert fails. The unique `(user_id, mobile_id)`
/// index makes a repeated favorite fail here.
pub async fn add_favorite(
    db: &DatabaseConnection,
    user_id: &str,
    mobile_id: i32,
) -> Result<favorite::Model, DbErr> {
    favorite::ActiveModel {
        user_id: Set(user_id.to_string()),
        mobile_id: Set(mobile_id),
        created_at: Set(super::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// # Errors
///
/// Returns [`DbErr`] if the query fails.
pub async fn find_favorite(
    db: &DatabaseConnection,
    user_id: &str,
    mobile_id: i32,
) -> Result<Option<favorite::Model>, DbErr> {
    favorite::Entity::find()
        .filter(favorite::Column::UserId.eq(user_id))
        .filter(favorite::Column::MobileId.eq(mobile_id))
        .one(db)
        .await
}

/// Delete the `(user, listing)` favorite. Returns whether a row was removed.
///
/// # Errors
///
/// Returns [`DbErr`] if the delete fails.
pub async fn remove_favorite(
    db: &DatabaseConnection,
    user_id: &str,
    mobile_id: i32,
) -> Result<bool, DbErr> {
    let result = favorite::Entity::delete_many()
        .filter(favorite::Column::UserId.eq(user_id))
        .filter(favorite::Column::MobileId.eq(mobile_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

/// A user's favorites, most recently added first.
///
/// # Errors
///
/// Returns [`DbErr`] if a query fails.
pub async fn list_favorites(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<FavoriteWithMobile>, DbErr> {
    let rows = favorite::Entity::find()
        .filter(favorite::Column::UserId.eq(user_id))
        .find_also_related(mobile::Entity)
        .order_by_desc(favorite::Column::CreatedAt)
        .order_by_desc(favorite::Column::Id)
        .all(db)
        .await?;

    let seller_ids = rows
        .iter()
        .filter_map(|(_, mobile)| mobile.as_ref().map(|m| m.seller_id.clone()));
    let sellers = super::users::load_users(db, seller_ids.collect::<Vec<_>>()).await?;

    Ok(rows
        .into_iter()
        .filter_map(|(favorite, mobile)| {
            let mobile = mobile?;
            let seller = sellers.get(&mobile.seller_id)?.clone();
            Some(FavoriteWithMobile {
                favorite,
                mobile: MobileWithSeller { mobile, seller },
            })
        })
        .collect())
}
