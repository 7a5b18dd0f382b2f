use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub role: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::mobile::Entity")]
    Mobiles,
    #[sea_orm(has_many = "super::recharge_transaction::Entity")]
    RechargeTransactions,
    #[sea_orm(has_many = "super::favorite::Entity")]
    Favorites,
}

impl Related<super::mobile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mobiles.def()
    }
}

impl Related<super::recharge_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RechargeTransactions.def()
    }
}

impl Related<super::favorite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorites.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether this profile carries the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == super::Role::Admin.as_str()
    }
}
