use std::collections::HashMap;

use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter,
};

use crate::auth::jwt::IdentityClaims;
use crate::entities::{Role, user};

/// Profile data asserted by the identity provider for one identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityProfile {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

impl From<IdentityClaims> for IdentityProfile {
    fn from(claims: IdentityClaims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email.map(|e| e.trim().to_lowercase()),
            first_name: claims.first_name,
            last_name: claims.last_name,
            profile_image_url: claims.profile_image_url,
        }
    }
}

impl IdentityProfile {
    fn matches(&self, user: &user::Model) -> bool {
        self.email == user.email
            && self.first_name == user.first_name
            && self.last_name == user.last_name
            && self.profile_image_url == user.profile_image_url
    }
}

/// Fetch a user by id.
///
/// # Errors
///
/// Returns [`DbErr`] if the query fails.
pub async fn get_user(db: &DatabaseConnection, id: &str) -> Result<Option<user::Model>, DbErr> {
    user::Entity::find_by_id(id.to_string()).one(db).await
}

/// Ensure a local row exists for `profile` and reflects its latest claims.
///
/// New rows get the `user` role, or `admin` when `grant_admin` is set; an
/// existing role is only ever raised to admin by `grant_admin`, never lowered.
///
/// Emails are unique across identities. An email already held by another
/// identity is not taken over: a new row is stored without one and an existing
/// row keeps the email it had. Admin is only granted through an email the row
/// actually holds.
///
/// # Errors
///
/// Returns [`DbErr`] if any query fails.
pub async fn upsert_identity(
    db: &DatabaseConnection,
    profile: &IdentityProfile,
    grant_admin: bool,
) -> Result<user::Model, DbErr> {
    if let Some(existing) = get_user(db, &profile.id).await? {
        let wants_admin = grant_admin && !existing.is_admin();
        if profile.matches(&existing) && !wants_admin {
            return Ok(existing);
        }

        let email = if email_held_by_other(db, profile).await? {
            existing.email.clone()
        } else {
            profile.email.clone()
        };
        let promote = wants_admin && email == profile.email;
        let claimed = IdentityProfile {
            email,
            ..profile.clone()
        };
        if claimed.matches(&existing) && !promote {
            return Ok(existing);
        }

        let previous = existing.updated_at;
        let mut active: user::ActiveModel = existing.into();
        active.email = Set(claimed.email);
        active.first_name = Set(claimed.first_name);
        active.last_name = Set(claimed.last_name);
        active.profile_image_url = Set(claimed.profile_image_url);
        if promote {
            active.role = Set(Role::Admin.as_str().to_string());
        }
        active.updated_at = Set(super::stamp_after(previous));
        return active.update(db).await;
    }

    let email = if email_held_by_other(db, profile).await? {
        None
    } else {
        profile.email.clone()
    };
    let role = if grant_admin && email.is_some() {
        Role::Admin
    } else {
        Role::User
    };
    let now = super::now();
    let new_user = user::ActiveModel {
        id: Set(profile.id.clone()),
        email: Set(email),
        first_name: Set(profile.first_name.clone()),
        last_name: Set(profile.last_name.clone()),
        profile_image_url: Set(profile.profile_image_url.clone()),
        role: Set(role.as_str().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    // Concurrent first requests for one identity race here; the loser's insert is a no-op.
    user::Entity::insert(new_user)
        .on_conflict(
            OnConflict::column(user::Column::Id)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    tracing::info!(user_id = %profile.id, role = %role, "provisioned user from identity");

    get_user(db, &profile.id)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("user {}", profile.id)))
}

/// Whether the profile's email already belongs to a different identity.
async fn email_held_by_other(
    db: &DatabaseConnection,
    profile: &IdentityProfile,
) -> Result<bool, DbErr> {
    let Some(email) = profile.email.as_deref() else {
        return Ok(false);
    };

    let holders = user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .filter(user::Column::Id.ne(profile.id.as_str()))
        .count(db)
        .await?;

    if holders > 0 {
        tracing::warn!(
            user_id = %profile.id,
            "identity email is already registered to another user, not storing it"
        );
    }
    Ok(holders > 0)
}

/// Load several users at once, keyed by id.
///
/// # Errors
///
/// Returns [`DbErr`] if the query fails.
pub async fn load_users(
    db: &DatabaseConnection,
    ids: impl IntoIterator<Item = String>,
) -> Result<HashMap<String, user::Model>, DbErr> {
    let mut ids: Vec<String> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let users = user::Entity::find()
        .filter(user::Column::Id.is_in(ids))
        .all(db)
        .await?;

    Ok(users.into_iter().map(|u| (u.id.clone(), u)).collect())
}

/// Total number of registered users.
///
/// # Errors
///
/// Returns [`DbErr`] if the query fails.
pub async fn count_users(db: &DatabaseConnection) -> Result<u64, DbErr> {
    user::Entity::find().count(db).await
}
