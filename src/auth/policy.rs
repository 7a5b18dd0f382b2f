//! Authorization rules for listing mutations.

use crate::entities::{mobile, user};
use crate::error::AppError;

/// The seller of a listing and admins may update or delete it.
#[must_use]
pub fn can_manage_listing(actor: &user::Model, listing: &mobile::Model) -> bool {
    actor.id == listing.seller_id || actor.is_admin()
}

/// Reject with 403 unless `actor` may manage `listing`.
///
/// # Errors
///
/// Returns [`AppError::Forbidden`] naming the attempted `action`.
pub fn ensure_can_manage_listing(
    actor: &user::Model,
    listing: &mobile::Model,
    action: &str,
) -> Result<(), AppError> {
    if can_manage_listing(actor, listing) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "Not authorized to {action} this listing"
        )))
    }
}

/// Moderation status changes go through admins only.
///
/// # Errors
///
/// Returns [`AppError::Forbidden`] for non-admins.
pub fn ensure_can_moderate(actor: &user::Model) -> Result<(), AppError> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Only admins can change a listing's status".to_string(),
        ))
    }
}
