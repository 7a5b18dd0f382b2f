//! Data access: typed filters and updates translated into `SeaORM` queries.
//!
//! Every function performs single-statement writes against the connection it
//! is handed and returns `DbErr` untouched; authorization and HTTP mapping
//! happen in the route layer.

pub mod favorites;
pub mod mobiles;
pub mod orders;
pub mod recharges;
pub mod users;

use chrono::{Duration, SubsecRound, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::prelude::DateTimeWithTimeZone;

pub use favorites::FavoriteWithMobile;
pub use mobiles::{MobileChanges, MobileFilter, MobileWithSeller, NewMobile};
pub use orders::{NewOrder, OrderChanges, OrderDetails, OrderSide};
pub use recharges::NewRecharge;
pub use users::IdentityProfile;

/// Current time at the database's timestamp precision (microseconds).
#[must_use]
pub fn now() -> DateTimeWithTimeZone {
    Utc::now().trunc_subsecs(6).fixed_offset()
}

/// A modification timestamp strictly later than `previous`, even when the
/// clock has not visibly advanced since the last write.
#[must_use]
pub fn stamp_after(previous: DateTimeWithTimeZone) -> DateTimeWithTimeZone {
    let current = now();
    if current > previous {
        current
    } else {
        previous + Duration::microseconds(1)
    }
}

/// Money columns hold two decimal places; amounts are rounded half away from zero.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
