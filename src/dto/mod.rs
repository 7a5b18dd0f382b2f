//! JSON response bodies shared across route modules.
//!
//! Request bodies live next to the handlers that accept them.

pub mod marketplace;
pub mod recharge;
pub mod user;

pub use marketplace::{FavoriteResponse, MessageResponse, MobileResponse, OrderResponse};
pub use recharge::RechargeResponse;
pub use user::UserResponse;
