pub mod enums;
pub mod favorite;
pub mod mobile;
pub mod order;
pub mod recharge_transaction;
pub mod user;

pub use enums::{
    Condition, MobileStatus, Operator, OrderStatus, PaymentMethod, PaymentStatus, PlanType,
    RechargeStatus, Role, UnknownVariant,
};
