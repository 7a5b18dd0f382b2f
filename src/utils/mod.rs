pub mod money;
pub mod transaction_id;
