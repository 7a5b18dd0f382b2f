use rust_decimal::Decimal;
use validator::ValidationError;

/// Largest value a `DECIMAL(10, 2)` column holds.
fn column_max() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

/// Listing prices and order amounts: zero or more, and small enough to store.
pub fn validate_non_negative(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount < Decimal::ZERO {
        return Err(ValidationError::new("range").with_message("must not be negative".into()));
    }
    if *amount > column_max() {
        return Err(ValidationError::new("range").with_message("is too large".into()));
    }
    Ok(())
}
