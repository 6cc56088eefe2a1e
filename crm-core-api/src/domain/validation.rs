use rust_decimal::{Decimal, RoundingStrategy};
use validator::ValidationError;

/// Scale of the `NUMERIC(15, 2)` money columns.
pub const MONEY_SCALE: u32 = 2;

/// Exclusive upper bound of a `NUMERIC(15, 2)` value (13 integer digits).
fn money_limit() -> Decimal {
    Decimal::new(10_000_000_000_000, 0)
}

/// Rounds to the precision the money columns store, half away from zero as
/// Postgres does for numeric input.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Rejects negative monetary and counter values.
pub fn non_negative_decimal(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("non_negative")
            .with_message("must be greater than or equal to 0".into()));
    }
    Ok(())
}

/// A non-negative amount that fits a `NUMERIC(15, 2)` column once rounded.
pub fn money(value: &Decimal) -> Result<(), ValidationError> {
    non_negative_decimal(value)?;
    if round_money(*value) >= money_limit() {
        return Err(ValidationError::new("money_range")
            .with_message("must have at most 13 integer digits".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_non_negative_decimal() {
        assert!(non_negative_decimal(&Decimal::ZERO).is_ok());
        assert!(non_negative_decimal(&Decimal::from_str("0.01").unwrap()).is_ok());
        assert!(non_negative_decimal(&Decimal::from_str("-0.01").unwrap()).is_err());
    }

    #[test]
    fn test_round_money_matches_numeric_rounding() {
        assert_eq!(round_money(Decimal::from_str("12.345").unwrap()), Decimal::from_str("12.35").unwrap());
        assert_eq!(round_money(Decimal::from_str("12.344").unwrap()), Decimal::from_str("12.34").unwrap());
        assert_eq!(round_money(Decimal::from_str("0.005").unwrap()), Decimal::from_str("0.01").unwrap());
    }

    #[test]
    fn test_money_rejects_values_the_column_cannot_hold() {
        assert!(money(&Decimal::from_str("9999999999999.99").unwrap()).is_ok());
        assert!(money(&Decimal::from_str("9999999999999.995").unwrap()).is_err());
        assert!(money(&Decimal::from_str("12345678901234567").unwrap()).is_err());
        assert!(money(&Decimal::from_str("-1").unwrap()).is_err());
    }
}
