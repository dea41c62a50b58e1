use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::BottleCount;
use crate::types::errors::AmountError;

/// Refund paid per returned bottle (standard single-use Pfand).
pub const UNIT_VALUE: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

const DECIMAL_PLACES: u32 = 2;

pub fn bottles_to_amount(bottles: BottleCount) -> Decimal {
    Decimal::from(bottles) * UNIT_VALUE
}

/// Number of bottles an amount is worth, kept fractional for amounts that are
/// not a multiple of the unit value.
pub fn bottle_equivalent(amount: Decimal) -> Decimal {
    amount / UNIT_VALUE
}

/// Rounds the bottle equivalent of `amount` half away from zero. Negative
/// amounts have no bottle count and yield 0.
pub fn nearest_bottle_count(amount: Decimal) -> BottleCount {
    bottle_equivalent(amount)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}

/// Parses a user supplied cash amount such as `2`, `2.5` or `2,50`.
///
/// Only the format is checked here; whether the amount can actually be
/// withdrawn is decided by the ledger.
pub fn parse_amount(value: &str) -> Result<Decimal, AmountError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(AmountError::Empty);
    }

    let normalized = value.replace(',', ".");
    let amount = Decimal::from_str(&normalized).map_err(|error| {
        AmountError::InvalidFormat(format!("Value '{value}' is not a number: {error}"))
    })?;

    if amount.normalize().scale() > DECIMAL_PLACES {
        return Err(AmountError::TooManyDecimalPlaces(DECIMAL_PLACES));
    }

    Ok(amount)
}

pub fn parse_bottle_count(value: &str) -> Result<BottleCount, AmountError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(AmountError::Empty);
    }

    Ok(value.parse()?)
}
