use super::{
    AmountError, TransactionIdGenerator, UNIT_VALUE, bottle_equivalent, bottles_to_amount,
    instant_from_id, nearest_bottle_count, parse_amount, parse_bottle_count,
};
use anyhow::{Result, anyhow};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

#[test]
fn test_unit_value_is_a_quarter() -> Result<()> {
    assert_eq!(UNIT_VALUE, Decimal::from_str("0.25")?);

    Ok(())
}

#[test]
fn test_bottles_convert_to_exact_amounts() -> Result<()> {
    let test_cases = vec![(0, "0"), (1, "0.25"), (8, "2.00"), (13, "3.25"), (400, "100")];

    for (bottles, expected_amount) in test_cases {
        assert_eq!(bottles_to_amount(bottles), Decimal::from_str(expected_amount)?);
    }

    Ok(())
}

#[test]
fn test_bottle_equivalent_keeps_fractions() -> Result<()> {
    assert_eq!(bottle_equivalent(Decimal::from_str("2.00")?), Decimal::from(8));
    assert_eq!(bottle_equivalent(Decimal::from_str("0.10")?), Decimal::from_str("0.4")?);

    Ok(())
}

#[test]
fn test_nearest_bottle_count_rounds_half_away_from_zero() -> Result<()> {
    let test_cases = vec![
        ("2.00", 8),
        ("1.13", 5),
        ("1.12", 4),
        ("0.125", 1),
        ("0.12", 0),
        ("-1.00", 0),
    ];

    for (amount, expected_bottles) in test_cases {
        assert_eq!(nearest_bottle_count(Decimal::from_str(amount)?), expected_bottles, "amount {amount}");
    }

    Ok(())
}

#[test]
fn test_amount_parses_valid_strings() -> Result<()> {
    let test_cases = vec![
        ("2", "2"),
        ("2.5", "2.5"),
        ("  2.50  ", "2.50"),
        ("2,50", "2.50"),
        ("0.01", "0.01"),
        ("2.500", "2.5"),
        ("-1", "-1"),
    ];

    for (input_string, expected_amount) in test_cases {
        assert_eq!(parse_amount(input_string)?, Decimal::from_str(expected_amount)?);
    }

    Ok(())
}

#[test]
fn test_amount_fails_to_parse_invalid_strings() {
    assert!(matches!(parse_amount(""), Err(AmountError::Empty)));
    assert!(matches!(parse_amount("   "), Err(AmountError::Empty)));
    assert!(matches!(parse_amount("abc"), Err(AmountError::InvalidFormat(_))));
    assert!(matches!(parse_amount("1.2.3"), Err(AmountError::InvalidFormat(_))));
    assert!(matches!(parse_amount("1.234"), Err(AmountError::TooManyDecimalPlaces(2))));
}

#[test]
fn test_bottle_count_parsing() -> Result<()> {
    assert_eq!(parse_bottle_count(" 12 ")?, 12);
    assert!(matches!(parse_bottle_count(""), Err(AmountError::Empty)));
    assert!(matches!(parse_bottle_count("-1"), Err(AmountError::ParseInt(_))));
    assert!(matches!(parse_bottle_count("1.5"), Err(AmountError::ParseInt(_))));

    Ok(())
}

#[test]
fn test_id_generator_uses_epoch_millis() -> Result<()> {
    let generator = TransactionIdGenerator::new();
    let now = Utc.with_ymd_and_hms(2024, 10, 17, 12, 30, 0).single().ok_or_else(|| anyhow!("invalid date"))?;

    let id = generator.next(now);

    assert_eq!(id, now.timestamp_millis().to_string());
    assert_eq!(instant_from_id(&id), Some(now));

    Ok(())
}

#[test]
fn test_id_generator_is_strictly_increasing_within_one_millisecond() -> Result<()> {
    let generator = TransactionIdGenerator::new();
    let now = Utc.with_ymd_and_hms(2024, 10, 17, 12, 30, 0).single().ok_or_else(|| anyhow!("invalid date"))?;

    let first: i64 = generator.next(now).parse()?;
    let second: i64 = generator.next(now).parse()?;
    let third: i64 = generator.next(now).parse()?;

    assert_eq!(second, first + 1);
    assert_eq!(third, first + 2);

    Ok(())
}

#[test]
fn test_instant_from_id_rejects_non_numeric_ids() {
    assert!(instant_from_id("abc").is_none());
    assert!(instant_from_id("").is_none());
}
