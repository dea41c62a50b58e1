use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmountError {
    #[error("Amount error: Value is an empty string")]
    Empty,
    #[error("Amount error: {0}")]
    InvalidFormat(String),
    #[error("Amount error: Value has more than {0} decimal places")]
    TooManyDecimalPlaces(u32),
    #[error("Bottle count error: {0}")]
    ParseInt(#[from] ParseIntError),
}
