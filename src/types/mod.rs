mod errors;
mod monetary;
#[cfg(test)]
mod tests;
mod transaction_id;

pub use errors::AmountError;
pub use monetary::{
    UNIT_VALUE, bottle_equivalent, bottles_to_amount, nearest_bottle_count, parse_amount,
    parse_bottle_count,
};
pub use transaction_id::{TransactionIdGenerator, instant_from_id};

pub type TransactionId = String;
pub type UserName = String;
pub type BottleCount = u32;
