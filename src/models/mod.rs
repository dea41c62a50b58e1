mod errors;
mod histogram;
mod ledger;
mod theme;
mod transaction;
mod withdrawal;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use errors::LedgerError;
pub use histogram::{DailyBucket, DailyHistogram, HISTOGRAM_DAYS};
pub use ledger::{Ledger, QUICK_WITHDRAWAL_AMOUNTS};
pub use theme::Theme;
pub use transaction::{DISPLAY_DATE_FORMAT, Transaction, display_date};
pub use withdrawal::PendingWithdrawal;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Deposit => write!(formatter, "deposit"),
            TransactionType::Withdrawal => write!(formatter, "withdrawal"),
        }
    }
}
