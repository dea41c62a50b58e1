use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::Transaction;
use crate::types::{BottleCount, TransactionId, UserName};

/// A withdrawal that passed the balance check and waits for the user to
/// confirm how many bottles are taken out.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingWithdrawal {
    pub amount: Decimal,
    /// `round(amount / unit value)`, offered as the default bottle count.
    pub proposed_bottles: BottleCount,
}

impl PendingWithdrawal {
    pub fn to_transaction(
        &self,
        id: TransactionId,
        created_at: DateTime<Utc>,
        bottles: BottleCount,
        user_id: Option<UserName>,
    ) -> Transaction {
        Transaction::withdrawal(id, created_at, self.amount, bottles, user_id)
    }
}
