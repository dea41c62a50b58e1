use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{Transaction, TransactionType};
use crate::types::{BottleCount, TransactionId};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Transaction [{transaction_id}]:[{transaction_type}] must contain at least one bottle")]
    EmptyDeposit {
        transaction_id: TransactionId,
        transaction_type: TransactionType
    },
    #[error("Transaction [{transaction_id}]:[{transaction_type}] amount {amount} does not match {bottles} bottles")]
    AmountMismatch {
        transaction_id: TransactionId,
        transaction_type: TransactionType,
        amount: Decimal,
        bottles: BottleCount
    },
    #[error("Transaction [{transaction_id}]:[{transaction_type}] is already recorded")]
    DuplicateTransaction {
        transaction_id: TransactionId,
        transaction_type: TransactionType
    },
    #[error("Withdrawal amount {amount} must be positive")]
    NonPositiveAmount {
        amount: Decimal
    },
    #[error("Insufficient funds for withdrawal of {amount}, balance is {balance}")]
    InsufficientFunds {
        amount: Decimal,
        balance: Decimal
    },
    #[error("Please enter a valid number of bottles (1-{max}), got {bottles}")]
    InvalidBottleCount {
        bottles: BottleCount,
        max: Decimal
    },
    #[error("No withdrawal is waiting for confirmation")]
    NoPendingWithdrawal
}

impl LedgerError {
    pub fn empty_deposit(tx: &Transaction) -> Self {
        Self::EmptyDeposit {
            transaction_id: tx.id.clone(),
            transaction_type: tx.transaction_type,
        }
    }

    pub fn amount_mismatch(tx: &Transaction, bottles: BottleCount) -> Self {
        Self::AmountMismatch {
            transaction_id: tx.id.clone(),
            transaction_type: tx.transaction_type,
            amount: tx.amount,
            bottles,
        }
    }

    pub fn duplicate_transaction(tx: &Transaction) -> Self {
        Self::DuplicateTransaction {
            transaction_id: tx.id.clone(),
            transaction_type: tx.transaction_type,
        }
    }

    pub fn non_positive_amount(amount: Decimal) -> Self {
        Self::NonPositiveAmount { amount }
    }

    pub fn insufficient_funds(amount: Decimal, balance: Decimal) -> Self {
        Self::InsufficientFunds { amount, balance }
    }

    /// `total_bottles` is floored for the message, matching what can actually
    /// be taken out.
    pub fn invalid_bottle_count(bottles: BottleCount, total_bottles: Decimal) -> Self {
        Self::InvalidBottleCount {
            bottles,
            max: total_bottles.floor(),
        }
    }
}
