use chrono::{NaiveDate, TimeZone};
use rust_decimal::Decimal;

use crate::models::errors::LedgerError;
use crate::models::{DailyHistogram, PendingWithdrawal, Transaction, TransactionType};
use crate::types::{bottles_to_amount, nearest_bottle_count};

/// Preset cash-out amounts offered next to the custom amount field.
pub const QUICK_WITHDRAWAL_AMOUNTS: [u32; 3] = [5, 10, 20];

/// The shared transaction history and everything derived from it.
///
/// Transactions are kept newest first. Derived values are recomputed from the
/// full list on every call; the list is short enough that caching them would
/// only add ways to get out of sync.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already persisted history. Stored records are trusted and not
    /// re-validated.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn clear(&mut self) {
        self.transactions.clear();
    }

    /// Deposited minus withdrawn cash.
    pub fn balance(&self) -> Decimal {
        self.transactions.iter().map(Transaction::signed_amount).sum()
    }

    /// Deposited minus withdrawn bottles, using the bottle equivalent of the
    /// amount for records without a bottle count.
    pub fn total_bottles(&self) -> Decimal {
        self.transactions.iter().map(Transaction::signed_bottles).sum()
    }

    /// Checks a new transaction against the current state without recording
    /// it.
    ///
    /// # Errors
    /// Returns `LedgerError` if:
    /// - The id is already recorded.
    /// - A deposit holds no bottles or its amount is not `bottles * 0.25`.
    /// - A withdrawal is not positive or exceeds the balance.
    /// - A withdrawal's bottle count is outside `1..=total_bottles`.
    pub fn validate(&self, transaction: &Transaction) -> Result<(), LedgerError> {
        if self.transactions.iter().any(|recorded| recorded.id == transaction.id) {
            return Err(LedgerError::duplicate_transaction(transaction))
        }

        match transaction.transaction_type {
            TransactionType::Deposit => self.check_deposit(transaction),
            TransactionType::Withdrawal => self.check_withdrawal(transaction)
        }
    }

    /// Validates a new transaction and records it at the head of the list.
    pub fn apply(&mut self, transaction: Transaction) -> Result<(), LedgerError> {
        self.validate(&transaction)?;
        self.transactions.insert(0, transaction);

        Ok(())
    }

    /// First step of a withdrawal: checks the amount against the balance and
    /// proposes the matching bottle count.
    pub fn stage_withdrawal(&self, amount: Decimal) -> Result<PendingWithdrawal, LedgerError> {
        self.check_withdrawal_amount(amount)?;

        Ok(PendingWithdrawal {
            amount,
            proposed_bottles: nearest_bottle_count(amount),
        })
    }

    /// The quick withdrawal amounts the balance can currently cover.
    pub fn quick_withdrawal_amounts(&self) -> Vec<Decimal> {
        let balance = self.balance();

        QUICK_WITHDRAWAL_AMOUNTS
            .iter()
            .map(|amount| Decimal::from(*amount))
            .filter(|amount| *amount <= balance)
            .collect()
    }

    pub fn daily_histogram<Tz: TimeZone>(&self, today: NaiveDate, timezone: &Tz, days: u32) -> DailyHistogram {
        DailyHistogram::build(&self.transactions, today, timezone, days)
    }

    fn check_deposit(&self, transaction: &Transaction) -> Result<(), LedgerError> {
        match transaction.bottles {
            Some(0) => Err(LedgerError::empty_deposit(transaction)),
            Some(bottles) if bottles_to_amount(bottles) != transaction.amount => {
                Err(LedgerError::amount_mismatch(transaction, bottles))
            }
            Some(_) => Ok(()),
            None if transaction.amount <= Decimal::ZERO => Err(LedgerError::empty_deposit(transaction)),
            None => Ok(())
        }
    }

    fn check_withdrawal(&self, transaction: &Transaction) -> Result<(), LedgerError> {
        self.check_withdrawal_amount(transaction.amount)?;

        let total_bottles = self.total_bottles();
        let bottles = transaction.bottles.unwrap_or_else(|| nearest_bottle_count(transaction.amount));

        if bottles == 0 || Decimal::from(bottles) > total_bottles {
            return Err(LedgerError::invalid_bottle_count(bottles, total_bottles))
        }

        Ok(())
    }

    fn check_withdrawal_amount(&self, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::non_positive_amount(amount))
        }

        let balance = self.balance();

        if amount > balance {
            return Err(LedgerError::insufficient_funds(amount, balance))
        }

        Ok(())
    }
}
