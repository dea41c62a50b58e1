use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::TransactionType;
use crate::types::{BottleCount, TransactionId, UserName, bottle_equivalent, bottles_to_amount, instant_from_id};

/// Format of the human readable `date` field, e.g. `17.10.2024, 12:30`.
pub const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y, %H:%M";

/// A single deposit or withdrawal, as stored in the local cache and in the
/// remote `transactions` table.
///
/// Records are never changed once created. The field names double as the JSON
/// column names, so caches written by earlier versions of the tracker (which
/// lack `created_at` and sometimes `bottles`) still deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Creation time in epoch milliseconds, as a string.
    pub id: TransactionId,
    /// Localized creation time for display.
    pub date: String,
    /// Cash value of the transaction, always positive.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Bottles represented by the transaction, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottles: Option<BottleCount>,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The user who recorded the transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn deposit(id: TransactionId, created_at: DateTime<Utc>, bottles: BottleCount, user_id: Option<UserName>) -> Self {
        Self {
            id,
            date: display_date(&created_at.with_timezone(&Local)),
            amount: bottles_to_amount(bottles),
            bottles: Some(bottles),
            transaction_type: TransactionType::Deposit,
            user_id,
            created_at: Some(created_at),
        }
    }

    pub fn withdrawal(
        id: TransactionId,
        created_at: DateTime<Utc>,
        amount: Decimal,
        bottles: BottleCount,
        user_id: Option<UserName>,
    ) -> Self {
        Self {
            id,
            date: display_date(&created_at.with_timezone(&Local)),
            amount,
            bottles: Some(bottles),
            transaction_type: TransactionType::Withdrawal,
            user_id,
            created_at: Some(created_at),
        }
    }

    pub fn is_deposit(&self) -> bool {
        self.transaction_type == TransactionType::Deposit
    }

    /// The recorded bottle count, or the bottle equivalent of the amount for
    /// records without one.
    pub fn bottle_equivalent(&self) -> Decimal {
        self.bottles
            .map(Decimal::from)
            .unwrap_or_else(|| bottle_equivalent(self.amount))
    }

    /// The amount with its effect on the balance: positive for deposits,
    /// negative for withdrawals.
    pub fn signed_amount(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Deposit => self.amount,
            TransactionType::Withdrawal => -self.amount,
        }
    }

    pub fn signed_bottles(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Deposit => self.bottle_equivalent(),
            TransactionType::Withdrawal => -self.bottle_equivalent(),
        }
    }

    pub fn created_instant(&self) -> Option<DateTime<Utc>> {
        self.created_at.or_else(|| instant_from_id(&self.id))
    }

    /// The calendar day the transaction was created on in `timezone`.
    ///
    /// Falls back to the date part of the display string for records whose
    /// creation instant cannot be recovered.
    pub fn calendar_date<Tz: TimeZone>(&self, timezone: &Tz) -> Option<NaiveDate> {
        match self.created_instant() {
            Some(instant) => Some(instant.with_timezone(timezone).date_naive()),
            None => NaiveDateTime::parse_from_str(&self.date, DISPLAY_DATE_FORMAT)
                .ok()
                .map(|date_time| date_time.date()),
        }
    }
}

pub fn display_date<Tz: TimeZone>(instant: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.format(DISPLAY_DATE_FORMAT).to_string()
}
