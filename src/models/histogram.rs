use std::collections::HashMap;

use chrono::{Days, NaiveDate, TimeZone};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::models::Transaction;

/// Length of the deposit chart on the dashboard.
pub const HISTOGRAM_DAYS: u32 = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct DailyBucket {
    pub date: NaiveDate,
    /// Bottle equivalent of all deposits made on `date`.
    pub bottles: Decimal,
}

/// Deposited bottles per calendar day for a trailing window, oldest day first.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyHistogram {
    buckets: Vec<DailyBucket>,
}

impl DailyHistogram {
    /// Buckets deposits by the calendar day of their creation instant in
    /// `timezone`, for the `days` days ending with `today`.
    pub fn build<Tz: TimeZone>(transactions: &[Transaction], today: NaiveDate, timezone: &Tz, days: u32) -> Self {
        let dates: Vec<NaiveDate> = (0..days)
            .rev()
            .filter_map(|offset| today.checked_sub_days(Days::new(u64::from(offset))))
            .collect();

        let mut totals: HashMap<NaiveDate, Decimal> = dates.iter().map(|date| (*date, Decimal::ZERO)).collect();

        for transaction in transactions.iter().filter(|transaction| transaction.is_deposit()) {
            let Some(date) = transaction.calendar_date(timezone) else {
                continue;
            };

            if let Some(total) = totals.get_mut(&date) {
                *total += transaction.bottle_equivalent();
            }
        }

        let buckets = dates
            .into_iter()
            .map(|date| DailyBucket {
                date,
                bottles: totals.get(&date).copied().unwrap_or_default(),
            })
            .collect();

        Self { buckets }
    }

    pub fn buckets(&self) -> &[DailyBucket] {
        &self.buckets
    }

    pub fn total(&self) -> Decimal {
        self.buckets.iter().map(|bucket| bucket.bottles).sum()
    }

    /// The value a full-height bar stands for. Never below one bottle, so an
    /// empty week does not divide by zero.
    pub fn scale_max(&self) -> Decimal {
        self.buckets
            .iter()
            .map(|bucket| bucket.bottles)
            .fold(Decimal::ONE, Decimal::max)
    }

    /// Length of the bar for `bucket` when the tallest bar is `width` long.
    pub fn bar_length(&self, bucket: &DailyBucket, width: usize) -> usize {
        let ratio = bucket.bottles.max(Decimal::ZERO) / self.scale_max();

        (ratio * Decimal::from(width)).round().to_usize().unwrap_or(0)
    }
}
