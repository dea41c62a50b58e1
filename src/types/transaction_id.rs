use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

use crate::types::TransactionId;

/// Hands out ids from the creation time in epoch milliseconds.
///
/// Two transactions created within the same millisecond would otherwise share
/// an id, so the generator never returns a value lower than or equal to the
/// previous one.
#[derive(Debug, Default)]
pub struct TransactionIdGenerator {
    last: AtomicI64,
}

impl TransactionIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self, now: DateTime<Utc>) -> TransactionId {
        let millis = now.timestamp_millis();
        let mut previous = self.last.load(Ordering::Acquire);

        loop {
            let candidate = millis.max(previous.saturating_add(1));

            match self.last.compare_exchange_weak(previous, candidate, Ordering::AcqRel, Ordering::Acquire) {
                Ok(_) => return candidate.to_string(),
                Err(actual) => previous = actual,
            }
        }
    }
}

/// Recovers the creation instant encoded in a millisecond id.
pub fn instant_from_id(id: &str) -> Option<DateTime<Utc>> {
    id.parse::<i64>().ok().and_then(DateTime::from_timestamp_millis)
}
