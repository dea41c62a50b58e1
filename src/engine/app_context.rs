use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::auth::{CredentialStore, Session};
use crate::engine::errors::AppError;
use crate::engine::TransactionStore;
use crate::models::{DailyHistogram, HISTOGRAM_DAYS, Ledger, LedgerError, PendingWithdrawal, Theme, Transaction};
use crate::remote::RemoteStore;
use crate::storage::{KeyValueStore, THEME_KEY};
use crate::types::{BottleCount, TransactionIdGenerator, UserName};

/// Everything the dashboard shows, computed in one go.
#[derive(Debug, Clone)]
pub struct Summary {
    pub user: Option<UserName>,
    pub balance: Decimal,
    pub total_bottles: Decimal,
    pub histogram: DailyHistogram,
    pub quick_amounts: Vec<Decimal>,
    pub online: bool,
    pub theme: Theme,
    pub transaction_count: usize,
}

/// The application state, passed explicitly to whatever drives it.
///
/// Holds the session, theme preference, transaction store, the in-memory
/// ledger and a withdrawal waiting for confirmation. Ledger operations require
/// a logged-in user.
pub struct AppContext<K: KeyValueStore, R: RemoteStore> {
    settings: Arc<K>,
    session: Session<K>,
    credentials: Arc<dyn CredentialStore>,
    store: TransactionStore<K, R>,
    ledger: Ledger,
    pending_withdrawal: Option<PendingWithdrawal>,
    ids: TransactionIdGenerator,
    clock: fn() -> DateTime<Utc>,
}

impl<K: KeyValueStore, R: RemoteStore> AppContext<K, R> {
    /// Must be called from within a Tokio runtime when `remote` is set.
    pub fn new(settings: Arc<K>, remote: Option<R>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            session: Session::new(settings.clone()),
            store: TransactionStore::new(settings.clone(), remote),
            settings,
            credentials,
            ledger: Ledger::new(),
            pending_withdrawal: None,
            ids: TransactionIdGenerator::new(),
            clock: Utc::now,
        }
    }

    /// Replaces the source of creation timestamps.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn current_user(&self) -> Result<Option<UserName>, AppError> {
        Ok(self.session.current_user()?)
    }

    /// Names accepted by `login`, lower-cased.
    pub fn known_users(&self) -> Vec<UserName> {
        self.credentials.names()
    }

    pub fn login(&mut self, name: &str, key: &str) -> Result<UserName, AppError> {
        let user = self.session.sign_in(self.credentials.as_ref(), name, key)?;
        info!("Logged in as [{user}]");

        Ok(user)
    }

    /// Ends the session and forgets the in-memory history. The local cache is
    /// kept for the next login.
    pub fn logout(&mut self) -> Result<(), AppError> {
        self.session.sign_out()?;
        self.ledger.clear();
        self.pending_withdrawal = None;

        Ok(())
    }

    /// The stored theme; unknown values fall back to the default.
    pub fn theme(&self) -> Result<Theme, AppError> {
        let Some(value) = self.settings.get(THEME_KEY)? else {
            return Ok(Theme::default());
        };

        Ok(value.parse().unwrap_or_else(|error| {
            warn!("{error}, using the default theme");
            Theme::default()
        }))
    }

    pub fn toggle_theme(&self) -> Result<Theme, AppError> {
        let theme = self.theme()?.toggled();
        self.settings.set(THEME_KEY, theme.as_str())?;

        Ok(theme)
    }

    /// Loads the history from the store into the ledger.
    pub async fn refresh(&mut self) -> Result<(), AppError> {
        self.session.require_user()?;

        let transactions = self.store.load().await?;
        self.ledger = Ledger::from_transactions(transactions);

        Ok(())
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn is_online(&self) -> bool {
        self.store.is_online()
    }

    pub fn has_remote(&self) -> bool {
        self.store.has_remote()
    }

    /// Records `bottles` returned bottles. Zero bottles records nothing.
    pub fn deposit(&mut self, bottles: BottleCount) -> Result<Transaction, AppError> {
        let user = self.session.require_user()?;
        let now = (self.clock)();
        let transaction = Transaction::deposit(self.ids.next(now), now, bottles, Some(user));

        self.record(transaction)
    }

    /// Checks `amount` against the balance and stages the withdrawal for
    /// confirmation, replacing any earlier staged one.
    pub fn request_withdrawal(&mut self, amount: Decimal) -> Result<PendingWithdrawal, AppError> {
        self.session.require_user()?;

        let pending = self.ledger.stage_withdrawal(amount)?;
        self.pending_withdrawal = Some(pending.clone());

        Ok(pending)
    }

    pub fn pending_withdrawal(&self) -> Option<&PendingWithdrawal> {
        self.pending_withdrawal.as_ref()
    }

    pub fn cancel_withdrawal(&mut self) {
        self.pending_withdrawal = None;
    }

    /// Commits the staged withdrawal with the confirmed bottle count.
    ///
    /// A rejected count keeps the withdrawal staged so the user can correct it.
    pub fn confirm_withdrawal(&mut self, bottles: BottleCount) -> Result<Transaction, AppError> {
        let user = self.session.require_user()?;
        let pending = self.pending_withdrawal.clone().ok_or(LedgerError::NoPendingWithdrawal)?;
        let now = (self.clock)();
        let transaction = pending.to_transaction(self.ids.next(now), now, bottles, Some(user));

        let transaction = self.record(transaction)?;
        self.pending_withdrawal = None;

        Ok(transaction)
    }

    /// Deletes the whole history locally and remotely.
    pub fn clear_history(&mut self) -> Result<(), AppError> {
        self.session.require_user()?;

        self.ledger.clear();
        self.store.clear_all()?;
        info!("Transaction history cleared");

        Ok(())
    }

    /// Clears the history and any staged withdrawal.
    pub fn reset_all(&mut self) -> Result<(), AppError> {
        self.clear_history()?;
        self.pending_withdrawal = None;

        Ok(())
    }

    pub fn summary<Tz: TimeZone>(&self, today: NaiveDate, timezone: &Tz) -> Result<Summary, AppError> {
        Ok(Summary {
            user: self.current_user()?,
            balance: self.ledger.balance(),
            total_bottles: self.ledger.total_bottles(),
            histogram: self.ledger.daily_histogram(today, timezone, HISTOGRAM_DAYS),
            quick_amounts: self.ledger.quick_withdrawal_amounts(),
            online: self.is_online(),
            theme: self.theme()?,
            transaction_count: self.ledger.len(),
        })
    }

    /// Waits for queued remote writes before the process exits.
    pub async fn shutdown(self) -> Result<(), AppError> {
        Ok(self.store.shutdown().await?)
    }

    /// Nothing reaches the ledger unless the local cache accepted it.
    fn record(&mut self, transaction: Transaction) -> Result<Transaction, AppError> {
        self.ledger.validate(&transaction)?;
        self.store.append(transaction.clone())?;
        self.ledger.apply(transaction.clone())?;
        debug!("Transaction [{}]:[{}] recorded", transaction.id, transaction.transaction_type);

        Ok(transaction)
    }
}
