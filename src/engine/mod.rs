mod app_context;
mod errors;
mod transaction_store;

pub use app_context::{AppContext, Summary};
pub use errors::{AppError, StoreError};
pub use transaction_store::TransactionStore;
