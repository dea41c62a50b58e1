mod credentials;
mod errors;
mod session;

pub use credentials::{CredentialStore, StaticCredentials, validate_user};
pub use errors::AuthError;
pub use session::Session;
