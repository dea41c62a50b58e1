use crate::auth::errors::AuthError;

/// Source of truth for who may use the tracker.
///
/// The only implementation is a plain-text allow-list, which is fine for a
/// handful of friends sharing one balance but nothing more. A real deployment
/// should put hashed secrets behind this trait instead.
pub trait CredentialStore: Send + Sync {
    /// True iff `name` is known (case-insensitively) and `key` matches its key
    /// exactly.
    fn verify(&self, name: &str, key: &str) -> bool;

    /// Known user names, lower-cased.
    fn names(&self) -> Vec<String>;
}

#[derive(Debug, Clone)]
pub struct StaticCredentials {
    users: Vec<(String, String)>,
}

impl StaticCredentials {
    const BUILTIN: [(&'static str, &'static str); 4] = [
        ("leander", "pfand-leander-2024-key"),
        ("theo", "pfand-theo-2024-key"),
        ("evan", "pfand-evan-2024-key"),
        ("ronon", "pfand-ronon-2024-key"),
    ];

    /// The accounts compiled into the binary.
    pub fn builtin() -> Self {
        Self::from_pairs(Self::BUILTIN)
    }

    pub fn from_pairs<I, N, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, K)>,
        N: Into<String>,
        K: Into<String>,
    {
        Self {
            users: pairs.into_iter().map(|(name, key)| (name.into(), key.into())).collect(),
        }
    }

    /// Parses a `name:key,name:key` list, as found in `PFAND_ACCESS_KEYS`.
    pub fn parse(value: &str) -> Result<Self, AuthError> {
        let mut users = Vec::new();

        for entry in value.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
            let Some((name, key)) = entry.split_once(':') else {
                return Err(AuthError::MalformedKeyList(format!("entry '{entry}' has no ':' separator")));
            };

            let (name, key) = (name.trim(), key.trim());

            if name.is_empty() || key.is_empty() {
                return Err(AuthError::MalformedKeyList(format!("entry '{entry}' has an empty name or key")));
            }

            users.push((name.to_string(), key.to_string()));
        }

        if users.is_empty() {
            return Err(AuthError::MalformedKeyList("no entries".to_string()));
        }

        Ok(Self { users })
    }
}

impl CredentialStore for StaticCredentials {
    fn verify(&self, name: &str, key: &str) -> bool {
        self.users
            .iter()
            .find(|(known_name, _)| known_name.to_lowercase() == name.to_lowercase())
            .is_some_and(|(_, known_key)| known_key == key)
    }

    fn names(&self) -> Vec<String> {
        self.users.iter().map(|(name, _)| name.to_lowercase()).collect()
    }
}

pub fn validate_user(credentials: &dyn CredentialStore, name: &str, key: &str) -> bool {
    credentials.verify(name, key)
}
