use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::auth::{AuthError, StaticCredentials};
use crate::remote::RemoteConfig;

pub const REMOTE_URL_VAR: &str = "PFAND_REMOTE_URL";
pub const REMOTE_TOKEN_VAR: &str = "PFAND_REMOTE_TOKEN";
pub const DATA_DIR_VAR: &str = "PFAND_DATA_DIR";
pub const LANGUAGE_VAR: &str = "PFAND_LANGUAGE";
pub const ACCESS_KEYS_VAR: &str = "PFAND_ACCESS_KEYS";

pub const DEFAULT_DATA_DIR: &str = ".pfand";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unsupported language '{0}', expected 'en' or 'de'")]
    UnsupportedLanguage(String),
    #[error("PFAND_ACCESS_KEYS: {0}")]
    AccessKeys(#[from] AuthError),
}

/// Display language: the decimal separator of shown money and the CLI texts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    En,
    De,
}

impl Language {
    pub fn decimal_separator(self) -> char {
        match self {
            Language::En => '.',
            Language::De => ',',
        }
    }

    /// `amount` with two decimals and the euro sign, e.g. `2,50€` in German.
    pub fn format_money(self, amount: Decimal) -> String {
        let formatted = format!("{:.2}", amount.round_dp(2));

        format!("{}€", formatted.replace('.', &self.decimal_separator().to_string()))
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "de" => Ok(Language::De),
            other => Err(ConfigError::UnsupportedLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::En => write!(f, "en"),
            Language::De => write!(f, "de"),
        }
    }
}

/// Runtime settings, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` runs the tracker local-only.
    pub remote: Option<RemoteConfig>,
    pub data_dir: PathBuf,
    pub language: Language,
    /// `None` means the built-in accounts.
    pub credentials: Option<StaticCredentials>,
}

impl Config {
    /// Reads the process environment. Call `dotenv::dotenv()` first to pick
    /// up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from `lookup`; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).map(|value| value.trim().to_string()).filter(|value| !value.is_empty());

        let remote = match (lookup(REMOTE_URL_VAR), lookup(REMOTE_TOKEN_VAR)) {
            (Some(url), Some(token)) => Some(RemoteConfig { url, token }),
            _ => None,
        };

        let data_dir = lookup(DATA_DIR_VAR).map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let language = match lookup(LANGUAGE_VAR) {
            Some(value) => value.parse()?,
            None => Language::default(),
        };

        let credentials = lookup(ACCESS_KEYS_VAR).map(|value| StaticCredentials::parse(&value)).transpose()?;

        Ok(Self {
            remote,
            data_dir,
            language,
            credentials,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use anyhow::Result;

    use crate::auth::CredentialStore;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();

        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_any_variables() -> Result<()> {
        let config = Config::from_lookup(lookup_from(&[]))?;

        assert!(config.remote.is_none());
        assert_eq!(config.data_dir, PathBuf::from(".pfand"));
        assert_eq!(config.language, Language::En);
        assert!(config.credentials.is_none());

        Ok(())
    }

    #[test]
    fn test_remote_requires_both_url_and_token() -> Result<()> {
        let only_url = Config::from_lookup(lookup_from(&[(REMOTE_URL_VAR, "https://example.supabase.co")]))?;
        let blank_token = Config::from_lookup(lookup_from(&[
            (REMOTE_URL_VAR, "https://example.supabase.co"),
            (REMOTE_TOKEN_VAR, "  "),
        ]))?;
        let complete = Config::from_lookup(lookup_from(&[
            (REMOTE_URL_VAR, "https://example.supabase.co"),
            (REMOTE_TOKEN_VAR, "anon"),
        ]))?;

        assert!(only_url.remote.is_none());
        assert!(blank_token.remote.is_none());
        assert_eq!(
            complete.remote,
            Some(RemoteConfig {
                url: "https://example.supabase.co".to_string(),
                token: "anon".to_string(),
            })
        );

        Ok(())
    }

    #[test]
    fn test_language_and_access_keys_are_read() -> Result<()> {
        let config = Config::from_lookup(lookup_from(&[
            (LANGUAGE_VAR, "DE"),
            (ACCESS_KEYS_VAR, "alice:secret"),
            (DATA_DIR_VAR, "/tmp/pfand"),
        ]))?;

        assert_eq!(config.language, Language::De);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/pfand"));
        assert!(config.credentials.is_some_and(|credentials| credentials.verify("alice", "secret")));

        Ok(())
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            Config::from_lookup(lookup_from(&[(LANGUAGE_VAR, "fr")])),
            Err(ConfigError::UnsupportedLanguage(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup_from(&[(ACCESS_KEYS_VAR, "alice")])),
            Err(ConfigError::AccessKeys(_))
        ));
    }

    #[test]
    fn test_money_uses_the_language_separator() -> Result<()> {
        let amount: Decimal = "2.5".parse()?;

        assert_eq!(Language::En.format_money(amount), "2.50€");
        assert_eq!(Language::De.format_money(amount), "2,50€");
        assert_eq!(Language::En.format_money(Decimal::ZERO), "0.00€");

        Ok(())
    }
}
