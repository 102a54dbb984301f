//! Per-user settings.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    Error,
    currency::{DEFAULT_CURRENCY, find_currency},
};

/// Settings that apply to everything a user sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    /// The ISO 4217 code amounts are displayed in.
    ///
    /// A missing, null or blank currency is read as the default currency.
    #[serde(default = "default_currency", deserialize_with = "currency_or_default")]
    pub currency: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_owned()
}

fn currency_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let currency = Option::<String>::deserialize(deserializer)?;

    Ok(currency
        .map(|currency| currency.trim().to_owned())
        .filter(|currency| !currency.is_empty())
        .unwrap_or_else(default_currency))
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            currency: default_currency(),
        }
    }
}

impl UserSettings {
    /// Create settings with `currency` as the default currency.
    ///
    /// # Errors
    /// Returns [Error::UnknownCurrency] if `currency` is not one of the supported currencies.
    pub fn new(currency: &str) -> Result<Self, Error> {
        match find_currency(currency) {
            Some(currency) => Ok(Self {
                currency: currency.code.to_owned(),
            }),
            None => Err(Error::UnknownCurrency(currency.to_owned())),
        }
    }

    /// Load settings from the JSON file at `path`.
    ///
    /// A missing file means the user has not saved any settings yet, in which
    /// case the defaults are used.
    ///
    /// # Errors
    /// Returns an [Error::Io] if the file exists but cannot be read, or an
    /// [Error::Json] if it does not contain a settings object.
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            tracing::debug!("no settings at {path:?}, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&text)?;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::Error;

    use super::UserSettings;

    #[test]
    fn defaults_to_usd() {
        assert_eq!(UserSettings::default().currency, "USD");
    }

    #[test]
    fn new_rejects_unsupported_currency() {
        assert_eq!(
            UserSettings::new("ZZZ"),
            Err(Error::UnknownCurrency("ZZZ".to_owned()))
        );
        assert_eq!(UserSettings::new("EUR").unwrap().currency, "EUR");
    }

    #[test]
    fn load_reads_currency() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"currency": "GBP"}}"#).unwrap();

        let got = UserSettings::load(file.path()).unwrap();

        assert_eq!(got.currency, "GBP");
    }

    #[test]
    fn load_defaults_missing_field() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();

        let got = UserSettings::load(file.path()).unwrap();

        assert_eq!(got, UserSettings::default());
    }

    #[test]
    fn load_defaults_blank_currency() {
        for text in [r#"{"currency": ""}"#, r#"{"currency": "  "}"#] {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            write!(file, "{text}").unwrap();

            let got = UserSettings::load(file.path()).unwrap();

            assert_eq!(got, UserSettings::default(), "loading {text}");
        }
    }

    #[test]
    fn load_defaults_null_currency() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"currency": null}}"#).unwrap();

        let got = UserSettings::load(file.path()).unwrap();

        assert_eq!(got.currency, "USD");
    }

    #[test]
    fn load_defaults_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let got = UserSettings::load(&dir.path().join("settings.json")).unwrap();

        assert_eq!(got, UserSettings::default());
    }

    #[test]
    fn load_fails_on_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let got = UserSettings::load(file.path());

        assert!(matches!(got, Err(Error::Json(_))));
    }
}
