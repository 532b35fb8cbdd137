//! Translation lookup backed by embedded JSON catalogs

use std::collections::HashMap;

use thiserror::Error;

const CATALOGS: &[(&str, &str)] = &[
    ("en", include_str!("../../assets/locales/en.json")),
    ("de", include_str!("../../assets/locales/de.json")),
];

const FALLBACK_LOCALE: &str = "en";

#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("unknown locale: {0}")]
    Unknown(String),
    #[error("invalid catalog for {locale}: {source}")]
    Catalog {
        locale: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Available locale codes
pub fn locales() -> impl Iterator<Item = &'static str> {
    CATALOGS.iter().map(|(code, _)| *code)
}

fn catalog(locale: &str) -> Result<HashMap<String, String>, LocaleError> {
    let (_, raw) = CATALOGS
        .iter()
        .find(|(code, _)| *code == locale)
        .ok_or_else(|| LocaleError::Unknown(locale.to_string()))?;
    serde_json::from_str(raw).map_err(|source| LocaleError::Catalog {
        locale: locale.to_string(),
        source,
    })
}

/// Key-based translation lookup
#[derive(Debug, Clone)]
pub struct Translator {
    locale: String,
    entries: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

impl Default for Translator {
    fn default() -> Self {
        let fallback = catalog(FALLBACK_LOCALE).unwrap_or_else(|e| {
            tracing::error!("{}", e);
            HashMap::new()
        });
        Self {
            locale: FALLBACK_LOCALE.to_string(),
            entries: HashMap::new(),
            fallback,
        }
    }
}

impl Translator {
    /// Load the catalog for `locale`
    pub fn new(locale: &str) -> Result<Self, LocaleError> {
        let entries = catalog(locale)?;
        Ok(Self {
            locale: locale.to_string(),
            entries,
            ..Self::default()
        })
    }

    /// Load `locale`, falling back to English when it is unavailable
    pub fn new_or_default(locale: &str) -> Self {
        Self::new(locale).unwrap_or_else(|e| {
            tracing::error!("{}, falling back to {}", e, FALLBACK_LOCALE);
            Self::default()
        })
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Translate `key`; falls back to English, then to the key itself
    pub fn t(&self, key: &str) -> String {
        self.entries
            .get(key)
            .or_else(|| self.fallback.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_catalogs_parse() {
        for locale in locales() {
            assert!(Translator::new(locale).is_ok(), "catalog {} failed", locale);
        }
    }

    #[test]
    fn test_lookup_and_fallbacks() {
        let de = Translator::new("de").unwrap();
        assert_eq!(de.t("untitled_company"), "Unbenannte Firma");
        assert_eq!(de.t("no_date"), "Not set");
        assert_eq!(de.t("missing_key"), "missing_key");
    }

    #[test]
    fn test_unknown_locale() {
        assert!(matches!(Translator::new("xx"), Err(LocaleError::Unknown(_))));
        assert_eq!(Translator::new_or_default("xx").locale(), "en");
    }
}
