//! Company settings store: the current company plus pending changes

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::custom_field::FieldProps;
use super::field::FieldValue;

const SAMPLE_COMPANY: &str = include_str!("../../assets/sample_company.json");

/// Errors raised while reading a company file
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read company file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid company data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Company settings relevant to this client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanySettings {
    pub name: Option<String>,
    pub company_logo: Option<String>,
    /// Values of custom fields, keyed like `custom_fields`
    pub custom_values: BTreeMap<String, FieldValue>,
}

/// A company record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    pub id: String,
    pub settings: CompanySettings,
    /// Field key to field descriptor
    pub custom_fields: BTreeMap<String, String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CompanyFile {
    Snapshot {
        company: Company,
        #[serde(default)]
        changes: Option<Company>,
    },
    Bare(Company),
}

/// Holds the current company and an overlay of not-yet-applied changes
#[derive(Debug, Clone, Default)]
pub struct CompanyStore {
    /// Last known persisted company
    pub current: Option<Company>,
    /// Pending changes, a full copy of the company once editing starts
    pub changes: Option<Company>,
    /// File the company was loaded from
    pub source: Option<PathBuf>,
}

impl CompanyStore {
    /// Load a company file
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut store = Self::from_json(&content)?;
        store.source = Some(path.to_path_buf());
        tracing::info!("Loaded company from: {}", path.display());
        Ok(store)
    }

    /// Build a store from JSON: either a bare company or `{"company", "changes"}`
    pub fn from_json(content: &str) -> Result<Self, StoreError> {
        let (current, changes) = match serde_json::from_str(content)? {
            CompanyFile::Snapshot { company, changes } => (company, changes),
            CompanyFile::Bare(company) => (company, None),
        };

        Ok(Self {
            current: Some(current),
            changes,
            source: None,
        })
    }

    /// The bundled demo company
    pub fn sample() -> Self {
        Self::from_json(SAMPLE_COMPANY).unwrap_or_else(|e| {
            tracing::error!("Bundled sample company is invalid: {}", e);
            Self::default()
        })
    }

    /// Overlay for editing, seeded from the current company on first use
    pub fn stage(&mut self) -> &mut Company {
        self.changes
            .get_or_insert_with(|| self.current.clone().unwrap_or_default())
    }

    /// The company as it would look with pending changes applied
    pub fn effective(&self) -> Option<&Company> {
        self.changes.as_ref().or(self.current.as_ref())
    }

    /// Whether pending changes differ from the current company
    pub fn is_dirty(&self) -> bool {
        match &self.changes {
            Some(changes) => self.current.as_ref() != Some(changes),
            None => false,
        }
    }

    /// Drop pending changes
    pub fn discard_changes(&mut self) {
        if self.changes.take().is_some() {
            tracing::info!("Discarded pending company changes");
        }
    }

    /// Promote pending changes to the current company (in memory only)
    pub fn apply_changes(&mut self) {
        if let Some(changes) = self.changes.take() {
            self.current = Some(changes);
            tracing::info!("Applied pending company changes");
        }
    }

    /// Stage a custom field value
    pub fn set_custom_value(&mut self, key: &str, value: FieldValue) {
        self.stage()
            .settings
            .custom_values
            .insert(key.to_string(), value);
    }

    /// Keys of configured custom fields, in order
    pub fn custom_field_keys(&self) -> Vec<String> {
        self.effective()
            .map(|company| company.custom_fields.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Inputs for the control rendering custom field `key`
    pub fn custom_field_props(&self, key: &str) -> Option<FieldProps> {
        let company = self.effective()?;
        let descriptor = company.custom_fields.get(key)?;
        let value = company
            .settings
            .custom_values
            .get(key)
            .cloned()
            .unwrap_or_default();
        Some(FieldProps::new(key, descriptor.clone(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const COMPANY: &str = r#"{
        "id": "c1",
        "settings": { "name": "Acme", "company_logo": "https://cdn.example.com/a/b/c.png" },
        "custom_fields": { "company1": "|switch", "company2": "North,South|region" }
    }"#;

    #[test]
    fn test_bare_company_json() {
        let store = CompanyStore::from_json(COMPANY).unwrap();
        let current = store.current.as_ref().unwrap();
        assert_eq!(current.id, "c1");
        assert_eq!(current.settings.name.as_deref(), Some("Acme"));
        assert!(store.changes.is_none());
        assert_eq!(store.custom_field_keys(), vec!["company1", "company2"]);
    }

    #[test]
    fn test_snapshot_json_with_changes() {
        let json = r#"{
            "company": { "settings": { "name": "Acme" } },
            "changes": { "settings": { "name": "Acme Ltd", "unknown_key": 1 } }
        }"#;
        let store = CompanyStore::from_json(json).unwrap();
        assert_eq!(
            store.effective().unwrap().settings.name.as_deref(),
            Some("Acme Ltd")
        );
        assert!(store.is_dirty());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        assert!(matches!(
            CompanyStore::from_json("{ not json"),
            Err(StoreError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(COMPANY.as_bytes()).unwrap();

        let store = CompanyStore::load(file.path()).unwrap();
        assert_eq!(store.source.as_deref(), Some(file.path()));

        let missing = CompanyStore::load(Path::new("/nonexistent/company.json"));
        assert!(matches!(missing, Err(StoreError::Io { .. })));
    }

    #[test]
    fn test_stage_apply_discard() {
        let mut store = CompanyStore::from_json(COMPANY).unwrap();
        assert!(!store.is_dirty());

        store.stage();
        assert!(!store.is_dirty());

        store.set_custom_value("company1", FieldValue::Bool(true));
        assert!(store.is_dirty());
        assert_eq!(
            store.custom_field_props("company1").unwrap().default_value,
            FieldValue::Bool(true)
        );

        store.discard_changes();
        assert!(!store.is_dirty());
        assert_eq!(
            store.custom_field_props("company1").unwrap().default_value,
            FieldValue::Empty
        );

        store.set_custom_value("company2", FieldValue::from("North"));
        store.apply_changes();
        assert!(store.changes.is_none());
        let current = store.current.as_ref().unwrap();
        assert_eq!(
            current.settings.custom_values.get("company2"),
            Some(&FieldValue::from("North"))
        );
    }

    #[test]
    fn test_custom_field_props() {
        let store = CompanyStore::from_json(COMPANY).unwrap();
        let props = store.custom_field_props("company2").unwrap();
        assert_eq!(props.field, "company2");
        assert_eq!(props.value, "North,South|region");
        assert!(store.custom_field_props("company9").is_none());
    }

    #[test]
    fn test_sample_company_loads() {
        let store = CompanyStore::sample();
        assert!(store.current.is_some());
        assert!(!store.custom_field_keys().is_empty());
    }
}
