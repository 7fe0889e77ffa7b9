//! Flat link records: the persisted unit of the collection

use serde::{Deserialize, Serialize};

/// A named link with an optional URL and an optional parent reference.
///
/// The name doubles as identity and as the foreign key other records use in
/// `parent_name`. A parent reference may dangle or take part in a cycle; the
/// tree builder copes with both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(
        default,
        rename = "parent",
        alias = "parentName",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_name: Option<String>,
}

impl FlatRecord {
    /// Root-level record without url.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
            parent_name: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_name = Some(parent.into());
        self
    }

    pub fn is_root_level(&self) -> bool {
        self.parent_name.is_none()
    }
}

/// Unvalidated input for a new record, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDraft {
    pub name: String,
    pub url: Option<String>,
    pub parent: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_record_without_options_when_serializing_then_omits_them() {
        let toml = toml::to_string(&FlatRecord::new("Work")).unwrap();
        assert_eq!(toml.trim(), r#"name = "Work""#);
    }

    #[test]
    fn given_parent_name_alias_when_deserializing_then_sets_parent() {
        let record: FlatRecord =
            toml::from_str("name = \"Email\"\nparentName = \"Work\"\n").unwrap();
        assert_eq!(record.parent_name.as_deref(), Some("Work"));
        assert!(!record.is_root_level());
    }
}
