//! Key-value persistence for in-progress form drafts.
//!
//! Keys are `<prefix><field name>` (prefix `draft_` by default) and values are the raw
//! field text. A missing key means the field was never touched or has been cleared.

mod file;

pub use file::JsonFileStore;

use crate::core::FieldName;
use crate::error::StoreError;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;

pub const DEFAULT_DRAFT_PREFIX: &str = "draft_";

pub trait DraftStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Builds store keys for one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftKeys {
    prefix: String,
}

impl DraftKeys {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn key_for(&self, field: &FieldName) -> String {
        format!("{}{}", self.prefix, field)
    }
}

impl Default for DraftKeys {
    fn default() -> Self {
        Self::new(DEFAULT_DRAFT_PREFIX)
    }
}

/// Values recovered from the store, in form field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormDraft {
    entries: IndexMap<FieldName, String>,
}

impl FormDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FieldName, value: String) {
        self.entries.insert(field, value);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl DraftStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_use_prefix() {
        let keys = DraftKeys::default();
        assert_eq!(keys.key_for(&FieldName::from("email")), "draft_email");
        assert_eq!(
            DraftKeys::new("booking_").key_for(&FieldName::from("checkin")),
            "booking_checkin"
        );
    }

    #[test]
    fn memory_store_last_write_wins() {
        let mut store = MemoryStore::new();
        store.set("draft_name", "A").expect("set");
        store.set("draft_name", "Asha").expect("set");
        assert_eq!(store.get("draft_name").as_deref(), Some("Asha"));
        assert_eq!(store.len(), 1);

        store.remove("draft_name").expect("remove");
        assert!(!store.contains("draft_name"));
        store.remove("draft_name").expect("removing a missing key is fine");
        assert!(store.is_empty());
    }

    #[test]
    fn form_draft_serializes_in_insertion_order() {
        let mut draft = FormDraft::new();
        draft.insert("phone".into(), "9876543210".to_string());
        draft.insert("email".into(), "x@y.com".to_string());
        assert_eq!(draft.len(), 2);
        assert_eq!(draft.get("phone"), Some("9876543210"));
        assert_eq!(draft.get("email"), Some("x@y.com"));
        assert_eq!(
            serde_json::to_string(&draft).expect("serialize"),
            r#"{"phone":"9876543210","email":"x@y.com"}"#
        );
    }
}
