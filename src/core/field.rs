use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Stable name of a form field, matching the `name` attribute in the page markup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName(String);

impl FieldName {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Id of the sibling element that displays this field's inline error.
    pub fn error_element_id(&self) -> String {
        format!("{}-error", self.0)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Borrow<str> for FieldName {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<String> for FieldName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for FieldName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Select,
    Textarea,
    Date,
}

impl FieldKind {
    /// Minimum trimmed length applied when the field spec does not set one.
    pub fn default_min_length(self) -> Option<usize> {
        match self {
            Self::Text => Some(2),
            Self::Textarea => Some(10),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: FieldName,
    #[serde(default)]
    pub label: Option<String>,
    pub kind: FieldKind,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default)]
    pub min_length: Option<usize>,
    /// Replaces the kind-specific error text.
    #[serde(default)]
    pub message: Option<String>,
}

fn default_required() -> bool {
    true
}

impl FieldSpec {
    pub fn new(name: impl Into<FieldName>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: None,
            kind,
            required: true,
            min_length: None,
            message: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Label used in messages, falling back to a capitalized field name.
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => capitalize(self.name.as_str()),
        }
    }

    pub fn effective_min_length(&self) -> Option<usize> {
        self.min_length.or_else(|| self.kind.default_min_length())
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldKind, FieldName, FieldSpec};

    #[test]
    fn error_element_follows_name_convention() {
        assert_eq!(FieldName::from("email").error_element_id(), "email-error");
    }

    #[test]
    fn label_falls_back_to_capitalized_name() {
        let spec = FieldSpec::new("message", FieldKind::Textarea);
        assert_eq!(spec.display_label(), "Message");
        assert_eq!(spec.with_label("Your message").display_label(), "Your message");
    }

    #[test]
    fn min_length_defaults_by_kind() {
        assert_eq!(FieldSpec::new("name", FieldKind::Text).effective_min_length(), Some(2));
        assert_eq!(
            FieldSpec::new("message", FieldKind::Textarea).effective_min_length(),
            Some(10)
        );
        assert_eq!(FieldSpec::new("email", FieldKind::Email).effective_min_length(), None);
        assert_eq!(
            FieldSpec::new("name", FieldKind::Text)
                .with_min_length(4)
                .effective_min_length(),
            Some(4)
        );
    }

    #[test]
    fn spec_deserializes_with_required_default() {
        let spec: FieldSpec =
            serde_yaml::from_str("{ name: service, kind: select }").expect("field spec");
        assert!(spec.required);
        assert_eq!(spec.kind, FieldKind::Select);
    }
}
