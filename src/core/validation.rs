use crate::core::date::parse_date;
use crate::core::field::{FieldKind, FieldName, FieldSpec};
use crate::core::validators::{self, Validator, run_validators};
use crate::error::ValidationError;
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub type FieldValues = IndexMap<FieldName, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldResult {
    pub valid: bool,
    pub message: Option<String>,
}

impl FieldResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// Aggregate of one full-form validation pass. Errors keep form field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub field_errors: IndexMap<FieldName, String>,
}

impl ValidationResult {
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field).map(String::as_str)
    }

    pub fn first_invalid(&self) -> Option<&FieldName> {
        self.field_errors.keys().next()
    }

    pub fn errors(&self) -> Vec<ValidationError> {
        self.field_errors
            .iter()
            .map(|(field, message)| ValidationError::new(field.clone(), message.clone()))
            .collect()
    }

    /// Every message in one line, for the dismissible error banner.
    pub fn banner_message(&self) -> String {
        self.field_errors
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(". ")
    }
}

/// Rules that relate two fields of the same form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossFieldRule {
    /// `later` must be strictly after `earlier`, e.g. checkout after checkin.
    DateOrder { earlier: FieldName, later: FieldName },
}

impl CrossFieldRule {
    pub fn fields(&self) -> [&FieldName; 2] {
        match self {
            Self::DateOrder { earlier, later } => [earlier, later],
        }
    }

    /// Returns the field to flag and its message, or `None` when the rule holds or
    /// does not apply.
    pub fn check(&self, fields: &[FieldSpec], values: &FieldValues) -> Option<(FieldName, String)> {
        match self {
            Self::DateOrder { earlier, later } => {
                let earlier_spec = find_spec(fields, earlier)?;
                let later_spec = find_spec(fields, later)?;
                let start = values.get(earlier).and_then(|v| parse_date(v))?;
                let end = values.get(later).and_then(|v| parse_date(v))?;
                if end > start {
                    return None;
                }
                let message = later_spec.message.clone().unwrap_or_else(|| {
                    format!(
                        "{} must be after {}",
                        later_spec.display_label(),
                        earlier_spec.display_label().to_lowercase()
                    )
                });
                Some((later.clone(), message))
            }
        }
    }
}

fn find_spec<'a>(fields: &'a [FieldSpec], name: &FieldName) -> Option<&'a FieldSpec> {
    fields.iter().find(|spec| &spec.name == name)
}

/// Kind rules for a non-empty value, in the order they are checked.
pub fn validators_for(spec: &FieldSpec, today: NaiveDate) -> Vec<Validator> {
    let label = spec.display_label();
    let custom = spec.message.clone();
    let pick = |default: String| custom.clone().unwrap_or(default);

    let mut rules = Vec::new();
    match spec.kind {
        FieldKind::Text | FieldKind::Textarea => {
            if let Some(min) = spec.effective_min_length() {
                rules.push(validators::min_length(
                    min,
                    pick(format!("{label} must be at least {min} characters")),
                ));
            }
        }
        FieldKind::Email => {
            rules.push(validators::email(pick(
                "Please enter a valid email address".to_string(),
            )));
        }
        FieldKind::Tel => {
            rules.push(validators::phone(pick(format!(
                "Please enter a valid phone number: digits only, at least {} characters",
                validators::MIN_PHONE_LENGTH
            ))));
        }
        // Any non-empty selection is accepted.
        FieldKind::Select => {}
        FieldKind::Date => {
            rules.push(validators::date_not_before(
                today,
                pick("Please choose a valid date".to_string()),
                pick(format!("{label} cannot be in the past")),
            ));
        }
    }
    rules
}

fn empty_message(spec: &FieldSpec) -> String {
    if let Some(message) = &spec.message {
        return message.clone();
    }
    let label = spec.display_label();
    match spec.kind {
        FieldKind::Select => format!("Please select a {}", label.to_lowercase()),
        _ => format!("{label} is required"),
    }
}

/// Validates one field in isolation, as on blur.
pub fn validate_field(spec: &FieldSpec, value: &str, today: NaiveDate) -> FieldResult {
    if !spec.required && value.trim().is_empty() {
        return FieldResult::ok();
    }

    let mut rules = vec![validators::required(empty_message(spec))];
    rules.extend(validators_for(spec, today));
    match run_validators(&rules, value) {
        Ok(()) => FieldResult::ok(),
        Err(message) => FieldResult::error(message),
    }
}

/// Validates every field, then the cross-field rules. A field that failed its own
/// rule keeps that message.
pub fn validate_form(
    fields: &[FieldSpec],
    rules: &[CrossFieldRule],
    values: &FieldValues,
    today: NaiveDate,
) -> ValidationResult {
    let mut field_errors: IndexMap<FieldName, String> = IndexMap::new();

    for spec in fields {
        let value = values.get(&spec.name).map(String::as_str).unwrap_or("");
        if let Some(message) = validate_field(spec, value, today).message {
            field_errors.insert(spec.name.clone(), message);
        }
    }

    for rule in rules {
        if let Some((field, message)) = rule.check(fields, values) {
            field_errors.entry(field).or_insert(message);
        }
    }

    // Keep banner and focus order aligned with the form layout.
    field_errors.sort_by_cached_key(|name, _| {
        fields
            .iter()
            .position(|spec| &spec.name == name)
            .unwrap_or(usize::MAX)
    });

    ValidationResult {
        valid: field_errors.is_empty(),
        field_errors,
    }
}
