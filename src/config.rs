use crate::compose::ComposeTemplate;
use crate::core::validation::CrossFieldRule;
use crate::core::{FieldKind, FieldName, FieldSpec};
use crate::error::ConfigError;
use crate::store::DEFAULT_DRAFT_PREFIX;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const FRONT_DESK: &str = "frontdesk@example.com";
const RESERVATIONS: &str = "reservations@example.com";

/// Everything that describes one form: its fields, cross-field rules, the outbound
/// template and the user-facing notices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    pub id: String,
    #[serde(default = "default_draft_prefix")]
    pub draft_prefix: String,
    pub fields: Vec<FieldSpec>,
    /// Written as `- date_order: { earlier: checkin, later: checkout }`.
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub rules: Vec<CrossFieldRule>,
    pub compose: ComposeTemplate,
    #[serde(default)]
    pub notices: Notices,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notices {
    pub success: String,
    pub failure: String,
    pub announcement: String,
}

impl Default for Notices {
    fn default() -> Self {
        Self {
            success: "Email client opened! Please send the pre-filled message to complete your inquiry."
                .to_string(),
            failure: "Failed to send message. Please try again or contact us directly.".to_string(),
            announcement: "Form submitted successfully. We will contact you within 24 hours."
                .to_string(),
        }
    }
}

fn default_draft_prefix() -> String {
    DEFAULT_DRAFT_PREFIX.to_string()
}

impl FormConfig {
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(raw)?;
        config.check()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    pub fn builtin(name: &str) -> Result<Self, ConfigError> {
        match name {
            "contact" => Ok(Self::contact()),
            "booking" => Ok(Self::booking()),
            other => Err(ConfigError::UnknownForm(other.to_string())),
        }
    }

    /// Field names are unique and date rules point at date fields.
    pub fn check(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for spec in &self.fields {
            if !seen.insert(&spec.name) {
                return Err(ConfigError::DuplicateField(spec.name.clone()));
            }
        }

        for rule in &self.rules {
            for name in rule.fields() {
                let spec = self
                    .field(name.as_str())
                    .ok_or_else(|| ConfigError::UnknownField(name.clone()))?;
                if spec.kind != FieldKind::Date {
                    return Err(ConfigError::NotADateField(name.clone()));
                }
            }
        }
        Ok(())
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name.as_str() == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &FieldName> {
        self.fields.iter().map(|spec| &spec.name)
    }

    /// General inquiry form on the contact page.
    pub fn contact() -> Self {
        Self {
            id: "contact".to_string(),
            draft_prefix: default_draft_prefix(),
            fields: vec![
                FieldSpec::new("name", FieldKind::Text).with_label("Name"),
                FieldSpec::new("email", FieldKind::Email).with_label("Email"),
                FieldSpec::new("phone", FieldKind::Tel).with_label("Phone number"),
                FieldSpec::new("service", FieldKind::Select).with_label("Service"),
                FieldSpec::new("message", FieldKind::Textarea).with_label("Message"),
            ],
            rules: Vec::new(),
            compose: ComposeTemplate {
                to: FRONT_DESK.to_string(),
                cc: Some(RESERVATIONS.to_string()),
                subject: "New {service} Inquiry - Website".to_string(),
                body: "New inquiry from the website:

Contact Details:
Name: {name}
Email: {email}
Phone: {phone}
Service Required: {service}

Message:
{message}

---
This inquiry was submitted through the website contact form.
Please respond within 24 hours."
                    .to_string(),
            },
            notices: Notices::default(),
        }
    }

    /// Room booking form with a stay window.
    pub fn booking() -> Self {
        Self {
            id: "booking".to_string(),
            draft_prefix: default_draft_prefix(),
            fields: vec![
                FieldSpec::new("name", FieldKind::Text).with_label("Name"),
                FieldSpec::new("email", FieldKind::Email).with_label("Email"),
                FieldSpec::new("phone", FieldKind::Tel).with_label("Phone number"),
                FieldSpec::new("hotel", FieldKind::Select).with_label("Hotel"),
                FieldSpec::new("checkin", FieldKind::Date).with_label("Check-in date"),
                FieldSpec::new("checkout", FieldKind::Date).with_label("Check-out date"),
                FieldSpec::new("requests", FieldKind::Textarea)
                    .with_label("Special requests")
                    .optional(),
            ],
            rules: vec![CrossFieldRule::DateOrder {
                earlier: "checkin".into(),
                later: "checkout".into(),
            }],
            compose: ComposeTemplate {
                to: FRONT_DESK.to_string(),
                cc: Some(RESERVATIONS.to_string()),
                subject: "Room Booking Request - {hotel}".to_string(),
                body: "Booking Details:
Hotel: {hotel}
Check-in Date: {checkin}
Check-out Date: {checkout}

Guest Information:
Name: {name}
Phone: {phone}
Email: {email}
Special Requirements: {requests}

---
Booked through the website"
                    .to_string(),
            },
            notices: Notices {
                announcement: "Booking request prepared. Please send it from your email client."
                    .to_string(),
                ..Notices::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_yaml_matches_builtin_booking_form() {
        let parsed = FormConfig::from_yaml_str(include_str!("../forms/booking.yaml"))
            .expect("booking.yaml parses");
        assert_eq!(parsed, FormConfig::booking());
    }

    #[test]
    fn builtins_pass_their_own_checks() {
        FormConfig::contact().check().expect("contact");
        FormConfig::booking().check().expect("booking");
        assert!(matches!(
            FormConfig::builtin("newsletter"),
            Err(ConfigError::UnknownForm(name)) if name == "newsletter"
        ));
    }

    #[test]
    fn minimal_yaml_fills_defaults() {
        let config = FormConfig::from_yaml_str(
            "id: callback
fields:
  - { name: phone, kind: tel }
compose:
  to: desk@example.com
  subject: Call me
  body: '{phone}'
",
        )
        .expect("config");
        assert_eq!(config.draft_prefix, "draft_");
        assert!(config.rules.is_empty());
        assert_eq!(config.notices, Notices::default());
        assert_eq!(config.compose.cc, None);
    }

    #[test]
    fn rejects_duplicate_fields() {
        let err = FormConfig::from_yaml_str(
            "id: dup
fields:
  - { name: email, kind: email }
  - { name: email, kind: text }
compose: { to: a@b.co, subject: s, body: b }
",
        )
        .expect_err("duplicate");
        assert!(matches!(err, ConfigError::DuplicateField(name) if name.as_str() == "email"));
    }

    #[test]
    fn rejects_rules_on_unknown_or_non_date_fields() {
        let unknown = FormConfig::from_yaml_str(
            "id: stay
fields:
  - { name: checkin, kind: date }
rules:
  - date_order: { earlier: checkin, later: checkout }
compose: { to: a@b.co, subject: s, body: b }
",
        )
        .expect_err("unknown");
        assert!(matches!(unknown, ConfigError::UnknownField(name) if name.as_str() == "checkout"));

        let not_date = FormConfig::from_yaml_str(
            "id: stay
fields:
  - { name: checkin, kind: date }
  - { name: checkout, kind: text }
rules:
  - date_order: { earlier: checkin, later: checkout }
compose: { to: a@b.co, subject: s, body: b }
",
        )
        .expect_err("not a date");
        assert!(matches!(not_date, ConfigError::NotADateField(_)));
    }
}
