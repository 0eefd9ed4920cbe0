use crate::core::FieldName;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

/// UI changes the controller asks the host page to apply, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    SetValue {
        field: FieldName,
        value: String,
    },
    /// Render `message` into the `<field>-error` element and mark the field invalid.
    ShowFieldError {
        field: FieldName,
        element_id: String,
        message: String,
    },
    ClearFieldError {
        field: FieldName,
        element_id: String,
    },
    Focus {
        field: FieldName,
    },
    SetTriggerEnabled {
        enabled: bool,
    },
    SetBusy {
        busy: bool,
    },
    /// Dismissible banner.
    Notify {
        kind: NotificationKind,
        message: String,
    },
    ShowSuccess,
    ShowForm,
    /// Polite live-region message for screen readers.
    Announce {
        message: String,
    },
}

impl Effect {
    pub fn show_error(field: &FieldName, message: impl Into<String>) -> Self {
        Self::ShowFieldError {
            field: field.clone(),
            element_id: field.error_element_id(),
            message: message.into(),
        }
    }

    pub fn clear_error(field: &FieldName) -> Self {
        Self::ClearFieldError {
            field: field.clone(),
            element_id: field.error_element_id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_targets_sibling_element() {
        let effect = Effect::show_error(&FieldName::from("phone"), "too short");
        assert_eq!(
            effect,
            Effect::ShowFieldError {
                field: "phone".into(),
                element_id: "phone-error".to_string(),
                message: "too short".to_string(),
            }
        );
    }

    #[test]
    fn effects_serialize_with_tag() {
        let json = serde_json::to_value(Effect::Notify {
            kind: NotificationKind::Error,
            message: "nope".to_string(),
        })
        .expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({ "effect": "notify", "kind": "error", "message": "nope" })
        );
        let json = serde_json::to_value(Effect::ShowSuccess).expect("serialize");
        assert_eq!(json, serde_json::json!({ "effect": "show_success" }));
    }
}
