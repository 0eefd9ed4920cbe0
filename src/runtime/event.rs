use crate::core::FieldName;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Load,
    Input,
    Blur,
    Submit,
    Reset,
}

/// Document events the host forwards for one form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FormEvent {
    /// Page ready; restore any saved draft.
    Load,
    Input { field: FieldName, value: String },
    Blur { field: FieldName },
    Submit,
    /// "Send another message" after a submission.
    Reset,
}

impl FormEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Load => EventKind::Load,
            Self::Input { .. } => EventKind::Input,
            Self::Blur { .. } => EventKind::Blur,
            Self::Submit => EventKind::Submit,
            Self::Reset => EventKind::Reset,
        }
    }
}
