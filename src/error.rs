use crate::core::FieldName;
use std::path::PathBuf;
use thiserror::Error;

/// A single field failing its rule. Recoverable: shown inline and in the banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: FieldName,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not open link: {reason}")]
pub struct OpenError {
    pub reason: String,
}

impl OpenError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    LinkOpen(#[from] OpenError),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("draft store io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("draft store at {path} is not a JSON object of strings: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read form config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid form config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("field `{0}` is declared more than once")]
    DuplicateField(FieldName),
    #[error("rule references unknown field `{0}`")]
    UnknownField(FieldName),
    #[error("rule field `{0}` must be a date field")]
    NotADateField(FieldName),
    #[error("unknown built-in form `{0}`")]
    UnknownForm(String),
}
