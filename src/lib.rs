//! Contact and booking form controller for a small hospitality site.
//!
//! A [`FormController`] owns one form's fields, validates them on blur and on
//! submit, mirrors in-progress input into a [`DraftStore`], and on a valid submit
//! hands a pre-filled `mailto:` link to a [`LinkOpener`]. Hosts feed document
//! events through a [`Dispatcher`] and apply the returned [`Effect`]s.

pub mod compose;
pub mod config;
pub mod core;
pub mod error;
pub mod form;
pub mod runtime;
pub mod store;

pub use compose::{ComposeTemplate, ContactLink, LinkOpener, OutboundMessage};
pub use config::FormConfig;
pub use crate::core::validation::{FieldResult, ValidationResult};
pub use crate::core::{FieldKind, FieldName, FieldSpec};
pub use error::{ConfigError, OpenError, StoreError, SubmissionError, ValidationError};
pub use form::{FormController, SubmissionOutcome, SubmissionState};
pub use runtime::{Dispatcher, Effect, EventKind, FormEvent};
pub use store::{DraftStore, FormDraft, JsonFileStore, MemoryStore};
