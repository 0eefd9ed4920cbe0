pub mod date;
pub mod field;
pub mod validation;
pub mod validators;

pub use field::{FieldKind, FieldName, FieldSpec};
