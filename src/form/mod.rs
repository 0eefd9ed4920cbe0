pub mod controller;
pub mod state;

pub use controller::{FormController, SubmissionOutcome};
pub use state::SubmissionState;
