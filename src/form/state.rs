use serde::Serialize;

/// Where one form's submission currently stands. Drives the trigger and loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Sending,
    Succeeded,
    Failed,
}

impl SubmissionState {
    /// Submitting is only possible from an interactive state. `Succeeded` waits for a
    /// reset so a repeated click cannot open a second link.
    pub fn accepts_submit(self) -> bool {
        matches!(self, Self::Idle | Self::Failed)
    }

    pub fn can_transition_to(self, next: Self) -> bool {
        use SubmissionState::*;
        matches!(
            (self, next),
            (Idle | Failed, Validating)
                | (Validating, Sending | Failed)
                | (Sending, Succeeded | Failed)
                | (Failed | Succeeded, Idle)
        )
    }
}
