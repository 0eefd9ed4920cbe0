use crate::compose::LinkOpener;
use crate::config::FormConfig;
use crate::core::date::{Clock, SystemClock};
use crate::core::validation::{self, FieldResult, FieldValues, ValidationResult};
use crate::core::{FieldName, FieldSpec};
use crate::error::SubmissionError;
use crate::form::state::SubmissionState;
use crate::runtime::effect::{Effect, NotificationKind};
use crate::store::{DraftKeys, DraftStore, FormDraft};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// A submission was already in flight or finished; nothing happened.
    Ignored,
    Invalid(ValidationResult),
    Sent { uri: String },
    Failed(SubmissionError),
}

/// Owns one form: its live values, its draft store, the link opener and the
/// submission state. Every method runs to completion; UI changes are queued as
/// [`Effect`]s for the host to drain.
pub struct FormController<S, O> {
    config: FormConfig,
    keys: DraftKeys,
    values: FieldValues,
    store: S,
    opener: O,
    clock: Box<dyn Clock>,
    state: SubmissionState,
    effects: Vec<Effect>,
}

impl<S: DraftStore, O: LinkOpener> FormController<S, O> {
    pub fn new(config: FormConfig, store: S, opener: O) -> Self {
        let keys = DraftKeys::new(config.draft_prefix.clone());
        let values = config
            .fields
            .iter()
            .map(|spec| (spec.name.clone(), String::new()))
            .collect();
        Self {
            config,
            keys,
            values,
            store,
            opener,
            clock: Box::new(SystemClock),
            state: SubmissionState::Idle,
            effects: Vec::new(),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }

    pub fn pending_effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Restores saved values into fields that are still empty.
    pub fn load_draft(&mut self) -> FormDraft {
        let mut draft = FormDraft::new();
        for spec in &self.config.fields {
            let Some(saved) = self.store.get(&self.keys.key_for(&spec.name)) else {
                continue;
            };
            draft.insert(spec.name.clone(), saved.clone());

            let Some(live) = self.values.get_mut(&spec.name) else {
                continue;
            };
            if live.is_empty() && !saved.is_empty() {
                *live = saved.clone();
                self.effects.push(Effect::SetValue {
                    field: spec.name.clone(),
                    value: saved,
                });
            }
        }
        debug!(form = %self.config.id, restored = draft.len(), "loaded draft");
        draft
    }

    /// Records a new live value and mirrors it into the draft store.
    pub fn on_field_change(&mut self, field: &str, value: impl Into<String>) {
        let value = value.into();
        let Some(spec) = self.config.field(field) else {
            warn!(form = %self.config.id, field, "input for unknown field ignored");
            return;
        };
        let name = spec.name.clone();
        let key = self.keys.key_for(&name);

        let result = if value.trim().is_empty() {
            self.store.remove(&key)
        } else {
            self.store.set(&key, &value)
        };
        if let Err(err) = result {
            warn!(form = %self.config.id, %key, error = %err, "failed to update draft");
        }

        self.values.insert(name.clone(), value);
        self.effects.push(Effect::clear_error(&name));
    }

    /// Per-field rule check with no side effects.
    pub fn validate_field(&self, field: &str) -> FieldResult {
        match self.config.field(field) {
            Some(spec) => {
                validation::validate_field(spec, self.live_value(spec), self.clock.today())
            }
            None => FieldResult::ok(),
        }
    }

    pub fn validate_form(&self) -> ValidationResult {
        validation::validate_form(
            &self.config.fields,
            &self.config.rules,
            &self.values,
            self.clock.today(),
        )
    }

    /// Blur handler: validates one field and shows or clears its inline error.
    pub fn on_blur(&mut self, field: &str) -> FieldResult {
        let result = self.validate_field(field);
        let Some(spec) = self.config.field(field) else {
            return result;
        };
        let effect = match &result.message {
            Some(message) => Effect::show_error(&spec.name, message.clone()),
            None => Effect::clear_error(&spec.name),
        };
        self.effects.push(effect);
        result
    }

    pub fn submit(&mut self) -> SubmissionOutcome {
        if !self.state.accepts_submit() {
            debug!(form = %self.config.id, state = ?self.state, "submit ignored while not idle");
            return SubmissionOutcome::Ignored;
        }

        self.effects.push(Effect::SetTriggerEnabled { enabled: false });
        self.transition(SubmissionState::Validating);

        let result = self.validate_form();
        if !result.valid {
            self.reject(&result);
            return SubmissionOutcome::Invalid(result);
        }

        self.transition(SubmissionState::Sending);
        self.effects.push(Effect::SetBusy { busy: true });

        let uri = self.config.compose.render(&self.values).mailto_uri();
        match self.opener.open(&uri) {
            Ok(()) => {
                self.complete();
                info!(form = %self.config.id, "submission handed to mail client");
                SubmissionOutcome::Sent { uri }
            }
            Err(err) => {
                warn!(form = %self.config.id, error = %err, "failed to open outbound link");
                self.transition(SubmissionState::Failed);
                self.effects.push(Effect::Notify {
                    kind: NotificationKind::Error,
                    message: self.config.notices.failure.clone(),
                });
                self.effects.push(Effect::SetBusy { busy: false });
                self.effects.push(Effect::SetTriggerEnabled { enabled: true });
                self.transition(SubmissionState::Idle);
                SubmissionOutcome::Failed(SubmissionError::from(err))
            }
        }
    }

    /// Brings the form back after a finished submission.
    pub fn reset(&mut self) {
        match self.state {
            SubmissionState::Succeeded | SubmissionState::Failed => {
                self.transition(SubmissionState::Idle);
                self.effects.push(Effect::ShowForm);
            }
            SubmissionState::Idle => {}
            state => debug!(form = %self.config.id, ?state, "reset ignored mid-submission"),
        }
    }

    fn live_value(&self, spec: &FieldSpec) -> &str {
        self.values.get(&spec.name).map(String::as_str).unwrap_or("")
    }

    fn reject(&mut self, result: &ValidationResult) {
        debug!(form = %self.config.id, errors = result.field_errors.len(), "submission invalid");
        self.transition(SubmissionState::Failed);

        for spec in &self.config.fields {
            let effect = match result.error_for(spec.name.as_str()) {
                Some(message) => Effect::show_error(&spec.name, message),
                None => Effect::clear_error(&spec.name),
            };
            self.effects.push(effect);
        }
        self.effects.push(Effect::Notify {
            kind: NotificationKind::Error,
            message: result.banner_message(),
        });
        if let Some(first) = result.first_invalid() {
            self.effects.push(Effect::Focus {
                field: first.clone(),
            });
        }
        self.effects.push(Effect::SetTriggerEnabled { enabled: true });
        self.transition(SubmissionState::Idle);
    }

    fn complete(&mut self) {
        self.transition(SubmissionState::Succeeded);

        let names: Vec<FieldName> = self.config.field_names().cloned().collect();
        for name in &names {
            let key = self.keys.key_for(name);
            if let Err(err) = self.store.remove(&key) {
                warn!(form = %self.config.id, %key, error = %err, "failed to clear draft");
            }
            if let Some(live) = self.values.get_mut(name) {
                if !live.is_empty() {
                    live.clear();
                    self.effects.push(Effect::SetValue {
                        field: name.clone(),
                        value: String::new(),
                    });
                }
            }
        }

        self.effects.push(Effect::SetBusy { busy: false });
        self.effects.push(Effect::ShowSuccess);
        self.effects.push(Effect::Notify {
            kind: NotificationKind::Success,
            message: self.config.notices.success.clone(),
        });
        self.effects.push(Effect::Announce {
            message: self.config.notices.announcement.clone(),
        });
        self.effects.push(Effect::SetTriggerEnabled { enabled: true });
    }

    fn transition(&mut self, next: SubmissionState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {:?} -> {:?}",
            self.state,
            next
        );
        debug!(form = %self.config.id, from = ?self.state, to = ?next, "submission state");
        self.state = next;
    }
}
