use crate::compose::LinkOpener;
use crate::form::FormController;
use crate::runtime::effect::Effect;
use crate::runtime::event::{EventKind, FormEvent};
use crate::store::DraftStore;
use std::collections::HashMap;
use tracing::debug;

pub type Handler<S, O> = fn(&mut FormController<S, O>, &FormEvent);

/// Event kind → handler table. The host event loop calls [`Dispatcher::dispatch`]
/// once per document event and applies the returned effects.
pub struct Dispatcher<S, O> {
    handlers: HashMap<EventKind, Handler<S, O>>,
}

impl<S: DraftStore, O: LinkOpener> Dispatcher<S, O> {
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Table wiring every form event to its controller operation.
    pub fn standard() -> Self {
        let mut dispatcher = Self::empty();
        dispatcher.register(EventKind::Load, on_load);
        dispatcher.register(EventKind::Input, on_input);
        dispatcher.register(EventKind::Blur, on_blur);
        dispatcher.register(EventKind::Submit, on_submit);
        dispatcher.register(EventKind::Reset, on_reset);
        dispatcher
    }

    pub fn register(&mut self, kind: EventKind, handler: Handler<S, O>) {
        self.handlers.insert(kind, handler);
    }

    pub fn handles(&self, kind: EventKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    pub fn dispatch(&self, form: &mut FormController<S, O>, event: &FormEvent) -> Vec<Effect> {
        match self.handlers.get(&event.kind()) {
            Some(handler) => handler(form, event),
            None => debug!(kind = ?event.kind(), "no handler registered"),
        }
        form.drain_effects()
    }
}

impl<S: DraftStore, O: LinkOpener> Default for Dispatcher<S, O> {
    fn default() -> Self {
        Self::standard()
    }
}

fn on_load<S: DraftStore, O: LinkOpener>(form: &mut FormController<S, O>, _: &FormEvent) {
    form.load_draft();
}

fn on_input<S: DraftStore, O: LinkOpener>(form: &mut FormController<S, O>, event: &FormEvent) {
    if let FormEvent::Input { field, value } = event {
        form.on_field_change(field.as_str(), value.clone());
    }
}

fn on_blur<S: DraftStore, O: LinkOpener>(form: &mut FormController<S, O>, event: &FormEvent) {
    if let FormEvent::Blur { field } = event {
        form.on_blur(field.as_str());
    }
}

fn on_submit<S: DraftStore, O: LinkOpener>(form: &mut FormController<S, O>, _: &FormEvent) {
    form.submit();
}

fn on_reset<S: DraftStore, O: LinkOpener>(form: &mut FormController<S, O>, _: &FormEvent) {
    form.reset();
}
