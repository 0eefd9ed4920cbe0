pub mod dispatcher;
pub mod effect;
pub mod event;

pub use dispatcher::Dispatcher;
pub use effect::{Effect, NotificationKind};
pub use event::{EventKind, FormEvent};
