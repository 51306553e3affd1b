// Action module
// Key-symbol translation, input injectors, and the action dispatcher

pub mod dispatcher;
pub mod injector;
pub mod keymap;

pub use dispatcher::ActionDispatcher;
#[cfg(feature = "enigo")]
pub use injector::EnigoInjector;
pub use injector::{InjectError, KeyInjector, LogInjector};
pub use keymap::translate_keysym;
