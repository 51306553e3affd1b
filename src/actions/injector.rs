// Input injection
// The seam between fired actions and the operating system's keyboard

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum InjectError {
    #[error("Unsupported key: {0}")]
    UnsupportedKey(String),

    #[error("Key injection failed: {0}")]
    Failed(String),
}

/// Synthesizes key events
///
/// Key names use the lower-case vocabulary of the settings document
/// (`winleft`, `ctrl`, `enter`, `a`, `f5`, ...).
pub trait KeyInjector {
    /// Press and release one key
    fn press(&mut self, key: &str) -> Result<(), InjectError>;

    /// Press keys in order, then release them in reverse order
    fn hotkey(&mut self, keys: &[String]) -> Result<(), InjectError>;
}

impl<I: KeyInjector + ?Sized> KeyInjector for Box<I> {
    fn press(&mut self, key: &str) -> Result<(), InjectError> {
        (**self).press(key)
    }

    fn hotkey(&mut self, keys: &[String]) -> Result<(), InjectError> {
        (**self).hotkey(keys)
    }
}

/// Dry-run injector: logs what would be typed
#[derive(Debug, Default)]
pub struct LogInjector;

impl KeyInjector for LogInjector {
    fn press(&mut self, key: &str) -> Result<(), InjectError> {
        log::info!("[dry run] press {}", key);
        Ok(())
    }

    fn hotkey(&mut self, keys: &[String]) -> Result<(), InjectError> {
        log::info!("[dry run] hotkey {}", keys.join("+"));
        Ok(())
    }
}

#[cfg(feature = "enigo")]
pub use os::EnigoInjector;

#[cfg(feature = "enigo")]
mod os {
    use enigo::{Direction, Enigo, Key, Keyboard, Settings};

    use super::{InjectError, KeyInjector};

    /// Injects real key events through enigo
    pub struct EnigoInjector {
        enigo: Enigo,
    }

    impl EnigoInjector {
        pub fn new() -> Result<Self, InjectError> {
            let enigo = Enigo::new(&Settings::default())
                .map_err(|e| InjectError::Failed(format!("{:?}", e)))?;
            Ok(EnigoInjector { enigo })
        }

        fn send(&mut self, key: Key, direction: Direction) -> Result<(), InjectError> {
            self.enigo
                .key(key, direction)
                .map_err(|e| InjectError::Failed(format!("{:?}", e)))
        }
    }

    impl KeyInjector for EnigoInjector {
        fn press(&mut self, key: &str) -> Result<(), InjectError> {
            let key = to_enigo_key(key)?;
            self.send(key, Direction::Click)
        }

        fn hotkey(&mut self, keys: &[String]) -> Result<(), InjectError> {
            let keys = keys
                .iter()
                .map(|k| to_enigo_key(k))
                .collect::<Result<Vec<_>, _>>()?;

            let mut pressed = Vec::with_capacity(keys.len());
            let mut result = Ok(());
            for key in keys {
                if let Err(e) = self.send(key, Direction::Press) {
                    result = Err(e);
                    break;
                }
                pressed.push(key);
            }

            // Release whatever went down, even after a failure
            for key in pressed.into_iter().rev() {
                if let Err(e) = self.send(key, Direction::Release) {
                    log::warn!("Failed to release {:?}: {}", key, e);
                }
            }
            result
        }
    }

    fn to_enigo_key(name: &str) -> Result<Key, InjectError> {
        let key = match name {
            "winleft" | "winright" | "win" | "super" | "cmd" | "command" => Key::Meta,
            "ctrl" | "control" | "ctrlleft" | "ctrlright" => Key::Control,
            "shift" | "shiftleft" | "shiftright" => Key::Shift,
            "alt" | "altleft" | "altright" | "option" => Key::Alt,
            "enter" | "return" => Key::Return,
            "space" => Key::Space,
            "tab" => Key::Tab,
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "esc" | "escape" => Key::Escape,
            "up" => Key::UpArrow,
            "down" => Key::DownArrow,
            "left" => Key::LeftArrow,
            "right" => Key::RightArrow,
            "capslock" => Key::CapsLock,
            "pageup" => Key::PageUp,
            "pagedown" => Key::PageDown,
            "home" => Key::Home,
            "end" => Key::End,
            "f1" => Key::F1,
            "f2" => Key::F2,
            "f3" => Key::F3,
            "f4" => Key::F4,
            "f5" => Key::F5,
            "f6" => Key::F6,
            "f7" => Key::F7,
            "f8" => Key::F8,
            "f9" => Key::F9,
            "f10" => Key::F10,
            "f11" => Key::F11,
            "f12" => Key::F12,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Unicode(c),
                    _ => return Err(InjectError::UnsupportedKey(other.to_string())),
                }
            }
        };
        Ok(key)
    }

}
