// Settings editor module
// Edits a private snapshot and hands back an explicit outcome

pub mod commands;

use std::thread::{self, JoinHandle};

use crate::state::{MappingStore, Settings, SharedSettings};

pub use commands::{
    apply_editor_command, describe_settings, parse_editor_command, CommandParseError,
    EditorCommand, EditorStep, EDITOR_HELP,
};

/// How an editing session ended
#[derive(Debug, Clone, PartialEq)]
pub enum EditorOutcome {
    /// Persist these settings and start recognizing
    Save(Settings),

    /// Record a new custom gesture
    Capture,

    Quit,
}

/// Anything that can edit a settings snapshot
pub trait SettingsEditor {
    fn edit(&mut self, current: &Settings) -> EditorOutcome;
}

/// Run `editor` on its own thread against the current snapshot
///
/// A `Save` outcome is persisted and swapped into `shared` before the thread
/// ends, so a running recognition loop picks it up on its next frame. A failed
/// save is logged and the edit still takes effect in memory.
pub fn spawn_editor<E>(
    mut editor: E,
    shared: SharedSettings,
    store: MappingStore,
) -> JoinHandle<(E, EditorOutcome)>
where
    E: SettingsEditor + Send + 'static,
{
    thread::spawn(move || {
        let snapshot = shared.snapshot();
        let outcome = editor.edit(&snapshot);

        if let EditorOutcome::Save(settings) = &outcome {
            if let Err(e) = shared.commit(&store, settings.clone()) {
                log::warn!("Failed to save settings: {}", e);
                shared.replace(settings.clone());
            }
        }

        (editor, outcome)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gestures::GestureId;
    use crate::state::ActionSpec;
    use tempfile::TempDir;

    /// Editor that applies a fixed list of commands
    struct ScriptedEditor {
        script: Vec<EditorCommand>,
        transcript: Vec<String>,
    }

    impl SettingsEditor for ScriptedEditor {
        fn edit(&mut self, current: &Settings) -> EditorOutcome {
            let mut draft = current.clone();
            for command in self.script.drain(..) {
                match apply_editor_command(&mut draft, command) {
                    EditorStep::Continue(text) => self.transcript.push(text),
                    EditorStep::Finish(outcome) => return outcome,
                }
            }
            EditorOutcome::Quit
        }
    }

    #[test]
    fn test_spawned_save_is_persisted_and_shared() {
        let dir = TempDir::new().unwrap();
        let store = MappingStore::new(dir.path().join("settings.json"));
        let shared = SharedSettings::default();

        let editor = ScriptedEditor {
            script: vec![
                EditorCommand::Set {
                    target: GestureId::FingerCount(2),
                    action: ActionSpec::hotkey(["ctrl", "tab"]),
                },
                EditorCommand::Save,
            ],
            transcript: Vec::new(),
        };

        let (editor, outcome) = spawn_editor(editor, shared.clone(), store.clone())
            .join()
            .unwrap();

        assert!(matches!(outcome, EditorOutcome::Save(_)));
        assert_eq!(editor.transcript.len(), 1);
        let expected = Some(&ActionSpec::hotkey(["ctrl", "tab"]));
        assert_eq!(shared.snapshot().action_for(&GestureId::FingerCount(2)), expected);
        assert_eq!(store.load().action_for(&GestureId::FingerCount(2)), expected);
    }

    #[test]
    fn test_quit_discards_draft() {
        let dir = TempDir::new().unwrap();
        let store = MappingStore::new(dir.path().join("settings.json"));
        let shared = SharedSettings::default();

        let editor = ScriptedEditor {
            script: vec![
                EditorCommand::Set {
                    target: GestureId::FingerCount(1),
                    action: ActionSpec::single("f1"),
                },
                EditorCommand::Quit,
            ],
            transcript: Vec::new(),
        };

        let (_, outcome) = spawn_editor(editor, shared.clone(), store.clone())
            .join()
            .unwrap();

        assert_eq!(outcome, EditorOutcome::Quit);
        assert_eq!(*shared.snapshot(), Settings::default());
        assert!(!store.path().exists());
    }
}
