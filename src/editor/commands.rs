// Settings editor commands
// Line-oriented edit commands applied to a private copy of the settings

use std::fmt::Write as _;
use thiserror::Error;

use crate::actions::translate_keysym;
use crate::editor::EditorOutcome;
use crate::gestures::GestureId;
use crate::state::{ActionSpec, Settings, FINGER_SLOTS};

pub const EDITOR_HELP: &str = "\
Commands:
  show                          list the current mapping
  set <slot|name> single <key>  map a finger count (1-4) or custom gesture to one key
  set <slot|name> hotkey <k>... map to a key combination, pressed in order
  delete <name>                 remove a custom gesture
  add                           record a new custom gesture
  save                          save and start recognition
  quit                          exit without saving";

#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    Show,
    Help,
    Set { target: GestureId, action: ActionSpec },
    Delete(String),
    Add,
    Save,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandParseError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command {0:?}, type 'help'")]
    Unknown(String),

    #[error("Missing {0}")]
    MissingArgument(&'static str),

    #[error("Finger slot {0} is not mappable (use 1-4)")]
    InvalidSlot(String),

    #[error("Unknown action type {0:?} (use 'single' or 'hotkey')")]
    UnknownActionType(String),
}

/// Parse one editor line
///
/// Key names go through the key-symbol table, so `Control_L` and `ctrl`
/// are equivalent.
pub fn parse_editor_command(line: &str) -> Result<EditorCommand, CommandParseError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Err(CommandParseError::Empty);
    };

    match command.to_lowercase().as_str() {
        "show" | "list" => Ok(EditorCommand::Show),
        "help" | "?" => Ok(EditorCommand::Help),
        "add" => Ok(EditorCommand::Add),
        "save" => Ok(EditorCommand::Save),
        "quit" | "exit" => Ok(EditorCommand::Quit),
        "delete" | "del" => {
            let name = words
                .next()
                .ok_or(CommandParseError::MissingArgument("gesture name"))?;
            Ok(EditorCommand::Delete(name.to_string()))
        }
        "set" => {
            let target = words
                .next()
                .ok_or(CommandParseError::MissingArgument("target"))?;
            let target = parse_target(target)?;
            let kind = words
                .next()
                .ok_or(CommandParseError::MissingArgument("action type"))?;
            let keys: Vec<String> = words.map(translate_keysym).collect();
            if keys.is_empty() {
                return Err(CommandParseError::MissingArgument("key"));
            }

            let action = match kind.to_lowercase().as_str() {
                "single" => ActionSpec::Single(keys[0].clone()),
                "hotkey" => ActionSpec::Hotkey(keys),
                other => return Err(CommandParseError::UnknownActionType(other.to_string())),
            };
            Ok(EditorCommand::Set { target, action })
        }
        other => Err(CommandParseError::Unknown(other.to_string())),
    }
}

fn parse_target(word: &str) -> Result<GestureId, CommandParseError> {
    match word.parse::<u8>() {
        Ok(slot) if FINGER_SLOTS.contains(&slot) => Ok(GestureId::FingerCount(slot)),
        Ok(_) => Err(CommandParseError::InvalidSlot(word.to_string())),
        Err(_) => Ok(GestureId::template(word)),
    }
}

/// Result of applying one command
#[derive(Debug, Clone, PartialEq)]
pub enum EditorStep {
    /// Keep editing; the text is shown to the operator
    Continue(String),

    /// Leave the editor
    Finish(EditorOutcome),
}

pub fn apply_editor_command(settings: &mut Settings, command: EditorCommand) -> EditorStep {
    match command {
        EditorCommand::Show => EditorStep::Continue(describe_settings(settings)),
        EditorCommand::Help => EditorStep::Continue(EDITOR_HELP.to_string()),
        EditorCommand::Set { target, action } => {
            if let Some(name) = target.template_name() {
                if !settings.templates.contains(name) {
                    return EditorStep::Continue(format!("No custom gesture named {:?}", name));
                }
            }
            let message = format!("{} -> {}", target, action);
            settings.mapping.set(target, action);
            EditorStep::Continue(message)
        }
        EditorCommand::Delete(name) => {
            if settings.remove_custom_gesture(&name) {
                EditorStep::Continue(format!("Deleted custom gesture {:?}", name))
            } else {
                EditorStep::Continue(format!("No custom gesture named {:?}", name))
            }
        }
        EditorCommand::Add => EditorStep::Finish(EditorOutcome::Capture),
        EditorCommand::Save => EditorStep::Finish(EditorOutcome::Save(settings.clone())),
        EditorCommand::Quit => EditorStep::Finish(EditorOutcome::Quit),
    }
}

/// One line per mapping entry, finger slots first
pub fn describe_settings(settings: &Settings) -> String {
    let mut out = String::new();
    for (gesture, action) in settings.mapping.iter() {
        let _ = writeln!(out, "  {}: {}", gesture, action);
    }
    if settings.templates.is_empty() {
        out.push_str("  (no custom gestures)\n");
    }
    out
}
