// Console front end
// Line-based editor, capture prompt and preview commands over stdin/stdout

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::app::{PreviewCommand, PreviewControl};
use crate::capture::{CaptureError, CapturePrompt};
use crate::editor::{
    apply_editor_command, describe_settings, parse_editor_command, EditorOutcome, EditorStep,
    SettingsEditor, EDITOR_HELP,
};
use crate::gestures::GestureTemplate;
use crate::pipeline::FrameReport;
use crate::state::Settings;

/// Typed at the capture prompt to go back to the editor
pub const CANCEL_CAPTURE: &str = "/cancel";

/// Read stdin lines on a background thread
///
/// The channel closes when stdin does.
pub fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// All three user-facing roles over one line channel and one writer
pub struct ConsoleFrontend<W> {
    lines: Receiver<String>,
    out: W,
}

impl<W: Write> ConsoleFrontend<W> {
    pub fn new(lines: Receiver<String>, out: W) -> Self {
        ConsoleFrontend { lines, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn say(&mut self, text: &str) {
        // Console output is best effort
        let _ = writeln!(self.out, "{}", text.trim_end());
        let _ = self.out.flush();
    }
}

impl<W: Write> SettingsEditor for ConsoleFrontend<W> {
    fn edit(&mut self, current: &Settings) -> EditorOutcome {
        let mut draft = current.clone();
        self.say("Gesture mappings:");
        self.say(&describe_settings(&draft));
        self.say(EDITOR_HELP);

        loop {
            let Ok(line) = self.lines.recv() else {
                return EditorOutcome::Quit;
            };
            if line.trim().is_empty() {
                continue;
            }

            match parse_editor_command(&line) {
                Ok(command) => match apply_editor_command(&mut draft, command) {
                    EditorStep::Continue(text) => self.say(&text),
                    EditorStep::Finish(outcome) => return outcome,
                },
                Err(e) => self.say(&e.to_string()),
            }
        }
    }
}

impl<W: Write> CapturePrompt for ConsoleFrontend<W> {
    fn confirm_capture(&mut self) -> Option<String> {
        self.say(&format!(
            "Hold the gesture in view, then type a one-word name and press Enter ({} to go back)",
            CANCEL_CAPTURE
        ));
        self.say("The next frame from the landmark source is captured; keep holding until saved.");
        let line = self.lines.recv().ok()?;
        if line.trim() == CANCEL_CAPTURE {
            return None;
        }
        Some(line)
    }

    fn report_rejection(&mut self, error: &CaptureError) {
        self.say(&format!("Not saved: {}", error));
    }

    fn report_saved(&mut self, template: &GestureTemplate) {
        self.say(&format!(
            "Saved custom gesture {:?} (mapped to the default key)",
            template.name
        ));
    }
}

impl<W: Write> PreviewControl for ConsoleFrontend<W> {
    fn poll_command(&mut self) -> Option<PreviewCommand> {
        loop {
            match self.lines.try_recv() {
                Ok(line) => {
                    let command = line
                        .trim()
                        .chars()
                        .next()
                        .and_then(PreviewCommand::from_char);
                    if command.is_some() {
                        return command;
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }

    fn show_frame(&mut self, report: &FrameReport) {
        if let Some(fired) = &report.fired {
            let line = match &fired.action {
                Some(action) => format!("{} -> {}", fired.gesture, action),
                None => format!("{} (no mapping)", fired.gesture),
            };
            self.say(&line);
        }
    }
}
