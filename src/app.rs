//! Session state and event handling
//!
//! Central state machine: key events come in, state updates, actions go out.
//! Exactly one input mode is active at a time. Adapter failures surface as
//! status messages and never tear the session down; only startup failures
//! terminate the process.

use crate::config::ServerConfig;
use crate::db::adapter::Connector;
use crate::db::types::QueryResult;
use crate::error::StartupError;
use crate::hierarchy::{Level, Navigator, SelectOutcome};
use crate::input::{InputMode, LineBuffer};
use crate::keymap::{KeyAction, KeyMap};
use crate::query::QueryBuffers;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

/// Status message with severity level
pub struct StatusMessage {
    pub message: String,
    pub level: StatusLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Actions returned by the key handler for the main loop to execute.
/// Everything that touches the adapter goes through [`Session::dispatch`];
/// pure state changes happen inside `handle_key` and return `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    /// Commit a selection at one hierarchy level
    Select { level: Level, name: String },
    /// Execute the active query slot
    Execute,
}

/// Main session state
pub struct Session {
    pub navigator: Navigator,
    pub mode: InputMode,
    /// The one-line buffer backing the select prompt
    pub line: LineBuffer,
    /// The seven query slots
    pub buffers: QueryBuffers,
    /// Most recent successful query result
    pub last_result: Option<QueryResult>,
    pub status_message: Option<StatusMessage>,
    pub keymap: KeyMap,
    pub running: bool,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(navigator: Navigator) -> Self {
        Self {
            navigator,
            mode: InputMode::Normal,
            line: LineBuffer::new(),
            buffers: QueryBuffers::new(),
            last_result: None,
            status_message: None,
            keymap: KeyMap::default(),
            running: true,
        }
    }

    /// Build a session and load the initial server catalog.
    ///
    /// An empty server catalog is a startup failure: there is nothing the
    /// session could ever select.
    pub async fn init(
        servers: Vec<ServerConfig>,
        connector: Box<dyn Connector>,
    ) -> Result<Self, StartupError> {
        if servers.is_empty() {
            return Err(StartupError::Catalog("no servers configured".to_string()));
        }
        let mut navigator = Navigator::new(servers, connector);
        navigator
            .refresh(Level::Server)
            .await
            .map_err(|e| StartupError::Catalog(e.to_string()))?;
        info!(
            servers = navigator.servers().len(),
            "session initialized"
        );
        Ok(Self::new(navigator))
    }

    /// Handle a key event, returning the action for the main loop.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if let Some(action) = self.keymap.resolve(self.mode, key) {
            return self.apply_action(action);
        }
        // Unbound keys are text input in the prompt and query modes
        match self.mode {
            InputMode::Normal => {}
            InputMode::Select(_) => match key.code {
                KeyCode::Backspace => self.line.backspace(),
                KeyCode::Char(c) if text_input(key) => self.line.push(c),
                _ => {}
            },
            InputMode::Query => match key.code {
                KeyCode::Backspace => self.buffers.backspace(),
                KeyCode::Char(c) if text_input(key) => self.buffers.push(c),
                _ => {}
            },
        }
        Action::None
    }

    fn apply_action(&mut self, action: KeyAction) -> Action {
        match action {
            KeyAction::Quit => {
                self.running = false;
                Action::None
            }
            KeyAction::EnterSelect(level) => {
                self.mode = InputMode::Select(level);
                self.line.clear();
                self.status_message = None;
                Action::None
            }
            KeyAction::EnterQuery => {
                self.mode = InputMode::Query;
                self.status_message = None;
                Action::None
            }
            KeyAction::CommitSelect => {
                // Enter always leaves the prompt, whatever the selection
                // later turns out to be.
                let InputMode::Select(level) = self.mode else {
                    return Action::None;
                };
                let name = self.line.take();
                self.mode = InputMode::Normal;
                Action::Select { level, name }
            }
            KeyAction::Execute => Action::Execute,
            KeyAction::NextSlot => {
                self.buffers.cycle();
                Action::None
            }
            KeyAction::Cancel => {
                // Abandon the prompt line; query slots keep their contents.
                self.line.clear();
                self.mode = InputMode::Normal;
                Action::None
            }
        }
    }

    /// Execute an adapter-touching action. Failures become status messages.
    pub async fn dispatch(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Select { level, name } => match self.navigator.select(level, &name).await {
                Ok(SelectOutcome::Selected) => {
                    self.set_status(format!("{} selected", name), StatusLevel::Success);
                }
                Ok(SelectOutcome::NotFound) => {
                    self.set_status(format!("not found: {}", name), StatusLevel::Warning);
                }
                Err(e) => {
                    warn!(?level, name, error = %e, "selection failed");
                    self.set_status(e.to_string(), StatusLevel::Error);
                }
            },
            Action::Execute => {
                let result = match self.navigator.adapter_mut() {
                    Ok(adapter) => self.buffers.execute(adapter).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(result) => {
                        self.set_status(
                            format!("{} rows", result.rows.len()),
                            StatusLevel::Success,
                        );
                        self.last_result = Some(result);
                    }
                    Err(e) => {
                        warn!(error = %e, "query failed");
                        self.set_status(e.to_string(), StatusLevel::Error);
                    }
                }
            }
        }
    }

    pub fn set_status(&mut self, message: String, level: StatusLevel) {
        self.status_message = Some(StatusMessage { message, level });
    }
}

/// Character input must not be a chord; control and alt combinations fall
/// through the keymap without becoming text.
fn text_input(key: KeyEvent) -> bool {
    !key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}
