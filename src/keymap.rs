//! Data-driven keybinding configuration
//!
//! All keybindings are defined as data in `KeyMap::default()`, not as match
//! arms scattered across the session. To add a binding, add an entry to the
//! appropriate context and handle the `KeyAction` in `Session::handle_key`.
//!
//! Printable characters are not bound here: in the select and query modes
//! they fall through to the active buffer.

use crate::hierarchy::Level;
use crate::input::InputMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// A key combination (code + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl From<KeyEvent> for KeyBind {
    fn from(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

/// Semantic key actions — what a key means, not what key it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Normal mode
    Quit,
    EnterSelect(Level),
    EnterQuery,

    // Select modes
    CommitSelect,

    // Query mode
    Execute,
    NextSlot,

    // Any non-normal mode
    Cancel,
}

/// Binding context: all five select modes share one binding set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum KeyContext {
    Normal,
    Select,
    Query,
}

impl From<InputMode> for KeyContext {
    fn from(mode: InputMode) -> Self {
        match mode {
            InputMode::Normal => KeyContext::Normal,
            InputMode::Select(_) => KeyContext::Select,
            InputMode::Query => KeyContext::Query,
        }
    }
}

/// Keybinding configuration — maps key combos to semantic actions per context.
pub struct KeyMap {
    /// Bindings that apply regardless of mode (checked first)
    global: HashMap<KeyBind, KeyAction>,
    /// Per-context bindings (checked after global)
    contexts: HashMap<KeyContext, HashMap<KeyBind, KeyAction>>,
}

impl KeyMap {
    /// Resolve a key event to a semantic action.
    /// Checks global bindings first, then context-specific bindings.
    pub fn resolve(&self, mode: InputMode, key: KeyEvent) -> Option<KeyAction> {
        let bind = KeyBind::from(key);
        if let Some(action) = self.global.get(&bind) {
            return Some(*action);
        }
        self.contexts
            .get(&KeyContext::from(mode))
            .and_then(|m| m.get(&bind))
            .copied()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut global = HashMap::new();
        global.insert(
            KeyBind {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
            },
            KeyAction::Cancel,
        );

        let mut contexts = HashMap::new();

        // ── Normal ───────────────────────────────────────────────
        let mut normal = HashMap::new();
        normal.insert(
            KeyBind {
                code: KeyCode::Char('q'),
                modifiers: KeyModifiers::NONE,
            },
            KeyAction::Quit,
        );
        normal.insert(
            KeyBind {
                code: KeyCode::Char('S'),
                modifiers: KeyModifiers::SHIFT,
            },
            KeyAction::EnterSelect(Level::Server),
        );
        normal.insert(
            KeyBind {
                code: KeyCode::Char('d'),
                modifiers: KeyModifiers::NONE,
            },
            KeyAction::EnterSelect(Level::Database),
        );
        normal.insert(
            KeyBind {
                code: KeyCode::Char('s'),
                modifiers: KeyModifiers::NONE,
            },
            KeyAction::EnterSelect(Level::Schema),
        );
        normal.insert(
            KeyBind {
                code: KeyCode::Char('t'),
                modifiers: KeyModifiers::NONE,
            },
            KeyAction::EnterSelect(Level::Table),
        );
        normal.insert(
            KeyBind {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::NONE,
            },
            KeyAction::EnterSelect(Level::Column),
        );
        normal.insert(
            KeyBind {
                code: KeyCode::Char('i'),
                modifiers: KeyModifiers::NONE,
            },
            KeyAction::EnterQuery,
        );
        contexts.insert(KeyContext::Normal, normal);

        // ── Select prompts ───────────────────────────────────────
        let mut select = HashMap::new();
        select.insert(
            KeyBind {
                code: KeyCode::Enter,
                modifiers: KeyModifiers::NONE,
            },
            KeyAction::CommitSelect,
        );
        select.insert(
            KeyBind {
                code: KeyCode::Esc,
                modifiers: KeyModifiers::NONE,
            },
            KeyAction::Cancel,
        );
        contexts.insert(KeyContext::Select, select);

        // ── Query editor ─────────────────────────────────────────
        let mut query = HashMap::new();
        query.insert(
            KeyBind {
                code: KeyCode::Enter,
                modifiers: KeyModifiers::CONTROL,
            },
            KeyAction::Execute,
        );
        query.insert(
            KeyBind {
                code: KeyCode::Char('n'),
                modifiers: KeyModifiers::CONTROL,
            },
            KeyAction::NextSlot,
        );
        query.insert(
            KeyBind {
                code: KeyCode::Esc,
                modifiers: KeyModifiers::NONE,
            },
            KeyAction::Cancel,
        );
        contexts.insert(KeyContext::Query, query);

        Self { global, contexts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_mode_entry_keys() {
        let km = KeyMap::default();
        let cases = [
            ('S', KeyModifiers::SHIFT, Level::Server),
            ('d', KeyModifiers::NONE, Level::Database),
            ('s', KeyModifiers::NONE, Level::Schema),
            ('t', KeyModifiers::NONE, Level::Table),
            ('c', KeyModifiers::NONE, Level::Column),
        ];
        for (c, mods, level) in cases {
            let key = KeyEvent::new(KeyCode::Char(c), mods);
            assert_eq!(
                km.resolve(InputMode::Normal, key),
                Some(KeyAction::EnterSelect(level)),
                "key '{}' should enter select mode for {:?}",
                c,
                level
            );
        }
    }

    #[test]
    fn test_quit_only_in_normal_mode() {
        let km = KeyMap::default();
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(km.resolve(InputMode::Normal, q), Some(KeyAction::Quit));
        // In a select prompt, 'q' is just a character
        assert_eq!(km.resolve(InputMode::Select(Level::Server), q), None);
        assert_eq!(km.resolve(InputMode::Query, q), None);
    }

    #[test]
    fn test_ctrl_c_cancels_everywhere() {
        let km = KeyMap::default();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for mode in [
            InputMode::Normal,
            InputMode::Select(Level::Table),
            InputMode::Query,
        ] {
            assert_eq!(km.resolve(mode, ctrl_c), Some(KeyAction::Cancel));
        }
    }

    #[test]
    fn test_enter_commits_select_but_not_query() {
        let km = KeyMap::default();
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(
            km.resolve(InputMode::Select(Level::Database), enter),
            Some(KeyAction::CommitSelect)
        );
        // Query mode needs the execute chord, not plain Enter
        assert_eq!(km.resolve(InputMode::Query, enter), None);

        let ctrl_enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL);
        assert_eq!(
            km.resolve(InputMode::Query, ctrl_enter),
            Some(KeyAction::Execute)
        );
    }

    #[test]
    fn test_slot_cycling_in_query_mode() {
        let km = KeyMap::default();
        let ctrl_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert_eq!(km.resolve(InputMode::Query, ctrl_n), Some(KeyAction::NextSlot));
        assert_eq!(km.resolve(InputMode::Normal, ctrl_n), None);
    }

    #[test]
    fn test_unbound_key_returns_none() {
        let km = KeyMap::default();
        let key = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE);
        assert_eq!(km.resolve(InputMode::Normal, key), None);
    }
}
