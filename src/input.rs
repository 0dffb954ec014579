//! Input mode state machine primitives
//!
//! The session is always in exactly one input mode: `Normal` (single keys
//! dispatch), `Select(level)` (a one-line prompt collecting a name to
//! select), or `Query` (editing the active query buffer slot). One buffer is
//! active at a time; no two modes are ever concurrently open.
//!
//! The select prompt edits a short bounded line buffer. Input beyond the
//! bound is silently dropped, never surfaced as an error.

use crate::hierarchy::Level;

/// Byte bound for the one-line select prompt
pub const LINE_CAP: usize = 63;

/// The session's input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Collecting a selection target for one hierarchy level
    Select(Level),
    /// Editing the active query buffer slot
    Query,
}

/// Printable ASCII is the accepted input range (0x20–0x7E); everything else
/// is dropped before it reaches a buffer.
pub fn is_printable_ascii(c: char) -> bool {
    ('\x20'..='\x7e').contains(&c)
}

/// The bounded one-line buffer backing the select prompt.
#[derive(Debug, Default)]
pub struct LineBuffer {
    text: String,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a character. Non-printable input and input past [`LINE_CAP`]
    /// are silently dropped.
    pub fn push(&mut self, c: char) {
        if !is_printable_ascii(c) {
            return;
        }
        if self.text.len() >= LINE_CAP {
            return;
        }
        self.text.push(c);
    }

    /// Remove the last character; no-op when empty
    pub fn backspace(&mut self) {
        self.text.pop();
    }

    /// Take the buffer contents, leaving it empty
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
