//! Query buffer manager
//!
//! Seven fixed, independent query slots ("tabs"). Each slot's backing
//! buffer is lazily allocated on the first character appended, grows up to
//! a fixed cap, and is never shared with or cleared by another slot.
//! Contents persist across mode transitions until the process ends.

use crate::db::adapter::Adapter;
use crate::db::types::QueryResult;
use crate::error::AdapterResult;
use crate::input::is_printable_ascii;

/// Number of query slots
pub const SLOT_COUNT: usize = 7;

/// Byte cap per slot; input past the cap is silently dropped
pub const SLOT_CAP: usize = 4096;

/// The 7-slot query buffer set with one active slot.
pub struct QueryBuffers {
    slots: [Option<String>; SLOT_COUNT],
    active: usize,
}

impl Default for QueryBuffers {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryBuffers {
    pub fn new() -> Self {
        Self {
            slots: [const { None }; SLOT_COUNT],
            active: 0,
        }
    }

    /// Index of the active slot (0-based)
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Switch the active slot
    pub fn set_active(&mut self, index: usize) {
        debug_assert!(index < SLOT_COUNT);
        self.active = index % SLOT_COUNT;
    }

    /// Rotate to the next slot, wrapping after the last
    pub fn cycle(&mut self) {
        self.active = (self.active + 1) % SLOT_COUNT;
    }

    /// Text of the active slot ("" if its buffer was never allocated)
    pub fn active_text(&self) -> &str {
        self.slot_text(self.active)
    }

    /// Text of an arbitrary slot
    pub fn slot_text(&self, index: usize) -> &str {
        self.slots[index].as_deref().unwrap_or("")
    }

    /// Append a character to the active slot, allocating its buffer on
    /// first use. Non-printable input and input past [`SLOT_CAP`] are
    /// silently dropped.
    pub fn push(&mut self, c: char) {
        if !is_printable_ascii(c) {
            return;
        }
        let buf = self.slots[self.active].get_or_insert_with(String::new);
        if buf.len() >= SLOT_CAP {
            return;
        }
        buf.push(c);
    }

    /// Remove the last character of the active slot; no-op when empty
    pub fn backspace(&mut self) {
        if let Some(buf) = self.slots[self.active].as_mut() {
            buf.pop();
        }
    }

    /// Execute the active slot's full text through the adapter.
    ///
    /// The returned result has already passed the structural invariant
    /// (every row as wide as the column list); a violating result is an
    /// adapter error and is never handed to the rendering layer.
    pub async fn execute(&self, adapter: &mut dyn Adapter) -> AdapterResult<QueryResult> {
        let result = adapter.execute_query(self.active_text()).await?;
        result.validate()?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_allocation() {
        let mut buffers = QueryBuffers::new();
        assert!(buffers.slots.iter().all(Option::is_none));
        buffers.push('S');
        assert!(buffers.slots[0].is_some());
        assert!(buffers.slots[1..].iter().all(Option::is_none));
    }

    #[test]
    fn test_slot_isolation() {
        let mut buffers = QueryBuffers::new();
        for c in "SELECT 1".chars() {
            buffers.push(c);
        }
        buffers.set_active(3);
        for c in "SELECT 2".chars() {
            buffers.push(c);
        }
        assert_eq!(buffers.slot_text(0), "SELECT 1");
        assert_eq!(buffers.slot_text(3), "SELECT 2");
        for i in [1, 2, 4, 5, 6] {
            assert_eq!(buffers.slot_text(i), "");
        }
    }

    #[test]
    fn test_switching_back_preserves_content() {
        let mut buffers = QueryBuffers::new();
        buffers.push('a');
        buffers.cycle();
        buffers.push('b');
        buffers.set_active(0);
        assert_eq!(buffers.active_text(), "a");
    }

    #[test]
    fn test_cycle_wraps() {
        let mut buffers = QueryBuffers::new();
        for _ in 0..SLOT_COUNT {
            buffers.cycle();
        }
        assert_eq!(buffers.active_index(), 0);
    }

    #[test]
    fn test_cap_silently_drops() {
        let mut buffers = QueryBuffers::new();
        for _ in 0..SLOT_CAP {
            buffers.push('x');
        }
        buffers.push('y');
        assert_eq!(buffers.active_text().len(), SLOT_CAP);
        assert!(!buffers.active_text().ends_with('y'));
    }

    #[test]
    fn test_backspace_on_unallocated_slot() {
        let mut buffers = QueryBuffers::new();
        buffers.backspace();
        assert_eq!(buffers.active_text(), "");
        assert!(buffers.slots[0].is_none());
    }
}
