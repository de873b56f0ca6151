//! Explicit cursor over an owned item sequence.

/// Forward-only position into a slice, restartable with [`rewind`](Cursor::rewind).
///
/// The cursor stores only an index; the items stay with their owner and are
/// passed in on every read, so a cursor can never outlive or alias them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    position: usize,
}

impl Cursor {
    /// A cursor at the first element.
    pub fn new() -> Self {
        Self::default()
    }

    /// The element under the cursor, or `None` once past the end.
    pub fn current<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        items.get(self.position)
    }

    /// The position of the current element, or `None` once past the end.
    pub fn key(&self, len: usize) -> Option<usize> {
        (self.position < len).then_some(self.position)
    }

    /// Moves to the next element. Saturates once past the end.
    pub fn advance(&mut self, len: usize) {
        if self.position < len {
            self.position += 1;
        }
    }

    /// `false` once the cursor has passed the last element.
    pub fn is_valid(&self, len: usize) -> bool {
        self.position < len
    }

    /// Returns to the first element.
    pub fn rewind(&mut self) {
        self.position = 0;
    }
}
