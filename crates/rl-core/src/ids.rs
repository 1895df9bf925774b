use core::fmt;

/// Position of a participant in the line.
///
/// Adjacency is purely positional: the left neighbor of slot `i` is `i-1`,
/// the right neighbor is `i+1`, and there is no wraparound.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotId(usize);

impl SlotId {
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }

    /// Left neighbor, or `None` at the left boundary.
    pub fn left(self) -> Option<SlotId> {
        self.0.checked_sub(1).map(SlotId)
    }

    /// Right neighbor, or `None` at the right boundary of a line of `len` slots.
    pub fn right(self, len: usize) -> Option<SlotId> {
        let next = self.0 + 1;
        (next < len).then_some(SlotId(next))
    }
}

impl fmt::Debug for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotId({})", self.0)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
