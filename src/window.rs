use crate::{Level, SegmentIndex, Window};
use std::ops::Range;

/// Index arithmetic over the implicit segment tree.
///
/// The tree has no nodes: the window at level `l` containing a segment spans
/// `2^l` segments and starts at the segment index with its `l` lowest bits
/// cleared. For example, with 8 segments, segment n°5 (0b101) belongs to:
/// - level 0: `5..6`
/// - level 1: `4..6` (0b10x)
/// - level 2: `4..8` (0b1xx)
/// - level 3: `0..8` (0bxxx)
pub(crate) trait SegmentTree {
    /// Returns the window at `level` containing this segment.
    fn window(self, level: Level) -> Window;

    /// Returns the two halves of the window at `level` containing this
    /// segment. `level` must be at least 1.
    fn halves(self, level: Level) -> (Window, Window);
}

impl SegmentTree for SegmentIndex {
    fn window(self, level: Level) -> Window {
        let start = self & (!0usize << level);
        start..start + (1 << level)
    }

    fn halves(self, level: Level) -> (Window, Window) {
        debug_assert!(level > 0);
        let window = self.window(level);
        let middle = window.start + (1 << (level - 1));
        (window.start..middle, middle..window.end)
    }
}

/// Converts a window of segments into the range of its slot indexes.
pub(crate) fn slot_range(window: &Window, segment_size: usize) -> Range<usize> {
    window.start * segment_size..window.end * segment_size
}
