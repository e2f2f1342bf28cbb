use crate::apma::APMA;
use crate::entry::{count_occupied, partition};
use crate::key::Key;
use crate::window::{slot_range, SegmentTree};
use crate::Level;
use std::ops::Range;

impl<K: Key, V> APMA<K, V> {
    /// Spreads the entries of the window at `level` containing `index` evenly
    /// between its two halves, then does the same for each half, down to the
    /// segments.
    ///
    /// Only the entries closest to the boundary between the halves move: the
    /// denser half gathers the surplus against the boundary, the sparser half
    /// gathers as many gaps against it, and the two blocks swap places.
    ///
    /// The segment occupancy index is not maintained here; callers recount it.
    pub(crate) fn redistribute(&mut self, index: usize, level: Level) {
        if level == 0 {
            return;
        }

        let segment_size = self.segment_size();
        let segment = self.segment_of(index.min(self.capacity() - 1));
        let (left, right) = segment.halves(level);
        let left = slot_range(&left, segment_size);
        let right = slot_range(&right, segment_size);

        let left_count = count_occupied(&self.slots[left.clone()]);
        let right_count = count_occupied(&self.slots[right.clone()]);
        let excess = left_count as isize - ((left_count + right_count) / 2) as isize;

        trace_log!(level, left = ?left, left_count, right_count, excess, "redistributing window");

        if excess != 0 {
            self.move_across(left.clone(), right.clone(), excess);
        }

        if level == 1 {
            debug_assert!(
                count_occupied(&self.slots[left.clone()]) <= self.config.max_occ_leaf
                    && count_occupied(&self.slots[right.clone()]) <= self.config.max_occ_leaf,
                "segment pair {:?} overflows after redistribution",
                left.start..right.end
            );
        }

        self.redistribute(left.start, level - 1);
        self.redistribute(right.start, level - 1);
    }

    /// Moves `|excess|` entries from the left half to the right one (or the
    /// other way around when `excess` is negative).
    fn move_across(&mut self, left: Range<usize>, right: Range<usize>, excess: isize) {
        let moved = excess.unsigned_abs();
        let boundary = left.end;

        // Occupancy of the slots the left half pushes against the boundary:
        // entries when it gives, gaps when it receives.
        let giving = excess > 0;

        let from = left
            .clone()
            .rev()
            .filter(|&i| self.slots[i].is_some() == giving)
            .nth(moved - 1)
            .unwrap_or(left.start);
        let to = right
            .clone()
            .filter(|&i| self.slots[i].is_some() != giving)
            .nth(moved - 1)
            .map_or(right.end, |i| i + 1);

        partition(&mut self.slots[from..boundary], !giving);
        partition(&mut self.slots[boundary..to], !giving);

        debug_assert!(self.slots[boundary - moved..boundary]
            .iter()
            .all(|s| s.is_some() == giving));
        debug_assert!(self.slots[boundary..boundary + moved]
            .iter()
            .all(|s| s.is_some() != giving));

        self.slots[boundary - moved..boundary + moved].rotate_left(moved);
    }
}
