use crate::entry::{count_occupied, Slot};
use crate::{SegmentIndex, Window};

/// The number of live entries of every segment, kept in sync with the buffer
/// by the insert and delete paths, and recounted after any structural change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SegmentOccupancy(pub(crate) Vec<usize>);

impl SegmentOccupancy {
    /// Counts the occupied slots of every segment of `slots`.
    pub(crate) fn count<K, V>(slots: &[Slot<K, V>], segment_size: usize) -> SegmentOccupancy {
        SegmentOccupancy(slots.chunks(segment_size).map(count_occupied).collect())
    }

    pub(crate) fn get(&self, segment: SegmentIndex) -> usize {
        self.0[segment]
    }

    /// Returns the number of entries held by the segments of `window`.
    pub(crate) fn window(&self, window: Window) -> usize {
        self.0[window].iter().sum()
    }

    pub(crate) fn increment(&mut self, segment: SegmentIndex) {
        self.0[segment] += 1;
    }

    pub(crate) fn decrement(&mut self, segment: SegmentIndex) {
        debug_assert!(self.0[segment] > 0);
        self.0[segment] -= 1;
    }

    pub(crate) fn total(&self) -> usize {
        self.0.iter().sum()
    }

    pub(crate) fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::tests::layout;

    #[test]
    fn counts_per_segment() {
        let slots = layout(&[1, 2, 0, 0, 0, 0, 0, 3, 4, 5, 6, 0]);
        let mut occupancy = SegmentOccupancy::count(&slots, 4);

        assert_eq!(occupancy.as_slice(), &[2, 1, 3]);
        assert_eq!(occupancy.window(1..3), 4);
        assert_eq!(occupancy.total(), 6);

        occupancy.increment(1);
        occupancy.decrement(2);
        assert_eq!(occupancy.as_slice(), &[2, 2, 2]);
        assert_eq!(occupancy.get(1), 2);
    }
}
