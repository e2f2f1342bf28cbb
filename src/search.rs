//! Binary searches over the gapped buffer.
//!
//! A probe that lands on a gap is redirected to the nearest occupied slot,
//! looking backward first and forward second. When the remaining range holds
//! no entry at all, the search stops at its boundary.
use crate::entry::{nearest_occupied, Slot};
use crate::key::Key;
use std::ops::Range;

/// Returns the index of the first occupied slot in `range` whose key is not
/// less than `key`, or `range.end` if there is none.
pub(crate) fn lower_bound<K: Key, V>(slots: &[Slot<K, V>], range: Range<usize>, key: &K) -> usize {
    let Range { start: mut low, end: mut high } = range;

    while low < high {
        let middle = low + (high - low) / 2;
        let probe = match nearest_occupied(slots, low..high, middle) {
            Some(probe) => probe,
            None => return high,
        };

        if slot_key(slots, probe) < key {
            // Everything up to the probe, and the gaps after it up to the
            // middle, are before the answer.
            low = probe.max(middle) + 1;
        } else {
            high = probe;
        }
    }

    high
}

/// Returns the insertion position of `key` in `range`: one past the last
/// occupied slot whose key is not greater than `key`, or `range.start` if there
/// is none.
pub(crate) fn upper_bound<K: Key, V>(slots: &[Slot<K, V>], range: Range<usize>, key: &K) -> usize {
    let Range { start: mut low, end: mut high } = range;

    while low < high {
        let middle = low + (high - low) / 2;
        let probe = match nearest_occupied(slots, low..high, middle) {
            Some(probe) => probe,
            None => return low,
        };

        if key < slot_key(slots, probe) {
            if probe > middle {
                // The probe was found forward, so `low..probe` only holds gaps.
                return low;
            }
            high = probe;
        } else {
            low = probe + 1;
        }
    }

    low
}

fn slot_key<K, V>(slots: &[Slot<K, V>], index: usize) -> &K {
    match &slots[index] {
        Some(entry) => &entry.key,
        None => unreachable!("probe {} is a gap", index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::tests::layout;

    #[test]
    fn lower_bound_skips_gaps() {
        let slots = layout(&[0, 2, 0, 0, 5, 0, 8, 9, 0, 0, 0, 14, 0, 0, 0, 0]);

        assert_eq!(lower_bound(&slots, 0..16, &1), 1);
        assert_eq!(lower_bound(&slots, 0..16, &2), 1);
        assert_eq!(lower_bound(&slots, 0..16, &3), 4);
        assert_eq!(lower_bound(&slots, 0..16, &5), 4);
        assert_eq!(lower_bound(&slots, 0..16, &9), 7);
        assert_eq!(lower_bound(&slots, 0..16, &10), 11);
        assert_eq!(lower_bound(&slots, 0..16, &14), 11);
        assert_eq!(lower_bound(&slots, 0..16, &15), 16);
        assert_eq!(lower_bound(&slots, 0..12, &15), 12);
    }

    #[test]
    fn upper_bound_is_after_last_smaller_or_equal() {
        let slots = layout(&[0, 2, 0, 0, 5, 0, 8, 9, 0, 0, 0, 14, 0, 0, 0, 0]);

        assert_eq!(upper_bound(&slots, 0..16, &1), 0);
        assert_eq!(upper_bound(&slots, 0..16, &2), 2);
        assert_eq!(upper_bound(&slots, 0..16, &3), 2);
        assert_eq!(upper_bound(&slots, 0..16, &5), 5);
        assert_eq!(upper_bound(&slots, 0..16, &8), 7);
        assert_eq!(upper_bound(&slots, 0..16, &9), 8);
        assert_eq!(upper_bound(&slots, 0..16, &13), 8);
        assert_eq!(upper_bound(&slots, 0..16, &20), 12);
        assert_eq!(upper_bound(&slots, 0..12, &20), 12);
    }

    #[test]
    fn dense_runs() {
        let slots = layout(&[1, 2, 3, 4, 5, 6, 7, 0]);

        for key in 1..=7 {
            let index = key as usize - 1;
            assert_eq!(lower_bound(&slots, 0..7, &key), index);
            assert_eq!(upper_bound(&slots, 0..7, &key), index + 1);
        }
        assert_eq!(lower_bound(&slots, 0..2, &2), 1);
        assert_eq!(lower_bound(&slots, 0..7, &8), 7);
        assert_eq!(upper_bound(&slots, 0..7, &-1), 0);
    }

    #[test]
    fn empty_ranges() {
        let slots = layout(&[0, 0, 0, 0, 0, 0, 0, 0]);

        assert_eq!(lower_bound(&slots, 0..8, &4), 8);
        assert_eq!(upper_bound(&slots, 0..8, &4), 0);
        assert_eq!(lower_bound(&slots, 0..0, &4), 0);
        assert_eq!(upper_bound(&slots, 3..3, &4), 3);
    }

    #[test]
    fn duplicates() {
        let slots = layout(&[3, 0, 4, 4, 0, 4, 6, 0]);

        assert_eq!(lower_bound(&slots, 0..8, &4), 2);
        assert_eq!(upper_bound(&slots, 0..8, &4), 6);
    }
}
