use std::ops::Range;

/// A key and its owned payload, as stored in an occupied slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
}

/// A slot of the packed buffer. `None` is a gap.
pub(crate) type Slot<K, V> = Option<Entry<K, V>>;

/// Creates `count` empty slots.
pub(crate) fn empty_slots<K, V>(count: usize) -> Vec<Slot<K, V>> {
    std::iter::repeat_with(|| None).take(count).collect()
}

/// Returns the first index in `range` whose slot is occupied (or empty, when
/// `occupied` is false).
pub(crate) fn find_forward<K, V>(
    slots: &[Slot<K, V>],
    range: Range<usize>,
    occupied: bool,
) -> Option<usize> {
    range.into_iter().find(|&i| slots[i].is_some() == occupied)
}

/// Returns the last index in `range` whose slot is occupied (or empty, when
/// `occupied` is false).
pub(crate) fn find_backward<K, V>(
    slots: &[Slot<K, V>],
    range: Range<usize>,
    occupied: bool,
) -> Option<usize> {
    range.into_iter().rev().find(|&i| slots[i].is_some() == occupied)
}

/// Nearest occupied slot around `middle`: `middle` itself when it holds an
/// entry, otherwise looking toward `range.start` first.
pub(crate) fn nearest_occupied<K, V>(
    slots: &[Slot<K, V>],
    range: Range<usize>,
    middle: usize,
) -> Option<usize> {
    if range.contains(&middle) && slots[middle].is_some() {
        return Some(middle);
    }
    find_backward(slots, range.start..middle, true)
        .or_else(|| find_forward(slots, middle..range.end, true))
}

/// Nearest gap around `middle`, looking toward `range.end` first.
pub(crate) fn nearest_empty<K, V>(
    slots: &[Slot<K, V>],
    range: Range<usize>,
    middle: usize,
) -> Option<usize> {
    find_forward(slots, middle..range.end, false)
        .or_else(|| find_backward(slots, range.start..middle, false))
}

pub(crate) fn count_occupied<K, V>(slots: &[Slot<K, V>]) -> usize {
    slots.iter().filter(|s| s.is_some()).count()
}

/// Partitions `slots` so that the occupied slots come first (or last, when
/// `occupied_first` is false), and returns the partition point.
///
/// Occupied slots keep their relative order. Gaps are interchangeable, so a
/// single pass swapping each entry into the next free position is enough.
pub(crate) fn partition<K, V>(slots: &mut [Slot<K, V>], occupied_first: bool) -> usize {
    if occupied_first {
        let mut write = 0;
        for read in 0..slots.len() {
            if slots[read].is_some() {
                slots.swap(write, read);
                write += 1;
            }
        }
        write
    } else {
        let mut write = slots.len();
        for read in (0..slots.len()).rev() {
            if slots[read].is_some() {
                write -= 1;
                slots.swap(write, read);
            }
        }
        write
    }
}
