use crate::apma::APMA;
use crate::density::Thresholds;
use crate::entry::{empty_slots, Slot};
use crate::key::Key;
use itertools::Itertools;

impl<K: Key, V> APMA<K, V> {
    /// Doubles the capacity of the buffer.
    ///
    /// Every segment is split in two around the middle of its entries (by
    /// count, not by slot): the first half keeps its layout at the start of the
    /// first new segment, the rest keeps its layout at the start of the second
    /// one.
    ///
    /// The segment occupancy index is not maintained here; callers recount it.
    pub(crate) fn grow(&mut self) {
        let segment_size = self.segment_size();
        debug_log!(capacity = self.capacity(), len = self.len, "doubling capacity");

        let mut grown: Vec<Slot<K, V>> = empty_slots(self.capacity() * 2);

        for (segment, slots) in self.slots.chunks_mut(segment_size).enumerate() {
            let kept = self.occupancy.get(segment) / 2;
            let split = match kept {
                0 => 0,
                _ => slots
                    .iter()
                    .positions(Option::is_some)
                    .nth(kept - 1)
                    .map_or(0, |i| i + 1),
            };

            let base = 2 * segment * segment_size;
            for (offset, slot) in slots.iter_mut().enumerate() {
                let destination = if offset < split {
                    base + offset
                } else {
                    base + segment_size + offset - split
                };
                grown[destination] = slot.take();
            }
        }

        self.slots = grown;
        self.thresholds = Thresholds::new(&self.config, self.thresholds.height() + 1);
    }

    /// Halves the capacity of the buffer, packing the entries at the start of
    /// the new segments. With `n` new segments, each receives `len / n` entries
    /// and the first `len % n` receive one more.
    ///
    /// The segment occupancy index is not maintained here; callers recount it.
    pub(crate) fn shrink(&mut self) {
        debug_assert!(self.segment_count() > 1);
        let segment_size = self.segment_size();
        let segment_count = self.segment_count() / 2;
        debug_log!(capacity = self.capacity(), len = self.len, "halving capacity");

        let per_segment = self.len / segment_count;
        let remainder = self.len % segment_count;
        let mut shrunk: Vec<Slot<K, V>> = empty_slots(segment_count * segment_size);

        {
            let mut entries = self.slots.iter_mut().filter_map(Option::take);
            for (segment, slots) in shrunk.chunks_mut(segment_size).enumerate() {
                let quota = per_segment + usize::from(segment < remainder);
                debug_assert!(quota <= segment_size);
                for (slot, entry) in slots[..quota].iter_mut().zip(&mut entries) {
                    *slot = Some(entry);
                }
            }
            debug_assert!(entries.next().is_none());
        }

        self.slots = shrunk;
        self.thresholds = Thresholds::new(&self.config, self.thresholds.height() - 1);
    }
}
