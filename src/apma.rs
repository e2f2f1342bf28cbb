use crate::config::Config;
use crate::density::Thresholds;
use crate::entry::{empty_slots, find_backward, nearest_empty, Entry, Slot};
use crate::error::Error;
use crate::key::Key;
use crate::occupancy::SegmentOccupancy;
use crate::search::{lower_bound, upper_bound};
use crate::{Bounds, Level, SegmentIndex};
use std::cmp::Ordering;
use std::ops::Range;

/// An Adaptive Packed-Memory Array, which keeps gaps in the underlying vector
/// to enable fast ordered insertion.
///
/// ## Structure
/// The entries are kept sorted by key in a single vector of slots, some of
/// them empty. The vector is split into segments of a fixed size, and the
/// number of segments is always a power of two: they are the leaves of an
/// implicit perfect binary tree. Every window of the tree (a node and the
/// segments below it) must keep its occupancy between bounds that depend on
/// its level, tightening from the leaves toward the root.
///
/// ## Rebalancing
/// Before an insertion (and after a deletion), the windows containing the
/// affected slot are checked from the leaf up to the root. When one is out of
/// bounds, the enclosing window one level above the highest violation is
/// _redistributed_: its entries are spread evenly between its halves,
/// recursively down to the segments. If the root itself is out of bounds, the
/// vector doubles (or halves) its size and every entry is spread over the new
/// segments.
///
/// ## Complexity
/// Insertions and deletions move O(log² N) entries amortized[^1]; searches
/// are binary searches that skip over gaps.
///
/// [^1]: Bender, M. A. & Hu, H. (2007). An adaptive packed-memory array.
#[derive(Debug)]
pub struct APMA<K, V> {
    pub(crate) slots: Vec<Slot<K, V>>,
    pub(crate) occupancy: SegmentOccupancy,
    pub(crate) thresholds: Thresholds,
    pub(crate) config: Config,
    pub(crate) len: usize,
    pub(crate) last_index: usize,
}

impl<K: Key, V> Default for APMA<K, V> {
    fn default() -> Self {
        APMA::new()
    }
}

impl<K: Key, V> APMA<K, V> {
    /// Creates an empty APMA with the default configuration: segments of 8
    /// slots, at most 7 entries per segment and between 3 and 6 entries per
    /// segment over the whole array.
    ///
    /// # Example
    /// ```
    /// use apma::APMA;
    ///
    /// let apma: APMA<u32, String> = APMA::new();
    ///
    /// assert!(apma.is_empty());
    /// assert_eq!(apma.capacity(), 8);
    /// ```
    pub fn new() -> Self {
        Self::empty(Config::default())
    }

    /// Creates an empty APMA with a custom configuration.
    ///
    /// # Example
    /// ```
    /// use apma::{Config, Error, APMA};
    ///
    /// let config = Config::default().with_segment_size(16).with_max_occupancy(14, 12);
    /// let apma: APMA<i64, ()> = APMA::with_config(config).unwrap();
    ///
    /// assert_eq!(apma.capacity(), 16);
    ///
    /// let config = Config::default().with_segment_size(4);
    /// assert!(matches!(APMA::<i64, ()>::with_config(config), Err(Error::InvalidConfig(_))));
    /// ```
    pub fn with_config(config: Config) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self::empty(config))
    }

    fn empty(config: Config) -> Self {
        APMA {
            slots: empty_slots(config.segment_size),
            occupancy: SegmentOccupancy(vec![0]),
            thresholds: Thresholds::new(&config, 0),
            config,
            len: 0,
            last_index: 0,
        }
    }

    /// Returns the number of entries in the structure.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots, gaps included.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn segment_size(&self) -> usize {
        self.config.segment_size
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.slots.len() / self.config.segment_size
    }

    /// Returns the height of the implicit segment tree, `log2(segment_count)`.
    pub fn height(&self) -> Level {
        self.thresholds.height()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the fraction of occupied slots.
    pub fn density(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    /// Returns the number of entries held by each segment.
    ///
    /// # Example
    /// ```
    /// use apma::APMA;
    ///
    /// let mut apma = APMA::new();
    /// for key in 1..=8u32 {
    ///     apma.insert(key, ()).unwrap();
    /// }
    ///
    /// assert_eq!(apma.segment_occupancy().iter().sum::<usize>(), apma.len());
    /// ```
    pub fn segment_occupancy(&self) -> &[usize] {
        self.occupancy.as_slice()
    }

    /// Returns the per-segment occupancy bounds (`min..max`) of the windows at
    /// `level`, or `None` above the root.
    pub fn bounds(&self, level: Level) -> Option<&Bounds> {
        if level <= self.height() {
            Some(self.thresholds.bounds(level))
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn segment_of(&self, index: usize) -> SegmentIndex {
        index / self.config.segment_size
    }

    pub(crate) fn lower_bound(&self, key: &K, range: Range<usize>) -> usize {
        lower_bound(&self.slots, range, key)
    }

    pub(crate) fn upper_bound(&self, key: &K, range: Range<usize>) -> usize {
        upper_bound(&self.slots, range, key)
    }

    /// Returns the slot index of the first entry with the given key.
    ///
    /// The index is only meaningful until the next mutation: rebalancing
    /// relocates entries.
    pub fn position(&self, key: &K) -> Option<usize> {
        if key.is_reserved() {
            return None;
        }
        let index = self.lower_bound(key, 0..self.last_index);
        match self.slots.get(index) {
            Some(Some(entry)) if entry.key == *key => Some(index),
            _ => None,
        }
    }

    /// Returns a reference to the value of the first entry with the given key.
    ///
    /// # Example
    /// ```
    /// use apma::APMA;
    ///
    /// let mut apma = APMA::new();
    /// apma.insert(7u32, "seven").unwrap();
    ///
    /// assert_eq!(apma.find(&7), Some(&"seven"));
    /// assert_eq!(apma.find(&8), None);
    /// assert_eq!(apma.find(&0), None);
    /// ```
    pub fn find(&self, key: &K) -> Option<&V> {
        let index = self.position(key)?;
        self.slots[index].as_ref().map(|entry| &entry.value)
    }

    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.position(key)?;
        self.slots[index].as_mut().map(|entry| &mut entry.value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.position(key).is_some()
    }

    /// Returns a view of the whole buffer, gaps included.
    ///
    /// # Example
    /// ```
    /// use apma::APMA;
    ///
    /// let mut apma = APMA::new();
    /// apma.insert(2u8, ()).unwrap();
    /// apma.insert(1u8, ()).unwrap();
    ///
    /// let slots = apma.slots().collect::<Vec<_>>();
    /// assert_eq!(slots, vec![Some(&1), Some(&2), None, None, None, None, None, None]);
    /// ```
    pub fn slots(&self) -> impl Iterator<Item = Option<&K>> {
        self.slots.iter().map(|slot| slot.as_ref().map(|entry| &entry.key))
    }

    /// Inserts an entry, while maintaining the density bounds of the structure,
    /// and returns the slot index it was written to.
    ///
    /// If the insertion would push a window past its density bound, the
    /// highest such window is rebalanced beforehand; if that window is the
    /// whole array, the array doubles its capacity. An existing key is not
    /// replaced: the new entry is stored after the existing ones.
    ///
    /// # Errors
    /// Returns [`Error::InvalidKey`] for the reserved key, leaving the
    /// structure untouched.
    ///
    /// # Example
    /// ```
    /// use apma::{Error, APMA};
    ///
    /// let mut apma = APMA::new();
    ///
    /// for key in 1..=7i32 {
    ///     apma.insert(key * 10, key).unwrap();
    /// }
    /// assert_eq!(apma.capacity(), 8);
    ///
    /// apma.insert(5, 0).unwrap();
    /// assert_eq!(apma.capacity(), 16);
    /// assert_eq!(apma.segment_occupancy(), &[4, 4]);
    ///
    /// assert_eq!(apma.insert(0, 0), Err(Error::InvalidKey));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<usize, Error> {
        if key.is_reserved() {
            return Err(Error::InvalidKey);
        }
        self.debug_assert_invariants();

        let mut index = self.upper_bound(&key, 0..self.last_index);
        let height = self.height();
        let probe = self.segment_of(index.min(self.capacity() - 1));

        if let Some(level) = self
            .thresholds
            .surpassed(&self.occupancy, probe, Ordering::Greater)
        {
            if level == height {
                self.grow();
            } else {
                self.redistribute(index, level + 1);
            }
            self.refresh();
            index = self.upper_bound(&key, 0..self.last_index);
        }

        let position = self.place(index, Entry { key, value });
        self.len += 1;

        self.debug_assert_invariants();
        Ok(position)
    }

    /// Writes `entry` at the insertion position `index`, shifting the
    /// neighbouring entries of its segment toward the nearest gap.
    fn place(&mut self, index: usize, entry: Entry<K, V>) -> usize {
        let segment_size = self.segment_size();
        let segment = self.segment_of(index).min(self.segment_count() - 1);
        let start = segment * segment_size;
        let end = start + segment_size;

        let gap = if self.occupancy.get(segment) < self.config.max_occ_leaf {
            nearest_empty(&self.slots, start..end, index)
        } else {
            None
        };

        let gap = match gap {
            Some(gap) => gap,
            None => {
                // A rebalance moved the insertion point into a full segment
                // outside of its window.
                debug_log!(
                    level = 0,
                    segment,
                    occupancy = self.occupancy.get(segment),
                    max_occ_leaf = self.config.max_occ_leaf,
                    capacity = self.capacity(),
                    "insertion segment is full outside the rebalanced window, growing"
                );
                self.grow();
                self.refresh();
                let index = self.upper_bound(&entry.key, 0..self.last_index);
                return self.place(index, entry);
            }
        };

        let position = if gap >= index {
            self.slots[index..=gap].rotate_right(1);
            index
        } else {
            self.slots[gap..index].rotate_left(1);
            index - 1
        };

        debug_assert!(self.slots[position].is_none());
        self.slots[position] = Some(entry);
        self.occupancy.increment(segment);
        self.last_index = self.last_index.max(gap + 1);

        position
    }

    /// Removes the first entry with the given key and returns its value, or
    /// `None` if no entry has this key.
    ///
    /// If the removal leaves a window too sparse, the highest such window is
    /// rebalanced; if that window is the whole array, the array halves its
    /// capacity (never below a single segment).
    ///
    /// # Errors
    /// Returns [`Error::InvalidKey`] for the reserved key.
    ///
    /// # Example
    /// ```
    /// use apma::APMA;
    ///
    /// let mut apma = APMA::new();
    /// apma.insert(3u64, String::from("three")).unwrap();
    ///
    /// assert_eq!(apma.delete(&4), Ok(None));
    /// assert_eq!(apma.delete(&3), Ok(Some(String::from("three"))));
    /// assert!(apma.is_empty());
    /// assert!(apma.delete(&0).is_err());
    /// ```
    pub fn delete(&mut self, key: &K) -> Result<Option<V>, Error> {
        if key.is_reserved() {
            return Err(Error::InvalidKey);
        }
        self.debug_assert_invariants();

        let index = match self.position(key) {
            Some(index) => index,
            None => return Ok(None),
        };

        let removed = self.slots[index].take().map(|entry| entry.value);
        let segment = self.segment_of(index);
        self.occupancy.decrement(segment);
        self.len -= 1;
        if index + 1 == self.last_index {
            self.last_index = find_backward(&self.slots, 0..index, true).map_or(0, |i| i + 1);
        }

        let height = self.height();
        if let Some(level) = self
            .thresholds
            .surpassed(&self.occupancy, segment, Ordering::Less)
        {
            if level != height {
                self.redistribute(index, level + 1);
                self.refresh();
            } else if self.capacity() > self.segment_size() {
                self.shrink();
                self.refresh();
            }
        }

        self.debug_assert_invariants();
        Ok(removed)
    }

    /// Removes every entry and goes back to a single empty segment.
    pub fn clear(&mut self) {
        *self = Self::empty(self.config);
    }

    /// Recounts the segment occupancies and the end of the occupied prefix
    /// after a structural change.
    pub(crate) fn refresh(&mut self) {
        self.occupancy = SegmentOccupancy::count(&self.slots, self.segment_size());
        self.last_index = find_backward(&self.slots, 0..self.capacity(), true).map_or(0, |i| i + 1);
    }
}
