//! Structural checks of the packed buffer.
//!
//! The insert and delete paths run [`APMA::check_invariants`] before and after
//! every mutation in builds with debug assertions.
use crate::apma::APMA;
use crate::entry::count_occupied;
use crate::key::Key;
use itertools::Itertools;
use std::fmt;

/// A broken invariant, as reported by [`APMA::check_invariants`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// The entry at `index` has a smaller key than the entry before it.
    Unordered { index: usize },

    /// The recorded entry count differs from the sum of segment occupancies.
    Accounting { recorded: usize, counted: usize },

    /// A segment holds a different number of entries than recorded.
    SegmentCount {
        segment: usize,
        recorded: usize,
        counted: usize,
    },

    /// A segment holds more entries than the leaf bound allows.
    SegmentOverflow { segment: usize, occupancy: usize },

    /// The recorded end of the occupied prefix is wrong.
    LastIndex { recorded: usize, actual: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unordered { index } => write!(f, "entry at slot {} is out of order", index),

            Self::Accounting { recorded, counted } => write!(
                f,
                "length is {} but segments hold {} entries",
                recorded, counted
            ),

            Self::SegmentCount {
                segment,
                recorded,
                counted,
            } => write!(
                f,
                "segment {} is recorded with {} entries but holds {}",
                segment, recorded, counted
            ),

            Self::SegmentOverflow { segment, occupancy } => {
                write!(f, "segment {} holds {} entries", segment, occupancy)
            }

            Self::LastIndex { recorded, actual } => write!(
                f,
                "last index is recorded as {} but is {}",
                recorded, actual
            ),
        }
    }
}

impl std::error::Error for Violation {}

impl<K: Key, V> APMA<K, V> {
    /// Checks the ordering of the entries, the occupancy accounting, the leaf
    /// occupancy bound and the end of the occupied prefix.
    ///
    /// # Example
    /// ```
    /// use apma::APMA;
    ///
    /// let mut apma = APMA::new();
    /// for key in (1..=100u32).rev() {
    ///     apma.insert(key, ()).unwrap();
    /// }
    ///
    /// assert_eq!(apma.check_invariants(), Ok(()));
    /// ```
    pub fn check_invariants(&self) -> Result<(), Violation> {
        if let Some((_, (index, _))) = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|entry| (i, entry.key)))
            .tuple_windows()
            .find(|((_, previous), (_, key))| key < previous)
        {
            return Err(Violation::Unordered { index });
        }

        let counted = self.occupancy.total();
        if counted != self.len {
            return Err(Violation::Accounting {
                recorded: self.len,
                counted,
            });
        }

        for (segment, slots) in self.slots.chunks(self.segment_size()).enumerate() {
            let recorded = self.occupancy.get(segment);
            let counted = count_occupied(slots);
            if recorded != counted {
                return Err(Violation::SegmentCount {
                    segment,
                    recorded,
                    counted,
                });
            }
            if counted > self.config.max_occ_leaf {
                return Err(Violation::SegmentOverflow {
                    segment,
                    occupancy: counted,
                });
            }
        }

        let actual = self
            .slots
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |i| i + 1);
        if actual != self.last_index {
            return Err(Violation::LastIndex {
                recorded: self.last_index,
                actual,
            });
        }

        Ok(())
    }

    #[inline]
    pub(crate) fn debug_assert_invariants(&self) {
        #[cfg(debug_assertions)]
        {
            if let Err(violation) = self.check_invariants() {
                panic!("packed-memory array invariant violated: {}", violation);
            }
        }
    }
}
