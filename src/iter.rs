use crate::apma::APMA;
use crate::entry::Slot;
use crate::key::Key;
use std::ops::{Bound, RangeBounds};

/// An iterator over the entries of an [`APMA`], in ascending key order.
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    slots: std::slice::Iter<'a, Slot<K, V>>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(slots: &'a [Slot<K, V>]) -> Self {
        Iter {
            slots: slots.iter(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots
            .by_ref()
            .find_map(|slot| slot.as_ref())
            .map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.slots.len()))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.slots
            .by_ref()
            .rev()
            .find_map(|slot| slot.as_ref())
            .map(|entry| (&entry.key, &entry.value))
    }
}

/// An owning iterator over the entries of an [`APMA`], in ascending key order.
#[derive(Debug)]
pub struct IntoIter<K, V> {
    slots: std::vec::IntoIter<Slot<K, V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots
            .by_ref()
            .find_map(|slot| slot)
            .map(|entry| (entry.key, entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.slots.len()))
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.slots
            .by_ref()
            .rev()
            .find_map(|slot| slot)
            .map(|entry| (entry.key, entry.value))
    }
}

impl<K: Key, V> IntoIterator for APMA<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            slots: self.slots.into_iter(),
        }
    }
}

impl<'a, K: Key, V> IntoIterator for &'a APMA<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Key, V> APMA<K, V> {
    /// Returns an iterator over the entries, in ascending key order.
    ///
    /// # Example
    /// ```
    /// use apma::APMA;
    ///
    /// let mut apma = APMA::new();
    /// for key in [4i16, 2, 9] {
    ///     apma.insert(key, key * 2).unwrap();
    /// }
    ///
    /// let mut entries = apma.iter();
    ///
    /// assert_eq!(entries.next(), Some((&2, &4)));
    /// assert_eq!(entries.next_back(), Some((&9, &18)));
    /// assert_eq!(entries.next(), Some((&4, &8)));
    /// assert_eq!(entries.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.slots[..self.last_index])
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Returns the entry with the smallest key.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.iter().next()
    }

    /// Returns the entry with the largest key.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.iter().next_back()
    }

    /// Returns an iterator over the entries whose key lies in `range`, in
    /// ascending key order.
    ///
    /// # Example
    /// ```
    /// use apma::APMA;
    ///
    /// let mut apma = APMA::new();
    /// for key in 1..=50u32 {
    ///     apma.insert(key * 2, ()).unwrap();
    /// }
    ///
    /// let keys = apma.range(10..=17).map(|(k, _)| *k).collect::<Vec<_>>();
    /// assert_eq!(keys, vec![10, 12, 14, 16]);
    ///
    /// assert_eq!(apma.range(..5).count(), 2);
    /// assert_eq!(apma.range(95..).count(), 3);
    /// assert_eq!(apma.range(41..42).count(), 0);
    /// ```
    pub fn range<R: RangeBounds<K>>(&self, range: R) -> Iter<'_, K, V> {
        let occupied = 0..self.last_index;

        let start = match range.start_bound() {
            Bound::Included(key) => self.lower_bound(key, occupied.clone()),
            Bound::Excluded(key) => self.upper_bound(key, occupied.clone()),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(key) => self.upper_bound(key, occupied),
            Bound::Excluded(key) => self.lower_bound(key, occupied),
            Bound::Unbounded => self.last_index,
        };

        Iter::new(&self.slots[start..end.max(start)])
    }
}
