use crate::error::Error;

/// Layout and density configuration of an [`APMA`](crate::APMA).
///
/// Occupancies are expressed per segment: a window of `2^l` segments at level
/// `l` is too dense when it holds `max_occ(l) * 2^l` entries or more, and too
/// sparse when it holds `min_occ(l) * 2^l` entries or fewer. The bounds are
/// interpolated between the leaf values (a single segment) and the root values
/// (the whole array), so they tighten as windows grow.
///
/// # Example
/// ```
/// use apma::Config;
///
/// let config = Config::default().with_segment_size(16).with_max_occupancy(14, 12);
///
/// assert!(config.validate().is_ok());
/// assert!(Config::default().with_segment_size(1).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of slots in a segment.
    pub segment_size: usize,
    /// Maximum occupancy of a single segment.
    pub max_occ_leaf: usize,
    /// Maximum occupancy per segment of the whole array.
    pub max_occ_root: usize,
    /// Minimum occupancy of a single segment.
    pub min_occ_leaf: usize,
    /// Minimum occupancy per segment of the whole array.
    pub min_occ_root: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            segment_size: 8,
            max_occ_leaf: 7,
            max_occ_root: 6,
            min_occ_leaf: 2,
            min_occ_root: 3,
        }
    }
}

impl Config {
    pub fn with_segment_size(mut self, segment_size: usize) -> Self {
        self.segment_size = segment_size;
        self
    }

    /// Sets the maximum occupancies of a single segment and of the root.
    pub fn with_max_occupancy(mut self, leaf: usize, root: usize) -> Self {
        self.max_occ_leaf = leaf;
        self.max_occ_root = root;
        self
    }

    /// Sets the minimum occupancies of a single segment and of the root.
    pub fn with_min_occupancy(mut self, leaf: usize, root: usize) -> Self {
        self.min_occ_leaf = leaf;
        self.min_occ_root = root;
        self
    }

    /// Checks the constraints the rebalancing algorithm relies on.
    ///
    /// Besides the ordering of the bounds, a segment must always keep one
    /// free slot (`max_occ_leaf < segment_size`), the minimum and maximum
    /// bounds of the root must not overlap, and halving the array at the root
    /// minimum must not pack a segment past `max_occ_leaf`.
    ///
    /// Together these need `2 ≤ 2 · min_occ_root ≤ max_occ_leaf < segment_size`,
    /// so the smallest accepted `segment_size` is 3, and no configuration with
    /// `segment_size == 2` passes.
    pub fn validate(&self) -> Result<(), Error> {
        if self.segment_size < 2 {
            return Err(Error::InvalidConfig("segment_size must be at least 2"));
        }
        if self.min_occ_leaf == 0 {
            return Err(Error::InvalidConfig("occupancy bounds must be positive"));
        }
        if self.min_occ_leaf > self.min_occ_root {
            return Err(Error::InvalidConfig("min_occ_leaf must not exceed min_occ_root"));
        }
        if self.max_occ_root > self.max_occ_leaf {
            return Err(Error::InvalidConfig("max_occ_root must not exceed max_occ_leaf"));
        }
        if self.min_occ_root >= self.max_occ_root {
            return Err(Error::InvalidConfig("min_occ_root must be below max_occ_root"));
        }
        if self.max_occ_leaf >= self.segment_size {
            return Err(Error::InvalidConfig("max_occ_leaf must be below segment_size"));
        }
        if 2 * self.min_occ_root > self.max_occ_leaf {
            return Err(Error::InvalidConfig(
                "max_occ_leaf must be at least twice min_occ_root",
            ));
        }
        Ok(())
    }
}
