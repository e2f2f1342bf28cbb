use crate::config::Config;
use crate::occupancy::SegmentOccupancy;
use crate::window::SegmentTree;
use crate::{Bounds, Level, SegmentIndex};
use std::cmp::Ordering;

/// Per-level occupancy bounds of the implicit segment tree.
///
/// `bounds[l]` holds the minimum and maximum number of entries *per segment*
/// allowed in a window of level `l`. The leaf bounds come straight from the
/// configuration; the other levels interpolate linearly toward the root
/// bounds, and the result is truncated to an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Thresholds {
    bounds: Vec<Bounds>,
}

impl Thresholds {
    pub(crate) fn new(config: &Config, height: Level) -> Thresholds {
        let bounds = (0..=height)
            .map(|level| min_occupancy(config, height, level)..max_occupancy(config, height, level))
            .collect();

        Thresholds { bounds }
    }

    pub(crate) fn height(&self) -> Level {
        self.bounds.len() - 1
    }

    pub(crate) fn bounds(&self, level: Level) -> &Bounds {
        &self.bounds[level]
    }

    /// Compares the occupancy of a window at `level` with its bounds:
    /// `Greater` when it is too dense, `Less` when it is too sparse.
    pub(crate) fn check(&self, level: Level, occupancy: usize) -> Ordering {
        let bounds = &self.bounds[level];
        let segments = 1 << level;

        if occupancy >= bounds.end * segments {
            Ordering::Greater
        } else if occupancy <= bounds.start * segments {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }

    /// Walks the windows containing `segment` from the leaf up to the root, and
    /// returns the highest level whose window is out of its bounds in
    /// `direction`.
    pub(crate) fn surpassed(
        &self,
        occupancy: &SegmentOccupancy,
        segment: SegmentIndex,
        direction: Ordering,
    ) -> Option<Level> {
        (0..=self.height())
            .filter(|&level| self.check(level, occupancy.window(segment.window(level))) == direction)
            .last()
    }
}

fn max_occupancy(config: &Config, height: Level, level: Level) -> usize {
    if height == 0 {
        return config.max_occ_leaf;
    }
    let step = (config.max_occ_leaf - config.max_occ_root) as f32 / height as f32;
    (config.max_occ_leaf as f32 - level as f32 * step) as usize
}

fn min_occupancy(config: &Config, height: Level, level: Level) -> usize {
    if height == 0 {
        return config.min_occ_leaf;
    }
    let step = (config.min_occ_root - config.min_occ_leaf) as f32 / height as f32;
    (config.min_occ_leaf as f32 + level as f32 * step) as usize
}
