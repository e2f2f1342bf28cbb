#![warn(clippy::all)]
//! An adaptive packed-memory array.
//!
//! The [`APMA`] keeps its entries sorted in a single vector that deliberately
//! contains gaps, so that an insertion only has to shift a handful of slots.
//! Gaps are kept evenly spread by density thresholds evaluated over an
//! implicit binary tree of segments.
//!
//! # Example
//! ```
//! use apma::APMA;
//!
//! let mut apma = APMA::new();
//!
//! for key in [5i32, 3, 8, 1] {
//!     apma.insert(key, key * 10).unwrap();
//! }
//!
//! assert_eq!(apma.keys().copied().collect::<Vec<_>>(), vec![1, 3, 5, 8]);
//! assert_eq!(apma.find(&3), Some(&30));
//! ```
use std::ops::Range;

/// An element count bound, representing the minimum and the maximum number of
/// elements a single segment may hold at a particular level of the tree.
type Bounds = Range<usize>;

/// An index of a segment in the APMA
type SegmentIndex = usize;

/// A range of segment indexes
type Window = Range<SegmentIndex>;

/// A level of the implicit segment tree; level 0 is a single segment.
type Level = usize;

#[macro_use]
mod tracing_helpers;

pub mod apma;
pub mod config;
mod density;
mod entry;
pub mod error;
pub mod invariants;
pub mod iter;
pub mod key;
mod occupancy;
mod rebalance;
mod resize;
mod search;
mod window;

pub use crate::apma::APMA;
pub use crate::config::Config;
pub use crate::error::Error;
pub use crate::invariants::Violation;
pub use crate::key::Key;
