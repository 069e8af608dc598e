//! Cumulative frequencies over an arbitrary closed integer domain.
//!
//! [`IndexedRangeAccumulator`] is a Binary Indexed Tree (Fenwick tree) whose
//! domain `[min, max]` need not start at 1: it may start higher, dip below
//! zero, or sit anywhere else on the `i64` line. Point adjustments and
//! prefix/range queries all run in O(log n), where n is the domain width.
//!
//! ```
//! use rangefreq::IndexedRangeAccumulator;
//!
//! let mut scores = IndexedRangeAccumulator::from_values([-2, -1, 0, 0], -2, 0).unwrap();
//! assert_eq!(scores.query_range(-2, 0), 4);
//! assert_eq!(scores.query_range(-2, -1), 2);
//!
//! scores.adjust(0, -1);
//! assert_eq!(scores.frequency(0), 1);
//! ```
pub mod core;

pub use crate::core::error::InvalidRangeError;
#[cfg(feature = "serde")]
pub use crate::core::error::SnapshotError;

use crate::core::bits::{least_significant_bit, most_significant_bit};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::{Bound, RangeBounds};

/// An offset-capable Binary Indexed Tree of signed frequencies.
///
/// The backing array holds `max - min + 2` slots. Slot 0 is an unused sentinel
/// and slots `1..` hold Fenwick partial sums. A domain value `v` lives at slot
/// `v + offset`, where `offset = 1 - min`, so `min` always maps to slot 1.
///
/// Adjustments outside `[min, max]` are silently ignored. Queries below `min`
/// yield 0, and queries above `max` are clamped to `max`.
///
/// The structure is single-owner. Callers sharing one across threads must
/// guard every call with the same lock, since an adjustment touches several
/// slots non-atomically.
///
/// # Examples
///
/// ```
/// use rangefreq::IndexedRangeAccumulator;
///
/// let ages = IndexedRangeAccumulator::from_values([25, 27, 27, 24], 24, 27).unwrap();
///
/// assert_eq!(ages.query_range(24, 26), 2);
/// assert_eq!(ages.query_range(25, 27), 3);
/// assert_eq!(ages.sum(..), 4);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Snapshot", into = "Snapshot"))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexedRangeAccumulator {
    inner: Vec<i64>,
    offset: i128,
    min: i64,
    max: i64,
}

impl IndexedRangeAccumulator {
    /// Makes an accumulator over the closed domain `[min, max]` with every
    /// frequency at zero.
    ///
    /// # Errors
    ///
    /// Fails with [`InvalidRangeError`] when `min > max`, or when the domain is
    /// too wide for its backing array to be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangefreq::IndexedRangeAccumulator;
    ///
    /// let accumulator = IndexedRangeAccumulator::new(-10, 10).unwrap();
    /// assert_eq!(accumulator.span(), 21);
    /// assert_eq!(accumulator.offset(), 11);
    ///
    /// assert!(IndexedRangeAccumulator::new(3, 2).is_err());
    /// ```
    pub fn new(min: i64, max: i64) -> Result<Self, InvalidRangeError> {
        if min > max {
            return Err(InvalidRangeError { min, max });
        }

        let length = usize::try_from(max as i128 - min as i128 + 2)
            .map_err(|_| InvalidRangeError { min, max })?;

        let mut inner = Vec::new();
        inner
            .try_reserve_exact(length)
            .map_err(|_| InvalidRangeError { min, max })?;
        inner.resize(length, 0);

        let offset = 1 - min as i128;

        #[cfg(feature = "tracing")]
        tracing::debug!(min, max, %offset, length = length as u64, "accumulator allocated");

        Ok(Self {
            inner,
            offset,
            min,
            max,
        })
    }

    /// Makes an accumulator over `[1, max]`, the classic origin-anchored tree.
    ///
    /// # Errors
    ///
    /// Fails with [`InvalidRangeError`] when `max < 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangefreq::IndexedRangeAccumulator;
    ///
    /// let accumulator = IndexedRangeAccumulator::up_to(1000).unwrap();
    /// assert_eq!(accumulator.min(), 1);
    /// assert_eq!(accumulator.offset(), 0);
    /// ```
    pub fn up_to(max: i64) -> Result<Self, InvalidRangeError> {
        Self::new(1, max)
    }

    /// Makes an accumulator over `[min, max]` and counts one occurrence of every
    /// value in `values`. Duplicates accumulate, and values outside the domain
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Fails with [`InvalidRangeError`] under the same conditions as [`new`].
    ///
    /// [`new`]: IndexedRangeAccumulator::new
    ///
    /// # Examples
    ///
    /// ```
    /// use rangefreq::IndexedRangeAccumulator;
    ///
    /// let accumulator = IndexedRangeAccumulator::from_values([5, 5, 7], 0, 10).unwrap();
    /// assert_eq!(accumulator.query_range(4, 6), 2);
    /// assert_eq!(accumulator.total(), 3);
    /// ```
    pub fn from_values(
        values: impl IntoIterator<Item = i64>,
        min: i64,
        max: i64,
    ) -> Result<Self, InvalidRangeError> {
        let mut accumulator = Self::new(min, max)?;
        accumulator.extend(values);

        Ok(accumulator)
    }

    /// Smallest value of the domain.
    pub fn min(&self) -> i64 {
        self.min
    }

    /// Largest value of the domain.
    pub fn max(&self) -> i64 {
        self.max
    }

    /// The constant mapping a domain value onto its 1-based slot. Always `1 - min`.
    pub fn offset(&self) -> i128 {
        self.offset
    }

    /// Number of values in the domain, `max - min + 1`.
    pub fn span(&self) -> usize {
        self.inner.len() - 1
    }

    fn internal_index(&self, value: i64) -> i128 {
        value as i128 + self.offset
    }

    fn last_index(&self) -> usize {
        self.inner.len() - 1
    }

    /// Adds `by` to the frequency registered at `v`. `by` may be negative.
    ///
    /// Values outside `[min, max]` are a silent no-op: nothing is written and
    /// no error is raised.
    ///
    /// Slots hold sums modulo 2^64, so intermediate partial sums may wrap while
    /// every answer that fits in an `i64` stays exact.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangefreq::IndexedRangeAccumulator;
    ///
    /// let mut accumulator = IndexedRangeAccumulator::new(0, 10).unwrap();
    /// accumulator.adjust(3, 4);
    /// accumulator.adjust(3, -1);
    /// accumulator.adjust(11, 100);
    ///
    /// assert_eq!(accumulator.query(10), 3);
    /// ```
    pub fn adjust(&mut self, v: i64, by: i64) {
        let idx = self.internal_index(v);
        if idx <= 0 || idx >= self.inner.len() as i128 {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                value = v,
                by,
                min = self.min,
                max = self.max,
                "ignoring adjustment outside domain"
            );
            return;
        }

        let mut current_idx = idx as usize;
        while current_idx < self.inner.len() {
            self.inner[current_idx] = self.inner[current_idx].wrapping_add(by);
            current_idx += least_significant_bit(current_idx);
        }
    }

    fn prefix_sum(&self, idx: i128) -> i64 {
        if idx <= 0 {
            return 0;
        }

        let mut sum: i64 = 0;
        let mut current_idx = idx.min(self.last_index() as i128) as usize;
        while current_idx > 0 {
            sum = sum.wrapping_add(self.inner[current_idx]);
            current_idx -= least_significant_bit(current_idx);
        }

        sum
    }

    /// Cumulative frequency of every value in `[min, a]`.
    ///
    /// Returns 0 when `a < min`. A query above `max` is clamped to `max`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangefreq::IndexedRangeAccumulator;
    ///
    /// let accumulator = IndexedRangeAccumulator::from_values([2, 4, 4], 1, 5).unwrap();
    /// assert_eq!(accumulator.query(0), 0);
    /// assert_eq!(accumulator.query(3), 1);
    /// assert_eq!(accumulator.query(4), 3);
    /// assert_eq!(accumulator.query(99), 3);
    /// ```
    pub fn query(&self, a: i64) -> i64 {
        self.prefix_sum(self.internal_index(a))
    }

    /// Cumulative frequency of every value in the closed interval `[a, b]`,
    /// computed as `query(b) - query(a - 1)`.
    ///
    /// `a > b` is not special-cased: the difference is returned as is and may
    /// be negative. Use [`sum`] for range syntax where empty ranges yield 0.
    ///
    /// [`sum`]: IndexedRangeAccumulator::sum
    pub fn query_range(&self, a: i64, b: i64) -> i64 {
        self.prefix_sum(self.internal_index(b))
            .wrapping_sub(self.prefix_sum(self.internal_index(a) - 1))
    }

    /// Cumulative frequency over any range of domain values.
    ///
    /// Unbounded ends extend to the edge of the domain, and an empty range
    /// yields 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangefreq::IndexedRangeAccumulator;
    ///
    /// let accumulator = IndexedRangeAccumulator::from_values([-3, 0, 0, 2], -5, 5).unwrap();
    /// assert_eq!(accumulator.sum(..), 4);
    /// assert_eq!(accumulator.sum(..0), 1);
    /// assert_eq!(accumulator.sum(0..=2), 3);
    /// assert_eq!(accumulator.sum(1..), 1);
    /// assert_eq!(accumulator.sum(2..2), 0);
    /// ```
    pub fn sum(&self, range: impl RangeBounds<i64>) -> i64 {
        let start = match range.start_bound() {
            Bound::Included(&a) => self.internal_index(a),
            Bound::Excluded(&a) => self.internal_index(a) + 1,
            Bound::Unbounded => 1,
        };
        let end = match range.end_bound() {
            Bound::Included(&b) => self.internal_index(b),
            Bound::Excluded(&b) => self.internal_index(b) - 1,
            Bound::Unbounded => self.last_index() as i128,
        };

        if start > end {
            return 0;
        }

        self.prefix_sum(end).wrapping_sub(self.prefix_sum(start - 1))
    }

    /// Net frequency registered at exactly `v`.
    pub fn frequency(&self, v: i64) -> i64 {
        self.query_range(v, v)
    }

    /// Sum of every adjustment applied inside the domain.
    pub fn total(&self) -> i64 {
        self.prefix_sum(self.last_index() as i128)
    }

    /// Returns the smallest domain value whose cumulative frequency reaches
    /// `target`, or `None` if `total() < target`.
    ///
    /// The answer is only meaningful while every per-value frequency is
    /// non-negative, i.e. while the prefix sums are monotone.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangefreq::IndexedRangeAccumulator;
    ///
    /// let accumulator = IndexedRangeAccumulator::from_values([-4, 1, 1, 3], -5, 5).unwrap();
    /// assert_eq!(accumulator.lower_bound(1), Some(-4));
    /// assert_eq!(accumulator.lower_bound(2), Some(1));
    /// assert_eq!(accumulator.lower_bound(3), Some(1));
    /// assert_eq!(accumulator.lower_bound(4), Some(3));
    /// assert_eq!(accumulator.lower_bound(5), None);
    /// ```
    pub fn lower_bound(&self, target: i64) -> Option<i64> {
        let length = self.last_index();
        let mut remaining = target;
        let mut idx = 0;
        let mut step = most_significant_bit(length);
        while step > 0 {
            let next = idx + step;
            if next <= length && self.inner[next] < remaining {
                idx = next;
                remaining = remaining.wrapping_sub(self.inner[next]);
            }
            step >>= 1;
        }

        // idx is the last slot whose prefix falls short of target.
        if idx < length {
            Some(self.min + idx as i64)
        } else {
            None
        }
    }

    /// Resets every frequency to zero, keeping the domain.
    pub fn clear(&mut self) {
        self.inner.iter_mut().for_each(|slot| *slot = 0);
    }
}

impl Extend<i64> for IndexedRangeAccumulator {
    /// Counts one occurrence of every yielded value.
    fn extend<T: IntoIterator<Item = i64>>(&mut self, iter: T) {
        iter.into_iter().for_each(|value| self.adjust(value, 1));
    }
}

impl<'a> Extend<&'a i64> for IndexedRangeAccumulator {
    fn extend<T: IntoIterator<Item = &'a i64>>(&mut self, iter: T) {
        self.extend(iter.into_iter().copied());
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct Snapshot {
    min: i64,
    max: i64,
    tree: Vec<i64>,
}

#[cfg(feature = "serde")]
impl From<IndexedRangeAccumulator> for Snapshot {
    fn from(accumulator: IndexedRangeAccumulator) -> Self {
        Snapshot {
            min: accumulator.min,
            max: accumulator.max,
            tree: accumulator.inner,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<Snapshot> for IndexedRangeAccumulator {
    type Error = SnapshotError;

    fn try_from(snapshot: Snapshot) -> Result<Self, Self::Error> {
        let mut accumulator = Self::new(snapshot.min, snapshot.max)?;
        if snapshot.tree.len() != accumulator.inner.len() {
            return Err(SnapshotError::Length {
                expected: accumulator.inner.len(),
                actual: snapshot.tree.len(),
            });
        }
        if snapshot.tree[0] != 0 {
            return Err(SnapshotError::Sentinel(snapshot.tree[0]));
        }

        accumulator.inner = snapshot.tree;

        Ok(accumulator)
    }
}
