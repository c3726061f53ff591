//! LazyOrder: the ordered key index behind [`Series`](crate::data::series::Series).
//!
//! New keys land in an unordered `pending` buffer in O(1). The first read
//! that needs ordering flushes the buffer into `sorted` with a single full
//! sort, so a burst of inserts costs one O(n log n) sort instead of one
//! ordered insertion per key.

use std::fmt::Debug;

/// Ordered key index with a lazily merged write buffer.
///
/// # Invariants
///
/// - `sorted` is strictly ascending.
/// - No key appears in both `sorted` and `pending`, and `pending` holds no
///   duplicates. The owning series guarantees the second part by pushing
///   only keys it did not store before.
#[derive(Clone, Debug)]
pub(crate) struct LazyOrder<X> {
    /// Merged keys, strictly ascending.
    sorted: Vec<X>,
    /// Keys not yet merged into `sorted`, in insertion order.
    pending: Vec<X>,
}

impl<X> Default for LazyOrder<X> {
    fn default() -> Self {
        Self {
            sorted: Vec::new(),
            pending: Vec::new(),
        }
    }
}

impl<X: Copy + Ord + Debug> LazyOrder<X> {
    /// Index with every key still waiting to be merged.
    pub(crate) fn from_pending(pending: Vec<X>) -> Self {
        Self {
            sorted: Vec::new(),
            pending,
        }
    }

    /// Index over keys already known to be strictly ascending.
    pub(crate) fn from_sorted(sorted: Vec<X>) -> Self {
        debug_assert!(sorted.windows(2).all(|w| w[0] < w[1]));
        Self {
            sorted,
            pending: Vec::new(),
        }
    }

    /// Buffer a key that is new to the owning series.
    #[inline]
    pub(crate) fn push(&mut self, x: X) {
        self.pending.push(x);
    }

    #[inline]
    pub(crate) fn sorted(&self) -> &[X] {
        &self.sorted
    }

    #[inline]
    pub(crate) fn pending(&self) -> &[X] {
        &self.pending
    }

    #[inline]
    pub(crate) fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Merge `pending` into `sorted`. No-op when nothing is pending.
    pub(crate) fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let merged = self.pending.len();
        self.sorted.append(&mut self.pending);
        // keys are unique, so stability buys nothing
        self.sorted.sort_unstable();
        log::trace!(
            "merged {merged} pending keys, {} keys now ordered",
            self.sorted.len()
        );
    }

    /// Largest index `i` with `sorted[i] <= x`, or `None` when `sorted` is
    /// empty or every key is greater than `x`.
    ///
    /// Only meaningful once [`flush`](Self::flush) has run.
    #[inline]
    pub(crate) fn find(&self, x: X) -> Option<usize> {
        self.sorted.partition_point(|&k| k <= x).checked_sub(1)
    }

    /// Splice `x` out of `sorted`. Returns whether it was there.
    ///
    /// The caller flushes first; a key still pending is not found.
    pub(crate) fn remove_sorted(&mut self, x: X) -> bool {
        match self.find(x) {
            Some(i) if self.sorted[i] == x => {
                self.sorted.remove(i);
                true
            }
            _ => false,
        }
    }

    /// Keep only the sorted keys for which `keep` returns true, visiting
    /// them in ascending order.
    pub(crate) fn retain_sorted(&mut self, keep: impl FnMut(&X) -> bool) {
        self.sorted.retain(keep);
    }
}

#[cfg(test)]
impl<X> LazyOrder<X> {
    /// Test helper to corrupt the sorted index directly.
    pub(crate) fn sorted_mut(&mut self) -> &mut Vec<X> {
        &mut self.sorted
    }

    /// Test helper to corrupt the pending buffer directly.
    pub(crate) fn pending_mut(&mut self) -> &mut Vec<X> {
        &mut self.pending
    }
}
