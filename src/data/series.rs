//! Series: a discrete step function over an ordered key domain.
//!
//! A `Series` stores a sparse set of breakpoints `(x, y)`. Each breakpoint
//! is a transition: if `(x₀, y₀)` and `(x₁, y₁)` are consecutive stored
//! points then `f(x) = y₀` for `x₀ ≤ x < x₁`. Before the first breakpoint
//! the function is zero.
//!
//! Keys are ordered lazily. Inserts only touch a hash map and an unordered
//! buffer; the buffer is merged with one sort the first time an operation
//! needs ordered keys. That merge happens behind `&self`, so ordered reads
//! do not need exclusive access, and a `Series` is `Send` but not `Sync`.

use crate::data::order::LazyOrder;
use crate::debug_invariants::DebugInvariants;
use crate::series_error::SeriesError;
use num_traits::Zero;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cell::{Ref, RefCell};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::{self, Debug};
use std::hash::Hash;

/// Step function `f(x) = y` defined by its stored breakpoints.
///
/// `Series` with no type parameters is the `i64 → i64` series.
///
/// # Invariants
///
/// - The stored keys are exactly the keys of the ordered index, each
///   tracked once, either merged (`sorted`) or waiting (`pending`).
/// - The merged keys are strictly ascending.
///
/// These invariants are checked after mutations in debug builds and when the
/// `check-invariants` feature is enabled. They can also be verified manually via
/// [`validate_invariants`](DebugInvariants::validate_invariants).
pub struct Series<X = i64, Y = i64> {
    /// Authoritative breakpoint storage.
    points: HashMap<X, Y>,
    /// Lazily merged ordering of the keys of `points`.
    order: RefCell<LazyOrder<X>>,
}

impl<X, Y> Series<X, Y>
where
    X: Copy + Ord + Hash + Debug,
    Y: Copy + PartialEq + Zero,
{
    /// Create an empty series; `f(x) = 0` everywhere.
    pub fn new() -> Self {
        Self {
            points: HashMap::new(),
            order: RefCell::new(LazyOrder::default()),
        }
    }

    /// Create a series prefilled with `data`.
    ///
    /// Every key starts unmerged; the first ordered read pays for one sort.
    /// If `data` repeats a key, the last value wins.
    ///
    /// # Example
    /// ```rust
    /// use step_series::data::series::Series;
    /// let s: Series = Series::from_points([(32, -7), (-5, 20)]);
    /// assert_eq!(s.get(-6), 0);
    /// assert_eq!(s.get(0), 20);
    /// assert_eq!(s.get(33), -7);
    /// ```
    pub fn from_points(data: impl IntoIterator<Item = (X, Y)>) -> Self {
        let data = data.into_iter();
        let mut points = HashMap::with_capacity(data.size_hint().0);
        let mut pending = Vec::with_capacity(data.size_hint().0);
        for (x, y) in data {
            if points.insert(x, y).is_none() {
                pending.push(x);
            }
        }
        Self {
            points,
            order: RefCell::new(LazyOrder::from_pending(pending)),
        }
    }

    /// Build a fully merged series from points with strictly ascending keys.
    pub(crate) fn from_sorted_points(data: Vec<(X, Y)>) -> Self {
        let sorted: Vec<X> = data.iter().map(|&(x, _)| x).collect();
        let s = Self {
            points: data.into_iter().collect(),
            order: RefCell::new(LazyOrder::from_sorted(sorted)),
        };
        s.debug_assert_invariants();
        s
    }

    /// Borrow the ordered index, merging pending keys first.
    fn ordered(&self) -> Ref<'_, LazyOrder<X>> {
        self.order.borrow_mut().flush();
        self.order.borrow()
    }

    /// Number of stored breakpoints.
    ///
    /// # Complexity
    /// **O(1)**.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no breakpoint is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns true iff `x` is a stored breakpoint.
    ///
    /// # Complexity
    /// **O(1)**, never merges.
    #[inline]
    pub fn contains(&self, x: X) -> bool {
        self.points.contains_key(&x)
    }

    /// The value stored exactly at `x`, without interpolation.
    ///
    /// # Complexity
    /// **O(1)**, never merges.
    #[inline]
    pub fn get_exact(&self, x: X) -> Option<Y> {
        self.points.get(&x).copied()
    }

    /// Number of keys waiting to be merged into the ordered index.
    #[cfg(test)]
    pub(crate) fn pending_len(&self) -> usize {
        self.order.borrow().pending_len()
    }

    /// Store the breakpoint `(x, y)`, replacing any value already at `x`.
    ///
    /// Returns the previous value at `x`, if there was one.
    ///
    /// # Complexity
    /// Amortized **O(1)**. A new key is buffered, not ordered.
    pub fn set(&mut self, x: X, y: Y) -> Option<Y> {
        let prev = self.points.insert(x, y);
        if prev.is_none() {
            self.order.get_mut().push(x);
        }
        self.debug_assert_invariants();
        prev
    }

    /// Evaluate `f(x)`.
    ///
    /// If `x` is stored its value is returned directly. Otherwise the value
    /// of the largest stored `x₀ < x` is returned, or zero if there is none
    /// (including on an empty series).
    ///
    /// # Complexity
    /// **O(1)** for a stored key; otherwise a merge (if keys are pending)
    /// plus **O(log n)**.
    pub fn get(&self, x: X) -> Y {
        if let Some(&y) = self.points.get(&x) {
            return y;
        }
        let order = self.ordered();
        match order.find(x) {
            Some(i) => self.points[&order.sorted()[i]],
            None => Y::zero(),
        }
    }

    /// Remove the breakpoint at `x`, returning its value.
    ///
    /// Removing a key that is not stored is a no-op returning `None`.
    ///
    /// # Complexity
    /// A merge (if keys are pending) plus **O(n)** to splice the ordered index.
    pub fn remove(&mut self, x: X) -> Option<Y> {
        if !self.points.contains_key(&x) {
            return None;
        }
        let order = self.order.get_mut();
        order.flush();
        let spliced = order.remove_sorted(x);
        debug_assert!(spliced, "stored key {x:?} missing from ordered index");
        let removed = self.points.remove(&x);
        self.debug_assert_invariants();
        removed
    }

    /// Remove redundant breakpoints, returning how many were removed.
    ///
    /// A breakpoint is redundant when its value equals the value of the
    /// breakpoint just before it, since dropping it leaves `f` unchanged.
    /// The first breakpoint is always kept, even when its value is zero.
    ///
    /// # Example
    /// ```rust
    /// use step_series::data::series::Series;
    /// let mut s: Series = Series::from_points([(0, 0), (2, 10), (4, 10), (5, 9)]);
    /// assert_eq!(s.compact(), 1);
    /// assert_eq!(s.xs(), vec![0, 2, 5]);
    /// ```
    ///
    /// # Complexity
    /// A merge (if keys are pending) plus **O(n)**.
    pub fn compact(&mut self) -> usize {
        if self.points.len() < 2 {
            return 0;
        }
        let order = self.order.get_mut();
        order.flush();
        let points = &mut self.points;
        let before = points.len();
        let mut last: Option<Y> = None;
        order.retain_sorted(|x| {
            let y = points[x];
            if last == Some(y) {
                points.remove(x);
                false
            } else {
                last = Some(y);
                true
            }
        });
        let removed = before - self.points.len();
        if removed > 0 {
            log::debug!(
                "compacted series: removed {removed} redundant breakpoints, kept {}",
                self.points.len()
            );
        }
        self.debug_assert_invariants();
        removed
    }

    /// Ascending snapshot of all stored keys.
    ///
    /// Use with [`get`](Self::get) to walk `(x, f(x))` in order, or use
    /// [`points`](Self::points) directly.
    pub fn xs(&self) -> Vec<X> {
        self.ordered().sorted().to_vec()
    }

    /// Ascending snapshot of all stored breakpoints.
    pub fn points(&self) -> Vec<(X, Y)> {
        self.ordered()
            .sorted()
            .iter()
            .map(|&x| (x, self.points[&x]))
            .collect()
    }

    /// Smallest stored key, or `None` on an empty series.
    pub fn first(&self) -> Option<X> {
        self.ordered().sorted().first().copied()
    }

    /// Largest stored key `x₀ ≤ x`, or `None` if there is none.
    pub fn floor(&self, x: X) -> Option<X> {
        if self.points.is_empty() {
            return None;
        }
        let order = self.ordered();
        order.find(x).map(|i| order.sorted()[i])
    }

    /// Smallest stored key `x₁ ≥ x`, or `None` if there is none.
    ///
    /// A stored `x` answers itself without merging.
    pub fn ceiling(&self, x: X) -> Option<X> {
        if self.points.is_empty() {
            return None;
        }
        if self.points.contains_key(&x) {
            return Some(x);
        }
        let order = self.ordered();
        // x is not stored, so the floor's successor is strictly greater
        let next = order.find(x).map_or(0, |i| i + 1);
        order.sorted().get(next).copied()
    }

    /// Independent deep copy.
    ///
    /// The source is merged first so neither side has to sort again; the
    /// copy starts with nothing pending.
    pub fn copy(&self) -> Self {
        let order = self.ordered();
        Self {
            points: self.points.clone(),
            order: RefCell::new(LazyOrder::from_sorted(order.sorted().to_vec())),
        }
    }

    /// Returns true iff both series store exactly the same breakpoints.
    ///
    /// Redundant breakpoints are *not* ignored: two series describing the
    /// same function compare unequal unless both are compacted first.
    pub fn equals(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

impl<X, Y> Series<X, Y>
where
    X: Copy + Ord + Hash + Debug + Zero,
    Y: Copy + PartialEq + Zero,
{
    /// Smallest stored key, or zero on an empty series.
    pub fn x0(&self) -> X {
        self.first().unwrap_or_else(X::zero)
    }
}

impl<X, Y> DebugInvariants for Series<X, Y>
where
    X: Copy + Ord + Hash + Debug,
    Y: Copy + PartialEq + Zero,
{
    fn debug_assert_invariants(&self) {
        crate::series_debug_assert_ok!(self.validate_invariants(), "Series invalid");
    }

    fn validate_invariants(&self) -> Result<(), SeriesError> {
        let order = self.order.borrow();
        let mut seen = HashSet::with_capacity(self.points.len());

        // 1) every tracked key is stored, and tracked once
        for x in order.sorted() {
            if !self.points.contains_key(x) {
                return Err(SeriesError::SortedKeyNotStored(format!("{x:?}")));
            }
            if !seen.insert(*x) {
                return Err(SeriesError::DuplicateKey(format!("{x:?}")));
            }
        }
        for x in order.pending() {
            if !self.points.contains_key(x) {
                return Err(SeriesError::PendingKeyNotStored(format!("{x:?}")));
            }
            if !seen.insert(*x) {
                return Err(SeriesError::DuplicateKey(format!("{x:?}")));
            }
        }

        // 2) every stored key is tracked
        if let Some(x) = self.points.keys().find(|x| !seen.contains(*x)) {
            return Err(SeriesError::UntrackedKey(format!("{x:?}")));
        }

        // 3) sorted is strictly ascending
        if let Some(w) = order.sorted().windows(2).find(|w| w[0] >= w[1]) {
            return Err(SeriesError::SortedOutOfOrder {
                prev: format!("{:?}", w[0]),
                next: format!("{:?}", w[1]),
            });
        }

        Ok(())
    }
}

impl<X, Y> Default for Series<X, Y>
where
    X: Copy + Ord + Hash + Debug,
    Y: Copy + PartialEq + Zero,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<X, Y> Clone for Series<X, Y>
where
    X: Copy + Ord + Hash + Debug,
    Y: Copy + PartialEq + Zero,
{
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<X, Y> PartialEq for Series<X, Y>
where
    X: Copy + Ord + Hash + Debug,
    Y: Copy + PartialEq + Zero,
{
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<X, Y> Eq for Series<X, Y>
where
    X: Copy + Ord + Hash + Debug,
    Y: Copy + Eq + Zero,
{
}

impl<X, Y> Debug for Series<X, Y>
where
    X: Copy + Ord + Hash + Debug,
    Y: Copy + PartialEq + Zero + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.points()).finish()
    }
}

impl<X, Y> FromIterator<(X, Y)> for Series<X, Y>
where
    X: Copy + Ord + Hash + Debug,
    Y: Copy + PartialEq + Zero,
{
    fn from_iter<I: IntoIterator<Item = (X, Y)>>(iter: I) -> Self {
        Self::from_points(iter)
    }
}

impl<X, Y> Extend<(X, Y)> for Series<X, Y>
where
    X: Copy + Ord + Hash + Debug,
    Y: Copy + PartialEq + Zero,
{
    fn extend<I: IntoIterator<Item = (X, Y)>>(&mut self, iter: I) {
        for (x, y) in iter {
            self.set(x, y);
        }
    }
}

impl<X, Y> From<HashMap<X, Y>> for Series<X, Y>
where
    X: Copy + Ord + Hash + Debug,
    Y: Copy + PartialEq + Zero,
{
    fn from(data: HashMap<X, Y>) -> Self {
        Self::from_points(data)
    }
}

impl<X, Y> From<BTreeMap<X, Y>> for Series<X, Y>
where
    X: Copy + Ord + Hash + Debug,
    Y: Copy + PartialEq + Zero,
{
    fn from(data: BTreeMap<X, Y>) -> Self {
        Self::from_points(data)
    }
}

impl<X, Y> Serialize for Series<X, Y>
where
    X: Copy + Ord + Hash + Debug + Serialize,
    Y: Copy + PartialEq + Zero + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.points())
    }
}

impl<'de, X, Y> Deserialize<'de> for Series<X, Y>
where
    X: Copy + Ord + Hash + Debug + Deserialize<'de>,
    Y: Copy + PartialEq + Zero + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BTreeMap::<X, Y>::deserialize(deserializer).map(Self::from)
    }
}

static_assertions::assert_impl_all!(Series: Send, Clone, Default);
static_assertions::assert_not_impl_any!(Series: Sync);
