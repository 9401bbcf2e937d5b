use super::{Dot, IntoIter, Iter, OrderedMap, PostOrder, PreOrder};
use crate::error::{InvariantError, Result};
use std::borrow::Borrow;
use std::fmt::{Debug, Formatter};
use std::iter::FusedIterator;

/// A sorted set of unique values.
///
/// The implementation is mostly a thin wrapper around [`OrderedMap`] with
/// unit values, so it shares the map's balancing, split and join.  Unlike
/// the map, inserting a value that is already present leaves the set
/// untouched.
#[derive(Clone, PartialEq, Eq)]
pub struct OrderedSet<V> {
    map: OrderedMap<V, ()>,
}

impl<V> OrderedSet<V> {
    /// Returns a new, empty set.
    pub fn new() -> Self {
        Self {
            map: OrderedMap::new(),
        }
    }

    /// Removes all the entries from self.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns the number of elements in self.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if self is the empty set, false otherwise.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the height of the underlying tree.
    pub fn height(&self) -> usize {
        self.map.height()
    }

    /// Returns an iterator over self's values in sorted order.
    pub fn iter(&self) -> SetIter<Iter<'_, V, ()>> {
        SetIter(self.map.iter())
    }

    /// Same as [`iter`](#method.iter).
    pub fn in_order(&self) -> SetIter<Iter<'_, V, ()>> {
        self.iter()
    }

    /// Returns an iterator over self's values in pre-order.
    pub fn pre_order(&self) -> SetIter<PreOrder<'_, V, ()>> {
        SetIter(self.map.pre_order())
    }

    /// Returns an iterator over self's values in post-order.
    pub fn post_order(&self) -> SetIter<PostOrder<'_, V, ()>> {
        SetIter(self.map.post_order())
    }

    /// Applies f to each value in sorted order.
    pub fn for_each<F: FnMut(&V)>(&self, mut f: F) {
        self.map.for_each(|(k, _)| f(k));
    }

    /// Returns a [`Display`](std::fmt::Display)able rendering of the tree's
    /// edges.
    pub fn dot(&self) -> Dot<'_, V, ()> {
        self.map.dot()
    }

    /// Returns the least value in the set.
    pub fn get_min(&self) -> Result<&V> {
        self.map.get_min().map(|(k, _)| k)
    }

    /// Returns the greatest value in the set.
    pub fn get_max(&self) -> Result<&V> {
        self.map.peek_max().map(|(k, _)| k)
    }

    /// Removes and returns the least value.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::{OrderedSet, TreeError};
    ///
    /// let mut s = OrderedSet::from([3, 1, 2]);
    /// assert_eq!(s.erase_min(), Ok(1));
    /// assert_eq!(s.len(), 2);
    /// assert_eq!(OrderedSet::<u8>::new().erase_min(), Err(TreeError::EmptyContainer));
    /// ```
    pub fn erase_min(&mut self) -> Result<V> {
        self.map.erase_min().map(|(k, _)| k)
    }

    /// Removes and returns the greatest value.
    pub fn erase_max(&mut self) -> Result<V> {
        self.map.erase_max().map(|(k, _)| k)
    }
}

impl<V: Ord> OrderedSet<V> {
    /// Inserts the given value and returns true if self did not already have
    /// the value and returns false otherwise.
    pub fn insert(&mut self, value: V) -> bool {
        // a duplicate only overwrites the unit value, never the key
        self.map.insert(value, ())
    }

    /// Removes the given value from self returning true if the value was
    /// present and false otherwise.
    pub fn erase<Q>(&mut self, value: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.erase(value)
    }

    /// Tests if self contains the given value.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.contains(value)
    }

    /// Partitions the set into the values at most `pivot` and the values
    /// greater than it.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::OrderedSet;
    ///
    /// let s: OrderedSet<_> = (0..10).collect();
    /// let (lo, hi) = s.split(&3);
    /// assert_eq!(lo.iter().copied().collect::<Vec<_>>(), [0, 1, 2, 3]);
    /// assert_eq!(hi.len(), 6);
    /// ```
    pub fn split<Q>(self, pivot: &Q) -> (Self, Self)
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (lhs, rhs) = self.map.split(pivot);
        (Self { map: lhs }, Self { map: rhs })
    }

    /// Removes all values greater than `pivot` and returns them.
    pub fn split_off<Q>(&mut self, pivot: &Q) -> Self
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Self {
            map: self.map.split_off(pivot),
        }
    }

    /// Moves all values from other into self and leaves other empty.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::OrderedSet;
    ///
    /// let mut evens: OrderedSet<_> = (0..10).step_by(2).collect();
    /// let mut odds: OrderedSet<_> = (1..10).step_by(2).collect();
    /// evens.join(&mut odds);
    /// assert!(odds.is_empty());
    /// assert!(evens.iter().copied().eq(0..10));
    /// ```
    pub fn join(&mut self, other: &mut Self) {
        self.map.join(&mut other.map);
    }

    /// Verifies the ordering, balance and bookkeeping of the tree.
    pub fn check(&self) -> std::result::Result<(), InvariantError> {
        self.map.check()
    }
}

impl<V> Default for OrderedSet<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Debug> Debug for OrderedSet<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Projects the values out of one of the map traversals.
pub struct SetIter<I>(I);

impl<'a, V: 'a, I> Iterator for SetIter<I>
where
    I: Iterator<Item = (&'a V, &'a ())>,
{
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, V: 'a, I> ExactSizeIterator for SetIter<I> where
    I: ExactSizeIterator<Item = (&'a V, &'a ())>
{
}

impl<'a, V: 'a, I> FusedIterator for SetIter<I> where
    I: FusedIterator<Item = (&'a V, &'a ())>
{
}

/// Consuming iterator over a set's values, in sorted order.
pub struct SetIntoIter<V>(IntoIter<V, ()>);

impl<V> Iterator for SetIntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<V> ExactSizeIterator for SetIntoIter<V> {}

impl<V> FusedIterator for SetIntoIter<V> {}

impl<V> IntoIterator for OrderedSet<V> {
    type Item = V;
    type IntoIter = SetIntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        SetIntoIter(self.map.into_iter())
    }
}

impl<'a, V> IntoIterator for &'a OrderedSet<V> {
    type Item = &'a V;
    type IntoIter = SetIter<Iter<'a, V, ()>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Ord> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for x in iter {
            self.insert(x);
        }
    }
}

impl<T: Ord> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut s = OrderedSet::new();
        s.extend(iter);
        s
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for OrderedSet<T> {
    fn from(vs: [T; N]) -> Self {
        OrderedSet::from_iter(vs)
    }
}

#[cfg(feature = "serde")]
impl<V: serde::Serialize> serde::Serialize for OrderedSet<V> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, V> serde::Deserialize<'de> for OrderedSet<V>
where
    V: serde::Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let values = <Vec<V> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(values.into_iter().collect())
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn set_round_trips_through_json() {
        let s: OrderedSet<u32> = serde_json::from_str("[5,1,3,1]").unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(serde_json::to_string(&s).unwrap(), "[1,3,5]");
    }
}
