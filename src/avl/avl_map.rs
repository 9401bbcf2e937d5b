use super::{
    chk, height, ins, len, merge, rm, rm_leftmost, rm_rightmost, split, Dot,
    IntoIter, Iter, OptNode, PostOrder, PreOrder,
};
use crate::error::{InvariantError, Result, TreeError};
use std::borrow::Borrow;
use std::cmp::Ordering::*;
use std::fmt::{Debug, Formatter};

/// A map from keys to values sorted by key.
///
/// Entries live in an [AVL tree](https://en.wikipedia.org/wiki/AVL_tree):
/// the heights of the two subtrees of every node differ by at most one, so
/// lookups, inserts and removals take `O(log n)` steps.  Every node is owned
/// by exactly one map.  Cloning a map copies the whole tree, and the clone
/// can be updated without affecting the original.
///
/// Beyond the usual map operations, a map can be [`split`](#method.split)
/// around a pivot key and two maps can be [`join`](#method.join)ed into
/// one.
#[derive(Clone)]
pub struct OrderedMap<K, V> {
    len: usize,
    root: OptNode<K, V>,
}

impl<K, V> OrderedMap<K, V> {
    /// Creates a new, empty map.
    /// # Examples
    /// ```
    /// use avl_collections::OrderedMap;
    /// let m: OrderedMap<usize, usize> = OrderedMap::new();
    /// assert!(m.is_empty());
    /// ```
    pub fn new() -> Self {
        OrderedMap { len: 0, root: None }
    }

    /// Drops all entries from the map.
    pub fn clear(&mut self) {
        self.len = 0;
        self.root = None;
    }

    /// Returns the number of entries in self.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if self contains no entries, false otherwise.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the height of the tree; zero for an empty map.
    pub fn height(&self) -> usize {
        height(&self.root).into()
    }

    /// Creates an iterator over the map entries, sorted by key.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::OrderedMap;
    ///
    /// let m = OrderedMap::from([(0,1), (1,2), (2, 3)]);
    /// for (i, (k, v)) in m.iter().enumerate() {
    ///     assert_eq!(&i, k);
    ///     assert_eq!(&(i+1), v);
    /// }
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root)
    }

    /// Same as [`iter`](#method.iter).
    pub fn in_order(&self) -> Iter<'_, K, V> {
        self.iter()
    }

    /// Visits the entries in pre-order: each node before its subtrees.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::OrderedMap;
    ///
    /// let m = OrderedMap::from([(1, 'a'), (0, 'b'), (2, 'c')]);
    /// let keys: Vec<_> = m.pre_order().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [1, 0, 2]);
    /// ```
    pub fn pre_order(&self) -> PreOrder<'_, K, V> {
        PreOrder::new(&self.root)
    }

    /// Visits the entries in post-order: each node after its subtrees.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::OrderedMap;
    ///
    /// let m = OrderedMap::from([(1, 'a'), (0, 'b'), (2, 'c')]);
    /// let keys: Vec<_> = m.post_order().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [0, 2, 1]);
    /// ```
    pub fn post_order(&self) -> PostOrder<'_, K, V> {
        PostOrder::new(&self.root)
    }

    /// Produces an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|p| p.0)
    }

    /// Produces an iterator over the values of the map, ordered by their
    /// associated keys.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|p| p.1)
    }

    /// Applies f to each entry of the map in order of the keys.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::OrderedMap;
    ///
    /// let m = OrderedMap::from([(0,-10), (1,0), (2,12)]);
    /// let mut cnt_keys_gt_vals = 0;
    /// m.for_each(|(k, v)| if k > v { cnt_keys_gt_vals += 1 });
    /// assert_eq!(cnt_keys_gt_vals, 2);
    /// ```
    pub fn for_each<F: FnMut((&K, &V))>(&self, mut f: F) {
        if let Some(n) = self.root.as_ref() {
            n.for_each(&mut f);
        }
    }

    /// Returns a [`Display`](std::fmt::Display)able rendering of the tree's
    /// edges, for graph visualization tools.
    pub fn dot(&self) -> Dot<'_, K, V> {
        Dot::new(&self.root)
    }

    /// Returns the entry with the least key without removing it.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::{OrderedMap, TreeError};
    ///
    /// let m = OrderedMap::from([(2,0), (1,0)]);
    /// assert_eq!(m.get_min(), Ok((&1, &0)));
    /// assert_eq!(OrderedMap::<u8, u8>::new().get_min(), Err(TreeError::EmptyContainer));
    /// ```
    pub fn get_min(&self) -> Result<(&K, &V)> {
        let mut n = self.root.as_deref().ok_or(TreeError::EmptyContainer)?;
        while let Some(lf) = n.left.as_deref() {
            n = lf;
        }
        Ok((&n.key, &n.val))
    }

    /// Returns the entry with the greatest key without removing it.
    pub fn peek_max(&self) -> Result<(&K, &V)> {
        let mut n = self.root.as_deref().ok_or(TreeError::EmptyContainer)?;
        while let Some(rt) = n.right.as_deref() {
            n = rt;
        }
        Ok((&n.key, &n.val))
    }

    /// Removes and returns the entry with the least key.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::OrderedMap;
    ///
    /// let mut m = OrderedMap::from([(1, 'a'), (0, 'b')]);
    /// assert_eq!(m.erase_min(), Ok((0, 'b')));
    /// assert_eq!(m.len(), 1);
    /// ```
    pub fn erase_min(&mut self) -> Result<(K, V)> {
        let root = self.root.take().ok_or(TreeError::EmptyContainer)?;
        let (root, kv) = rm_leftmost(root);
        self.root = root;
        self.len -= 1;
        Ok(kv)
    }

    /// Removes and returns the entry with the greatest key.
    pub fn erase_max(&mut self) -> Result<(K, V)> {
        let root = self.root.take().ok_or(TreeError::EmptyContainer)?;
        let (root, kv) = rm_rightmost(root);
        self.root = root;
        self.len -= 1;
        Ok(kv)
    }

    /// Removes and returns the entry with the greatest key.
    ///
    /// Use [`peek_max`](#method.peek_max) to read the greatest entry and
    /// keep it in the map.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::OrderedMap;
    ///
    /// let mut m = OrderedMap::from([(1, 'a'), (2, 'b')]);
    /// assert_eq!(m.peek_max(), Ok((&2, &'b')));
    /// assert_eq!(m.get_max(), Ok((2, 'b')));
    /// assert_eq!(m.len(), 1);
    /// assert!(!m.contains(&2));
    /// ```
    pub fn get_max(&mut self) -> Result<(K, V)> {
        self.erase_max()
    }

    /// Same as [`erase_min`](#method.erase_min).
    pub fn pop_min(&mut self) -> Result<(K, V)> {
        self.erase_min()
    }

    /// Same as [`erase_max`](#method.erase_max).
    ///
    /// # Examples
    /// ```
    /// use avl_collections::{OrderedMap, TreeError};
    ///
    /// let mut m = OrderedMap::from([(1, 'a'), (3, 'c'), (2, 'b')]);
    /// assert_eq!(m.pop_max(), Ok((3, 'c')));
    /// assert_eq!(m.pop_max(), Ok((2, 'b')));
    /// assert_eq!(m.pop_max(), Ok((1, 'a')));
    /// assert_eq!(m.pop_max(), Err(TreeError::EmptyContainer));
    /// ```
    pub fn pop_max(&mut self) -> Result<(K, V)> {
        self.erase_max()
    }
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Inserts a key-value pair in the map.
    ///
    /// Returns true if the key was not already present.  Otherwise the stored
    /// value is replaced, the length is unchanged, and false is returned.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::OrderedMap;
    ///
    /// let mut m = OrderedMap::new();
    /// assert!(m.insert("x", 1));
    /// assert!(!m.insert("x", 2));
    /// assert_eq!(m.len(), 1);
    /// assert_eq!(m.get("x"), Ok(&2));
    /// ```
    pub fn insert(&mut self, key: K, val: V) -> bool {
        let is_new = ins(&mut self.root, key, val).is_none();
        self.len += is_new as usize;
        is_new
    }

    /// Removes a key from the map and returns the unmapped value.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::OrderedMap;
    ///
    /// let mut m = OrderedMap::new();
    /// m.insert(1, 2);
    /// m.insert(2, 3);
    /// assert_eq!(m.remove(&2), Some(3));
    /// assert_eq!(m.remove(&2), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (_, v) = rm(&mut self.root, key)?;
        self.len -= 1;
        Some(v)
    }

    /// Removes a key from the map, returning true if it was present.
    ///
    /// Erasing a missing key, even from an empty map, is not an error.
    pub fn erase<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove(key).is_some()
    }

    /// Returns a reference to the value associated with k.
    ///
    /// # Example
    /// ```
    /// use avl_collections::{OrderedMap, TreeError};
    ///
    /// let mut m = OrderedMap::new();
    /// m.insert(0, 100);
    ///
    /// assert_eq!(m.get(&0), Ok(&100));
    /// assert_eq!(m.get(&1), Err(TreeError::KeyNotFound));
    /// ```
    pub fn get<Q>(&self, k: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut curr = &self.root;
        while let Some(n) = curr {
            match k.cmp(n.key.borrow()) {
                Less => curr = &n.left,
                Equal => return Ok(&n.val),
                Greater => curr = &n.right,
            }
        }

        Err(TreeError::KeyNotFound)
    }

    /// Returns a mutable reference to the value associated with k.
    ///
    /// # Example
    /// ```
    /// use avl_collections::OrderedMap;
    ///
    /// let mut m = OrderedMap::new();
    /// m.insert(1, 7);
    ///
    /// *m.get_mut(&1).unwrap() = 2;
    /// assert_eq!(m.get(&1), Ok(&2));
    /// ```
    pub fn get_mut<Q>(&mut self, k: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut curr = &mut self.root;
        while let Some(n) = curr {
            match k.cmp(n.key.borrow()) {
                Less => curr = &mut n.left,
                Equal => return Ok(&mut n.val),
                Greater => curr = &mut n.right,
            }
        }

        Err(TreeError::KeyNotFound)
    }

    /// Tests if self contains an entry for the given key.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_ok()
    }

    /// Partitions the map into the entries with keys at most `pivot` and the
    /// entries with greater keys.  The pivot need not be present.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::OrderedMap;
    ///
    /// let m: OrderedMap<_, _> = (0..10).map(|i| (i, i * 2)).collect();
    /// let (lo, hi) = m.split(&4);
    /// assert_eq!(lo.len(), 5);
    /// assert_eq!(hi.len(), 5);
    /// assert_eq!(lo.get(&4), Ok(&8));
    /// assert!(!hi.contains(&4));
    /// ```
    pub fn split<Q>(mut self, pivot: &Q) -> (Self, Self)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let rhs = self.split_off(pivot);
        (self, rhs)
    }

    /// Moves all entries with keys greater than `pivot` into a new map.
    /// Entries with keys at most `pivot` stay in self.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::OrderedMap;
    ///
    /// let mut m: OrderedMap<_, _> = (0..10).map(|i| (i, i * 2)).collect();
    /// let higher = m.split_off(&5);
    /// assert_eq!(m.get(&5), Ok(&10));
    /// assert!(!m.contains(&6));
    /// assert_eq!(higher.get(&6), Ok(&12));
    /// ```
    pub fn split_off<Q>(&mut self, pivot: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (lhs, rhs) = split(self.root.take(), pivot);
        self.len = len(&lhs);
        self.root = lhs;

        let rhs = OrderedMap {
            len: len(&rhs),
            root: rhs,
        };

        tracing::trace!(lhs = self.len, rhs = rhs.len, "split map");
        rhs
    }

    /// Moves every entry of other into self, leaving other empty.
    ///
    /// The maps may interleave in any way.  When both hold the same key, the
    /// entry from other is kept.  The merged tree is rebuilt from scratch in
    /// linear time and has minimal height.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::OrderedMap;
    ///
    /// let mut m = OrderedMap::from([(0, 'a'), (2, 'c')]);
    /// let mut other = OrderedMap::from([(1, 'b'), (3, 'd')]);
    /// m.join(&mut other);
    /// assert!(other.is_empty());
    /// assert_eq!(m.keys().copied().collect::<Vec<_>>(), [0, 1, 2, 3]);
    /// ```
    pub fn join(&mut self, other: &mut Self) {
        let total = self.len + other.len;
        self.root = merge(self.root.take(), other.root.take());
        self.len = len(&self.root);
        other.len = 0;

        if self.len < total {
            tracing::debug!(
                collisions = total - self.len,
                "join kept one entry per colliding key"
            );
        }
    }

    /// Joins the RHS into this map around a key that divides them, in
    /// logarithmic time.
    ///
    /// # Panics
    /// If some key of self is not less than `key`, or some key of rhs is not
    /// greater than it.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::OrderedMap;
    ///
    /// let mut m = OrderedMap::from([(0, 'a'), (1, 'b')]);
    /// m.join_with(2, 'c', OrderedMap::from([(3, 'd')]));
    /// assert_eq!(m.len(), 4);
    /// assert_eq!(m.get(&2), Ok(&'c'));
    /// ```
    pub fn join_with(&mut self, key: K, val: V, mut rhs: Self) {
        assert!(self.peek_max().map_or(true, |(k2, _)| *k2 < key));
        assert!(rhs.get_min().map_or(true, |(k2, _)| key < *k2));

        self.len += 1 + rhs.len;
        self.root = Some(super::join(self.root.take(), key, val, rhs.root.take()));
    }

    /// Verifies the tree: keys strictly increase in order, every node is
    /// balanced and caches its true height and size, and the map's length
    /// matches the number of nodes.
    pub fn check(&self) -> std::result::Result<(), InvariantError> {
        let (actual, _) = chk(&self.root, None)?;
        if actual != self.len {
            return Err(InvariantError::LenMismatch {
                recorded: self.len,
                actual,
            });
        }
        Ok(())
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Debug, V: Debug> Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for OrderedMap<K, V> {}

impl<K, Q, V> std::ops::Index<&Q> for OrderedMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    type Output = V;

    fn index(&self, index: &Q) -> &Self::Output {
        match self.get(index) {
            Ok(v) => v,
            Err(_) => panic!("Key not found in OrderedMap"),
        }
    }
}

impl<K: Ord, V> Extend<(K, V)> for OrderedMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for OrderedMap<K, V> {
    fn from(vs: [(K, V); N]) -> Self {
        OrderedMap::from_iter(vs)
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut m = OrderedMap::new();
        m.extend(iter);
        m
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.root)
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for OrderedMap<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

#[cfg(feature = "serde")]
struct OrderedMapVisitor<K, V>(std::marker::PhantomData<(K, V)>);

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for OrderedMapVisitor<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    type Value = OrderedMap<K, V>;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut m = OrderedMap::new();
        while let Some((key, val)) = access.next_entry()? {
            m.insert(key, val);
        }
        Ok(m)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for OrderedMap<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor(std::marker::PhantomData))
    }
}
