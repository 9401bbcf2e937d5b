#![warn(missing_docs)]
//! The AVL engine shared by [`OrderedMap`] and [`OrderedSet`].
//!
//! Every routine here takes exclusive ownership of a subtree and hands back
//! ownership of its replacement.  Rebalancing happens bottom-up: each
//! mutating recursion calls `rebalance` on its node after reattaching the
//! child it descended into, and that call is the only thing restoring the
//! height invariant.
use std::borrow::Borrow;
use std::cmp::Ordering::*;
use std::mem::replace;

use crate::error::InvariantError;

mod avl_map;
mod avl_set;
mod dot;
mod iter;

pub use avl_map::OrderedMap;
pub use avl_set::{OrderedSet, SetIntoIter, SetIter};
pub use dot::Dot;
pub use iter::{IntoIter, Iter, PostOrder, PreOrder};

type OptNode<K, V> = Option<Box<Node<K, V>>>;

#[derive(Clone)]
struct Node<K, V> {
    key: K,
    val: V,
    ht: u8,
    len: usize,
    left: OptNode<K, V>,
    right: OptNode<K, V>,
}

impl<K, V> Node<K, V> {
    fn new(key: K, val: V, left: OptNode<K, V>, right: OptNode<K, V>) -> Box<Self> {
        let mut n = Box::new(Node {
            key,
            val,
            ht: 1,
            len: 1,
            left,
            right,
        });
        n.update();
        n
    }

    fn leaf(key: K, val: V) -> Box<Self> {
        Self::new(key, val, None, None)
    }

    // Returns the "balance factor" of the node: left height minus right.
    fn bal(&self) -> i16 {
        i16::from(height(&self.left)) - i16::from(height(&self.right))
    }

    // Recomputes the cached height and size from the children.
    fn update(&mut self) {
        self.ht = 1 + height(&self.left).max(height(&self.right));
        self.len = 1 + len(&self.left) + len(&self.right);
    }

    fn for_each<F: FnMut((&K, &V))>(&self, g: &mut F) {
        if let Some(lf) = self.left.as_ref() {
            lf.for_each(g);
        }

        g((&self.key, &self.val));

        if let Some(rt) = self.right.as_ref() {
            rt.for_each(g);
        }
    }
}

fn height<K, V>(opt_node: &OptNode<K, V>) -> u8 {
    opt_node.as_ref().map_or(0, |n| n.ht)
}

fn len<K, V>(opt_node: &OptNode<K, V>) -> usize {
    opt_node.as_ref().map_or(0, |n| n.len)
}

// Verifies the subtree and returns its node count along with the greatest key
// seen so far by the in-order walk.
fn chk<'a, K: Ord, V>(
    opt_node: &'a OptNode<K, V>,
    greatest: Option<&'a K>,
) -> Result<(usize, Option<&'a K>), InvariantError> {
    let Some(n) = opt_node.as_ref() else {
        return Ok((0, greatest));
    };

    let (lf_len, greatest) = chk(&n.left, greatest)?;
    if greatest.is_some_and(|k| *k >= n.key) {
        return Err(InvariantError::Unordered);
    }

    let (rt_len, greatest) = chk(&n.right, Some(&n.key))?;

    let actual = 1 + height(&n.left).max(height(&n.right));
    if n.ht != actual {
        return Err(InvariantError::StaleHeight {
            cached: n.ht,
            actual,
        });
    }

    let factor = n.bal();
    if !(-1..=1).contains(&factor) {
        return Err(InvariantError::Unbalanced { factor });
    }

    let actual = lf_len + 1 + rt_len;
    if n.len != actual {
        return Err(InvariantError::StaleLen {
            cached: n.len,
            actual,
        });
    }

    Ok((actual, greatest))
}

fn rot_rt<K, V>(mut a: Box<Node<K, V>>) -> Box<Node<K, V>> {
    // We want the following transformation:
    //    a(b(x, y), z)   =>   b(x, a(y, z))
    // x and z retain the same parents.
    let Some(mut b) = a.left.take() else {
        return a;
    };

    a.left = b.right.take();
    a.update();

    b.right = Some(a);
    b.update();
    b
}

fn rot_lf<K, V>(mut a: Box<Node<K, V>>) -> Box<Node<K, V>> {
    // We want the following transformation:
    //    a(x, b(y, z))   =>   b(a(x, y), z)
    let Some(mut b) = a.right.take() else {
        return a;
    };

    a.right = b.left.take();
    a.update();

    b.left = Some(a);
    b.update();
    b
}

// Restores the balance of a node whose children are valid AVL trees with
// heights differing by at most two.
fn rebalance<K, V>(mut n: Box<Node<K, V>>) -> Box<Node<K, V>> {
    n.update();

    match n.bal() {
        -2 => {
            // right-heavy; a left-heavy right child needs a double rotation
            if n.right.as_ref().is_some_and(|rt| rt.bal() > 0) {
                n.right = n.right.take().map(rot_rt);
            }
            rot_lf(n)
        }

        2 => {
            if n.left.as_ref().is_some_and(|lf| lf.bal() < 0) {
                n.left = n.left.take().map(rot_lf);
            }
            rot_rt(n)
        }

        _ => n,
    }
}

// Inserts (k, v) and returns the value it replaced, if any.  An equal key
// keeps its node and key; only the value is overwritten.
fn ins<K: Ord, V>(root: &mut OptNode<K, V>, k: K, v: V) -> Option<V> {
    let Some(mut n) = root.take() else {
        *root = Some(Node::leaf(k, v));
        return None; // *** EARLY RETURN ***
    };

    let old_v = match k.cmp(&n.key) {
        Equal => Some(replace(&mut n.val, v)),
        Less => ins(&mut n.left, k, v),
        Greater => ins(&mut n.right, k, v),
    };

    *root = Some(if old_v.is_none() { rebalance(n) } else { n });
    old_v
}

// Removes the leftmost node, returning the remaining subtree and the removed
// entry.
fn rm_leftmost<K, V>(mut n: Box<Node<K, V>>) -> (OptNode<K, V>, (K, V)) {
    match n.left.take() {
        None => {
            let Node { key, val, right, .. } = *n;
            (right, (key, val))
        }

        Some(lf) => {
            let (lf, kv) = rm_leftmost(lf);
            n.left = lf;
            (Some(rebalance(n)), kv)
        }
    }
}

fn rm_rightmost<K, V>(mut n: Box<Node<K, V>>) -> (OptNode<K, V>, (K, V)) {
    match n.right.take() {
        None => {
            let Node { key, val, left, .. } = *n;
            (left, (key, val))
        }

        Some(rt) => {
            let (rt, kv) = rm_rightmost(rt);
            n.right = rt;
            (Some(rebalance(n)), kv)
        }
    }
}

// Removes k from the tree at root and returns the removed entry.
fn rm<K, V, Q>(root: &mut OptNode<K, V>, k: &Q) -> Option<(K, V)>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    let mut n = root.take()?;

    let old_kv = match k.cmp(n.key.borrow()) {
        Less => rm(&mut n.left, k),
        Greater => rm(&mut n.right, k),
        Equal => match n.right.take() {
            None => {
                // the left child (if any) is already balanced and replaces us
                let Node { key, val, left, .. } = *n;
                *root = left;
                return Some((key, val)); // *** EARLY RETURN ***
            }

            Some(rt) => {
                // promote the in-order successor into this node
                let (rt, (succ_key, succ_val)) = rm_leftmost(rt);
                n.right = rt;
                let old_key = replace(&mut n.key, succ_key);
                let old_val = replace(&mut n.val, succ_val);
                Some((old_key, old_val))
            }
        },
    };

    *root = Some(if old_kv.is_some() { rebalance(n) } else { n });
    old_kv
}

// Creates a merge of disjoint trees and a key k that divides them.
// Prereq: left.last_key() < k < right.first_key()
fn join<K, V>(
    opt_left: OptNode<K, V>,
    k: K,
    v: V,
    opt_right: OptNode<K, V>,
) -> Box<Node<K, V>> {
    let rt_ht = height(&opt_right);
    match opt_left {
        // descend the right spine of the taller left tree
        Some(mut t) if t.ht > rt_ht + 1 => {
            t.right = Some(join(t.right.take(), k, v, opt_right));
            rebalance(t)
        }

        opt_left => match opt_right {
            Some(mut t) if t.ht > height(&opt_left) + 1 => {
                t.left = Some(join(opt_left, k, v, t.left.take()));
                rebalance(t)
            }

            opt_right => Node::new(k, v, opt_left, opt_right),
        },
    }
}

// Partitions the tree into the keys <= pivot and the keys > pivot.
fn split<K, V, Q>(opt_root: OptNode<K, V>, pivot: &Q) -> (OptNode<K, V>, OptNode<K, V>)
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let Some(n) = opt_root else {
        return (None, None);
    };

    let Node {
        key,
        val,
        left,
        right,
        ..
    } = *n;

    if pivot.cmp(key.borrow()).is_ge() {
        let (lt, gt) = split(right, pivot);
        (Some(join(left, key, val, lt)), gt)
    } else {
        let (lt, gt) = split(left, pivot);
        (lt, Some(join(gt, key, val, right)))
    }
}

// Builds a minimal-height tree from the next n entries of a sorted iterator.
// The root of each range is its middle entry, rounding down.
fn build<K, V, I>(entries: &mut I, n: usize) -> OptNode<K, V>
where
    I: Iterator<Item = (K, V)>,
{
    if n == 0 {
        return None;
    }

    let mid = (n - 1) / 2;
    let left = build(entries, mid);
    let (key, val) = entries.next()?;
    let right = build(entries, n - mid - 1);
    Some(Node::new(key, val, left, right))
}

// Merges two trees of arbitrary relative order into one balanced tree.  On
// equal keys the entry from rhs wins.
fn merge<K: Ord, V>(lhs: OptNode<K, V>, rhs: OptNode<K, V>) -> OptNode<K, V> {
    let mut entries = Vec::with_capacity(len(&lhs) + len(&rhs));
    let mut lhs = IntoIter::new(lhs).peekable();
    let mut rhs = IntoIter::new(rhs).peekable();

    loop {
        let ord = match (lhs.peek(), rhs.peek()) {
            (Some((k1, _)), Some((k2, _))) => k1.cmp(k2),
            _ => break,
        };

        match ord {
            Less => entries.extend(lhs.next()),
            Greater => entries.extend(rhs.next()),
            Equal => {
                lhs.next();
                entries.extend(rhs.next());
            }
        }
    }

    entries.extend(lhs);
    entries.extend(rhs);

    let n = entries.len();
    tracing::trace!(entries = n, "rebuilding merged tree");
    build(&mut entries.into_iter(), n)
}
