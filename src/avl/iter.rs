use super::{Node, OptNode};
use std::iter::FusedIterator;

/// In-order iterator over the entries of a tree, sorted by key.
pub struct Iter<'a, K, V> {
    work: Vec<&'a Node<K, V>>,
    len: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(super) fn new(root: &'a OptNode<K, V>) -> Self {
        let mut iter = Iter {
            work: Vec::new(),
            len: super::len(root),
        };
        iter.push_left_spine(root.as_deref());
        iter
    }

    fn push_left_spine(&mut self, mut curr: Option<&'a Node<K, V>>) {
        while let Some(n) = curr {
            self.work.push(n);
            curr = n.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.work.pop()?;
        self.len -= 1;
        self.push_left_spine(n.right.as_deref());
        Some((&n.key, &n.val))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            work: self.work.clone(),
            len: self.len,
        }
    }
}

/// Pre-order iterator: each node before its left subtree, then its right.
pub struct PreOrder<'a, K, V> {
    work: Vec<&'a Node<K, V>>,
    len: usize,
}

impl<'a, K, V> PreOrder<'a, K, V> {
    pub(super) fn new(root: &'a OptNode<K, V>) -> Self {
        PreOrder {
            work: root.as_deref().into_iter().collect(),
            len: super::len(root),
        }
    }
}

impl<'a, K, V> Iterator for PreOrder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.work.pop()?;
        self.len -= 1;
        self.work.extend(n.right.as_deref());
        self.work.extend(n.left.as_deref());
        Some((&n.key, &n.val))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K, V> ExactSizeIterator for PreOrder<'_, K, V> {}

impl<K, V> FusedIterator for PreOrder<'_, K, V> {}

/// Post-order iterator: both subtrees of a node before the node itself.
pub struct PostOrder<'a, K, V> {
    // the flag records whether the node's children were already scheduled
    work: Vec<(&'a Node<K, V>, bool)>,
    len: usize,
}

impl<'a, K, V> PostOrder<'a, K, V> {
    pub(super) fn new(root: &'a OptNode<K, V>) -> Self {
        PostOrder {
            work: root.as_deref().map(|n| (n, false)).into_iter().collect(),
            len: super::len(root),
        }
    }
}

impl<'a, K, V> Iterator for PostOrder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (n, expanded) = self.work.pop()?;
            if expanded {
                self.len -= 1;
                return Some((&n.key, &n.val));
            }

            self.work.push((n, true));
            self.work.extend(n.right.as_deref().map(|rt| (rt, false)));
            self.work.extend(n.left.as_deref().map(|lf| (lf, false)));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K, V> ExactSizeIterator for PostOrder<'_, K, V> {}

impl<K, V> FusedIterator for PostOrder<'_, K, V> {}

/// Consuming in-order iterator.  Nodes are released as their entries are
/// yielded.
pub struct IntoIter<K, V> {
    work: Vec<Box<Node<K, V>>>,
    len: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(super) fn new(root: OptNode<K, V>) -> Self {
        let mut iter = IntoIter {
            work: Vec::new(),
            len: super::len(&root),
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut curr: OptNode<K, V>) {
        while let Some(mut n) = curr {
            curr = n.left.take();
            self.work.push(n);
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.work.pop()?;
        self.len -= 1;
        let Node { key, val, right, .. } = *n;
        self.push_left_spine(right);
        Some((key, val))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}
