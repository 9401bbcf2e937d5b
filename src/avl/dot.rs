use super::{Node, OptNode};
use std::fmt::{Display, Formatter, Result};

/// Renders the parent/child edges of a tree as an undirected graph.
///
/// Each edge is one line, `<parent> -- <child> [label=L]` (or `R`), listed in
/// pre-order.  The whole listing is wrapped in a `strict graph { ... }`
/// declaration.  An empty tree renders as a graph with no edges.
///
/// # Examples
/// ```
/// use avl_collections::OrderedSet;
///
/// let s = OrderedSet::from([2, 1, 3]);
/// assert_eq!(
///     s.dot().to_string(),
///     "strict graph {\n2 -- 1 [label=L]\n2 -- 3 [label=R]\n}"
/// );
/// ```
pub struct Dot<'a, K, V> {
    root: &'a OptNode<K, V>,
}

impl<'a, K, V> Dot<'a, K, V> {
    pub(super) fn new(root: &'a OptNode<K, V>) -> Self {
        Dot { root }
    }
}

fn write_edges<K: Display, V>(n: &Node<K, V>, f: &mut Formatter<'_>) -> Result {
    if let Some(lf) = n.left.as_deref() {
        writeln!(f, "{} -- {} [label=L]", n.key, lf.key)?;
        write_edges(lf, f)?;
    }

    if let Some(rt) = n.right.as_deref() {
        writeln!(f, "{} -- {} [label=R]", n.key, rt.key)?;
        write_edges(rt, f)?;
    }

    Ok(())
}

impl<K: Display, V> Display for Dot<'_, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str("strict graph {\n")?;
        if let Some(n) = self.root.as_deref() {
            write_edges(n, f)?;
        }
        f.write_str("}")
    }
}
