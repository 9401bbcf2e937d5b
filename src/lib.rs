#![warn(missing_docs)]
//! # Ordered sets and maps on AVL trees
//!
//! `avl-collections` provides [`OrderedSet`] and [`OrderedMap`], two sorted
//! containers backed by one AVL tree engine.  Besides lookup, insertion and
//! removal, both containers can be split at a pivot key and joined with
//! another container of the same type.
//!
//! Each container exclusively owns its nodes.  Clones are deep copies, and
//! split and join hand nodes over from one container to another without ever
//! sharing them.
//!
//! ```
//! use avl_collections::OrderedSet;
//!
//! let mut evens: OrderedSet<u32> = (0..60).step_by(2).collect();
//! let mut odds: OrderedSet<u32> = (1..60).step_by(2).collect();
//! evens.join(&mut odds);
//! assert!(odds.is_empty());
//! assert!(evens.iter().copied().eq(0..60));
//!
//! let (low, high) = evens.split(&29);
//! assert_eq!(low.len(), 30);
//! assert_eq!(high.get_min(), Ok(&30));
//! ```

mod avl;
pub use avl::{
    Dot, IntoIter, Iter, OrderedMap, OrderedSet, PostOrder, PreOrder,
    SetIntoIter, SetIter,
};

mod error;
pub use error::{InvariantError, Result, TreeError};
