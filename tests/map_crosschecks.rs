use avl_collections::{OrderedMap, TreeError};
use proptest::prelude::*;
use std::collections::BTreeMap as StdMap;

mod common;
use common::*;

#[derive(Clone)]
struct Maps<K, V> {
    avl_map: OrderedMap<K, V>,
    std_map: StdMap<K, V>,
}

impl<K, V> Maps<K, V>
where
    K: Clone + Ord + std::fmt::Debug,
    V: Clone + Eq + std::fmt::Debug,
{
    fn new(v: Vec<(K, V)>) -> Maps<K, V> {
        Maps {
            avl_map: OrderedMap::from_iter(v.clone()),
            std_map: StdMap::from_iter(v),
        }
    }

    fn chk(&self) {
        assert_eq!(self.avl_map.len(), self.std_map.len());
        assert_eq_iters(self.avl_map.iter(), self.std_map.iter());
        self.avl_map.check().unwrap();
    }
}

fn check_ops(ops: Vec<Op>) {
    let mut m = Maps::new(vec![]);

    for op in ops {
        match op {
            Op::Insert(k, v) => {
                let is_new = m.std_map.insert(k, v).is_none();
                assert_eq!(m.avl_map.insert(k, v), is_new);
            }

            Op::Erase(k) => {
                let was_present = m.std_map.remove(&k).is_some();
                assert_eq!(m.avl_map.erase(&k), was_present);
            }

            Op::EraseMin => {
                let expect = m.std_map.pop_first().ok_or(TreeError::EmptyContainer);
                assert_eq!(m.avl_map.erase_min(), expect);
            }

            Op::EraseMax => {
                assert_eq!(m.avl_map.peek_max().ok(), m.std_map.last_key_value());
                let expect = m.std_map.pop_last().ok_or(TreeError::EmptyContainer);
                assert_eq!(m.avl_map.get_max(), expect);
            }

            Op::Split(k) => {
                let hi = m.avl_map.split_off(&k);
                let std_hi = m.std_map.split_off(&(k + 1));
                let hi = Maps {
                    avl_map: hi,
                    std_map: std_hi,
                };
                hi.chk();
                m.chk();
            }

            Op::Join(entries) => {
                let mut other = Maps::new(entries);
                m.avl_map.join(&mut other.avl_map);
                m.std_map.append(&mut other.std_map);
                assert!(other.avl_map.is_empty());
                other.chk();
            }
        }

        m.chk();
    }
}

fn check_split(v: SmallIntPairs, pivot: u16) {
    let m = Maps::new(v);
    let (lo, hi) = m.avl_map.clone().split(&pivot);
    lo.check().unwrap();
    hi.check().unwrap();

    assert!(lo.keys().all(|k| *k <= pivot));
    assert!(hi.keys().all(|k| *k > pivot));
    assert_eq!(lo.len() + hi.len(), m.avl_map.len());
    assert_eq_iters(lo.iter().chain(hi.iter()), m.std_map.iter());
}

fn check_join(u: SmallIntPairs, v: SmallIntPairs) {
    let mut m1 = Maps::new(u);
    let mut m2 = Maps::new(v);

    m1.avl_map.join(&mut m2.avl_map);
    m1.std_map.append(&mut m2.std_map);

    m1.chk();
    m2.chk();
}

fn check_get(v: SmallIntPairs, probes: Vec<u16>) {
    let m = Maps::new(v);
    for k in probes {
        assert_eq!(m.avl_map.get(&k).ok(), m.std_map.get(&k));
        assert_eq!(m.avl_map.contains(&k), m.std_map.contains_key(&k));
    }

    assert_eq!(
        m.avl_map.get_min().ok(),
        m.std_map.first_key_value()
    );
    assert_eq!(m.avl_map.peek_max().ok(), m.std_map.last_key_value());
}

fn check_borrowed_key(u: Vec<(String, u16)>, k: &str) {
    let mut m = Maps::new(u);
    assert_eq!(m.avl_map.get(k).ok(), m.std_map.get(k));
    assert_eq!(m.avl_map.remove(k), m.std_map.remove(k));
    m.chk();
}

fn check_remove_each(v: SmallIntPairs) {
    let m = Maps::new(v);
    for k in m.std_map.keys() {
        let mut m2 = m.clone();
        assert_eq!(m2.avl_map.remove(k), m2.std_map.remove(k));
        m2.chk();
    }
    m.chk();
}

#[test]
fn ops_regr1() {
    check_ops(vec![
        Op::Insert(5, 0),
        Op::Insert(3, 0),
        Op::Split(4),
        Op::Join(vec![(4, 1), (5, 2)]),
        Op::EraseMax,
        Op::EraseMin,
        Op::EraseMin,
        Op::EraseMin,
    ]);
}

proptest! {
    #[test]
    fn test_ops(ops in ops()) {
        check_ops(ops);
    }

    #[test]
    fn test_split(v in small_int_pairs(), pivot in 0u16..1100) {
        check_split(v, pivot);
    }

    #[test]
    fn test_join(u in small_int_pairs(), v in small_int_pairs()) {
        check_join(u, v);
    }

    #[test]
    fn test_get(v in small_int_pairs(), probes in small_int_seq()) {
        check_get(v, probes);
    }

    #[test]
    fn test_borrowed_key(u in string_u16_pairs(), k in "[a-z]{0,2}") {
        check_borrowed_key(u, &k);
    }

    #[test]
    fn test_remove_each(v in prop::collection::vec((0u16..64, 0u16..8), 0..64)) {
        check_remove_each(v);
    }
}
