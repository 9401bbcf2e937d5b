use proptest::prelude::*;
use std::sync::Once;

#[allow(dead_code)]
pub(super) fn assert_eq_iters<I: Iterator, J: Iterator<Item = I::Item>>(
    mut i: I,
    mut j: J,
) where
    I::Item: std::fmt::Debug + Eq, // same inferred for J::Item
{
    loop {
        match (i.next(), j.next()) {
            (None, None) => return,
            (a, b) => assert_eq!(a, b),
        }
    }
}

// Routes the crate's tracing events to the test output; filter with RUST_LOG.
#[allow(dead_code)]
pub(super) fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[allow(dead_code)]
pub(super) type SmallIntPairs = Vec<(u16, u16)>;

#[allow(dead_code)]
pub(super) fn small_int_pairs() -> impl Strategy<Value = SmallIntPairs> {
    prop::collection::vec((0u16..1024u16, 0u16..1024u16), 0..512)
}

#[allow(dead_code)]
pub(super) type U16Seq = Vec<u16>;

#[allow(dead_code)]
pub(super) fn small_int_seq() -> impl Strategy<Value = U16Seq> {
    prop::collection::vec(0u16..1024u16, 0..512)
}

#[allow(dead_code)]
pub(super) fn string_u16_pairs() -> impl Strategy<Value = Vec<(String, u16)>> {
    prop::collection::vec(("[a-z]{0,2}", 0u16..1024u16), 0..512)
}

/// A step in a random workload applied to a container and a reference model.
#[allow(dead_code)]
#[derive(Clone, Debug)]
pub(super) enum Op {
    Insert(u16, u16),
    Erase(u16),
    EraseMin,
    EraseMax,
    Split(u16),
    Join(Vec<(u16, u16)>),
}

#[allow(dead_code)]
pub(super) fn ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        6 => (0u16..256, any::<u16>()).prop_map(|(k, v)| Op::Insert(k, v)),
        3 => (0u16..256).prop_map(Op::Erase),
        1 => Just(Op::EraseMin),
        1 => Just(Op::EraseMax),
        1 => (0u16..256).prop_map(Op::Split),
        1 => prop::collection::vec((0u16..256, any::<u16>()), 0..32).prop_map(Op::Join),
    ];
    prop::collection::vec(op, 0..200)
}
