#[macro_use]
extern crate quickcheck_macros;

use quickcheck::{Arbitrary, Gen};
use simplelog::{Config, LevelFilter, TestLogger};

mod avl;
mod map;
mod red_black;

/// The things a quicktest can do to a tree and to the map it is checked against.
#[derive(Copy, Clone, Debug)]
pub enum Op<K, V> {
    /// Insert the K, V into both
    Insert(K, V),
    /// Remove the K from both
    Remove(K),
}

impl<K, V> Arbitrary for Op<K, V>
where
    K: Arbitrary,
    V: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Op::Insert(K::arbitrary(g), V::arbitrary(g))
        } else {
            Op::Remove(K::arbitrary(g))
        }
    }
}

/// Routes the trees' rotation and fix-up logs into the test harness's captured output.
pub fn init_logger() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}
