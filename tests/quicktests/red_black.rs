use trees::red_black::{Color, Tree};
use trees::traversal::Order;

use std::collections::{HashMap, HashSet};

use crate::{init_logger, Op};

/// Applies a set of operations to a tree and a hashmap.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in the map.
fn do_ops<K, V>(ops: &[Op<K, V>], bst: &mut Tree<K, V>, map: &mut HashMap<K, V>)
where
    K: std::hash::Hash + Eq + Clone + Ord,
    V: std::fmt::Debug + PartialEq + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                bst.insert(k.clone(), v.clone());
                map.insert(k.clone(), v.clone());
            }
            Op::Remove(k) => {
                assert_eq!(bst.delete(k).ok(), map.remove(k));
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
    init_logger();
    let mut tree = Tree::new();
    let mut map = HashMap::new();

    do_ops(&ops, &mut tree, &mut map);
    tree.len() == map.len() && map.keys().all(|key| tree.search(key).ok() == map.get(key))
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: Tree<_, _> = xs.iter().map(|x| (*x, *x)).collect();

    xs.iter().all(|x| tree.search(x) == Ok(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<_, _> = xs.iter().map(|x| (*x, *x)).collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.search(x).is_err())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    init_logger();
    let mut tree: Tree<_, _> = xs.iter().map(|x| (*x, *x)).collect();
    for delete in &deletes {
        let _ = tree.delete(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| tree.search(x).is_err())
        && still_present.iter().all(|x| tree.search(x).is_ok())
}

#[quickcheck]
fn in_order_is_sorted_and_deduplicated(xs: Vec<i16>) -> bool {
    let tree: Tree<_, _> = xs.iter().map(|x| (*x, ())).collect();
    let mut expected = xs;
    expected.sort_unstable();
    expected.dedup();

    tree.traverse(Order::InOrder).map(|(k, _)| *k).eq(expected.iter().copied())
        && tree.iter().map(|(k, _)| *k).eq(expected.iter().copied())
        && tree.len() == expected.len()
}

#[quickcheck]
fn every_order_visits_every_key(xs: Vec<u8>) -> bool {
    let tree: Tree<_, _> = xs.iter().map(|x| (*x, ())).collect();

    Order::ALL.into_iter().all(|order| {
        let mut keys: Vec<_> = tree.traverse(order).map(|(k, _)| *k).collect();
        keys.sort_unstable();
        keys.len() == tree.len() && keys.windows(2).all(|w| w[0] < w[1])
    })
}

#[quickcheck]
fn height_is_logarithmic(n: u16) -> bool {
    let n = usize::from(n % 4096);
    let tree: Tree<_, _> = (0..n).map(|x| (x, x)).collect();

    // No path is more than twice as long as the shortest, which is at most lg(n + 1) long.
    tree.height() as f64 <= 2.0 * ((n + 1) as f64).log2()
}

#[quickcheck]
fn root_is_black(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<_, _> = xs.iter().map(|x| (*x, ())).collect();
    for delete in &deletes {
        let _ = tree.delete(delete);
    }

    tree.root().map_or(true, |root| root.color() == Color::Black)
}
