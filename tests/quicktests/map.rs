use trees::map::{self, TreeKind};
use trees::traversal::Order;

use crate::{init_logger, Op};

/// Both kinds hold different shapes for the same input but must agree on every answer.
#[quickcheck]
fn kinds_agree(pairs: Vec<(i8, i8)>, ops: Vec<Op<i8, i8>>) -> bool {
    init_logger();
    let mut avl = map::build(TreeKind::Avl, pairs.iter().copied());
    let mut rb = map::build(TreeKind::RedBlack, pairs);

    for op in ops {
        match op {
            Op::Insert(k, v) => {
                avl.insert(k, v);
                rb.insert(k, v);
            }
            Op::Remove(k) => {
                if avl.delete(&k) != rb.delete(&k) {
                    return false;
                }
            }
        }
    }

    avl.len() == rb.len()
        && avl
            .traverse(Order::InOrder)
            .eq(rb.traverse(Order::InOrder))
        && (i8::MIN..=i8::MAX).all(|k| avl.search(&k) == rb.search(&k))
}
