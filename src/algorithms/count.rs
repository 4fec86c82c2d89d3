//! Node counting.

use std::sync::Arc;

use crate::core::Expr;
use crate::visitor::{BaseVisitor, postorder_traversal};

/// Counts every dispatch it receives
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeCounter {
    pub count: usize,
}

impl BaseVisitor for NodeCounter {
    fn bvisit_basic(&mut self, _x: &Arc<Expr>) {
        self.count += 1;
    }
}

/// Number of nodes in `b`, counting shared subtrees once per occurrence
#[must_use]
pub fn count_nodes(b: &Arc<Expr>) -> usize {
    let mut counter = NodeCounter::default();
    postorder_traversal(b, &mut counter);
    counter.count
}
