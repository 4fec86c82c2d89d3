//! Symbol-existence search.

use std::sync::Arc;

use crate::core::{Expr, Symbol};
use crate::visitor::{BaseVisitor, Handled, StopFlags, StopVisitor, preorder_traversal_stop};

/// Finds whether a symbol occurs anywhere in a tree, stopping at the first
/// occurrence in preorder
#[derive(Debug, Clone)]
pub struct HasSymbolVisitor {
    target: Symbol,
    has: bool,
    visited: usize,
    flags: StopFlags,
}

impl HasSymbolVisitor {
    #[must_use]
    pub const fn new(target: Symbol) -> Self {
        Self {
            target,
            has: false,
            visited: 0,
            flags: StopFlags {
                stop: false,
                local_stop: false,
            },
        }
    }

    pub fn apply(&mut self, b: &Arc<Expr>) -> bool {
        self.has = false;
        self.visited = 0;
        self.flags.reset();
        let stopped = preorder_traversal_stop(b, self).is_break();
        tracing::trace!(
            target: "symb_visit::has_symbol",
            symbol = %self.target,
            found = self.has,
            visited = self.visited,
            stopped,
            "has_symbol"
        );
        self.has
    }

    /// Nodes dispatched during the last [`apply`](Self::apply)
    #[must_use]
    pub const fn visited(&self) -> usize {
        self.visited
    }
}

impl BaseVisitor for HasSymbolVisitor {
    fn bvisit_symbol(&mut self, _x: &Arc<Expr>, s: &Symbol) -> Handled {
        self.visited += 1;
        if *s == self.target {
            self.has = true;
            self.flags.stop = true;
        }
        Handled::Done
    }

    fn bvisit_basic(&mut self, _x: &Arc<Expr>) {
        self.visited += 1;
    }
}

impl StopVisitor for HasSymbolVisitor {
    fn flags(&self) -> StopFlags {
        self.flags
    }

    fn flags_mut(&mut self) -> &mut StopFlags {
        &mut self.flags
    }
}

/// Whether `x` occurs in `b`
#[must_use]
pub fn has_symbol(b: &Arc<Expr>, x: &Symbol) -> bool {
    HasSymbolVisitor::new(x.clone()).apply(b)
}
