//! Tree traversals built on dispatch.
//!
//! Children come from [`Expr::args`]. The stoppable variants read the
//! visitor's [`StopFlags`] after every dispatch and report early termination
//! as [`ControlFlow::Break`], which every recursive frame propagates with `?`.

use std::ops::ControlFlow;
use std::sync::Arc;

use crate::core::Expr;
use crate::visitor::{Accept, Visitor};

/// Cooperative termination flags owned by one visitor instance
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StopFlags {
    /// Visit nothing else anywhere in the tree
    pub stop: bool,
    /// Skip the children of the node just visited
    pub local_stop: bool,
}

impl StopFlags {
    /// Clear both flags; called at the start of every `apply`
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A visitor whose handlers can end or prune a traversal
pub trait StopVisitor: Visitor {
    fn flags(&self) -> StopFlags;
    fn flags_mut(&mut self) -> &mut StopFlags;
}

/// Visit `b`, then each subtree in child order
pub fn preorder_traversal<V: Visitor + ?Sized>(b: &Arc<Expr>, v: &mut V) {
    b.accept(v);
    for child in b.args() {
        preorder_traversal(&child, v);
    }
}

/// Visit each subtree in child order, then `b`
pub fn postorder_traversal<V: Visitor + ?Sized>(b: &Arc<Expr>, v: &mut V) {
    for child in b.args() {
        postorder_traversal(&child, v);
    }
    b.accept(v);
}

/// Preorder traversal that ends as soon as a handler sets `stop`.
///
/// Returns `Break` if the traversal was stopped.
pub fn preorder_traversal_stop<V: StopVisitor + ?Sized>(
    b: &Arc<Expr>,
    v: &mut V,
) -> ControlFlow<()> {
    b.accept(v);
    if v.flags().stop {
        return ControlFlow::Break(());
    }
    for child in b.args() {
        preorder_traversal_stop(&child, v)?;
    }
    ControlFlow::Continue(())
}

/// Postorder traversal that ends as soon as a handler sets `stop`.
///
/// Returns `Break` if the traversal was stopped.
pub fn postorder_traversal_stop<V: StopVisitor + ?Sized>(
    b: &Arc<Expr>,
    v: &mut V,
) -> ControlFlow<()> {
    for child in b.args() {
        postorder_traversal_stop(&child, v)?;
    }
    b.accept(v);
    if v.flags().stop {
        return ControlFlow::Break(());
    }
    ControlFlow::Continue(())
}

/// Preorder traversal where a handler can prune the current subtree.
///
/// Setting `local_stop` skips the children of the node just visited; the
/// flag is cleared before traversal moves on. Setting `stop` ends the whole
/// traversal, as in [`preorder_traversal_stop`].
pub fn preorder_traversal_local_stop<V: StopVisitor + ?Sized>(
    b: &Arc<Expr>,
    v: &mut V,
) -> ControlFlow<()> {
    b.accept(v);
    let flags = v.flags();
    if flags.stop {
        return ControlFlow::Break(());
    }
    if flags.local_stop {
        v.flags_mut().local_stop = false;
        return ControlFlow::Continue(());
    }
    for child in b.args() {
        preorder_traversal_local_stop(&child, v)?;
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visitor::BaseVisitor;

    /// Records every node and stops or prunes at given nodes
    #[derive(Default)]
    struct Recorder {
        seen: Vec<String>,
        stop_at: Option<String>,
        prune_at: Option<String>,
        flags: StopFlags,
    }

    impl BaseVisitor for Recorder {
        fn bvisit_basic(&mut self, x: &Arc<Expr>) {
            let s = x.to_string();
            if self.stop_at.as_deref() == Some(s.as_str()) {
                self.flags.stop = true;
            }
            if self.prune_at.as_deref() == Some(s.as_str()) {
                self.flags.local_stop = true;
            }
            self.seen.push(s);
        }
    }

    impl StopVisitor for Recorder {
        fn flags(&self) -> StopFlags {
            self.flags
        }

        fn flags_mut(&mut self) -> &mut StopFlags {
            &mut self.flags
        }
    }

    // f(sin(x), g(y, z), w)
    fn tree() -> Arc<Expr> {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let z = Expr::symbol("z");
        let w = Expr::symbol("w");
        Expr::function_symbol(
            "f",
            [Expr::sin(x), Expr::function_symbol("g", [y, z]), w],
        )
    }

    #[test]
    fn test_preorder() {
        let mut r = Recorder::default();
        preorder_traversal(&tree(), &mut r);
        assert_eq!(
            r.seen,
            ["f(sin(x), g(y, z), w)", "sin(x)", "x", "g(y, z)", "y", "z", "w"]
        );
    }

    #[test]
    fn test_postorder() {
        let mut r = Recorder::default();
        postorder_traversal(&tree(), &mut r);
        assert_eq!(
            r.seen,
            ["x", "sin(x)", "y", "z", "g(y, z)", "w", "f(sin(x), g(y, z), w)"]
        );
    }

    #[test]
    fn test_preorder_stop() {
        let mut r = Recorder {
            stop_at: Some("y".into()),
            ..Recorder::default()
        };
        let flow = preorder_traversal_stop(&tree(), &mut r);
        assert!(flow.is_break());
        assert_eq!(r.seen, ["f(sin(x), g(y, z), w)", "sin(x)", "x", "g(y, z)", "y"]);
    }

    #[test]
    fn test_postorder_stop() {
        let mut r = Recorder {
            stop_at: Some("g(y, z)".into()),
            ..Recorder::default()
        };
        let flow = postorder_traversal_stop(&tree(), &mut r);
        assert!(flow.is_break());
        assert_eq!(r.seen, ["x", "sin(x)", "y", "z", "g(y, z)"]);
    }

    #[test]
    fn test_stop_never_set_completes() {
        let mut r = Recorder::default();
        assert!(preorder_traversal_stop(&tree(), &mut r).is_continue());
        assert_eq!(r.seen.len(), 7);
    }

    #[test]
    fn test_local_stop_prunes_subtree_only() {
        let mut r = Recorder {
            prune_at: Some("g(y, z)".into()),
            ..Recorder::default()
        };
        let flow = preorder_traversal_local_stop(&tree(), &mut r);
        assert!(flow.is_continue());
        assert_eq!(r.seen, ["f(sin(x), g(y, z), w)", "sin(x)", "x", "g(y, z)", "w"]);
        assert!(!r.flags.local_stop);
    }

    #[test]
    fn test_local_stop_still_honours_stop() {
        let mut r = Recorder {
            prune_at: Some("sin(x)".into()),
            stop_at: Some("y".into()),
            ..Recorder::default()
        };
        let flow = preorder_traversal_local_stop(&tree(), &mut r);
        assert!(flow.is_break());
        assert_eq!(r.seen, ["f(sin(x), g(y, z), w)", "sin(x)", "g(y, z)", "y"]);
    }

    #[test]
    fn test_leaf_visited_once() {
        let mut r = Recorder::default();
        preorder_traversal(&Expr::symbol("x"), &mut r);
        postorder_traversal(&Expr::symbol("x"), &mut r);
        assert_eq!(r.seen, ["x", "x"]);
    }
}
