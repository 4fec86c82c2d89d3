//! Structural rewrite with sharing.
//!
//! [`TransformVisitor`] rebuilds a tree bottom-up. A node whose children all
//! come back pointer-identical is returned as is, so an untouched subtree is
//! never copied and the identity rewrite returns the very same root. A
//! [`RewritePolicy`] is asked about every node first; when it declines, the
//! structural rules below apply.
//!
//! Sums, products, powers and every function or relational node are rebuilt
//! through their canonical constructors with their internal data (numeric
//! coefficients, function heads, relational operator) preserved. Any other
//! kind is returned unchanged.
//!
//! # Example
//!
//! ```
//! use symb_visit::algorithms::{XReplace, xreplace};
//! use symb_visit::{ArcExprExt, Expr};
//!
//! let x = Expr::symbol("x");
//! let y = Expr::symbol("y");
//! let e = x.sin().add(&y);
//! let subs = XReplace::new().with(x, Expr::integer(0));
//! assert_eq!(xreplace(&e, &subs).to_string(), "y + sin(0)");
//! ```

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::core::{
    Add, Expr, MultiArgFunction, Mul, OneArgFunction, Pow, Relational, TwoArgBasic,
    TwoArgFunction,
};
use crate::visitor::{Accept, BaseVisitor, Handled};

// =============================================================================
// POLICIES
// =============================================================================

/// Node-level replacement consulted before the structural rules
pub trait RewritePolicy {
    /// Replacement for `x`, or `None` to rewrite its children instead.
    ///
    /// A replacement is final; it is not rewritten again.
    fn rewrite(&self, x: &Arc<Expr>) -> Option<Arc<Expr>>;
}

impl<P: RewritePolicy + ?Sized> RewritePolicy for &P {
    fn rewrite(&self, x: &Arc<Expr>) -> Option<Arc<Expr>> {
        (**self).rewrite(x)
    }
}

/// Never replaces anything
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl RewritePolicy for Identity {
    fn rewrite(&self, _x: &Arc<Expr>) -> Option<Arc<Expr>> {
        None
    }
}

/// Policy from a closure
#[derive(Clone, Copy)]
pub struct FnPolicy<F>(pub F);

impl<F> RewritePolicy for FnPolicy<F>
where
    F: Fn(&Arc<Expr>) -> Option<Arc<Expr>>,
{
    fn rewrite(&self, x: &Arc<Expr>) -> Option<Arc<Expr>> {
        (self.0)(x)
    }
}

/// Substitution map, looked up structurally
#[derive(Debug, Default, Clone)]
pub struct XReplace {
    map: FxHashMap<Arc<Expr>, Arc<Expr>>,
}

impl XReplace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert)
    #[must_use]
    pub fn with(mut self, from: Arc<Expr>, to: Arc<Expr>) -> Self {
        self.insert(from, to);
        self
    }

    /// Map `from` to `to`, returning the previous target if any
    pub fn insert(&mut self, from: Arc<Expr>, to: Arc<Expr>) -> Option<Arc<Expr>> {
        self.map.insert(from, to)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl RewritePolicy for XReplace {
    fn rewrite(&self, x: &Arc<Expr>) -> Option<Arc<Expr>> {
        self.map.get(x).cloned()
    }
}

// =============================================================================
// TRANSFORM VISITOR
// =============================================================================

/// Bottom-up rewrite driven by a [`RewritePolicy`]
#[derive(Debug, Default)]
pub struct TransformVisitor<P = Identity> {
    policy: P,
    result: Option<Arc<Expr>>,
    rebuilt: usize,
}

impl<P: RewritePolicy> TransformVisitor<P> {
    #[must_use]
    pub const fn new(policy: P) -> Self {
        Self {
            policy,
            result: None,
            rebuilt: 0,
        }
    }

    /// Rewrite `x`; `x` itself comes back when nothing changed
    pub fn apply(&mut self, x: &Arc<Expr>) -> Arc<Expr> {
        if let Some(replacement) = self.policy.rewrite(x) {
            return replacement;
        }
        x.accept(self);
        self.result.take().unwrap_or_else(|| Arc::clone(x))
    }

    /// Nodes rebuilt by this visitor so far
    #[must_use]
    pub const fn rebuilt(&self) -> usize {
        self.rebuilt
    }

    /// Record the outcome for `x`: the rebuilt node, or `x` itself
    fn finish(&mut self, x: &Arc<Expr>, rebuilt: Option<Arc<Expr>>) -> Handled {
        let out = match rebuilt {
            Some(new) => {
                self.rebuilt += 1;
                tracing::trace!(target: "symb_visit::rewrite", from = %x, to = %new, "rebuilt");
                new
            }
            None => Arc::clone(x),
        };
        self.result = Some(out);
        Handled::Done
    }

    /// Rewrite the children `args()` yields and rebuild through `build`
    /// when any of them changed. Scaled terms, powers and the numeric
    /// constant are children here, so the policy sees them too.
    fn rewrite_args<F>(&mut self, x: &Arc<Expr>, build: F) -> Handled
    where
        F: FnOnce(Vec<Arc<Expr>>) -> Arc<Expr>,
    {
        let children = x.args();
        let mut changed = false;
        let mut rewritten = Vec::with_capacity(children.len());
        for child in &children {
            let new = self.apply(child);
            changed |= !Arc::ptr_eq(&new, child);
            rewritten.push(new);
        }
        let rebuilt = changed.then(|| build(rewritten));
        self.finish(x, rebuilt)
    }

    fn rewrite_two_arg<T: TwoArgBasic>(&mut self, x: &Arc<Expr>, node: &T) -> Handled {
        let a = self.apply(node.arg1());
        let b = self.apply(node.arg2());
        let unchanged = Arc::ptr_eq(&a, node.arg1()) && Arc::ptr_eq(&b, node.arg2());
        let rebuilt = (!unchanged).then(|| node.rebuild(a, b));
        self.finish(x, rebuilt)
    }
}

impl<P: RewritePolicy> BaseVisitor for TransformVisitor<P> {
    fn bvisit_add(&mut self, x: &Arc<Expr>, _add: &Add) -> Handled {
        self.rewrite_args(x, Expr::sum)
    }

    fn bvisit_mul(&mut self, x: &Arc<Expr>, _mul: &Mul) -> Handled {
        self.rewrite_args(x, Expr::product)
    }

    fn bvisit_pow(&mut self, x: &Arc<Expr>, pow: &Pow) -> Handled {
        let base = self.apply(pow.base());
        let exp = self.apply(pow.exp());
        let unchanged = Arc::ptr_eq(&base, pow.base()) && Arc::ptr_eq(&exp, pow.exp());
        let rebuilt = (!unchanged).then(|| Expr::pow(base, exp));
        self.finish(x, rebuilt)
    }

    fn bvisit_one_arg_function(&mut self, x: &Arc<Expr>, f: &OneArgFunction) -> Handled {
        let arg = self.apply(f.arg());
        let rebuilt = (!Arc::ptr_eq(&arg, f.arg())).then(|| f.rebuild(arg));
        self.finish(x, rebuilt)
    }

    fn bvisit_two_arg_function(&mut self, x: &Arc<Expr>, f: &TwoArgFunction) -> Handled {
        self.rewrite_two_arg(x, f)
    }

    fn bvisit_multi_arg_function(&mut self, x: &Arc<Expr>, f: &MultiArgFunction) -> Handled {
        let mut changed = false;
        let mut args = Vec::with_capacity(f.args().len());
        for arg in f.args() {
            let new = self.apply(arg);
            changed |= !Arc::ptr_eq(&new, arg);
            args.push(new);
        }
        let rebuilt = changed.then(|| f.rebuild(args));
        self.finish(x, rebuilt)
    }

    fn bvisit_relational(&mut self, x: &Arc<Expr>, r: &Relational) -> Handled {
        self.rewrite_two_arg(x, r)
    }

    fn bvisit_basic(&mut self, x: &Arc<Expr>) {
        self.result = Some(Arc::clone(x));
    }
}

/// Replace every sub-expression found in `subs`, sharing untouched subtrees
#[must_use]
pub fn xreplace(b: &Arc<Expr>, subs: &XReplace) -> Arc<Expr> {
    let mut v = TransformVisitor::new(subs);
    let out = v.apply(b);
    tracing::debug!(
        target: "symb_visit::rewrite",
        expr = %b,
        substitutions = subs.len(),
        rebuilt = v.rebuilt(),
        "xreplace"
    );
    out
}
