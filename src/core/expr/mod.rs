//! Expression nodes.
//!
//! This module defines:
//! - `Expr` - an immutable node with a cached structural hash
//! - `ExprKind` - the payload variants, one or more per concrete kind
//!
//! # Architecture
//!
//! ## Shared ownership
//! Nodes are built bottom-up and never mutated. Children are `Arc<Expr>`, so
//! a subtree can be shared by any number of parents and traversals. Identity
//! (`Expr::ptr_eq`) is exposed next to structural equality; rewrite relies
//! on identity to avoid rebuilding unchanged subtrees.
//!
//! ## Structural hashing
//! Each `Expr` stores a pre-computed hash for O(1) equality rejection.
//!
//! ## Canonical dictionaries
//! Sums keep a rational constant plus `term -> coefficient` entries; products
//! keep a rational coefficient plus `base -> exponent` entries. Both are
//! sorted with [`expr_cmp`] so equal expressions are built identically.
//!
//! # Usage
//!
//! ```
//! use symb_visit::Expr;
//!
//! let x = Expr::symbol("x");
//! let expr = Expr::sum([Expr::pow(x.clone(), Expr::integer(2)), Expr::sin(x)]);
//! assert_eq!(expr.to_string(), "x^2 + sin(x)");
//! ```

mod args;
mod constructors;
mod nodes;
mod ordering;

use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::{Arc, LazyLock};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use rustc_hash::FxHasher;

use crate::core::kind::TypeCode;
use crate::core::symbol::Symbol;

pub use nodes::{
    Add, Constant, Infty, Interval, Mul, MultiArgFunction, MultiArgHead, OneArgFn,
    OneArgFunction, Pow, RelOp, Relational, TwoArgBasic, TwoArgFn, TwoArgFunction, UIntPoly,
};
pub use ordering::expr_cmp;

/// Placeholder swapped into fixed-arity slots while dropping
static DUMMY_ARC: LazyLock<Arc<Expr>> =
    LazyLock::new(|| Arc::new(Expr::new(ExprKind::Integer(BigInt::zero()))));

// =============================================================================
// EXPR
// =============================================================================

/// A symbolic expression node.
///
/// Always handled through `Arc<Expr>`; constructors return shared handles.
#[derive(Debug)]
pub struct Expr {
    /// Structural hash for O(1) equality rejection
    pub(crate) hash: u64,
    pub(crate) kind: ExprKind,
}

impl Deref for Expr {
    type Target = ExprKind;
    fn deref(&self) -> &Self::Target {
        &self.kind
    }
}

impl PartialEq for Expr {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        if self.hash != other.hash {
            return false;
        }
        self.kind == other.kind
    }
}

impl Eq for Expr {}

impl Hash for Expr {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

impl PartialOrd for Expr {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Expr {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        expr_cmp(self, other)
    }
}

impl Expr {
    /// Wrap a payload, computing its structural hash.
    ///
    /// No canonicalization happens here; use the named constructors for that.
    #[must_use]
    pub fn new(kind: ExprKind) -> Self {
        let mut hasher = FxHasher::default();
        kind.hash(&mut hasher);
        Self {
            hash: hasher.finish(),
            kind,
        }
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> &ExprKind {
        &self.kind
    }

    #[inline]
    #[must_use]
    pub const fn structural_hash(&self) -> u64 {
        self.hash
    }

    /// Reference identity of two shared nodes
    #[inline]
    #[must_use]
    pub fn ptr_eq(a: &Arc<Self>, b: &Arc<Self>) -> bool {
        Arc::ptr_eq(a, b)
    }

    /// Registry identifier of this node's concrete kind
    #[must_use]
    pub const fn type_code(&self) -> TypeCode {
        match &self.kind {
            ExprKind::Integer(_) => TypeCode::Integer,
            ExprKind::Rational(_) => TypeCode::Rational,
            ExprKind::Infty(_) => TypeCode::Infty,
            ExprKind::NaN => TypeCode::NaN,
            ExprKind::Constant(_) => TypeCode::Constant,
            ExprKind::Symbol(_) => TypeCode::Symbol,
            ExprKind::Add(_) => TypeCode::Add,
            ExprKind::Mul(_) => TypeCode::Mul,
            ExprKind::Pow(_) => TypeCode::Pow,
            ExprKind::OneArg(f) => f.func.type_code(),
            ExprKind::TwoArg(f) => f.func.type_code(),
            ExprKind::MultiArg(f) => f.head.type_code(),
            ExprKind::UIntPoly(_) => TypeCode::UIntPoly,
            ExprKind::BooleanAtom(_) => TypeCode::BooleanAtom,
            ExprKind::Relational(r) => r.op.type_code(),
            ExprKind::And(_) => TypeCode::And,
            ExprKind::Or(_) => TypeCode::Or,
            ExprKind::Not(_) => TypeCode::Not,
            ExprKind::EmptySet => TypeCode::EmptySet,
            ExprKind::UniversalSet => TypeCode::UniversalSet,
            ExprKind::FiniteSet(_) => TypeCode::FiniteSet,
            ExprKind::Interval(_) => TypeCode::Interval,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Exact rational value of an `Integer` or `Rational` node
    #[must_use]
    pub fn as_rational(&self) -> Option<BigRational> {
        match &self.kind {
            ExprKind::Integer(i) => Some(BigRational::from_integer(i.clone())),
            ExprKind::Rational(r) => Some(r.clone()),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_symbol(&self) -> Option<&Symbol> {
        match &self.kind {
            ExprKind::Symbol(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(&self.kind, ExprKind::Integer(i) if i.is_zero())
    }

    #[inline]
    #[must_use]
    pub fn is_one(&self) -> bool {
        matches!(&self.kind, ExprKind::Integer(i) if i.is_one())
    }

    /// Arguments of a function node (one-, two- or multi-argument)
    #[must_use]
    pub fn function_args(&self) -> Option<&[Arc<Self>]> {
        match &self.kind {
            ExprKind::OneArg(f) => Some(std::slice::from_ref(&f.arg)),
            ExprKind::TwoArg(f) => Some(&f.args),
            ExprKind::MultiArg(f) => Some(&f.args),
            _ => None,
        }
    }
}

// =============================================================================
// EXPRKIND
// =============================================================================

/// Payload of an expression node.
///
/// Families of kinds that share a payload shape (one-argument functions,
/// relationals, ...) share a variant; [`Expr::type_code`] tells them apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExprKind {
    Integer(BigInt),
    /// Never has denominator one; such values are `Integer`
    Rational(BigRational),
    Infty(Infty),
    NaN,
    Constant(Constant),
    Symbol(Symbol),
    Add(Add),
    Mul(Mul),
    Pow(Pow),
    OneArg(OneArgFunction),
    TwoArg(TwoArgFunction),
    MultiArg(MultiArgFunction),
    UIntPoly(UIntPoly),
    BooleanAtom(bool),
    Relational(Relational),
    And(Vec<Arc<Expr>>),
    Or(Vec<Arc<Expr>>),
    Not(Arc<Expr>),
    EmptySet,
    UniversalSet,
    FiniteSet(Vec<Arc<Expr>>),
    Interval(Interval),
}

// =============================================================================
// DROP - iterative, so very deep trees don't overflow the stack
// =============================================================================

impl Drop for Expr {
    fn drop(&mut self) {
        fn take_pair(pair: &mut [Arc<Expr>; 2], queue: &mut Vec<Arc<Expr>>) {
            for slot in pair {
                queue.push(std::mem::replace(slot, Arc::clone(&DUMMY_ARC)));
            }
        }

        fn drain_children(kind: &mut ExprKind, queue: &mut Vec<Arc<Expr>>) {
            match kind {
                ExprKind::Add(add) => {
                    queue.extend(std::mem::take(&mut add.dict).into_iter().map(|(t, _)| t));
                }
                ExprKind::Mul(mul) => {
                    for (base, exp) in std::mem::take(&mut mul.dict) {
                        queue.push(base);
                        queue.push(exp);
                    }
                }
                ExprKind::Pow(pow) => {
                    queue.push(std::mem::replace(&mut pow.base, Arc::clone(&DUMMY_ARC)));
                    queue.push(std::mem::replace(&mut pow.exp, Arc::clone(&DUMMY_ARC)));
                }
                ExprKind::OneArg(f) => {
                    queue.push(std::mem::replace(&mut f.arg, Arc::clone(&DUMMY_ARC)));
                }
                ExprKind::TwoArg(f) => take_pair(&mut f.args, queue),
                ExprKind::Relational(r) => take_pair(&mut r.args, queue),
                ExprKind::MultiArg(f) => queue.extend(std::mem::take(&mut f.args)),
                ExprKind::And(args) | ExprKind::Or(args) | ExprKind::FiniteSet(args) => {
                    queue.extend(std::mem::take(args));
                }
                ExprKind::Not(arg) => {
                    queue.push(std::mem::replace(arg, Arc::clone(&DUMMY_ARC)));
                }
                ExprKind::UIntPoly(poly) => {
                    queue.push(std::mem::replace(&mut poly.var, Arc::clone(&DUMMY_ARC)));
                }
                ExprKind::Interval(iv) => {
                    queue.push(std::mem::replace(&mut iv.start, Arc::clone(&DUMMY_ARC)));
                    queue.push(std::mem::replace(&mut iv.end, Arc::clone(&DUMMY_ARC)));
                }
                ExprKind::Integer(_)
                | ExprKind::Rational(_)
                | ExprKind::Infty(_)
                | ExprKind::NaN
                | ExprKind::Constant(_)
                | ExprKind::Symbol(_)
                | ExprKind::BooleanAtom(_)
                | ExprKind::EmptySet
                | ExprKind::UniversalSet => {}
            }
        }

        let mut work_queue = Vec::new();
        drain_children(&mut self.kind, &mut work_queue);

        while let Some(child_arc) = work_queue.pop() {
            if let Ok(mut child_expr) = Arc::try_unwrap(child_arc) {
                drain_children(&mut child_expr.kind, &mut work_queue);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, reason = "Standard test relaxations")]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality_ignores_identity() {
        let a = Expr::sin(Expr::symbol("x"));
        let b = Expr::sin(Expr::symbol("x"));
        assert!(!Expr::ptr_eq(&a, &b));
        assert_eq!(a, b);
        assert_eq!(a.structural_hash(), b.structural_hash());
    }

    #[test]
    fn test_type_codes() {
        let x = Expr::symbol("x");
        assert_eq!(x.type_code(), TypeCode::Symbol);
        assert_eq!(Expr::cos(x.clone()).type_code(), TypeCode::Cos);
        assert_eq!(
            Expr::function_symbol("f", [x.clone()]).type_code(),
            TypeCode::FunctionSymbol
        );
        assert_eq!(
            Expr::lt(x.clone(), Expr::integer(1)).type_code(),
            TypeCode::StrictLessThan
        );
        assert_eq!(Expr::nan().type_code(), TypeCode::NaN);
    }

    #[test]
    fn test_deep_tree_drop() {
        let mut e = Expr::symbol("x");
        for _ in 0..100_000 {
            e = Expr::sin(e);
        }
        drop(e);
    }

    #[test]
    fn test_function_args() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let f = Expr::atan2(x.clone(), y.clone());
        let args = f.function_args().unwrap();
        assert!(Expr::ptr_eq(&args[0], &x));
        assert!(Expr::ptr_eq(&args[1], &y));
        assert!(Expr::pow(x, y).function_args().is_none());
    }
}
