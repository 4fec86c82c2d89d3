//! Double-dispatch visitor protocol.
//!
//! Dispatch happens in two steps: a node picks the operation matching its
//! own kind ([`Accept::accept`]), and the visitor supplies the behaviour for
//! that operation ([`Visitor`]). The operation set is generated from the
//! node-kind registry, so a kind added there must be handled by every
//! visitor, either directly or through the [`BaseVisitor`] adapter.
//!
//! Most algorithms implement [`BaseVisitor`] and only write handlers for the
//! kinds they care about:
//!
//! ```
//! use std::sync::Arc;
//! use symb_visit::visitor::{BaseVisitor, Handled, preorder_traversal};
//! use symb_visit::Expr;
//!
//! #[derive(Default)]
//! struct FunctionCounter {
//!     functions: usize,
//!     others: usize,
//! }
//!
//! impl BaseVisitor for FunctionCounter {
//!     fn bvisit_function(&mut self, _x: &Arc<Expr>, _args: &[Arc<Expr>]) -> Handled {
//!         self.functions += 1;
//!         Handled::Done
//!     }
//!
//!     fn bvisit_basic(&mut self, _x: &Arc<Expr>) {
//!         self.others += 1;
//!     }
//! }
//!
//! let x = Expr::symbol("x");
//! let e = Expr::sin(Expr::function_symbol("f", [x]));
//! let mut counter = FunctionCounter::default();
//! preorder_traversal(&e, &mut counter);
//! assert_eq!((counter.functions, counter.others), (2, 1));
//! ```

mod adapter;
mod traversal;

use std::sync::Arc;

use crate::core::kind::for_each_type_code;
use crate::core::{Expr, ExprKind, MultiArgHead, OneArgFn, RelOp, TwoArgFn};

pub use adapter::{BaseVisitor, Handled};
pub use traversal::{
    StopFlags, StopVisitor, postorder_traversal, postorder_traversal_stop, preorder_traversal,
    preorder_traversal_local_stop, preorder_traversal_stop,
};

macro_rules! define_visitor {
    ($( $code:ident : $parent:ident => $visit:ident, $bvisit:ident, $payload:ty; )*) => {
        /// One operation per concrete node kind.
        ///
        /// Each operation receives the shared node together with its typed
        /// payload. There are no default implementations; implement
        /// [`BaseVisitor`] instead to get fallback handling.
        pub trait Visitor {
            $(
                #[doc = concat!("Handle a `", stringify!($code), "` node")]
                fn $visit(&mut self, x: &Arc<Expr>, payload: &$payload);
            )*
        }
    };
}

for_each_type_code!(define_visitor);

/// Hands a node to a visitor, selecting the operation by the node's kind
pub trait Accept {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V);
}

impl Accept for Arc<Expr> {
    fn accept<V: Visitor + ?Sized>(&self, v: &mut V) {
        let x = self;
        match &self.kind {
            ExprKind::Integer(i) => v.visit_integer(x, i),
            ExprKind::Rational(r) => v.visit_rational(x, r),
            ExprKind::Infty(d) => v.visit_infty(x, d),
            ExprKind::NaN => v.visit_nan(x, &()),
            ExprKind::Constant(c) => v.visit_constant(x, c),
            ExprKind::Symbol(s) => v.visit_symbol(x, s),
            ExprKind::Add(add) => v.visit_add(x, add),
            ExprKind::Mul(mul) => v.visit_mul(x, mul),
            ExprKind::Pow(pow) => v.visit_pow(x, pow),
            ExprKind::OneArg(f) => match f.func {
                OneArgFn::Sin => v.visit_sin(x, f),
                OneArgFn::Cos => v.visit_cos(x, f),
                OneArgFn::Tan => v.visit_tan(x, f),
                OneArgFn::Log => v.visit_log(x, f),
                OneArgFn::Abs => v.visit_abs(x, f),
                OneArgFn::Gamma => v.visit_gamma(x, f),
            },
            ExprKind::TwoArg(f) => match f.func {
                TwoArgFn::ATan2 => v.visit_atan2(x, f),
                TwoArgFn::Beta => v.visit_beta(x, f),
            },
            ExprKind::MultiArg(f) => match f.head {
                MultiArgHead::Undefined(_) => v.visit_function_symbol(x, f),
                MultiArgHead::Max => v.visit_max(x, f),
                MultiArgHead::Min => v.visit_min(x, f),
            },
            ExprKind::UIntPoly(poly) => v.visit_uint_poly(x, poly),
            ExprKind::BooleanAtom(b) => v.visit_boolean_atom(x, b),
            ExprKind::Relational(r) => match r.op {
                RelOp::Eq => v.visit_equality(x, r),
                RelOp::Ne => v.visit_unequality(x, r),
                RelOp::Le => v.visit_less_than(x, r),
                RelOp::Lt => v.visit_strict_less_than(x, r),
            },
            ExprKind::And(args) => v.visit_and(x, args),
            ExprKind::Or(args) => v.visit_or(x, args),
            ExprKind::Not(arg) => v.visit_not(x, arg),
            ExprKind::EmptySet => v.visit_empty_set(x, &()),
            ExprKind::UniversalSet => v.visit_universal_set(x, &()),
            ExprKind::FiniteSet(elements) => v.visit_finite_set(x, elements),
            ExprKind::Interval(iv) => v.visit_interval(x, iv),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TypeCode;

    /// Implements the raw protocol for every kind, recording what it sees
    #[derive(Default)]
    struct KindRecorder {
        seen: Vec<TypeCode>,
    }

    macro_rules! record_every_kind {
        ($( $code:ident : $parent:ident => $visit:ident, $bvisit:ident, $payload:ty; )*) => {
            impl Visitor for KindRecorder {
                $(
                    fn $visit(&mut self, _x: &Arc<Expr>, _payload: &$payload) {
                        self.seen.push(TypeCode::$code);
                    }
                )*
            }
        };
    }

    for_each_type_code!(record_every_kind);

    fn one_of_each() -> Vec<Arc<Expr>> {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        vec![
            Expr::integer(7),
            Expr::rational(1, 3).unwrap_or_else(|_| Expr::zero()),
            Expr::infty(crate::core::Infty::Positive),
            Expr::nan(),
            Expr::constant(crate::core::Constant::Pi),
            x.clone(),
            Expr::sum([x.clone(), y.clone()]),
            Expr::product([x.clone(), y.clone()]),
            Expr::pow(x.clone(), y.clone()),
            Expr::sin(x.clone()),
            Expr::cos(x.clone()),
            Expr::tan(x.clone()),
            Expr::log(x.clone()),
            Expr::abs(x.clone()),
            Expr::gamma(x.clone()),
            Expr::atan2(x.clone(), y.clone()),
            Expr::beta(x.clone(), y.clone()),
            Expr::function_symbol("f", [x.clone()]),
            Expr::max([x.clone(), y.clone()]),
            Expr::min([x.clone(), y.clone()]),
            Expr::uint_poly(x.clone(), [1, 2]),
            Expr::boolean(true),
            Expr::equality(x.clone(), y.clone()),
            Expr::unequality(x.clone(), y.clone()),
            Expr::le(x.clone(), y.clone()),
            Expr::lt(x.clone(), y.clone()),
            Expr::and([Expr::boolean(true)]),
            Expr::or([Expr::boolean(false)]),
            Expr::not(Expr::boolean(true)),
            Expr::empty_set(),
            Expr::universal_set(),
            Expr::finite_set([x.clone()]),
            Expr::interval(x, y, true, false),
        ]
    }

    #[test]
    fn test_accept_selects_operation_by_kind() {
        let nodes = one_of_each();
        let mut recorder = KindRecorder::default();
        for node in &nodes {
            node.accept(&mut recorder);
        }
        let expected: Vec<TypeCode> = nodes.iter().map(|n| n.type_code()).collect();
        assert_eq!(recorder.seen, expected);
        assert_eq!(recorder.seen, TypeCode::ALL);
    }

    #[test]
    fn test_dyn_visitor() {
        let mut recorder = KindRecorder::default();
        let visitor: &mut dyn Visitor = &mut recorder;
        Expr::symbol("x").accept(visitor);
        assert_eq!(recorder.seen, vec![TypeCode::Symbol]);
    }
}
