//! Canonical total order on expressions.
//!
//! Kinds compare by their registry order first; nodes of the same kind
//! compare field by field, children recursively. The order agrees with
//! structural equality, so it can key sorted containers.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{Expr, ExprKind};

/// Compare two expressions in canonical order
#[must_use]
pub fn expr_cmp(a: &Expr, b: &Expr) -> Ordering {
    if std::ptr::eq(a, b) {
        return Ordering::Equal;
    }
    a.type_code()
        .cmp(&b.type_code())
        .then_with(|| payload_cmp(&a.kind, &b.kind))
}

fn args_cmp(a: &[Arc<Expr>], b: &[Arc<Expr>]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| {
        a.iter()
            .zip(b)
            .map(|(x, y)| expr_cmp(x, y))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

fn dict_cmp<V, F>(a: &[(Arc<Expr>, V)], b: &[(Arc<Expr>, V)], value_cmp: F) -> Ordering
where
    F: Fn(&V, &V) -> Ordering,
{
    a.len().cmp(&b.len()).then_with(|| {
        a.iter()
            .zip(b)
            .map(|((k1, v1), (k2, v2))| expr_cmp(k1, k2).then_with(|| value_cmp(v1, v2)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

// Only called with payloads of the same type code
fn payload_cmp(a: &ExprKind, b: &ExprKind) -> Ordering {
    match (a, b) {
        (ExprKind::Integer(x), ExprKind::Integer(y)) => x.cmp(y),
        (ExprKind::Rational(x), ExprKind::Rational(y)) => x.cmp(y),
        (ExprKind::Infty(x), ExprKind::Infty(y)) => x.cmp(y),
        (ExprKind::Constant(x), ExprKind::Constant(y)) => x.cmp(y),
        (ExprKind::Symbol(x), ExprKind::Symbol(y)) => x.cmp(y),
        (ExprKind::BooleanAtom(x), ExprKind::BooleanAtom(y)) => x.cmp(y),

        (ExprKind::Add(x), ExprKind::Add(y)) => x
            .coef
            .cmp(&y.coef)
            .then_with(|| dict_cmp(&x.dict, &y.dict, Ord::cmp)),
        (ExprKind::Mul(x), ExprKind::Mul(y)) => x
            .coef
            .cmp(&y.coef)
            .then_with(|| dict_cmp(&x.dict, &y.dict, |e1, e2| expr_cmp(e1, e2))),
        (ExprKind::Pow(x), ExprKind::Pow(y)) => {
            expr_cmp(&x.base, &y.base).then_with(|| expr_cmp(&x.exp, &y.exp))
        }

        (ExprKind::OneArg(x), ExprKind::OneArg(y)) => expr_cmp(&x.arg, &y.arg),
        (ExprKind::TwoArg(x), ExprKind::TwoArg(y)) => args_cmp(&x.args, &y.args),
        (ExprKind::MultiArg(x), ExprKind::MultiArg(y)) => x
            .head
            .cmp(&y.head)
            .then_with(|| args_cmp(&x.args, &y.args)),

        (ExprKind::UIntPoly(x), ExprKind::UIntPoly(y)) => expr_cmp(&x.var, &y.var)
            .then_with(|| x.coeffs.len().cmp(&y.coeffs.len()))
            .then_with(|| x.coeffs.cmp(&y.coeffs)),

        (ExprKind::Relational(x), ExprKind::Relational(y)) => args_cmp(&x.args, &y.args),
        (ExprKind::And(x), ExprKind::And(y))
        | (ExprKind::Or(x), ExprKind::Or(y))
        | (ExprKind::FiniteSet(x), ExprKind::FiniteSet(y)) => args_cmp(x, y),
        (ExprKind::Not(x), ExprKind::Not(y)) => expr_cmp(x, y),
        (ExprKind::Interval(x), ExprKind::Interval(y)) => expr_cmp(&x.start, &y.start)
            .then_with(|| expr_cmp(&x.end, &y.end))
            .then_with(|| x.left_open.cmp(&y.left_open))
            .then_with(|| x.right_open.cmp(&y.right_open)),

        _ => Ordering::Equal,
    }
}
