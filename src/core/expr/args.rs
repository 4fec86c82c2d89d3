//! Child enumeration.

use std::sync::Arc;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use super::{Expr, ExprKind};

impl Expr {
    /// Ordered children of this node, as traversals see them.
    ///
    /// Sums list their non-zero constant first, then each term multiplied
    /// by its coefficient. Products list their coefficient when it isn't one,
    /// then `base^exp` per entry. Polynomials list their non-zero terms from
    /// the highest degree down. Leaves have no children.
    ///
    /// Children stored in the node are returned as clones of the same `Arc`s;
    /// composite children of sums, products and polynomials are built fresh.
    #[must_use]
    pub fn args(&self) -> Vec<Arc<Self>> {
        match &self.kind {
            ExprKind::Integer(_)
            | ExprKind::Rational(_)
            | ExprKind::Infty(_)
            | ExprKind::NaN
            | ExprKind::Constant(_)
            | ExprKind::Symbol(_)
            | ExprKind::BooleanAtom(_)
            | ExprKind::EmptySet
            | ExprKind::UniversalSet => Vec::new(),

            ExprKind::Add(add) => {
                let mut out = Vec::with_capacity(add.dict.len() + 1);
                if !add.coef.is_zero() {
                    out.push(Self::from_rational(add.coef.clone()));
                }
                for (term, c) in &add.dict {
                    out.push(scaled(term, c));
                }
                out
            }
            ExprKind::Mul(mul) => {
                let mut out = Vec::with_capacity(mul.dict.len() + 1);
                if !mul.coef.is_one() {
                    out.push(Self::from_rational(mul.coef.clone()));
                }
                for (base, exp) in &mul.dict {
                    out.push(Self::pow(Arc::clone(base), Arc::clone(exp)));
                }
                out
            }
            ExprKind::Pow(pow) => vec![Arc::clone(&pow.base), Arc::clone(&pow.exp)],

            ExprKind::OneArg(f) => vec![Arc::clone(&f.arg)],
            ExprKind::TwoArg(f) => f.args.to_vec(),
            ExprKind::MultiArg(f) => f.args.clone(),

            ExprKind::UIntPoly(poly) => poly
                .coeffs
                .iter()
                .enumerate()
                .rev()
                .filter(|(_, c)| !c.is_zero())
                .map(|(i, c)| {
                    Self::product([
                        Self::integer(c.clone()),
                        Self::pow(Arc::clone(&poly.var), Self::integer(BigInt::from(i))),
                    ])
                })
                .collect(),

            ExprKind::Relational(r) => r.args.to_vec(),
            ExprKind::And(args) | ExprKind::Or(args) | ExprKind::FiniteSet(args) => args.clone(),
            ExprKind::Not(arg) => vec![Arc::clone(arg)],
            ExprKind::Interval(iv) => vec![Arc::clone(&iv.start), Arc::clone(&iv.end)],
        }
    }
}

fn scaled(term: &Arc<Expr>, c: &BigRational) -> Arc<Expr> {
    if c.is_one() {
        Arc::clone(term)
    } else {
        Expr::product([Expr::from_rational(c.clone()), Arc::clone(term)])
    }
}
