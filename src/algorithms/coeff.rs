//! Structural coefficient extraction.
//!
//! `coeff(b, x, n)` finds `c` such that `b` contains the additive term
//! `c * x^n`. Matching is structural and one level deep: a product matches
//! only if one of its factors is exactly `x^n`; nothing is expanded.

use std::sync::Arc;

use num_rational::BigRational;
use num_traits::Zero;

use crate::core::{Add, Expr, Mul, MultiArgFunction, Pow, Symbol};
use crate::visitor::{Accept, BaseVisitor, Handled};

/// Coefficient of `x^n`, computed by direct dispatch on the root
#[derive(Debug, Clone)]
pub struct CoeffVisitor {
    x: Arc<Expr>,
    n: Arc<Expr>,
    coeff: Arc<Expr>,
}

impl CoeffVisitor {
    #[must_use]
    pub fn new(x: Arc<Expr>, n: Arc<Expr>) -> Self {
        Self {
            x,
            n,
            coeff: Expr::zero(),
        }
    }

    pub fn apply(&mut self, b: &Arc<Expr>) -> Arc<Expr> {
        self.coeff = Expr::zero();
        b.accept(self);
        tracing::trace!(
            target: "symb_visit::coeff",
            expr = %b,
            x = %self.x,
            n = %self.n,
            coeff = %self.coeff,
            "coeff"
        );
        Arc::clone(&self.coeff)
    }

    fn unit_if(&mut self, matched: bool) {
        self.coeff = if matched { Expr::one() } else { Expr::zero() };
    }
}

impl BaseVisitor for CoeffVisitor {
    fn bvisit_add(&mut self, _x: &Arc<Expr>, add: &Add) -> Handled {
        // The numeric constant carries no factor x^n, even for n = 0
        let mut parts = Vec::with_capacity(add.dict().len());
        for (term, c) in add.dict() {
            term.accept(self);
            let part = std::mem::replace(&mut self.coeff, Expr::zero());
            if !part.is_zero() {
                parts.push((part, c.clone()));
            }
        }
        self.coeff = Add::from_dict(BigRational::zero(), parts);
        Handled::Done
    }

    fn bvisit_mul(&mut self, _x: &Arc<Expr>, mul: &Mul) -> Handled {
        let hit = mul
            .dict()
            .iter()
            .position(|(base, exp)| *base == self.x && *exp == self.n);
        self.coeff = match hit {
            Some(i) => Mul::from_dict(
                mul.coef().clone(),
                mul.dict()
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, (b, e))| (Arc::clone(b), Arc::clone(e))),
            ),
            None => Expr::zero(),
        };
        Handled::Done
    }

    fn bvisit_pow(&mut self, _x: &Arc<Expr>, pow: &Pow) -> Handled {
        let matched = *pow.base() == self.x && *pow.exp() == self.n;
        self.unit_if(matched);
        Handled::Done
    }

    fn bvisit_symbol(&mut self, x: &Arc<Expr>, _s: &Symbol) -> Handled {
        let matched = *x == self.x && self.n.is_one();
        self.unit_if(matched);
        Handled::Done
    }

    fn bvisit_function_symbol(&mut self, x: &Arc<Expr>, _f: &MultiArgFunction) -> Handled {
        let matched = *x == self.x && self.n.is_one();
        self.unit_if(matched);
        Handled::Done
    }

    fn bvisit_basic(&mut self, _x: &Arc<Expr>) {
        self.coeff = Expr::zero();
    }
}

/// Coefficient of `x^n` in `b`
#[must_use]
pub fn coeff(b: &Arc<Expr>, x: &Arc<Expr>, n: &Arc<Expr>) -> Arc<Expr> {
    CoeffVisitor::new(Arc::clone(x), Arc::clone(n)).apply(b)
}
