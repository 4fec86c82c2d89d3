//! Method-style arithmetic on shared expression handles.
//!
//! `Arc<Expr>` is a foreign type, so the `+ - * /` operators can't be
//! implemented on it; [`ArcExprExt`] offers the same operations as methods.
//!
//! ```
//! use symb_visit::{ArcExprExt, Expr};
//!
//! let x = Expr::symbol("x");
//! let y = Expr::symbol("y");
//! let e = x.mul(&y).add(&x.powi(2));
//! assert_eq!(e.to_string(), "x*y + x^2");
//! ```

use std::sync::Arc;

use crate::core::Expr;

/// Arithmetic and function application on `Arc<Expr>`
pub trait ArcExprExt {
    #[must_use]
    fn add(&self, rhs: &Arc<Expr>) -> Arc<Expr>;
    #[must_use]
    fn sub(&self, rhs: &Arc<Expr>) -> Arc<Expr>;
    #[must_use]
    fn mul(&self, rhs: &Arc<Expr>) -> Arc<Expr>;
    #[must_use]
    fn div(&self, rhs: &Arc<Expr>) -> Arc<Expr>;
    #[must_use]
    fn neg(&self) -> Arc<Expr>;
    #[must_use]
    fn pow(&self, exp: &Arc<Expr>) -> Arc<Expr>;
    #[must_use]
    fn powi(&self, exp: i64) -> Arc<Expr>;
    #[must_use]
    fn sin(&self) -> Arc<Expr>;
    #[must_use]
    fn cos(&self) -> Arc<Expr>;
    #[must_use]
    fn log(&self) -> Arc<Expr>;
}

impl ArcExprExt for Arc<Expr> {
    fn add(&self, rhs: &Arc<Expr>) -> Arc<Expr> {
        Expr::sum([Arc::clone(self), Arc::clone(rhs)])
    }

    fn sub(&self, rhs: &Arc<Expr>) -> Arc<Expr> {
        Expr::sub(Arc::clone(self), Arc::clone(rhs))
    }

    fn mul(&self, rhs: &Arc<Expr>) -> Arc<Expr> {
        Expr::product([Arc::clone(self), Arc::clone(rhs)])
    }

    fn div(&self, rhs: &Arc<Expr>) -> Arc<Expr> {
        Expr::div(Arc::clone(self), Arc::clone(rhs))
    }

    fn neg(&self) -> Arc<Expr> {
        Expr::neg(Arc::clone(self))
    }

    fn pow(&self, exp: &Arc<Expr>) -> Arc<Expr> {
        Expr::pow(Arc::clone(self), Arc::clone(exp))
    }

    fn powi(&self, exp: i64) -> Arc<Expr> {
        Expr::pow(Arc::clone(self), Expr::integer(exp))
    }

    fn sin(&self) -> Arc<Expr> {
        Expr::sin(Arc::clone(self))
    }

    fn cos(&self) -> Arc<Expr> {
        Expr::cos(Arc::clone(self))
    }

    fn log(&self) -> Arc<Expr> {
        Expr::log(Arc::clone(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_methods_match_constructors() {
        let x = Expr::symbol("x");
        let two = Expr::integer(2);
        assert_eq!(x.add(&x), Expr::product([two.clone(), x.clone()]));
        assert!(x.sub(&x).is_zero());
        assert!(x.div(&x).is_one());
        assert_eq!(x.mul(&x), x.powi(2));
        assert_eq!(x.neg().neg(), x);
        assert_eq!(x.pow(&two).sin(), Expr::sin(Expr::pow(x.clone(), two)));
    }
}
