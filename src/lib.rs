//! Visitors and Traversals for Symbolic Expression Trees
//!
//! A small symbolic-expression core built around double dispatch: every
//! node kind is listed once in a registry, visitors get one operation per
//! kind, and an adapter lets an algorithm handle only the kinds it cares
//! about, falling back through super-kinds to a catch-all.
//!
//! # Features
//! - Node-kind registry with super-kind fallback (`Sin` → `OneArgFunction`
//!   → `Function` → `Basic`)
//! - Preorder and postorder traversals, with early termination and
//!   subtree pruning
//! - Reference algorithms: symbol search, coefficient extraction, free
//!   symbols, structural rewrite and substitution with subtree sharing
//! - Batch queries on the Rayon thread pool (`parallel` feature)
//!
//! # Usage Examples
//!
//! ```
//! use symb_visit::algorithms::{coeff, free_symbols, has_symbol};
//! use symb_visit::{ArcExprExt, Expr, symb};
//!
//! let x = Expr::symbol("x");
//! let y = Expr::symbol("y");
//! // 3*x^2 + 5*y
//! let e = Expr::integer(3)
//!     .mul(&x.powi(2))
//!     .add(&Expr::integer(5).mul(&y));
//!
//! assert!(has_symbol(&e, &symb("y")));
//! assert_eq!(coeff(&e, &x, &Expr::integer(2)), Expr::integer(3));
//! assert_eq!(free_symbols(&e).len(), 2);
//! ```

pub mod algorithms;
mod core;
mod error;
pub mod visitor;

#[cfg(feature = "parallel")]
pub mod parallel;

#[cfg(test)]
mod tests;

// Re-export key types for easier usage
pub use crate::core::{
    Add, ArcExprExt, Constant, DenseMatrix, Expr, ExprKind, HandlerSlot, Infty, Interval, Mul,
    MultiArgFunction, MultiArgHead, OneArgFn, OneArgFunction, Pow, RelOp, Relational, SuperKind,
    SuperKinds, Symbol, TwoArgBasic, TwoArgFn, TwoArgFunction, TypeCode, UIntPoly, expr_cmp, symb,
    symb_dummy, symb_get, symbol_count,
};
pub use error::ExprError;
