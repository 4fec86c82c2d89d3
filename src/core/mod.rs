//! Core types for symbolic expressions
//!
//! This module contains the fundamental types:
//! - `TypeCode` / `SuperKind` - the node-kind registry
//! - `Expr` / `ExprKind` - shared expression nodes and their payloads
//! - `Symbol` - interned symbols
//! - `DenseMatrix` - matrices of expressions
//! - `ArcExprExt` - method-style arithmetic on `Arc<Expr>`

mod display;
pub(crate) mod expr;
pub(crate) mod kind;
mod matrix;
mod operators;
pub(crate) mod symbol;

pub use expr::{
    Add, Constant, Expr, ExprKind, Infty, Interval, Mul, MultiArgFunction, MultiArgHead, OneArgFn,
    OneArgFunction, Pow, RelOp, Relational, TwoArgBasic, TwoArgFn, TwoArgFunction, UIntPoly,
    expr_cmp,
};
pub use kind::{HandlerSlot, SuperKind, SuperKinds, TypeCode};
pub use matrix::DenseMatrix;
pub use operators::ArcExprExt;
pub use symbol::{Symbol, symb, symb_dummy, symb_get, symbol_count};
