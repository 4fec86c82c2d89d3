//! Traversal-based algorithms.
//!
//! Each algorithm is a visitor type with an `apply` method plus a free
//! function wrapping the common call. New algorithms are written the same
//! way: implement [`BaseVisitor`](crate::visitor::BaseVisitor) for the kinds
//! that matter and pick a traversal.

mod coeff;
mod count;
mod free_symbols;
mod has_symbol;
mod rewrite;

pub use coeff::{CoeffVisitor, coeff};
pub use count::{NodeCounter, count_nodes};
pub use free_symbols::{
    FreeSymbolsExcluding, FreeSymbolsVisitor, FunctionSymbolsVisitor, SetBasic, free_symbols,
    free_symbols_excluding, free_symbols_matrix, function_symbols,
};
pub use has_symbol::{HasSymbolVisitor, has_symbol};
pub use rewrite::{FnPolicy, Identity, RewritePolicy, TransformVisitor, XReplace, xreplace};
