//! Parallel batch queries using Rayon
//!
//! Each expression gets its own visitor instance, so the queries run
//! independently on the thread pool; only the shared nodes cross threads.
//!
//! Enable with the `parallel` feature:
//! ```toml
//! symb_visit = { version = "0.1", features = ["parallel"] }
//! ```

use std::sync::Arc;

use rayon::prelude::*;

use crate::Expr;
use crate::algorithms::{FreeSymbolsVisitor, HasSymbolVisitor, SetBasic};
use crate::core::Symbol;

/// Free symbols of every expression, in input order
#[must_use]
pub fn free_symbols_batch(exprs: &[Arc<Expr>]) -> Vec<SetBasic> {
    tracing::debug!(target: "symb_visit::parallel", len = exprs.len(), "free_symbols_batch");
    exprs
        .par_iter()
        .map(|e| {
            let mut v = FreeSymbolsVisitor::new();
            v.apply(e);
            v.into_set()
        })
        .collect()
}

/// Whether `x` occurs in each expression, in input order
#[must_use]
pub fn has_symbol_batch(exprs: &[Arc<Expr>], x: &Symbol) -> Vec<bool> {
    tracing::debug!(
        target: "symb_visit::parallel",
        len = exprs.len(),
        symbol = %x,
        "has_symbol_batch"
    );
    exprs
        .par_iter()
        .map_init(|| HasSymbolVisitor::new(x.clone()), |v, e| v.apply(e))
        .collect()
}
