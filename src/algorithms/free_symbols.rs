//! Free-variable and function-symbol collection.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::core::{DenseMatrix, Expr, HandlerSlot, MultiArgFunction, Symbol, TypeCode, UIntPoly};
use crate::visitor::{
    BaseVisitor, Handled, StopFlags, StopVisitor, preorder_traversal, preorder_traversal_local_stop,
};

/// Set of expressions in canonical order, duplicates collapsed structurally
pub type SetBasic = BTreeSet<Arc<Expr>>;

// =============================================================================
// FREE SYMBOLS
// =============================================================================

/// Collects every symbol node reachable from the visited trees
#[derive(Debug, Default, Clone)]
pub struct FreeSymbolsVisitor {
    s: SetBasic,
}

impl FreeSymbolsVisitor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the symbols of `b` to the collected set
    pub fn apply(&mut self, b: &Arc<Expr>) -> &SetBasic {
        preorder_traversal(b, self);
        &self.s
    }

    #[must_use]
    pub fn into_set(self) -> SetBasic {
        self.s
    }
}

impl BaseVisitor for FreeSymbolsVisitor {
    fn bvisit_symbol(&mut self, x: &Arc<Expr>, _s: &Symbol) -> Handled {
        self.s.insert(Arc::clone(x));
        Handled::Done
    }

    // The generator counts even when no term mentions it
    fn bvisit_uint_poly(&mut self, _x: &Arc<Expr>, poly: &UIntPoly) -> Handled {
        preorder_traversal(poly.var(), self);
        Handled::Done
    }

    fn bvisit_basic(&mut self, _x: &Arc<Expr>) {}
}

/// Symbols occurring in `b`
#[must_use]
pub fn free_symbols(b: &Arc<Expr>) -> SetBasic {
    let mut v = FreeSymbolsVisitor::new();
    v.apply(b);
    let set = v.into_set();
    tracing::trace!(target: "symb_visit::free_symbols", expr = %b, count = set.len(), "free_symbols");
    set
}

/// Symbols occurring in any entry of `m`
#[must_use]
pub fn free_symbols_matrix(m: &DenseMatrix) -> SetBasic {
    let mut v = FreeSymbolsVisitor::new();
    for entry in m.iter() {
        v.apply(entry);
    }
    let set = v.into_set();
    tracing::trace!(
        target: "symb_visit::free_symbols",
        rows = m.rows(),
        cols = m.cols(),
        count = set.len(),
        "free_symbols_matrix"
    );
    set
}

// =============================================================================
// FUNCTION SYMBOLS
// =============================================================================

/// Collects applications of undefined functions, `f(x)` style
#[derive(Debug, Default, Clone)]
pub struct FunctionSymbolsVisitor {
    s: SetBasic,
}

impl FunctionSymbolsVisitor {
    pub fn apply(&mut self, b: &Arc<Expr>) -> &SetBasic {
        preorder_traversal(b, self);
        &self.s
    }

    #[must_use]
    pub fn into_set(self) -> SetBasic {
        self.s
    }
}

impl BaseVisitor for FunctionSymbolsVisitor {
    fn bvisit_function_symbol(&mut self, x: &Arc<Expr>, _f: &MultiArgFunction) -> Handled {
        self.s.insert(Arc::clone(x));
        Handled::Done
    }

    fn bvisit_basic(&mut self, _x: &Arc<Expr>) {}
}

/// Undefined-function applications occurring in `b`, nested ones included
#[must_use]
pub fn function_symbols(b: &Arc<Expr>) -> SetBasic {
    let mut v = FunctionSymbolsVisitor::default();
    v.apply(b);
    v.into_set()
}

// =============================================================================
// FREE SYMBOLS OUTSIDE A KIND
// =============================================================================

/// Collects symbols while skipping every subtree rooted at a node of the
/// excluded kind or super-kind
#[derive(Debug, Clone)]
pub struct FreeSymbolsExcluding {
    excluded: HandlerSlot,
    s: SetBasic,
    flags: StopFlags,
}

impl FreeSymbolsExcluding {
    #[must_use]
    pub fn new(excluded: impl Into<HandlerSlot>) -> Self {
        Self {
            excluded: excluded.into(),
            s: SetBasic::new(),
            flags: StopFlags::default(),
        }
    }

    pub fn apply(&mut self, b: &Arc<Expr>) -> &SetBasic {
        self.flags.reset();
        let flow = preorder_traversal_local_stop(b, self);
        // Only local_stop is ever set here
        debug_assert!(flow.is_continue());
        &self.s
    }

    #[must_use]
    pub fn into_set(self) -> SetBasic {
        self.s
    }
}

impl BaseVisitor for FreeSymbolsExcluding {
    fn bvisit_symbol(&mut self, x: &Arc<Expr>, _s: &Symbol) -> Handled {
        if !self.excluded.covers(TypeCode::Symbol) {
            self.s.insert(Arc::clone(x));
        }
        Handled::Done
    }

    fn bvisit_basic(&mut self, x: &Arc<Expr>) {
        if self.excluded.covers(x.type_code()) {
            self.flags.local_stop = true;
        }
    }
}

impl StopVisitor for FreeSymbolsExcluding {
    fn flags(&self) -> StopFlags {
        self.flags
    }

    fn flags_mut(&mut self) -> &mut StopFlags {
        &mut self.flags
    }
}

/// Symbols of `b` that occur outside every node matching `excluded`, which
/// is either a single [`TypeCode`] or a whole [`SuperKind`](crate::SuperKind)
#[must_use]
pub fn free_symbols_excluding(b: &Arc<Expr>, excluded: impl Into<HandlerSlot>) -> SetBasic {
    let mut v = FreeSymbolsExcluding::new(excluded);
    v.apply(b);
    v.into_set()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Standard test relaxations")]
mod tests {
    use super::*;
    use crate::core::SuperKind;

    fn set(items: &[&Arc<Expr>]) -> SetBasic {
        items.iter().map(|e| Arc::clone(*e)).collect()
    }

    #[test]
    fn test_free_symbols() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let e = Expr::sum([
            x.clone(),
            Expr::function_symbol("f", [y.clone()]),
            Expr::integer(2),
        ]);
        let s = free_symbols(&e);
        assert_eq!(s.len(), 2);
        assert_eq!(s, set(&[&x, &y]));
    }

    #[test]
    fn test_duplicates_collapse() {
        // Separately built nodes for the same symbol are one element
        let e = Expr::product([
            Expr::sin(Expr::symbol("x")),
            Expr::cos(Expr::symbol("x")),
        ]);
        assert_eq!(free_symbols(&e).len(), 1);
    }

    #[test]
    fn test_free_symbols_of_constant_poly_has_generator() {
        let t = Expr::symbol("t");
        let p = Expr::uint_poly(t.clone(), [5]);
        assert_eq!(free_symbols(&p), set(&[&t]));
    }

    #[test]
    fn test_free_symbols_matrix() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let m = DenseMatrix::new(
            2,
            2,
            vec![
                x.clone(),
                Expr::integer(0),
                Expr::integer(1),
                Expr::pow(y.clone(), x.clone()),
            ],
        )
        .unwrap();
        assert_eq!(free_symbols_matrix(&m), set(&[&x, &y]));
    }

    #[test]
    fn test_function_symbols() {
        let x = Expr::symbol("x");
        let gx = Expr::function_symbol("g", [x.clone()]);
        let fgx = Expr::function_symbol("f", [gx.clone()]);
        let e = Expr::sum([fgx.clone(), Expr::sin(x)]);
        assert_eq!(function_symbols(&e), set(&[&fgx, &gx]));
    }

    #[test]
    fn test_excluding_prunes_subtrees() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let z = Expr::symbol("z");
        let e = Expr::sum([
            x.clone(),
            Expr::sin(y.clone()),
            Expr::function_symbol("f", [z.clone()]),
        ]);
        assert_eq!(
            free_symbols_excluding(&e, SuperKind::OneArgFunction),
            set(&[&x, &z])
        );
        assert_eq!(free_symbols_excluding(&e, SuperKind::Function), set(&[&x]));
        assert_eq!(
            free_symbols_excluding(&e, SuperKind::Set),
            set(&[&x, &y, &z])
        );
        assert!(free_symbols_excluding(&e, SuperKind::Basic).is_empty());
    }

    #[test]
    fn test_excluding_relationals_inside_logic() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let e = Expr::and([
            Expr::lt(x.clone(), Expr::integer(1)),
            Expr::function_symbol("p", [y.clone()]),
        ]);
        assert_eq!(
            free_symbols_excluding(&e, SuperKind::Relational),
            set(&[&y])
        );
    }

    #[test]
    fn test_excluding_a_single_kind() {
        let t = Expr::symbol("t");
        let x = Expr::symbol("x");
        let e = Expr::function_symbol("h", [Expr::uint_poly(t.clone(), [1, 2]), x.clone()]);
        assert_eq!(free_symbols_excluding(&e, TypeCode::UIntPoly), set(&[&x]));
        assert_eq!(free_symbols_excluding(&e, TypeCode::Sin), set(&[&t, &x]));
        assert!(free_symbols_excluding(&e, TypeCode::Symbol).is_empty());
    }
}
