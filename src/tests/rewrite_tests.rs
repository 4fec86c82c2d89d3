//! Rewrite and substitution scenarios

use std::sync::Arc;

use super::init_tracing;
use crate::algorithms::{FnPolicy, Identity, TransformVisitor, XReplace, free_symbols, xreplace};
use crate::{ArcExprExt, DenseMatrix, Expr, ExprKind, TypeCode};

/// Balanced tree of nested function applications with `leaves` symbols
fn wide_tree(leaves: usize) -> Arc<Expr> {
    let mut level: Vec<Arc<Expr>> = (0..leaves)
        .map(|i| Expr::symbol(&format!("s{i}")))
        .collect();
    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| Expr::function_symbol("node", pair.to_vec()))
            .collect();
    }
    level.pop().unwrap_or_else(Expr::zero)
}

#[test]
fn test_single_leaf_change_rebuilds_one_path() {
    init_tracing();
    let tree = wide_tree(64);
    let subs = XReplace::new().with(Expr::symbol("s17"), Expr::symbol("changed"));
    let mut v = TransformVisitor::new(&subs);
    let out = v.apply(&tree);

    // Depth of a 64-leaf balanced tree
    assert_eq!(v.rebuilt(), 6);
    assert_ne!(out, tree);

    // Exactly one child per level differs from the input tree
    let mut old = tree;
    let mut new = out;
    while let (Some(old_args), Some(new_args)) = (old.function_args(), new.function_args()) {
        let changed: Vec<usize> = old_args
            .iter()
            .zip(new_args)
            .enumerate()
            .filter(|(_, (a, b))| !Expr::ptr_eq(a, b))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(changed.len(), 1);
        let i = changed[0];
        let (next_old, next_new) = (Arc::clone(&old_args[i]), Arc::clone(&new_args[i]));
        old = next_old;
        new = next_new;
    }
    assert_eq!(new.to_string(), "changed");
}

#[test]
fn test_identity_on_wide_tree() {
    let tree = wide_tree(100);
    let mut v = TransformVisitor::new(Identity);
    assert!(Expr::ptr_eq(&v.apply(&tree), &tree));
    assert_eq!(v.rebuilt(), 0);
}

#[test]
fn test_substitution_keeps_coefficients_and_heads() {
    init_tracing();
    let x = Expr::symbol("x");
    let y = Expr::symbol("y");
    // 3*x^2*y + max(x, 1) <= f(x)
    let lhs = Expr::integer(3)
        .mul(&x.powi(2))
        .mul(&y)
        .add(&Expr::max([x.clone(), Expr::integer(1)]));
    let e = Expr::le(lhs, Expr::function_symbol("f", [x.clone()]));

    let out = xreplace(&e, &XReplace::new().with(x, Expr::symbol("u")));
    assert_eq!(out.type_code(), TypeCode::LessThan);
    assert_eq!(out.to_string(), "3*u^2*y + max(u, 1) <= f(u)");
}

#[test]
fn test_substitution_folds_numbers() {
    let x = Expr::symbol("x");
    // 2*x + x^3 at x = 2
    let e = Expr::integer(2).mul(&x).add(&x.powi(3));
    let out = xreplace(&e, &XReplace::new().with(x, Expr::integer(2)));
    assert_eq!(out, Expr::integer(12));
}

#[test]
fn test_policy_sees_parents_before_children() {
    // Replace every one-argument function by its argument
    let strip = FnPolicy(|e: &Arc<Expr>| match &e.kind {
        ExprKind::OneArg(f) => Some(Arc::clone(f.arg())),
        _ => None,
    });
    let x = Expr::symbol("x");
    let e = Expr::function_symbol("f", [Expr::sin(Expr::cos(x.clone())), Expr::log(x)]);
    let out = TransformVisitor::new(strip).apply(&e);
    // The replacement for sin(cos(x)) is cos(x), which is not revisited
    assert_eq!(out.to_string(), "f(cos(x), x)");
}

#[test]
fn test_matrix_substitution_entrywise() {
    let x = Expr::symbol("x");
    let y = Expr::symbol("y");
    let m = DenseMatrix::new(2, 1, vec![x.sin(), x.add(&y)]).unwrap();
    let subs = XReplace::new().with(x, Expr::symbol("z"));
    let entries: Vec<_> = m.iter().map(|e| xreplace(e, &subs)).collect();
    let out = DenseMatrix::new(m.rows(), m.cols(), entries).unwrap();

    assert_eq!(out.get(0, 0).map(ToString::to_string).as_deref(), Some("sin(z)"));
    let names: Vec<String> = free_symbols(&out.get(1, 0).cloned().unwrap())
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(names, ["y", "z"]);
}
