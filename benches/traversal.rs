//! Traversal and Rewrite Benchmark
//!
//! Benchmarks over expressions with many mixed terms (N >= 300):
//! full traversals, early-stopping search, free symbols and substitution.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;
use symb_visit::algorithms::{XReplace, coeff, count_nodes, free_symbols, has_symbol, xreplace};
use symb_visit::{ArcExprExt, Expr, symb};

// =============================================================================
// Expression Generator
// =============================================================================

/// Generates a mixed sum with N terms over `x` and a few other symbols
fn generate_mixed(n: usize) -> Arc<Expr> {
    let x = Expr::symbol("x");
    let y = Expr::symbol("y");
    let terms = (1..=n).map(|i| {
        let k = Expr::integer(i64::try_from(i).unwrap_or(i64::MAX));
        match i % 5 {
            // i*x^(i mod 10 + 1)
            0 => k.mul(&x.powi(i64::try_from(i % 10 + 1).unwrap_or(1))),
            // sin(i*x)*cos(y)
            1 => k.mul(&x).sin().mul(&y.cos()),
            // log(x + i)
            2 => x.add(&k).log(),
            // f(x, y + i)
            3 => Expr::function_symbol("f", [x.clone(), y.add(&k)]),
            // (max(x, i) - y)^2
            _ => Expr::max([x.clone(), k]).sub(&y).powi(2),
        }
    });
    Expr::sum(terms)
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");

    for n in [300, 1000] {
        let expr = generate_mixed(n);
        let x = symb("x");
        let missing = symb("missing");

        group.bench_with_input(BenchmarkId::new("count_nodes", n), &expr, |b, e| {
            b.iter(|| count_nodes(black_box(e)));
        });

        group.bench_with_input(BenchmarkId::new("has_symbol_hit", n), &expr, |b, e| {
            b.iter(|| has_symbol(black_box(e), black_box(&x)));
        });

        group.bench_with_input(BenchmarkId::new("has_symbol_miss", n), &expr, |b, e| {
            b.iter(|| has_symbol(black_box(e), black_box(&missing)));
        });

        group.bench_with_input(BenchmarkId::new("free_symbols", n), &expr, |b, e| {
            b.iter(|| free_symbols(black_box(e)));
        });
    }

    group.finish();
}

fn bench_rewrite(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewrite");

    for n in [300, 1000] {
        let expr = generate_mixed(n);
        let x = Expr::symbol("x");
        let two = Expr::integer(2);

        let subs_x = XReplace::new().with(Expr::symbol("x"), Expr::symbol("z"));
        let subs_missing = XReplace::new().with(Expr::symbol("missing"), Expr::integer(0));

        group.bench_with_input(BenchmarkId::new("xreplace_x", n), &expr, |b, e| {
            b.iter(|| xreplace(black_box(e), black_box(&subs_x)));
        });

        // Nothing matches, so nothing is rebuilt
        group.bench_with_input(BenchmarkId::new("xreplace_unchanged", n), &expr, |b, e| {
            b.iter(|| xreplace(black_box(e), black_box(&subs_missing)));
        });

        group.bench_with_input(BenchmarkId::new("coeff", n), &expr, |b, e| {
            b.iter(|| coeff(black_box(e), black_box(&x), black_box(&two)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_traversal, bench_rewrite);
criterion_main!(benches);
