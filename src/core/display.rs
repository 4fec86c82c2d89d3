//! Display implementation for expressions.
//!
//! Plain infix notation:
//! - `1 + x + 2*y`
//! - `3*x^2`, `x^(1/2)`
//! - `sin(x)`, `f(x, y)`, `x < 1`
//! - `{1, 2}`, `[0, 1)`
//!
//! Sums print their constant first, then terms in canonical order, pulling a
//! negative coefficient out as ` - `.

use std::fmt;
use std::sync::Arc;

use num_rational::BigRational;
use num_traits::{One, Signed};

use crate::core::{Add, Expr, ExprKind, Infty, Mul};

// =============================================================================
// HELPERS
// =============================================================================

/// Needs parentheses as the base of a power or a factor of a product
fn is_compound(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Add(_) | ExprKind::Mul(_) | ExprKind::Pow(_) | ExprKind::Rational(_) => true,
        ExprKind::Integer(i) => i.is_negative(),
        ExprKind::Infty(Infty::Negative) => true,
        _ => false,
    }
}

/// Prints without parentheses as an exponent
fn is_simple_exponent(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Integer(i) => !i.is_negative(),
        ExprKind::Symbol(_) | ExprKind::Constant(_) => true,
        _ => false,
    }
}

fn write_wrapped(f: &mut fmt::Formatter<'_>, expr: &Expr, wrap: bool) -> fmt::Result {
    if wrap {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Arc<Expr>]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn write_rational(f: &mut fmt::Formatter<'_>, r: &BigRational) -> fmt::Result {
    if r.is_integer() {
        write!(f, "{}", r.numer())
    } else {
        write!(f, "{}/{}", r.numer(), r.denom())
    }
}

fn write_power(f: &mut fmt::Formatter<'_>, base: &Expr, exp: &Expr) -> fmt::Result {
    write_wrapped(f, base, is_compound(base))?;
    f.write_str("^")?;
    write_wrapped(f, exp, !is_simple_exponent(exp))
}

/// `|c|*term`, with the magnitude dropped when it is one
fn write_scaled_term(f: &mut fmt::Formatter<'_>, term: &Expr, magnitude: &BigRational) -> fmt::Result {
    if magnitude.is_one() {
        return write_wrapped(f, term, matches!(term.kind, ExprKind::Add(_)));
    }
    if magnitude.is_integer() {
        write_rational(f, magnitude)?;
    } else {
        f.write_str("(")?;
        write_rational(f, magnitude)?;
        f.write_str(")")?;
    }
    f.write_str("*")?;
    write_wrapped(f, term, matches!(term.kind, ExprKind::Add(_)))
}

fn write_add(f: &mut fmt::Formatter<'_>, add: &Add) -> fmt::Result {
    let mut first = true;
    if !num_traits::Zero::is_zero(&add.coef) {
        write_rational(f, &add.coef)?;
        first = false;
    }
    for (term, c) in &add.dict {
        let negative = c.is_negative();
        match (first, negative) {
            (true, true) => f.write_str("-")?,
            (true, false) => {}
            (false, true) => f.write_str(" - ")?,
            (false, false) => f.write_str(" + ")?,
        }
        write_scaled_term(f, term, &c.abs())?;
        first = false;
    }
    Ok(())
}

fn write_mul(f: &mut fmt::Formatter<'_>, mul: &Mul) -> fmt::Result {
    if mul.coef == -BigRational::one() {
        f.write_str("-")?;
    } else if !mul.coef.is_one() {
        if mul.coef.is_integer() {
            write_rational(f, &mul.coef)?;
        } else {
            f.write_str("(")?;
            write_rational(f, &mul.coef)?;
            f.write_str(")")?;
        }
        f.write_str("*")?;
    }
    for (i, (base, exp)) in mul.dict.iter().enumerate() {
        if i > 0 {
            f.write_str("*")?;
        }
        if exp.is_one() {
            write_wrapped(f, base, is_compound(base))?;
        } else {
            write_power(f, base, exp)?;
        }
    }
    Ok(())
}

// =============================================================================
// DISPLAY
// =============================================================================

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Integer(i) => write!(f, "{i}"),
            ExprKind::Rational(r) => write_rational(f, r),
            ExprKind::Infty(Infty::Positive) => f.write_str("oo"),
            ExprKind::Infty(Infty::Negative) => f.write_str("-oo"),
            ExprKind::Infty(Infty::Complex) => f.write_str("zoo"),
            ExprKind::NaN => f.write_str("nan"),
            ExprKind::Constant(c) => f.write_str(c.name()),
            ExprKind::Symbol(s) => write!(f, "{s}"),

            ExprKind::Add(add) => write_add(f, add),
            ExprKind::Mul(mul) => write_mul(f, mul),
            ExprKind::Pow(pow) => write_power(f, &pow.base, &pow.exp),

            ExprKind::OneArg(func) => write!(f, "{}({})", func.func.name(), func.arg),
            ExprKind::TwoArg(func) => {
                write!(f, "{}({}, {})", func.func.name(), func.args[0], func.args[1])
            }
            ExprKind::MultiArg(func) => {
                write!(f, "{}(", func.head.name())?;
                write_list(f, &func.args)?;
                f.write_str(")")
            }

            ExprKind::UIntPoly(poly) => {
                let mut first = true;
                for (degree, c) in poly.coeffs.iter().enumerate().rev() {
                    if num_traits::Zero::is_zero(c) {
                        continue;
                    }
                    match (first, c.is_negative()) {
                        (true, true) => f.write_str("-")?,
                        (true, false) => {}
                        (false, true) => f.write_str(" - ")?,
                        (false, false) => f.write_str(" + ")?,
                    }
                    let magnitude = c.abs();
                    let power = Expr::pow(Arc::clone(&poly.var), Expr::integer(degree));
                    if degree == 0 {
                        write!(f, "{magnitude}")?;
                    } else {
                        write_scaled_term(f, &power, &BigRational::from_integer(magnitude))?;
                    }
                    first = false;
                }
                if first {
                    f.write_str("0")?;
                }
                Ok(())
            }

            ExprKind::BooleanAtom(true) => f.write_str("True"),
            ExprKind::BooleanAtom(false) => f.write_str("False"),
            ExprKind::Relational(rel) => {
                write!(f, "{} {} {}", rel.args[0], rel.op.symbol(), rel.args[1])
            }
            ExprKind::And(args) => {
                f.write_str("And(")?;
                write_list(f, args)?;
                f.write_str(")")
            }
            ExprKind::Or(args) => {
                f.write_str("Or(")?;
                write_list(f, args)?;
                f.write_str(")")
            }
            ExprKind::Not(arg) => write!(f, "Not({arg})"),

            ExprKind::EmptySet => f.write_str("EmptySet"),
            ExprKind::UniversalSet => f.write_str("UniversalSet"),
            ExprKind::FiniteSet(elements) => {
                f.write_str("{")?;
                write_list(f, elements)?;
                f.write_str("}")
            }
            ExprKind::Interval(iv) => write!(
                f,
                "{}{}, {}{}",
                if iv.left_open { "(" } else { "[" },
                iv.start,
                iv.end,
                if iv.right_open { ")" } else { "]" }
            ),
        }
    }
}
