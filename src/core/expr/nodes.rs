//! Payload types for the node kinds that carry structure.

use std::sync::Arc;

use num_bigint::BigInt;
use num_rational::BigRational;

use super::Expr;
use super::constructors::{ProductBuilder, SumBuilder};
use crate::core::kind::TypeCode;

/// Direction of an infinity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Infty {
    Positive,
    Negative,
    /// Unsigned infinity
    Complex,
}

/// Named mathematical constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Constant {
    Pi,
    E,
    EulerGamma,
}

impl Constant {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "E",
            Self::EulerGamma => "EulerGamma",
        }
    }
}

// =============================================================================
// ADD / MUL / POW
// =============================================================================

/// Sum: `coef + c1*t1 + c2*t2 + ...`
///
/// Invariants: no zero coefficients, no numeric terms, at least two summands
/// overall (constant included), entries sorted by [`expr_cmp`](super::expr_cmp).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Add {
    pub(crate) coef: BigRational,
    pub(crate) dict: Vec<(Arc<Expr>, BigRational)>,
}

impl Add {
    /// Numeric constant term
    #[must_use]
    pub const fn coef(&self) -> &BigRational {
        &self.coef
    }

    /// `(term, coefficient)` entries
    #[must_use]
    pub fn dict(&self) -> &[(Arc<Expr>, BigRational)] {
        &self.dict
    }

    /// Build the canonical sum `coef + Σ c*t`.
    ///
    /// Terms may be arbitrary expressions; numbers fold into the constant,
    /// nested sums flatten and like terms merge.
    pub fn from_dict<I>(coef: BigRational, dict: I) -> Arc<Expr>
    where
        I: IntoIterator<Item = (Arc<Expr>, BigRational)>,
    {
        let mut builder = SumBuilder::with_constant(coef);
        for (term, c) in dict {
            builder.add_scaled(&term, &c);
        }
        builder.build()
    }
}

/// Product: `coef * b1^e1 * b2^e2 * ...`
///
/// Invariants: coefficient is non-zero, no zero exponents, no numeric base
/// with an integer exponent, entries sorted by [`expr_cmp`](super::expr_cmp).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mul {
    pub(crate) coef: BigRational,
    pub(crate) dict: Vec<(Arc<Expr>, Arc<Expr>)>,
}

impl Mul {
    /// Leading numeric coefficient
    #[must_use]
    pub const fn coef(&self) -> &BigRational {
        &self.coef
    }

    /// `(base, exponent)` entries
    #[must_use]
    pub fn dict(&self) -> &[(Arc<Expr>, Arc<Expr>)] {
        &self.dict
    }

    /// Build the canonical product `coef * Π b^e`
    pub fn from_dict<I>(coef: BigRational, dict: I) -> Arc<Expr>
    where
        I: IntoIterator<Item = (Arc<Expr>, Arc<Expr>)>,
    {
        let mut builder = ProductBuilder::with_coef(coef);
        for (base, exp) in dict {
            builder.mul(&Expr::pow(base, exp));
        }
        builder.build()
    }
}

/// `base ^ exp`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pow {
    pub(crate) base: Arc<Expr>,
    pub(crate) exp: Arc<Expr>,
}

impl Pow {
    #[must_use]
    pub const fn base(&self) -> &Arc<Expr> {
        &self.base
    }

    #[must_use]
    pub const fn exp(&self) -> &Arc<Expr> {
        &self.exp
    }
}

// =============================================================================
// FUNCTIONS
// =============================================================================

/// Built-in single-argument functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OneArgFn {
    Sin,
    Cos,
    Tan,
    Log,
    Abs,
    Gamma,
}

impl OneArgFn {
    #[must_use]
    pub const fn type_code(self) -> TypeCode {
        match self {
            Self::Sin => TypeCode::Sin,
            Self::Cos => TypeCode::Cos,
            Self::Tan => TypeCode::Tan,
            Self::Log => TypeCode::Log,
            Self::Abs => TypeCode::Abs,
            Self::Gamma => TypeCode::Gamma,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log => "log",
            Self::Abs => "abs",
            Self::Gamma => "gamma",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OneArgFunction {
    pub(crate) func: OneArgFn,
    pub(crate) arg: Arc<Expr>,
}

impl OneArgFunction {
    #[must_use]
    pub const fn func(&self) -> OneArgFn {
        self.func
    }

    #[must_use]
    pub const fn arg(&self) -> &Arc<Expr> {
        &self.arg
    }

    /// Same function applied to a new argument
    #[must_use]
    pub fn rebuild(&self, arg: Arc<Expr>) -> Arc<Expr> {
        Expr::one_arg(self.func, arg)
    }
}

/// Built-in two-argument functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TwoArgFn {
    ATan2,
    Beta,
}

impl TwoArgFn {
    #[must_use]
    pub const fn type_code(self) -> TypeCode {
        match self {
            Self::ATan2 => TypeCode::ATan2,
            Self::Beta => TypeCode::Beta,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ATan2 => "atan2",
            Self::Beta => "beta",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TwoArgFunction {
    pub(crate) func: TwoArgFn,
    pub(crate) args: [Arc<Expr>; 2],
}

impl TwoArgFunction {
    #[must_use]
    pub const fn func(&self) -> TwoArgFn {
        self.func
    }
}

/// Head of a variadic function application
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MultiArgHead {
    Max,
    Min,
    /// Undefined function `f(...)` known only by name
    Undefined(Arc<str>),
}

impl MultiArgHead {
    #[must_use]
    pub const fn type_code(&self) -> TypeCode {
        match self {
            Self::Max => TypeCode::Max,
            Self::Min => TypeCode::Min,
            Self::Undefined(_) => TypeCode::FunctionSymbol,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Max => "max",
            Self::Min => "min",
            Self::Undefined(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MultiArgFunction {
    pub(crate) head: MultiArgHead,
    pub(crate) args: Vec<Arc<Expr>>,
}

impl MultiArgFunction {
    #[must_use]
    pub const fn head(&self) -> &MultiArgHead {
        &self.head
    }

    #[must_use]
    pub fn args(&self) -> &[Arc<Expr>] {
        &self.args
    }

    /// Same head applied to new arguments
    #[must_use]
    pub fn rebuild(&self, args: Vec<Arc<Expr>>) -> Arc<Expr> {
        Expr::multi_arg(self.head.clone(), args)
    }
}

// =============================================================================
// RELATIONALS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RelOp {
    Eq,
    Ne,
    Le,
    Lt,
}

impl RelOp {
    #[must_use]
    pub const fn type_code(self) -> TypeCode {
        match self {
            Self::Eq => TypeCode::Equality,
            Self::Ne => TypeCode::Unequality,
            Self::Le => TypeCode::LessThan,
            Self::Lt => TypeCode::StrictLessThan,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Le => "<=",
            Self::Lt => "<",
        }
    }
}

/// `lhs op rhs`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relational {
    pub(crate) op: RelOp,
    pub(crate) args: [Arc<Expr>; 2],
}

impl Relational {
    #[must_use]
    pub const fn op(&self) -> RelOp {
        self.op
    }
}

/// Node kinds made of exactly two children plus fixed node-internal data.
///
/// Rewrite treats every implementor the same way: rewrite both children and
/// rebuild only if one of them changed.
pub trait TwoArgBasic {
    fn arg1(&self) -> &Arc<Expr>;
    fn arg2(&self) -> &Arc<Expr>;

    /// Same kind over new children
    fn rebuild(&self, arg1: Arc<Expr>, arg2: Arc<Expr>) -> Arc<Expr>;
}

impl TwoArgBasic for TwoArgFunction {
    fn arg1(&self) -> &Arc<Expr> {
        &self.args[0]
    }

    fn arg2(&self) -> &Arc<Expr> {
        &self.args[1]
    }

    fn rebuild(&self, arg1: Arc<Expr>, arg2: Arc<Expr>) -> Arc<Expr> {
        Expr::two_arg(self.func, arg1, arg2)
    }
}

impl TwoArgBasic for Relational {
    fn arg1(&self) -> &Arc<Expr> {
        &self.args[0]
    }

    fn arg2(&self) -> &Arc<Expr> {
        &self.args[1]
    }

    fn rebuild(&self, arg1: Arc<Expr>, arg2: Arc<Expr>) -> Arc<Expr> {
        Expr::relational(self.op, arg1, arg2)
    }
}

// =============================================================================
// POLYNOMIALS AND SETS
// =============================================================================

/// Dense univariate polynomial with integer coefficients.
///
/// `coeffs[i]` multiplies `var^i`; trailing zeros are trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UIntPoly {
    pub(crate) var: Arc<Expr>,
    pub(crate) coeffs: Vec<BigInt>,
}

impl UIntPoly {
    #[must_use]
    pub const fn var(&self) -> &Arc<Expr> {
        &self.var
    }

    #[must_use]
    pub fn coeffs(&self) -> &[BigInt] {
        &self.coeffs
    }

    /// Degree, `None` for the zero polynomial
    #[must_use]
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interval {
    pub(crate) start: Arc<Expr>,
    pub(crate) end: Arc<Expr>,
    pub(crate) left_open: bool,
    pub(crate) right_open: bool,
}

impl Interval {
    #[must_use]
    pub const fn start(&self) -> &Arc<Expr> {
        &self.start
    }

    #[must_use]
    pub const fn end(&self) -> &Arc<Expr> {
        &self.end
    }

    #[must_use]
    pub const fn left_open(&self) -> bool {
        self.left_open
    }

    #[must_use]
    pub const fn right_open(&self) -> bool {
        self.right_open
    }
}
