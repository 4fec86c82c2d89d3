//! Expression constructors.
//!
//! Every constructor returns a shared, canonical node. Sums and products are
//! accumulated in hash maps and sorted once at the end.

use std::collections::hash_map::Entry;
use std::sync::{Arc, LazyLock};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use rustc_hash::FxHashMap;

use super::nodes::{
    Add, Constant, Infty, Interval, Mul, MultiArgFunction, MultiArgHead, OneArgFn,
    OneArgFunction, Pow, RelOp, Relational, TwoArgFn, TwoArgFunction, UIntPoly,
};
use super::{Expr, ExprKind, expr_cmp};
use crate::core::symbol::{Symbol, symb, symb_dummy};
use crate::error::ExprError;

static ZERO: LazyLock<Arc<Expr>> =
    LazyLock::new(|| Arc::new(Expr::new(ExprKind::Integer(BigInt::zero()))));
static ONE: LazyLock<Arc<Expr>> =
    LazyLock::new(|| Arc::new(Expr::new(ExprKind::Integer(BigInt::one()))));
static MINUS_ONE: LazyLock<Arc<Expr>> =
    LazyLock::new(|| Arc::new(Expr::new(ExprKind::Integer(-BigInt::one()))));

#[inline]
fn shared(kind: ExprKind) -> Arc<Expr> {
    Arc::new(Expr::new(kind))
}

// =============================================================================
// SUM / PRODUCT ACCUMULATORS
// =============================================================================

/// Collects `constant + Σ c*t` and emits the canonical node
pub(crate) struct SumBuilder {
    constant: BigRational,
    terms: FxHashMap<Arc<Expr>, BigRational>,
}

impl SumBuilder {
    pub(crate) fn with_constant(constant: BigRational) -> Self {
        Self {
            constant,
            terms: FxHashMap::default(),
        }
    }

    pub(crate) fn add(&mut self, x: &Arc<Expr>) {
        self.add_scaled(x, &BigRational::one());
    }

    /// Add `c * x`
    pub(crate) fn add_scaled(&mut self, x: &Arc<Expr>, c: &BigRational) {
        if c.is_zero() {
            return;
        }
        match &x.kind {
            ExprKind::Integer(_) | ExprKind::Rational(_) => {
                if let Some(v) = x.as_rational() {
                    self.constant += c * v;
                }
            }
            ExprKind::Add(add) => {
                self.constant += c * &add.coef;
                for (term, tc) in &add.dict {
                    self.insert(term, c * tc);
                }
            }
            // 3*x*y contributes x*y with coefficient 3
            ExprKind::Mul(mul) if !mul.coef.is_one() => {
                let term = Mul::from_dict(BigRational::one(), mul.dict.iter().cloned());
                self.insert(&term, c * &mul.coef);
            }
            _ => self.insert(x, c.clone()),
        }
    }

    fn insert(&mut self, term: &Arc<Expr>, c: BigRational) {
        *self
            .terms
            .entry(Arc::clone(term))
            .or_insert_with(BigRational::zero) += c;
    }

    pub(crate) fn build(self) -> Arc<Expr> {
        let mut dict: Vec<(Arc<Expr>, BigRational)> = self
            .terms
            .into_iter()
            .filter(|(_, c)| !c.is_zero())
            .collect();

        if dict.is_empty() {
            return Expr::from_rational(self.constant);
        }
        if self.constant.is_zero()
            && dict.len() == 1
            && let Some((term, c)) = dict.pop()
        {
            if c.is_one() {
                return term;
            }
            return Expr::product([Expr::from_rational(c), term]);
        }

        dict.sort_by(|a, b| expr_cmp(&a.0, &b.0));
        shared(ExprKind::Add(Add {
            coef: self.constant,
            dict,
        }))
    }
}

/// Collects `coef * Π b^e` and emits the canonical node
pub(crate) struct ProductBuilder {
    coef: BigRational,
    factors: FxHashMap<Arc<Expr>, Arc<Expr>>,
}

impl ProductBuilder {
    pub(crate) fn with_coef(coef: BigRational) -> Self {
        Self {
            coef,
            factors: FxHashMap::default(),
        }
    }

    pub(crate) fn mul(&mut self, x: &Arc<Expr>) {
        match &x.kind {
            ExprKind::Integer(_) | ExprKind::Rational(_) => {
                if let Some(v) = x.as_rational() {
                    self.coef *= v;
                }
            }
            ExprKind::Mul(mul) => {
                self.coef *= &mul.coef;
                for (base, exp) in &mul.dict {
                    self.insert(base, exp);
                }
            }
            ExprKind::Pow(pow) => self.insert(&pow.base, &pow.exp),
            _ => self.insert(x, &ONE),
        }
    }

    fn insert(&mut self, base: &Arc<Expr>, exp: &Arc<Expr>) {
        match self.factors.entry(Arc::clone(base)) {
            Entry::Occupied(mut slot) => {
                let merged = Expr::sum([Arc::clone(slot.get()), Arc::clone(exp)]);
                slot.insert(merged);
            }
            Entry::Vacant(slot) => {
                slot.insert(Arc::clone(exp));
            }
        }
    }

    pub(crate) fn build(self) -> Arc<Expr> {
        let mut coef = self.coef;
        if coef.is_zero() {
            return Expr::zero();
        }

        let mut dict = Vec::with_capacity(self.factors.len());
        for (base, exp) in self.factors {
            if exp.is_zero() {
                continue;
            }
            if let Some(value) = numeric_power(&base, &exp) {
                coef *= value;
                continue;
            }
            dict.push((base, exp));
        }

        if coef.is_zero() {
            return Expr::zero();
        }
        if dict.is_empty() {
            return Expr::from_rational(coef);
        }
        if coef.is_one()
            && dict.len() == 1
            && let Some((base, exp)) = dict.pop()
        {
            return Expr::pow(base, exp);
        }

        dict.sort_by(|a, b| expr_cmp(&a.0, &b.0));
        shared(ExprKind::Mul(Mul { coef, dict }))
    }
}

/// `base^exp` as an exact rational when base is a number and exp a small
/// integer. `0^-n` is left unevaluated.
fn numeric_power(base: &Expr, exp: &Expr) -> Option<BigRational> {
    let ExprKind::Integer(n) = &exp.kind else {
        return None;
    };
    let b = base.as_rational()?;
    let n = n.to_i32()?;
    if b.is_zero() && n < 0 {
        return None;
    }
    Some(b.pow(n))
}

// =============================================================================
// CONSTRUCTORS
// =============================================================================

impl Expr {
    // -------------------------------------------------------------------------
    // Numbers
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn zero() -> Arc<Self> {
        Arc::clone(&ZERO)
    }

    #[must_use]
    pub fn one() -> Arc<Self> {
        Arc::clone(&ONE)
    }

    #[must_use]
    pub fn minus_one() -> Arc<Self> {
        Arc::clone(&MINUS_ONE)
    }

    pub fn integer(value: impl Into<BigInt>) -> Arc<Self> {
        shared(ExprKind::Integer(value.into()))
    }

    /// Exact rational; values with denominator one become `Integer`
    #[must_use]
    pub fn from_rational(value: BigRational) -> Arc<Self> {
        if value.is_integer() {
            shared(ExprKind::Integer(value.to_integer()))
        } else {
            shared(ExprKind::Rational(value))
        }
    }

    /// `num / den` in lowest terms
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::DivisionByZero`] if `den` is zero.
    pub fn rational(
        num: impl Into<BigInt>,
        den: impl Into<BigInt>,
    ) -> Result<Arc<Self>, ExprError> {
        let den = den.into();
        if den.is_zero() {
            return Err(ExprError::DivisionByZero);
        }
        Ok(Self::from_rational(BigRational::new(num.into(), den)))
    }

    #[must_use]
    pub fn infty(direction: Infty) -> Arc<Self> {
        shared(ExprKind::Infty(direction))
    }

    #[must_use]
    pub fn nan() -> Arc<Self> {
        shared(ExprKind::NaN)
    }

    #[must_use]
    pub fn constant(c: Constant) -> Arc<Self> {
        shared(ExprKind::Constant(c))
    }

    // -------------------------------------------------------------------------
    // Symbols
    // -------------------------------------------------------------------------

    /// Symbol node for the interned name
    #[must_use]
    pub fn symbol(name: &str) -> Arc<Self> {
        Self::from_symbol(symb(name))
    }

    /// Symbol node for a fresh dummy symbol
    #[must_use]
    pub fn dummy(name: &str) -> Arc<Self> {
        Self::from_symbol(symb_dummy(name))
    }

    #[must_use]
    pub fn from_symbol(sym: Symbol) -> Arc<Self> {
        shared(ExprKind::Symbol(sym))
    }

    // -------------------------------------------------------------------------
    // Arithmetic
    // -------------------------------------------------------------------------

    /// Canonical sum. An empty input gives `0`.
    pub fn sum<I>(terms: I) -> Arc<Self>
    where
        I: IntoIterator<Item = Arc<Self>>,
    {
        let mut builder = SumBuilder::with_constant(BigRational::zero());
        for term in terms {
            builder.add(&term);
        }
        builder.build()
    }

    /// Canonical product. An empty input gives `1`.
    pub fn product<I>(factors: I) -> Arc<Self>
    where
        I: IntoIterator<Item = Arc<Self>>,
    {
        let mut builder = ProductBuilder::with_coef(BigRational::one());
        for factor in factors {
            builder.mul(&factor);
        }
        builder.build()
    }

    #[must_use]
    pub fn neg(x: Arc<Self>) -> Arc<Self> {
        Self::product([Self::minus_one(), x])
    }

    #[must_use]
    pub fn sub(a: Arc<Self>, b: Arc<Self>) -> Arc<Self> {
        Self::sum([a, Self::neg(b)])
    }

    #[must_use]
    pub fn div(a: Arc<Self>, b: Arc<Self>) -> Arc<Self> {
        Self::product([a, Self::pow(b, Self::minus_one())])
    }

    /// Canonical power.
    ///
    /// Folds `x^0`, `x^1`, `1^x`, numeric bases with integer exponents,
    /// `(b^e)^n` and `(c*Π b^e)^n` for integer `n`.
    #[must_use]
    pub fn pow(base: Arc<Self>, exp: Arc<Self>) -> Arc<Self> {
        if exp.is_zero() || base.is_one() {
            return Self::one();
        }
        if exp.is_one() {
            return base;
        }
        if let ExprKind::Integer(n) = &exp.kind {
            if let Some(value) = numeric_power(&base, &exp) {
                return Self::from_rational(value);
            }
            match &base.kind {
                ExprKind::Pow(inner) => {
                    return Self::pow(
                        Arc::clone(&inner.base),
                        Self::product([Arc::clone(&inner.exp), Arc::clone(&exp)]),
                    );
                }
                ExprKind::Mul(mul) => {
                    if let Some(k) = n.to_i32()
                        && !(k < 0 && mul.coef.is_zero())
                    {
                        let mut builder = ProductBuilder::with_coef(mul.coef.pow(k));
                        for (b, e) in &mul.dict {
                            builder.mul(&Self::pow(
                                Arc::clone(b),
                                Self::product([Arc::clone(e), Arc::clone(&exp)]),
                            ));
                        }
                        return builder.build();
                    }
                }
                _ => {}
            }
        }
        shared(ExprKind::Pow(Pow { base, exp }))
    }

    // -------------------------------------------------------------------------
    // Functions
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn one_arg(func: OneArgFn, arg: Arc<Self>) -> Arc<Self> {
        shared(ExprKind::OneArg(OneArgFunction { func, arg }))
    }

    #[must_use]
    pub fn sin(arg: Arc<Self>) -> Arc<Self> {
        Self::one_arg(OneArgFn::Sin, arg)
    }

    #[must_use]
    pub fn cos(arg: Arc<Self>) -> Arc<Self> {
        Self::one_arg(OneArgFn::Cos, arg)
    }

    #[must_use]
    pub fn tan(arg: Arc<Self>) -> Arc<Self> {
        Self::one_arg(OneArgFn::Tan, arg)
    }

    #[must_use]
    pub fn log(arg: Arc<Self>) -> Arc<Self> {
        Self::one_arg(OneArgFn::Log, arg)
    }

    #[must_use]
    pub fn abs(arg: Arc<Self>) -> Arc<Self> {
        Self::one_arg(OneArgFn::Abs, arg)
    }

    #[must_use]
    pub fn gamma(arg: Arc<Self>) -> Arc<Self> {
        Self::one_arg(OneArgFn::Gamma, arg)
    }

    #[must_use]
    pub fn two_arg(func: TwoArgFn, a: Arc<Self>, b: Arc<Self>) -> Arc<Self> {
        shared(ExprKind::TwoArg(TwoArgFunction { func, args: [a, b] }))
    }

    #[must_use]
    pub fn atan2(y: Arc<Self>, x: Arc<Self>) -> Arc<Self> {
        Self::two_arg(TwoArgFn::ATan2, y, x)
    }

    #[must_use]
    pub fn beta(a: Arc<Self>, b: Arc<Self>) -> Arc<Self> {
        Self::two_arg(TwoArgFn::Beta, a, b)
    }

    pub fn multi_arg<I>(head: MultiArgHead, args: I) -> Arc<Self>
    where
        I: IntoIterator<Item = Arc<Self>>,
    {
        shared(ExprKind::MultiArg(MultiArgFunction {
            head,
            args: args.into_iter().collect(),
        }))
    }

    /// Application of the undefined function `name`
    pub fn function_symbol<I>(name: &str, args: I) -> Arc<Self>
    where
        I: IntoIterator<Item = Arc<Self>>,
    {
        Self::multi_arg(MultiArgHead::Undefined(Arc::from(name)), args)
    }

    pub fn max<I>(args: I) -> Arc<Self>
    where
        I: IntoIterator<Item = Arc<Self>>,
    {
        Self::multi_arg(MultiArgHead::Max, args)
    }

    pub fn min<I>(args: I) -> Arc<Self>
    where
        I: IntoIterator<Item = Arc<Self>>,
    {
        Self::multi_arg(MultiArgHead::Min, args)
    }

    // -------------------------------------------------------------------------
    // Polynomials
    // -------------------------------------------------------------------------

    /// `Σ coeffs[i] * var^i`, trailing zero coefficients trimmed
    pub fn uint_poly<I, C>(var: Arc<Self>, coeffs: I) -> Arc<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<BigInt>,
    {
        let mut coeffs: Vec<BigInt> = coeffs.into_iter().map(Into::into).collect();
        while coeffs.last().is_some_and(Zero::is_zero) {
            coeffs.pop();
        }
        shared(ExprKind::UIntPoly(UIntPoly { var, coeffs }))
    }

    // -------------------------------------------------------------------------
    // Logic
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn boolean(value: bool) -> Arc<Self> {
        shared(ExprKind::BooleanAtom(value))
    }

    #[must_use]
    pub fn relational(op: RelOp, lhs: Arc<Self>, rhs: Arc<Self>) -> Arc<Self> {
        shared(ExprKind::Relational(Relational {
            op,
            args: [lhs, rhs],
        }))
    }

    /// `lhs == rhs`
    #[must_use]
    pub fn equality(lhs: Arc<Self>, rhs: Arc<Self>) -> Arc<Self> {
        Self::relational(RelOp::Eq, lhs, rhs)
    }

    /// `lhs != rhs`
    #[must_use]
    pub fn unequality(lhs: Arc<Self>, rhs: Arc<Self>) -> Arc<Self> {
        Self::relational(RelOp::Ne, lhs, rhs)
    }

    /// `lhs <= rhs`
    #[must_use]
    pub fn le(lhs: Arc<Self>, rhs: Arc<Self>) -> Arc<Self> {
        Self::relational(RelOp::Le, lhs, rhs)
    }

    /// `lhs < rhs`
    #[must_use]
    pub fn lt(lhs: Arc<Self>, rhs: Arc<Self>) -> Arc<Self> {
        Self::relational(RelOp::Lt, lhs, rhs)
    }

    pub fn and<I>(args: I) -> Arc<Self>
    where
        I: IntoIterator<Item = Arc<Self>>,
    {
        shared(ExprKind::And(args.into_iter().collect()))
    }

    pub fn or<I>(args: I) -> Arc<Self>
    where
        I: IntoIterator<Item = Arc<Self>>,
    {
        shared(ExprKind::Or(args.into_iter().collect()))
    }

    #[must_use]
    pub fn not(arg: Arc<Self>) -> Arc<Self> {
        shared(ExprKind::Not(arg))
    }

    // -------------------------------------------------------------------------
    // Sets
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn empty_set() -> Arc<Self> {
        shared(ExprKind::EmptySet)
    }

    #[must_use]
    pub fn universal_set() -> Arc<Self> {
        shared(ExprKind::UniversalSet)
    }

    /// Finite set; elements are sorted and deduplicated
    pub fn finite_set<I>(elements: I) -> Arc<Self>
    where
        I: IntoIterator<Item = Arc<Self>>,
    {
        let mut elements: Vec<Arc<Self>> = elements.into_iter().collect();
        elements.sort_by(|a, b| expr_cmp(a, b));
        elements.dedup();
        shared(ExprKind::FiniteSet(elements))
    }

    #[must_use]
    pub fn interval(
        start: Arc<Self>,
        end: Arc<Self>,
        left_open: bool,
        right_open: bool,
    ) -> Arc<Self> {
        shared(ExprKind::Interval(Interval {
            start,
            end,
            left_open,
            right_open,
        }))
    }

    // -------------------------------------------------------------------------
    // Rebuild
    // -------------------------------------------------------------------------

    /// Node of the same kind and node-internal data over new children.
    ///
    /// `args` must line up with [`Expr::args`]. Sums and products are rebuilt
    /// from their summands and factors, so they come back canonical; a
    /// polynomial comes back as the sum of its terms.
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::ArityMismatch`] when a fixed-arity kind receives
    /// the wrong number of children.
    pub fn with_args(&self, args: Vec<Arc<Self>>) -> Result<Arc<Self>, ExprError> {
        let code = self.type_code();
        let arity = |expected: usize, args: Vec<Arc<Self>>| {
            if args.len() == expected {
                Ok(args)
            } else {
                Err(ExprError::ArityMismatch {
                    kind: code,
                    expected,
                    got: args.len(),
                })
            }
        };

        Ok(match &self.kind {
            ExprKind::Integer(_)
            | ExprKind::Rational(_)
            | ExprKind::Infty(_)
            | ExprKind::NaN
            | ExprKind::Constant(_)
            | ExprKind::Symbol(_)
            | ExprKind::BooleanAtom(_)
            | ExprKind::EmptySet
            | ExprKind::UniversalSet => {
                arity(0, args)?;
                shared(self.kind.clone())
            }
            ExprKind::Add(_) | ExprKind::UIntPoly(_) => Self::sum(args),
            ExprKind::Mul(_) => Self::product(args),
            ExprKind::Pow(_) => {
                let [base, exp] = pair(arity(2, args)?);
                Self::pow(base, exp)
            }
            ExprKind::OneArg(f) => {
                let [arg] = single(arity(1, args)?);
                f.rebuild(arg)
            }
            ExprKind::TwoArg(f) => {
                let [a, b] = pair(arity(2, args)?);
                Self::two_arg(f.func, a, b)
            }
            ExprKind::Relational(r) => {
                let [a, b] = pair(arity(2, args)?);
                Self::relational(r.op, a, b)
            }
            ExprKind::MultiArg(f) => f.rebuild(args),
            ExprKind::And(_) => Self::and(args),
            ExprKind::Or(_) => Self::or(args),
            ExprKind::Not(_) => {
                let [arg] = single(arity(1, args)?);
                Self::not(arg)
            }
            ExprKind::FiniteSet(_) => Self::finite_set(args),
            ExprKind::Interval(iv) => {
                let [start, end] = pair(arity(2, args)?);
                Self::interval(start, end, iv.left_open, iv.right_open)
            }
        })
    }

    /// Whether this is a negative number (used when printing sums)
    pub(crate) fn is_negative_number(&self) -> bool {
        match &self.kind {
            ExprKind::Integer(i) => i.is_negative(),
            ExprKind::Rational(r) => r.is_negative(),
            _ => false,
        }
    }
}

// Length already checked by the caller
fn pair(mut args: Vec<Arc<Expr>>) -> [Arc<Expr>; 2] {
    let second = args.pop().unwrap_or_else(Expr::zero);
    let first = args.pop().unwrap_or_else(Expr::zero);
    [first, second]
}

fn single(mut args: Vec<Arc<Expr>>) -> [Arc<Expr>; 1] {
    [args.pop().unwrap_or_else(Expr::zero)]
}
