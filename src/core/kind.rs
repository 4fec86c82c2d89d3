//! Node-kind registry.
//!
//! [`for_each_type_code!`] is the one list of concrete node kinds. Every
//! entry names the kind, the super-kind it falls back to, the dispatcher
//! operation, the adapter handler and the payload type handed to both. The
//! [`TypeCode`] enum, the [`Visitor`](crate::visitor::Visitor) protocol and
//! the [`BaseVisitor`](crate::visitor::BaseVisitor) dispatch table are all
//! generated from it, so a kind added here participates in dispatch
//! everywhere, with adapter fallback supplying default behaviour.
//!
//! Super-kinds form a tree rooted at [`SuperKind::Basic`]. The fallback order
//! for a concrete kind is its parent chain, narrowest first.

/// Invoke `$callback!` with the full kind list.
///
/// Entry layout: `Code: ParentSuperKind => visit_method, bvisit_method, Payload;`
macro_rules! for_each_type_code {
    ($callback:ident) => {
        $callback! {
            Integer: Number => visit_integer, bvisit_integer, ::num_bigint::BigInt;
            Rational: Number => visit_rational, bvisit_rational, ::num_rational::BigRational;
            Infty: Number => visit_infty, bvisit_infty, $crate::core::Infty;
            NaN: Number => visit_nan, bvisit_nan, ();
            Constant: Basic => visit_constant, bvisit_constant, $crate::core::Constant;
            Symbol: Basic => visit_symbol, bvisit_symbol, $crate::core::Symbol;
            Add: Basic => visit_add, bvisit_add, $crate::core::Add;
            Mul: Basic => visit_mul, bvisit_mul, $crate::core::Mul;
            Pow: Basic => visit_pow, bvisit_pow, $crate::core::Pow;
            Sin: OneArgFunction => visit_sin, bvisit_sin, $crate::core::OneArgFunction;
            Cos: OneArgFunction => visit_cos, bvisit_cos, $crate::core::OneArgFunction;
            Tan: OneArgFunction => visit_tan, bvisit_tan, $crate::core::OneArgFunction;
            Log: OneArgFunction => visit_log, bvisit_log, $crate::core::OneArgFunction;
            Abs: OneArgFunction => visit_abs, bvisit_abs, $crate::core::OneArgFunction;
            Gamma: OneArgFunction => visit_gamma, bvisit_gamma, $crate::core::OneArgFunction;
            ATan2: TwoArgFunction => visit_atan2, bvisit_atan2, $crate::core::TwoArgFunction;
            Beta: TwoArgFunction => visit_beta, bvisit_beta, $crate::core::TwoArgFunction;
            FunctionSymbol: MultiArgFunction => visit_function_symbol, bvisit_function_symbol, $crate::core::MultiArgFunction;
            Max: MultiArgFunction => visit_max, bvisit_max, $crate::core::MultiArgFunction;
            Min: MultiArgFunction => visit_min, bvisit_min, $crate::core::MultiArgFunction;
            UIntPoly: Basic => visit_uint_poly, bvisit_uint_poly, $crate::core::UIntPoly;
            BooleanAtom: Boolean => visit_boolean_atom, bvisit_boolean_atom, bool;
            Equality: Relational => visit_equality, bvisit_equality, $crate::core::Relational;
            Unequality: Relational => visit_unequality, bvisit_unequality, $crate::core::Relational;
            LessThan: Relational => visit_less_than, bvisit_less_than, $crate::core::Relational;
            StrictLessThan: Relational => visit_strict_less_than, bvisit_strict_less_than, $crate::core::Relational;
            And: Boolean => visit_and, bvisit_and, [::std::sync::Arc<$crate::core::Expr>];
            Or: Boolean => visit_or, bvisit_or, [::std::sync::Arc<$crate::core::Expr>];
            Not: Boolean => visit_not, bvisit_not, ::std::sync::Arc<$crate::core::Expr>;
            EmptySet: Set => visit_empty_set, bvisit_empty_set, ();
            UniversalSet: Set => visit_universal_set, bvisit_universal_set, ();
            FiniteSet: Set => visit_finite_set, bvisit_finite_set, [::std::sync::Arc<$crate::core::Expr>];
            Interval: Set => visit_interval, bvisit_interval, $crate::core::Interval;
        }
    };
}

pub(crate) use for_each_type_code;

macro_rules! define_type_code {
    ($( $code:ident : $parent:ident => $visit:ident, $bvisit:ident, $payload:ty; )*) => {
        /// Identifier of a concrete node kind.
        ///
        /// Closed and totally ordered; the declaration order is also the
        /// first key of the canonical expression ordering.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum TypeCode {
            $( $code, )*
        }

        impl TypeCode {
            /// Every concrete kind, in declaration order
            pub const ALL: &'static [TypeCode] = &[$( TypeCode::$code, )*];

            /// The super-kind this kind falls back to when no handler
            /// exists for the kind itself
            #[must_use]
            pub const fn parent(self) -> SuperKind {
                match self {
                    $( TypeCode::$code => SuperKind::$parent, )*
                }
            }

            /// Kind name as written in the registry
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $( TypeCode::$code => stringify!($code), )*
                }
            }
        }
    };
}

for_each_type_code!(define_type_code);

/// Grouping category used for handler fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SuperKind {
    /// Any node
    Basic,
    Number,
    Function,
    OneArgFunction,
    TwoArgFunction,
    MultiArgFunction,
    Boolean,
    Relational,
    Set,
}

impl SuperKind {
    pub const ALL: &'static [SuperKind] = &[
        SuperKind::Basic,
        SuperKind::Number,
        SuperKind::Function,
        SuperKind::OneArgFunction,
        SuperKind::TwoArgFunction,
        SuperKind::MultiArgFunction,
        SuperKind::Boolean,
        SuperKind::Relational,
        SuperKind::Set,
    ];

    /// Enclosing super-kind, `None` for `Basic`
    #[must_use]
    pub const fn parent(self) -> Option<SuperKind> {
        match self {
            SuperKind::Basic => None,
            SuperKind::Number | SuperKind::Function | SuperKind::Boolean | SuperKind::Set => {
                Some(SuperKind::Basic)
            }
            SuperKind::OneArgFunction
            | SuperKind::TwoArgFunction
            | SuperKind::MultiArgFunction => Some(SuperKind::Function),
            SuperKind::Relational => Some(SuperKind::Boolean),
        }
    }

    /// Whether `code` belongs to this super-kind, directly or transitively
    #[must_use]
    pub fn contains(self, code: TypeCode) -> bool {
        code.super_kinds().any(|s| s == self)
    }
}

/// One slot in a kind's handler resolution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerSlot {
    Kind(TypeCode),
    Super(SuperKind),
}

impl HandlerSlot {
    /// Whether nodes of kind `code` fall under this slot
    #[must_use]
    pub fn covers(self, code: TypeCode) -> bool {
        match self {
            Self::Kind(kind) => kind == code,
            Self::Super(sup) => sup.contains(code),
        }
    }
}

impl From<TypeCode> for HandlerSlot {
    fn from(code: TypeCode) -> Self {
        Self::Kind(code)
    }
}

impl From<SuperKind> for HandlerSlot {
    fn from(sup: SuperKind) -> Self {
        Self::Super(sup)
    }
}

impl TypeCode {
    /// Enclosing super-kinds, narrowest first, always ending in `Basic`
    #[must_use]
    pub const fn super_kinds(self) -> SuperKinds {
        SuperKinds {
            next: Some(self.parent()),
        }
    }

    /// The order in which the handler adapter tries handlers for this kind
    pub fn resolution_order(self) -> impl Iterator<Item = HandlerSlot> {
        std::iter::once(HandlerSlot::Kind(self)).chain(self.super_kinds().map(HandlerSlot::Super))
    }
}

/// Iterator over a kind's enclosing super-kinds
#[derive(Debug, Clone)]
pub struct SuperKinds {
    next: Option<SuperKind>,
}

impl Iterator for SuperKinds {
    type Item = SuperKind;

    fn next(&mut self) -> Option<SuperKind> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}
