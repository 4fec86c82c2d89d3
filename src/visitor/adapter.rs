//! Handler adapter with super-kind fallback.
//!
//! A [`BaseVisitor`] implements [`bvisit_basic`](BaseVisitor::bvisit_basic)
//! and any subset of the optional handlers. Every optional handler returns
//! [`Handled`]; the defaults return [`Handled::Fallback`]. For a node of kind
//! `K` the adapter tries, in order:
//!
//! 1. the concrete handler for `K`
//! 2. each enclosing super-kind handler, narrowest first
//! 3. `bvisit_basic`
//!
//! The order is the one reported by
//! [`TypeCode::resolution_order`](crate::TypeCode::resolution_order).

use std::sync::Arc;

use crate::core::kind::for_each_type_code;
use crate::core::{
    Expr, ExprKind, MultiArgFunction, OneArgFunction, Relational, SuperKind, TypeCode,
    TwoArgFunction,
};
use crate::visitor::Visitor;

/// Outcome of an optional handler
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// The node was handled; stop resolving
    Done,
    /// Defer to the next handler in the resolution order
    Fallback,
}

macro_rules! define_base_visitor {
    ($( $code:ident : $parent:ident => $visit:ident, $bvisit:ident, $payload:ty; )*) => {
        /// Partial visitor; see the module docs for the resolution order.
        pub trait BaseVisitor {
            /// Catch-all handler for any node no narrower handler took
            fn bvisit_basic(&mut self, x: &Arc<Expr>);

            fn bvisit_number(&mut self, _x: &Arc<Expr>) -> Handled {
                Handled::Fallback
            }

            /// Any function node, with its arguments
            fn bvisit_function(&mut self, _x: &Arc<Expr>, _args: &[Arc<Expr>]) -> Handled {
                Handled::Fallback
            }

            fn bvisit_one_arg_function(&mut self, _x: &Arc<Expr>, _f: &OneArgFunction) -> Handled {
                Handled::Fallback
            }

            fn bvisit_two_arg_function(&mut self, _x: &Arc<Expr>, _f: &TwoArgFunction) -> Handled {
                Handled::Fallback
            }

            fn bvisit_multi_arg_function(
                &mut self,
                _x: &Arc<Expr>,
                _f: &MultiArgFunction,
            ) -> Handled {
                Handled::Fallback
            }

            fn bvisit_boolean(&mut self, _x: &Arc<Expr>) -> Handled {
                Handled::Fallback
            }

            fn bvisit_relational(&mut self, _x: &Arc<Expr>, _r: &Relational) -> Handled {
                Handled::Fallback
            }

            fn bvisit_set(&mut self, _x: &Arc<Expr>) -> Handled {
                Handled::Fallback
            }

            $(
                #[doc = concat!("Handler for `", stringify!($code), "` nodes")]
                fn $bvisit(&mut self, _x: &Arc<Expr>, _payload: &$payload) -> Handled {
                    Handled::Fallback
                }
            )*
        }

        impl<T: BaseVisitor + ?Sized> Visitor for T {
            $(
                fn $visit(&mut self, x: &Arc<Expr>, payload: &$payload) {
                    if self.$bvisit(x, payload) == Handled::Fallback {
                        fallback(self, TypeCode::$code, x);
                    }
                }
            )*
        }
    };
}

for_each_type_code!(define_base_visitor);

/// Walk the super-kinds of `code` until one handler accepts the node
fn fallback<V: BaseVisitor + ?Sized>(v: &mut V, code: TypeCode, x: &Arc<Expr>) {
    for sup in code.super_kinds() {
        if dispatch_super(v, sup, x) == Handled::Done {
            return;
        }
    }
}

fn dispatch_super<V: BaseVisitor + ?Sized>(v: &mut V, sup: SuperKind, x: &Arc<Expr>) -> Handled {
    match (sup, &x.kind) {
        (SuperKind::Basic, _) => {
            v.bvisit_basic(x);
            Handled::Done
        }
        (SuperKind::Number, _) => v.bvisit_number(x),
        (SuperKind::Function, _) => match x.function_args() {
            Some(args) => v.bvisit_function(x, args),
            None => Handled::Fallback,
        },
        (SuperKind::OneArgFunction, ExprKind::OneArg(f)) => v.bvisit_one_arg_function(x, f),
        (SuperKind::TwoArgFunction, ExprKind::TwoArg(f)) => v.bvisit_two_arg_function(x, f),
        (SuperKind::MultiArgFunction, ExprKind::MultiArg(f)) => {
            v.bvisit_multi_arg_function(x, f)
        }
        (SuperKind::Boolean, _) => v.bvisit_boolean(x),
        (SuperKind::Relational, ExprKind::Relational(r)) => v.bvisit_relational(x, r),
        (SuperKind::Set, _) => v.bvisit_set(x),
        // Registry and payload disagree; let a wider handler take it
        (
            SuperKind::OneArgFunction
            | SuperKind::TwoArgFunction
            | SuperKind::MultiArgFunction
            | SuperKind::Relational,
            _,
        ) => Handled::Fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{HandlerSlot, Symbol};
    use crate::visitor::Accept;

    /// Records which handler slot took each node
    #[derive(Default)]
    struct Layered {
        hits: Vec<HandlerSlot>,
    }

    impl BaseVisitor for Layered {
        fn bvisit_basic(&mut self, _x: &Arc<Expr>) {
            self.hits.push(HandlerSlot::Super(SuperKind::Basic));
        }

        fn bvisit_function(&mut self, _x: &Arc<Expr>, _args: &[Arc<Expr>]) -> Handled {
            self.hits.push(HandlerSlot::Super(SuperKind::Function));
            Handled::Done
        }

        fn bvisit_one_arg_function(&mut self, _x: &Arc<Expr>, _f: &OneArgFunction) -> Handled {
            self.hits.push(HandlerSlot::Super(SuperKind::OneArgFunction));
            Handled::Done
        }

        fn bvisit_boolean(&mut self, _x: &Arc<Expr>) -> Handled {
            self.hits.push(HandlerSlot::Super(SuperKind::Boolean));
            Handled::Done
        }

        fn bvisit_sin(&mut self, _x: &Arc<Expr>, _f: &OneArgFunction) -> Handled {
            self.hits.push(HandlerSlot::Kind(TypeCode::Sin));
            Handled::Done
        }

        // Declines symbols named "skip"
        fn bvisit_symbol(&mut self, _x: &Arc<Expr>, s: &Symbol) -> Handled {
            if s.name() == "skip" {
                return Handled::Fallback;
            }
            self.hits.push(HandlerSlot::Kind(TypeCode::Symbol));
            Handled::Done
        }
    }

    fn hit(e: &Arc<Expr>) -> HandlerSlot {
        let mut v = Layered::default();
        e.accept(&mut v);
        assert_eq!(v.hits.len(), 1, "exactly one handler per dispatch");
        v.hits[0]
    }

    #[test]
    fn test_concrete_handler_wins() {
        let x = Expr::symbol("x");
        assert_eq!(hit(&Expr::sin(x.clone())), HandlerSlot::Kind(TypeCode::Sin));
        assert_eq!(hit(&x), HandlerSlot::Kind(TypeCode::Symbol));
    }

    #[test]
    fn test_narrowest_super_kind_wins() {
        let x = Expr::symbol("x");
        assert_eq!(
            hit(&Expr::cos(x.clone())),
            HandlerSlot::Super(SuperKind::OneArgFunction)
        );
        // No TwoArgFunction handler, so Function takes it
        assert_eq!(
            hit(&Expr::atan2(x.clone(), x.clone())),
            HandlerSlot::Super(SuperKind::Function)
        );
        assert_eq!(
            hit(&Expr::function_symbol("f", [x.clone()])),
            HandlerSlot::Super(SuperKind::Function)
        );
        // No Relational handler, so Boolean takes it
        assert_eq!(
            hit(&Expr::lt(x.clone(), x)),
            HandlerSlot::Super(SuperKind::Boolean)
        );
    }

    #[test]
    fn test_catch_all() {
        let x = Expr::symbol("x");
        assert_eq!(hit(&Expr::integer(1)), HandlerSlot::Super(SuperKind::Basic));
        assert_eq!(
            hit(&Expr::pow(x.clone(), x)),
            HandlerSlot::Super(SuperKind::Basic)
        );
        assert_eq!(hit(&Expr::empty_set()), HandlerSlot::Super(SuperKind::Basic));
    }

    #[test]
    fn test_declined_handler_falls_back() {
        assert_eq!(
            hit(&Expr::symbol("skip")),
            HandlerSlot::Super(SuperKind::Basic)
        );
    }

    #[test]
    fn test_dispatch_follows_resolution_order() {
        // For every kind, the slot that fires is the first one in the
        // resolution order that Layered implements
        let implemented = |slot: &HandlerSlot| {
            matches!(
                slot,
                HandlerSlot::Kind(TypeCode::Sin | TypeCode::Symbol)
                    | HandlerSlot::Super(
                        SuperKind::Basic
                            | SuperKind::Function
                            | SuperKind::OneArgFunction
                            | SuperKind::Boolean
                    )
            )
        };
        let x = Expr::symbol("x");
        let samples = [
            Expr::integer(3),
            Expr::sin(x.clone()),
            Expr::gamma(x.clone()),
            Expr::beta(x.clone(), x.clone()),
            Expr::max([x.clone()]),
            Expr::boolean(false),
            Expr::equality(x.clone(), x.clone()),
            Expr::not(Expr::boolean(true)),
            Expr::finite_set([x.clone()]),
            x,
        ];
        for e in &samples {
            let expected = e
                .type_code()
                .resolution_order()
                .find(implemented)
                .unwrap_or(HandlerSlot::Super(SuperKind::Basic));
            assert_eq!(hit(e), expected, "{e}");
        }
    }
}
