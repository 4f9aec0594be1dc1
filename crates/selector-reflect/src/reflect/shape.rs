//! Shape matching — extracts the member a selector refers to.
//!
//! The walker never evaluates anything; it looks at the body's outermost
//! nodes only. Failures always render the lambda the caller passed in.

use tracing::{debug, trace};

use crate::expr::{Constant, Expr, Lambda, Member};
use crate::types::{MethodDescriptor, PropertyDescriptor};
use super::{ReflectError, Shape};

/// Method called by the outermost operation of the selector body.
///
/// Conversions the compiler inserted around the call (boxing an `Int32`
/// result to `Object`, ...) are looked through. A cast the user wrote is not:
/// `() => (object)T.Bar()` is a conversion, not a call.
///
/// For chains the outer call wins: `x => x.Method().ToString()` yields
/// `ToString`.
pub fn method_from_call(lambda: &Lambda) -> Result<&MethodDescriptor, ReflectError> {
    outermost_call(&lambda.body).ok_or_else(|| {
        debug!(selector = %lambda, "selector is not a method call");
        ReflectError::shape_mismatch(Shape::MethodCall, lambda)
    })
}

/// Method wrapped by a delegate-producing selector such as `c => c.Foo`
/// (typed as returning `Func<Int32>`).
///
/// The body must be a conversion of a create-delegate operation whose method
/// slot holds a method literal.
pub fn method_from_delegate(lambda: &Lambda) -> Result<&MethodDescriptor, ReflectError> {
    delegate_method(&lambda.body).ok_or_else(|| {
        debug!(selector = %lambda, "selector does not produce a bound delegate");
        ReflectError::shape_mismatch(Shape::DelegateResult, lambda)
    })
}

/// Property read by a getter selector `c => c.Prop`.
pub fn property_from_getter(lambda: &Lambda) -> Result<&PropertyDescriptor, ReflectError> {
    match &lambda.body {
        Expr::MemberRead { member: Member::Property(p), .. } => Ok(p),
        _ => {
            debug!(selector = %lambda, "selector is not a property read");
            Err(ReflectError::shape_mismatch(Shape::PropertyGetter, lambda))
        }
    }
}

pub(crate) fn outermost_call(body: &Expr) -> Option<&MethodDescriptor> {
    let mut node = body;
    while let Expr::Convert { operand, ty, explicit: false } = node {
        trace!(to = %ty, "looking through implicit conversion");
        node = &**operand;
    }
    match node {
        Expr::Call { method, .. } => Some(method),
        _ => None,
    }
}

fn delegate_method(body: &Expr) -> Option<&MethodDescriptor> {
    let Expr::Convert { operand, .. } = body else { return None };
    let Expr::DelegateCreate { method, .. } = &**operand else { return None };
    match &**method {
        Expr::Constant(Constant::Method(m)) => Some(m),
        _ => None,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Param;
    use crate::types::{PropertyDescriptor, Type};

    fn owner() -> Type { Type::named("SomeClass") }
    fn c() -> Param { Param::new("c", owner()) }

    fn foo() -> MethodDescriptor {
        MethodDescriptor::new(owner(), "Foo", vec![], Some(Type::int32()))
    }

    fn bar() -> MethodDescriptor {
        MethodDescriptor::new(owner(), "Bar", vec![], Some(Type::int32())).make_static()
    }

    fn prop() -> PropertyDescriptor {
        PropertyDescriptor {
            declaring_type: owner(),
            name: "Prop".into(),
            ty: Type::string(),
            getter: Some(MethodDescriptor::new(owner(), "get_Prop", vec![], Some(Type::string())).special_name()),
            setter: None,
        }
    }

    #[test]
    fn direct_call() {
        let l = Lambda::new(vec![c()], Expr::call(Expr::param(&c()), foo(), vec![]));
        assert_eq!(method_from_call(&l), Ok(&foo()));
    }

    #[test]
    fn implicit_conversions_are_unwrapped() {
        let boxed = Expr::convert(Expr::convert(Expr::static_call(bar(), vec![]), Type::int64()), Type::object());
        let l = Lambda::new(vec![], boxed);
        assert_eq!(method_from_call(&l), Ok(&bar()));
    }

    #[test]
    fn explicit_cast_is_not_a_call() {
        let l = Lambda::new(vec![], Expr::cast(Expr::static_call(bar(), vec![]), Type::object()));
        let err = method_from_call(&l).unwrap_err();
        assert_eq!(err.to_string(), "Expected method call lambda expression, got: () => Convert(Bar())");
    }

    #[test]
    fn outer_call_wins() {
        let to_string = MethodDescriptor::new(Type::int32(), "ToString", vec![], Some(Type::string()));
        let chained = Expr::call(Expr::static_call(bar(), vec![]), to_string.clone(), vec![]);
        let l = Lambda::new(vec![], chained);
        assert_eq!(method_from_call(&l), Ok(&to_string));
    }

    #[test]
    fn constant_body_fails() {
        let l = Lambda::new(vec![], Expr::constant(Constant::Int32(5)));
        assert!(matches!(
            method_from_call(&l),
            Err(ReflectError::ShapeMismatch { expected: Shape::MethodCall, .. })
        ));
    }

    #[test]
    fn delegate_result() {
        let l = Lambda::new(vec![c()], Expr::method_group(Some(Expr::param(&c())), foo()));
        assert_eq!(method_from_delegate(&l), Ok(&foo()));
    }

    #[test]
    fn delegate_requires_conversion_wrapper() {
        let Expr::Convert { operand, .. } = Expr::method_group(Some(Expr::param(&c())), foo()) else {
            unreachable!()
        };
        let l = Lambda::new(vec![c()], *operand);
        let err = method_from_delegate(&l).unwrap_err();
        assert_eq!(
            err,
            ReflectError::ShapeMismatch {
                expected: Shape::DelegateResult,
                rendered: "c => CreateDelegate(Func<Int32>, c, Int32 Foo())".into(),
            }
        );
    }

    #[test]
    fn call_is_not_a_delegate() {
        let l = Lambda::new(vec![c()], Expr::call(Expr::param(&c()), foo(), vec![]));
        assert!(method_from_delegate(&l).is_err());
    }

    #[test]
    fn getter_selector() {
        let l = Lambda::new(vec![c()], Expr::property(Expr::param(&c()), prop()));
        assert_eq!(property_from_getter(&l), Ok(&prop()));
    }

    #[test]
    fn call_is_not_a_getter() {
        let l = Lambda::new(vec![], Expr::static_call(bar(), vec![]));
        let err = property_from_getter(&l).unwrap_err();
        assert_eq!(err.to_string(), "Expected getter selector lambda, got: () => Bar()");
    }

    #[test]
    fn matching_is_idempotent() {
        let l = Lambda::new(vec![c()], Expr::call(Expr::param(&c()), foo(), vec![]));
        assert_eq!(method_from_call(&l), method_from_call(&l));
    }
}
