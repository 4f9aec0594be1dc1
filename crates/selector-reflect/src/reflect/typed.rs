//! Statically-typed entry points.
//!
//! One generic entry per selector shape, parameterized over the argument-type
//! sequence instead of one overload per parameter count:
//!
//! ```ignore
//! MethodReflector::<SomeClass>::from_method_call::<(String, i32)>(&selector)?;
//! MethodReflector::<SomeClass>::from_method_delegate::<fn(String, i32) -> i32>(&selector)?;
//! PropertyReflector::<SomeClass>::from_setter::<(i64,)>(&registry, &selector)?;
//! ```
//!
//! Each entry checks that the selector's parameter list (and, where it is
//! fixed, the body's type) is the one the type arguments describe, then hands
//! the selector to the untyped matcher unchanged.

use std::marker::PhantomData;

use tracing::debug;

use crate::expr::Lambda;
use crate::types::{self, MethodDescriptor, PropertyDescriptor, Type, TypeCatalog};
use super::{shape, ReflectError, Shape};

// ─── Host types ──────────────────────────────────────────────────────────────

/// Rust type standing for a catalog type.
pub trait HostType {
    fn host_type() -> Type;
}

macro_rules! host_types {
    ($($rust:ty => $name:expr),* $(,)?) => {
        $(impl HostType for $rust {
            fn host_type() -> Type { Type::named($name) }
        })*
    };
}

host_types! {
    bool   => types::BOOLEAN,
    char   => types::CHAR,
    i32    => types::INT32,
    i64    => types::INT64,
    f64    => types::DOUBLE,
    String => types::STRING,
}

impl HostType for () {
    fn host_type() -> Type { Type::Unit }
}

/// Stand-in for the catalog's root `Object` type.
pub struct Object;

impl HostType for Object {
    fn host_type() -> Type { Type::object() }
}

// ─── Argument sequences ──────────────────────────────────────────────────────

/// A sequence of host types, implemented for tuples of up to five elements.
pub trait ArgTypes {
    fn arg_types() -> Vec<Type>;
}

/// A delegate signature, implemented for `fn(A1, .., An) -> R` with up to five
/// parameters. `R = ()` describes an action.
pub trait DelegateSig {
    fn delegate_type() -> Type;
}

macro_rules! arg_sequences {
    ($($arg:ident),*) => {
        impl<$($arg: HostType),*> ArgTypes for ($($arg,)*) {
            fn arg_types() -> Vec<Type> {
                vec![$($arg::host_type()),*]
            }
        }

        impl<R: HostType, $($arg: HostType),*> DelegateSig for fn($($arg),*) -> R {
            fn delegate_type() -> Type {
                Type::delegate(vec![$($arg::host_type()),*], Some(R::host_type()))
            }
        }
    };
}

arg_sequences!();
arg_sequences!(A1);
arg_sequences!(A1, A2);
arg_sequences!(A1, A2, A3);
arg_sequences!(A1, A2, A3, A4);
arg_sequences!(A1, A2, A3, A4, A5);

// ─── Methods ─────────────────────────────────────────────────────────────────

/// Method references on `T`.
pub struct MethodReflector<T>(PhantomData<fn() -> T>);

impl<T: HostType> MethodReflector<T> {
    /// `(instance, args...) => instance.Method(args...)`.
    pub fn from_method_call<Args: ArgTypes>(lambda: &Lambda) -> Result<&MethodDescriptor, ReflectError> {
        expect_params(lambda, &instance_and::<T, Args>(), Shape::MethodCall)?;
        shape::method_from_call(lambda)
    }

    /// `(args...) => T.StaticMethod(args...)`.
    pub fn from_static_call<Args: ArgTypes>(lambda: &Lambda) -> Result<&MethodDescriptor, ReflectError> {
        expect_params(lambda, &Args::arg_types(), Shape::MethodCall)?;
        shape::method_from_call(lambda)
    }

    /// `instance => instance.Method`, where the body is a `Sig` delegate.
    pub fn from_method_delegate<Sig: DelegateSig>(lambda: &Lambda) -> Result<&MethodDescriptor, ReflectError> {
        expect_params(lambda, &[T::host_type()], Shape::DelegateResult)?;
        expect_body_type(lambda, &Sig::delegate_type(), Shape::DelegateResult)?;
        shape::method_from_delegate(lambda)
    }
}

// ─── Properties ──────────────────────────────────────────────────────────────

/// Property references on `T`.
pub struct PropertyReflector<T>(PhantomData<fn() -> T>);

impl<T: HostType> PropertyReflector<T> {
    /// `instance => instance.Property`, where the property is a `V`.
    pub fn from_getter<V: HostType>(lambda: &Lambda) -> Result<&PropertyDescriptor, ReflectError> {
        expect_params(lambda, &[T::host_type()], Shape::PropertyGetter)?;
        expect_body_type(lambda, &V::host_type(), Shape::PropertyGetter)?;
        shape::property_from_getter(lambda)
    }

    /// `instance => instance.Property = constant` with `Args = ()`, or
    /// `(instance, value) => instance.Property = value` with `Args = (V,)`.
    pub fn from_setter<'c, Args: ArgTypes>(
        catalog: &'c (impl TypeCatalog + ?Sized),
        lambda: &Lambda,
    ) -> Result<&'c PropertyDescriptor, ReflectError> {
        expect_params(lambda, &instance_and::<T, Args>(), Shape::MethodCall)?;
        super::property_from_setter(catalog, lambda)
    }
}

// ─── Signature checks ────────────────────────────────────────────────────────

fn instance_and<T: HostType, Args: ArgTypes>() -> Vec<Type> {
    let mut params = vec![T::host_type()];
    params.extend(Args::arg_types());
    params
}

fn expect_params(lambda: &Lambda, expected: &[Type], shape: Shape) -> Result<(), ReflectError> {
    if lambda.params.iter().map(|p| &p.ty).eq(expected.iter()) {
        return Ok(());
    }
    debug!(selector = %lambda, expected = ?expected, "selector parameters do not match");
    Err(ReflectError::shape_mismatch(shape, lambda))
}

fn expect_body_type(lambda: &Lambda, expected: &Type, shape: Shape) -> Result<(), ReflectError> {
    let actual = lambda.return_type();
    if &actual == expected {
        return Ok(());
    }
    debug!(selector = %lambda, expected = %expected, actual = %actual, "selector result type does not match");
    Err(ReflectError::shape_mismatch(shape, lambda))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget;

    impl HostType for Widget {
        fn host_type() -> Type { Type::named("Widget") }
    }

    #[test]
    fn tuples_describe_argument_sequences() {
        assert_eq!(<()>::arg_types(), Vec::<Type>::new());
        assert_eq!(<(i64,)>::arg_types(), vec![Type::int64()]);
        assert_eq!(
            <(i32, String, i64, char, Object)>::arg_types(),
            vec![Type::int32(), Type::string(), Type::int64(), Type::char(), Type::object()]
        );
    }

    #[test]
    fn fn_pointers_describe_delegates() {
        assert_eq!(<fn() -> i32>::delegate_type().to_string(), "Func<Int32>");
        assert_eq!(<fn(String, i32) -> i32>::delegate_type().to_string(), "Func<String, Int32, Int32>");
        assert_eq!(<fn(i32, String, i64, char, Object)>::delegate_type().to_string(), "Action<Int32, String, Int64, Char, Object>");
    }

    #[test]
    fn instance_comes_first() {
        assert_eq!(instance_and::<Widget, (bool,)>(), vec![Type::named("Widget"), Type::boolean()]);
    }
}
