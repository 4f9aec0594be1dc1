//! Member extraction from selector trees.
//!
//! 1. `shape`    — match a selector against the call / delegate / getter shapes
//! 2. `lowering` — rewrite an assignment selector into its set-accessor call
//! 3. `accessor` — map a synthesized accessor back to its declaring property
//! 4. `typed`    — statically-typed entry points over the three above

pub mod accessor;
pub mod lowering;
pub mod shape;
pub mod typed;

use thiserror::Error;
use tracing::debug;

use crate::expr::Lambda;
use crate::types::{MethodDescriptor, PropertyDescriptor, TypeCatalog};

pub use accessor::property_from_accessor;
pub use lowering::lower_setter;
pub use shape::{method_from_call, method_from_delegate, property_from_getter};

// ─── Shapes ──────────────────────────────────────────────────────────────────

/// Selector shape an operation expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Outermost operation is a method call.
    MethodCall,
    /// Body evaluates to a method bound as a delegate.
    DelegateResult,
    /// Body reads a property.
    PropertyGetter,
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Shape::MethodCall     => "method call lambda expression",
            Shape::DelegateResult => "delegate-returning lambda expression",
            Shape::PropertyGetter => "getter selector lambda",
        })
    }
}

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReflectError {
    /// The selector's structure does not match the shape the operation expects.
    /// `rendered` is the selector exactly as the caller passed it.
    #[error("Expected {expected}, got: {rendered}")]
    ShapeMismatch { expected: Shape, rendered: String },

    /// A method could not be mapped back to a property it is an accessor of.
    #[error("Unable to find property which get or set method is: {method}")]
    AccessorResolution { method: String },
}

impl ReflectError {
    pub fn shape_mismatch(expected: Shape, lambda: &Lambda) -> Self {
        Self::ShapeMismatch { expected, rendered: lambda.to_string() }
    }

    pub fn accessor_resolution(method: &MethodDescriptor) -> Self {
        Self::AccessorResolution { method: method.to_string() }
    }
}

// ─── Setter selectors ────────────────────────────────────────────────────────

/// Property assigned by a setter selector, `c => c.Prop = 0` or
/// `(c, v) => c.Prop = v`.
///
/// The assignment is lowered to its set-accessor call, matched as a method
/// call, and the accessor is resolved back to its property. A selector that is
/// not an assignment to a writable property fails as a method-call mismatch
/// rendering the selector as given.
pub fn property_from_setter<'c, C>(
    catalog: &'c C,
    lambda: &Lambda,
) -> Result<&'c PropertyDescriptor, ReflectError>
where
    C: TypeCatalog + ?Sized,
{
    let lowered = lower_setter(lambda);
    let Some(setter) = shape::outermost_call(&lowered.body) else {
        debug!(selector = %lambda, "setter selector is not an assignment to a writable property");
        return Err(ReflectError::shape_mismatch(Shape::MethodCall, lambda));
    };
    property_from_accessor(catalog, setter)
}
