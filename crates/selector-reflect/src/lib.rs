pub mod syntax;
pub mod types;
pub mod expr;
pub mod reflect;
pub mod analysis;
pub mod error;

pub use error::{Error, ErrorCode};
pub use expr::{Constant, Expr, Lambda, Member, Param};
pub use reflect::{ReflectError, Shape};
pub use reflect::typed::{ArgTypes, DelegateSig, HostType, MethodReflector, Object, PropertyReflector};
pub use syntax::token::{Token, TokenKind};
pub use types::{
    AccessorConvention, FieldDecl, FieldDescriptor, MethodDecl, MethodDescriptor, PropertyDecl,
    PropertyDescriptor, Type, TypeBuilder, TypeCatalog, TypeRegistry, Visibility,
};

// ─── Quoting ──────────────────────────────────────────────────────────────────

/// Parse and bind a selector fragment against `catalog`, producing the same
/// tree a host compiler would quote for it.
///
/// ```ignore
/// let lambda = quote(&registry, "(c: SomeClass, v: Int64) => c.SetterOnly = v")?;
/// ```
pub fn quote<C: TypeCatalog + ?Sized>(catalog: &C, source: &str) -> Result<Lambda, Vec<Error>> {
    let tokens = syntax::lexer::Lexer::new(source).tokenize()?;
    let selector = syntax::parser::Parser::new(tokens).parse()?;
    analysis::bind(&selector, catalog)
}

// ─── Reflector ────────────────────────────────────────────────────────────────

/// Member extraction bound to one catalog.
///
/// The free functions in [`reflect`] do the same work; this only saves
/// threading the catalog through every call and adds quoting.
pub struct Reflector<'c, C: TypeCatalog + ?Sized = TypeRegistry> {
    catalog: &'c C,
}

impl<'c, C: TypeCatalog + ?Sized> Reflector<'c, C> {
    pub fn new(catalog: &'c C) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'c C {
        self.catalog
    }

    pub fn quote(&self, source: &str) -> Result<Lambda, Vec<Error>> {
        quote(self.catalog, source)
    }

    pub fn method_from_call<'l>(&self, lambda: &'l Lambda) -> Result<&'l MethodDescriptor, ReflectError> {
        reflect::method_from_call(lambda)
    }

    pub fn method_from_delegate<'l>(&self, lambda: &'l Lambda) -> Result<&'l MethodDescriptor, ReflectError> {
        reflect::method_from_delegate(lambda)
    }

    pub fn property_from_getter<'l>(&self, lambda: &'l Lambda) -> Result<&'l PropertyDescriptor, ReflectError> {
        reflect::property_from_getter(lambda)
    }

    pub fn property_from_setter(&self, lambda: &Lambda) -> Result<&'c PropertyDescriptor, ReflectError> {
        reflect::property_from_setter(self.catalog, lambda)
    }

    pub fn property_from_accessor(&self, method: &MethodDescriptor) -> Result<&'c PropertyDescriptor, ReflectError> {
        reflect::property_from_accessor(self.catalog, method)
    }
}
