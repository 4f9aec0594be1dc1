//! Shared catalog fixture for the integration tests.

#![allow(dead_code)]

use selector_reflect::{
    quote, Error, FieldDecl, HostType, Lambda, MethodDecl, PropertyDecl, Type, TypeBuilder,
    TypeRegistry, Visibility,
};

/// Host-side stand-in for the `SomeClass` catalog type.
pub struct SomeClass;

impl HostType for SomeClass {
    fn host_type() -> Type { Type::named("SomeClass") }
}

/// ```text
/// class SomeClass {
///     string Prop { get; set; }
///     int    GetterOnly { get; private set; }
///     long   SetterOnly { private get; set; }
///     static string Shared { get; set; }
///     private string Hidden { get; set; }
///     int    Count;
///
///     int  Foo();
///     int  Foo(string, int);
///     static int Bar();
///     void Baz(string);
///     void Action(int, string, long, char, object);
/// }
///
/// interface IFoo { string Text { get; set; } void Foo(); }
/// ```
pub fn registry() -> TypeRegistry {
    let mut r = TypeRegistry::default();
    r.register(
        TypeBuilder::class("SomeClass")
            .property(PropertyDecl::new("Prop", Type::string()).get_set())
            .property(PropertyDecl::new("GetterOnly", Type::int32())
                .get(Visibility::Public).set(Visibility::Private))
            .property(PropertyDecl::new("SetterOnly", Type::int64())
                .get(Visibility::Private).set(Visibility::Public))
            .property(PropertyDecl::new("Shared", Type::string()).get_set().make_static())
            .property(PropertyDecl::new("Hidden", Type::string())
                .get(Visibility::Private).set(Visibility::Private))
            .field(FieldDecl::new("Count", Type::int32()))
            .method(MethodDecl::new("Foo").returns(Type::int32()))
            .method(MethodDecl::new("Foo").param(Type::string()).param(Type::int32()).returns(Type::int32()))
            .method(MethodDecl::new("Bar").returns(Type::int32()).make_static())
            .method(MethodDecl::new("Baz").param(Type::string()))
            .method(MethodDecl::new("Action")
                .param(Type::int32()).param(Type::string()).param(Type::int64())
                .param(Type::char()).param(Type::object())),
    );
    r.register(
        TypeBuilder::class("IFoo")
            .property(PropertyDecl::new("Text", Type::string()).get_set())
            .method(MethodDecl::new("Foo")),
    );
    r
}

pub fn some_class() -> Type {
    Type::named("SomeClass")
}

/// Quote `src` against the fixture catalog, panicking on front-end errors.
pub fn selector(registry: &TypeRegistry, src: &str) -> Lambda {
    quote(registry, src).unwrap_or_else(|errs: Vec<Error>| {
        panic!("expected `{src}` to quote, got errors: {errs:#?}");
    })
}
