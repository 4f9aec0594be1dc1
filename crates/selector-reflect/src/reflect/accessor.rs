//! Accessor resolution — maps a synthesized `get_X` / `set_X` method back to
//! the property `X` it implements.
//!
//! Resolution is by identity only: the returned property's getter or setter
//! equals the input method. A matching name alone is never enough.

use tracing::debug;

use crate::types::{MethodDescriptor, PropertyDescriptor, TypeCatalog};
use super::ReflectError;

/// Property whose get or set accessor is `method`.
///
/// Preconditions, checked in order: `method` has a declaring type, is
/// special-named, and carries the catalog's getter or setter prefix. When they
/// hold, every property declared on the declaring type (any visibility, static
/// and instance) is scanned in declaration order and the first one owning
/// `method` wins.
pub fn property_from_accessor<'c, C>(
    catalog: &'c C,
    method: &MethodDescriptor,
) -> Result<&'c PropertyDescriptor, ReflectError>
where
    C: TypeCatalog + ?Sized,
{
    let convention = catalog.convention();

    let Some(declaring_type) = &method.declaring_type else {
        debug!(method = %method, "accessor has no declaring type");
        return Err(ReflectError::accessor_resolution(method));
    };
    if !method.is_special_name {
        debug!(method = %method, "method is not special-named");
        return Err(ReflectError::accessor_resolution(method));
    }
    if !convention.is_accessor_name(&method.name) {
        debug!(method = %method, "method name carries no accessor prefix");
        return Err(ReflectError::accessor_resolution(method));
    }

    match catalog.declared_properties(declaring_type).iter().find(|p| p.has_accessor(method)) {
        Some(property) => {
            debug!(method = %method, property = %property.name, "resolved accessor");
            Ok(property)
        }
        None => {
            debug!(method = %method, owner = %declaring_type, "no declared property owns accessor");
            Err(ReflectError::accessor_resolution(method))
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        AccessorConvention, MethodDecl, PropertyDecl, Type, TypeBuilder, TypeDesc, TypeRegistry, Visibility,
    };

    fn registry() -> TypeRegistry {
        let mut r = TypeRegistry::default();
        r.register(
            TypeBuilder::class("IFoo")
                .property(PropertyDecl::new("Text", Type::string()).get_set())
                .method(MethodDecl::new("Foo"))
                .property(PropertyDecl::new("Hidden", Type::int32()).set(Visibility::Private))
                .property(PropertyDecl::new("Shared", Type::int32()).get(Visibility::Public).make_static()),
        );
        r
    }

    fn ifoo() -> Type { Type::named("IFoo") }

    #[test]
    fn getter_resolves() {
        let r = registry();
        let text = r.find_property("IFoo", "Text").unwrap();
        let getter = text.getter.as_ref().unwrap();
        assert_eq!(property_from_accessor(&r, getter), Ok(text));
    }

    #[test]
    fn setter_resolves() {
        let r = registry();
        let text = r.find_property("IFoo", "Text").unwrap();
        let setter = text.setter.as_ref().unwrap();
        assert_eq!(property_from_accessor(&r, setter), Ok(text));
    }

    #[test]
    fn private_and_static_accessors_resolve() {
        let r = registry();
        let hidden = r.find_property("IFoo", "Hidden").unwrap();
        assert_eq!(property_from_accessor(&r, hidden.setter.as_ref().unwrap()), Ok(hidden));

        let shared = r.find_property("IFoo", "Shared").unwrap();
        assert_eq!(property_from_accessor(&r, shared.getter.as_ref().unwrap()), Ok(shared));
    }

    #[test]
    fn ordinary_method_fails() {
        let r = registry();
        let foo = r.find_method("IFoo", "Foo", &[]).unwrap();
        let err = property_from_accessor(&r, foo).unwrap_err();
        assert_eq!(err.to_string(), "Unable to find property which get or set method is: Void Foo()");
    }

    #[test]
    fn missing_declaring_type_fails() {
        let r = registry();
        let orphan = r.find_property("IFoo", "Text").unwrap()
            .getter.clone().unwrap()
            .without_declaring_type();
        assert!(matches!(property_from_accessor(&r, &orphan), Err(ReflectError::AccessorResolution { .. })));
    }

    #[test]
    fn special_name_without_prefix_fails() {
        let r = registry();
        let op = MethodDescriptor::new(ifoo(), "op_Equality", vec![ifoo(), ifoo()], Some(Type::boolean()))
            .make_static()
            .special_name();
        assert!(property_from_accessor(&r, &op).is_err());
    }

    #[test]
    fn name_alone_is_not_enough() {
        // Right name and prefix, wrong signature: not the declared accessor.
        let r = registry();
        let forged = MethodDescriptor::new(ifoo(), "get_Text", vec![], Some(Type::int32())).special_name();
        assert_eq!(
            property_from_accessor(&r, &forged),
            Err(ReflectError::AccessorResolution { method: "Int32 get_Text()".into() })
        );
    }

    /// Catalog holding one hand-built type, for layouts the registry never
    /// synthesizes.
    struct Fixed {
        desc: TypeDesc,
        convention: AccessorConvention,
    }

    impl TypeCatalog for Fixed {
        fn type_desc(&self, ty: &Type) -> Option<&TypeDesc> {
            (ty == &self.desc.ty).then_some(&self.desc)
        }

        fn convention(&self) -> &AccessorConvention { &self.convention }
    }

    #[test]
    fn first_declared_property_wins_shared_accessor() {
        let getter = MethodDescriptor::new(ifoo(), "get_Value", vec![], Some(Type::int32())).special_name();
        let property = |name: &str| PropertyDescriptor {
            declaring_type: ifoo(),
            name: name.into(),
            ty: Type::int32(),
            getter: Some(getter.clone()),
            setter: None,
        };
        let catalog = Fixed {
            desc: TypeDesc {
                ty: ifoo(),
                is_value_type: false,
                methods: vec![getter.clone()],
                properties: vec![property("First"), property("Second")],
                fields: vec![],
            },
            convention: AccessorConvention::default(),
        };

        let found = property_from_accessor(&catalog, &getter).unwrap();
        assert_eq!(found.name, "First");
    }

    #[test]
    fn unknown_declaring_type_fails() {
        let r = registry();
        let m = MethodDescriptor::new(Type::named("Ghost"), "get_X", vec![], Some(Type::int32())).special_name();
        assert!(property_from_accessor(&r, &m).is_err());
    }
}
