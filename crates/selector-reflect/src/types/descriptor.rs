//! Member descriptors — immutable identities of methods, properties and fields.
//!
//! Descriptors compare structurally: two `MethodDescriptor`s are equal exactly
//! when they name the same overload on the same declaring type.

use serde::{Deserialize, Serialize};

use super::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Public,
    Internal,
    Protected,
    Private,
}

impl Visibility {
    pub fn is_public(self) -> bool {
        matches!(self, Visibility::Public)
    }
}

// ─── Methods ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// `None` for methods that are not members of any catalog type.
    pub declaring_type:  Option<Type>,
    pub name:            String,
    pub params:          Vec<Type>,
    /// Return type — None means void.
    pub ret:             Option<Type>,
    pub is_static:       bool,
    pub visibility:      Visibility,
    /// Set on compiler-synthesized members such as property accessors.
    pub is_special_name: bool,
}

impl MethodDescriptor {
    /// Public, non-static, ordinary method declared on `declaring_type`.
    pub fn new(
        declaring_type: Type,
        name: impl Into<String>,
        params: Vec<Type>,
        ret: Option<Type>,
    ) -> Self {
        Self {
            declaring_type: Some(declaring_type),
            name: name.into(),
            params,
            ret: ret.filter(|r| !r.is_unit()),
            is_static: false,
            visibility: Visibility::Public,
            is_special_name: false,
        }
    }

    pub fn make_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn special_name(mut self) -> Self {
        self.is_special_name = true;
        self
    }

    pub fn without_declaring_type(mut self) -> Self {
        self.declaring_type = None;
        self
    }

    pub fn return_type(&self) -> Type {
        self.ret.clone().unwrap_or(Type::Unit)
    }

    /// Delegate type a method group of this method converts to.
    pub fn signature(&self) -> Type {
        Type::delegate(self.params.clone(), self.ret.clone())
    }
}

/// `Int32 Foo(String, Int32)` / `Void Baz(String)`.
impl std::fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params: Vec<String> = self.params.iter().map(ToString::to_string).collect();
        write!(f, "{} {}({})", self.return_type(), self.name, params.join(", "))
    }
}

// ─── Properties ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub declaring_type: Type,
    pub name:           String,
    pub ty:             Type,
    /// Get accessor. Carries its own visibility.
    pub getter:         Option<MethodDescriptor>,
    /// Set accessor. Carries its own visibility.
    pub setter:         Option<MethodDescriptor>,
}

impl PropertyDescriptor {
    pub fn can_read(&self) -> bool { self.getter.is_some() }
    pub fn can_write(&self) -> bool { self.setter.is_some() }

    pub fn is_static(&self) -> bool {
        self.getter.iter().chain(self.setter.iter()).any(|m| m.is_static)
    }

    /// True when `method` is this property's get or set accessor, whatever its visibility.
    pub fn has_accessor(&self, method: &MethodDescriptor) -> bool {
        self.getter.as_ref() == Some(method) || self.setter.as_ref() == Some(method)
    }
}

impl std::fmt::Display for PropertyDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.ty, self.name)
    }
}

// ─── Fields ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub declaring_type: Type,
    pub name:           String,
    pub ty:             Type,
    pub is_static:      bool,
    pub visibility:     Visibility,
}

impl std::fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.ty, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some_class() -> Type { Type::named("SomeClass") }

    #[test]
    fn method_display_matches_host_format() {
        let foo = MethodDescriptor::new(some_class(), "Foo", vec![], None);
        assert_eq!(foo.to_string(), "Void Foo()");

        let foo2 = MethodDescriptor::new(some_class(), "Foo", vec![Type::string(), Type::int32()], Some(Type::int32()));
        assert_eq!(foo2.to_string(), "Int32 Foo(String, Int32)");
    }

    #[test]
    fn overloads_are_distinct() {
        let a = MethodDescriptor::new(some_class(), "Foo", vec![], Some(Type::int32()));
        let b = MethodDescriptor::new(some_class(), "Foo", vec![Type::string(), Type::int32()], Some(Type::int32()));
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn unit_return_is_void() {
        let m = MethodDescriptor::new(some_class(), "Baz", vec![Type::string()], Some(Type::Unit));
        assert_eq!(m.ret, None);
        assert_eq!(m.signature(), Type::delegate(vec![Type::string()], None));
    }

    #[test]
    fn accessor_membership_ignores_visibility() {
        let setter = MethodDescriptor::new(some_class(), "set_SetterOnly", vec![Type::int64()], None)
            .special_name();
        let getter = MethodDescriptor::new(some_class(), "get_SetterOnly", vec![], Some(Type::int64()))
            .special_name()
            .with_visibility(Visibility::Private);
        let prop = PropertyDescriptor {
            declaring_type: some_class(),
            name: "SetterOnly".into(),
            ty: Type::int64(),
            getter: Some(getter.clone()),
            setter: Some(setter.clone()),
        };
        assert!(prop.has_accessor(&getter));
        assert!(prop.has_accessor(&setter));
        assert!(!prop.is_static());
        assert_eq!(prop.to_string(), "Int64 SetterOnly");
    }
}
