//! Type catalog — single source of truth for the declared members of every
//! type a selector can reference.
//!
//! Consumed by:
//!   • The binder           — member and overload lookup while quoting a fragment
//!   • The accessor resolver — declared properties of an accessor's declaring type
//!
//! Every member list keeps declaration order. Property accessors are
//! synthesized at registration time from the registry's `AccessorConvention`
//! and are listed among the declared methods right where the property was
//! declared.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::descriptor::{FieldDescriptor, MethodDescriptor, PropertyDescriptor, Visibility};
use super::Type;

// ─── Accessor naming convention ──────────────────────────────────────────────

/// Name prefixes of compiler-synthesized property accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessorConvention {
    pub getter_prefix: String,
    pub setter_prefix: String,
}

impl Default for AccessorConvention {
    fn default() -> Self {
        Self { getter_prefix: "get_".into(), setter_prefix: "set_".into() }
    }
}

impl AccessorConvention {
    pub fn getter_name(&self, property: &str) -> String {
        format!("{}{property}", self.getter_prefix)
    }

    pub fn setter_name(&self, property: &str) -> String {
        format!("{}{property}", self.setter_prefix)
    }

    /// True when `name` carries either accessor prefix.
    pub fn is_accessor_name(&self, name: &str) -> bool {
        name.starts_with(&self.getter_prefix) || name.starts_with(&self.setter_prefix)
    }
}

// ─── Catalog seam ────────────────────────────────────────────────────────────

/// Read-only view of the host's type/member catalog.
///
/// Implementors only need `type_desc` and `convention`; the member lists are
/// derived from the descriptor and must be in declaration order.
pub trait TypeCatalog {
    fn type_desc(&self, ty: &Type) -> Option<&TypeDesc>;

    fn convention(&self) -> &AccessorConvention;

    /// Methods declared on `ty` (including synthesized accessors), every
    /// visibility, static and instance.
    fn declared_methods(&self, ty: &Type) -> &[MethodDescriptor] {
        self.type_desc(ty).map_or(&[][..], |d| d.methods.as_slice())
    }

    /// Properties declared on `ty`, every visibility, static and instance.
    fn declared_properties(&self, ty: &Type) -> &[PropertyDescriptor] {
        self.type_desc(ty).map_or(&[][..], |d| d.properties.as_slice())
    }

    fn declared_fields(&self, ty: &Type) -> &[FieldDescriptor] {
        self.type_desc(ty).map_or(&[][..], |d| d.fields.as_slice())
    }

    fn is_value_type(&self, ty: &Type) -> bool {
        self.type_desc(ty).is_some_and(|d| d.is_value_type)
    }
}

// ─── Descriptors ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct TypeDesc {
    pub ty:            Type,
    pub is_value_type: bool,
    pub methods:       Vec<MethodDescriptor>,
    pub properties:    Vec<PropertyDescriptor>,
    pub fields:        Vec<FieldDescriptor>,
}

// ─── Declarations ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct MethodDecl {
    name:       String,
    params:     Vec<Type>,
    ret:        Option<Type>,
    is_static:  bool,
    visibility: Visibility,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), params: Vec::new(), ret: None, is_static: false, visibility: Visibility::Public }
    }

    pub fn param(mut self, ty: Type) -> Self {
        self.params.push(ty);
        self
    }

    pub fn returns(mut self, ty: Type) -> Self {
        self.ret = Some(ty);
        self
    }

    pub fn make_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

/// A property declaration. Each accessor is present only when given a visibility.
#[derive(Debug, Clone)]
pub struct PropertyDecl {
    name:      String,
    ty:        Type,
    is_static: bool,
    get:       Option<Visibility>,
    set:       Option<Visibility>,
}

impl PropertyDecl {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self { name: name.into(), ty, is_static: false, get: None, set: None }
    }

    pub fn get(mut self, visibility: Visibility) -> Self {
        self.get = Some(visibility);
        self
    }

    pub fn set(mut self, visibility: Visibility) -> Self {
        self.set = Some(visibility);
        self
    }

    /// Public getter and public setter.
    pub fn get_set(self) -> Self {
        self.get(Visibility::Public).set(Visibility::Public)
    }

    pub fn make_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}

#[derive(Debug, Clone)]
pub struct FieldDecl {
    name:       String,
    ty:         Type,
    is_static:  bool,
    visibility: Visibility,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self { name: name.into(), ty, is_static: false, visibility: Visibility::Public }
    }

    pub fn make_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

#[derive(Debug, Clone)]
enum MemberDecl {
    Method(MethodDecl),
    Property(PropertyDecl),
    Field(FieldDecl),
}

/// Collects member declarations for one type, in declaration order.
#[derive(Debug, Clone)]
pub struct TypeBuilder {
    name:          String,
    is_value_type: bool,
    members:       Vec<MemberDecl>,
}

impl TypeBuilder {
    /// Reference type — accepts `null`.
    pub fn class(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_value_type: false, members: Vec::new() }
    }

    /// Value type — results are boxed when widened to `Object`.
    pub fn value(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_value_type: true, members: Vec::new() }
    }

    pub fn method(mut self, decl: MethodDecl) -> Self {
        self.members.push(MemberDecl::Method(decl));
        self
    }

    pub fn property(mut self, decl: PropertyDecl) -> Self {
        self.members.push(MemberDecl::Property(decl));
        self
    }

    pub fn field(mut self, decl: FieldDecl) -> Self {
        self.members.push(MemberDecl::Field(decl));
        self
    }

    fn build(self, convention: &AccessorConvention) -> TypeDesc {
        let ty = Type::Named(self.name);
        let mut methods    = Vec::new();
        let mut properties = Vec::new();
        let mut fields     = Vec::new();

        for member in self.members {
            match member {
                MemberDecl::Method(m) => {
                    let mut desc = MethodDescriptor::new(ty.clone(), m.name, m.params, m.ret)
                        .with_visibility(m.visibility);
                    desc.is_static = m.is_static;
                    methods.push(desc);
                }
                MemberDecl::Property(p) => {
                    let accessor = |name: String, params: Vec<Type>, ret: Option<Type>, vis: Visibility| {
                        let mut m = MethodDescriptor::new(ty.clone(), name, params, ret)
                            .with_visibility(vis)
                            .special_name();
                        m.is_static = p.is_static;
                        m
                    };
                    let getter = p.get.map(|vis| {
                        accessor(convention.getter_name(&p.name), vec![], Some(p.ty.clone()), vis)
                    });
                    let setter = p.set.map(|vis| {
                        accessor(convention.setter_name(&p.name), vec![p.ty.clone()], None, vis)
                    });
                    methods.extend(getter.iter().cloned());
                    methods.extend(setter.iter().cloned());
                    properties.push(PropertyDescriptor {
                        declaring_type: ty.clone(),
                        name: p.name,
                        ty: p.ty,
                        getter,
                        setter,
                    });
                }
                MemberDecl::Field(f) => fields.push(FieldDescriptor {
                    declaring_type: ty.clone(),
                    name: f.name,
                    ty: f.ty,
                    is_static: f.is_static,
                    visibility: f.visibility,
                }),
            }
        }

        TypeDesc { ty, is_value_type: self.is_value_type, methods, properties, fields }
    }
}

// ─── Registry ────────────────────────────────────────────────────────────────

pub struct TypeRegistry {
    types:      HashMap<String, TypeDesc>,
    convention: AccessorConvention,
}

impl TypeRegistry {
    /// Same as [`Default`]: primitives registered, default accessor convention.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the primitive types, synthesizing accessors
    /// with `convention`.
    pub fn with_convention(convention: AccessorConvention) -> Self {
        let mut r = Self { types: HashMap::new(), convention };
        r.register(object_desc());
        r.register(string_desc());
        r.register(boolean_desc());
        r.register(char_desc());
        r.register(int32_desc());
        r.register(int64_desc());
        r.register(double_desc());
        r.register(TypeBuilder::class("IFormatProvider"));
        r.register(TypeBuilder::class(super::TYPE));
        r.register(TypeBuilder::class(super::METHOD_INFO));
        r
    }

    /// Register (or replace) a type. Accessors are synthesized here.
    pub fn register(&mut self, builder: TypeBuilder) {
        let desc = builder.build(&self.convention);
        if let Type::Named(name) = &desc.ty {
            self.types.insert(name.clone(), desc);
        }
    }

    pub fn get(&self, name: &str) -> Option<&TypeDesc> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    // ── Lookup by name ────────────────────────────────────────────────────────

    /// The overload of `name` on `type_name` with exactly these parameter types.
    pub fn find_method(&self, type_name: &str, name: &str, params: &[Type]) -> Option<&MethodDescriptor> {
        self.types.get(type_name)?
            .methods.iter()
            .find(|m| m.name == name && m.params == params)
    }

    /// Property named `name` on `type_name`, any visibility, static or instance.
    pub fn find_property(&self, type_name: &str, name: &str) -> Option<&PropertyDescriptor> {
        self.types.get(type_name)?
            .properties.iter()
            .find(|p| p.name == name)
    }

    pub fn find_field(&self, type_name: &str, name: &str) -> Option<&FieldDescriptor> {
        self.types.get(type_name)?
            .fields.iter()
            .find(|f| f.name == name)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::with_convention(AccessorConvention::default())
    }
}

impl TypeCatalog for TypeRegistry {
    fn type_desc(&self, ty: &Type) -> Option<&TypeDesc> {
        self.types.get(ty.name()?)
    }

    fn convention(&self) -> &AccessorConvention {
        &self.convention
    }
}

// ─── Primitives ──────────────────────────────────────────────────────────────

fn to_string_method() -> MethodDecl {
    MethodDecl::new("ToString").returns(Type::string())
}

fn object_desc() -> TypeBuilder {
    TypeBuilder::class(super::OBJECT)
        .method(to_string_method())
        .method(MethodDecl::new("Equals").param(Type::object()).returns(Type::boolean()))
        .method(MethodDecl::new("GetHashCode").returns(Type::int32()))
}

fn string_desc() -> TypeBuilder {
    TypeBuilder::class(super::STRING)
        .property(PropertyDecl::new("Length", Type::int32()).get(Visibility::Public))
        .method(to_string_method())
        .method(MethodDecl::new("Trim").returns(Type::string()))
        .method(MethodDecl::new("Contains").param(Type::string()).returns(Type::boolean()))
}

fn boolean_desc() -> TypeBuilder {
    TypeBuilder::value(super::BOOLEAN).method(to_string_method())
}

fn char_desc() -> TypeBuilder {
    TypeBuilder::value(super::CHAR).method(to_string_method())
}

fn int32_desc() -> TypeBuilder {
    TypeBuilder::value(super::INT32)
        .method(to_string_method())
        .method(to_string_method().param(Type::named("IFormatProvider")))
        .method(MethodDecl::new("CompareTo").param(Type::int32()).returns(Type::int32()))
}

fn int64_desc() -> TypeBuilder {
    TypeBuilder::value(super::INT64).method(to_string_method())
}

fn double_desc() -> TypeBuilder {
    TypeBuilder::value(super::DOUBLE).method(to_string_method())
}
