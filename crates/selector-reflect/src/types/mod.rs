pub mod descriptor;
pub mod registry;

pub use descriptor::{FieldDescriptor, MethodDescriptor, PropertyDescriptor, Visibility};
pub use registry::{
    AccessorConvention, FieldDecl, MethodDecl, PropertyDecl, TypeBuilder, TypeCatalog, TypeDesc,
    TypeRegistry,
};

use serde::{Deserialize, Serialize};

// ─── Well-known type names ───────────────────────────────────────────────────

pub const OBJECT:  &str = "Object";
pub const STRING:  &str = "String";
pub const BOOLEAN: &str = "Boolean";
pub const CHAR:    &str = "Char";
pub const INT32:   &str = "Int32";
pub const INT64:   &str = "Int64";
pub const DOUBLE:  &str = "Double";
/// Type of a `Constant::Type` literal.
pub const TYPE:    &str = "Type";
/// Type of a `Constant::Method` literal.
pub const METHOD_INFO: &str = "MethodInfo";

// ─── Type ────────────────────────────────────────────────────────────────────

/// Static type of a selector node, a member, or a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    /// Absence of a value. Rendered as `Void`.
    Unit,
    /// Any catalog type, primitive or user-defined (`Int32`, `String`, `Customer`).
    Named(String),
    /// Delegate type: parameter types and optional return type.
    Fn(Vec<Type>, Option<Box<Type>>),
}

impl Type {
    pub fn named(name: impl Into<String>) -> Self {
        Type::Named(name.into())
    }

    pub fn object() -> Self { Type::named(OBJECT) }
    pub fn string() -> Self { Type::named(STRING) }
    pub fn boolean() -> Self { Type::named(BOOLEAN) }
    pub fn char() -> Self { Type::named(CHAR) }
    pub fn int32() -> Self { Type::named(INT32) }
    pub fn int64() -> Self { Type::named(INT64) }
    pub fn double() -> Self { Type::named(DOUBLE) }

    /// Delegate type `fn(params) -> ret`. `ret == None` (or `Unit`) is an action.
    pub fn delegate(params: Vec<Type>, ret: Option<Type>) -> Self {
        let ret = ret.filter(|r| !r.is_unit());
        Type::Fn(params, ret.map(Box::new))
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Type::Unit)
    }

    pub fn is_delegate(&self) -> bool {
        matches!(self, Type::Fn(..))
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Type::Named(n) => Some(n),
            _ => None,
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Unit => f.write_str("Void"),
            Type::Named(n) => f.write_str(n),
            Type::Fn(params, ret) => {
                let mut args: Vec<String> = params.iter().map(ToString::to_string).collect();
                let head = match ret {
                    Some(r) => { args.push(r.to_string()); "Func" }
                    None    => "Action",
                };
                if args.is_empty() {
                    f.write_str(head)
                } else {
                    write!(f, "{head}<{}>", args.join(", "))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_named_and_unit() {
        assert_eq!(Type::int32().to_string(), "Int32");
        assert_eq!(Type::Unit.to_string(), "Void");
    }

    #[test]
    fn display_delegates() {
        assert_eq!(Type::delegate(vec![], Some(Type::int32())).to_string(), "Func<Int32>");
        assert_eq!(
            Type::delegate(vec![Type::string(), Type::int32()], Some(Type::int32())).to_string(),
            "Func<String, Int32, Int32>"
        );
        assert_eq!(Type::delegate(vec![Type::int32()], None).to_string(), "Action<Int32>");
        assert_eq!(Type::delegate(vec![], None).to_string(), "Action");
    }

    #[test]
    fn unit_return_collapses_to_action() {
        assert_eq!(
            Type::delegate(vec![Type::char()], Some(Type::Unit)),
            Type::delegate(vec![Type::char()], None)
        );
    }
}
