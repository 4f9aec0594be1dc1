//! Selector expression trees.
//!
//! A `Lambda` is a structural description of a selector: parameters plus a
//! body built from a fixed set of node kinds. Trees are never evaluated; the
//! reflector only inspects their shape. Build them by hand with the
//! constructors below or with [`crate::quote`].

mod render;

use serde::{Deserialize, Serialize};

use crate::types::{self, FieldDescriptor, MethodDescriptor, PropertyDescriptor, Type};

// ─── Lambda ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lambda {
    pub params: Vec<Param>,
    pub body:   Expr,
}

impl Lambda {
    pub fn new(params: Vec<Param>, body: Expr) -> Self {
        Self { params, body }
    }

    pub fn param_types(&self) -> Vec<Type> {
        self.params.iter().map(|p| p.ty.clone()).collect()
    }

    /// Static type of the body.
    pub fn return_type(&self) -> Type {
        self.body.ty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty:   Type,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self { name: name.into(), ty }
    }
}

// ─── Literals ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Constant {
    /// `null` typed as the reference type it was converted to.
    Null(Type),
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Double(f64),
    Char(char),
    String(String),
    /// A type literal, e.g. the delegate type handed to a create-delegate call.
    Type(Type),
    /// A method identity literal.
    Method(MethodDescriptor),
}

impl Constant {
    pub fn ty(&self) -> Type {
        match self {
            Constant::Null(t)   => t.clone(),
            Constant::Bool(_)   => Type::boolean(),
            Constant::Int32(_)  => Type::int32(),
            Constant::Int64(_)  => Type::int64(),
            Constant::Double(_) => Type::double(),
            Constant::Char(_)   => Type::char(),
            Constant::String(_) => Type::string(),
            Constant::Type(_)   => Type::named(types::TYPE),
            Constant::Method(_) => Type::named(types::METHOD_INFO),
        }
    }
}

// ─── Members ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Member {
    Property(PropertyDescriptor),
    Field(FieldDescriptor),
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Property(p) => &p.name,
            Member::Field(f)    => &f.name,
        }
    }

    pub fn ty(&self) -> &Type {
        match self {
            Member::Property(p) => &p.ty,
            Member::Field(f)    => &f.ty,
        }
    }

    pub fn declaring_type(&self) -> &Type {
        match self {
            Member::Property(p) => &p.declaring_type,
            Member::Field(f)    => &f.declaring_type,
        }
    }
}

// ─── Expressions ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Reference to one of the lambda's parameters.
    Parameter(Param),

    Constant(Constant),

    /// `target.method(args)`, or `method(args)` when static.
    Call {
        target: Option<Box<Expr>>,
        method: MethodDescriptor,
        args:   Vec<Expr>,
    },

    /// `target.member`, or `Type.member` when static.
    MemberRead {
        target: Option<Box<Expr>>,
        member: Member,
    },

    /// Conversion of `operand` to `ty`. `explicit` is false for widening and
    /// boxing conversions the compiler inserts on its own.
    Convert {
        operand:  Box<Expr>,
        ty:       Type,
        explicit: bool,
    },

    /// `target = value`. The target is a member read.
    Assign {
        target: Box<Expr>,
        value:  Box<Expr>,
    },

    /// The create-delegate operation binding `method` (a `Constant::Method`
    /// literal) to `target`.
    DelegateCreate {
        delegate_type: Type,
        target:        Option<Box<Expr>>,
        method:        Box<Expr>,
    },
}

impl Expr {
    pub fn param(param: &Param) -> Self {
        Expr::Parameter(param.clone())
    }

    pub fn constant(c: Constant) -> Self {
        Expr::Constant(c)
    }

    pub fn call(target: Expr, method: MethodDescriptor, args: Vec<Expr>) -> Self {
        Expr::Call { target: Some(Box::new(target)), method, args }
    }

    pub fn static_call(method: MethodDescriptor, args: Vec<Expr>) -> Self {
        Expr::Call { target: None, method, args }
    }

    pub fn property(target: Expr, property: PropertyDescriptor) -> Self {
        Expr::MemberRead { target: Some(Box::new(target)), member: Member::Property(property) }
    }

    pub fn static_property(property: PropertyDescriptor) -> Self {
        Expr::MemberRead { target: None, member: Member::Property(property) }
    }

    pub fn field(target: Expr, field: FieldDescriptor) -> Self {
        Expr::MemberRead { target: Some(Box::new(target)), member: Member::Field(field) }
    }

    /// Compiler-inserted conversion.
    pub fn convert(operand: Expr, ty: Type) -> Self {
        Expr::Convert { operand: Box::new(operand), ty, explicit: false }
    }

    /// User-written cast.
    pub fn cast(operand: Expr, ty: Type) -> Self {
        Expr::Convert { operand: Box::new(operand), ty, explicit: true }
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Expr::Assign { target: Box::new(target), value: Box::new(value) }
    }

    /// Method group `target.method` converted to a delegate, wrapped in the
    /// conversion to the delegate type the way the compiler emits it.
    pub fn method_group(target: Option<Expr>, method: MethodDescriptor) -> Self {
        let delegate_type = method.signature();
        let create = Expr::DelegateCreate {
            delegate_type: delegate_type.clone(),
            target: target.map(Box::new),
            method: Box::new(Expr::Constant(Constant::Method(method))),
        };
        Expr::convert(create, delegate_type)
    }

    /// Static type of this node.
    pub fn ty(&self) -> Type {
        match self {
            Expr::Parameter(p)                   => p.ty.clone(),
            Expr::Constant(c)                    => c.ty(),
            Expr::Call { method, .. }            => method.return_type(),
            Expr::MemberRead { member, .. }      => member.ty().clone(),
            Expr::Convert { ty, .. }             => ty.clone(),
            Expr::Assign { target, .. }          => target.ty(),
            Expr::DelegateCreate { delegate_type, .. } => delegate_type.clone(),
        }
    }
}
