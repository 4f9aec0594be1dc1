//! Surface syntax of a quoted selector fragment, before binding.

use crate::types::Type;

/// Source location attached to every node for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

// ─── Top level ───────────────────────────────────────────────────────────────

/// `(c: SomeClass, v: Int64) -> Int64 => c.Prop = v`
#[derive(Debug, Clone)]
pub struct Selector {
    pub params: Vec<Param>,
    /// Declared result type. Drives boxing and method-group conversions.
    pub return_ty: Option<Type>,
    pub body: Expr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: Type,
    pub span: Span,
}

// ─── Expressions ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum Expr {
    Null(Span),
    Bool(bool, Span),
    Int(i64, Span),
    Long(i64, Span),
    Float(f64, Span),
    Char(char, Span),
    StringLit(String, Span),
    /// A parameter name or a type name.
    Ident(String, Span),

    /// `expr.field`
    Field {
        expr: Box<Expr>,
        field: String,
        span: Span,
    },

    /// `expr.method(args)`
    MethodCall {
        expr: Box<Expr>,
        method: String,
        args: Vec<Expr>,
        span: Span,
    },

    /// `expr as Type`
    Cast {
        expr: Box<Expr>,
        ty: Type,
        span: Span,
    },

    /// `target = value` — only valid as the whole body.
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> &Span {
        match self {
            Expr::Null(s)           => s,
            Expr::Bool(_, s)        => s,
            Expr::Int(_, s)         => s,
            Expr::Long(_, s)        => s,
            Expr::Float(_, s)       => s,
            Expr::Char(_, s)        => s,
            Expr::StringLit(_, s)   => s,
            Expr::Ident(_, s)       => s,
            Expr::Field { span, .. }      => span,
            Expr::MethodCall { span, .. } => span,
            Expr::Cast { span, .. }       => span,
            Expr::Assign { span, .. }     => span,
        }
    }
}
