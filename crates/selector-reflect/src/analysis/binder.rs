//! Binder — turns a parsed selector into a typed expression tree.
//!
//! Walks the surface AST once, resolving identifiers, members and overloads
//! against the catalog, and inserts the conversions the host compiler would:
//! boxing to `Object`, literal widening, method-group delegate creation.

use tracing::trace;

use crate::error::{Error, ErrorCode};
use crate::expr::{self, Constant, Lambda};
use crate::syntax::ast::{self, Span};
use crate::types::{Type, TypeCatalog};
use super::lookup::{LookupContext, OverloadError};

/// Result of binding a sub-expression. Only `Value` can appear in the tree;
/// a type name is legal solely as the target of a member access.
enum Bound {
    Value(expr::Expr),
    /// A type name, used for static access.
    Type(Type),
}

pub struct Binder<'c, C: TypeCatalog + ?Sized> {
    pub errors: Vec<Error>,
    params: Vec<expr::Param>,
    lookup: LookupContext<'c, C>,
}

impl<'c, C: TypeCatalog + ?Sized> Binder<'c, C> {
    pub fn new(catalog: &'c C) -> Self {
        Self { errors: Vec::new(), params: Vec::new(), lookup: LookupContext::new(catalog) }
    }

    pub fn run(mut self, selector: &ast::Selector) -> (Option<Lambda>, Vec<Error>) {
        let lambda = self.bind_selector(selector);
        (lambda, self.errors)
    }

    // ── Selector ──────────────────────────────────────────────────────────────

    fn bind_selector(&mut self, selector: &ast::Selector) -> Option<Lambda> {
        for p in &selector.params {
            if self.check_type(&p.ty, &p.span) {
                if self.params.iter().any(|q| q.name == p.name) {
                    self.error(ErrorCode::B005, &p.span, format!("duplicate parameter `{}`", p.name));
                }
                self.params.push(expr::Param::new(p.name.clone(), p.ty.clone()));
            }
        }
        if let Some(ret) = &selector.return_ty {
            if !ret.is_unit() {
                self.check_type(ret, &selector.span);
            }
        }
        if !self.errors.is_empty() {
            return None;
        }

        let body = match (&selector.body, &selector.return_ty) {
            (ast::Expr::Field { expr: receiver, field, span }, Some(delegate @ Type::Fn(..))) => {
                self.bind_member_or_group(receiver, field, span, delegate)?
            }
            (ast::Expr::Assign { target, value, span }, _) => self.bind_assign(target, value, span)?,
            (body, _) => self.bind_value(body)?,
        };

        let body = match &selector.return_ty {
            Some(ret) => self.convert_result(body, ret, selector.body.span())?,
            None => body,
        };
        Some(Lambda::new(self.params.clone(), body))
    }

    /// Declared result type vs. body type. Value types box to `Object`,
    /// references widen to it with no node, literals are re-typed.
    fn convert_result(&mut self, body: expr::Expr, ret: &Type, span: &Span) -> Option<expr::Expr> {
        let body_ty = body.ty();
        if &body_ty == ret {
            return Some(body);
        }
        if ret.is_unit() {
            self.error(ErrorCode::B005, span, format!("selector returns {body_ty}, declared Void"));
            return None;
        }
        match self.lookup.coerce(body, ret) {
            Some(converted) => {
                trace!(from = %body_ty, to = %ret, "converted selector result");
                Some(converted)
            }
            None => {
                self.error(ErrorCode::B005, span, format!("selector returns {body_ty}, declared {ret}"));
                None
            }
        }
    }

    // ── Assignment ────────────────────────────────────────────────────────────

    fn bind_assign(&mut self, target: &ast::Expr, value: &ast::Expr, span: &Span) -> Option<expr::Expr> {
        let bound_target = self.bind_value(target)?;
        let writable = match &bound_target {
            expr::Expr::MemberRead { member: expr::Member::Property(p), .. } => p.can_write(),
            expr::Expr::MemberRead { member: expr::Member::Field(_), .. } => true,
            _ => false,
        };
        if !writable {
            self.error(ErrorCode::B006, target.span(), format!("`{bound_target}` cannot be assigned to"));
            return None;
        }

        let bound_value = self.bind_value(value)?;
        let target_ty = bound_target.ty();
        let value_ty = bound_value.ty();
        let Some(value) = self.lookup.coerce(bound_value, &target_ty) else {
            self.error(ErrorCode::B005, span, format!("cannot assign {value_ty} to {target_ty}"));
            return None;
        };
        Some(expr::Expr::assign(bound_target, value))
    }

    // ── Expressions ───────────────────────────────────────────────────────────

    fn bind_value(&mut self, e: &ast::Expr) -> Option<expr::Expr> {
        match self.bind(e)? {
            Bound::Value(v) => Some(v),
            Bound::Type(t) => {
                self.error(ErrorCode::B005, e.span(), format!("type `{t}` used as a value"));
                None
            }
        }
    }

    fn bind(&mut self, e: &ast::Expr) -> Option<Bound> {
        let value = match e {
            ast::Expr::Null(_)         => expr::Expr::constant(Constant::Null(Type::object())),
            ast::Expr::Bool(b, _)      => expr::Expr::constant(Constant::Bool(*b)),
            ast::Expr::Long(n, _)      => expr::Expr::constant(Constant::Int64(*n)),
            ast::Expr::Float(n, _)     => expr::Expr::constant(Constant::Double(*n)),
            ast::Expr::Char(c, _)      => expr::Expr::constant(Constant::Char(*c)),
            ast::Expr::StringLit(s, _) => expr::Expr::constant(Constant::String(s.clone())),
            ast::Expr::Int(n, span) => match i32::try_from(*n) {
                Ok(n) => expr::Expr::constant(Constant::Int32(n)),
                Err(_) => {
                    self.error(ErrorCode::B005, span, format!("{n} does not fit in Int32"));
                    return None;
                }
            },

            ast::Expr::Ident(name, span) => return self.bind_ident(name, span),

            ast::Expr::Field { expr: receiver, field, span } => {
                let (target, owner, is_static) = self.bind_target(receiver)?;
                return self.bind_member(target, &owner, is_static, field, span).map(Bound::Value);
            }

            ast::Expr::MethodCall { expr: receiver, method, args, span } => {
                let (target, owner, is_static) = self.bind_target(receiver)?;
                let args = args.iter().map(|a| self.bind_value(a)).collect::<Option<Vec<_>>>()?;
                self.bind_call(target, &owner, is_static, method, args, span)?
            }

            ast::Expr::Cast { expr: inner, ty, span } => {
                let operand = self.bind_value(inner)?;
                if !self.check_type(ty, span) {
                    return None;
                }
                expr::Expr::cast(operand, ty.clone())
            }

            ast::Expr::Assign { span, .. } => {
                self.error(ErrorCode::B005, span, "assignment is only allowed as the whole selector body");
                return None;
            }
        };
        Some(Bound::Value(value))
    }

    fn bind_ident(&mut self, name: &str, span: &Span) -> Option<Bound> {
        if let Some(p) = self.params.iter().find(|p| p.name == name) {
            return Some(Bound::Value(expr::Expr::param(p)));
        }
        let ty = Type::named(name);
        if self.lookup.catalog.type_desc(&ty).is_some() {
            return Some(Bound::Type(ty));
        }
        self.error(ErrorCode::B001, span, format!("unknown identifier `{name}`"));
        None
    }

    /// Target of `.`: the receiver (None when static), its type, and whether
    /// the access is static.
    fn bind_target(&mut self, e: &ast::Expr) -> Option<(Option<expr::Expr>, Type, bool)> {
        match self.bind(e)? {
            Bound::Value(v) => {
                let ty = v.ty();
                Some((Some(v), ty, false))
            }
            Bound::Type(t) => Some((None, t, true)),
        }
    }

    // ── Members ───────────────────────────────────────────────────────────────

    fn bind_member(
        &mut self,
        target: Option<expr::Expr>,
        owner: &Type,
        is_static: bool,
        name: &str,
        span: &Span,
    ) -> Option<expr::Expr> {
        if let Some(p) = self.lookup.property(owner, name, is_static) {
            trace!(property = %p, "bound property read");
            return Some(expr::Expr::MemberRead {
                target: target.map(Box::new),
                member: expr::Member::Property(p.clone()),
            });
        }
        if let Some(f) = self.lookup.field(owner, name, is_static) {
            trace!(field = %f, "bound field read");
            return Some(expr::Expr::MemberRead {
                target: target.map(Box::new),
                member: expr::Member::Field(f.clone()),
            });
        }
        if !self.lookup.methods(owner, name, is_static).is_empty() {
            self.error(ErrorCode::B007, span, format!("method group `{owner}.{name}` used as a value"));
        } else {
            self.error(ErrorCode::B002, span, format!("`{owner}` has no member `{name}`"));
        }
        None
    }

    /// Whole-body `x.Name` under a delegate result type: property or field
    /// first, then the method group matching the delegate signature.
    fn bind_member_or_group(
        &mut self,
        target: &ast::Expr,
        name: &str,
        span: &Span,
        delegate: &Type,
    ) -> Option<expr::Expr> {
        let (receiver, owner, is_static) = self.bind_target(target)?;
        if self.lookup.property(&owner, name, is_static).is_some()
            || self.lookup.field(&owner, name, is_static).is_some()
        {
            return self.bind_member(receiver, &owner, is_static, name, span);
        }
        match self.lookup.method_for_delegate(&owner, name, is_static, delegate) {
            Ok(m) => {
                trace!(method = %m, delegate = %delegate, "bound method group");
                Some(expr::Expr::method_group(receiver, m.clone()))
            }
            Err(OverloadError::NotFound) => {
                self.error(ErrorCode::B002, span, format!("`{owner}` has no member `{name}`"));
                None
            }
            Err(_) => {
                self.error(ErrorCode::B003, span, format!("no overload of `{owner}.{name}` matches {delegate}"));
                None
            }
        }
    }

    fn bind_call(
        &mut self,
        target: Option<expr::Expr>,
        owner: &Type,
        is_static: bool,
        name: &str,
        args: Vec<expr::Expr>,
        span: &Span,
    ) -> Option<expr::Expr> {
        let arg_types: Vec<String> = args.iter().map(|a| a.ty().to_string()).collect();
        match self.lookup.select_overload(owner, name, is_static, args) {
            Ok((method, args)) => Some(expr::Expr::Call {
                target: target.map(Box::new),
                method: method.clone(),
                args,
            }),
            Err(OverloadError::NotFound) => {
                self.error(ErrorCode::B002, span, format!("`{owner}` has no method `{name}`"));
                None
            }
            Err(OverloadError::NoneApplicable) => {
                self.error(
                    ErrorCode::B003,
                    span,
                    format!("no overload of `{owner}.{name}` accepts ({})", arg_types.join(", ")),
                );
                None
            }
            Err(OverloadError::Ambiguous(candidates)) => {
                let list: Vec<String> = candidates.iter().map(ToString::to_string).collect();
                self.error(
                    ErrorCode::B004,
                    span,
                    format!("call to `{owner}.{name}` is ambiguous between {}", list.join(" and ")),
                );
                None
            }
        }
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// Every named type mentioned in `ty` must be in the catalog.
    fn check_type(&mut self, ty: &Type, span: &Span) -> bool {
        match ty {
            Type::Unit => {
                self.error(ErrorCode::B005, span, "`Void` is only valid as a delegate result");
                false
            }
            Type::Named(name) => {
                if self.lookup.catalog.type_desc(ty).is_some() {
                    true
                } else {
                    self.error(ErrorCode::B001, span, format!("unknown type `{name}`"));
                    false
                }
            }
            Type::Fn(params, ret) => {
                let mut ok = true;
                for p in params {
                    ok &= self.check_type(p, span);
                }
                if let Some(r) = ret {
                    ok &= self.check_type(r, span);
                }
                ok
            }
        }
    }

    fn error(&mut self, code: ErrorCode, span: &Span, message: impl Into<String>) {
        self.errors.push(Error::new(code, span.line, span.column, message));
    }
}
