//! Centralized member and overload lookup for the binder.
//!
//! Resolves `x.Name` and `x.Name(args)` by consulting, in order:
//! 1. Members declared on the target's own type
//! 2. Members declared on `Object`, which every type derives from
//!
//! Static access (`Type.Name`) only sees static members, instance access only
//! instance members. Synthesized accessors are never callable by name.

use tracing::trace;

use crate::expr::{Constant, Expr};
use crate::types::{
    self, FieldDescriptor, MethodDescriptor, PropertyDescriptor, Type, TypeCatalog,
};

pub struct LookupContext<'c, C: TypeCatalog + ?Sized> {
    pub catalog: &'c C,
}

/// Failure of overload selection.
#[derive(Debug, Clone, PartialEq)]
pub enum OverloadError {
    /// No overload of that name on the type at all.
    NotFound,
    /// Overloads exist but none accepts the arguments.
    NoneApplicable,
    /// Several candidates tie on exact matches.
    Ambiguous(Vec<MethodDescriptor>),
}

/// How one argument reaches its parameter type.
#[derive(Debug, Clone, PartialEq)]
enum Coercion {
    Exact,
    /// A literal re-typed in place: `null` to a reference type, an integer
    /// literal to `Int64` or `Double`.
    Retype(Constant),
    /// Boxing of a value type to `Object`.
    Box,
    /// Reference conversion to `Object`; no node is emitted.
    Reference,
}

impl<'c, C: TypeCatalog + ?Sized> LookupContext<'c, C> {
    pub fn new(catalog: &'c C) -> Self {
        Self { catalog }
    }

    /// Types whose declared members are visible through a value of `ty`.
    fn search_chain(&self, ty: &Type) -> Vec<Type> {
        match ty {
            Type::Named(n) if n == types::OBJECT => vec![ty.clone()],
            Type::Named(_) => vec![ty.clone(), Type::object()],
            _ => Vec::new(),
        }
    }

    // ── Properties and fields ────────────────────────────────────────────────

    pub fn property(&self, ty: &Type, name: &str, is_static: bool) -> Option<&'c PropertyDescriptor> {
        self.search_chain(ty).iter().find_map(|t| {
            self.catalog
                .declared_properties(t)
                .iter()
                .find(|p| p.name == name && p.is_static() == is_static)
        })
    }

    pub fn field(&self, ty: &Type, name: &str, is_static: bool) -> Option<&'c FieldDescriptor> {
        self.search_chain(ty).iter().find_map(|t| {
            self.catalog
                .declared_fields(t)
                .iter()
                .find(|f| f.name == name && f.is_static == is_static)
        })
    }

    // ── Methods ───────────────────────────────────────────────────────────────

    /// Callable overloads of `name`, taken from the first type in the search
    /// chain that declares any.
    pub fn methods(&self, ty: &Type, name: &str, is_static: bool) -> Vec<&'c MethodDescriptor> {
        for t in self.search_chain(ty) {
            let found: Vec<&'c MethodDescriptor> = self
                .catalog
                .declared_methods(&t)
                .iter()
                .filter(|m| m.name == name && m.is_static == is_static && !m.is_special_name)
                .collect();
            if !found.is_empty() {
                return found;
            }
        }
        Vec::new()
    }

    /// The overload whose signature is exactly `delegate`, for method groups.
    pub fn method_for_delegate(
        &self,
        ty: &Type,
        name: &str,
        is_static: bool,
        delegate: &Type,
    ) -> Result<&'c MethodDescriptor, OverloadError> {
        let candidates = self.methods(ty, name, is_static);
        if candidates.is_empty() {
            return Err(OverloadError::NotFound);
        }
        candidates
            .into_iter()
            .find(|m| &m.signature() == delegate)
            .ok_or(OverloadError::NoneApplicable)
    }

    /// Pick the overload of `name` accepting `args` and return it with the
    /// arguments rewritten to the selected parameter types.
    pub fn select_overload(
        &self,
        ty: &Type,
        name: &str,
        is_static: bool,
        args: Vec<Expr>,
    ) -> Result<(&'c MethodDescriptor, Vec<Expr>), OverloadError> {
        let candidates = self.methods(ty, name, is_static);
        if candidates.is_empty() {
            return Err(OverloadError::NotFound);
        }

        let mut best: Vec<(&'c MethodDescriptor, Vec<Coercion>)> = Vec::new();
        let mut best_exact = 0;
        for m in candidates.into_iter().filter(|m| m.params.len() == args.len()) {
            let Some(coercions) = self.coerce_all(&m.params, &args) else { continue };
            let exact = coercions.iter().filter(|c| **c == Coercion::Exact).count();
            trace!(candidate = %m, exact, "applicable overload");
            if best.is_empty() || exact > best_exact {
                best_exact = exact;
                best = vec![(m, coercions)];
            } else if exact == best_exact {
                best.push((m, coercions));
            }
        }

        match best.len() {
            0 => Err(OverloadError::NoneApplicable),
            1 => {
                let (method, coercions) = best.remove(0);
                trace!(method = %method, "selected overload");
                let args = args
                    .into_iter()
                    .zip(coercions)
                    .zip(&method.params)
                    .map(|((arg, c), param)| apply(arg, c, param))
                    .collect();
                Ok((method, args))
            }
            _ => Err(OverloadError::Ambiguous(best.into_iter().map(|(m, _)| m.clone()).collect())),
        }
    }

    /// Convert a bound value to `target` the way an argument would be.
    pub fn coerce(&self, value: Expr, target: &Type) -> Option<Expr> {
        let c = self.coercion(target, &value)?;
        Some(apply(value, c, target))
    }

    fn coerce_all(&self, params: &[Type], args: &[Expr]) -> Option<Vec<Coercion>> {
        params.iter().zip(args).map(|(p, a)| self.coercion(p, a)).collect()
    }

    fn coercion(&self, param: &Type, arg: &Expr) -> Option<Coercion> {
        match arg {
            Expr::Constant(Constant::Null(_)) => {
                if param.is_delegate() || !self.catalog.is_value_type(param) {
                    return Some(Coercion::Retype(Constant::Null(param.clone())));
                }
                return None;
            }
            Expr::Constant(Constant::Int32(n)) if param.name() == Some(types::INT64) => {
                return Some(Coercion::Retype(Constant::Int64(i64::from(*n))));
            }
            Expr::Constant(Constant::Int32(n)) if param.name() == Some(types::DOUBLE) => {
                return Some(Coercion::Retype(Constant::Double(f64::from(*n))));
            }
            _ => {}
        }

        let arg_ty = arg.ty();
        if &arg_ty == param {
            Some(Coercion::Exact)
        } else if param.name() == Some(types::OBJECT) && !arg_ty.is_unit() {
            if self.catalog.is_value_type(&arg_ty) { Some(Coercion::Box) } else { Some(Coercion::Reference) }
        } else {
            None
        }
    }
}

fn apply(arg: Expr, coercion: Coercion, param: &Type) -> Expr {
    match coercion {
        Coercion::Exact | Coercion::Reference => arg,
        Coercion::Retype(c) => Expr::constant(c),
        Coercion::Box => Expr::convert(arg, param.clone()),
    }
}
