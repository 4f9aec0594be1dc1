pub mod binder;
pub mod lookup;


use crate::syntax::ast;
use crate::error::Error;
use crate::expr::Lambda;
use crate::types::TypeCatalog;
use binder::Binder;

// ─── Entry point ─────────────────────────────────────────────────────────────

/// Bind a parsed selector against `catalog`.
///
/// Returns `Ok(lambda)` if there are no errors, `Err(errors)` otherwise.
pub fn bind<C: TypeCatalog + ?Sized>(
    selector: &ast::Selector,
    catalog: &C,
) -> Result<Lambda, Vec<Error>> {
    match Binder::new(catalog).run(selector) {
        (Some(lambda), errors) if errors.is_empty() => Ok(lambda),
        (_, errors) => Err(errors),
    }
}
