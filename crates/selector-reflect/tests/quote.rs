//! Quoting through the public `quote()` API.
//!
//! Malformed fragments must come back as coded errors, never as panics.

mod common;

use common::{registry, selector};
use selector_reflect::{quote, Constant, Error, ErrorCode, Expr, TypeRegistry};

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn err(r: &TypeRegistry, src: &str) -> Vec<Error> {
    match quote(r, src) {
        Ok(l)  => panic!("expected quote to fail but got {l}"),
        Err(e) => e,
    }
}

fn has(errs: &[Error], code: ErrorCode) -> bool {
    errs.iter().any(|e| e.code == code)
}

// ─── Lexical edge cases ──────────────────────────────────────────────────────

#[test]
fn char_literal_cut_after_backslash() {
    let errs = err(&TypeRegistry::default(), "() => '\\");
    assert_eq!(errs.len(), 1);
    assert!(has(&errs, ErrorCode::L002));
}

#[test]
fn string_literal_cut_after_backslash() {
    let errs = err(&TypeRegistry::default(), "() => \"\\");
    assert!(has(&errs, ErrorCode::L002));
}

#[test]
fn non_ascii_char_argument() {
    let r = registry();
    let l = selector(
        &r,
        "(c: SomeClass, a: Int32, b: String, d: Int64, f: Object) => c.Action(a, b, d, 'é', f)",
    );
    let Expr::Call { args, .. } = &l.body else { panic!("expected call") };
    assert_eq!(args[3], Expr::constant(Constant::Char('é')));
    assert_eq!(l.to_string(), "(c, a, b, d, f) => c.Action(a, b, d, é, f)");
}

#[test]
fn non_ascii_char_is_a_single_token() {
    // One coded error for the mismatched argument, nothing from the lexer.
    let errs = err(&registry(), "(s: String) => s.Contains('é')");
    assert_eq!(errs.len(), 1);
    assert!(has(&errs, ErrorCode::B003));
}

#[test]
fn stray_non_ascii_character() {
    let errs = err(&registry(), "c: SomeClass => c.Prop §");
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].message, "unexpected character `§`");
}

#[test]
fn new_registry_knows_primitives() {
    let r = TypeRegistry::new();
    let l = quote(&r, "(n: Int32, p: IFormatProvider) => n.ToString(p)");
    assert!(l.is_ok(), "{l:?}");
}
