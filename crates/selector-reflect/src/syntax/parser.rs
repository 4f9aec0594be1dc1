use crate::syntax::ast::*;
use crate::error::{Error, ErrorCode};
use crate::syntax::token::{Token, TokenKind};
use crate::types::Type;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// A fragment is exactly one selector followed by end of input.
    pub fn parse(mut self) -> Result<Selector, Vec<Error>> {
        let selector = self.parse_selector().map_err(|e| vec![e])?;
        if !self.is_at_end() {
            return Err(vec![self.unexpected("end of selector")]);
        }
        Ok(selector)
    }

    // ─── Selector ────────────────────────────────────────────────────────────

    fn parse_selector(&mut self) -> Result<Selector, Error> {
        let span = self.span();
        let params = if self.matches(TokenKind::LParen) {
            let params = self.parse_param_list()?;
            self.expect(TokenKind::RParen)?;
            params
        } else {
            vec![self.parse_param()?]
        };
        let return_ty = if self.matches(TokenKind::Arrow) { Some(self.parse_type()?) } else { None };
        self.expect(TokenKind::FatArrow)?;
        let body = self.parse_body()?;
        Ok(Selector { params, return_ty, body, span })
    }

    fn parse_param_list(&mut self) -> Result<Vec<Param>, Error> {
        let mut params = Vec::new();
        while !self.check(TokenKind::RParen) && !self.is_at_end() {
            params.push(self.parse_param()?);
            if !self.matches(TokenKind::Comma) { break; }
        }
        Ok(params)
    }

    fn parse_param(&mut self) -> Result<Param, Error> {
        let span = self.span();
        let name = self.expect_ident()?;
        self.expect(TokenKind::Colon)?;
        let ty = self.parse_type()?;
        Ok(Param { name, ty, span })
    }

    /// `postfix` or `postfix = postfix`.
    fn parse_body(&mut self) -> Result<Expr, Error> {
        let target = self.parse_postfix()?;
        if self.check(TokenKind::Eq) {
            let span = self.span();
            self.advance();
            let value = self.parse_postfix()?;
            return Ok(Expr::Assign { target: Box::new(target), value: Box::new(value), span });
        }
        Ok(target)
    }

    // ─── Expressions ─────────────────────────────────────────────────────────

    fn parse_postfix(&mut self) -> Result<Expr, Error> {
        let mut expr = self.parse_primary()?;

        loop {
            match self.peek_kind() {
                // field access or method call: expr.name or expr.name(args)
                TokenKind::Dot => {
                    let span = self.span();
                    self.advance();
                    let name = self.expect_ident()?;
                    if self.matches(TokenKind::LParen) {
                        let args = self.parse_arg_list()?;
                        self.expect(TokenKind::RParen)?;
                        expr = Expr::MethodCall { expr: Box::new(expr), method: name, args, span };
                    } else {
                        expr = Expr::Field { expr: Box::new(expr), field: name, span };
                    }
                }

                // cast: expr as Type
                TokenKind::As => {
                    let span = self.span();
                    self.advance();
                    let ty = self.parse_type()?;
                    expr = Expr::Cast { expr: Box::new(expr), ty, span };
                }

                _ => break,
            }
        }

        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, Error> {
        let span = self.span();
        match self.peek_kind() {
            TokenKind::Null         => { self.advance(); Ok(Expr::Null(span)) }
            TokenKind::Bool(b)      => { self.advance(); Ok(Expr::Bool(b, span)) }
            TokenKind::Int(n)       => { self.advance(); Ok(Expr::Int(n, span)) }
            TokenKind::Long(n)      => { self.advance(); Ok(Expr::Long(n, span)) }
            TokenKind::Float(n)     => { self.advance(); Ok(Expr::Float(n, span)) }
            TokenKind::Char(c)      => { self.advance(); Ok(Expr::Char(c, span)) }
            TokenKind::StringLit(s) => { self.advance(); Ok(Expr::StringLit(s, span)) }
            TokenKind::Ident(name)  => { self.advance(); Ok(Expr::Ident(name, span)) }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_postfix()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    fn parse_arg_list(&mut self) -> Result<Vec<Expr>, Error> {
        let mut args = Vec::new();
        while !self.check(TokenKind::RParen) && !self.is_at_end() {
            args.push(self.parse_postfix()?);
            if !self.matches(TokenKind::Comma) { break; }
        }
        Ok(args)
    }

    // ─── Types ───────────────────────────────────────────────────────────────

    /// `Name`, `Void`, or `fn(T1, T2) -> R`.
    fn parse_type(&mut self) -> Result<Type, Error> {
        match self.peek_kind() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(if name == "Void" { Type::Unit } else { Type::Named(name) })
            }
            TokenKind::Fn => {
                self.advance();
                self.expect(TokenKind::LParen)?;
                let mut params = Vec::new();
                while !self.check(TokenKind::RParen) && !self.is_at_end() {
                    params.push(self.parse_type()?);
                    if !self.matches(TokenKind::Comma) { break; }
                }
                self.expect(TokenKind::RParen)?;
                let ret = if self.matches(TokenKind::Arrow) { Some(self.parse_type()?) } else { None };
                Ok(Type::delegate(params, ret))
            }
            _ => Err(self.unexpected("type")),
        }
    }

    // ─── Token primitives ────────────────────────────────────────────────────

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_kind(&self) -> TokenKind {
        self.tokens[self.pos].kind.clone()
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() { self.pos += 1; }
        tok
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) { self.advance(); true } else { false }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, Error> {
        if self.check(kind.clone()) {
            Ok(self.advance())
        } else {
            let tok = self.peek();
            Err(Error::new(
                ErrorCode::P002,
                tok.line,
                tok.column,
                format!("expected {:?}, found {:?}", kind, tok.kind),
            ))
        }
    }

    fn expect_ident(&mut self) -> Result<String, Error> {
        let tok = self.advance();
        match tok.kind {
            TokenKind::Ident(s) => Ok(s),
            _ => Err(Error::new(ErrorCode::P001, tok.line, tok.column, "expected identifier")),
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Eof)
    }

    fn span(&self) -> Span {
        let tok = self.peek();
        Span::new(tok.line, tok.column)
    }

    fn unexpected(&self, expected: &str) -> Error {
        let tok = self.peek();
        Error::new(
            ErrorCode::P001,
            tok.line,
            tok.column,
            format!("expected {}, found {:?}", expected, tok.kind),
        )
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
