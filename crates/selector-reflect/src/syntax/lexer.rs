use crate::error::{Error, ErrorCode};
use crate::syntax::token::{Token, TokenKind, keyword_or_ident};

pub struct Lexer<'a> {
    text: &'a str,
    source: &'a [u8],
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { text: source, source: source.as_bytes(), pos: 0, line: 1, column: 1 }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<Error>> {
        let mut tokens = Vec::new();
        let mut errors = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                tokens.push(Token::new(TokenKind::Eof, self.line, self.column));
                break;
            }

            match self.next_token() {
                Ok(Some(tok)) => tokens.push(tok),
                Ok(None) => {}
                Err(e) => errors.push(e),
            }
        }

        if errors.is_empty() { Ok(tokens) } else { Err(errors) }
    }

    fn next_token(&mut self) -> Result<Option<Token>, Error> {
        let line = self.line;
        let col = self.column;
        let ch = self.advance();

        let kind = match ch {
            b':' => TokenKind::Colon,
            b',' => TokenKind::Comma,
            b'.' => TokenKind::Dot,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,

            b'-' => {
                if self.peek() == b'>' { self.advance(); TokenKind::Arrow }
                else if self.peek().is_ascii_digit() {
                    let first = self.advance();
                    self.read_number(first, true, line, col)?
                }
                else {
                    return Err(Error::new(ErrorCode::L001, line, col,
                        "expected `->` or a negative number after `-`"));
                }
            }
            b'=' => {
                if self.peek() == b'>' { self.advance(); TokenKind::FatArrow }
                else { TokenKind::Eq }
            }
            b'/' => {
                if self.peek() == b'/' { self.skip_line(); return Ok(None); }
                else if self.peek() == b'*' { self.skip_block_comment(); return Ok(None); }
                else {
                    return Err(Error::new(ErrorCode::L001, line, col, "unexpected character `/`"));
                }
            }

            b'"'  => TokenKind::StringLit(self.read_string(line, col)?),
            b'\'' => TokenKind::Char(self.read_char(line, col)?),
            b'0'..=b'9' => self.read_number(ch, false, line, col)?,
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => keyword_or_ident(self.read_ident(ch)),

            other => {
                let c = if other.is_ascii() { other as char } else { self.finish_scalar() };
                return Err(Error::new(ErrorCode::L001, line, col,
                    format!("unexpected character `{c}`")));
            }
        };

        Ok(Some(Token::new(kind, line, col)))
    }

    // ─── Primitives ──────────────────────────────────────────────────────────

    fn advance(&mut self) -> u8 {
        let ch = self.source[self.pos];
        self.pos += 1;
        if ch == b'\n' { self.line += 1; self.column = 1; }
        else { self.column += 1; }
        ch
    }

    /// Decode the rest of a multi-byte scalar whose lead byte was just
    /// consumed. Counts as one column.
    fn finish_scalar(&mut self) -> char {
        let start = self.pos - 1;
        let c = self.text.get(start..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        self.pos = (start + c.len_utf8()).min(self.source.len());
        c
    }

    fn peek(&self) -> u8 {
        if self.is_at_end() { 0 } else { self.source[self.pos] }
    }

    fn peek_next(&self) -> u8 {
        if self.pos + 1 >= self.source.len() { 0 } else { self.source[self.pos + 1] }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() {
            match self.peek() {
                b' ' | b'\t' | b'\r' | b'\n' => { self.advance(); }
                _ => break,
            }
        }
    }

    fn skip_line(&mut self) {
        while !self.is_at_end() && self.peek() != b'\n' { self.advance(); }
    }

    fn skip_block_comment(&mut self) {
        self.advance(); // consume *
        while !self.is_at_end() {
            if self.peek() == b'*' && self.peek_next() == b'/' {
                self.advance(); // *
                self.advance(); // /
                break;
            }
            self.advance();
        }
    }

    // ─── Readers ─────────────────────────────────────────────────────────────

    fn read_escape(&mut self) -> Result<char, Error> {
        let esc_line = self.line;
        let esc_col  = self.column;
        if self.is_at_end() {
            return Err(Error::new(ErrorCode::L002, esc_line, esc_col, "unterminated escape sequence"));
        }
        match self.advance() {
            b'n'  => Ok('\n'),
            b't'  => Ok('\t'),
            b'0'  => Ok('\0'),
            b'"'  => Ok('"'),
            b'\'' => Ok('\''),
            b'\\' => Ok('\\'),
            other => Err(Error::new(ErrorCode::L003, esc_line, esc_col,
                format!("unknown escape sequence `\\{}`", other as char))),
        }
    }

    fn read_string(&mut self, start_line: usize, start_col: usize) -> Result<String, Error> {
        let mut value = String::new();
        let mut error: Option<Error> = None;
        loop {
            if self.is_at_end() || self.peek() == b'\n' {
                return Err(Error::new(ErrorCode::L002, start_line, start_col,
                    "unterminated string literal"));
            }
            let ch = self.advance();
            if ch == b'"' { break; }
            if ch == b'\\' {
                if self.is_at_end() { continue; }
                // Keep the first escape error but consume the rest of the
                // literal so the remainder doesn't produce cascading errors.
                match self.read_escape() {
                    Ok(c) => value.push(c),
                    Err(e) => { error.get_or_insert(e); }
                }
            } else if ch.is_ascii() {
                value.push(ch as char);
            } else {
                value.push(self.finish_scalar());
            }
        }
        if let Some(e) = error { return Err(e); }
        Ok(value)
    }

    fn read_char(&mut self, start_line: usize, start_col: usize) -> Result<char, Error> {
        let unterminated = || Error::new(ErrorCode::L002, start_line, start_col,
            "unterminated char literal");
        if self.is_at_end() || self.peek() == b'\n' || self.peek() == b'\'' {
            return Err(unterminated());
        }
        let c = match self.advance() {
            b'\\' if self.is_at_end() => return Err(unterminated()),
            b'\\' => self.read_escape()?,
            b if b.is_ascii() => b as char,
            _ => self.finish_scalar(),
        };
        if self.peek() != b'\'' {
            return Err(unterminated());
        }
        self.advance();
        Ok(c)
    }

    fn read_number(&mut self, first: u8, negative: bool, line: usize, col: usize) -> Result<TokenKind, Error> {
        let mut s = String::new();
        if negative { s.push('-'); }
        s.push(first as char);
        while !self.is_at_end() && self.peek().is_ascii_digit() {
            s.push(self.advance() as char);
        }
        // consume decimal only if followed by at least one digit
        // (avoids treating `.` in `Bar().ToString` as a decimal point)
        if !self.is_at_end() && self.peek() == b'.' && self.peek_next().is_ascii_digit() {
            s.push(self.advance() as char);
            while !self.is_at_end() && self.peek().is_ascii_digit() {
                s.push(self.advance() as char);
            }
            return s.parse()
                .map(TokenKind::Float)
                .map_err(|_| Error::new(ErrorCode::L004, line, col, format!("invalid number `{s}`")));
        }
        let long = matches!(self.peek(), b'L' | b'l');
        if long { self.advance(); }
        let value: i64 = s.parse()
            .map_err(|_| Error::new(ErrorCode::L004, line, col, format!("number `{s}` out of range")))?;
        if long {
            return Ok(TokenKind::Long(value));
        }
        if i32::try_from(value).is_err() {
            return Err(Error::new(ErrorCode::L004, line, col,
                format!("number `{s}` does not fit Int32, add an `L` suffix")));
        }
        Ok(TokenKind::Int(value))
    }

    fn read_ident(&mut self, first: u8) -> String {
        let mut s = String::new();
        s.push(first as char);
        while !self.is_at_end() && (self.peek().is_ascii_alphanumeric() || self.peek() == b'_') {
            s.push(self.advance() as char);
        }
        s
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
