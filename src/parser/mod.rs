//! Parser for declarative workload definition files.
//!
//! The input is a small Go-shaped declaration language: an optional
//! `package` clause, an optional `import` block (kept verbatim), and a
//! sequence of top-level `var NAME = EXPR` declarations whose initializers
//! are construction expressions. Parse failure is fatal for the file being
//! parsed only; directory-wide runs skip the file and continue.

pub mod ast;
pub mod lexer;
pub mod printer;

use ast::{
    BoolLit, CallExpr, Comment, CompositeLit, Entry, EntryKey, Expr, IntLit, PathExpr, SourceFile,
    Span, StrLit, TypeRef, VarDecl,
};
use lexer::{Token, TokenKind, tokenize};
use thiserror::Error;

/// A parse failure with its source position.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{line}:{column}: {message}")]
pub struct ParseError {
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl ParseError {
    pub fn new(line: u32, column: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}

/// Parse a whole source file into a declaration tree.
pub fn parse_source(source: &str) -> Result<SourceFile, ParseError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
    };
    parser.parse_file()
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_at(&self, offset: usize) -> &Token {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn error_here(&self, message: impl Into<String>) -> ParseError {
        let tok = self.peek();
        ParseError::new(tok.line, tok.column, message)
    }

    fn expect(&mut self, kind: &TokenKind, what: &str) -> Result<Token, ParseError> {
        if &self.peek().kind == kind {
            Ok(self.advance())
        } else {
            Err(self.error_here(format!("expected {}", what)))
        }
    }

    fn expect_ident(&mut self, what: &str) -> Result<(String, Span), ParseError> {
        let tok = self.peek().clone();
        match tok.kind {
            TokenKind::Ident(name) => {
                self.advance();
                Ok((name, Span::new(tok.line, tok.column)))
            }
            _ => Err(self.error_here(format!("expected {}", what))),
        }
    }

    /// Collect any comment tokens at the current position.
    fn take_comments(&mut self) -> Vec<Comment> {
        let mut comments = Vec::new();
        while let TokenKind::Comment(text) = &self.peek().kind {
            comments.push(Comment {
                text: text.clone(),
                line: self.peek().line,
            });
            self.advance();
        }
        comments
    }

    fn parse_file(&mut self) -> Result<SourceFile, ParseError> {
        let mut file = SourceFile {
            package: None,
            imports: None,
            decls: Vec::new(),
            trailing_comments: Vec::new(),
        };

        let mut pending = self.take_comments();

        // Optional `package NAME`.
        if self.is_keyword("package") {
            self.advance();
            let (name, _) = self.expect_ident("package name")?;
            file.package = Some(name);
            pending.extend(self.take_comments());
        }

        // Optional `import "x"` or `import ( ... )`, captured verbatim.
        if self.is_keyword("import") {
            let start = self.peek().start;
            self.advance();
            let end = match &self.peek().kind {
                TokenKind::Str { .. } => self.advance().end,
                TokenKind::LParen => {
                    let mut end = self.peek().end;
                    while !matches!(self.peek().kind, TokenKind::RParen | TokenKind::Eof) {
                        end = self.advance().end;
                    }
                    self.expect(&TokenKind::RParen, "`)` closing the import block")?
                        .end
                }
                _ => return Err(self.error_here("expected import path or `(`")),
            };
            file.imports = Some(self.source[start..end].to_string());
            pending.extend(self.take_comments());
        }

        // Top-level declarations.
        loop {
            pending.extend(self.take_comments());
            if matches!(self.peek().kind, TokenKind::Eof) {
                file.trailing_comments = pending;
                break;
            }
            if !self.is_keyword("var") {
                return Err(self.error_here("expected `var` declaration"));
            }
            let var_tok = self.advance();
            let (name, _) = self.expect_ident("variable name")?;
            self.expect(&TokenKind::Assign, "`=`")?;
            let mut init = self.parse_expr()?;
            resolve_implied_types(&mut init, None);
            file.decls.push(VarDecl {
                name,
                init,
                span: Span::new(var_tok.line, var_tok.column),
                leading_comments: std::mem::take(&mut pending),
            });
        }

        Ok(file)
    }

    fn is_keyword(&self, kw: &str) -> bool {
        matches!(&self.peek().kind, TokenKind::Ident(name) if name == kw)
    }

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let tok = self.peek().clone();
        match &tok.kind {
            TokenKind::Amp => {
                self.advance();
                let inner = self.parse_expr()?;
                Ok(Expr::Ref(
                    Box::new(inner),
                    Span::new(tok.line, tok.column),
                ))
            }
            TokenKind::Str { value, raw } => {
                self.advance();
                Ok(Expr::Str(StrLit {
                    value: value.clone(),
                    raw: *raw,
                    span: Span::new(tok.line, tok.column),
                }))
            }
            TokenKind::Int(value) => {
                self.advance();
                Ok(Expr::Int(IntLit {
                    value: *value,
                    span: Span::new(tok.line, tok.column),
                }))
            }
            TokenKind::Ident(name) if name == "true" || name == "false" => {
                self.advance();
                Ok(Expr::Bool(BoolLit {
                    value: name == "true",
                    span: Span::new(tok.line, tok.column),
                }))
            }
            TokenKind::LBrack => {
                // `[]T{...}` slice literal.
                let ty = self.parse_type()?;
                let span = Span::new(tok.line, tok.column);
                self.parse_composite(Some(ty), span)
            }
            TokenKind::Ident(name) if name == "map" && matches!(self.peek_at(1).kind, TokenKind::LBrack) =>
            {
                let ty = self.parse_type()?;
                let span = Span::new(tok.line, tok.column);
                self.parse_composite(Some(ty), span)
            }
            TokenKind::LBrace => {
                // Untyped element inside a slice or map literal; the element
                // type is resolved from the enclosing literal afterwards.
                let span = Span::new(tok.line, tok.column);
                self.parse_composite(None, span)
            }
            TokenKind::Ident(_) => {
                let path = self.parse_path()?;
                match self.peek().kind {
                    TokenKind::LBrace => {
                        let span = path.span;
                        self.parse_composite(Some(TypeRef::Named(path.segments)), span)
                    }
                    TokenKind::LParen => {
                        self.advance();
                        let mut args = Vec::new();
                        while !matches!(self.peek().kind, TokenKind::RParen) {
                            args.push(self.parse_expr()?);
                            if matches!(self.peek().kind, TokenKind::Comma) {
                                self.advance();
                            }
                        }
                        self.expect(&TokenKind::RParen, "`)` closing the call")?;
                        let span = path.span;
                        Ok(Expr::Call(CallExpr {
                            callee: path,
                            args,
                            span,
                        }))
                    }
                    _ => Ok(Expr::Path(path)),
                }
            }
            _ => Err(self.error_here("expected expression")),
        }
    }

    fn parse_path(&mut self) -> Result<PathExpr, ParseError> {
        let (first, span) = self.expect_ident("identifier")?;
        let mut segments = vec![first];
        while matches!(self.peek().kind, TokenKind::Dot) {
            self.advance();
            let (next, _) = self.expect_ident("identifier after `.`")?;
            segments.push(next);
        }
        Ok(PathExpr { segments, span })
    }

    fn parse_type(&mut self) -> Result<TypeRef, ParseError> {
        match &self.peek().kind {
            TokenKind::LBrack => {
                self.advance();
                self.expect(&TokenKind::RBrack, "`]` in slice type")?;
                let elem = self.parse_type()?;
                Ok(TypeRef::Slice(Box::new(elem)))
            }
            TokenKind::Ident(name) if name == "map" => {
                self.advance();
                self.expect(&TokenKind::LBrack, "`[` in map type")?;
                let key = self.parse_type()?;
                self.expect(&TokenKind::RBrack, "`]` in map type")?;
                let value = self.parse_type()?;
                Ok(TypeRef::Map(Box::new(key), Box::new(value)))
            }
            TokenKind::Ident(_) => {
                let path = self.parse_path()?;
                Ok(TypeRef::Named(path.segments))
            }
            _ => Err(self.error_here("expected type")),
        }
    }

    fn parse_composite(&mut self, ty: Option<TypeRef>, span: Span) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LBrace, "`{`")?;
        let mut entries: Vec<Entry> = Vec::new();

        loop {
            let leading_comments = self.take_comments();
            if matches!(self.peek().kind, TokenKind::RBrace) {
                // Comments immediately before `}` belong to no entry; keep
                // them on the last entry so the printer does not drop them.
                if !leading_comments.is_empty() {
                    if let Some(last) = entries.last_mut() {
                        last.leading_comments.extend(leading_comments);
                    }
                }
                break;
            }

            let entry_tok = self.peek().clone();
            let entry_span = Span::new(entry_tok.line, entry_tok.column);

            // `Field: value` when an identifier is directly followed by `:`.
            let key_is_field = matches!(&entry_tok.kind, TokenKind::Ident(_))
                && matches!(self.peek_at(1).kind, TokenKind::Colon);

            let (key, value) = if key_is_field {
                let (name, _) = self.expect_ident("field name")?;
                self.advance(); // `:`
                (EntryKey::Field(name), self.parse_expr()?)
            } else {
                let first = self.parse_expr()?;
                if matches!(self.peek().kind, TokenKind::Colon) {
                    self.advance();
                    (EntryKey::Keyed(Box::new(first)), self.parse_expr()?)
                } else {
                    (EntryKey::Positional, first)
                }
            };

            let mut entry = Entry {
                key,
                value,
                span: entry_span,
                leading_comments,
                trailing_comment: None,
            };

            let mut last_line = self.tokens[self.pos.saturating_sub(1)].line;
            if matches!(self.peek().kind, TokenKind::Comma) {
                last_line = self.peek().line;
                self.advance();
            }

            // A comment on the same line as the entry trails it.
            if let TokenKind::Comment(text) = &self.peek().kind {
                if self.peek().line == last_line {
                    entry.trailing_comment = Some(Comment {
                        text: text.clone(),
                        line: self.peek().line,
                    });
                    self.advance();
                }
            }

            entries.push(entry);
        }

        self.expect(&TokenKind::RBrace, "`}` closing the literal")?;
        Ok(Expr::Composite(CompositeLit { ty, entries, span }))
    }
}

/// Propagate implied element types into untyped composites, so an element of
/// `[]corev1.Container{...}` is matched as a `Container` even though it is
/// written without a type prefix.
fn resolve_implied_types(expr: &mut Expr, implied: Option<&TypeRef>) {
    match expr {
        Expr::Ref(inner, _) => resolve_implied_types(inner, implied),
        Expr::Call(call) => {
            for arg in &mut call.args {
                resolve_implied_types(arg, None);
            }
        }
        Expr::Composite(lit) => {
            if lit.ty.is_none() {
                lit.ty = implied.cloned();
            }
            let child_implied = match &lit.ty {
                Some(TypeRef::Slice(elem)) => Some((**elem).clone()),
                Some(TypeRef::Map(_, value)) => Some((**value).clone()),
                _ => None,
            };
            for entry in &mut lit.entries {
                resolve_implied_types(&mut entry.value, child_implied.as_ref());
            }
        }
        _ => {}
    }
}
