//! Recursive-descent parser for Go-style method signatures and types.
//!
//! Parameter and result names are accepted and discarded. Inline
//! `interface{...}` and `struct{...}` bodies need `;` between elements
//! because newlines are treated as plain whitespace.

use super::lexer::{tokenize, Spanned, Token};
use crate::errors::{Error, Result};
use crate::model::{ChanDir, Field, MethodSignature, TypeRef};

/// Deepest type nesting accepted before parsing gives up.
pub const MAX_TYPE_NESTING: usize = 256;

/// One comma-separated element of a parameter or result list, before
/// grouped names (`a, b int`) are resolved.
enum Entry {
    Named {
        ty: TypeRef,
        variadic: bool,
        offset: usize,
    },
    Bare {
        ty: TypeRef,
        variadic: bool,
        /// Set when the entry was a single identifier, which may turn out
        /// to be a parameter name sharing the type of a later entry.
        ident: Option<String>,
        offset: usize,
    },
}

pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Spanned>,
    pos: usize,
    depth: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Result<Self> {
        Ok(Self {
            source,
            tokens: tokenize(source)?,
            pos: 0,
            depth: 0,
        })
    }

    fn peek(&self) -> Option<&Token> {
        self.peek_at(0)
    }

    fn peek_at(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n).map(|spanned| &spanned.token)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|spanned| spanned.token.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map_or(self.source.len(), |spanned| spanned.span.start)
    }

    fn error_at(&self, offset: usize, message: impl Into<String>) -> Error {
        Error::syntax(self.source, offset, message)
    }

    fn unexpected(&self, expected: &str) -> Error {
        match self.peek() {
            Some(token) => self.error_at(
                self.offset(),
                format!("expected {expected}, found {}", token.describe()),
            ),
            None => self.error_at(
                self.offset(),
                format!("expected {expected}, found end of input"),
            ),
        }
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        if self.eat(&expected) {
            Ok(())
        } else {
            Err(self.unexpected(&expected.describe()))
        }
    }

    fn expect_ident(&mut self) -> Result<String> {
        match self.peek() {
            Some(Token::Ident(_)) => match self.bump() {
                Some(Token::Ident(name)) => Ok(name),
                _ => Err(self.unexpected("identifier")),
            },
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// Fail if any input is left over.
    pub fn finish(&self) -> Result<()> {
        match self.peek() {
            None => Ok(()),
            Some(token) => Err(self.error_at(
                self.offset(),
                format!("unexpected {} after end of declaration", token.describe()),
            )),
        }
    }

    /// `Name(params) results`
    pub fn parse_signature(&mut self) -> Result<MethodSignature> {
        let name = self.expect_ident()?;
        let (params, variadic) = self.parse_parameters()?;
        let results = self.parse_results()?;
        Ok(MethodSignature::new(name, params, results, variadic))
    }

    fn parse_parameters(&mut self) -> Result<(Vec<TypeRef>, bool)> {
        self.expect(Token::LParen)?;
        let entries = self.parse_entries()?;
        self.expect(Token::RParen)?;
        self.resolve_entries(entries)
    }

    fn parse_results(&mut self) -> Result<Vec<TypeRef>> {
        if self.peek() == Some(&Token::LParen) {
            let offset = self.offset();
            let (results, variadic) = self.parse_parameters()?;
            if variadic {
                return Err(self.error_at(offset, "results cannot be variadic"));
            }
            return Ok(results);
        }
        if self.peek().is_some_and(Token::starts_type) {
            return Ok(vec![self.parse_type()?]);
        }
        Ok(Vec::new())
    }

    fn parse_entries(&mut self) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();
        while self.peek().is_some_and(|token| *token != Token::RParen) {
            entries.push(self.parse_entry()?);
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        Ok(entries)
    }

    fn parse_entry(&mut self) -> Result<Entry> {
        let offset = self.offset();
        if self.eat(&Token::Ellipsis) {
            return Ok(Entry::Bare {
                ty: self.parse_type()?,
                variadic: true,
                ident: None,
                offset,
            });
        }

        if let Some(Token::Ident(name)) = self.peek().cloned() {
            if self.peek_at(1) == Some(&Token::Ellipsis) {
                self.pos += 2;
                return Ok(Entry::Named {
                    ty: self.parse_type()?,
                    variadic: true,
                    offset,
                });
            }
            if self.ident_starts_named_element() {
                self.pos += 1;
                return Ok(Entry::Named {
                    ty: self.parse_type()?,
                    variadic: false,
                    offset,
                });
            }
            let lone = matches!(self.peek_at(1), None | Some(Token::Comma | Token::RParen));
            return Ok(Entry::Bare {
                ty: self.parse_type()?,
                variadic: false,
                ident: lone.then_some(name),
                offset,
            });
        }

        Ok(Entry::Bare {
            ty: self.parse_type()?,
            variadic: false,
            ident: None,
            offset,
        })
    }

    /// With an identifier under the cursor, decide whether it names the
    /// element (`p []byte`, `ctx context.Context`) or starts its type
    /// (`context.Context`, `List[T]`, `int`).
    fn ident_starts_named_element(&self) -> bool {
        match self.peek_at(1) {
            Some(Token::Dot) => false,
            Some(Token::LBracket) => {
                matches!(self.peek_at(2), Some(Token::RBracket | Token::Int(_)))
            }
            Some(token) => token.starts_type(),
            None => false,
        }
    }

    /// Apply Go's grouping rule: either every element is named or none is.
    fn resolve_entries(&self, entries: Vec<Entry>) -> Result<(Vec<TypeRef>, bool)> {
        let last = entries.len().saturating_sub(1);
        for (index, entry) in entries.iter().enumerate() {
            let (Entry::Named {
                variadic, offset, ..
            }
            | Entry::Bare {
                variadic, offset, ..
            }) = entry;
            if *variadic && index != last {
                return Err(self.error_at(*offset, "can only use ... with final parameter"));
            }
        }
        let variadic = match entries.last() {
            Some(Entry::Named { variadic, .. } | Entry::Bare { variadic, .. }) => *variadic,
            None => false,
        };

        let any_named = entries.iter().any(|entry| matches!(entry, Entry::Named { .. }));
        if !any_named {
            let types = entries
                .into_iter()
                .map(|entry| match entry {
                    Entry::Named { ty, .. } | Entry::Bare { ty, .. } => ty,
                })
                .collect();
            return Ok((types, variadic));
        }

        let mut types = Vec::new();
        let mut pending = 0usize;
        let mut pending_offset = 0usize;
        for entry in entries {
            match entry {
                Entry::Bare {
                    ident: Some(_),
                    variadic: false,
                    offset,
                    ..
                } => {
                    if pending == 0 {
                        pending_offset = offset;
                    }
                    pending += 1;
                }
                Entry::Bare { offset, .. } => {
                    return Err(self.error_at(offset, "mixed named and unnamed parameters"));
                }
                Entry::Named { ty, .. } => {
                    for _ in 0..pending {
                        types.push(ty.clone());
                    }
                    pending = 0;
                    types.push(ty);
                }
            }
        }
        if pending > 0 {
            return Err(self.error_at(pending_offset, "mixed named and unnamed parameters"));
        }
        Ok((types, variadic))
    }

    pub fn parse_type(&mut self) -> Result<TypeRef> {
        if self.depth >= MAX_TYPE_NESTING {
            return Err(self.error_at(self.offset(), "type nesting too deep"));
        }
        self.depth += 1;
        let result = self.parse_type_inner();
        self.depth -= 1;
        result
    }

    fn parse_type_inner(&mut self) -> Result<TypeRef> {
        let offset = self.offset();
        let Some(token) = self.bump() else {
            return Err(self.error_at(offset, "expected type, found end of input"));
        };

        match token {
            Token::Ident(name) => {
                let name = if self.eat(&Token::Dot) {
                    format!("{name}.{}", self.expect_ident()?)
                } else {
                    name
                };
                let args = if self.eat(&Token::LBracket) {
                    self.parse_type_list(Token::RBracket)?
                } else {
                    Vec::new()
                };
                Ok(TypeRef::named(name, args))
            }
            Token::Star => Ok(TypeRef::pointer(self.parse_type()?)),
            Token::LBracket => match self.bump() {
                Some(Token::RBracket) => Ok(TypeRef::slice(self.parse_type()?)),
                Some(Token::Int(len)) => {
                    self.expect(Token::RBracket)?;
                    Ok(TypeRef::Array {
                        len,
                        elem: Box::new(self.parse_type()?),
                    })
                }
                _ => Err(self.error_at(offset, "expected slice or array length")),
            },
            Token::Map => {
                self.expect(Token::LBracket)?;
                let key = self.parse_type()?;
                self.expect(Token::RBracket)?;
                Ok(TypeRef::map(key, self.parse_type()?))
            }
            Token::Chan => {
                let dir = if self.eat(&Token::Arrow) {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                Ok(TypeRef::chan(dir, self.parse_type()?))
            }
            Token::Arrow => {
                self.expect(Token::Chan)?;
                Ok(TypeRef::chan(ChanDir::Recv, self.parse_type()?))
            }
            Token::Func => {
                let (params, variadic) = self.parse_parameters()?;
                let results = self.parse_results()?;
                Ok(TypeRef::func(params, results, variadic))
            }
            Token::Interface => {
                self.expect(Token::LBrace)?;
                self.parse_interface_body()
            }
            Token::Struct => {
                self.expect(Token::LBrace)?;
                self.parse_struct_body()
            }
            Token::LParen => {
                let ty = self.parse_type()?;
                self.expect(Token::RParen)?;
                Ok(ty)
            }
            other => Err(self.error_at(
                offset,
                format!("expected type, found {}", other.describe()),
            )),
        }
    }

    fn parse_type_list(&mut self, close: Token) -> Result<Vec<TypeRef>> {
        let mut types = Vec::new();
        loop {
            if self.eat(&close) {
                break;
            }
            types.push(self.parse_type()?);
            if !self.eat(&Token::Comma) {
                self.expect(close.clone())?;
                break;
            }
        }
        Ok(types)
    }

    /// Elements must be followed by `;` or the closing brace.
    fn end_element(&mut self) -> Result<()> {
        match self.peek() {
            Some(Token::Semi) => {
                self.pos += 1;
                Ok(())
            }
            Some(Token::RBrace) => Ok(()),
            _ => Err(self.unexpected("`;` or `}`")),
        }
    }

    fn parse_interface_body(&mut self) -> Result<TypeRef> {
        let mut methods = Vec::new();
        let mut embeds = Vec::new();
        loop {
            while self.eat(&Token::Semi) {}
            if self.eat(&Token::RBrace) {
                break;
            }
            let is_method = matches!(self.peek(), Some(Token::Ident(_)))
                && self.peek_at(1) == Some(&Token::LParen);
            if is_method {
                methods.push(self.parse_signature()?);
            } else {
                if self.peek() == Some(&Token::Tilde) {
                    return Err(self.error_at(self.offset(), "type set constraints are not supported"));
                }
                embeds.push(self.parse_type()?);
                if self.peek() == Some(&Token::Pipe) {
                    return Err(self.error_at(self.offset(), "type set constraints are not supported"));
                }
            }
            self.end_element()?;
        }
        Ok(TypeRef::interface(methods, embeds))
    }

    fn parse_struct_body(&mut self) -> Result<TypeRef> {
        let mut fields = Vec::new();
        loop {
            while self.eat(&Token::Semi) {}
            if self.eat(&Token::RBrace) {
                break;
            }
            match self.peek() {
                Some(Token::Ident(_)) if self.peek_at(1) == Some(&Token::Comma) => {
                    let mut names = vec![self.expect_ident()?];
                    while self.eat(&Token::Comma) {
                        names.push(self.expect_ident()?);
                    }
                    let ty = self.parse_type()?;
                    fields.extend(names.into_iter().map(|name| Field {
                        name: Some(name),
                        ty: ty.clone(),
                    }));
                }
                Some(Token::Ident(_)) if self.ident_starts_named_element() => {
                    let name = self.expect_ident()?;
                    fields.push(Field {
                        name: Some(name),
                        ty: self.parse_type()?,
                    });
                }
                Some(Token::Ident(_) | Token::Star) => {
                    fields.push(Field {
                        name: None,
                        ty: self.parse_type()?,
                    });
                }
                _ => return Err(self.unexpected("field")),
            }
            if matches!(self.peek(), Some(Token::Tag(_))) {
                self.pos += 1;
            }
            self.end_element()?;
        }
        Ok(TypeRef::Struct(fields))
    }
}
