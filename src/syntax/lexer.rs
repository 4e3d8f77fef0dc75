use crate::errors::{Error, Result};
use logos::Logos;
use std::ops::Range;

#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    #[regex(r"//[^\n]*", logos::skip)]
    Comment,

    // Keywords
    #[token("map")]
    Map,
    #[token("chan")]
    Chan,
    #[token("func")]
    Func,
    #[token("interface")]
    Interface,
    #[token("struct")]
    Struct,

    // Symbols
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token("*")]
    Star,
    #[token("<-")]
    Arrow,
    #[token("~")]
    Tilde,
    #[token("|")]
    Pipe,

    // Literals
    #[regex(r"[0-9]+", |lex| lex.slice().to_owned())]
    Int(String),

    /// Struct field tag, ignored by the parser.
    #[regex(r"`[^`]*`", |lex| lex.slice().to_owned())]
    #[regex(r#""([^"\\]|\\.)*""#, |lex| lex.slice().to_owned())]
    Tag(String),

    #[regex(r"[\p{L}_][\p{L}\p{Nd}_]*", |lex| lex.slice().to_owned())]
    Ident(String),
}

impl Token {
    /// Whether the token can begin a type descriptor.
    pub fn starts_type(&self) -> bool {
        matches!(
            self,
            Token::Ident(_)
                | Token::Star
                | Token::LBracket
                | Token::LParen
                | Token::Map
                | Token::Chan
                | Token::Arrow
                | Token::Func
                | Token::Interface
                | Token::Struct
        )
    }

    pub fn describe(&self) -> String {
        match self {
            Token::Ident(name) => format!("identifier `{name}`"),
            Token::Int(value) => format!("integer `{value}`"),
            Token::Tag(_) => "string literal".to_string(),
            other => format!("`{}`", other.symbol()),
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Token::Map => "map",
            Token::Chan => "chan",
            Token::Func => "func",
            Token::Interface => "interface",
            Token::Struct => "struct",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBracket => "[",
            Token::RBracket => "]",
            Token::LBrace => "{",
            Token::RBrace => "}",
            Token::Comma => ",",
            Token::Semi => ";",
            Token::Dot => ".",
            Token::Ellipsis => "...",
            Token::Star => "*",
            Token::Arrow => "<-",
            Token::Tilde => "~",
            Token::Pipe => "|",
            Token::Comment | Token::Int(_) | Token::Tag(_) | Token::Ident(_) => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub span: Range<usize>,
}

pub fn tokenize(source: &str) -> Result<Vec<Spanned>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push(Spanned {
                token,
                span: lexer.span(),
            }),
            Err(()) => {
                let span = lexer.span();
                return Err(Error::syntax(
                    source,
                    span.start,
                    format!("unexpected character `{}`", &source[span]),
                ));
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|spanned| spanned.token)
            .collect()
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("map mapping chan"),
            vec![
                Token::Map,
                Token::Ident("mapping".into()),
                Token::Chan
            ]
        );
    }

    #[test]
    fn test_ellipsis_and_dot() {
        assert_eq!(
            kinds("...context.Context"),
            vec![
                Token::Ellipsis,
                Token::Ident("context".into()),
                Token::Dot,
                Token::Ident("Context".into()),
            ]
        );
    }

    #[test]
    fn test_receive_channel() {
        assert_eq!(
            kinds("<-chan string"),
            vec![Token::Arrow, Token::Chan, Token::Ident("string".into())]
        );
    }

    #[test]
    fn test_unicode_identifiers() {
        assert_eq!(
            kinds("Größe(x_1 Ä) ε"),
            vec![
                Token::Ident("Größe".into()),
                Token::LParen,
                Token::Ident("x_1".into()),
                Token::Ident("Ä".into()),
                Token::RParen,
                Token::Ident("ε".into()),
            ]
        );
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("Read(p #int)").unwrap_err();
        assert!(matches!(err, Error::Syntax { offset: 7, .. }));
    }
}
