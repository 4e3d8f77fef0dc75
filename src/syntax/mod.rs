//! Go-style signature text to structural descriptors.

pub mod lexer;
pub mod parser;

pub use parser::Parser;

use crate::errors::{Error, Result};
use crate::model::{MethodSignature, TypeRef};
use std::str::FromStr;

/// Parse a complete method signature such as `Close() error`.
pub fn parse_signature(text: &str) -> Result<MethodSignature> {
    let mut parser = Parser::new(text)?;
    let signature = parser.parse_signature()?;
    parser.finish()?;
    Ok(signature)
}

/// Parse a complete type descriptor such as `map[string][]byte`.
pub fn parse_type(text: &str) -> Result<TypeRef> {
    let mut parser = Parser::new(text)?;
    let ty = parser.parse_type()?;
    parser.finish()?;
    Ok(ty)
}

impl FromStr for TypeRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_type(s)
    }
}
