use super::types::{write_params, write_results, TypeRef};
use crate::errors::Result;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A method's name with its ordered parameter and result types.
///
/// Parameter and result names are not part of a signature. Equality is exact:
/// same name, same variadic flag, and pairwise identical descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    pub name: String,
    pub params: Vec<TypeRef>,
    pub results: Vec<TypeRef>,
    /// Last parameter is `...T`; `params` holds `T` in last position.
    pub variadic: bool,
}

impl MethodSignature {
    pub fn new(
        name: impl Into<String>,
        params: Vec<TypeRef>,
        results: Vec<TypeRef>,
        variadic: bool,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            results,
            variadic,
        }
    }

    /// Parse Go-style signature text such as `Write(p []byte) (n int, err error)`.
    pub fn parse(text: &str) -> Result<Self> {
        crate::syntax::parse_signature(text)
    }

    pub fn has_params(&self) -> bool {
        self.types().any(TypeRef::has_params)
    }

    /// All descriptors in parameter-then-result order.
    pub fn types(&self) -> impl Iterator<Item = &TypeRef> {
        self.params.iter().chain(&self.results)
    }
}

impl FromStr for MethodSignature {
    type Err = crate::errors::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        write_params(f, &self.params, self.variadic)?;
        write_results(f, &self.results)
    }
}

impl Serialize for MethodSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
