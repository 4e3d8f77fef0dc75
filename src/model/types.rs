//! Structural type descriptors.
//!
//! A [`TypeRef`] describes the shape of a type as it appears in a method
//! signature. Two descriptors are identical when their shapes are identical;
//! named types compare by qualified name and type arguments.

use super::signature::MethodSignature;
use serde::{Serialize, Serializer};
use std::fmt;

/// Channel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChanDir {
    /// `chan T`
    Both,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
}

/// A field of an inline `struct{...}` type. Embedded fields have no name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: Option<String>,
    pub ty: TypeRef,
}

/// Parameter and result lists of a function type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FuncType {
    pub params: Vec<TypeRef>,
    pub results: Vec<TypeRef>,
    /// The last parameter is `...T`; `params` then holds `T` in last position.
    pub variadic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Predeclared, declared, or package-qualified type, with optional type
    /// arguments (`List[int]`).
    Named { name: String, args: Vec<TypeRef> },
    /// Type parameter of a generic interface. `owner` is the declaring
    /// interface so parameters of different interfaces never unify.
    Param { name: String, owner: String },
    Pointer(Box<TypeRef>),
    Slice(Box<TypeRef>),
    Array { len: String, elem: Box<TypeRef> },
    Map { key: Box<TypeRef>, value: Box<TypeRef> },
    Chan { dir: ChanDir, elem: Box<TypeRef> },
    Func(Box<FuncType>),
    /// Inline interface type. Methods are kept sorted by name.
    Interface {
        methods: Vec<MethodSignature>,
        embeds: Vec<TypeRef>,
    },
    Struct(Vec<Field>),
}

impl TypeRef {
    /// Build a named type, normalising predeclared aliases so that `byte`
    /// equals `uint8`, `rune` equals `int32`, and `any` equals `interface{}`.
    pub fn named(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        let name = name.into();
        if args.is_empty() {
            match name.as_str() {
                "byte" => return Self::simple("uint8"),
                "rune" => return Self::simple("int32"),
                "any" => return Self::empty_interface(),
                _ => {}
            }
        }
        Self::Named { name, args }
    }

    /// Named type without type arguments.
    pub fn simple(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn empty_interface() -> Self {
        Self::Interface {
            methods: Vec::new(),
            embeds: Vec::new(),
        }
    }

    /// Build an inline interface type with canonical method order.
    pub fn interface(mut methods: Vec<MethodSignature>, embeds: Vec<TypeRef>) -> Self {
        methods.sort_by(|a, b| a.name.cmp(&b.name));
        Self::Interface { methods, embeds }
    }

    pub fn pointer(elem: TypeRef) -> Self {
        Self::Pointer(Box::new(elem))
    }

    pub fn slice(elem: TypeRef) -> Self {
        Self::Slice(Box::new(elem))
    }

    pub fn map(key: TypeRef, value: TypeRef) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn chan(dir: ChanDir, elem: TypeRef) -> Self {
        Self::Chan {
            dir,
            elem: Box::new(elem),
        }
    }

    pub fn func(params: Vec<TypeRef>, results: Vec<TypeRef>, variadic: bool) -> Self {
        Self::Func(Box::new(FuncType {
            params,
            results,
            variadic,
        }))
    }

    /// Whether this descriptor mentions a type parameter anywhere.
    pub fn has_params(&self) -> bool {
        match self {
            Self::Param { .. } => true,
            Self::Named { args, .. } => args.iter().any(TypeRef::has_params),
            Self::Pointer(elem) | Self::Slice(elem) => elem.has_params(),
            Self::Array { elem, .. } | Self::Chan { elem, .. } => elem.has_params(),
            Self::Map { key, value } => key.has_params() || value.has_params(),
            Self::Func(func) => func.params.iter().chain(&func.results).any(TypeRef::has_params),
            Self::Interface { methods, embeds } => {
                methods.iter().any(MethodSignature::has_params)
                    || embeds.iter().any(TypeRef::has_params)
            }
            Self::Struct(fields) => fields.iter().any(|f| f.ty.has_params()),
        }
    }
}

/// Write `(A, B)`-style lists, marking the last element variadic if asked.
pub(crate) fn write_params(
    f: &mut fmt::Formatter<'_>,
    params: &[TypeRef],
    variadic: bool,
) -> fmt::Result {
    f.write_str("(")?;
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        if variadic && i + 1 == params.len() {
            f.write_str("...")?;
        }
        write!(f, "{param}")?;
    }
    f.write_str(")")
}

pub(crate) fn write_results(f: &mut fmt::Formatter<'_>, results: &[TypeRef]) -> fmt::Result {
    match results {
        [] => Ok(()),
        [single] if !matches!(single, TypeRef::Func(_)) => write!(f, " {single}"),
        _ => {
            f.write_str(" ")?;
            write_params(f, results, false)
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("[")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str("]")?;
                }
                Ok(())
            }
            Self::Param { name, .. } => f.write_str(name),
            Self::Pointer(elem) => write!(f, "*{elem}"),
            Self::Slice(elem) => write!(f, "[]{elem}"),
            Self::Array { len, elem } => write!(f, "[{len}]{elem}"),
            Self::Map { key, value } => write!(f, "map[{key}]{value}"),
            Self::Chan { dir, elem } => match dir {
                ChanDir::Both => write!(f, "chan {elem}"),
                ChanDir::Send => write!(f, "chan<- {elem}"),
                ChanDir::Recv => write!(f, "<-chan {elem}"),
            },
            Self::Func(func) => {
                f.write_str("func")?;
                write_params(f, &func.params, func.variadic)?;
                write_results(f, &func.results)
            }
            Self::Interface { methods, embeds } => {
                f.write_str("interface{")?;
                let mut first = true;
                for embed in embeds {
                    if !first {
                        f.write_str("; ")?;
                    }
                    first = false;
                    write!(f, "{embed}")?;
                }
                for method in methods {
                    if !first {
                        f.write_str("; ")?;
                    }
                    first = false;
                    write!(f, "{method}")?;
                }
                f.write_str("}")
            }
            Self::Struct(fields) => {
                f.write_str("struct{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    match &field.name {
                        Some(name) => write!(f, "{name} {}", field.ty)?,
                        None => write!(f, "{}", field.ty)?,
                    }
                }
                f.write_str("}")
            }
        }
    }
}

impl Serialize for TypeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
