//! Type reference resolution.
//!
//! Every named type mentioned by a signature must be predeclared, declared
//! in the program, listed as extern, or package-qualified. Type parameters of
//! generic interfaces are rewritten to [`TypeRef::Param`] here so the
//! matcher can bind them.

use super::edges::InterfaceId;
use super::index::SymbolIndex;
use crate::errors::Error;
use crate::model::{Field, FuncType, MethodSignature, TypeRef};

/// Go's predeclared type names (after alias normalisation).
const PREDECLARED: &[&str] = &[
    "bool",
    "string",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
    "float32",
    "float64",
    "complex64",
    "complex128",
    "error",
    "comparable",
];

pub(crate) fn is_predeclared(name: &str) -> bool {
    PREDECLARED.contains(&name)
}

/// Interface with resolved own methods and embedded interface ids.
#[derive(Debug, Clone, Default)]
pub(crate) struct ResolvedInterface {
    pub methods: Vec<MethodSignature>,
    pub embeds: Vec<InterfaceId>,
}

#[derive(Debug, Default)]
pub(crate) struct ResolvedProgram {
    pub interfaces: Vec<ResolvedInterface>,
    /// Parallel to `Program::methods`.
    pub methods: Vec<MethodSignature>,
}

struct Scope<'s> {
    owner: &'s str,
    params: &'s [String],
    declaration: String,
}

pub(crate) struct Resolver<'a, 'p> {
    index: &'a SymbolIndex<'p>,
}

impl<'a, 'p> Resolver<'a, 'p> {
    pub fn new(index: &'a SymbolIndex<'p>) -> Self {
        Self { index }
    }

    pub fn resolve_program(&self, errors: &mut Vec<Error>) -> ResolvedProgram {
        let program = self.index.program;

        let interfaces = program
            .interfaces
            .iter()
            .map(|decl| {
                let owner = decl.display_name();
                let methods = decl
                    .methods
                    .iter()
                    .map(|signature| {
                        let scope = Scope {
                            owner: &owner,
                            params: &decl.type_params,
                            declaration: format!("{owner}.{}", signature.name),
                        };
                        self.resolve_signature(signature, &scope, errors)
                    })
                    .collect();

                let mut embeds = Vec::new();
                for embed in &decl.embeds {
                    match self.index.interface(embed.as_str()) {
                        Some(id) => embeds.push(id),
                        None => errors.push(Error::unresolved(embed.as_str(), owner.as_str())),
                    }
                }

                ResolvedInterface { methods, embeds }
            })
            .collect();

        let methods = program
            .methods
            .iter()
            .map(|method| {
                let scope = Scope {
                    owner: method.receiver.as_str(),
                    params: &[],
                    declaration: method.qualified_name(),
                };
                self.resolve_signature(&method.signature, &scope, errors)
            })
            .collect();

        ResolvedProgram {
            interfaces,
            methods,
        }
    }

    fn resolve_signature(
        &self,
        signature: &MethodSignature,
        scope: &Scope<'_>,
        errors: &mut Vec<Error>,
    ) -> MethodSignature {
        MethodSignature {
            name: signature.name.clone(),
            params: self.resolve_list(&signature.params, scope, errors),
            results: self.resolve_list(&signature.results, scope, errors),
            variadic: signature.variadic,
        }
    }

    fn resolve_list(
        &self,
        types: &[TypeRef],
        scope: &Scope<'_>,
        errors: &mut Vec<Error>,
    ) -> Vec<TypeRef> {
        types
            .iter()
            .map(|ty| self.resolve_type(ty, scope, errors))
            .collect()
    }

    fn resolve_type(&self, ty: &TypeRef, scope: &Scope<'_>, errors: &mut Vec<Error>) -> TypeRef {
        match ty {
            TypeRef::Named { name, args } => {
                if args.is_empty() && scope.params.iter().any(|param| param == name) {
                    return TypeRef::Param {
                        name: name.clone(),
                        owner: scope.owner.to_string(),
                    };
                }
                if !self.is_known(name) {
                    let error = Error::unresolved(name.as_str(), scope.declaration.as_str());
                    if !errors.iter().any(|existing| same_unresolved(existing, &error)) {
                        errors.push(error);
                    }
                }
                TypeRef::Named {
                    name: name.clone(),
                    args: self.resolve_list(args, scope, errors),
                }
            }
            TypeRef::Param { .. } => ty.clone(),
            TypeRef::Pointer(elem) => TypeRef::pointer(self.resolve_type(elem, scope, errors)),
            TypeRef::Slice(elem) => TypeRef::slice(self.resolve_type(elem, scope, errors)),
            TypeRef::Array { len, elem } => TypeRef::Array {
                len: len.clone(),
                elem: Box::new(self.resolve_type(elem, scope, errors)),
            },
            TypeRef::Map { key, value } => TypeRef::map(
                self.resolve_type(key, scope, errors),
                self.resolve_type(value, scope, errors),
            ),
            TypeRef::Chan { dir, elem } => {
                TypeRef::chan(*dir, self.resolve_type(elem, scope, errors))
            }
            TypeRef::Func(func) => TypeRef::Func(Box::new(FuncType {
                params: self.resolve_list(&func.params, scope, errors),
                results: self.resolve_list(&func.results, scope, errors),
                variadic: func.variadic,
            })),
            TypeRef::Interface { methods, embeds } => TypeRef::interface(
                methods
                    .iter()
                    .map(|method| self.resolve_signature(method, scope, errors))
                    .collect(),
                self.resolve_list(embeds, scope, errors),
            ),
            TypeRef::Struct(fields) => TypeRef::Struct(
                fields
                    .iter()
                    .map(|field| Field {
                        name: field.name.clone(),
                        ty: self.resolve_type(&field.ty, scope, errors),
                    })
                    .collect(),
            ),
        }
    }

    fn is_known(&self, name: &str) -> bool {
        is_predeclared(name)
            || self.index.lookup(name).is_some()
            || self.index.is_extern(name)
            || name.contains('.')
    }
}

fn same_unresolved(a: &Error, b: &Error) -> bool {
    match (a, b) {
        (
            Error::UnresolvedType {
                type_name: t1,
                declaration: d1,
            },
            Error::UnresolvedType {
                type_name: t2,
                declaration: d2,
            },
        ) => t1 == t2 && d1 == d2,
        _ => false,
    }
}
