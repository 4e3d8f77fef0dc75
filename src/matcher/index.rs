//! Name index over one program snapshot.
//!
//! Builds the single namespace shared by interfaces and concrete types and
//! attaches every method to its receiver type, wherever it was declared.

use super::edges::{InterfaceId, MethodId, TypeId};
use crate::errors::Error;
use crate::model::Program;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Symbol {
    Interface(InterfaceId),
    Type(TypeId),
}

#[derive(Debug)]
pub(crate) struct SymbolIndex<'p> {
    pub program: &'p Program,
    names: HashMap<&'p str, Symbol>,
    externs: HashSet<&'p str>,
    /// Methods attached to each concrete type, in declaration order.
    pub method_sets: Vec<Vec<MethodId>>,
}

impl<'p> SymbolIndex<'p> {
    /// Index `program`, pushing duplicate names and methods whose receiver
    /// is not a declared concrete type onto `errors`. The first declaration
    /// of a colliding name keeps it.
    pub fn build(program: &'p Program, errors: &mut Vec<Error>) -> Self {
        let mut names = HashMap::new();

        for (i, decl) in program.interfaces.iter().enumerate() {
            if let Some(name) = &decl.name {
                if names.contains_key(name.as_str()) {
                    errors.push(Error::duplicate(name.as_str()));
                } else {
                    names.insert(name.as_str(), Symbol::Interface(InterfaceId(i)));
                }
            }
        }
        for (i, decl) in program.types.iter().enumerate() {
            if names.contains_key(decl.name.as_str()) {
                errors.push(Error::duplicate(decl.name.as_str()));
            } else {
                names.insert(decl.name.as_str(), Symbol::Type(TypeId(i)));
            }
        }

        let mut method_sets: Vec<Vec<MethodId>> = vec![Vec::new(); program.types.len()];
        for (i, method) in program.methods.iter().enumerate() {
            match names.get(method.receiver.as_str()) {
                Some(Symbol::Type(TypeId(owner))) => {
                    let set = &mut method_sets[*owner];
                    let redeclared = set.iter().any(|MethodId(existing)| {
                        program.methods[*existing].signature.name == method.signature.name
                    });
                    if redeclared {
                        errors.push(Error::duplicate(method.qualified_name()));
                    } else {
                        set.push(MethodId(i));
                    }
                }
                Some(Symbol::Interface(_)) | None => {
                    errors.push(Error::unresolved(
                        method.receiver.as_str(),
                        method.qualified_name(),
                    ));
                }
            }
        }

        let externs = program.externs.iter().map(|name| name.as_str()).collect();

        Self {
            program,
            names,
            externs,
            method_sets,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        self.names.get(name).copied()
    }

    pub fn is_extern(&self, name: &str) -> bool {
        self.externs.contains(name)
    }

    pub fn interface(&self, name: &str) -> Option<InterfaceId> {
        match self.lookup(name) {
            Some(Symbol::Interface(id)) => Some(id),
            _ => None,
        }
    }
}
