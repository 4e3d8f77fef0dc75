use super::decl::{InterfaceDecl, MethodDecl, QualifiedName, TypeDecl};

/// Immutable snapshot of every declaration in one logical program.
///
/// Declarations from all files of the program live in one namespace. The
/// snapshot is not validated on construction: duplicate names, unresolved
/// types and composition cycles are reported by the matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub interfaces: Vec<InterfaceDecl>,
    pub types: Vec<TypeDecl>,
    pub methods: Vec<MethodDecl>,
    /// Names resolved outside the program (imported packages, generated code).
    pub externs: Vec<QualifiedName>,
}

impl Program {
    pub fn builder() -> ProgramBuilder {
        ProgramBuilder::default()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty() && self.types.is_empty() && self.methods.is_empty()
    }

    /// Union of two snapshots, keeping declaration order.
    pub fn merge(mut self, other: Program) -> Program {
        self.interfaces.extend(other.interfaces);
        self.types.extend(other.types);
        self.methods.extend(other.methods);
        for name in other.externs {
            if !self.externs.contains(&name) {
                self.externs.push(name);
            }
        }
        self
    }
}

#[derive(Debug, Default)]
pub struct ProgramBuilder {
    program: Program,
}

impl ProgramBuilder {
    pub fn interface(mut self, decl: InterfaceDecl) -> Self {
        self.program.interfaces.push(decl);
        self
    }

    pub fn concrete(mut self, decl: TypeDecl) -> Self {
        self.program.types.push(decl);
        self
    }

    pub fn method(mut self, decl: MethodDecl) -> Self {
        self.program.methods.push(decl);
        self
    }

    pub fn external(mut self, name: impl Into<QualifiedName>) -> Self {
        self.program.externs.push(name.into());
        self
    }

    pub fn build(self) -> Program {
        self.program
    }
}
