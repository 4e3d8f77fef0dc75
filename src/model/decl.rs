//! Declarations gathered from one logical program.

use super::signature::MethodSignature;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Fully-qualified declaration name, e.g. `io.Reader` or `FileWriter`.
///
/// Identity of a declaration is its qualified name; file positions are
/// carried separately in [`Location`] and never take part in matching.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualifiedName(String);

impl QualifiedName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QualifiedName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for QualifiedName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Where a declaration was found. Presentation only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub file: PathBuf,
    pub line: u32,
}

impl Location {
    pub fn new(file: impl Into<PathBuf>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiverForm {
    Value,
    Pointer,
}

/// A method defined on a concrete type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub receiver: QualifiedName,
    pub form: ReceiverForm,
    pub signature: MethodSignature,
    pub location: Option<Location>,
}

impl MethodDecl {
    pub fn new(
        receiver: impl Into<QualifiedName>,
        form: ReceiverForm,
        signature: MethodSignature,
    ) -> Self {
        Self {
            receiver: receiver.into(),
            form,
            signature,
            location: None,
        }
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// `Receiver.Method`, the method's qualified identity.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.receiver, self.signature.name)
    }
}

/// A declared interface. Anonymous (inline) interfaces have no name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDecl {
    pub name: Option<QualifiedName>,
    pub type_params: Vec<String>,
    pub methods: Vec<MethodSignature>,
    pub embeds: Vec<QualifiedName>,
    pub location: Option<Location>,
    /// Positions of individual methods, by method name.
    pub method_locations: BTreeMap<String, Location>,
}

impl InterfaceDecl {
    pub fn named(name: impl Into<QualifiedName>) -> Self {
        Self {
            name: Some(name.into()),
            type_params: Vec::new(),
            methods: Vec::new(),
            embeds: Vec::new(),
            location: None,
            method_locations: BTreeMap::new(),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            name: None,
            type_params: Vec::new(),
            methods: Vec::new(),
            embeds: Vec::new(),
            location: None,
            method_locations: BTreeMap::new(),
        }
    }

    pub fn method(mut self, signature: MethodSignature) -> Self {
        self.methods.push(signature);
        self
    }

    pub fn method_at(mut self, signature: MethodSignature, location: Location) -> Self {
        self.method_locations.insert(signature.name.clone(), location);
        self.methods.push(signature);
        self
    }

    pub fn embed(mut self, name: impl Into<QualifiedName>) -> Self {
        self.embeds.push(name.into());
        self
    }

    pub fn type_param(mut self, name: impl Into<String>) -> Self {
        self.type_params.push(name.into());
        self
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Name used in reports; anonymous interfaces render their method list.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.to_string(),
            None => {
                let methods: Vec<String> = self.methods.iter().map(ToString::to_string).collect();
                let mut parts: Vec<String> = self.embeds.iter().map(ToString::to_string).collect();
                parts.extend(methods);
                format!("interface{{{}}}", parts.join("; "))
            }
        }
    }
}

/// A declared concrete type. Its methods are attached through
/// [`MethodDecl::receiver`] and may come from any file of the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: QualifiedName,
    pub location: Option<Location>,
}

impl TypeDecl {
    pub fn named(name: impl Into<QualifiedName>) -> Self {
        Self {
            name: name.into(),
            location: None,
        }
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_display_name() {
        let decl = InterfaceDecl::anonymous()
            .method(MethodSignature::parse("Process(string) error").unwrap());
        assert_eq!(decl.display_name(), "interface{Process(string) error}");
    }

    #[test]
    fn test_method_qualified_name() {
        let method = MethodDecl::new(
            "TreeNode",
            ReceiverForm::Pointer,
            MethodSignature::parse("GetParent() Node").unwrap(),
        );
        assert_eq!(method.qualified_name(), "TreeNode.GetParent");
    }
}
