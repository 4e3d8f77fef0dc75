//! Symbol table files.
//!
//! A symbol table is the upstream collaborator's output: every interface,
//! concrete type and method of a program, with signatures written as Go
//! source text. Tables may be TOML, JSON or YAML; the format is chosen by
//! file extension. Several tables can be merged into one program, which is
//! how a program split across many files is described.
//!
//! ```toml
//! externs = ["io.Reader"]
//!
//! [[interface]]
//! name = "Writer"
//! file = "writer.go"
//! line = 3
//! methods = [
//!     "Write([]byte) (int, error)",
//!     { signature = "Close() error", line = 5 },
//! ]
//!
//! [[type]]
//! name = "FileWriter"
//! methods = ["Close() error"]
//! pointer_methods = ["Write(p []byte) (n int, err error)"]
//!
//! [[method]]
//! receiver = "*FileWriter"
//! signature = "Flush() error"
//! ```

use crate::errors::{Error, Result};
use crate::model::{
    InterfaceDecl, Location, MethodDecl, MethodSignature, Program, QualifiedName, ReceiverForm,
    TypeDecl,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolFormat {
    Toml,
    Json,
    Yaml,
}

impl SymbolFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SymbolTable {
    #[serde(default)]
    pub externs: Vec<String>,
    #[serde(default, rename = "interface")]
    pub interfaces: Vec<InterfaceEntry>,
    #[serde(default, rename = "type")]
    pub types: Vec<TypeEntry>,
    #[serde(default, rename = "method")]
    pub methods: Vec<MethodEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterfaceEntry {
    /// Absent for inline interfaces.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub type_params: Vec<String>,
    #[serde(default)]
    pub embeds: Vec<String>,
    #[serde(default)]
    pub methods: Vec<InterfaceMethodEntry>,
}

/// An interface method: bare signature text, or a table that also gives
/// the method's own line in the interface's file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InterfaceMethodEntry {
    Signature(String),
    Located { signature: String, line: u32 },
}

impl InterfaceMethodEntry {
    pub fn signature(&self) -> &str {
        match self {
            Self::Signature(signature) | Self::Located { signature, .. } => signature,
        }
    }

    pub fn line(&self) -> Option<u32> {
        match self {
            Self::Signature(_) => None,
            Self::Located { line, .. } => Some(*line),
        }
    }
}

impl From<&str> for InterfaceMethodEntry {
    fn from(signature: &str) -> Self {
        Self::Signature(signature.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeEntry {
    pub name: String,
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default)]
    pub line: Option<u32>,
    /// Value receiver methods.
    #[serde(default)]
    pub methods: Vec<String>,
    #[serde(default)]
    pub pointer_methods: Vec<String>,
}

/// A method declared away from its type, e.g. in another file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodEntry {
    /// `T` or `*T`.
    pub receiver: String,
    pub signature: String,
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default)]
    pub line: Option<u32>,
}

fn location(file: &Option<PathBuf>, line: Option<u32>) -> Option<Location> {
    file.as_ref()
        .map(|file| Location::new(file.clone(), line.unwrap_or(1)))
}

fn parse_receiver(receiver: &str) -> (ReceiverForm, &str) {
    match receiver.trim().strip_prefix('*') {
        Some(name) => (ReceiverForm::Pointer, name.trim()),
        None => (ReceiverForm::Value, receiver.trim()),
    }
}

impl SymbolTable {
    pub fn parse(contents: &str, format: SymbolFormat) -> Result<Self> {
        let table = match format {
            SymbolFormat::Toml => toml::from_str(contents)?,
            SymbolFormat::Json => serde_json::from_str(contents)?,
            SymbolFormat::Yaml => serde_yaml::from_str(contents)?,
        };
        Ok(table)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let format =
            SymbolFormat::from_path(path).ok_or_else(|| Error::UnsupportedFormat(path.into()))?;
        let contents = fs::read_to_string(path).map_err(|e| Error::file_system(path, e))?;
        let table = Self::parse(&contents, format)?;
        tracing::debug!(
            path = %path.display(),
            interfaces = table.interfaces.len(),
            types = table.types.len(),
            methods = table.methods.len(),
            "loaded symbol table"
        );
        Ok(table)
    }

    /// Parse every signature and build the program snapshot. Only syntax is
    /// checked here; names are resolved by the matcher.
    pub fn into_program(self) -> Result<Program> {
        let mut builder = Program::builder();

        for entry in self.interfaces {
            let mut decl = match entry.name {
                Some(name) => InterfaceDecl::named(name),
                None => InterfaceDecl::anonymous(),
            };
            decl.location = location(&entry.file, entry.line);
            decl.type_params = entry.type_params;
            decl.embeds = entry.embeds.into_iter().map(QualifiedName::from).collect();
            for method in &entry.methods {
                let signature = MethodSignature::parse(method.signature())?;
                decl = match (&entry.file, method.line()) {
                    (Some(file), Some(line)) => {
                        decl.method_at(signature, Location::new(file.clone(), line))
                    }
                    _ => decl.method(signature),
                };
            }
            builder = builder.interface(decl);
        }

        for entry in self.types {
            let at = location(&entry.file, entry.line);
            let forms = entry
                .methods
                .iter()
                .map(|text| (ReceiverForm::Value, text))
                .chain(entry.pointer_methods.iter().map(|text| (ReceiverForm::Pointer, text)));
            for (form, text) in forms {
                let mut method = MethodDecl::new(entry.name.as_str(), form, MethodSignature::parse(text)?);
                method.location = at.clone();
                builder = builder.method(method);
            }

            let mut decl = TypeDecl::named(entry.name);
            decl.location = at;
            builder = builder.concrete(decl);
        }

        for entry in self.methods {
            let (form, receiver) = parse_receiver(&entry.receiver);
            let mut method = MethodDecl::new(receiver, form, MethodSignature::parse(&entry.signature)?);
            method.location = location(&entry.file, entry.line);
            builder = builder.method(method);
        }

        for name in self.externs {
            builder = builder.external(name);
        }

        Ok(builder.build())
    }
}

/// Load and merge symbol tables into one program, in argument order.
pub fn load_program<P: AsRef<Path>>(paths: &[P]) -> Result<Program> {
    paths.iter().try_fold(Program::default(), |program, path| {
        let table = SymbolTable::from_path(path.as_ref())?;
        Ok(program.merge(table.into_program()?))
    })
}
