//! Static interface implementation matching.
//!
//! `implens` reads symbol tables describing a program's interfaces,
//! concrete types and methods, and computes which types implement which
//! interfaces by exact signature comparison. The resulting [`EdgeSet`]
//! drives code lens labels and reports.

pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod io;
pub mod lens;
pub mod matcher;
pub mod model;
pub mod symbols;
pub mod syntax;

pub use crate::config::{ImplensConfig, LensConfig, ParallelConfig};
pub use crate::errors::{Error, ErrorCode, Result};
pub use crate::io::output::{create_writer, AnalysisReport, OutputFormat, OutputWriter};
pub use crate::lens::{collect_lenses, Lens, LensTarget};
pub use crate::matcher::{EdgeSet, MatchOptions, ReceiverPolicy, SignatureMatcher};
pub use crate::model::{
    InterfaceDecl, MethodDecl, MethodSignature, Program, QualifiedName, ReceiverForm, TypeDecl,
    TypeRef,
};
pub use crate::symbols::{load_program, SymbolTable};
