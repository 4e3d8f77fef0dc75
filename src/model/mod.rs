//! Declaration model shared by the loader, the matcher and the reports.

pub mod decl;
pub mod program;
pub mod signature;
pub mod types;

pub use decl::{InterfaceDecl, Location, MethodDecl, QualifiedName, ReceiverForm, TypeDecl};
pub use program::{Program, ProgramBuilder};
pub use signature::MethodSignature;
pub use types::{ChanDir, Field, FuncType, TypeRef};
