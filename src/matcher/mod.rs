//! Interface implementation matcher.
//!
//! The matcher takes an immutable [`Program`] snapshot and decides, for every
//! interface and every concrete type, whether the type's method set
//! satisfies the interface's flattened required set. Matching is exact: a
//! type either provides an identical signature for every required method or
//! it does not implement the interface.
//!
//! A pass runs in four phases:
//!
//! 1. **Index**: one namespace for interfaces and types; methods attached to
//!    their receiver type (duplicate names, unknown receivers).
//! 2. **Resolve**: every referenced type name must be known; type
//!    parameters of generic interfaces are marked for binding.
//! 3. **Flatten**: embedded interfaces are expanded; cycles are rejected.
//! 4. **Match**: the interfaces x types product, partitioned by interface
//!    and run on the rayon pool when the program is large enough.
//!
//! # Example
//!
//! ```rust
//! use implens::matcher::SignatureMatcher;
//! use implens::model::{InterfaceDecl, MethodDecl, MethodSignature, Program, ReceiverForm, TypeDecl};
//!
//! let sig = |text: &str| MethodSignature::parse(text).unwrap();
//! let program = Program::builder()
//!     .interface(
//!         InterfaceDecl::named("Writer")
//!             .method(sig("Write([]byte) (int, error)"))
//!             .method(sig("Close() error")),
//!     )
//!     .concrete(TypeDecl::named("FileWriter"))
//!     .method(MethodDecl::new("FileWriter", ReceiverForm::Value, sig("Write(p []byte) (n int, err error)")))
//!     .method(MethodDecl::new("FileWriter", ReceiverForm::Value, sig("Close() error")))
//!     .build();
//!
//! let edges = SignatureMatcher::new(&program).compute_edges().unwrap();
//! assert!(edges.implements("FileWriter", "Writer"));
//! ```

pub mod edges;
mod flatten;
mod index;
mod resolve;
mod unify;

pub use edges::{
    EdgeSet, EdgeStatistics, ImplementationEdge, InterfaceId, InterfaceNode, MethodId, MethodLink,
    MethodNode, TypeId, TypeNode,
};

use crate::errors::{Error, Result};
use crate::model::{Location, MethodSignature, Program};
use index::SymbolIndex;
use rayon::prelude::*;
use resolve::{ResolvedProgram, Resolver};
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, trace};
use unify::{Candidate, InterfaceShapes};

/// Which receiver forms contribute to a type's method set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ReceiverPolicy {
    /// Value and pointer receivers both count.
    #[default]
    Union,
    /// Only value receivers count; edges needing a pointer are dropped.
    ValueOnly,
}

/// Default interface count at which matching moves onto the rayon pool.
pub const DEFAULT_MIN_PARALLEL_INTERFACES: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOptions {
    pub receiver_policy: ReceiverPolicy,
    pub parallel: bool,
    pub min_parallel_interfaces: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            receiver_policy: ReceiverPolicy::Union,
            parallel: true,
            min_parallel_interfaces: DEFAULT_MIN_PARALLEL_INTERFACES,
        }
    }
}

impl MatchOptions {
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }
}

/// Output of the first three phases.
struct Prepared<'p> {
    index: SymbolIndex<'p>,
    resolved: ResolvedProgram,
    flattened: Vec<Option<Vec<MethodSignature>>>,
    errors: Vec<Error>,
}

pub struct SignatureMatcher<'p> {
    program: &'p Program,
    options: MatchOptions,
}

impl<'p> SignatureMatcher<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self::with_options(program, MatchOptions::default())
    }

    pub fn with_options(program: &'p Program, options: MatchOptions) -> Self {
        Self { program, options }
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Compute every implementation edge of the program.
    ///
    /// Fails with the first problem found, in phase order and then in
    /// declaration order. No edges are returned for a program with errors.
    pub fn compute_edges(&self) -> Result<EdgeSet> {
        let _span = debug_span!(
            "compute_edges",
            interfaces = self.program.interfaces.len(),
            types = self.program.types.len(),
            methods = self.program.methods.len(),
        )
        .entered();

        let prepared = self.prepare();
        if let Some(error) = prepared.errors.into_iter().next() {
            debug!(%error, "program rejected");
            return Err(error);
        }

        let edges = self.match_all(&prepared.index, &prepared.resolved, &prepared.flattened);
        debug!(edges = edges.edges().len(), "matching complete");
        Ok(edges)
    }

    /// Run every check and return all problems found, without matching.
    pub fn validate(&self) -> Vec<Error> {
        let _span = debug_span!("validate").entered();
        self.prepare().errors
    }

    fn prepare(&self) -> Prepared<'p> {
        let mut errors = Vec::new();

        let index = SymbolIndex::build(self.program, &mut errors);
        let resolved = Resolver::new(&index).resolve_program(&mut errors);
        let names: Vec<String> = self
            .program
            .interfaces
            .iter()
            .map(|decl| decl.display_name())
            .collect();
        let flattened = flatten::flatten_all(&names, &resolved.interfaces, &mut errors);

        Prepared {
            index,
            resolved,
            flattened,
            errors,
        }
    }

    fn match_all(
        &self,
        index: &SymbolIndex<'p>,
        resolved: &ResolvedProgram,
        flattened: &[Option<Vec<MethodSignature>>],
    ) -> EdgeSet {
        let program = self.program;
        let policy = self.options.receiver_policy;

        let method_sets: Vec<Vec<Candidate<'_>>> = index
            .method_sets
            .iter()
            .map(|set| {
                set.iter()
                    .map(|&id| Candidate {
                        id,
                        signature: &resolved.methods[id.0],
                        form: program.methods[id.0].form,
                    })
                    .collect()
            })
            .collect();

        let mut shapes = InterfaceShapes::default();
        for (decl, methods) in program.interfaces.iter().zip(flattened) {
            if let (Some(name), Some(methods)) = (&decl.name, methods) {
                if decl.type_params.is_empty() {
                    shapes.insert(name.as_str(), methods);
                }
            }
        }

        let partition = |iface: usize| -> Vec<ImplementationEdge> {
            let Some(required) = &flattened[iface] else {
                return Vec::new();
            };
            let edges: Vec<ImplementationEdge> = method_sets
                .iter()
                .enumerate()
                .filter_map(|(ty, set)| {
                    unify::satisfies(required, set, policy, &shapes).map(|satisfaction| {
                        ImplementationEdge {
                            interface: InterfaceId(iface),
                            concrete: TypeId(ty),
                            needs_pointer: satisfaction.needs_pointer,
                            methods: satisfaction.links,
                        }
                    })
                })
                .collect();
            trace!(interface = iface, implementations = edges.len(), "partition matched");
            edges
        };

        let interface_count = program.interfaces.len();
        let parallel =
            self.options.parallel && interface_count >= self.options.min_parallel_interfaces;
        debug!(parallel, interface_count, "matching interfaces");

        let edges: Vec<ImplementationEdge> = if parallel {
            (0..interface_count)
                .into_par_iter()
                .flat_map_iter(&partition)
                .collect()
        } else {
            (0..interface_count).flat_map(&partition).collect()
        };

        let interfaces = program
            .interfaces
            .iter()
            .enumerate()
            .map(|(i, decl)| InterfaceNode {
                id: InterfaceId(i),
                name: decl.display_name(),
                anonymous: decl.name.is_none(),
                location: decl.location.clone(),
                required: flattened[i].clone().unwrap_or_default(),
                method_locations: flattened[i]
                    .iter()
                    .flatten()
                    .filter_map(|method| {
                        declared_location(program, resolved, i, &method.name)
                            .map(|location| (method.name.clone(), location.clone()))
                    })
                    .collect(),
            })
            .collect();

        let types = program
            .types
            .iter()
            .enumerate()
            .map(|(i, decl)| TypeNode {
                id: TypeId(i),
                name: decl.name.to_string(),
                location: decl.location.clone(),
                methods: index.method_sets[i].clone(),
            })
            .collect();

        let mut receivers = vec![None; program.methods.len()];
        for (owner, set) in index.method_sets.iter().enumerate() {
            for id in set {
                receivers[id.0] = Some(TypeId(owner));
            }
        }
        let methods = program
            .methods
            .iter()
            .enumerate()
            .filter_map(|(i, decl)| {
                receivers[i].map(|receiver| MethodNode {
                    id: MethodId(i),
                    receiver,
                    form: decl.form,
                    signature: resolved.methods[i].clone(),
                    location: decl.location.clone(),
                })
            })
            .collect();

        EdgeSet::new(interfaces, types, methods, edges)
    }
}

/// Where `method` of interface `iface` is declared: on the interface itself,
/// or on the embedded interface it was inherited from. Only called for
/// interfaces that flattened, so the embedding graph below is acyclic.
fn declared_location<'p>(
    program: &'p Program,
    resolved: &ResolvedProgram,
    iface: usize,
    method: &str,
) -> Option<&'p Location> {
    let decl = &program.interfaces[iface];
    if decl.methods.iter().any(|own| own.name == method) {
        return decl.method_locations.get(method);
    }
    resolved.interfaces[iface]
        .embeds
        .iter()
        .find_map(|embed| declared_location(program, resolved, embed.0, method))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InterfaceDecl, MethodDecl, MethodSignature, ReceiverForm, TypeDecl};

    fn sig(text: &str) -> MethodSignature {
        MethodSignature::parse(text).unwrap()
    }

    fn value(receiver: &str, text: &str) -> MethodDecl {
        MethodDecl::new(receiver, ReceiverForm::Value, sig(text))
    }

    fn pointer(receiver: &str, text: &str) -> MethodDecl {
        MethodDecl::new(receiver, ReceiverForm::Pointer, sig(text))
    }

    fn tree_program() -> Program {
        Program::builder()
            .interface(
                InterfaceDecl::named("Node")
                    .method(sig("GetChildren() []Node"))
                    .method(sig("GetParent() Node"))
                    .method(sig("SetParent(Node)")),
            )
            .concrete(TypeDecl::named("TreeNode"))
            .method(pointer("TreeNode", "GetChildren() []Node"))
            .method(pointer("TreeNode", "GetParent() Node"))
            .method(pointer("TreeNode", "SetParent(p Node)"))
            .build()
    }

    #[test]
    fn test_pointer_receivers_count_under_union() {
        let program = tree_program();
        let edges = SignatureMatcher::new(&program).compute_edges().unwrap();
        let edge = &edges.edges()[0];
        assert!(edge.needs_pointer);
        assert_eq!(edge.methods.len(), 3);
    }

    #[test]
    fn test_value_only_policy_drops_pointer_edges() {
        let program = tree_program();
        let options = MatchOptions {
            receiver_policy: ReceiverPolicy::ValueOnly,
            ..MatchOptions::sequential()
        };
        let edges = SignatureMatcher::with_options(&program, options)
            .compute_edges()
            .unwrap();
        assert!(edges.edges().is_empty());
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let mut builder = Program::builder();
        for i in 0..40 {
            builder = builder.interface(
                InterfaceDecl::named(format!("Iface{i}")).method(sig(&format!("M{}() int", i % 5))),
            );
        }
        for i in 0..10 {
            builder = builder
                .concrete(TypeDecl::named(format!("Type{i}")))
                .method(value(&format!("Type{i}"), &format!("M{}() int", i % 5)));
        }
        let program = builder.build();

        let parallel = SignatureMatcher::with_options(
            &program,
            MatchOptions {
                min_parallel_interfaces: 1,
                ..MatchOptions::default()
            },
        )
        .compute_edges()
        .unwrap();
        let sequential = SignatureMatcher::with_options(&program, MatchOptions::sequential())
            .compute_edges()
            .unwrap();

        assert_eq!(parallel.edges(), sequential.edges());
        assert_eq!(parallel.edges().len(), 80);
    }

    #[test]
    fn test_generic_interface_binds_type_parameter() {
        let program = Program::builder()
            .interface(
                InterfaceDecl::named("Comparable")
                    .type_param("T")
                    .method(sig("Compare(other T) int")),
            )
            .concrete(TypeDecl::named("StringComparator"))
            .method(value("StringComparator", "Compare(other string) int"))
            .build();
        let edges = SignatureMatcher::new(&program).compute_edges().unwrap();
        assert!(edges.implements("StringComparator", "Comparable"));
    }

    #[test]
    fn test_inline_interface_parameters_match_by_shape() {
        let program = Program::builder()
            .interface(InterfaceDecl::named("R").method(sig("Read() int")))
            .interface(InterfaceDecl::named("W").method(sig("Write() int")))
            .interface(InterfaceDecl::named("Uses").method(sig("Use(x interface{R; W})")))
            .concrete(TypeDecl::named("Swapped"))
            .method(value("Swapped", "Use(x interface{W; R})"))
            .concrete(TypeDecl::named("Spelled"))
            .method(value("Spelled", "Use(x interface{Read() int; Write() int})"))
            .concrete(TypeDecl::named("Partial"))
            .method(value("Partial", "Use(x interface{R})"))
            .build();
        let edges = SignatureMatcher::new(&program).compute_edges().unwrap();
        assert!(edges.implements("Swapped", "Uses"));
        assert!(edges.implements("Spelled", "Uses"));
        assert!(!edges.implements("Partial", "Uses"));
    }

    #[test]
    fn test_method_locations_follow_embedding() {
        let program = Program::builder()
            .interface(
                InterfaceDecl::named("Closer")
                    .at(Location::new("io.go", 10))
                    .method_at(sig("Close() error"), Location::new("io.go", 11)),
            )
            .interface(
                InterfaceDecl::named("ReadCloser")
                    .at(Location::new("rc.go", 3))
                    .embed("Closer")
                    .method(sig("Read() int")),
            )
            .build();
        let edges = SignatureMatcher::new(&program).compute_edges().unwrap();
        let node = edges.find_interface("ReadCloser").unwrap();
        assert_eq!(node.method_location("Close"), Some(&Location::new("io.go", 11)));
        assert_eq!(node.method_location("Read"), Some(&Location::new("rc.go", 3)));
    }

    #[test]
    fn test_first_error_wins_and_validate_collects_all() {
        let program = Program::builder()
            .interface(InterfaceDecl::named("A").embed("B"))
            .interface(InterfaceDecl::named("B").embed("A"))
            .concrete(TypeDecl::named("Dup"))
            .concrete(TypeDecl::named("Dup"))
            .build();
        let matcher = SignatureMatcher::new(&program);

        let error = matcher.compute_edges().unwrap_err();
        assert!(matches!(error, Error::DuplicateDeclaration { .. }));

        let all = matcher.validate();
        assert_eq!(all.len(), 2);
        assert!(matches!(all[1], Error::CyclicComposition { .. }));
    }
}
