//! Property-based tests for signature matching
//!
//! These tests verify invariants that should hold for all inputs:
//! - An interface with no required methods is implemented by every type
//! - Identical signatures always match
//! - Any single change to a signature breaks the match
//! - Flattening is transitive along embedding chains
//! - Parallel and sequential matching agree

use implens::matcher::{MatchOptions, SignatureMatcher};
use implens::{InterfaceDecl, MethodDecl, MethodSignature, Program, ReceiverForm, TypeDecl};
use proptest::prelude::*;

const TYPES: &[&str] = &[
    "int",
    "string",
    "bool",
    "error",
    "[]byte",
    "map[string]int",
    "*int",
    "chan int",
    "<-chan string",
    "func(int) error",
    "interface{}",
    "[4]float64",
];

#[derive(Debug, Clone)]
struct Sig {
    name: String,
    params: Vec<usize>,
    results: Vec<usize>,
    variadic: bool,
}

impl Sig {
    fn text(&self) -> String {
        let params: Vec<String> = self
            .params
            .iter()
            .enumerate()
            .map(|(i, &ty)| {
                if self.variadic && i + 1 == self.params.len() {
                    format!("...{}", TYPES[ty])
                } else {
                    TYPES[ty].to_string()
                }
            })
            .collect();
        let results: Vec<&str> = self.results.iter().map(|&ty| TYPES[ty]).collect();
        let results = match results.as_slice() {
            [] => String::new(),
            [single] => format!(" {single}"),
            many => format!(" ({})", many.join(", ")),
        };
        format!("{}({}){results}", self.name, params.join(", "))
    }

    fn parse(&self) -> MethodSignature {
        MethodSignature::parse(&self.text()).unwrap()
    }
}

fn sig_strategy(name: String) -> impl Strategy<Value = Sig> {
    (
        prop::collection::vec(0..TYPES.len(), 0..4),
        prop::collection::vec(0..TYPES.len(), 0..3),
        any::<bool>(),
    )
        .prop_map(move |(params, results, variadic)| Sig {
            name: name.clone(),
            variadic: variadic && !params.is_empty(),
            params,
            results,
        })
}

fn named_sig() -> impl Strategy<Value = Sig> {
    "[A-Z][a-z]{0,6}".prop_flat_map(sig_strategy)
}

fn single_method_program(required: &Sig, provided: &Sig) -> Program {
    Program::builder()
        .interface(InterfaceDecl::named("Target").method(required.parse()))
        .concrete(TypeDecl::named("Impl"))
        .method(MethodDecl::new("Impl", ReceiverForm::Value, provided.parse()))
        .build()
}

fn implements(program: &Program) -> bool {
    SignatureMatcher::new(program)
        .compute_edges()
        .unwrap()
        .implements("Impl", "Target")
}

proptest! {
    #[test]
    fn prop_empty_interface_is_universal(methods in prop::collection::vec(named_sig(), 0..5)) {
        let mut builder = Program::builder()
            .interface(InterfaceDecl::named("Any"))
            .concrete(TypeDecl::named("Impl"));
        let mut seen = std::collections::HashSet::new();
        for method in methods.iter().filter(|m| seen.insert(m.name.clone())) {
            builder = builder.method(MethodDecl::new("Impl", ReceiverForm::Value, method.parse()));
        }
        let program = builder.build();
        let edges = SignatureMatcher::new(&program).compute_edges().unwrap();
        prop_assert!(edges.implements("Impl", "Any"));
    }

    #[test]
    fn prop_identical_signatures_match(sig in named_sig()) {
        prop_assert!(implements(&single_method_program(&sig, &sig)));
    }

    #[test]
    fn prop_changed_parameter_type_breaks_match(
        sig in named_sig(),
        index in any::<prop::sample::Index>(),
        shift in 1..TYPES.len(),
    ) {
        prop_assume!(!sig.params.is_empty());
        let mut changed = sig.clone();
        let i = index.index(sig.params.len());
        changed.params[i] = (sig.params[i] + shift) % TYPES.len();
        prop_assert!(!implements(&single_method_program(&sig, &changed)));
    }

    #[test]
    fn prop_extra_result_breaks_match(sig in named_sig(), extra in 0..TYPES.len()) {
        let mut changed = sig.clone();
        changed.results.push(extra);
        prop_assert!(!implements(&single_method_program(&sig, &changed)));
        prop_assert!(!implements(&single_method_program(&changed, &sig)));
    }

    #[test]
    fn prop_variadic_toggle_breaks_match(sig in named_sig()) {
        prop_assume!(!sig.params.is_empty());
        let mut changed = sig.clone();
        changed.variadic = !sig.variadic;
        prop_assert!(!implements(&single_method_program(&sig, &changed)));
    }

    #[test]
    fn prop_removing_unmatched_requirements_creates_no_edge(
        a in sig_strategy("Alpha".into()),
        b in sig_strategy("Beta".into()),
        shift in 1..TYPES.len(),
    ) {
        // Same names, but every provided method returns one extra value.
        let mismatch = |sig: &Sig| {
            let mut changed = sig.clone();
            changed.results.push(shift);
            changed
        };
        for required in [vec![&a, &b], vec![&a], vec![&b]] {
            let mut iface = InterfaceDecl::named("Target");
            for sig in &required {
                iface = iface.method(sig.parse());
            }
            let program = Program::builder()
                .interface(iface)
                .concrete(TypeDecl::named("Impl"))
                .method(MethodDecl::new("Impl", ReceiverForm::Value, mismatch(&a).parse()))
                .method(MethodDecl::new("Impl", ReceiverForm::Value, mismatch(&b).parse()))
                .build();
            prop_assert!(!implements(&program));
        }
    }

    #[test]
    fn prop_flattening_is_transitive(
        a in sig_strategy("Alpha".into()),
        b in sig_strategy("Beta".into()),
        c in sig_strategy("Gamma".into()),
    ) {
        let program = Program::builder()
            .interface(InterfaceDecl::named("C").method(c.parse()))
            .interface(InterfaceDecl::named("B").embed("C").method(b.parse()))
            .interface(InterfaceDecl::named("A").embed("B").method(a.parse()))
            .concrete(TypeDecl::named("Impl"))
            .method(MethodDecl::new("Impl", ReceiverForm::Value, a.parse()))
            .method(MethodDecl::new("Impl", ReceiverForm::Pointer, b.parse()))
            .method(MethodDecl::new("Impl", ReceiverForm::Value, c.parse()))
            .build();
        let edges = SignatureMatcher::new(&program).compute_edges().unwrap();
        for iface in ["A", "B", "C"] {
            prop_assert!(edges.implements("Impl", iface));
        }
    }

    #[test]
    fn prop_parallel_matches_sequential(
        required in prop::collection::vec(sig_strategy("Run".into()), 1..12),
        provided in prop::collection::vec(sig_strategy("Run".into()), 1..12),
    ) {
        let mut builder = Program::builder();
        for (i, sig) in required.iter().enumerate() {
            builder = builder.interface(InterfaceDecl::named(format!("I{i}")).method(sig.parse()));
        }
        for (i, sig) in provided.iter().enumerate() {
            let name = format!("T{i}");
            builder = builder
                .concrete(TypeDecl::named(name.as_str()))
                .method(MethodDecl::new(name.as_str(), ReceiverForm::Value, sig.parse()));
        }
        let program = builder.build();

        let parallel = SignatureMatcher::with_options(
            &program,
            MatchOptions { min_parallel_interfaces: 1, ..MatchOptions::default() },
        )
        .compute_edges()
        .unwrap();
        let sequential = SignatureMatcher::with_options(&program, MatchOptions::sequential())
            .compute_edges()
            .unwrap();
        prop_assert_eq!(parallel.edges(), sequential.edges());
    }
}
