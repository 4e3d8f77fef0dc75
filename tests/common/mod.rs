// Shared helpers for implens integration tests
#![allow(dead_code)]

use implens::matcher::{EdgeSet, SignatureMatcher};
use implens::{load_program, Program};
use std::path::PathBuf;

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("symbols")
        .join(name)
}

pub fn load_fixtures(names: &[&str]) -> Program {
    let paths: Vec<PathBuf> = names.iter().map(|name| fixture(name)).collect();
    load_program(&paths).expect("fixture symbol tables load")
}

pub fn edges_for(names: &[&str]) -> EdgeSet {
    let program = load_fixtures(names);
    SignatureMatcher::new(&program)
        .compute_edges()
        .expect("fixture program is valid")
}

/// Names of the types implementing `interface`, in declaration order.
pub fn implementors(edges: &EdgeSet, interface: &str) -> Vec<String> {
    let node = edges
        .find_interface(interface)
        .unwrap_or_else(|| panic!("no interface {interface}"));
    edges
        .implementors(node.id)
        .map(|ty| ty.name.clone())
        .collect()
}

/// Names of the interfaces `concrete` implements, in declaration order.
pub fn implemented(edges: &EdgeSet, concrete: &str) -> Vec<String> {
    let node = edges
        .find_type(concrete)
        .unwrap_or_else(|| panic!("no type {concrete}"));
    edges
        .implemented_interfaces(node.id)
        .map(|iface| iface.name.clone())
        .collect()
}
