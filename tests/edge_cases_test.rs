//! Embedding, generics, receivers and unusual signatures.

mod common;

use common::{edges_for, implemented, implementors};
use pretty_assertions::assert_eq;

const EDGE_CASES: &str = "edge_cases.yaml";

#[test]
fn test_embedded_interfaces_flatten() {
    let edges = edges_for(&[EDGE_CASES]);
    assert_eq!(implementors(&edges, "ReadWriteCloser"), vec!["File"]);

    let required: Vec<String> = edges
        .find_interface("ReadWriteCloser")
        .unwrap()
        .required
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        required,
        vec!["Close() error", "Read([]uint8) (int, error)", "Write([]uint8) (int, error)"]
    );
}

#[test]
fn test_file_implements_every_io_interface() {
    let edges = edges_for(&[EDGE_CASES]);
    assert_eq!(
        implemented(&edges, "File"),
        vec!["io.Reader", "io.Writer", "io.Closer", "ReadWriteCloser", "EmptyMarker"]
    );
}

#[test]
fn test_generic_interface() {
    let edges = edges_for(&[EDGE_CASES]);
    assert_eq!(implementors(&edges, "Comparable"), vec!["StringComparator"]);
}

#[test]
fn test_unexported_methods() {
    let edges = edges_for(&[EDGE_CASES]);
    assert_eq!(implementors(&edges, "internalInterface"), vec!["InternalImpl"]);
}

#[test]
fn test_complex_return_types() {
    let edges = edges_for(&[EDGE_CASES]);
    assert_eq!(implementors(&edges, "ComplexReturns"), vec!["ComplexImpl"]);
}

#[test]
fn test_variadic_parameters() {
    let edges = edges_for(&[EDGE_CASES]);
    assert_eq!(implementors(&edges, "VariadicInterface"), vec!["VariadicImpl"]);
    assert_eq!(implementors(&edges, "ServiceInterface"), vec!["RealWorldService"]);
}

#[test]
fn test_inheritance_chain() {
    let edges = edges_for(&[EDGE_CASES]);
    for iface in ["BaseInterface", "ExtendedInterface", "FullInterface"] {
        assert_eq!(implementors(&edges, iface), vec!["ChainImpl"], "{iface}");
    }
}

#[test]
fn test_anonymous_interface() {
    let edges = edges_for(&[EDGE_CASES]);
    let anonymous = edges
        .interfaces()
        .iter()
        .find(|node| node.anonymous)
        .expect("anonymous interface present");
    assert_eq!(anonymous.name, "interface{Process(string) error}");

    let names: Vec<&str> = edges
        .implementors(anonymous.id)
        .map(|ty| ty.name.as_str())
        .collect();
    assert_eq!(names, vec!["AnonymousImpl"]);
}

#[test]
fn test_empty_interface_is_implemented_by_every_type() {
    let edges = edges_for(&[EDGE_CASES]);
    let id = edges.find_interface("EmptyMarker").unwrap().id;
    assert_eq!(edges.implementation_count(id), edges.types().len());
    assert!(implemented(&edges, "EmptyImpl").contains(&"EmptyMarker".to_string()));
}

#[test]
fn test_recursive_interface_with_pointer_receivers() {
    let edges = edges_for(&[EDGE_CASES]);
    assert_eq!(implementors(&edges, "Node"), vec!["TreeNode"]);

    let iface = edges.find_interface("Node").unwrap().id;
    let ty = edges.find_type("TreeNode").unwrap().id;
    assert!(edges.edge(iface, ty).unwrap().needs_pointer);
}

#[test]
fn test_named_results() {
    let edges = edges_for(&[EDGE_CASES]);
    assert_eq!(implementors(&edges, "NamedReturns"), vec!["NamedReturnsImpl"]);
}

#[test]
fn test_per_method_views() {
    let edges = edges_for(&[EDGE_CASES]);
    let iface = edges.find_interface("ReadWriteCloser").unwrap().id;
    let close: Vec<String> = edges
        .method_implementations(iface, "Close")
        .into_iter()
        .map(|method| method.signature.to_string())
        .collect();
    assert_eq!(close, vec!["Close() error"]);

    let file = edges.find_type("File").unwrap();
    let read = file
        .methods
        .iter()
        .copied()
        .find(|&id| edges.method(id).signature.name == "Read")
        .unwrap();
    let attributed: Vec<(String, &str)> = edges
        .implemented_interface_methods(read)
        .into_iter()
        .map(|(iface, method)| (iface.name.clone(), method))
        .collect();
    assert_eq!(
        attributed,
        vec![
            ("io.Reader".to_string(), "Read"),
            ("ReadWriteCloser".to_string(), "Read"),
        ]
    );
}

#[test]
fn test_cross_file_program() {
    let edges = edges_for(&["cross_file_interface.json", "cross_file_impl.toml"]);
    assert_eq!(implementors(&edges, "CrossFileInterface"), vec!["CrossFileImpl"]);
    assert_eq!(
        implementors(&edges, "CrossFileComplexInterface"),
        vec!["CrossFileComplexImpl"]
    );
    assert!(implementors(&edges, "UnimplementedCrossFile").is_empty());
    assert!(implemented(&edges, "PartialCrossFileImpl").is_empty());
}
