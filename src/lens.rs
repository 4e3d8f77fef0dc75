//! Code lens labels derived from an [`EdgeSet`].
//!
//! Four kinds of symbol get a label:
//!
//! - interfaces: `No implementations`, `1 implementation`, `N implementations`
//! - interface methods: the same counts, per required method
//! - concrete types: `Implements: Reader, Writer` (omitted when empty)
//! - concrete methods: `Implements: Reader.Read` (omitted when empty)
//!
//! Each lens also lists the symbols it points at, so a presentation layer
//! can offer navigation.

use crate::config::LensConfig;
use crate::matcher::EdgeSet;
use crate::model::Location;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LensTarget {
    Interface { name: String },
    InterfaceMethod { interface: String, method: String },
    Type { name: String },
    TypeMethod { receiver: String, method: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lens {
    pub target: LensTarget,
    pub location: Option<Location>,
    pub label: String,
    /// Qualified names of the symbols the label counts or lists.
    pub targets: Vec<String>,
}

pub fn implementation_label(count: usize) -> String {
    match count {
        0 => "No implementations".to_string(),
        1 => "1 implementation".to_string(),
        n => format!("{n} implementations"),
    }
}

pub fn implements_label<S: AsRef<str>>(names: &[S]) -> Option<String> {
    if names.is_empty() {
        return None;
    }
    let names: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    Some(format!("Implements: {}", names.join(", ")))
}

/// Every lens enabled by `config`, grouped by kind in declaration order.
pub fn collect_lenses(edges: &EdgeSet, config: &LensConfig) -> Vec<Lens> {
    if !config.enable {
        return Vec::new();
    }

    let mut lenses = Vec::new();

    for iface in edges.interfaces() {
        if config.show_on_interfaces {
            let targets: Vec<String> = edges
                .implementors(iface.id)
                .map(|node| node.name.clone())
                .collect();
            lenses.push(Lens {
                target: LensTarget::Interface {
                    name: iface.name.clone(),
                },
                location: iface.location.clone(),
                label: implementation_label(targets.len()),
                targets,
            });
        }

        if config.show_on_methods {
            for required in &iface.required {
                let targets: Vec<String> = edges
                    .method_implementations(iface.id, &required.name)
                    .into_iter()
                    .map(|method| {
                        format!("{}.{}", edges.concrete(method.receiver).name, method.signature.name)
                    })
                    .collect();
                lenses.push(Lens {
                    target: LensTarget::InterfaceMethod {
                        interface: iface.name.clone(),
                        method: required.name.clone(),
                    },
                    location: iface.method_location(&required.name).cloned(),
                    label: implementation_label(targets.len()),
                    targets,
                });
            }
        }
    }

    for ty in edges.types() {
        if config.show_on_types {
            let targets: Vec<String> = edges
                .implemented_interfaces(ty.id)
                .map(|iface| iface.name.clone())
                .collect();
            if let Some(label) = implements_label(&targets) {
                lenses.push(Lens {
                    target: LensTarget::Type {
                        name: ty.name.clone(),
                    },
                    location: ty.location.clone(),
                    label,
                    targets,
                });
            }
        }

        if config.per_method_attribution {
            for &id in &ty.methods {
                let targets: Vec<String> = edges
                    .implemented_interface_methods(id)
                    .into_iter()
                    .map(|(iface, method)| format!("{}.{method}", iface.name))
                    .collect();
                if let Some(label) = implements_label(&targets) {
                    let method = edges.method(id);
                    lenses.push(Lens {
                        target: LensTarget::TypeMethod {
                            receiver: ty.name.clone(),
                            method: method.signature.name.clone(),
                        },
                        location: method.location.clone(),
                        label,
                        targets,
                    });
                }
            }
        }
    }

    lenses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::SignatureMatcher;
    use crate::model::{InterfaceDecl, MethodDecl, MethodSignature, Program, ReceiverForm, TypeDecl};
    use pretty_assertions::assert_eq;

    fn sig(text: &str) -> MethodSignature {
        MethodSignature::parse(text).unwrap()
    }

    fn program() -> Program {
        Program::builder()
            .interface(InterfaceDecl::named("Reader").method(sig("Read() string")))
            .interface(InterfaceDecl::named("Writer").method(sig("Write(string)")))
            .interface(InterfaceDecl::named("Closer").method(sig("Close() error")))
            .concrete(TypeDecl::named("MultiImpl"))
            .method(MethodDecl::new("MultiImpl", ReceiverForm::Value, sig("Read() string")))
            .method(MethodDecl::new("MultiImpl", ReceiverForm::Value, sig("Write(data string)")))
            .concrete(TypeDecl::named("Idle"))
            .build()
    }

    fn labels(lenses: &[Lens]) -> Vec<(&LensTarget, &str)> {
        lenses
            .iter()
            .map(|lens| (&lens.target, lens.label.as_str()))
            .collect()
    }

    #[test]
    fn test_label_wording() {
        assert_eq!(implementation_label(0), "No implementations");
        assert_eq!(implementation_label(1), "1 implementation");
        assert_eq!(implementation_label(2), "2 implementations");
        assert_eq!(implements_label::<&str>(&[]), None);
        assert_eq!(
            implements_label(&["Reader", "Writer"]).as_deref(),
            Some("Implements: Reader, Writer")
        );
    }

    #[test]
    fn test_type_and_method_labels() {
        let program = program();
        let edges = SignatureMatcher::new(&program).compute_edges().unwrap();
        let config = LensConfig {
            show_on_interfaces: false,
            show_on_methods: false,
            ..LensConfig::default()
        };
        let lenses = collect_lenses(&edges, &config);

        let multi = LensTarget::Type {
            name: "MultiImpl".into(),
        };
        let read = LensTarget::TypeMethod {
            receiver: "MultiImpl".into(),
            method: "Read".into(),
        };
        let write = LensTarget::TypeMethod {
            receiver: "MultiImpl".into(),
            method: "Write".into(),
        };
        assert_eq!(
            labels(&lenses),
            vec![
                (&multi, "Implements: Reader, Writer"),
                (&read, "Implements: Reader.Read"),
                (&write, "Implements: Writer.Write"),
            ]
        );
    }

    #[test]
    fn test_interface_and_interface_method_counts() {
        let program = program();
        let edges = SignatureMatcher::new(&program).compute_edges().unwrap();
        let config = LensConfig {
            show_on_types: false,
            per_method_attribution: false,
            ..LensConfig::default()
        };
        let lenses = collect_lenses(&edges, &config);

        let closer: Vec<&str> = lenses
            .iter()
            .filter(|lens| match &lens.target {
                LensTarget::Interface { name } => name == "Closer",
                LensTarget::InterfaceMethod { interface, .. } => interface == "Closer",
                _ => false,
            })
            .map(|lens| lens.label.as_str())
            .collect();
        assert_eq!(closer, vec!["No implementations", "No implementations"]);

        let reader = &lenses[0];
        assert_eq!(reader.label, "1 implementation");
        assert_eq!(reader.targets, vec!["MultiImpl".to_string()]);
        assert_eq!(lenses[1].targets, vec!["MultiImpl.Read".to_string()]);
    }

    #[test]
    fn test_disabled_lens_produces_nothing() {
        let program = program();
        let edges = SignatureMatcher::new(&program).compute_edges().unwrap();
        let config = LensConfig {
            enable: false,
            ..LensConfig::default()
        };
        assert!(collect_lenses(&edges, &config).is_empty());
    }
}
