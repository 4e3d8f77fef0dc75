//! The computed edge set and the views derived from it.
//!
//! Counts and per-symbol lists are always computed from the edges
//! themselves; nothing is cached separately.

use crate::model::{Location, MethodSignature, ReceiverForm};
use serde::Serialize;
use std::collections::BTreeMap;

/// Index of an interface in [`crate::model::Program::interfaces`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct InterfaceId(pub usize);

/// Index of a concrete type in [`crate::model::Program::types`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TypeId(pub usize);

/// Index of a method in [`crate::model::Program::methods`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MethodId(pub usize);

/// Which concrete method satisfies which required method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodLink {
    pub interface_method: String,
    pub method: MethodId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImplementationEdge {
    pub interface: InterfaceId,
    pub concrete: TypeId,
    /// The edge depends on at least one pointer-receiver method.
    pub needs_pointer: bool,
    pub methods: Vec<MethodLink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterfaceNode {
    pub id: InterfaceId,
    pub name: String,
    pub anonymous: bool,
    pub location: Option<Location>,
    /// Flattened required set, sorted by method name.
    pub required: Vec<MethodSignature>,
    /// Declared positions of required methods, inherited ones included.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub method_locations: BTreeMap<String, Location>,
}

impl InterfaceNode {
    /// Position of a required method, or of the interface when the method
    /// has none of its own.
    pub fn method_location(&self, method: &str) -> Option<&Location> {
        self.method_locations
            .get(method)
            .or(self.location.as_ref())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeNode {
    pub id: TypeId,
    pub name: String,
    pub location: Option<Location>,
    pub methods: Vec<MethodId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodNode {
    pub id: MethodId,
    pub receiver: TypeId,
    pub form: ReceiverForm,
    pub signature: MethodSignature,
    pub location: Option<Location>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EdgeStatistics {
    pub interfaces: usize,
    pub types: usize,
    pub edges: usize,
    pub pointer_edges: usize,
    pub unimplemented_interfaces: Vec<String>,
    pub types_without_interfaces: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgeSet {
    interfaces: Vec<InterfaceNode>,
    types: Vec<TypeNode>,
    methods: Vec<MethodNode>,
    edges: Vec<ImplementationEdge>,
    #[serde(skip)]
    by_interface: Vec<Vec<usize>>,
    #[serde(skip)]
    by_type: Vec<Vec<usize>>,
}

impl EdgeSet {
    pub(crate) fn new(
        interfaces: Vec<InterfaceNode>,
        types: Vec<TypeNode>,
        methods: Vec<MethodNode>,
        mut edges: Vec<ImplementationEdge>,
    ) -> Self {
        edges.sort_by_key(|edge| (edge.interface, edge.concrete));

        let mut by_interface = vec![Vec::new(); interfaces.len()];
        let mut by_type = vec![Vec::new(); types.len()];
        for (i, edge) in edges.iter().enumerate() {
            by_interface[edge.interface.0].push(i);
            by_type[edge.concrete.0].push(i);
        }

        Self {
            interfaces,
            types,
            methods,
            edges,
            by_interface,
            by_type,
        }
    }

    pub fn interfaces(&self) -> &[InterfaceNode] {
        &self.interfaces
    }

    pub fn types(&self) -> &[TypeNode] {
        &self.types
    }

    pub fn edges(&self) -> &[ImplementationEdge] {
        &self.edges
    }

    pub fn interface(&self, id: InterfaceId) -> &InterfaceNode {
        &self.interfaces[id.0]
    }

    pub fn concrete(&self, id: TypeId) -> &TypeNode {
        &self.types[id.0]
    }

    pub fn method(&self, id: MethodId) -> &MethodNode {
        &self.methods[id.0]
    }

    pub fn find_interface(&self, name: &str) -> Option<&InterfaceNode> {
        self.interfaces.iter().find(|node| node.name == name)
    }

    pub fn find_type(&self, name: &str) -> Option<&TypeNode> {
        self.types.iter().find(|node| node.name == name)
    }

    /// Edges of one interface, ordered by type.
    pub fn edges_of_interface(&self, id: InterfaceId) -> impl Iterator<Item = &ImplementationEdge> {
        self.by_interface[id.0].iter().map(move |&i| &self.edges[i])
    }

    /// Edges of one type, ordered by interface.
    pub fn edges_of_type(&self, id: TypeId) -> impl Iterator<Item = &ImplementationEdge> {
        self.by_type[id.0].iter().map(move |&i| &self.edges[i])
    }

    pub fn edge(&self, interface: InterfaceId, concrete: TypeId) -> Option<&ImplementationEdge> {
        self.edges_of_interface(interface)
            .find(|edge| edge.concrete == concrete)
    }

    /// Whether the named type satisfies the named interface.
    pub fn implements(&self, type_name: &str, interface_name: &str) -> bool {
        match (self.find_type(type_name), self.find_interface(interface_name)) {
            (Some(ty), Some(iface)) => self.edge(iface.id, ty.id).is_some(),
            _ => false,
        }
    }

    pub fn implementors(&self, id: InterfaceId) -> impl Iterator<Item = &TypeNode> {
        self.edges_of_interface(id)
            .map(move |edge| &self.types[edge.concrete.0])
    }

    pub fn implementation_count(&self, id: InterfaceId) -> usize {
        self.by_interface[id.0].len()
    }

    pub fn implemented_interfaces(&self, id: TypeId) -> impl Iterator<Item = &InterfaceNode> {
        self.edges_of_type(id)
            .map(move |edge| &self.interfaces[edge.interface.0])
    }

    /// Concrete methods implementing one required method of an interface.
    pub fn method_implementations(&self, id: InterfaceId, method_name: &str) -> Vec<&MethodNode> {
        self.edges_of_interface(id)
            .flat_map(|edge| &edge.methods)
            .filter(|link| link.interface_method == method_name)
            .map(|link| &self.methods[link.method.0])
            .collect()
    }

    /// Interface methods a concrete method implements, as
    /// (interface, method name) pairs ordered by interface.
    pub fn implemented_interface_methods(&self, id: MethodId) -> Vec<(&InterfaceNode, &str)> {
        let receiver = self.methods[id.0].receiver;
        self.edges_of_type(receiver)
            .flat_map(|edge| {
                edge.methods
                    .iter()
                    .filter(move |link| link.method == id)
                    .map(move |link| (&self.interfaces[edge.interface.0], link.interface_method.as_str()))
            })
            .collect()
    }

    pub fn statistics(&self) -> EdgeStatistics {
        EdgeStatistics {
            interfaces: self.interfaces.len(),
            types: self.types.len(),
            edges: self.edges.len(),
            pointer_edges: self.edges.iter().filter(|edge| edge.needs_pointer).count(),
            unimplemented_interfaces: self
                .interfaces
                .iter()
                .filter(|node| self.implementation_count(node.id) == 0)
                .map(|node| node.name.clone())
                .collect(),
            types_without_interfaces: self
                .types
                .iter()
                .filter(|node| {
                    !self
                        .implemented_interfaces(node.id)
                        .any(|iface| !iface.anonymous)
                })
                .map(|node| node.name.clone())
                .collect(),
        }
    }
}
