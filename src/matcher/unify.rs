//! Exact signature comparison.
//!
//! Descriptors on the required side may contain type parameters. Inline
//! interface descriptors are compared by method set, so embedding order and
//! embedding versus spelling the methods out make no difference.

use super::edges::{MethodId, MethodLink};
use super::ReceiverPolicy;
use crate::model::{MethodSignature, ReceiverForm, TypeRef};
use std::collections::{BTreeMap, HashMap};

/// Recursion limit for one comparison. Inline interfaces can reach each
/// other through the named interfaces they embed.
const MAX_UNIFY_DEPTH: usize = 512;

/// Flattened method sets of declared, non-generic interfaces, used to
/// expand names embedded in inline `interface{...}` descriptors.
#[derive(Debug, Default)]
pub(crate) struct InterfaceShapes<'a> {
    named: HashMap<&'a str, &'a [MethodSignature]>,
}

impl<'a> InterfaceShapes<'a> {
    pub fn insert(&mut self, name: &'a str, methods: &'a [MethodSignature]) {
        self.named.insert(name, methods);
    }

    /// Method set of an inline interface, sorted by name, plus the embedded
    /// descriptors that could not be expanded, in canonical order.
    fn method_set(&self, ty: &TypeRef) -> (Vec<MethodSignature>, Vec<TypeRef>) {
        let mut methods = BTreeMap::new();
        let mut opaque = Vec::new();
        self.collect(ty, &mut methods, &mut opaque);
        opaque.sort_by_cached_key(ToString::to_string);
        opaque.dedup();
        (methods.into_values().collect(), opaque)
    }

    fn collect(
        &self,
        ty: &TypeRef,
        methods: &mut BTreeMap<String, MethodSignature>,
        opaque: &mut Vec<TypeRef>,
    ) {
        let TypeRef::Interface {
            methods: own,
            embeds,
        } = ty
        else {
            return;
        };
        for method in own {
            methods
                .entry(method.name.clone())
                .or_insert_with(|| method.clone());
        }
        for embed in embeds {
            match embed {
                TypeRef::Interface { .. } => self.collect(embed, methods, opaque),
                TypeRef::Named { name, args } if args.is_empty() => {
                    match self.named.get(name.as_str()) {
                        Some(expanded) => {
                            for method in expanded.iter() {
                                methods
                                    .entry(method.name.clone())
                                    .or_insert_with(|| method.clone());
                            }
                        }
                        None => opaque.push(embed.clone()),
                    }
                }
                _ => opaque.push(embed.clone()),
            }
        }
    }
}

/// One comparison between a required method set and a concrete one.
/// Each type parameter binds to the concrete descriptor found at its
/// first occurrence and must match that binding everywhere else.
pub(crate) struct Unifier<'s> {
    shapes: &'s InterfaceShapes<'s>,
    bound: HashMap<(String, String), TypeRef>,
    depth: usize,
}

impl<'s> Unifier<'s> {
    pub fn new(shapes: &'s InterfaceShapes<'s>) -> Self {
        Self {
            shapes,
            bound: HashMap::new(),
            depth: 0,
        }
    }

    fn bind(&mut self, owner: &str, name: &str, actual: &TypeRef) -> bool {
        let key = (owner.to_string(), name.to_string());
        match self.bound.get(&key) {
            Some(existing) => existing == actual,
            None => {
                self.bound.insert(key, actual.clone());
                true
            }
        }
    }

    pub fn unify_types(&mut self, required: &TypeRef, actual: &TypeRef) -> bool {
        if self.depth >= MAX_UNIFY_DEPTH {
            return false;
        }
        self.depth += 1;
        let unified = self.unify_shapes(required, actual);
        self.depth -= 1;
        unified
    }

    fn unify_shapes(&mut self, required: &TypeRef, actual: &TypeRef) -> bool {
        if required == actual && !required.has_params() {
            return true;
        }
        match (required, actual) {
            (TypeRef::Param { name, owner }, _) => self.bind(owner, name, actual),
            (
                TypeRef::Named { name: a, args: a_args },
                TypeRef::Named { name: b, args: b_args },
            ) => a == b && self.unify_lists(a_args, b_args),
            (TypeRef::Pointer(a), TypeRef::Pointer(b)) | (TypeRef::Slice(a), TypeRef::Slice(b)) => {
                self.unify_types(a, b)
            }
            (
                TypeRef::Array { len: a_len, elem: a },
                TypeRef::Array { len: b_len, elem: b },
            ) => a_len == b_len && self.unify_types(a, b),
            (
                TypeRef::Map { key: a_key, value: a_value },
                TypeRef::Map { key: b_key, value: b_value },
            ) => self.unify_types(a_key, b_key) && self.unify_types(a_value, b_value),
            (TypeRef::Chan { dir: a_dir, elem: a }, TypeRef::Chan { dir: b_dir, elem: b }) => {
                a_dir == b_dir && self.unify_types(a, b)
            }
            (TypeRef::Func(a), TypeRef::Func(b)) => {
                a.variadic == b.variadic
                    && self.unify_lists(&a.params, &b.params)
                    && self.unify_lists(&a.results, &b.results)
            }
            (TypeRef::Interface { .. }, TypeRef::Interface { .. }) => {
                let (a, a_opaque) = self.shapes.method_set(required);
                let (b, b_opaque) = self.shapes.method_set(actual);
                a.len() == b.len()
                    && a.iter().zip(&b).all(|(x, y)| self.unify_signatures(x, y))
                    && self.unify_lists(&a_opaque, &b_opaque)
            }
            (TypeRef::Struct(a), TypeRef::Struct(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|(x, y)| x.name == y.name && self.unify_types(&x.ty, &y.ty))
            }
            _ => false,
        }
    }

    fn unify_lists(&mut self, required: &[TypeRef], actual: &[TypeRef]) -> bool {
        required.len() == actual.len()
            && required
                .iter()
                .zip(actual)
                .all(|(a, b)| self.unify_types(a, b))
    }

    /// Name, variadic flag, parameters and results must all agree.
    pub fn unify_signatures(&mut self, required: &MethodSignature, actual: &MethodSignature) -> bool {
        required.name == actual.name
            && required.variadic == actual.variadic
            && self.unify_lists(&required.params, &actual.params)
            && self.unify_lists(&required.results, &actual.results)
    }
}

/// A method available on a concrete type.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate<'a> {
    pub id: MethodId,
    pub signature: &'a MethodSignature,
    pub form: ReceiverForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Satisfaction {
    pub needs_pointer: bool,
    pub links: Vec<MethodLink>,
}

/// Check that every required signature has an exact counterpart in
/// `method_set`. Method names are unique within a method set.
pub(crate) fn satisfies(
    required: &[MethodSignature],
    method_set: &[Candidate<'_>],
    policy: ReceiverPolicy,
    shapes: &InterfaceShapes<'_>,
) -> Option<Satisfaction> {
    let mut unifier = Unifier::new(shapes);
    let mut links = Vec::with_capacity(required.len());
    let mut needs_pointer = false;

    for signature in required {
        let candidate = method_set
            .iter()
            .find(|candidate| candidate.signature.name == signature.name)?;
        if policy == ReceiverPolicy::ValueOnly && candidate.form == ReceiverForm::Pointer {
            return None;
        }
        if !unifier.unify_signatures(signature, candidate.signature) {
            return None;
        }
        needs_pointer |= candidate.form == ReceiverForm::Pointer;
        links.push(MethodLink {
            interface_method: signature.name.clone(),
            method: candidate.id,
        });
    }

    Some(Satisfaction {
        needs_pointer,
        links,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(text: &str) -> MethodSignature {
        MethodSignature::parse(text).unwrap()
    }

    fn param(name: &str) -> TypeRef {
        TypeRef::Param {
            name: name.into(),
            owner: "Comparable".into(),
        }
    }

    fn unifies(required: &MethodSignature, actual: &MethodSignature) -> bool {
        let shapes = InterfaceShapes::default();
        Unifier::new(&shapes).unify_signatures(required, actual)
    }

    #[test]
    fn test_exact_signatures_unify() {
        assert!(unifies(
            &sig("GetMap() map[string]interface{}"),
            &sig("GetMap() map[string]interface{}"),
        ));
        assert!(!unifies(
            &sig("GetMap() map[string]interface{}"),
            &sig("GetMap() map[string]string"),
        ));
    }

    #[test]
    fn test_parameter_binding_must_be_consistent() {
        let required = MethodSignature::new(
            "Swap",
            vec![param("T"), param("T")],
            vec![],
            false,
        );
        assert!(unifies(&required, &sig("Swap(a, b string)")));
        assert!(!unifies(&required, &sig("Swap(a string, b int)")));
    }

    #[test]
    fn test_channel_direction_matters() {
        assert!(!unifies(
            &sig("GetChannel() <-chan string"),
            &sig("GetChannel() chan string"),
        ));
    }

    #[test]
    fn test_inline_interfaces_compare_by_method_set() {
        let read = [sig("Read() int")];
        let write = [sig("Write() int")];
        let mut shapes = InterfaceShapes::default();
        shapes.insert("R", &read);
        shapes.insert("W", &write);

        let required = sig("Use(x interface{R; W})");
        for actual in [
            "Use(x interface{W; R})",
            "Use(x interface{Write() int; Read() int})",
            "Use(x interface{R; Write() int})",
        ] {
            assert!(
                Unifier::new(&shapes).unify_signatures(&required, &sig(actual)),
                "{actual}"
            );
        }
        assert!(!Unifier::new(&shapes).unify_signatures(&required, &sig("Use(x interface{R})")));
    }

    #[test]
    fn test_unknown_embeds_compare_in_any_order() {
        let shapes = InterfaceShapes::default();
        assert!(Unifier::new(&shapes).unify_signatures(
            &sig("Wrap(x interface{io.Reader; io.Closer})"),
            &sig("Wrap(x interface{io.Closer; io.Reader})"),
        ));
    }

    #[test]
    fn test_value_only_policy_rejects_pointer_methods() {
        let method = sig("SetParent(p Node)");
        let set = [Candidate {
            id: MethodId(0),
            signature: &method,
            form: ReceiverForm::Pointer,
        }];
        let required = [sig("SetParent(Node)")];
        let shapes = InterfaceShapes::default();

        let union = satisfies(&required, &set, ReceiverPolicy::Union, &shapes).unwrap();
        assert!(union.needs_pointer);
        assert!(satisfies(&required, &set, ReceiverPolicy::ValueOnly, &shapes).is_none());
    }

    #[test]
    fn test_empty_requirement_always_satisfied() {
        let shapes = InterfaceShapes::default();
        let satisfaction = satisfies(&[], &[], ReceiverPolicy::Union, &shapes).unwrap();
        assert!(satisfaction.links.is_empty());
        assert!(!satisfaction.needs_pointer);
    }
}
