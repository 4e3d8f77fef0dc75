//! Interface flattening.
//!
//! Expands embedded interfaces into one required-method set per interface.
//! Identical methods reached through several embedding paths merge; two
//! different signatures for the same method name are a duplicate
//! declaration. An interface on an embedding cycle, or one that embeds such
//! an interface, has no flattened set.

use super::resolve::ResolvedInterface;
use crate::errors::Error;
use crate::model::MethodSignature;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone)]
enum State {
    Unvisited,
    InProgress,
    Done(Option<Vec<MethodSignature>>),
}

struct Flattener<'a> {
    names: &'a [String],
    interfaces: &'a [ResolvedInterface],
    state: Vec<State>,
    stack: Vec<usize>,
    reported_cycles: Vec<BTreeSet<usize>>,
    errors: Vec<Error>,
}

/// Flatten every interface. The result is indexed like `interfaces`; each
/// entry is sorted by method name.
pub(crate) fn flatten_all(
    names: &[String],
    interfaces: &[ResolvedInterface],
    errors: &mut Vec<Error>,
) -> Vec<Option<Vec<MethodSignature>>> {
    let mut flattener = Flattener {
        names,
        interfaces,
        state: vec![State::Unvisited; interfaces.len()],
        stack: Vec::new(),
        reported_cycles: Vec::new(),
        errors: Vec::new(),
    };

    let flattened = (0..interfaces.len())
        .map(|id| flattener.visit(id))
        .collect();
    errors.append(&mut flattener.errors);
    flattened
}

impl Flattener<'_> {
    fn visit(&mut self, id: usize) -> Option<Vec<MethodSignature>> {
        match &self.state[id] {
            State::Done(result) => return result.clone(),
            State::InProgress => {
                self.report_cycle(id);
                return None;
            }
            State::Unvisited => {}
        }

        self.state[id] = State::InProgress;
        self.stack.push(id);

        let names = self.names;
        let owner = &names[id];
        let mut merged: BTreeMap<String, MethodSignature> = BTreeMap::new();
        let mut complete = true;

        for method in &self.interfaces[id].methods {
            if merged.contains_key(&method.name) {
                self.errors
                    .push(Error::duplicate(format!("{owner}.{}", method.name)));
                complete = false;
            } else {
                merged.insert(method.name.clone(), method.clone());
            }
        }

        for embed in self.interfaces[id].embeds.clone() {
            let Some(inherited) = self.visit(embed.0) else {
                complete = false;
                continue;
            };
            for method in inherited {
                match merged.get(&method.name) {
                    Some(existing) if *existing == method => {}
                    Some(_) => {
                        self.errors
                            .push(Error::duplicate(format!("{owner}.{}", method.name)));
                        complete = false;
                    }
                    None => {
                        merged.insert(method.name.clone(), method);
                    }
                }
            }
        }

        self.stack.pop();
        let result = complete.then(|| merged.into_values().collect::<Vec<_>>());
        self.state[id] = State::Done(result.clone());
        result
    }

    fn report_cycle(&mut self, id: usize) {
        let Some(start) = self.stack.iter().position(|&entry| entry == id) else {
            return;
        };
        let members: BTreeSet<usize> = self.stack[start..].iter().copied().collect();
        if self.reported_cycles.contains(&members) {
            return;
        }

        let mut cycle: Vec<String> = self.stack[start..]
            .iter()
            .map(|&entry| self.names[entry].clone())
            .collect();
        cycle.push(self.names[id].clone());
        self.errors.push(Error::CyclicComposition {
            interface: self.names[id].clone(),
            cycle,
        });
        self.reported_cycles.push(members);
    }
}
