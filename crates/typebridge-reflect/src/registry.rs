//! Registry of reflected nodes

use crate::error::{ReflectError, ReflectResult};
use indexmap::IndexMap;
use std::collections::HashMap;
use typebridge_core::syntax::{self, qualified_refs};
use typebridge_core::{TypeKey, TypeNode};

/// Reflected nodes keyed by source identity, in first-reached order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    nodes: IndexMap<TypeKey, TypeNode>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, key: &TypeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn get(&self, key: &TypeKey) -> Option<&TypeNode> {
        self.nodes.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &TypeKey) -> Option<&mut TypeNode> {
        self.nodes.get_mut(key)
    }

    pub(crate) fn insert(&mut self, node: TypeNode) {
        self.nodes.insert(node.source_key.clone(), node);
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeNode> {
        self.nodes.values()
    }

    /// Nodes ordered by target name.
    pub fn sorted_by_name(&self) -> Vec<&TypeNode> {
        let mut nodes: Vec<&TypeNode> = self.iter().collect();
        nodes.sort_by(|a, b| a.target_name.cmp(&b.target_name));
        nodes
    }

    /// Fail when two source types share a target name.
    pub fn check_unique_names(&self) -> ReflectResult<()> {
        let mut seen: HashMap<&str, &TypeKey> = HashMap::new();
        for node in self.iter() {
            if let Some(first) = seen.insert(&node.target_name, &node.source_key) {
                return Err(ReflectError::NameCollision {
                    name: node.target_name.clone(),
                    first: first.clone(),
                    second: node.source_key.clone(),
                });
            }
        }
        Ok(())
    }

    /// Route every reference between members of one strongly connected
    /// component, a type's reference to itself included, through
    /// `Schema.suspend`. Modules of a cycle import each other, and only lazy
    /// references let them evaluate in any order. Spreads stay eager.
    ///
    /// Returns the number of nodes on a cycle. Expects unique target names.
    pub(crate) fn suspend_cycles(&mut self) -> usize {
        let by_name: HashMap<String, usize> = self
            .iter()
            .enumerate()
            .map(|(index, node)| (node.target_name.clone(), index))
            .collect();
        let edges: Vec<Vec<usize>> = self
            .iter()
            .map(|node| references(node, &by_name))
            .collect();
        let component = strongly_connected(&edges);

        let mut cyclic = 0;
        for (index, node) in self.nodes.values_mut().enumerate() {
            let own = component[index];
            if !edges[index].iter().any(|&to| component[to] == own) {
                continue;
            }

            cyclic += 1;
            let same_cycle =
                |name: &str| by_name.get(name).is_some_and(|&to| component[to] == own);
            node.rewrite_types(|text| syntax::suspend_refs(text, same_cycle));
        }
        cyclic
    }
}

/// Indices of the nodes `node` refers to.
fn references(node: &TypeNode, by_name: &HashMap<String, usize>) -> Vec<usize> {
    let mut targets = Vec::new();
    for property in node.properties() {
        if property.anonymous {
            targets.extend(by_name.get(&property.name).copied());
        } else {
            targets.extend(
                qualified_refs(&property.ty.representation)
                    .into_iter()
                    .filter_map(|(_, name)| by_name.get(name).copied()),
            );
        }
    }
    targets
}

/// Component id of every vertex, by Tarjan's algorithm with an explicit
/// stack.
fn strongly_connected(edges: &[Vec<usize>]) -> Vec<usize> {
    const UNVISITED: usize = usize::MAX;

    let count = edges.len();
    let mut order = vec![UNVISITED; count];
    let mut low = vec![0; count];
    let mut on_stack = vec![false; count];
    let mut stack = Vec::new();
    let mut component = vec![UNVISITED; count];
    let mut next_order = 0;
    let mut next_component = 0;

    for root in 0..count {
        if order[root] != UNVISITED {
            continue;
        }

        order[root] = next_order;
        low[root] = next_order;
        next_order += 1;
        stack.push(root);
        on_stack[root] = true;
        let mut work: Vec<(usize, usize)> = vec![(root, 0)];

        while let Some(frame) = work.last_mut() {
            let (vertex, edge) = *frame;

            if let Some(&next) = edges[vertex].get(edge) {
                frame.1 += 1;
                if order[next] == UNVISITED {
                    order[next] = next_order;
                    low[next] = next_order;
                    next_order += 1;
                    stack.push(next);
                    on_stack[next] = true;
                    work.push((next, 0));
                } else if on_stack[next] {
                    low[vertex] = low[vertex].min(order[next]);
                }
                continue;
            }

            work.pop();
            if let Some(&(parent, _)) = work.last() {
                low[parent] = low[parent].min(low[vertex]);
            }
            if low[vertex] == order[vertex] {
                while let Some(member) = stack.pop() {
                    on_stack[member] = false;
                    component[member] = next_component;
                    if member == vertex {
                        break;
                    }
                }
                next_component += 1;
            }
        }
    }

    component
}
