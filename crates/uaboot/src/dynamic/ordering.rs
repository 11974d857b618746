// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dependency ordering of discovered types.
//!
//! Kahn's algorithm over an explicit graph (edge from dependency to
//! dependent). Ties are broken by discovery order, so the output is stable
//! for a given input. Dependencies outside the discovered set are assumed
//! registered already and ignored.

use super::descriptor::TypeDescriptor;
use crate::error::OrderError;
use crate::types::NodeId;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Orders descriptors so each follows all custom types it depends on.
pub struct DependencyOrderer;

impl DependencyOrderer {
    /// # Errors
    ///
    /// [`OrderError::CyclicTypeDependency`] naming one cycle if the
    /// descriptors depend on each other, or one depends on itself.
    pub fn order(descriptors: Vec<TypeDescriptor>) -> Result<Vec<TypeDescriptor>, OrderError> {
        let mut seen = HashSet::new();
        let nodes: Vec<TypeDescriptor> = descriptors
            .into_iter()
            .filter(|d| {
                let fresh = seen.insert(d.data_type_id.clone());
                if !fresh {
                    log::debug!("[TypeBootstrap] duplicate descriptor {} dropped", d.data_type_id);
                }
                fresh
            })
            .collect();

        let index: HashMap<&NodeId, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, d)| (&d.data_type_id, i))
            .collect();

        let mut in_degree = vec![0usize; nodes.len()];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        for (i, desc) in nodes.iter().enumerate() {
            for dep in &desc.dependencies {
                if let Some(&j) = index.get(dep) {
                    in_degree[i] += 1;
                    dependents[j].push(i);
                }
            }
        }

        let mut ready: BinaryHeap<Reverse<usize>> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, d)| **d == 0)
            .map(|(i, _)| Reverse(i))
            .collect();
        let mut order = Vec::with_capacity(nodes.len());
        while let Some(Reverse(i)) = ready.pop() {
            order.push(i);
            for &k in &dependents[i] {
                in_degree[k] -= 1;
                if in_degree[k] == 0 {
                    ready.push(Reverse(k));
                }
            }
        }

        if order.len() < nodes.len() {
            let cycle = find_cycle(&nodes, &index, &in_degree);
            return Err(OrderError::CyclicTypeDependency { cycle });
        }

        let mut slots: Vec<Option<TypeDescriptor>> = nodes.into_iter().map(Some).collect();
        Ok(order.into_iter().filter_map(|i| slots[i].take()).collect())
    }
}

/// Walk unresolved dependencies from the first stuck node until one repeats.
///
/// Every stuck node has at least one stuck dependency, so the walk always
/// closes a loop.
fn find_cycle(
    nodes: &[TypeDescriptor],
    index: &HashMap<&NodeId, usize>,
    in_degree: &[usize],
) -> Vec<NodeId> {
    let stuck = |i: usize| in_degree[i] > 0;
    let Some(start) = (0..nodes.len()).find(|&i| stuck(i)) else {
        return Vec::new();
    };

    let mut path: Vec<usize> = Vec::new();
    let mut on_path: HashMap<usize, usize> = HashMap::new();
    let mut current = start;
    loop {
        if let Some(&pos) = on_path.get(&current) {
            return path[pos..]
                .iter()
                .map(|&i| nodes[i].data_type_id.clone())
                .collect();
        }
        on_path.insert(current, path.len());
        path.push(current);

        let next = nodes[current]
            .dependencies
            .iter()
            .filter_map(|dep| index.get(dep).copied())
            .find(|&j| stuck(j));
        match next {
            Some(j) => current = j,
            None => {
                return path.iter().map(|&i| nodes[i].data_type_id.clone()).collect();
            }
        }
    }
}
