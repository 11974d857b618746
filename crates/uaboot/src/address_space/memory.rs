// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-memory address space.
//!
//! A plain node table behind a `parking_lot::RwLock`. It enforces the
//! insertion rules the bulk loader depends on (parent, type definition,
//! reference endpoints must already exist) and serves browse/read requests
//! for type discovery.

use super::{
    AddNodesItem, AddReferencesItem, InsertFailure, NodeClass, NodeSink, ReferenceDescription,
    TypeDefinitionSource,
};
use crate::error::ReadError;
use crate::types::{ids, DataTypeDefinition, NodeId};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};

/// A reference as stored on one of its endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoredReference {
    pub reference_type_id: NodeId,
    pub target: NodeId,
    pub is_forward: bool,
}

/// One node of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub node_id: NodeId,
    pub browse_name: String,
    pub node_class: NodeClass,
    pub definition: Option<DataTypeDefinition>,
    pub references: Vec<StoredReference>,
}

#[derive(Default)]
struct Inner {
    nodes: HashMap<NodeId, NodeRecord>,
    failing_reads: HashSet<NodeId>,
    failing_browses: HashSet<NodeId>,
}

/// Address space held in process memory.
#[derive(Default)]
pub struct MemoryAddressSpace {
    inner: RwLock<Inner>,
}

impl MemoryAddressSpace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().nodes.is_empty()
    }

    pub fn contains(&self, node: &NodeId) -> bool {
        self.inner.read().nodes.contains_key(node)
    }

    /// Snapshot of one node.
    pub fn node(&self, node: &NodeId) -> Option<NodeRecord> {
        self.inner.read().nodes.get(node).cloned()
    }

    /// True if `source` holds a forward reference of `reference_type` to `target`.
    pub fn has_reference(
        &self,
        source: &NodeId,
        reference_type: &NodeId,
        target: &NodeId,
    ) -> bool {
        self.inner.read().nodes.get(source).is_some_and(|rec| {
            rec.references.iter().any(|r| {
                r.is_forward && &r.reference_type_id == reference_type && &r.target == target
            })
        })
    }

    /// Make every later definition read of `node` fail as a remote error.
    pub fn fail_reads_for(&self, node: NodeId) {
        self.inner.write().failing_reads.insert(node);
    }

    /// Make every later browse of `node` fail as a remote error.
    pub fn fail_browse_for(&self, node: NodeId) {
        self.inner.write().failing_browses.insert(node);
    }

    /// Forward references of `reference_type` from `node`, as browse results.
    pub fn browse(
        &self,
        node: &NodeId,
        reference_type: &NodeId,
    ) -> Result<Vec<ReferenceDescription>, ReadError> {
        let inner = self.inner.read();
        if inner.failing_browses.contains(node) {
            return Err(ReadError::Remote {
                node: node.clone(),
                reason: "browse failed".into(),
            });
        }
        let rec = inner
            .nodes
            .get(node)
            .ok_or_else(|| ReadError::NodeNotFound(node.clone()))?;

        Ok(rec
            .references
            .iter()
            .filter(|r| r.is_forward && &r.reference_type_id == reference_type)
            .filter_map(|r| inner.nodes.get(&r.target))
            .map(|child| ReferenceDescription {
                node_id: child.node_id.clone(),
                browse_name: child.browse_name.clone(),
                node_class: child.node_class,
            })
            .collect())
    }

    /// The stored definition of `node`.
    pub fn read_definition(&self, node: &NodeId) -> Result<DataTypeDefinition, ReadError> {
        let inner = self.inner.read();
        if inner.failing_reads.contains(node) {
            return Err(ReadError::Remote {
                node: node.clone(),
                reason: "read failed".into(),
            });
        }
        inner
            .nodes
            .get(node)
            .ok_or_else(|| ReadError::NodeNotFound(node.clone()))?
            .definition
            .clone()
            .ok_or_else(|| ReadError::AttributeNotApplicable(node.clone()))
    }

    /// Insert one node.
    pub fn insert_node(&self, item: &AddNodesItem) -> Result<(), InsertFailure> {
        let mut inner = self.inner.write();
        let id = &item.requested_new_node_id;

        if inner.nodes.contains_key(id) {
            return Err(InsertFailure::NodeIdExists);
        }
        let has_parent = !item.parent_node_id.is_null();
        if has_parent && !inner.nodes.contains_key(&item.parent_node_id) {
            return Err(InsertFailure::ParentMissing(item.parent_node_id.clone()));
        }
        let has_type = !item.type_definition.is_null();
        if has_type && !inner.nodes.contains_key(&item.type_definition) {
            return Err(InsertFailure::TypeDefinitionMissing(
                item.type_definition.clone(),
            ));
        }

        inner.nodes.insert(
            id.clone(),
            NodeRecord {
                node_id: id.clone(),
                browse_name: item.browse_name.clone(),
                node_class: item.node_class,
                definition: item.data_type_definition.clone(),
                references: Vec::new(),
            },
        );
        if has_parent {
            let reference_type = if item.reference_type_id.is_null() {
                ids::HAS_COMPONENT
            } else {
                item.reference_type_id.clone()
            };
            link(&mut inner.nodes, &item.parent_node_id, &reference_type, id);
        }
        if has_type {
            link(&mut inner.nodes, id, &ids::HAS_TYPE_DEFINITION, &item.type_definition);
        }
        Ok(())
    }

    /// Insert one reference and its inverse.
    pub fn insert_reference(&self, item: &AddReferencesItem) -> Result<(), InsertFailure> {
        let mut inner = self.inner.write();
        if !inner.nodes.contains_key(&item.source_node_id) {
            return Err(InsertFailure::SourceMissing(item.source_node_id.clone()));
        }
        if !inner.nodes.contains_key(&item.target_node_id) {
            return Err(InsertFailure::TargetMissing(item.target_node_id.clone()));
        }
        let (from, to) = if item.is_forward {
            (&item.source_node_id, &item.target_node_id)
        } else {
            (&item.target_node_id, &item.source_node_id)
        };
        link(&mut inner.nodes, from, &item.reference_type_id, to);
        Ok(())
    }
}

/// Record `from -[ty]-> to` on both endpoints. Duplicates are ignored.
fn link(nodes: &mut HashMap<NodeId, NodeRecord>, from: &NodeId, ty: &NodeId, to: &NodeId) {
    let entries = [(from, to.clone(), true), (to, from.clone(), false)];
    for (owner, target, is_forward) in entries {
        if let Some(rec) = nodes.get_mut(owner) {
            let stored = StoredReference {
                reference_type_id: ty.clone(),
                target,
                is_forward,
            };
            if !rec.references.contains(&stored) {
                rec.references.push(stored);
            }
        }
    }
}

impl TypeDefinitionSource for MemoryAddressSpace {
    async fn get_child_descriptions(
        &self,
        node: &NodeId,
        reference_type: &NodeId,
    ) -> Result<Vec<ReferenceDescription>, ReadError> {
        self.browse(node, reference_type)
    }

    async fn read_type_definition(&self, node: &NodeId) -> Result<DataTypeDefinition, ReadError> {
        self.read_definition(node)
    }
}

impl NodeSink for MemoryAddressSpace {
    async fn try_add_nodes(&self, items: Vec<AddNodesItem>) -> Vec<(AddNodesItem, InsertFailure)> {
        let mut failed = Vec::new();
        for item in items {
            if let Err(reason) = self.insert_node(&item) {
                failed.push((item, reason));
            }
        }
        failed
    }

    async fn try_add_references(
        &self,
        items: Vec<AddReferencesItem>,
    ) -> Vec<(AddReferencesItem, InsertFailure)> {
        let mut failed = Vec::new();
        for item in items {
            if let Err(reason) = self.insert_reference(&item) {
                failed.push((item, reason));
            }
        }
        failed
    }
}
