// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Node and reference records exchanged with the address space.

use crate::types::{DataTypeDefinition, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Node class (Part 3, 8.29).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeClass {
    Object,
    Variable,
    Method,
    ObjectType,
    VariableType,
    ReferenceType,
    DataType,
    View,
}

/// One browse result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDescription {
    pub node_id: NodeId,
    pub browse_name: String,
    pub node_class: NodeClass,
}

/// A node to insert.
///
/// A null `parent_node_id` inserts a root node without a parent reference;
/// a null `type_definition` skips the `HasTypeDefinition` check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddNodesItem {
    pub requested_new_node_id: NodeId,
    #[serde(default)]
    pub parent_node_id: NodeId,
    #[serde(default)]
    pub reference_type_id: NodeId,
    pub browse_name: String,
    pub node_class: NodeClass,
    #[serde(default)]
    pub type_definition: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type_definition: Option<DataTypeDefinition>,
}

impl AddNodesItem {
    pub fn new(
        node_id: NodeId,
        browse_name: impl Into<String>,
        node_class: NodeClass,
    ) -> Self {
        Self {
            requested_new_node_id: node_id,
            parent_node_id: NodeId::null(),
            reference_type_id: NodeId::null(),
            browse_name: browse_name.into(),
            node_class,
            type_definition: NodeId::null(),
            data_type_definition: None,
        }
    }

    /// Attach under `parent` through `reference_type`.
    pub fn under(mut self, parent: NodeId, reference_type: NodeId) -> Self {
        self.parent_node_id = parent;
        self.reference_type_id = reference_type;
        self
    }

    pub fn with_type_definition(mut self, type_definition: NodeId) -> Self {
        self.type_definition = type_definition;
        self
    }

    pub fn with_definition(mut self, definition: DataTypeDefinition) -> Self {
        self.data_type_definition = Some(definition);
        self
    }
}

fn default_true() -> bool {
    true
}

/// A reference to insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddReferencesItem {
    pub source_node_id: NodeId,
    pub reference_type_id: NodeId,
    pub target_node_id: NodeId,
    #[serde(default = "default_true")]
    pub is_forward: bool,
}

impl AddReferencesItem {
    pub fn new(source: NodeId, reference_type: NodeId, target: NodeId) -> Self {
        Self {
            source_node_id: source,
            reference_type_id: reference_type,
            target_node_id: target,
            is_forward: true,
        }
    }
}

impl fmt::Display for AddReferencesItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.is_forward { "->" } else { "<-" };
        write!(
            f,
            "{} {}[{}] {}",
            self.source_node_id, arrow, self.reference_type_id, self.target_node_id
        )
    }
}

/// Why a single node or reference was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertFailure {
    NodeIdExists,
    ParentMissing(NodeId),
    TypeDefinitionMissing(NodeId),
    SourceMissing(NodeId),
    TargetMissing(NodeId),
}

impl InsertFailure {
    /// The absent node this failure waits for, if any.
    pub fn missing_dependency(&self) -> Option<&NodeId> {
        match self {
            Self::NodeIdExists => None,
            Self::ParentMissing(id)
            | Self::TypeDefinitionMissing(id)
            | Self::SourceMissing(id)
            | Self::TargetMissing(id) => Some(id),
        }
    }
}

impl fmt::Display for InsertFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeIdExists => write!(f, "node id already exists"),
            Self::ParentMissing(id) => write!(f, "parent {} missing", id),
            Self::TypeDefinitionMissing(id) => write!(f, "type definition {} missing", id),
            Self::SourceMissing(id) => write!(f, "source {} missing", id),
            Self::TargetMissing(id) => write!(f, "target {} missing", id),
        }
    }
}
