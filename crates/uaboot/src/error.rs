// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for the bootstrap passes.
//!
//! Recoverable kinds are logged at `warn` and skip a single node or type;
//! fatal kinds abort the whole pass and surface every failing identifier.

use crate::address_space::UnresolvedEntries;
use crate::types::{NodeId, StructureType};
use thiserror::Error;

/// Failure reported by the node-tree collaborator on a read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("node {0} has no DataTypeDefinition attribute")]
    AttributeNotApplicable(NodeId),

    #[error("remote read of {node} failed: {reason}")]
    Remote { node: NodeId, reason: String },
}

/// Failure turning a flattened definition into a runtime type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("type {type_name}: field {field} has unresolved data type {data_type}")]
    UnresolvedFieldType {
        type_name: String,
        field: String,
        data_type: NodeId,
    },

    #[error("type {type_name}: unsupported structure kind {kind:?}")]
    UnsupportedStructureKind {
        type_name: String,
        kind: StructureType,
    },

    #[error("type {type_name}: {count} optional fields exceed the 32-bit encoding mask")]
    TooManyOptionalFields { type_name: String, count: usize },

    #[error("type {type_name} does not carry an enumeration definition")]
    NotAnEnumeration { type_name: String },

    #[error("type {type_name} does not carry a structure definition")]
    NotAStructure { type_name: String },
}

impl CompileError {
    /// Fatal errors abort the bootstrap; the rest skip one type.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::UnresolvedFieldType { .. })
    }
}

/// Dependency ordering failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("cyclic type dependency: {}", format_cycle(.cycle))]
    CyclicTypeDependency { cycle: Vec<NodeId> },
}

fn format_cycle(cycle: &[NodeId]) -> String {
    let mut parts: Vec<String> = cycle.iter().map(ToString::to_string).collect();
    if let Some(first) = parts.first().cloned() {
        parts.push(first);
    }
    parts.join(" -> ")
}

/// Registry lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("no registered type for {0}")]
    NotFound(String),
}

/// Bulk address-space load failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("address space incomplete after retry: {0}")]
    AddressSpaceIncomplete(UnresolvedEntries),
}

/// Fatal type-bootstrap failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BootstrapError {
    #[error("browsing children of {node} failed: {source}")]
    Browse { node: NodeId, source: ReadError },

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Order(#[from] OrderError),
}
