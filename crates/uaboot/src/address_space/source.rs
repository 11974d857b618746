// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Collaborator traits for the node tree.
//!
//! The bootstrap never talks to a session or server directly: it browses and
//! reads through [`TypeDefinitionSource`] and inserts through [`NodeSink`].
//! Every call is an await point; implementations may be remote (a client
//! session) or local ([`MemoryAddressSpace`](super::MemoryAddressSpace)).

use super::{AddNodesItem, AddReferencesItem, InsertFailure, ReferenceDescription};
use crate::error::ReadError;
use crate::types::{DataTypeDefinition, NodeId};

/// Read access used by type discovery.
pub trait TypeDefinitionSource: Send + Sync {
    /// Forward references of `reference_type` from `node`, in browse order.
    fn get_child_descriptions(
        &self,
        node: &NodeId,
        reference_type: &NodeId,
    ) -> impl std::future::Future<Output = Result<Vec<ReferenceDescription>, ReadError>> + Send;

    /// The DataTypeDefinition attribute of `node`.
    ///
    /// # Errors
    ///
    /// - [`ReadError::AttributeNotApplicable`] when the node has no definition
    /// - [`ReadError::Remote`] on any transport-level failure
    fn read_type_definition(
        &self,
        node: &NodeId,
    ) -> impl std::future::Future<Output = Result<DataTypeDefinition, ReadError>> + Send;
}

/// Write access used by the bulk loader.
///
/// Both calls insert what they can and hand back the rejected entries with
/// their reasons; a rejection is never an error of the call itself.
pub trait NodeSink: Send + Sync {
    fn try_add_nodes(
        &self,
        items: Vec<AddNodesItem>,
    ) -> impl std::future::Future<Output = Vec<(AddNodesItem, InsertFailure)>> + Send;

    fn try_add_references(
        &self,
        items: Vec<AddReferencesItem>,
    ) -> impl std::future::Future<Output = Vec<(AddReferencesItem, InsertFailure)>> + Send;
}
