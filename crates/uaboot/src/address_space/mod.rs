// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Address space: collaborator traits, an in-memory implementation, the
//! bulk loader and nodeset authoring.

mod authoring;
mod items;
mod loader;
mod memory;
mod nodeset;
mod source;

pub use authoring::{core_type_nodes, EnumBuilder, StructureBuilder};
pub use items::{
    AddNodesItem, AddReferencesItem, InsertFailure, NodeClass, ReferenceDescription,
};
pub use loader::{
    bulk_load_address_space, BulkEntry, BulkLoader, LoadReport, LoadState, UnresolvedEntries,
    UnresolvedNode, UnresolvedReference,
};
pub use memory::{MemoryAddressSpace, NodeRecord, StoredReference};
pub use nodeset::NodeSet;
pub use source::{NodeSink, TypeDefinitionSource};
