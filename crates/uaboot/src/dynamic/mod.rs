// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic type system
//!
//! Custom structure and enumeration types are discovered in the address
//! space at runtime and registered as data-only [`RuntimeType`]s that a
//! generic binary codec walks.
//!
//! # Pipeline
//!
//! - **SchemaReader**: fetches one node's DataTypeDefinition, skipping
//!   platform and excluded names
//! - **Flattening**: a subtype's fields follow its parent's
//! - **DependencyOrderer**: topological order over custom field and base types
//! - **FieldLayoutCompiler**: ordered wire layout with the optional-field mask
//! - **TypeRegistry**: lookup by name, encoding id and data type id
//!
//! # Example
//!
//! ```rust
//! use uaboot::address_space::{core_type_nodes, MemoryAddressSpace, StructureBuilder};
//! use uaboot::config::BootstrapConfig;
//! use uaboot::dynamic::{StructInstance, TypeBootstrap};
//! use uaboot::types::{ids, NodeId, StructureField};
//!
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let space = MemoryAddressSpace::new();
//! let mut set = core_type_nodes();
//! set.extend(
//!     StructureBuilder::new(NodeId::numeric(1, 3001), "Reading")
//!         .encoding_id(NodeId::numeric(1, 3002))
//!         .field(StructureField::new("Speed", ids::DOUBLE))
//!         .field(StructureField::new("Label", ids::STRING).optional())
//!         .build(),
//! );
//! for node in &set.nodes {
//!     space.insert_node(node).unwrap();
//! }
//!
//! let mut boot = TypeBootstrap::new(&space, BootstrapConfig::default());
//! boot.load_data_type_definitions().await.unwrap();
//!
//! let reading = boot.registry().lookup_by_name("Reading").unwrap();
//! let mut value = StructInstance::new(reading).unwrap();
//! value.set("Label", "pump 1").unwrap();
//! assert_eq!(value.encoding_mask(), 0b1);
//! # });
//! ```

mod bootstrap;
mod builtin;
mod descriptor;
mod flatten;
mod instance;
mod layout;
mod ordering;
mod reader;
mod registry;
mod runtime_type;

pub use bootstrap::{BootstrapReport, SkipReason, SkippedType, TypeBootstrap};
pub use builtin::{BuiltinCatalog, BuiltinType, WireType};
pub use descriptor::TypeDescriptor;
pub use flatten::{flatten_definition, flatten_fields};
pub use instance::{InstanceError, StructInstance};
pub use layout::{sanitize, FieldLayoutCompiler};
pub use ordering::DependencyOrderer;
pub use reader::{ReadOutcome, SchemaReader};
pub use registry::TypeRegistry;
pub use runtime_type::{
    EnumFlavor, EnumLayout, EnumMember, LayoutField, RuntimeKind, RuntimeType, StructKind,
    StructLayout, ENCODING_MASK_FIELD,
};
