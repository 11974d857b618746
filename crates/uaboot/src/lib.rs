// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # uaboot - OPC UA information-model bootstrap
//!
//! Builds the initial address space of an OPC UA server or client and the
//! registry of custom data types whose schemas live in it.
//!
//! ## Quick Start
//!
//! ```rust
//! use uaboot::address_space::{
//!     bulk_load_address_space, core_type_nodes, EnumBuilder, MemoryAddressSpace,
//!     StructureBuilder,
//! };
//! use uaboot::config::BootstrapConfig;
//! use uaboot::dynamic::TypeBootstrap;
//! use uaboot::types::{ids, NodeId, StructureField};
//!
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let config = BootstrapConfig::default();
//! let space = MemoryAddressSpace::new();
//!
//! let mut set = core_type_nodes();
//! set.extend(EnumBuilder::new(NodeId::numeric(1, 100), "Mode").values(["Idle", "Run"]).build());
//! set.extend(
//!     StructureBuilder::new(NodeId::numeric(1, 200), "PumpStatus")
//!         .encoding_id(NodeId::numeric(1, 201))
//!         .field(StructureField::new("Mode", NodeId::numeric(1, 100)))
//!         .field(StructureField::new("Speed", ids::DOUBLE))
//!         .build(),
//! );
//! bulk_load_address_space(&space, set.nodes, set.references, config.retry)
//!     .await
//!     .unwrap();
//!
//! let mut boot = TypeBootstrap::new(&space, config);
//! boot.load_data_type_definitions().await.unwrap();
//! let registry = boot.into_registry();
//! assert!(registry.lookup_by_encoding_id(&NodeId::numeric(1, 201)).is_ok());
//! # });
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |  TypeBootstrap                                                      |
//! |   SchemaReader -> flatten -> DependencyOrderer -> FieldLayoutCompiler|
//! |                                                  -> TypeRegistry    |
//! +---------------------------------------------------------------------+
//! |  BulkLoader: insert pass, deferred retry, Done | Failed             |
//! +---------------------------------------------------------------------+
//! |  TypeDefinitionSource / NodeSink (session or MemoryAddressSpace)    |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Modules Overview
//!
//! - [`types`] - node ids, definitions, values
//! - [`address_space`] - collaborator traits, in-memory store, bulk loader
//! - [`dynamic`] - type discovery and the runtime type registry
//! - [`config`] - TOML configuration
//! - [`error`] - error kinds

pub mod address_space;
pub mod config;
pub mod dynamic;
pub mod error;
pub mod types;

pub use address_space::{bulk_load_address_space, BulkLoader, MemoryAddressSpace, NodeSet};
pub use config::{BootstrapConfig, ConfigError, RetryPolicy};
pub use dynamic::{RuntimeType, StructInstance, TypeBootstrap, TypeRegistry};
pub use error::{BootstrapError, CompileError, LoadError, OrderError, ReadError, RegistryError};
pub use types::{NodeId, UaValue};
