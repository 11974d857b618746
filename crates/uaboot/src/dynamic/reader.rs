// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema reader: fetches one node's DataTypeDefinition.

use super::builtin::BuiltinCatalog;
use super::layout::sanitize;
use crate::address_space::{ReferenceDescription, TypeDefinitionSource};
use crate::config::BootstrapConfig;
use crate::error::ReadError;
use crate::types::{DataTypeDefinition, NodeId};

/// Result of reading one discovered data type node.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    Definition(DataTypeDefinition),
    /// The browse name is a platform type; nothing was read.
    BuiltinName,
    /// The browse name is on the exclusion list; nothing was read.
    Excluded,
    /// The node has no DataTypeDefinition attribute.
    NotApplicable,
    /// Any other read failure.
    ReadFailed(ReadError),
}

/// Reads definitions through a [`TypeDefinitionSource`].
///
/// Failures never escape: they come back as a [`ReadOutcome`] and are
/// logged at `warn`.
pub struct SchemaReader<'a, S> {
    source: &'a S,
    catalog: &'a BuiltinCatalog,
    config: &'a BootstrapConfig,
}

impl<'a, S: TypeDefinitionSource> SchemaReader<'a, S> {
    pub fn new(source: &'a S, catalog: &'a BuiltinCatalog, config: &'a BootstrapConfig) -> Self {
        Self {
            source,
            catalog,
            config,
        }
    }

    /// True if `browse_name` names a platform type.
    pub fn is_builtin(&self, browse_name: &str) -> bool {
        self.catalog.is_builtin_name(browse_name)
            || self.catalog.is_builtin_name(&sanitize(browse_name))
    }

    pub async fn read(&self, desc: &ReferenceDescription) -> ReadOutcome {
        if self.config.is_excluded(&desc.browse_name) {
            log::debug!("[SchemaReader] {} '{}' excluded", desc.node_id, desc.browse_name);
            return ReadOutcome::Excluded;
        }
        if self.is_builtin(&desc.browse_name) {
            log::trace!("[SchemaReader] {} '{}' is built in", desc.node_id, desc.browse_name);
            return ReadOutcome::BuiltinName;
        }

        log::debug!("[SchemaReader] reading {} '{}'", desc.node_id, desc.browse_name);
        match self.source.read_type_definition(&desc.node_id).await {
            Ok(def) => ReadOutcome::Definition(def),
            Err(ReadError::AttributeNotApplicable(node)) => {
                log::warn!("[SchemaReader] {} has no DataTypeDefinition attribute", node);
                ReadOutcome::NotApplicable
            }
            Err(e) => {
                log::warn!("[SchemaReader] reading {} failed: {}", desc.node_id, e);
                ReadOutcome::ReadFailed(e)
            }
        }
    }

    /// Definition of `node` regardless of its name; any failure is `None`.
    pub async fn read_unchecked(&self, node: &NodeId) -> Option<DataTypeDefinition> {
        self.source.read_type_definition(node).await.ok()
    }
}
