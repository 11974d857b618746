// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Nodeset files: a node batch and a reference batch in TOML.
//!
//! ```toml
//! [[node]]
//! requested_new_node_id = "ns=1;i=3001"
//! parent_node_id = "i=22"
//! reference_type_id = "i=45"
//! browse_name = "PumpStatus"
//! node_class = "DataType"
//!
//! [node.data_type_definition]
//! kind = "structure"
//!
//! [[node.data_type_definition.fields]]
//! name = "Speed"
//! data_type = "i=11"
//!
//! [[reference]]
//! source_node_id = "ns=1;i=3001"
//! reference_type_id = "i=38"
//! target_node_id = "ns=1;i=3002"
//! ```

use super::{AddNodesItem, AddReferencesItem};
use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A node batch plus a reference batch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeSet {
    #[serde(default, rename = "node")]
    pub nodes: Vec<AddNodesItem>,
    #[serde(default, rename = "reference")]
    pub references: Vec<AddReferencesItem>,
}

impl NodeSet {
    /// Load and validate a nodeset file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let set: Self = toml::from_str(&content)?;
        set.validate()?;
        Ok(set)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Reject duplicate node ids and null ids.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for node in &self.nodes {
            let id = &node.requested_new_node_id;
            if id.is_null() {
                return Err(ConfigError::Invalid(format!(
                    "node '{}' has a null node id",
                    node.browse_name
                )));
            }
            if !seen.insert(id) {
                return Err(ConfigError::Invalid(format!("duplicate node id {}", id)));
            }
        }
        if let Some(r) = self
            .references
            .iter()
            .find(|r| r.source_node_id.is_null() || r.target_node_id.is_null())
        {
            return Err(ConfigError::Invalid(format!("reference with null endpoint: {}", r)));
        }
        Ok(())
    }

    /// Append another set.
    pub fn extend(&mut self, other: NodeSet) {
        self.nodes.extend(other.nodes);
        self.references.extend(other.references);
    }

    pub fn len(&self) -> usize {
        self.nodes.len() + self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.references.is_empty()
    }
}
