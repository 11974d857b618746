// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bootstrap configuration.
//!
//! Supports both programmatic and file-based configuration.

use crate::types::{ids, NodeId};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// How the bulk loader re-attempts deferred entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RetryPolicy {
    /// One insert pass plus exactly one retry pass.
    #[default]
    SinglePass,

    /// Keep retrying while the pending set shrinks, up to `max_passes`
    /// retry passes.
    UntilFixedPoint { max_passes: u32 },
}

impl RetryPolicy {
    /// Upper bound on retry passes.
    pub fn max_retries(&self) -> u32 {
        match self {
            Self::SinglePass => 1,
            Self::UntilFixedPoint { max_passes } => *max_passes,
        }
    }
}

/// Type bootstrap and bulk-load configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Type names the schema reader always skips.
    #[serde(default = "default_excluded_names")]
    pub excluded_names: Vec<String>,

    /// Root of the enumeration subtype tree.
    #[serde(default = "default_enumeration_root")]
    pub enumeration_root: NodeId,

    /// Root of the structure subtype tree.
    #[serde(default = "default_structure_root")]
    pub structure_root: NodeId,

    /// Unsigned integer roots whose enum-carrying subtypes are option sets.
    #[serde(default = "default_option_set_roots")]
    pub option_set_roots: Vec<NodeId>,

    /// Bulk loader retry policy.
    #[serde(default)]
    pub retry: RetryPolicy,
}

fn default_excluded_names() -> Vec<String> {
    vec!["FilterOperand".to_string()]
}

fn default_enumeration_root() -> NodeId {
    ids::ENUMERATION
}

fn default_structure_root() -> NodeId {
    ids::STRUCTURE
}

fn default_option_set_roots() -> Vec<NodeId> {
    vec![ids::BYTE, ids::UINT16, ids::UINT32, ids::UINT64]
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            excluded_names: default_excluded_names(),
            enumeration_root: default_enumeration_root(),
            structure_root: default_structure_root(),
            option_set_roots: default_option_set_roots(),
            retry: RetryPolicy::default(),
        }
    }
}

impl BootstrapConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enumeration_root.is_null() {
            return Err(ConfigError::Invalid("enumeration_root is null".into()));
        }
        if self.structure_root.is_null() {
            return Err(ConfigError::Invalid("structure_root is null".into()));
        }
        if self.enumeration_root == self.structure_root {
            return Err(ConfigError::Invalid(format!(
                "enumeration_root and structure_root are both {}",
                self.structure_root
            )));
        }
        if let Some(root) = self.option_set_roots.iter().find(|r| r.is_null()) {
            return Err(ConfigError::Invalid(format!("null option set root {}", root)));
        }
        if self.excluded_names.iter().any(|n| n.trim().is_empty()) {
            return Err(ConfigError::Invalid("empty excluded name".into()));
        }
        if let RetryPolicy::UntilFixedPoint { max_passes: 0 } = self.retry {
            return Err(ConfigError::Invalid(
                "until_fixed_point retry needs max_passes >= 1".into(),
            ));
        }
        Ok(())
    }

    /// Skip one more type name.
    pub fn with_excluded(mut self, name: impl Into<String>) -> Self {
        self.excluded_names.push(name.into());
        self
    }

    /// Set the bulk loader retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the structure subtype root.
    pub fn with_structure_root(mut self, root: NodeId) -> Self {
        self.structure_root = root;
        self
    }

    /// Set the enumeration subtype root.
    pub fn with_enumeration_root(mut self, root: NodeId) -> Self {
        self.enumeration_root = root;
        self
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_names.iter().any(|n| n == name)
    }
}
