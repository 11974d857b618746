// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Table of registered runtime types.
//!
//! Populated once during bootstrap, then shared read-only (wrap it in an
//! `Arc` and hand it to the codec). Registration never overwrites: a name,
//! encoding id or data type id that is already taken makes the call a no-op.

use super::runtime_type::RuntimeType;
use crate::error::RegistryError;
use crate::types::NodeId;
use std::collections::HashMap;
use std::sync::Arc;

/// Runtime types indexed by name, encoding id and data type id.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    by_name: HashMap<String, Arc<RuntimeType>>,
    by_encoding: HashMap<NodeId, Arc<RuntimeType>>,
    by_data_type: HashMap<NodeId, Arc<RuntimeType>>,
}

impl TypeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `ty` unless one of its keys is already registered.
    ///
    /// Returns `true` if the type was added.
    pub fn register(&mut self, ty: RuntimeType) -> bool {
        if self.by_name.contains_key(&ty.name) {
            log::debug!("[TypeRegistry] {} already registered, skipped", ty.name);
            return false;
        }
        if let Some(enc) = &ty.encoding_id {
            if self.by_encoding.contains_key(enc) {
                log::debug!(
                    "[TypeRegistry] encoding {} already registered, {} skipped",
                    enc,
                    ty.name
                );
                return false;
            }
        }
        if self.by_data_type.contains_key(&ty.data_type_id) {
            log::debug!(
                "[TypeRegistry] data type {} already registered, {} skipped",
                ty.data_type_id,
                ty.name
            );
            return false;
        }

        let ty = Arc::new(ty);
        if let Some(enc) = &ty.encoding_id {
            self.by_encoding.insert(enc.clone(), Arc::clone(&ty));
        }
        self.by_data_type
            .insert(ty.data_type_id.clone(), Arc::clone(&ty));
        log::debug!("[TypeRegistry] registered {} ({})", ty.name, ty.data_type_id);
        self.by_name.insert(ty.name.clone(), ty);
        true
    }

    pub fn lookup_by_name(&self, name: &str) -> Result<&Arc<RuntimeType>, RegistryError> {
        self.by_name
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(format!("name {}", name)))
    }

    pub fn lookup_by_encoding_id(
        &self,
        encoding_id: &NodeId,
    ) -> Result<&Arc<RuntimeType>, RegistryError> {
        self.by_encoding
            .get(encoding_id)
            .ok_or_else(|| RegistryError::NotFound(format!("encoding id {}", encoding_id)))
    }

    pub fn lookup_by_data_type_id(
        &self,
        data_type_id: &NodeId,
    ) -> Result<&Arc<RuntimeType>, RegistryError> {
        self.by_data_type
            .get(data_type_id)
            .ok_or_else(|| RegistryError::NotFound(format!("data type id {}", data_type_id)))
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn contains_data_type(&self, data_type_id: &NodeId) -> bool {
        self.by_data_type.contains_key(data_type_id)
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns `true` if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// All types, sorted by name.
    pub fn types(&self) -> Vec<&Arc<RuntimeType>> {
        let mut all: Vec<_> = self.by_name.values().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }
}
