// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Discovered type descriptors.

use super::builtin::BuiltinCatalog;
use super::layout::sanitize;
use super::runtime_type::EnumFlavor;
use crate::types::{DataTypeDefinition, NodeId};
use std::collections::BTreeSet;

/// One custom type found during discovery, schema already flattened.
///
/// Lives until its runtime type is compiled.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    pub data_type_id: NodeId,
    /// Sanitized type name.
    pub name: String,
    pub encoding_id: Option<NodeId>,
    pub schema: DataTypeDefinition,
    /// Enumerations only.
    pub flavor: EnumFlavor,
    /// Custom (non-catalog) data types this type needs registered first.
    pub dependencies: BTreeSet<NodeId>,
}

impl TypeDescriptor {
    /// Build a descriptor, deriving dependencies from the schema.
    ///
    /// A structure depends on every field type the catalog does not know and
    /// on a custom base data type. A field of the type's own data type makes
    /// it depend on itself.
    pub fn new(
        data_type_id: NodeId,
        browse_name: &str,
        schema: DataTypeDefinition,
        catalog: &BuiltinCatalog,
    ) -> Self {
        let mut dependencies = BTreeSet::new();
        let mut encoding_id = None;

        if let DataTypeDefinition::Structure(def) = &schema {
            for field in &def.fields {
                if !catalog.contains(&field.data_type) {
                    dependencies.insert(field.data_type.clone());
                }
            }
            let base = &def.base_data_type;
            if !base.is_null() && !catalog.contains(base) && base != &data_type_id {
                dependencies.insert(base.clone());
            }
            if !def.default_encoding_id.is_null() {
                encoding_id = Some(def.default_encoding_id.clone());
            }
        }

        let name = sanitize(browse_name);
        if name != browse_name {
            log::warn!("[TypeBootstrap] renamed type '{}' to '{}'", browse_name, name);
        }

        Self {
            data_type_id,
            name,
            encoding_id,
            schema,
            flavor: EnumFlavor::Plain,
            dependencies,
        }
    }

    pub fn with_encoding_id(mut self, encoding_id: NodeId) -> Self {
        self.encoding_id = Some(encoding_id);
        self
    }

    pub fn with_flavor(mut self, flavor: EnumFlavor) -> Self {
        self.flavor = flavor;
        self
    }

    pub fn is_structure(&self) -> bool {
        matches!(self.schema, DataTypeDefinition::Structure(_))
    }
}
