// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! DataTypeDefinition attribute model.
//!
//! These are the schema records a custom data type node carries: a
//! [`StructureDefinition`] (ordered fields, structure kind, base type, default
//! binary encoding) or an [`EnumDefinition`] (named values). They are created
//! once per node and never mutated afterwards; flattening produces new lists.

use super::NodeId;
use serde::{Deserialize, Serialize};

/// Value rank of a structure field, reduced to what the layout needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueRank {
    #[default]
    Scalar,
    Array,
}

impl ValueRank {
    /// Map a raw OPC UA value rank (and array dimensions) to scalar/array.
    ///
    /// Ranks `>= 1` are arrays; so is any field that declares dimensions
    /// (`OneOrMoreDimensions` fields written with `ArrayDimensions = [1]`).
    pub fn from_raw(rank: i32, array_dimensions: &[u32]) -> Self {
        if rank >= 1 || !array_dimensions.is_empty() {
            Self::Array
        } else {
            Self::Scalar
        }
    }

    pub fn is_array(self) -> bool {
        matches!(self, Self::Array)
    }
}

/// StructureType enumeration (Part 3, 8.49).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureType {
    #[default]
    Structure,
    StructureWithOptionalFields,
    Union,
    StructureWithSubtypedValues,
    UnionWithSubtypedValues,
    Other(i32),
}

impl StructureType {
    pub fn from_raw(value: i32) -> Self {
        match value {
            0 => Self::Structure,
            1 => Self::StructureWithOptionalFields,
            2 => Self::Union,
            3 => Self::StructureWithSubtypedValues,
            4 => Self::UnionWithSubtypedValues,
            other => Self::Other(other),
        }
    }

    pub fn raw(self) -> i32 {
        match self {
            Self::Structure => 0,
            Self::StructureWithOptionalFields => 1,
            Self::Union => 2,
            Self::StructureWithSubtypedValues => 3,
            Self::UnionWithSubtypedValues => 4,
            Self::Other(v) => v,
        }
    }
}

/// One field of a structure definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureField {
    pub name: String,
    pub data_type: NodeId,
    #[serde(default)]
    pub value_rank: ValueRank,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub array_dimensions: Vec<u32>,
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default)]
    pub description: String,
}

impl StructureField {
    /// Scalar, required field.
    pub fn new(name: impl Into<String>, data_type: NodeId) -> Self {
        Self {
            name: name.into(),
            data_type,
            value_rank: ValueRank::Scalar,
            array_dimensions: Vec::new(),
            is_optional: false,
            description: String::new(),
        }
    }

    /// Mark as array-valued.
    pub fn array(mut self) -> Self {
        self.value_rank = ValueRank::Array;
        self
    }

    /// Array with declared dimensions.
    pub fn with_dimensions(mut self, dimensions: Vec<u32>) -> Self {
        self.value_rank = ValueRank::from_raw(-1, &dimensions);
        self.array_dimensions = dimensions;
        self
    }

    /// True when the field carries a sequence of its data type.
    pub fn is_array(&self) -> bool {
        self.value_rank.is_array() || !self.array_dimensions.is_empty()
    }

    /// Mark as optional.
    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// StructureDefinition attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureDefinition {
    #[serde(default)]
    pub fields: Vec<StructureField>,
    #[serde(default)]
    pub structure_type: StructureType,
    #[serde(default)]
    pub base_data_type: NodeId,
    #[serde(default)]
    pub default_encoding_id: NodeId,
}

impl StructureDefinition {
    /// Definition whose structure type follows field optionality.
    pub fn new(fields: Vec<StructureField>) -> Self {
        let structure_type = if fields.iter().any(|f| f.is_optional) {
            StructureType::StructureWithOptionalFields
        } else {
            StructureType::Structure
        };
        Self {
            fields,
            structure_type,
            base_data_type: NodeId::null(),
            default_encoding_id: NodeId::null(),
        }
    }

    pub fn is_optional_variant(&self) -> bool {
        self.structure_type == StructureType::StructureWithOptionalFields
    }
}

/// One named value of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumField {
    pub name: String,
    #[serde(default)]
    pub value: i64,
    #[serde(default)]
    pub description: String,
}

impl EnumField {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
            description: String::new(),
        }
    }
}

/// EnumDefinition attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnumDefinition {
    #[serde(default)]
    pub fields: Vec<EnumField>,
}

/// DataTypeDefinition attribute: structure or enumeration schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataTypeDefinition {
    Structure(StructureDefinition),
    Enumeration(EnumDefinition),
}

impl DataTypeDefinition {
    pub fn as_structure(&self) -> Option<&StructureDefinition> {
        match self {
            Self::Structure(s) => Some(s),
            Self::Enumeration(_) => None,
        }
    }

    pub fn as_enumeration(&self) -> Option<&EnumDefinition> {
        match self {
            Self::Enumeration(e) => Some(e),
            Self::Structure(_) => None,
        }
    }

    /// Short label for log lines.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Structure(_) => "structure",
            Self::Enumeration(_) => "enumeration",
        }
    }
}
