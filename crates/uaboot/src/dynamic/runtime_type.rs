// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Registered runtime types.
//!
//! A [`RuntimeType`] is pure data: an ordered field layout (or an enum member
//! table) that a generic codec walks with a dispatch on [`WireType`]. Nothing
//! type-specific is generated.

use super::builtin::{BuiltinType, WireType};
use crate::types::{NodeId, StructValue, UaValue};

/// Name of the synthetic optional-field mask.
pub const ENCODING_MASK_FIELD: &str = "Encoding";

/// Structure flavour of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructKind {
    Structure,
    StructureWithOptionalFields,
}

/// One layout entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutField {
    /// Sanitized identifier.
    pub name: String,
    /// Name as declared in the definition.
    pub source_name: String,
    pub wire: WireType,
    /// Bit in the encoding mask for optional fields.
    pub optional_bit: Option<u8>,
    /// Value of an unset instance.
    pub default: UaValue,
}

impl LayoutField {
    pub fn is_optional(&self) -> bool {
        self.optional_bit.is_some()
    }

    pub fn is_mask(&self) -> bool {
        self.optional_bit.is_none() && self.name == ENCODING_MASK_FIELD && self.source_name.is_empty()
    }
}

/// Binary layout of a structure.
#[derive(Debug, Clone, PartialEq)]
pub struct StructLayout {
    pub kind: StructKind,
    /// Fields in wire order; the mask first when `kind` has optional fields.
    pub fields: Vec<LayoutField>,
}

impl StructLayout {
    /// Width of the encoding mask, if any.
    pub fn mask_type(&self) -> Option<BuiltinType> {
        match self.fields.first() {
            Some(f) if f.is_mask() => match f.wire {
                WireType::Builtin(b) => Some(b),
                _ => None,
            },
            _ => None,
        }
    }

    /// Declared fields, without the mask.
    pub fn data_fields(&self) -> impl Iterator<Item = &LayoutField> {
        self.fields.iter().filter(|f| !f.is_mask())
    }

    pub fn field(&self, name: &str) -> Option<&LayoutField> {
        self.data_fields().find(|f| f.name == name)
    }

    /// Optional fields mapped to their mask bit.
    pub fn optional_bits(&self) -> Vec<(&str, u8)> {
        self.fields
            .iter()
            .filter_map(|f| f.optional_bit.map(|bit| (f.name.as_str(), bit)))
            .collect()
    }
}

/// How enum members map to wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumFlavor {
    /// Int32 on the wire; member value is its position.
    Plain,
    /// Bit flags stored in the given unsigned type; member value is `1 << position`.
    OptionSet(BuiltinType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    pub name: String,
    pub value: i64,
}

/// Member table of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumLayout {
    pub flavor: EnumFlavor,
    pub members: Vec<EnumMember>,
}

impl EnumLayout {
    pub fn value_of(&self, name: &str) -> Option<i64> {
        self.members.iter().find(|m| m.name == name).map(|m| m.value)
    }

    pub fn name_of(&self, value: i64) -> Option<&str> {
        self.members
            .iter()
            .find(|m| m.value == value)
            .map(|m| m.name.as_str())
    }

    /// Storage type on the wire.
    pub fn storage(&self) -> BuiltinType {
        match self.flavor {
            EnumFlavor::Plain => BuiltinType::Int32,
            EnumFlavor::OptionSet(b) => b,
        }
    }
}

/// Payload of a runtime type.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeKind {
    Structure(StructLayout),
    Enumeration(EnumLayout),
}

/// A synthesized, registered data type.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeType {
    pub name: String,
    pub data_type_id: NodeId,
    /// Binary encoding id; enumerations have none.
    pub encoding_id: Option<NodeId>,
    pub kind: RuntimeKind,
}

impl RuntimeType {
    pub fn as_struct(&self) -> Option<&StructLayout> {
        match &self.kind {
            RuntimeKind::Structure(layout) => Some(layout),
            RuntimeKind::Enumeration(_) => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumLayout> {
        match &self.kind {
            RuntimeKind::Enumeration(layout) => Some(layout),
            RuntimeKind::Structure(_) => None,
        }
    }

    pub fn is_struct(&self) -> bool {
        matches!(self.kind, RuntimeKind::Structure(_))
    }

    /// Wire tag other layouts use to reference this type.
    pub fn wire_type(&self) -> WireType {
        match self.kind {
            RuntimeKind::Structure(_) => WireType::Structure(self.name.clone()),
            RuntimeKind::Enumeration(_) => WireType::Enumeration(self.name.clone()),
        }
    }

    /// Value of an unset instance of this type.
    pub fn default_value(&self) -> UaValue {
        match &self.kind {
            RuntimeKind::Structure(layout) => UaValue::Structure(StructValue {
                type_name: self.name.clone(),
                fields: layout
                    .fields
                    .iter()
                    .map(|f| (f.name.clone(), f.default.clone()))
                    .collect(),
            }),
            RuntimeKind::Enumeration(_) => UaValue::Enumeration(0),
        }
    }
}
