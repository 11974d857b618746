// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic values for structure instances and field defaults.

use super::NodeId;

/// A value of any built-in or registered data type.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UaValue {
    #[default]
    Null,

    // Primitives
    Boolean(bool),
    SByte(i8),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float(f32),
    Double(f64),
    String(String),
    /// 100ns ticks since 1601-01-01 UTC.
    DateTime(i64),
    Guid([u8; 16]),
    ByteString(Vec<u8>),
    XmlElement(String),
    NodeId(NodeId),
    StatusCode(u32),
    QualifiedName {
        namespace: u16,
        name: String,
    },
    LocalizedText {
        locale: String,
        text: String,
    },

    // Composites
    Enumeration(i64),
    Structure(StructValue),
    Array(Vec<UaValue>),
}

/// Field values of a structure, in layout order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructValue {
    pub type_name: String,
    pub fields: Vec<(String, UaValue)>,
}

impl StructValue {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&UaValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}

impl UaValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> Option<u8> {
        match self {
            Self::Byte(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::UInt32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(v) | Self::Enumeration(v) | Self::DateTime(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) | Self::XmlElement(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[UaValue]> {
        match self {
            Self::Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Self::Structure(v) => Some(v),
            _ => None,
        }
    }
}

// Conversion traits
impl From<bool> for UaValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<u8> for UaValue {
    fn from(v: u8) -> Self {
        Self::Byte(v)
    }
}

impl From<i32> for UaValue {
    fn from(v: i32) -> Self {
        Self::Int32(v)
    }
}

impl From<u32> for UaValue {
    fn from(v: u32) -> Self {
        Self::UInt32(v)
    }
}

impl From<i64> for UaValue {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<f64> for UaValue {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<String> for UaValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for UaValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<NodeId> for UaValue {
    fn from(v: NodeId) -> Self {
        Self::NodeId(v)
    }
}

impl<T: Into<UaValue>> From<Vec<T>> for UaValue {
    fn from(v: Vec<T>) -> Self {
        Self::Array(v.into_iter().map(Into::into).collect())
    }
}
